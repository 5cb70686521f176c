//! The scheduling seam between the session and the display loop.
//!
//! The original design hangs off a display-refresh callback that re-arms
//! itself each frame. Hiding that behind a trait keeps the tick logic free of
//! any particular refresh API: the real driver paces frames off the wall
//! clock, tests record the calls and feed synthetic elapsed times.

/// One-shot tick scheduling.
///
/// `schedule` requests exactly one more tick callback; the session calls it
/// at the end of every frame it wants to be followed by another. `cancel`
/// drops any pending request, used on pause, reward wait, and game over so
/// the driver can idle on input instead of spinning.
pub trait TickScheduler {
    fn schedule(&mut self);
    fn cancel(&mut self);
}

/// Scheduler that records calls; the unit tests' display loop stand-in.
#[derive(Debug, Default, Clone)]
pub struct RecordingScheduler {
    pub scheduled: u32,
    pub cancelled: u32,
}

impl TickScheduler for RecordingScheduler {
    fn schedule(&mut self) {
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        self.cancelled += 1;
    }
}
