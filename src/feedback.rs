//! Audio/haptic collaborator: fire-and-forget cues keyed by event kind.
//!
//! The terminal has no speaker API or vibration motor, so the real sink maps
//! everything to BEL and drops vibration patterns. Failures are swallowed;
//! the game never depends on a cue landing.

use std::io::Write;

/// Best-effort feedback notifications.
pub trait FeedbackSink {
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;

    /// A clear completed, sized by line count.
    fn line_clear(&mut self, lines: u32);
    fn game_over(&mut self);
    /// Device vibration pattern in milliseconds; ignored where unsupported.
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Terminal bell sink.
#[derive(Debug, Default)]
pub struct TerminalFeedback {
    muted: bool,
}

impl TerminalFeedback {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    fn bell(&self, count: u32) {
        if self.muted {
            return;
        }
        let mut stdout = std::io::stdout();
        for _ in 0..count {
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}

impl FeedbackSink for TerminalFeedback {
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn line_clear(&mut self, lines: u32) {
        // Bigger clears ring louder, the terminal version of the celebratory
        // sound tiers.
        self.bell(if lines >= 4 { 2 } else { 1 });
    }

    fn game_over(&mut self) {
        self.bell(1);
    }

    fn vibrate(&mut self, _pattern: &[u32]) {
        // No motor to drive.
    }
}

/// Silent sink for tests; records what it was asked to play.
#[derive(Debug, Default)]
pub struct NullFeedback {
    muted: bool,
    pub clears: Vec<u32>,
    pub game_overs: u32,
    pub vibrations: Vec<Vec<u32>>,
}

impl FeedbackSink for NullFeedback {
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn line_clear(&mut self, lines: u32) {
        self.clears.push(lines);
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        self.vibrations.push(pattern.to_vec());
    }
}
