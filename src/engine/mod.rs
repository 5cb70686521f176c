//! Engine module - drives the core from elapsed time.
//!
//! Owns the session wrapper, the scheduling seam, and the presentation-side
//! effect records. No terminal code lives here; `main` plugs in the real
//! clock and the term layer renders the snapshots.

pub mod effects;
pub mod scheduler;
pub mod session;

pub use effects::{DropTrail, Effects, Particle};
pub use scheduler::{RecordingScheduler, TickScheduler};
pub use session::Session;
