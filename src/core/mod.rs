//! Core module - pure game logic with no I/O dependencies.
//!
//! Everything that decides what happens on the board lives here; the engine
//! and terminal layers only feed it time and input and read snapshots back.

pub mod board;
pub mod game;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use game::{ClearAnimation, Game, GameEvent, TrailSpec};
pub use piece::Tetromino;
pub use rng::SimpleRng;
pub use snapshot::RenderFrame;
