//! Input module: key mapping and debounce.

pub mod handler;
pub mod map;

pub use handler::InputHandler;
pub use map::{action_for_key, is_mute_toggle, should_quit};
