//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values. The game
//! reacts to key presses only; repeats come from the terminal's own key
//! repeat.

pub mod map;

pub use relic_tetris_types as types;

pub use map::{handle_key_event, should_quit};
