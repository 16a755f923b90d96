//! Engine-level helpers that drive a [`core::GameState`] through whole moves.
//!
//! Bots, puzzle scripts and benches describe a placement as "rotate this many
//! times, go to this column, drop" instead of individual key presses.

pub mod place;

pub use relic_tetris_core as core;
pub use relic_tetris_types as types;

pub use place::{apply_place, PlaceError};
