//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a core snapshot into a framebuffer of styled cells, which is
//! then flushed to the terminal with diffed redraws.
//!
//! Board cells are 2 columns wide by default to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use relic_tetris_core as core;
pub use relic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, StatusLine, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
