//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic
//! for every variant. It has **zero dependencies** on terminals or I/O:
//!
//! - **Deterministic**: the same seed and command sequence produce the same game
//! - **Testable**: each rule lives in a small module with its own unit tests
//! - **Portable**: hosts drive it with commands and elapsed time only
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetromino templates and matrix rotation
//! - [`board`]: the settled-cell grid, line clears, shield and bomb clears
//! - [`piece`]: the active piece, collision, wall kicks and drop position
//! - [`progression`]: score, combo, level, gravity and bomb charges
//! - [`relics`]: relic tunables and the pure effect function
//! - [`rng`]: seeded piece and relic draws
//! - [`game_state`]: the state machine that ties it all together
//! - [`snapshot`]: read-only views for renderers
//!
//! # Variants
//!
//! - **Classic**: 20x10 board, no hold, no bombs, no ghost
//! - **Arsenal**: 30x16 board, hold, ghost, combo bonus, bomb charges
//! - **Relic**: Arsenal plus a pick of relics every few levels, and shields
//!
//! # Example
//!
//! ```
//! use relic_tetris_core::GameState;
//! use relic_tetris_types::{Command, GamePhase, Variant};
//!
//! let mut game = GameState::new(Variant::Arsenal, 12345);
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//! game.apply_command(Command::HardDrop);
//!
//! assert_eq!(game.phase(), GamePhase::Playing);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Hosts call [`GameState::advance`](game_state::GameState::advance) with the
//! elapsed milliseconds (typically every [`types::TICK_MS`]). Once the
//! accumulated time exceeds the level's drop interval the piece falls one row.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod progression;
pub mod relics;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use relic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use piece::{collides, drop_position, try_rotate, ActivePiece, KICK_OFFSETS};
pub use progression::{LockOutcome, Progression};
pub use relics::{apply_relic, Tunables};
pub use rng::Randomizer;
pub use shapes::{base_matrix, Matrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot, RelicCard, StatsSnapshot};
