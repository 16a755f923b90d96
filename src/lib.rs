//! Relic Tetris (workspace facade crate).
//!
//! Re-exports `relic_tetris::{core,engine,input,term,types}` so integration
//! tests and the binary use one import root while the implementation lives in
//! dedicated crates under `crates/`.

pub use relic_tetris_core as core;
pub use relic_tetris_engine as engine;
pub use relic_tetris_input as input;
pub use relic_tetris_term as term;
pub use relic_tetris_types as types;
