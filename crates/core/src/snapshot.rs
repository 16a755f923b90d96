//! Read-only view of a game, taken after a mutation completes.
//!
//! Renderers consume snapshots and never touch `GameState` directly.

use serde::Serialize;

use crate::piece::ActivePiece;
use crate::relics::Tunables;
use crate::shapes::Matrix;
use crate::types::{Cell, GamePhase, PieceKind, RelicId, RuleSet, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

/// Numbers shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub bomb_charges: u32,
    pub shields: u32,
    pub drop_interval_ms: u32,
}

/// One offered relic with its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelicCard {
    pub id: RelicId,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<RelicId> for RelicCard {
    fn from(id: RelicId) -> Self {
        Self {
            id,
            name: id.name(),
            description: id.description(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub variant: Variant,
    pub phase: GamePhase,
    pub width: u8,
    pub height: u8,
    /// Settled cells, rows top to bottom
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece, when the variant shows a ghost
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub holds_left: u8,
    pub stats: StatsSnapshot,
    pub tunables: Tunables,
    pub relic_offer: Vec<RelicCard>,
    pub acquired_relics: Vec<RelicId>,
    pub revision: u64,
}

impl GameSnapshot {
    /// Cell of the settled board, `None` when out of range or empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            phase: GamePhase::Playing,
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            hold: None,
            holds_left: 0,
            stats: StatsSnapshot::default(),
            tunables: Tunables::from_rules(&RuleSet::classic()),
            relic_offer: Vec::new(),
            acquired_relics: Vec::new(),
            revision: 0,
        }
    }
}
