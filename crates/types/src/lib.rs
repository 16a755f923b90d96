//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, so they can be shared between the
//! simulation core, the terminal renderer and the input mapping.
//!
//! # Variants
//!
//! Three rule sets share one simulation:
//!
//! | Variant | Board | Quota | Hold | Bomb | Ghost | Relics |
//! |---------|-------|-------|------|------|-------|--------|
//! | `Classic` | 20x10 | 10 | - | - | - | - |
//! | `Arsenal` | 30x16 | 12 | 1/spawn | yes | yes | - |
//! | `Relic` | 30x16 | 12 | 1/spawn | yes | yes | every 3 levels |
//!
//! # Drop interval
//!
//! Gravity follows a clamped linear curve:
//!
//! ```text
//! interval = max(floor, base - (level - 1) * step + speed_offset)
//! ```
//!
//! # Examples
//!
//! ```
//! use relic_tetris_types::{RuleSet, Variant};
//!
//! let variant: Variant = "roguelike".parse().unwrap();
//! assert_eq!(variant, Variant::Relic);
//!
//! let rules = RuleSet::for_variant(Variant::Classic);
//! assert_eq!((rules.rows, rules.cols), (20, 10));
//! assert!(rules.validate().is_ok());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed timestep interval used by the terminal host (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest supported board dimension (coordinates are `i8`)
pub const MAX_BOARD_DIMENSION: u8 = 64;

/// Smallest supported board dimension (the I piece is 4 wide)
pub const MIN_BOARD_DIMENSION: u8 = 4;

/// Most relics a single offer can hold
pub const MAX_RELIC_OFFER: usize = 3;

/// Events a game keeps for the host between drains
pub const MAX_PENDING_EVENTS: usize = 32;

/// Classic line clear table (index = lines cleared, multiplied by level)
pub const CLASSIC_LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Line clear table for the richer variants, steeper for multi-line clears
pub const ARSENAL_LINE_SCORES: [u32; 5] = [0, 100, 300, 600, 1200];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Display color as `(r, g, b)`. A muted pastel palette.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (184, 179, 200),
            PieceKind::O => (214, 190, 159),
            PieceKind::T => (199, 167, 184),
            PieceKind::S => (178, 197, 178),
            PieceKind::Z => (208, 166, 160),
            PieceKind::J => (167, 187, 207),
            PieceKind::L => (201, 174, 149),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Which of the three rule sets a game runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Baseline game: 20x10, no abilities
    Classic,
    /// Adds hold, bombs and the ghost piece on a 30x16 board
    Arsenal,
    /// Arsenal plus relic offers and shields
    Relic,
}

/// Unknown variant name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant `{0}` (expected classic, arsenal or relic)")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    /// Case-insensitive; `roguelike` is accepted for `Relic`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "arsenal" => Ok(Variant::Arsenal),
            "relic" | "roguelike" => Ok(Variant::Relic),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

/// Rule set validation failure
///
/// Rule sets are checked once at construction; a running game never sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {rows}x{cols} is outside the supported range {min}..={max}")]
    BoardSize { rows: u8, cols: u8, min: u8, max: u8 },
    #[error("line quota must be at least 1")]
    ZeroLineQuota,
    #[error("drop interval floor must be between 1 and the base interval ({base_ms}ms), got {floor_ms}ms")]
    DropFloor { floor_ms: u32, base_ms: u32 },
    #[error("line score table must be strictly increasing from 0 lines to 4")]
    LineScoresNotIncreasing,
    #[error("shield clears {rows} rows but the board only has {board_rows}")]
    ShieldClearTooTall { rows: u8, board_rows: u8 },
    #[error("relic offers must hold between 1 and {max} relics, got {size}")]
    RelicOfferSize { size: usize, max: usize },
    #[error("{what} interval must be at least 1")]
    ZeroInterval { what: &'static str },
    #[error("{what} starts at {value} but its maximum is {max}")]
    AboveMaximum { what: &'static str, value: u8, max: u8 },
}

/// Tunable rules of a game, fixed for its whole lifetime
///
/// Relic effects never touch a `RuleSet`; they modify the per-game tunables
/// that are seeded from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub variant: Variant,
    pub rows: u8,
    pub cols: u8,
    /// Lines needed per level
    pub line_quota: u32,
    /// Base points by lines cleared (index 0..=4), multiplied by level
    pub line_scores: [u32; 5],
    pub base_drop_ms: u32,
    pub drop_step_ms: u32,
    pub drop_floor_ms: u32,
    /// Combo bonus per combo step; 0 disables combo scoring
    pub combo_bonus_base: u32,
    /// Holds allowed per spawn; 0 disables hold
    pub hold_limit: u8,
    pub max_hold_limit: u8,
    pub ghost_piece: bool,
    /// Bomb charges at game start
    pub starting_bomb_charges: u32,
    /// Cumulative lines per bomb charge grant, `None` disables bombs entirely
    pub bomb_line_interval: Option<u32>,
    pub bomb_radius: u8,
    pub max_bomb_radius: u8,
    /// Points per removed cell, multiplied by level
    pub bomb_cell_score: u32,
    pub starting_shields: u32,
    /// Rows wiped from the top when a shield absorbs an overflow
    pub shield_clear_rows: u8,
    /// Levels per relic milestone, `None` disables relic offers
    pub relic_level_interval: Option<u32>,
    pub relic_offer_size: usize,
}

impl RuleSet {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Arsenal => Self::arsenal(),
            Variant::Relic => Self::relic(),
        }
    }

    /// 20x10 baseline: no hold, no bombs, no combo bonus.
    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            rows: 20,
            cols: 10,
            line_quota: 10,
            line_scores: CLASSIC_LINE_SCORES,
            base_drop_ms: 900,
            drop_step_ms: 70,
            drop_floor_ms: 180,
            combo_bonus_base: 0,
            hold_limit: 0,
            max_hold_limit: 3,
            ghost_piece: false,
            starting_bomb_charges: 0,
            bomb_line_interval: None,
            bomb_radius: 1,
            max_bomb_radius: 3,
            bomb_cell_score: 0,
            starting_shields: 0,
            shield_clear_rows: 4,
            relic_level_interval: None,
            relic_offer_size: MAX_RELIC_OFFER,
        }
    }

    /// 30x16 with hold, bombs and ghost piece.
    pub fn arsenal() -> Self {
        Self {
            variant: Variant::Arsenal,
            rows: 30,
            cols: 16,
            line_quota: 12,
            line_scores: ARSENAL_LINE_SCORES,
            base_drop_ms: 800,
            drop_step_ms: 60,
            drop_floor_ms: 120,
            combo_bonus_base: 40,
            hold_limit: 1,
            max_hold_limit: 3,
            ghost_piece: true,
            starting_bomb_charges: 1,
            bomb_line_interval: Some(5),
            bomb_radius: 1,
            max_bomb_radius: 3,
            bomb_cell_score: 10,
            starting_shields: 0,
            shield_clear_rows: 4,
            relic_level_interval: None,
            relic_offer_size: MAX_RELIC_OFFER,
        }
    }

    /// Arsenal plus relic offers every third level.
    pub fn relic() -> Self {
        Self {
            variant: Variant::Relic,
            relic_level_interval: Some(3),
            ..Self::arsenal()
        }
    }

    pub fn hold_enabled(&self) -> bool {
        self.hold_limit > 0
    }

    pub fn bombs_enabled(&self) -> bool {
        self.bomb_line_interval.is_some()
    }

    pub fn relics_enabled(&self) -> bool {
        self.relic_level_interval.is_some()
    }

    /// Check the construction-time contract of this rule set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |d: u8| (MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION).contains(&d);
        if !in_range(self.rows) || !in_range(self.cols) {
            return Err(ConfigError::BoardSize {
                rows: self.rows,
                cols: self.cols,
                min: MIN_BOARD_DIMENSION,
                max: MAX_BOARD_DIMENSION,
            });
        }
        if self.line_quota == 0 {
            return Err(ConfigError::ZeroLineQuota);
        }
        if self.drop_floor_ms == 0 || self.drop_floor_ms > self.base_drop_ms {
            return Err(ConfigError::DropFloor {
                floor_ms: self.drop_floor_ms,
                base_ms: self.base_drop_ms,
            });
        }
        if self.line_scores.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::LineScoresNotIncreasing);
        }
        if self.shield_clear_rows > self.rows {
            return Err(ConfigError::ShieldClearTooTall {
                rows: self.shield_clear_rows,
                board_rows: self.rows,
            });
        }
        if self.relic_offer_size == 0 || self.relic_offer_size > MAX_RELIC_OFFER {
            return Err(ConfigError::RelicOfferSize {
                size: self.relic_offer_size,
                max: MAX_RELIC_OFFER,
            });
        }
        if self.bomb_line_interval == Some(0) {
            return Err(ConfigError::ZeroInterval { what: "bomb line" });
        }
        if self.relic_level_interval == Some(0) {
            return Err(ConfigError::ZeroInterval { what: "relic level" });
        }
        if self.hold_limit > self.max_hold_limit {
            return Err(ConfigError::AboveMaximum {
                what: "hold limit",
                value: self.hold_limit,
                max: self.max_hold_limit,
            });
        }
        if self.bomb_radius == 0 || self.bomb_radius > self.max_bomb_radius {
            return Err(ConfigError::AboveMaximum {
                what: "bomb radius",
                value: self.bomb_radius,
                max: self.max_bomb_radius,
            });
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::relic()
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Blocked until the player picks one of the offered relics
    RelicSelection,
    GameOver,
}

/// Player commands consumed by the core
///
/// Used by both human input and scripted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop one row, locking when the piece cannot fall
    SoftDrop,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Rotate 90° clockwise with wall kicks
    Rotate,
    /// Swap with the hold slot
    Hold,
    /// Spend a bomb charge around the active piece
    ActivateBomb,
    TogglePause,
    /// Reset everything to a fresh game
    Restart,
    /// Pick one of the offered relics (0-based)
    SelectRelic(u8),
}

/// Identifier of a relic in the fixed catalog
///
/// The effect of each relic lives in the core crate; this enum only carries the
/// static display data so renderers can show offers without the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelicId {
    GildedCrown,
    MidasLedger,
    Hourglass,
    EchoChamber,
    DeepPockets,
    Blastcore,
    AegisShard,
}

impl RelicId {
    /// The whole catalog, in display order
    pub const ALL: [RelicId; 7] = [
        RelicId::GildedCrown,
        RelicId::MidasLedger,
        RelicId::Hourglass,
        RelicId::EchoChamber,
        RelicId::DeepPockets,
        RelicId::Blastcore,
        RelicId::AegisShard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RelicId::GildedCrown => "Gilded Crown",
            RelicId::MidasLedger => "Midas Ledger",
            RelicId::Hourglass => "Hourglass",
            RelicId::EchoChamber => "Echo Chamber",
            RelicId::DeepPockets => "Deep Pockets",
            RelicId::Blastcore => "Blastcore",
            RelicId::AegisShard => "Aegis Shard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RelicId::GildedCrown => "Score multiplier +0.25",
            RelicId::MidasLedger => "Score multiplier +0.5",
            RelicId::Hourglass => "Pieces fall 80ms slower",
            RelicId::EchoChamber => "Combo bonus base +20",
            RelicId::DeepPockets => "One more hold per piece (max 3)",
            RelicId::Blastcore => "Bomb radius +1 (max 3)",
            RelicId::AegisShard => "Gain a shield against overflow",
        }
    }
}

/// Core-side event recorded while a mutation runs.
///
/// Hosts drain these after each command or tick; they never drive the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceLocked {
        lines_cleared: u32,
        score_delta: u32,
        combo: u32,
    },
    LevelUp {
        level: u32,
    },
    BombChargeGranted {
        charges: u32,
    },
    BombDetonated {
        cells_removed: u32,
        score_delta: u32,
    },
    HoldUsed {
        banked: PieceKind,
    },
    ShieldConsumed {
        remaining: u32,
    },
    RelicsOffered,
    RelicAcquired {
        relic: RelicId,
    },
    Paused,
    Resumed,
    GameOver,
    Restarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_rule_sets_validate() {
        for variant in [Variant::Classic, Variant::Arsenal, Variant::Relic] {
            let rules = RuleSet::for_variant(variant);
            assert_eq!(rules.variant, variant);
            assert_eq!(rules.validate(), Ok(()), "{variant:?}");
        }
    }

    #[test]
    fn only_relic_variant_offers_relics() {
        assert!(!RuleSet::classic().relics_enabled());
        assert!(!RuleSet::arsenal().relics_enabled());
        assert!(RuleSet::relic().relics_enabled());
        assert!(!RuleSet::classic().hold_enabled());
        assert!(!RuleSet::classic().bombs_enabled());
    }

    #[test]
    fn line_tables_reward_multi_line_clears() {
        for table in [CLASSIC_LINE_SCORES, ARSENAL_LINE_SCORES] {
            assert!(table[4] > 4 * table[1]);
            assert!(table.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn validate_rejects_misconfigured_boards() {
        let mut rules = RuleSet::classic();
        rules.cols = 3;
        assert!(matches!(rules.validate(), Err(ConfigError::BoardSize { .. })));

        let mut rules = RuleSet::classic();
        rules.rows = 65;
        assert!(matches!(rules.validate(), Err(ConfigError::BoardSize { .. })));

        let mut rules = RuleSet::arsenal();
        rules.line_quota = 0;
        assert_eq!(rules.validate(), Err(ConfigError::ZeroLineQuota));

        let mut rules = RuleSet::arsenal();
        rules.drop_floor_ms = 900;
        assert!(matches!(rules.validate(), Err(ConfigError::DropFloor { .. })));

        let mut rules = RuleSet::relic();
        rules.relic_offer_size = 4;
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::RelicOfferSize { size: 4, .. })
        ));

        let mut rules = RuleSet::relic();
        rules.bomb_radius = 0;
        assert!(matches!(rules.validate(), Err(ConfigError::AboveMaximum { .. })));
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Classic".parse(), Ok(Variant::Classic));
        assert_eq!("ARSENAL".parse(), Ok(Variant::Arsenal));
        assert_eq!("roguelike".parse(), Ok(Variant::Relic));

        let err = "tetris99".parse::<Variant>().unwrap_err();
        assert!(err.to_string().contains("tetris99"));
    }

    #[test]
    fn relic_catalog_has_display_text() {
        for relic in RelicId::ALL {
            assert!(!relic.name().is_empty());
            assert!(!relic.description().is_empty());
        }
    }
}
