//! Relic module - tunables and the pure relic effect function
//!
//! Relics are identified by [`RelicId`]; their effects are dispatched here so
//! they stay plain data (serializable, comparable) instead of closures.
//! All effects are additive; limits clamp at the rule set's maximum.

use serde::{Deserialize, Serialize};

use crate::types::{RelicId, RuleSet};

/// Percent granularity of the score multiplier (100 = x1.0)
pub const MULTIPLIER_SCALE: u32 = 100;

/// Per-game parameters that relics modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tunables {
    /// Score multiplier in percent (100 = x1.0)
    pub score_multiplier_pct: u32,
    /// Added to the drop interval (slower gravity)
    pub speed_offset_ms: u32,
    pub combo_bonus_base: u32,
    pub hold_limit: u8,
    pub bomb_radius: u8,
    pub shields: u32,
}

impl Tunables {
    /// Defaults at the start of a game
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self {
            score_multiplier_pct: MULTIPLIER_SCALE,
            speed_offset_ms: 0,
            combo_bonus_base: rules.combo_bonus_base,
            hold_limit: rules.hold_limit,
            bomb_radius: rules.bomb_radius,
            shields: rules.starting_shields,
        }
    }

    /// Scale `points` by the multiplier, rounding down
    pub fn apply_multiplier(&self, points: u32) -> u32 {
        let scaled = u64::from(points) * u64::from(self.score_multiplier_pct)
            / u64::from(MULTIPLIER_SCALE);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// Apply one relic's effect. Pure: the same input always gives the same output.
pub fn apply_relic(tunables: Tunables, relic: RelicId, rules: &RuleSet) -> Tunables {
    let mut t = tunables;
    match relic {
        RelicId::GildedCrown => t.score_multiplier_pct += 25,
        RelicId::MidasLedger => t.score_multiplier_pct += 50,
        RelicId::Hourglass => t.speed_offset_ms += 80,
        RelicId::EchoChamber => t.combo_bonus_base += 20,
        RelicId::DeepPockets => {
            t.hold_limit = t.hold_limit.saturating_add(1).min(rules.max_hold_limit)
        }
        RelicId::Blastcore => {
            t.bomb_radius = t.bomb_radius.saturating_add(1).min(rules.max_bomb_radius)
        }
        RelicId::AegisShard => t.shields += 1,
    }
    t
}

/// Milestone index reached at `level`
pub fn relic_milestone(level: u32, interval: u32) -> u32 {
    level / interval
}
