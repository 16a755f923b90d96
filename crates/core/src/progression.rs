//! Progression module - score, lines, level, combo and gravity speed
//!
//! Scoring rules:
//! - Base points come from the rule set's table indexed by `min(lines, 4)`,
//!   multiplied by the level *before* the clear is counted.
//! - A combo bonus of `combo * combo_bonus_base * level` applies from the
//!   second consecutive clearing lock onwards.
//! - The sum is scaled by the score multiplier and rounded down.
//!
//! `level` and `drop_interval_ms` are only ever written together, by
//! [`Progression::recompute`].

use serde::{Deserialize, Serialize};

use crate::relics::Tunables;
use crate::types::RuleSet;

/// What a single lock changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    /// Base points for the clear (table entry times level)
    pub line_clear_score: u32,
    pub combo_bonus: u32,
    /// Points actually added, after the multiplier
    pub score_delta: u32,
    /// New level, if this lock raised it
    pub level_up: Option<u32>,
    pub bomb_charges_granted: u32,
}

/// Base points for clearing `lines` rows at `level`
pub fn line_clear_score(table: &[u32; 5], lines: u32, level: u32) -> u32 {
    let idx = lines.min(4) as usize;
    table[idx].saturating_mul(level)
}

/// Combo bonus; zero for the first clear of a chain
pub fn combo_bonus(combo: u32, combo_bonus_base: u32, level: u32) -> u32 {
    if combo <= 1 {
        return 0;
    }
    combo
        .saturating_mul(combo_bonus_base)
        .saturating_mul(level)
}

/// Level for a cumulative line count (levels start at 1)
pub fn level_for_lines(lines: u32, line_quota: u32) -> u32 {
    lines / line_quota + 1
}

/// Gravity interval for a level, clamped at the rule set's floor
pub fn drop_interval_ms(rules: &RuleSet, level: u32, speed_offset_ms: u32) -> u32 {
    let speedup = level
        .saturating_sub(1)
        .saturating_mul(rules.drop_step_ms);
    rules
        .base_drop_ms
        .saturating_sub(speedup)
        .saturating_add(speed_offset_ms)
        .max(rules.drop_floor_ms)
}

/// Score for a bomb that removed `cells` filled cells
pub fn bomb_score(cells: u32, cell_score: u32, level: u32, tunables: &Tunables) -> u32 {
    tunables.apply_multiplier(cells.saturating_mul(cell_score).saturating_mul(level))
}

/// Score, lines, level, combo, gravity and bomb charges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    drop_interval_ms: u32,
    bomb_charges: u32,
    /// Bomb milestones already paid out (monotonic)
    bomb_milestones: u32,
}

impl Progression {
    pub fn new(rules: &RuleSet, tunables: &Tunables) -> Self {
        let mut p = Self {
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            drop_interval_ms: rules.base_drop_ms,
            bomb_charges: if rules.bombs_enabled() {
                rules.starting_bomb_charges
            } else {
                0
            },
            bomb_milestones: 0,
        };
        p.recompute(rules, tunables);
        p
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn bomb_charges(&self) -> u32 {
        self.bomb_charges
    }

    /// Apply the result of one lock.
    pub fn record_lock(&mut self, lines: u32, rules: &RuleSet, tunables: &Tunables) -> LockOutcome {
        if lines == 0 {
            self.combo = 0;
            return LockOutcome::default();
        }

        self.combo += 1;
        let base = line_clear_score(&rules.line_scores, lines, self.level);
        let bonus = combo_bonus(self.combo, tunables.combo_bonus_base, self.level);
        let delta = tunables.apply_multiplier(base.saturating_add(bonus));
        self.score = self.score.saturating_add(delta);

        let level_before = self.level;
        self.lines += lines;
        self.recompute(rules, tunables);
        let granted = self.sync_bomb_charges(rules);

        LockOutcome {
            lines_cleared: lines,
            line_clear_score: base,
            combo_bonus: bonus,
            score_delta: delta,
            level_up: (self.level > level_before).then_some(self.level),
            bomb_charges_granted: granted,
        }
    }

    /// Recompute level and drop interval from the line count.
    pub fn recompute(&mut self, rules: &RuleSet, tunables: &Tunables) {
        self.level = level_for_lines(self.lines, rules.line_quota);
        self.drop_interval_ms = drop_interval_ms(rules, self.level, tunables.speed_offset_ms);
    }

    /// Grant one charge per bomb milestone not yet paid out. Idempotent.
    pub fn sync_bomb_charges(&mut self, rules: &RuleSet) -> u32 {
        let Some(interval) = rules.bomb_line_interval else {
            return 0;
        };
        let reached = self.lines / interval;
        if reached <= self.bomb_milestones {
            return 0;
        }
        let granted = reached - self.bomb_milestones;
        self.bomb_milestones = reached;
        self.bomb_charges += granted;
        granted
    }

    /// Spend one bomb charge, if any is left.
    pub fn take_bomb_charge(&mut self) -> bool {
        if self.bomb_charges == 0 {
            return false;
        }
        self.bomb_charges -= 1;
        true
    }

    /// Add points that are not a line clear (bombs); breaks the combo chain.
    pub fn award_bomb(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.combo = 0;
    }
}
