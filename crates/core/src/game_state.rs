//! Game state module - owns a complete game and gates every mutation
//!
//! This module ties together the board, active piece, randomizer, progression
//! and relic tunables. Every mutation runs to completion inside one call
//! (`apply_command` or `advance`); renderers read a [`GameSnapshot`] afterwards.
//!
//! A lock always runs in the same order: merge, line clear, progression
//! update, relic milestone check, spawn.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::{collides, drop_position, try_rotate, ActivePiece};
use crate::progression::{bomb_score, Progression};
use crate::relics::{apply_relic, relic_milestone, Tunables};
use crate::rng::Randomizer;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, RelicCard, StatsSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rules: RuleSet,
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    /// Holds spent since the last spawn
    holds_used: u8,
    progression: Progression,
    tunables: Tunables,
    phase: GamePhase,
    relic_offer: ArrayVec<RelicId, MAX_RELIC_OFFER>,
    acquired_relics: Vec<RelicId>,
    /// Highest relic milestone an offer was made for
    last_relic_milestone: u32,
    drop_counter_ms: u32,
    randomizer: Randomizer,
    /// Newest undrained events; the oldest is dropped when full.
    events: ArrayVec<GameEvent, MAX_PENDING_EVENTS>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    /// Bumped after every mutation that changed something.
    revision: u64,
}

impl GameState {
    /// Create a game with a built-in rule set. The first piece is already
    /// spawned and the game is playing.
    pub fn new(variant: Variant, seed: u64) -> Self {
        Self::build(RuleSet::for_variant(variant), Randomizer::new(seed))
    }

    /// Create a game with custom rules, rejecting invalid configurations.
    pub fn with_rules(rules: RuleSet, seed: u64) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self::build(rules, Randomizer::new(seed)))
    }

    fn build(rules: RuleSet, mut randomizer: Randomizer) -> Self {
        let tunables = Tunables::from_rules(&rules);
        let progression = Progression::new(&rules, &tunables);
        let next = randomizer.next_kind();
        let last_relic_milestone = rules
            .relic_level_interval
            .map_or(0, |interval| relic_milestone(progression.level(), interval));

        let mut state = Self {
            board: Board::new(rules.cols, rules.rows),
            rules,
            active: None,
            next,
            hold: None,
            holds_used: 0,
            progression,
            tunables,
            phase: GamePhase::Playing,
            relic_offer: ArrayVec::new(),
            acquired_relics: Vec::new(),
            last_relic_milestone,
            drop_counter_ms: 0,
            randomizer,
            events: ArrayVec::new(),
            episode_id: 0,
            piece_id: 0,
            revision: 0,
        };
        state.spawn_piece();
        state
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn variant(&self) -> Variant {
        self.rules.variant
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups (tests, puzzles, benches).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Replace the active piece without any collision handling.
    ///
    /// Setup hook for scripted scenarios.
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Override the previewed next kind. Setup hook for scripted scenarios.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn holds_used(&self) -> u8 {
        self.holds_used
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn combo(&self) -> u32 {
        self.progression.combo()
    }

    pub fn bomb_charges(&self) -> u32 {
        self.progression.bomb_charges()
    }

    pub fn shields(&self) -> u32 {
        self.tunables.shields
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progression.drop_interval_ms()
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn relic_offer(&self) -> &[RelicId] {
        &self.relic_offer
    }

    pub fn acquired_relics(&self) -> &[RelicId] {
        &self.acquired_relics
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    /// Take the events recorded since the last drain, oldest first. At most
    /// [`MAX_PENDING_EVENTS`] are kept between drains.
    pub fn drain_events(&mut self) -> arrayvec::Drain<'_, GameEvent, MAX_PENDING_EVENTS> {
        self.events.drain(..)
    }

    /// Number of events waiting for [`Self::drain_events`].
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Where the active piece would land, if this variant shows a ghost.
    pub fn ghost_y(&self) -> Option<i8> {
        if !self.rules.ghost_piece {
            return None;
        }
        let active = self.active?;
        Some(drop_position(&self.board, &active))
    }

    /// Refill `out`, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.variant = self.rules.variant;
        out.phase = self.phase;
        out.width = self.board.width();
        out.height = self.board.height();

        out.board.resize_with(self.board.height() as usize, Vec::new);
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.hold = self.hold;
        out.holds_left = self.tunables.hold_limit.saturating_sub(self.holds_used);
        out.stats = StatsSnapshot {
            score: self.progression.score(),
            level: self.progression.level(),
            lines: self.progression.lines(),
            combo: self.progression.combo(),
            bomb_charges: self.progression.bomb_charges(),
            shields: self.tunables.shields,
            drop_interval_ms: self.progression.drop_interval_ms(),
        };
        out.tunables = self.tunables;
        out.relic_offer.clear();
        out.relic_offer
            .extend(self.relic_offer.iter().copied().map(RelicCard::from));
        out.acquired_relics.clear();
        out.acquired_relics.extend_from_slice(&self.acquired_relics);
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player command.
    ///
    /// Returns whether the command changed anything. Commands that are not
    /// legal in the current phase are no-ops.
    pub fn apply_command(&mut self, command: Command) -> bool {
        let changed = match (self.phase, command) {
            (_, Command::Restart) => {
                self.restart();
                true
            }
            (GamePhase::RelicSelection, Command::SelectRelic(index)) => self.select_relic(index),
            (GamePhase::Playing | GamePhase::Paused, Command::TogglePause) => self.toggle_pause(),
            (GamePhase::Playing, command) => self.apply_playing(command),
            _ => false,
        };
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn apply_playing(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::Hold => self.hold(),
            Command::ActivateBomb => self.activate_bomb(),
            Command::TogglePause | Command::Restart | Command::SelectRelic(_) => false,
        }
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Steps the piece down at most one row, once the accumulated time exceeds
    /// the drop interval. Returns whether a step happened.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms <= self.progression.drop_interval_ms() {
            return false;
        }
        let stepped = self.soft_drop();
        if stepped {
            self.revision += 1;
        }
        stepped
    }

    /// Spawn the previewed piece and draw a new preview.
    pub fn spawn_piece(&mut self) {
        let kind = self.next;
        self.next = self.randomizer.next_kind();
        self.holds_used = 0;
        self.piece_id = self.piece_id.wrapping_add(1);
        self.place_new_active(ActivePiece::spawn(kind, self.board.width()));
    }

    fn place_new_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        if collides(&self.board, &piece) {
            self.handle_overflow(&piece);
        }
    }

    /// The board has no room for a fresh piece: spend a shield or end the game.
    fn handle_overflow(&mut self, piece: &ActivePiece) {
        if self.tunables.shields > 0 {
            self.tunables.shields -= 1;
            self.board.clear_top_rows(self.rules.shield_clear_rows);
            self.record(GameEvent::ShieldConsumed {
                remaining: self.tunables.shields,
            });
            if !collides(&self.board, piece) {
                return;
            }
        }
        self.phase = GamePhase::GameOver;
        self.relic_offer.clear();
        self.record(GameEvent::GameOver);
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        if collides(&self.board, &moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match try_rotate(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// One row down; locks when the piece cannot fall.
    fn soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        self.drop_counter_ms = 0;
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let y = drop_position(&self.board, &active);
        self.active = Some(ActivePiece { y, ..active });
        self.lock_piece();
        self.drop_counter_ms = 0;
        true
    }

    /// Lock the active piece onto the board and run the post-lock pipeline.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let lines = self.board.lock(&active);
        let outcome = self
            .progression
            .record_lock(lines, &self.rules, &self.tunables);

        self.record(GameEvent::PieceLocked {
            lines_cleared: lines,
            score_delta: outcome.score_delta,
            combo: self.progression.combo(),
        });
        if outcome.bomb_charges_granted > 0 {
            self.record(GameEvent::BombChargeGranted {
                charges: self.progression.bomb_charges(),
            });
        }
        if let Some(level) = outcome.level_up {
            self.record(GameEvent::LevelUp { level });
            self.check_relic_milestone(level);
        }

        self.spawn_piece();
    }

    fn check_relic_milestone(&mut self, level: u32) {
        let Some(interval) = self.rules.relic_level_interval else {
            return;
        };
        let milestone = relic_milestone(level, interval);
        if milestone <= self.last_relic_milestone {
            return;
        }
        self.last_relic_milestone = milestone;

        self.relic_offer = self
            .randomizer
            .relic_offer(&RelicId::ALL, self.rules.relic_offer_size);
        if !self.relic_offer.is_empty() {
            self.phase = GamePhase::RelicSelection;
            self.record(GameEvent::RelicsOffered);
        }
    }

    /// Swap the active piece with the hold slot, at most `hold_limit` times
    /// per spawn.
    fn hold(&mut self) -> bool {
        if self.holds_used >= self.tunables.hold_limit {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(banked) => {
                self.place_new_active(ActivePiece::spawn(banked, self.board.width()));
            }
            None => self.spawn_piece(),
        }

        // After the spawn above, which resets the counter.
        self.holds_used += 1;
        self.record(GameEvent::HoldUsed {
            banked: active.kind,
        });
        true
    }

    /// Clear the square around the active piece's center, spending a charge.
    fn activate_bomb(&mut self) -> bool {
        if !self.rules.bombs_enabled() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if !self.progression.take_bomb_charge() {
            return false;
        }

        let (cx, cy) = active.center();
        let removed = self.board.clear_area(cx, cy, self.tunables.bomb_radius);
        let points = bomb_score(
            removed,
            self.rules.bomb_cell_score,
            self.progression.level(),
            &self.tunables,
        );
        self.progression.award_bomb(points);

        self.record(GameEvent::BombDetonated {
            cells_removed: removed,
            score_delta: points,
        });
        true
    }

    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.record(GameEvent::Paused);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.record(GameEvent::Resumed);
                true
            }
            GamePhase::RelicSelection | GamePhase::GameOver => false,
        }
    }

    fn select_relic(&mut self, index: u8) -> bool {
        if self.phase != GamePhase::RelicSelection {
            return false;
        }
        let Some(&relic) = self.relic_offer.get(index as usize) else {
            return false;
        };

        self.tunables = apply_relic(self.tunables, relic, &self.rules);
        self.acquired_relics.push(relic);
        self.progression.recompute(&self.rules, &self.tunables);
        self.relic_offer.clear();
        self.phase = GamePhase::Playing;

        self.record(GameEvent::RelicAcquired { relic });
        true
    }

    /// Start over with the same rules and a seed derived from this game.
    fn restart(&mut self) {
        let seed = self.randomizer.derive_seed();
        let episode_id = self.episode_id.wrapping_add(1);
        let revision = self.revision;
        let events = std::mem::take(&mut self.events);

        *self = Self::build(self.rules.clone(), Randomizer::new(seed));
        self.episode_id = episode_id;
        self.revision = revision;
        self.events = events;
        self.record(GameEvent::Restarted);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Variant::Relic, 1)
    }
}
