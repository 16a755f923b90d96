//! Relic offers, picks and their effects

use std::collections::HashSet;

use relic_tetris::core::{ActivePiece, GameState};
use relic_tetris::engine::{apply_place, PlaceError};
use relic_tetris::types::{Command, GameEvent, GamePhase, PieceKind, Variant};

fn clear_four(state: &mut GameState) {
    let width = state.board().width();
    let height = state.board().height() as i8;
    for y in height - 4..height {
        state.board_mut().fill_row_except(y, &[0], PieceKind::J);
    }
    state.set_active(ActivePiece::spawn(PieceKind::I, width));
    apply_place(state, 0, 1, false).expect("vertical I fits column 0");
}

/// Clear lines until the first relic offer (level 3).
fn reach_first_offer(seed: u64) -> GameState {
    let mut state = GameState::new(Variant::Relic, seed);
    while state.phase() == GamePhase::Playing {
        clear_four(&mut state);
    }
    state
}

#[test]
fn first_offer_arrives_at_level_three() {
    let mut state = reach_first_offer(42);
    assert_eq!(state.phase(), GamePhase::RelicSelection);
    assert_eq!(state.level(), 3);
    assert_eq!(state.lines(), 24);

    let offer = state.relic_offer().to_vec();
    assert_eq!(offer.len(), 3);
    assert_eq!(offer.iter().collect::<HashSet<_>>().len(), 3);
    assert!(state.drain_events().any(|e| e == GameEvent::RelicsOffered));
}

#[test]
fn selection_blocks_play_until_a_pick() {
    let mut state = reach_first_offer(42);
    let frozen = state.snapshot();

    assert!(!state.apply_command(Command::HardDrop));
    assert!(!state.apply_command(Command::TogglePause));
    assert!(!state.apply_command(Command::SelectRelic(5)));
    assert!(!state.advance(10_000));
    assert_eq!(state.snapshot(), frozen);
    assert_eq!(
        apply_place(&mut state, 0, 0, false).unwrap_err(),
        PlaceError::NotPlayable
    );
}

#[test]
fn picking_applies_exactly_one_change() {
    for seed in [1, 2, 3, 4, 5] {
        let mut state = reach_first_offer(seed);
        let before = *state.tunables();
        let picked = state.relic_offer()[2];

        assert!(state.apply_command(Command::SelectRelic(2)));
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.acquired_relics(), &[picked]);
        assert!(state.relic_offer().is_empty());
        assert_ne!(*state.tunables(), before, "{picked:?}");
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::RelicAcquired { relic: picked }));

        // The milestone is spent.
        assert!(!state.apply_command(Command::SelectRelic(0)));
        assert_eq!(state.acquired_relics().len(), 1);
    }
}

#[test]
fn no_relics_outside_relic_variant() {
    let mut state = GameState::new(Variant::Arsenal, 9);
    for _ in 0..9 {
        clear_four(&mut state);
    }
    assert_eq!(state.level(), 4);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert!(state.acquired_relics().is_empty());
}
