//! Snapshot contract and rule set serialization

use relic_tetris::core::{ActivePiece, GameSnapshot, GameState};
use relic_tetris::types::{Command, ConfigError, PieceKind, RuleSet, Variant};

#[test]
fn snapshot_serializes_to_json() {
    let state = GameState::new(Variant::Relic, 31);
    let value = serde_json::to_value(state.snapshot()).expect("snapshot serializes");

    assert_eq!(value["variant"], "Relic");
    assert_eq!(value["phase"], "Playing");
    assert_eq!(value["width"], 16);
    assert_eq!(value["board"].as_array().map(Vec::len), Some(30));
    assert_eq!(value["stats"]["level"], 1);
    assert_eq!(value["stats"]["bomb_charges"], 1);
    assert!(value["active"].is_object());
    assert!(value["ghost_y"].is_number());
}

#[test]
fn classic_snapshot_has_no_ghost() {
    let state = GameState::new(Variant::Classic, 31);
    let snap = state.snapshot();
    assert_eq!(snap.ghost_y, None);
    assert_eq!(snap.holds_left, 0);
    assert_eq!((snap.width, snap.height), (10, 20));
}

#[test]
fn snapshot_board_includes_locked_cells_only() {
    let mut state = GameState::new(Variant::Classic, 31);
    state.set_active(ActivePiece::spawn(PieceKind::O, 10));
    state.apply_command(Command::HardDrop);

    let snap = state.snapshot();
    assert_eq!(snap.cell(4, 19), Some(PieceKind::O));
    assert_eq!(snap.cell(5, 18), Some(PieceKind::O));
    assert_eq!(snap.cell(3, 19), None);
    assert_eq!(snap.cell(99, 99), None);
    // The new active piece is not part of the board rows.
    let settled: usize = snap.board.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(settled, 4);
}

#[test]
fn snapshot_into_tracks_revision() {
    let mut state = GameState::new(Variant::Arsenal, 31);
    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    let r0 = snap.revision;

    state.apply_command(Command::MoveLeft);
    state.snapshot_into(&mut snap);
    assert_eq!(snap.revision, r0 + 1);
    assert_eq!(snap, state.snapshot());
}

#[test]
fn rule_sets_load_from_json() {
    let json = serde_json::to_string(&RuleSet::arsenal()).expect("serialize");
    let rules: RuleSet = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(rules, RuleSet::arsenal());
    assert!(rules.validate().is_ok());

    let mut value: serde_json::Value = serde_json::from_str(&json).expect("value");
    value["rows"] = serde_json::json!(2);
    let tiny: RuleSet = serde_json::from_value(value).expect("still a rule set");
    assert!(matches!(
        GameState::with_rules(tiny, 1),
        Err(ConfigError::BoardSize { rows: 2, .. })
    ));
}

#[test]
fn builtin_rule_sets_are_valid() {
    for variant in [Variant::Classic, Variant::Arsenal, Variant::Relic] {
        assert_eq!(RuleSet::for_variant(variant).validate(), Ok(()));
    }
}
