use thiserror::Error;

use crate::core::{ActivePiece, GameState};
use crate::types::{Command, GamePhase};

/// Why a scripted placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("hold requested when unavailable")]
    HoldUnavailable,
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("could not move to target x due to collision")]
    XBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NotPlayable
            | PlaceError::NoActive => "invalid_place",
        }
    }
}

/// Horizontal span `[min_dx, max_dx]` of the piece's occupied cells
fn occupied_span(piece: &ActivePiece) -> (i8, i8) {
    piece
        .matrix
        .occupied()
        .fold((i8::MAX, i8::MIN), |(lo, hi), (dx, _)| (lo.min(dx), hi.max(dx)))
}

/// Place the active piece in one step: optional hold, `rotations` clockwise
/// turns, shift to `target_x`, hard drop.
///
/// Every step goes through [`GameState::apply_command`], so kicks, hold
/// limits and phase gating behave exactly as for a player. On error the state
/// is restored to what it was before the call.
pub fn apply_place(
    state: &mut GameState,
    target_x: i8,
    rotations: u8,
    use_hold: bool,
) -> Result<(), PlaceError> {
    if state.phase() != GamePhase::Playing {
        return Err(PlaceError::NotPlayable);
    }

    let before = state.clone();
    let result = place_steps(state, target_x, rotations, use_hold);
    if result.is_err() {
        *state = before;
    }
    result
}

fn place_steps(
    state: &mut GameState,
    target_x: i8,
    rotations: u8,
    use_hold: bool,
) -> Result<(), PlaceError> {
    // Hold first if requested.
    if use_hold && !state.apply_command(Command::Hold) {
        return Err(PlaceError::HoldUnavailable);
    }
    if state.phase() != GamePhase::Playing {
        return Err(PlaceError::NotPlayable);
    }

    for _ in 0..rotations % 4 {
        if !state.apply_command(Command::Rotate) {
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    // Validate x bounds based on current shape.
    let (min_dx, max_dx) = occupied_span(&active);
    let width = state.board().width() as i16;
    let target = target_x as i16;
    if target + (min_dx as i16) < 0 || target + (max_dx as i16) >= width {
        return Err(PlaceError::XOutOfBounds);
    }

    let step = if target_x > active.x {
        Command::MoveRight
    } else {
        Command::MoveLeft
    };
    for _ in 0..(target_x - active.x).unsigned_abs() {
        if !state.apply_command(step) {
            return Err(PlaceError::XBlocked);
        }
    }

    if !state.apply_command(Command::HardDrop) {
        return Err(if state.active().is_none() {
            PlaceError::NoActive
        } else {
            PlaceError::NotPlayable
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Variant};

    #[test]
    fn place_rejected_when_paused() {
        let mut gs = GameState::new(Variant::Classic, 1);
        assert!(gs.apply_command(Command::TogglePause));

        let a = gs.active().expect("expected active piece");
        let err = apply_place(&mut gs, a.x, 0, false).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_when_x_out_of_bounds() {
        let mut gs = GameState::new(Variant::Classic, 1);
        let before = gs.active();

        let err = apply_place(&mut gs, -50, 0, false).unwrap_err();
        assert_eq!(err, PlaceError::XOutOfBounds);
        assert_eq!(gs.active(), before);
    }

    #[test]
    fn place_rejected_when_x_blocked_by_collision() {
        let mut gs = GameState::new(Variant::Classic, 1);
        gs.set_active(ActivePiece::spawn(PieceKind::O, 10));

        // O spawns at x=4; a wall at column 2 stops it reaching x=0.
        for y in 0..20 {
            gs.board_mut().set(2, y, Some(PieceKind::I));
        }

        let err = apply_place(&mut gs, 0, 0, false).unwrap_err();
        assert_eq!(err, PlaceError::XBlocked);
        // Rolled back to the spawn column.
        assert_eq!(gs.active().map(|a| a.x), Some(4));
    }

    #[test]
    fn place_rejected_when_hold_unavailable() {
        let mut gs = GameState::new(Variant::Classic, 1);
        let err = apply_place(&mut gs, 0, 0, true).unwrap_err();
        assert_eq!(err, PlaceError::HoldUnavailable);
        assert_eq!(err.code(), "hold_unavailable");
        assert_eq!(err.to_string(), "hold requested when unavailable");
    }

    #[test]
    fn place_rotates_and_drops() {
        let mut gs = GameState::new(Variant::Classic, 1);
        gs.set_active(ActivePiece::spawn(PieceKind::I, 10));

        apply_place(&mut gs, 9, 1, false).unwrap();
        for y in 16..20 {
            assert!(gs.board().is_occupied(9, y));
        }
        assert_eq!(gs.board().filled_count(), 4);
    }

    #[test]
    fn place_with_hold_uses_banked_piece_next_time() {
        let mut gs = GameState::new(Variant::Arsenal, 1);
        gs.set_active(ActivePiece::spawn(PieceKind::T, 16));
        gs.set_next(PieceKind::O);

        apply_place(&mut gs, 0, 0, true).unwrap();
        assert_eq!(gs.hold_piece(), Some(PieceKind::T));
        assert!(gs.board().is_occupied(0, 29));
        assert!(gs.board().is_occupied(1, 28));
    }
}
