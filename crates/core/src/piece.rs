//! Active piece plus the collision & rotation engine
//!
//! Rotation uses a simplified horizontal-only kick list. Offsets are tried in
//! the exact order of [`KICK_OFFSETS`]; the order decides which kick wins at a
//! wall.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::shapes::{base_matrix, Matrix};
use crate::types::PieceKind;

/// Horizontal kick offsets tried after a rotation, in order
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// The currently controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current rotation (owned copy of the template)
    pub matrix: Matrix,
    /// Column of the matrix's left edge
    pub x: i8,
    /// Row of the matrix's top edge
    pub y: i8,
}

impl ActivePiece {
    /// Spawn a piece at row 0, horizontally centered on a board of `board_width`.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let matrix = base_matrix(kind);
        let x = (board_width.saturating_sub(matrix.cols()) / 2) as i8;
        Self { kind, matrix, x, y: 0 }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board coordinate of the shape center
    pub fn center(&self) -> (i8, i8) {
        let (cx, cy) = self.matrix.center();
        (self.x + cx, self.y + cy)
    }
}

/// Does `piece` leave the board sideways or downwards, or overlap a filled cell?
///
/// Cells above the top edge never collide, so pieces may sit partly above the
/// visible board.
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece.cells().any(|(x, y)| {
        if x < 0 || x >= board.width() as i8 || y >= board.height() as i8 {
            return true;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Rotate a matrix 90° clockwise
pub fn rotate_matrix(matrix: &Matrix) -> Matrix {
    matrix.rotated_cw()
}

/// Try to rotate a piece clockwise with horizontal wall kicks.
///
/// Returns the rotated (and possibly shifted) piece, or `None` when every
/// offset collides; the caller then keeps the original piece untouched.
pub fn try_rotate(board: &Board, piece: &ActivePiece) -> Option<ActivePiece> {
    let rotated = ActivePiece {
        matrix: rotate_matrix(&piece.matrix),
        ..*piece
    };

    KICK_OFFSETS
        .iter()
        .map(|&dx| rotated.shifted(dx, 0))
        .find(|candidate| !collides(board, candidate))
}

/// Lowest row `piece` can fall to from its current position
pub fn drop_position(board: &Board, piece: &ActivePiece) -> i8 {
    let mut landed = *piece;
    loop {
        let next = landed.shifted(0, 1);
        if collides(board, &next) {
            return landed.y;
        }
        landed = next;
    }
}
