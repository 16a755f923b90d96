//! Shape library - the seven rotation-0 templates
//!
//! Shapes are small 0/1 matrices (at most 4x4). Templates are immutable; an
//! active piece owns its own rotated copy.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Largest side of any piece matrix
pub const MAX_MATRIX_SIDE: usize = 4;

/// A rectangular 0/1 matrix of up to 4x4 cells.
///
/// Cells outside `rows x cols` are always `false`, so two matrices with the
/// same dimensions and occupancy compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE],
}

impl Matrix {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_MATRIX_SIDE || width > MAX_MATRIX_SIDE {
            return None;
        }
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut bits = [[false; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                bits[y][x] = v != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        })
    }

    /// Number of rows (height in cells)
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns (width in cells)
    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn get(&self, x: u8, y: u8) -> bool {
        x < self.cols && y < self.rows && self.bits[y as usize][x as usize]
    }

    /// Offsets `(dx, dy)` of every occupied cell, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols)
                .filter(move |&x| self.bits[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise: an R x C matrix becomes C x R with
    /// `new[x][R-1-y] = old[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let r = self.rows as usize;
        let c = self.cols as usize;
        let mut bits = [[false; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE];
        for y in 0..r {
            for x in 0..c {
                bits[x][r - 1 - y] = self.bits[y][x];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Cell offset used as the piece's center: `(cols / 2, rows / 2)`.
    ///
    /// For odd sides this is the middle cell; for even sides the cell right of
    /// (or below) the midpoint.
    pub fn center(&self) -> (i8, i8) {
        ((self.cols / 2) as i8, (self.rows / 2) as i8)
    }

    /// Rows of 0/1 values, for snapshots and debugging
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|y| {
                (0..self.cols as usize)
                    .map(|x| u8::from(self.bits[y][x]))
                    .collect()
            })
            .collect()
    }
}

const I_SHAPE: &[&[u8]] = &[&[1, 1, 1, 1]];
const O_SHAPE: &[&[u8]] = &[&[1, 1], &[1, 1]];
const T_SHAPE: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const S_SHAPE: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const Z_SHAPE: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const J_SHAPE: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_SHAPE: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];

fn template_rows(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Rotation-0 matrix for a piece kind
pub fn base_matrix(kind: PieceKind) -> Matrix {
    let rows = template_rows(kind);
    let mut bits = [[false; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE];
    for (y, row) in rows.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            bits[y][x] = v != 0;
        }
    }
    Matrix {
        rows: rows.len() as u8,
        cols: rows[0].len() as u8,
        bits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(base_matrix(kind).occupied().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn base_matrix_matches_from_rows() {
        for kind in PieceKind::ALL {
            assert_eq!(Some(base_matrix(kind)), Matrix::from_rows(template_rows(kind)));
        }
    }

    #[test]
    fn i_piece_rotates_to_a_column() {
        let i = base_matrix(PieceKind::I);
        assert_eq!((i.rows(), i.cols()), (1, 4));

        let r = i.rotated_cw();
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.occupied().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn t_piece_rotation_points_right() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let r = base_matrix(PieceKind::T).rotated_cw();
        assert_eq!(r.to_rows(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let m = base_matrix(kind);
            let back = m.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, m, "{kind:?}");
        }
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert_eq!(Matrix::from_rows(&[]), None);
        assert_eq!(Matrix::from_rows(&[&[1, 1], &[1]]), None);
        assert_eq!(Matrix::from_rows(&[&[1, 1, 1, 1, 1]]), None);
    }

    #[test]
    fn center_truncates_toward_the_midpoint() {
        assert_eq!(base_matrix(PieceKind::T).center(), (1, 1));
        assert_eq!(base_matrix(PieceKind::I).center(), (2, 0));
        assert_eq!(base_matrix(PieceKind::O).center(), (1, 1));
    }
}
