//! Board module - manages the game grid
//!
//! The board is a `height x width` grid where each cell is empty or filled with
//! the kind of the piece that placed it. Storage is a flat row-major vector
//! allocated once at construction; nothing resizes it afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Dimensions are validated by `RuleSet::validate` before a game builds
    /// its board.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Write the kind of `piece` into every cell it covers.
    ///
    /// Cells outside the board are skipped; callers only merge pieces that
    /// passed collision checks.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Merge `piece`, then remove every full row. Returns rows cleared.
    pub fn lock(&mut self, piece: &ActivePiece) -> u32 {
        self.merge(piece);
        self.clear_full_rows()
    }

    /// Remove all full rows, shifting the rows above down and filling the top
    /// with empty rows. Returns the number of rows removed.
    ///
    /// Two-pointer compaction scanning bottom to top; equivalent to removing a
    /// full row, inserting an empty row at the top, and re-checking the same
    /// index.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Empty the top `rows` rows without shifting anything.
    pub fn clear_top_rows(&mut self, rows: u8) {
        let rows = rows.min(self.height) as usize;
        self.cells[..rows * self.width as usize].fill(None);
    }

    /// Empty every cell in the square of half-width `radius` around
    /// `(cx, cy)`, clipped to the board. Rows do not collapse.
    ///
    /// Returns how many occupied cells were removed.
    pub fn clear_area(&mut self, cx: i8, cy: i8, radius: u8) -> u32 {
        let r = radius as i16;
        let mut removed = 0;
        for y in (cy as i16 - r)..=(cy as i16 + r) {
            for x in (cx as i16 - r)..=(cx as i16 + r) {
                let (Ok(x), Ok(y)) = (i8::try_from(x), i8::try_from(y)) else {
                    continue;
                };
                if self.is_occupied(x, y) {
                    self.set(x, y, None);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Count of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill row `y` completely except for the given columns.
    ///
    /// Setup helper for scripted scenarios.
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in 0..self.width as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Convert to rows of cells (for snapshots and tests)
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}
