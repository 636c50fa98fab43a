//! One square of the Minesweeper grid.

/// A minefield cell. Only the owning [`crate::Minefield`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mines among the 8 neighbours (0-8). Always 0 on a mine.
    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.row, self.col);
    }
}
