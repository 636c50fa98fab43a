//! Board module - the Tetris playfield grid
//!
//! The grid is `width` columns by `buffer_height + height` rows, stored flat in
//! row-major order. Rows `0..buffer_height` are the hidden buffer where pieces
//! spawn; the rest are visible. Coordinates are `(x, y)` with `y` growing
//! downward, so visible row `v` is board row `buffer_height + v`.
//!
//! Any locked block left in the buffer ends the game.

use crate::config::TetrisConfig;
use crate::pieces::Tetromino;
use crate::types::{Color, Occupancy};

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    buffer_height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Occupancy>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: u16, height: u16, buffer_height: u16) -> Self {
        let total = usize::from(width) * (usize::from(height) + usize::from(buffer_height));
        Self {
            width,
            height,
            buffer_height,
            cells: vec![None; total],
        }
    }

    pub fn from_config(config: &TetrisConfig) -> Self {
        Self::new(config.width, config.height, config.buffer_height)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.total_height()) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Visible rows
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn buffer_height(&self) -> u16 {
        self.buffer_height
    }

    /// Buffer plus visible rows
    pub fn total_height(&self) -> u16 {
        self.height.saturating_add(self.buffer_height)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Occupancy> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Occupancy) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether every block of `piece` is inside the grid and on an empty cell.
    ///
    /// Blocks above row 0 are allowed and never collide; blocks left of the
    /// wall, right of the wall, or below the floor are not.
    pub fn is_valid_position(&self, piece: &Tetromino) -> bool {
        piece.blocks().iter().all(|b| {
            if b.x < 0 || b.x >= i32::from(self.width) || b.y >= i32::from(self.total_height()) {
                return false;
            }
            b.y < 0 || !self.is_occupied(b.x, b.y)
        })
    }

    /// Stamp the piece's color into every in-range cell it covers.
    pub fn place_tetromino(&mut self, piece: &Tetromino) {
        let color = Some(piece.color());
        for b in piece.blocks() {
            self.set(b.x, b.y, color);
        }
    }

    fn row(&self, y: usize) -> &[Occupancy] {
        let width = usize::from(self.width);
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < usize::from(self.total_height()) && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift every row above it down by one, and empty the top row.
    fn remove_row(&mut self, y: usize) {
        let width = usize::from(self.width);
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        self.cells[..width].fill(None);
    }

    /// Clear every full row and return how many were cleared.
    ///
    /// Scans bottom to top. After a removal the same row index is checked
    /// again, since a new row has just shifted into it.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = usize::from(self.total_height());
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// True when any buffer row holds a block.
    pub fn is_game_over(&self) -> bool {
        let buffer_cells = usize::from(self.buffer_height) * usize::from(self.width);
        self.cells[..buffer_cells].iter().any(|cell| cell.is_some())
    }

    /// Visible row `v` (0 is the top visible row)
    pub fn visible_row(&self, v: usize) -> Option<&[Occupancy]> {
        (v < usize::from(self.height)).then(|| self.row(usize::from(self.buffer_height) + v))
    }

    /// Visible rows as one row-major slice
    pub fn visible_cells(&self) -> &[Occupancy] {
        let start = usize::from(self.buffer_height) * usize::from(self.width);
        &self.cells[start..]
    }

    /// Copy of the visible grid, top row first
    pub fn visible_grid(&self) -> Vec<Vec<Occupancy>> {
        self.visible_cells()
            .chunks(usize::from(self.width))
            .map(<[Occupancy]>::to_vec)
            .collect()
    }

    /// Fill visible row `v` with `color`, leaving the listed columns empty.
    pub fn fill_visible_row(&mut self, v: usize, color: Color, holes: &[usize]) {
        if v >= usize::from(self.height) {
            return;
        }
        let y = (usize::from(self.buffer_height) + v) as i32;
        for x in 0..i32::from(self.width) {
            let cell = (!holes.contains(&(x as usize))).then_some(color);
            self.set(x, y, cell);
        }
    }

    /// Get a reference to the internal cells (buffer rows first)
    pub fn cells(&self) -> &[Occupancy] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&TetrisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Point;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 23), Some(239));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 24), None);
    }

    #[test]
    fn test_negative_rows_are_valid() {
        let board = Board::default();
        let piece = Tetromino::new(PieceKind::I, Point::new(0, -1));
        assert!(board.is_valid_position(&piece));
        let piece = Tetromino::new(PieceKind::I, Point::new(7, 0));
        assert!(!board.is_valid_position(&piece));
        let piece = Tetromino::new(PieceKind::O, Point::new(0, 23));
        assert!(!board.is_valid_position(&piece));
    }

    #[test]
    fn test_place_stamps_piece_color() {
        let mut board = Board::default();
        let piece = Tetromino::new(PieceKind::S, Point::new(0, 22));
        board.place_tetromino(&piece);
        assert_eq!(board.get(1, 22), Some(Some(Color::Green)));
        assert_eq!(board.get(0, 23), Some(Some(Color::Green)));
        assert_eq!(board.get(0, 22), Some(None));
        assert!(!board.is_valid_position(&piece));
    }

    #[test]
    fn test_place_skips_cells_above_grid() {
        let mut board = Board::default();
        let mut piece = Tetromino::new(PieceKind::I, Point::new(0, -2));
        piece.rotate_cw();
        board.place_tetromino(&piece);
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_clear_lines_shifts_rows_down() {
        let mut board = Board::default();
        board.fill_visible_row(19, Color::Red, &[]);
        board.fill_visible_row(18, Color::Blue, &[3]);
        board.fill_visible_row(17, Color::Cyan, &[]);
        board.set(0, 19, Some(Color::Yellow));

        assert_eq!(board.clear_lines(), 2);
        let row19 = board.visible_row(19).unwrap();
        assert_eq!(row19[0], Some(Color::Blue));
        assert_eq!(row19[3], None);
        assert!(board.visible_row(18).unwrap().iter().all(Option::is_none));
        assert_eq!(board.visible_row(17).unwrap()[0], Some(Color::Yellow));
    }

    #[test]
    fn test_game_over_only_from_buffer() {
        let mut board = Board::default();
        board.set(5, 4, Some(Color::Red));
        assert!(!board.is_game_over());
        board.set(5, 3, Some(Color::Red));
        assert!(board.is_game_over());
    }

    #[test]
    fn test_visible_grid_excludes_buffer() {
        let mut board = Board::default();
        board.set(2, 0, Some(Color::Orange));
        board.set(2, 4, Some(Color::Purple));
        let grid = board.visible_grid();
        assert_eq!(grid.len(), 20);
        assert_eq!(grid[0][2], Some(Color::Purple));
        assert_eq!(board.visible_cells().len(), 200);
        assert!(board.visible_row(20).is_none());
    }
}
