//! Minesweeper engine.
//!
//! Mines are placed lazily on the first reveal so the clicked cell and its
//! neighbours are always safe. Reveals flood outward through zero cells with
//! an explicit stack, so even a 1000x1000 empty board cannot overflow the
//! call stack.
//!
//! State changes are queued and drained with [`Minefield::take_transitions`];
//! each transition is reported exactly once.

use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::config::{ConfigError, MinefieldConfig};
use crate::snapshot::{CellView, MinefieldSnapshot};
use crate::types::{MinefieldState, StateTransition};

pub type MinefieldTransition = StateTransition<MinefieldState>;

/// A game never makes more than two transitions: start, then win or loss.
pub type MinefieldTransitions = ArrayVec<MinefieldTransition, 2>;

/// In-bounds neighbours of `(row, col)`, excluding the cell itself.
pub fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> ArrayVec<(usize, usize), 8> {
    let mut out = ArrayVec::new();
    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = row as i64 + dr;
            let c = col as i64 + dc;
            if r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols {
                out.push((r as usize, c as usize));
            }
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Minefield<R = SmallRng> {
    config: MinefieldConfig,
    cells: Vec<Cell>,
    state: MinefieldState,
    revealed_count: usize,
    flagged_count: usize,
    mines_placed: bool,
    transitions: MinefieldTransitions,
    rng: R,
}

impl Minefield<SmallRng> {
    /// Deterministic minefield: the same seed and click sequence yields the
    /// same layout.
    pub fn new(config: MinefieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: MinefieldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// A minefield whose mines are fixed up front instead of placed on the
    /// first click. Used for replays and scripted boards.
    ///
    /// The first-click safe zone does not apply: revealing a listed mine on
    /// the first click loses. Duplicate positions count once. Calling
    /// [`Minefield::initialize`] discards the layout and returns to random
    /// placement, drawn from an RNG seeded with 0; use
    /// [`Minefield::with_mine_layout_and_rng`] to pick the RNG.
    pub fn with_mine_layout(
        rows: usize,
        cols: usize,
        mines: &[(usize, usize)],
    ) -> Result<Self, ConfigError> {
        Self::with_mine_layout_and_rng(rows, cols, mines, SmallRng::seed_from_u64(0))
    }
}

impl<R: Rng> Minefield<R> {
    pub fn with_rng(config: MinefieldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cells: Self::fresh_cells(config.rows, config.cols),
            state: MinefieldState::NotStarted,
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: false,
            transitions: ArrayVec::new(),
            rng,
        })
    }

    /// Fixed layout as in [`Minefield::with_mine_layout`]; `rng` places the
    /// mines of every game after [`Minefield::initialize`].
    pub fn with_mine_layout_and_rng(
        rows: usize,
        cols: usize,
        mines: &[(usize, usize)],
        rng: R,
    ) -> Result<Self, ConfigError> {
        MinefieldConfig::new(rows, cols, 0).validate()?;
        if let Some(&(row, col)) = mines.iter().find(|&&(r, c)| r >= rows || c >= cols) {
            return Err(ConfigError::MineOutOfBounds { row, col });
        }

        let mut field = Self {
            config: MinefieldConfig::new(rows, cols, 0),
            cells: Self::fresh_cells(rows, cols),
            state: MinefieldState::NotStarted,
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: true,
            transitions: ArrayVec::new(),
            rng,
        };
        for &(row, col) in mines {
            let idx = row * cols + col;
            if !field.cells[idx].is_mine {
                field.cells[idx].is_mine = true;
                field.config.mines += 1;
            }
        }
        if field.config.mines >= field.config.total_cells() {
            return Err(ConfigError::TooManyMines {
                requested: field.config.mines,
                max: field.config.total_cells() - 1,
            });
        }
        field.compute_adjacency();
        Ok(field)
    }

    fn fresh_cells(rows: usize, cols: usize) -> Vec<Cell> {
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Cell::new(r, c)))
            .collect()
    }

    /// Reset to a fresh, unmined board of the same size.
    ///
    /// Undrained transitions from the previous game are discarded.
    pub fn initialize(&mut self) {
        // A fixed layout may hold more mines than random placement allows.
        self.config.mines = self.config.mines.min(self.config.max_mines());
        for cell in &mut self.cells {
            cell.reset();
        }
        self.state = MinefieldState::NotStarted;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.mines_placed = false;
        self.transitions.clear();
    }

    pub fn config(&self) -> MinefieldConfig {
        self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn mine_count(&self) -> usize {
        self.config.mines
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn state(&self) -> MinefieldState {
        self.state
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Mines minus flags. Negative when the player over-flags.
    pub fn remaining_mines(&self) -> i64 {
        self.config.mines as i64 - self.flagged_count as i64
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.config.rows && col < self.config.cols).then(|| row * self.config.cols + col)
    }

    /// Reveal a cell.
    ///
    /// Returns `false` when the click was ignored (out of bounds, already
    /// revealed, flagged, or the game is over) and when it hit a mine.
    pub fn left_click(&mut self, row: usize, col: usize) -> bool {
        if self.state.is_finished() {
            return false;
        }
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        if self.cells[idx].is_revealed || self.cells[idx].is_flagged {
            return false;
        }

        if self.state == MinefieldState::NotStarted {
            if !self.mines_placed {
                self.place_mines(row, col);
                self.compute_adjacency();
                self.mines_placed = true;
            }
            self.transition(MinefieldState::Playing);
        }

        if self.cells[idx].is_mine {
            self.reveal_all_mines();
            self.transition(MinefieldState::Lost);
            return false;
        }

        self.flood_reveal(idx);
        self.check_win();
        true
    }

    /// Toggle the flag on an unrevealed cell. Returns whether anything changed.
    pub fn right_click(&mut self, row: usize, col: usize) -> bool {
        if self.state.is_finished() {
            return false;
        }
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        if cell.is_revealed {
            return false;
        }
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        true
    }

    /// Drain state transitions made since the last call.
    pub fn take_transitions(&mut self) -> MinefieldTransitions {
        std::mem::take(&mut self.transitions)
    }

    pub fn snapshot(&self) -> MinefieldSnapshot {
        let cells = self
            .cells
            .iter()
            .map(|c| match (c.is_revealed, c.is_mine, c.is_flagged) {
                (true, true, _) => CellView::Mine,
                (true, false, _) => CellView::Open(c.adjacent_mines),
                (false, _, true) => CellView::Flagged,
                (false, _, false) => CellView::Hidden,
            })
            .collect();
        MinefieldSnapshot {
            rows: self.config.rows,
            cols: self.config.cols,
            state: self.state,
            mine_count: self.config.mines,
            remaining_mines: self.remaining_mines(),
            revealed_count: self.revealed_count,
            cells,
        }
    }

    fn transition(&mut self, to: MinefieldState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.transitions.push(StateTransition::new(from, to));
    }

    fn place_mines(&mut self, safe_row: usize, safe_col: usize) {
        let cols = self.config.cols;
        let mut candidates: Vec<usize> = (0..self.cells.len())
            .filter(|&i| {
                let (r, c) = (i / cols, i % cols);
                r.abs_diff(safe_row) > 1 || c.abs_diff(safe_col) > 1
            })
            .collect();
        let count = self.config.mines.min(candidates.len());
        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, count);
        for &i in chosen.iter() {
            self.cells[i].is_mine = true;
        }
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = (self.config.rows, self.config.cols);
        for i in 0..self.cells.len() {
            if self.cells[i].is_mine {
                self.cells[i].adjacent_mines = 0;
                continue;
            }
            let count = neighbors(rows, cols, i / cols, i % cols)
                .into_iter()
                .filter(|&(r, c)| self.cells[r * cols + c].is_mine)
                .count();
            self.cells[i].adjacent_mines = count as u8;
        }
    }

    fn flood_reveal(&mut self, start: usize) {
        let (rows, cols) = (self.config.rows, self.config.cols);
        let mut queued = vec![false; self.cells.len()];
        let mut stack = vec![start];
        queued[start] = true;

        while let Some(i) = stack.pop() {
            let cell = &mut self.cells[i];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            cell.is_revealed = true;
            let expands = cell.adjacent_mines == 0;
            self.revealed_count += 1;

            if !expands {
                continue;
            }
            for (r, c) in neighbors(rows, cols, i / cols, i % cols) {
                let n = r * cols + c;
                if !queued[n] && !self.cells[n].is_revealed && !self.cells[n].is_flagged {
                    queued[n] = true;
                    stack.push(n);
                }
            }
        }
    }

    // Shown on loss; does not count toward revealed_count.
    fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_mine) {
            cell.is_revealed = true;
        }
    }

    fn check_win(&mut self) {
        if self.revealed_count == self.cells.len() - self.config.mines {
            self.transition(MinefieldState::Won);
        }
    }
}
