//! Read-only views of engine state for renderers and drivers.
//!
//! Snapshots own their data, so a host can render one while the engine keeps
//! running.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{MinefieldState, Occupancy, PieceKind, PlayfieldState, Rotation};

/// What the player may see of a minefield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed safe cell with its adjacent-mine count.
    Open(u8),
    /// Revealed mine (only after a loss).
    Mine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinefieldSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub state: MinefieldState,
    pub mine_count: usize,
    pub remaining_mines: i64,
    pub revealed_count: usize,
    /// Row-major.
    pub cells: Vec<CellView>,
}

impl MinefieldSnapshot {
    pub fn get(&self, row: usize, col: usize) -> Option<CellView> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }
}

/// A piece in visible-row coordinates. Blocks still in the buffer have `y < 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub blocks: ArrayVec<(i32, i32), 4>,
}

impl ActiveSnapshot {
    pub fn from_piece(piece: &Tetromino, buffer_height: u16) -> Self {
        let offset = i32::from(buffer_height);
        let pos = piece.position();
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            x: pos.x,
            y: pos.y - offset,
            blocks: piece.blocks().iter().map(|b| (b.x, b.y - offset)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrisSnapshot {
    pub width: u16,
    pub height: u16,
    /// Visible rows only, row-major, top row first.
    pub board: Vec<Occupancy>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub state: PlayfieldState,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_placed: u32,
    pub drop_interval_ms: u32,
}

impl TetrisSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Option<Occupancy> {
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        (x < w && y < h).then(|| self.board[y * w + x])
    }

    pub fn playable(&self) -> bool {
        self.state == PlayfieldState::Running
    }
}
