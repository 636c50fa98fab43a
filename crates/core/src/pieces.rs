//! Tetromino shapes and movement.
//!
//! A shape is a boolean matrix (at most 4x4) rotated by transposing it. The
//! anchor `position` is the top-left of the matrix in board coordinates, so a
//! block at matrix `(row, col)` sits on board cell `(x + col, y + row)`.
//!
//! Rotation changes the matrix dimensions (the I piece goes from 1x4 to 4x1)
//! while the anchor stays put. There are no wall kicks: callers try a rotated
//! clone and keep it only if the board accepts it.

use arrayvec::ArrayVec;

use crate::types::{Color, PieceKind, Rotation};

/// Largest matrix side of any tetromino.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Board position in cells. `y` grows downward and includes buffer rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Spawn-orientation patterns, top row first.
fn spawn_pattern(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &["####"],
        PieceKind::O => &["##", "##"],
        PieceKind::T => &[".#.", "###"],
        PieceKind::S => &[".##", "##."],
        PieceKind::Z => &["##.", ".##"],
        PieceKind::J => &["#..", "###"],
        PieceKind::L => &["..#", "###"],
    }
}

/// Occupancy matrix of a piece in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    pub fn spawn(kind: PieceKind) -> Self {
        let pattern = spawn_pattern(kind);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, line) in pattern.iter().enumerate() {
            for (c, ch) in line.bytes().enumerate() {
                cells[r][c] = ch == b'#';
            }
        }
        Self {
            rows: pattern.len(),
            cols: pattern[0].len(),
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col]
    }

    /// `rotated[c][rows - 1 - r] = self[r][c]`
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c][self.rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// `rotated[cols - 1 - c][r] = self[r][c]`
    pub fn rotated_ccw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[self.cols - 1 - c][r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Filled `(row, col)` offsets in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.cells[r][c])
    }
}

/// Spawn column for a board of `width`: the anchor sits just left of centre.
pub fn spawn_x(width: u16) -> i32 {
    i32::from(width) / 2 - 1
}

/// A falling piece.
///
/// Not `Copy`. Moves go through an explicit clone that is validated before
/// it replaces the live piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    shape: Shape,
    position: Point,
    rotation: Rotation,
}

impl Tetromino {
    pub fn new(kind: PieceKind, position: Point) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
            position,
            rotation: Rotation::North,
        }
    }

    /// Spawn orientation at the top of the buffer on a board of `width`.
    pub fn spawn(kind: PieceKind, width: u16) -> Self {
        Self::new(kind, Point::new(spawn_x(width), 0))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// A moved copy; `self` is untouched.
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.translate(dx, dy);
        next
    }

    pub fn rotate_cw(&mut self) {
        self.shape = self.shape.rotated_cw();
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.shape = self.shape.rotated_ccw();
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Board cells covered by the piece.
    pub fn blocks(&self) -> ArrayVec<Point, 4> {
        let mut out = ArrayVec::new();
        for (r, c) in self.shape.offsets() {
            out.push(Point::new(
                self.position.x + c as i32,
                self.position.y + r as i32,
            ));
        }
        out
    }
}
