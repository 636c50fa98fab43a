//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by both grid engines, the
//! session adapter, and the terminal front-end. Everything here is plain data
//! with no external dependencies.
//!
//! # Playfield Dimensions
//!
//! Default Tetris playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows
//! - **Buffer**: 4 hidden rows above the visible area (board rows 0-3)
//! - **Spawn anchor**: (4, 0), the top-left of the piece's bounding box
//!
//! # Drop Speed
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed for a level-up |
//! | `DROP_INTERVAL_STEP_MS` | 50 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 50 | Gravity floor |
//!
//! # Examples
//!
//! ```
//! use grid_arcade_types::{Color, PieceKind, Rotation, TetrisAction};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), Color::Purple);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(TetrisAction::from_str("hardDrop"), Some(TetrisAction::HardDrop));
//! ```

/// Playfield width in cells (10 columns)
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Visible playfield height in cells (20 rows)
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Hidden rows above the visible playfield used for spawning and overflow detection
pub const BUFFER_HEIGHT: u8 = 4;

/// Level a new Tetris game starts at
pub const STARTING_LEVEL: u32 = 1;

/// Lines that must be cleared to advance one level
pub const LINES_PER_LEVEL: i32 = 10;

/// Gravity interval reduction applied on every level-up
pub const DROP_INTERVAL_STEP_MS: u32 = 50;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 50;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines, multiplied by `(level + 1)`:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use grid_arcade_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of the piece, fixed per kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Colors a locked playfield cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

/// A cell of the Tetris playfield
///
/// - `None`: empty
/// - `Some(Color)`: locked block of that color
pub type Occupancy = Option<Color>;

/// Quarter-turn rotation state of a piece
///
/// The cycle goes: North (spawn) → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use grid_arcade_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use grid_arcade_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from spawn (0-3).
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Commands a host can apply to a Tetris game
///
/// Used by both keyboard input and scripted drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Drop to the lowest valid position and lock
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap with the hold slot (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
}

impl TetrisAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// ```
    /// use grid_arcade_types::TetrisAction;
    ///
    /// assert_eq!(TetrisAction::from_str("moveLeft"), Some(TetrisAction::MoveLeft));
    /// assert_eq!(TetrisAction::from_str("ROTATECCW"), Some(TetrisAction::RotateCcw));
    /// assert_eq!(TetrisAction::from_str("softDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(TetrisAction::MoveLeft),
            "moveright" => Some(TetrisAction::MoveRight),
            "movedown" => Some(TetrisAction::MoveDown),
            "harddrop" => Some(TetrisAction::HardDrop),
            "rotatecw" => Some(TetrisAction::RotateCw),
            "rotateccw" => Some(TetrisAction::RotateCcw),
            "hold" => Some(TetrisAction::Hold),
            "pause" => Some(TetrisAction::Pause),
            "restart" => Some(TetrisAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TetrisAction::MoveLeft => "moveLeft",
            TetrisAction::MoveRight => "moveRight",
            TetrisAction::MoveDown => "moveDown",
            TetrisAction::HardDrop => "hardDrop",
            TetrisAction::RotateCw => "rotateCw",
            TetrisAction::RotateCcw => "rotateCcw",
            TetrisAction::Hold => "hold",
            TetrisAction::Pause => "pause",
            TetrisAction::Restart => "restart",
        }
    }
}

/// Lifecycle of a Minesweeper game
///
/// `NotStarted → Playing → {Won | Lost}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinefieldState {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl MinefieldState {
    pub fn is_finished(&self) -> bool {
        matches!(self, MinefieldState::Won | MinefieldState::Lost)
    }
}

/// Lifecycle of a Tetris game
///
/// `Ready → Running ⇄ Paused`, `Running → Lost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayfieldState {
    Ready,
    Running,
    Paused,
    Lost,
}

/// A single state change, reported exactly once by the engine that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateTransition<S> {
    pub from: S,
    pub to: S,
}

impl<S> StateTransition<S> {
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }
}

/// Difficulty presets shared by both games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// ```
    /// use grid_arcade_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("Expert"), Some(Difficulty::Expert));
    /// assert_eq!(Difficulty::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_playfield_dimensions() {
        assert_eq!(PLAYFIELD_WIDTH, 10);
        assert_eq!(PLAYFIELD_HEIGHT, 20);
        assert_eq!(BUFFER_HEIGHT, 4);
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let mut colors: Vec<Color> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        colors.sort_by_key(|c| c.as_str());
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn rotation_cw_then_ccw_is_identity() {
        for r in [
            Rotation::North,
            Rotation::East,
            Rotation::South,
            Rotation::West,
        ] {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            assert_eq!(r.rotate_cw().index(), (r.index() + 1) % 4);
        }
    }

    #[test]
    fn finished_minefield_states() {
        assert!(!MinefieldState::NotStarted.is_finished());
        assert!(!MinefieldState::Playing.is_finished());
        assert!(MinefieldState::Won.is_finished());
        assert!(MinefieldState::Lost.is_finished());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("BEGINNER"), Some(Difficulty::Beginner));
        assert_eq!(
            Difficulty::from_str("intermediate"),
            Some(Difficulty::Intermediate)
        );
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
    }
}
