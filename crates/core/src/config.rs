//! Board configuration for both engines.
//!
//! Configurations are plain serde structs so a host can keep them in a JSON
//! settings file. Every constructor path that produces an engine validates its
//! config first; a config that passes [`MinefieldConfig::validate`] or
//! [`TetrisConfig::validate`] can always be played.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, BUFFER_HEIGHT, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Narrowest playfield on which every spawn shape fits at the spawn anchor.
pub const MIN_PLAYFIELD_WIDTH: u16 = 5;

/// Shallowest buffer that holds every spawn shape entirely above the visible rows.
pub const MIN_BUFFER_HEIGHT: u16 = 2;

/// Largest board either engine accepts, in cells (buffer rows included).
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyBoard,
    TooManyMines { requested: usize, max: usize },
    MineOutOfBounds { row: usize, col: usize },
    BoardTooNarrow { width: u16, min: u16 },
    BufferTooShallow { buffer_height: u16, min: u16 },
    BoardTooLarge { max_cells: usize },
    Parse(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyBoard => "empty_board",
            ConfigError::TooManyMines { .. } => "too_many_mines",
            ConfigError::MineOutOfBounds { .. } => "mine_out_of_bounds",
            ConfigError::BoardTooNarrow { .. } => "board_too_narrow",
            ConfigError::BufferTooShallow { .. } => "buffer_too_shallow",
            ConfigError::BoardTooLarge { .. } => "board_too_large",
            ConfigError::Parse(_) => "parse",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfigError::EmptyBoard => "board dimensions must be positive",
            ConfigError::TooManyMines { .. } => {
                "mine count leaves no room for the first-click safe zone"
            }
            ConfigError::MineOutOfBounds { .. } => "mine position lies outside the board",
            ConfigError::BoardTooNarrow { .. } => "playfield is too narrow to spawn pieces",
            ConfigError::BufferTooShallow { .. } => "buffer rows cannot hold a spawning piece",
            ConfigError::BoardTooLarge { .. } => "board has too many cells",
            ConfigError::Parse(_) => "configuration could not be parsed",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooManyMines { requested, max } => {
                write!(f, "{} ({requested} requested, at most {max})", self.message())
            }
            ConfigError::MineOutOfBounds { row, col } => {
                write!(f, "{} at ({row}, {col})", self.message())
            }
            ConfigError::BoardTooNarrow { width, min } => {
                write!(f, "{} (width {width}, minimum {min})", self.message())
            }
            ConfigError::BufferTooShallow { buffer_height, min } => {
                write!(f, "{} ({buffer_height} rows, minimum {min})", self.message())
            }
            ConfigError::BoardTooLarge { max_cells } => {
                write!(f, "{} (at most {max_cells})", self.message())
            }
            ConfigError::Parse(detail) => write!(f, "{}: {detail}", self.message()),
            ConfigError::EmptyBoard => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}

fn check_cell_count(cells: Option<usize>) -> Result<(), ConfigError> {
    match cells {
        Some(n) if n <= MAX_BOARD_CELLS => Ok(()),
        _ => Err(ConfigError::BoardTooLarge {
            max_cells: MAX_BOARD_CELLS,
        }),
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Minesweeper board size and mine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl MinefieldConfig {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Self { rows, cols, mines }
    }

    /// 9x9 with 10 mines
    pub fn beginner() -> Self {
        Self::new(9, 9, 10)
    }

    /// 16x16 with 40 mines
    pub fn intermediate() -> Self {
        Self::new(16, 16, 40)
    }

    /// 16 rows by 30 columns with 99 mines
    pub fn expert() -> Self {
        Self::new(16, 30, 99)
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self::beginner(),
            Difficulty::Intermediate => Self::intermediate(),
            Difficulty::Expert => Self::expert(),
        }
    }

    /// The preset this config matches exactly, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::ALL
            .into_iter()
            .find(|&d| Self::for_difficulty(d) == *self)
    }

    /// Saturates on dimensions that [`MinefieldConfig::validate`] rejects.
    pub fn total_cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Largest mine count that can still be placed around any first click.
    ///
    /// The safe zone is at most 3x3 but shrinks on small boards, so the
    /// bound uses the safe zone an interior click would need.
    pub fn max_mines(&self) -> usize {
        let safe_zone = self.rows.min(3) * self.cols.min(3);
        self.total_cells().saturating_sub(safe_zone)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        check_cell_count(self.rows.checked_mul(self.cols))?;
        if self.mines > self.max_mines() {
            return Err(ConfigError::TooManyMines {
                requested: self.mines,
                max: self.max_mines(),
            });
        }
        Ok(())
    }

    /// Parse and validate a config from JSON.
    ///
    /// ```
    /// use grid_arcade_core::MinefieldConfig;
    ///
    /// let config = MinefieldConfig::from_json_str(r#"{"rows":9,"cols":9,"mines":10}"#).unwrap();
    /// assert_eq!(config, MinefieldConfig::beginner());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for MinefieldConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// How the next tetromino kind is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    /// Every kind equally likely on every draw.
    #[default]
    Uniform,
    /// Shuffled bags containing each kind once.
    SevenBag,
}

/// Tetris playfield dimensions and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: u16,
    /// Visible rows.
    pub height: u16,
    /// Hidden rows above the visible area.
    pub buffer_height: u16,
    /// Gravity interval at the starting level.
    pub base_drop_interval_ms: u32,
    pub randomizer: Randomizer,
}

impl TetrisConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let base_drop_interval_ms = match difficulty {
            Difficulty::Beginner => 1000,
            Difficulty::Intermediate => 750,
            Difficulty::Expert => 500,
        };
        Self {
            base_drop_interval_ms,
            ..Self::default()
        }
    }

    /// Saturates on dimensions that [`TetrisConfig::validate`] rejects.
    pub fn total_height(&self) -> u16 {
        self.height.saturating_add(self.buffer_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.width < MIN_PLAYFIELD_WIDTH {
            return Err(ConfigError::BoardTooNarrow {
                width: self.width,
                min: MIN_PLAYFIELD_WIDTH,
            });
        }
        if self.buffer_height < MIN_BUFFER_HEIGHT {
            return Err(ConfigError::BufferTooShallow {
                buffer_height: self.buffer_height,
                min: MIN_BUFFER_HEIGHT,
            });
        }
        let total_height = self.height.checked_add(self.buffer_height);
        check_cell_count(total_height.map(|h| usize::from(self.width) * usize::from(h)))?;
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH as u16,
            height: PLAYFIELD_HEIGHT as u16,
            buffer_height: BUFFER_HEIGHT as u16,
            base_drop_interval_ms: 1000,
            randomizer: Randomizer::Uniform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for d in Difficulty::ALL {
            assert_eq!(MinefieldConfig::for_difficulty(d).validate(), Ok(()));
            assert_eq!(TetrisConfig::for_difficulty(d).validate(), Ok(()));
        }
    }

    #[test]
    fn expert_is_sixteen_rows_by_thirty_cols() {
        let c = MinefieldConfig::expert();
        assert_eq!((c.rows, c.cols, c.mines), (16, 30, 99));
        assert_eq!(c.difficulty(), Some(Difficulty::Expert));
        assert_eq!(MinefieldConfig::new(10, 10, 10).difficulty(), None);
    }

    #[test]
    fn max_mines_reserves_the_safe_zone() {
        assert_eq!(MinefieldConfig::new(9, 9, 0).max_mines(), 72);
        assert_eq!(MinefieldConfig::new(3, 3, 0).max_mines(), 0);
        assert_eq!(MinefieldConfig::new(1, 5, 0).max_mines(), 2);
        assert_eq!(MinefieldConfig::new(1, 1, 0).max_mines(), 0);
    }

    #[test]
    fn rejects_unsatisfiable_mine_counts() {
        let err = MinefieldConfig::new(3, 3, 1).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyMines {
                requested: 1,
                max: 0
            }
        );
        assert_eq!(err.code(), "too_many_mines");
        assert!(err.to_string().contains("1 requested"));

        assert_eq!(
            MinefieldConfig::new(0, 9, 0).validate(),
            Err(ConfigError::EmptyBoard)
        );
    }

    #[test]
    fn tetris_difficulty_sets_gravity() {
        assert_eq!(
            TetrisConfig::for_difficulty(Difficulty::Beginner).base_drop_interval_ms,
            1000
        );
        assert_eq!(
            TetrisConfig::for_difficulty(Difficulty::Intermediate).base_drop_interval_ms,
            750
        );
        assert_eq!(
            TetrisConfig::for_difficulty(Difficulty::Expert).base_drop_interval_ms,
            500
        );
    }

    #[test]
    fn tetris_rejects_degenerate_boards() {
        let narrow = TetrisConfig {
            width: 4,
            ..TetrisConfig::default()
        };
        assert_eq!(
            narrow.validate(),
            Err(ConfigError::BoardTooNarrow { width: 4, min: 5 })
        );

        let shallow = TetrisConfig {
            buffer_height: 1,
            ..TetrisConfig::default()
        };
        assert_eq!(shallow.validate().unwrap_err().code(), "buffer_too_shallow");

        let empty = TetrisConfig {
            height: 0,
            ..TetrisConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyBoard));
    }

    #[test]
    fn tetris_json_fills_missing_fields() {
        let config =
            TetrisConfig::from_json_str(r#"{"base_drop_interval_ms":500,"randomizer":"seven_bag"}"#)
                .unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.total_height(), 24);
        assert_eq!(config.randomizer, Randomizer::SevenBag);
    }

    #[test]
    fn oversized_boards_are_rejected_before_allocation() {
        let err = MinefieldConfig::from_json_str(
            r#"{"rows":18446744073709551615,"cols":2,"mines":0}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "board_too_large");
        assert_eq!(
            MinefieldConfig::new(2048, 1024, 0).validate(),
            Err(ConfigError::BoardTooLarge {
                max_cells: MAX_BOARD_CELLS
            })
        );
        assert_eq!(MinefieldConfig::new(1024, 1024, 0).validate(), Ok(()));

        let err = TetrisConfig::from_json_str(r#"{"height":65535}"#).unwrap_err();
        assert_eq!(err.code(), "board_too_large");
        let wide = TetrisConfig {
            width: u16::MAX,
            height: 100,
            ..TetrisConfig::default()
        };
        assert!(matches!(wide.validate(), Err(ConfigError::BoardTooLarge { .. })));
    }

    #[test]
    fn json_errors_are_reported_as_parse() {
        let err = MinefieldConfig::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code(), "parse");

        let err = MinefieldConfig::from_json_str(r#"{"rows":2,"cols":2,"mines":3}"#).unwrap_err();
        assert_eq!(err.code(), "too_many_mines");
    }
}
