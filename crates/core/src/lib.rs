//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds both grid engines and nothing else. It has no dependency
//! on terminals or I/O, so every rule can be driven headless:
//!
//! - **Deterministic**: the same seed and input sequence replays the same game
//! - **Testable**: every rule is reachable through the public API
//! - **Portable**: terminal, GUI, or scripted drivers share one engine
//!
//! # Module Structure
//!
//! - [`minefield`]: Minesweeper engine with first-click safety and flood reveal
//! - [`cell`]: a single minefield cell
//! - [`board`]: Tetris playfield with buffer rows, collision and line clearing
//! - [`pieces`]: tetromino shape matrices and rotation
//! - [`game_state`]: Tetris engine: movement, locking, hold, leveling
//! - [`rng`]: uniform and 7-bag piece generation
//! - [`scoring`]: line-clear points and level progression
//! - [`config`]: board configuration and validation
//! - [`snapshot`]: owned read-only views for renderers
//!
//! # Example
//!
//! ```
//! use grid_arcade_core::{Minefield, MinefieldConfig, TetrisConfig, TetrisGame};
//! use grid_arcade_core::types::{MinefieldState, TetrisAction};
//!
//! let mut field = Minefield::new(MinefieldConfig::beginner(), 7).unwrap();
//! assert!(field.left_click(4, 4));
//! assert_eq!(field.state(), MinefieldState::Playing);
//!
//! let mut game = TetrisGame::new(TetrisConfig::default(), 7).unwrap();
//! game.start();
//! game.apply_action(TetrisAction::HardDrop);
//! assert_eq!(game.pieces_placed(), 1);
//! ```

pub mod board;
pub mod cell;
pub mod config;
pub mod game_state;
pub mod minefield;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use grid_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cell::Cell;
pub use config::{ConfigError, MinefieldConfig, Randomizer, TetrisConfig};
pub use game_state::{MoveResult, PlayfieldTransition, TetrisEvent, TetrisGame};
pub use minefield::{Minefield, MinefieldTransition, MinefieldTransitions};
pub use pieces::{Point, Shape, Tetromino};
pub use rng::PieceQueue;
pub use scoring::{calculate_line_score, Leveling};
pub use snapshot::{ActiveSnapshot, CellView, MinefieldSnapshot, TetrisSnapshot};
