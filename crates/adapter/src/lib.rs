//! Adapter module - launcher-facing session contract
//!
//! The engines in `grid-arcade-core` speak their own state machines. A host
//! that runs several games side by side wants one lifecycle and one score
//! record for all of them; this crate provides both.
//!
//! # Session lifecycle
//!
//! ```text
//! NotInitialized → Ready → Running ⇄ Paused
//!                            │
//!                            ├→ Won
//!                            ├→ Lost
//!                            └→ Stopped
//! ```
//!
//! Engine states map onto [`SessionState`] through `From` impls. Each session
//! wrapper owns one engine, accumulates the elapsed time the host feeds it,
//! and produces exactly one [`ScoreEntry`] when its game ends.
//!
//! # Scores
//!
//! [`ScoreBoard`] keeps entries in memory and ranks them the way the game
//! wants: Minesweeper by fastest time, everything else by highest score.
//! The whole board round-trips through JSON.
//!
//! ```
//! use grid_arcade_adapter::{GameKind, ScoreBoard, ScoreEntry};
//! use grid_arcade_adapter::types::Difficulty;
//!
//! let mut board = ScoreBoard::new();
//! board.add(ScoreEntry::new(GameKind::Tetris, "ada", 1200, Difficulty::Expert));
//! assert_eq!(board.top_scores(GameKind::Tetris, 10)[0].score, 1200);
//! ```

pub mod scores;
pub mod session;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use scores::{minesweeper_score, GameKind, ScoreBoard, ScoreEntry, HIGH_SCORE_SLOTS};
pub use session::{MinesweeperSession, SessionState, TetrisSession};
