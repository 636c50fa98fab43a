//! Terminal input module.
//!
//! Maps `crossterm` key events into game commands. Independent of any UI
//! framework; the driver decides what to do with the result.

pub mod map;

pub use grid_arcade_types as types;

pub use map::{handle_key_event, handle_minesweeper_key, should_quit, MinesweeperCommand};
