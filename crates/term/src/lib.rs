//! Terminal rendering for both grid games.
//!
//! Views render engine snapshots into a plain framebuffer; the renderer
//! flushes that framebuffer to a terminal backend. No widget toolkit is
//! involved, which keeps layout exact (2 columns per grid cell).

pub mod fb;
pub mod minefield_view;
pub mod renderer;
pub mod tetris_view;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb, Viewport};
pub use minefield_view::{MinefieldHud, MinefieldView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use tetris_view::TetrisView;
