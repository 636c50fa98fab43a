//! Grid arcade (workspace facade crate).
//!
//! Re-exports the workspace crates as `grid_arcade::{core,adapter,term,input,types}`
//! so integration tests and the binary share one import path.

pub use grid_arcade_adapter as adapter;
pub use grid_arcade_core as core;
pub use grid_arcade_input as input;
pub use grid_arcade_term as term;
pub use grid_arcade_types as types;
