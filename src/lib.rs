//! Bounded undo/redo history for arbitrary values, plus the configuration
//! and script runner used by the `edit-history` binary.

pub mod config;
pub mod history;
pub mod script;

pub use history::{DEFAULT_CAPACITY, EditHistory, HistoryError};
