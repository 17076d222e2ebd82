//! High-level operations that correspond to CLI commands
//!
//! These wrap a [`crate::Session`] and return the serializable result records
//! from [`crate::output`], leaving argument parsing and printing to the caller.

pub mod apply;
pub mod history;
pub mod list;
pub mod plan;
pub mod undo;

pub use apply::apply_operation;
pub use history::history_operation;
pub use list::list_operation;
pub use plan::plan_operation;
pub use undo::{redo_operation, undo_operation};
