#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Batch renaming of the files in a single directory.
//!
//! Builders compute an old-name to new-name [`RenameMapping`] from a fresh
//! directory snapshot without touching the disk. The commit executor applies a
//! mapping pair by pair, never overwriting an existing file, and the
//! [`History`] makes each committed batch undoable. A [`Session`] ties one
//! directory to one history and is the object front-ends talk to.

pub mod apply;
pub mod builders;
pub mod config;
pub mod error;
pub mod history;
pub mod mapping;
pub mod operations;
pub mod output;
pub mod preview;
pub mod session;
pub mod snapshot;

pub use apply::{apply_mapping, ApplyReport, SkipReason, SkippedRename};
pub use builders::{
    build_add_from_file_mapping, build_enum_mapping, build_mapping, build_prefix_mapping,
    build_rename_with_enum_mapping, build_replace_mapping, build_suffix_mapping, Location,
    Transform,
};
pub use config::Config;
pub use error::{ErrorKind, ErrorReport, RenameError, Result};
pub use history::{format_history, History, HistoryEntry, HistoryOutcome, HistorySnapshot};
pub use mapping::{RenameMapping, RenamePair};
pub use operations::{
    apply_operation, history_operation, list_operation, plan_operation, redo_operation,
    undo_operation,
};
pub use output::{
    format_error_json, HistoryResult, ListResult, OutputFormat, OutputFormatter, PlanResult,
    RedoResult, RenameResult, UndoResult, VersionResult,
};
pub use preview::{render_mapping, Preview};
pub use session::Session;
pub use snapshot::{list_filenames, split_extension, DirectoryHandle};
