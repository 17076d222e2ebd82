use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the renaming engine.
///
/// Per-pair problems during a commit are not errors; they are reported as
/// [`crate::apply::SkipReason`] values in the commit report.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("invalid directory '{}': {reason}", path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no operations to undo")]
    EmptyHistory,

    #[error("no operations to redo")]
    EmptyRedo,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stable, serializable classification of a [`RenameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDirectory,
    InvalidArgument,
    EmptyHistory,
    EmptyRedo,
    Io,
}

impl RenameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDirectory { .. } => ErrorKind::InvalidDirectory,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::EmptyHistory => ErrorKind::EmptyHistory,
            Self::EmptyRedo => ErrorKind::EmptyRedo,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Error shape handed to collaborators that serialize results (kind + message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RenameError> for ErrorReport {
    fn from(err: &RenameError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
