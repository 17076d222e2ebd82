use crate::apply::{apply_mapping, ApplyReport};
use crate::builders::{build_mapping, Transform};
use crate::error::Result;
use crate::history::{History, HistoryOutcome, HistorySnapshot};
use crate::mapping::RenameMapping;
use crate::snapshot::DirectoryHandle;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct SessionState {
    dir: DirectoryHandle,
    history: History,
}

/// A directory bound to its own undo/redo history.
///
/// Every public operation holds an internal lock for its whole duration, so a
/// `Session` can be shared (e.g. behind an `Arc`) by a front-end that serves
/// concurrent requests.
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let dir = DirectoryHandle::open(path)?;
        Ok(Self {
            state: Mutex::new(SessionState {
                dir,
                history: History::new(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn directory(&self) -> PathBuf {
        self.lock().dir.path().to_path_buf()
    }

    /// Bind to another directory. History always starts over, even when the
    /// path is the same one.
    pub fn set_directory(&self, path: impl AsRef<Path>) -> Result<()> {
        let dir = DirectoryHandle::open(path)?;
        let mut state = self.lock();
        tracing::debug!(dir = %dir.path().display(), "session bound to directory");
        state.dir = dir;
        state.history.clear();
        Ok(())
    }

    pub fn list_files(&self) -> Result<Vec<String>> {
        self.lock().dir.snapshot()
    }

    /// Compute a mapping for preview. Never touches the disk.
    pub fn build_mapping(&self, transform: &Transform) -> Result<RenameMapping> {
        let state = self.lock();
        build_mapping(&state.dir, transform)
    }

    /// Commit `mapping` and record it in the history.
    pub fn apply(&self, mapping: RenameMapping) -> Result<ApplyReport> {
        let mut state = self.lock();
        let SessionState { dir, history } = &mut *state;
        history.record_and_apply(dir, mapping)
    }

    /// Commit `mapping` without recording it; it cannot be undone.
    pub fn apply_unrecorded(&self, mapping: &RenameMapping) -> Result<ApplyReport> {
        apply_mapping(&self.lock().dir, mapping)
    }

    /// Build and commit in one locked step.
    pub fn rename(&self, transform: &Transform) -> Result<(RenameMapping, ApplyReport)> {
        let mut state = self.lock();
        let SessionState { dir, history } = &mut *state;
        let mapping = build_mapping(dir, transform)?;
        let report = history.record_and_apply(dir, mapping.clone())?;
        Ok((mapping, report))
    }

    pub fn undo(&self) -> Result<HistoryOutcome> {
        let mut state = self.lock();
        let SessionState { dir, history } = &mut *state;
        history.undo(dir)
    }

    pub fn redo(&self) -> Result<HistoryOutcome> {
        let mut state = self.lock();
        let SessionState { dir, history } = &mut *state;
        history.redo(dir)
    }

    pub fn can_undo(&self) -> bool {
        self.lock().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.lock().history.can_redo()
    }

    pub fn history(&self) -> HistorySnapshot {
        self.lock().history.snapshot()
    }
}
