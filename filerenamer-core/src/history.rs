use crate::apply::{apply_mapping, ApplyReport};
use crate::error::{RenameError, Result};
use crate::mapping::RenameMapping;
use crate::snapshot::DirectoryHandle;
use serde::{Deserialize, Serialize};

/// One committed batch in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Sequence number within the session, starting at 1
    pub id: u64,
    /// When the batch was first recorded
    pub created_at: String,
    /// The mapping exactly as it was recorded
    pub mapping: RenameMapping,
}

/// What an undo or redo committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOutcome {
    pub entry_id: u64,
    /// The mapping handed to the commit executor (the inverse, for undo)
    pub mapping: RenameMapping,
    pub report: ApplyReport,
}

/// Linear undo/redo ledger of committed mappings for one directory.
///
/// Recording a new batch discards everything that was undone.
#[derive(Debug, Default)]
pub struct History {
    applied: Vec<HistoryEntry>,
    undone: Vec<HistoryEntry>,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `mapping` and record it so it can be undone.
    pub fn record_and_apply(
        &mut self,
        dir: &DirectoryHandle,
        mapping: RenameMapping,
    ) -> Result<ApplyReport> {
        let report = apply_mapping(dir, &mapping)?;

        self.next_id += 1;
        self.applied.push(HistoryEntry {
            id: self.next_id,
            created_at: chrono::Local::now().to_rfc3339(),
            mapping,
        });
        self.undone.clear();
        Ok(report)
    }

    /// Revert the most recently applied batch.
    pub fn undo(&mut self, dir: &DirectoryHandle) -> Result<HistoryOutcome> {
        let entry = self.applied.pop().ok_or(RenameError::EmptyHistory)?;
        let inverse = entry.mapping.inverse();

        match apply_mapping(dir, &inverse) {
            Ok(report) => {
                tracing::debug!(id = entry.id, reverted = report.applied_count(), "undo");
                let outcome = HistoryOutcome {
                    entry_id: entry.id,
                    mapping: inverse,
                    report,
                };
                self.undone.push(entry);
                Ok(outcome)
            },
            Err(e) => {
                self.applied.push(entry);
                Err(e)
            },
        }
    }

    /// Re-apply the most recently undone batch.
    pub fn redo(&mut self, dir: &DirectoryHandle) -> Result<HistoryOutcome> {
        let entry = self.undone.pop().ok_or(RenameError::EmptyRedo)?;

        match apply_mapping(dir, &entry.mapping) {
            Ok(report) => {
                tracing::debug!(id = entry.id, reapplied = report.applied_count(), "redo");
                let outcome = HistoryOutcome {
                    entry_id: entry.id,
                    mapping: entry.mapping.clone(),
                    report,
                };
                self.applied.push(entry);
                Ok(outcome)
            },
            Err(e) => {
                self.undone.push(entry);
                Err(e)
            },
        }
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Applied batches, most recent first.
    pub fn applied(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.applied.iter().rev()
    }

    /// Undone batches, most recent first.
    pub fn undone(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undone.iter().rev()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            applied: self.applied().cloned().collect(),
            undone: self.undone().cloned().collect(),
        }
    }
}

/// Owned copy of both stacks, most recent first, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub applied: Vec<HistoryEntry>,
    pub undone: Vec<HistoryEntry>,
}

/// Render both stacks as a table, undone entries first.
pub fn format_history(history: &HistorySnapshot) -> String {
    use comfy_table::{Cell, Color, Table};

    if history.applied.is_empty() && history.undone.is_empty() {
        return "No history\n".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Renames").fg(Color::Cyan),
        Cell::new("State").fg(Color::Cyan),
    ]);

    let rows = history
        .undone
        .iter()
        .map(|e| (e, "undone"))
        .chain(history.applied.iter().map(|e| (e, "applied")));
    for (entry, state) in rows {
        let date = entry
            .created_at
            .split('T')
            .next()
            .unwrap_or(&entry.created_at);
        table.add_row(vec![
            entry.id.to_string(),
            date.to_string(),
            entry.mapping.len().to_string(),
            state.to_string(),
        ]);
    }

    format!("{}\n", table)
}
