use crate::apply::{ApplyReport, SkippedRename};
use crate::builders::Transform;
use crate::error::{ErrorReport, RenameError};
use crate::history::{format_history, HistoryOutcome, HistorySnapshot};
use crate::mapping::RenameMapping;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of listing the bound directory
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub directory: String,
    pub files: Vec<String>,
}

/// Result of building a mapping without committing it
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: String,
    pub transform: Transform,
    pub mapping: RenameMapping,
}

/// Result of committing a mapping
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub directory: String,
    pub transform: Transform,
    pub mapping: RenameMapping,
    pub report: ApplyReport,
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub entry_id: u64,
    pub mapping: RenameMapping,
    pub report: ApplyReport,
}

/// Result of a redo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RedoResult {
    pub entry_id: u64,
    pub mapping: RenameMapping,
    pub report: ApplyReport,
}

impl From<HistoryOutcome> for UndoResult {
    fn from(outcome: HistoryOutcome) -> Self {
        Self {
            entry_id: outcome.entry_id,
            mapping: outcome.mapping,
            report: outcome.report,
        }
    }
}

impl From<HistoryOutcome> for RedoResult {
    fn from(outcome: HistoryOutcome) -> Self {
        Self {
            entry_id: outcome.entry_id,
            mapping: outcome.mapping,
            report: outcome.report,
        }
    }
}

/// Result of a history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub history: HistorySnapshot,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn write_skipped(output: &mut String, skipped: &[SkippedRename]) {
    for skip in skipped {
        writeln!(output, "  skipped {} -> {}: {}", skip.old, skip.new, skip.reason).unwrap();
    }
}

impl OutputFormatter for ListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "list",
            "directory": self.directory,
            "files": self.files,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Current directory: {}\n", self.directory);
        if self.files.is_empty() {
            output.push_str("No files\n");
        }
        for (number, file) in (1_usize..).zip(&self.files) {
            writeln!(output, "{})\t{}", number, file).unwrap();
        }
        output
    }
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "transform": self.transform,
            "mapping": self.mapping,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Plan: {}\n", self.transform.describe());
        if self.mapping.is_empty() {
            output.push_str("No files would be renamed\n");
        } else {
            writeln!(output, "Renames: {} files", self.mapping.len()).unwrap();
        }
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rename",
            "directory": self.directory,
            "transform": self.transform,
            "mapping": self.mapping,
            "summary": {
                "applied": self.report.applied_count(),
                "skipped": self.report.skipped_count(),
            },
            "skipped": self.report.skipped,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "✓ Renamed {} of {} files ({})",
            self.report.applied_count(),
            self.mapping.len(),
            self.transform.describe()
        )
        .unwrap();

        if !self.report.skipped.is_empty() {
            writeln!(output, "⚠️  Skipped {} files", self.report.skipped_count()).unwrap();
            write_skipped(&mut output, &self.report.skipped);
        }

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "undo",
            "entry_id": self.entry_id,
            "mapping": self.mapping,
            "summary": {
                "reverted": self.report.applied_count(),
                "skipped": self.report.skipped_count(),
            },
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Successfully undid operation {}\n", self.entry_id);
        writeln!(output, "✓ Reverted {} renames", self.report.applied_count()).unwrap();
        write_skipped(&mut output, &self.report.skipped);
        output
    }
}

impl OutputFormatter for RedoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "redo",
            "entry_id": self.entry_id,
            "mapping": self.mapping,
            "summary": {
                "renamed": self.report.applied_count(),
                "skipped": self.report.skipped_count(),
            },
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Successfully redid operation {}\n", self.entry_id);
        writeln!(output, "✓ Renamed {} files", self.report.applied_count()).unwrap();
        write_skipped(&mut output, &self.report.skipped);
        output
    }
}

impl OutputFormatter for HistoryResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self.history).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format_history(&self.history)
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

/// Serialize an engine error as `{"success": false, "error": {kind, message}}`.
pub fn format_error_json(err: &RenameError) -> String {
    serde_json::to_string(&json!({
        "success": false,
        "error": ErrorReport::from(err),
    }))
    .unwrap_or_default()
}
