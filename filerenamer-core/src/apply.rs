use crate::error::{RenameError, Result};
use crate::mapping::{RenameMapping, RenamePair};
use crate::snapshot::DirectoryHandle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Why a pair of a mapping was not committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The source name is no longer in the directory.
    SourceMissing,
    /// Something already exists under the target name.
    DestinationExists,
    /// The pair renames a file onto itself.
    Unchanged,
    /// A name is empty, `.`/`..`, or would leave the directory.
    InvalidName,
    /// The source is a directory rather than a file.
    NotAFile,
    /// The operating system refused the rename.
    RenameFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceMissing => f.write_str("source no longer exists"),
            Self::DestinationExists => f.write_str("destination already exists"),
            Self::Unchanged => f.write_str("name is unchanged"),
            Self::InvalidName => f.write_str("not a plain filename"),
            Self::NotAFile => f.write_str("source is a directory"),
            Self::RenameFailed(msg) => write!(f, "rename failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRename {
    pub old: String,
    pub new: String,
    pub reason: SkipReason,
}

/// Outcome of committing a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub applied: Vec<RenamePair>,
    pub skipped: Vec<SkippedRename>,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn skip(&mut self, pair: &RenamePair, reason: SkipReason) {
        tracing::warn!(old = %pair.old, new = %pair.new, %reason, "skipping rename");
        self.skipped.push(SkippedRename {
            old: pair.old.clone(),
            new: pair.new.clone(),
            reason,
        });
    }
}

/// Commit `mapping` to disk, one pair at a time in mapping order.
///
/// Pairs are independent: a stale source, an occupied target or a refused
/// rename skips that pair only, and nothing already renamed is rolled back.
/// An existing file is never overwritten. The whole call fails only when the
/// directory itself is gone.
pub fn apply_mapping(dir: &DirectoryHandle, mapping: &RenameMapping) -> Result<ApplyReport> {
    dir.validate()?;

    let mut report = ApplyReport::default();
    for pair in mapping {
        if pair.is_noop() {
            report.skip(pair, SkipReason::Unchanged);
            continue;
        }
        if !is_plain_filename(&pair.old) || !is_plain_filename(&pair.new) {
            report.skip(pair, SkipReason::InvalidName);
            continue;
        }

        let from = dir.join(&pair.old);
        let to = dir.join(&pair.new);

        match fs::symlink_metadata(&from) {
            Ok(meta) if meta.is_dir() => {
                report.skip(pair, SkipReason::NotAFile);
                continue;
            },
            Ok(_) => {},
            Err(_) => {
                report.skip(pair, SkipReason::SourceMissing);
                continue;
            },
        }

        let case_only = is_case_only_change(&pair.old, &pair.new);
        let destination_taken = fs::symlink_metadata(&to).is_ok();
        let outcome = if !destination_taken {
            fs::rename(&from, &to)
        } else if case_only && is_same_file(&from, &to) {
            rename_through_temp(&from, &to)
        } else {
            report.skip(pair, SkipReason::DestinationExists);
            continue;
        };

        match outcome {
            Ok(()) => {
                tracing::info!(old = %pair.old, new = %pair.new, "renamed");
                report.applied.push(pair.clone());
            },
            Err(e) => {
                dir.validate()?;
                report.skip(pair, SkipReason::RenameFailed(e.to_string()));
            },
        }
    }

    Ok(report)
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
        && !name.contains('\0')
}

fn is_case_only_change(old: &str, new: &str) -> bool {
    old != new && old.to_lowercase() == new.to_lowercase()
}

/// Whether two paths name the same directory entry, as they do for
/// case variants on a case-insensitive filesystem.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// Two-step rename for case-only changes on case-insensitive filesystems.
fn rename_through_temp(from: &Path, to: &Path) -> std::io::Result<()> {
    let file_name = from
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = from.with_file_name(format!(
        ".{}.{}.filerenamer.tmp",
        file_name,
        std::process::id()
    ));
    if fs::symlink_metadata(&temp).is_ok() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("temporary name {} is taken", temp.display()),
        ));
    }
    tracing::debug!(temp = %temp.display(), "case-only rename through temporary name");
    fs::rename(from, &temp)?;
    if let Err(e) = fs::rename(&temp, to) {
        return Err(move_back_from_temp(&temp, from, e));
    }
    Ok(())
}

/// Put a file parked under `temp` back at `from` after the second step of a
/// case-only rename failed. If that fails too, the error names the temporary
/// path so the file can still be found.
fn move_back_from_temp(temp: &Path, from: &Path, err: std::io::Error) -> std::io::Error {
    match fs::rename(temp, from) {
        Ok(()) => err,
        Err(rollback) => {
            tracing::warn!(
                temp = %temp.display(),
                error = %rollback,
                "could not move file back from temporary name"
            );
            std::io::Error::new(
                err.kind(),
                format!("{}; file left at {}", err, temp.display()),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, DirectoryHandle) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        let handle = DirectoryHandle::open(temp_dir.path()).unwrap();
        (temp_dir, handle)
    }

    fn mapping(pairs: &[(&str, &str)]) -> RenameMapping {
        RenameMapping::from_pairs(pairs.iter().map(|(o, n)| RenamePair::new(*o, *n))).unwrap()
    }

    #[test]
    fn test_apply_renames_files() {
        let (temp, dir) = setup(&[("a.txt", "A"), ("b.txt", "B")]);
        let report = apply_mapping(&dir, &mapping(&[("a.txt", "x.txt"), ("b.txt", "y.txt")]))
            .unwrap();

        assert_eq!(report.applied_count(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(fs::read_to_string(temp.path().join("x.txt")).unwrap(), "A");
        assert_eq!(fs::read_to_string(temp.path().join("y.txt")).unwrap(), "B");
        assert!(!temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_apply_never_overwrites_existing_file() {
        let (temp, dir) = setup(&[("a.txt", "source"), ("b.txt", "keep me")]);
        let report = apply_mapping(&dir, &mapping(&[("a.txt", "b.txt")])).unwrap();

        assert_eq!(report.applied_count(), 0);
        assert_eq!(report.skipped[0].reason, SkipReason::DestinationExists);
        assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "source");
    }

    #[test]
    fn test_apply_skips_stale_source_and_continues() {
        let (temp, dir) = setup(&[("b.txt", "")]);
        let report =
            apply_mapping(&dir, &mapping(&[("gone.txt", "x.txt"), ("b.txt", "c.txt")])).unwrap();

        assert_eq!(report.skipped[0].reason, SkipReason::SourceMissing);
        assert_eq!(report.applied, vec![RenamePair::new("b.txt", "c.txt")]);
        assert!(temp.path().join("c.txt").exists());
    }

    #[test]
    fn test_apply_tolerates_noop_pair() {
        let (temp, dir) = setup(&[("a.txt", "")]);
        let report = apply_mapping(&dir, &mapping(&[("a.txt", "a.txt")])).unwrap();

        assert_eq!(report.skipped[0].reason, SkipReason::Unchanged);
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_apply_rejects_names_leaving_directory() {
        let (temp, dir) = setup(&[("a.txt", "")]);
        fs::create_dir(temp.path().join("sub")).unwrap();
        let report = apply_mapping(
            &dir,
            &mapping(&[("a.txt", "sub/a.txt"), ("sub", "renamed")]),
        )
        .unwrap();

        assert_eq!(report.skipped[0].reason, SkipReason::InvalidName);
        assert_eq!(report.skipped[1].reason, SkipReason::NotAFile);
        assert!(temp.path().join("a.txt").exists());
        assert!(temp.path().join("sub").is_dir());
    }

    #[test]
    fn test_apply_fails_when_directory_vanished() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        let dir = DirectoryHandle::open(&target).unwrap();
        fs::remove_dir(&target).unwrap();

        let result = apply_mapping(&dir, &mapping(&[("a", "b")]));
        assert!(matches!(result, Err(RenameError::InvalidDirectory { .. })));
    }

    #[test]
    fn test_case_only_rename() {
        let (temp, dir) = setup(&[("photo.jpg", "img")]);
        let report = apply_mapping(&dir, &mapping(&[("photo.jpg", "Photo.jpg")])).unwrap();

        assert_eq!(report.applied_count(), 1);
        let names = crate::snapshot::list_filenames(temp.path()).unwrap();
        assert_eq!(names, vec!["Photo.jpg"]);
    }

    #[test]
    fn test_case_variant_of_distinct_file_is_collision() {
        let (temp, dir) = setup(&[("a.txt", "lower")]);
        // Only meaningful on case-sensitive filesystems, where both can exist.
        if fs::write(temp.path().join("A.txt"), "upper").is_err()
            || crate::snapshot::list_filenames(temp.path()).unwrap().len() != 2
        {
            return;
        }

        let report = apply_mapping(&dir, &mapping(&[("a.txt", "A.txt")])).unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::DestinationExists);
        assert_eq!(fs::read_to_string(temp.path().join("A.txt")).unwrap(), "upper");
    }

    #[test]
    fn test_move_back_from_temp_restores_source() {
        let (temp_dir, _dir) = setup(&[(".a.txt.1.filerenamer.tmp", "data")]);
        let temp = temp_dir.path().join(".a.txt.1.filerenamer.tmp");
        let from = temp_dir.path().join("a.txt");

        let err = move_back_from_temp(&temp, &from, std::io::Error::other("second step"));

        assert_eq!(err.to_string(), "second step");
        assert_eq!(fs::read_to_string(&from).unwrap(), "data");
        assert!(!temp.exists());
    }

    #[test]
    fn test_move_back_from_temp_failure_names_temp_path() {
        let (temp_dir, _dir) = setup(&[]);
        let temp = temp_dir.path().join(".a.txt.1.filerenamer.tmp");
        let from = temp_dir.path().join("a.txt");

        let err = move_back_from_temp(&temp, &from, std::io::Error::other("second step"));

        let message = err.to_string();
        assert!(message.starts_with("second step"));
        assert!(message.contains(".a.txt.1.filerenamer.tmp"));
    }
}
