use crate::error::{RenameError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory path that was checked to exist and be a directory.
///
/// The filesystem is external mutable state, so the check is repeated via
/// [`DirectoryHandle::validate`] before every directory-dependent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    path: PathBuf,
}

impl DirectoryHandle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let handle = Self {
            path: path.as_ref().to_path_buf(),
        };
        handle.validate()?;
        Ok(handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn validate(&self) -> Result<()> {
        validate_directory(&self.path)
    }

    /// Re-validate and take a fresh sorted snapshot of the directory.
    pub fn snapshot(&self) -> Result<Vec<String>> {
        self.validate()?;
        list_filenames(&self.path)
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

fn validate_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(RenameError::invalid_directory(path, "no directory specified"));
    }
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(RenameError::invalid_directory(path, "not a directory")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RenameError::invalid_directory(path, "does not exist"))
        },
        Err(e) => Err(RenameError::invalid_directory(path, e.to_string())),
    }
}

/// List the files directly inside `dir`, sorted lexicographically.
///
/// Subdirectories are not part of the snapshot. Names that are not valid
/// UTF-8 cannot be expressed in a mapping and are left out.
pub fn list_filenames(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| RenameError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| RenameError::io(format!("Failed to read directory {}", dir.display()), e))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                tracing::warn!(name = ?raw, "skipping non UTF-8 filename");
            },
        }
    }

    names.sort();
    tracing::debug!(dir = %dir.display(), count = names.len(), "listed directory");
    Ok(names)
}

/// Split a filename into `(root, extension)`.
///
/// The extension starts at the last `.`, but leading dots never start one:
/// `.bashrc` has no extension, `a.tar.gz` splits into `a.tar` and `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => name.split_at(leading + idx),
        None => (name, ""),
    }
}
