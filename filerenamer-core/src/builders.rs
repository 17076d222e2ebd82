//! Mapping builders: compute proposed renames without touching the disk.
//!
//! Every builder re-reads the directory, walks it in lexicographic order and
//! returns an empty mapping when nothing matches.

use crate::error::{RenameError, Result};
use crate::mapping::RenameMapping;
use crate::snapshot::{split_extension, DirectoryHandle};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;

/// Where generated text is placed relative to the original name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Start,
    #[default]
    End,
}

impl FromStr for Location {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(RenameError::InvalidArgument(format!(
                "invalid location '{}': expected 'start' or 'end'",
                s
            ))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// A transformation kind together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    Replace {
        find: String,
        replace: String,
    },
    Prefix {
        prefix: String,
    },
    Suffix {
        suffix: String,
    },
    #[serde(rename = "enum")]
    Enumerate {
        start: i64,
        location: Location,
        separator: String,
    },
    RenameWithEnum {
        basename: String,
    },
    AddFromFile {
        pattern: String,
        location: Location,
    },
}

impl Transform {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace { .. } => "replace",
            Self::Prefix { .. } => "prefix",
            Self::Suffix { .. } => "suffix",
            Self::Enumerate { .. } => "enum",
            Self::RenameWithEnum { .. } => "rename_with_enum",
            Self::AddFromFile { .. } => "add_from_file",
        }
    }

    /// Short human description, used in previews and summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Replace { find, replace } => format!("replace '{}' with '{}'", find, replace),
            Self::Prefix { prefix } => format!("add prefix '{}'", prefix),
            Self::Suffix { suffix } => format!("add suffix '{}'", suffix),
            Self::Enumerate {
                start,
                location,
                separator,
            } => format!(
                "enumerate from {} at {} (separator '{}')",
                start, location, separator
            ),
            Self::RenameWithEnum { basename } => format!("rename to '{}N'", basename),
            Self::AddFromFile { pattern, location } => {
                format!("add /{}/ from .txt content at {}", pattern, location)
            },
        }
    }
}

/// Build the mapping for any transformation kind.
pub fn build_mapping(dir: &DirectoryHandle, transform: &Transform) -> Result<RenameMapping> {
    let mapping = match transform {
        Transform::Replace { find, replace } => build_replace_mapping(dir, find, replace)?,
        Transform::Prefix { prefix } => build_prefix_mapping(dir, prefix)?,
        Transform::Suffix { suffix } => build_suffix_mapping(dir, suffix)?,
        Transform::Enumerate {
            start,
            location,
            separator,
        } => build_enum_mapping(dir, *start, *location, separator)?,
        Transform::RenameWithEnum { basename } => build_rename_with_enum_mapping(dir, basename)?,
        Transform::AddFromFile { pattern, location } => {
            build_add_from_file_mapping(dir, pattern, *location)?
        },
    };
    tracing::debug!(
        kind = transform.kind(),
        pairs = mapping.len(),
        "built rename mapping"
    );
    Ok(mapping)
}

/// Replace every occurrence of `find` in names that contain it.
pub fn build_replace_mapping(
    dir: &DirectoryHandle,
    find: &str,
    replace: &str,
) -> Result<RenameMapping> {
    if find.is_empty() {
        return Err(RenameError::InvalidArgument(
            "search text for replace must not be empty".to_string(),
        ));
    }
    let names = dir.snapshot()?;
    Ok(replace_names(&names, find, replace))
}

fn replace_names(names: &[String], find: &str, replace: &str) -> RenameMapping {
    let mut mapping = RenameMapping::new();
    for name in names.iter().filter(|n| n.contains(find)) {
        let new_name = name.replace(find, replace);
        if new_name != *name {
            mapping.insert(name.as_str(), new_name);
        }
    }
    mapping
}

/// Prepend `prefix` to names that do not already start with it.
pub fn build_prefix_mapping(dir: &DirectoryHandle, prefix: &str) -> Result<RenameMapping> {
    let names = dir.snapshot()?;
    Ok(prefix_names(&names, prefix))
}

fn prefix_names(names: &[String], prefix: &str) -> RenameMapping {
    let mut mapping = RenameMapping::new();
    for name in names.iter().filter(|n| !n.starts_with(prefix)) {
        mapping.insert(name.as_str(), format!("{}{}", prefix, name));
    }
    mapping
}

/// Insert `suffix` before the extension of names whose root lacks it.
pub fn build_suffix_mapping(dir: &DirectoryHandle, suffix: &str) -> Result<RenameMapping> {
    let names = dir.snapshot()?;
    Ok(suffix_names(&names, suffix))
}

fn suffix_names(names: &[String], suffix: &str) -> RenameMapping {
    let mut mapping = RenameMapping::new();
    for name in names {
        let (root, ext) = split_extension(name);
        if root.ends_with(suffix) {
            continue;
        }
        mapping.insert(name.as_str(), format!("{}{}{}", root, suffix, ext));
    }
    mapping
}

/// Number every file in sorted order, starting at `start`.
///
/// With `Location::Start` the number is glued directly onto the root and the
/// separator is not used.
pub fn build_enum_mapping(
    dir: &DirectoryHandle,
    start: i64,
    location: Location,
    separator: &str,
) -> Result<RenameMapping> {
    let names = dir.snapshot()?;
    Ok(enumerate_names(&names, start, location, separator))
}

fn enumerate_names(
    names: &[String],
    start: i64,
    location: Location,
    separator: &str,
) -> RenameMapping {
    let mut mapping = RenameMapping::new();
    for (number, name) in (start..).zip(names) {
        let (root, ext) = split_extension(name);
        let new_name = match location {
            Location::Start => format!("{}{}{}", number, root, ext),
            Location::End => format!("{}{}{}{}", root, separator, number, ext),
        };
        mapping.insert(name.as_str(), new_name);
    }
    mapping
}

/// Rename every file to `basename` followed by its 1-based sorted position.
pub fn build_rename_with_enum_mapping(
    dir: &DirectoryHandle,
    basename: &str,
) -> Result<RenameMapping> {
    let names = dir.snapshot()?;
    Ok(rename_with_enum_names(&names, basename))
}

fn rename_with_enum_names(names: &[String], basename: &str) -> RenameMapping {
    let mut mapping = RenameMapping::new();
    for (number, name) in (1_usize..).zip(names) {
        let (_, ext) = split_extension(name);
        mapping.insert(name.as_str(), format!("{}{}{}", basename, number, ext));
    }
    mapping
}

/// Add the first capture group of `pattern`, searched in each `.txt` file's
/// content, to that file's name.
///
/// Unreadable or non UTF-8 files and files without a participating capture
/// group are skipped.
pub fn build_add_from_file_mapping(
    dir: &DirectoryHandle,
    pattern: &str,
    location: Location,
) -> Result<RenameMapping> {
    let regex = compile_capture_pattern(pattern)?;
    let names = dir.snapshot()?;

    let mut mapping = RenameMapping::new();
    for name in names.iter().filter(|n| has_txt_extension(n)) {
        let path = dir.join(name);
        let text = match fs::read(&path).map(String::from_utf8) {
            Ok(Ok(text)) => text,
            Ok(Err(_)) => {
                tracing::debug!(file = %name, "skipping .txt file that is not valid UTF-8");
                continue;
            },
            Err(e) => {
                tracing::debug!(file = %name, error = %e, "skipping unreadable .txt file");
                continue;
            },
        };

        let Some(captured) = regex
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };

        let new_name = match location {
            Location::Start => format!("{}{}", captured, name),
            Location::End => {
                let (root, ext) = split_extension(name);
                format!("{}{}{}", root, captured, ext)
            },
        };
        mapping.insert(name.as_str(), new_name);
    }
    Ok(mapping)
}

fn compile_capture_pattern(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)
        .map_err(|e| RenameError::InvalidArgument(format!("invalid pattern '{}': {}", pattern, e)))?;
    if regex.captures_len() < 2 {
        return Err(RenameError::InvalidArgument(format!(
            "pattern '{}' has no capture group",
            pattern
        )));
    }
    Ok(regex)
}

fn has_txt_extension(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(".txt"))
}
