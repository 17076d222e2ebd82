use crate::error::RenameError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single proposed rename inside one directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenamePair {
    pub old: String,
    pub new: String,
}

impl RenamePair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

/// An ordered batch of renames with unique source names.
///
/// Serializes as an ordered list of `{ "old": .., "new": .. }` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RenamePair>", into = "Vec<RenamePair>")]
pub struct RenameMapping {
    pairs: Vec<RenamePair>,
}

impl RenameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from pairs, rejecting duplicate source names.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, RenameError>
    where
        I: IntoIterator<Item = RenamePair>,
    {
        let mut mapping = Self::new();
        for pair in pairs {
            if mapping.contains(&pair.old) {
                return Err(RenameError::InvalidArgument(format!(
                    "duplicate source name in mapping: '{}'",
                    pair.old
                )));
            }
            mapping.pairs.push(pair);
        }
        Ok(mapping)
    }

    /// Insert a pair, keeping its position if `old` was already present.
    /// Returns the previous target for `old`, if any.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) -> Option<String> {
        let old = old.into();
        let new = new.into();
        if let Some(existing) = self.pairs.iter_mut().find(|p| p.old == old) {
            return Some(std::mem::replace(&mut existing.new, new));
        }
        self.pairs.push(RenamePair { old, new });
        None
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.old == old)
            .map(|p| p.new.as_str())
    }

    pub fn contains(&self, old: &str) -> bool {
        self.pairs.iter().any(|p| p.old == old)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenamePair> {
        self.pairs.iter()
    }

    pub fn pairs(&self) -> &[RenamePair] {
        &self.pairs
    }

    /// The mapping that reverts this one.
    ///
    /// Pairs are swapped and emitted in reverse order so that chained renames
    /// (`b -> c` followed by `a -> b`) unwind cleanly. When several sources
    /// share a target, only the earliest of them could have landed there, so
    /// that one is the pair that gets reverted.
    pub fn inverse(&self) -> Self {
        let mut seen = HashSet::new();
        let mut inverted: Vec<RenamePair> = self
            .pairs
            .iter()
            .filter(|p| seen.insert(p.new.as_str()))
            .map(|p| RenamePair::new(p.new.clone(), p.old.clone()))
            .collect();
        inverted.reverse();
        Self { pairs: inverted }
    }
}

impl TryFrom<Vec<RenamePair>> for RenameMapping {
    type Error = RenameError;

    fn try_from(pairs: Vec<RenamePair>) -> Result<Self, Self::Error> {
        Self::from_pairs(pairs)
    }
}

impl From<RenameMapping> for Vec<RenamePair> {
    fn from(mapping: RenameMapping) -> Self {
        mapping.pairs
    }
}

impl<'a> IntoIterator for &'a RenameMapping {
    type Item = &'a RenamePair;
    type IntoIter = std::slice::Iter<'a, RenamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
