//! The failure accumulator.
//!
//! [`Errors`] is an append-only, insertion-ordered multi-map from error key
//! to the failures recorded under it. A key is only ever present with at
//! least one entry, so emptiness of the map is the validity verdict.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::Key;
use crate::messages::{DefaultMessages, MessageCatalog};
use crate::value::Value;

// ============================================================================
// ERROR ENTRY
// ============================================================================

/// One recorded failure: a message key plus interpolation args.
///
/// Rendering `message` into text is up to the consumer (see
/// [`MessageCatalog`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Message key, e.g. `"presence"` or `"max_length"`.
    pub message: Key,

    /// Interpolation args; typically zero or one boundary value.
    pub args: SmallVec<[Value; 1]>,
}

impl ErrorEntry {
    /// Creates an entry.
    pub fn new(message: impl Into<Key>, args: impl IntoIterator<Item = Value>) -> Self {
        Self {
            message: message.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Returns the message key.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the interpolation args.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Accumulated validation failures, keyed by error key.
///
/// # Examples
///
/// ```rust
/// use veto::{Errors, Value};
///
/// let mut errors = Errors::new();
/// errors
///     .add("name", "presence", [])
///     .add("name", "max_length", [Value::from(5)]);
///
/// assert!(!errors.is_empty());
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Errors {
    entries: IndexMap<Key, Vec<ErrorEntry>>,
}

impl Errors {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Appends a failure under `key`.
    ///
    /// Repeated calls for the same key accumulate; nothing is overwritten.
    pub fn add(
        &mut self,
        key: impl Into<Key>,
        message: impl Into<Key>,
        args: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.push(key, ErrorEntry::new(message, args))
    }

    /// Appends a prepared entry under `key`.
    pub fn push(&mut self, key: impl Into<Key>, entry: ErrorEntry) -> &mut Self {
        self.entries.entry(key.into()).or_default().push(entry);
        self
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct error keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of recorded entries across all keys.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Entries recorded under `key`, in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[ErrorEntry]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns true if at least one failure is recorded under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Error keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(AsRef::as_ref)
    }

    /// Iterates over `(key, entries)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ErrorEntry])> {
        self.entries
            .iter()
            .map(|(key, entries)| (key.as_ref(), entries.as_slice()))
    }

    /// Appends every entry of `other`, keeping its order.
    pub fn merge(&mut self, other: Errors) -> &mut Self {
        for (key, entries) in other.entries {
            self.entries.entry(key).or_default().extend(entries);
        }
        self
    }

    /// Renders every entry through `catalog`, in insertion order.
    pub fn full_messages(&self, catalog: &(impl MessageCatalog + ?Sized)) -> Vec<String> {
        self.iter()
            .flat_map(|(key, entries)| entries.iter().map(move |entry| catalog.render(key, entry)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = (&'a Key, &'a Vec<ErrorEntry>);
    type IntoIter = indexmap::map::Iter<'a, Key, Vec<ErrorEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Keys with no entries are dropped, so `is_empty` stays the verdict.
impl<'de> Deserialize<'de> for Errors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = IndexMap::<Key, Vec<ErrorEntry>>::deserialize(deserializer)?;
        entries.retain(|_, list| !list.is_empty());
        Ok(Self { entries })
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages(&DefaultMessages).join(", "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
