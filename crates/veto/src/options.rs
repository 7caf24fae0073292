//! Rule options and per-attribute check lists.
//!
//! [`Options`] is the option map handed to a check factory: the shared
//! `message` / `on` keys, the check-specific `with`, and any extra keys a
//! custom check understands. Factories resolve it into a typed configuration
//! once, at registration time.
//!
//! [`Checks`] is the ordered `kind => options` list passed to
//! [`Checker::validates`](crate::Checker::validates).

use indexmap::IndexMap;

use crate::Key;
use crate::error::ConfigError;
use crate::value::Value;

// ============================================================================
// OPTIONS
// ============================================================================

/// Options for one check on one attribute.
///
/// `Options::from(true)` enables a check with no options,
/// `Options::from(false)` disables it (no rule is registered).
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    enabled: bool,
    values: IndexMap<Key, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// Message-key override.
    pub const MESSAGE: &'static str = "message";
    /// Target error key override.
    pub const ON: &'static str = "on";
    /// Boundary / length / threshold value.
    pub const WITH: &'static str = "with";

    /// Enabled, with no options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            values: IndexMap::new(),
        }
    }

    /// Disabled; `validates` skips it.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            values: IndexMap::new(),
        }
    }

    /// Returns false for `Options::disabled()` / `Options::from(false)`.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets an option (builder style).
    #[must_use = "builder methods must be chained or built"]
    pub fn set(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an option in place.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Overrides the message key.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(self, message: impl Into<Key>) -> Self {
        self.set(Self::MESSAGE, Value::Text(message.into().into_owned()))
    }

    /// Redirects failures to another error key.
    #[must_use = "builder methods must be chained or built"]
    pub fn on(self, key: impl Into<Key>) -> Self {
        self.set(Self::ON, Value::Text(key.into().into_owned()))
    }

    /// Sets the `with` boundary.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(self, value: impl Into<Value>) -> Self {
        self.set(Self::WITH, value)
    }

    /// Looks up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true if the option is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Looks up a required option of `check`.
    pub fn fetch(&self, check: &str, key: &str) -> Result<&Value, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::key_not_found(check.to_owned(), key.to_owned()))
    }

    /// Looks up an optional textual option of `check`.
    pub fn key(&self, check: &str, key: &str) -> Result<Option<Key>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(Key::Owned(text.clone()))),
            Some(_) => Err(ConfigError::invalid_option(
                check.to_owned(),
                key.to_owned(),
                "text",
            )),
        }
    }

    /// Iterates over the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Number of options set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lays `self` over `base`: keys of `self` win, keys only in `base` are
    /// inherited. The enabled flag comes from `self`.
    #[must_use]
    pub fn merge_under(&self, base: &Options) -> Options {
        let mut values = base.values.clone();
        for (key, value) in &self.values {
            values.insert(key.clone(), value.clone());
        }
        Options {
            enabled: self.enabled,
            values,
        }
    }
}

impl From<bool> for Options {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::new()
        } else {
            Self::disabled()
        }
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Ordered list of `kind => options` for one attribute.
///
/// # Examples
///
/// ```rust
/// use veto::{Checks, Options};
///
/// let checks = Checks::new()
///     .presence()
///     .max_length(20)
///     .add("greater_than_or_equal_to", Options::new().with(18).message("too_young"));
///
/// assert_eq!(checks.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checks {
    entries: Vec<(Key, Options)>,
}

impl Checks {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check of `kind`.
    #[must_use = "builder methods must be chained or built"]
    pub fn add(mut self, kind: impl Into<Key>, options: impl Into<Options>) -> Self {
        self.entries.push((kind.into(), options.into()));
        self
    }

    /// Appends `presence`.
    #[must_use = "builder methods must be chained or built"]
    pub fn presence(self) -> Self {
        self.add(crate::checks::presence::KIND, true)
    }

    /// Appends `max_length` with `with: max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(self, max: usize) -> Self {
        self.add(crate::checks::length::KIND, Options::new().with(max))
    }

    /// Appends `greater_than_or_equal_to` with `with: boundary`.
    #[must_use = "builder methods must be chained or built"]
    pub fn greater_than_or_equal_to(self, boundary: impl Into<Value>) -> Self {
        self.add(
            crate::checks::numeric::KIND,
            Options::new().with(boundary),
        )
    }

    /// Iterates over `(kind, options)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.entries.iter().map(|(k, o)| (k.as_ref(), o))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Key>, O: Into<Options>> FromIterator<(K, O)> for Checks {
    fn from_iter<I: IntoIterator<Item = (K, O)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, o)| (k.into(), o.into()))
                .collect(),
        }
    }
}

impl<K: Into<Key>, O: Into<Options>, const N: usize> From<[(K, O); N]> for Checks {
    fn from(entries: [(K, O); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Checks {
    type Item = (Key, Options);
    type IntoIter = std::vec::IntoIter<(Key, Options)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_conversion() {
        assert!(Options::from(true).is_enabled());
        assert!(Options::from(true).is_empty());
        assert!(!Options::from(false).is_enabled());
    }

    #[test]
    fn test_merge_under_explicit_wins() {
        let shared = Options::new().on("alias").message("shared");
        let explicit = Options::new().message("explicit").with(3);

        let merged = explicit.merge_under(&shared);
        assert_eq!(merged.get("message"), Some(&Value::from("explicit")));
        assert_eq!(merged.get("on"), Some(&Value::from("alias")));
        assert_eq!(merged.get("with"), Some(&Value::from(3)));
    }

    #[test]
    fn test_merge_under_keeps_enabled_flag_of_explicit() {
        let merged = Options::disabled().merge_under(&Options::new().on("x"));
        assert!(!merged.is_enabled());
    }

    #[test]
    fn test_fetch_missing_key() {
        let error = Options::new().fetch("max_length", "with").unwrap_err();
        assert_eq!(error, ConfigError::key_not_found("max_length", "with"));
    }

    #[test]
    fn test_key_must_be_text() {
        let options = Options::new().set("on", 5);
        assert!(matches!(
            options.key("presence", "on"),
            Err(ConfigError::InvalidOption { .. })
        ));
        assert_eq!(
            Options::new().on("alias").key("presence", "on"),
            Ok(Some(Key::Borrowed("alias")))
        );
    }

    #[test]
    fn test_checks_from_array() {
        let checks = Checks::from([("presence", true), ("max_length", false)]);
        let kinds: Vec<_> = checks.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec!["presence", "max_length"]);
    }
}
