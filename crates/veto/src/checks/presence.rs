//! Presence check.
//!
//! Fails when the value is absent, when text is empty once ASCII whitespace
//! (space, tab, line feed, carriage return, vertical tab, form feed) is
//! removed, or when a list or map has no elements. Other Unicode spaces such
//! as NBSP count as content. Scalars (booleans and numbers) are always
//! present.

use super::{Check, Target};
use crate::error::ConfigError;
use crate::errors::Errors;
use crate::options::Options;
use crate::value::{Value, ValueKind};

/// Kind name and default message key.
pub const KIND: &str = "presence";

/// Validates that a value is present.
///
/// # Examples
///
/// ```rust
/// use veto::checks::{Check, Presence};
/// use veto::{Errors, Value};
///
/// let check = Presence::new();
/// let mut errors = Errors::new();
///
/// check.check("name", &Value::from("   "), &mut errors);
/// assert_eq!(errors.get("name").unwrap()[0].message(), "presence");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Presence {
    target: Target,
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

impl Presence {
    /// Presence check with the default message key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: Target::new(KIND),
        }
    }

    /// Builds the check from `message` / `on` options.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        Ok(Self {
            target: Target::from_options(KIND, KIND, options)?,
        })
    }

    /// Overrides the message key.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<crate::Key>) -> Self {
        self.target = self.target.with_message(message);
        self
    }

    /// Redirects failures to another error key.
    #[must_use = "builder methods must be chained or built"]
    pub fn on(mut self, key: impl Into<crate::Key>) -> Self {
        self.target = self.target.with_on(key);
        self
    }

    fn is_present(value: &Value) -> bool {
        match value.kind() {
            ValueKind::Absent => false,
            ValueKind::Textual => value
                .as_str()
                .is_some_and(|s| s.chars().any(|c| !is_blank(c))),
            ValueKind::Container => value.length().is_some_and(|len| len > 0),
            ValueKind::Scalar => true,
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

impl Check for Presence {
    fn kind(&self) -> &str {
        KIND
    }

    fn check(&self, attribute: &str, value: &Value, errors: &mut Errors) {
        if !Self::is_present(value) {
            self.target.record(attribute, errors, []);
        }
    }
}
