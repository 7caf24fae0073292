//! Numeric lower-bound check.
//!
//! The value is coerced with [`Value::to_number`]. A value that cannot be
//! read as a number is recorded exactly like one that is too small: same
//! message key, same boundary arg.

use super::{Check, Target};
use crate::error::ConfigError;
use crate::errors::Errors;
use crate::options::Options;
use crate::value::Value;

/// Kind name and default message key.
pub const KIND: &str = "greater_than_or_equal_to";

/// Validates that a value is a number `>=` a boundary.
///
/// # Examples
///
/// ```rust
/// use veto::checks::{Check, GreaterThanOrEqualTo};
/// use veto::{Errors, Value};
///
/// let check = GreaterThanOrEqualTo::new(10);
/// let mut errors = Errors::new();
///
/// check.check("age", &Value::from("10"), &mut errors);
/// assert!(errors.is_empty());
///
/// check.check("age", &Value::from("abc"), &mut errors);
/// assert_eq!(errors.get("age").unwrap()[0].args(), &[Value::from(10)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GreaterThanOrEqualTo {
    boundary: f64,
    /// The boundary as configured, reported back as the failure arg.
    arg: Value,
    target: Target,
}

impl GreaterThanOrEqualTo {
    /// Lower-bound check with the default message key.
    ///
    /// A boundary that is not a number makes every value fail.
    #[must_use]
    pub fn new(boundary: impl Into<Value>) -> Self {
        let arg = boundary.into();
        Self {
            boundary: arg.as_f64().unwrap_or(f64::INFINITY),
            arg,
            target: Target::new(KIND),
        }
    }

    /// Builds the check from options; `with` is required and must be a
    /// number.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let arg = options.fetch(KIND, Options::WITH)?.clone();
        let boundary = arg
            .as_f64()
            .filter(|b| !b.is_nan())
            .ok_or_else(|| ConfigError::invalid_option(KIND, Options::WITH, "a number"))?;
        Ok(Self {
            boundary,
            arg,
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

    /// The configured boundary.
    #[must_use]
    pub fn boundary(&self) -> f64 {
        self.boundary
    }
}

impl Check for GreaterThanOrEqualTo {
    fn kind(&self) -> &str {
        KIND
    }

    fn check(&self, attribute: &str, value: &Value, errors: &mut Errors) {
        let satisfied = value.to_number().is_some_and(|n| n >= self.boundary);
        if !satisfied {
            self.target.record(attribute, errors, [self.arg.clone()]);
        }
    }
}
