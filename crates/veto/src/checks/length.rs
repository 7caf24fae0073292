//! Maximum length check.
//!
//! Text is measured in Unicode scalar values (chars), lists and maps in
//! elements. An absent value fails, and so does any value without a length
//! (booleans, numbers).

use super::{Check, Target};
use crate::error::ConfigError;
use crate::errors::Errors;
use crate::options::Options;
use crate::value::Value;

/// Kind name and default message key.
pub const KIND: &str = "max_length";

/// Validates that a value does not exceed a maximum length.
///
/// Failures carry the maximum as their only arg.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaxLength {
    max: usize,
    target: Target,
}

impl MaxLength {
    /// Maximum length check with the default message key.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            target: Target::new(KIND),
        }
    }

    /// Builds the check from options; `with` is required and must be a
    /// non-negative integer.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let max = options
            .fetch(KIND, Options::WITH)?
            .as_usize()
            .ok_or_else(|| {
                ConfigError::invalid_option(KIND, Options::WITH, "a non-negative integer")
            })?;
        Ok(Self {
            max,
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

    /// The configured maximum.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Check for MaxLength {
    fn kind(&self) -> &str {
        KIND
    }

    fn check(&self, attribute: &str, value: &Value, errors: &mut Errors) {
        let within = value.length().is_some_and(|len| len <= self.max);
        if !within {
            self.target
                .record(attribute, errors, [Value::from(self.max)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(check: &MaxLength, value: Value) -> Errors {
        let mut errors = Errors::new();
        check.check("title", &value, &mut errors);
        errors
    }

    #[rstest]
    #[case::exact(Value::from("hello"))]
    #[case::shorter(Value::from("hi"))]
    #[case::empty(Value::from(""))]
    #[case::multibyte(Value::from("héllo"))]
    #[case::list(Value::from(vec![1, 2, 3, 4, 5]))]
    fn test_within_limit_passes(#[case] value: Value) {
        assert!(run(&MaxLength::new(5), value).is_empty());
    }

    #[rstest]
    #[case::longer(Value::from("hello!"))]
    #[case::null(Value::Null)]
    #[case::list(Value::from(vec![1, 2, 3, 4, 5, 6]))]
    #[case::number(Value::from(3))]
    fn test_violations_fail_with_max_arg(#[case] value: Value) {
        let errors = run(&MaxLength::new(5), value);
        let entries = errors.get("title").unwrap();
        assert_eq!(entries[0].message(), "max_length");
        assert_eq!(entries[0].args(), &[Value::from(5)]);
    }

    #[test]
    fn test_from_options_requires_with() {
        assert_eq!(
            MaxLength::from_options(&Options::new()),
            Err(ConfigError::key_not_found("max_length", "with"))
        );
    }

    #[rstest]
    #[case::negative(Value::from(-1))]
    #[case::float(Value::from(2.5))]
    #[case::text(Value::from("10"))]
    fn test_from_options_rejects_bad_with(#[case] with: Value) {
        assert!(matches!(
            MaxLength::from_options(&Options::new().with(with)),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_from_options_reads_target() {
        let check = MaxLength::from_options(&Options::new().with(2).on("summary")).unwrap();
        assert_eq!(check.max(), 2);
        let errors = run(&check, Value::from("abc"));
        assert!(errors.contains_key("summary"));
        assert!(!errors.contains_key("title"));
    }
}
