//! Checks: the unit of validation logic.
//!
//! A [`Check`] inspects one attribute value and may record a failure into
//! the shared [`Errors`]. Checks are configured once, when a rule is
//! registered, and are immutable afterwards; one configured check may be
//! shared by many rules.
//!
//! # Built-in checks
//!
//! | kind                        | type                      | options                    |
//! |-----------------------------|---------------------------|----------------------------|
//! | `presence`                  | [`Presence`]              | `message`, `on`            |
//! | `max_length`                | [`MaxLength`]             | `with` (required), `message`, `on` |
//! | `greater_than_or_equal_to`  | [`GreaterThanOrEqualTo`]  | `with` (required), `message`, `on` |
//!
//! # Custom checks
//!
//! ```rust
//! use std::sync::Arc;
//! use veto::checks::{self, Check, Target};
//! use veto::{ConfigError, Errors, Options, Value};
//!
//! #[derive(Debug)]
//! struct Lowercase {
//!     target: Target,
//! }
//!
//! impl Check for Lowercase {
//!     fn kind(&self) -> &str {
//!         "lowercase"
//!     }
//!
//!     fn check(&self, attribute: &str, value: &Value, errors: &mut Errors) {
//!         let ok = value.as_str().is_some_and(|s| s.chars().all(|c| !c.is_uppercase()));
//!         if !ok {
//!             self.target.record(attribute, errors, []);
//!         }
//!     }
//! }
//!
//! checks::register("lowercase", |options: &Options| {
//!     let target = Target::from_options("lowercase", "lowercase", options)?;
//!     Ok(Arc::new(Lowercase { target }) as Arc<dyn Check>)
//! });
//! assert!(checks::is_registered("lowercase"));
//! ```

use std::fmt;

use crate::Key;
use crate::error::ConfigError;
use crate::errors::Errors;
use crate::options::Options;
use crate::value::Value;

pub mod length;
pub mod numeric;
pub mod presence;
mod registry;

pub use length::MaxLength;
pub use numeric::GreaterThanOrEqualTo;
pub use presence::Presence;
pub use registry::{CheckFactory, build, is_registered, kinds, register};

// ============================================================================
// CHECK TRAIT
// ============================================================================

/// A configured validation check.
///
/// Implementations must never fail on bad input data: bad data is recorded
/// into `errors`. Configuration problems belong in the constructor.
pub trait Check: Send + Sync + fmt::Debug {
    /// Kind name, used in logs.
    fn kind(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Inspects `value` (read from `attribute`) and records failures.
    fn check(&self, attribute: &str, value: &Value, errors: &mut Errors);
}

// ============================================================================
// TARGET
// ============================================================================

/// Where and how a check records its failure: the message key and the
/// error key (`on`, defaulting to the attribute inspected).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    message: Key,
    on: Option<Key>,
}

impl Target {
    /// Target with a default message key and no `on` override.
    pub fn new(message: impl Into<Key>) -> Self {
        Self {
            message: message.into(),
            on: None,
        }
    }

    /// Reads `message` and `on` from `options`, defaulting the message key.
    pub fn from_options(
        check: &str,
        default_message: impl Into<Key>,
        options: &Options,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            message: options
                .key(check, Options::MESSAGE)?
                .unwrap_or_else(|| default_message.into()),
            on: options.key(check, Options::ON)?,
        })
    }

    /// Overrides the message key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Key>) -> Self {
        self.message = message.into();
        self
    }

    /// Redirects failures to `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_on(mut self, key: impl Into<Key>) -> Self {
        self.on = Some(key.into());
        self
    }

    /// Message key recorded on failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error key a failure on `attribute` is recorded under.
    #[must_use]
    pub fn error_key(&self, attribute: &str) -> Key {
        match &self.on {
            Some(on) => on.clone(),
            None => Key::Owned(attribute.to_owned()),
        }
    }

    /// Records a failure on `attribute`.
    pub fn record(&self, attribute: &str, errors: &mut Errors, args: impl IntoIterator<Item = Value>) {
        errors.add(self.error_key(attribute), self.message.clone(), args);
    }
}
