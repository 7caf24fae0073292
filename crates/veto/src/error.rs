//! Error types for rule configuration and validation verdicts.
//!
//! Validation failures are data and live in [`Errors`]; they only become a
//! Rust error when [`Validator::validate`](crate::Validator::validate) turns an
//! invalid verdict into [`VetoError::InvalidEntity`]. Configuration mistakes
//! (a missing `with`, an unknown check kind) are programmer errors and surface
//! as [`ConfigError`] while rules are being registered.

use crate::Key;
use crate::errors::Errors;

/// A rule could not be configured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required option is absent.
    #[error("check `{check}` requires option `{key}`")]
    KeyNotFound {
        /// Check kind being configured.
        check: Key,
        /// Missing option key.
        key: Key,
    },

    /// An option is present but has the wrong shape.
    #[error("option `{key}` of check `{check}` must be {expected}")]
    InvalidOption {
        /// Check kind being configured.
        check: Key,
        /// Offending option key.
        key: Key,
        /// Human-readable description of the accepted shape.
        expected: &'static str,
    },

    /// No check is registered under this kind name.
    #[error("unknown check `{0}`")]
    UnknownCheck(Key),

    /// A validator's rule definition (transitively) inherits from itself.
    #[error("validator `{0}` inherits from itself")]
    CyclicInheritance(&'static str),
}

impl ConfigError {
    /// Creates a `KeyNotFound` error.
    pub fn key_not_found(check: impl Into<Key>, key: impl Into<Key>) -> Self {
        Self::KeyNotFound {
            check: check.into(),
            key: key.into(),
        }
    }

    /// Creates an `InvalidOption` error.
    pub fn invalid_option(
        check: impl Into<Key>,
        key: impl Into<Key>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidOption {
            check: check.into(),
            key: key.into(),
            expected,
        }
    }
}

/// Outcome of a failed [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VetoError {
    /// The entity broke at least one rule. Carries every recorded failure.
    #[error("invalid entity: {0}")]
    InvalidEntity(Errors),

    /// The validator's rules could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VetoError {
    /// Returns the recorded failures for `InvalidEntity`.
    #[must_use]
    pub fn errors(&self) -> Option<&Errors> {
        match self {
            VetoError::InvalidEntity(errors) => Some(errors),
            VetoError::Config(_) => None,
        }
    }

    /// Returns true if the entity was invalid (as opposed to misconfigured).
    #[must_use]
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self, VetoError::InvalidEntity(_))
    }
}
