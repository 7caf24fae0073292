//! The validator capability.
//!
//! A validator type declares its rules once in [`Validator::define`]; the
//! [`registry`](crate::registry) builds and memoizes the resulting
//! [`Checker`] on first use. Instances only carry the errors of their most
//! recent run.

use std::any::{Any, type_name};

use tracing::debug;

use crate::checker::Checker;
use crate::context::CheckContext;
use crate::entity::Entity;
use crate::error::{ConfigError, VetoError};
use crate::errors::Errors;
use crate::registry;

/// A type that validates entities against a declared rule set.
///
/// # Inheritance
///
/// A derived validator copies its parent's rules first and then adds its
/// own. The parent never sees rules added by the child.
///
/// ```rust
/// use veto::prelude::*;
///
/// #[derive(Default)]
/// struct Base {
///     errors: Option<Errors>,
/// }
///
/// impl Validator for Base {
///     fn define(checker: &mut Checker) -> Result<(), ConfigError> {
///         checker.validates("name", checks! { presence: true })?;
///         Ok(())
///     }
///
///     fn error_slot(&mut self) -> &mut Option<Errors> {
///         &mut self.errors
///     }
/// }
///
/// #[derive(Default)]
/// struct Strict {
///     errors: Option<Errors>,
/// }
///
/// impl Validator for Strict {
///     fn define(checker: &mut Checker) -> Result<(), ConfigError> {
///         checker.inherit::<Base>()?;
///         checker.validates("email", checks! { presence: true })?;
///         Ok(())
///     }
///
///     fn error_slot(&mut self) -> &mut Option<Errors> {
///         &mut self.errors
///     }
/// }
///
/// let mut entity = serde_json::json!({});
/// let mut strict = Strict::default();
/// assert!(!strict.is_valid(&mut entity).unwrap());
/// assert_eq!(strict.errors().len(), 2);
///
/// let mut base = Base::default();
/// assert!(!base.is_valid(&mut entity).unwrap());
/// assert_eq!(base.errors().keys().collect::<Vec<_>>(), vec!["name"]);
/// ```
pub trait Validator: Any + Sized {
    /// Declares the rules of this validator type.
    ///
    /// Runs once per process, the first time the type's checker is needed.
    fn define(checker: &mut Checker) -> Result<(), ConfigError>;

    /// Storage for the errors of the most recent run.
    fn error_slot(&mut self) -> &mut Option<Errors>;

    /// Errors of the most recent run; empty before the first run.
    fn errors(&mut self) -> &Errors {
        self.error_slot().get_or_insert_with(Errors::new)
    }

    /// Forgets the errors of the most recent run.
    fn clear_errors(&mut self) {
        *self.error_slot() = None;
    }

    /// Runs every rule against `entity` and returns true if none failed.
    ///
    /// The collected errors are kept on `self` (see
    /// [`errors`](Self::errors)) and handed to
    /// [`Entity::assign_errors`]. Fails only when the rule set itself is
    /// misconfigured.
    fn is_valid<E: Entity>(&mut self, entity: &mut E) -> Result<bool, ConfigError> {
        self.clear_errors();
        let checker = registry::checker::<Self>()?;

        let mut errors = Errors::new();
        checker.call(&mut CheckContext::new(&*entity, &*self, &mut errors));
        entity.assign_errors(&errors);

        let valid = errors.is_empty();
        debug!(
            validator = type_name::<Self>(),
            valid,
            errors = errors.count(),
            "validation finished"
        );

        *self.error_slot() = Some(errors);
        Ok(valid)
    }

    /// Like [`is_valid`](Self::is_valid), but an invalid entity becomes
    /// [`VetoError::InvalidEntity`] carrying a copy of [`errors`](Self::errors).
    fn validate<E: Entity>(&mut self, entity: &mut E) -> Result<(), VetoError> {
        if self.is_valid(entity)? {
            Ok(())
        } else {
            Err(VetoError::InvalidEntity(self.errors().clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct NameValidator {
        errors: Option<Errors>,
    }

    impl Validator for NameValidator {
        fn define(checker: &mut Checker) -> Result<(), ConfigError> {
            checker.validates("name", crate::checks! { presence: true })?;
            Ok(())
        }

        fn error_slot(&mut self) -> &mut Option<Errors> {
            &mut self.errors
        }
    }

    #[derive(Default)]
    struct Broken {
        errors: Option<Errors>,
    }

    impl Validator for Broken {
        fn define(checker: &mut Checker) -> Result<(), ConfigError> {
            checker.validates("name", crate::checks! { max_length: true })?;
            Ok(())
        }

        fn error_slot(&mut self) -> &mut Option<Errors> {
            &mut self.errors
        }
    }

    fn named(name: &str) -> IndexMap<String, Value> {
        [("name".to_owned(), Value::from(name))].into_iter().collect()
    }

    #[test]
    fn test_errors_before_first_run_are_empty() {
        let mut validator = NameValidator::default();
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_is_valid_stores_errors() {
        let mut validator = NameValidator::default();

        assert!(!validator.is_valid(&mut named(" ")).unwrap());
        assert!(validator.errors().contains_key("name"));

        assert!(validator.is_valid(&mut named("ada")).unwrap());
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_clear_errors() {
        let mut validator = NameValidator::default();
        validator.is_valid(&mut named("")).unwrap();
        validator.clear_errors();
        assert!(validator.errors.is_none());
    }

    #[test]
    fn test_validate_carries_errors() {
        let mut validator = NameValidator::default();
        let error = validator.validate(&mut named("")).unwrap_err();
        assert_eq!(error.errors(), Some(validator.errors()));
        assert!(validator.validate(&mut named("x")).is_ok());
    }

    #[test]
    fn test_misconfigured_rules_surface_as_config_error() {
        let mut validator = Broken::default();
        let error = validator.is_valid(&mut named("x")).unwrap_err();
        assert_eq!(error, ConfigError::key_not_found("max_length", "with"));

        let error = validator.validate(&mut named("x")).unwrap_err();
        assert!(matches!(error, VetoError::Config(_)));
    }
}
