//! Per-call validation context.

use std::any::Any;
use std::fmt;

use crate::entity::Entity;
use crate::errors::Errors;
use crate::value::Value;

/// Everything a rule needs during one validation run: the entity being
/// validated, the validator instance running it, and the shared errors
/// accumulator.
///
/// Built fresh by every [`Validator::is_valid`](crate::Validator::is_valid)
/// call and dropped when the run ends.
pub struct CheckContext<'a> {
    entity: &'a dyn Entity,
    validator: &'a dyn Any,
    errors: &'a mut Errors,
}

impl<'a> CheckContext<'a> {
    /// Creates a context.
    pub fn new(entity: &'a dyn Entity, validator: &'a dyn Any, errors: &'a mut Errors) -> Self {
        Self {
            entity,
            validator,
            errors,
        }
    }

    /// The entity being validated.
    pub fn entity(&self) -> &dyn Entity {
        self.entity
    }

    /// Reads an attribute of the entity.
    pub fn attribute(&self, name: &str) -> Value {
        self.entity.attribute(name)
    }

    /// The validator instance running this validation.
    pub fn validator(&self) -> &dyn Any {
        self.validator
    }

    /// The validator instance, if it is a `V`.
    pub fn validator_as<V: Any>(&self) -> Option<&V> {
        self.validator.downcast_ref::<V>()
    }

    /// Failures recorded so far.
    pub fn errors(&self) -> &Errors {
        &*self.errors
    }

    /// The accumulator, for recording failures.
    pub fn errors_mut(&mut self) -> &mut Errors {
        &mut *self.errors
    }
}

impl fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckContext")
            .field("entity", &"<entity>")
            .field("validator", &"<validator>")
            .field("errors", &*self.errors)
            .finish()
    }
}
