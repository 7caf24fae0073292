//! Attribute access on validated objects.
//!
//! Validators never see concrete entity types; rules read attributes by name
//! through [`Entity`]. Structs usually get their impl from
//! [`entity!`](crate::entity!); string-keyed maps of [`Value`]s and JSON
//! objects work out of the box.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::errors::Errors;
use crate::value::Value;

/// An object whose attributes can be validated.
pub trait Entity {
    /// Reads attribute `name`. Unknown attributes read as [`Value::Null`].
    fn attribute(&self, name: &str) -> Value;

    /// Receives the errors of a finished validation run.
    ///
    /// Called once per [`Validator::is_valid`](crate::Validator::is_valid),
    /// including runs without failures. The default ignores them.
    fn assign_errors(&mut self, errors: &Errors) {
        let _ = errors;
    }
}

impl<S: BuildHasher> Entity for HashMap<String, Value, S> {
    fn attribute(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl<S: BuildHasher> Entity for IndexMap<String, Value, S> {
    fn attribute(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(feature = "json")]
impl Entity for serde_json::Map<String, serde_json::Value> {
    fn attribute(&self, name: &str) -> Value {
        self.get(name).cloned().map(Value::from).unwrap_or_default()
    }
}

/// Objects expose their fields; anything else has no attributes.
#[cfg(feature = "json")]
impl Entity for serde_json::Value {
    fn attribute(&self, name: &str) -> Value {
        match self {
            serde_json::Value::Object(map) => map.attribute(name),
            _ => Value::Null,
        }
    }
}
