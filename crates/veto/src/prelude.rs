//! Prelude module for convenient imports.
//!
//! ```rust
//! use veto::prelude::*;
//! ```

pub use crate::checker::{Checker, Validation};
pub use crate::checks::{Check, GreaterThanOrEqualTo, MaxLength, Presence};
pub use crate::context::CheckContext;
pub use crate::entity::Entity;
pub use crate::error::{ConfigError, VetoError};
pub use crate::errors::{ErrorEntry, Errors};
pub use crate::messages::{DefaultMessages, MessageCatalog};
pub use crate::options::{Checks, Options};
pub use crate::rule::Rule;
pub use crate::validator::Validator;
pub use crate::value::{ToValue, Value};
pub use crate::{checks, entity, options};
