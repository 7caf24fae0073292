//! # veto
//!
//! Declarative validation rules for entities. Rules are attached to
//! attributes once per validator type, then evaluated against an entity
//! instance; every failure is accumulated into an [`Errors`] collection
//! instead of stopping at the first one.
//!
//! ## Quick Start
//!
//! ```rust
//! use veto::prelude::*;
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! veto::entity!(Person { name, age });
//!
//! #[derive(Default)]
//! struct PersonValidator {
//!     errors: Option<Errors>,
//! }
//!
//! impl Validator for PersonValidator {
//!     fn define(checker: &mut Checker) -> Result<(), ConfigError> {
//!         checker.validates("name", checks! { presence: true, max_length: { with: 20 } })?;
//!         checker.validates("age", checks! { greater_than_or_equal_to: { with: 18 } })?;
//!         Ok(())
//!     }
//!
//!     fn error_slot(&mut self) -> &mut Option<Errors> {
//!         &mut self.errors
//!     }
//! }
//!
//! let mut validator = PersonValidator::default();
//! let mut person = Person::default();
//!
//! assert!(!validator.is_valid(&mut person).unwrap());
//! assert_eq!(validator.errors().len(), 2);
//! ```
//!
//! ## Built-in Checks
//!
//! - [`Presence`](checks::Presence) (`presence`)
//! - [`MaxLength`](checks::MaxLength) (`max_length`, requires `with`)
//! - [`GreaterThanOrEqualTo`](checks::GreaterThanOrEqualTo)
//!   (`greater_than_or_equal_to`, requires `with`)
//!
//! Custom checks implement [`Check`] and are either attached directly with
//! [`Checker::validate`] or registered under a kind name with
//! [`checks::register`].

// Check factories and `Errors` are shared through `Arc`s held by the
// process-wide registries.
#![allow(clippy::type_complexity)]

pub mod checker;
pub mod checks;
pub mod context;
pub mod entity;
pub mod error;
pub mod errors;
mod macros;
pub mod messages;
pub mod options;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod validator;
pub mod value;

use std::borrow::Cow;

/// Attribute names, error keys, message keys and check kinds.
///
/// `Cow<'static, str>` keeps the common case of literal names allocation-free.
pub type Key = Cow<'static, str>;

pub use checker::{Checker, Validation};
pub use checks::Check;
pub use context::CheckContext;
pub use entity::Entity;
pub use error::{ConfigError, VetoError};
pub use errors::{ErrorEntry, Errors};
pub use messages::{DefaultMessages, MessageCatalog};
pub use options::{Checks, Options};
pub use rule::Rule;
pub use validator::Validator;
pub use value::{ToValue, Value, ValueKind};
