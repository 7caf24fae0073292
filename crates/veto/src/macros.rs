//! Declaration macros.
//!
//! - [`checks!`](crate::checks!) builds a [`Checks`](crate::Checks) list
//! - [`options!`](crate::options!) builds an [`Options`](crate::Options) map
//! - [`entity!`](crate::entity!) implements [`Entity`](crate::Entity) for a struct
//!
//! ```rust
//! use veto::{Checks, Options, checks, options};
//!
//! let short = checks! {
//!     presence: true,
//!     max_length: { with: 20, message: "too_long" },
//! };
//! let long = Checks::new()
//!     .add("presence", true)
//!     .add("max_length", Options::new().with(20).message("too_long"));
//! assert_eq!(short, long);
//!
//! assert_eq!(options! { on: "contact" }, Options::new().on("contact"));
//! ```

// ============================================================================
// CHECKS MACRO
// ============================================================================

/// Builds a [`Checks`](crate::Checks) list from `kind: options` pairs.
///
/// Each options slot is either `true` / `false`, a brace-delimited
/// [`options!`](crate::options!) body, or a parenthesized expression
/// convertible into [`Options`](crate::Options).
///
/// ```rust
/// use veto::{Options, checks};
///
/// let list = checks! {
///     presence: { on: "contact" },
///     greater_than_or_equal_to: (Options::new().with(18)),
///     max_length: false,
/// };
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! checks {
    () => {
        $crate::Checks::new()
    };
    ($($kind:ident : $options:tt),+ $(,)?) => {
        $crate::Checks::new()
            $(.add(stringify!($kind), $crate::options!(@value $options)))+
    };
}

// ============================================================================
// OPTIONS MACRO
// ============================================================================

/// Builds an [`Options`](crate::Options) map from `key: value` pairs.
///
/// Values go through `Into<Value>`, so literals, strings and numbers work
/// directly.
///
/// ```rust
/// use veto::{Options, Value, options};
///
/// let options = options! { with: 3, message: "too_long" };
/// assert_eq!(options.get("with"), Some(&Value::from(3)));
/// assert_eq!(options, Options::new().with(3).message("too_long"));
/// ```
#[macro_export]
macro_rules! options {
    (@value { $($body:tt)* }) => {
        $crate::options! { $($body)* }
    };
    (@value $options:expr) => {
        $crate::Options::from($options)
    };
    () => {
        $crate::Options::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {
        $crate::Options::new()
            $(.set(stringify!($key), $value))+
    };
}

// ============================================================================
// ENTITY MACRO
// ============================================================================

/// Implements [`Entity`](crate::Entity) for a struct by listing the fields
/// rules may read.
///
/// Fields are read through [`ToValue`](crate::ToValue); unlisted names read
/// as [`Value::Null`](crate::Value::Null). An optional `errors => field`
/// clause names an `Option<Errors>` field that receives a copy of the errors
/// after every validation run.
///
/// ```rust
/// use veto::{Entity, Errors, Value};
///
/// struct Article {
///     title: String,
///     tags: Vec<String>,
///     errors: Option<Errors>,
/// }
///
/// veto::entity!(Article { title, tags }; errors => errors);
///
/// let mut article = Article { title: "Hi".into(), tags: vec![], errors: None };
/// assert_eq!(article.attribute("title"), Value::from("Hi"));
/// assert_eq!(article.attribute("body"), Value::Null);
///
/// article.assign_errors(&Errors::new());
/// assert_eq!(article.errors, Some(Errors::new()));
/// ```
#[macro_export]
macro_rules! entity {
    ($name:ident { $($field:ident),* $(,)? } $(; errors => $sink:ident)?) => {
        impl $crate::Entity for $name {
            fn attribute(&self, name: &str) -> $crate::Value {
                match name {
                    $(stringify!($field) => $crate::ToValue::to_value(&self.$field),)*
                    _ => $crate::Value::Null,
                }
            }

            $(
                fn assign_errors(&mut self, errors: &$crate::Errors) {
                    self.$sink = ::core::option::Option::Some(::core::clone::Clone::clone(errors));
                }
            )?
        }
    };
}
