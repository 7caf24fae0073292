//! The rule tree.
//!
//! A [`Checker`] is an ordered list of children: [`Rule`]s, nested
//! checkers, and ad-hoc closure rules. Calling it runs every child in
//! registration order against one [`CheckContext`]. There is no early exit:
//! every rule runs, so one pass collects every failure.
//!
//! # Registration
//!
//! ```rust
//! use veto::{Checker, Checks, checks, options};
//!
//! # fn main() -> Result<(), veto::ConfigError> {
//! let mut checker = Checker::new();
//! checker.validates("name", checks! { presence: true, max_length: { with: 20 } })?;
//! checker.with_options(options! { on: "contact" }, |scope| {
//!     scope.validates("email", Checks::new().presence())?;
//!     scope.validates("phone", Checks::new().max_length(15))?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(checker.len(), 4);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::Key;
use crate::checks::{self, Check};
use crate::context::CheckContext;
use crate::error::ConfigError;
use crate::options::{Checks, Options};
use crate::registry;
use crate::rule::Rule;
use crate::validator::Validator;

// ============================================================================
// VALIDATION TRAIT
// ============================================================================

/// Something a [`Checker`] can run: a rule, a nested checker, or a custom
/// validation over the whole context.
pub trait Validation: Send + Sync + fmt::Debug {
    /// Runs against `ctx`, recording failures into `ctx.errors_mut()`.
    fn call(&self, ctx: &mut CheckContext<'_>);
}

/// A closure run against the whole [`CheckContext`].
pub struct FnValidation<F> {
    name: Option<Key>,
    f: F,
}

impl<F> FnValidation<F>
where
    F: Fn(&mut CheckContext<'_>) + Send + Sync,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { name: None, f }
    }

    /// Wraps `f` under a name shown in `Debug` output.
    pub fn named(name: impl Into<Key>, f: F) -> Self {
        Self {
            name: Some(name.into()),
            f,
        }
    }
}

impl<F> Validation for FnValidation<F>
where
    F: Fn(&mut CheckContext<'_>) + Send + Sync,
{
    fn call(&self, ctx: &mut CheckContext<'_>) {
        (self.f)(ctx);
    }
}

impl<F> fmt::Debug for FnValidation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidation")
            .field("name", &self.name)
            .field("f", &"<function>")
            .finish()
    }
}

// ============================================================================
// CHECKER
// ============================================================================

/// An ordered, composable collection of validations.
///
/// Cloning a checker copies its child list shallowly: both copies share the
/// same immutable rules, but appending to one never shows up in the other.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    children: Vec<Arc<dyn Validation>>,
    overlays: Vec<Options>,
}

impl Checker {
    /// Creates an empty checker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checker around an existing child list.
    #[must_use]
    pub fn from_children(children: Vec<Arc<dyn Validation>>) -> Self {
        Self {
            children,
            overlays: Vec::new(),
        }
    }

    /// The children, in registration order.
    pub fn children(&self) -> &[Arc<dyn Validation>] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Registers checks for `attribute`.
    ///
    /// Each `(kind, options)` entry becomes one rule, in order. Disabled
    /// options (`false`) are skipped. Options from enclosing
    /// [`with_options`](Self::with_options) scopes are merged underneath the
    /// explicit ones. Nothing is appended if any entry fails to configure.
    pub fn validates(
        &mut self,
        attribute: impl Into<Key>,
        checks: impl Into<Checks>,
    ) -> Result<&mut Self, ConfigError> {
        let attribute = attribute.into();
        let shared = self.shared_options();

        let mut rules: Vec<Arc<dyn Validation>> = Vec::new();
        for (kind, options) in checks.into() {
            if !options.is_enabled() {
                continue;
            }
            let options = options.merge_under(&shared);
            let check = checks::build(&kind, &options)?;
            rules.push(Arc::new(Rule::shared(attribute.clone(), check)));
        }

        self.children.extend(rules);
        Ok(self)
    }

    /// Runs `f` with `shared` merged underneath every `validates` call made
    /// inside it.
    ///
    /// Scopes nest: inner shared options win over outer ones, and explicit
    /// options win over all of them. The overlay is removed when `f`
    /// returns, including when it returns an error.
    pub fn with_options<F>(
        &mut self,
        shared: impl Into<Options>,
        f: F,
    ) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce(&mut Self) -> Result<(), ConfigError>,
    {
        self.overlays.push(shared.into());
        let result = f(self);
        self.overlays.pop();
        result.map(|()| self)
    }

    /// Appends a rule with an already configured check.
    pub fn validate(&mut self, attribute: impl Into<Key>, check: impl Check + 'static) -> &mut Self {
        self.push(Rule::new(attribute, check))
    }

    /// Appends a custom validation run against the whole context.
    pub fn validate_with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut CheckContext<'_>) + Send + Sync + 'static,
    {
        self.push(FnValidation::new(f))
    }

    /// Appends a nested checker, run as a single child.
    pub fn nest(&mut self, checker: Checker) -> &mut Self {
        self.push(checker)
    }

    /// Appends any validation.
    pub fn push(&mut self, validation: impl Validation + 'static) -> &mut Self {
        self.children.push(Arc::new(validation));
        self
    }

    /// Copies the rules of validator `V` into this checker.
    ///
    /// The copy is taken from `V`'s published checker at call time, which
    /// for a `define` body is when the deriving validator's checker is first
    /// built, not when its type is declared. A [`registry::reopen`] of `V`
    /// before that point is therefore inherited; rules added to either side
    /// afterwards stay private to that side.
    pub fn inherit<V: Validator>(&mut self) -> Result<&mut Self, ConfigError> {
        let parent = registry::checker::<V>()?;
        self.children.extend(parent.children().iter().cloned());
        Ok(self)
    }

    /// Runs every child, in order, against `ctx`.
    pub fn call(&self, ctx: &mut CheckContext<'_>) {
        for child in &self.children {
            child.call(ctx);
        }
    }

    fn shared_options(&self) -> Options {
        self.overlays
            .iter()
            .fold(Options::new(), |base, overlay| overlay.merge_under(&base))
    }
}

impl Validation for Checker {
    fn call(&self, ctx: &mut CheckContext<'_>) {
        Checker::call(self, ctx);
    }
}

// ============================================================================
// TESTS
// ============================================================================
