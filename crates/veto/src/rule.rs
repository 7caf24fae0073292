//! A check bound to one attribute.

use std::sync::Arc;

use crate::Key;
use crate::checker::Validation;
use crate::checks::Check;
use crate::context::CheckContext;

/// A configured [`Check`] applied to one attribute.
///
/// Immutable once built; checkers share rules through `Arc`s, so inheriting
/// a rule list never copies the rules themselves.
#[derive(Debug, Clone)]
pub struct Rule {
    attribute: Key,
    check: Arc<dyn Check>,
}

impl Rule {
    /// Binds `check` to `attribute`.
    pub fn new(attribute: impl Into<Key>, check: impl Check + 'static) -> Self {
        Self::shared(attribute, Arc::new(check))
    }

    /// Binds an already shared check to `attribute`.
    pub fn shared(attribute: impl Into<Key>, check: Arc<dyn Check>) -> Self {
        Self {
            attribute: attribute.into(),
            check,
        }
    }

    /// The attribute this rule reads.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The configured check.
    pub fn check(&self) -> &dyn Check {
        self.check.as_ref()
    }
}

impl Validation for Rule {
    fn call(&self, ctx: &mut CheckContext<'_>) {
        let value = ctx.attribute(&self.attribute);
        if !tracing::enabled!(tracing::Level::TRACE) {
            self.check.check(&self.attribute, &value, ctx.errors_mut());
            return;
        }

        let before = ctx.errors().count();
        self.check.check(&self.attribute, &value, ctx.errors_mut());
        if ctx.errors().count() > before {
            tracing::trace!(
                attribute = %self.attribute,
                check = self.check.kind(),
                "rule failed"
            );
        }
    }
}
