//! Process-wide registry of validator checkers.
//!
//! Each [`Validator`] type has exactly one published [`Checker`]. It is built
//! from [`Validator::define`] on first use and shared through an `Arc`, so
//! concurrent validations only ever take a read lock.
//!
//! Building happens outside the lock: `define` may itself look up other
//! checkers (that is how [`Checker::inherit`] works). When two threads race
//! to build the same type, the first one to publish wins and the other's
//! copy is dropped.

use std::any::{TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::checker::Checker;
use crate::error::ConfigError;
use crate::validator::Validator;

static CHECKERS: LazyLock<RwLock<HashMap<TypeId, Arc<Checker>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

thread_local! {
    /// Validator types whose `define` is running on this thread.
    static BUILDING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

// ============================================================================
// LOOKUP
// ============================================================================

/// Returns the published checker of `V`, building it on first use.
///
/// # Errors
///
/// Returns the [`ConfigError`] raised by `V::define`, or
/// [`ConfigError::CyclicInheritance`] if `V` (directly or indirectly)
/// inherits from itself. Nothing is published on error, so the next call
/// retries.
pub fn checker<V: Validator>() -> Result<Arc<Checker>, ConfigError> {
    let id = TypeId::of::<V>();
    if let Some(checker) = CHECKERS.read().get(&id) {
        return Ok(Arc::clone(checker));
    }

    let built = build::<V>()?;
    let mut checkers = CHECKERS.write();
    Ok(Arc::clone(checkers.entry(id).or_insert(built)))
}

/// Returns true if `V` has a published checker.
#[must_use]
pub fn is_built<V: Validator>() -> bool {
    CHECKERS.read().contains_key(&TypeId::of::<V>())
}

// ============================================================================
// REPLACEMENT
// ============================================================================

/// Publishes `checker` as the checker of `V`, replacing any previous one.
///
/// Runs already holding the old checker finish with it.
pub fn check_with<V: Validator>(checker: Checker) {
    debug!(
        validator = type_name::<V>(),
        rules = checker.len(),
        "checker replaced"
    );
    CHECKERS.write().insert(TypeId::of::<V>(), Arc::new(checker));
}

/// Adds rules to the published checker of `V`.
///
/// `f` edits a copy; the copy is published only if `f` succeeds. Rules are
/// shared between the old and new checker. Derived validators whose checker
/// was already built keep the rules they copied; derived validators built
/// after this call (on their first use) inherit the new rules too.
///
/// # Errors
///
/// Returns the error of building `V`'s checker or of `f`.
pub fn reopen<V, F>(f: F) -> Result<(), ConfigError>
where
    V: Validator,
    F: FnOnce(&mut Checker) -> Result<(), ConfigError>,
{
    let current = checker::<V>()?;
    let mut next = Checker::clone(&current);
    f(&mut next)?;

    debug!(
        validator = type_name::<V>(),
        rules = next.len(),
        "checker reopened"
    );
    CHECKERS.write().insert(TypeId::of::<V>(), Arc::new(next));
    Ok(())
}

// ============================================================================
// BUILDING
// ============================================================================

fn build<V: Validator>() -> Result<Arc<Checker>, ConfigError> {
    let _guard = BuildGuard::enter::<V>()?;

    let mut checker = Checker::new();
    V::define(&mut checker)?;

    debug!(
        validator = type_name::<V>(),
        rules = checker.len(),
        "checker built"
    );
    Ok(Arc::new(checker))
}

/// Marks `V` as being built on this thread until dropped.
struct BuildGuard;

impl BuildGuard {
    fn enter<V: 'static>() -> Result<Self, ConfigError> {
        let id = TypeId::of::<V>();
        BUILDING.with_borrow_mut(|building| {
            if building.contains(&id) {
                return Err(ConfigError::CyclicInheritance(type_name::<V>()));
            }
            building.push(id);
            Ok(Self)
        })
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with_borrow_mut(|building| {
            building.pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Presence;
    use crate::errors::Errors;

    macro_rules! validator_type {
        ($name:ident, |$checker:ident| $body:block) => {
            #[allow(dead_code)]
            struct $name {
                errors: Option<Errors>,
            }

            impl Validator for $name {
                fn define($checker: &mut Checker) -> Result<(), ConfigError> {
                    $body
                    Ok(())
                }

                fn error_slot(&mut self) -> &mut Option<Errors> {
                    &mut self.errors
                }
            }
        };
    }

    validator_type!(Memoized, |checker| {
        checker.validate("name", Presence::new());
    });

    validator_type!(Replaced, |checker| {
        checker.validate("name", Presence::new());
    });

    validator_type!(Reopened, |checker| {
        checker.validate("name", Presence::new());
    });

    validator_type!(ReopenChild, |checker| {
        checker.inherit::<Reopened>()?;
    });

    validator_type!(SelfCycle, |checker| {
        checker.inherit::<SelfCycle>()?;
    });

    validator_type!(CycleA, |checker| {
        checker.inherit::<CycleB>()?;
    });

    validator_type!(CycleB, |checker| {
        checker.inherit::<CycleA>()?;
    });

    #[test]
    fn test_checker_is_memoized() {
        let first = checker::<Memoized>().unwrap();
        let second = checker::<Memoized>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(is_built::<Memoized>());
    }

    #[test]
    fn test_check_with_replaces_published_checker() {
        let before = checker::<Replaced>().unwrap();

        let mut replacement = Checker::new();
        replacement.validate("a", Presence::new());
        replacement.validate("b", Presence::new());
        check_with::<Replaced>(replacement);

        assert_eq!(before.len(), 1);
        assert_eq!(checker::<Replaced>().unwrap().len(), 2);
    }

    #[test]
    fn test_reopen_is_copy_on_write() {
        let child_before = checker::<ReopenChild>().unwrap();
        let before = checker::<Reopened>().unwrap();

        reopen::<Reopened, _>(|checker| {
            checker.validate("email", Presence::new());
            Ok(())
        })
        .unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(checker::<Reopened>().unwrap().len(), 2);
        assert_eq!(child_before.len(), 1);
        assert_eq!(checker::<ReopenChild>().unwrap().len(), 1);
    }

    #[test]
    fn test_child_built_after_reopen_inherits_new_rules() {
        validator_type!(LateParent, |checker| {
            checker.validate("name", Presence::new());
        });
        validator_type!(LateChild, |checker| {
            checker.inherit::<LateParent>()?;
        });

        reopen::<LateParent, _>(|checker| {
            checker.validate("email", Presence::new());
            Ok(())
        })
        .unwrap();

        assert!(!is_built::<LateChild>());
        assert_eq!(checker::<LateChild>().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_reopen_publishes_nothing() {
        validator_type!(Unchanged, |checker| {
            checker.validate("name", Presence::new());
        });

        let result = reopen::<Unchanged, _>(|checker| {
            checker.validate("email", Presence::new());
            Err(ConfigError::UnknownCheck("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(checker::<Unchanged>().unwrap().len(), 1);
    }

    #[test]
    fn test_cyclic_inheritance_is_an_error() {
        assert!(matches!(
            checker::<SelfCycle>(),
            Err(ConfigError::CyclicInheritance(_))
        ));
        assert!(matches!(
            checker::<CycleA>(),
            Err(ConfigError::CyclicInheritance(_))
        ));
        assert!(!is_built::<SelfCycle>());
        assert!(!is_built::<CycleA>());
        assert!(!is_built::<CycleB>());
    }
}
