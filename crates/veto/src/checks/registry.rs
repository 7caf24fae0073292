//! Process-wide registry of check kinds.
//!
//! Maps a kind name (`"presence"`, `"max_length"`, ...) to the factory that
//! turns an [`Options`] map into a configured [`Check`]. The built-in kinds
//! are present from first use; custom kinds are added with [`register`].

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use super::{Check, GreaterThanOrEqualTo, MaxLength, Presence};
use crate::Key;
use crate::error::ConfigError;
use crate::options::Options;

/// Builds a configured check from its options.
pub type CheckFactory =
    Arc<dyn Fn(&Options) -> Result<Arc<dyn Check>, ConfigError> + Send + Sync>;

static CHECKS: LazyLock<RwLock<HashMap<Key, CheckFactory>>> =
    LazyLock::new(|| RwLock::new(builtins()));

fn builtins() -> HashMap<Key, CheckFactory> {
    let mut map: HashMap<Key, CheckFactory> = HashMap::new();
    map.insert(Key::Borrowed(super::presence::KIND), Arc::new(presence));
    map.insert(Key::Borrowed(super::length::KIND), Arc::new(max_length));
    map.insert(
        Key::Borrowed(super::numeric::KIND),
        Arc::new(greater_than_or_equal_to),
    );
    map
}

fn presence(options: &Options) -> Result<Arc<dyn Check>, ConfigError> {
    Ok(Arc::new(Presence::from_options(options)?))
}

fn max_length(options: &Options) -> Result<Arc<dyn Check>, ConfigError> {
    Ok(Arc::new(MaxLength::from_options(options)?))
}

fn greater_than_or_equal_to(options: &Options) -> Result<Arc<dyn Check>, ConfigError> {
    Ok(Arc::new(GreaterThanOrEqualTo::from_options(options)?))
}

/// Registers a check kind, replacing (and returning) any previous factory.
///
/// Registration is expected at startup, before validators that use the kind
/// build their rules.
pub fn register<F>(kind: impl Into<Key>, factory: F) -> Option<CheckFactory>
where
    F: Fn(&Options) -> Result<Arc<dyn Check>, ConfigError> + Send + Sync + 'static,
{
    let kind = kind.into();
    tracing::debug!(kind = %kind, "registered check kind");
    CHECKS.write().insert(kind, Arc::new(factory))
}

/// Returns true if `kind` has a factory.
#[must_use]
pub fn is_registered(kind: &str) -> bool {
    CHECKS.read().contains_key(kind)
}

/// Registered kind names, sorted.
#[must_use]
pub fn kinds() -> Vec<Key> {
    let mut kinds: Vec<Key> = CHECKS.read().keys().cloned().collect();
    kinds.sort();
    kinds
}

/// Builds a configured check of `kind` from `options`.
pub fn build(kind: &str, options: &Options) -> Result<Arc<dyn Check>, ConfigError> {
    // Clone the factory out so it runs without holding the lock.
    let factory = CHECKS
        .read()
        .get(kind)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownCheck(Key::Owned(kind.to_owned())))?;
    factory(options)
}
