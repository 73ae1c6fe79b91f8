//! The durable key-value capability the session store depends on.

use std::sync::Arc;

/// Callback invoked when the durable store is changed by another tab.
///
/// The writer of a change never receives this notification; only other
/// subscribers over the same backing store do.
pub type ExternalChangeListener = Arc<dyn Fn() + Send + Sync>;

/// An origin-scoped durable key-value store shared across tabs.
///
/// Abstracts over browser `localStorage`-style storage so the session store
/// depends on an injectable capability instead of an implicit global,
/// allowing test doubles. None of the operations may fail: a backing store
/// that is unavailable simply behaves as permanently empty (see
/// [`UnsupportedStorage`](super::memory::UnsupportedStorage)).
pub trait DurableStore: Clone + Send + Sync + 'static {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`. The writing handle does not receive an
    /// external-change notification for its own write.
    fn set(&self, key: &str, value: &str);

    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str);

    /// Register a listener for changes performed through *other* handles of
    /// the same backing store.
    fn subscribe_external_change(&self, listener: ExternalChangeListener);
}
