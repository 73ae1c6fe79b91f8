//! In-memory durable storage shared between simulated tabs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::durable::{DurableStore, ExternalChangeListener};

#[derive(Default)]
struct StorageShared {
    values: HashMap<String, String>,
    listeners: Vec<(u64, ExternalChangeListener)>,
    next_tab: u64,
}

/// An in-memory origin-scoped store backing any number of tab handles.
///
/// Reproduces the asymmetry of the browser storage event: a write through
/// one [`TabHandle`] notifies listeners registered through every *other*
/// handle, never the writer itself. Useful both as a test double and for
/// embedders without a real durable store.
#[derive(Clone, Default)]
pub struct SharedStorage {
    inner: Arc<Mutex<StorageShared>>,
}

impl SharedStorage {
    /// Create an empty shared store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tab handle over this store.
    #[must_use]
    pub fn tab(&self) -> TabHandle {
        let mut shared = lock(&self.inner);
        let id = shared.next_tab;
        shared.next_tab += 1;
        TabHandle {
            id,
            shared: Arc::clone(&self.inner),
        }
    }
}

/// One tab's view of a [`SharedStorage`].
#[derive(Clone)]
pub struct TabHandle {
    id: u64,
    shared: Arc<Mutex<StorageShared>>,
}

impl TabHandle {
    /// Deliver the external-change notification to every other tab.
    ///
    /// Listeners are collected under the lock but invoked after it is
    /// released, so they are free to read the store again.
    fn notify_others(&self) {
        let listeners: Vec<ExternalChangeListener> = {
            let shared = lock(&self.shared);
            shared
                .listeners
                .iter()
                .filter(|(tab, _)| *tab != self.id)
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener();
        }
    }
}

impl DurableStore for TabHandle {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.shared).values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        lock(&self.shared)
            .values
            .insert(key.to_string(), value.to_string());
        self.notify_others();
    }

    fn remove(&self, key: &str) {
        let removed = lock(&self.shared).values.remove(key).is_some();
        if removed {
            self.notify_others();
        }
    }

    fn subscribe_external_change(&self, listener: ExternalChangeListener) {
        lock(&self.shared).listeners.push((self.id, listener));
    }
}

/// A degenerate store for environments without durable storage support.
///
/// Reads always miss, writes are dropped, and no notifications are ever
/// delivered. A session store over this backend degrades to permanently
/// unauthenticated without erroring.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedStorage;

impl DurableStore for UnsupportedStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}

    fn subscribe_external_change(&self, _listener: ExternalChangeListener) {}
}

fn lock(shared: &Mutex<StorageShared>) -> std::sync::MutexGuard<'_, StorageShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn values_are_shared_across_tabs() {
        let storage = SharedStorage::new();
        let a = storage.tab();
        let b = storage.tab();

        a.set("k", "v");
        assert_eq!(b.get("k").as_deref(), Some("v"));

        b.remove("k");
        assert_eq!(a.get("k"), None);
    }

    #[test]
    fn writer_does_not_receive_its_own_notification() {
        let storage = SharedStorage::new();
        let a = storage.tab();
        let b = storage.tab();

        let a_hits = Arc::new(AtomicUsize::new(0));
        let b_hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&a_hits);
            a.subscribe_external_change(Arc::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }
        {
            let hits = Arc::clone(&b_hits);
            b.subscribe_external_change(Arc::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }

        a.set("k", "v");
        assert_eq!(a_hits.load(Ordering::SeqCst), 0);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn removing_an_absent_key_notifies_nobody() {
        let storage = SharedStorage::new();
        let a = storage.tab();
        let b = storage.tab();

        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            b.subscribe_external_change(Arc::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }

        a.remove("missing");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listeners_may_read_the_store() {
        let storage = SharedStorage::new();
        let a = storage.tab();
        let b = storage.tab();

        let seen = Arc::new(Mutex::new(None));
        {
            let seen = Arc::clone(&seen);
            let reader = b.clone();
            b.subscribe_external_change(Arc::new(move || {
                *seen.lock().expect("lock") = reader.get("k");
            }));
        }

        a.set("k", "v");
        assert_eq!(seen.lock().expect("lock").as_deref(), Some("v"));
    }

    #[test]
    fn unsupported_storage_is_inert() {
        let storage = UnsupportedStorage;
        storage.set("k", "v");
        assert_eq!(storage.get("k"), None);
    }
}
