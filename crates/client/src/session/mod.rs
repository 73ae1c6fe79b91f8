//! Session tracking across browser tabs.
//!
//! The session store is, within one tab, the single source of truth for
//! "am I authenticated", kept loosely consistent with the durable key-value
//! store shared by every tab of the same origin.
//!
//! # Cross-tab consistency
//!
//! There is no message bus. The durable store's external-change notification
//! fires only in tabs *other* than the writer, so the protocol is
//! asymmetric by construction:
//!
//! 1. Same-tab writers update local state directly ([`SessionStore::login`]
//!    and [`SessionStore::logout`] do this).
//! 2. Other tabs call [`SessionStore::watch_external_changes`] once and
//!    re-derive their status whenever the notification fires.
//!
//! A writing tab that waits for the propagation path sees a stale status
//! forever, and an observer tab that never subscribes does too. This
//! asymmetry is inherent to the storage primitive, not an implementation
//! accident.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use nokori_core::StoreId;
use tracing::debug;

pub mod durable;
pub mod memory;

pub use durable::{DurableStore, ExternalChangeListener};
pub use memory::{SharedStorage, TabHandle, UnsupportedStorage};

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "store_token";
/// Durable key holding the authenticated store's ID.
pub const STORE_ID_KEY: &str = "store_id";

/// Authentication status of the current tab.
///
/// `Unknown` and `Checking` precede the first completed check; consumers
/// must treat them distinctly from `Unauthenticated` to avoid premature
/// redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStatus {
    /// No check has started yet.
    Unknown,
    /// The first check is in progress.
    Checking,
    /// The durable store held a token at the last check.
    Authenticated,
    /// The durable store held no token at the last check.
    Unauthenticated,
}

type LogoutCallback = Box<dyn Fn() + Send + Sync>;

struct SessionInner<D> {
    durable: D,
    status: Mutex<AuthStatus>,
    on_logout: Mutex<Option<LogoutCallback>>,
}

/// Per-tab session store over an injected [`DurableStore`].
///
/// Cheap to clone; clones share state. No operation panics or returns an
/// error: an unusable backing store simply degrades the session to
/// permanently [`AuthStatus::Unauthenticated`].
pub struct SessionStore<D: DurableStore> {
    inner: Arc<SessionInner<D>>,
}

impl<D: DurableStore> Clone for SessionStore<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: DurableStore> SessionStore<D> {
    /// Create a session store over `durable`. The status starts
    /// [`AuthStatus::Unknown`] until the first [`check_auth`](Self::check_auth).
    #[must_use]
    pub fn new(durable: D) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                durable,
                status: Mutex::new(AuthStatus::Unknown),
                on_logout: Mutex::new(None),
            }),
        }
    }

    /// Register the navigation side effect run after [`logout`](Self::logout).
    pub fn on_logout(&self, callback: impl Fn() + Send + Sync + 'static) {
        *lock(&self.inner.on_logout) = Some(Box::new(callback));
    }

    /// Subscribe to changes performed by other tabs.
    ///
    /// Re-runs the auth check whenever the durable store is mutated
    /// externally. Holds only a weak reference to the session internals, so
    /// the listener does not keep a dropped store alive.
    pub fn watch_external_changes(&self) {
        let weak: Weak<SessionInner<D>> = Arc::downgrade(&self.inner);
        self.inner
            .durable
            .subscribe_external_change(Arc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let status = refresh(&inner);
                    debug!(?status, "session refreshed after external change");
                }
            }));
    }

    /// Derive the status from the durable store.
    ///
    /// Synchronous, idempotent, and safe to call any number of times: with
    /// no intervening writes, repeated checks yield the same status.
    pub fn check_auth(&self) -> AuthStatus {
        refresh(&self.inner)
    }

    /// Store the credentials and mark this tab authenticated.
    ///
    /// The local transition happens directly because the writing tab never
    /// receives its own external-change notification.
    pub fn login(&self, token: &str, store_id: Option<&StoreId>) {
        self.inner.durable.set(TOKEN_KEY, token);
        if let Some(id) = store_id {
            self.inner.durable.set(STORE_ID_KEY, id.as_str());
        }
        *lock(&self.inner.status) = AuthStatus::Authenticated;
        debug!("session authenticated");
    }

    /// Clear the credentials, mark this tab unauthenticated, and run the
    /// navigation callback if one was registered.
    pub fn logout(&self) {
        self.inner.durable.remove(TOKEN_KEY);
        self.inner.durable.remove(STORE_ID_KEY);
        *lock(&self.inner.status) = AuthStatus::Unauthenticated;
        debug!("session cleared");
        if let Some(callback) = lock(&self.inner.on_logout).as_ref() {
            callback();
        }
    }

    /// Current status as of the last check or local transition.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        *lock(&self.inner.status)
    }

    /// Whether the last check found a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    /// Whether the first check has not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status(), AuthStatus::Unknown | AuthStatus::Checking)
    }

    /// The stored bearer token, if present.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.durable.get(TOKEN_KEY)
    }

    /// The stored store ID, if present. May lag behind the token: a login
    /// without an ID leaves this `None` until it is backfilled, which does
    /// not invalidate the authenticated status.
    #[must_use]
    pub fn store_id(&self) -> Option<StoreId> {
        self.inner.durable.get(STORE_ID_KEY).map(StoreId::new)
    }
}

fn refresh<D: DurableStore>(inner: &SessionInner<D>) -> AuthStatus {
    {
        let mut status = lock(&inner.status);
        if *status == AuthStatus::Unknown {
            *status = AuthStatus::Checking;
        }
    }
    let next = if inner.durable.get(TOKEN_KEY).is_some() {
        AuthStatus::Authenticated
    } else {
        AuthStatus::Unauthenticated
    };
    *lock(&inner.status) = next;
    next
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
