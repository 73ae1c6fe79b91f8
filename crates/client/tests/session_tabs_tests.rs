//! Cross-tab session behavior over a shared durable store.

use nokori_client::guard::{self, GuardDecision};
use nokori_client::session::{AuthStatus, SessionStore, SharedStorage};
use nokori_core::StoreId;

#[test]
fn login_in_one_tab_propagates_to_watching_tabs() {
    let storage = SharedStorage::new();

    let tab_a = SessionStore::new(storage.tab());
    let tab_b = SessionStore::new(storage.tab());
    tab_b.watch_external_changes();

    assert_eq!(tab_b.check_auth(), AuthStatus::Unauthenticated);

    tab_a.login("tok-1", Some(&StoreId::new("store-9")));

    // The external-change notification re-ran tab B's check.
    assert_eq!(tab_b.status(), AuthStatus::Authenticated);
    assert_eq!(tab_b.store_id(), Some(StoreId::new("store-9")));
}

#[test]
fn logout_in_one_tab_propagates_to_watching_tabs() {
    let storage = SharedStorage::new();

    let tab_a = SessionStore::new(storage.tab());
    let tab_b = SessionStore::new(storage.tab());
    tab_b.watch_external_changes();

    tab_a.login("tok-1", None);
    assert_eq!(tab_b.status(), AuthStatus::Authenticated);

    tab_a.logout();
    assert_eq!(tab_b.status(), AuthStatus::Unauthenticated);
    assert_eq!(tab_b.token(), None);
}

#[test]
fn tab_that_never_subscribes_stays_stale() {
    // The documented hazard: observer tabs must subscribe, or they keep the
    // status from their last explicit check.
    let storage = SharedStorage::new();

    let tab_a = SessionStore::new(storage.tab());
    let tab_b = SessionStore::new(storage.tab());

    assert_eq!(tab_b.check_auth(), AuthStatus::Unauthenticated);
    tab_a.login("tok-1", None);

    assert_eq!(tab_b.status(), AuthStatus::Unauthenticated);
    // An explicit re-check still sees the shared truth.
    assert_eq!(tab_b.check_auth(), AuthStatus::Authenticated);
}

#[test]
fn guard_waits_until_the_first_check_settles() {
    let storage = SharedStorage::new();
    let session = SessionStore::new(storage.tab());

    assert_eq!(
        guard::decide(session.is_authenticated(), session.is_loading()),
        GuardDecision::Wait
    );

    session.check_auth();
    assert_eq!(
        guard::decide(session.is_authenticated(), session.is_loading()),
        GuardDecision::RedirectToLogin
    );

    session.login("tok-1", None);
    assert_eq!(
        guard::decide(session.is_authenticated(), session.is_loading()),
        GuardDecision::Allow
    );
}
