//! Nokori Client - session tracking and inventory synchronization.
//!
//! The client core behind the Nokori store-management front end. Two
//! components carry the real state:
//!
//! - [`SessionStore`] - tracks the authenticated store identity within one
//!   tab and keeps it loosely consistent with every other tab through a
//!   shared [`DurableStore`].
//! - [`InventoryCache`] - a local mirror of the store's product collection,
//!   synchronized with the remote inventory service under create, update,
//!   and delete, with a derived paginated view.
//!
//! Everything else (routing, rendering, static content) lives outside this
//! crate; [`RouteGuard`](guard::decide) is the only concession, a pure
//! function from session state to a navigation decision.
//!
//! # Example
//!
//! ```rust,ignore
//! use nokori_client::config::ClientConfig;
//! use nokori_client::inventory::InventoryCache;
//! use nokori_client::session::{SessionStore, SharedStorage};
//!
//! let storage = SharedStorage::new();
//! let session = SessionStore::new(storage.tab());
//! session.watch_external_changes();
//! session.check_auth();
//!
//! let config = ClientConfig::from_env()?;
//! let mut inventory = InventoryCache::new(&config, session.clone());
//! let page = inventory.page();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod guard;
pub mod inventory;
pub mod session;

pub use guard::GuardDecision;
pub use inventory::{InventoryCache, PageView};
pub use session::{AuthStatus, DurableStore, SessionStore, SharedStorage};
