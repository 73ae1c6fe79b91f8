//! Nokori Core - Shared domain types.
//!
//! This crate provides the common types used by the Nokori store-management
//! client:
//! - `client` - Session tracking and inventory synchronization
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, product records, drafts, and image attachments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
