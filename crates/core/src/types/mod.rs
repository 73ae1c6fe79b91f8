//! Core types for the Nokori store-management client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod draft;
pub mod id;
pub mod product;

pub use draft::{ImageChange, ImageUpload, ProductDraft, ValidationError};
pub use id::*;
pub use product::{Product, ProductStatus};
