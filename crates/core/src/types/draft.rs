//! Client-side product input for create and update submissions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductStatus;

/// A per-field validation failure for a [`ProductDraft`].
///
/// The `field` names match the multipart field names sent to the remote
/// service, so messages can be surfaced next to the matching form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The product name is empty.
    #[error("product_name: name cannot be empty")]
    EmptyName,
    /// The category is empty.
    #[error("category: category cannot be empty")]
    EmptyCategory,
    /// The price is negative.
    #[error("price: price cannot be negative")]
    NegativePrice,
}

/// The editable fields of a product, as entered by the store operator.
///
/// A draft carries no `id`, `image_url`, or timestamps: the server assigns
/// the ID, the image travels as a separate multipart attachment, and
/// timestamps are server-computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name. Must not be empty.
    pub name: String,
    /// Product category. Must not be empty.
    pub category: String,
    /// Sale price. Must not be negative.
    pub price: Decimal,
    /// Units available.
    pub quantity: u32,
    /// Stock status.
    pub status: ProductStatus,
}

impl ProductDraft {
    /// Validate the draft before submission.
    ///
    /// Collects every violated constraint rather than stopping at the first,
    /// so the caller can surface all field errors at once.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationError`] per violated field constraint.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            errors.push(ValidationError::EmptyCategory);
        }
        if self.price < Decimal::ZERO {
            errors.push(ValidationError::NegativePrice);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A binary image attachment for a product submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name, forwarded in the multipart part.
    pub file_name: String,
    /// MIME type of the image (e.g. `image/jpeg`).
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// What to do with a product's image on update.
///
/// An explicit tagged value instead of the "empty string means keep the
/// existing image" convention: a metadata-only update must use
/// [`ImageChange::Unchanged`], which omits the image part entirely and never
/// re-sends a stale URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageChange {
    /// Keep the image currently stored by the service.
    #[default]
    Unchanged,
    /// Replace the stored image with a new upload.
    Replace(ImageUpload),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "cabbage".to_string(),
            category: "vegetables".to_string(),
            price: Decimal::new(100, 0),
            quantity: 3,
            status: ProductStatus::InStock,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected_per_field() {
        let mut d = draft();
        d.name = "  ".to_string();
        let errors = d.validate().expect_err("should fail");
        assert_eq!(errors, vec![ValidationError::EmptyName]);
        assert_eq!(
            errors[0].to_string(),
            "product_name: name cannot be empty"
        );
    }

    #[test]
    fn all_violations_are_collected() {
        let d = ProductDraft {
            name: String::new(),
            category: String::new(),
            price: Decimal::new(-1, 0),
            quantity: 0,
            status: ProductStatus::OutOfStock,
        };
        let errors = d.validate().expect_err("should fail");
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyName,
                ValidationError::EmptyCategory,
                ValidationError::NegativePrice,
            ]
        );
    }

    #[test]
    fn zero_price_is_allowed() {
        let mut d = draft();
        d.price = Decimal::ZERO;
        assert!(d.validate().is_ok());
    }
}
