//! Product domain types mirroring the remote inventory service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Stock status of a product.
///
/// The remote service encodes this as the literal strings `"in stock"` and
/// `"out of stock"`; modeling it as a closed enum keeps invalid values out
/// at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "in stock")]
    InStock,
    #[serde(rename = "out of stock")]
    OutOfStock,
}

impl ProductStatus {
    /// The wire string used by the remote service.
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::OutOfStock => "out of stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in stock" => Ok(Self::InStock),
            "out of stock" => Ok(Self::OutOfStock),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// A product record held by the inventory cache.
///
/// Instances always originate from the remote service; the client never
/// fabricates one. `id` is server-assigned and immutable, and `created_at` /
/// `updated_at` are server-computed, which is why local updates replace the
/// whole record with the server response instead of patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "product_name")]
    pub name: String,
    /// Product category.
    pub category: String,
    /// Sale price. Non-negative.
    pub price: Decimal,
    /// Units available. Non-negative.
    pub quantity: u32,
    /// URL of the product image. May be empty when no image was uploaded.
    pub image_url: String,
    /// Stock status.
    pub status: ProductStatus,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-side last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_remote_wire_strings() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::InStock).expect("serialize"),
            "\"in stock\""
        );
        assert_eq!(
            serde_json::to_string(&ProductStatus::OutOfStock).expect("serialize"),
            "\"out of stock\""
        );
    }

    #[test]
    fn status_parses_wire_strings() {
        assert_eq!("in stock".parse(), Ok(ProductStatus::InStock));
        assert_eq!("out of stock".parse(), Ok(ProductStatus::OutOfStock));
        assert!("sold out".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn product_deserializes_from_service_payload() {
        let payload = serde_json::json!({
            "id": "prod-1",
            "product_name": "cabbage",
            "category": "vegetables",
            "price": 100.0,
            "quantity": 3,
            "image_url": "",
            "status": "in stock",
            "created_at": "2025-06-01T09:00:00Z",
            "updated_at": "2025-06-02T09:00:00Z"
        });

        let product: Product = serde_json::from_value(payload).expect("deserialize");
        assert_eq!(product.id, ProductId::new("prod-1"));
        assert_eq!(product.name, "cabbage");
        assert_eq!(product.status, ProductStatus::InStock);
        assert_eq!(product.quantity, 3);
        assert!(product.image_url.is_empty());
    }
}
