//! REST client for the remote inventory service.
//!
//! Products live under a versioned collection path; every request carries
//! the session's bearer token. Create and update submissions are multipart
//! forms so an image can travel alongside the text fields.

use nokori_core::{ImageChange, ImageUpload, Product, ProductDraft, ProductId};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Path of the product collection, relative to the API base URL.
const COLLECTION_PATH: &str = "api/v1/products";

/// Errors from talking to the remote inventory service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or malformed response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status returned by the service.
        status: reqwest::StatusCode,
        /// Message extracted from the response body's `error` field, or a
        /// generic fallback when the body carried none.
        message: String,
    },

    /// The collection URL could not be built from the configured base.
    #[error("invalid API URL: {0}")]
    Url(String),
}

impl ApiError {
    /// A message fit for direct display to the store operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(err) if err.is_decode() => {
                "The inventory service returned an unreadable response.".to_string()
            }
            Self::Http(_) | Self::Url(_) => {
                "The inventory service could not be reached.".to_string()
            }
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Response envelope wrapping every successful payload.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body shape used by the service on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the product collection endpoints.
#[derive(Clone)]
pub(crate) struct ProductApi {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductApi {
    pub(crate) fn new(mut base_url: Url) -> Self {
        // Url::join drops the last path segment of a base without a
        // trailing slash, which would silently discard a path prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.base_url
            .join(COLLECTION_PATH)
            .map_err(|e| ApiError::Url(e.to_string()))
    }

    fn item_url(&self, id: &ProductId) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("{COLLECTION_PATH}/{id}"))
            .map_err(|e| ApiError::Url(e.to_string()))
    }

    /// Fetch the full product collection.
    pub(crate) async fn list(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(self.collection_url()?)
            .bearer_auth(token)
            .send()
            .await?;
        let response = reject_on_error_status(response).await?;
        let envelope: DataEnvelope<Vec<Product>> = response.json().await?;
        Ok(envelope.data)
    }

    /// Create a product from a draft plus an optional image attachment.
    pub(crate) async fn create(
        &self,
        token: &str,
        draft: &ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<Product, ApiError> {
        let mut form = text_fields(draft);
        if let Some(image) = image {
            form = form.part("image", image_part(image)?);
        }

        let response = self
            .http
            .post(self.collection_url()?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let response = reject_on_error_status(response).await?;
        let envelope: DataEnvelope<Product> = response.json().await?;
        Ok(envelope.data)
    }

    /// Update a product. [`ImageChange::Unchanged`] omits the image part so
    /// the service keeps the stored image; a stale URL is never re-sent.
    pub(crate) async fn update(
        &self,
        token: &str,
        id: &ProductId,
        draft: &ProductDraft,
        image: ImageChange,
    ) -> Result<Product, ApiError> {
        let mut form = text_fields(draft);
        if let ImageChange::Replace(image) = image {
            form = form.part("image", image_part(image)?);
        }

        let response = self
            .http
            .put(self.item_url(id)?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let response = reject_on_error_status(response).await?;
        let envelope: DataEnvelope<Product> = response.json().await?;
        Ok(envelope.data)
    }

    /// Delete a product. Any 2xx answer counts as confirmation; the body is
    /// ignored.
    pub(crate) async fn delete(&self, token: &str, id: &ProductId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.item_url(id)?)
            .bearer_auth(token)
            .send()
            .await?;
        reject_on_error_status(response).await?;
        Ok(())
    }
}

fn text_fields(draft: &ProductDraft) -> Form {
    Form::new()
        .text("product_name", draft.name.clone())
        .text("category", draft.category.clone())
        .text("price", draft.price.to_string())
        .text("quantity", draft.quantity.to_string())
        .text("status", draft.status.as_wire_str())
}

fn image_part(image: ImageUpload) -> Result<Part, ApiError> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;
    Ok(part)
}

/// Turn a non-success response into [`ApiError::Rejected`], pulling the
/// message out of the body's `error` field when one is present.
async fn reject_on_error_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| "The inventory service rejected the request.".to_string());

    Err(ApiError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_keeps_base_path_prefixes() {
        let api = ProductApi::new(Url::parse("http://localhost:8080/nokori").expect("url"));
        assert_eq!(
            api.collection_url().expect("join").as_str(),
            "http://localhost:8080/nokori/api/v1/products"
        );
        assert_eq!(
            api.item_url(&ProductId::new("p-1")).expect("join").as_str(),
            "http://localhost:8080/nokori/api/v1/products/p-1"
        );
    }
}
