//! Local mirror of the store's product collection.
//!
//! The cache executes create, update, and delete against the remote
//! inventory service, applies results to local state, and derives a
//! paginated view. Nothing here throws past the public boundary: success is
//! a non-`None` return value, failure lands in the single nullable
//! [`error`](InventoryCache::error) message, dismissed only through
//! [`clear_error`](InventoryCache::clear_error).
//!
//! # Consistency rules
//!
//! - Fetch is a *full replacement*, never a merge. A failed fetch keeps the
//!   previous collection: stale-but-valid beats empty.
//! - Create is never optimistic. The server assigns the ID, so a
//!   speculative local insert could not be matched up afterwards.
//! - Update replaces the matching entry wholesale with the server response,
//!   so server-computed fields (`updated_at`, image URL) never diverge.
//! - Delete removes locally only after server confirmation, then the page
//!   view is recomputed immediately so an emptied last page collapses onto
//!   the new last page.
//!
//! Operations take `&mut self`: within one cache handle, mutations are
//! sequential, mirroring the single-UI-thread model of the front end.

use nokori_core::{ImageChange, ImageUpload, Product, ProductDraft, ProductId, ValidationError};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::session::{DurableStore, SessionStore};

mod api;
pub mod page;

pub use api::ApiError;

use api::ProductApi;
use page::bounds;

/// Error message for a call attempted without a session token. The request
/// is never sent; the remote would reject it anyway.
const AUTH_MISSING_MESSAGE: &str = "You must be signed in to manage products.";

/// One page of the product collection, derived on demand.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Products visible on the current page, in server collection order.
    pub items: &'a [Product],
    /// Current page, always in `1..=total_pages`.
    pub current_page: usize,
    /// Total page count; at least 1 even when the collection is empty.
    pub total_pages: usize,
    /// Size of the full collection.
    pub total_items: usize,
    /// Configured page size.
    pub page_size: usize,
}

/// Request-backed product collection with a derived paginated view.
pub struct InventoryCache<D: DurableStore> {
    api: ProductApi,
    session: SessionStore<D>,
    products: Vec<Product>,
    page_size: usize,
    current_page: usize,
    is_loading: bool,
    error: Option<String>,
    fetch_attempted: bool,
}

impl<D: DurableStore> InventoryCache<D> {
    /// Create an empty cache bound to `session`. The first operation
    /// triggers an automatic initial fetch.
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore<D>) -> Self {
        Self {
            api: ProductApi::new(config.api_base_url.clone()),
            session,
            products: Vec::new(),
            page_size: config.page_size,
            current_page: 1,
            is_loading: false,
            error: None,
            fetch_attempted: false,
        }
    }

    /// Replace the local collection with the server's.
    ///
    /// On failure the previous collection is left untouched and the error
    /// message set.
    #[instrument(skip(self))]
    pub async fn fetch_all(&mut self) {
        self.fetch_attempted = true;
        let Some(token) = self.session.token() else {
            self.error = Some(AUTH_MISSING_MESSAGE.to_string());
            return;
        };

        self.is_loading = true;
        self.error = None;
        match self.api.list(&token).await {
            Ok(products) => {
                debug!(count = products.len(), "inventory refreshed");
                self.products = products;
                self.recompute_page();
            }
            Err(err) => {
                warn!(error = %err, "inventory fetch failed");
                self.error = Some(err.user_message());
            }
        }
        self.is_loading = false;
    }

    /// Create a product on the service and append the returned record.
    ///
    /// Returns the server-assigned product on success. On any failure
    /// (validation, missing session, transport, rejection) the collection is
    /// unchanged, `None` is returned, and the error message set.
    #[instrument(skip(self, draft, image), fields(product_name = %draft.name))]
    pub async fn create_product(
        &mut self,
        draft: &ProductDraft,
        image: Option<ImageUpload>,
    ) -> Option<Product> {
        self.ensure_loaded().await;
        if !self.precheck(draft) {
            return None;
        }
        let token = self.require_token()?;

        self.is_loading = true;
        self.error = None;
        let result = self.api.create(&token, draft, image).await;
        self.is_loading = false;

        match result {
            Ok(product) => {
                // Appended at the end; the recomputed indexing decides which
                // page it lands on.
                self.products.push(product.clone());
                self.recompute_page();
                Some(product)
            }
            Err(err) => {
                warn!(error = %err, "product create failed");
                self.error = Some(err.user_message());
                None
            }
        }
    }

    /// Update a product and replace the local entry with the server copy.
    ///
    /// Pass [`ImageChange::Unchanged`] for a metadata-only update; the
    /// stored image is retained server-side.
    #[instrument(skip(self, draft, image), fields(product_id = %id))]
    pub async fn update_product(
        &mut self,
        id: &ProductId,
        draft: &ProductDraft,
        image: ImageChange,
    ) -> Option<Product> {
        self.ensure_loaded().await;
        if !self.precheck(draft) {
            return None;
        }
        let token = self.require_token()?;

        self.is_loading = true;
        self.error = None;
        let result = self.api.update(&token, id, draft, image).await;
        self.is_loading = false;

        match result {
            Ok(product) => {
                if let Some(entry) = self.products.iter_mut().find(|p| p.id == *id) {
                    *entry = product.clone();
                }
                Some(product)
            }
            Err(err) => {
                warn!(error = %err, "product update failed");
                self.error = Some(err.user_message());
                None
            }
        }
    }

    /// Delete a product, removing it locally only after the service
    /// confirms. The page view is recomputed immediately so a newly empty
    /// last page collapses.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&mut self, id: &ProductId) -> bool {
        self.ensure_loaded().await;
        let Some(token) = self.require_token() else {
            return false;
        };

        self.is_loading = true;
        self.error = None;
        let result = self.api.delete(&token, id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.products.retain(|p| p.id != *id);
                self.recompute_page();
                true
            }
            Err(err) => {
                warn!(error = %err, "product delete failed");
                self.error = Some(err.user_message());
                false
            }
        }
    }

    /// Reset the error message. No other side effects.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Navigate to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, n: usize) {
        self.current_page = bounds(self.products.len(), self.page_size, n).current_page;
    }

    /// Derive the current page view.
    #[must_use]
    pub fn page(&self) -> PageView<'_> {
        let b = bounds(self.products.len(), self.page_size, self.current_page);
        PageView {
            items: self.products.get(b.start..b.end).unwrap_or_default(),
            current_page: b.current_page,
            total_pages: b.total_pages,
            total_items: self.products.len(),
            page_size: self.page_size,
        }
    }

    /// The full local collection, in server order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The current user-displayable error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run the one automatic initial fetch per session.
    async fn ensure_loaded(&mut self) {
        if !self.fetch_attempted {
            self.fetch_all().await;
        }
    }

    /// Validate a draft; on failure surface every field error at once.
    fn precheck(&mut self, draft: &ProductDraft) -> bool {
        if let Err(errors) = draft.validate() {
            self.error = Some(join_field_errors(&errors));
            return false;
        }
        true
    }

    /// Short-circuit with an authentication error when no token is present
    /// rather than issuing a doomed request.
    fn require_token(&mut self) -> Option<String> {
        let token = self.session.token();
        if token.is_none() {
            self.error = Some(AUTH_MISSING_MESSAGE.to_string());
        }
        token
    }

    fn recompute_page(&mut self) {
        self.current_page =
            bounds(self.products.len(), self.page_size, self.current_page).current_page;
    }
}

fn join_field_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_join_with_semicolons() {
        let joined = join_field_errors(&[
            ValidationError::EmptyName,
            ValidationError::NegativePrice,
        ]);
        assert_eq!(
            joined,
            "product_name: name cannot be empty; price: price cannot be negative"
        );
    }
}
