//! Since-id page traversal.
//!
//! The catalog is read in ascending-id order: each page requests products
//! with ids greater than the watermark, and the watermark advances to the
//! highest id seen. The sequence ends at the first empty page. A run always
//! starts at watermark zero — there is no checkpoint across runs, so every
//! invocation re-scans the full catalog.
//!
//! If the store mutates concurrently the traversal only promises eventual
//! convergence once the store is quiescent; that is accepted, not worked
//! around.

use shopkeeper_shopify::{AdminClient, Product};

use crate::error::EngineError;

/// Maximum number of pages to fetch before giving up.
/// Guards against a store that keeps returning ids at or below the cursor.
pub(crate) const MAX_PAGES: usize = 500;

/// Lazy, finite sequence of catalog pages.
///
/// Call [`ProductPages::next_page`] repeatedly until it returns `Ok(None)`.
/// Not restartable mid-sequence; build a fresh iterator per run.
pub(crate) struct ProductPages<'a> {
    client: &'a AdminClient,
    page_size: u32,
    fields: Option<&'static str>,
    since_id: i64,
    pages_fetched: usize,
    done: bool,
}

impl<'a> ProductPages<'a> {
    pub(crate) fn new(
        client: &'a AdminClient,
        page_size: u32,
        fields: Option<&'static str>,
    ) -> Self {
        Self {
            client,
            page_size,
            fields,
            since_id: 0,
            pages_fetched: 0,
            done: false,
        }
    }

    /// Fetches the next page, advancing the watermark to the highest id in
    /// it. Returns `Ok(None)` once the catalog is exhausted, and keeps
    /// returning `Ok(None)` thereafter.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Api`] for any remote failure, which ends the run.
    /// - [`EngineError::PageLimit`] after [`MAX_PAGES`] non-empty pages.
    pub(crate) async fn next_page(&mut self) -> Result<Option<Vec<Product>>, EngineError> {
        if self.done {
            return Ok(None);
        }

        if self.pages_fetched >= MAX_PAGES {
            return Err(EngineError::PageLimit {
                max_pages: MAX_PAGES,
            });
        }
        self.pages_fetched += 1;

        let page = self
            .client
            .list_products(self.page_size, self.since_id, self.fields)
            .await?;

        if page.is_empty() {
            self.done = true;
            return Ok(None);
        }

        if let Some(max_id) = page.iter().map(|p| p.id).max() {
            // The API filters to ids > since_id, so the watermark only moves
            // forward; max() keeps that true even against a sloppy store.
            self.since_id = self.since_id.max(max_id);
        }

        tracing::debug!(
            page = self.pages_fetched,
            items = page.len(),
            watermark = self.since_id,
            "fetched catalog page"
        );

        Ok(Some(page))
    }
}
