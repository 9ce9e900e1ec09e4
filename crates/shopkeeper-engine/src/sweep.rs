//! The shared paginate → decide → write → aggregate skeleton.
//!
//! All three maintenance operations are applications of [`sweep`] with a
//! different field projection and planner closure, so pagination and
//! failure semantics cannot drift between them.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use shopkeeper_shopify::{AdminClient, Product, ProductPatch, VariantPatch};

use crate::error::EngineError;
use crate::pages::ProductPages;

/// Traversal and write-policy knobs shared by every operation.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Products requested per page.
    pub page_size: u32,
    /// Maximum in-flight writes. 1 means strictly sequential, which is the
    /// store's implicit per-account rate budget.
    pub write_concurrency: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            page_size: 250,
            write_concurrency: 1,
        }
    }
}

/// Whether a run records what it would change or actually changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Preview,
    Apply,
}

/// One line of a dry-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPreview {
    pub id: i64,
    pub title: String,
}

/// A single pending catalog write.
pub(crate) enum WriteIntent {
    Product(ProductPatch),
    Variant(VariantPatch),
}

/// What a sweep accumulated: executed writes in apply mode, per-product
/// previews in preview mode.
pub(crate) struct SweepTally {
    pub writes: u64,
    pub preview: Vec<ProductPreview>,
}

/// Drives one full catalog traversal.
///
/// `plan` maps each product to zero or more write intents. In preview mode
/// a product with any intent is recorded as a [`ProductPreview`] and no
/// write is issued. In apply mode each page's intents are executed before
/// the next page is fetched, with at most `write_concurrency` calls in
/// flight.
///
/// There is no rollback: the first failed write (or page fetch) ends the
/// run with writes already applied left in effect and all remaining
/// intents unissued.
pub(crate) async fn sweep<F>(
    client: &AdminClient,
    options: &SweepOptions,
    fields: Option<&'static str>,
    mode: RunMode,
    mut plan: F,
) -> Result<SweepTally, EngineError>
where
    F: FnMut(&Product) -> Vec<WriteIntent>,
{
    let mut pages = ProductPages::new(client, options.page_size, fields);
    let mut tally = SweepTally {
        writes: 0,
        preview: Vec::new(),
    };
    let concurrency = options.write_concurrency.max(1);

    while let Some(page) = pages.next_page().await? {
        let mut intents: Vec<WriteIntent> = Vec::new();

        for product in &page {
            let planned = plan(product);
            if planned.is_empty() {
                continue;
            }
            match mode {
                RunMode::Preview => tally.preview.push(ProductPreview {
                    id: product.id,
                    title: product.title.clone(),
                }),
                RunMode::Apply => intents.extend(planned),
            }
        }

        if intents.is_empty() {
            continue;
        }

        tracing::debug!(writes = intents.len(), "applying planned writes for page");

        let mut writes = stream::iter(
            intents
                .into_iter()
                .map(|intent| apply_intent(client, intent)),
        )
        .buffered(concurrency);

        while let Some(result) = writes.next().await {
            result?;
            tally.writes += 1;
        }
    }

    Ok(tally)
}

async fn apply_intent(client: &AdminClient, intent: WriteIntent) -> Result<(), EngineError> {
    match intent {
        WriteIntent::Product(patch) => client.update_product(&patch).await?,
        WriteIntent::Variant(patch) => client.update_variant(&patch).await?,
    }
    Ok(())
}
