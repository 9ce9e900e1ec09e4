//! The three maintenance operations.
//!
//! Each is one application of [`sweep`](crate::sweep::sweep) with its own
//! field projection, planner, and summary shape.

use rust_decimal::Decimal;
use serde::Serialize;

use shopkeeper_shopify::{AdminClient, ProductPatch, ProductStatus, VariantPatch};

use crate::decide::{decide_price, description_up_to_date, should_hide, PriceDecision};
use crate::error::EngineError;
use crate::render::render_description;
use crate::sweep::{sweep, ProductPreview, RunMode, SweepOptions, WriteIntent};

const DESCRIPTION_FIELDS: &str = "id,title,body_html,vendor";
const HIDE_FIELDS: &str = "id,status,variants";
const REPRICE_FIELDS: &str = "id,variants";

/// Result of a description run: a write count in apply mode, the would-be
/// changes in preview mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DescriptionOutcome {
    Updated {
        updated: u64,
    },
    Preview {
        preview_count: usize,
        preview: Vec<ProductPreview>,
    },
}

#[derive(Debug, Serialize)]
pub struct HideOutcome {
    pub hidden: u64,
}

#[derive(Debug, Serialize)]
pub struct RepriceOutcome {
    pub changed: u64,
}

/// Rewrites every product description to the standard template.
///
/// Products whose current description already matches the rendered copy
/// (normalized-prefix comparison) are left alone, so a second run over an
/// unchanged catalog writes nothing. Products without a vendor use
/// `default_vendor`.
///
/// # Errors
///
/// Any remote failure aborts the run; see [`EngineError`].
pub async fn rewrite_descriptions(
    client: &AdminClient,
    options: &SweepOptions,
    default_vendor: &str,
    mode: RunMode,
) -> Result<DescriptionOutcome, EngineError> {
    let tally = sweep(client, options, Some(DESCRIPTION_FIELDS), mode, |product| {
        let vendor = product
            .vendor
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default_vendor);
        let proposed = render_description(&product.title, vendor);
        if description_up_to_date(product.body_html.as_deref(), &proposed) {
            return Vec::new();
        }
        vec![WriteIntent::Product(ProductPatch::with_body_html(
            product.id, proposed,
        ))]
    })
    .await?;

    let outcome = match mode {
        RunMode::Apply => DescriptionOutcome::Updated {
            updated: tally.writes,
        },
        RunMode::Preview => DescriptionOutcome::Preview {
            preview_count: tally.preview.len(),
            preview: tally.preview,
        },
    };

    if let DescriptionOutcome::Updated { updated } = &outcome {
        tracing::info!(updated, "description rewrite complete");
    }
    Ok(outcome)
}

/// Moves every product whose tracked variants are all out of stock to the
/// `draft` (hidden) state.
///
/// # Errors
///
/// Any remote failure aborts the run; see [`EngineError`].
pub async fn hide_out_of_stock(
    client: &AdminClient,
    options: &SweepOptions,
) -> Result<HideOutcome, EngineError> {
    let tally = sweep(
        client,
        options,
        Some(HIDE_FIELDS),
        RunMode::Apply,
        |product| {
            if should_hide(product) {
                vec![WriteIntent::Product(ProductPatch::with_status(
                    product.id,
                    ProductStatus::Draft,
                ))]
            } else {
                Vec::new()
            }
        },
    )
    .await?;

    tracing::info!(hidden = tally.writes, "stock hide complete");
    Ok(HideOutcome {
        hidden: tally.writes,
    })
}

/// Adjusts every variant price by `percent` (+10 means multiply by 1.10).
///
/// Variants whose adjusted price equals the stored string are skipped, so a
/// 0% run writes nothing. Variants with a non-numeric stored price are
/// skipped with a log line and do not fail the run.
///
/// # Errors
///
/// - [`EngineError::InvalidPercent`] if `percent` is NaN or infinite.
/// - Any remote failure aborts the run; see [`EngineError`].
pub async fn reprice(
    client: &AdminClient,
    options: &SweepOptions,
    percent: f64,
) -> Result<RepriceOutcome, EngineError> {
    let factor = percent_factor(percent)?;

    let tally = sweep(
        client,
        options,
        Some(REPRICE_FIELDS),
        RunMode::Apply,
        |product| {
            product
                .variants
                .iter()
                .filter_map(|variant| match decide_price(&variant.price, factor) {
                    PriceDecision::Set(price) => {
                        Some(WriteIntent::Variant(VariantPatch::new(variant.id, price)))
                    }
                    PriceDecision::Keep => None,
                    PriceDecision::Skip => {
                        tracing::debug!(
                            variant_id = variant.id,
                            price = %variant.price,
                            "skipping variant with non-numeric price"
                        );
                        None
                    }
                })
                .collect()
        },
    )
    .await?;

    tracing::info!(changed = tally.writes, percent, "reprice complete");
    Ok(RepriceOutcome {
        changed: tally.writes,
    })
}

/// Converts a percent adjustment into a multiplication factor.
fn percent_factor(percent: f64) -> Result<Decimal, EngineError> {
    let percent_dec =
        Decimal::try_from(percent).map_err(|_| EngineError::InvalidPercent { percent })?;
    Ok(Decimal::ONE + percent_dec / Decimal::ONE_HUNDRED)
}
