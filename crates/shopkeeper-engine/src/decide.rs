//! Per-item mutation decisions.
//!
//! Each operation's "is this already done?" check lives here, so re-running
//! an operation against an unchanged catalog is a no-op.

use rust_decimal::{Decimal, RoundingStrategy};
use shopkeeper_shopify::{Product, ProductStatus};

/// How much of the normalized description is compared.
///
/// Intentionally a prefix, not full-body equality: the generated copy is
/// recognizable within its first lines, and tail drift (injected widgets,
/// tracking snippets) should not force a rewrite on every run. Changing
/// this changes observable re-run behavior.
const DESCRIPTION_PREFIX_CHARS: usize = 160;

/// Collapses internal whitespace runs to single spaces and trims the ends.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the current description already matches the proposed one, by
/// comparing a [`DESCRIPTION_PREFIX_CHARS`]-character prefix of the
/// whitespace-normalized forms.
pub(crate) fn description_up_to_date(current: Option<&str>, proposed: &str) -> bool {
    let Some(current) = current else {
        return false;
    };
    let current = normalize_whitespace(current);
    let proposed = normalize_whitespace(proposed);
    current
        .chars()
        .take(DESCRIPTION_PREFIX_CHARS)
        .eq(proposed.chars().take(DESCRIPTION_PREFIX_CHARS))
}

/// Whether a product should be moved to the hidden (`draft`) state.
///
/// True iff every tracked variant reports quantity <= 0 and the product is
/// not already `draft`. A tracked variant with no quantity counts as zero —
/// it cannot demonstrate stock. Untracked variants do not contribute to the
/// decision, so a product with zero variants, or with only untracked
/// variants, satisfies the quantifier vacuously and IS hidden when active.
/// That edge case is preserved deliberately; see DESIGN.md.
pub(crate) fn should_hide(product: &Product) -> bool {
    if product.status == Some(ProductStatus::Draft) {
        return false;
    }
    product
        .variants
        .iter()
        .filter(|v| v.is_tracked())
        .all(|v| v.inventory_quantity.unwrap_or(0) <= 0)
}

/// Outcome of the reprice check for one variant.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PriceDecision {
    /// The stored price is not a parseable decimal; skip the variant.
    Skip,
    /// The adjusted price equals the stored string; nothing to write.
    Keep,
    /// Write this new price.
    Set(String),
}

/// Applies `factor` to a stored price string.
///
/// The new price is rounded to two decimal places (midpoint away from
/// zero) and compared textually against the stored string: only a textual
/// difference produces a write. The store normalizes prices to two
/// decimals, so a clean catalog is stable under factor 1.
pub(crate) fn decide_price(current: &str, factor: Decimal) -> PriceDecision {
    let Ok(price) = current.trim().parse::<Decimal>() else {
        return PriceDecision::Skip;
    };

    let adjusted =
        (price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let adjusted = adjusted.to_string();

    if adjusted == current {
        PriceDecision::Keep
    } else {
        PriceDecision::Set(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use shopkeeper_shopify::Variant;

    use super::*;

    fn product(status: Option<ProductStatus>, variants: Vec<Variant>) -> Product {
        let status_str: Option<&str> = match status {
            Some(ProductStatus::Active) => Some("active"),
            Some(ProductStatus::Draft) => Some("draft"),
            Some(ProductStatus::Other) => Some("archived"),
            None => None,
        };
        let mut product: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Test",
            "status": status_str,
            "variants": [],
        }))
        .expect("product fixture");
        product.variants = variants;
        product
    }

    fn variant(qty: Option<i64>, tracked: bool) -> Variant {
        let management: Option<&str> = tracked.then_some("shopify");
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "price": "10.00",
            "inventory_quantity": qty,
            "inventory_management": management,
        }))
        .expect("variant fixture")
    }

    // --- description_up_to_date -------------------------------------------

    #[test]
    fn missing_description_is_never_up_to_date() {
        assert!(!description_up_to_date(None, "<p>anything</p>"));
    }

    #[test]
    fn identical_descriptions_match() {
        let html = "<p>Same text</p>";
        assert!(description_up_to_date(Some(html), html));
    }

    #[test]
    fn whitespace_differences_are_ignored() {
        assert!(description_up_to_date(
            Some("<p>Same   text</p>\n\n  "),
            "<p>Same text</p>"
        ));
    }

    #[test]
    fn drift_beyond_the_prefix_is_tolerated() {
        let head = "x".repeat(DESCRIPTION_PREFIX_CHARS);
        let current = format!("{head} old tail");
        let proposed = format!("{head} new tail");
        assert!(description_up_to_date(Some(&current), &proposed));
    }

    #[test]
    fn difference_inside_the_prefix_forces_rewrite() {
        assert!(!description_up_to_date(
            Some("<p>Old copy</p>"),
            "<p>New copy</p>"
        ));
    }

    // --- should_hide ------------------------------------------------------

    #[test]
    fn all_tracked_variants_at_zero_hides_active_product() {
        let p = product(
            Some(ProductStatus::Active),
            vec![variant(Some(0), true), variant(Some(0), true)],
        );
        assert!(should_hide(&p));
    }

    #[test]
    fn any_tracked_stock_keeps_product_visible() {
        let p = product(Some(ProductStatus::Active), vec![variant(Some(5), true)]);
        assert!(!should_hide(&p));
    }

    #[test]
    fn untracked_variants_do_not_block_hiding() {
        // Only untracked variants: the "every tracked variant" quantifier is
        // vacuously true, so the product is hidden. Deliberate; see DESIGN.md.
        let p = product(Some(ProductStatus::Active), vec![variant(Some(0), false)]);
        assert!(should_hide(&p));
    }

    #[test]
    fn product_with_no_variants_is_hidden_when_active() {
        let p = product(Some(ProductStatus::Active), vec![]);
        assert!(should_hide(&p));
    }

    #[test]
    fn already_draft_product_is_left_alone() {
        let p = product(Some(ProductStatus::Draft), vec![variant(Some(0), true)]);
        assert!(!should_hide(&p));
    }

    #[test]
    fn tracked_variant_without_quantity_counts_as_zero() {
        let p = product(Some(ProductStatus::Active), vec![variant(None, true)]);
        assert!(should_hide(&p));
    }

    #[test]
    fn mixed_stock_keeps_product_visible() {
        let p = product(
            Some(ProductStatus::Active),
            vec![variant(Some(0), true), variant(Some(3), true)],
        );
        assert!(!should_hide(&p));
    }

    // --- decide_price -----------------------------------------------------

    fn pct(percent: i64) -> Decimal {
        Decimal::ONE + Decimal::new(percent, 0) / Decimal::ONE_HUNDRED
    }

    #[test]
    fn ten_percent_on_19_99_rounds_to_21_99() {
        // 19.99 * 1.10 = 21.989 -> 21.99
        assert_eq!(
            decide_price("19.99", pct(10)),
            PriceDecision::Set("21.99".to_string())
        );
    }

    #[test]
    fn zero_percent_keeps_normalized_price() {
        assert_eq!(decide_price("10.00", pct(0)), PriceDecision::Keep);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 10.25 * 1.10 = 11.275 -> 11.28
        assert_eq!(
            decide_price("10.25", pct(10)),
            PriceDecision::Set("11.28".to_string())
        );
    }

    #[test]
    fn non_numeric_price_is_skipped() {
        assert_eq!(decide_price("call us", pct(10)), PriceDecision::Skip);
        assert_eq!(decide_price("", pct(10)), PriceDecision::Skip);
    }

    #[test]
    fn discount_factor_lowers_price() {
        // 20.00 * 0.90 = 18.00
        assert_eq!(
            decide_price("20.00", pct(-10)),
            PriceDecision::Set("18.00".to_string())
        );
    }
}
