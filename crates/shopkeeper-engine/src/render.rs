//! Product description synthesis.
//!
//! One fixed HTML structure for the whole catalog, filled in from the
//! product title and vendor. Pure: the same inputs always render the same
//! markup, which is what makes the rewrite operation idempotent.

/// Minimal HTML escaping for text interpolated into the template.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the standard storefront description for a product.
///
/// `vendor` must already be resolved — callers substitute the configured
/// default brand before calling when the product has none.
#[must_use]
pub fn render_description(title: &str, vendor: &str) -> String {
    let title = escape_html(title);
    let vendor = escape_html(vendor);

    format!(
        "<p><strong>{title}</strong> from {vendor} is stocked and shipped directly from our warehouse.</p>\
<p>Why you'll love it:</p>\
<ul>\
<li>Authentic {vendor} quality, checked before every shipment</li>\
<li>Carefully packed so it arrives the way it left the shelf</li>\
<li>Backed by our 30-day satisfaction guarantee</li>\
</ul>\
<p>Details:</p>\
<ul>\
<li>Product: {title}</li>\
<li>Brand: {vendor}</li>\
</ul>\
<p>Shipping &amp; returns: orders placed before 2pm ship the same business day. \
Unopened items can be returned within 30 days for a full refund.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_is_deterministic() {
        let a = render_description("Sparkling Water", "Acme");
        let b = render_description("Sparkling Water", "Acme");
        assert_eq!(a, b);
    }

    #[test]
    fn interpolates_title_and_vendor() {
        let html = render_description("Sparkling Water", "Acme");
        assert!(html.contains("<strong>Sparkling Water</strong>"));
        assert!(html.contains("Brand: Acme"));
    }

    #[test]
    fn different_titles_render_differently() {
        assert_ne!(
            render_description("Sparkling Water", "Acme"),
            render_description("Still Water", "Acme")
        );
    }

    #[test]
    fn escapes_markup_in_inputs() {
        let html = render_description("Mugs <set of 4>", "Smith & Sons");
        assert!(html.contains("Mugs &lt;set of 4&gt;"));
        assert!(html.contains("Smith &amp; Sons"));
        assert!(!html.contains("<set of 4>"));
    }
}
