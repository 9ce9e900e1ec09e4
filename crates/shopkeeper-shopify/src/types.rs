//! Admin REST API wire types.
//!
//! Every request and response shape this service exchanges with the Admin
//! API is a named record here, so field-name drift is a compile error rather
//! than a silent `null` in a dynamic map.
//!
//! ## Field projections
//!
//! List requests pass a `fields` query parameter, so a [`Product`] snapshot
//! usually carries only a subset of these fields. Everything except `id`
//! defaults when absent; one record type serves every projection.
//!
//! ## `inventory_management`
//!
//! The wire carries a string naming the tracking service (`"shopify"`) or
//! `null` when quantities are not authoritative. Kept as `Option<String>`
//! to match the actual payload; use [`Variant::is_tracked`] for the
//! boolean question.

use serde::{Deserialize, Serialize};

/// Top-level response from `GET /admin/api/{version}/products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
}

/// Publication status of a product.
///
/// `draft` is the hidden state used by the stock-hide operation. Anything
/// the API adds later (e.g. `archived`) lands in `Other` instead of failing
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Draft,
    #[serde(other)]
    Other,
}

/// A product snapshot from a list response.
#[derive(Debug, Deserialize)]
pub struct Product {
    /// Store-assigned numeric ID, monotonically increasing. Doubles as the
    /// pagination watermark.
    pub id: i64,

    #[serde(default)]
    pub title: String,

    /// Vendor / brand name. Empty or absent vendors fall back to the
    /// configured default at render time.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Raw HTML product description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    /// Absent when the request's field projection excluded it.
    #[serde(default)]
    pub status: Option<ProductStatus>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A purchasable variant embedded in a [`Product`].
#[derive(Debug, Deserialize)]
pub struct Variant {
    pub id: i64,

    /// Current price as a decimal string (e.g. `"30.00"`). Never null in
    /// observed responses.
    #[serde(default)]
    pub price: String,

    /// On-hand quantity. `null`/absent means the store does not track a
    /// count for this variant.
    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    /// Tracking service name (`"shopify"`) or `null` when quantities are
    /// not authoritative.
    #[serde(default)]
    pub inventory_management: Option<String>,
}

impl Variant {
    /// Whether `inventory_quantity` is an authoritative count.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.inventory_management
            .as_deref()
            .is_some_and(|m| !m.is_empty())
    }
}

/// Partial product update for `PUT /admin/api/{version}/products/{id}.json`.
///
/// Only the fields being changed are serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPatch {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    /// A patch that replaces the product description.
    #[must_use]
    pub fn with_body_html(id: i64, body_html: String) -> Self {
        Self {
            id,
            body_html: Some(body_html),
            status: None,
        }
    }

    /// A patch that changes the publication status.
    #[must_use]
    pub fn with_status(id: i64, status: ProductStatus) -> Self {
        Self {
            id,
            body_html: None,
            status: Some(status),
        }
    }
}

/// Partial variant update for `PUT /admin/api/{version}/variants/{id}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantPatch {
    pub id: i64,
    pub price: String,
}

impl VariantPatch {
    #[must_use]
    pub fn new(id: i64, price: String) -> Self {
        Self { id, price }
    }
}

/// PUT envelope: `{"product": {...}}`.
#[derive(Debug, Serialize)]
pub struct PutProductBody<'a> {
    pub product: &'a ProductPatch,
}

/// PUT envelope: `{"variant": {...}}`.
#[derive(Debug, Serialize)]
pub struct PutVariantBody<'a> {
    pub variant: &'a VariantPatch,
}
