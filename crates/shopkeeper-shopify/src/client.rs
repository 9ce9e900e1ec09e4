use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::AdminError;
use crate::types::{Product, ProductPatch, ProductsPage, PutProductBody, PutVariantBody, VariantPatch};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Shopify Admin REST API.
///
/// Holds the HTTP client, base URL, access token, and API version. Use
/// [`AdminClient::new`] for a real store or [`AdminClient::with_base_url`]
/// to point at a mock server in tests.
///
/// Each call is a single request/response: no internal retry, no back-off.
/// Transient failures surface immediately and the caller decides what a
/// failed run means.
pub struct AdminClient {
    client: Client,
    base_url: Url,
    access_token: String,
    api_version: String,
}

impl AdminClient {
    /// Creates a client for `https://{shop_domain}`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidShopDomain`] if the domain does not form
    /// a valid URL, or [`AdminError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        Self::with_base_url(
            &format!("https://{shop_domain}"),
            access_token,
            api_version,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidShopDomain`] if `base_url` is not a valid
    /// URL, or [`AdminError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url =
            Url::parse(base_url).map_err(|e| AdminError::InvalidShopDomain {
                domain: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
        })
    }

    /// Fetches one page of products with ids greater than `since_id`,
    /// ordered ascending by id.
    ///
    /// `fields` is an optional comma-separated projection (e.g.
    /// `"id,title,vendor"`); when `None` the API returns full records.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Status`] on any non-2xx response.
    /// - [`AdminError::Http`] on network failure.
    /// - [`AdminError::Deserialize`] if the body does not match
    ///   [`ProductsPage`].
    pub async fn list_products(
        &self,
        limit: u32,
        since_id: i64,
        fields: Option<&str>,
    ) -> Result<Vec<Product>, AdminError> {
        let mut url = self.endpoint("products.json");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("since_id", &since_id.to_string());
            if let Some(fields) = fields {
                pairs.append_pair("fields", fields);
            }
        }

        let response = self
            .client
            .get(url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .send()
            .await?;
        let response = Self::check_status(response, "GET", &url).await?;

        let path = request_path(&url);
        let body = response.text().await?;
        let page: ProductsPage =
            serde_json::from_str(&body).map_err(|e| AdminError::Deserialize {
                context: format!("products page from {path}"),
                source: e,
            })?;
        Ok(page.products)
    }

    /// Applies a partial product update. The response body (the updated
    /// product) is discarded.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Status`] on any non-2xx response.
    /// - [`AdminError::Http`] on network failure.
    pub async fn update_product(&self, patch: &ProductPatch) -> Result<(), AdminError> {
        let url = self.endpoint(&format!("products/{}.json", patch.id));
        let response = self
            .client
            .put(url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&PutProductBody { product: patch })
            .send()
            .await?;
        Self::check_status(response, "PUT", &url).await?;
        Ok(())
    }

    /// Applies a partial variant update. The response body is discarded.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Status`] on any non-2xx response.
    /// - [`AdminError::Http`] on network failure.
    pub async fn update_variant(&self, patch: &VariantPatch) -> Result<(), AdminError> {
        let url = self.endpoint(&format!("variants/{}.json", patch.id));
        let response = self
            .client
            .put(url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&PutVariantBody { variant: patch })
            .send()
            .await?;
        Self::check_status(response, "PUT", &url).await?;
        Ok(())
    }

    /// Builds the versioned admin URL for `tail`, e.g.
    /// `https://shop/admin/api/2024-01/products.json`.
    fn endpoint(&self, tail: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/admin/api/{}/{tail}", self.api_version));
        url
    }

    /// Asserts a 2xx status, otherwise reads the raw body and returns the
    /// full call context as [`AdminError::Status`].
    async fn check_status(
        response: reqwest::Response,
        method: &'static str,
        url: &Url,
    ) -> Result<reqwest::Response, AdminError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AdminError::Status {
            status: status.as_u16(),
            method,
            path: request_path(url),
            body,
        })
    }
}

/// Path plus query string, without scheme/host — what error messages report.
fn request_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
