use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials for the Shopify Admin REST API.
///
/// Both halves are required together: a domain without a token (or the
/// reverse) is rejected at load time instead of being carried around as a
/// half-usable pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ShopCredentials {
    /// Store hostname, e.g. `my-store.myshopify.com`. No scheme.
    pub shop_domain: String,
    /// Admin API access token, sent as `X-Shopify-Access-Token`.
    pub admin_token: String,
}

impl std::fmt::Debug for ShopCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopCredentials")
            .field("shop_domain", &self.shop_domain)
            .field("admin_token", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` means the catalog operations are not configured; every
    /// operation entry point must refuse to run rather than default.
    pub shop: Option<ShopCredentials>,
    /// Admin REST API version segment, e.g. `2024-01`.
    pub api_version: String,
    /// Shared secret for the control surface. `None` means the protected
    /// routes answer "not configured" — auth is never silently disabled.
    pub control_secret: Option<String>,
    /// Brand name substituted when a product has no vendor.
    pub default_vendor: String,
    /// Products requested per page, 1..=250.
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Maximum in-flight catalog writes per run. 1 keeps writes strictly
    /// sequential, which is also the store's implicit rate-limit budget.
    pub write_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop", &self.shop)
            .field("api_version", &self.api_version)
            .field(
                "control_secret",
                &self.control_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("default_vendor", &self.default_vendor)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("write_concurrency", &self.write_concurrency)
            .finish()
    }
}
