use thiserror::Error;

/// Errors returned by the Admin REST API client.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. Carries everything needed to
    /// report the failed call verbatim: method, path, status, raw body text.
    #[error("{method} {path} returned HTTP {status}: {body}")]
    Status {
        status: u16,
        method: &'static str,
        path: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured shop domain does not form a valid base URL.
    #[error("invalid shop domain \"{domain}\": {reason}")]
    InvalidShopDomain { domain: String, reason: String },
}
