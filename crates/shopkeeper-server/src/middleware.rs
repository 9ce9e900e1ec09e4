use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Shared-secret auth settings used by the control middleware.
///
/// `secret: None` means the control surface is not configured; protected
/// routes answer "not configured" instead of silently running open.
#[derive(Debug, Clone)]
pub struct AuthState {
    secret: Option<Arc<str>>,
}

impl AuthState {
    #[must_use]
    pub fn from_config(config: &shopkeeper_core::AppConfig) -> Self {
        Self {
            secret: config.control_secret.as_deref().map(Arc::from),
        }
    }

    fn allows(&self, token: &str) -> Option<bool> {
        self.secret
            .as_deref()
            .map(|secret| secret.as_bytes().ct_eq(token.as_bytes()).into())
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: &'static str,
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(MiddlewareErrorBody { error: message })).into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware guarding the operation routes with the shared control secret.
///
/// The bearer token is compared in constant time. Without a configured
/// secret every protected route fails with 503 "not configured".
pub async fn require_control_secret(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));

    match token.and_then(|t| auth.allows(t)) {
        Some(true) => next.run(req).await,
        Some(false) => error_response(StatusCode::UNAUTHORIZED, "unauthorized"),
        None => {
            if auth.secret.is_none() {
                error_response(StatusCode::SERVICE_UNAVAILABLE, "not configured")
            } else {
                error_response(StatusCode::UNAUTHORIZED, "unauthorized")
            }
        }
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
