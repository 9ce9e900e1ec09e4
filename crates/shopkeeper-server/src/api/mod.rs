mod ops;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use shopkeeper_engine::{EngineError, SweepOptions};
use shopkeeper_shopify::AdminClient;

use crate::middleware::{request_id, require_control_secret, AuthState};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<shopkeeper_core::AppConfig>,
    /// Present only when shop credentials are configured.
    pub client: Option<Arc<AdminClient>>,
}

impl AppState {
    fn admin_client(&self) -> Result<Arc<AdminClient>, OpError> {
        self.client.clone().ok_or_else(OpError::not_configured)
    }

    fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            page_size: self.config.page_size,
            write_concurrency: self.config.write_concurrency,
        }
    }
}

/// Failure body for every operation route: `{"error": <message>}`.
#[derive(Debug, Serialize)]
pub struct OpError {
    error: String,
    #[serde(skip)]
    status: StatusCode,
}

impl OpError {
    fn not_configured() -> Self {
        Self {
            error: "not configured".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn failed(err: &EngineError) -> Self {
        tracing::error!(error = %err, "operation failed");
        Self {
            error: format!("operation failed with {err}"),
            status: StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for OpError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/webhooks/orders", post(acknowledge_order_webhook));

    let protected = Router::new()
        .route("/ops/descriptions/rewrite", post(ops::rewrite_descriptions))
        .route("/ops/products/hide-out-of-stock", post(ops::hide_out_of_stock))
        .route("/ops/variants/reprice", post(ops::reprice))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_control_secret,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

/// Order webhooks are acknowledged and dropped; the payload is not read.
async fn acknowledge_order_webhook() -> StatusCode {
    tracing::debug!("order webhook acknowledged");
    StatusCode::OK
}
