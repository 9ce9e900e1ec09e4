//! Handlers for the three maintenance operations.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use shopkeeper_engine::{DescriptionOutcome, HideOutcome, RepriceOutcome, RunMode};

use crate::middleware::RequestId;

use super::{AppState, OpError};

#[derive(Debug, Deserialize)]
pub(super) struct RewriteParams {
    /// `false` (the default) previews without writing.
    #[serde(default)]
    apply: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepriceParams {
    #[serde(default)]
    percent: f64,
}

pub(super) async fn rewrite_descriptions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<RewriteParams>,
) -> Result<Json<DescriptionOutcome>, OpError> {
    let client = state.admin_client()?;
    let mode = if params.apply {
        RunMode::Apply
    } else {
        RunMode::Preview
    };
    tracing::info!(request_id = %req_id.0, apply = params.apply, "description rewrite requested");

    let outcome = shopkeeper_engine::rewrite_descriptions(
        &client,
        &state.sweep_options(),
        &state.config.default_vendor,
        mode,
    )
    .await
    .map_err(|e| OpError::failed(&e))?;
    Ok(Json(outcome))
}

pub(super) async fn hide_out_of_stock(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<HideOutcome>, OpError> {
    let client = state.admin_client()?;
    tracing::info!(request_id = %req_id.0, "stock hide requested");

    let outcome = shopkeeper_engine::hide_out_of_stock(&client, &state.sweep_options())
        .await
        .map_err(|e| OpError::failed(&e))?;
    Ok(Json(outcome))
}

pub(super) async fn reprice(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Option<Json<RepriceParams>>,
) -> Result<Json<RepriceOutcome>, OpError> {
    let client = state.admin_client()?;
    let percent = body.map_or(0.0, |Json(params)| params.percent);
    tracing::info!(request_id = %req_id.0, percent, "reprice requested");

    let outcome = shopkeeper_engine::reprice(&client, &state.sweep_options(), percent)
        .await
        .map_err(|e| OpError::failed(&e))?;
    Ok(Json(outcome))
}
