//! Offer routes

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use crate::api::response::IngestResponse;
use crate::error::{AppError, AppResult};
use crate::features::FeatureState;

/// Create offer routes
pub fn offers_routes() -> Router<FeatureState> {
    Router::new()
        .route("/normalize", post(normalize_offer))
        .route("/offers", get(list_offers))
}

/// Normalize one provider payload and record it
///
/// POST /normalize
///
/// The body must be a JSON object; no particular `Content-Type` is required.
/// Acceptance is decided with a single atomic insert-if-absent.
async fn normalize_offer(State(state): State<FeatureState>, body: Bytes) -> AppResult<Response> {
    let raw: Value =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidJson(e.to_string()))?;
    if !raw.is_object() {
        return Err(AppError::InvalidJson("expected a JSON object".to_string()));
    }

    let offer = state.normalizer.normalize(&raw)?;
    let admission = state.store.admit(offer.clone());

    info!(
        offer_id = %offer.identity(),
        provider = %offer.provider_id(),
        status = admission.as_str(),
        "Offer ingested"
    );

    Ok(IngestResponse::new(admission, offer).into_response())
}

/// Snapshot of all retained offers
///
/// GET /offers
async fn list_offers(State(state): State<FeatureState>) -> impl IntoResponse {
    Json(state.store.list())
}
