//! Feature modules implementing the OFN API
//!
//! # Features
//!
//! - **offers**: payload ingestion (`POST /normalize`) and the retained offer
//!   snapshot (`GET /offers`)

pub mod offers;

use axum::Router;
use ofn_ingest::{DedupeStore, Normalizer};
use std::sync::Arc;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Schema registry used to map payloads onto offers
    pub normalizer: Arc<Normalizer>,
    /// Identity-keyed store of recently accepted offers
    pub store: Arc<DedupeStore>,
}

impl FeatureState {
    pub fn new(normalizer: Normalizer, store: Arc<DedupeStore>) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            store,
        }
    }
}

/// Creates the router with all feature routes mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(offers::offers_routes().with_state(state))
}
