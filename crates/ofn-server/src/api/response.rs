//! API response types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ofn_common::Offer;
use ofn_ingest::Admission;
use serde::Serialize;

/// Body returned by `POST /normalize`
///
/// `201 Created` for an accepted offer, `200 OK` for a duplicate. The offer is
/// the record just normalized from the request in both cases.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub offer: Offer,
    #[serde(skip)]
    admission: Admission,
}

impl IngestResponse {
    pub fn new(admission: Admission, offer: Offer) -> Self {
        Self {
            status: admission.as_str(),
            offer,
            admission,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.admission {
            Admission::Accepted => StatusCode::CREATED,
            Admission::Duplicate => StatusCode::OK,
        }
    }
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
