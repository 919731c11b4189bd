//! Common types used across OFN

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::identity::canonical_id;

// ============================================================================
// Canonical Offer
// ============================================================================

/// Canonical offer record.
///
/// Every provider payload is mapped onto this shape. The record is immutable
/// once built: the only way to obtain one is [`OfferDraft::into_offer`], which
/// derives `identity` from the draft's fields.
///
/// The serialized field names (`offer_id`, `provider_id`, ...) are the wire
/// contract of the ingestion API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    #[serde(rename = "offer_id")]
    identity: String,
    provider_id: String,
    provider_ref: String,
    price: f64,
    currency: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    fare_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    depart_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Value::is_null")]
    raw: Value,
    created_at: DateTime<Utc>,
}

impl Offer {
    /// Deduplication key
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Schema that produced the record (`"ProviderA"`, `"generic"`, ...)
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Provider's native identifier, empty when unknown
    pub fn provider_ref(&self) -> &str {
        &self.provider_ref
    }

    /// Amount in major currency units
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn fare_class(&self) -> &str {
        &self.fare_class
    }

    pub fn depart_at(&self) -> Option<DateTime<Utc>> {
        self.depart_at
    }

    pub fn return_at(&self) -> Option<DateTime<Utc>> {
        self.return_at
    }

    /// Original payload, kept for traceability only
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Extraction time; drives expiry, never identity
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields extracted from a provider payload before the identity is derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferDraft {
    pub provider_id: String,
    pub provider_ref: String,
    pub price: f64,
    pub currency: String,
    pub fare_class: String,
    pub depart_at: Option<DateTime<Utc>>,
    pub return_at: Option<DateTime<Utc>>,
}

impl OfferDraft {
    /// Seal the draft into an [`Offer`], computing its identity.
    pub fn into_offer(self, raw: Value, created_at: DateTime<Utc>) -> Offer {
        let identity = canonical_id(
            &self.provider_id,
            &self.provider_ref,
            self.price,
            self.depart_at,
        );

        Offer {
            identity,
            provider_id: self.provider_id,
            provider_ref: self.provider_ref,
            price: self.price,
            currency: self.currency,
            fare_class: self.fare_class,
            depart_at: self.depart_at,
            return_at: self.return_at,
            raw,
            created_at,
        }
    }
}
