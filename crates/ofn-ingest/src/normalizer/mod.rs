//! Schema normalization
//!
//! Maps heterogeneous provider payloads onto the canonical [`Offer`].
//!
//! Dispatch is an ordered list of [`ProviderSchema`]s; the first schema whose
//! [`matches`](ProviderSchema::matches) returns true extracts the record. New
//! provider shapes are added with [`Normalizer::register`] without touching
//! the existing ones.
//!
//! Extraction never fails on bad field values: missing or mistyped fields
//! become `0.0`, `""` or an unknown timestamp. The only error is a payload
//! no schema recognises.

pub mod payload;
pub mod schemas;

use chrono::Utc;
use ofn_common::{Offer, OfferDraft, OfnError, Result};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use self::payload::Payload;
use self::schemas::{GenericSchema, ProviderASchema, ProviderBSchema};

/// One provider payload shape
pub trait ProviderSchema: Send + Sync {
    /// Identifier stamped on every record this schema produces
    fn provider_id(&self) -> &str;

    /// Whether this schema should handle the payload
    fn matches(&self, payload: &Payload) -> bool;

    /// Extract the canonical fields. Must be total over any payload.
    fn extract(&self, payload: &Payload) -> OfferDraft;
}

/// Ordered schema registry
pub struct Normalizer {
    schemas: Vec<Box<dyn ProviderSchema>>,
}

impl Normalizer {
    /// Registry with no schemas; every payload is unrecognized.
    pub fn new() -> Self {
        Self {
            schemas: Vec::new(),
        }
    }

    /// ProviderA, then ProviderB, then the generic fallback.
    pub fn with_builtin_schemas() -> Self {
        let mut normalizer = Self::new();
        normalizer.register(ProviderASchema);
        normalizer.register(ProviderBSchema);
        normalizer.register(GenericSchema);
        normalizer
    }

    /// Append a schema with the lowest priority so far.
    pub fn register(&mut self, schema: impl ProviderSchema + 'static) -> &mut Self {
        self.schemas.push(Box::new(schema));
        self
    }

    /// Registered provider ids in dispatch order
    pub fn schema_ids(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.provider_id()).collect()
    }

    /// First schema that accepts the payload
    pub fn detect(&self, payload: &Payload) -> Option<&dyn ProviderSchema> {
        self.schemas
            .iter()
            .find(|schema| schema.matches(payload))
            .map(|schema| schema.as_ref())
    }

    /// Normalize a decoded payload into a canonical offer.
    ///
    /// Only JSON objects can match a schema; anything else is reported as
    /// [`OfnError::UnrecognizedSchema`].
    pub fn normalize(&self, raw: &Value) -> Result<Offer> {
        let Some(payload) = raw.as_object() else {
            debug!("Rejecting non-object payload");
            return Err(OfnError::UnrecognizedSchema);
        };

        let Some(schema) = self.detect(payload) else {
            debug!(fields = payload.len(), "No schema matched payload");
            return Err(OfnError::UnrecognizedSchema);
        };

        let offer = schema.extract(payload).into_offer(raw.clone(), Utc::now());

        debug!(
            schema = schema.provider_id(),
            offer_id = %offer.identity(),
            provider_ref = %offer.provider_ref(),
            "Normalized payload"
        );

        Ok(offer)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_builtin_schemas()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("schemas", &self.schema_ids())
            .finish()
    }
}

/// Normalize with the built-in schemas.
pub fn normalize(raw: &Value) -> Result<Offer> {
    static BUILTIN: OnceLock<Normalizer> = OnceLock::new();
    BUILTIN.get_or_init(Normalizer::with_builtin_schemas).normalize(raw)
}
