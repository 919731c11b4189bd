//! Canonical offer identity
//!
//! The identity is a deduplication fingerprint, not a security boundary.
//! It only has to make accidental collisions between distinct offers
//! negligible.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Render a departure time the way it contributes to the identity.
///
/// `None` renders as the empty string.
pub fn identity_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Compute the canonical identity of an offer.
///
/// The digest covers `provider_id`, `provider_ref`, `price` rounded to two
/// decimals and the RFC3339 UTC departure time. Every field is written with
/// a length prefix so that no field content can be read as a separator.
pub fn canonical_id(
    provider_id: &str,
    provider_ref: &str,
    price: f64,
    depart_at: Option<DateTime<Utc>>,
) -> String {
    let price = format!("{:.2}", price);
    let depart = identity_timestamp(depart_at);

    let mut hasher = Sha256::new();
    for field in [provider_id, provider_ref, price.as_str(), depart.as_str()] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }

    hex::encode(hasher.finalize())
}
