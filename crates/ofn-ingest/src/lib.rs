//! OFN Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! The ingestion core: provider schema normalization and time-bounded
//! deduplication of canonical offers.
//!
//! # Pipeline
//!
//! ```text
//! raw payload → Normalizer (schema detection → field extraction → identity)
//!             → Offer → DedupeStore::admit → accepted | duplicate
//! ```
//!
//! # Example
//!
//! ```
//! use ofn_ingest::normalizer::Normalizer;
//! use ofn_ingest::store::{Admission, DedupeStore};
//! use serde_json::json;
//!
//! let normalizer = Normalizer::default();
//! let store = DedupeStore::default();
//!
//! let payload = json!({"price": "19.99", "currency": "EUR"});
//! let offer = normalizer.normalize(&payload)?;
//! assert_eq!(store.admit(offer.clone()), Admission::Accepted);
//! assert_eq!(store.admit(offer), Admission::Duplicate);
//! # Ok::<(), ofn_common::OfnError>(())
//! ```

pub mod normalizer;
pub mod replay;
pub mod store;

pub use normalizer::{normalize, Normalizer, ProviderSchema};
pub use store::{Admission, DedupeStore, Janitor, StoreConfig};
