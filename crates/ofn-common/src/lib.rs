//! OFN Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, identity derivation, and error handling for the offer
//! normalization workspace.
//!
//! # Overview
//!
//! - **Types**: the canonical [`Offer`](types::Offer) every provider payload maps to
//! - **Identity**: the deterministic fingerprint used as the deduplication key
//! - **Error Handling**: [`OfnError`] and the crate-wide [`Result`] alias
//! - **Logging**: tracing subscriber setup shared by the binaries
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ofn_common::types::OfferDraft;
//!
//! let draft = OfferDraft {
//!     provider_id: "generic".to_string(),
//!     price: 42.0,
//!     currency: "EUR".to_string(),
//!     ..OfferDraft::default()
//! };
//! let offer = draft.into_offer(serde_json::Value::Null, Utc::now());
//! assert_eq!(offer.identity().len(), 64);
//! ```

pub mod error;
pub mod identity;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{OfnError, Result};
pub use identity::canonical_id;
pub use types::{Offer, OfferDraft};
