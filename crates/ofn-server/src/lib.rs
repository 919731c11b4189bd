//! OFN Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP ingestion boundary for the offer normalizer.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness probe, returns `ok`
//! - `POST /normalize` - normalize one provider payload; `201` with
//!   `{"status":"accepted","offer":...}` for a new offer, `200` with
//!   `"status":"duplicate"` when the offer is already retained
//! - `GET /offers` - JSON array of all retained offers
//!
//! # Example
//!
//! ```no_run
//! use ofn_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use error::{AppError, AppResult};
