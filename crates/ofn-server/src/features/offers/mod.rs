//! Offers feature module
//!
//! Normalizes incoming provider payloads, suppresses offers already seen
//! within the retention window, and exposes the retained set.

pub mod routes;


pub use routes::offers_routes;
