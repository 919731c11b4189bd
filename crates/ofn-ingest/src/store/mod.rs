//! In-memory offer deduplication store
//!
//! A process-lifetime map from offer identity to [`Offer`] with bounded
//! retention. Entries leave the map only through [`DedupeStore::purge_expired`],
//! normally driven once per sweep interval by a [`Janitor`].
//!
//! # Concurrency
//!
//! The map sits behind a `std::sync::RwLock`: `is_duplicate` and `list` share
//! the read lock, `add`, `admit` and purges take the write lock. Every
//! operation is synchronous and short.
//!
//! `is_duplicate` followed by `add` is not atomic. Two callers racing on the
//! same identity may both see "not a duplicate" and both insert; the second
//! insert simply overwrites the first. Callers that must report exactly one
//! acceptance per identity use [`DedupeStore::admit`], which checks and
//! inserts under a single write lock.

mod janitor;

pub use janitor::Janitor;

use chrono::{DateTime, Duration, Utc};
use ofn_common::Offer;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

/// Default retention window (10 minutes)
pub const DEFAULT_RETENTION_SECS: u64 = 600;

/// Default interval between expiry sweeps (1 minute)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Retention and sweep settings for a store and its janitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub retention: std::time::Duration,
    pub sweep_interval: std::time::Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retention: std::time::Duration::from_secs(DEFAULT_RETENTION_SECS),
            sweep_interval: std::time::Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

/// Outcome of [`DedupeStore::admit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The offer was not retained and has been stored
    Accepted,
    /// An offer with the same identity is already retained
    Duplicate,
}

impl Admission {
    pub fn as_str(self) -> &'static str {
        match self {
            Admission::Accepted => "accepted",
            Admission::Duplicate => "duplicate",
        }
    }
}

/// Identity-keyed offer store with time-based expiry
#[derive(Debug)]
pub struct DedupeStore {
    entries: RwLock<HashMap<String, Offer>>,
    retention: Duration,
}

impl DedupeStore {
    /// Create an empty store that retains offers for `retention`.
    pub fn new(retention: std::time::Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            retention: Duration::from_std(retention).unwrap_or(Duration::MAX),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    // Every mutation is a single insert or retain, so a poisoned map is still
    // consistent and can be used as is.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Offer>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Offer>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether an offer with the same identity is currently retained
    pub fn is_duplicate(&self, offer: &Offer) -> bool {
        self.read().contains_key(offer.identity())
    }

    /// Insert or overwrite the entry for `offer`'s identity.
    ///
    /// The stored record is replaced wholesale, including `created_at`, so
    /// re-adding an identity restarts its retention window.
    pub fn add(&self, offer: Offer) {
        trace!(offer_id = %offer.identity(), "Storing offer");
        self.write().insert(offer.identity().to_string(), offer);
    }

    /// Store `offer` unless its identity is already retained.
    ///
    /// An existing entry is left untouched, so duplicates do not extend it.
    pub fn admit(&self, offer: Offer) -> Admission {
        use std::collections::hash_map::Entry;

        match self.write().entry(offer.identity().to_string()) {
            Entry::Occupied(_) => Admission::Duplicate,
            Entry::Vacant(slot) => {
                slot.insert(offer);
                Admission::Accepted
            },
        }
    }

    /// Point-in-time snapshot of all retained offers, in no particular order
    pub fn list(&self) -> Vec<Offer> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every offer older than the retention window at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, offer| now.signed_duration_since(offer.created_at()) <= self.retention);
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Purged expired offers");
        }
        removed
    }
}

impl Default for DedupeStore {
    fn default() -> Self {
        Self::new(StoreConfig::default().retention)
    }
}
