//! Replay stored payloads through the normalizer and a dedupe store
//!
//! Used by the `ofn-ingest` binary to check captured provider traffic
//! offline.

use ofn_common::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::normalizer::Normalizer;
use crate::store::{Admission, DedupeStore};

/// What happened to one payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    /// File name plus line number when reading line-delimited input
    pub source: String,
    pub status: ReplayStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayStatus {
    Accepted,
    Duplicate,
    Rejected,
}

impl From<Admission> for ReplayStatus {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Accepted => ReplayStatus::Accepted,
            Admission::Duplicate => ReplayStatus::Duplicate,
        }
    }
}

/// Totals over a replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub accepted: usize,
    pub duplicate: usize,
    pub rejected: usize,
}

impl ReplaySummary {
    pub fn record(&mut self, outcome: &ReplayOutcome) {
        match outcome.status {
            ReplayStatus::Accepted => self.accepted += 1,
            ReplayStatus::Duplicate => self.duplicate += 1,
            ReplayStatus::Rejected => self.rejected += 1,
        }
    }
}

/// Replays payloads against one normalizer and one store.
pub struct Replayer<'a> {
    normalizer: &'a Normalizer,
    store: &'a DedupeStore,
}

impl<'a> Replayer<'a> {
    pub fn new(normalizer: &'a Normalizer, store: &'a DedupeStore) -> Self {
        Self { normalizer, store }
    }

    /// Decode, normalize and admit a single JSON document.
    pub fn replay_one(&self, source: impl Into<String>, text: &str) -> ReplayOutcome {
        let source = source.into();

        let raw: Value = match serde_json::from_str(text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = %source, "Skipping invalid JSON: {}", e);
                return ReplayOutcome::rejected(source, format!("invalid json: {}", e));
            },
        };

        match self.normalizer.normalize(&raw) {
            Ok(offer) => {
                let offer_id = offer.identity().to_string();
                let status = ReplayStatus::from(self.store.admit(offer));
                debug!(source = %source, offer_id = %offer_id, ?status, "Replayed payload");
                ReplayOutcome {
                    source,
                    status,
                    offer_id: Some(offer_id),
                    error: None,
                }
            },
            Err(e) => ReplayOutcome::rejected(source, format!("normalize error: {}", e)),
        }
    }

    /// Replay `text` as one document, or one document per non-blank line.
    pub fn replay_text(&self, source: &str, text: &str, lines: bool) -> Vec<ReplayOutcome> {
        if !lines {
            return vec![self.replay_one(source, text)];
        }

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| self.replay_one(format!("{}:{}", source, n + 1), line))
            .collect()
    }

    /// Replay a file, or stdin when `path` is `-`.
    ///
    /// Only reading the input can fail; bad payloads become rejected outcomes.
    pub fn replay_path(&self, path: &Path, lines: bool) -> Result<Vec<ReplayOutcome>> {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(path)?
        };

        Ok(self.replay_text(&path.display().to_string(), &text, lines))
    }
}

impl ReplayOutcome {
    fn rejected(source: String, error: String) -> Self {
        Self {
            source,
            status: ReplayStatus::Rejected,
            offer_id: None,
            error: Some(error),
        }
    }
}
