//! In-memory analysis cache keyed by content hash
//!
//! The key covers everything the analysis depends on: the referential
//! version, the scoring policy version, and the canonicalized responses.
//! Timestamps on the responses are excluded so re-submitting the same
//! answers hits the cache. Entries expire after a fixed TTL.

use crate::scoring::AnalysisResult;
use crate::session::UserResponses;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

const CACHE_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct CacheEntry {
    result: AnalysisResult,
    inserted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, CacheEntry>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content key over referential version, policy version, and the
    /// responses in canonical (sorted) form.
    pub fn cache_key(
        referential_version: &str,
        policy_version: &str,
        responses: &UserResponses,
    ) -> String {
        let likert: BTreeMap<&String, &u8> = responses.likert.iter().collect();
        let open: BTreeMap<&String, &String> = responses.open.iter().collect();
        let multi: BTreeMap<&String, &Vec<String>> = responses.multi_choice.iter().collect();

        let mut hasher = Sha256::new();
        hasher.update(referential_version.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(policy_version.as_bytes());
        for (id, rating) in likert {
            hasher.update(b"\x1fL");
            hasher.update(id.as_bytes());
            hasher.update([*rating]);
        }
        for (id, text) in open {
            hasher.update(b"\x1fO");
            hasher.update(id.as_bytes());
            hasher.update(b"=");
            hasher.update(text.as_bytes());
        }
        for (id, selected) in multi {
            hasher.update(b"\x1fM");
            hasher.update(id.as_bytes());
            for option in selected {
                hasher.update(b"|");
                hasher.update(option.as_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<AnalysisResult> {
        let entry = self.entries.get(key)?;
        if Self::expired(entry, Utc::now()) {
            debug!("cache entry expired: {key}");
            return None;
        }
        Some(entry.result.clone())
    }

    pub fn put(&mut self, key: String, result: AnalysisResult) {
        self.entries.insert(
            key,
            CacheEntry {
                result,
                inserted_at: Utc::now(),
            },
        );
    }

    /// Drop expired entries, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !Self::expired(entry, now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expired(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at > Duration::hours(CACHE_TTL_HOURS)
    }
}
