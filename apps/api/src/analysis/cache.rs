//! Recommendation cache: memoizes completed analyses under a fingerprint of
//! their input, with TTL expiry, an LRU size bound, and single-flight
//! semantics: concurrent callers racing on one fingerprint share a single
//! computation and receive the same result.
//!
//! Only `source: ai` results are stored. Fallback results pass through
//! uncached so a transient outage cannot poison the cache for a TTL window.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lru::LruCache;
use tokio::sync::{Mutex as AsyncMutex, OnceCell};
use tokio::time::Instant;

use crate::models::analysis::{AnalysisResult, ResultSource};
use crate::models::profile::StudentProfile;

/// The analysis operation kinds, used to segregate cache keyspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CareerRecommendation,
    Riasec,
    LearningPath,
    Chat,
}

impl Operation {
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::CareerRecommendation => "career-recommendation",
            Operation::Riasec => "riasec",
            Operation::LearningPath => "learning-path",
            Operation::Chat => "chat",
        }
    }
}

/// Deterministic cache key: the owning student (when known) plus a stable
/// hash over the operation kind and every meaningful input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    owner: Option<String>,
    hash: u64,
}

impl Fingerprint {
    /// Fingerprint of a profile-driven operation. Hashes every mutable
    /// profile field in declaration order so any edit changes the key.
    pub fn of_profile(op: Operation, profile: &StudentProfile) -> Self {
        let mut h = DefaultHasher::new();
        op.tag().hash(&mut h);
        profile.student_id.hash(&mut h);
        profile.education_level.hash(&mut h);
        profile.institution.hash(&mut h);
        profile.cgpa.map(f32::to_bits).hash(&mut h);
        profile.percentage.map(f32::to_bits).hash(&mut h);
        profile.riasec.hash(&mut h);
        profile.interests.hash(&mut h);
        profile.preferred_locations.hash(&mut h);
        profile.work_preference.hash(&mut h);
        profile.expected_salary.hash(&mut h);
        profile.age.hash(&mut h);
        profile.career_goal.hash(&mut h);
        Self {
            owner: profile.student_id.clone(),
            hash: h.finish(),
        }
    }

    /// Fingerprint of a free-text-responses operation (RIASEC assessment).
    pub fn of_responses(op: Operation, student_id: Option<&str>, responses: &[String]) -> Self {
        let mut h = DefaultHasher::new();
        op.tag().hash(&mut h);
        student_id.hash(&mut h);
        responses.hash(&mut h);
        Self {
            owner: student_id.map(str::to_string),
            hash: h.finish(),
        }
    }

    /// Fingerprint of a single free-text input (chat, ad-hoc queries).
    pub fn of_text(op: Operation, text: &str) -> Self {
        let mut h = DefaultHasher::new();
        op.tag().hash(&mut h);
        text.trim().hash(&mut h);
        Self {
            owner: None,
            hash: h.finish(),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

struct ReadyEntry {
    result: AnalysisResult,
    inserted_at: Instant,
}

/// TTL + LRU-bounded memoization with per-key single-flight.
///
/// Ready values live in an `LruCache` behind a sync mutex (locked only for
/// map operations, never across an await). In-flight computations are
/// deduplicated through shared `OnceCell`s: the first caller runs the init
/// future, every concurrent caller awaits the same cell.
pub struct RecommendationCache {
    ttl: Duration,
    ready: Mutex<LruCache<Fingerprint, ReadyEntry>>,
    in_flight: AsyncMutex<HashMap<Fingerprint, Arc<OnceCell<AnalysisResult>>>>,
}

impl RecommendationCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("clamped to at least 1");
        Self {
            ttl,
            ready: Mutex::new(LruCache::new(capacity)),
            in_flight: AsyncMutex::new(HashMap::new()),
        }
    }

    /// Returns the cached result for `key`, or runs `compute` to produce one.
    ///
    /// At most one `compute` runs per key at a time; concurrent callers for
    /// the same key all receive the value of that single computation. The
    /// computation decides cacheability by its result's source tag: `ai`
    /// results are stored, `fallback` results are not.
    pub async fn get_or_compute<F, Fut>(&self, key: Fingerprint, compute: F) -> AnalysisResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AnalysisResult>,
    {
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let cell = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let store_key = key.clone();
        let value = cell
            .get_or_init(|| async move {
                let result = compute().await;
                if result.source == ResultSource::Ai {
                    self.ready.lock().expect("cache mutex poisoned").put(
                        store_key,
                        ReadyEntry {
                            result: result.clone(),
                            inserted_at: Instant::now(),
                        },
                    );
                }
                result
            })
            .await
            .clone();

        // Retire the flight record so a later miss starts fresh. Guard on
        // pointer identity in case another caller already replaced it.
        let mut in_flight = self.in_flight.lock().await;
        if let Some(current) = in_flight.get(&key) {
            if Arc::ptr_eq(current, &cell) {
                in_flight.remove(&key);
            }
        }

        value
    }

    /// Fresh (non-expired) cached value, dropping the entry if stale.
    fn lookup(&self, key: &Fingerprint) -> Option<AnalysisResult> {
        let mut ready = self.ready.lock().expect("cache mutex poisoned");
        if let Some(entry) = ready.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.result.clone());
            }
        } else {
            return None;
        }
        ready.pop(key);
        None
    }

    /// Drops every entry owned by `student_id`. Called on profile mutation
    /// (e.g. a fresh RIASEC submission) before the next read.
    pub fn invalidate_student(&self, student_id: &str) {
        let mut ready = self.ready.lock().expect("cache mutex poisoned");
        let stale: Vec<Fingerprint> = ready
            .iter()
            .filter(|(k, _)| k.owner() == Some(student_id))
            .map(|(k, _)| k.clone())
            .collect();
        for key in stale {
            ready.pop(&key);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ready.lock().expect("cache mutex poisoned").len()
    }
}
