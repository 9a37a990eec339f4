//! Published analyses keyed by id.
//!
//! A result becomes visible only once it is complete: `publish` inserts the
//! finished `AnalysisResult` under a fresh id in one step, so concurrent
//! analyses never observe or overwrite each other's output.

use dashmap::DashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::AnalysisResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnalysisId(u64);

impl AnalysisId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "analysis-{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct AnalysisStore {
    results: DashMap<AnalysisId, Arc<AnalysisResult>>,
    next_id: AtomicU64,
    latest: AtomicU64,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a finished analysis and return its id. Ids start at 1.
    pub fn publish(&self, result: AnalysisResult) -> AnalysisId {
        let id = AnalysisId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.results.insert(id, Arc::new(result));
        self.latest.fetch_max(id.0, Ordering::AcqRel);
        id
    }

    pub fn get(&self, id: AnalysisId) -> Option<Arc<AnalysisResult>> {
        self.results.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// The most recently published analysis that has not been removed.
    pub fn latest(&self) -> Option<(AnalysisId, Arc<AnalysisResult>)> {
        let newest = self.latest.load(Ordering::Acquire);
        if let Some(result) = self.get(AnalysisId(newest)) {
            return Some((AnalysisId(newest), result));
        }
        self.results
            .iter()
            .max_by_key(|entry| *entry.key())
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
    }

    pub fn remove(&self, id: AnalysisId) -> Option<Arc<AnalysisResult>> {
        self.results.remove(&id).map(|(_, result)| result)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
