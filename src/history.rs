use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};

use crate::error::EngineError;
use crate::types::InteractionRecord;

/// Read-only seam over the external interaction-history store.
///
/// The engine treats this collaborator as best-effort: errors and timeouts
/// degrade classification to age-only, they never fail a request.
pub trait InteractionStore: Send + Sync {
    /// Most recent interactions for a student, oldest first, at most `limit`.
    fn recent_interactions<'a>(
        &'a self,
        student_id: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<InteractionRecord>, EngineError>>;
}

/// In-process store backed by a plain map. Useful for tests and for callers
/// that snapshot history themselves.
#[derive(Debug, Default)]
pub struct InMemoryInteractionStore {
    records: HashMap<String, Vec<InteractionRecord>>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, student_id: impl Into<String>, records: Vec<InteractionRecord>) {
        self.records.insert(student_id.into(), records);
    }
}

impl InteractionStore for InMemoryInteractionStore {
    fn recent_interactions<'a>(
        &'a self,
        student_id: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<InteractionRecord>, EngineError>> {
        async move {
            let records = self.records.get(student_id).cloned().unwrap_or_default();
            let start = records.len().saturating_sub(limit);
            Ok(records[start..].to_vec())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: i64) -> InteractionRecord {
        InteractionRecord {
            is_correct: true,
            response_time_ms: 2000,
            timestamp: ts,
        }
    }

    #[tokio::test]
    async fn test_unknown_student_yields_empty() {
        let store = InMemoryInteractionStore::new();
        let records = store.recent_interactions("nobody", 10).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_limit_keeps_most_recent() {
        let mut store = InMemoryInteractionStore::new();
        store.insert("s1", (0..20).map(record).collect());
        let records = store.recent_interactions("s1", 5).await.unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].timestamp, 15);
        assert_eq!(records[4].timestamp, 19);
    }
}
