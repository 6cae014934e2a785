//! Application event aggregation (count per severity level)

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::Aggregator;
use crate::app::models::EventRecord;

/// Event counts per level, in first-seen order
///
/// Levels are case-sensitive: `INFO` and `info` are counted separately.
#[derive(Debug, Clone, Default)]
pub struct EventAggregator {
    counts: IndexMap<String, u64>,
    observed: usize,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a level, zero if never seen
    pub fn count(&self, level: &str) -> u64 {
        self.counts.get(level).copied().unwrap_or(0)
    }
}

impl Aggregator for EventAggregator {
    type Record = EventRecord;

    fn observe(&mut self, record: EventRecord) {
        *self.counts.entry(record.level).or_insert(0) += 1;
        self.observed += 1;
    }

    fn finalize(&mut self) -> Value {
        debug!(
            "Finalized {} event levels from {} events",
            self.counts.len(),
            self.observed
        );

        let document: Map<String, Value> = self
            .counts
            .iter()
            .map(|(level, count)| (level.clone(), Value::from(*count)))
            .collect();

        Value::Object(document)
    }

    fn observed(&self) -> usize {
        self.observed
    }

    fn merge(&mut self, other: Self) {
        for (level, count) in other.counts {
            *self.counts.entry(level).or_insert(0) += count;
        }
        self.observed += other.observed;
    }
}
