//! Streaming aggregation of typed log records
//!
//! Each record category has its own aggregator that folds records into
//! running per-group state and, once all input is consumed, finalizes that
//! state into an insertion-ordered JSON document.
//!
//! # Architecture
//!
//! - [`metric`] - Per-metric value distributions (minimum/median/average/max)
//! - [`event`] - Per-level event counts
//! - [`request`] - Per-route latency percentiles and status category counts
//! - [`order_stats`] - Shared median and nearest-rank percentile functions
//!
//! # Ordering
//!
//! Group keys appear in finalized documents in the order they were first
//! observed. Samples inside a group stay unordered until finalization sorts
//! them, so the finalized statistics only depend on the multiset of observed
//! values, never on arrival order.
//!
//! # Partitioned aggregation
//!
//! Aggregators of the same category can be combined with [`Aggregator::merge`]
//! (sample union and count sum per group). Finalize only after every partial
//! aggregator has been merged.
//!
//! # Example Usage
//!
//! ```rust
//! use log_aggregator::app::services::aggregator::{Aggregator, EventAggregator};
//! use log_aggregator::app::services::log_parser::ClassificationChain;
//! use log_aggregator::LogRecord;
//!
//! let chain = ClassificationChain::new();
//! let mut events = EventAggregator::new();
//!
//! let line = "timestamp=2024-02-24T16:22:20Z level=INFO message=\"up\" host=web1";
//! if let Some(LogRecord::Event(record)) = chain.classify(line).into_record() {
//!     events.observe(record);
//! }
//!
//! assert_eq!(events.finalize().to_string(), r#"{"INFO":1}"#);
//! ```

pub mod event;
pub mod metric;
pub mod order_stats;
pub mod request;

#[cfg(test)]
pub mod tests;

use serde_json::Value;

// Re-export main types for easy access
pub use event::EventAggregator;
pub use metric::MetricAggregator;
pub use order_stats::{DistributionSummary, median, percentile};
pub use request::{RequestAggregator, StatusCounts};

/// Running aggregation over one record category
pub trait Aggregator {
    /// Record type this aggregator consumes
    type Record;

    /// Fold one record into the running state
    fn observe(&mut self, record: Self::Record);

    /// Produce the result document for everything observed so far
    ///
    /// Sorts the collected samples in place; calling it again without new
    /// observations yields the same document.
    fn finalize(&mut self) -> Value;

    /// Number of records observed
    fn observed(&self) -> usize;

    /// Fold another aggregator's state into this one
    ///
    /// Groups already present keep their position; groups only present in
    /// `other` are appended in `other`'s order.
    fn merge(&mut self, other: Self)
    where
        Self: Sized;

    /// Whether no record has been observed yet
    fn is_empty(&self) -> bool {
        self.observed() == 0
    }
}
