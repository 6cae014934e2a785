//! APM metric aggregation
//!
//! Keeps every observed value per metric name. Median needs the full sorted
//! sample, so running min/max/sum alone would not be enough.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::Aggregator;
use super::order_stats::DistributionSummary;
use crate::app::models::MetricRecord;
use crate::constants::metric_keys;

/// Per-metric value samples in first-seen order
#[derive(Debug, Clone, Default)]
pub struct MetricAggregator {
    samples: IndexMap<String, Vec<f64>>,
    observed: usize,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct metric names seen
    pub fn metric_count(&self) -> usize {
        self.samples.len()
    }

    /// Summary for a single metric, if it was observed
    pub fn summary(&mut self, metric: &str) -> Option<DistributionSummary> {
        self.samples.get_mut(metric).map(|values| {
            values.sort_by(f64::total_cmp);
            DistributionSummary::from_sorted(values)
        })
    }
}

impl Aggregator for MetricAggregator {
    type Record = MetricRecord;

    fn observe(&mut self, record: MetricRecord) {
        self.samples.entry(record.metric).or_default().push(record.value);
        self.observed += 1;
    }

    fn finalize(&mut self) -> Value {
        let mut document = Map::new();

        for (metric, values) in self.samples.iter_mut() {
            values.sort_by(f64::total_cmp);
            let summary = DistributionSummary::from_sorted(values);

            let mut stats = Map::new();
            stats.insert(metric_keys::MINIMUM.to_string(), Value::from(summary.minimum));
            stats.insert(metric_keys::MEDIAN.to_string(), Value::from(summary.median));
            stats.insert(metric_keys::AVERAGE.to_string(), Value::from(summary.average));
            stats.insert(metric_keys::MAX.to_string(), Value::from(summary.maximum));

            document.insert(metric.clone(), Value::Object(stats));
        }

        debug!(
            "Finalized {} metrics from {} samples",
            self.samples.len(),
            self.observed
        );

        Value::Object(document)
    }

    fn observed(&self) -> usize {
        self.observed
    }

    fn merge(&mut self, other: Self) {
        for (metric, values) in other.samples {
            self.samples.entry(metric).or_default().extend(values);
        }
        self.observed += other.observed;
    }
}
