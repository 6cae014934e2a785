//! HTTP request aggregation
//!
//! Collects response times and status category counts per request URL.
//! Responses outside 2XX/4XX/5XX are counted as `Other` but never appear in
//! the finalized document.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::Aggregator;
use super::order_stats::{max, min, percentile};
use crate::app::models::{RequestRecord, StatusCategory};
use crate::constants::{RESPONSE_TIME_PERCENTILES, request_keys};

/// Response counts per status category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub success: u64,
    pub client_error: u64,
    pub server_error: u64,
    pub other: u64,
}

impl StatusCounts {
    /// Increment the counter for a category
    pub fn increment(&mut self, category: StatusCategory) {
        *self.slot(category) += 1;
    }

    /// Count for a category
    pub fn get(&self, category: StatusCategory) -> u64 {
        match category {
            StatusCategory::Success => self.success,
            StatusCategory::ClientError => self.client_error,
            StatusCategory::ServerError => self.server_error,
            StatusCategory::Other => self.other,
        }
    }

    /// Add another set of counts to this one
    pub fn add(&mut self, other: &StatusCounts) {
        self.success += other.success;
        self.client_error += other.client_error;
        self.server_error += other.server_error;
        self.other += other.other;
    }

    /// Document with exactly the reported categories, zero-filled
    fn to_document(self) -> Value {
        let document: Map<String, Value> = StatusCategory::REPORTED
            .iter()
            .map(|category| (category.label().to_string(), Value::from(self.get(*category))))
            .collect();
        Value::Object(document)
    }

    fn slot(&mut self, category: StatusCategory) -> &mut u64 {
        match category {
            StatusCategory::Success => &mut self.success,
            StatusCategory::ClientError => &mut self.client_error,
            StatusCategory::ServerError => &mut self.server_error,
            StatusCategory::Other => &mut self.other,
        }
    }
}

/// Running state for one request URL
#[derive(Debug, Clone, Default)]
struct RouteStats {
    response_times: Vec<u64>,
    status_counts: StatusCounts,
}

impl RouteStats {
    fn response_time_document(&mut self) -> Value {
        self.response_times.sort_unstable();
        let sorted = &self.response_times;

        let mut document = Map::new();
        document.insert(
            request_keys::MIN.to_string(),
            Value::from(min(sorted).unwrap_or(0)),
        );
        for (p, key) in RESPONSE_TIME_PERCENTILES {
            document.insert(
                key.to_string(),
                Value::from(percentile(sorted, *p).unwrap_or(0)),
            );
        }
        document.insert(
            request_keys::MAX.to_string(),
            Value::from(max(sorted).unwrap_or(0)),
        );

        Value::Object(document)
    }
}

/// Per-route latency and status statistics in first-seen order
#[derive(Debug, Clone, Default)]
pub struct RequestAggregator {
    routes: IndexMap<String, RouteStats>,
    observed: usize,
}

impl RequestAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct request URLs seen
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Status counts for a route, if it was observed
    pub fn status_counts(&self, url: &str) -> Option<StatusCounts> {
        self.routes.get(url).map(|route| route.status_counts)
    }

    /// Responses across all routes that fell outside 2XX/4XX/5XX
    pub fn other_count(&self) -> u64 {
        self.routes
            .values()
            .map(|route| route.status_counts.other)
            .sum()
    }
}

impl Aggregator for RequestAggregator {
    type Record = RequestRecord;

    fn observe(&mut self, record: RequestRecord) {
        let category = record.status_category();
        let route = self.routes.entry(record.url).or_default();

        route.response_times.push(record.response_time_ms);
        route.status_counts.increment(category);
        self.observed += 1;
    }

    fn finalize(&mut self) -> Value {
        let mut document = Map::new();

        for (url, route) in self.routes.iter_mut() {
            let mut route_document = Map::new();
            route_document.insert(
                request_keys::RESPONSE_TIMES.to_string(),
                route.response_time_document(),
            );
            route_document.insert(
                request_keys::STATUS_CODES.to_string(),
                route.status_counts.to_document(),
            );

            document.insert(url.clone(), Value::Object(route_document));
        }

        let other = self.other_count();
        if other > 0 {
            info!(
                "{} request(s) with status outside 2XX/4XX/5XX are counted but not reported",
                other
            );
        }
        debug!(
            "Finalized {} routes from {} requests",
            self.routes.len(),
            self.observed
        );

        Value::Object(document)
    }

    fn observed(&self) -> usize {
        self.observed
    }

    fn merge(&mut self, other: Self) {
        for (url, incoming) in other.routes {
            let route = self.routes.entry(url).or_default();
            route.response_times.extend(incoming.response_times);
            route.status_counts.add(&incoming.status_counts);
        }
        self.observed += other.observed;
    }
}
