//! Test utilities for record aggregation
//!
//! This module provides record constructors shared by the aggregator test
//! modules.

use chrono::{NaiveDate, NaiveDateTime};

use crate::app::models::{EventRecord, MetricRecord, RawFields, RequestRecord};

mod metric_tests;

pub fn test_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 24)
        .unwrap()
        .and_hms_opt(16, 22, 15)
        .unwrap()
}

pub fn metric(name: &str, value: f64) -> MetricRecord {
    MetricRecord {
        timestamp: test_timestamp(),
        host: "webserver1".to_string(),
        metric: name.to_string(),
        value,
        raw: RawFields::new(),
    }
}

pub fn event(level: &str) -> EventRecord {
    EventRecord {
        timestamp: test_timestamp(),
        host: "webserver1".to_string(),
        level: level.to_string(),
        message: "test message".to_string(),
        raw: RawFields::new(),
    }
}

pub fn request(url: &str, status: i32, response_time_ms: u64) -> RequestRecord {
    RequestRecord {
        timestamp: test_timestamp(),
        host: "webserver1".to_string(),
        method: "GET".to_string(),
        url: url.to_string(),
        status,
        response_time_ms,
        raw: RawFields::new(),
    }
}
