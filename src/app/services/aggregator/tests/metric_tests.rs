//! Tests for APM metric aggregation

use super::*;
use crate::app::models::LogRecord;
use crate::app::services::aggregator::{Aggregator, MetricAggregator};
use crate::app::services::log_parser::ClassificationChain;
use serde_json::json;

#[test]
fn test_metric_single_sample() {
    let mut aggregator = MetricAggregator::new();
    aggregator.observe(metric("cpu_usage_percent", 72.0));

    assert_eq!(
        aggregator.finalize(),
        json!({
            "cpu_usage_percent": {"minimum": 72.0, "median": 72.0, "average": 72.0, "max": 72.0}
        })
    );
}

#[test]
fn test_metric_statistics_over_unsorted_sample() {
    let mut aggregator = MetricAggregator::new();
    for value in [80.0, 60.0, 70.0] {
        aggregator.observe(metric("cpu", value));
    }
    for value in [40.0, 30.0] {
        aggregator.observe(metric("memory", value));
    }

    let document = aggregator.finalize();
    assert_eq!(document["cpu"]["minimum"], json!(60.0));
    assert_eq!(document["cpu"]["median"], json!(70.0));
    assert_eq!(document["cpu"]["average"], json!(70.0));
    assert_eq!(document["cpu"]["max"], json!(80.0));

    assert_eq!(document["memory"]["median"], json!(35.0));
    assert_eq!(document["memory"]["average"], json!(35.0));
}

#[test]
fn test_metric_output_key_order() {
    let mut aggregator = MetricAggregator::new();
    aggregator.observe(metric("z_metric", 1.0));
    aggregator.observe(metric("a_metric", 2.0));
    aggregator.observe(metric("z_metric", 3.0));

    let document = aggregator.finalize();
    let metrics: Vec<&String> = document.as_object().unwrap().keys().collect();
    assert_eq!(metrics, vec!["z_metric", "a_metric"]);

    let stat_keys: Vec<&String> = document["z_metric"].as_object().unwrap().keys().collect();
    assert_eq!(stat_keys, vec!["minimum", "median", "average", "max"]);
}

#[test]
fn test_metric_empty_aggregator() {
    let mut aggregator = MetricAggregator::new();

    assert!(aggregator.is_empty());
    assert_eq!(aggregator.finalize(), json!({}));
}

#[test]
fn test_metric_order_independence() {
    let values = [5.5, -1.0, 12.25, 3.0, 3.0, 100.0];

    let mut forward = MetricAggregator::new();
    let mut reversed = MetricAggregator::new();
    for value in values {
        forward.observe(metric("latency", value));
    }
    for value in values.iter().rev() {
        reversed.observe(metric("latency", *value));
    }

    assert_eq!(forward.finalize(), reversed.finalize());
}

#[test]
fn test_metric_finalize_is_repeatable() {
    let mut aggregator = MetricAggregator::new();
    aggregator.observe(metric("cpu", 3.0));
    aggregator.observe(metric("cpu", 1.0));

    let first = aggregator.finalize();
    let second = aggregator.finalize();
    assert_eq!(first, second);
    assert_eq!(aggregator.observed(), 2);
}

#[test]
fn test_metric_summary_lookup() {
    let mut aggregator = MetricAggregator::new();
    aggregator.observe(metric("cpu", 4.0));
    aggregator.observe(metric("cpu", 2.0));

    let summary = aggregator.summary("cpu").unwrap();
    assert_eq!(summary.minimum, 2.0);
    assert_eq!(summary.median, 3.0);
    assert!(aggregator.summary("disk").is_none());
    assert_eq!(aggregator.metric_count(), 1);
}

#[test]
fn test_metric_merge_matches_single_pass() {
    let records = [("cpu", 10.0), ("mem", 1.0), ("cpu", 30.0), ("disk", 7.0), ("cpu", 20.0)];

    let mut single = MetricAggregator::new();
    for (name, value) in records {
        single.observe(metric(name, value));
    }

    let mut left = MetricAggregator::new();
    let mut right = MetricAggregator::new();
    for (i, (name, value)) in records.into_iter().enumerate() {
        if i % 2 == 0 {
            left.observe(metric(name, value));
        } else {
            right.observe(metric(name, value));
        }
    }
    left.merge(right);

    assert_eq!(left.observed(), 5);
    assert_eq!(left.finalize(), single.finalize());
}

#[test]
fn test_metric_extreme_values_finalize_to_numbers() {
    let chain = ClassificationChain::new();
    let mut aggregator = MetricAggregator::new();

    for value in ["1.5e308", "1.7e308"] {
        let line = format!("timestamp=2024-02-24T16:22:15Z metric=big host=h value={}", value);
        let Some(LogRecord::Metric(record)) = chain.classify(&line).into_record() else {
            panic!("expected metric record for {}", value);
        };
        aggregator.observe(record);
    }

    let document = aggregator.finalize();
    for key in ["minimum", "median", "average", "max"] {
        assert!(
            document["big"][key].is_f64(),
            "{} should be a number, got {}",
            key,
            document["big"][key]
        );
    }
}
