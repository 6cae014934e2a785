//! Test utilities for log line parsing
//!
//! This module provides sample log lines shared by the parser test modules.


pub const METRIC_LINE: &str =
    "timestamp=2024-02-24T16:22:15Z metric=cpu_usage_percent host=webserver1 value=72";

pub const EVENT_LINE: &str = "timestamp=2024-02-24T16:22:20Z level=INFO message=\"Scheduled maintenance starting\" host=webserver1";

pub const REQUEST_LINE: &str = "timestamp=2024-02-24T16:22:25Z request_method=POST request_url=\"/api/update\" response_status=202 response_time_ms=200 host=webserver1";

pub const GARBAGE_LINE: &str = "Invalid log line that should be ignored";

/// Build a request line with the given status and latency
pub fn request_line(url: &str, status: i32, response_time_ms: i64) -> String {
    format!(
        "timestamp=2024-02-24T16:22:25Z request_method=GET request_url=\"{}\" response_status={} response_time_ms={} host=webserver1",
        url, status, response_time_ms
    )
}
