//! Data models for log aggregation
//!
//! This module contains the typed records produced from raw log lines. The set
//! of record categories is closed: every line is either an APM metric, an
//! application event, an HTTP request record, or it is rejected.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw field mapping extracted from a single log line (field name -> raw value)
pub type RawFields = HashMap<String, String>;

// =============================================================================
// Record Categories
// =============================================================================

/// The three record categories a log line can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Application performance metric (`metric=... value=...`)
    Metric,
    /// Application event (`level=... message=...`)
    Event,
    /// HTTP request record (`request_method=... response_status=...`)
    Request,
}

impl RecordKind {
    /// Conventional category name used for output documents
    pub fn category_name(&self) -> &'static str {
        match self {
            RecordKind::Metric => "APM",
            RecordKind::Event => "application",
            RecordKind::Request => "request",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category_name())
    }
}

// =============================================================================
// Typed Records
// =============================================================================

/// APM metric sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub timestamp: NaiveDateTime,
    pub host: String,
    /// Metric name (e.g., "cpu_usage_percent")
    pub metric: String,
    /// Observed value, always finite
    pub value: f64,
    /// Fields the record was built from, kept for diagnostics only
    #[serde(skip)]
    pub raw: RawFields,
}

/// Application event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub timestamp: NaiveDateTime,
    pub host: String,
    /// Severity level exactly as written in the log (e.g., "INFO", "error")
    pub level: String,
    /// Message text with surrounding quotes removed
    pub message: String,
    #[serde(skip)]
    pub raw: RawFields,
}

/// HTTP request record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRecord {
    pub timestamp: NaiveDateTime,
    pub host: String,
    /// HTTP method (e.g., "GET")
    pub method: String,
    /// Request path with surrounding quotes removed; used as the grouping key
    pub url: String,
    /// HTTP response status code
    pub status: i32,
    /// Response latency in whole milliseconds
    pub response_time_ms: u64,
    #[serde(skip)]
    pub raw: RawFields,
}

impl RequestRecord {
    /// Bucket the response status into its status category
    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::from_status(self.status)
    }
}

/// A successfully parsed log line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    Metric(MetricRecord),
    Event(EventRecord),
    Request(RequestRecord),
}

impl LogRecord {
    /// Category this record belongs to
    pub fn kind(&self) -> RecordKind {
        match self {
            LogRecord::Metric(_) => RecordKind::Metric,
            LogRecord::Event(_) => RecordKind::Event,
            LogRecord::Request(_) => RecordKind::Request,
        }
    }

    /// Host that emitted the line
    pub fn host(&self) -> &str {
        match self {
            LogRecord::Metric(r) => &r.host,
            LogRecord::Event(r) => &r.host,
            LogRecord::Request(r) => &r.host,
        }
    }

    /// Timestamp of the line
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            LogRecord::Metric(r) => r.timestamp,
            LogRecord::Event(r) => r.timestamp,
            LogRecord::Request(r) => r.timestamp,
        }
    }

    /// Raw fields the record was built from
    pub fn raw_fields(&self) -> &RawFields {
        match self {
            LogRecord::Metric(r) => &r.raw,
            LogRecord::Event(r) => &r.raw,
            LogRecord::Request(r) => &r.raw,
        }
    }
}

// =============================================================================
// HTTP Status Categories
// =============================================================================

/// HTTP status code bucketed by hundreds digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    Success,
    ClientError,
    ServerError,
    /// Anything outside 2XX/4XX/5XX (1XX, 3XX, nonsense codes)
    Other,
}

impl StatusCategory {
    /// Categories that always appear in request summaries, in output order
    pub const REPORTED: [StatusCategory; 3] = [
        StatusCategory::Success,
        StatusCategory::ClientError,
        StatusCategory::ServerError,
    ];

    /// Classify a status code
    pub fn from_status(status: i32) -> Self {
        match status {
            200..=299 => StatusCategory::Success,
            400..=499 => StatusCategory::ClientError,
            500..=599 => StatusCategory::ServerError,
            _ => StatusCategory::Other,
        }
    }

    /// Label used in output documents
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Success => "2XX",
            StatusCategory::ClientError => "4XX",
            StatusCategory::ServerError => "5XX",
            StatusCategory::Other => "Other",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
