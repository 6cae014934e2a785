//! Application constants for the log aggregator
//!
//! This module contains the field names, classifier markers, output keys and
//! default values used throughout the log aggregator.

// =============================================================================
// Log Line Field Names
// =============================================================================

/// Field names extracted from `key=value` tokens
pub mod fields {
    pub const TIMESTAMP: &str = "timestamp";
    pub const HOST: &str = "host";

    pub const METRIC: &str = "metric";
    pub const VALUE: &str = "value";

    pub const LEVEL: &str = "level";
    pub const MESSAGE: &str = "message";

    pub const REQUEST_METHOD: &str = "request_method";
    pub const REQUEST_URL: &str = "request_url";
    pub const RESPONSE_STATUS: &str = "response_status";
    pub const RESPONSE_TIME_MS: &str = "response_time_ms";
}

// =============================================================================
// Classifier Markers
// =============================================================================

/// Substrings a line must contain to be considered an APM metric
pub const METRIC_MARKERS: &[&str] = &["metric=", "value="];

/// Substring that disqualifies a line from being an APM metric
pub const METRIC_EXCLUSION_MARKER: &str = "level=";

/// Substrings a line must contain to be considered an application event
pub const EVENT_MARKERS: &[&str] = &["level=", "message="];

/// Substrings a line must contain to be considered an HTTP request record
pub const REQUEST_MARKERS: &[&str] = &[
    "request_method=",
    "request_url=",
    "response_status=",
    "response_time_ms=",
];

// =============================================================================
// Output Document Keys
// =============================================================================

/// Keys of a metric summary, in output order
pub mod metric_keys {
    pub const MINIMUM: &str = "minimum";
    pub const MEDIAN: &str = "median";
    pub const AVERAGE: &str = "average";
    pub const MAX: &str = "max";
}

/// Keys of a request route summary
pub mod request_keys {
    pub const RESPONSE_TIMES: &str = "response_times";
    pub const STATUS_CODES: &str = "status_codes";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
}

/// Percentiles reported for request latencies, paired with their output key
pub const RESPONSE_TIME_PERCENTILES: &[(u32, &str)] = &[
    (50, "50_percentile"),
    (90, "90_percentile"),
    (95, "95_percentile"),
    (99, "99_percentile"),
];

// =============================================================================
// Output Files
// =============================================================================

/// Default file name for the APM metric summary
pub const DEFAULT_APM_FILE_NAME: &str = "apm.json";

/// Default file name for the application event summary
pub const DEFAULT_APPLICATION_FILE_NAME: &str = "application.json";

/// Default file name for the request summary
pub const DEFAULT_REQUEST_FILE_NAME: &str = "request.json";

/// Default output directory (current working directory)
pub const DEFAULT_OUTPUT_DIR: &str = ".";

// =============================================================================
// Diagnostics
// =============================================================================

/// Maximum number of per-line error messages retained in processing statistics
pub const DEFAULT_MAX_RETAINED_ERRORS: usize = 100;

/// Number of lines between progress spinner updates
pub const PROGRESS_UPDATE_INTERVAL: u64 = 1_000;
