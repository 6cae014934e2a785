//! Log Aggregator Library
//!
//! A Rust library for turning a mixed, line-oriented log file into per-category
//! statistical summaries.
//!
//! This library provides tools for:
//! - Extracting `key=value` / `key="quoted value"` fields from raw log lines
//! - Classifying lines as APM metrics, application events or HTTP requests
//! - Building typed records with strict timestamp and numeric parsing
//! - Aggregating metric distributions, event counts and request latency percentiles
//! - Writing insertion-ordered JSON summary documents

pub mod config;
pub mod constants;
pub mod processor;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod log_parser;
        pub mod report_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EventRecord, LogRecord, MetricRecord, RequestRecord, StatusCategory};
pub use config::ProcessorConfig;
pub use processor::{LogProcessor, ProcessingOutput, ProcessingStats};

/// Result type alias for the log aggregator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fatal log aggregation failures
///
/// Per-line problems never surface here; they are reported as
/// [`app::services::log_parser::ParseError`] and skipped.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON document serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Check whether the error came from the line source or the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FileNotFound { .. })
    }
}
