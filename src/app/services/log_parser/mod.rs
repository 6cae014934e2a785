//! Classify-and-parse pipeline for mixed log lines
//!
//! This module turns an untyped line of text into one of the typed
//! [`LogRecord`](crate::app::models::LogRecord) variants, or rejects it.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`field_extractor`] - Tolerant `key=value` / `key="quoted"` tokenizer
//! - [`classifier`] - Cheap substring predicates deciding a line's category
//! - [`record_builder`] - Strict construction of typed records from raw fields
//! - [`chain`] - Fixed-priority classification chain (Metric -> Event -> Request)
//! - [`error`] - Recoverable per-line parse errors
//!
//! ## Usage
//!
//! ```rust
//! use log_aggregator::app::services::log_parser::{ClassificationChain, LineOutcome};
//!
//! let chain = ClassificationChain::new();
//! let line = "timestamp=2024-02-24T16:22:15Z metric=cpu_usage_percent host=webserver1 value=72";
//!
//! match chain.classify(line) {
//!     LineOutcome::Parsed(record) => println!("parsed {} record", record.kind()),
//!     LineOutcome::Malformed { kind, error } => println!("bad {} line: {}", kind, error),
//!     LineOutcome::Unrecognized => println!("skipped"),
//! }
//! ```

pub mod chain;
pub mod classifier;
pub mod error;
pub mod field_extractor;
pub mod record_builder;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use chain::{ClassificationChain, LineOutcome};
pub use error::ParseError;
pub use field_extractor::extract_fields;
