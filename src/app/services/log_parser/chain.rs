//! Fixed-priority classification chain
//!
//! Lines are tried against Metric, then Event, then Request. The first
//! predicate that matches owns the line: if its builder fails, the line is
//! rejected and later classifiers are not consulted.

use tracing::{debug, trace};

use super::classifier::{is_event_line, is_metric_line, is_request_line};
use super::error::ParseError;
use super::field_extractor::extract_fields;
use super::record_builder::{build_event, build_metric, build_request};
use crate::app::models::{LogRecord, RawFields, RecordKind};

type Predicate = fn(&str) -> bool;
type Builder = fn(RawFields) -> Result<LogRecord, ParseError>;

/// One link of the chain: a category, its line predicate and its record builder
struct ChainEntry {
    kind: RecordKind,
    matches: Predicate,
    build: Builder,
}

const CHAIN: &[ChainEntry] = &[
    ChainEntry {
        kind: RecordKind::Metric,
        matches: is_metric_line,
        build: build_metric,
    },
    ChainEntry {
        kind: RecordKind::Event,
        matches: is_event_line,
        build: build_event,
    },
    ChainEntry {
        kind: RecordKind::Request,
        matches: is_request_line,
        build: build_request,
    },
];

/// Result of classifying a single log line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line was recognized and parsed
    Parsed(LogRecord),
    /// A classifier matched but the record could not be built
    Malformed { kind: RecordKind, error: ParseError },
    /// No classifier matched
    Unrecognized,
}

impl LineOutcome {
    /// Consume the outcome, keeping only a successfully parsed record
    pub fn into_record(self) -> Option<LogRecord> {
        match self {
            LineOutcome::Parsed(record) => Some(record),
            _ => None,
        }
    }
}

/// Classification chain over the three record categories
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationChain;

impl ClassificationChain {
    pub fn new() -> Self {
        Self
    }

    /// Order in which categories are tried
    pub fn priority(&self) -> impl Iterator<Item = RecordKind> {
        CHAIN.iter().map(|entry| entry.kind)
    }

    /// Classify and parse one line
    pub fn classify(&self, line: &str) -> LineOutcome {
        let Some(entry) = CHAIN.iter().find(|entry| (entry.matches)(line)) else {
            trace!("Unrecognized line: {}", line);
            return LineOutcome::Unrecognized;
        };

        // Fields are only extracted once a category has claimed the line
        match (entry.build)(extract_fields(line)) {
            Ok(record) => LineOutcome::Parsed(record),
            Err(error) => {
                debug!("Skipped {} line ({}): {}", entry.kind, error, line);
                LineOutcome::Malformed {
                    kind: entry.kind,
                    error,
                }
            }
        }
    }
}
