//! Typed record construction from raw fields
//!
//! Builders are strict: every field the target record needs must be present
//! and parse cleanly, otherwise the whole line is rejected with a
//! [`ParseError`].

use chrono::{DateTime, NaiveDateTime};

use super::error::ParseError;
use super::field_extractor::strip_quotes;
use crate::app::models::{EventRecord, LogRecord, MetricRecord, RawFields, RequestRecord};
use crate::constants::fields;

/// Build an APM metric record
pub fn build_metric(raw: RawFields) -> Result<LogRecord, ParseError> {
    let timestamp = parse_required_timestamp(&raw)?;
    let host = parse_required_string(&raw, fields::HOST)?;
    let metric = parse_required_string(&raw, fields::METRIC)?;
    let value = parse_required_f64(&raw, fields::VALUE)?;

    Ok(LogRecord::Metric(MetricRecord {
        timestamp,
        host,
        metric,
        value,
        raw,
    }))
}

/// Build an application event record
pub fn build_event(raw: RawFields) -> Result<LogRecord, ParseError> {
    let timestamp = parse_required_timestamp(&raw)?;
    let host = parse_required_string(&raw, fields::HOST)?;
    let level = parse_required_string(&raw, fields::LEVEL)?;
    let message = strip_quotes(get_required_field(&raw, fields::MESSAGE)?).to_string();

    Ok(LogRecord::Event(EventRecord {
        timestamp,
        host,
        level,
        message,
        raw,
    }))
}

/// Build an HTTP request record
pub fn build_request(raw: RawFields) -> Result<LogRecord, ParseError> {
    let timestamp = parse_required_timestamp(&raw)?;
    let host = parse_required_string(&raw, fields::HOST)?;
    let method = parse_required_string(&raw, fields::REQUEST_METHOD)?;
    let url = strip_quotes(get_required_field(&raw, fields::REQUEST_URL)?).to_string();
    let status = parse_required_i32(&raw, fields::RESPONSE_STATUS)?;
    let response_time_ms = parse_required_u64(&raw, fields::RESPONSE_TIME_MS)?;

    Ok(LogRecord::Request(RequestRecord {
        timestamp,
        host,
        method,
        url,
        status,
        response_time_ms,
        raw,
    }))
}

/// Get a required field value
pub fn get_required_field<'a>(
    raw: &'a RawFields,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    raw.get(field)
        .map(String::as_str)
        .ok_or(ParseError::MissingField { field })
}

/// Parse a required string field
pub fn parse_required_string(raw: &RawFields, field: &'static str) -> Result<String, ParseError> {
    get_required_field(raw, field).map(str::to_string)
}

/// Parse the required `timestamp` field as an ISO-8601 date-time
///
/// Accepts a local date-time with optional seconds and fraction, optionally
/// followed by `Z` or a `+HH:MM` offset. The offset is dropped and the
/// wall-clock time kept.
pub fn parse_required_timestamp(raw: &RawFields) -> Result<NaiveDateTime, ParseError> {
    let value = get_required_field(raw, fields::TIMESTAMP)?;
    parse_timestamp(value).ok_or_else(|| ParseError::InvalidTimestamp {
        value: value.to_string(),
    })
}

/// Local date-time layouts, most specific first
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Offset date-time layouts not covered by RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Parse an ISO-8601 date-time string
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    let local = value.strip_suffix('Z').unwrap_or(value);
    let parsed_local = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok());
    if parsed_local.is_some() {
        return parsed_local;
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.naive_local())
}

/// Parse a required finite f64 field
pub fn parse_required_f64(raw: &RawFields, field: &'static str) -> Result<f64, ParseError> {
    let value_str = get_required_field(raw, field)?;

    let value = value_str
        .parse::<f64>()
        .map_err(|e| ParseError::InvalidNumber {
            field,
            value: value_str.to_string(),
            reason: e.to_string(),
        })?;

    if !value.is_finite() {
        return Err(ParseError::NonFiniteValue {
            field,
            value: value_str.to_string(),
        });
    }

    Ok(value)
}

/// Parse a required base-10 i32 field
pub fn parse_required_i32(raw: &RawFields, field: &'static str) -> Result<i32, ParseError> {
    let value_str = get_required_field(raw, field)?;

    value_str
        .parse::<i32>()
        .map_err(|e| ParseError::InvalidNumber {
            field,
            value: value_str.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a required non-negative base-10 integer field
pub fn parse_required_u64(raw: &RawFields, field: &'static str) -> Result<u64, ParseError> {
    let value = parse_required_i64(raw, field)?;

    u64::try_from(value).map_err(|_| ParseError::NegativeValue {
        field,
        value: value.to_string(),
    })
}

fn parse_required_i64(raw: &RawFields, field: &'static str) -> Result<i64, ParseError> {
    let value_str = get_required_field(raw, field)?;

    value_str
        .parse::<i64>()
        .map_err(|e| ParseError::InvalidNumber {
            field,
            value: value_str.to_string(),
            reason: e.to_string(),
        })
}
