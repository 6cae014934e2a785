//! Main processing engine for mixed log files.
//!
//! Drives the single-pass pipeline: read a line, classify and parse it, fold
//! the record into its category aggregator. Once the source is exhausted the
//! three aggregators are finalized into summary documents.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

use crate::app::models::{LogRecord, RecordKind};
use crate::app::services::aggregator::{
    Aggregator, EventAggregator, MetricAggregator, RequestAggregator,
};
use crate::app::services::log_parser::{ClassificationChain, LineOutcome};
use crate::app::services::report_writer::ReportWriter;
use crate::config::ProcessorConfig;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::{Error, Result};

/// Line-level processing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    /// Total number of lines read from the source
    pub total_lines: usize,
    /// APM metric records aggregated
    pub metric_records: usize,
    /// Application event records aggregated
    pub event_records: usize,
    /// HTTP request records aggregated
    pub request_records: usize,
    /// Lines no classifier recognized
    pub unrecognized_lines: usize,
    /// Recognized lines that failed to parse
    pub malformed_lines: usize,
    /// First per-line error messages, for debugging
    pub errors: Vec<String>,
    /// Time spent reading and aggregating
    #[serde(skip)]
    pub processing_time: Duration,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines that produced a record
    pub fn records_parsed(&self) -> usize {
        self.metric_records + self.event_records + self.request_records
    }

    /// Number of lines skipped for any reason
    pub fn lines_skipped(&self) -> usize {
        self.unrecognized_lines + self.malformed_lines
    }

    /// Records aggregated for one category
    pub fn records_for(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Metric => self.metric_records,
            RecordKind::Event => self.event_records,
            RecordKind::Request => self.request_records,
        }
    }

    /// Parsed lines as a percentage of all lines read
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.records_parsed() as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines -> {} records ({:.1}%) | APM: {} | Application: {} | Request: {} | \
             Unrecognized: {} | Malformed: {}",
            self.total_lines,
            self.records_parsed(),
            self.success_rate(),
            self.metric_records,
            self.event_records,
            self.request_records,
            self.unrecognized_lines,
            self.malformed_lines
        )
    }

    fn record_error(&mut self, message: String, max_retained: usize) {
        if self.errors.len() < max_retained {
            self.errors.push(message);
        }
    }
}

/// Finalized summary documents plus the statistics of the run
#[derive(Debug, Clone)]
pub struct ProcessingOutput {
    /// APM metric summary
    pub apm: Value,
    /// Application event summary
    pub application: Value,
    /// HTTP request summary
    pub request: Value,
    pub stats: ProcessingStats,
}

impl ProcessingOutput {
    /// Document for a record category
    pub fn document(&self, kind: RecordKind) -> &Value {
        match kind {
            RecordKind::Metric => &self.apm,
            RecordKind::Event => &self.application,
            RecordKind::Request => &self.request,
        }
    }

    /// Write all three documents as configured, returning the written paths
    pub fn write(&self, config: &ProcessorConfig) -> Result<Vec<PathBuf>> {
        let writer = ReportWriter::new(&config.output_dir);

        [RecordKind::Metric, RecordKind::Event, RecordKind::Request]
            .into_iter()
            .map(|kind| {
                writer.write_document(config.output_files.for_kind(kind), self.document(kind))
            })
            .collect()
    }
}

/// Single-pass processor for mixed log sources
#[derive(Debug)]
pub struct LogProcessor {
    config: ProcessorConfig,
    chain: ClassificationChain,
    metrics: MetricAggregator,
    events: EventAggregator,
    requests: RequestAggregator,
    stats: ProcessingStats,
}

impl LogProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            chain: ClassificationChain::new(),
            metrics: MetricAggregator::new(),
            events: EventAggregator::new(),
            requests: RequestAggregator::new(),
            stats: ProcessingStats::new(),
        }
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Read and process every line of a log file
    pub fn process_file(&mut self, path: &Path) -> Result<()> {
        info!("Processing log file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open log file {}", path.display()), e))?;

        self.process_reader(BufReader::new(file))
    }

    /// Read and process every line from a buffered source
    ///
    /// Any read error aborts the run. Invalid UTF-8 is replaced rather than
    /// treated as a read error. Lines end at `\n`, `\r\n` or a lone `\r`.
    pub fn process_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let start_time = Instant::now();
        let progress = self.progress_bar();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let bytes_read = reader.read_until(b'\n', &mut buffer).map_err(|e| {
                Error::io(
                    format!("Failed to read line {}", self.stats.total_lines + 1),
                    e,
                )
            })?;
            if bytes_read == 0 {
                break;
            }

            // A lone `\r` also ends a line
            for segment in trim_line_ending(&buffer).split(|&byte| byte == b'\r') {
                self.process_line(&String::from_utf8_lossy(segment));
            }

            if let Some(pb) = &progress {
                if self.stats.total_lines as u64 % PROGRESS_UPDATE_INTERVAL == 0 {
                    pb.set_message(format!("{} lines", self.stats.total_lines));
                }
            }
        }

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        self.stats.processing_time += start_time.elapsed();
        info!("{}", self.stats.summary());
        if self.stats.malformed_lines > 0 {
            warn!(
                "Skipped {} malformed line(s); run with -vv for details",
                self.stats.malformed_lines
            );
        }

        Ok(())
    }

    /// Classify one line and fold it into the matching aggregator
    ///
    /// Per-line failures are counted and logged, never returned.
    pub fn process_line(&mut self, line: &str) {
        self.stats.total_lines += 1;

        match self.chain.classify(line) {
            LineOutcome::Parsed(record) => {
                trace!(
                    "Line {}: {} record from {} at {} ({} fields)",
                    self.stats.total_lines,
                    record.kind(),
                    record.host(),
                    record.timestamp(),
                    record.raw_fields().len()
                );
                self.aggregate(record);
            }
            LineOutcome::Malformed { kind, error } => {
                self.stats.malformed_lines += 1;
                let message = format!(
                    "Line {} ({} record): {}",
                    self.stats.total_lines, kind, error
                );
                self.stats
                    .record_error(message, self.config.max_retained_errors);
            }
            LineOutcome::Unrecognized => {
                self.stats.unrecognized_lines += 1;
            }
        }
    }

    /// Finalize all aggregators into summary documents
    pub fn finish(mut self) -> ProcessingOutput {
        debug!("Finalizing aggregations");

        ProcessingOutput {
            apm: self.metrics.finalize(),
            application: self.events.finalize(),
            request: self.requests.finalize(),
            stats: self.stats,
        }
    }

    fn aggregate(&mut self, record: LogRecord) {
        match record {
            LogRecord::Metric(metric) => {
                self.metrics.observe(metric);
                self.stats.metric_records += 1;
            }
            LogRecord::Event(event) => {
                self.events.observe(event);
                self.stats.event_records += 1;
            }
            LogRecord::Request(request) => {
                self.requests.observe(request);
                self.stats.request_records += 1;
            }
        }
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading log lines");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Cursor, Read};

    const SAMPLE_LOG: &str = "timestamp=2024-02-24T16:22:15Z metric=cpu_usage_percent host=webserver1 value=72\n\
timestamp=2024-02-24T16:22:20Z level=INFO message=\"Scheduled maintenance starting\" host=webserver1\n\
timestamp=2024-02-24T16:22:25Z request_method=POST request_url=\"/api/update\" response_status=202 response_time_ms=200 host=webserver1\n\
bad metric=cpu value=1\n\
Invalid log line that should be ignored\n";

    #[test]
    fn test_process_reader_counts_outcomes() {
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new(SAMPLE_LOG)).unwrap();

        let stats = processor.stats();
        assert_eq!(stats.total_lines, 5);
        assert_eq!(stats.metric_records, 1);
        assert_eq!(stats.event_records, 1);
        assert_eq!(stats.request_records, 1);
        assert_eq!(stats.malformed_lines, 1);
        assert_eq!(stats.unrecognized_lines, 1);
        assert_eq!(stats.records_parsed(), 3);
        assert_eq!(stats.lines_skipped(), 2);
        assert_eq!(stats.success_rate(), 60.0);
        assert_eq!(stats.errors.len(), 1);
        assert!(stats.errors[0].starts_with("Line 4 (APM record)"));
    }

    #[test]
    fn test_records_for_each_kind() {
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new(SAMPLE_LOG)).unwrap();
        processor.process_line(
            "timestamp=2024-02-24T16:22:21Z level=WARN message=\"disk low\" host=webserver2",
        );

        let stats = processor.stats();
        assert_eq!(stats.records_for(RecordKind::Metric), 1);
        assert_eq!(stats.records_for(RecordKind::Event), 2);
        assert_eq!(stats.records_for(RecordKind::Request), 1);
    }

    #[test]
    fn test_crlf_and_missing_trailing_newline() {
        let input = "timestamp=2024-02-24T16:22:15Z metric=cpu host=h value=1\r\n\
                     timestamp=2024-02-24T16:22:16Z metric=cpu host=h value=3";
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new(input)).unwrap();

        let output = processor.finish();
        assert_eq!(output.stats.metric_records, 2);
        assert_eq!(output.apm["cpu"]["median"], json!(2.0));
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        let input = "timestamp=2024-02-24T16:22:15Z metric=cpu host=h value=1\r\
                     timestamp=2024-02-24T16:22:16Z metric=cpu host=h value=5\r\r\n\
                     timestamp=2024-02-24T16:22:17Z level=INFO message=up host=h\r";
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new(input)).unwrap();

        let output = processor.finish();
        assert_eq!(output.stats.total_lines, 4);
        assert_eq!(output.stats.metric_records, 2);
        assert_eq!(output.stats.event_records, 1);
        assert_eq!(output.stats.unrecognized_lines, 1);
        assert_eq!(output.apm["cpu"]["max"], json!(5.0));
    }

    #[test]
    fn test_invalid_utf8_is_not_fatal() {
        let mut input = b"timestamp=2024-02-24T16:22:20Z level=INFO message=\"caf".to_vec();
        input.extend_from_slice(&[0xff, 0xfe]);
        input.extend_from_slice(b"\" host=h\n");

        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new(input)).unwrap();

        let output = processor.finish();
        assert_eq!(output.application, json!({"INFO": 1}));
    }

    #[test]
    fn test_retained_errors_are_capped() {
        let config = ProcessorConfig::default().with_max_retained_errors(2);
        let mut processor = LogProcessor::new(config);
        for _ in 0..5 {
            processor.process_line("metric=cpu value=oops");
        }

        assert_eq!(processor.stats().malformed_lines, 5);
        assert_eq!(processor.stats().errors.len(), 2);
    }

    #[test]
    fn test_empty_source_finalizes_to_empty_documents() {
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        processor.process_reader(Cursor::new("")).unwrap();

        let output = processor.finish();
        assert_eq!(output.stats.total_lines, 0);
        assert_eq!(output.stats.success_rate(), 0.0);
        for kind in [RecordKind::Metric, RecordKind::Event, RecordKind::Request] {
            assert_eq!(output.document(kind), &json!({}));
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_read_error_is_fatal() {
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        let result = processor.process_reader(BufReader::new(FailingReader));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let mut processor = LogProcessor::new(ProcessorConfig::default());
        let result = processor.process_file(Path::new("/nonexistent/app.log"));

        let error = result.unwrap_err();
        assert!(error.is_io());
        assert!(error.to_string().contains("/nonexistent/app.log"));
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(trim_line_ending(b"abc\n"), b"abc");
        assert_eq!(trim_line_ending(b"abc"), b"abc");
        assert_eq!(trim_line_ending(b"\r"), b"");
    }
}
