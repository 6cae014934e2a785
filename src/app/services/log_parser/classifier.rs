//! Line classifiers for the three record categories
//!
//! Each predicate works on the raw line text so a line can be rejected before
//! any field extraction happens. The predicates overlap on arbitrary input;
//! the chain's evaluation order decides which one wins.

use crate::constants::{EVENT_MARKERS, METRIC_EXCLUSION_MARKER, METRIC_MARKERS, REQUEST_MARKERS};

/// APM metric line: has `metric=` and `value=` but no `level=`
pub fn is_metric_line(line: &str) -> bool {
    contains_all(line, METRIC_MARKERS) && !line.contains(METRIC_EXCLUSION_MARKER)
}

/// Application event line: has `level=` and `message=`
pub fn is_event_line(line: &str) -> bool {
    contains_all(line, EVENT_MARKERS)
}

/// HTTP request line: has all four request/response markers
pub fn is_request_line(line: &str) -> bool {
    contains_all(line, REQUEST_MARKERS)
}

fn contains_all(line: &str, markers: &[&str]) -> bool {
    markers.iter().all(|marker| line.contains(marker))
}
