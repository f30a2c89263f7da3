//! Line-based size metrics.
//!
//! Every line falls in at most one bucket:
//!
//! - **Empty**: nothing but whitespace
//! - **Comment**: starts with `#` or `//` after trimming
//! - **Code**: anything else, except lines opening a block comment (`/*`)
//!
//! Lines opening a block comment are counted in neither `code_lines` nor
//! `comment_lines`, so `code + comment + empty <= total` rather than an
//! equality.
//!
//! ## Limitations
//!
//! - No block comment state is tracked; only the opening line is recognised
//! - Comment markers inside string literals are not detected

use crate::core::{MetricSet, SourceBuffer};

const COMMENT_MARKERS: &[&str] = &["#", "//"];
const NON_CODE_MARKERS: &[&str] = &["#", "//", "/*"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Empty,
    Comment,
    BlockOpener,
    Code,
}

fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Empty
    } else if COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        LineKind::Comment
    } else if NON_CODE_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        LineKind::BlockOpener
    } else {
        LineKind::Code
    }
}

/// Compute size metrics for a buffer. Never fails; empty input yields zeros.
pub fn compute(buffer: &SourceBuffer<'_>) -> MetricSet {
    let mut metrics = MetricSet::default();
    let mut total_chars = 0usize;

    for line in buffer.lines() {
        let length = line.chars().count();
        metrics.total_lines += 1;
        metrics.max_line_length = metrics.max_line_length.max(length);
        total_chars += length;

        match classify_line(line) {
            LineKind::Empty => metrics.empty_lines += 1,
            LineKind::Comment => metrics.comment_lines += 1,
            LineKind::BlockOpener => {}
            LineKind::Code => metrics.code_lines += 1,
        }
    }

    metrics.avg_line_length = average_line_length(total_chars, metrics.total_lines);
    metrics
}

/// Mean line length rounded to one decimal place.
///
/// Rounds the exact binary value of the mean, so 1/20 (stored just above
/// 0.05) becomes 0.1 and 7/20 (stored just below 0.35) becomes 0.3.
pub fn average_line_length(total_chars: usize, total_lines: usize) -> f64 {
    let mean = total_chars as f64 / total_lines.max(1) as f64;
    round_to_tenth(mean)
}

// Decimal formatting works from the exact binary value; scaling by ten
// first can manufacture a tie that was not there.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
