//! Snippet analysis engine.
//!
//! Pure functions over a borrowed [`SourceBuffer`]: size metrics and pattern
//! rules run over the same text, the function scanner runs for
//! indentation-block languages only, and suggestions are derived from the
//! combined result. Nothing here performs I/O or keeps state between calls.
//!
//! ```rust
//! use codebot::analysis::analyze;
//!
//! let report = analyze("def f():\n    x = 1\n", "python", 30);
//! assert_eq!(report.metrics.total_lines, 3);
//! assert!(report.patterns_found.is_empty());
//! ```

pub mod functions;
pub mod metrics;
pub mod patterns;
pub mod suggestions;

use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::core::{AnalysisReport, SourceBuffer};

pub use functions::{scan_functions, FunctionLengthScanner};
pub use patterns::{rules, PatternRule, LONG_FUNCTION_RULE};

/// Analyze `code` with the default settings and the given function threshold
pub fn analyze(code: &str, language: &str, threshold: usize) -> AnalysisReport {
    analyze_with_config(
        &SourceBuffer::new(code, language),
        &AnalysisConfig::with_threshold(threshold),
    )
}

/// Build the report for one buffer.
///
/// Registry hits come first in registry order, scanner findings are
/// appended after them.
pub fn analyze_with_config(buffer: &SourceBuffer<'_>, config: &AnalysisConfig) -> AnalysisReport {
    let _span = tracing::debug_span!("analyze", language = buffer.language).entered();

    let metrics = metrics::compute(buffer);
    let mut patterns_found = patterns::scan_with_config(buffer, config);
    if config.scans_functions() {
        patterns_found.extend(scan_functions(buffer, config.long_function_threshold));
    }
    let suggestions = suggestions::advise_with_config(&metrics, &patterns_found, config);

    tracing::debug!(
        total_lines = metrics.total_lines,
        hits = patterns_found.len(),
        "analysis complete"
    );

    AnalysisReport {
        metrics,
        patterns_found,
        suggestions,
    }
}

/// Analyze independent buffers in parallel; output order follows input order
pub fn analyze_batch(buffers: &[SourceBuffer<'_>], config: &AnalysisConfig) -> Vec<AnalysisReport> {
    buffers
        .par_iter()
        .map(|buffer| analyze_with_config(buffer, config))
        .collect()
}
