use crate::config::AnalysisConfig;
use crate::core::{MetricSet, PatternHit};

pub const CLEAN_CODE_SUGGESTION: &str = "No problematic patterns found; the code looks clean";

pub const ADD_DOCUMENTATION_SUGGESTION: &str =
    "The code has no comments; consider adding documentation";

pub fn long_lines_suggestion(threshold: usize) -> String {
    format!("Some lines are longer than {threshold} characters; consider splitting them")
}

/// Suggestions under the default thresholds
pub fn advise(metrics: &MetricSet, patterns: &[PatternHit]) -> Vec<String> {
    advise_with_config(metrics, patterns, &AnalysisConfig::default())
}

/// Each rule appends at most one suggestion, in this order:
/// long lines, missing documentation, clean bill of health.
/// The last two can both fire for the same buffer.
pub fn advise_with_config(
    metrics: &MetricSet,
    patterns: &[PatternHit],
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.max_line_length > config.long_line_threshold {
        suggestions.push(long_lines_suggestion(config.long_line_threshold));
    }
    if metrics.comment_lines == 0 && metrics.code_lines > config.undocumented_code_lines {
        suggestions.push(ADD_DOCUMENTATION_SUGGESTION.to_string());
    }
    if patterns.is_empty() {
        suggestions.push(CLEAN_CODE_SUGGESTION.to_string());
    }

    suggestions
}
