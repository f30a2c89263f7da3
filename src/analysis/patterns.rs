//! Fixed registry of regular-expression rules.
//!
//! Rules are evaluated in registry order over the whole buffer, each one
//! independently and case-insensitively. A rule that matches nothing
//! contributes no entry at all.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AnalysisConfig;
use crate::core::{PatternHit, SourceBuffer};

/// Name of the structural rule filled in by the function scanner
pub const LONG_FUNCTION_RULE: &str = "long_function";

/// Registry order governs report order.
///
/// `nested_loops` requires the inner loop on the very next line, indented
/// with spaces or tabs. `[^\n]*` absorbs a `\r`, so CRLF buffers match the
/// same way; a blank line between the two headers breaks the pair.
const RULE_SOURCES: &[(&str, &str)] = &[
    ("TODO/FIXME", r"(?i)\b(todo|fixme|hack|xxx)\b"),
    ("print_debug", r"(?i)\b(print\(|console\.log|debugger)"),
    ("bare_except", r"(?i)\bexcept\s*:"),
    (
        "hardcoded_secrets",
        r#"(?i)\w*(password|secret|api_key|token)\w*\s*=\s*['"][^'"]+['"]"#,
    ),
    (
        "nested_loops",
        r"(?i)\b(for|while)\b[^\n]*\n[ \t]+(for|while)\b",
    ),
];

/// A named, compiled detection rule
#[derive(Debug)]
pub struct PatternRule {
    pub name: &'static str,
    pub regex: Regex,
}

impl PatternRule {
    /// Non-overlapping matches in `code`
    pub fn count_matches(&self, code: &str) -> usize {
        self.regex.find_iter(code).count()
    }
}

static RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    RULE_SOURCES
        .iter()
        .map(|&(name, source)| PatternRule {
            name,
            regex: Regex::new(source).expect("built-in rule pattern must compile"),
        })
        .collect()
});

/// The registry, compiled once per process
pub fn rules() -> &'static [PatternRule] {
    &RULES
}

/// Every rule name the engine can report, in report order
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    RULE_SOURCES
        .iter()
        .map(|&(name, _)| name)
        .chain(std::iter::once(LONG_FUNCTION_RULE))
}

pub fn is_known_rule(name: &str) -> bool {
    rule_names().any(|known| known == name)
}

/// Evaluate every registry rule
pub fn scan(buffer: &SourceBuffer<'_>) -> Vec<PatternHit> {
    scan_with_config(buffer, &AnalysisConfig::default())
}

/// Evaluate the registry rules the config leaves enabled
pub fn scan_with_config(buffer: &SourceBuffer<'_>, config: &AnalysisConfig) -> Vec<PatternHit> {
    rules()
        .iter()
        .filter(|rule| config.is_rule_enabled(rule.name))
        .filter_map(|rule| {
            let count = rule.count_matches(buffer.code);
            (count > 0).then(|| PatternHit::count(rule.name, count))
        })
        .collect()
}
