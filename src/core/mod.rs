pub mod errors;

use serde::{Deserialize, Serialize};

pub use errors::{Error, Result};

/// Language family of a snippet, derived from its free-form tag.
///
/// Tags are never validated against a closed set; anything unrecognised maps
/// to `Unknown` and only loses the language-specific scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Unknown,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        static TAG_MAP: &[(&[&str], Language)] = &[
            (&["rust", "rs"], Language::Rust),
            (&["python", "py", "python3"], Language::Python),
            (&["javascript", "js", "node", "jsx"], Language::JavaScript),
            (&["typescript", "ts", "tsx"], Language::TypeScript),
        ];

        let tag = tag.trim().to_lowercase();
        TAG_MAP
            .iter()
            .find(|(tags, _)| tags.contains(&tag.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["rs"], Language::Rust),
            (&["py", "pyi", "pyw"], Language::Python),
            (&["js", "jsx", "mjs", "cjs"], Language::JavaScript),
            (&["ts", "tsx", "mts", "cts"], Language::TypeScript),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Canonical tag used when storing or reporting the language
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Unknown => "unknown",
        }
    }

    /// Function bodies are delimited by indentation rather than braces
    pub fn is_indentation_block(&self) -> bool {
        matches!(self, Language::Python)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_str = match self {
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Unknown => "Unknown",
        };
        write!(f, "{display_str}")
    }
}

/// Code text plus its declared language tag, borrowed for one analysis call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceBuffer<'a> {
    pub code: &'a str,
    pub language: &'a str,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(code: &'a str, language: &'a str) -> Self {
        Self { code, language }
    }

    /// Lines split on `'\n'`.
    ///
    /// A final newline yields a trailing empty line (`"a\n"` has two lines);
    /// the empty buffer has none.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        let code = self.code;
        (!code.is_empty())
            .then(|| code.split('\n'))
            .into_iter()
            .flatten()
    }

    pub fn language(&self) -> Language {
        Language::from_tag(self.language)
    }
}

/// Line-based size metrics of one buffer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub total_lines: usize,
    pub code_lines: usize,
    pub empty_lines: usize,
    pub comment_lines: usize,
    pub max_line_length: usize,
    pub avg_line_length: f64,
}

/// What a rule reports when it fires
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Finding {
    /// Number of non-overlapping matches of a regular-expression rule
    Count { count: usize },
    /// Qualitative finding of a structural rule
    Detail { detail: String },
}

/// One rule having matched
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternHit {
    pub rule_name: String,
    #[serde(flatten)]
    pub finding: Finding,
}

impl PatternHit {
    pub fn count(rule_name: impl Into<String>, count: usize) -> Self {
        Self {
            rule_name: rule_name.into(),
            finding: Finding::Count { count },
        }
    }

    pub fn detail(rule_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            finding: Finding::Detail {
                detail: detail.into(),
            },
        }
    }

    pub fn match_count(&self) -> Option<usize> {
        match self.finding {
            Finding::Count { count } => Some(count),
            Finding::Detail { .. } => None,
        }
    }

    pub fn detail_text(&self) -> Option<&str> {
        match &self.finding {
            Finding::Count { .. } => None,
            Finding::Detail { detail } => Some(detail),
        }
    }
}

/// The sole output of the analysis engine
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metrics: MetricSet,
    pub patterns_found: Vec<PatternHit>,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_from_tag_is_case_insensitive() {
        assert_eq!(Language::from_tag("Python"), Language::Python);
        assert_eq!(Language::from_tag("  py "), Language::Python);
        assert_eq!(Language::from_tag("JS"), Language::JavaScript);
        assert_eq!(Language::from_tag(""), Language::Unknown);
        assert_eq!(Language::from_tag("cobol"), Language::Unknown);
    }

    #[test]
    fn test_language_from_path() {
        use std::path::Path;
        assert_eq!(Language::from_path(Path::new("a/b.py")), Language::Python);
        assert_eq!(Language::from_path(Path::new("main.rs")), Language::Rust);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::Unknown);
    }

    #[test]
    fn test_only_python_is_indentation_block() {
        assert!(Language::Python.is_indentation_block());
        assert!(!Language::JavaScript.is_indentation_block());
        assert!(!Language::Unknown.is_indentation_block());
    }

    #[test]
    fn test_lines_keep_trailing_empty_line() {
        let buffer = SourceBuffer::new("a\nb\n", "python");
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_empty_buffer_has_no_lines() {
        let buffer = SourceBuffer::new("", "python");
        assert_eq!(buffer.lines().count(), 0);
    }

    #[test]
    fn test_pattern_hit_serializes_flat() {
        let count = serde_json::to_value(PatternHit::count("bare_except", 2)).unwrap();
        assert_eq!(
            count,
            serde_json::json!({ "rule_name": "bare_except", "count": 2 })
        );

        let detail =
            serde_json::to_value(PatternHit::detail("long_function", "f: 31 lines")).unwrap();
        assert_eq!(
            detail,
            serde_json::json!({ "rule_name": "long_function", "detail": "f: 31 lines" })
        );
    }

    #[test]
    fn test_pattern_hit_deserializes_both_shapes() {
        let hit: PatternHit =
            serde_json::from_str(r#"{"rule_name":"print_debug","count":3}"#).unwrap();
        assert_eq!(hit.match_count(), Some(3));

        let hit: PatternHit =
            serde_json::from_str(r#"{"rule_name":"long_function","detail":"g: 40 lines"}"#)
                .unwrap();
        assert_eq!(hit.detail_text(), Some("g: 40 lines"));
    }
}
