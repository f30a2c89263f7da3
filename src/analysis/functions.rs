//! Overlong function detection for indentation-block languages.
//!
//! A single forward pass with two states. A `def` header at column zero
//! closes the open function and opens a new one; every other line while a
//! function is open adds one to its length, whatever its indentation. The
//! function therefore runs until the next top-level header or the end of
//! the buffer, trailing blank lines and nested methods included. A header
//! with no name before its `(` closes the open function without opening
//! another.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::LONG_FUNCTION_RULE;
use crate::core::{PatternHit, SourceBuffer};

static FUNCTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(async\s+)?def\s+").expect("header pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Idle,
    InFunction { name: String, length: usize },
}

/// Scanner state carried across one forward iteration
#[derive(Debug)]
pub struct FunctionLengthScanner {
    threshold: usize,
    state: ScanState,
    hits: Vec<PatternHit>,
}

impl FunctionLengthScanner {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            state: ScanState::Idle,
            hits: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &str) {
        if FUNCTION_HEADER.is_match(line) {
            self.close_function();
            let name = function_name(line);
            // A header without a name leaves nothing open to count against
            if !name.is_empty() {
                self.state = ScanState::InFunction { name, length: 0 };
            }
        } else if let ScanState::InFunction { length, .. } = &mut self.state {
            *length += 1;
        }
    }

    pub fn finish(mut self) -> Vec<PatternHit> {
        self.close_function();
        self.hits
    }

    fn close_function(&mut self) {
        if let ScanState::InFunction { name, length } =
            std::mem::replace(&mut self.state, ScanState::Idle)
        {
            if length > self.threshold {
                log::debug!("{name} spans {length} lines (threshold {})", self.threshold);
                self.hits.push(PatternHit::detail(
                    LONG_FUNCTION_RULE,
                    format!("{name}: {length} lines"),
                ));
            }
        }
    }
}

/// Header text before the first `(`, without the `async`/`def` tokens
fn function_name(line: &str) -> String {
    let trimmed = line.trim();
    let head = trimmed
        .split_once('(')
        .map_or(trimmed, |(head, _)| head);
    head.split_whitespace()
        .filter(|token| *token != "async" && *token != "def")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Report functions longer than `threshold` body lines.
///
/// Contributes nothing unless the buffer's language belongs to the
/// indentation-block family; an empty or unknown tag is a no-op.
pub fn scan_functions(buffer: &SourceBuffer<'_>, threshold: usize) -> Vec<PatternHit> {
    if !buffer.language().is_indentation_block() {
        return Vec::new();
    }

    let mut scanner = FunctionLengthScanner::new(threshold);
    buffer.lines().for_each(|line| scanner.feed(line));
    scanner.finish()
}
