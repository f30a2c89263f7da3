//! Property-based tests for the analysis engine
//!
//! These tests verify invariants that should hold for all inputs:
//! - Line buckets never exceed the total line count
//! - The average line length follows its defining formula
//! - Analysis is deterministic
//! - Removing or disabling one rule's trigger leaves every other count alone
//! - Only indentation-block languages get function-length findings

use codebot::analysis::{analyze, analyze_with_config, LONG_FUNCTION_RULE};
use codebot::{AnalysisConfig, SourceBuffer};
use proptest::prelude::*;

/// Lines mixing code, comments, blanks and the odd rule trigger
fn source_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_]{1,12} = [0-9]{1,4}",
        "    [a-z_]{1,12}\\([a-z]{0,6}\\)",
        "# [a-zA-Z ]{0,30}",
        "// [a-zA-Z ]{0,30}",
        "/\\* [a-z ]{0,10}",
        "[ \\t]{0,4}",
        "def [a-z]{1,8}\\(\\):",
        "    for [a-z] in [a-z]{1,5}:",
        "        print\\([a-z]{1,5}\\)",
        "[ -~]{0,140}",
    ]
}

fn source_code() -> impl Strategy<Value = String> {
    (prop::collection::vec(source_line(), 0..60), any::<bool>()).prop_map(|(lines, newline)| {
        let mut code = lines.join("\n");
        if newline {
            code.push('\n');
        }
        code
    })
}

/// Round the exact binary value of `chars / lines` to one decimal place
/// with integer arithmetic, halves to even.
///
/// The quotient is decomposed into `mantissa * 2^-shift`; ten times that is
/// split into an integer part and a remainder, and the remainder is
/// compared against half of `2^shift`.
fn exact_tenths(chars: usize, lines: usize) -> f64 {
    let mean = chars as f64 / lines.max(1) as f64;
    if mean == 0.0 {
        return 0.0;
    }
    let bits = mean.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = ((bits & ((1u64 << 52) - 1)) | (1u64 << 52)) as u128;
    let shift = 1075 - exponent;
    if shift <= 0 {
        return mean;
    }

    let scaled = mantissa * 10;
    let unit = 1u128 << shift;
    let mut tenths = scaled / unit;
    let remainder = scaled % unit;
    if remainder * 2 > unit || (remainder * 2 == unit && tenths % 2 == 1) {
        tenths += 1;
    }
    tenths as f64 / 10.0
}

/// Every rule trigger on its own lines, in registry order
const TRIGGERS: [(&str, &str); 5] = [
    ("TODO/FIXME", "# TODO: tidy up"),
    ("print_debug", "print(value)"),
    ("bare_except", "except:"),
    ("hardcoded_secrets", "password = \"hunter2\""),
    ("nested_loops", "for row in grid:\n    for cell in row:"),
];

fn build_triggers(counts: &[usize]) -> String {
    TRIGGERS
        .iter()
        .zip(counts)
        .flat_map(|(&(_, trigger), &count)| std::iter::repeat(trigger).take(count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_of(code: &str, rule_name: &str) -> usize {
    analyze(code, "python", 30)
        .patterns_found
        .iter()
        .find(|hit| hit.rule_name == rule_name)
        .and_then(|hit| hit.match_count())
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn prop_line_buckets_fit_in_total(code in source_code()) {
        let m = analyze(&code, "python", 30).metrics;
        prop_assert!(m.code_lines + m.comment_lines + m.empty_lines <= m.total_lines);
    }

    #[test]
    fn prop_average_line_length_formula(code in source_code()) {
        let m = analyze(&code, "python", 30).metrics;
        let lines: Vec<&str> = SourceBuffer::new(&code, "python").lines().collect();
        let total_chars: usize = lines.iter().map(|l| l.chars().count()).sum();

        prop_assert_eq!(m.total_lines, lines.len());
        prop_assert_eq!(m.avg_line_length, exact_tenths(total_chars, lines.len()));
        prop_assert_eq!(m.max_line_length, lines.iter().map(|l| l.chars().count()).max().unwrap_or(0));
    }

    #[test]
    fn prop_analysis_is_deterministic(code in source_code(), threshold in 1usize..50) {
        prop_assert_eq!(analyze(&code, "python", threshold), analyze(&code, "python", threshold));
    }

    #[test]
    fn prop_average_on_padded_buffers(chars in 1usize..200, lines in 1usize..60) {
        // One line of `chars` characters followed by empty lines
        let code = format!("{}{}", "a".repeat(chars), "\n".repeat(lines - 1));
        let m = analyze(&code, "python", 30).metrics;
        prop_assert_eq!(m.total_lines, lines);
        prop_assert_eq!(m.avg_line_length, exact_tenths(chars, lines));
    }

    #[test]
    fn prop_each_rule_counts_only_its_own_triggers(counts in prop::collection::vec(0usize..4, 5)) {
        let code = build_triggers(&counts);
        for (&(rule_name, _), &count) in TRIGGERS.iter().zip(&counts) {
            prop_assert_eq!(count_of(&code, rule_name), count, "rule {}", rule_name);
        }
    }

    #[test]
    fn prop_removing_one_trigger_leaves_other_counts(
        counts in prop::collection::vec(1usize..4, 5),
        removed in 0usize..5,
    ) {
        let full = build_triggers(&counts);
        let mut reduced_counts = counts.clone();
        reduced_counts[removed] -= 1;
        let reduced = build_triggers(&reduced_counts);

        for (index, &(rule_name, _)) in TRIGGERS.iter().enumerate() {
            let expected = if index == removed {
                count_of(&full, rule_name) - 1
            } else {
                count_of(&full, rule_name)
            };
            prop_assert_eq!(count_of(&reduced, rule_name), expected, "rule {}", rule_name);
        }
    }

    #[test]
    fn prop_disabling_one_rule_leaves_other_counts(
        counts in prop::collection::vec(0usize..4, 5),
        disabled in 0usize..5,
    ) {
        let code = build_triggers(&counts);
        let buffer = SourceBuffer::new(&code, "python");
        let disabled_name = TRIGGERS[disabled].0;
        let config = AnalysisConfig {
            disabled_rules: vec![disabled_name.to_string()],
            ..AnalysisConfig::default()
        };

        let all = analyze_with_config(&buffer, &AnalysisConfig::default()).patterns_found;
        let fewer = analyze_with_config(&buffer, &config).patterns_found;
        let expected: Vec<_> = all
            .into_iter()
            .filter(|hit| hit.rule_name != disabled_name)
            .collect();
        prop_assert_eq!(fewer, expected);
    }

    #[test]
    fn prop_other_languages_never_get_long_function(
        code in source_code(),
        language in prop_oneof![Just("rust"), Just("javascript"), Just("go"), Just("")],
    ) {
        let report = analyze(&code, language, 1);
        prop_assert!(report.patterns_found.iter().all(|hit| hit.rule_name != LONG_FUNCTION_RULE));
    }

    #[test]
    fn prop_scanner_threshold_boundary(threshold in 1usize..40) {
        let at_threshold = std::iter::once("def f():".to_string())
            .chain((0..threshold).map(|i| format!("    x{i} = {i}")))
            .collect::<Vec<_>>()
            .join("\n");
        let over_threshold = format!("{at_threshold}\n    y = 0");

        let count = |code: &str| {
            analyze(code, "python", threshold)
                .patterns_found
                .iter()
                .filter(|hit| hit.rule_name == LONG_FUNCTION_RULE)
                .count()
        };
        prop_assert_eq!(count(&at_threshold), 0);
        prop_assert_eq!(count(&over_threshold), 1);
    }
}
