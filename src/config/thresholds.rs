use serde::{Deserialize, Serialize};

use crate::analysis::patterns::{is_known_rule, LONG_FUNCTION_RULE};

/// Knobs of the analysis engine, passed explicitly into every call.
///
/// The defaults reproduce the fixed behaviour of the engine: functions over
/// 30 body lines are long, lines over 120 characters are long, and more than
/// 20 code lines without a single comment earn a documentation suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_long_function_threshold")]
    pub long_function_threshold: usize,

    #[serde(default = "default_long_line_threshold")]
    pub long_line_threshold: usize,

    #[serde(default = "default_undocumented_code_lines")]
    pub undocumented_code_lines: usize,

    /// Rule names switched off (e.g. `"print_debug"`, `"long_function"`)
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            long_function_threshold: default_long_function_threshold(),
            long_line_threshold: default_long_line_threshold(),
            undocumented_code_lines: default_undocumented_code_lines(),
            disabled_rules: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            long_function_threshold: threshold,
            ..Self::default()
        }
    }

    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r == rule_name)
    }

    pub fn scans_functions(&self) -> bool {
        self.is_rule_enabled(LONG_FUNCTION_RULE)
    }

    /// Drop rule names nothing would ever match, warning about each one
    pub fn normalize(&mut self) {
        self.disabled_rules.retain(|name| {
            let known = is_known_rule(name);
            if !known {
                log::warn!("Ignoring unknown rule '{name}' in disabled_rules");
            }
            known
        });
    }
}

fn default_long_function_threshold() -> usize {
    30
}
fn default_long_line_threshold() -> usize {
    120
}
fn default_undocumented_code_lines() -> usize {
    20
}
