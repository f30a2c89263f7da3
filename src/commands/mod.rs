//! CLI command implementations for codebot operations.
//!
//! Available commands:
//! - **analyze**: Analyze source files with the analysis engine
//! - **snippet**: Manage and analyze stored snippets
//! - **prompt**: Print agent prompt templates
//! - **init**: Initialize a new codebot configuration file

pub mod analyze;
pub mod init;
pub mod prompt;
pub mod snippet;

pub use analyze::{handle_analyze, AnalyzeArgs};
pub use init::init_config;
pub use prompt::handle_prompt;
pub use snippet::handle_snippet;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{self, AnalysisConfig, CodebotConfig};
use crate::snippets::{JsonFileStore, SnippetStore};

/// Resolved configuration shared by every command
#[derive(Debug, Clone)]
pub struct Environment {
    pub config: CodebotConfig,
    pub store_path: PathBuf,
}

impl Environment {
    /// An explicit config file must load; a discovered one falls back to defaults
    pub fn resolve(config_path: Option<&Path>, store_override: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::load_config_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config::load_config(),
        };
        let store_path = store_override.unwrap_or_else(|| config.store.path.clone());
        Ok(Self { config, store_path })
    }

    pub fn open_store(&self) -> Result<JsonFileStore> {
        let store = JsonFileStore::open(&self.store_path)
            .with_context(|| format!("Failed to open store {}", self.store_path.display()))?;
        log::info!(
            "Using store {} ({} snippets)",
            store.path().display(),
            store.snippets().len()
        );
        Ok(store)
    }
}

/// Whether `path` names standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a file, or standard input for `-`.
///
/// Invalid UTF-8 is replaced rather than rejected so the engine still sees
/// the rest of the text.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = if is_stdin(path) {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read standard input")?;
        buffer
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(decode_lossy(bytes))
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Input is not valid UTF-8; replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Configured analysis settings with an optional command-line threshold
pub fn analysis_config(base: &AnalysisConfig, threshold: Option<usize>) -> AnalysisConfig {
    let mut config = base.clone();
    if let Some(threshold) = threshold {
        config.long_function_threshold = threshold;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_input_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.py");
        std::fs::write(&path, b"name = 'caf\xe9'\nprint(name)\n").unwrap();

        let text = read_input(&path).unwrap();
        assert_eq!(text, "name = 'caf\u{fffd}'\nprint(name)\n");
    }

    #[test]
    fn test_read_input_keeps_valid_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.py");
        std::fs::write(&path, "x = 'é'\n").unwrap();
        assert_eq!(read_input(&path).unwrap(), "x = 'é'\n");
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_input(Path::new("does/not/exist.py")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.py"));
    }

    #[test]
    fn test_threshold_override() {
        let base = AnalysisConfig::default();
        assert_eq!(analysis_config(&base, Some(5)).long_function_threshold, 5);
        assert_eq!(analysis_config(&base, None), base);
    }
}
