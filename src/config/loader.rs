use std::fs;
use std::path::{Path, PathBuf};

use super::core::CodebotConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".codebot.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CodebotConfig> {
    let mut config = toml::from_str::<CodebotConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    if config.analysis.long_function_threshold == 0 {
        return Err(Error::Configuration(
            "analysis.long_function_threshold must be at least 1".to_string(),
        ));
    }
    if config.store.default_limit == 0 {
        return Err(Error::Configuration(
            "store.default_limit must be at least 1".to_string(),
        ));
    }

    config.analysis.normalize();
    Ok(config)
}

/// Load a config file the user named explicitly; every failure is an error
pub fn load_config_from(path: &Path) -> Result<CodebotConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file, falling back on any problem
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CodebotConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{e}. Using defaults.");
            None
        }
    }
}

/// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, itself included, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.codebot.toml` from `start` upwards, defaulting when none is usable
pub fn discover_config(start: PathBuf) -> CodebotConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CodebotConfig::default()
        })
}

pub fn load_config() -> CodebotConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CodebotConfig::default()
        }
    }
}

pub const DEFAULT_CONFIG: &str = r#"# Codebot Configuration

[analysis]
# Functions with more body lines than this are reported as long_function
long_function_threshold = 30
# Lines longer than this trigger the "split long lines" suggestion
long_line_threshold = 120
# Code lines without any comment before documentation is suggested
undocumented_code_lines = 20
# Rules to switch off: "TODO/FIXME", "print_debug", "bare_except",
# "hardcoded_secrets", "nested_loops", "long_function"
disabled_rules = []

[store]
path = ".codebot/snippets.json"
default_limit = 20
"#;
