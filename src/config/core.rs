use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::thresholds::AnalysisConfig;

/// Root configuration structure, read from `.codebot.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebotConfig {
    /// Analysis engine settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Snippet store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Where snippets live and how many a listing returns by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            default_limit: default_limit(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".codebot/snippets.json")
}

fn default_limit() -> usize {
    20
}
