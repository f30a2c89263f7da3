mod core;
mod loader;
mod thresholds;

pub use core::{CodebotConfig, StoreConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME, DEFAULT_CONFIG,
};
pub use thresholds::AnalysisConfig;
