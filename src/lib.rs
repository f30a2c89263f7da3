// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod prompts;
pub mod snippets;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, Error, Finding, Language, MetricSet, PatternHit, Result, SourceBuffer,
};

pub use crate::analysis::{analyze, analyze_batch, analyze_with_config};

pub use crate::config::{AnalysisConfig, CodebotConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::snippets::{
    JsonFileStore, MemoryStore, NewSnippet, Snippet, SnippetAnalysis, SnippetFilter,
    SnippetStore, SnippetUpdate, StoreStats,
};
