//! Snippet records and the stores that keep them.
//!
//! The analysis engine never reaches in here; callers fetch a [`Snippet`],
//! hand its [`SourceBuffer`](crate::core::SourceBuffer) to the engine and
//! decide what to do with the report.

mod json_file;
mod memory;
mod model;
pub mod query;
mod store;

pub use json_file::JsonFileStore;
pub use memory::{format_id, MemoryStore};
pub use model::{
    BulkTagOutcome, LatestSnippet, NewSnippet, Snippet, SnippetAnalysis, SnippetFilter,
    SnippetUpdate, StoreStats,
};
pub use store::{SnippetStore, SEARCH_LIMIT};
