use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::Snippet;
use super::store::SnippetStore;
use crate::core::Result;

/// Snippets held in process memory
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    next_id: u64,
    snippets: BTreeMap<String, Snippet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Ids are 24 lowercase hex digits, the width of a document database key
pub fn format_id(n: u64) -> String {
    format!("{n:024x}")
}

impl SnippetStore for MemoryStore {
    fn snippets(&self) -> Vec<&Snippet> {
        self.snippets.values().collect()
    }

    fn get(&self, id: &str) -> Option<&Snippet> {
        self.snippets.get(id)
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format_id(self.next_id)
    }

    fn put(&mut self, snippet: Snippet) -> Result<()> {
        self.snippets.insert(snippet.id.clone(), snippet);
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<Option<Snippet>> {
        Ok(self.snippets.remove(id))
    }
}
