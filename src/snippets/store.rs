use chrono::Utc;

use super::model::{
    BulkTagOutcome, NewSnippet, Snippet, SnippetAnalysis, SnippetFilter, SnippetUpdate, StoreStats,
};
use super::query::{
    compile_pattern, compute_stats, edit_tags, sort_newest_first, CompiledFilter, SearchScope,
};
use crate::analysis::analyze_with_config;
use crate::config::AnalysisConfig;
use crate::core::{Error, Result};

/// Maximum results of a code search
pub const SEARCH_LIMIT: usize = 20;

/// Persistence of snippet records.
///
/// Implementors provide the storage primitives; every user-facing operation
/// is written once on top of them.
pub trait SnippetStore {
    /// All stored snippets, in no particular order
    fn snippets(&self) -> Vec<&Snippet>;

    fn get(&self, id: &str) -> Option<&Snippet>;

    /// Reserve a fresh, never reused id
    fn allocate_id(&mut self) -> String;

    /// Insert or overwrite by id
    fn put(&mut self, snippet: Snippet) -> Result<()>;

    /// Insert or overwrite several records as one write
    fn put_all(&mut self, snippets: Vec<Snippet>) -> Result<()> {
        snippets.into_iter().try_for_each(|s| self.put(s))
    }

    fn remove(&mut self, id: &str) -> Result<Option<Snippet>>;

    fn fetch(&self, id: &str) -> Result<Snippet> {
        self.get(id).cloned().ok_or_else(|| Error::not_found(id))
    }

    fn list(&self, filter: &SnippetFilter, limit: usize) -> Result<Vec<Snippet>> {
        let compiled = CompiledFilter::compile(filter, SearchScope::Full)?;
        let mut found: Vec<Snippet> = self
            .snippets()
            .into_iter()
            .filter(|s| compiled.matches(s))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        found.truncate(limit);
        Ok(found)
    }

    fn create(&mut self, new: NewSnippet) -> Result<Snippet> {
        if new.title.trim().is_empty() {
            return Err(Error::Validation("snippet title must not be empty".into()));
        }

        let now = Utc::now();
        let snippet = Snippet {
            id: self.allocate_id(),
            title: new.title,
            code: new.code,
            language: new.language,
            description: new.description,
            tags: new.tags,
            created_at: now,
            updated_at: now,
            source: "cli".to_string(),
        };
        self.put(snippet.clone())?;
        log::debug!("Created snippet {} ({})", snippet.id, snippet.title);
        Ok(snippet)
    }

    fn update(&mut self, id: &str, update: SnippetUpdate) -> Result<Snippet> {
        let mut snippet = self.fetch(id)?;
        update.apply_to(&mut snippet);
        snippet.updated_at = Utc::now();
        self.put(snippet.clone())?;
        Ok(snippet)
    }

    fn delete(&mut self, id: &str) -> Result<Snippet> {
        let removed = self.remove(id)?.ok_or_else(|| Error::not_found(id))?;
        log::debug!("Deleted snippet {} ({})", removed.id, removed.title);
        Ok(removed)
    }

    /// Regular-expression search over code only
    fn search_code(&self, pattern: &str, language: Option<&str>) -> Result<Vec<Snippet>> {
        let code_pattern = compile_pattern(pattern)?;
        let language_filter = SnippetFilter {
            language: language.map(str::to_string),
            ..SnippetFilter::default()
        };
        let compiled = CompiledFilter::compile(&language_filter, SearchScope::Full)?;

        let mut found: Vec<Snippet> = self
            .snippets()
            .into_iter()
            .filter(|s| code_pattern.is_match(&s.code) && compiled.matches(s))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        found.truncate(SEARCH_LIMIT);
        Ok(found)
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(compute_stats(&self.snippets()))
    }

    /// Add then remove tags on every snippet matching the language and
    /// title/code filters
    fn bulk_tag(
        &mut self,
        filter: &SnippetFilter,
        add: &[String],
        remove: &[String],
    ) -> Result<BulkTagOutcome> {
        let compiled = CompiledFilter::compile(
            &SnippetFilter {
                tag: None,
                ..filter.clone()
            },
            SearchScope::TitleAndCode,
        )?;
        let matching: Vec<Snippet> = self
            .snippets()
            .into_iter()
            .filter(|s| compiled.matches(s))
            .cloned()
            .collect();

        if matching.is_empty() {
            return Err(Error::Validation("no matching snippets".into()));
        }
        if add.is_empty() && remove.is_empty() {
            return Err(Error::Validation("no tags given to add or remove".into()));
        }

        let matched = matching.len();
        let now = Utc::now();
        let changed: Vec<Snippet> = matching
            .into_iter()
            .filter_map(|mut snippet| {
                edit_tags(&mut snippet.tags, add, remove).then(|| {
                    snippet.updated_at = now;
                    snippet
                })
            })
            .collect();
        let modified = changed.len();
        self.put_all(changed)?;

        log::debug!("Bulk tagging modified {modified} of {matched} snippets");
        Ok(BulkTagOutcome { matched, modified })
    }

    fn analyze(&self, id: &str, config: &AnalysisConfig) -> Result<SnippetAnalysis> {
        let snippet = self.get(id).ok_or_else(|| Error::not_found(id))?;
        let report = analyze_with_config(&snippet.source_buffer(), config);
        Ok(SnippetAnalysis::new(snippet, report))
    }
}
