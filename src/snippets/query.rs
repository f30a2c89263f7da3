//! Filtering, ordering and aggregation over stored snippets.

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use super::model::{LatestSnippet, Snippet, SnippetFilter, StoreStats};
use crate::core::{Error, Result};

const STATS_TOP_N: usize = 10;

/// Compile a user supplied expression, case-insensitively
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn compile_optional(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern.map(compile_pattern).transpose()
}

/// Which text fields a free-text search looks at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchScope {
    /// Title, code and description
    Full,
    /// Title and code only
    TitleAndCode,
}

#[derive(Debug)]
pub struct CompiledFilter {
    language: Option<Regex>,
    tag: Option<Regex>,
    search: Option<Regex>,
    scope: SearchScope,
}

impl CompiledFilter {
    pub fn compile(filter: &SnippetFilter, scope: SearchScope) -> Result<Self> {
        Ok(Self {
            language: compile_optional(filter.language.as_deref())?,
            tag: compile_optional(filter.tag.as_deref())?,
            search: compile_optional(filter.search.as_deref())?,
            scope,
        })
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        let language_ok = self
            .language
            .as_ref()
            .is_none_or(|re| re.is_match(&snippet.language));
        let tag_ok = self
            .tag
            .as_ref()
            .is_none_or(|re| snippet.tags.iter().any(|t| re.is_match(t)));
        let search_ok = self.search.as_ref().is_none_or(|re| {
            re.is_match(&snippet.title)
                || re.is_match(&snippet.code)
                || (self.scope == SearchScope::Full && re.is_match(&snippet.description))
        });

        language_ok && tag_ok && search_ok
    }
}

/// Newest first; equal timestamps fall back to the later-allocated id
pub fn sort_newest_first(snippets: &mut [Snippet]) {
    snippets.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn top_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.filter(|v| !v.is_empty()) {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(STATS_TOP_N);
    ranked
}

pub fn compute_stats(snippets: &[&Snippet]) -> StoreStats {
    let languages = top_counts(snippets.iter().map(|s| s.language.as_str()));
    let popular_tags = top_counts(
        snippets
            .iter()
            .flat_map(|s| s.tags.iter().map(String::as_str)),
    );
    let latest_snippet = snippets
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
        .map(|s| LatestSnippet {
            title: s.title.clone(),
            language: s.language.clone(),
            created_at: s.created_at,
        });

    StoreStats {
        total_snippets: snippets.len(),
        languages,
        popular_tags,
        latest_snippet,
    }
}

/// Add tags with set semantics, then remove; true when the list changed
pub fn edit_tags(tags: &mut Vec<String>, add: &[String], remove: &[String]) -> bool {
    let before = tags.clone();
    for tag in add {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags.retain(|t| !remove.contains(t));
    *tags != before
}
