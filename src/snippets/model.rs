use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AnalysisReport, MetricSet, PatternHit, SourceBuffer};

/// A stored code fragment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_source")]
    pub source: String,
}

impl Snippet {
    pub fn source_buffer(&self) -> SourceBuffer<'_> {
        SourceBuffer::new(&self.code, &self.language)
    }
}

fn default_source() -> String {
    "cli".to_string()
}

/// Fields of a snippet about to be created
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewSnippet {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            language: default_language(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

fn default_language() -> String {
    "python".to_string()
}

/// Partial update; only `Some` fields are applied
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetUpdate {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl SnippetUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.code.is_none()
            && self.language.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }

    pub(crate) fn apply_to(self, snippet: &mut Snippet) {
        if let Some(title) = self.title {
            snippet.title = title;
        }
        if let Some(code) = self.code {
            snippet.code = code;
        }
        if let Some(language) = self.language {
            snippet.language = language;
        }
        if let Some(description) = self.description {
            snippet.description = description;
        }
        if let Some(tags) = self.tags {
            snippet.tags = tags;
        }
    }
}

/// Case-insensitive regular-expression filters; `None` matches everything
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetFilter {
    pub language: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Report of a stored snippet, with the snippet's identity alongside
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnippetAnalysis {
    pub snippet_id: String,
    pub title: String,
    pub language: String,
    pub metrics: MetricSet,
    pub patterns_found: Vec<PatternHit>,
    pub suggestions: Vec<String>,
}

impl SnippetAnalysis {
    pub fn new(snippet: &Snippet, report: AnalysisReport) -> Self {
        Self {
            snippet_id: snippet.id.clone(),
            title: snippet.title.clone(),
            language: snippet.language.to_lowercase(),
            metrics: report.metrics,
            patterns_found: report.patterns_found,
            suggestions: report.suggestions,
        }
    }

    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            metrics: self.metrics.clone(),
            patterns_found: self.patterns_found.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSnippet {
    pub title: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate view of the store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_snippets: usize,
    /// Most used languages, by count descending
    pub languages: Vec<(String, usize)>,
    /// Most used tags, by count descending
    pub popular_tags: Vec<(String, usize)>,
    pub latest_snippet: Option<LatestSnippet>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTagOutcome {
    pub matched: usize,
    pub modified: usize,
}
