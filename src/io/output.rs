use crate::core::{AnalysisReport, PatternHit};
use crate::snippets::SnippetAnalysis;
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// What a report was computed for
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ReportSubject {
    pub fn file(path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            language: Some(language.into()),
            ..Self::default()
        }
    }

    pub fn snippet(analysis: &SnippetAnalysis) -> Self {
        Self {
            snippet_id: Some(analysis.snippet_id.clone()),
            title: Some(analysis.title.clone()),
            language: Some(analysis.language.clone()),
            ..Self::default()
        }
    }

    fn heading(&self) -> String {
        match (&self.title, &self.path, &self.snippet_id) {
            (Some(title), _, Some(id)) => format!("{title} ({id})"),
            (Some(title), _, None) => title.clone(),
            (None, Some(path), _) => path.clone(),
            (None, None, Some(id)) => id.clone(),
            (None, None, None) => "<input>".to_string(),
        }
    }
}

#[derive(Serialize)]
struct LabeledReport<'a> {
    #[serde(flatten)]
    subject: &'a ReportSubject,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

pub trait OutputWriter {
    fn write_report(&mut self, subject: &ReportSubject, report: &AnalysisReport)
        -> anyhow::Result<()>;

    fn write_reports(&mut self, reports: &[(ReportSubject, AnalysisReport)]) -> anyhow::Result<()> {
        reports
            .iter()
            .try_for_each(|(subject, report)| self.write_report(subject, report))
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(
        &mut self,
        subject: &ReportSubject,
        report: &AnalysisReport,
    ) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&LabeledReport { subject, report })?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    /// Batches are one JSON array rather than a stream of documents
    fn write_reports(&mut self, reports: &[(ReportSubject, AnalysisReport)]) -> anyhow::Result<()> {
        let labeled: Vec<_> = reports
            .iter()
            .map(|(subject, report)| LabeledReport { subject, report })
            .collect();
        let json = serde_json::to_string_pretty(&labeled)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(
        &mut self,
        subject: &ReportSubject,
        report: &AnalysisReport,
    ) -> anyhow::Result<()> {
        self.write_header(subject)?;
        self.write_metrics(report)?;
        self.write_patterns(&report.patterns_found)?;
        self.write_suggestions(&report.suggestions)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, subject: &ReportSubject) -> anyhow::Result<()> {
        writeln!(self.writer, "# Code Analysis: {}", subject.heading())?;
        writeln!(self.writer)?;
        if let Some(language) = &subject.language {
            writeln!(self.writer, "Language: {language}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_metrics(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let m = &report.metrics;
        writeln!(self.writer, "## Metrics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Total lines", &m.total_lines.to_string())?;
        self.write_row("Code lines", &m.code_lines.to_string())?;
        self.write_row("Empty lines", &m.empty_lines.to_string())?;
        self.write_row("Comment lines", &m.comment_lines.to_string())?;
        self.write_row("Longest line", &m.max_line_length.to_string())?;
        self.write_row("Average line length", &m.avg_line_length.to_string())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_patterns(&mut self, patterns: &[PatternHit]) -> anyhow::Result<()> {
        if patterns.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Patterns Found")?;
        writeln!(self.writer)?;
        for hit in patterns {
            writeln!(self.writer, "- `{}`: {}", hit.rule_name, finding_text(hit))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_suggestions(&mut self, suggestions: &[String]) -> anyhow::Result<()> {
        if suggestions.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Suggestions")?;
        writeln!(self.writer)?;
        for (i, suggestion) in suggestions.iter().enumerate() {
            writeln!(self.writer, "{}. {suggestion}", i + 1)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(
        &mut self,
        subject: &ReportSubject,
        report: &AnalysisReport,
    ) -> anyhow::Result<()> {
        let heading = subject.heading();
        writeln!(self.writer, "{}", heading.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(heading.chars().count()).blue())?;

        let m = &report.metrics;
        writeln!(self.writer, "{}:", "Metrics".bold())?;
        writeln!(
            self.writer,
            "  Lines: {} total, {} code, {} empty, {} comment",
            m.total_lines, m.code_lines, m.empty_lines, m.comment_lines
        )?;
        writeln!(
            self.writer,
            "  Line length: max {}, avg {}",
            m.max_line_length, m.avg_line_length
        )?;

        if !report.patterns_found.is_empty() {
            writeln!(self.writer, "{}:", "Patterns".bold())?;
            for hit in &report.patterns_found {
                writeln!(
                    self.writer,
                    "  {} {}",
                    hit.rule_name.yellow(),
                    finding_text(hit)
                )?;
            }
        }

        if !report.suggestions.is_empty() {
            writeln!(self.writer, "{}:", "Suggestions".bold())?;
            for suggestion in &report.suggestions {
                writeln!(self.writer, "  - {suggestion}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_reports(&mut self, reports: &[(ReportSubject, AnalysisReport)]) -> anyhow::Result<()> {
        for (subject, report) in reports {
            self.write_report(subject, report)?;
        }
        let flagged = reports
            .iter()
            .filter(|(_, report)| !report.patterns_found.is_empty())
            .count();
        let status = if flagged == 0 {
            "clean".green().bold()
        } else {
            "flagged".yellow().bold()
        };
        writeln!(
            self.writer,
            "{} of {} analyzed: {status}",
            flagged,
            reports.len()
        )?;
        Ok(())
    }
}

fn finding_text(hit: &PatternHit) -> String {
    match (hit.match_count(), hit.detail_text()) {
        (Some(1), _) => "1 match".to_string(),
        (Some(count), _) => format!("{count} matches"),
        (None, Some(detail)) => detail.to_string(),
        (None, None) => String::new(),
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    writer_for(format, std::io::stdout())
}

pub fn writer_for<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
