use anyhow::{anyhow, bail, Result};
use colored::*;
use std::io::Write;

use super::{analysis_config, read_input, Environment};
use crate::analysis::analyze_batch;
use crate::cli::{CodeSource, FilterArgs, SnippetCommand};
use crate::io::output::{writer_for, ReportSubject};
use crate::prompts::stats_summary;
use crate::snippets::{
    NewSnippet, Snippet, SnippetAnalysis, SnippetFilter, SnippetStore, SnippetUpdate,
};

pub fn handle_snippet(action: SnippetCommand, env: &Environment) -> Result<()> {
    let mut store = env.open_store()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_snippet_command(action, &mut store, env, &mut out)
}

fn read_code(source: &CodeSource) -> Result<Option<String>> {
    match (&source.code, &source.file) {
        (Some(code), _) => Ok(Some(code.clone())),
        (None, Some(path)) => read_input(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn to_filter(filter: FilterArgs, tag: Option<String>) -> SnippetFilter {
    SnippetFilter {
        language: filter.language,
        tag,
        search: filter.search,
    }
}

/// Execute one snippet subcommand against `store`, writing to `out`
pub fn run_snippet_command<S: SnippetStore, W: Write>(
    action: SnippetCommand,
    store: &mut S,
    env: &Environment,
    out: &mut W,
) -> Result<()> {
    match action {
        SnippetCommand::Add {
            title,
            source,
            language,
            description,
            tags,
        } => {
            let code = read_code(&source)?
                .ok_or_else(|| anyhow!("snippet code is required: pass --code or --file"))?;
            let snippet = store.create(
                NewSnippet::new(title, code)
                    .language(language)
                    .description(description)
                    .tags(tags),
            )?;
            log::info!("Stored snippet {} in {}", snippet.id, env.store_path.display());
            writeln!(out, "{}", snippet.id)?;
        }
        SnippetCommand::Get { id, json } => {
            let snippet = store.fetch(&id)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&snippet)?)?;
            } else {
                write_snippet(out, &snippet)?;
            }
        }
        SnippetCommand::List {
            filter,
            tag,
            limit,
            json,
        } => {
            let limit = limit.unwrap_or(env.config.store.default_limit);
            let snippets = store.list(&to_filter(filter, tag), limit)?;
            write_listing(out, &snippets, json)?;
        }
        SnippetCommand::Update {
            id,
            title,
            source,
            language,
            description,
            tags,
        } => {
            let update = SnippetUpdate {
                title,
                code: read_code(&source)?,
                language,
                description,
                tags,
            };
            if update.is_empty() {
                bail!("nothing to update: pass at least one field");
            }
            let snippet = store.update(&id, update)?;
            writeln!(out, "Updated snippet {} ({})", snippet.id, snippet.title)?;
        }
        SnippetCommand::Delete { id } => {
            let removed = store.delete(&id)?;
            writeln!(out, "Deleted snippet {} ({})", removed.id, removed.title)?;
        }
        SnippetCommand::Search {
            pattern,
            language,
            json,
        } => {
            let snippets = store.search_code(&pattern, language.as_deref())?;
            write_listing(out, &snippets, json)?;
        }
        SnippetCommand::Stats { json } => {
            let stats = store.stats()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                writeln!(out, "{}", stats_summary(&stats))?;
                if let Some(latest) = &stats.latest_snippet {
                    writeln!(
                        out,
                        "Latest: {} ({}, {})",
                        latest.title,
                        latest.language,
                        latest.created_at.to_rfc3339()
                    )?;
                }
            }
        }
        SnippetCommand::Tag {
            filter,
            add,
            remove,
        } => {
            let outcome = store.bulk_tag(&to_filter(filter, None), &add, &remove)?;
            writeln!(
                out,
                "Tagged {} of {} matching snippets",
                outcome.modified, outcome.matched
            )?;
        }
        SnippetCommand::Analyze {
            id,
            all,
            threshold,
            format,
        } => {
            let config = analysis_config(
                &env.config.analysis,
                threshold.map(|t| t as usize),
            );
            let mut writer = writer_for(format.into(), &mut *out);

            if all {
                let snippets = store.list(&SnippetFilter::default(), usize::MAX)?;
                let buffers: Vec<_> = snippets.iter().map(Snippet::source_buffer).collect();
                let labeled: Vec<_> = snippets
                    .iter()
                    .zip(analyze_batch(&buffers, &config))
                    .map(|(snippet, report)| {
                        let analysis = SnippetAnalysis::new(snippet, report);
                        (ReportSubject::snippet(&analysis), analysis.report())
                    })
                    .collect();
                writer.write_reports(&labeled)?;
            } else if let Some(id) = id {
                let analysis = store.analyze(&id, &config)?;
                writer.write_report(&ReportSubject::snippet(&analysis), &analysis.report())?;
            }
        }
    }
    Ok(())
}

fn write_snippet<W: Write>(out: &mut W, snippet: &Snippet) -> Result<()> {
    writeln!(out, "{} {}", snippet.id.dimmed(), snippet.title.bold())?;
    writeln!(out, "  language: {}", snippet.language)?;
    if !snippet.tags.is_empty() {
        writeln!(out, "  tags: {}", snippet.tags.join(", "))?;
    }
    if !snippet.description.is_empty() {
        writeln!(out, "  description: {}", snippet.description)?;
    }
    writeln!(
        out,
        "  created: {}  updated: {}",
        snippet.created_at.to_rfc3339(),
        snippet.updated_at.to_rfc3339()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", snippet.code)?;
    Ok(())
}

fn write_listing<W: Write>(out: &mut W, snippets: &[Snippet], json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(snippets)?)?;
        return Ok(());
    }

    for snippet in snippets {
        let tags = if snippet.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", snippet.tags.join(", "))
        };
        writeln!(
            out,
            "{}  {:<10}  {}{}",
            snippet.id.dimmed(),
            snippet.language,
            snippet.title,
            tags.cyan()
        )?;
    }
    if snippets.is_empty() {
        writeln!(out, "No snippets found")?;
    }
    Ok(())
}
