use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{analysis_config, is_stdin, read_input};
use crate::analysis::analyze_batch;
use crate::config::AnalysisConfig;
use crate::core::{Language, SourceBuffer};
use crate::io::output::{create_writer, OutputFormat, ReportSubject};

/// Language assumed for standard input when none is given
const STDIN_LANGUAGE: &str = "python";

pub struct AnalyzeArgs {
    pub paths: Vec<PathBuf>,
    pub language: Option<String>,
    pub threshold: Option<usize>,
    pub format: OutputFormat,
}

#[derive(Debug)]
struct LoadedSource {
    subject: ReportSubject,
    code: String,
    language: String,
}

/// Language tag for `path`, explicit tags win over detection
fn resolve_language(path: &Path, explicit: Option<&str>) -> String {
    match explicit {
        Some(tag) => tag.to_string(),
        None if is_stdin(path) => STDIN_LANGUAGE.to_string(),
        None => Language::from_path(path).tag().to_string(),
    }
}

fn load_source(path: &Path, explicit_language: Option<&str>) -> Result<LoadedSource> {
    let code = read_input(path)?;
    let language = resolve_language(path, explicit_language);
    log::info!("Analyzing {} as {}", path.display(), language);
    Ok(LoadedSource {
        subject: ReportSubject::file(path.display().to_string(), language.clone()),
        code,
        language,
    })
}

pub fn handle_analyze(args: AnalyzeArgs, base: &AnalysisConfig) -> Result<()> {
    let config = analysis_config(base, args.threshold);

    let sources = args
        .paths
        .iter()
        .map(|path| load_source(path, args.language.as_deref()))
        .collect::<Result<Vec<_>>>()?;

    let buffers: Vec<SourceBuffer<'_>> = sources
        .iter()
        .map(|s| SourceBuffer::new(&s.code, &s.language))
        .collect();
    let reports = analyze_batch(&buffers, &config);

    let mut writer = create_writer(args.format);
    let labeled: Vec<_> = sources
        .into_iter()
        .map(|s| s.subject)
        .zip(reports)
        .collect();
    match labeled.as_slice() {
        [(subject, report)] => writer.write_report(subject, report),
        _ => writer.write_reports(&labeled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language(Path::new("a.py"), None), "python");
        assert_eq!(resolve_language(Path::new("a.js"), None), "javascript");
        assert_eq!(resolve_language(Path::new("notes.txt"), None), "unknown");
        assert_eq!(resolve_language(Path::new("-"), None), "python");
        assert_eq!(resolve_language(Path::new("a.py"), Some("Python3")), "Python3");
    }

    #[test]
    fn test_load_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.py");
        std::fs::write(&path, "print('hi')").unwrap();

        let loaded = load_source(&path, None).unwrap();
        assert_eq!(loaded.code, "print('hi')");
        assert_eq!(loaded.language, "python");
        assert_eq!(loaded.subject.path, Some(path.display().to_string()));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load_source(Path::new("definitely/missing.py"), None).unwrap_err();
        assert!(err.to_string().contains("definitely/missing.py"));
    }
}
