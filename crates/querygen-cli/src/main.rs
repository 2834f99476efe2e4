//! `querygen`: generate parameter structs for interpolated Go query constants.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use querygen_analysis::{Pipeline, RunOutcome};
use querygen_core::config::CliOverrides;
use querygen_core::errors::{PipelineError, PipelineResult, QuerygenErrorCode};
use querygen_core::QuerygenConfig;

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// `path:line:col: severity: message`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Scan Go sources for query templates and keep their `_query_gen.go`
/// companions in sync.
#[derive(Parser, Debug)]
#[command(name = "querygen", author, version, about, long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn or error (QUERYGEN_LOG overrides)
    #[arg(long, value_name = "LEVEL", default_value = querygen_core::tracing::DEFAULT_LEVEL)]
    log_level: String,

    /// Worker threads for parsing and analysis
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Skip `_test.go` files
    #[arg(long)]
    exclude_tests: bool,

    /// Import path of the package defining `QueryParams`
    #[arg(long, value_name = "IMPORT_PATH")]
    runtime_import_path: Option<String>,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: OutputFormat,

    /// Go files or directories to process
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    querygen_core::tracing::init_tracing(Some(&args.log_level));

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("querygen: {}", e.coded_string());
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, PipelineError> {
    let overrides = CliOverrides {
        scan_threads: args.threads,
        include_tests: args.exclude_tests.then_some(false),
        runtime_import_path: args.runtime_import_path.clone(),
    };
    let config = QuerygenConfig::load(Path::new("."), Some(&overrides))?;
    tracing::debug!(?config, "resolved configuration");

    let result = Pipeline::new(config).run(&args.paths)?;
    report(&result, args.format);

    let outcome = &result.data;
    let failed = !outcome.diagnostics.is_empty() || !result.is_clean() || outcome.summary.sync.failed > 0;
    Ok(if failed { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

fn report(result: &PipelineResult<RunOutcome>, format: OutputFormat) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let outcome = &result.data;
    let summary = &outcome.summary;

    match format {
        OutputFormat::Text => {
            for diagnostic in &outcome.diagnostics {
                let _ = writeln!(stdout, "{diagnostic}");
            }
            for error in &result.errors {
                let _ = writeln!(stderr, "querygen: {}", error.coded_string());
            }
            let _ = writeln!(
                stderr,
                "querygen: {} files ({} discovered in {} ms), {} packages, {} queries, \
                 {} param structs; {} created, {} updated, {} unchanged, {} deleted, \
                 {} failed ({} ms)",
                summary.files_scanned,
                summary.scan.files_discovered,
                summary.scan.discovery_ms,
                summary.packages,
                summary.queries_found,
                summary.descriptor_sets,
                summary.sync.created,
                summary.sync.updated,
                summary.sync.unchanged,
                summary.sync.deleted,
                summary.sync.failed,
                summary.duration_ms,
            );
        }
        OutputFormat::Json => {
            for diagnostic in &outcome.diagnostics {
                if let Ok(line) = serde_json::to_string(diagnostic) {
                    let _ = writeln!(stdout, "{line}");
                }
            }
            for error in &result.errors {
                let line = serde_json::json!({
                    "code": error.error_code(),
                    "message": error.to_string(),
                });
                let _ = writeln!(stderr, "{line}");
            }
            if let Ok(line) = serde_json::to_string(summary) {
                let _ = writeln!(stderr, "{line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["querygen"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
        assert_eq!(args.log_level, "info");
        assert!(matches!(args.format, OutputFormat::Text));
        assert!(!args.exclude_tests);
    }

    #[test]
    fn flags_and_paths() {
        let args = Args::try_parse_from([
            "querygen",
            "--threads",
            "4",
            "--format",
            "json",
            "--exclude-tests",
            "internal/store",
            "cmd/api/main.go",
        ])
        .unwrap();
        assert_eq!(args.threads, Some(4));
        assert!(matches!(args.format, OutputFormat::Json));
        assert!(args.exclude_tests);
        assert_eq!(args.paths.len(), 2);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["querygen", "--format", "xml"]).is_err());
    }
}
