//! End-to-end run: discover, parse, analyze in parallel, then synchronize
//! companion files sequentially.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use querygen_core::config::QuerygenConfig;
use querygen_core::errors::{PipelineError, PipelineResult};
use querygen_core::types::collections::FxHashSet;
use rayon::prelude::*;
use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::host::gomod::package_import_path;
use crate::host::AnalysisContext;
use crate::parsers::{read_and_parse, GoFile};
use crate::scanner::{ScanStats, Scanner};
use crate::sync::{companion_path, is_companion_path, sync_all, CompanionArtifact, SyncSummary};
use crate::visitor::{analyze_file, FileAnalysis};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub scan: ScanStats,
    pub files_scanned: usize,
    pub packages: usize,
    pub queries_found: usize,
    pub descriptor_sets: usize,
    pub diagnostics: usize,
    pub errors: usize,
    pub sync: SyncSummary,
    pub duration_ms: u64,
}

/// Diagnostics plus summary. Non-fatal errors travel alongside in the
/// enclosing `PipelineResult`.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Pipeline {
    config: QuerygenConfig,
}

impl Pipeline {
    pub fn new(config: QuerygenConfig) -> Self {
        Self { config }
    }

    /// Run over `inputs` (files or directories).
    ///
    /// Only setup failures are returned as `Err`: nothing to scan, a bad
    /// ignore glob, or a worker pool that cannot start.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<PipelineResult<RunOutcome>, PipelineError> {
        let start = Instant::now();
        let mut result = PipelineResult::<RunOutcome>::default();

        let scan = Scanner::new(self.config.scan.clone()).scan(inputs)?;
        for e in scan.errors {
            result.add_error(e);
        }
        result.data.summary.scan = scan.stats;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.scan.threads.unwrap_or(0))
            .build()
            .map_err(|e| PipelineError::ThreadPool {
                message: e.to_string(),
            })?;

        let parsed: Vec<Result<GoFile, PipelineError>> =
            pool.install(|| scan.files.par_iter().map(|f| read_and_parse(&f.path)).collect());

        let mut unreadable: FxHashSet<PathBuf> = FxHashSet::default();
        let mut files = Vec::with_capacity(parsed.len());
        for (discovered, parsed) in scan.files.iter().zip(parsed) {
            match parsed {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!(path = %discovered.path.display(), error = %e, "skipping file");
                    unreadable.insert(discovered.path.clone());
                    result.add_error(e);
                }
            }
        }
        result.data.summary.files_scanned = files.len();

        let contexts = group_packages(files);
        result.data.summary.packages = contexts.len();

        let tasks: Vec<(usize, usize)> = contexts
            .iter()
            .enumerate()
            .flat_map(|(c, ctx)| {
                ctx.units()
                    .iter()
                    .enumerate()
                    .filter(|(_, unit)| !is_companion_path(&unit.file.path))
                    .map(move |(f, _)| (c, f))
            })
            .collect();
        let analyses: Vec<FileAnalysis> =
            pool.install(|| tasks.par_iter().map(|&(c, f)| analyze_file(&contexts[c], f)).collect());

        let runtime_path = self.config.codegen.effective_runtime_import_path();
        let mut artifacts: BTreeMap<PathBuf, CompanionArtifact> = BTreeMap::new();
        for ctx in &contexts {
            let runtime_import = runtime_import_for(ctx, runtime_path);
            for unit in ctx.units().iter().filter(|u| is_companion_path(&u.file.path)) {
                artifacts.insert(
                    unit.file.path.clone(),
                    CompanionArtifact {
                        path: unit.file.path.clone(),
                        existing_preamble: Some(unit.file.preamble_lines()),
                        wanted: Vec::new(),
                        package: unit.file.package.clone(),
                        runtime_import: runtime_import.clone(),
                    },
                );
            }
        }

        for (&(c, _), analysis) in tasks.iter().zip(analyses) {
            let summary = &mut result.data.summary;
            summary.queries_found += analysis.queries_found;
            summary.descriptor_sets += analysis.wanted.len();
            result.data.diagnostics.extend(analysis.diagnostics);
            if analysis.wanted.is_empty() {
                continue;
            }

            let path = companion_path(&analysis.path);
            if let Some(artifact) = artifacts.get_mut(&path) {
                artifact.wanted = analysis.wanted;
                continue;
            }
            if unreadable.contains(&path) {
                continue;
            }
            let existing_preamble = if path.exists() {
                match read_and_parse(&path) {
                    Ok(existing) => Some(existing.preamble_lines()),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "cannot read existing companion");
                        result.add_error(e);
                        continue;
                    }
                }
            } else {
                None
            };
            artifacts.insert(
                path.clone(),
                CompanionArtifact {
                    path,
                    existing_preamble,
                    wanted: analysis.wanted,
                    package: analysis.package,
                    runtime_import: runtime_import_for(&contexts[c], runtime_path),
                },
            );
        }

        let sync = sync_all(artifacts.values());
        result.data.summary.sync = sync.data;
        for e in sync.errors {
            result.add_error(e);
        }

        result.data.diagnostics.sort_by(|a, b| {
            (&a.path, a.line, a.column, a.severity).cmp(&(&b.path, b.line, b.column, b.severity))
        });
        let summary = &mut result.data.summary;
        summary.diagnostics = result.data.diagnostics.len();
        summary.errors = result.errors.len();
        summary.duration_ms = start.elapsed().as_millis() as u64;

        if summary.sync.created != 0 || summary.sync.updated != 0 {
            tracing::info!(
                files_created = summary.sync.created,
                files_updated = summary.sync.updated,
                files_deleted = summary.sync.deleted,
                "querygen codegen summary"
            );
        }
        Ok(result)
    }
}

/// Group files into packages: same directory and same package clause.
fn group_packages(files: Vec<GoFile>) -> Vec<AnalysisContext> {
    let mut groups: BTreeMap<(PathBuf, String), Vec<GoFile>> = BTreeMap::new();
    for file in files {
        let key = (file.directory().to_path_buf(), file.package.clone());
        groups.entry(key).or_default().push(file);
    }
    groups
        .into_iter()
        .map(|((dir, package), files)| {
            let import_path = package_import_path(&dir);
            tracing::debug!(dir = %dir.display(), package = %package, import_path = ?import_path, "grouped package");
            AnalysisContext::new(package, import_path, files)
        })
        .collect()
}

/// The runtime import is left out only inside the runtime package itself;
/// its external `_test` package still imports it.
fn runtime_import_for(ctx: &AnalysisContext, runtime_path: &str) -> Option<String> {
    let is_runtime_package =
        ctx.import_path() == Some(runtime_path) && !ctx.package().ends_with("_test");
    (!is_runtime_package).then(|| runtime_path.to_string())
}
