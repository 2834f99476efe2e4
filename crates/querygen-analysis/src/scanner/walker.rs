//! Directory walking with the `ignore` crate.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use querygen_core::config::ScanConfig;
use querygen_core::errors::ScanError;
use querygen_core::types::collections::FxHashSet;

use super::types::{DiscoveredFile, ScanResult};
use crate::sync::naming::is_companion_path;

/// Directories the go tool never builds from.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["vendor/", "testdata/"];

/// Finds Go sources under a set of input paths.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Discover every `.go` file reachable from `inputs`.
    ///
    /// Files are returned sorted and deduplicated. Unreadable entries are
    /// collected in `ScanResult::errors`; an invalid ignore glob or an empty
    /// result is fatal.
    pub fn scan(&self, inputs: &[PathBuf]) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let mut result = ScanResult::default();
        let mut seen: FxHashSet<PathBuf> = FxHashSet::default();

        for input in inputs {
            match std::fs::metadata(input) {
                Ok(meta) if meta.is_dir() => {
                    self.walk_dir(input, &mut seen, &mut result)?;
                }
                Ok(_) => {
                    if is_go_source(input) {
                        self.accept(input.clone(), &mut seen, &mut result);
                    }
                }
                Err(source) => result.errors.push(ScanError::IoError {
                    path: input.clone(),
                    source,
                }),
            }
        }

        if result.files.is_empty() {
            return Err(ScanError::NoInputs);
        }

        result.files.sort();
        result.stats.files_discovered = result.files.len();
        result.stats.discovery_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            files = result.stats.files_discovered,
            companions = result.stats.companions,
            tests_skipped = result.stats.tests_skipped,
            "discovery complete"
        );
        Ok(result)
    }

    fn walk_dir(
        &self,
        root: &Path,
        seen: &mut FxHashSet<PathBuf>,
        result: &mut ScanResult,
    ) -> Result<(), ScanError> {
        let ignores = build_ignores(root, &self.config.extra_ignore)?;
        let respect = self.config.effective_respect_gitignore();

        let mut walker = WalkBuilder::new(root);
        walker
            .hidden(true)
            .follow_links(self.config.effective_follow_symlinks())
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .require_git(false);

        let root_owned = root.to_path_buf();
        walker.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let relative = entry.path().strip_prefix(&root_owned).unwrap_or(entry.path());
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !ignores.matched(relative, is_dir).is_ignore()
        });

        for entry in walker.build() {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && is_go_source(entry.path()) {
                        self.accept(entry.into_path(), seen, result);
                    }
                }
                Err(e) => result.errors.push(ScanError::Walk {
                    message: e.to_string(),
                }),
            }
        }
        Ok(())
    }

    fn accept(&self, path: PathBuf, seen: &mut FxHashSet<PathBuf>, result: &mut ScanResult) {
        if !self.config.effective_include_tests() && is_test_file(&path) {
            result.stats.tests_skipped += 1;
            return;
        }
        if !seen.insert(path.clone()) {
            return;
        }
        let is_companion = is_companion_path(&path);
        if is_companion {
            result.stats.companions += 1;
        }
        result.files.push(DiscoveredFile { path, is_companion });
    }
}

fn build_ignores(root: &Path, extra: &[String]) -> Result<Gitignore, ScanError> {
    let mut builder = GitignoreBuilder::new(root);
    for pattern in DEFAULT_IGNORE_DIRS.iter().copied().chain(extra.iter().map(String::as_str)) {
        builder
            .add_line(None, pattern)
            .map_err(|e| ScanError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: extra.join(","),
        message: e.to_string(),
    })
}

/// `.go` files the go tool would consider: not hidden, not `_`-prefixed.
fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.starts_with('.') && !name.starts_with('_')
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}
