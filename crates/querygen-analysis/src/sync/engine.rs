//! Companion file create / rewrite / delete.
//!
//! A companion file is a preamble (header comments, package clause and
//! imports) followed by a body this tool owns. The preamble is never
//! touched once the file exists; the body is replaced only when its bytes
//! differ from what would be generated now.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use querygen_core::errors::{PipelineResult, SyncError};

use crate::codegen::{emit, ParamDescriptorSet};
use crate::scanner::hasher::hash_content;

pub const HEADER: &str = "// Code generated by querygen.\n// You may only edit import statements.\n";

/// Everything needed to converge one companion file.
#[derive(Debug, Clone)]
pub struct CompanionArtifact {
    pub path: PathBuf,
    /// Preamble line count of the file on disk; `None` if it does not exist.
    pub existing_preamble: Option<usize>,
    /// Descriptor sets of the paired source file, in declaration order.
    pub wanted: Vec<ParamDescriptorSet>,
    /// Package clause for a newly created file.
    pub package: String,
    /// Runtime package import path; `None` inside the runtime package.
    pub runtime_import: Option<String>,
}

impl CompanionArtifact {
    /// Qualifier for the runtime contract in generated code.
    pub fn qualifier(&self) -> Option<&str> {
        self.runtime_import.as_deref().map(assumed_package_name)
    }

    /// The tool-owned part of the file: a blank line, then the declarations.
    pub fn render_body(&self) -> String {
        format!("\n{}", emit(&self.wanted, self.qualifier()))
    }

    /// Full contents of a newly created companion.
    pub fn render_new_file(&self) -> String {
        let mut out = String::from(HEADER);
        out.push_str(&format!("package {}\n", self.package));
        if let Some(import) = &self.runtime_import {
            out.push_str(&format!("\nimport (\n\t\"{import}\"\n)\n"));
        }
        out.push_str(&self.render_body());
        out
    }
}

/// Package name the go tool assumes for an import path: `.../interpolate`,
/// `.../interpolate/v2` and `.../go-interpolate` all give `interpolate`.
pub fn assumed_package_name(import_path: &str) -> &str {
    let mut segments = import_path.rsplit('/');
    let mut name = segments.next().unwrap_or(import_path);
    if is_major_version(name) {
        if let Some(parent) = segments.next() {
            name = parent;
        }
    }
    let name = name.strip_prefix("go-").unwrap_or(name);
    name.split(['.', '-']).next().unwrap_or(name)
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// What to do with one companion file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Create,
    /// Exists; the body is compared and rewritten only if it changed.
    Update,
    Delete,
    /// Nothing wanted and nothing on disk.
    Skip,
}

impl SyncAction {
    pub fn plan(artifact: &CompanionArtifact) -> Self {
        match (artifact.wanted.is_empty(), artifact.existing_preamble.is_some()) {
            (false, false) => Self::Create,
            (false, true) => Self::Update,
            (true, true) => Self::Delete,
            (true, false) => Self::Skip,
        }
    }
}

/// Counts from one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl SyncSummary {
    pub fn writes(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

/// Converge every artifact, sequentially. Failures are per file and
/// collected; they never stop the pass.
pub fn sync_all<'a>(
    artifacts: impl IntoIterator<Item = &'a CompanionArtifact>,
) -> PipelineResult<SyncSummary> {
    let mut result = PipelineResult::<SyncSummary>::default();
    for artifact in artifacts {
        let path = artifact.path.display().to_string();
        match SyncAction::plan(artifact) {
            SyncAction::Create => match create(artifact) {
                Ok(()) => {
                    tracing::debug!(path = %path, "created companion file");
                    result.data.created += 1;
                }
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "failed to write generated structs");
                    result.data.failed += 1;
                    result.add_error(e);
                }
            },
            SyncAction::Update => {
                let preamble = artifact.existing_preamble.unwrap_or(0);
                match rewrite(&artifact.path, preamble, &artifact.render_body()) {
                    Ok(true) => {
                        tracing::debug!(path = %path, "rewrote companion body");
                        result.data.updated += 1;
                    }
                    Ok(false) => {
                        tracing::debug!(path = %path, "companion up to date");
                        result.data.unchanged += 1;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "failed to update file");
                        result.data.failed += 1;
                        result.add_error(e);
                    }
                }
            }
            SyncAction::Delete => match delete(&artifact.path) {
                Ok(()) => {
                    tracing::debug!(path = %path, "removed companion file");
                    result.data.deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to remove path");
                    result.data.failed += 1;
                    result.add_error(e);
                }
            },
            SyncAction::Skip => {}
        }
    }
    result
}

/// Create a companion that does not exist yet. An existing file at the
/// path is never overwritten.
pub fn create(artifact: &CompanionArtifact) -> Result<(), SyncError> {
    let err = |source| SyncError::Create {
        path: artifact.path.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&artifact.path)
        .map_err(err)?;
    file.write_all(artifact.render_new_file().as_bytes()).map_err(err)
}

/// Replace everything after the first `preamble_lines` lines of `path`
/// with `body`, unless the current bytes already hash the same.
/// Returns whether the file was written.
pub fn rewrite(path: &Path, preamble_lines: usize, body: &str) -> Result<bool, SyncError> {
    let err = |source| SyncError::Update {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new().read(true).write(true).open(path).map_err(err)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(err)?;

    let offset = preamble_byte_len(&contents, preamble_lines);
    if hash_content(&contents[offset..]) == hash_content(body.as_bytes()) {
        return Ok(false);
    }
    // The body must start on a fresh line or the next run sees a different
    // preamble.
    let unterminated = offset == contents.len() && !contents.is_empty() && !contents.ends_with(b"\n");

    file.set_len(offset as u64).map_err(err)?;
    file.seek(SeekFrom::End(0)).map_err(err)?;
    if unterminated {
        file.write_all(b"\n").map_err(err)?;
    }
    file.write_all(body.as_bytes()).map_err(err)?;
    Ok(true)
}

/// Byte offset just past the newline ending line `lines`. The whole file
/// when it has fewer lines.
pub fn preamble_byte_len(contents: &[u8], lines: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    contents
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'\n')
        .nth(lines - 1)
        .map_or(contents.len(), |(i, _)| i + 1)
}

pub fn delete(path: &Path) -> Result<(), SyncError> {
    fs::remove_file(path).map_err(|source| SyncError::Delete {
        path: path.to_path_buf(),
        source,
    })
}
