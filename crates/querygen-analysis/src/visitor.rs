//! Per-file query discovery and descriptor construction.

use std::path::PathBuf;

use querygen_core::errors::error_code::{self, QuerygenErrorCode};

use crate::codegen::{build, parse_directives, ConstantFolder, ParamDescriptorSet};
use crate::codegen::template::is_query_const_name;
use crate::diagnostics::{Diagnostic, Severity};
use crate::host::AnalysisContext;

/// What one source file wants in its companion.
#[derive(Debug, Default)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub package: String,
    pub queries_found: usize,
    /// Descriptor sets in declaration order.
    pub wanted: Vec<ParamDescriptorSet>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fold, parse and build every query constant of file `file_idx`.
///
/// Any failure stays with its query: the query contributes nothing and
/// its siblings are unaffected.
pub fn analyze_file(ctx: &AnalysisContext, file_idx: usize) -> FileAnalysis {
    let Some(unit) = ctx.unit(file_idx) else {
        return FileAnalysis::default();
    };
    let file = &unit.file;
    let mut analysis = FileAnalysis {
        path: file.path.clone(),
        package: file.package.clone(),
        ..Default::default()
    };
    tracing::debug!(path = %file.path.display(), "visiting file");

    if let Some(first) = file.error_ranges.first() {
        analysis.diagnostics.push(Diagnostic::new(
            &file.path,
            first.start,
            Severity::Warning,
            error_code::PARTIAL_PARSE,
            format!("file has {} syntax error(s); analysis is best-effort", file.error_count),
        ));
    }

    let mut folder = ConstantFolder::new(ctx);
    for def in unit.definitions().iter().filter(|d| is_query_const_name(&d.name)) {
        analysis.queries_found += 1;
        let literal = match folder.fold_query(file_idx, def) {
            Ok(literal) => literal,
            Err(e) => {
                tracing::debug!(query = %def.name, reason = %e, "failed to fold query string");
                continue;
            }
        };
        tracing::debug!(query = %def.name, folded = %literal, "constant-folded query string");

        let directives = parse_directives(&literal);
        match build(ctx.resolver(), &def.name, &directives) {
            Ok(Some(set)) => analysis.wanted.push(set),
            Ok(None) => tracing::debug!(query = %def.name, "query has no interpolation"),
            Err(e) => {
                tracing::error!(query = %def.name, error = %e, "failed to create struct from query string");
                analysis.diagnostics.push(Diagnostic::new(
                    &file.path,
                    def.position,
                    Severity::Error,
                    e.error_code(),
                    format!("ill-formed interpolation: {e}"),
                ));
                if let Some(hint) = e.hint() {
                    analysis.diagnostics.push(Diagnostic::new(
                        &file.path,
                        def.position,
                        Severity::Help,
                        e.error_code(),
                        hint,
                    ));
                }
            }
        }
    }
    analysis
}
