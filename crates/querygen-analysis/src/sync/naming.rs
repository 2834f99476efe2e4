//! Source file to companion file name mapping.

use std::path::{Path, PathBuf};

pub const COMPANION_SUFFIX: &str = "_query_gen.go";
pub const COMPANION_TEST_SUFFIX: &str = "_query_gen_test.go";

/// Companion path for a Go source file. First match wins:
///
/// | source | companion |
/// |---|---|
/// | `x_query.go` | `x_query_gen.go` |
/// | `x_queries.go` | `x_query_gen.go` |
/// | `x_test.go` | `x_query_gen_test.go` |
/// | `x.go` | `x_query_gen.go` |
pub fn companion_path(source: &Path) -> PathBuf {
    let name = source.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let companion = if let Some(stem) = name.strip_suffix("_query.go") {
        format!("{stem}{COMPANION_SUFFIX}")
    } else if let Some(stem) = name.strip_suffix("_queries.go") {
        format!("{stem}{COMPANION_SUFFIX}")
    } else if let Some(stem) = name
        .strip_suffix("_test.go")
        .filter(|_| !name.ends_with(COMPANION_TEST_SUFFIX))
    {
        format!("{stem}{COMPANION_TEST_SUFFIX}")
    } else {
        let stem = name.strip_suffix(".go").unwrap_or(name);
        format!("{stem}{COMPANION_SUFFIX}")
    };
    source.with_file_name(companion)
}

/// Generated companions are never scanned for queries.
pub fn is_companion_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(COMPANION_SUFFIX) || n.ends_with(COMPANION_TEST_SUFFIX))
}
