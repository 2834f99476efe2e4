//! User-facing diagnostics.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::parsers::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Help,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Help => "help",
        }
    }
}

/// A message attributed to a source position. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        path: impl Into<PathBuf>,
        at: Position,
        severity: Severity,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line: at.display_line(),
            column: at.display_column(),
            severity,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.path.display(),
            self.line,
            self.column,
            self.severity.as_str(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based() {
        let d = Diagnostic::new(
            "store/a.go",
            Position { line: 4, column: 6 },
            Severity::Error,
            "MALFORMED_DIRECTIVE",
            "ill-formed interpolation: first interpolation of x must specify type",
        );
        assert_eq!(
            d.to_string(),
            "store/a.go:5:7: error: ill-formed interpolation: first interpolation of x must specify type"
        );
    }
}
