//! Source positions.

use serde::Serialize;

/// Zero-based row and column, as tree-sitter reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn from_ts_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row as u32,
            column: point.column as u32,
        }
    }

    /// One-based line for human-facing output.
    pub fn display_line(&self) -> u32 {
        self.line + 1
    }

    pub fn display_column(&self) -> u32 {
        self.column + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn from_ts_node(node: &tree_sitter::Node) -> Self {
        Self {
            start: Position::from_ts_point(node.start_position()),
            end: Position::from_ts_point(node.end_position()),
        }
    }
}
