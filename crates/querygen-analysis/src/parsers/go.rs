//! Go parser.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use querygen_core::errors::{ParseError, PipelineError, ScanError};
use tree_sitter::{Node, Parser, Tree};

use super::error_tolerant::count_errors;
use super::types::Range;

thread_local! {
    static GO_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// A parsed Go source file.
///
/// Holds the owned source alongside its syntax tree so nodes can be
/// re-derived on demand by any worker.
pub struct GoFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    /// Package clause name.
    pub package: String,
    /// 1-based line of the `package` keyword.
    pub package_line: usize,
    /// 1-based line on which the last top-level import declaration ends.
    pub last_import_end_line: Option<usize>,
    pub error_count: u32,
    pub error_ranges: Vec<Range>,
}

impl std::fmt::Debug for GoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoFile")
            .field("path", &self.path)
            .field("package", &self.package)
            .field("package_line", &self.package_line)
            .field("last_import_end_line", &self.last_import_end_line)
            .field("error_count", &self.error_count)
            .finish_non_exhaustive()
    }
}

impl GoFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: &Node) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    /// Number of leading lines a companion file keeps verbatim: the package
    /// clause and every top-level import declaration.
    pub fn preamble_lines(&self) -> usize {
        self.package_line.max(self.last_import_end_line.unwrap_or(0))
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Parse Go source text.
pub fn parse_go(path: &Path, source: String) -> Result<GoFile, ParseError> {
    let tree = GO_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut parser = Parser::new();
            parser
                .set_language(&tree_sitter_go::LANGUAGE.into())
                .map_err(|e| ParseError::GrammarNotLoaded {
                    message: e.to_string(),
                })?;
            *slot = Some(parser);
        }
        let parser = slot.as_mut().ok_or_else(|| ParseError::GrammarNotLoaded {
            message: "parser slot empty".to_string(),
        })?;
        parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })
    })?;

    let (error_count, error_ranges) = count_errors(tree.root_node());
    let (package, last_import_end_line) = scan_preamble(tree.root_node(), &source);
    let (package, package_line) = package.ok_or_else(|| ParseError::MissingPackageClause {
        path: path.to_path_buf(),
    })?;

    Ok(GoFile {
        path: path.to_path_buf(),
        source,
        tree,
        package,
        package_line,
        last_import_end_line,
        error_count,
        error_ranges,
    })
}

/// Package name with its 1-based line, and the 1-based end line of the last
/// top-level import declaration.
fn scan_preamble(root: Node, source: &str) -> (Option<(String, usize)>, Option<usize>) {
    let mut package = None;
    let mut last_import_end_line = None;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" if package.is_none() => {
                let mut inner = child.walk();
                let name = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "package_identifier")
                    .and_then(|n| source.get(n.byte_range()));
                if let Some(name) = name {
                    package = Some((name.to_string(), child.start_position().row + 1));
                }
            }
            "import_declaration" => {
                let end = child.end_position().row + 1;
                last_import_end_line = Some(last_import_end_line.map_or(end, |l: usize| l.max(end)));
            }
            _ => {}
        }
    }
    (package, last_import_end_line)
}

/// Read a file from disk and parse it.
pub fn read_and_parse(path: &Path) -> Result<GoFile, PipelineError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_go(path, source)?)
}
