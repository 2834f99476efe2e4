//! Read-only analysis context for one Go package.

use std::sync::OnceLock;

use super::definitions::{ConstDef, DefinitionIndex};
use super::scope::{universe_lookup, PackageScope, ScopeObject, SymbolResolver, TypeLookup};
use crate::parsers::GoFile;

/// A parsed file plus its lazily built definition index.
pub struct SourceUnit {
    pub file: GoFile,
    definitions: OnceLock<DefinitionIndex>,
}

impl SourceUnit {
    pub fn new(file: GoFile) -> Self {
        Self {
            file,
            definitions: OnceLock::new(),
        }
    }

    /// Built on first use, at most once, then shared read-only.
    pub fn definitions(&self) -> &DefinitionIndex {
        self.definitions.get_or_init(|| DefinitionIndex::build(&self.file))
    }

    pub fn definitions_built(&self) -> bool {
        self.definitions.get().is_some()
    }
}

/// How an identifier inside a constant expression resolved.
#[derive(Debug)]
pub enum Resolution<'a> {
    Const { def: &'a ConstDef, file: usize },
    /// Declared, but not a constant with a value of its own.
    NotConstant,
    Unresolved,
}

/// One compilation unit: the files of a directory sharing a package name.
pub struct AnalysisContext {
    package: String,
    import_path: Option<String>,
    units: Vec<SourceUnit>,
    scope: PackageScope,
}

impl AnalysisContext {
    pub fn new(package: String, import_path: Option<String>, files: Vec<GoFile>) -> Self {
        let scope = {
            let refs: Vec<&GoFile> = files.iter().collect();
            PackageScope::build(&refs)
        };
        tracing::debug!(
            package = %package,
            files = files.len(),
            objects = scope.len(),
            "built package scope"
        );
        Self {
            package,
            import_path,
            units: files.into_iter().map(SourceUnit::new).collect(),
            scope,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Import path derived from the enclosing module, when known.
    pub fn import_path(&self) -> Option<&str> {
        self.import_path.as_deref()
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn unit(&self, idx: usize) -> Option<&SourceUnit> {
        self.units.get(idx)
    }

    pub fn resolver(&self) -> &dyn SymbolResolver {
        &self.scope
    }

    /// Resolve `name` referenced at byte `at` of file `file`: function-local
    /// constants of that file first, then package constants.
    pub fn resolve_const(&self, file: usize, name: &str, at: usize) -> Resolution<'_> {
        if let Some(unit) = self.units.get(file) {
            if let Some(def) = unit.definitions().local_const(name, at) {
                return Resolution::Const { def, file };
            }
        }
        match self.scope.object(name) {
            Some(ScopeObject::Const { file, ident_start }) => self
                .units
                .get(*file)
                .and_then(|unit| unit.definitions().get(*ident_start))
                .map_or(Resolution::NotConstant, |def| Resolution::Const { def, file: *file }),
            Some(_) => Resolution::NotConstant,
            None => match universe_lookup(name) {
                TypeLookup::NotFound => Resolution::Unresolved,
                _ => Resolution::NotConstant,
            },
        }
    }
}
