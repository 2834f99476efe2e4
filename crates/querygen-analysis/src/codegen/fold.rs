//! Constant folding of query templates.

use querygen_core::errors::FoldError;
use querygen_core::types::collections::FxHashSet;

use crate::host::{AnalysisContext, ConstDef, ConstExpr, Resolution};

/// Folds constant expressions of one package to their string value.
///
/// Carries the set of constant names currently being folded. A name seen
/// twice on one chain is a cycle and the chain is not foldable.
pub struct ConstantFolder<'a> {
    ctx: &'a AnalysisContext,
    in_progress: FxHashSet<String>,
}

impl<'a> ConstantFolder<'a> {
    pub fn new(ctx: &'a AnalysisContext) -> Self {
        Self {
            ctx,
            in_progress: FxHashSet::default(),
        }
    }

    /// Fold the value of query constant `def` declared in file `file`.
    pub fn fold_query(&mut self, file: usize, def: &ConstDef) -> Result<String, FoldError> {
        self.in_progress.insert(def.name.clone());
        let result = self.fold(file, &def.value);
        self.in_progress.remove(&def.name);
        result
    }

    /// Fold `expr`, appearing in file `file`.
    pub fn fold(&mut self, file: usize, expr: &ConstExpr) -> Result<String, FoldError> {
        match expr {
            ConstExpr::Literal(value) => Ok(value.clone()),
            ConstExpr::Concat(left, right) => {
                let mut folded = self.fold(file, left)?;
                folded.push_str(&self.fold(file, right)?);
                Ok(folded)
            }
            ConstExpr::Ident { name, offset } => {
                if self.in_progress.contains(name) {
                    tracing::warn!(ident = %name, "cyclic dependency in constant expression");
                    return Err(FoldError::Cyclic { name: name.clone() });
                }
                self.in_progress.insert(name.clone());
                let result = match self.ctx.resolve_const(file, name, *offset) {
                    Resolution::Const { def, file } => self.fold(file, &def.value),
                    Resolution::NotConstant => Err(FoldError::NotConstant { name: name.clone() }),
                    Resolution::Unresolved => Err(FoldError::Unresolved { name: name.clone() }),
                };
                self.in_progress.remove(name);
                result
            }
            ConstExpr::InvalidLiteral { message } => Err(FoldError::InvalidLiteral {
                message: message.clone(),
            }),
            ConstExpr::Unsupported { kind } => Err(FoldError::Unsupported { kind: kind.clone() }),
        }
    }
}
