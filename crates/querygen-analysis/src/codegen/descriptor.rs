//! Parameter descriptors built from a query's directives.

use querygen_core::errors::DescriptorError;
use querygen_core::types::collections::{FxHashMap, SmallVec2};

use super::template::{Directive, TypeExpr};
use crate::host::{SymbolResolver, TypeLookup, Underlying};

/// Appended to a query constant's name to form its parameter type name.
pub const PARAMS_SUFFIX: &str = "Params";
pub const INT_FORMAT: &str = "%d";
pub const STRING_FORMAT: &str = "%s";

/// One occurrence of a field in the literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub index: usize,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_name: String,
    pub substitutions: SmallVec2<Substitution>,
}

/// The synthesized parameter type of one query constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptorSet {
    pub type_name: String,
    /// In order of first occurrence.
    pub fields: Vec<FieldDescriptor>,
}

impl ParamDescriptorSet {
    /// Total directive count across all fields.
    pub fn occurrence_count(&self) -> usize {
        self.fields.iter().map(|f| f.substitutions.len()).sum()
    }

    /// `(field, format)` per occurrence index, ascending.
    pub fn occurrences(&self) -> Vec<(&str, &str)> {
        let mut slots: Vec<Option<(&str, &str)>> = vec![None; self.occurrence_count()];
        for field in &self.fields {
            for sub in &field.substitutions {
                if let Some(slot) = slots.get_mut(sub.index) {
                    *slot = Some((field.name.as_str(), sub.format.as_str()));
                }
            }
        }
        slots.into_iter().flatten().collect()
    }
}

/// Accumulates fields for one query. Fields live in an insertion-ordered
/// `Vec` with a name to position map alongside.
pub struct DescriptorBuilder<'r> {
    resolver: &'r dyn SymbolResolver,
    query_name: String,
    fields: Vec<FieldDescriptor>,
    positions: FxHashMap<String, usize>,
}

impl<'r> DescriptorBuilder<'r> {
    pub fn new(resolver: &'r dyn SymbolResolver, query_name: impl Into<String>) -> Self {
        Self {
            resolver,
            query_name: query_name.into(),
            fields: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, directive: &Directive) -> Result<(), DescriptorError> {
        if let Some(&pos) = self.positions.get(&directive.field) {
            let field = &self.fields[pos];
            if let TypeExpr::Named(ty) = &directive.type_expr {
                if *ty != field.type_name {
                    return Err(DescriptorError::TypeConflict {
                        field: field.name.clone(),
                        first: field.type_name.clone(),
                        second: ty.clone(),
                    });
                }
            }
            let format = self.format_for(directive, &field.type_name)?;
            self.fields[pos].substitutions.push(Substitution {
                index: directive.index,
                format,
            });
            return Ok(());
        }

        let TypeExpr::Named(ty) = &directive.type_expr else {
            return Err(DescriptorError::FirstOccurrenceRequiresType {
                field: directive.field.clone(),
            });
        };
        let format = self.format_for(directive, ty)?;
        let mut substitutions = SmallVec2::new();
        substitutions.push(Substitution {
            index: directive.index,
            format,
        });
        self.positions.insert(directive.field.clone(), self.fields.len());
        self.fields.push(FieldDescriptor {
            name: directive.field.clone(),
            type_name: ty.clone(),
            substitutions,
        });
        Ok(())
    }

    /// `None` when no directive was added.
    pub fn finish(self) -> Option<ParamDescriptorSet> {
        if self.fields.is_empty() {
            return None;
        }
        Some(ParamDescriptorSet {
            type_name: format!("{}{PARAMS_SUFFIX}", self.query_name),
            fields: self.fields,
        })
    }

    fn format_for(&self, directive: &Directive, type_name: &str) -> Result<String, DescriptorError> {
        match &directive.format {
            Some(explicit) => Ok(explicit.clone()),
            None => infer_format(self.resolver, &directive.field, type_name),
        }
    }
}

/// Build the descriptor set of query `query_name` from its directives.
/// Stops at the first structural problem.
pub fn build(
    resolver: &dyn SymbolResolver,
    query_name: &str,
    directives: &[Directive],
) -> Result<Option<ParamDescriptorSet>, DescriptorError> {
    let mut builder = DescriptorBuilder::new(resolver, query_name);
    for directive in directives {
        builder.add(directive)?;
    }
    Ok(builder.finish())
}

/// Format token for a value of type `type_name`, from its underlying kind.
pub fn infer_format(
    resolver: &dyn SymbolResolver,
    field: &str,
    type_name: &str,
) -> Result<String, DescriptorError> {
    match resolver.lookup_type(type_name) {
        TypeLookup::Type(Underlying::Basic(kind)) if kind.is_integer() => Ok(INT_FORMAT.to_string()),
        TypeLookup::Type(Underlying::Basic(kind)) if kind.is_string() => Ok(STRING_FORMAT.to_string()),
        TypeLookup::Type(_) => Err(DescriptorError::UnformattableType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }),
        TypeLookup::NotAType(kind) => Err(DescriptorError::NotAType {
            field: field.to_string(),
            name: type_name.to_string(),
            kind: kind.as_str(),
        }),
        TypeLookup::NotFound => Err(DescriptorError::UnresolvedType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }),
    }
}
