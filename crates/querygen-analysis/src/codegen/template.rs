//! Interpolation directives embedded in query literals.
//!
//! ```text
//! {{ name : type }}
//! {{ name : _ }}            reuse the type of the field's first occurrence
//! {{ name : type : %fmt }}  explicit format for this occurrence
//! ```
//! `type` may carry a leading `*` and a package qualifier.

use std::sync::LazyLock;

use regex::Regex;

/// The "same type as before" token.
pub const WILDCARD_TYPE: &str = "_";

static DIRECTIVE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let ident = r"[a-zA-Z_][a-zA-Z0-9_]*";
    Regex::new(&format!(
        r"\{{\{{\s*({ident})\s*:\s*(\*?(?:{ident}\.)?{ident})\s*(?::\s*(%[^\s{{}}]+))?\s*\}}\}}"
    ))
    .ok()
});

static QUERY_CONST_NAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^.*Query(Fragment)?[_0-9]*$").ok());

/// Type position of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Wildcard,
    Named(String),
}

impl TypeExpr {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wildcard => WILDCARD_TYPE,
            Self::Named(name) => name,
        }
    }
}

/// One `{{...}}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub field: String,
    pub type_expr: TypeExpr,
    /// Explicit format, leading `%` included.
    pub format: Option<String>,
    /// Zero-based position among the literal's directives.
    pub index: usize,
}

/// Directives of `literal`, left to right. Empty for a plain query.
pub fn parse_directives(literal: &str) -> Vec<Directive> {
    let Some(re) = DIRECTIVE_RE.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(literal)
        .enumerate()
        .map(|(index, caps)| {
            let ty = &caps[2];
            Directive {
                field: caps[1].to_string(),
                type_expr: if ty == WILDCARD_TYPE {
                    TypeExpr::Wildcard
                } else {
                    TypeExpr::Named(ty.to_string())
                },
                format: caps.get(3).map(|m| m.as_str().to_string()),
                index,
            }
        })
        .collect()
}

/// Whether a constant's name marks it as a query template.
pub fn is_query_const_name(name: &str) -> bool {
    QUERY_CONST_NAME_RE
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}
