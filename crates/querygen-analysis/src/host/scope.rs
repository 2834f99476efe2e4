//! Package scope and type-name resolution.

use querygen_core::types::collections::FxHashMap;
use tree_sitter::Node;

use crate::parsers::GoFile;

/// Predeclared basic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    /// Maps a predeclared type name to its kind. `byte` and `rune` are
    /// aliases of `uint8` and `int32`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" | "rune" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" | "byte" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "uintptr" => Self::Uintptr,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "string" => Self::String,
            _ => return None,
        })
    }

    /// Signed and unsigned integer kinds. `uintptr` is excluded.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    pub fn is_string(self) -> bool {
        self == Self::String
    }
}

/// Underlying type of a declared type, resolved one level deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Underlying {
    Basic(BasicKind),
    /// Another named type. Not chased further.
    Named(String),
    Composite,
    Interface,
}

/// Kind of a non-type object found under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Const,
    Var,
    Func,
    Builtin,
    Nil,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Var => "var",
            Self::Func => "func",
            Self::Builtin => "builtin",
            Self::Nil => "nil",
        }
    }
}

/// Result of looking a type name up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLookup {
    Type(Underlying),
    NotAType(ObjectKind),
    NotFound,
}

/// Type-name resolution capability.
pub trait SymbolResolver: Send + Sync {
    fn lookup_type(&self, name: &str) -> TypeLookup;
}

const UNIVERSE_INTERFACES: &[&str] = &["any", "comparable", "error"];
const UNIVERSE_CONSTS: &[&str] = &["true", "false", "iota"];
const UNIVERSE_BUILTINS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Lookup in the Go universe scope.
pub fn universe_lookup(name: &str) -> TypeLookup {
    if let Some(kind) = BasicKind::from_name(name) {
        return TypeLookup::Type(Underlying::Basic(kind));
    }
    if UNIVERSE_INTERFACES.contains(&name) {
        return TypeLookup::Type(Underlying::Interface);
    }
    if UNIVERSE_CONSTS.contains(&name) {
        return TypeLookup::NotAType(ObjectKind::Const);
    }
    if UNIVERSE_BUILTINS.contains(&name) {
        return TypeLookup::NotAType(ObjectKind::Builtin);
    }
    if name == "nil" {
        return TypeLookup::NotAType(ObjectKind::Nil);
    }
    TypeLookup::NotFound
}

/// A package-level object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeObject {
    /// Constant declared in file `file` with its identifier at `ident_start`.
    Const { file: usize, ident_start: usize },
    Var,
    Func,
    Type(Underlying),
}

/// Right-hand side of a type declaration, captured before every type name
/// of the package is known.
struct PendingType {
    name: String,
    kind: String,
    text: String,
    alias: bool,
}

/// Package-level objects of one Go package.
#[derive(Debug, Default)]
pub struct PackageScope {
    objects: FxHashMap<String, ScopeObject>,
}

impl PackageScope {
    /// Build the scope from the top-level declarations of every file.
    pub fn build(files: &[&GoFile]) -> Self {
        let mut objects = FxHashMap::default();
        let mut pending = Vec::new();

        for (file_idx, file) in files.iter().enumerate() {
            let root = file.root();
            let mut cursor = root.walk();
            for decl in root.named_children(&mut cursor) {
                match decl.kind() {
                    "const_declaration" => {
                        for spec in specs(decl, "const_spec") {
                            for name in field_nodes(spec, "name") {
                                insert(
                                    &mut objects,
                                    file.text(&name),
                                    ScopeObject::Const {
                                        file: file_idx,
                                        ident_start: name.start_byte(),
                                    },
                                );
                            }
                        }
                    }
                    "var_declaration" => {
                        for spec in specs(decl, "var_spec") {
                            for name in field_nodes(spec, "name") {
                                insert(&mut objects, file.text(&name), ScopeObject::Var);
                            }
                        }
                    }
                    "function_declaration" => {
                        if let Some(name) = decl.child_by_field_name("name") {
                            insert(&mut objects, file.text(&name), ScopeObject::Func);
                        }
                    }
                    "type_declaration" => {
                        let mut inner = decl.walk();
                        for spec in decl.named_children(&mut inner) {
                            let alias = match spec.kind() {
                                "type_spec" => false,
                                "type_alias" => true,
                                _ => continue,
                            };
                            let (Some(name), Some(ty)) =
                                (spec.child_by_field_name("name"), spec.child_by_field_name("type"))
                            else {
                                continue;
                            };
                            pending.push(PendingType {
                                name: file.text(&name).to_string(),
                                kind: ty.kind().to_string(),
                                text: file.text(&ty).to_string(),
                                alias,
                            });
                        }
                    }
                    _ => {}
                }
            }
        }

        // Placeholder entries so right-hand sides can tell package types apart
        // from predeclared ones.
        for p in &pending {
            insert(&mut objects, &p.name, ScopeObject::Type(Underlying::Composite));
        }
        let direct: FxHashMap<&str, Underlying> = pending
            .iter()
            .map(|p| (p.name.as_str(), classify(&p.kind, &p.text, &objects)))
            .collect();
        for p in &pending {
            let underlying = direct.get(p.name.as_str()).cloned().unwrap_or(Underlying::Composite);
            // An alias denotes the aliased type itself, so it adds no level.
            let underlying = match &underlying {
                Underlying::Named(target)
                    if p.alias && pending.iter().any(|t| &t.name == target && !t.alias) =>
                {
                    direct.get(target.as_str()).cloned().unwrap_or(underlying)
                }
                _ => underlying,
            };
            objects.insert(p.name.clone(), ScopeObject::Type(underlying));
        }

        Self { objects }
    }

    pub fn object(&self, name: &str) -> Option<&ScopeObject> {
        self.objects.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SymbolResolver for PackageScope {
    fn lookup_type(&self, name: &str) -> TypeLookup {
        match self.objects.get(name) {
            Some(ScopeObject::Type(underlying)) => TypeLookup::Type(underlying.clone()),
            Some(ScopeObject::Const { .. }) => TypeLookup::NotAType(ObjectKind::Const),
            Some(ScopeObject::Var) => TypeLookup::NotAType(ObjectKind::Var),
            Some(ScopeObject::Func) => TypeLookup::NotAType(ObjectKind::Func),
            None => universe_lookup(name),
        }
    }
}

fn insert(objects: &mut FxHashMap<String, ScopeObject>, name: &str, object: ScopeObject) {
    if name.is_empty() || name == "_" {
        return;
    }
    objects.insert(name.to_string(), object);
}

fn classify(kind: &str, text: &str, objects: &FxHashMap<String, ScopeObject>) -> Underlying {
    match kind {
        "type_identifier" => {
            if matches!(objects.get(text), Some(ScopeObject::Type(_))) {
                Underlying::Named(text.to_string())
            } else if let Some(basic) = BasicKind::from_name(text) {
                Underlying::Basic(basic)
            } else if UNIVERSE_INTERFACES.contains(&text) {
                Underlying::Interface
            } else {
                Underlying::Named(text.to_string())
            }
        }
        "qualified_type" | "generic_type" => Underlying::Named(text.to_string()),
        "interface_type" => Underlying::Interface,
        _ => Underlying::Composite,
    }
}

/// Specs of a declaration, whether written inline or in a parenthesized group.
pub(crate) fn specs<'t>(decl: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        if child.kind() == kind {
            out.push(child);
        } else if child.kind().ends_with("_list") {
            let mut inner = child.walk();
            out.extend(child.named_children(&mut inner).filter(|n| n.kind() == kind));
        }
    }
    out
}

/// Named children under `field`. A multi-name spec also tags the
/// separating `,` tokens with the field, so those are dropped.
pub(crate) fn field_nodes<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node
        .children_by_field_name(field, &mut cursor)
        .filter(|n| n.is_named())
        .collect();
    nodes
}
