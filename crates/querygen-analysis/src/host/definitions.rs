//! Constant definitions of one file, lowered to owned expressions.
//!
//! Tree-sitter nodes borrow their tree, so the foldable subset of every
//! constant's value is copied out once into a `ConstExpr`. The index is
//! keyed by the byte offset of the defining identifier.

use querygen_core::types::collections::FxHashMap;
use tree_sitter::Node;

use super::scope::{field_nodes, specs};
use crate::parsers::types::Position;
use crate::parsers::GoFile;

/// The foldable subset of Go constant expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstExpr {
    /// A decoded string literal.
    Literal(String),
    /// `left + right`.
    Concat(Box<ConstExpr>, Box<ConstExpr>),
    /// A reference to another constant; `offset` is where it appears.
    Ident { name: String, offset: usize },
    /// A string literal whose escapes could not be decoded.
    InvalidLiteral { message: String },
    Unsupported { kind: String },
}

/// One `name = value` pairing of a const spec.
#[derive(Debug, Clone)]
pub struct ConstDef {
    pub name: String,
    pub ident_start: usize,
    pub position: Position,
    pub value: ConstExpr,
    /// End of the const spec; a function-local name is visible after it.
    pub spec_end: usize,
    /// Byte range of the innermost enclosing block of a function-local
    /// constant. `None` at package level.
    pub block: Option<(usize, usize)>,
}

impl ConstDef {
    pub fn is_package_level(&self) -> bool {
        self.block.is_none()
    }
}

/// Node kinds that open a Go block scope.
const BLOCK_KINDS: &[&str] = &[
    "block",
    "expression_case",
    "default_case",
    "type_case",
    "communication_case",
];

/// Every constant definition of one file in source order.
#[derive(Debug, Default)]
pub struct DefinitionIndex {
    defs: Vec<ConstDef>,
    by_offset: FxHashMap<usize, usize>,
}

impl DefinitionIndex {
    pub fn build(file: &GoFile) -> Self {
        let mut defs = Vec::new();
        let mut stack: Vec<(Node, Option<(usize, usize)>)> = vec![(file.root(), None)];

        while let Some((node, block)) = stack.pop() {
            if node.kind() == "const_declaration" {
                collect_const_decl(file, node, block, &mut defs);
                continue;
            }
            let inner = if BLOCK_KINDS.contains(&node.kind()) {
                Some((node.start_byte(), node.end_byte()))
            } else {
                block
            };
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                stack.push((child, inner));
            }
        }

        defs.sort_by_key(|d| d.ident_start);
        let by_offset = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.ident_start, i))
            .collect();
        Self { defs, by_offset }
    }

    /// The definition whose identifier starts at `offset`.
    pub fn get(&self, offset: usize) -> Option<&ConstDef> {
        self.by_offset.get(&offset).map(|&i| &self.defs[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Function-local constant `name` visible at byte `at`: innermost
    /// enclosing block first, latest declaration within it.
    pub fn local_const(&self, name: &str, at: usize) -> Option<&ConstDef> {
        self.defs
            .iter()
            .filter(|d| d.name == name && d.spec_end <= at)
            .filter_map(|d| d.block.filter(|&(s, e)| s <= at && at < e).map(|b| (b, d)))
            .max_by_key(|&((start, _), d)| (start, d.ident_start))
            .map(|(_, d)| d)
    }
}

fn collect_const_decl(
    file: &GoFile,
    decl: Node,
    block: Option<(usize, usize)>,
    defs: &mut Vec<ConstDef>,
) {
    for spec in specs(decl, "const_spec") {
        let Some(values) = spec.child_by_field_name("value") else {
            continue;
        };
        let mut cursor = values.walk();
        let values: Vec<Node> = values
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect();

        // The i-th name pairs with the i-th value; extra names are malformed.
        for (name, value) in field_nodes(spec, "name").into_iter().zip(values) {
            defs.push(ConstDef {
                name: file.text(&name).to_string(),
                ident_start: name.start_byte(),
                position: Position::from_ts_point(name.start_position()),
                value: lower_expr(file, value),
                spec_end: spec.end_byte(),
                block,
            });
        }
    }
}

/// Lower an expression node into the foldable subset.
pub fn lower_expr(file: &GoFile, node: Node) -> ConstExpr {
    match node.kind() {
        "interpreted_string_literal" | "raw_string_literal" => {
            match decode_string_literal(file.text(&node)) {
                Ok(value) => ConstExpr::Literal(value),
                Err(message) => ConstExpr::InvalidLiteral { message },
            }
        }
        "binary_expression" => {
            let operator = node.child_by_field_name("operator").map(|op| file.text(&op));
            match (
                operator,
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) {
                (Some("+"), Some(left), Some(right)) => ConstExpr::Concat(
                    Box::new(lower_expr(file, left)),
                    Box::new(lower_expr(file, right)),
                ),
                _ => ConstExpr::Unsupported {
                    kind: node.kind().to_string(),
                },
            }
        }
        "identifier" => ConstExpr::Ident {
            name: file.text(&node).to_string(),
            offset: node.start_byte(),
        },
        kind => ConstExpr::Unsupported {
            kind: kind.to_string(),
        },
    }
}

/// Decode a Go string literal, quotes included.
pub fn decode_string_literal(text: &str) -> Result<String, String> {
    if let Some(raw) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        return Ok(raw.replace('\r', ""));
    }
    let body = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| format!("not a string literal: {text}"))?;
    unescape(body)
}

fn unescape(body: &str) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let esc = chars.next().ok_or("trailing backslash")?;
        match esc {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '\'' => out.push(b'\''),
            '"' => out.push(b'"'),
            'x' => out.push(hex_value(&mut chars, 2)? as u8),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(8))
                        .ok_or("octal escape needs three digits")?;
                    value = value * 8 + digit;
                }
                if value > 0xff {
                    return Err(format!("octal escape value {value} > 255"));
                }
                out.push(value as u8);
            }
            'u' | 'U' => {
                let width = if esc == 'u' { 4 } else { 8 };
                let value = hex_value(&mut chars, width)?;
                let ch = char::from_u32(value)
                    .ok_or_else(|| format!("escape is an invalid Unicode code point: {value:#x}"))?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            other => return Err(format!("unknown escape sequence: \\{other}")),
        }
    }
    String::from_utf8(out).map_err(|e| format!("literal is not valid UTF-8: {e}"))
}

fn hex_value(chars: &mut std::str::Chars<'_>, width: usize) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or_else(|| format!("hex escape needs {width} digits"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}
