//! Go source emission for parameter descriptor sets.
//!
//! Output is already in gofmt layout so that byte comparison against an
//! existing companion body is stable across runs.

use std::fmt::Write;

use super::descriptor::ParamDescriptorSet;

/// Runtime contract every generated type satisfies.
pub const CONTRACT_INTERFACE: &str = "QueryParams";

/// Render `sets` in order. `qualifier` is the runtime package name, or
/// `None` when generating inside the runtime package itself.
pub fn emit(sets: &[ParamDescriptorSet], qualifier: Option<&str>) -> String {
    let mut out = String::new();
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_set(&mut out, set, qualifier);
    }
    out
}

fn emit_set(out: &mut String, set: &ParamDescriptorSet, qualifier: Option<&str>) {
    let name = &set.type_name;
    let width = set.fields.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);

    let _ = writeln!(out, "type {name} struct {{");
    for field in &set.fields {
        let _ = writeln!(out, "\t{:<width$} {}", field.name, field.type_name);
    }
    out.push_str("}\n\n");

    let prefix = qualifier.map(|q| format!("{q}.")).unwrap_or_default();
    let _ = writeln!(out, "var _ {prefix}{CONTRACT_INTERFACE} = &{name}{{}}\n");

    let occurrences = set.occurrences();
    let formats: Vec<String> = occurrences.iter().map(|(_, f)| go_quote(f)).collect();
    let args: Vec<String> = occurrences.iter().map(|(field, _)| format!("qp.{field}")).collect();

    let _ = writeln!(out, "func (qp *{name}) FormatSpecifiers() []string {{");
    let _ = writeln!(out, "\treturn []string{{{}}}", formats.join(", "));
    out.push_str("}\n\n");

    let _ = writeln!(out, "func (qp *{name}) FormatArgs() []any {{");
    let _ = writeln!(out, "\treturn []any{{{}}}", args.join(", "));
    out.push_str("}\n");
}

/// Go interpreted string literal for `s`.
fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
