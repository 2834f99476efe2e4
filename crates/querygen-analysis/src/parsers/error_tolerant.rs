//! Error-tolerant parsing: locate ERROR and MISSING nodes so a partially
//! broken file can still be analyzed.

use tree_sitter::Node;

use super::types::Range;

/// Count ERROR and MISSING nodes in a tree-sitter tree.
pub fn count_errors(root: Node) -> (u32, Vec<Range>) {
    let mut count = 0u32;
    let mut ranges = Vec::new();
    if root.has_error() {
        collect_errors(root, &mut count, &mut ranges);
    }
    (count, ranges)
}

fn collect_errors(node: Node, count: &mut u32, ranges: &mut Vec<Range>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        ranges.push(Range::from_ts_node(&node));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            collect_errors(child, count, ranges);
        }
    }
}
