// src/analysis/mod.rs
//! Syntax-tree walks over parsed PHP: branch counting, database call
//! detection, and the known-CVE fingerprint catalogue.

pub mod branches;
pub mod cve;
pub mod dbcalls;

use tree_sitter::Node;

use crate::parser::node_text;

/// Depth-first pre-order walk applying `visit` to every node, anonymous
/// tokens included.
pub(crate) fn walk(node: Node<'_>, visit: &mut impl FnMut(Node<'_>)) {
    visit(node);
    for child in node.children(&mut node.walk()) {
        walk(child, visit);
    }
}

/// True for the two call shapes the detectors care about.
pub(crate) fn is_call(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "function_call_expression" | "member_call_expression"
    )
}

/// Callee name of a call node: the `name`/`qualified_name` child of a plain
/// call, or the `name` field of a member call. Empty when the shape is
/// something else (dynamic callee).
pub(crate) fn callee_name<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    match node.kind() {
        "function_call_expression" => match node.child(0) {
            Some(child) if matches!(child.kind(), "name" | "qualified_name") => {
                node_text(child, source)
            }
            _ => "",
        },
        "member_call_expression" => node
            .child_by_field_name("name")
            .map_or("", |n| node_text(n, source)),
        _ => "",
    }
}

/// Raw source slices of the named children of the call's argument list.
pub(crate) fn raw_arguments<'a>(node: Node<'_>, source: &'a [u8]) -> Vec<&'a str> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for child in args.children(&mut args.walk()) {
        if child.is_named() {
            out.push(node_text(child, source));
        }
    }
    out
}

/// 1-based source line of a node.
pub(crate) fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}
