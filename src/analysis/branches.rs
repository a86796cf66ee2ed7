// src/analysis/branches.rs
//! Counts branching constructs in a syntax tree.

use tree_sitter::Node;

use super::walk;

const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "foreach_statement",
];

/// Number of branching statements anywhere under `root`.
#[must_use]
pub fn count_branches(root: Node<'_>) -> usize {
    let mut count = 0;
    walk(root, &mut |node| {
        if BRANCH_KINDS.contains(&node.kind()) {
            count += 1;
        }
    });
    count
}
