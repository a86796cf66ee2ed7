// src/analysis/dbcalls.rs
//! Database interaction call sites.

use serde::Serialize;
use tree_sitter::Node;

use super::{callee_name, is_call, line_of, walk};
use crate::parser::node_text;

/// A call site that touches a database.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseCall {
    pub function: String,
    pub line: usize,
    pub description: String,
}

/// Scans the tree for calls known to interact with a database:
/// `mysql_query`/`mysqli_query`, member `execute()` calls, and
/// `->mysql->exec(..)` chains.
#[must_use]
pub fn detect_database_calls(root: Node<'_>, source: &[u8]) -> Vec<DatabaseCall> {
    let mut calls = Vec::new();

    walk(root, &mut |node| {
        if !is_call(node) {
            return;
        }
        let name = callee_name(node, source);
        let line = line_of(node);

        match name {
            "mysql_query" | "mysqli_query" => calls.push(DatabaseCall {
                function: name.to_string(),
                line,
                description: format!("call to {name}"),
            }),
            "execute" if node.kind() == "member_call_expression" => calls.push(DatabaseCall {
                function: "$object->execute()".to_string(),
                line,
                description: "call to $object->execute()".to_string(),
            }),
            "exec" => {
                let snippet = node_text(node, source);
                if snippet.contains("->mysql->exec") {
                    calls.push(DatabaseCall {
                        function: "$object->mysql->exec".to_string(),
                        line,
                        description: "call to $object->mysql->exec(*)".to_string(),
                    });
                }
            }
            _ => {}
        }
    });

    calls
}
