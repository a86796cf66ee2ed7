// src/cfg/graph.rs
//! Append-only directed multigraph over integer node identifiers.
//!
//! Two flat maps: id -> node record, id -> successor list. Identifiers are
//! the only cross-node reference, so back-edges and join points cost nothing
//! and the textual dump falls out of an ordered iteration.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::node::{CfgNode, NodeId, NodeKind};

/// The insertion point the lowering walker threads through a traversal.
///
/// `Terminal` means the current position is statically unreachable by
/// sequential fall-through: nodes may still be emitted there, but no edge
/// may leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// A real node to hang the next emission off.
    At(NodeId),
    /// Dead position after an unconditional non-local transfer.
    Terminal,
}

impl Tail {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

/// A control-flow graph. Created empty, appended to during one lowering
/// pass, read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct Cfg {
    nodes: BTreeMap<NodeId, CfgNode>,
    edges: HashMap<NodeId, Vec<NodeId>>,
}

impl Cfg {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the record for `id`. Overwrite is deliberate:
    /// loop constructs reserve an identifier first and fill it in once the
    /// body has been lowered.
    pub fn add_node(&mut self, id: NodeId, kind: NodeKind, label: impl Into<String>) {
        self.nodes.insert(
            id,
            CfgNode {
                id,
                kind,
                label: label.into(),
            },
        );
    }

    /// Appends `dst` to the successor list of `src`.
    ///
    /// Self-loops and edges out of a Terminal source are silently dropped;
    /// the lowering walker relies on both guards living here.
    pub fn add_edge(&mut self, src: Tail, dst: NodeId) {
        if let Tail::At(src) = src {
            if src != dst {
                self.edges.entry(src).or_default().push(dst);
            }
        }
    }

    /// Successors of `id` in insertion order. The order is observable:
    /// at Condition nodes the true branch precedes the false branch.
    #[must_use]
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.edges.get(&id).map_or(&[], Vec::as_slice)
    }

    /// All nodes in ascending identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &CfgNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&CfgNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Writes the stable textual dump to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes() {
            let succs = self
                .successors(node.id)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Node {}: {} [{}] -> [{}]", node.id, node.kind, node.label, succs)?;
        }
        Ok(())
    }
}
