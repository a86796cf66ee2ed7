// src/cfg/mod.rs
//! Control-flow graph construction from PHP syntax.
//!
//! The builder lowers a tree-sitter concrete syntax tree into an explicit
//! directed graph: assignments and expressions become post-order chains,
//! conditionals fork at Condition nodes (true branch first), loops get a
//! header/back-edge/post-loop triple, and `break`/`continue` collapse the
//! sequential tail to the Terminal sentinel so everything lexically after
//! them is lowered without incoming edges. Reachability over the result is
//! what the dead-code report consumes.

mod graph;
mod loops;
mod lower;
mod node;
mod reach;

pub use graph::{Cfg, Tail};
pub use node::{CfgNode, NodeId, NodeKind, ENTRY_ID};

use crate::error::ParseError;
use crate::parser;
use loops::LoopStack;

/// Builds one CFG from one source buffer. Single-threaded, synchronous;
/// nodes and edges are only appended during the pass.
pub struct CfgBuilder<'a> {
    source: &'a [u8],
    cfg: Cfg,
    next_id: NodeId,
    loops: LoopStack,
}

impl<'a> CfgBuilder<'a> {
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            cfg: Cfg::new(),
            next_id: ENTRY_ID,
            loops: LoopStack::new(),
        }
    }

    /// Parses the source and lowers it into a CFG.
    ///
    /// The graph always contains an Entry node (identifier 1) and an Exit
    /// node reachable from Entry, even for an empty program.
    ///
    /// # Errors
    /// Returns [`ParseError`] if the parser rejects the input.
    pub fn build(mut self) -> Result<Cfg, ParseError> {
        let tree = parser::parse(self.source)?;

        let entry = self.new_id();
        self.cfg.add_node(entry, NodeKind::Entry, NodeKind::Entry.name());

        let tail = self.visit(tree.root_node(), Tail::At(entry));

        let exit = self.new_id();
        self.cfg.add_node(exit, NodeKind::Exit, NodeKind::Exit.name());

        match tail {
            Tail::At(id) if id != entry => self.cfg.add_edge(tail, exit),
            _ => self.cfg.add_edge(Tail::At(entry), exit),
        }

        Ok(self.cfg)
    }

    pub(crate) fn new_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Target for `continue`: the innermost loop condition. Outside any
    /// loop this falls back to Entry, leaving a visible edge.
    pub(crate) fn closest_loop_condition(&self) -> NodeId {
        self.loops.innermost_start().unwrap_or(ENTRY_ID)
    }

    /// Target for `break`: the innermost post-loop node. Outside any loop
    /// this is the next unallocated identifier and the edge dangles.
    pub(crate) fn closest_loop_end(&self) -> NodeId {
        self.loops.innermost_end().unwrap_or(self.next_id)
    }

    pub(crate) fn text(&self, node: tree_sitter::Node<'_>) -> &'a str {
        parser::node_text(node, self.source)
    }
}

/// Convenience wrapper: build a CFG from a source buffer in one call.
///
/// # Errors
/// Returns [`ParseError`] if the parser rejects the input.
pub fn build_cfg(source: &[u8]) -> Result<Cfg, ParseError> {
    CfgBuilder::new(source).build()
}
