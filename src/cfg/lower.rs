// src/cfg/lower.rs
//! The lowering walker: syntax node + parent tail in, new tail out.
//!
//! The walker is total over the grammar. Constructs it understands get a
//! shaped lowering; everything else falls through to sequential composition
//! of its children, so unknown syntax can never abort a build.

use tree_sitter::Node;

use super::graph::Tail;
use super::node::NodeKind;
use super::CfgBuilder;

impl<'a> CfgBuilder<'a> {
    /// Lowers `node` with `tail` as the insertion point and returns the new
    /// tail. A Terminal input means the emission happens in dead code:
    /// children are still walked for node creation, but no edge can leave
    /// the sentinel (the graph store enforces that).
    pub(crate) fn visit(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        match node.kind() {
            "php_tag" => self.leaf(NodeKind::Html, node, tail),

            "assignment_expression" => self.lower_assignment(node, tail),
            "binary_expression" => self.lower_binary(node, tail),

            "=" | "+=" | "-=" | "*=" | "/=" => self.leaf(NodeKind::BinOp, node, tail),
            "==" | "!=" | "<" | "<=" | ">" | ">=" => self.leaf(NodeKind::RelOp, node, tail),
            "+" | "-" | "*" | "/" => self.leaf(NodeKind::BinOp, node, tail),

            "if_statement" => self.lower_if(node, tail),
            "echo_statement" => self.lower_echo(node, tail),
            "function_call_expression" => self.lower_call(node, tail),
            "while_statement" => self.lower_while(node, tail),
            "break_statement" => self.lower_break(tail),
            "continue_statement" => self.lower_continue(tail),

            // The first and last children are the braces.
            "compound_statement" => {
                self.visit_span(node, 1, node.child_count().saturating_sub(1), tail)
            }

            "name" => self.leaf(NodeKind::Id, node, tail),
            "string_content" => self.leaf(NodeKind::String, node, tail),
            "variable_name" => self.leaf(NodeKind::Variable, node, tail),
            "integer" => self.leaf(NodeKind::Integer, node, tail),
            "string" => self.leaf(NodeKind::StringLiteral, node, tail),

            _ => self.visit_span(node, 0, node.child_count(), tail),
        }
    }

    /// Sequential composition over `node.child(start..end)`: the running
    /// tail threads through each child, and once it collapses to Terminal
    /// the remaining children are lowered against Terminal (node creation
    /// without edges).
    fn visit_span(&mut self, node: Node<'_>, start: usize, end: usize, tail: Tail) -> Tail {
        let mut seq = tail;
        for i in start..end {
            let Some(child) = node.child(i) else { break };
            if seq.is_terminal() {
                let _ = self.visit(child, Tail::Terminal);
            } else {
                seq = self.visit(child, seq);
            }
        }
        seq
    }

    fn visit_opt(&mut self, child: Option<Node<'_>>, tail: Tail) -> Tail {
        match child {
            Some(node) => self.visit(node, tail),
            None => tail,
        }
    }

    /// Emits a single node labeled with the source slice and edged from the
    /// tail.
    fn leaf(&mut self, kind: NodeKind, node: Node<'_>, tail: Tail) -> Tail {
        let label = self.text(node);
        let id = self.new_id();
        self.cfg.add_node(id, kind, label);
        self.cfg.add_edge(tail, id);
        Tail::At(id)
    }

    /// The concrete syntax orders children as (target, operator, value); the
    /// emitted order is value, target, operator, so the graph reads as
    /// "compute the right-hand side, then store into the target".
    fn lower_assignment(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let count = node.child_count();
        let value = self.visit_opt(node.child(count.saturating_sub(1)), tail);
        let target = self.visit_opt(node.child(0), value);
        self.visit_span(node, 1, count.saturating_sub(1), target)
    }

    /// Post-order: both operands before the operator.
    fn lower_binary(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let left = self.visit_opt(node.child(0), tail);
        let right = self.visit_opt(node.child(2), left);
        self.visit_opt(node.child(1), right)
    }

    /// Lowers a condition sub-tree and caps it with a Condition node.
    ///
    /// Best effort: a parenthesized condition whose middle child is a binary
    /// expression is unwrapped; any other shape is lowered as-is.
    fn lower_condition(&mut self, cond: Option<Node<'_>>, tail: Tail) -> Tail {
        let Some(mut node) = cond else { return tail };

        if node.child_count() == 3 {
            if let Some(inner) = node.child(1) {
                if inner.kind() == "binary_expression" {
                    node = inner;
                }
            }
        }

        let left = self.visit_opt(node.child(0), tail);
        let right = self.visit_opt(node.child(2), left);
        let op = self.visit_opt(node.child(1), right);

        let id = self.new_id();
        self.cfg.add_node(id, NodeKind::Condition, NodeKind::Condition.name());
        self.cfg.add_edge(op, id);
        Tail::At(id)
    }

    fn lower_if(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let if_id = self.new_id();
        self.cfg.add_node(if_id, NodeKind::If, NodeKind::If.name());
        self.cfg.add_edge(tail, if_id);

        let cond = self.lower_condition(node.child_by_field_name("condition"), Tail::At(if_id));

        // True branch is lowered first, so its head is the first successor
        // of the Condition node.
        let true_tail = self.visit_opt(node.child_by_field_name("body"), cond);
        let false_tail = match node.child_by_field_name("alternative") {
            Some(alt) => self.visit(alt, cond),
            None => cond,
        };

        let end_id = self.new_id();
        self.cfg.add_node(end_id, NodeKind::IfEnd, NodeKind::IfEnd.name());
        self.cfg.add_edge(true_tail, end_id);
        self.cfg.add_edge(false_tail, end_id);

        // Both branches dead-ended: the statement as a whole has no
        // fall-through.
        if true_tail.is_terminal() && false_tail.is_terminal() {
            return Tail::Terminal;
        }
        Tail::At(end_id)
    }

    fn lower_while(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let while_id = self.new_id();
        self.cfg.add_node(while_id, NodeKind::While, NodeKind::While.name());
        self.cfg.add_edge(tail, while_id);

        let cond = self.lower_condition(node.child_by_field_name("condition"), Tail::At(while_id));

        // Reserve the post-loop identifier before the body so break
        // statements inside can target it; the record is filled in after.
        let end_id = self.new_id();
        self.loops.push(NodeKind::While, while_id, end_id);

        let body_tail = self.visit_opt(node.child_by_field_name("body"), cond);

        // Back edge to the header, unless the body dead-ended.
        self.cfg.add_edge(body_tail, while_id);

        self.cfg.add_node(end_id, NodeKind::WhileEnd, NodeKind::WhileEnd.name());
        self.cfg.add_edge(cond, end_id);

        self.loops.pop();
        Tail::At(end_id)
    }

    fn lower_echo(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let id = self.new_id();
        self.cfg.add_node(id, NodeKind::Echo, NodeKind::Echo.name());
        self.cfg.add_edge(tail, id);
        match node.child(1) {
            Some(arg) => self.visit(arg, Tail::At(id)),
            None => Tail::At(id),
        }
    }

    /// Call shape: FunctionCall -> Id -> ArgumentList -> Argument* ->
    /// CallBegin -> CallEnd -> RetValue. Gives analysis consumers explicit
    /// "arguments evaluated / callee entered / callee left / value
    /// materialised" anchors even though nothing inter-procedural happens.
    fn lower_call(&mut self, node: Node<'_>, tail: Tail) -> Tail {
        let call_id = self.new_id();
        self.cfg.add_node(call_id, NodeKind::FunctionCall, NodeKind::FunctionCall.name());
        self.cfg.add_edge(tail, call_id);

        let callee = node.child(0).map(|n| self.text(n)).unwrap_or_default();
        let name_id = self.new_id();
        self.cfg.add_node(name_id, NodeKind::Id, callee);
        self.cfg.add_edge(Tail::At(call_id), name_id);

        let Some(args) = node.child_by_field_name("arguments") else {
            return Tail::At(call_id);
        };

        let list_id = self.new_id();
        self.cfg.add_node(list_id, NodeKind::ArgumentList, NodeKind::ArgumentList.name());
        self.cfg.add_edge(Tail::At(name_id), list_id);

        // Each Argument fans out from the list; the sequential chain runs
        // through the argument expressions.
        let mut seq = Tail::At(list_id);
        for i in 0..args.child_count() {
            let Some(arg) = args.child(i) else { continue };
            if matches!(arg.kind(), "(" | ")") {
                continue;
            }
            let arg_id = self.new_id();
            self.cfg.add_node(arg_id, NodeKind::Argument, NodeKind::Argument.name());
            self.cfg.add_edge(Tail::At(list_id), arg_id);

            let res = self.visit(arg, Tail::At(arg_id));
            if !res.is_terminal() {
                seq = res;
            }
        }

        let begin_id = self.new_id();
        self.cfg.add_node(begin_id, NodeKind::CallBegin, callee);
        self.cfg.add_edge(seq, begin_id);

        let end_id = self.new_id();
        self.cfg.add_node(end_id, NodeKind::CallEnd, callee);
        self.cfg.add_edge(Tail::At(begin_id), end_id);

        let ret_id = self.new_id();
        self.cfg.add_node(ret_id, NodeKind::RetValue, NodeKind::RetValue.name());
        self.cfg.add_edge(Tail::At(end_id), ret_id);

        Tail::At(ret_id)
    }

    fn lower_break(&mut self, tail: Tail) -> Tail {
        let id = self.new_id();
        self.cfg.add_node(id, NodeKind::Break, NodeKind::Break.name());
        self.cfg.add_edge(tail, id);

        let target = self.closest_loop_end();
        self.cfg.add_edge(Tail::At(id), target);
        Tail::Terminal
    }

    fn lower_continue(&mut self, tail: Tail) -> Tail {
        let id = self.new_id();
        self.cfg.add_node(id, NodeKind::Continue, NodeKind::Continue.name());
        self.cfg.add_edge(tail, id);

        let target = self.closest_loop_condition();
        self.cfg.add_edge(Tail::At(id), target);
        Tail::Terminal
    }
}
