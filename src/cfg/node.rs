// src/cfg/node.rs
//! The closed catalogue of CFG node kinds and the node record.

use std::fmt;

/// Identifier of a CFG node. Dense, positive, assigned by a monotone counter.
pub type NodeId = usize;

/// Identifier 1 is always the Entry node of a built CFG.
pub const ENTRY_ID: NodeId = 1;

/// Every node in the graph carries exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Entry,
    Exit,
    /// Raw content before the opening tag, and the tag itself.
    Html,
    Variable,
    Id,
    Integer,
    String,
    StringLiteral,
    /// Assignment and arithmetic operators.
    BinOp,
    /// Relational operators.
    RelOp,
    Condition,
    If,
    IfEnd,
    While,
    WhileEnd,
    Echo,
    FunctionCall,
    ArgumentList,
    Argument,
    CallBegin,
    CallEnd,
    RetValue,
    Break,
    Continue,
    // Recognized by the loop-context queries but not yet emitted by the
    // lowering walker.
    For,
    ForEnd,
    DoWhile,
    Switch,
}

impl NodeKind {
    /// The fixed display name of this kind, also used as the label of
    /// marker nodes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Exit => "Exit",
            Self::Html => "Html",
            Self::Variable => "Variable",
            Self::Id => "Id",
            Self::Integer => "Integer",
            Self::String => "String",
            Self::StringLiteral => "StringLiteral",
            Self::BinOp => "BinOP",
            Self::RelOp => "RelOP",
            Self::Condition => "Condition",
            Self::If => "If",
            Self::IfEnd => "IfEnd",
            Self::While => "While",
            Self::WhileEnd => "WhileEnd",
            Self::Echo => "Echo",
            Self::FunctionCall => "FunctionCall",
            Self::ArgumentList => "ArgumentList",
            Self::Argument => "Argument",
            Self::CallBegin => "CallBegin",
            Self::CallEnd => "CallEnd",
            Self::RetValue => "RetValue",
            Self::Break => "Break",
            Self::Continue => "Continue",
            Self::For => "For",
            Self::ForEnd => "ForEnd",
            Self::DoWhile => "DoWhile",
            Self::Switch => "Switch",
        }
    }

    /// True for kinds that open a loop frame `break`/`continue` can target.
    #[must_use]
    pub fn is_loop(self) -> bool {
        matches!(self, Self::While | Self::For)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the control-flow graph.
#[derive(Debug, Clone)]
pub struct CfgNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Either the fixed kind name or a source-derived snippet (identifiers,
    /// literals, operator symbols, callee names).
    pub label: String,
}
