// src/parser.rs
//! Thin adapter over tree-sitter-php.
//!
//! The rest of the crate consumes `tree_sitter::Tree`/`Node` directly; this
//! module only owns grammar loading and the source-plus-tree pairing used by
//! the per-file analyses.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::ParseError;

/// Parses a PHP source buffer into a syntax tree.
///
/// # Errors
/// Returns [`ParseError`] if the grammar cannot be loaded or the parser
/// yields no tree.
pub fn parse(source: &[u8]) -> Result<Tree, ParseError> {
    let grammar: Language = tree_sitter_php::LANGUAGE_PHP.into();
    let mut parser = Parser::new();
    parser.set_language(&grammar)?;
    parser.parse(source, None).ok_or(ParseError::NoTree)
}

/// A parsed file: the syntax tree together with the bytes it spans.
pub struct ParsedSource {
    pub tree: Tree,
    pub source: Vec<u8>,
}

impl ParsedSource {
    /// Parses an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`ParseError`] if parsing fails.
    pub fn from_bytes(source: Vec<u8>) -> Result<Self, ParseError> {
        let tree = parse(&source)?;
        Ok(Self { tree, source })
    }

    /// Reads and parses a file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::from_bytes(source)?)
    }

    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Returns the source slice a node spans, or an empty string for non-UTF-8.
#[must_use]
pub fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}
