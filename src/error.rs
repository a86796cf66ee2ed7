// src/error.rs
//! Error handling.
//!
//! The analysis core surfaces exactly one error kind: [`ParseError`].
//! Everything above the core (CLI, filesystem sweeps) uses `anyhow`.

pub use anyhow::{anyhow, bail, Context, Error, Result};

/// The parser rejected the input. The only failure the core can produce;
/// everything else (unknown syntax, missing fields, malformed conditions)
/// is tolerated by the lowering walker.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The PHP grammar could not be loaded into the tree-sitter runtime.
    #[error("PHP grammar incompatible with the tree-sitter runtime: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// The parser returned no syntax tree for the input.
    #[error("parser produced no syntax tree")]
    NoTree,
}
