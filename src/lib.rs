//! phpscope: a static analyzer for PHP source code.
//!
//! Builds an intra-procedural control-flow graph from tree-sitter syntax and
//! reports unreachable statements, alongside three plain syntax-tree walks:
//! a branch counter, a database-call detector, and a known-CVE fingerprint
//! catalogue.

pub mod analysis;
pub mod cfg;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod parser;
pub mod pretty;
pub mod reporting;
