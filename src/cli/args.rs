// src/cli/args.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "phpscope", version, about = "PHP static analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count branching constructs in a PHP file
    Count {
        /// PHP file to analyze
        #[arg(long)]
        file: PathBuf,
    },
    /// Detect database interaction call sites
    Dbcalls {
        /// PHP file to analyze
        #[arg(long)]
        file: Option<PathBuf>,
        /// Directory to analyze recursively
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Emit findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect source locations matching known-CVE fingerprints
    Cve {
        /// PHP file to analyze
        #[arg(long)]
        file: Option<PathBuf>,
        /// Directory to analyze recursively
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Emit findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the control-flow graph of a file and dump it
    Cfg {
        /// PHP file to analyze
        #[arg(long)]
        file: PathBuf,
        /// Also report unreachable nodes
        #[arg(long)]
        dead: bool,
    },
    /// Pretty-print a PHP file to stdout
    Fmt {
        /// PHP file to reformat
        #[arg(long)]
        file: PathBuf,
    },
}
