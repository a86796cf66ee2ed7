// src/reporting/console.rs
//! Colored console rendering of analysis findings.

use std::path::Path;

use colored::Colorize;

use crate::analysis::cve::Detection;
use crate::analysis::dbcalls::DatabaseCall;
use crate::cfg::{Cfg, NodeId};

/// Per-file header for sweep output. Printed only for files with findings.
pub fn print_file_header(path: &Path) {
    println!("\n{}", path.display().to_string().cyan().bold());
}

pub fn print_branch_count(path: &Path, count: usize) {
    println!(
        "{} branching constructs in {}",
        count.to_string().bold(),
        path.display()
    );
}

pub fn print_database_calls(calls: &[DatabaseCall]) {
    for call in calls {
        println!(
            "- {} {}",
            call.description,
            format!("(line {})", call.line).dimmed()
        );
    }
}

pub fn print_detections(detections: &[Detection]) {
    for detection in detections {
        println!(
            "{} {} {}",
            format!("[{}]", detection.cve).red().bold(),
            detection.message,
            format!("(line {})", detection.line).dimmed()
        );
    }
}

/// Lists the unreachable node records after a CFG dump.
pub fn print_dead_code(cfg: &Cfg, dead: &[NodeId]) {
    if dead.is_empty() {
        println!("{}", "No unreachable nodes.".green());
        return;
    }

    println!(
        "{}",
        format!("{} unreachable node(s):", dead.len()).red().bold()
    );
    for &id in dead {
        if let Some(node) = cfg.node(id) {
            println!("  Node {}: {} [{}]", node.id, node.kind, node.label);
        }
    }
}
