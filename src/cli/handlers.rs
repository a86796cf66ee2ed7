// src/cli/handlers.rs
//! Command handlers for the phpscope CLI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::branches::count_branches;
use crate::analysis::cve::detect_vulnerabilities;
use crate::analysis::dbcalls::detect_database_calls;
use crate::cfg::build_cfg;
use crate::discovery::discover_php_files;
use crate::exit::ExitStatus;
use crate::parser::ParsedSource;
use crate::pretty::PrettyPrinter;
use crate::reporting::console;

/// Findings for one file in a directory sweep or JSON dump.
#[derive(Serialize)]
struct FileFindings<T: Serialize> {
    file: PathBuf,
    findings: Vec<T>,
}

/// Counts branching constructs in a single file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn handle_count(file: &Path) -> Result<ExitStatus> {
    let parsed = ParsedSource::from_path(file)?;
    let count = count_branches(parsed.root());
    console::print_branch_count(file, count);
    Ok(ExitStatus::Success)
}

/// Detects database call sites in a file or a directory tree.
///
/// # Errors
/// Returns error if no target was given or a single-file analysis fails.
pub fn handle_dbcalls(file: Option<&Path>, dir: Option<&Path>, json: bool) -> Result<ExitStatus> {
    run_findings(
        file,
        dir,
        json,
        |parsed| detect_database_calls(parsed.root(), &parsed.source),
        console::print_database_calls,
    )
}

/// Detects known-CVE fingerprints in a file or a directory tree.
///
/// # Errors
/// Returns error if no target was given or a single-file analysis fails.
pub fn handle_cve(file: Option<&Path>, dir: Option<&Path>, json: bool) -> Result<ExitStatus> {
    run_findings(
        file,
        dir,
        json,
        |parsed| detect_vulnerabilities(parsed.root(), &parsed.source),
        console::print_detections,
    )
}

/// Builds and dumps the CFG; optionally reports unreachable nodes.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn handle_cfg(file: &Path, dead: bool) -> Result<ExitStatus> {
    let source = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let cfg = build_cfg(&source)?;

    cfg.print();
    if dead {
        let dead_ids = cfg.detect_dead_code();
        console::print_dead_code(&cfg, &dead_ids);
    }
    Ok(ExitStatus::Success)
}

/// Pretty-prints a file to stdout.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn handle_fmt(file: &Path) -> Result<ExitStatus> {
    let source =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let printer = PrettyPrinter::default();
    print!("{}", printer.format(&source)?);
    Ok(ExitStatus::Success)
}

/// Shared single-file / directory-sweep plumbing for the finding commands.
fn run_findings<T, A, P>(
    file: Option<&Path>,
    dir: Option<&Path>,
    json: bool,
    analyze: A,
    print: P,
) -> Result<ExitStatus>
where
    T: Serialize + Send,
    A: Fn(&ParsedSource) -> Vec<T> + Sync,
    P: Fn(&[T]),
{
    if file.is_none() && dir.is_none() {
        bail!("pass --file or --dir");
    }

    if let Some(path) = file {
        let parsed = ParsedSource::from_path(path)?;
        let findings = analyze(&parsed);
        if json {
            let report = FileFindings {
                file: path.to_path_buf(),
                findings,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if !findings.is_empty() {
            console::print_file_header(path);
            print(&findings);
        }
    }

    if let Some(root) = dir {
        let reports = sweep(root, &analyze);
        if json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                console::print_file_header(&report.file);
                print(&report.findings);
            }
        }
    }

    Ok(ExitStatus::Success)
}

/// Analyzes every PHP file under `root` in parallel. Files that fail to read
/// or parse are reported to stderr and skipped; only files with findings
/// make it into the result.
fn sweep<T, A>(root: &Path, analyze: &A) -> Vec<FileFindings<T>>
where
    T: Serialize + Send,
    A: Fn(&ParsedSource) -> Vec<T> + Sync,
{
    let files = discover_php_files(root);

    let mut reports: Vec<FileFindings<T>> = files
        .par_iter()
        .filter_map(|path| match ParsedSource::from_path(path) {
            Ok(parsed) => {
                let findings = analyze(&parsed);
                (!findings.is_empty()).then(|| FileFindings {
                    file: path.clone(),
                    findings,
                })
            }
            Err(e) => {
                eprintln!("WARN: skipping {}: {e:#}", path.display());
                None
            }
        })
        .collect();

    reports.sort_by(|a, b| a.file.cmp(&b.file));
    reports
}
