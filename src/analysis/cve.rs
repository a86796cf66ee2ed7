// src/analysis/cve.rs
//! Known-CVE fingerprints: call sites whose callee and argument shapes match
//! vulnerabilities in specific PHP runtime versions.
//!
//! Argument checks work on raw source slices; nothing is evaluated, so a
//! fingerprint built up through variables is not caught. That is the same
//! precision every check here had when the CVEs were current.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tree_sitter::Node;

use super::{callee_name, is_call, line_of, raw_arguments, walk};

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").unwrap_or_else(|_| panic!("Invalid Regex")));

/// A source location matching a known-CVE fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub cve: &'static str,
    pub line: usize,
    pub message: String,
}

/// Scans the tree for the fingerprint catalogue.
#[must_use]
pub fn detect_vulnerabilities(root: Node<'_>, source: &[u8]) -> Vec<Detection> {
    let mut detections = Vec::new();

    walk(root, &mut |node| {
        if !is_call(node) {
            return;
        }
        let line = line_of(node);

        match callee_name(node, source) {
            "fsockopen" if is_fsockopen_port_confusion(node, source) => {
                detections.push(Detection {
                    cve: "CVE-2017-7189",
                    line,
                    message: "fsockopen with UDP target already carrying a port".to_string(),
                });
            }
            "mb_split" if is_mb_split_word_pattern(node, source) => {
                detections.push(Detection {
                    cve: "CVE-2019-9025",
                    line,
                    message: r#"mb_split("\w") pattern"#.to_string(),
                });
            }
            "iconv_mime_decode_headers" => {
                detections.push(Detection {
                    cve: "CVE-2019-11039",
                    line,
                    message: "iconv_mime_decode_headers(...) call".to_string(),
                });
            }
            "openssl_encrypt" if uses_gcm_or_ccm(node, source) => {
                detections.push(Detection {
                    cve: "CVE-2020-7069",
                    line,
                    message: "openssl_encrypt with an AES-GCM/CCM cipher".to_string(),
                });
            }
            "filter_var" if is_filter_var_validate_url(node, source) => {
                detections.push(Detection {
                    cve: "CVE-2020-7071 / CVE-2021-21705",
                    line,
                    message: "filter_var(..., FILTER_VALIDATE_URL)".to_string(),
                });
            }
            "simplexml_load_file" if has_dynamic_path(node, source) => {
                detections.push(Detection {
                    cve: "CVE-2021-21707",
                    line,
                    message: "simplexml_load_file with a dynamic path".to_string(),
                });
            }
            _ => {}
        }
    });

    detections
}

/// First argument is a `udp://` URL that already names a port while a
/// numeric port is passed separately.
fn is_fsockopen_port_confusion(node: Node<'_>, source: &[u8]) -> bool {
    let args = raw_arguments(node, source);
    if args.len() < 2 {
        return false;
    }
    let host = args[0].to_lowercase();
    let is_udp = host.contains("udp://") && host.contains(':');
    is_udp && NUMERIC_RE.is_match(args[1])
}

/// First argument is literally `"\w"`.
fn is_mb_split_word_pattern(node: Node<'_>, source: &[u8]) -> bool {
    raw_arguments(node, source).first() == Some(&r#""\w""#)
}

/// Cipher argument names a GCM or CCM mode.
fn uses_gcm_or_ccm(node: Node<'_>, source: &[u8]) -> bool {
    let args = raw_arguments(node, source);
    let Some(cipher) = args.get(1) else {
        return false;
    };
    let cipher = cipher
        .to_lowercase()
        .trim_matches(|c| c == '"' || c == '\'' || c == ' ')
        .to_string();
    cipher.contains("-gcm") || cipher.contains("-ccm")
}

fn is_filter_var_validate_url(node: Node<'_>, source: &[u8]) -> bool {
    let args = raw_arguments(node, source);
    args.get(1).is_some_and(|a| a.contains("FILTER_VALIDATE_URL"))
}

/// First argument is a variable, so the loaded path is attacker-influenced
/// at worst and unknown at best.
fn has_dynamic_path(node: Node<'_>, source: &[u8]) -> bool {
    raw_arguments(node, source)
        .first()
        .is_some_and(|a| a.starts_with('$'))
}
