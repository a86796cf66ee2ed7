// tests/unit_analysis.rs
//! Branch counting, database-call detection, and the CVE catalogue.

use phpscope::analysis::branches::count_branches;
use phpscope::analysis::cve::detect_vulnerabilities;
use phpscope::analysis::dbcalls::detect_database_calls;
use phpscope::parser::ParsedSource;

fn parse(src: &str) -> ParsedSource {
    ParsedSource::from_bytes(src.as_bytes().to_vec()).expect("parse should succeed")
}

fn cves(src: &str) -> Vec<&'static str> {
    let parsed = parse(src);
    detect_vulnerabilities(parsed.root(), &parsed.source)
        .into_iter()
        .map(|d| d.cve)
        .collect()
}

// --- Branch counting ---

#[test]
fn test_counts_all_branch_kinds() {
    let src = r#"<?php
if ($a) {}
while ($b) {}
for ($i = 0; $i < 3; $i = $i + 1) {}
foreach ($items as $item) {}
"#;
    let parsed = parse(src);
    assert_eq!(count_branches(parsed.root()), 4);
}

#[test]
fn test_counts_nested_branches() {
    let src = r#"<?php while ($a) { if ($b) { echo "x"; } }"#;
    let parsed = parse(src);
    assert_eq!(count_branches(parsed.root()), 2);
}

#[test]
fn test_straight_line_has_no_branches() {
    let parsed = parse(r#"<?php $a = 1; echo $a;"#);
    assert_eq!(count_branches(parsed.root()), 0);
}

// --- Database calls ---

#[test]
fn test_detects_mysql_query_with_line() {
    let parsed = parse("<?php\nmysql_query(\"SELECT * FROM users\");\n");
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "mysql_query");
    assert_eq!(calls[0].line, 2);
}

#[test]
fn test_detects_mysqli_query() {
    let parsed = parse(r#"<?php mysqli_query($link, "SELECT 1");"#);
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "mysqli_query");
}

#[test]
fn test_detects_member_execute() {
    let parsed = parse(r#"<?php $stmt->execute();"#);
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "$object->execute()");
}

#[test]
fn test_plain_execute_is_not_a_database_call() {
    let parsed = parse(r#"<?php execute();"#);
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert!(calls.is_empty());
}

#[test]
fn test_detects_mysql_exec_chain() {
    let parsed = parse(r#"<?php $db->mysql->exec("DROP TABLE t");"#);
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "$object->mysql->exec");
}

#[test]
fn test_unrelated_exec_is_ignored() {
    let parsed = parse(r#"<?php $shell->exec("ls");"#);
    let calls = detect_database_calls(parsed.root(), &parsed.source);
    assert!(calls.is_empty());
}

// --- CVE fingerprints ---

#[test]
fn test_fsockopen_udp_port_confusion() {
    assert_eq!(
        cves(r#"<?php fsockopen("udp://example.org:53", 53);"#),
        vec!["CVE-2017-7189"]
    );
}

#[test]
fn test_fsockopen_tcp_is_clean() {
    assert!(cves(r#"<?php fsockopen("tcp://example.org", 80);"#).is_empty());
}

#[test]
fn test_fsockopen_non_numeric_port_is_clean() {
    assert!(cves(r#"<?php fsockopen("udp://example.org:53", $port);"#).is_empty());
}

#[test]
fn test_mb_split_word_pattern() {
    assert_eq!(
        cves(r#"<?php mb_split("\w", $subject);"#),
        vec!["CVE-2019-9025"]
    );
}

#[test]
fn test_mb_split_other_pattern_is_clean() {
    assert!(cves(r#"<?php mb_split("\d", $subject);"#).is_empty());
}

#[test]
fn test_iconv_mime_decode_headers() {
    assert_eq!(
        cves(r#"<?php iconv_mime_decode_headers($headers);"#),
        vec!["CVE-2019-11039"]
    );
}

#[test]
fn test_openssl_encrypt_gcm() {
    assert_eq!(
        cves(r#"<?php openssl_encrypt($data, "aes-256-gcm", $key);"#),
        vec!["CVE-2020-7069"]
    );
}

#[test]
fn test_openssl_encrypt_cbc_is_clean() {
    assert!(cves(r#"<?php openssl_encrypt($data, "aes-256-cbc", $key);"#).is_empty());
}

#[test]
fn test_filter_var_validate_url() {
    assert_eq!(
        cves(r#"<?php filter_var($url, FILTER_VALIDATE_URL);"#),
        vec!["CVE-2020-7071 / CVE-2021-21705"]
    );
}

#[test]
fn test_filter_var_email_is_clean() {
    assert!(cves(r#"<?php filter_var($email, FILTER_VALIDATE_EMAIL);"#).is_empty());
}

#[test]
fn test_simplexml_load_file_dynamic_path() {
    assert_eq!(
        cves(r#"<?php simplexml_load_file($path);"#),
        vec!["CVE-2021-21707"]
    );
}

#[test]
fn test_simplexml_load_file_static_path_is_clean() {
    assert!(cves(r#"<?php simplexml_load_file("config.xml");"#).is_empty());
}

#[test]
fn test_detection_lines_are_one_based() {
    let parsed = parse("<?php\n\n\niconv_mime_decode_headers($h);\n");
    let found = detect_vulnerabilities(parsed.root(), &parsed.source);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].line, 4);
}
