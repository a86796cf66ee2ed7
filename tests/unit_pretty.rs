// tests/unit_pretty.rs
use phpscope::pretty::PrettyPrinter;

fn format(src: &str) -> String {
    PrettyPrinter::default()
        .format(src)
        .expect("format should succeed")
}

#[test]
fn test_tag_and_echo() {
    let out = format("<?php echo \"hi\";");
    assert!(out.contains("<?php"));
    assert!(out.contains("echo \"hi\";"));
}

#[test]
fn test_assignment_gets_operator_spacing() {
    let out = format("<?php $a=1;");
    assert!(out.contains("$a = 1;"), "got: {out:?}");
}

#[test]
fn test_if_block_layout() {
    let out = format("<?php if($a<5){echo \"x\";}");
    assert!(out.contains("if ($a < 5) {"), "got: {out:?}");
    assert!(out.contains("echo \"x\";"));
    assert!(out.ends_with('}'), "got: {out:?}");
}

#[test]
fn test_while_block_layout() {
    let out = format("<?php while($i<10){$i=$i+1;}");
    assert!(out.contains("while ($i < 10) {"), "got: {out:?}");
    assert!(out.contains("$i = $i + 1;"));
}

#[test]
fn test_else_clause_keeps_keyword() {
    let out = format("<?php if($a){echo \"t\";}else{echo \"f\";}");
    assert!(out.contains("} else {"), "got: {out:?}");
}
