// tests/unit_dead_code.rs
//! Break/continue resolution and reachability over the built CFG.

use phpscope::cfg::{build_cfg, Cfg, NodeId, NodeKind};

fn build(src: &str) -> Cfg {
    build_cfg(src.as_bytes()).expect("CFG build should succeed")
}

fn ids_of(cfg: &Cfg, kind: NodeKind) -> Vec<NodeId> {
    cfg.nodes()
        .filter(|n| n.kind == kind)
        .map(|n| n.id)
        .collect()
}

fn sole(cfg: &Cfg, kind: NodeKind) -> NodeId {
    let ids = ids_of(cfg, kind);
    assert_eq!(ids.len(), 1, "expected exactly one {kind:?} node");
    ids[0]
}

fn sole_successor(cfg: &Cfg, id: NodeId) -> NodeId {
    let succs = cfg.successors(id);
    assert_eq!(succs.len(), 1, "node {id} should have exactly one successor");
    succs[0]
}

fn kind_of(cfg: &Cfg, id: NodeId) -> NodeKind {
    cfg.node(id).expect("node should exist").kind
}

fn node_labeled(cfg: &Cfg, kind: NodeKind, label: &str) -> NodeId {
    let ids: Vec<NodeId> = cfg
        .nodes()
        .filter(|n| n.kind == kind && n.label == label)
        .map(|n| n.id)
        .collect();
    assert_eq!(ids.len(), 1, "expected one {kind:?} [{label}] node");
    ids[0]
}

/// The Echo node that feeds the given argument node.
fn echo_feeding(cfg: &Cfg, arg_id: NodeId) -> NodeId {
    cfg.nodes()
        .find(|n| n.kind == NodeKind::Echo && cfg.successors(n.id).contains(&arg_id))
        .expect("echo feeding the argument should exist")
        .id
}

const LOOP_WITH_DEAD_TAIL: &str = r#"<?php
$i = 0;

while ($i < 10) {
    $i = $i + 1;
    if ($i == 5)
        break;
    continue;
    echo "Dead";
}

echo "Done";"#;

#[test]
fn test_break_targets_loop_end() {
    let cfg = build(LOOP_WITH_DEAD_TAIL);
    let while_end = sole(&cfg, NodeKind::WhileEnd);
    let brk = sole(&cfg, NodeKind::Break);
    assert_eq!(cfg.successors(brk), &[while_end]);
}

#[test]
fn test_continue_targets_loop_header() {
    let cfg = build(LOOP_WITH_DEAD_TAIL);
    let while_id = sole(&cfg, NodeKind::While);
    let cont = sole(&cfg, NodeKind::Continue);
    assert_eq!(cfg.successors(cont), &[while_id]);
}

#[test]
fn test_statements_after_continue_are_dead() {
    let cfg = build(LOOP_WITH_DEAD_TAIL);
    let dead = cfg.detect_dead_code();

    let dead_str = node_labeled(&cfg, NodeKind::String, "Dead");
    let dead_echo = echo_feeding(&cfg, dead_str);
    assert!(dead.contains(&dead_str), "dead echo argument should be unreachable");
    assert!(dead.contains(&dead_echo), "dead echo should be unreachable");

    // The live tail stays live.
    let done_str = node_labeled(&cfg, NodeKind::String, "Done");
    assert!(!dead.contains(&done_str));
    assert!(!dead.contains(&sole(&cfg, NodeKind::WhileEnd)));
}

#[test]
fn test_loop_exit_flows_to_trailing_echo() {
    let cfg = build(LOOP_WITH_DEAD_TAIL);

    let while_end = sole(&cfg, NodeKind::WhileEnd);
    let echo = sole_successor(&cfg, while_end);
    assert_eq!(kind_of(&cfg, echo), NodeKind::Echo);
    let done = sole_successor(&cfg, echo);
    assert_eq!(done, node_labeled(&cfg, NodeKind::String, "Done"));
    let exit = sole_successor(&cfg, done);
    assert_eq!(kind_of(&cfg, exit), NodeKind::Exit);
}

#[test]
fn test_nested_loops_have_distinct_break_targets() {
    let cfg = build(r#"<?php while ($a < 1) { while ($b < 1) { break; } break; }"#);

    let breaks = ids_of(&cfg, NodeKind::Break);
    assert_eq!(breaks.len(), 2);
    assert_eq!(ids_of(&cfg, NodeKind::WhileEnd).len(), 2);

    // Lexically first break is the inner one and carries the lower id.
    let inner_target = sole_successor(&cfg, breaks[0]);
    let outer_target = sole_successor(&cfg, breaks[1]);
    assert_eq!(kind_of(&cfg, inner_target), NodeKind::WhileEnd);
    assert_eq!(kind_of(&cfg, outer_target), NodeKind::WhileEnd);
    assert_ne!(inner_target, outer_target);

    // The outer post-loop slot is reserved before the inner loop exists.
    assert!(outer_target < inner_target);
}

#[test]
fn test_both_branches_terminal_kills_fallthrough() {
    let cfg = build(
        r#"<?php while ($a < 1) { if ($b == 0) { break; } else { continue; } echo "X"; }"#,
    );
    let dead = cfg.detect_dead_code();

    let x = node_labeled(&cfg, NodeKind::String, "X");
    assert!(dead.contains(&x));
    assert!(dead.contains(&echo_feeding(&cfg, x)));

    // With both branches dead-ended, nothing reaches the join node either.
    let if_end = sole(&cfg, NodeKind::IfEnd);
    assert!(dead.contains(&if_end));

    // The loop itself stays live.
    assert!(!dead.contains(&sole(&cfg, NodeKind::While)));
    assert!(!dead.contains(&sole(&cfg, NodeKind::WhileEnd)));
}

#[test]
fn test_continue_outside_loop_edges_to_entry() {
    let cfg = build("<?php continue;");
    let cont = sole(&cfg, NodeKind::Continue);
    assert_eq!(cfg.successors(cont), &[1]);
}

#[test]
fn test_break_outside_loop_edges_to_next_free_id() {
    let cfg = build("<?php break;");
    let brk = sole(&cfg, NodeKind::Break);
    // No loop frame is active, so the edge aims at the identifier that had
    // not been allocated yet at emission time.
    assert_eq!(cfg.successors(brk), &[brk + 1]);
}

#[test]
fn test_dead_set_is_idempotent() {
    let cfg = build(LOOP_WITH_DEAD_TAIL);
    assert_eq!(cfg.detect_dead_code(), cfg.detect_dead_code());
}

#[test]
fn test_straight_line_code_has_no_dead_nodes() {
    let cfg = build(r#"<?php $a = 1; echo "ok";"#);
    assert!(cfg.detect_dead_code().is_empty());
}
