//! Integration tests for workload estimation and effective iterations

mod common;

use common::{idx, line, reduction_loop, GraphFixture};
use patterngraph_core::{
    AnalysisSession, CuGraph, DetectionConfig, LoopIterationProfile, PatternError,
};
use petgraph::graph::NodeIndex;
use pretty_assertions::assert_eq;

/// main ⊃ { entry(3), outer(1:2) ⊃ { ocond(1), inner(1:3) ⊃ { icond(2), body(5), iinc(1) }, oinc(1) } }
fn nest() -> CuGraph {
    GraphFixture::new()
        .function("main", 1)
        .unit_in("main", "entry", 1, 3, "entry")
        .loop_in("main", "outer", 2, true, false)
        .unit_in("outer", "ocond", 2, 1, "for.cond")
        .loop_in("outer", "inner", 3, true, false)
        .unit_in("inner", "icond", 3, 2, "for.cond3")
        .unit_in("inner", "body", 4, 5, "for.body5")
        .unit_in("inner", "iinc", 3, 1, "for.inc6")
        .unit_in("outer", "oinc", 2, 1, "for.inc")
        .build()
}

#[test]
fn test_effective_iterations_normalize_by_enclosing_loop() {
    let graph = nest();
    let profile = LoopIterationProfile::new()
        .with(line(2), 10)
        .with(line(3), 100);
    let mut session = AnalysisSession::new(&graph, profile);

    assert_eq!(session.effective_iterations(idx(&graph, "outer")), 10);
    assert_eq!(session.effective_iterations(idx(&graph, "inner")), 10);
}

#[test]
fn test_effective_iterations_edge_cases() {
    let graph = nest();
    let outer = idx(&graph, "outer");
    let inner = idx(&graph, "inner");

    // fewer than the parent: kept raw
    let mut session = AnalysisSession::new(
        &graph,
        LoopIterationProfile::new().with(line(2), 10).with(line(3), 4),
    );
    assert_eq!(session.effective_iterations(inner), 4);

    // unmeasured parent counts as a single invocation
    session.reset_profile(LoopIterationProfile::new().with(line(3), 30));
    assert_eq!(session.effective_iterations(outer), 0);
    assert_eq!(session.effective_iterations(inner), 30);

    // truncating division
    session.reset_profile(LoopIterationProfile::new().with(line(2), 3).with(line(3), 10));
    assert_eq!(session.effective_iterations(inner), 3);
}

#[test]
fn test_loop_workload_uses_block_roles() {
    let graph = nest();
    let profile = LoopIterationProfile::new()
        .with(line(2), 10)
        .with(line(3), 100);
    let mut session = AnalysisSession::new(&graph, profile);

    // inner: icond 2 * 11 + body 5 * 10 + iinc 1
    assert_eq!(session.workload(idx(&graph, "inner")).unwrap(), 22 + 50 + 1);

    // outer (10): ocond 1 * 11 + icond 2 * 11 + body 5 * 10 + iinc 1 + oinc 1
    assert_eq!(
        session.workload(idx(&graph, "outer")).unwrap(),
        11 + 22 + 50 + 1 + 1
    );
}

#[test]
fn test_function_workload_sums_children() {
    let graph = nest();
    let profile = LoopIterationProfile::new()
        .with(line(2), 10)
        .with(line(3), 100);
    let mut session = AnalysisSession::new(&graph, profile);

    let outer = session.workload(idx(&graph, "outer")).unwrap();
    let main = session.workload(idx(&graph, "main")).unwrap();
    assert_eq!(main, 3 + outer);
}

#[test]
fn test_total_instructions_ignores_iterations() {
    let graph = nest();
    let mut session = AnalysisSession::new(
        &graph,
        LoopIterationProfile::new().with(line(2), 1000).with(line(3), 1000),
    );

    let main = idx(&graph, "main");
    assert_eq!(session.total_instructions(main), 3 + 1 + 2 + 5 + 1 + 1);
    assert!(session.workload(main).unwrap() > session.total_instructions(main));
}

#[test]
fn test_dummy_and_unit_workloads() {
    let graph = GraphFixture::new()
        .function("f", 1)
        .unit_in("f", "cu", 2, 42, "entry")
        .dummy_in("f", "dummy", 3)
        .build();
    let mut session = AnalysisSession::new(&graph, LoopIterationProfile::new());

    assert_eq!(session.workload(idx(&graph, "cu")).unwrap(), 42);
    assert_eq!(session.workload(idx(&graph, "dummy")).unwrap(), 0);
    assert_eq!(session.workload(idx(&graph, "f")).unwrap(), 42);
}

#[test]
fn test_workload_of_foreign_node_fails() {
    let graph = reduction_loop();
    let mut session = AnalysisSession::new(&graph, LoopIterationProfile::new());

    let err = session.workload(NodeIndex::new(9_999)).unwrap_err();
    assert!(matches!(err, PatternError::NodeNotFound(_)));
}

#[test]
fn test_configured_block_markers() {
    let graph = nest();
    let profile = LoopIterationProfile::new().with(line(2), 10).with(line(3), 100);
    // No unit matches: everything counts as body
    let config = DetectionConfig::default().with_block_markers("while.inc", "while.cond");
    let mut session = AnalysisSession::with_config(&graph, profile, &config);

    assert_eq!(
        session.workload(idx(&graph, "inner")).unwrap(),
        (2 + 5 + 1) * 10
    );
}
