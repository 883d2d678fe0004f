//! Performance benchmarks for geometric decomposition detection
//!
//! Synthetic programs: `functions` functions, each with a two-deep loop nest
//! and a helper function holding one more loop. Every run builds the
//! subtree index once, so detection should stay near-linear in graph size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use patterngraph_core::{
    AnalysisSession, CuGraph, CuGraphBuilder, CuNode, Dependence, GeometricDecompositionDetector,
    LoopIterationProfile, SourceLine,
};

fn synthetic_program(functions: u32) -> (CuGraph, LoopIterationProfile) {
    let mut b = CuGraphBuilder::new();
    let mut profile = LoopIterationProfile::new();

    for f in 0..functions {
        let base = f * 100;
        let at = |offset: u32| SourceLine::new(1, base + offset);

        let func = b
            .add_node(CuNode::function(format!("f{}", f), at(1), format!("f{}", f)))
            .unwrap();
        let outer = b
            .add_node(CuNode::loop_node(format!("f{}.outer", f), at(2), true, false))
            .unwrap();
        let inner = b
            .add_node(CuNode::loop_node(format!("f{}.inner", f), at(3), f % 3 != 0, true))
            .unwrap();
        let cond = b
            .add_node(CuNode::unit(format!("f{}.cond", f), at(3), 2, "for.cond"))
            .unwrap();
        let body = b
            .add_node(CuNode::unit(format!("f{}.body", f), at(4), 12, "for.body"))
            .unwrap();
        let inc = b
            .add_node(CuNode::unit(format!("f{}.inc", f), at(3), 1, "for.inc"))
            .unwrap();
        let helper = b
            .add_node(CuNode::function(format!("f{}.helper", f), at(50), "helper"))
            .unwrap();
        let hloop = b
            .add_node(CuNode::loop_node(format!("f{}.hloop", f), at(51), true, false))
            .unwrap();
        let hbody = b
            .add_node(CuNode::unit(format!("f{}.hbody", f), at(52), 6, "for.body"))
            .unwrap();

        b.add_child(func, outer).unwrap();
        b.add_child(outer, inner).unwrap();
        b.add_child(inner, cond).unwrap();
        b.add_child(inner, body).unwrap();
        b.add_child(inner, inc).unwrap();
        b.add_child(func, helper).unwrap();
        b.add_child(helper, hloop).unwrap();
        b.add_child(hloop, hbody).unwrap();

        b.add_dependence(inc, inc, Dependence::raw("i", at(3), at(3)))
            .unwrap();
        b.add_dependence(body, inc, Dependence::raw("i", at(3), at(4)))
            .unwrap();
        b.add_dependence(hbody, body, Dependence::raw("acc", at(4), at(52)))
            .unwrap();

        profile.insert(at(2), 16);
        profile.insert(at(3), 16 * 64);
        profile.insert(at(51), 32);
    }

    (b.build(), profile)
}

// ============================================================================
// Detection
// ============================================================================

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometric_decomposition");

    for functions in [10u32, 100, 1_000] {
        let (graph, profile) = synthetic_program(functions);
        group.throughput(Throughput::Elements(graph.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(functions),
            &(graph, profile),
            |b, (graph, profile)| {
                let detector = GeometricDecompositionDetector::default();
                b.iter(|| {
                    let mut graph = graph.clone();
                    black_box(detector.run(&mut graph, profile.clone()))
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Session building blocks
// ============================================================================

fn bench_workload(c: &mut Criterion) {
    let (graph, profile) = synthetic_program(100);
    let functions = graph.function_nodes();

    c.bench_function("workload_all_functions", |b| {
        b.iter(|| {
            let mut session = AnalysisSession::new(&graph, profile.clone());
            let total: u64 = functions
                .iter()
                .map(|&f| session.workload(f).unwrap_or(0))
                .sum();
            black_box(total)
        });
    });
}

fn bench_non_benign_dependencies(c: &mut Criterion) {
    let (graph, profile) = synthetic_program(100);
    let session = AnalysisSession::new(&graph, profile);
    let loops: Vec<_> = graph
        .function_nodes()
        .into_iter()
        .filter_map(|f| graph.children(f).into_iter().next())
        .collect();

    c.bench_function("all_non_benign_dependencies", |b| {
        let classifier = session.classifier();
        b.iter(|| {
            let count: usize = loops
                .iter()
                .map(|&l| classifier.all_non_benign_dependencies(l, l).len())
                .sum();
            black_box(count)
        });
    });
}

criterion_group!(
    benches,
    bench_detection,
    bench_workload,
    bench_non_benign_dependencies
);
criterion_main!(benches);
