//! Geometric decomposition detector
//!
//! Visits every function node of the graph. Evaluation of one function never
//! depends on another's, and a function without loops trivially matches
//! (but is never reported: the chunk limit needs at least one loop).

use crate::config::DetectionConfig;
use crate::features::cu_graph::CuGraph;
use crate::features::geometric_decomposition::domain::{DetectionReport, FunctionOutcome};
use crate::features::geometric_decomposition::infrastructure::{NodeVerdicts, SuitabilityScores};
use crate::features::geometric_decomposition::ports::LoopVerdictSource;
use crate::features::loop_iterations::LoopIterationProfile;
use crate::pipeline::AnalysisSession;
use crate::shared::models::{NodeKind, SourceLine};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

pub struct GeometricDecompositionDetector<V = NodeVerdicts> {
    config: DetectionConfig,
    verdicts: V,
}

impl GeometricDecompositionDetector<NodeVerdicts> {
    /// Detector reading do-all / reduction verdicts from loop nodes
    pub fn new(config: DetectionConfig) -> Self {
        Self::with_verdicts(config, NodeVerdicts)
    }
}

impl GeometricDecompositionDetector<SuitabilityScores> {
    /// Detector thresholding do-all scores at `config.do_all_threshold`
    ///
    /// Loops without a score keep the verdict stored on the node.
    pub fn with_scores<I, S>(config: DetectionConfig, scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let verdicts = scores
            .into_iter()
            .fold(SuitabilityScores::from_config(&config), |acc, (id, score)| {
                acc.with_score(id, score)
            });
        Self::with_verdicts(config, verdicts)
    }
}

impl Default for GeometricDecompositionDetector<NodeVerdicts> {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl<V: LoopVerdictSource> GeometricDecompositionDetector<V> {
    pub fn with_verdicts(config: DetectionConfig, verdicts: V) -> Self {
        Self { config, verdicts }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run detection over every function node
    ///
    /// Records `geometric_decomposition` on each function node and emits a
    /// notice for every reported function.
    pub fn run(&self, graph: &mut CuGraph, profile: LoopIterationProfile) -> DetectionReport {
        let functions = {
            let mut session = AnalysisSession::with_config(graph, profile, &self.config);
            self.evaluate_all(&mut session)
        };

        for outcome in &functions {
            if let Err(err) = graph.set_geometric_decomposition(outcome.node, outcome.matched) {
                tracing::warn!(function = %outcome.id, error = %err, "cannot record verdict");
            }
        }

        let entry_function = graph
            .main_node(&self.config)
            .and_then(|main| graph.node(main))
            .map(|n| n.id.clone());
        if entry_function.is_none() {
            tracing::debug!(
                name = %self.config.main_function_name,
                "entry function not found"
            );
        }

        let report = DetectionReport {
            functions,
            entry_function,
        };
        tracing::info!(
            functions = report.functions.len(),
            matched = report.matched().count(),
            reported = report.reported().count(),
            "geometric decomposition detection finished"
        );
        report
    }

    /// Evaluate every function node without touching the graph
    pub fn evaluate_all(&self, session: &mut AnalysisSession<'_>) -> Vec<FunctionOutcome> {
        let functions = session.graph().function_nodes();
        tracing::info!(
            functions = functions.len(),
            "geometric decomposition detection started"
        );

        functions
            .into_iter()
            .map(|function| self.evaluate(session, function))
            .collect()
    }

    /// Both stages for one function node
    pub fn evaluate(&self, session: &mut AnalysisSession<'_>, function: NodeIndex) -> FunctionOutcome {
        let graph = session.graph();
        let (id, name) = graph
            .node(function)
            .map(|n| (n.id.clone(), n.display_name().to_string()))
            .unwrap_or_default();

        let blocking_loop = self.find_blocking_loop(session, function);
        let matched = blocking_loop.is_none();

        let min_iterations = if matched {
            self.min_chunk_iterations(session, function)
        } else {
            None
        };
        let reported = matched && matches!(min_iterations, Some(min) if min > 0);

        if let Some(blocking) = blocking_loop {
            tracing::debug!(
                function = %id,
                blocking_loop = %graph.node(blocking).map_or("?", |n| n.id.as_str()),
                "no geometric decomposition"
            );
        } else {
            tracing::debug!(function = %id, ?min_iterations, "loop nests are do-all/reduction");
        }

        if reported {
            tracing::info!(function = %name, id = %id, "Geometric decomposition at {}", id);
        }

        FunctionOutcome {
            node: function,
            blocking_loop: blocking_loop
                .and_then(|l| graph.node(l))
                .map(|n| n.id.clone()),
            id,
            name,
            matched,
            reported,
            min_iterations,
        }
    }

    /// Stage A: whether every loop in scope is do-all or reduction
    pub fn matches_pattern(&self, session: &AnalysisSession<'_>, function: NodeIndex) -> bool {
        self.find_blocking_loop(session, function).is_none()
    }

    /// First loop under `function` that is neither do-all nor reduction
    ///
    /// The subtree covers loops of nested functions at any depth.
    pub fn find_blocking_loop(
        &self,
        session: &AnalysisSession<'_>,
        function: NodeIndex,
    ) -> Option<NodeIndex> {
        let graph = session.graph();
        session
            .index()
            .subtree_of_kind(graph, function, Some(NodeKind::Loop))
            .find(|&l| !self.verdicts.verdict(graph, l).is_parallelizable())
    }

    /// Stage B: smallest effective iteration count of the chunking loops
    ///
    /// Chunking loops are the direct loop children of `function` and of the
    /// functions directly nested in it. Loops sharing a header line count
    /// once (the last one visited wins). `None` when there are no such loops.
    pub fn min_chunk_iterations(
        &self,
        session: &mut AnalysisSession<'_>,
        function: NodeIndex,
    ) -> Option<u64> {
        let graph = session.graph();

        let mut loops = graph.children_of_kind(function, NodeKind::Loop);
        for nested in graph.children_of_kind(function, NodeKind::Function) {
            loops.extend(graph.children_of_kind(nested, NodeKind::Loop));
        }

        let mut by_header: HashMap<SourceLine, u64> = HashMap::new();
        for l in loops {
            let Some(header) = graph.node(l).map(|n| n.start_line) else {
                continue;
            };
            by_header.insert(header, session.effective_iterations(l));
        }

        by_header.into_values().min()
    }

    /// Stage B as a predicate
    pub fn passes_chunk_limit(&self, session: &mut AnalysisSession<'_>, function: NodeIndex) -> bool {
        matches!(self.min_chunk_iterations(session, function), Some(min) if min > 0)
    }
}
