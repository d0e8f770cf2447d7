//! Shared helpers for the graphstep-core integration tests.

#![allow(
    dead_code,
    reason = "each integration test binary uses a different subset of helpers"
)]

use std::sync::Arc;

use graphstep_core::{
    AdjacencyMatrix, GeneratedGraph, GraphConfig, GraphConfigBuilder, MODULUS, StepReport,
    TraversalEngine, TraversalMode,
};
use proptest::prelude::*;

/// Upper bound on generated vertex counts; traversal properties are
/// quadratic in it.
pub const MAX_VERTICES: usize = 16;

/// Generates valid configurations across sparse, moderate and saturated
/// densities.
pub fn config_strategy() -> impl Strategy<Value = GraphConfig> {
    let ranges = (1..MODULUS, 1..=MAX_VERTICES, 0.3_f64..1.6);
    ranges.prop_map(|(seed, vertex_count, density)| {
        match GraphConfigBuilder::new()
            .with_seed(seed)
            .with_vertex_count(vertex_count)
            .with_density(density)
            .build()
        {
            Ok(config) => config,
            Err(err) => panic!("strategy produced an invalid config: {err}"),
        }
    })
}

/// Generates square 0/1 matrices with no structure at all, self-loops and
/// bidirectional pairs included.
pub fn arbitrary_matrix_strategy() -> impl Strategy<Value = AdjacencyMatrix> {
    (1..=MAX_VERTICES)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0_u8..=1, n), n))
        .prop_map(|rows| match AdjacencyMatrix::try_from_rows(rows.as_slice()) {
            Ok(matrix) => matrix,
            Err(err) => panic!("strategy produced invalid rows: {err}"),
        })
}

/// Generates a directed matrix, either from the generator or arbitrary,
/// together with a traversal mode.
pub fn matrix_and_mode_strategy() -> impl Strategy<Value = (Arc<AdjacencyMatrix>, TraversalMode)> {
    let matrix = prop_oneof![
        config_strategy().prop_map(|config| generate(&config).shared_directed()),
        arbitrary_matrix_strategy().prop_map(Arc::new),
    ];
    (
        matrix,
        prop_oneof![Just(TraversalMode::Bfs), Just(TraversalMode::Dfs)],
    )
}

/// Generates the graph for `config`, panicking on the impossible failure.
pub fn generate(config: &GraphConfig) -> GeneratedGraph {
    match config.generate() {
        Ok(graph) => graph,
        Err(err) => panic!("validated config failed to generate: {err}"),
    }
}

/// Largest number of steps a traversal over `vertex_count` vertices may
/// take. Each vertex is finished once and discovered at most once, and every
/// restart saves one discovery step, leaving room for the completion step.
pub const fn step_bound(vertex_count: usize) -> usize {
    2 * vertex_count
}

/// Starts `mode` over the directed matrix and steps until completion,
/// giving up after [`step_bound`] steps.
pub fn run_to_end(
    graph: &Arc<AdjacencyMatrix>,
    mode: TraversalMode,
) -> (TraversalEngine, Vec<StepReport>) {
    let mut engine = TraversalEngine::new(Arc::clone(graph));
    engine.start(mode);
    let reports = std::iter::from_fn(|| engine.step())
        .take(step_bound(graph.vertex_count()) + 1)
        .collect();
    (engine, reports)
}
