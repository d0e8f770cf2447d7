//! Structural properties of traversals over generated and arbitrary matrices.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use graphstep_core::{AdjacencyMatrix, StepOutcome, TraversalEngine, TraversalMode, VertexState};
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

use common::{matrix_and_mode_strategy, run_to_end, step_bound};

fn check_forest(graph: &Arc<AdjacencyMatrix>, mode: TraversalMode) -> TestCaseResult {
    let (engine, reports) = run_to_end(graph, mode);
    let directed = graph.as_ref();
    let session = engine.session();
    let n = directed.vertex_count();

    prop_assert!(session.is_complete(), "traversal did not finish");
    prop_assert!(reports.len() <= step_bound(n));
    prop_assert_eq!(
        reports.last().map(|report| report.outcome),
        Some(StepOutcome::Completed)
    );

    let mut children = HashSet::new();
    for edge in session.tree_edges() {
        prop_assert!(
            directed.has_edge(edge.from, edge.to),
            "{} is not an arc",
            edge
        );
        prop_assert_ne!(edge.from, edge.to);
        prop_assert!(children.insert(edge.to), "{} discovered twice", edge.to + 1);
        prop_assert!(!session.forest().roots().contains(&edge.to));
    }

    let visited: Vec<usize> = (0..n)
        .filter(|&vertex| session.state(vertex) == VertexState::Visited)
        .collect();
    prop_assert_eq!(
        session.tree_edges().len(),
        visited.len() - session.forest().roots().len()
    );

    let mut order = session.order().to_vec();
    order.sort_unstable();
    prop_assert_eq!(order, visited);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn completed_traversal_grows_a_spanning_forest((graph, mode) in matrix_and_mode_strategy()) {
        check_forest(&graph, mode)?;
    }

    #[test]
    fn only_edgeless_vertices_are_left_behind((graph, mode) in matrix_and_mode_strategy()) {
        let (engine, _) = run_to_end(&graph, mode);
        let session = engine.session();
        let has_edges = (0..graph.vertex_count()).any(|vertex| graph.has_outgoing(vertex));
        for (vertex, &state) in session.states().iter().enumerate() {
            prop_assert!(
                matches!(state, VertexState::Unvisited | VertexState::Visited),
                "vertex {} finished as {}", vertex + 1, state
            );
            if state == VertexState::Unvisited {
                prop_assert!(!graph.has_outgoing(vertex));
                prop_assert!(has_edges || vertex != 0);
            }
        }
    }

    #[test]
    fn states_never_move_backwards((graph, mode) in matrix_and_mode_strategy()) {
        let mut engine = TraversalEngine::new(Arc::clone(&graph));
        engine.start(mode);
        let mut previous = engine.session().states().to_vec();
        while engine.step().is_some() {
            let current = engine.session().states();
            prop_assert!(previous.iter().zip(current).all(|(before, after)| before <= after));
            previous = current.to_vec();
        }
    }

    #[test]
    fn depth_first_steps_follow_at_most_one_edge((graph, _) in matrix_and_mode_strategy()) {
        let (_, reports) = run_to_end(&graph, TraversalMode::Dfs);
        prop_assert!(reports.iter().all(|report| report.new_edges.len() <= 1));
    }

    #[test]
    fn breadth_first_forest_respects_levels((graph, _) in matrix_and_mode_strategy()) {
        let (engine, _) = run_to_end(&graph, TraversalMode::Bfs);
        let forest = engine.session().forest();
        for (depth, level) in forest.levels().iter().enumerate() {
            for &vertex in level {
                prop_assert_eq!(forest.depth(vertex), Some(depth));
            }
        }
        let listed: usize = forest.levels().iter().map(Vec::len).sum();
        prop_assert_eq!(listed, forest.len() + forest.roots().len());
    }

    #[test]
    fn restarting_reproduces_the_same_session((graph, mode) in matrix_and_mode_strategy()) {
        let (mut engine, first) = run_to_end(&graph, mode);
        let finished = engine.session().clone();
        engine.reset();
        engine.start(mode);
        let second: Vec<_> = std::iter::from_fn(|| engine.step()).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(engine.session(), &finished);
    }
}
