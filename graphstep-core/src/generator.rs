//! Deterministic random graph construction.
//!
//! The directed generator consumes the stream in two passes and the order of
//! draws is part of its contract: the same seed reproduces the same matrix
//! only while the loops below keep their row-major order and pass two keeps
//! drawing for qualifying pairs alone.

use std::sync::Arc;

use tracing::{Span, field, instrument};

use crate::{
    config::GraphConfig,
    matrix::{AdjacencyMatrix, Orientation},
    random::RandomStream,
};

/// Builds a directed matrix over `vertex_count` vertices with density
/// constant `density`.
///
/// Pass one draws once per ordered pair, diagonal included, in row-major
/// order; `(i, j)` becomes an arc when `2 * draw * density >= 1`. Pass two
/// walks `i < j` in row-major order and, for each pair that is now
/// bidirectional, draws once more: below one half clears `(i, j)`, otherwise
/// `(j, i)`. Self-loops are never touched by pass two, and no pair is left
/// bidirectional.
///
/// # Panics
/// Panics when `vertex_count * vertex_count` overflows `usize`.
/// [`GraphConfigBuilder::build`](crate::GraphConfigBuilder::build) caps the
/// count at [`MAX_VERTEX_COUNT`](crate::MAX_VERTEX_COUNT).
///
/// # Examples
/// ```
/// use graphstep_core::{RandomStream, generate_directed};
///
/// let mut stream = RandomStream::try_new(4111)?;
/// let directed = generate_directed(11, 0.835, &mut stream);
/// let row: Vec<bool> = directed.row(0).expect("row 0 exists").to_vec();
/// assert!(row[1] && row[7]);
/// assert_eq!(directed.out_degree(0), 2);
/// # Ok::<(), graphstep_core::GraphError>(())
/// ```
#[instrument(
    name = "core.generate_directed",
    skip(stream),
    fields(initial_edges = field::Empty, pruned_pairs = field::Empty),
)]
pub fn generate_directed(
    vertex_count: usize,
    density: f64,
    stream: &mut RandomStream,
) -> AdjacencyMatrix {
    let mut cells = vec![false; vertex_count * vertex_count];

    // Pass one: exactly one draw per cell, row 0 first.
    for cell in &mut cells {
        let value = stream.next_f64() * 2.0;
        *cell = value * density >= 1.0;
    }
    let initial_edges = cells.iter().filter(|&&edge| edge).count();

    // Pass two: one draw per pair found bidirectional, upper triangle only.
    let mut pruned_pairs = 0_usize;
    for from in 0..vertex_count {
        for to in from + 1..vertex_count {
            let forward = from * vertex_count + to;
            let backward = to * vertex_count + from;
            if cells[forward] && cells[backward] {
                if stream.next_f64() < 0.5 {
                    cells[forward] = false;
                } else {
                    cells[backward] = false;
                }
                pruned_pairs += 1;
            }
        }
    }

    let span = Span::current();
    span.record("initial_edges", initial_edges);
    span.record("pruned_pairs", pruned_pairs);

    AdjacencyMatrix::from_cells(vertex_count, Orientation::Directed, cells)
}

/// Derives the symmetric closure: `(i, j)` is an edge when either `(i, j)` or
/// `(j, i)` is set in `directed`. Consumes no randomness.
///
/// Applying it to an undirected matrix returns an equal matrix.
#[must_use]
pub fn generate_undirected(directed: &AdjacencyMatrix) -> AdjacencyMatrix {
    let n = directed.vertex_count();
    let cells = (0..n)
        .flat_map(|from| (0..n).map(move |to| (from, to)))
        .map(|(from, to)| directed.has_edge(from, to) || directed.has_edge(to, from))
        .collect();
    AdjacencyMatrix::from_cells(n, Orientation::Undirected, cells)
}

/// The matrices generated for one session, shared read-only with the
/// traversal engine and renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedGraph {
    config: GraphConfig,
    directed: Arc<AdjacencyMatrix>,
    undirected: Arc<AdjacencyMatrix>,
}

impl GeneratedGraph {
    pub(crate) fn new(
        config: GraphConfig,
        directed: AdjacencyMatrix,
        undirected: AdjacencyMatrix,
    ) -> Self {
        Self {
            config,
            directed: Arc::new(directed),
            undirected: Arc::new(undirected),
        }
    }

    /// Returns the configuration the graph was generated from.
    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns the directed matrix.
    #[must_use]
    pub fn directed(&self) -> &AdjacencyMatrix {
        &self.directed
    }

    /// Returns the undirected closure.
    #[must_use]
    pub fn undirected(&self) -> &AdjacencyMatrix {
        &self.undirected
    }

    /// Returns a shared handle to the directed matrix.
    #[must_use]
    pub fn shared_directed(&self) -> Arc<AdjacencyMatrix> {
        Arc::clone(&self.directed)
    }

    /// Returns the matrix for `orientation`.
    #[must_use]
    pub fn matrix(&self, orientation: Orientation) -> &AdjacencyMatrix {
        match orientation {
            Orientation::Directed => &self.directed,
            Orientation::Undirected => &self.undirected,
        }
    }
}
