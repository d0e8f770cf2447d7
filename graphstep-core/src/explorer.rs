//! Control surface tying the generated graph to one traversal engine.
//!
//! [`Explorer`] exposes the six zero-argument actions a front end binds to
//! buttons or commands and produces a [`Frame`] after each of them.

use tracing::{debug, instrument};

use crate::{
    config::GraphConfig,
    error::Result,
    generator::GeneratedGraph,
    matrix::{AdjacencyMatrix, Orientation},
    traversal::{
        LogEntry, StepReport, TraversalEngine, TraversalForest, TraversalMode, TreeEdge,
        VertexState,
    },
};

/// Number of recent log entries shown in a frame.
pub const LOG_TAIL_LEN: usize = 8;

/// Owns the session's matrices and its traversal.
///
/// # Examples
/// ```
/// use graphstep_core::{Explorer, GraphConfigBuilder, Orientation};
///
/// let config = GraphConfigBuilder::new().build()?;
/// let mut explorer = Explorer::new(&config)?;
/// assert!(!explorer.can_step());
///
/// explorer.start_bfs();
/// while explorer.step().is_some() {}
/// let frame = explorer.frame();
/// assert_eq!(frame.orientation, Orientation::Directed);
/// assert_eq!(frame.tree_edges.len(), 8);
/// assert!(!frame.step_enabled);
/// # Ok::<(), graphstep_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Explorer {
    graph: GeneratedGraph,
    engine: TraversalEngine,
    view: Orientation,
    highlighted: Vec<TreeEdge>,
}

impl Explorer {
    /// Generates the graph described by `config` and prepares an idle
    /// traversal over its directed matrix.
    ///
    /// # Errors
    /// Propagates [`GraphConfig::generate`] failures.
    #[instrument(name = "core.explorer.new", skip(config), fields(seed = config.seed()))]
    pub fn new(config: &GraphConfig) -> Result<Self> {
        Ok(Self::from_graph(config.generate()?))
    }

    /// Wraps an already generated graph.
    #[must_use]
    pub fn from_graph(graph: GeneratedGraph) -> Self {
        let engine = TraversalEngine::new(graph.shared_directed());
        Self {
            graph,
            engine,
            view: Orientation::Directed,
            highlighted: Vec::new(),
        }
    }

    /// Returns the generated matrices.
    #[must_use]
    pub const fn graph(&self) -> &GeneratedGraph {
        &self.graph
    }

    /// Returns the traversal engine.
    #[must_use]
    pub const fn engine(&self) -> &TraversalEngine {
        &self.engine
    }

    /// Returns the orientation currently on display.
    #[must_use]
    pub const fn view(&self) -> Orientation {
        self.view
    }

    /// Returns whether the step action is enabled.
    #[must_use]
    pub const fn can_step(&self) -> bool {
        self.engine.can_step()
    }

    /// Shows the directed matrix and discards any traversal.
    pub fn select_directed_view(&mut self) {
        self.select_view(Orientation::Directed);
    }

    /// Shows the undirected matrix and discards any traversal.
    pub fn select_undirected_view(&mut self) {
        self.select_view(Orientation::Undirected);
    }

    fn select_view(&mut self, view: Orientation) {
        debug!(view = view.as_str(), "view selected");
        self.discard_traversal();
        self.view = view;
    }

    /// Starts a breadth-first traversal over the directed matrix.
    pub fn start_bfs(&mut self) -> StepReport {
        self.start(TraversalMode::Bfs)
    }

    /// Starts a depth-first traversal over the directed matrix.
    pub fn start_dfs(&mut self) -> StepReport {
        self.start(TraversalMode::Dfs)
    }

    /// Starts a traversal in `mode` over the directed matrix and switches the
    /// view to it.
    pub fn start(&mut self, mode: TraversalMode) -> StepReport {
        self.view = Orientation::Directed;
        let report = self.engine.start(mode);
        self.highlighted.clone_from(&report.new_edges);
        report
    }

    /// Performs one traversal step, or returns `None` when stepping is
    /// disabled.
    pub fn step(&mut self) -> Option<StepReport> {
        let report = self.engine.step()?;
        self.highlighted.clone_from(&report.new_edges);
        Some(report)
    }

    /// Returns to the initial state: no traversal, directed view.
    pub fn reset(&mut self) {
        self.discard_traversal();
        self.view = Orientation::Directed;
    }

    fn discard_traversal(&mut self) {
        self.engine.reset();
        self.highlighted.clear();
    }

    /// Snapshot of everything a renderer needs after the latest action.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        let session = self.engine.session();
        let history = session.history();
        Frame {
            matrix: self.graph.matrix(self.view),
            orientation: self.view,
            mode: session.mode(),
            states: session.states(),
            forest: session.forest(),
            tree_edges: session.tree_edges(),
            highlighted: &self.highlighted,
            step_enabled: self.can_step(),
            log_tail: history
                .get(history.len().saturating_sub(LOG_TAIL_LEN)..)
                .unwrap_or_default(),
        }
    }
}

/// Read-only view of the explorer state for a renderer.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Matrix on display.
    pub matrix: &'a AdjacencyMatrix,
    /// Orientation of [`Self::matrix`].
    pub orientation: Orientation,
    /// Active traversal mode.
    pub mode: Option<TraversalMode>,
    /// Per-vertex visitation state.
    pub states: &'a [VertexState],
    /// Traversal forest, for tree diagrams.
    pub forest: &'a TraversalForest,
    /// Tree edges in discovery order.
    pub tree_edges: &'a [TreeEdge],
    /// Edges added by the latest step.
    pub highlighted: &'a [TreeEdge],
    /// Whether the step action is enabled.
    pub step_enabled: bool,
    /// The most recent log entries, oldest first.
    pub log_tail: &'a [LogEntry],
}

impl Frame<'_> {
    /// Returns whether `(from, to)` should be drawn as a tree edge. In the
    /// undirected view either direction matches.
    #[must_use]
    pub fn is_tree_edge(&self, from: usize, to: usize) -> bool {
        self.forest.contains_edge(from, to)
            || (self.orientation == Orientation::Undirected && self.forest.contains_edge(to, from))
    }

    /// Returns whether `(from, to)` was added by the latest step.
    #[must_use]
    pub fn is_highlighted(&self, from: usize, to: usize) -> bool {
        self.highlighted.iter().any(|edge| {
            (edge.from, edge.to) == (from, to)
                || (self.orientation == Orientation::Undirected
                    && (edge.to, edge.from) == (from, to))
        })
    }
}
