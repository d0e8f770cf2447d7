//! Stepwise breadth-first and depth-first traversal.
//!
//! [`TraversalEngine`] owns one [`TraversalSession`] and advances it by one
//! vertex expansion per [`TraversalEngine::step`] call. Breadth-first steps
//! expand every unvisited neighbour at once; depth-first steps follow a single
//! edge and push the parent back so it is resumed later.
//!
//! When the frontier runs dry the engine restarts from the lowest unvisited
//! vertex that has an outgoing edge. The traversal completes once no such
//! vertex remains.

mod forest;
mod frontier;
mod log;


use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::matrix::AdjacencyMatrix;

pub use self::{
    forest::{TraversalForest, TreeEdge},
    frontier::Frontier,
    log::LogEntry,
};

/// Traversal discipline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TraversalMode {
    /// Breadth-first search over a queue.
    Bfs,
    /// Depth-first search over a stack, one edge per step.
    Dfs,
}

impl TraversalMode {
    /// Returns the conventional upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visitation state of a vertex.
///
/// States only move forward: unvisited, discovered, current, visited.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum VertexState {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// Waiting in the frontier.
    Discovered,
    /// Being expanded, or a depth-first ancestor waiting to resume.
    Current,
    /// Fully expanded.
    Visited,
}

impl VertexState {
    /// Returns a lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Discovered => "discovered",
            Self::Current => "current",
            Self::Visited => "visited",
        }
    }
}

impl fmt::Display for VertexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single engine action did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// A traversal was initialised at `vertex`.
    Started {
        /// Start vertex.
        vertex: usize,
    },
    /// `vertex` was taken from the frontier and expanded.
    Explored {
        /// Expanded vertex.
        vertex: usize,
        /// Whether the vertex became visited during this step.
        finished: bool,
    },
    /// The frontier was empty and `vertex` became a new root.
    Restarted {
        /// Restart vertex.
        vertex: usize,
    },
    /// Nothing is left to explore; stepping is now disabled.
    Completed,
}

/// Result of one engine action, consumed by renderers and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// What happened.
    pub outcome: StepOutcome,
    /// Tree edges added by this action, for transient highlighting.
    pub new_edges: Vec<TreeEdge>,
    /// Log entries produced by this action.
    pub log: Vec<LogEntry>,
}

impl StepReport {
    fn new(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            new_edges: Vec::new(),
            log: Vec::new(),
        }
    }
}

/// Mutable traversal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalSession {
    mode: Option<TraversalMode>,
    frontier: Frontier,
    states: Vec<VertexState>,
    forest: TraversalForest,
    order: Vec<usize>,
    complete: bool,
    history: Vec<LogEntry>,
}

impl TraversalSession {
    fn new(vertex_count: usize) -> Self {
        Self {
            mode: None,
            frontier: Frontier::default(),
            states: vec![VertexState::Unvisited; vertex_count],
            forest: TraversalForest::new(vertex_count),
            order: Vec::new(),
            complete: false,
            history: Vec::new(),
        }
    }

    /// Returns the active mode, `None` before a traversal is started.
    #[must_use]
    pub const fn mode(&self) -> Option<TraversalMode> {
        self.mode
    }

    /// Returns the vertices awaiting expansion.
    #[must_use]
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the state of every vertex.
    #[must_use]
    pub fn states(&self) -> &[VertexState] {
        &self.states
    }

    /// Returns the state of `vertex`; out-of-range vertices read as unvisited.
    #[must_use]
    pub fn state(&self, vertex: usize) -> VertexState {
        self.states.get(vertex).copied().unwrap_or_default()
    }

    /// Returns the traversal forest.
    #[must_use]
    pub const fn forest(&self) -> &TraversalForest {
        &self.forest
    }

    /// Returns tree edges in discovery order.
    #[must_use]
    pub fn tree_edges(&self) -> &[TreeEdge] {
        self.forest.edges()
    }

    /// Returns vertices in the order they became visited.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns whether the traversal has completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns every log entry since the last reset.
    #[must_use]
    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }

    fn set_state(&mut self, vertex: usize, state: VertexState) {
        if let Some(slot) = self.states.get_mut(vertex) {
            debug_assert!(*slot <= state, "vertex {vertex} moved backwards");
            *slot = state;
        }
    }

    fn discover(&mut self, vertex: usize) {
        self.set_state(vertex, VertexState::Discovered);
        self.frontier.push(vertex);
    }

    fn finish(&mut self, vertex: usize) {
        self.set_state(vertex, VertexState::Visited);
        self.order.push(vertex);
    }
}

/// Drives one traversal at a time over a shared directed matrix.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use graphstep_core::{AdjacencyMatrix, StepOutcome, TraversalEngine, VertexState};
///
/// let graph = AdjacencyMatrix::try_from_rows(&[[0, 1], [0, 0]])?;
/// let mut engine = TraversalEngine::new(Arc::new(graph));
/// assert!(engine.step().is_none());
///
/// engine.init_dfs();
/// let report = engine.step().expect("stepping is enabled");
/// assert_eq!(report.outcome, StepOutcome::Explored { vertex: 0, finished: false });
/// assert_eq!(engine.session().state(1), VertexState::Discovered);
/// # Ok::<(), graphstep_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TraversalEngine {
    graph: Arc<AdjacencyMatrix>,
    session: TraversalSession,
}

impl TraversalEngine {
    /// Creates an idle engine over `graph`.
    #[must_use]
    pub fn new(graph: Arc<AdjacencyMatrix>) -> Self {
        let session = TraversalSession::new(graph.vertex_count());
        Self { graph, session }
    }

    /// Returns the matrix being traversed.
    #[must_use]
    pub fn graph(&self) -> &AdjacencyMatrix {
        &self.graph
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn session(&self) -> &TraversalSession {
        &self.session
    }

    /// Returns whether [`Self::step`] would do anything.
    #[must_use]
    pub const fn can_step(&self) -> bool {
        self.session.mode.is_some() && !self.session.complete
    }

    /// Discards the session; the engine returns to the idle state.
    pub fn reset(&mut self) {
        self.session = TraversalSession::new(self.graph.vertex_count());
    }

    /// Starts a breadth-first traversal. See [`Self::start`].
    pub fn init_bfs(&mut self) -> StepReport {
        self.start(TraversalMode::Bfs)
    }

    /// Starts a depth-first traversal. See [`Self::start`].
    pub fn init_dfs(&mut self) -> StepReport {
        self.start(TraversalMode::Dfs)
    }

    /// Resets the session and starts a traversal in `mode`.
    ///
    /// The start vertex is the lowest vertex with an outgoing edge, or vertex
    /// 0 when the graph has no edges.
    #[instrument(name = "core.traversal.start", level = "debug", skip(self))]
    pub fn start(&mut self, mode: TraversalMode) -> StepReport {
        self.reset();
        self.session.mode = Some(mode);
        self.session.frontier = Frontier::for_mode(mode);

        let vertex = self.start_vertex();
        self.session.discover(vertex);
        self.session.forest.push_root(vertex);

        let mut report = StepReport::new(StepOutcome::Started { vertex });
        report.log.push(LogEntry::Started { mode, vertex });
        self.record(&report);
        report
    }

    /// Advances the traversal by one step.
    ///
    /// Returns `None`, leaving the session untouched, when no traversal is
    /// active or the active one is complete.
    pub fn step(&mut self) -> Option<StepReport> {
        if !self.can_step() {
            return None;
        }
        let mode = self.session.mode?;

        let report = match self.session.frontier.pop() {
            None => self.restart_or_complete(mode),
            Some(vertex) => match mode {
                TraversalMode::Bfs => self.expand_all(vertex),
                TraversalMode::Dfs => self.expand_one(vertex),
            },
        };
        debug!(
            mode = mode.as_str(),
            outcome = ?report.outcome,
            new_edges = report.new_edges.len(),
            "traversal step"
        );
        self.record(&report);
        Some(report)
    }

    fn record(&mut self, report: &StepReport) {
        self.session.history.extend(report.log.iter().cloned());
    }

    fn start_vertex(&self) -> usize {
        (0..self.graph.vertex_count())
            .find(|&vertex| self.graph.has_outgoing(vertex))
            .unwrap_or(0)
    }

    /// Unvisited neighbours of `vertex` in ascending order. A self-loop never
    /// makes a vertex its own neighbour.
    fn unvisited_neighbours(&self, vertex: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.graph.vertex_count()).filter(move |&candidate| {
            candidate != vertex
                && self.graph.has_edge(vertex, candidate)
                && self.session.state(candidate) == VertexState::Unvisited
        })
    }

    // Breadth-first: discover every unvisited neighbour, then finish `vertex`.
    fn expand_all(&mut self, vertex: usize) -> StepReport {
        self.session.set_state(vertex, VertexState::Current);
        let mut report = StepReport::new(StepOutcome::Explored {
            vertex,
            finished: true,
        });
        report.log.push(LogEntry::Exploring { vertex });

        let discovered: Vec<usize> = self.unvisited_neighbours(vertex).collect();
        for neighbour in discovered {
            self.discover_from(vertex, neighbour, &mut report);
        }

        self.session.finish(vertex);
        report
    }

    // Depth-first: follow the highest unvisited neighbour, if any, and push
    // `vertex` back underneath it; otherwise finish `vertex`.
    fn expand_one(&mut self, vertex: usize) -> StepReport {
        self.session.set_state(vertex, VertexState::Current);
        let next = self.unvisited_neighbours(vertex).next_back();
        let mut report = StepReport::new(StepOutcome::Explored {
            vertex,
            finished: next.is_none(),
        });
        report.log.push(LogEntry::Exploring { vertex });

        match next {
            Some(neighbour) => {
                self.session.frontier.push(vertex);
                self.discover_from(vertex, neighbour, &mut report);
            }
            None => self.session.finish(vertex),
        }
        report
    }

    fn discover_from(&mut self, from: usize, to: usize, report: &mut StepReport) {
        let edge = TreeEdge::new(from, to);
        self.session.discover(to);
        self.session.forest.push_edge(edge);
        report.new_edges.push(edge);
        report.log.push(LogEntry::Discovered { vertex: to });
    }

    fn restart_or_complete(&mut self, mode: TraversalMode) -> StepReport {
        let restart = (0..self.graph.vertex_count()).find(|&vertex| {
            self.session.state(vertex) == VertexState::Unvisited && self.graph.has_outgoing(vertex)
        });

        if let Some(vertex) = restart {
            self.session.discover(vertex);
            self.session.forest.push_root(vertex);
            let mut report = StepReport::new(StepOutcome::Restarted { vertex });
            report.log.push(LogEntry::Continuing { mode, vertex });
            return report;
        }

        self.complete(mode)
    }

    fn complete(&mut self, mode: TraversalMode) -> StepReport {
        self.session.complete = true;
        info!(
            mode = mode.as_str(),
            visited = self.session.order.len(),
            tree_edges = self.session.forest.len(),
            roots = self.session.forest.roots().len(),
            "traversal completed"
        );

        let mut report = StepReport::new(StepOutcome::Completed);
        report.log.push(LogEntry::Completed { mode });
        report
            .log
            .push(LogEntry::TreeMatrix(self.session.forest.to_matrix()));
        report
            .log
            .push(LogEntry::VisitOrder(self.session.order.clone()));
        report
    }
}
