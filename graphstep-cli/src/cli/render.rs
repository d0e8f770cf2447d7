//! Text and JSON renderings of matrices and explorer frames.
//!
//! Vertices are printed one-based throughout.

use std::io::{self, Write};

use graphstep_core::{
    AdjacencyMatrix, Frame, Orientation, StepOutcome, StepReport, TreeEdge, VertexState,
};
use serde::Serialize;

/// Heading printed above a matrix.
#[must_use]
pub const fn matrix_heading(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Directed => "Directed Matrix (Adir):",
        Orientation::Undirected => "Undirected Matrix (Aundir):",
    }
}

/// Writes the heading and the space-separated rows of `matrix`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use graphstep_cli::cli::render_matrix;
/// # use graphstep_core::AdjacencyMatrix;
/// let matrix = AdjacencyMatrix::try_from_rows(&[[0, 1], [0, 0]])?;
/// let mut buffer = Vec::new();
/// render_matrix(&matrix, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "Directed Matrix (Adir):\n0 1\n0 0\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_matrix(matrix: &AdjacencyMatrix, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{}", matrix_heading(matrix.orientation()))?;
    for row in matrix.display_rows() {
        writeln!(writer, "{row}")?;
    }
    Ok(())
}

/// Describes what an action did, for frame headings.
#[must_use]
pub fn describe_outcome(outcome: StepOutcome) -> String {
    match outcome {
        StepOutcome::Started { vertex } => format!("started at vertex {}", vertex + 1),
        StepOutcome::Explored {
            vertex,
            finished: true,
        } => format!("explored and finished vertex {}", vertex + 1),
        StepOutcome::Explored { vertex, .. } => format!("explored vertex {}", vertex + 1),
        StepOutcome::Restarted { vertex } => format!("restarted at vertex {}", vertex + 1),
        StepOutcome::Completed => "traversal completed".to_owned(),
    }
}

/// Writes a human-readable frame.
///
/// The matrix marks tree edges with `*` and edges added by the latest step
/// with `+`; vertices are grouped by state and the tree is listed level by
/// level. The log shows the most recent entries.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_frame(
    index: usize,
    label: &str,
    frame: &Frame<'_>,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "[{index}] {label}")?;
    let mode = frame.mode.map_or("none", |mode| mode.as_str());
    let stepping = if frame.step_enabled {
        "enabled"
    } else {
        "disabled"
    };
    writeln!(writer, "Mode: {mode} (step {stepping})")?;

    writeln!(writer, "{}", matrix_heading(frame.orientation))?;
    let n = frame.matrix.vertex_count();
    for from in 0..n {
        let cells: Vec<&str> = (0..n).map(|to| cell_marker(frame, from, to)).collect();
        writeln!(writer, "{}", cells.join(" "))?;
    }

    for state in [
        VertexState::Current,
        VertexState::Discovered,
        VertexState::Visited,
        VertexState::Unvisited,
    ] {
        let vertices: Vec<String> = frame
            .states
            .iter()
            .enumerate()
            .filter(|&(_, &candidate)| candidate == state)
            .map(|(vertex, _)| (vertex + 1).to_string())
            .collect();
        if !vertices.is_empty() {
            writeln!(writer, "{}: {}", capitalised(state), vertices.join(" "))?;
        }
    }

    if !frame.forest.roots().is_empty() {
        writeln!(writer, "Tree edges: {}", join_edges(frame.tree_edges))?;
        let levels: Vec<String> = frame
            .forest
            .levels()
            .iter()
            .map(|level| one_based(level).join(" "))
            .collect();
        writeln!(writer, "Tree levels: {}", levels.join(" | "))?;
    }

    if !frame.log_tail.is_empty() {
        writeln!(writer, "Log:")?;
        for line in frame.log_tail.iter().flat_map(|entry| entry.lines()) {
            writeln!(writer, "  {line}")?;
        }
    }
    writeln!(writer)
}

fn cell_marker(frame: &Frame<'_>, from: usize, to: usize) -> &'static str {
    if !frame.matrix.has_edge(from, to) {
        "0"
    } else if frame.is_highlighted(from, to) {
        "+"
    } else if frame.is_tree_edge(from, to) {
        "*"
    } else {
        "1"
    }
}

fn capitalised(state: VertexState) -> &'static str {
    match state {
        VertexState::Unvisited => "Unvisited",
        VertexState::Discovered => "Discovered",
        VertexState::Current => "Current",
        VertexState::Visited => "Visited",
    }
}

fn one_based(vertices: &[usize]) -> Vec<String> {
    vertices
        .iter()
        .map(|vertex| (vertex + 1).to_string())
        .collect()
}

fn join_edges(edges: &[TreeEdge]) -> String {
    if edges.is_empty() {
        return "none".to_owned();
    }
    edges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialisable form of one frame, written as a single JSON line.
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    /// Position of the frame in the output, starting at zero.
    pub index: usize,
    /// Action that produced the frame.
    pub action: String,
    /// Active traversal mode, if any.
    pub mode: Option<&'static str>,
    /// What the action did, when it touched the traversal.
    pub outcome: Option<OutcomeRecord>,
    /// Orientation of the displayed matrix.
    pub view: &'static str,
    /// Rows of the displayed matrix as 0/1 cells.
    pub matrix: Vec<Vec<u8>>,
    /// State of each vertex.
    pub states: Vec<&'static str>,
    /// Tree edges as one-based `[from, to]` pairs in discovery order.
    pub tree_edges: Vec<[usize; 2]>,
    /// Tree edges added by the action.
    pub new_edges: Vec<[usize; 2]>,
    /// Whether another step is possible.
    pub step_enabled: bool,
    /// Log lines produced by the action.
    pub log: Vec<String>,
    /// The most recent log lines, oldest first, as shown in text frames.
    pub log_tail: Vec<String>,
}

/// Serialisable [`StepOutcome`] with one-based vertices.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeRecord {
    /// A traversal started.
    Started {
        /// Start vertex.
        vertex: usize,
    },
    /// A vertex was expanded.
    Explored {
        /// Expanded vertex.
        vertex: usize,
        /// Whether it became visited.
        finished: bool,
    },
    /// The traversal resumed from a new root.
    Restarted {
        /// Restart vertex.
        vertex: usize,
    },
    /// Nothing is left to explore.
    Completed,
}

impl From<StepOutcome> for OutcomeRecord {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Started { vertex } => Self::Started { vertex: vertex + 1 },
            StepOutcome::Explored { vertex, finished } => Self::Explored {
                vertex: vertex + 1,
                finished,
            },
            StepOutcome::Restarted { vertex } => Self::Restarted { vertex: vertex + 1 },
            StepOutcome::Completed => Self::Completed,
        }
    }
}

impl FrameRecord {
    /// Captures `frame` together with the report of the action that led to
    /// it.
    #[must_use]
    pub fn new(index: usize, action: &str, frame: &Frame<'_>, report: Option<&StepReport>) -> Self {
        Self {
            index,
            action: action.to_owned(),
            mode: frame.mode.map(|mode| mode.as_str()),
            outcome: report.map(|report| report.outcome.into()),
            view: frame.orientation.as_str(),
            matrix: matrix_cells(frame.matrix),
            states: frame.states.iter().map(|state| state.as_str()).collect(),
            tree_edges: edge_pairs(frame.tree_edges),
            new_edges: edge_pairs(frame.highlighted),
            step_enabled: frame.step_enabled,
            log: report
                .map(|report| report.log.iter().flat_map(|entry| entry.lines()).collect())
                .unwrap_or_default(),
            log_tail: frame
                .log_tail
                .iter()
                .flat_map(|entry| entry.lines())
                .collect(),
        }
    }
}

fn matrix_cells(matrix: &AdjacencyMatrix) -> Vec<Vec<u8>> {
    let n = matrix.vertex_count();
    (0..n)
        .map(|from| {
            (0..n)
                .map(|to| u8::from(matrix.has_edge(from, to)))
                .collect()
        })
        .collect()
}

fn edge_pairs(edges: &[TreeEdge]) -> Vec<[usize; 2]> {
    edges
        .iter()
        .map(|edge| [edge.from + 1, edge.to + 1])
        .collect()
}

/// Writes `record` as one line of JSON.
///
/// # Errors
/// Returns [`serde_json::Error`] if serialisation or the write fails.
pub fn render_frame_json(record: &FrameRecord, mut writer: impl Write) -> serde_json::Result<()> {
    serde_json::to_writer(&mut writer, record)?;
    writeln!(writer).map_err(serde_json::Error::io)
}
