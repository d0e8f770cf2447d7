//! Human-readable traversal log.
//!
//! Entries keep zero-based vertices and render them one-based.

use std::fmt;

use crate::matrix::AdjacencyMatrix;

use super::TraversalMode;

/// One line (or block, for the tree matrix) of the traversal log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEntry {
    /// A traversal was started.
    Started {
        /// Active mode.
        mode: TraversalMode,
        /// Chosen start vertex.
        vertex: usize,
    },
    /// A vertex was taken from the frontier.
    Exploring {
        /// Vertex being expanded.
        vertex: usize,
    },
    /// A vertex was discovered and added to the frontier.
    Discovered {
        /// Newly discovered vertex.
        vertex: usize,
    },
    /// The frontier ran dry and the traversal resumed from a new root.
    Continuing {
        /// Active mode.
        mode: TraversalMode,
        /// Restart vertex.
        vertex: usize,
    },
    /// No vertex is left to explore.
    Completed {
        /// Mode that finished.
        mode: TraversalMode,
    },
    /// Summary of the traversal tree as an adjacency matrix.
    TreeMatrix(AdjacencyMatrix),
    /// Summary of the order in which vertices were finalised.
    VisitOrder(Vec<usize>),
}

impl LogEntry {
    /// Splits the rendered entry into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.to_string().lines().map(ToOwned::to_owned).collect()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { mode, vertex } => {
                write!(f, "{mode} started from vertex {}", vertex + 1)
            }
            Self::Exploring { vertex } => write!(f, "Exploring vertex {}", vertex + 1),
            Self::Discovered { vertex } => write!(f, "Discovered vertex {}", vertex + 1),
            Self::Continuing { mode, vertex } => {
                write!(f, "Continuing {mode} from vertex {}", vertex + 1)
            }
            Self::Completed { mode } => write!(f, "{mode} traversal completed"),
            Self::TreeMatrix(matrix) => {
                f.write_str("Traversal tree matrix:")?;
                for row in matrix.display_rows() {
                    write!(f, "\n{row}")?;
                }
                Ok(())
            }
            Self::VisitOrder(order) => {
                f.write_str("Visit order:")?;
                for (index, vertex) in order.iter().enumerate() {
                    let separator = if index == 0 { " " } else { " -> " };
                    write!(f, "{separator}{}", vertex + 1)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(LogEntry::Started { mode: TraversalMode::Bfs, vertex: 0 }, "BFS started from vertex 1")]
    #[case(LogEntry::Exploring { vertex: 4 }, "Exploring vertex 5")]
    #[case(LogEntry::Discovered { vertex: 10 }, "Discovered vertex 11")]
    #[case(
        LogEntry::Continuing { mode: TraversalMode::Dfs, vertex: 2 },
        "Continuing DFS from vertex 3"
    )]
    #[case(LogEntry::Completed { mode: TraversalMode::Dfs }, "DFS traversal completed")]
    #[case(LogEntry::VisitOrder(vec![2, 0, 1]), "Visit order: 3 -> 1 -> 2")]
    #[case(LogEntry::VisitOrder(Vec::new()), "Visit order:")]
    fn renders_one_based_lines(#[case] entry: LogEntry, #[case] expected: &str) {
        assert_eq!(entry.to_string(), expected);
    }

    #[rstest]
    fn tree_matrix_spans_several_lines() {
        let matrix = AdjacencyMatrix::try_from_rows(&[[0, 1], [0, 0]])
            .expect("rows are valid");
        let entry = LogEntry::TreeMatrix(matrix);
        assert_eq!(
            entry.lines(),
            vec![
                "Traversal tree matrix:".to_owned(),
                "0 1".to_owned(),
                "0 0".to_owned()
            ]
        );
    }
}
