//! Square 0/1 adjacency matrices.
//!
//! Vertices are zero-based internally. Renderers and log lines add one when
//! displaying them.

use std::fmt;

use crate::error::{GraphError, Result};

/// Whether a matrix describes arcs or symmetric edges.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Orientation {
    /// `matrix[i][j]` is an arc from `i` to `j`.
    Directed,
    /// `matrix[i][j] == matrix[j][i]` for every pair.
    Undirected,
}

impl Orientation {
    /// Returns a lowercase label for logs and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable `n × n` adjacency matrix stored in row-major order.
///
/// # Examples
/// ```
/// use graphstep_core::{AdjacencyMatrix, Orientation};
///
/// let matrix = AdjacencyMatrix::try_from_rows(&[[0, 1], [0, 1]])?;
/// assert_eq!(matrix.orientation(), Orientation::Directed);
/// assert!(matrix.has_edge(0, 1));
/// assert!(!matrix.has_edge(1, 0));
/// assert!(matrix.has_self_loop(1));
/// # Ok::<(), graphstep_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyMatrix {
    vertex_count: usize,
    orientation: Orientation,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub(crate) fn from_cells(
        vertex_count: usize,
        orientation: Orientation,
        cells: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(cells.len(), vertex_count * vertex_count);
        Self {
            vertex_count,
            orientation,
            cells,
        }
    }

    /// Builds a directed matrix from a table of 0/1 rows.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] for an empty table,
    /// [`GraphError::NotSquare`] when a row length differs from the row count
    /// and [`GraphError::InvalidCell`] for values other than 0 and 1.
    pub fn try_from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let vertex_count = rows.len();
        if vertex_count == 0 {
            return Err(GraphError::EmptyGraph);
        }

        let mut cells = Vec::with_capacity(vertex_count * vertex_count);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != vertex_count {
                return Err(GraphError::NotSquare {
                    row,
                    len: values.len(),
                    expected: vertex_count,
                });
            }
            for (column, &value) in values.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(GraphError::InvalidCell { row, column, value }),
                }
            }
        }

        Ok(Self::from_cells(vertex_count, Orientation::Directed, cells))
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the orientation of the matrix.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns whether the cell `(from, to)` is set. Out-of-range vertices
    /// have no edges.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.row(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the cells of row `vertex`, or `None` when it is out of range.
    #[must_use]
    pub fn row(&self, vertex: usize) -> Option<&[bool]> {
        if vertex >= self.vertex_count {
            return None;
        }
        let start = vertex * self.vertex_count;
        self.cells.get(start..start + self.vertex_count)
    }

    /// Iterates over every row in vertex order.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // `chunks` panics on zero; an empty matrix simply has no rows.
        self.cells.chunks(self.vertex_count.max(1))
    }

    /// Number of set cells in row `vertex`, self-loop included.
    #[must_use]
    pub fn out_degree(&self, vertex: usize) -> usize {
        self.row(vertex)
            .map_or(0, |row| row.iter().filter(|&&edge| edge).count())
    }

    /// Returns whether row `vertex` holds at least one set cell.
    #[must_use]
    pub fn has_outgoing(&self, vertex: usize) -> bool {
        self.row(vertex).is_some_and(|row| row.contains(&true))
    }

    /// Returns whether `vertex` has an edge to itself.
    #[must_use]
    pub fn has_self_loop(&self, vertex: usize) -> bool {
        self.has_edge(vertex, vertex)
    }

    /// Counts edges: arcs for a directed matrix, unordered pairs (self-loops
    /// once) for an undirected one.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns whether `matrix[i][j] == matrix[j][i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.vertex_count).all(|from| {
            (from + 1..self.vertex_count)
                .all(|to| self.has_edge(from, to) == self.has_edge(to, from))
        })
    }

    /// Iterates over edges in row-major order.
    ///
    /// Undirected matrices yield each pair once, as `(i, j)` with `i <= j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let undirected = self.orientation == Orientation::Undirected;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &edge)| edge)
            .map(|(index, _)| (index / self.vertex_count, index % self.vertex_count))
            .filter(move |&(from, to)| !undirected || from <= to)
    }

    /// Formats each row as space-separated 0/1 digits.
    pub fn display_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| {
            row.iter()
                .map(|&edge| if edge { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn matrix(rows: &[&[u8]]) -> AdjacencyMatrix {
        AdjacencyMatrix::try_from_rows(rows).expect("fixture rows are valid")
    }

    #[rstest]
    fn rejects_empty_tables() {
        let rows: [[u8; 0]; 0] = [];
        assert_eq!(
            AdjacencyMatrix::try_from_rows(&rows),
            Err(GraphError::EmptyGraph)
        );
    }

    #[rstest]
    fn rejects_ragged_rows() {
        let rows: [&[u8]; 2] = [&[0, 1], &[1]];
        assert_eq!(
            AdjacencyMatrix::try_from_rows(&rows),
            Err(GraphError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
    }

    #[rstest]
    fn rejects_non_binary_cells() {
        assert_eq!(
            AdjacencyMatrix::try_from_rows(&[[0, 2], [0, 0]]),
            Err(GraphError::InvalidCell {
                row: 0,
                column: 1,
                value: 2
            })
        );
    }

    #[rstest]
    #[case(0, 2, true)]
    #[case(2, 0, false)]
    #[case(1, 1, true)]
    #[case(3, 0, false)]
    #[case(0, 9, false)]
    fn has_edge_reads_cells(#[case] from: usize, #[case] to: usize, #[case] expected: bool) {
        let m = matrix(&[&[0, 0, 1], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(m.has_edge(from, to), expected);
    }

    #[rstest]
    fn degrees_count_self_loops() {
        let m = matrix(&[&[1, 1, 0], &[0, 0, 0], &[0, 0, 1]]);
        assert_eq!(m.out_degree(0), 2);
        assert_eq!(m.out_degree(1), 0);
        assert!(m.has_outgoing(2));
        assert!(!m.has_outgoing(1));
        assert!(!m.has_outgoing(7));
        assert!(m.has_self_loop(2));
    }

    #[rstest]
    fn directed_edges_are_listed_row_major() {
        let m = matrix(&[&[0, 1, 1], &[1, 0, 0], &[0, 0, 1]]);
        let edges: Vec<_> = m.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 0), (2, 2)]);
        assert_eq!(m.edge_count(), 4);
        assert!(!m.is_symmetric());
    }

    #[rstest]
    fn undirected_edges_are_listed_once() {
        let cells = vec![false, true, true, false];
        let m = AdjacencyMatrix::from_cells(2, Orientation::Undirected, cells);
        assert_eq!(m.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert!(m.is_symmetric());
    }

    #[rstest]
    fn display_rows_use_digits() {
        let m = matrix(&[&[0, 1], &[1, 1]]);
        let rows: Vec<String> = m.display_rows().collect();
        assert_eq!(rows, vec!["0 1".to_owned(), "1 1".to_owned()]);
    }
}
