//! The traversal forest grown by the engine.

use std::collections::VecDeque;
use std::fmt;

use crate::matrix::{AdjacencyMatrix, Orientation};

/// An edge `(from, to)` recorded when `to` was first discovered from `from`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TreeEdge {
    /// Vertex being expanded.
    pub from: usize,
    /// Vertex discovered through the edge.
    pub to: usize,
}

impl TreeEdge {
    /// Creates an edge.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for TreeEdge {
    /// Displays the edge with one-based vertex labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from + 1, self.to + 1)
    }
}

/// Tree edges in discovery order together with the root of every tree.
///
/// Every vertex has at most one parent; roots have none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalForest {
    vertex_count: usize,
    edges: Vec<TreeEdge>,
    roots: Vec<usize>,
    parents: Vec<Option<usize>>,
}

impl TraversalForest {
    pub(super) fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            roots: Vec::new(),
            parents: vec![None; vertex_count],
        }
    }

    pub(super) fn push_root(&mut self, vertex: usize) {
        self.roots.push(vertex);
    }

    pub(super) fn push_edge(&mut self, edge: TreeEdge) {
        debug_assert!(self.parent(edge.to).is_none(), "vertex discovered twice");
        if let Some(slot) = self.parents.get_mut(edge.to) {
            *slot = Some(edge.from);
        }
        self.edges.push(edge);
    }

    /// Returns tree edges in the order they were discovered.
    #[must_use]
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Returns the start vertex followed by every restart vertex.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Returns the number of tree edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether no tree edge has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the vertex `vertex` was discovered from.
    #[must_use]
    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parents.get(vertex).copied().flatten()
    }

    /// Iterates over the children of `vertex` in discovery order.
    pub fn children(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.from == vertex)
            .map(|edge| edge.to)
    }

    /// Returns whether `(from, to)` is a tree edge.
    #[must_use]
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.parent(to) == Some(from)
    }

    /// Returns the number of tree edges between `vertex` and its root, or
    /// `None` when `vertex` is not part of the forest.
    #[must_use]
    pub fn depth(&self, vertex: usize) -> Option<usize> {
        let mut depth = 0;
        let mut current = vertex;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        self.roots.contains(&current).then_some(depth)
    }

    /// Groups forest vertices by depth.
    ///
    /// Level 0 lists the roots in the order they were chosen; deeper levels
    /// list children breadth-first, each parent's children in discovery
    /// order. Roots that never discovered anything still appear.
    ///
    /// # Examples
    /// ```
    /// use graphstep_core::{AdjacencyMatrix, TraversalEngine};
    /// use std::sync::Arc;
    ///
    /// let graph = AdjacencyMatrix::try_from_rows(&[[0, 1, 1], [0, 0, 0], [0, 0, 0]])?;
    /// let mut engine = TraversalEngine::new(Arc::new(graph));
    /// engine.init_bfs();
    /// while engine.step().is_some() {}
    /// assert_eq!(engine.session().forest().levels(), vec![vec![0], vec![1, 2]]);
    /// # Ok::<(), graphstep_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Vec<usize>> {
        let mut levels: Vec<Vec<usize>> = Vec::new();
        let mut queue: VecDeque<(usize, usize)> =
            self.roots.iter().map(|&root| (root, 0)).collect();
        while let Some((vertex, depth)) = queue.pop_front() {
            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
            }
            if let Some(level) = levels.get_mut(depth) {
                level.push(vertex);
            }
            queue.extend(self.children(vertex).map(|child| (child, depth + 1)));
        }
        levels
    }

    /// Returns the tree edges as a directed adjacency matrix.
    #[must_use]
    pub fn to_matrix(&self) -> AdjacencyMatrix {
        let n = self.vertex_count;
        let mut cells = vec![false; n * n];
        for edge in &self.edges {
            if let Some(cell) = cells.get_mut(edge.from * n + edge.to) {
                *cell = true;
            }
        }
        AdjacencyMatrix::from_cells(n, Orientation::Directed, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};

    #[fixture]
    fn forest() -> TraversalForest {
        // 0 -> 1 -> 3, 0 -> 2, and a second tree rooted at 4 with child 5.
        let mut forest = TraversalForest::new(7);
        forest.push_root(0);
        forest.push_edge(TreeEdge::new(0, 1));
        forest.push_edge(TreeEdge::new(0, 2));
        forest.push_edge(TreeEdge::new(1, 3));
        forest.push_root(4);
        forest.push_edge(TreeEdge::new(4, 5));
        forest
    }

    #[rstest]
    fn parents_and_children(forest: TraversalForest) {
        assert_eq!(forest.parent(3), Some(1));
        assert_eq!(forest.parent(0), None);
        assert_eq!(forest.children(0).collect::<Vec<_>>(), vec![1, 2]);
        assert!(forest.contains_edge(4, 5));
        assert!(!forest.contains_edge(5, 4));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(3, Some(2))]
    #[case(5, Some(1))]
    #[case(6, None)]
    fn depth_counts_edges_to_the_root(
        forest: TraversalForest,
        #[case] vertex: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(forest.depth(vertex), expected);
    }

    #[rstest]
    fn levels_group_by_depth(forest: TraversalForest) {
        assert_eq!(forest.levels(), vec![vec![0, 4], vec![1, 2, 5], vec![3]]);
    }

    #[rstest]
    fn matrix_has_one_cell_per_edge(forest: TraversalForest) {
        let matrix = forest.to_matrix();
        assert_eq!(matrix.vertex_count(), 7);
        assert_eq!(matrix.edge_count(), forest.len());
        assert!(matrix.has_edge(1, 3));
        assert!(!matrix.has_edge(3, 1));
    }

    #[rstest]
    fn edges_display_one_based() {
        assert_eq!(TreeEdge::new(0, 9).to_string(), "1 -> 10");
    }
}
