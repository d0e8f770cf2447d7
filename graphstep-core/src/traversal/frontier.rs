//! Frontier disciplines for the traversal engine.

use std::collections::VecDeque;

use super::TraversalMode;

/// Discovered vertices awaiting expansion.
///
/// Breadth-first traversal takes from the front of a queue; depth-first
/// traversal takes from the top of a stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frontier {
    /// First in, first out.
    Queue(VecDeque<usize>),
    /// Last in, first out.
    Stack(Vec<usize>),
}

impl Default for Frontier {
    fn default() -> Self {
        Self::Queue(VecDeque::new())
    }
}

impl Frontier {
    /// Returns an empty frontier using the discipline of `mode`.
    #[must_use]
    pub fn for_mode(mode: TraversalMode) -> Self {
        match mode {
            TraversalMode::Bfs => Self::Queue(VecDeque::new()),
            TraversalMode::Dfs => Self::Stack(Vec::new()),
        }
    }

    pub(super) fn push(&mut self, vertex: usize) {
        match self {
            Self::Queue(queue) => queue.push_back(vertex),
            Self::Stack(stack) => stack.push(vertex),
        }
    }

    pub(super) fn pop(&mut self) -> Option<usize> {
        match self {
            Self::Queue(queue) => queue.pop_front(),
            Self::Stack(stack) => stack.pop(),
        }
    }

    /// Returns the number of waiting vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Queue(queue) => queue.len(),
            Self::Stack(stack) => stack.len(),
        }
    }

    /// Returns whether no vertex is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether `vertex` is waiting.
    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        match self {
            Self::Queue(queue) => queue.contains(&vertex),
            Self::Stack(stack) => stack.contains(&vertex),
        }
    }

    /// Lists waiting vertices in the order they will be taken.
    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> {
        match self {
            Self::Queue(queue) => queue.iter().copied().collect(),
            Self::Stack(stack) => stack.iter().rev().copied().collect(),
        }
    }
}
