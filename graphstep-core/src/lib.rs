//! Graphstep core library.
//!
//! Generates a reproducible directed graph from a seeded Park-Miller stream,
//! derives its undirected closure and walks the directed graph one
//! breadth-first or depth-first step at a time.

mod config;
mod error;
mod explorer;
mod generator;
mod matrix;
mod random;
mod traversal;

pub use crate::{
    config::{
        DEFAULT_VARIANT_N3, DEFAULT_VARIANT_N4, GraphConfig, GraphConfigBuilder, MAX_VERTEX_COUNT,
    },
    error::{GraphError, GraphErrorCode, Result},
    explorer::{Explorer, Frame, LOG_TAIL_LEN},
    generator::{GeneratedGraph, generate_directed, generate_undirected},
    matrix::{AdjacencyMatrix, Orientation},
    random::{DEFAULT_SEED, MODULUS, MULTIPLIER, RandomStream},
    traversal::{
        Frontier, LogEntry, StepOutcome, StepReport, TraversalEngine, TraversalForest,
        TraversalMode, TraversalSession, TreeEdge, VertexState,
    },
};
