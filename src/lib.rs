//! AC-SSSP - Single-Source Shortest Paths over Ancestor-Component decompositions
//!
//! This library computes single-source shortest paths on weighted directed graphs
//! in two ways and checks that they agree:
//!
//! * a flat Dijkstra over one global priority queue, and
//! * a hierarchical relaxation that first decomposes the graph through its
//!   dominator tree into topologically ordered groups of strongly connected
//!   children (the "AC structure"), then relaxes distances with one local queue
//!   per dominator-tree node.
//!
//! Both engines report `extract_min` / `decrease_key` operation counts so the
//! amount of queue traffic can be compared.

pub mod algorithm;
pub mod data_structures;
pub mod decomposition;
pub mod graph;

pub use algorithm::{
    dijkstra::Dijkstra, hierarchical::HierarchicalDijkstra, OperationCounts,
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use decomposition::{AcStructure, DominatorTree};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex {0} not found in graph")]
    SourceNotFound(usize),

    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal inconsistency: {0}")]
    Inconsistency(String),

    #[error("Engines disagree at vertex {vertex}: flat {flat:?}, hierarchical {hierarchical:?}")]
    EngineMismatch {
        vertex: usize,
        flat: Option<f64>,
        hierarchical: Option<f64>,
    },
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
