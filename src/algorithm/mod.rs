pub mod traits;
pub mod dijkstra;
pub mod hierarchical;
pub mod comparison;

pub use traits::{OperationCounts, ShortestPathAlgorithm, ShortestPathResult};
