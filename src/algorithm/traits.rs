use std::fmt::Debug;
use std::ops::AddAssign;

use num_traits::{Float, Zero};
use serde::Serialize;

use crate::graph::Graph;
use crate::Result;

/// Priority-queue operations performed by one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperationCounts {
    /// Entries popped from any queue, stale ones included
    pub extract_min: usize,
    /// Strict distance improvements, each followed by a push
    pub decrease_key: usize,
}

impl OperationCounts {
    pub fn total(&self) -> usize {
        self.extract_min + self.decrease_key
    }
}

impl AddAssign for OperationCounts {
    fn add_assign(&mut self, other: Self) {
        self.extract_min += other.extract_min;
        self.decrease_key += other.decrease_key;
    }
}

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex; `None` if unreachable
    pub distances: Vec<Option<W>>,

    /// Best path from the source to each vertex; empty if unreachable.
    /// When several shortest paths tie, which one is kept depends on the
    /// engine's visiting order, so two engines can report different paths of
    /// equal cost.
    pub paths: Vec<Vec<usize>>,

    /// Source vertex ID
    pub source: usize,

    /// Queue operations performed to produce this result
    pub operations: OperationCounts,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Fresh working state: every distance unknown except the source at zero
    pub(crate) fn initial(vertex_count: usize, source: usize) -> Self {
        let mut distances = vec![None; vertex_count];
        let mut paths = vec![Vec::new(); vertex_count];
        distances[source] = Some(W::zero());
        paths[source] = vec![source];

        ShortestPathResult {
            distances,
            paths,
            source,
            operations: OperationCounts::default(),
        }
    }

    /// Number of vertices with a finite distance
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        match result.distances.get(target) {
            Some(Some(_)) => Some(result.paths[target].clone()),
            _ => None,
        }
    }
}

/// Sum of edge weights along `path`; `None` if a step is not an edge of `graph`
pub fn path_cost<W, G>(graph: &G, path: &[usize]) -> Option<W>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    path.windows(2).try_fold(W::zero(), |acc, step| {
        graph.get_edge_weight(step[0], step[1]).map(|w| acc + w)
    })
}
