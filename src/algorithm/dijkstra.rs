use std::fmt::Debug;
use log::debug;
use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BinaryHeapWrapper;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm over one global priority queue.
///
/// Used as the reference for distances and as the baseline for operation
/// counts.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound(source));
        }

        let n = graph.vertex_count();
        let mut result = ShortestPathResult::initial(n, source);
        let mut visited = vec![false; n];

        let mut queue = BinaryHeapWrapper::new();
        queue.push(source, W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            result.operations.extract_min += 1;

            if visited[u] {
                continue;
            }
            visited[u] = true;

            // Relax all outgoing edges
            for (v, weight) in graph.outgoing_edges(u) {
                if v == u {
                    continue;
                }
                let new_dist = dist_u + weight;

                let improves = match result.distances[v] {
                    None => true,
                    Some(current) => new_dist < current,
                };

                if improves {
                    result.distances[v] = Some(new_dist);
                    let mut path = result.paths[u].clone();
                    path.push(v);
                    result.paths[v] = path;
                    result.operations.decrease_key += 1;
                    queue.push(v, new_dist);
                }
            }
        }

        debug!(
            "dijkstra from {}: {} reachable, {} extract-min, {} decrease-key",
            source,
            result.reachable_count(),
            result.operations.extract_min,
            result.operations.decrease_key
        );

        Ok(result)
    }
}
