//! Hierarchical relaxation over the AC structure.
//!
//! Every dominator-tree node owns a local queue, split by component slot.
//! Processing a node relaxes its outgoing edges, which seeds the queues of
//! its children (and of ancestors' children reachable from it), and then
//! drains its own components in topological order, recursing into each
//! popped child. Entry into a child's subtree is only possible through the
//! child itself, and no edge runs from a later component back to an earlier
//! one, so a child popped at its smallest queued distance is final.

use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::LocalQueues;
use crate::decomposition::{AcStructure, Decomposition};
use crate::graph::Graph;
use crate::{Error, Result};

/// Recursive, locally queued variant of Dijkstra driven by the AC structure
#[derive(Debug, Default)]
pub struct HierarchicalDijkstra {
    /// Precomputed decomposition reused when its source matches
    decomposition: Option<Decomposition>,
}

impl HierarchicalDijkstra {
    /// Creates an instance that decomposes the graph on every call
    pub fn new() -> Self {
        HierarchicalDijkstra { decomposition: None }
    }

    /// Reuses `decomposition` for calls from its source
    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = Some(decomposition);
        self
    }

    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomposition.as_ref()
    }

    /// Runs the engine on a structure already built for `(graph, source)`
    pub fn run<W, G>(&self, graph: &G, source: usize, structure: &AcStructure) -> Result<ShortestPathResult<W>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound(source));
        }
        if structure.vertex_count() != graph.vertex_count() {
            return Err(Error::Inconsistency(format!(
                "structure covers {} vertices, graph has {}",
                structure.vertex_count(),
                graph.vertex_count()
            )));
        }

        let mut relaxer = Relaxer {
            graph,
            structure,
            queues: LocalQueues::for_structure(structure),
            settled: vec![false; graph.vertex_count()],
            result: ShortestPathResult::initial(graph.vertex_count(), source),
        };

        relaxer.queues.push_root(source, W::zero());
        while let Some((v, _)) = relaxer.queues.pop_root() {
            relaxer.result.operations.extract_min += 1;
            relaxer.process(v)?;
        }

        if relaxer.queues.pending() != 0 {
            return Err(Error::Inconsistency(format!(
                "{} queue entries left after the run",
                relaxer.queues.pending()
            )));
        }

        let result = relaxer.result;
        debug!(
            "hierarchical from {}: {} reachable, {} extract-min, {} decrease-key",
            source,
            result.reachable_count(),
            result.operations.extract_min,
            result.operations.decrease_key
        );
        Ok(result)
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for HierarchicalDijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Hierarchical Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        match &self.decomposition {
            Some(decomposition) if decomposition.source() == source => {
                self.run(graph, source, &decomposition.structure)
            }
            _ => {
                let decomposition = Decomposition::build(graph, source)?;
                self.run(graph, source, &decomposition.structure)
            }
        }
    }
}

/// Working state of one run
struct Relaxer<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    graph: &'a G,
    structure: &'a AcStructure,
    queues: LocalQueues<W>,
    settled: Vec<bool>,
    result: ShortestPathResult<W>,
}

impl<'a, W, G> Relaxer<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn process(&mut self, node: usize) -> Result<()> {
        if self.settled[node] {
            return Ok(());
        }
        self.settled[node] = true;
        trace!("processing {} at {:?}", node, self.result.distances[node]);

        self.relax_outgoing(node)?;

        for slot in 0..self.structure.components(node).len() {
            while let Some((v, dist)) = self.queues.pop(node, slot) {
                self.result.operations.extract_min += 1;

                let stale = match self.result.distances[v] {
                    Some(current) => dist > current,
                    None => true,
                };
                if stale || self.settled[v] {
                    continue;
                }

                self.process(v)?;
            }
        }

        Ok(())
    }

    fn relax_outgoing(&mut self, node: usize) -> Result<()> {
        let dist_node = self.result.distances[node].ok_or_else(|| {
            Error::Inconsistency(format!("processing vertex {} without a distance", node))
        })?;

        let graph = self.graph;
        for (v, weight) in graph.outgoing_edges(node) {
            if v == node {
                continue;
            }
            let new_dist = dist_node + weight;

            let improves = match self.result.distances[v] {
                None => true,
                Some(current) => new_dist < current,
            };
            if !improves {
                continue;
            }

            let (owner, slot) = self.structure.owner(v).ok_or_else(|| {
                Error::Inconsistency(format!("no owning component for relaxed vertex {}", v))
            })?;

            self.result.distances[v] = Some(new_dist);
            let mut path = self.result.paths[node].clone();
            path.push(v);
            self.result.paths[v] = path;
            self.result.operations.decrease_key += 1;

            if !self.queues.push(owner, slot, v, new_dist) {
                return Err(Error::Inconsistency(format!(
                    "owner {} has no component slot {}",
                    owner, slot
                )));
            }
        }

        Ok(())
    }
}
