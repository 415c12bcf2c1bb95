use crate::graph::{DirectedGraph, Graph, MutableGraph};
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Weight type produced by every generator
pub type Weight = OrderedFloat<f64>;

/// Parameters for [`generate_hierarchical_graph`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of strongly connected blocks
    pub components: usize,
    /// Vertices per block
    pub component_size: usize,
    /// Probability of a forward link between two blocks
    pub connection_probability: f64,
    /// Inclusive range of integer edge weights
    pub min_weight: u32,
    pub max_weight: u32,
    /// Seed for reproducible graphs; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            components: 5,
            component_size: 3,
            connection_probability: 0.3,
            min_weight: 1,
            max_weight: 10,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Integer weight range as configured
    pub fn weight_range(&self) -> RangeInclusive<u32> {
        self.min_weight..=self.max_weight.max(self.min_weight)
    }

    /// Rejects a probability outside `[0, 1]` (NaN included) and an empty
    /// weight range
    pub fn validate(&self) -> Result<()> {
        let p = self.connection_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidConfig(format!(
                "connection probability {} is not in [0, 1]",
                p
            )));
        }
        if self.min_weight > self.max_weight {
            return Err(Error::InvalidConfig(format!(
                "weight range {}..={} is empty",
                self.min_weight, self.max_weight
            )));
        }
        Ok(())
    }

    /// Builds the random generator described by `seed`
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Clamps to `[0, 1]`; a NaN probability never fires
fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

fn random_weight<R: Rng + ?Sized>(rng: &mut R, weights: &RangeInclusive<u32>) -> Weight {
    OrderedFloat(rng.gen_range(weights.clone()) as f64)
}

/// Returns true if every vertex is connected to vertex 0 ignoring edge direction
fn is_weakly_connected(graph: &DirectedGraph<Weight>) -> bool {
    let n = graph.vertex_count();
    if n == 0 {
        return true;
    }

    let mut seen = vec![false; n];
    let mut stack = vec![0];
    seen[0] = true;
    while let Some(u) = stack.pop() {
        for v in graph.successors(u).chain(graph.predecessors(u)) {
            if !seen[v] {
                seen[v] = true;
                stack.push(v);
            }
        }
    }
    seen.into_iter().all(|s| s)
}

/// Generates a random directed graph where each ordered pair is linked with
/// probability `edge_probability`. Extra random edges are added until the
/// graph is weakly connected.
pub fn generate_random_graph<R: Rng + ?Sized>(
    n: usize,
    edge_probability: f64,
    weights: RangeInclusive<u32>,
    rng: &mut R,
) -> DirectedGraph<Weight> {
    let mut graph = DirectedGraph::with_capacity(n);

    for i in 0..n {
        for j in 0..n {
            if i != j && rng.gen_bool(probability(edge_probability)) {
                let weight = random_weight(rng, &weights);
                graph.add_edge(i, j, weight);
            }
        }
    }

    if n > 1 {
        while !is_weakly_connected(&graph) {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i != j && !graph.has_edge(i, j) {
                let weight = random_weight(rng, &weights);
                graph.add_edge(i, j, weight);
            }
        }
    }

    graph
}

/// Generates a random DAG: edges only run from lower to higher indices
pub fn generate_dag<R: Rng + ?Sized>(
    n: usize,
    edge_probability: f64,
    weights: RangeInclusive<u32>,
    rng: &mut R,
) -> DirectedGraph<Weight> {
    let mut graph = DirectedGraph::with_capacity(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(probability(edge_probability)) {
                let weight = random_weight(rng, &weights);
                graph.add_edge(i, j, weight);
            }
        }
    }

    graph
}

/// Generates a graph made of fully connected blocks of `component_size`
/// vertices, with sparse forward links between blocks so the block-level
/// structure is a DAG.
pub fn generate_hierarchical_graph<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> DirectedGraph<Weight> {
    let size = config.component_size;
    let n = config.components * size;
    let weights = config.weight_range();
    let mut graph = DirectedGraph::with_capacity(n);

    // Dense strongly connected blocks
    for c in 0..config.components {
        let start = c * size;
        for i in start..start + size {
            for j in start..start + size {
                if i != j {
                    let weight = random_weight(rng, &weights);
                    graph.add_edge(i, j, weight);
                }
            }
        }
    }

    if size == 0 {
        return graph;
    }

    // Forward links between blocks
    for c1 in 0..config.components {
        for c2 in (c1 + 1)..config.components {
            if rng.gen_bool(probability(config.connection_probability)) {
                let i = rng.gen_range(c1 * size..(c1 + 1) * size);
                let j = rng.gen_range(c2 * size..(c2 + 1) * size);
                let weight = random_weight(rng, &weights);
                graph.add_edge(i, j, weight);
            }
        }
    }

    graph
}
