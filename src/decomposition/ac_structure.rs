use std::fmt::Debug;

use log::{debug, trace, warn};
use num_traits::{Float, Zero};
use serde::Serialize;

use super::dominator::DominatorTree;
use super::scc::{condensation, strongly_connected_components, topological_sort};
use crate::graph::Graph;
use crate::{Error, Result};

/// Ancestor-component structure.
///
/// For every dominator-tree node `a`, the children of `a` are grouped into
/// components (strongly connected through edges between their subtrees) and
/// the components are listed in a topological order of the edges between
/// them. Leaves map to an empty sequence.
#[derive(Debug, Clone, Serialize)]
pub struct AcStructure {
    /// `components[a][slot]` is a sorted list of children of `a`
    components: Vec<Vec<Vec<usize>>>,
    /// Reverse index: owning dominator-tree node and component slot of each
    /// non-root tree vertex
    owner: Vec<Option<(usize, usize)>>,
    /// Component-graph edges of each node, as `(slot, slot)` pairs between
    /// distinct components
    order_edges: Vec<Vec<(usize, usize)>>,
    /// Times the topological sort failed and the fallback order was used
    fallbacks: usize,
}

impl AcStructure {
    /// Decomposes `graph` along `tree`
    pub fn build<W, G>(graph: &G, tree: &DominatorTree) -> Result<Self>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        let n = tree.vertex_count();
        let mut structure = AcStructure {
            components: vec![Vec::new(); n],
            owner: vec![None; n],
            order_edges: vec![Vec::new(); n],
            fallbacks: 0,
        };

        // Which child domain of the node being decomposed a vertex falls in
        let mut domain_of: Vec<Option<usize>> = vec![None; n];

        for a in tree.preorder() {
            let children = tree.children(a);
            if children.is_empty() {
                continue;
            }

            let domains: Vec<Vec<usize>> = children.iter().map(|&c| tree.subtree(c)).collect();
            for (i, domain) in domains.iter().enumerate() {
                for &v in domain {
                    domain_of[v] = Some(i);
                }
            }

            let adjacency = component_graph::<W, G>(graph, &domains, &domain_of);

            for domain in &domains {
                for &v in domain {
                    domain_of[v] = None;
                }
            }

            let sccs = strongly_connected_components(&adjacency);
            let (_, condensed) = condensation(&adjacency, &sccs);
            let order = match topological_sort(&condensed) {
                Some(order) => order,
                None => {
                    warn!("condensation of node {} is cyclic, using fallback order", a);
                    structure.fallbacks += 1;
                    // Tarjan emits components in reverse topological order
                    (0..sccs.len()).rev().collect()
                }
            };

            let mut slot_of_scc = vec![0; sccs.len()];
            for (slot, &scc) in order.iter().enumerate() {
                slot_of_scc[scc] = slot;
                let mut members: Vec<usize> = sccs[scc].iter().map(|&i| children[i]).collect();
                members.sort_unstable();
                for &child in &members {
                    structure.owner[child] = Some((a, slot));
                }
                structure.components[a].push(members);
            }

            structure.order_edges[a] = condensed
                .iter()
                .enumerate()
                .flat_map(|(from, targets)| targets.iter().map(move |&to| (from, to)))
                .map(|(from, to)| (slot_of_scc[from], slot_of_scc[to]))
                .collect();

            trace!(
                "node {}: {} children in {} components",
                a,
                children.len(),
                structure.components[a].len()
            );
        }

        debug!(
            "ac structure: {} components over {} tree vertices",
            structure.component_count(),
            tree.len()
        );

        Ok(structure)
    }

    /// Number of vertices of the underlying graph
    pub fn vertex_count(&self) -> usize {
        self.components.len()
    }

    /// Ordered component sequence of `vertex`; empty for leaves
    pub fn components(&self, vertex: usize) -> &[Vec<usize>] {
        self.components.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dominator-tree parent and component slot that own `vertex`
    pub fn owner(&self, vertex: usize) -> Option<(usize, usize)> {
        self.owner.get(vertex).copied().flatten()
    }

    /// Total number of components over all nodes
    pub fn component_count(&self) -> usize {
        self.components.iter().map(Vec::len).sum()
    }

    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    /// Largest number of component members found at a single tree depth
    pub fn nesting_width(&self, tree: &DominatorTree) -> usize {
        let mut per_level = vec![0usize; self.levels(tree)];
        for a in tree.preorder() {
            if let Some(depth) = tree.depth(a) {
                per_level[depth] += self.components(a).iter().map(Vec::len).sum::<usize>();
            }
        }
        per_level.into_iter().max().unwrap_or(0).max(1)
    }

    /// Number of depth levels of the dominator tree
    pub fn levels(&self, tree: &DominatorTree) -> usize {
        tree.preorder()
            .into_iter()
            .filter_map(|v| tree.depth(v))
            .max()
            .map_or(0, |depth| depth + 1)
    }

    /// Checks the structural invariants against `graph` and `tree`:
    /// no fallback order was used, every tree child has exactly one owner,
    /// and no edge between subtrees runs from a later component to an
    /// earlier one.
    pub fn verify<W, G>(&self, graph: &G, tree: &DominatorTree) -> Result<()>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        if self.fallbacks > 0 {
            return Err(Error::Inconsistency(format!(
                "{} component orders fell back to an unsorted order",
                self.fallbacks
            )));
        }

        for a in tree.preorder() {
            let mut listed: Vec<usize> = self.components(a).iter().flatten().copied().collect();
            listed.sort_unstable();
            let mut children = tree.children(a).to_vec();
            children.sort_unstable();
            if listed != children {
                return Err(Error::Inconsistency(format!(
                    "components of {} do not partition its children",
                    a
                )));
            }

            for (slot, component) in self.components(a).iter().enumerate() {
                for &child in component {
                    if self.owner(child) != Some((a, slot)) {
                        return Err(Error::Inconsistency(format!(
                            "owner index disagrees for vertex {}",
                            child
                        )));
                    }
                }
            }

            // Map each vertex in a child's subtree to that child's slot
            let mut slot_of = vec![None; self.vertex_count()];
            for (slot, component) in self.components(a).iter().enumerate() {
                for &child in component {
                    for v in tree.subtree(child) {
                        slot_of[v] = Some(slot);
                    }
                }
            }
            for (u, from_slot) in slot_of.iter().enumerate() {
                let Some(from_slot) = *from_slot else { continue };
                for v in graph.successors(u) {
                    if let Some(to_slot) = slot_of[v] {
                        if to_slot < from_slot {
                            return Err(Error::Inconsistency(format!(
                                "edge {} -> {} under node {} runs from component {} back to {}",
                                u, v, a, from_slot, to_slot
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Edges between distinct components of `vertex`, by slot
    pub fn order_edges(&self, vertex: usize) -> &[(usize, usize)] {
        self.order_edges.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds the component graph over the children of one node: `i -> j` if
/// some vertex in domain `i` has an edge into domain `j`. Each ordered pair
/// stops at its first witness.
fn component_graph<W, G>(graph: &G, domains: &[Vec<usize>], domain_of: &[Option<usize>]) -> Vec<Vec<usize>>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let k = domains.len();
    let mut adjacency = vec![Vec::new(); k];
    for i in 0..k {
        for j in 0..k {
            if i == j {
                continue;
            }
            let linked = domains[i]
                .iter()
                .any(|&u| graph.successors(u).any(|v| domain_of[v] == Some(j)));
            if linked {
                adjacency[i].push(j);
            }
        }
    }
    adjacency
}
