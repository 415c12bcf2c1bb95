//! Dominator tree construction by iterative dataflow.
//!
//! Node `u` dominates `v` if every path from the source to `v` passes through
//! `u`. Dominator sets are computed as the greatest fixed point of
//!
//! ```text
//! Dom(source) = {source}
//! Dom(v)      = {v} ∪ ⋂ Dom(p)   for every predecessor p of v
//! ```
//!
//! visiting nodes in reverse post-order until a full pass changes nothing.
//! This is the plain set-intersection formulation, quadratic per pass, which
//! is fine for graphs of a few hundred vertices.

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::graph::Graph;
use crate::{Error, Result};

/// Immediate-dominator tree rooted at the source.
///
/// Only vertices reachable from the source belong to the tree; everything
/// else has no parent, no children and is reported by [`contains`] as absent.
///
/// [`contains`]: DominatorTree::contains
#[derive(Debug, Clone, Serialize)]
pub struct DominatorTree {
    source: usize,
    /// Immediate dominator of every vertex; `None` for the source and for
    /// unreachable vertices
    idom: Vec<Option<usize>>,
    /// Dominator-tree children, in reverse post-order of the DFS
    children: Vec<Vec<usize>>,
    /// Reachable vertices in DFS post-order; the source comes last
    post_order: Vec<usize>,
    reachable: Vec<bool>,
    /// Number of dataflow passes until the fixed point
    passes: usize,
}

impl DominatorTree {
    /// Builds the dominator tree of `graph` rooted at `source`.
    pub fn build<W, G>(graph: &G, source: usize) -> Result<Self>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound(source));
        }

        let n = graph.vertex_count();
        let reachable = reachable_from::<W, G>(graph, source);
        let post_order = dfs_post_order::<W, G>(graph, source, n);

        // Position in reverse post-order: the source is 0 and a node's DFS
        // ancestors always come before it.
        let mut rpo_index = vec![usize::MAX; n];
        for (i, &v) in post_order.iter().rev().enumerate() {
            rpo_index[v] = i;
        }

        let reachable_set: HashSet<usize> = post_order.iter().copied().collect();
        let mut doms: Vec<HashSet<usize>> = vec![HashSet::new(); n];
        for &v in &post_order {
            doms[v] = if v == source {
                HashSet::from([source])
            } else {
                reachable_set.clone()
            };
        }

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;

            for &v in post_order.iter().rev() {
                if v == source {
                    continue;
                }

                let mut new_doms: Option<HashSet<usize>> = None;
                for p in graph.predecessors(v) {
                    if !reachable[p] {
                        continue;
                    }
                    new_doms = Some(match new_doms {
                        None => doms[p].clone(),
                        Some(mut acc) => {
                            acc.retain(|d| doms[p].contains(d));
                            acc
                        }
                    });
                }

                let mut new_doms = new_doms.unwrap_or_default();
                new_doms.insert(v);

                if new_doms != doms[v] {
                    doms[v] = new_doms;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }
        debug!(
            "dominator fixpoint after {} passes over {} reachable vertices",
            passes,
            post_order.len()
        );

        // Strict dominators of v all lie on the DFS path source -> v, so the
        // closest one is the strict dominator latest in reverse post-order.
        let mut idom = vec![None; n];
        for &v in &post_order {
            if v == source {
                continue;
            }
            let parent = doms[v]
                .iter()
                .copied()
                .filter(|&d| d != v)
                .max_by_key(|&d| rpo_index[d])
                .ok_or_else(|| {
                    Error::Inconsistency(format!("vertex {} has no strict dominator", v))
                })?;
            trace!("idom({}) = {}", v, parent);
            idom[v] = Some(parent);
        }

        let mut children = vec![Vec::new(); n];
        for &v in post_order.iter().rev() {
            if let Some(parent) = idom[v] {
                children[parent].push(v);
            }
        }

        Ok(DominatorTree {
            source,
            idom,
            children,
            post_order,
            reachable,
            passes,
        })
    }

    /// The root of the tree
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of vertices of the underlying graph
    pub fn vertex_count(&self) -> usize {
        self.idom.len()
    }

    /// Number of vertices in the tree
    pub fn len(&self) -> usize {
        self.post_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.post_order.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.reachable.get(vertex).copied().unwrap_or(false)
    }

    pub fn immediate_dominator(&self, vertex: usize) -> Option<usize> {
        self.idom.get(vertex).copied().flatten()
    }

    pub fn children(&self, vertex: usize) -> &[usize] {
        self.children.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reachable vertices in DFS post-order
    pub fn post_order(&self) -> &[usize] {
        &self.post_order
    }

    pub fn fixpoint_passes(&self) -> usize {
        self.passes
    }

    /// Returns true if `a` dominates `b` (every vertex dominates itself)
    pub fn dominates(&self, a: usize, b: usize) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let mut current = Some(b);
        while let Some(v) = current {
            if v == a {
                return true;
            }
            current = self.immediate_dominator(v);
        }
        false
    }

    pub fn strictly_dominates(&self, a: usize, b: usize) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Distance from the root; `None` outside the tree
    pub fn depth(&self, vertex: usize) -> Option<usize> {
        if !self.contains(vertex) {
            return None;
        }
        let mut depth = 0;
        let mut current = vertex;
        while let Some(parent) = self.immediate_dominator(current) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// `vertex` together with all of its descendants in the tree
    pub fn subtree(&self, vertex: usize) -> Vec<usize> {
        if !self.contains(vertex) {
            return Vec::new();
        }
        let mut domain = Vec::new();
        let mut stack = vec![vertex];
        while let Some(v) = stack.pop() {
            domain.push(v);
            stack.extend(self.children(v).iter().rev());
        }
        domain
    }

    /// All tree vertices, parents before children
    pub fn preorder(&self) -> Vec<usize> {
        self.subtree(self.source)
    }
}

/// Vertices reachable from `source` by forward breadth-first search
fn reachable_from<W, G>(graph: &G, source: usize) -> Vec<bool>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut seen = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;
    while let Some(u) = queue.pop_front() {
        for v in graph.successors(u) {
            if !seen[v] {
                seen[v] = true;
                queue.push_back(v);
            }
        }
    }
    seen
}

/// Post-order of an iterative depth-first search from `source`
fn dfs_post_order<W, G>(graph: &G, source: usize, n: usize) -> Vec<usize>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut visited = vec![false; n];
    let mut order = Vec::new();
    let mut stack: Vec<(usize, Vec<usize>)> = Vec::new();

    visited[source] = true;
    stack.push((source, graph.successors(source).collect()));

    while let Some((node, pending)) = stack.last_mut() {
        let node = *node;
        match pending.pop() {
            Some(next) if !visited[next] => {
                visited[next] = true;
                let successors = graph.successors(next).collect();
                stack.push((next, successors));
            }
            Some(_) => {}
            None => {
                order.push(node);
                stack.pop();
            }
        }
    }

    order
}
