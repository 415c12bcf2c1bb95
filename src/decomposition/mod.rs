//! Dominator-tree decomposition of a graph into ancestor components.

pub mod ac_structure;
pub mod dominator;
pub mod scc;

use std::fmt::Debug;

use num_traits::{Float, Zero};
use serde::Serialize;

pub use ac_structure::AcStructure;
pub use dominator::DominatorTree;

use crate::graph::Graph;
use crate::Result;

/// Dominator tree and AC structure computed for one `(graph, source)` pair
#[derive(Debug, Clone, Serialize)]
pub struct Decomposition {
    pub tree: DominatorTree,
    pub structure: AcStructure,
}

impl Decomposition {
    pub fn build<W, G>(graph: &G, source: usize) -> Result<Self>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        let tree = DominatorTree::build(graph, source)?;
        let structure = AcStructure::build(graph, &tree)?;
        Ok(Decomposition { tree, structure })
    }

    pub fn source(&self) -> usize {
        self.tree.source()
    }
}
