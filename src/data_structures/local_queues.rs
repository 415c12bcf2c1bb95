use std::fmt::Debug;

use super::BinaryHeapWrapper;
use crate::decomposition::AcStructure;

/// One priority queue per dominator-tree node, partitioned by component slot.
///
/// `queues[a][slot]` holds the pending children of `a` that belong to the
/// `slot`-th component in `a`'s topological schedule. The root queue holds
/// only the source entry that starts a run.
#[derive(Debug, Clone)]
pub struct LocalQueues<P>
where
    P: Copy + Debug + Ord,
{
    root: BinaryHeapWrapper<usize, P>,
    queues: Vec<Vec<BinaryHeapWrapper<usize, P>>>,
}

impl<P> LocalQueues<P>
where
    P: Copy + Debug + Ord,
{
    /// Allocates empty queues shaped after `structure`
    pub fn for_structure(structure: &AcStructure) -> Self {
        let queues = (0..structure.vertex_count())
            .map(|a| {
                (0..structure.components(a).len())
                    .map(|_| BinaryHeapWrapper::new())
                    .collect()
            })
            .collect();

        LocalQueues {
            root: BinaryHeapWrapper::new(),
            queues,
        }
    }

    pub fn push_root(&mut self, vertex: usize, priority: P) {
        self.root.push(vertex, priority);
    }

    pub fn pop_root(&mut self) -> Option<(usize, P)> {
        self.root.pop()
    }

    /// Pushes `vertex` into the queue of component `slot` owned by `owner`.
    ///
    /// Returns false if `owner` has no such slot.
    pub fn push(&mut self, owner: usize, slot: usize, vertex: usize, priority: P) -> bool {
        match self.queues.get_mut(owner).and_then(|slots| slots.get_mut(slot)) {
            Some(queue) => {
                queue.push(vertex, priority);
                true
            }
            None => false,
        }
    }

    pub fn pop(&mut self, owner: usize, slot: usize) -> Option<(usize, P)> {
        self.queues.get_mut(owner)?.get_mut(slot)?.pop()
    }

    /// Number of entries still queued anywhere, stale ones included
    pub fn pending(&self) -> usize {
        self.root.len()
            + self
                .queues
                .iter()
                .flatten()
                .map(|queue| queue.len())
                .sum::<usize>()
    }
}
