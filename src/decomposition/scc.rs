//! Strongly connected components, condensation and topological order over
//! small dense graphs given as adjacency lists on `0..n`.

use std::collections::VecDeque;

/// Computes the strongly connected components with Tarjan's algorithm.
///
/// Components come out in reverse topological order: if an edge runs from
/// component A to component B, B is emitted before A.
pub fn strongly_connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut state = TarjanState::new(adjacency.len());
    for v in 0..adjacency.len() {
        if state.index[v].is_none() {
            state.strongconnect(adjacency, v);
        }
    }
    state.sccs
}

struct TarjanState {
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    sccs: Vec<Vec<usize>>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            sccs: Vec::new(),
        }
    }

    fn strongconnect(&mut self, adjacency: &[Vec<usize>], v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for &w in &adjacency[v] {
            match self.index[w] {
                None => {
                    self.strongconnect(adjacency, w);
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                }
                Some(w_index) if self.on_stack[w] => {
                    self.lowlink[v] = self.lowlink[v].min(w_index);
                }
                Some(_) => {}
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut scc = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                scc.push(w);
                if w == v {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }
}

/// Collapses each component to a single node.
///
/// Returns the component index of every node and the deduplicated adjacency
/// of the condensation graph.
pub fn condensation(adjacency: &[Vec<usize>], sccs: &[Vec<usize>]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut node_to_scc = vec![0; adjacency.len()];
    for (i, scc) in sccs.iter().enumerate() {
        for &v in scc {
            node_to_scc[v] = i;
        }
    }

    let mut edges = vec![vec![false; sccs.len()]; sccs.len()];
    for (u, targets) in adjacency.iter().enumerate() {
        for &v in targets {
            let (a, b) = (node_to_scc[u], node_to_scc[v]);
            if a != b {
                edges[a][b] = true;
            }
        }
    }

    let condensed = edges
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .filter_map(|(b, linked)| linked.then_some(b))
                .collect()
        })
        .collect();

    (node_to_scc, condensed)
}

/// Kahn's algorithm. Returns `None` if the graph has a cycle.
pub fn topological_sort(adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
    let n = adjacency.len();
    let mut in_degree = vec![0usize; n];
    for targets in adjacency {
        for &v in targets {
            in_degree[v] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        order.push(u);
        for &v in &adjacency[u] {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    (order.len() == n).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[usize], v: usize) -> usize {
        order.iter().position(|&x| x == v).unwrap()
    }

    #[test]
    fn test_topological_sort_respects_edges() {
        let adjacency = vec![vec![2], vec![0, 2], vec![3], vec![]];
        let order = topological_sort(&adjacency).unwrap();
        assert_eq!(order.len(), 4);
        for (u, targets) in adjacency.iter().enumerate() {
            for &v in targets {
                assert!(position(&order, u) < position(&order, v));
            }
        }
    }

    #[test]
    fn test_topological_sort_rejects_cycle() {
        let adjacency = vec![vec![1], vec![2], vec![0]];
        assert!(topological_sort(&adjacency).is_none());
    }

    #[test]
    fn test_scc_cycle_and_tail() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let adjacency = vec![vec![1], vec![2], vec![0, 3], vec![]];
        let sccs = strongly_connected_components(&adjacency);
        assert_eq!(sccs.len(), 2);
        // reverse topological: the sink {3} comes first
        assert_eq!(sccs[0], vec![3]);
        let mut cycle = sccs[1].clone();
        cycle.sort();
        assert_eq!(cycle, vec![0, 1, 2]);
    }

    #[test]
    fn test_condensation_is_acyclic() {
        let adjacency = vec![vec![1], vec![0, 2], vec![3], vec![2]];
        let sccs = strongly_connected_components(&adjacency);
        let (node_to_scc, condensed) = condensation(&adjacency, &sccs);
        assert_eq!(node_to_scc[0], node_to_scc[1]);
        assert_eq!(node_to_scc[2], node_to_scc[3]);
        assert!(topological_sort(&condensed).is_some());
    }
}
