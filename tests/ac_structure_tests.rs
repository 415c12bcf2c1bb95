use ac_sssp::decomposition::{AcStructure, Decomposition, DominatorTree};
use ac_sssp::graph::generators::{generate_dag, generate_hierarchical_graph, generate_random_graph, GeneratorConfig};
use ac_sssp::graph::{DirectedGraph, MutableGraph};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;

type W = OrderedFloat<f64>;

fn unit_graph(n: usize, edges: &[(usize, usize)]) -> DirectedGraph<W> {
    let mut graph = DirectedGraph::with_capacity(n);
    for &(u, v) in edges {
        graph.add_unit_edge(u, v);
    }
    graph
}

fn decompose(graph: &DirectedGraph<W>, source: usize) -> (DominatorTree, AcStructure) {
    let tree = DominatorTree::build(graph, source).unwrap();
    let structure = AcStructure::build(graph, &tree).unwrap();
    (tree, structure)
}

fn slot_of(structure: &AcStructure, owner: usize, child: usize) -> usize {
    structure
        .components(owner)
        .iter()
        .position(|component| component.contains(&child))
        .unwrap()
}

#[test]
fn test_three_cycle_single_component_chain() {
    let graph = unit_graph(3, &[(0, 1), (1, 2), (2, 0)]);
    let (tree, structure) = decompose(&graph, 0);

    assert_eq!(structure.components(0), &[vec![1]]);
    assert_eq!(structure.components(1), &[vec![2]]);
    assert!(structure.components(2).is_empty());
    assert_eq!(structure.owner(1), Some((0, 0)));
    assert_eq!(structure.owner(2), Some((1, 0)));
    assert_eq!(structure.owner(0), None);
    assert_eq!(structure.levels(&tree), 3);
    structure.verify(&graph, &tree).unwrap();
}

#[test]
fn test_diamond_orders_join_after_branches() {
    // 0 -> 1 -> 3, 0 -> 2 -> 3: all three are children of 0
    let graph = unit_graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    let (tree, structure) = decompose(&graph, 0);

    let components = structure.components(0);
    assert_eq!(components.len(), 3);
    assert!(components.iter().all(|c| c.len() == 1));
    assert!(slot_of(&structure, 0, 1) < slot_of(&structure, 0, 3));
    assert!(slot_of(&structure, 0, 2) < slot_of(&structure, 0, 3));
    structure.verify(&graph, &tree).unwrap();
}

#[test]
fn test_mutually_reachable_children_share_a_component() {
    // Siblings 1 and 2 reach each other; 3 is only entered from 2's subtree
    let graph = unit_graph(5, &[(0, 1), (0, 2), (1, 2), (2, 1), (2, 4), (4, 3), (0, 3)]);
    let (tree, structure) = decompose(&graph, 0);

    assert_eq!(tree.immediate_dominator(4), Some(2));
    let components = structure.components(0);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0], vec![1, 2]);
    assert_eq!(components[1], vec![3]);
    assert_eq!(structure.owner(4), Some((2, 0)));
    assert_eq!(structure.order_edges(0), &[(0, 1)]);
    structure.verify(&graph, &tree).unwrap();
}

#[test]
fn test_two_disjoint_groups() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(6);
    for group in [[0, 1, 2], [3, 4, 5]] {
        for &u in &group {
            for &v in &group {
                if u != v {
                    graph.add_unit_edge(u, v);
                }
            }
        }
    }
    graph.add_edge(0, 3, OrderedFloat(5.0));
    let (tree, structure) = decompose(&graph, 0);

    let mut children = tree.children(0).to_vec();
    children.sort();
    assert_eq!(children, vec![1, 2, 3]);
    assert_eq!(structure.components(3), &[vec![4, 5]]);
    assert_eq!(structure.component_count(), 3);
    structure.verify(&graph, &tree).unwrap();
}

#[test]
fn test_leaves_and_unreachable_have_no_components() {
    let graph = unit_graph(4, &[(0, 1), (2, 3)]);
    let (_, structure) = decompose(&graph, 0);

    assert!(structure.components(1).is_empty());
    assert!(structure.components(2).is_empty());
    assert_eq!(structure.owner(3), None);
}

#[test]
fn test_order_edges_point_forward_on_random_graphs() {
    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = generate_random_graph(18, 0.12, 1..=10, &mut rng);
        let (tree, structure) = decompose(&graph, 0);

        assert_eq!(structure.fallback_count(), 0);
        for a in tree.preorder() {
            for &(from, to) in structure.order_edges(a) {
                assert!(from < to, "seed {}: edge {} -> {} under {}", seed, from, to, a);
            }
        }
        structure.verify(&graph, &tree).unwrap();
    }
}

#[test]
fn test_every_tree_child_has_one_owner() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(500 + seed);
        let graph = generate_dag(16, 0.2, 1..=10, &mut rng);
        let (tree, structure) = decompose(&graph, 0);

        for v in tree.preorder() {
            match tree.immediate_dominator(v) {
                Some(parent) => assert_eq!(structure.owner(v).map(|(a, _)| a), Some(parent)),
                None => assert_eq!(structure.owner(v), None),
            }
        }
    }
}

#[test]
fn test_hierarchical_generator_decomposes_cleanly() {
    let config = GeneratorConfig {
        components: 6,
        component_size: 4,
        connection_probability: 0.4,
        seed: Some(7),
        ..Default::default()
    };
    let mut rng = config.rng();
    let graph = generate_hierarchical_graph(&config, &mut rng);
    let decomposition = Decomposition::build(&graph, 0).unwrap();

    decomposition.structure.verify(&graph, &decomposition.tree).unwrap();
    assert!(decomposition.structure.nesting_width(&decomposition.tree) >= 1);
    assert_eq!(decomposition.source(), 0);
}
