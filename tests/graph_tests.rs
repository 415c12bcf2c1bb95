use std::fmt::Debug;

use ac_sssp::graph::generators::{generate_dag, generate_hierarchical_graph, generate_random_graph, GeneratorConfig};
use ac_sssp::graph::{DirectedGraph, Graph, MutableGraph};
use ac_sssp::Error;
use num_traits::{Float, Zero};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;

type W = OrderedFloat<f64>;

#[test]
fn test_unit_edge_defaults_to_one() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(2);
    assert!(graph.add_unit_edge(0, 1));
    assert_eq!(graph.get_edge_weight(0, 1), Some(OrderedFloat(1.0)));
}

#[test]
fn test_repeated_edge_last_write_wins() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(2);
    graph.add_edge(0, 1, OrderedFloat(4.0));
    graph.add_edge(0, 1, OrderedFloat(2.5));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.get_edge_weight(0, 1), Some(OrderedFloat(2.5)));
    let incoming: Vec<_> = graph.incoming_edges(1).collect();
    assert_eq!(incoming, vec![(0, OrderedFloat(2.5))]);
}

#[test]
fn test_rejects_bad_edges() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(2);
    assert!(!graph.add_edge(0, 5, OrderedFloat(1.0)));
    assert!(!graph.add_edge(0, 1, OrderedFloat(-1.0)));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_from_edges_validates() {
    let bad_vertex = DirectedGraph::from_edges(2, &[(0, 3, OrderedFloat(1.0))]);
    assert_eq!(bad_vertex.unwrap_err(), Error::InvalidEdge(0, 3));

    let bad_weight = DirectedGraph::from_edges(2, &[(0, 1, OrderedFloat(-2.0))]);
    assert_eq!(bad_weight.unwrap_err(), Error::NegativeWeight(-2.0));

    let graph = DirectedGraph::from_edges(3, &[(0, 1, OrderedFloat(1.0)), (1, 2, OrderedFloat(2.0))]).unwrap();
    assert!(graph.validate().is_ok());
    assert!(graph.validate_non_negative());
    assert_eq!(graph.edges().count(), 2);
}

#[test]
fn test_self_loops_hidden_from_neighbour_iterators() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(2);
    graph.add_unit_edge(0, 0);
    graph.add_unit_edge(0, 1);

    assert!(graph.has_edge(0, 0));
    assert_eq!(graph.successors(0).collect::<Vec<_>>(), vec![1]);
    assert!(graph.predecessors(0).next().is_none());
}

#[test]
fn test_remove_edge() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(3);
    graph.add_unit_edge(0, 1);
    graph.add_unit_edge(1, 2);

    assert!(graph.remove_edge(0, 1));
    assert!(!graph.remove_edge(0, 1));
    assert!(!graph.has_edge(0, 1));
    assert!(graph.incoming_edges(1).next().is_none());
}

#[test]
fn test_add_vertex_grows_graph() {
    let mut graph: DirectedGraph<W> = DirectedGraph::new();
    assert_eq!(graph.add_vertex(), 0);
    assert_eq!(graph.add_vertex(), 1);
    assert_eq!(graph.vertex_count(), 2);
    assert!(!graph.has_vertex(2));
}

#[test]
fn test_random_graph_is_weakly_connected() {
    let mut rng = StdRng::seed_from_u64(9);
    let graph = generate_random_graph(30, 0.02, 1..=10, &mut rng);

    // Undirected reachability from 0 covers every vertex
    let mut seen = vec![false; graph.vertex_count()];
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
    assert!(seen.iter().all(|&s| s));
    assert!(graph.validate().is_ok());
}

#[test]
fn test_dag_edges_point_forward() {
    let mut rng = StdRng::seed_from_u64(1);
    let graph = generate_dag(25, 0.3, 1..=10, &mut rng);
    assert!(graph.edges().all(|(u, v, _)| u < v));
}

#[test]
fn test_hierarchical_graph_shape() {
    let config = GeneratorConfig {
        components: 4,
        component_size: 3,
        connection_probability: 1.0,
        min_weight: 2,
        max_weight: 2,
        seed: Some(5),
    };
    let mut rng = config.rng();
    let graph = generate_hierarchical_graph(&config, &mut rng);

    assert_eq!(graph.vertex_count(), 12);
    // 4 blocks of 6 internal edges plus one link per block pair
    assert_eq!(graph.edge_count(), 4 * 6 + 6);
    assert!(graph.edges().all(|(_, _, w)| w == OrderedFloat(2.0)));
    assert!(graph.edges().all(|(u, v, _)| u / 3 <= v / 3));
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let config = GeneratorConfig {
        seed: Some(123),
        ..Default::default()
    };
    let a = generate_hierarchical_graph(&config, &mut config.rng());
    let b = generate_hierarchical_graph(&config, &mut config.rng());
    assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
}

// Neighbour counts through the trait's default iterators only
fn degrees<W, G>(graph: &G) -> Vec<(usize, usize)>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    (0..graph.vertex_count())
        .map(|v| (graph.successors(v).count(), graph.predecessors(v).count()))
        .collect()
}

#[test]
fn test_neighbour_iterators_through_generic_graph() {
    let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(3);
    graph.add_unit_edge(0, 1);
    graph.add_unit_edge(0, 2);
    graph.add_unit_edge(2, 2);
    graph.add_unit_edge(2, 1);

    assert_eq!(degrees(&graph), vec![(2, 0), (0, 2), (1, 1)]);
}

#[test]
fn test_config_validation() {
    assert!(GeneratorConfig::default().validate().is_ok());

    for p in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
        let config = GeneratorConfig {
            connection_probability: p,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))), "probability {}", p);
    }

    let config = GeneratorConfig {
        min_weight: 5,
        max_weight: 2,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_nan_probability_adds_no_links() {
    let config = GeneratorConfig {
        components: 3,
        component_size: 2,
        connection_probability: f64::NAN,
        seed: Some(1),
        ..Default::default()
    };
    let graph = generate_hierarchical_graph(&config, &mut config.rng());
    assert_eq!(graph.edge_count(), 3 * 2);

    let mut rng = StdRng::seed_from_u64(2);
    let dag = generate_dag(10, f64::NAN, 1..=5, &mut rng);
    assert_eq!(dag.edge_count(), 0);
}
