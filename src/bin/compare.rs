use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use ac_sssp::algorithm::comparison::compare;
use ac_sssp::decomposition::Decomposition;
use ac_sssp::graph::generators::{generate_hierarchical_graph, GeneratorConfig, Weight};
use ac_sssp::graph::Graph;
use ac_sssp::{Dijkstra, HierarchicalDijkstra, ShortestPathAlgorithm, ShortestPathResult};
use colored::*;

/// Parses `[components] [component_size] [connection_probability] [seed] [--json]`
fn parse_args() -> (GeneratorConfig, bool) {
    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let mut config = GeneratorConfig::default();
    if let Some(v) = positional.first().and_then(|s| s.parse().ok()) {
        config.components = v;
    }
    if let Some(v) = positional.get(1).and_then(|s| s.parse().ok()) {
        config.component_size = v;
    }
    if let Some(v) = positional.get(2).and_then(|s| s.parse().ok()) {
        config.connection_probability = v;
    }
    config.seed = positional.get(3).and_then(|s| s.parse().ok());

    (config, json)
}

fn timed<T>(f: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let value = f();
    (start.elapsed(), value)
}

fn main() -> ExitCode {
    env_logger::init();

    let (config, json) = parse_args();
    if let Err(err) = config.validate() {
        eprintln!("{} {}", "error:".bright_red(), err);
        return ExitCode::FAILURE;
    }
    let source = 0;

    println!("Generating hierarchical graph...");
    let mut rng = config.rng();
    let graph = generate_hierarchical_graph(&config, &mut rng);
    println!(
        "Graph has {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    println!("\nRunning Dijkstra...");
    let (flat_time, flat): (_, ac_sssp::Result<ShortestPathResult<Weight>>) =
        timed(|| Dijkstra::new().compute_shortest_paths(&graph, source));

    println!("Building dominator tree and AC structure...");
    let (decomposition_time, decomposition) = timed(|| Decomposition::build::<Weight, _>(&graph, source));

    let outcome = flat.and_then(|flat| {
        let decomposition = decomposition?;
        println!("Running hierarchical Dijkstra...");
        let engine = HierarchicalDijkstra::new();
        let (hier_time, hierarchical) =
            timed(|| engine.run::<Weight, _>(&graph, source, &decomposition.structure));
        let hierarchical = hierarchical?;
        let report = compare(&flat, &hierarchical, &decomposition)?;
        Ok((decomposition, hier_time, report))
    });

    let (decomposition, hier_time, report) = match outcome {
        Ok(values) => values,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red(), err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", "Distances match for every vertex".bright_green());

    println!("\nPerformance Comparison:");
    println!("  Dijkstra:                {:?}", flat_time);
    println!("  AC decomposition:        {:?}", decomposition_time);
    println!("  Hierarchical Dijkstra:   {:?}", hier_time);
    println!("  Total hierarchical:      {:?}", decomposition_time + hier_time);
    println!(
        "  Dominator fixpoint:      {} passes over {} vertices",
        decomposition.tree.fixpoint_passes(),
        decomposition.tree.len()
    );

    println!("\nOperation Counts:");
    println!(
        "  Dijkstra:      {} extract-min, {} decrease-key",
        report.flat.extract_min.to_string().bright_cyan(),
        report.flat.decrease_key.to_string().bright_cyan()
    );
    println!(
        "  Hierarchical:  {} extract-min, {} decrease-key",
        report.hierarchical.extract_min.to_string().bright_cyan(),
        report.hierarchical.decrease_key.to_string().bright_cyan()
    );
    println!(
        "  Improvement:   {:.1}% ({} components, {} levels, nesting width {})",
        report.improvement * 100.0,
        report.components,
        report.levels,
        report.nesting_width
    );

    if json {
        match serde_json::to_string_pretty(&(&decomposition, &report)) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("{} {}", "error:".bright_red(), err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
