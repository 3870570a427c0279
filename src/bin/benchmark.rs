use std::time::{Duration, Instant};

use route_finder::graph::generators::{generate_barabasi_albert, generate_grid, generate_random_connected, grid_label, vertex_label};
use route_finder::graph::{Graph, UndirectedGraph};
use route_finder::{Dijkstra, ShortestPathAlgorithm};

// Times a point-to-point query against a full single-source tree on the same graph
fn benchmark_graph(name: &str, graph: &UndirectedGraph<u64>, source: &str, destination: &str) -> (Duration, Duration) {
    println!(
        "Running on {} graph with {} vertices and {} edges...",
        name,
        graph.vertex_count(),
        graph.edge_count()
    );
    let dijkstra = Dijkstra::new();

    let start = Instant::now();
    let route = dijkstra.shortest_path(graph, source, destination);
    let point_time = start.elapsed();
    match &route {
        Ok(route) => println!(
            "  - {} -> {}: distance {} in {} hops, {} vertices finalized, {:?}",
            source,
            destination,
            route.distance,
            route.hops(),
            route.stats.nodes_finalized,
            point_time
        ),
        Err(err) => println!("  - {} -> {}: {}", source, destination, err),
    }

    let source_id = graph.vertex_id(source).unwrap_or_default();
    let start = Instant::now();
    let tree = dijkstra.compute_shortest_paths(graph, source_id);
    let tree_time = start.elapsed();
    match &tree {
        Ok(tree) => println!("  - full tree: {} reachable vertices in {:?}", tree.reachable_count(), tree_time),
        Err(err) => println!("  - full tree failed: {}", err),
    }

    (point_time, tree_time)
}

fn main() {
    env_logger::init();

    let sizes = vec![1_000, 10_000, 50_000, 100_000];

    println!("=====================================================");
    println!("Benchmark: point-to-point Dijkstra vs full tree");
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &sizes {
        println!("\nGenerating graphs with {} vertices...", size);

        let random = generate_random_connected(size, size * 2, 100, size as u64);
        let (point, tree) = benchmark_graph("random", &random, &vertex_label(0), &vertex_label(size - 1));
        results.push(("random", size, point, tree));

        let scale_free = generate_barabasi_albert(size, 3, 100, size as u64);
        let (point, tree) = benchmark_graph("scale-free", &scale_free, &vertex_label(0), &vertex_label(size - 1));
        results.push(("scale-free", size, point, tree));

        let side = (size as f64).sqrt().ceil() as usize;
        let grid = generate_grid(side, side, 1);
        let (point, tree) = benchmark_graph("grid", &grid, &grid_label(0, 0), &grid_label(side - 1, side - 1));
        results.push(("grid", size, point, tree));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<12} | {:<10} | {:<16} | {:<14}", "Graph", "Vertices", "Point-to-point", "Full tree");
    println!("-----------------------------------------------------");

    for (name, size, point, tree) in &results {
        println!(
            "{:<12} | {:<10} | {:<16.3} | {:<14.3}",
            name,
            size,
            point.as_secs_f64() * 1000.0,
            tree.as_secs_f64() * 1000.0
        );
    }
}
