use route_finder::{shortest_path, MutableGraph, UndirectedGraph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut graph: UndirectedGraph<u64> = UndirectedGraph::new();
    for (u, v, weight) in [
        ("A", "B", 7),
        ("A", "C", 9),
        ("A", "F", 14),
        ("B", "C", 10),
        ("B", "D", 15),
        ("C", "D", 11),
        ("C", "F", 2),
        ("D", "E", 6),
        ("E", "F", 9),
    ] {
        graph.add_edge(u, v, weight);
    }

    let (source, destination) = match (std::env::args().nth(1), std::env::args().nth(2)) {
        (Some(source), Some(destination)) => (source, destination),
        _ => ("A".to_string(), "E".to_string()),
    };

    let route = shortest_path(&graph, &source, &destination)?;
    println!("Shortest path {} -> {}: {}", source, destination, route.path.join(" -> "));
    println!("Total distance: {}", route.distance);
    println!(
        "Finalized {} nodes, scanned {} edges ({} pushes, {} decrease-keys)",
        route.stats.nodes_finalized,
        route.stats.edges_scanned,
        route.stats.queue_pushes,
        route.stats.queue_updates
    );

    Ok(())
}
