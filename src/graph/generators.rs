use crate::graph::{MutableGraph, UndirectedGraph};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Name given to the `i`th vertex by the random generators
pub fn vertex_label(i: usize) -> String {
    format!("v{}", i)
}

/// Name given to the grid cell at row `y`, column `x`
pub fn grid_label(x: usize, y: usize) -> String {
    format!("r{}c{}", y, x)
}

/// Generates a connected random graph with `n` vertices
///
/// A random spanning tree guarantees connectivity, then `extra_edges` further
/// edges are sprinkled between distinct vertices. Weights are drawn uniformly
/// from `1..=max_weight`. The same seed always yields the same graph.
pub fn generate_random_connected(
    n: usize,
    extra_edges: usize,
    max_weight: u64,
    seed: u64,
) -> UndirectedGraph<u64> {
    assert!(n > 0, "n must be positive");
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = UndirectedGraph::with_capacity(n);
    let mut rng = StdRng::seed_from_u64(seed);

    graph.add_node(&vertex_label(0));
    for i in 1..n {
        let parent = rng.gen_range(0..i);
        let weight = rng.gen_range(1..=max_weight);
        graph.add_edge(&vertex_label(i), &vertex_label(parent), weight);
    }

    if n > 1 {
        for _ in 0..extra_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u != v {
                let weight = rng.gen_range(1..=max_weight);
                graph.add_edge(&vertex_label(u), &vertex_label(v), weight);
            }
        }
    }

    graph
}

/// Generates a `width` x `height` grid with 4-connectivity and a uniform weight
pub fn generate_grid(width: usize, height: usize, weight: u64) -> UndirectedGraph<u64> {
    let mut graph = UndirectedGraph::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let current = grid_label(x, y);
            graph.add_node(&current);

            if x + 1 < width {
                graph.add_edge(&current, &grid_label(x + 1, y), weight);
            }
            if y + 1 < height {
                graph.add_edge(&current, &grid_label(x, y + 1), weight);
            }
        }
    }

    graph
}

/// Generates a Barabási-Albert scale-free graph with n vertices and m edges per new vertex
pub fn generate_barabasi_albert(n: usize, m: usize, max_weight: u64, seed: u64) -> UndirectedGraph<u64> {
    assert!(m > 0, "m must be positive");
    assert!(n > m, "n must be greater than m");
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = UndirectedGraph::with_capacity(n);
    let mut rng = StdRng::seed_from_u64(seed);

    // Seed clique over the first m vertices
    for i in 0..m {
        graph.add_node(&vertex_label(i));
        for j in 0..i {
            let weight = rng.gen_range(1..=max_weight);
            graph.add_edge(&vertex_label(i), &vertex_label(j), weight);
        }
    }

    let mut degrees = vec![m - 1; m];
    let mut total_degree = m * (m - 1);

    for i in m..n {
        let mut targets = HashSet::new();

        while targets.len() < m {
            // A single seed vertex has no degree yet; fall back to uniform choice.
            let target = if total_degree == 0 {
                rng.gen_range(0..i)
            } else {
                let mut target_value = rng.gen_range(0..total_degree);
                let mut target = 0;
                while target < i && target_value >= degrees[target] {
                    target_value -= degrees[target];
                    target += 1;
                }
                target
            };

            if target < i && targets.insert(target) {
                let weight = rng.gen_range(1..=max_weight);
                graph.add_edge(&vertex_label(i), &vertex_label(target), weight);
                degrees[target] += 1;
                total_degree += 1;
            }
        }

        degrees.push(m);
        total_degree += m;
    }

    graph
}
