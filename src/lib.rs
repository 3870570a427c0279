//! Route Finder - shortest paths over string-keyed undirected graphs
//!
//! This library implements Dijkstra's single-source shortest path algorithm on
//! undirected graphs with non-negative edge weights. The frontier is kept in an
//! indexed binary heap, so tightening the distance of a queued node is an
//! O(log n) decrease-key instead of a duplicate insertion.
//!
//! ```
//! use route_finder::{shortest_path, UndirectedGraph, MutableGraph};
//!
//! let mut graph: UndirectedGraph<u64> = UndirectedGraph::new();
//! graph.add_edge("A", "B", 7);
//! graph.add_edge("B", "C", 3);
//! graph.add_edge("A", "C", 12);
//!
//! let route = shortest_path(&graph, "A", "C").unwrap();
//! assert_eq!(route.path, vec!["A", "B", "C"]);
//! assert_eq!(route.distance, 10);
//! ```

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

/// Re-export main types for convenient use
pub use algorithm::{
    dijkstra::{shortest_path, Dijkstra, SearchStats, ShortestPath},
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use graph::{Graph, MutableGraph, Node, UndirectedGraph, Weight};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("No path from {from} to {to}")]
    NoPath { from: String, to: String },

    #[error("Pop called on an empty priority queue")]
    EmptyQueue,

    #[error("Vertex {0} is already queued")]
    AlreadyQueued(usize),

    #[error("Vertex {0} is not queued")]
    NotQueued(usize),

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Negative edge weight between {from} and {to}")]
    NegativeWeight { from: String, to: String },

    #[error("Distance from {from} to {to} exceeds the range of the weight type")]
    DistanceOverflow { from: String, to: String },
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
