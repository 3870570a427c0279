pub mod generators;
pub mod traits;
pub mod undirected;

pub use traits::{Graph, MutableGraph, Weight};
pub use undirected::{Node, UndirectedGraph};
