use crate::graph::{Graph, Weight};
use crate::Result;

/// Result of a single-source shortest path computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult<W>
where
    W: Weight,
{
    /// Distances from source to each vertex, `None` when unreachable
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Weight,
{
    pub fn distance_to(&self, target: usize) -> Option<W> {
        self.distances.get(target).copied().flatten()
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.distance_to(target).is_some()
    }

    /// Number of vertices with a known distance, the source included
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if !result.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;

        while current != result.source {
            current = result.predecessors.get(current).copied().flatten()?;
            path.push(current);

            // A well-formed tree never yields a path longer than the vertex count
            if path.len() > result.predecessors.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Same as `get_path`, with vertex ids resolved to node names
    fn get_named_path(&self, graph: &G, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<String>> {
        self.get_path(result, target)?
            .into_iter()
            .map(|vertex| graph.vertex_name(vertex).map(str::to_string))
            .collect()
    }
}
