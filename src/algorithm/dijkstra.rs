use log::{debug, trace};
use serde::Serialize;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::IndexedMinPriorityQueue;
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Counters collected while a search runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Vertices popped from the queue, whose distance became final
    pub nodes_finalized: usize,

    /// Edges inspected from finalized vertices
    pub edges_scanned: usize,

    /// Vertices inserted into the queue, the source included
    pub queue_pushes: usize,

    /// Decrease-key operations on already queued vertices
    pub queue_updates: usize,
}

/// A reconstructed source-to-destination route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath<W>
where
    W: Weight,
{
    /// Node names from source to destination, both included
    pub path: Vec<String>,

    /// Sum of the edge weights along `path`
    pub distance: W,

    /// Work done by the search that produced this route
    pub stats: SearchStats,
}

impl<W> ShortestPath<W>
where
    W: Weight,
{
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// How a search loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The target was popped, so its distance is final
    Found,
    /// The queue ran dry first
    Exhausted,
}

/// Per-run state: tentative distances, predecessors and the frontier
struct Search<'g, W, G>
where
    W: Weight,
    G: Graph<W>,
{
    graph: &'g G,
    distances: Vec<Option<W>>,
    predecessors: Vec<Option<usize>>,
    finalized: Vec<bool>,
    /// Vertices that were unreached when a relaxation into them overflowed `W`
    overflowed: Vec<bool>,
    queue: IndexedMinPriorityQueue<W>,
    stats: SearchStats,
}

impl<'g, W, G> Search<'g, W, G>
where
    W: Weight,
    G: Graph<W>,
{
    fn new(graph: &'g G, source: usize) -> Result<Self> {
        let n = graph.vertex_count();
        let mut search = Search {
            graph,
            distances: vec![None; n],
            predecessors: vec![None; n],
            finalized: vec![false; n],
            overflowed: vec![false; n],
            queue: IndexedMinPriorityQueue::with_capacity(n),
            stats: SearchStats::default(),
        };

        search.distances[source] = Some(W::zero());
        search.queue.push(source, W::zero())?;
        search.stats.queue_pushes += 1;
        Ok(search)
    }

    /// Runs until `target` is finalized, or until every reachable vertex is
    /// when no target is given.
    fn run(&mut self, target: Option<usize>) -> Result<Outcome> {
        let graph = self.graph;
        while !self.queue.is_empty() {
            let (u, dist_u) = self.queue.pop()?;
            self.finalized[u] = true;
            self.stats.nodes_finalized += 1;
            trace!("finalized vertex {} at distance {:?}", u, dist_u);

            if target == Some(u) {
                return Ok(Outcome::Found);
            }

            for (v, weight) in graph.neighbors(u) {
                self.stats.edges_scanned += 1;
                if self.finalized[v] {
                    continue;
                }

                // A sum past the range of W can never beat a stored distance. It
                // only matters if v stays unreached, which `overflowed_vertex`
                // reports once the queue is empty.
                let alt = match dist_u.checked_sum(weight) {
                    Some(alt) => alt,
                    None => {
                        if self.distances[v].is_none() {
                            self.overflowed[v] = true;
                        }
                        continue;
                    }
                };
                let improves = match self.distances[v] {
                    None => true,
                    Some(current) => alt < current,
                };
                if !improves {
                    continue;
                }

                self.distances[v] = Some(alt);
                self.predecessors[v] = Some(u);

                if self.queue.contains(v) {
                    self.queue.update(v, alt)?;
                    self.stats.queue_updates += 1;
                } else {
                    self.queue.push(v, alt)?;
                    self.stats.queue_pushes += 1;
                }
            }
        }

        Ok(match target {
            None => Outcome::Found,
            Some(_) => Outcome::Exhausted,
        })
    }

    /// First vertex left unreached only because its distance does not fit in `W`
    fn overflowed_vertex(&self) -> Option<usize> {
        (0..self.overflowed.len()).find(|&v| self.overflowed[v] && self.distances[v].is_none())
    }

    /// Walks predecessor links back from `target` and returns source-first order
    fn reconstruct(&self, target: usize) -> Vec<usize> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(previous) = self.predecessors[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Classic Dijkstra's algorithm over an indexed binary heap
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Finds the shortest route between two named nodes
    ///
    /// The search stops as soon as `destination` is finalized. Both names are
    /// resolved before any work starts, so a typo surfaces as `UnknownNode`
    /// rather than as an unreachable destination.
    pub fn shortest_path<W, G>(&self, graph: &G, source: &str, destination: &str) -> Result<ShortestPath<W>>
    where
        W: Weight,
        G: Graph<W>,
    {
        let source_id = graph
            .vertex_id(source)
            .ok_or_else(|| Error::UnknownNode(source.to_string()))?;
        let destination_id = graph
            .vertex_id(destination)
            .ok_or_else(|| Error::UnknownNode(destination.to_string()))?;

        debug!(
            "Dijkstra: {} -> {} over {} vertices / {} edges",
            source,
            destination,
            graph.vertex_count(),
            graph.edge_count()
        );

        let mut search = Search::new(graph, source_id)?;
        if search.run(Some(destination_id))? == Outcome::Exhausted {
            if search.overflowed_vertex().is_some() {
                return Err(Error::DistanceOverflow {
                    from: source.to_string(),
                    to: destination.to_string(),
                });
            }
            return Err(Error::NoPath {
                from: source.to_string(),
                to: destination.to_string(),
            });
        }

        let distance = search.distances[destination_id].unwrap_or_else(W::zero);
        let path = search
            .reconstruct(destination_id)
            .into_iter()
            .map(|vertex| {
                graph
                    .vertex_name(vertex)
                    .map(str::to_string)
                    .ok_or(Error::InvalidVertex(vertex))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Dijkstra: reached {} at distance {:?} in {} hops, {} vertices finalized",
            destination,
            distance,
            path.len() - 1,
            search.stats.nodes_finalized
        );

        Ok(ShortestPath {
            path,
            distance,
            stats: search.stats,
        })
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }

        let mut search = Search::new(graph, source)?;
        search.run(None)?;
        if let Some(vertex) = search.overflowed_vertex() {
            let name = |v: usize| graph.vertex_name(v).unwrap_or_default().to_string();
            return Err(Error::DistanceOverflow {
                from: name(source),
                to: name(vertex),
            });
        }
        debug!(
            "Dijkstra: full tree from vertex {} finalized {} vertices",
            source, search.stats.nodes_finalized
        );

        Ok(ShortestPathResult {
            distances: search.distances,
            predecessors: search.predecessors,
            source,
        })
    }
}

/// Finds the shortest route between `source` and `destination`
///
/// Convenience wrapper around [`Dijkstra::shortest_path`].
pub fn shortest_path<W, G>(graph: &G, source: &str, destination: &str) -> Result<ShortestPath<W>>
where
    W: Weight,
    G: Graph<W>,
{
    Dijkstra::new().shortest_path(graph, source, destination)
}
