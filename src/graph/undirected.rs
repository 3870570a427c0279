use crate::graph::traits::{Graph, MutableGraph, Weight};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// An undirected weighted graph keyed by node name
///
/// Names are interned to dense vertex ids on first use, and every adjacency map
/// is keyed by those ids. Nodes are never removed, so an id stays valid for the
/// lifetime of the graph.
///
/// A graph is not synchronised internally. Concurrent searches are fine while
/// nobody calls `add_edge`; callers that need to mutate a shared graph must
/// provide their own locking.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<W = u64>
where
    W: Weight,
{
    /// Vertex id -> node name
    names: Vec<String>,

    /// Node name -> vertex id
    ids: HashMap<String, usize>,

    /// Incident edges for each vertex: vertex_id -> {neighbor: weight}
    adjacency: Vec<BTreeMap<usize, W>>,

    /// Number of undirected edges, self loops included
    edge_count: usize,
}

impl<W> Default for UndirectedGraph<W>
where
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> UndirectedGraph<W>
where
    W: Weight,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        UndirectedGraph {
            names: Vec::new(),
            ids: HashMap::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `vertices` nodes
    pub fn with_capacity(vertices: usize) -> Self {
        UndirectedGraph {
            names: Vec::with_capacity(vertices),
            ids: HashMap::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Looks up a node by name
    pub fn get_node(&self, name: &str) -> Option<Node<'_, W>> {
        self.ids.get(name).map(|&id| Node { graph: self, id })
    }

    /// Node names in vertex id order
    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Iterates every undirected edge exactly once as `(u, v, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, W)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(u, edges)| {
            edges
                .range(u..)
                .map(move |(&v, &weight)| (self.names[u].as_str(), self.names[v].as_str(), weight))
        })
    }

    /// Returns true if the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.adjacency
            .iter()
            .flat_map(|edges| edges.values())
            .all(|weight| *weight >= W::zero())
    }
}

impl<W> Graph<W> for UndirectedGraph<W>
where
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.names.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn neighbors(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().map(|(&v, &weight)| (v, weight))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.names.len()
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.adjacency.get(from)?.get(&to).copied()
    }

    fn vertex_id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    fn vertex_name(&self, vertex: usize) -> Option<&str> {
        self.names.get(vertex).map(String::as_str)
    }
}

impl<W> MutableGraph<W> for UndirectedGraph<W>
where
    W: Weight,
{
    fn add_node(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.adjacency.push(BTreeMap::new());
        id
    }

    fn add_edge(&mut self, u: &str, v: &str, weight: W) -> Option<W> {
        let u = self.add_node(u);
        let v = self.add_node(v);

        // Both directions always carry the same weight, so one lookup decides
        // whether this is a replacement.
        let previous = self.adjacency[u].insert(v, weight);
        if u != v {
            self.adjacency[v].insert(u, weight);
        }

        if previous.is_none() {
            self.edge_count += 1;
        }
        previous
    }
}

/// A borrowed view of one node and its incident edges
#[derive(Clone, Copy)]
pub struct Node<'a, W>
where
    W: Weight,
{
    graph: &'a UndirectedGraph<W>,
    id: usize,
}

impl<'a, W> Node<'a, W>
where
    W: Weight,
{
    pub fn name(&self) -> &'a str {
        &self.graph.names[self.id]
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn degree(&self) -> usize {
        self.graph.adjacency[self.id].len()
    }

    /// Neighbor names with the weight of the connecting edge
    pub fn neighbors(&self) -> impl Iterator<Item = (&'a str, W)> + 'a {
        let graph = self.graph;
        graph.adjacency[self.id]
            .iter()
            .map(move |(&v, &weight)| (graph.names[v].as_str(), weight))
    }

    /// Weight of the edge to `name`, if the two nodes are adjacent
    pub fn weight_to(&self, name: &str) -> Option<W> {
        let other = self.graph.vertex_id(name)?;
        self.graph.get_edge_weight(self.id, other)
    }
}

impl<W> fmt::Debug for Node<'_, W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("id", &self.id)
            .field("degree", &self.degree())
            .finish()
    }
}
