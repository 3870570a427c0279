use num_traits::{CheckedAdd, Float, Zero};
use ordered_float::OrderedFloat;
use std::fmt::Debug;

/// Edge weight usable by the shortest path algorithms
///
/// Dijkstra is only correct for non-negative weights. The bound cannot express
/// that, so it stays a precondition on the caller.
pub trait Weight: Copy + Ord + Zero + Debug {
    /// Sum of two weights, `None` when the result is not representable
    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

impl_integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T> Weight for OrderedFloat<T>
where
    T: Float + Debug,
{
    fn checked_sum(self, other: Self) -> Option<Self> {
        let sum = self.0 + other.0;
        if sum.is_infinite() && self.0.is_finite() && other.0.is_finite() {
            return None;
        }
        Some(OrderedFloat(sum))
    }
}

/// Trait representing a weighted undirected graph whose vertices carry names
///
/// Vertices are addressed by dense `usize` ids assigned by the graph; names are
/// the stable external identity.
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of undirected edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the edges incident to a vertex
    fn neighbors(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool;

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get_edge_weight(from, to).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W>;

    /// Resolves a node name to its vertex id
    fn vertex_id(&self, name: &str) -> Option<usize>;

    /// Resolves a vertex id back to its node name
    fn vertex_name(&self, vertex: usize) -> Option<&str>;
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Weight,
{
    /// Adds an isolated node if absent and returns its vertex id
    fn add_node(&mut self, name: &str) -> usize;

    /// Adds or replaces the undirected edge `u - v`, creating missing nodes.
    /// Returns the previous weight when the edge already existed.
    fn add_edge(&mut self, u: &str, v: &str, weight: W) -> Option<W>;
}
