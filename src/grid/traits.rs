use std::fmt::Debug;

/// Trait representing a weighted directed graph over dense vertex ids
/// `0..vertex_count()`.
///
/// Edges are produced on demand; implementors are free to compute them
/// from some underlying model instead of storing them.
pub trait Graph: Debug {
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex as
    /// `(target, weight)` pairs, in a stable order.
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, f64)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<f64> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }
}
