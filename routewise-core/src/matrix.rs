//! Dense all-pairs distance matrix.

use crate::shortest_path::shortest_distances_from;
use crate::{Distance, GeoGraph, NodeIndex};

/// A dense `n × n` matrix of shortest distances stored in row-major order.
///
/// # Examples
/// ```
/// use routewise_core::{Coordinate, DistanceMatrix, GeoGraph};
///
/// let graph = GeoGraph::complete(&[
///     Coordinate::new(1, 0.0, 0.0),
///     Coordinate::new(2, 0.0, 1.0),
/// ]);
/// let matrix = DistanceMatrix::from_graph(&graph);
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.get(0, 1).km(), 111.195);
/// assert_eq!(matrix.get(1, 1).km(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<Distance>,
    size: usize,
}

impl DistanceMatrix {
    /// Create a matrix of the given size with every cell unreachable.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![Distance::UNREACHABLE; size.saturating_mul(size)],
            size,
        }
    }

    /// Build the matrix by running Dijkstra from every node of `graph`.
    ///
    /// Cells backed by a direct edge are then overwritten with that edge's
    /// weight, so an explicit edge always wins over an indirect path.
    #[must_use]
    pub fn from_graph<M>(graph: &GeoGraph<M>) -> Self {
        let size = graph.node_count();
        let mut matrix = Self::new(size);
        for source in 0..size {
            for (target, distance) in shortest_distances_from(graph, source).into_iter().enumerate()
            {
                matrix.set(source, target, distance);
            }
        }
        for source in 0..size {
            for edge in graph.edges(source) {
                matrix.set(source, edge.target, edge.weight);
            }
        }
        matrix
    }

    fn offset(&self, from: NodeIndex, to: NodeIndex) -> Option<usize> {
        if from < self.size && to < self.size {
            Some(from * self.size + to)
        } else {
            None
        }
    }

    /// Distance from `from` to `to`; unreachable for out-of-range indices.
    #[must_use]
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Distance {
        self.offset(from, to)
            .and_then(|offset| self.data.get(offset))
            .copied()
            .unwrap_or(Distance::UNREACHABLE)
    }

    /// Set the distance from `from` to `to`; out-of-range writes are ignored.
    pub fn set(&mut self, from: NodeIndex, to: NodeIndex, distance: Distance) {
        if let Some(cell) = self
            .offset(from, to)
            .and_then(|offset| self.data.get_mut(offset))
        {
            *cell = distance;
        }
    }

    /// Number of nodes covered by this matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row of distances leaving `from`; empty for out-of-range indices.
    #[must_use]
    pub fn row(&self, from: NodeIndex) -> &[Distance] {
        self.offset(from, 0)
            .and_then(|start| self.data.get(start..start + self.size))
            .unwrap_or_default()
    }

    /// Whether `get(i, j) == get(j, i)` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
