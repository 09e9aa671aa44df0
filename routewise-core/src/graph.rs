//! Undirected weighted graph over coordinates.
//!
//! Nodes live in an arena indexed by dense [`NodeIndex`] values assigned in
//! input order. The id-to-index table is fixed when the graph is created, so
//! every edge inserted afterwards resolves against a complete mapping.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::{Coordinate, CoordinateId, Distance, DistanceMetric, GraphError, Haversine, NodeIndex};

/// A directed adjacency entry; every undirected edge is stored twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Node the edge leads to.
    pub target: NodeIndex,
    /// Edge weight shared by both directions.
    pub weight: Distance,
}

/// Graph of coordinates weighted by a [`DistanceMetric`].
///
/// # Examples
/// ```
/// use routewise_core::{Coordinate, GeoGraph};
///
/// let graph = GeoGraph::complete(&[
///     Coordinate::new(1, 0.0, 0.0),
///     Coordinate::new(2, 0.0, 1.0),
///     Coordinate::new(3, 1.0, 1.0),
/// ]);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges(0).len(), 2);
/// assert_eq!(graph.index_of(3), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct GeoGraph<M = Haversine> {
    metric: M,
    nodes: Vec<Coordinate>,
    index: HashMap<CoordinateId, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
}

impl GeoGraph<Haversine> {
    /// Create an edgeless Haversine graph over `coordinates`.
    #[must_use]
    pub fn new(coordinates: &[Coordinate]) -> Self {
        Self::with_metric(coordinates, Haversine)
    }

    /// Create a complete Haversine graph over `coordinates`.
    #[must_use]
    pub fn complete(coordinates: &[Coordinate]) -> Self {
        Self::complete_with_metric(coordinates, Haversine)
    }
}

impl<M: DistanceMetric> GeoGraph<M> {
    /// Create an edgeless graph using `metric` for future edges.
    ///
    /// Coordinates sharing an id collapse onto the first occurrence.
    #[must_use]
    pub fn with_metric(coordinates: &[Coordinate], metric: M) -> Self {
        let mut nodes = Vec::with_capacity(coordinates.len());
        let mut index = HashMap::with_capacity(coordinates.len());
        for coordinate in coordinates {
            match index.entry(coordinate.id()) {
                Entry::Occupied(_) => {
                    log::warn!(
                        "dropping duplicate coordinate id {}; keeping first occurrence",
                        coordinate.id()
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(nodes.len());
                    nodes.push(*coordinate);
                }
            }
        }
        let adjacency = vec![Vec::new(); nodes.len()];
        Self {
            metric,
            nodes,
            index,
            adjacency,
        }
    }

    /// Create a graph with an edge between every pair of distinct nodes.
    #[must_use]
    pub fn complete_with_metric(coordinates: &[Coordinate], metric: M) -> Self {
        let mut graph = Self::with_metric(coordinates, metric);
        graph.connect_all();
        graph
    }

    /// Connect the coordinates `from` and `to` with a weighted edge.
    ///
    /// The weight is computed once and stored for both directions.
    /// Connecting an already-connected pair returns the existing weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownCoordinateId`] when either id is not a
    /// node of this graph and [`GraphError::SelfEdge`] when both ids match.
    pub fn connect(&mut self, from: CoordinateId, to: CoordinateId) -> Result<Distance, GraphError> {
        let source = self
            .index_of(from)
            .ok_or(GraphError::UnknownCoordinateId(from))?;
        let target = self
            .index_of(to)
            .ok_or(GraphError::UnknownCoordinateId(to))?;
        if source == target {
            return Err(GraphError::SelfEdge(from));
        }
        if let Some(weight) = self.edge_weight(source, target) {
            return Ok(weight);
        }
        let weight = self.weigh(source, target);
        self.insert_edge(source, target, weight);
        Ok(weight)
    }

    /// Add every missing edge so that the graph becomes complete.
    pub fn connect_all(&mut self) {
        let count = self.nodes.len();
        for source in 0..count {
            for target in (source + 1)..count {
                if self.edge_weight(source, target).is_none() {
                    let weight = self.weigh(source, target);
                    self.insert_edge(source, target, weight);
                }
            }
        }
    }

    fn weigh(&self, source: NodeIndex, target: NodeIndex) -> Distance {
        match (self.nodes.get(source), self.nodes.get(target)) {
            (Some(a), Some(b)) => self.metric.distance(a, b),
            _ => Distance::UNREACHABLE,
        }
    }

    fn insert_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: Distance) {
        if let Some(edges) = self.adjacency.get_mut(source) {
            edges.push(Edge { target, weight });
        }
        if let Some(edges) = self.adjacency.get_mut(target) {
            edges.push(Edge {
                target: source,
                weight,
            });
        }
    }
}

impl<M> GeoGraph<M> {
    /// Number of distinct coordinates in the graph.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[Coordinate] {
        &self.nodes
    }

    /// The coordinate stored at `index`.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Coordinate> {
        self.nodes.get(index)
    }

    /// Dense index assigned to the coordinate `id`.
    #[must_use]
    pub fn index_of(&self, id: CoordinateId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Coordinate id stored at `index`.
    #[must_use]
    pub fn coordinate_id(&self, index: NodeIndex) -> Option<CoordinateId> {
        self.node(index).map(Coordinate::id)
    }

    /// Outgoing edges of `index`; empty for unknown indices.
    #[must_use]
    pub fn edges(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Weight of the direct edge between two nodes, if one exists.
    #[must_use]
    pub fn edge_weight(&self, source: NodeIndex, target: NodeIndex) -> Option<Distance> {
        self.edges(source)
            .iter()
            .find(|edge| edge.target == target)
            .map(|edge| edge.weight)
    }

    /// Total number of undirected edges.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "each undirected edge is stored as two adjacency entries"
    )]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::UnitMetric;
    use rstest::{fixture, rstest};

    #[fixture]
    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(10, 0.0, 0.0),
            Coordinate::new(20, 0.0, 1.0),
            Coordinate::new(30, 1.0, 1.0),
            Coordinate::new(40, 1.0, 0.0),
        ]
    }

    #[rstest]
    fn assigns_indices_in_input_order(square: Vec<Coordinate>) {
        let graph = GeoGraph::new(&square);
        for (expected, coordinate) in square.iter().enumerate() {
            assert_eq!(graph.index_of(coordinate.id()), Some(expected));
            assert_eq!(graph.coordinate_id(expected), Some(coordinate.id()));
        }
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    fn complete_graph_has_every_pair(square: Vec<Coordinate>) {
        let graph = GeoGraph::complete(&square);
        assert_eq!(graph.edge_count(), 6);
        for source in 0..graph.node_count() {
            assert_eq!(graph.edges(source).len(), 3);
            assert!(graph.edge_weight(source, source).is_none());
        }
    }

    #[rstest]
    fn edge_weights_are_symmetric(square: Vec<Coordinate>) {
        let graph = GeoGraph::complete(&square);
        for source in 0..4 {
            for target in 0..4 {
                assert_eq!(
                    graph.edge_weight(source, target),
                    graph.edge_weight(target, source)
                );
            }
        }
        assert_eq!(graph.edge_weight(0, 1), Some(Distance::from_km(111.195)));
    }

    #[rstest]
    fn duplicate_ids_keep_first(square: Vec<Coordinate>) {
        let mut coordinates = square;
        coordinates.push(Coordinate::new(20, 45.0, 45.0));
        let graph = GeoGraph::new(&coordinates);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.node(1).map(Coordinate::latitude), Some(0.0));
    }

    #[rstest]
    fn connect_rejects_unknown_ids(square: Vec<Coordinate>) {
        let mut graph = GeoGraph::new(&square);
        assert_eq!(
            graph.connect(10, 99),
            Err(GraphError::UnknownCoordinateId(99))
        );
        assert_eq!(
            graph.connect(98, 10),
            Err(GraphError::UnknownCoordinateId(98))
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    fn connect_rejects_self_edges(square: Vec<Coordinate>) {
        let mut graph = GeoGraph::new(&square);
        assert_eq!(graph.connect(30, 30), Err(GraphError::SelfEdge(30)));
    }

    #[rstest]
    fn connect_is_idempotent(square: Vec<Coordinate>) {
        let mut graph = GeoGraph::new(&square);
        let first = graph.connect(10, 20).expect("known ids");
        let second = graph.connect(20, 10).expect("known ids");
        assert_eq!(first, second);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges(0), &[Edge { target: 1, weight: first }]);
    }

    #[rstest]
    fn custom_metric_weights_edges(square: Vec<Coordinate>) {
        let graph = GeoGraph::complete_with_metric(&square, UnitMetric);
        assert!(
            (0..4)
                .flat_map(|n| graph.edges(n).iter())
                .all(|edge| edge.weight == Distance::from_km(1.0))
        );
    }
}
