//! Greedy nearest-neighbour sequencing over the all-pairs matrix.

use std::collections::HashSet;

use crate::{
    Coordinate, CoordinateId, Distance, DistanceMatrix, DistanceMetric, GeoGraph, GraphError,
    Haversine, NodeIndex, SequencingError, Stop,
};

/// A closed visiting order over graph nodes.
///
/// The order starts and ends at the start node. When some nodes could not be
/// reached the walk stops early, the tour is still closed, and the skipped
/// nodes are reported by [`Tour::unvisited`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<NodeIndex>,
    node_ids: Vec<CoordinateId>,
    unvisited: Vec<NodeIndex>,
    distance: Distance,
}

impl Tour {
    /// Node indices in visiting order, start node first and last.
    #[must_use]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Coordinate ids in visiting order, resolved through the graph's table.
    pub fn coordinate_ids(&self) -> impl Iterator<Item = CoordinateId> + '_ {
        self.order
            .iter()
            .filter_map(|index| self.node_ids.get(*index).copied())
    }

    /// Nodes the walk could not reach, in ascending index order.
    #[must_use]
    pub fn unvisited(&self) -> &[NodeIndex] {
        &self.unvisited
    }

    /// Whether every node was visited.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unvisited.is_empty()
    }

    /// Length of the closed tour measured on the distance matrix.
    #[must_use]
    pub const fn distance(&self) -> Distance {
        self.distance
    }
}

/// Orders stops into a closed tour starting at the stop marked
/// [`Priority::Start`](crate::Priority::Start).
///
/// # Examples
/// ```
/// use routewise_core::{Coordinate, Priority, RouteSequencer, Stop};
///
/// # fn main() -> Result<(), routewise_core::SequencingError> {
/// let coordinates = [
///     Coordinate::new(1, 0.0, 0.0),
///     Coordinate::new(2, 0.0, 1.0),
///     Coordinate::new(3, 1.0, 1.0),
///     Coordinate::new(4, 1.0, 0.0),
/// ];
/// let stops = [
///     Stop::new(1, 1, Priority::Start),
///     Stop::new(2, 2, Priority::Normal),
///     Stop::new(3, 3, Priority::High),
///     Stop::new(4, 4, Priority::Normal),
/// ];
/// let tour = RouteSequencer::new().sequence(&stops, &coordinates)?;
/// assert_eq!(tour.order(), &[0, 1, 2, 3, 0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteSequencer<M = Haversine> {
    metric: M,
}

impl RouteSequencer<Haversine> {
    /// Sequencer using great-circle distances.
    #[must_use]
    pub const fn new() -> Self {
        Self { metric: Haversine }
    }
}

impl Default for RouteSequencer<Haversine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: DistanceMetric> RouteSequencer<M> {
    /// Sequencer using a custom symmetric metric.
    #[must_use]
    pub const fn with_metric(metric: M) -> Self {
        Self { metric }
    }

    /// Compute a closed nearest-neighbour tour over `coordinates`.
    ///
    /// Stops are deduplicated by coordinate id (first wins) before the start
    /// stop is located. The returned tour has one entry per distinct
    /// coordinate plus the closing return to the start.
    ///
    /// # Errors
    ///
    /// Returns [`SequencingError::MissingStartLocation`] when no stop is the
    /// start, and [`SequencingError::Graph`] when the start stop references a
    /// coordinate absent from `coordinates`.
    pub fn sequence(
        &self,
        stops: &[Stop],
        coordinates: &[Coordinate],
    ) -> Result<Tour, SequencingError> {
        let unique = dedup_by_coordinate(stops);
        let start = start_stop(&unique).ok_or(SequencingError::MissingStartLocation)?;

        let graph = GeoGraph::complete_with_metric(coordinates, &self.metric);
        let start_index = graph
            .index_of(start.coordinate_id())
            .ok_or(GraphError::UnknownCoordinateId(start.coordinate_id()))?;
        log::debug!(
            "sequencing {} node(s) from stop {} at coordinate {} (index {start_index})",
            graph.node_count(),
            start.id(),
            start.coordinate_id()
        );

        let matrix = DistanceMatrix::from_graph(&graph);
        let (order, unvisited) = nearest_neighbour(&matrix, start_index);
        if !unvisited.is_empty() {
            log::warn!(
                "tour is partial: {} of {} node(s) unreachable from the start",
                unvisited.len(),
                graph.node_count()
            );
        }
        let distance = tour_length(&matrix, &order);
        let node_ids = graph.nodes().iter().map(Coordinate::id).collect();

        Ok(Tour {
            order,
            node_ids,
            unvisited,
            distance,
        })
    }
}

/// Keep the first stop for every coordinate id, preserving input order.
pub(crate) fn dedup_by_coordinate(stops: &[Stop]) -> Vec<Stop> {
    let mut seen = HashSet::with_capacity(stops.len());
    let mut kept = Vec::with_capacity(stops.len());
    for stop in stops {
        if seen.insert(stop.coordinate_id()) {
            kept.push(*stop);
        } else {
            log::warn!(
                "dropping stop {} sharing coordinate {} with an earlier stop",
                stop.id(),
                stop.coordinate_id()
            );
        }
    }
    kept
}

fn start_stop(stops: &[Stop]) -> Option<&Stop> {
    let mut starts = stops.iter().filter(|stop| stop.is_start());
    let first = starts.next()?;
    let extra = starts.count();
    if extra > 0 {
        log::warn!(
            "{extra} additional start stop(s) ignored; using stop {}",
            first.id()
        );
    }
    Some(first)
}

/// Walk from `start`, always moving to the closest unvisited node.
///
/// Candidates are scanned in ascending index order and only a strictly
/// smaller distance replaces the current best, so ties resolve to the lowest
/// index. Returns the closed order and the nodes that were never reached.
pub(crate) fn nearest_neighbour(
    matrix: &DistanceMatrix,
    start: NodeIndex,
) -> (Vec<NodeIndex>, Vec<NodeIndex>) {
    let size = matrix.size();
    let mut visited = vec![false; size];
    let mut order = Vec::with_capacity(size + 1);
    if let Some(slot) = visited.get_mut(start) {
        *slot = true;
    }
    order.push(start);

    let mut current = start;
    while order.len() < size {
        let mut best: Option<(NodeIndex, Distance)> = None;
        for (candidate, (&seen, distance)) in visited.iter().zip(matrix.row(current)).enumerate() {
            if seen || !distance.is_reachable() {
                continue;
            }
            if best.is_none_or(|(_, shortest)| distance.total_cmp(&shortest).is_lt()) {
                best = Some((candidate, *distance));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        if let Some(slot) = visited.get_mut(next) {
            *slot = true;
        }
        order.push(next);
        current = next;
    }
    order.push(start);

    let unvisited = visited
        .iter()
        .enumerate()
        .filter_map(|(index, seen)| (!seen).then_some(index))
        .collect();
    (order, unvisited)
}

fn tour_length(matrix: &DistanceMatrix, order: &[NodeIndex]) -> Distance {
    order
        .windows(2)
        .filter_map(|leg| match leg {
            [from, to] => Some(matrix.get(*from, *to)),
            _ => None,
        })
        .fold(Distance::ZERO, |total, leg| total + leg)
}
