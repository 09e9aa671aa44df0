//! Single-source shortest distances (Dijkstra).
//!
//! The priority queue holds `(distance, node)` entries and may contain stale
//! entries for a node that was improved again before being popped; those are
//! skipped when their recorded distance no longer matches the best known one.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{CoordinateId, Distance, GeoGraph, GraphError, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: Distance,
    node: NodeIndex,
}

impl Eq for QueueEntry {}

// Reversed so that `BinaryHeap` pops the smallest distance first; equal
// distances pop the lower index first.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest distance from the coordinate `source` to every node.
///
/// The result is indexed by [`NodeIndex`]. Nodes without a path from the
/// source hold [`Distance::UNREACHABLE`].
///
/// # Errors
///
/// Returns [`GraphError::UnknownCoordinateId`] when `source` is not a node of
/// `graph`.
///
/// # Examples
/// ```
/// use routewise_core::{Coordinate, GeoGraph, shortest_distances};
///
/// # fn main() -> Result<(), routewise_core::GraphError> {
/// let graph = GeoGraph::complete(&[
///     Coordinate::new(1, 0.0, 0.0),
///     Coordinate::new(2, 0.0, 1.0),
/// ]);
/// let distances = shortest_distances(&graph, 2)?;
/// assert_eq!(distances[1].km(), 0.0);
/// assert_eq!(distances[0].km(), 111.195);
/// # Ok(())
/// # }
/// ```
pub fn shortest_distances<M>(
    graph: &GeoGraph<M>,
    source: CoordinateId,
) -> Result<Vec<Distance>, GraphError> {
    let index = graph
        .index_of(source)
        .ok_or(GraphError::UnknownCoordinateId(source))?;
    Ok(shortest_distances_from(graph, index))
}

/// Shortest distance from the node at `source` to every node.
///
/// An out-of-range `source` yields an all-unreachable result.
#[must_use]
pub fn shortest_distances_from<M>(graph: &GeoGraph<M>, source: NodeIndex) -> Vec<Distance> {
    let mut best = vec![Distance::UNREACHABLE; graph.node_count()];
    let Some(origin) = best.get_mut(source) else {
        return best;
    };
    *origin = Distance::ZERO;

    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        distance: Distance::ZERO,
        node: source,
    });

    while let Some(QueueEntry { distance, node }) = queue.pop() {
        let is_stale = best
            .get(node)
            .is_none_or(|known| distance.total_cmp(known) == Ordering::Greater);
        if is_stale {
            continue;
        }
        for edge in graph.edges(node) {
            let candidate = distance + edge.weight;
            let Some(current) = best.get_mut(edge.target) else {
                continue;
            };
            if candidate.total_cmp(current) == Ordering::Less {
                *current = candidate;
                queue.push(QueueEntry {
                    distance: candidate,
                    node: edge.target,
                });
            }
        }
    }
    best
}
