//! Error taxonomy for graph construction, sequencing and optimization.

use thiserror::Error;

use crate::CoordinateId;

/// Errors raised while wiring or querying a [`GeoGraph`](crate::GeoGraph).
///
/// Both variants indicate a programming fault in the caller: the graph is
/// built from the same coordinates it is later queried with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge or query referenced an id outside the id-to-index table.
    #[error("coordinate {0} is not part of the graph")]
    UnknownCoordinateId(CoordinateId),
    /// An edge was requested from a node to itself.
    #[error("coordinate {0} cannot be connected to itself")]
    SelfEdge(CoordinateId),
}

/// Errors returned by [`RouteSequencer::sequence`](crate::RouteSequencer::sequence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencingError {
    /// No stop carries [`Priority::Start`](crate::Priority::Start).
    #[error("no stop is marked as the start location")]
    MissingStartLocation,
    /// The graph rejected an edge or lookup.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors returned by [`RouteOptimizer::optimize`](crate::RouteOptimizer::optimize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizationError {
    /// The stop list was empty.
    #[error("at least one stop is required")]
    EmptyStops,
    /// The coordinate list was empty.
    #[error("at least one coordinate is required")]
    EmptyCoordinates,
    /// No stop carries [`Priority::Start`](crate::Priority::Start).
    #[error("no stop is marked as the start location")]
    MissingStartLocation,
    /// The graph rejected an edge or lookup.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The tour could not reach every node and partial tours are disabled.
    #[error("tour left {unvisited} location(s) unvisited")]
    IncompleteTour {
        /// Number of nodes the tour never reached.
        unvisited: usize,
    },
}

impl From<SequencingError> for OptimizationError {
    fn from(err: SequencingError) -> Self {
        match err {
            SequencingError::MissingStartLocation => Self::MissingStartLocation,
            SequencingError::Graph(source) => Self::Graph(source),
        }
    }
}
