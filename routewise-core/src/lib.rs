//! Core route-sequencing engine for RouteWise.
//!
//! Given a handful of stops (one flagged as the start) and the coordinates
//! they sit on, the engine builds a complete great-circle graph, derives an
//! all-pairs distance matrix with Dijkstra, and walks a greedy
//! nearest-neighbour tour that returns to the start.
//!
//! The crate performs no I/O. Every call builds its own graph, matrix and
//! tour, so independent calls may run in parallel without coordination.
//!
//! # Examples
//!
//! ```
//! use routewise_core::{Coordinate, Priority, RouteOptimizer, Stop};
//!
//! # fn main() -> Result<(), routewise_core::OptimizationError> {
//! let coordinates = vec![
//!     Coordinate::new(1, 0.0, 0.0),
//!     Coordinate::new(2, 0.0, 1.0),
//!     Coordinate::new(3, 1.0, 1.0),
//! ];
//! let stops = vec![
//!     Stop::new(10, 1, Priority::Start),
//!     Stop::new(11, 2, Priority::Normal),
//!     Stop::new(12, 3, Priority::High),
//! ];
//!
//! let route = RouteOptimizer::default().optimize(&stops, &coordinates)?;
//! assert_eq!(route.stops().len(), 4);
//! assert_eq!(route.stops().first(), route.stops().last());
//! assert!(route.is_complete());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod batch;
mod distance;
mod error;
pub mod graph;
mod matrix;
mod model;
mod optimizer;
mod sequencer;
pub mod shortest_path;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use batch::{BatchConfig, BatchError, BatchOutcome, BatchStore, StopBatch};
pub use distance::{Distance, DistanceMetric, EARTH_RADIUS_METRES, Haversine};
pub use error::{GraphError, OptimizationError, SequencingError};
pub use graph::{Edge, GeoGraph};
pub use matrix::DistanceMatrix;
pub use model::{Coordinate, CoordinateId, NodeIndex, ParsePriorityError, Priority, Stop, StopId};
pub use optimizer::{OptimizedRoute, OptimizerConfig, RouteOptimizer};
pub use sequencer::{RouteSequencer, Tour};
pub use shortest_path::shortest_distances;
