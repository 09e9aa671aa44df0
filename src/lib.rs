//! Facade crate for the RouteWise sequencing engine.
//!
//! This crate re-exports the core domain types. Batch accumulation lives
//! under [`batch`]; fixtures for downstream tests are available behind the
//! `test-support` feature.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use routewise_core::{
    BatchConfig, BatchError, BatchOutcome, BatchStore, Coordinate, CoordinateId, Distance,
    DistanceMatrix, DistanceMetric, EARTH_RADIUS_METRES, GeoGraph, GraphError, Haversine,
    NodeIndex, OptimizationError, OptimizedRoute, OptimizerConfig, Priority, RouteOptimizer,
    RouteSequencer, SequencingError, Stop, StopBatch, StopId, Tour, shortest_distances,
};

pub use routewise_core::batch;

#[cfg(feature = "test-support")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub use routewise_core::test_support;
