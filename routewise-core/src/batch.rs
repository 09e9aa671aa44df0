//! Accumulate stops across calls and optimize once a batch is complete.
//!
//! A [`StopBatch`] collects geocoded stops for one session. When it holds
//! [`BatchConfig::threshold`] stops it hands them to a [`RouteOptimizer`]
//! exactly once and empties itself, whether or not optimization succeeded.
//! A batch left untouched for [`BatchConfig::ttl`] is discarded on the next
//! access. Time is passed in explicitly; the batch never reads a clock.
//!
//! # Examples
//! ```
//! use std::time::Instant;
//! use routewise_core::{BatchOutcome, BatchStore, Priority, batch::NewStop};
//!
//! # fn main() -> Result<(), routewise_core::BatchError> {
//! let mut store = BatchStore::default();
//! let now = Instant::now();
//! let stops = [
//!     NewStop::new(Priority::Start, 0.0, 0.0),
//!     NewStop::new(Priority::Normal, 0.0, 1.0),
//!     NewStop::new(Priority::High, 1.0, 1.0),
//! ];
//! for stop in stops {
//!     assert!(matches!(store.add("courier-7", stop, now)?, BatchOutcome::Pending { .. }));
//! }
//! let outcome = store.add("courier-7", NewStop::new(Priority::Normal, 1.0, 0.0), now)?;
//! let BatchOutcome::Optimized(route) = outcome else {
//!     panic!("fourth stop completes the batch");
//! };
//! assert_eq!(route.stops().len(), 5);
//! assert!(store.batch("courier-7").is_none_or(|batch| batch.is_empty()));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{
    Coordinate, CoordinateId, DistanceMetric, Haversine, OptimizationError, OptimizedRoute,
    Priority, RouteOptimizer, Stop, StopId,
};

/// Thresholds governing when a batch is optimized or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Number of stops that completes a batch.
    pub threshold: usize,
    /// Inactivity period after which a batch is discarded.
    pub ttl: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threshold: 4,
            ttl: Duration::from_secs(10 * 60),
        }
    }
}

/// A geocoded stop waiting to join a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewStop {
    /// Priority of the stop.
    pub priority: Priority,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl NewStop {
    /// Describe a stop at the given position.
    #[must_use]
    pub const fn new(priority: Priority, latitude: f64, longitude: f64) -> Self {
        Self {
            priority,
            latitude,
            longitude,
        }
    }
}

/// Result of adding a stop to a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The batch is still collecting stops.
    Pending {
        /// Stops currently held.
        held: usize,
    },
    /// The batch completed and was optimized; it is now empty.
    Optimized(OptimizedRoute),
}

/// Errors returned when adding to a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// The position is not a finite WGS84 coordinate.
    #[error("location ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidLocation {
        /// Rejected latitude.
        latitude: f64,
        /// Rejected longitude.
        longitude: f64,
    },
    /// A stop at exactly this position is already in the batch.
    #[error("a stop at ({latitude}, {longitude}) is already in the batch")]
    DuplicateLocation {
        /// Duplicated latitude.
        latitude: f64,
        /// Duplicated longitude.
        longitude: f64,
    },
    /// The completed batch could not be optimized; the batch was cleared.
    #[error("failed to optimize completed batch: {0}")]
    Optimization(#[from] OptimizationError),
}

/// Stops and coordinates accumulated for one session.
#[derive(Debug, Clone, Default)]
pub struct StopBatch {
    config: BatchConfig,
    stops: Vec<Stop>,
    coordinates: Vec<Coordinate>,
    last_touched: Option<Instant>,
}

impl StopBatch {
    /// Create an empty batch.
    #[must_use]
    pub const fn new(config: BatchConfig) -> Self {
        Self {
            config,
            stops: Vec::new(),
            coordinates: Vec::new(),
            last_touched: None,
        }
    }

    /// Number of stops held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the batch holds no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops held, in insertion order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Coordinates held, in insertion order.
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Whether the batch has been idle for at least the configured TTL.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.last_touched
            .is_some_and(|touched| now.saturating_duration_since(touched) >= self.config.ttl)
    }

    /// Discard every held stop.
    pub fn clear(&mut self) {
        self.stops.clear();
        self.coordinates.clear();
        self.last_touched = None;
    }

    /// Add `stop`, optimizing and clearing the batch once it is complete.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidLocation`] for out-of-range positions,
    /// [`BatchError::DuplicateLocation`] when the exact position is already
    /// held, and [`BatchError::Optimization`] when the completed batch fails
    /// to optimize.
    pub fn add<M: DistanceMetric>(
        &mut self,
        optimizer: &RouteOptimizer<M>,
        stop: NewStop,
        now: Instant,
    ) -> Result<BatchOutcome, BatchError> {
        if self.is_expired(now) {
            log::debug!("discarding {} stop(s) from an expired batch", self.len());
            self.clear();
        }

        let (coordinate_id, stop_id) = (self.next_coordinate_id(), self.next_stop_id());
        let coordinate = Coordinate::new(coordinate_id, stop.latitude, stop.longitude);
        if !coordinate.is_valid() {
            return Err(BatchError::InvalidLocation {
                latitude: stop.latitude,
                longitude: stop.longitude,
            });
        }
        if self.holds_position(&coordinate) {
            return Err(BatchError::DuplicateLocation {
                latitude: stop.latitude,
                longitude: stop.longitude,
            });
        }

        self.coordinates.push(coordinate);
        self.stops.push(Stop::new(stop_id, coordinate_id, stop.priority));
        self.last_touched = Some(now);

        if self.len() < self.config.threshold {
            return Ok(BatchOutcome::Pending { held: self.len() });
        }

        let stops = std::mem::take(&mut self.stops);
        let coordinates = std::mem::take(&mut self.coordinates);
        self.clear();
        let route = optimizer.optimize(&stops, &coordinates)?;
        Ok(BatchOutcome::Optimized(route))
    }

    #[expect(
        clippy::float_cmp,
        reason = "duplicates are exact repeats of a geocoded position"
    )]
    fn holds_position(&self, candidate: &Coordinate) -> bool {
        self.coordinates.iter().any(|held| {
            held.latitude() == candidate.latitude() && held.longitude() == candidate.longitude()
        })
    }

    fn next_coordinate_id(&self) -> CoordinateId {
        self.coordinates
            .iter()
            .map(Coordinate::id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    fn next_stop_id(&self) -> StopId {
        self.stops
            .iter()
            .map(Stop::id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }
}

/// Independent [`StopBatch`]es keyed by session.
#[derive(Debug)]
pub struct BatchStore<M = Haversine> {
    optimizer: RouteOptimizer<M>,
    config: BatchConfig,
    sessions: HashMap<String, StopBatch>,
}

impl Default for BatchStore<Haversine> {
    fn default() -> Self {
        Self::new(RouteOptimizer::default(), BatchConfig::default())
    }
}

impl<M: DistanceMetric> BatchStore<M> {
    /// Create a store that optimizes completed batches with `optimizer`.
    #[must_use]
    pub fn new(optimizer: RouteOptimizer<M>, config: BatchConfig) -> Self {
        Self {
            optimizer,
            config,
            sessions: HashMap::new(),
        }
    }

    /// Add `stop` to the batch of `session`.
    ///
    /// # Errors
    ///
    /// Propagates [`StopBatch::add`] errors.
    pub fn add(
        &mut self,
        session: &str,
        stop: NewStop,
        now: Instant,
    ) -> Result<BatchOutcome, BatchError> {
        let config = self.config;
        let batch = self
            .sessions
            .entry(session.to_owned())
            .or_insert_with(|| StopBatch::new(config));
        batch.add(&self.optimizer, stop, now)
    }

    /// The batch held for `session`, if any.
    #[must_use]
    pub fn batch(&self, session: &str) -> Option<&StopBatch> {
        self.sessions.get(session)
    }

    /// Drop expired and empty sessions, returning how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, batch| !batch.is_empty() && !batch.is_expired(now));
        before - self.sessions.len()
    }

    /// Number of tracked sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
