//! Input validation and mapping of tours back to caller stops.

use std::collections::HashMap;

use crate::sequencer::dedup_by_coordinate;
use crate::{
    Coordinate, Distance, DistanceMetric, Haversine, OptimizationError, RouteSequencer, Stop,
};

/// Behaviour switches for [`RouteOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Return partial tours instead of failing with
    /// [`OptimizationError::IncompleteTour`].
    pub allow_partial: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            allow_partial: true,
        }
    }
}

/// Stops in visiting order together with tour diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedRoute {
    stops: Vec<Stop>,
    distance: Distance,
    unvisited: usize,
}

impl OptimizedRoute {
    /// Stops in visiting order; the start stop is first and last.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Consume the route, returning the ordered stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    /// Closed tour length in kilometres.
    #[must_use]
    pub const fn distance(&self) -> Distance {
        self.distance
    }

    /// Number of locations the tour could not reach.
    #[must_use]
    pub const fn unvisited(&self) -> usize {
        self.unvisited
    }

    /// Whether every location is on the route.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unvisited == 0
    }
}

/// Validates input, sequences the tour and maps it back to [`Stop`]s.
///
/// # Examples
/// ```
/// use routewise_core::{OptimizationError, RouteOptimizer};
///
/// let err = RouteOptimizer::default().optimize(&[], &[]).unwrap_err();
/// assert_eq!(err, OptimizationError::EmptyStops);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteOptimizer<M = Haversine> {
    sequencer: RouteSequencer<M>,
    config: OptimizerConfig,
}

impl RouteOptimizer<Haversine> {
    /// Optimizer using great-circle distances and the given configuration.
    #[must_use]
    pub const fn new(config: OptimizerConfig) -> Self {
        Self {
            sequencer: RouteSequencer::new(),
            config,
        }
    }
}

impl Default for RouteOptimizer<Haversine> {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl<M: DistanceMetric> RouteOptimizer<M> {
    /// Optimizer using a custom symmetric metric.
    #[must_use]
    pub const fn with_metric(metric: M, config: OptimizerConfig) -> Self {
        Self {
            sequencer: RouteSequencer::with_metric(metric),
            config,
        }
    }

    /// Order `stops` into a closed tour over `coordinates`.
    ///
    /// The first and last returned stops are the start stop. Tour positions
    /// whose coordinate has no stop are dropped from the output.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError::EmptyStops`] or
    /// [`OptimizationError::EmptyCoordinates`] for empty input,
    /// [`OptimizationError::MissingStartLocation`] when no stop is the start,
    /// [`OptimizationError::Graph`] when the start references an unknown
    /// coordinate, and [`OptimizationError::IncompleteTour`] when the tour is
    /// partial and [`OptimizerConfig::allow_partial`] is off.
    pub fn optimize(
        &self,
        stops: &[Stop],
        coordinates: &[Coordinate],
    ) -> Result<OptimizedRoute, OptimizationError> {
        if stops.is_empty() {
            return Err(OptimizationError::EmptyStops);
        }
        if coordinates.is_empty() {
            return Err(OptimizationError::EmptyCoordinates);
        }

        let tour = self.sequencer.sequence(stops, coordinates)?;
        let unvisited = tour.unvisited().len();
        if unvisited > 0 && !self.config.allow_partial {
            return Err(OptimizationError::IncompleteTour { unvisited });
        }

        let by_coordinate: HashMap<_, _> = dedup_by_coordinate(stops)
            .into_iter()
            .map(|stop| (stop.coordinate_id(), stop))
            .collect();
        let ordered: Vec<Stop> = tour
            .coordinate_ids()
            .filter_map(|id| {
                let stop = by_coordinate.get(&id).copied();
                if stop.is_none() {
                    log::warn!("coordinate {id} has no stop; leaving it off the route");
                }
                stop
            })
            .collect();

        log::info!(
            "optimized {} stop(s) over {} location(s): {}",
            by_coordinate.len(),
            tour.order().len().saturating_sub(1),
            tour.distance()
        );

        Ok(OptimizedRoute {
            stops: ordered,
            distance: tour.distance(),
            unvisited,
        })
    }
}
