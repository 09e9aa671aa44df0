//! Fixtures shared by unit, behaviour and downstream tests.

use crate::{Coordinate, Distance, DistanceMetric, Priority, Stop};

/// Corners of a one-degree square at the equator: ids 1 to 4, visiting
/// order `(0,0)`, `(0,1)`, `(1,1)`, `(1,0)`.
#[must_use]
pub fn square_coordinates() -> Vec<Coordinate> {
    vec![
        Coordinate::new(1, 0.0, 0.0),
        Coordinate::new(2, 0.0, 1.0),
        Coordinate::new(3, 1.0, 1.0),
        Coordinate::new(4, 1.0, 0.0),
    ]
}

/// One stop per [`square_coordinates`] corner; stop `n` sits on coordinate
/// `n` and stop 1 is the start.
#[must_use]
pub fn square_stops() -> Vec<Stop> {
    vec![
        Stop::new(1, 1, Priority::Start),
        Stop::new(2, 2, Priority::Normal),
        Stop::new(3, 3, Priority::High),
        Stop::new(4, 4, Priority::Normal),
    ]
}

/// Length of the closed square tour under [`Haversine`](crate::Haversine).
pub const SQUARE_TOUR_KM: f64 = 444.763;

/// Metric returning one kilometre between distinct ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitMetric;

impl DistanceMetric for UnitMetric {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        if a.id() == b.id() {
            Distance::ZERO
        } else {
            Distance::from_km(1.0)
        }
    }
}

/// Metric that splits ids into two groups at `boundary`; pairs across the
/// boundary are unreachable.
#[derive(Debug, Clone, Copy)]
pub struct SplitMetric {
    /// Highest id in the first group.
    pub boundary: u64,
}

impl DistanceMetric for SplitMetric {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        if (a.id() <= self.boundary) != (b.id() <= self.boundary) {
            Distance::UNREACHABLE
        } else {
            UnitMetric.distance(a, b)
        }
    }
}
