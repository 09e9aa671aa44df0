//! Fixtures shared by the integration tests.

use routewise_core::{Coordinate, Priority, Stop};

/// Corners of a one-degree square at the equator, ids 1 to 4.
pub fn square_coordinates() -> Vec<Coordinate> {
    vec![
        Coordinate::new(1, 0.0, 0.0),
        Coordinate::new(2, 0.0, 1.0),
        Coordinate::new(3, 1.0, 1.0),
        Coordinate::new(4, 1.0, 0.0),
    ]
}

/// Stops 10 to 13 on the square corners; stop 10 is the start.
pub fn square_stops() -> Vec<Stop> {
    vec![
        Stop::new(10, 1, Priority::Start),
        Stop::new(11, 2, Priority::Normal),
        Stop::new(12, 3, Priority::High),
        Stop::new(13, 4, Priority::Normal),
    ]
}
