//! Stops, coordinates and their priorities.
//!
//! Both collections are supplied by the caller for every optimization and
//! never mutated by the engine.

use std::fmt;
use std::str::FromStr;

use geo::Point;

/// Caller-assigned identifier of a [`Coordinate`].
pub type CoordinateId = u64;

/// Caller-assigned identifier of a [`Stop`].
pub type StopId = u64;

/// Dense index of a node inside a [`GeoGraph`](crate::GeoGraph).
pub type NodeIndex = usize;

/// A point on the globe in decimal degrees.
///
/// # Examples
/// ```
/// use routewise_core::Coordinate;
///
/// let depot = Coordinate::new(7, 51.5074, -0.1278);
/// assert_eq!(depot.id(), 7);
/// assert_eq!(depot.point().y(), 51.5074);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    id: CoordinateId,
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from an id and a latitude/longitude pair.
    #[must_use]
    pub const fn new(id: CoordinateId, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
        }
    }

    /// Identifier referenced by [`Stop::coordinate_id`].
    #[must_use]
    pub const fn id(&self) -> CoordinateId {
        self.id
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The coordinate as a `geo` point (`x` = longitude, `y` = latitude).
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.point()
    }
}

/// How urgently a stop should be served.
///
/// Only [`Priority::Start`] influences sequencing: it marks the node the tour
/// leaves from and returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    /// Origin and final destination of the tour.
    Start,
    /// A stop the caller flagged as important.
    High,
    /// Any other stop.
    Normal,
}

impl Priority {
    /// Return the priority as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use routewise_core::Priority;
    ///
    /// assert_eq!(Priority::High.as_str(), "high");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::High => "high",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Priority`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority {0:?}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            _ => Err(ParsePriorityError(s.to_owned())),
        }
    }
}

/// A delivery stop placed on a [`Coordinate`].
///
/// # Examples
/// ```
/// use routewise_core::{Priority, Stop};
///
/// let stop = Stop::new(1, 42, Priority::Start);
/// assert!(stop.is_start());
/// assert_eq!(stop.coordinate_id(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    id: StopId,
    coordinate_id: CoordinateId,
    priority: Priority,
}

impl Stop {
    /// Construct a stop on the given coordinate.
    #[must_use]
    pub const fn new(id: StopId, coordinate_id: CoordinateId, priority: Priority) -> Self {
        Self {
            id,
            coordinate_id,
            priority,
        }
    }

    /// Stop identifier.
    #[must_use]
    pub const fn id(&self) -> StopId {
        self.id
    }

    /// Identifier of the coordinate this stop sits on.
    #[must_use]
    pub const fn coordinate_id(&self) -> CoordinateId {
        self.coordinate_id
    }

    /// Stop priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether this stop is the tour origin.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self.priority, Priority::Start)
    }
}
