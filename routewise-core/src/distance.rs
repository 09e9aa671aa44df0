//! Great-circle distances between coordinates.
//!
//! Distances are kilometres rounded to metre precision. Unreachable pairs are
//! represented by [`Distance::UNREACHABLE`], which compares greater than any
//! real distance.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use geo::Point;

use crate::Coordinate;

/// Mean Earth radius used by [`Haversine`].
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// A distance in kilometres, or the unreachable marker.
///
/// # Examples
/// ```
/// use routewise_core::Distance;
///
/// let leg = Distance::from_km(1.5);
/// assert!(leg.is_reachable());
/// assert!(leg < Distance::UNREACHABLE);
/// assert!(!(leg + Distance::UNREACHABLE).is_reachable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Distance(f64);

impl Distance {
    /// Zero kilometres.
    pub const ZERO: Self = Self(0.0);

    /// Marker for a node that cannot be reached from the source.
    pub const UNREACHABLE: Self = Self(f64::INFINITY);

    /// Wrap a kilometre value.
    #[must_use]
    pub const fn from_km(km: f64) -> Self {
        Self(km)
    }

    /// The distance in kilometres; infinite when unreachable.
    #[must_use]
    pub const fn km(self) -> f64 {
        self.0
    }

    /// Whether this is a real (finite) distance.
    #[must_use]
    pub const fn is_reachable(self) -> bool {
        self.0.is_finite()
    }

    /// Total order used by the shortest-path queue and the tour scan.
    ///
    /// `NaN` never arises from [`Haversine`]; it sorts last here so that a
    /// corrupted weight can never be chosen as a nearest neighbour.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (false, false) => self.0.total_cmp(&other.0),
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
        }
    }
}

impl Add for Distance {
    type Output = Self;

    #[expect(
        clippy::float_arithmetic,
        reason = "path lengths are sums of kilometre weights"
    )]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reachable() {
            write!(f, "{:.3} km", self.0)
        } else {
            f.write_str("unreachable")
        }
    }
}

/// A symmetric cost between two coordinates.
///
/// Implementations must satisfy `distance(a, b) == distance(b, a)` and
/// return [`Distance::ZERO`] for identical positions; the graph stores one
/// weight per unordered pair.
pub trait DistanceMetric {
    /// Cost of travelling between `a` and `b`.
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        (**self).distance(a, b)
    }
}

/// Haversine great-circle distance on a sphere of radius
/// [`EARTH_RADIUS_METRES`].
///
/// # Examples
/// ```
/// use routewise_core::{Coordinate, DistanceMetric, Haversine};
///
/// let a = Coordinate::new(1, 0.0, 0.0);
/// let b = Coordinate::new(2, 0.0, 1.0);
/// assert_eq!(Haversine.distance(&a, &b).km(), 111.195);
/// assert_eq!(Haversine.distance(&a, &a).km(), 0.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        let km = haversine_km(a.point(), b.point());
        log::debug!("from {} to {} distance: {km} km", a.id(), b.id());
        Distance::from_km(km)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the Haversine formula is floating-point trigonometry"
)]
fn haversine_km(from: Point<f64>, to: Point<f64>) -> f64 {
    let phi1 = from.y().to_radians();
    let phi2 = to.y().to_radians();
    let delta_phi = (to.y() - from.y()).to_radians();
    let delta_lambda = (to.x() - from.x()).to_radians();

    // Rounding can push the term just outside [0, 1] for coincident or
    // antipodal points.
    let half_chord = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    let metres = EARTH_RADIUS_METRES * angle;
    metres.round_ties_even() / 1000.0
}
