// Copyright (c) 2024 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! vincenty-geodesy
//!
//! A library for performing geodesic calculations on a reference ellipsoid,
//! e.g. [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf),
//! and for simplifying polylines of geodetic positions.
//!
//! ## Geodesic calculations
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! This library solves:
//!
//! - the *inverse* problem: the length and the initial and final azimuths of
//!   the geodesic between two positions, using T Vincenty's iterative method;
//! - the *direct* problem: the destination and final azimuth of a geodesic
//!   given its start position, initial azimuth and length.
//!
//! See: [Direct and Inverse Solutions of Geodesics on the Ellipsoid](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! Vincenty's inverse method does not converge for nearly antipodal
//! positions, it then returns `Error::ConvergenceFailure`.
//!
//! ## Polyline simplification
//!
//! A `Polyline` can be simplified with the
//! [Ramer-Douglas-Peucker](https://en.wikipedia.org/wiki/Ramer%E2%80%93Douglas%E2%80%93Peucker_algorithm)
//! algorithm, removing the points that deviate from the simplified line by
//! no more than a tolerance. The deviation is measured by a `Distance`
//! metric, by default `Vincenty` in metres, and the tolerance is in the
//! units of the metric.
//!
//! ## Design
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid`.
//! A `GeoPoint` is a validated latitude and longitude on a shared `Ellipsoid`:
//! calculations between points on differently named ellipsoids fail with
//! `Error::EllipsoidMismatch`.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to perform
//!   great-circle and vector calculations;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [log](https://crates.io/crates/log) - to report convergence failures.
//!
//! ## Examples
//!
//! ```
//! use vincenty_geodesy::*;
//!
//! let berlin = GeoPoint::new(Degrees(52.5), Degrees(13.5)).unwrap();
//! let potsdam = GeoPoint::new(Degrees(52.4), Degrees(13.06)).unwrap();
//!
//! let result = calculate_inverse(&berlin, &potsdam).unwrap();
//! println!("Berlin-Potsdam distance: {:?}", result.distance());
//!
//! let destination = calculate_direct(&berlin, result.initial_bearing(), result.distance())
//!     .unwrap()
//!     .into_destination();
//! assert!(destination.has_same_location(&potsdam, Metres(0.01), &Vincenty::default()).unwrap());
//! ```

pub mod direct;
pub mod distance;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod point;
pub mod polyline;
pub mod simplify;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use icao_units::si::Metres;

pub use direct::GeodesicDirect;
pub use distance::Distance;
pub use error::{Error, Result};
pub use geodesic::{GeodesicInverse, IterationLimits};
pub use point::GeoPoint;
pub use polyline::{Line, Polyline};
pub use simplify::{simplify, Simplify, SimplifyDouglasPeucker};

use angle_sc::trig;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// The parameters of an `Ellipsoid`.
///
/// Ellipsoids are identified by name: two ellipsoids with the same name are
/// equal and compatible, whatever their parameters.
#[derive(Clone, Debug)]
pub struct Ellipsoid {
    /// The name of the ellipsoid.
    name: String,
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The inverse flattening of the ellipsoid.
    inverse_f: f64,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The arithmetic mean radius of the ellipsoid.
    mean_radius: Metres,
}

impl PartialEq for Ellipsoid {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Ellipsoid {}

impl Ellipsoid {
    /// Constructor.
    /// * `name` - the name of the `Ellipsoid`.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `inverse_flattening` - the reciprocal of the flattening of the `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if `a` or `inverse_flattening` is not
    /// finite and positive.
    ///
    /// # Examples
    /// ```
    /// use vincenty_geodesy::{Ellipsoid, Metres};
    ///
    /// let grs80 = Ellipsoid::new("GRS-80", Metres(6_378_137.0), 298.257_222_101).unwrap();
    /// assert_eq!("GRS-80", grs80.name());
    ///
    /// assert!(Ellipsoid::new("bad", Metres(0.0), 298.257_222_101).is_err());
    /// assert!(Ellipsoid::new("bad", Metres(6_378_137.0), -1.0).is_err());
    /// ```
    pub fn new(name: impl Into<String>, a: Metres, inverse_flattening: f64) -> Result<Self> {
        if !(a.0.is_finite() && 0.0 < a.0) {
            return Err(Error::InvalidParameter {
                parameter: "a",
                value: a.0,
            });
        }
        if !(inverse_flattening.is_finite() && 0.0 < inverse_flattening) {
            return Err(Error::InvalidParameter {
                parameter: "inverse_flattening",
                value: inverse_flattening,
            });
        }
        Ok(Self::from_parameters(name.into(), a, inverse_flattening))
    }

    /// Construct from parameters that have already been validated.
    fn from_parameters(name: String, a: Metres, inverse_f: f64) -> Self {
        let f = 1.0 / inverse_f;
        let one_minus_f = 1.0 - f;
        let b = Metres(a.0 * one_minus_f);
        let e_2 = f * (2.0 - f);
        Self {
            name,
            a,
            inverse_f,
            f,
            b,
            one_minus_f,
            e_2,
            ep_2: e_2 / (one_minus_f * one_minus_f),
            mean_radius: Metres(2.0_f64.mul_add(a.0, b.0) / 3.0),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_parameters(
            String::from(ellipsoid::wgs84::NAME),
            ellipsoid::wgs84::A,
            ellipsoid::wgs84::INVERSE_F,
        )
    }

    /// The name of the ellipsoid.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The inverse flattening of the ellipsoid.
    #[must_use]
    pub const fn inverse_flattening(&self) -> f64 {
        self.inverse_f
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The arithmetic mean radius of the ellipsoid: (2a + b) / 3.
    #[must_use]
    pub const fn arithmetic_mean_radius(&self) -> Metres {
        self.mean_radius
    }

    /// Whether positions on this and another ellipsoid can be used in the
    /// same calculation: i.e. whether they have the same name.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self == other
    }

    /// Calculate epsilon, the variable of the series expansions of a
    /// geodesic, from its Clairaut's constant.
    ///
    /// Epsilon is small and positive: it is zero for an equatorial geodesic
    /// and largest for a meridian.
    /// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
    /// Eqs 9 & 16.
    /// * `clairaut` - Clairaut's constant, the sine of the azimuth at the Equator.
    #[must_use]
    pub fn calculate_epsilon(&self, clairaut: trig::UnitNegRange) -> f64 {
        // Vincenty's u^2
        let k2 = self.ep_2 * ((1.0 - clairaut.0) * (1.0 + clairaut.0));
        let root = libm::sqrt(1.0 + k2) + 1.0;
        k2 / (root * root)
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        Angle::from_y_x(self.one_minus_f * lat.sin().0, lat.cos().0)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        Angle::from_y_x(beta.sin().0 / self.one_minus_f, beta.cos().0)
    }
}

/// A static instance of the WGS-84 `Ellipsoid`, shared by every `GeoPoint`
/// constructed with `GeoPoint::new`.
pub static WGS84_ELLIPSOID: Lazy<Arc<Ellipsoid>> = Lazy::new(|| Arc::new(Ellipsoid::wgs84()));

/// A geodesic calculator using T Vincenty's methods.
///
/// It holds the limits of the inverse iteration and the number of decimal
/// places that inverse distances are rounded to, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vincenty {
    /// The limits of the inverse iteration.
    limits: IterationLimits,
    /// The number of decimal places to round distances to.
    decimal_places: Option<i32>,
}

impl Default for Vincenty {
    /// The default iteration limits, rounding distances to millimetres.
    fn default() -> Self {
        Self::new(
            IterationLimits::default(),
            Some(geodesic::DISTANCE_DECIMAL_PLACES),
        )
    }
}

impl Vincenty {
    /// Constructor.
    /// * `limits` - the limits of the inverse iteration.
    /// * `decimal_places` - the decimal places to round distances to, or
    ///   `None` for unrounded distances.
    #[must_use]
    pub const fn new(limits: IterationLimits, decimal_places: Option<i32>) -> Self {
        Self {
            limits,
            decimal_places,
        }
    }

    /// Set the limits of the inverse iteration.
    #[must_use]
    pub const fn with_limits(self, limits: IterationLimits) -> Self {
        Self { limits, ..self }
    }

    /// Do not round inverse distances.
    #[must_use]
    pub const fn unrounded(self) -> Self {
        Self {
            decimal_places: None,
            ..self
        }
    }

    /// The limits of the inverse iteration.
    #[must_use]
    pub const fn limits(&self) -> IterationLimits {
        self.limits
    }

    /// The decimal places that inverse distances are rounded to.
    #[must_use]
    pub const fn decimal_places(&self) -> Option<i32> {
        self.decimal_places
    }

    /// Calculate the geodesic between a pair of positions.
    /// * `a`, `b` - the start and finish positions.
    ///
    /// # Errors
    ///
    /// `Error::EllipsoidMismatch` if the positions are on different ellipsoids,
    /// `Error::ConvergenceFailure` if the positions are (nearly) antipodal.
    pub fn inverse(&self, a: &GeoPoint, b: &GeoPoint) -> Result<GeodesicInverse> {
        let result = geodesic::calculate_inverse(a, b, &self.limits)?;
        Ok(match self.decimal_places {
            Some(decimal_places) => result.rounded(decimal_places),
            None => result,
        })
    }

    /// The azimuth at the start of the geodesic between a pair of positions.
    ///
    /// # Errors
    ///
    /// See [`Vincenty::inverse`].
    pub fn initial_bearing(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Degrees> {
        self.inverse(a, b).map(|result| result.initial_bearing())
    }

    /// The azimuth at the end of the geodesic between a pair of positions.
    ///
    /// # Errors
    ///
    /// See [`Vincenty::inverse`].
    pub fn final_bearing(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Degrees> {
        self.inverse(a, b).map(|result| result.final_bearing())
    }

    /// Calculate the destination and final azimuth of a geodesic.
    /// * `start` - the start position.
    /// * `bearing` - the azimuth at the start position.
    /// * `distance` - the length of the geodesic, negative to travel backwards.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the bearing or distance is not finite.
    #[allow(clippy::unused_self)]
    pub fn direct(
        &self,
        start: &GeoPoint,
        bearing: Degrees,
        distance: Metres,
    ) -> Result<GeodesicDirect> {
        direct::calculate_direct(start, bearing, distance)
    }

    /// Calculate the destination of a geodesic.
    ///
    /// # Errors
    ///
    /// See [`Vincenty::direct`].
    pub fn destination(
        &self,
        start: &GeoPoint,
        bearing: Degrees,
        distance: Metres,
    ) -> Result<GeoPoint> {
        self.direct(start, bearing, distance)
            .map(GeodesicDirect::into_destination)
    }
}

impl Distance for Vincenty {
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Metres> {
        self.inverse(a, b).map(|result| result.distance())
    }

    /// The across track distance on a sphere with the arithmetic mean radius
    /// of the ellipsoid, see [`distance::spherical_cross_track_distance`].
    /// If `start` and `end` are at the same location, it is the geodesic
    /// distance between `start` and `point`.
    fn cross_track_distance(
        &self,
        point: &GeoPoint,
        start: &GeoPoint,
        end: &GeoPoint,
    ) -> Result<Metres> {
        distance::spherical_cross_track_distance(point, start, end)?
            .map_or_else(|| self.distance(start, point), Ok)
    }
}

/// Calculate the distance and azimuths of the geodesic between a pair of
/// positions with the default `Vincenty` calculator: distances are rounded
/// to millimetres.
/// * `a`, `b` - the start and finish positions.
///
/// # Errors
///
/// `Error::EllipsoidMismatch` if the positions are on different ellipsoids,
/// `Error::ConvergenceFailure` if the positions are (nearly) antipodal.
///
/// # Examples
/// ```
/// use vincenty_geodesy::*;
///
/// let istanbul = GeoPoint::new(Degrees(42.0), Degrees(29.0)).unwrap();
/// let washington = GeoPoint::new(Degrees(39.0), Degrees(-77.0)).unwrap();
/// let result = calculate_inverse(&istanbul, &washington).unwrap();
///
/// println!("Istanbul-Washington initial azimuth: {:?}", result.initial_bearing());
/// println!("Istanbul-Washington distance: {:?}", result.distance());
/// println!("Istanbul-Washington final azimuth: {:?}", result.final_bearing());
/// ```
pub fn calculate_inverse(a: &GeoPoint, b: &GeoPoint) -> Result<GeodesicInverse> {
    Vincenty::default().inverse(a, b)
}

/// Calculate the destination and final azimuth of a geodesic.
/// * `start` - the start position.
/// * `bearing` - the azimuth at the start position.
/// * `distance` - the length of the geodesic, negative to travel backwards.
///
/// # Errors
///
/// `Error::InvalidParameter` if the bearing or distance is not finite.
///
/// # Examples
/// ```
/// use vincenty_geodesy::*;
///
/// let start = GeoPoint::new(Degrees(0.0), Degrees(179.999)).unwrap();
/// let result = calculate_direct(&start, Degrees(90.0), Metres(1000.0)).unwrap();
///
/// // across the antimeridian
/// assert!(result.destination().lon().0 < -179.99);
/// ```
pub fn calculate_direct(
    start: &GeoPoint,
    bearing: Degrees,
    distance: Metres,
) -> Result<GeodesicDirect> {
    direct::calculate_direct(start, bearing, distance)
}
