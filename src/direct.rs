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

//! The direct module contains the solution of the direct geodesic problem:
//! the destination and final azimuth of a geodesic given its start position,
//! initial azimuth and length.
//!
//! The arc length on the auxiliary sphere is evaluated directly from the
//! length using the series reversion of CFF Karney,
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) Eqs 20 & 21,
//! so no iteration is required. The destination is then calculated with
//! T Vincenty's forward equations.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    evaluate_a1, evaluate_coeffs_c1, evaluate_coeffs_c1p, sin_cos_series,
};
use crate::geodesic::{calculate_c, calculate_lambda_correction, normalise_bearing};
use crate::{Error, GeoPoint, Metres, Result};
use angle_sc::{trig, Angle, Degrees, Radians};
use std::sync::Arc;
use unit_sphere::great_circle;

/// Wrap a longitude into the range -180° < longitude <= 180°.
/// # Examples
/// ```
/// use vincenty_geodesy::Degrees;
/// use vincenty_geodesy::direct::wrap_longitude;
///
/// assert_eq!(Degrees(-170.0), wrap_longitude(Degrees(190.0)));
/// assert_eq!(Degrees(180.0), wrap_longitude(Degrees(-180.0)));
/// assert_eq!(Degrees(170.0), wrap_longitude(Degrees(-190.0)));
/// ```
#[must_use]
pub fn wrap_longitude(lon: Degrees) -> Degrees {
    let degrees = libm::fmod(lon.0 + 180.0, 360.0);
    let degrees = if degrees <= 0.0 {
        degrees + 360.0
    } else {
        degrees
    };
    Degrees(degrees - 180.0)
}

/// Convert a geodesic length on the ellipsoid to a great circle arc length
/// on the auxiliary sphere.
/// * `sigma1` - the arc length from the Northbound Equator crossing to the
///   start of the geodesic.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// * `distance` - the geodesic length.
/// * `b` - the Semiminor axis of the ellipsoid.
///
/// returns the great circle arc length on the auxiliary sphere.
#[must_use]
pub fn calculate_arc_length(sigma1: Angle, eps: f64, distance: Metres, b: Metres) -> Radians {
    if libm::fabs(distance.0) < great_circle::MIN_VALUE {
        Radians(0.0)
    } else {
        let a1 = evaluate_a1(eps) + 1.0;
        let c1 = evaluate_coeffs_c1(eps);
        let b11 = sin_cos_series(&c1, sigma1);

        let tau12 = Radians(distance.0 / (b.0 * a1));
        let tau_sum = Angle::from(b11 + tau12);
        let c1p = evaluate_coeffs_c1p(eps);
        let b12 = sin_cos_series(&c1p, sigma1 + tau_sum);

        // not `Radians` addition: that wraps and sigma may exceed π
        Radians(tau12.0 + b12.0 + b11.0)
    }
}

/// The solution of the direct geodesic problem.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodesicDirect {
    /// The position at the end of the geodesic.
    destination: GeoPoint,
    /// The azimuth at the end of the geodesic.
    final_bearing: Degrees,
}

impl GeodesicDirect {
    /// Constructor.
    /// * `destination` - the position at the end of the geodesic.
    /// * `final_bearing` - the azimuth at the end of the geodesic.
    #[must_use]
    pub const fn new(destination: GeoPoint, final_bearing: Degrees) -> Self {
        Self {
            destination,
            final_bearing,
        }
    }

    /// The position at the end of the geodesic.
    #[must_use]
    pub const fn destination(&self) -> &GeoPoint {
        &self.destination
    }

    /// The azimuth at the end of the geodesic, 0° <= bearing < 360°.
    #[must_use]
    pub const fn final_bearing(&self) -> Degrees {
        self.final_bearing
    }

    /// Take the destination position.
    #[must_use]
    pub fn into_destination(self) -> GeoPoint {
        self.destination
    }
}

/// Calculate the destination of a geodesic.
/// * `start` - the start position.
/// * `bearing` - the azimuth at the start position, any value in degrees.
/// * `distance` - the length of the geodesic. A negative distance travels
///   in the opposite direction: `bearing + 180°` for `|distance|`.
///
/// # Errors
///
/// `Error::InvalidParameter` if the bearing or distance is not finite.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{Degrees, GeoPoint, Metres};
/// use vincenty_geodesy::direct::calculate_direct;
/// use angle_sc::is_within_tolerance;
///
/// // T Vincenty's example: Flinders Peak to Buninyong
/// let flinders_peak = GeoPoint::new(Degrees(-37.95103342), Degrees(144.42486789)).unwrap();
/// let result = calculate_direct(&flinders_peak, Degrees(306.86816), Metres(54_972.271)).unwrap();
///
/// let buninyong = result.destination();
/// assert!(is_within_tolerance(-37.652_821_137, buninyong.lat().0, 1e-8));
/// assert!(is_within_tolerance(143.926_495_535, buninyong.lon().0, 1e-8));
/// assert!(is_within_tolerance(307.173_631_422, result.final_bearing().0, 1e-8));
/// ```
pub fn calculate_direct(
    start: &GeoPoint,
    bearing: Degrees,
    distance: Metres,
) -> Result<GeodesicDirect> {
    if !bearing.0.is_finite() {
        return Err(Error::InvalidParameter {
            parameter: "bearing",
            value: bearing.0,
        });
    }
    if !distance.0.is_finite() {
        return Err(Error::InvalidParameter {
            parameter: "distance",
            value: distance.0,
        });
    }

    // a negative distance is a positive distance in the opposite direction
    let (bearing, distance) = if distance.0 < 0.0 {
        (Degrees(bearing.0 + 180.0), Metres(-distance.0))
    } else {
        (bearing, distance)
    };
    let alpha1 = Angle::from(normalise_bearing(bearing));
    let (sin_alpha1, cos_alpha1) = (alpha1.sin().0, alpha1.cos().0);

    let ellipsoid = start.ellipsoid();
    let f = ellipsoid.f();
    let beta1 = ellipsoid.calculate_parametric_latitude(start.lat_angle());
    let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);

    // the arc length from the Equator crossing and Clairaut's constant
    let sigma1 = Angle::from_y_x(sin_u1, cos_u1 * cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);
    let eps = ellipsoid.calculate_epsilon(trig::UnitNegRange(sin_alpha));

    let sigma = calculate_arc_length(sigma1, eps, distance, ellipsoid.b());
    let sigma_angle = Angle::from(sigma);
    let (sin_sigma, cos_sigma) = (sigma_angle.sin().0, sigma_angle.cos().0);
    let cos_2sigma_m = (sigma1.double() + sigma_angle).cos().0;

    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let beta2 = Angle::from_y_x(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        libm::sqrt(sin_alpha * sin_alpha + x * x),
    );
    let lat2 = ellipsoid.calculate_geodetic_latitude(beta2);

    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );
    let c = calculate_c(f, cos_sq_alpha);
    let delta_long = lambda
        - calculate_lambda_correction(
            f,
            c,
            sin_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );
    let lon2 = wrap_longitude(Degrees(start.lon().0 + delta_long.to_degrees()));

    let final_bearing = normalise_bearing(Degrees(libm::atan2(sin_alpha, -x).to_degrees()));

    let destination = GeoPoint::with_ellipsoid(Degrees::from(lat2), lon2, Arc::clone(ellipsoid))?;
    Ok(GeodesicDirect::new(destination, final_bearing))
}
