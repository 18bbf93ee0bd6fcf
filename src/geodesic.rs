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

//! The geodesic module contains the solution of the inverse geodesic problem:
//! the length and azimuths of the geodesic between two positions on an
//! ellipsoid.
//!
//! It uses T Vincenty's iterative method from
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//! The longitude difference on the auxiliary sphere, λ, is refined until it
//! changes by less than a tolerance. The iteration does not converge for
//! nearly antipodal positions: it then fails with
//! `Error::ConvergenceFailure` after a fixed number of iterations.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    evaluate_delta_sigma, evaluate_vincenty_a, evaluate_vincenty_b,
};
use crate::{Ellipsoid, Error, GeoPoint, Metres, Result};
use angle_sc::{Angle, Degrees, Radians};

/// The default convergence tolerance of λ, in Radians.  
/// 1e-12 radians corresponds to approximately 0.006mm on the Earth.
pub const CONVERGENCE_TOLERANCE: Radians = Radians(1e-12);

/// The default maximum number of iterations.
pub const MAX_ITERATIONS: u32 = 200;

/// The number of decimal places that geodesic distances are rounded to
/// by default: millimetres.
pub const DISTANCE_DECIMAL_PLACES: i32 = 3;

/// The limits of the inverse iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationLimits {
    /// The convergence tolerance of λ.
    pub tolerance: Radians,
    /// The maximum number of iterations.
    pub max_iterations: u32,
}

impl IterationLimits {
    /// Constructor.
    /// * `tolerance` - the convergence tolerance of λ.
    /// * `max_iterations` - the maximum number of iterations.
    #[must_use]
    pub const fn new(tolerance: Radians, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self::new(CONVERGENCE_TOLERANCE, MAX_ITERATIONS)
    }
}

/// The outcome of an iterative calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence<T> {
    /// The iteration converged to the value.
    Converged(T),
    /// The iteration did not converge within the iteration limit.
    Failed {
        /// The number of iterations performed.
        iterations: u32,
    },
}

/// The converged state of the geodesic on the auxiliary sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuxiliarySphereSolution {
    /// The longitude difference on the auxiliary sphere, λ.
    pub lambda: Radians,
    /// The great circle arc length on the auxiliary sphere, σ.
    pub sigma: Radians,
    /// The sine of σ.
    pub sin_sigma: f64,
    /// The cosine of σ.
    pub cos_sigma: f64,
    /// The square of the cosine of the azimuth at the Equator.
    pub cos_sq_alpha: f64,
    /// The cosine of twice the arc length from the Equator to the midpoint.
    pub cos_2sigma_m: f64,
    /// The number of iterations taken.
    pub iterations: u32,
}

impl AuxiliarySphereSolution {
    /// Whether the positions coincide on the auxiliary sphere.
    #[must_use]
    pub fn is_coincident(&self) -> bool {
        self.sin_sigma == 0.0
    }
}

/// Calculate Vincenty's longitude correction term, `C`.
/// * `f` - the flattening of the ellipsoid.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
pub fn calculate_c(f: f64, cos_sq_alpha: f64) -> f64 {
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// Calculate the difference between the longitude difference on the
/// auxiliary sphere, λ, and the longitude difference on the ellipsoid, `L`.
/// * `f` - the flattening of the ellipsoid.
/// * `c` - Vincenty's correction term, see [`calculate_c`].
/// * `sin_alpha` - the sine of the azimuth at the Equator.
/// * `sigma` - the arc length on the auxiliary sphere.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of `sigma`.
/// * `cos_2sigma_m` - the cosine of twice the arc length from the Equator
///   to the midpoint.
///
/// returns λ - `L` in radians.
#[must_use]
pub fn calculate_lambda_correction(
    f: f64,
    c: f64,
    sin_alpha: f64,
    sigma: Radians,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma.0
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// Solve the geodesic between a pair of parametric latitudes on the
/// auxiliary sphere by iterating λ.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points.
/// * `delta_long` - the longitude difference on the ellipsoid, `L`.
/// * `f` - the flattening of the ellipsoid.
/// * `limits` - the convergence tolerance and maximum number of iterations.
///
/// returns the converged solution or `Convergence::Failed` if λ did not
/// converge or the positions are antipodal on the auxiliary sphere.
#[must_use]
pub fn solve_auxiliary_sphere(
    beta1: Angle,
    beta2: Angle,
    delta_long: Radians,
    f: f64,
    limits: &IterationLimits,
) -> Convergence<AuxiliarySphereSolution> {
    let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
    let (sin_u2, cos_u2) = (beta2.sin().0, beta2.cos().0);

    let mut lambda = delta_long.0;
    for iteration in 1..=limits.max_iterations {
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let y = cos_u2 * sin_lambda;
        let x = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = libm::sqrt(y * y + x * x);
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

        if sin_sigma == 0.0 {
            // coincident positions have no azimuth, antipodal positions
            // have no unique geodesic
            return if 0.0 < cos_sigma {
                Convergence::Converged(AuxiliarySphereSolution {
                    lambda: Radians(lambda),
                    sigma: Radians(0.0),
                    sin_sigma,
                    cos_sigma,
                    cos_sq_alpha: 1.0,
                    cos_2sigma_m: 1.0,
                    iterations: iteration,
                })
            } else {
                Convergence::Failed {
                    iterations: iteration,
                }
            };
        }

        let sigma = Radians(libm::atan2(sin_sigma, cos_sigma));
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // equatorial geodesics have no midpoint latitude
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = calculate_c(f, cos_sq_alpha);
        let next_lambda = delta_long.0
            + calculate_lambda_correction(
                f,
                c,
                sin_alpha,
                sigma,
                sin_sigma,
                cos_sigma,
                cos_2sigma_m,
            );
        let residual = libm::fabs(next_lambda - lambda);
        lambda = next_lambda;

        if residual < limits.tolerance.0 {
            return Convergence::Converged(AuxiliarySphereSolution {
                lambda: Radians(lambda),
                sigma,
                sin_sigma,
                cos_sigma,
                cos_sq_alpha,
                cos_2sigma_m,
                iterations: iteration,
            });
        }
    }

    Convergence::Failed {
        iterations: limits.max_iterations,
    }
}

/// Normalise a bearing into the range 0° <= bearing < 360°.
/// # Examples
/// ```
/// use vincenty_geodesy::Degrees;
/// use vincenty_geodesy::geodesic::normalise_bearing;
///
/// assert_eq!(Degrees(270.0), normalise_bearing(Degrees(-90.0)));
/// assert_eq!(Degrees(90.0), normalise_bearing(Degrees(450.0)));
/// assert_eq!(Degrees(0.0), normalise_bearing(Degrees(360.0)));
/// ```
#[must_use]
pub fn normalise_bearing(bearing: Degrees) -> Degrees {
    let degrees = libm::fmod(bearing.0, 360.0);
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    // a tiny negative value rounds up to 360
    Degrees(if degrees < 360.0 { degrees } else { 0.0 })
}

/// Round a distance to a number of decimal places.
/// * `distance` - the distance.
/// * `decimal_places` - the number of decimal places, see [`DISTANCE_DECIMAL_PLACES`].
/// # Examples
/// ```
/// use vincenty_geodesy::Metres;
/// use vincenty_geodesy::geodesic::round_distance;
///
/// assert_eq!(Metres(27164.059), round_distance(Metres(27_164.058_647_922_85), 3));
/// assert_eq!(Metres(128130.85), round_distance(Metres(128_130.849_504_189_4), 3));
/// ```
#[must_use]
pub fn round_distance(distance: Metres, decimal_places: i32) -> Metres {
    let scale = 10.0_f64.powi(decimal_places);
    Metres(libm::round(distance.0 * scale) / scale)
}

/// The solution of the inverse geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicInverse {
    /// The length of the geodesic.
    distance: Metres,
    /// The azimuth at the start of the geodesic.
    initial_bearing: Degrees,
    /// The azimuth at the end of the geodesic.
    final_bearing: Degrees,
}

impl GeodesicInverse {
    /// Constructor.
    /// * `distance` - the length of the geodesic.
    /// * `initial_bearing`, `final_bearing` - the azimuths at the start and
    ///   end of the geodesic, 0° <= bearing < 360°.
    #[must_use]
    pub const fn new(distance: Metres, initial_bearing: Degrees, final_bearing: Degrees) -> Self {
        Self {
            distance,
            initial_bearing,
            final_bearing,
        }
    }

    /// The length of the geodesic.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        self.distance
    }

    /// The azimuth at the start of the geodesic.
    #[must_use]
    pub const fn initial_bearing(&self) -> Degrees {
        self.initial_bearing
    }

    /// The azimuth at the end of the geodesic.
    #[must_use]
    pub const fn final_bearing(&self) -> Degrees {
        self.final_bearing
    }

    /// A copy with the distance rounded to `decimal_places`.  
    /// Rounding makes distances comparable between runs and platforms,
    /// the bearings are unchanged.
    #[must_use]
    pub fn rounded(self, decimal_places: i32) -> Self {
        Self {
            distance: round_distance(self.distance, decimal_places),
            ..self
        }
    }
}

/// Calculate the length and azimuths of the geodesic from a converged
/// auxiliary sphere solution.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points.
/// * `solution` - the auxiliary sphere solution.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
pub fn calculate_length_and_bearings(
    beta1: Angle,
    beta2: Angle,
    solution: &AuxiliarySphereSolution,
    ellipsoid: &Ellipsoid,
) -> GeodesicInverse {
    if solution.is_coincident() {
        return GeodesicInverse::new(Metres(0.0), Degrees(0.0), Degrees(0.0));
    }

    let u_sq = solution.cos_sq_alpha * ellipsoid.ep_2();
    let a = evaluate_vincenty_a(u_sq);
    let b = evaluate_vincenty_b(u_sq);
    let delta_sigma = evaluate_delta_sigma(
        b,
        solution.sin_sigma,
        solution.cos_sigma,
        solution.cos_2sigma_m,
    );
    let distance = Metres(ellipsoid.b().0 * a * (solution.sigma.0 - delta_sigma));

    let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
    let (sin_u2, cos_u2) = (beta2.sin().0, beta2.cos().0);
    let sin_lambda = libm::sin(solution.lambda.0);
    let cos_lambda = libm::cos(solution.lambda.0);

    let initial_bearing = libm::atan2(
        cos_u2 * sin_lambda,
        cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
    );
    let final_bearing = libm::atan2(
        cos_u1 * sin_lambda,
        -sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda,
    );

    GeodesicInverse::new(
        distance,
        normalise_bearing(Degrees(initial_bearing.to_degrees())),
        normalise_bearing(Degrees(final_bearing.to_degrees())),
    )
}

/// Calculate the geodesic between a pair of positions, without rounding.
/// * `a`, `b` - the start and finish positions.
/// * `limits` - the convergence tolerance and maximum number of iterations.
///
/// # Errors
///
/// `Error::EllipsoidMismatch` if the positions are on different ellipsoids,
/// `Error::ConvergenceFailure` if the positions are (nearly) antipodal.
pub fn calculate_inverse(
    a: &GeoPoint,
    b: &GeoPoint,
    limits: &IterationLimits,
) -> Result<GeodesicInverse> {
    a.check_compatible(b)?;

    let ellipsoid = a.ellipsoid();
    let beta1 = ellipsoid.calculate_parametric_latitude(a.lat_angle());
    let beta2 = ellipsoid.calculate_parametric_latitude(b.lat_angle());
    let delta_long = Radians((b.lon().0 - a.lon().0).to_radians());

    match solve_auxiliary_sphere(beta1, beta2, delta_long, ellipsoid.f(), limits) {
        Convergence::Converged(solution) => {
            log::trace!(
                "geodesic inverse converged after {} iterations",
                solution.iterations
            );
            Ok(calculate_length_and_bearings(
                beta1, beta2, &solution, ellipsoid,
            ))
        }
        Convergence::Failed { iterations } => {
            log::warn!(
                "geodesic inverse from ({}, {}) to ({}, {}) did not converge after {} iterations",
                a.lat().0,
                a.lon().0,
                b.lat().0,
                b.lon().0,
                iterations
            );
            Err(Error::ConvergenceFailure { iterations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WGS84_ELLIPSOID;
    use angle_sc::is_within_tolerance;
    use std::sync::Arc;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(Degrees(lat), Degrees(lon)).unwrap()
    }

    #[test]
    fn test_iteration_limits_default() {
        let limits = IterationLimits::default();
        assert_eq!(CONVERGENCE_TOLERANCE, limits.tolerance);
        assert_eq!(MAX_ITERATIONS, limits.max_iterations);
    }

    #[test]
    fn test_normalise_bearing() {
        assert_eq!(Degrees(0.0), normalise_bearing(Degrees(0.0)));
        assert_eq!(Degrees(359.5), normalise_bearing(Degrees(-0.5)));
        assert_eq!(Degrees(180.0), normalise_bearing(Degrees(-180.0)));
        assert_eq!(Degrees(10.0), normalise_bearing(Degrees(730.0)));
        assert_eq!(Degrees(0.0), normalise_bearing(Degrees(-1e-15)));
    }

    #[test]
    fn test_round_distance() {
        assert_eq!(Metres(0.0), round_distance(Metres(0.0004), 3));
        assert_eq!(Metres(0.001), round_distance(Metres(0.0005), 3));
        assert_eq!(Metres(4932842.135), round_distance(Metres(4_932_842.135_222), 3));
        assert_eq!(Metres(1235.0), round_distance(Metres(1234.5), 0));
    }

    #[test]
    fn test_solve_auxiliary_sphere_same_latitude() {
        let ellipsoid = &WGS84_ELLIPSOID;
        let lat = Angle::from(Degrees(52.5));
        let beta = ellipsoid.calculate_parametric_latitude(lat);
        let delta_long = Radians((-0.4_f64).to_radians());

        let result = solve_auxiliary_sphere(
            beta,
            beta,
            delta_long,
            ellipsoid.f(),
            &IterationLimits::default(),
        );
        match result {
            Convergence::Converged(solution) => {
                assert!(solution.iterations < 10);
                assert!(!solution.is_coincident());
                // the auxiliary longitude difference is slightly larger in magnitude
                assert!(solution.lambda.0 < delta_long.0);
            }
            Convergence::Failed { .. } => panic!("expected convergence"),
        }
    }

    #[test]
    fn test_solve_auxiliary_sphere_iteration_limit() {
        let ellipsoid = &WGS84_ELLIPSOID;
        let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(Degrees(0.0)));
        let beta2 = ellipsoid.calculate_parametric_latitude(Angle::from(Degrees(0.5)));

        // converges in 181 iterations
        let delta_long = Radians(179.5_f64.to_radians());
        let limits = IterationLimits::default();
        let result = solve_auxiliary_sphere(beta1, beta2, delta_long, ellipsoid.f(), &limits);
        assert!(matches!(result, Convergence::Converged(_)));

        let limits = IterationLimits::new(CONVERGENCE_TOLERANCE, 100);
        let result = solve_auxiliary_sphere(beta1, beta2, delta_long, ellipsoid.f(), &limits);
        assert_eq!(Convergence::Failed { iterations: 100 }, result);
    }

    #[test]
    fn test_calculate_inverse_zero() {
        let a = point(52.5, 13.5);
        let result = calculate_inverse(&a, &a, &IterationLimits::default()).unwrap();
        assert_eq!(Metres(0.0), result.distance());
        assert_eq!(Degrees(0.0), result.initial_bearing());
        assert_eq!(Degrees(0.0), result.final_bearing());
    }

    #[test]
    fn test_calculate_inverse_same_latitude() {
        let a = point(52.5, 13.5);
        let b = point(52.5, 13.1);
        let result = calculate_inverse(&a, &b, &IterationLimits::default()).unwrap();
        assert!(is_within_tolerance(27_164.058_647_922_85, result.distance().0, 1e-6));
        assert!(is_within_tolerance(270.158_670_907_482_4, result.initial_bearing().0, 1e-9));
        assert!(is_within_tolerance(269.841_329_092_517_6, result.final_bearing().0, 1e-9));
        assert_eq!(Metres(27164.059), result.rounded(DISTANCE_DECIMAL_PLACES).distance());
    }

    #[test]
    fn test_calculate_inverse_meridian() {
        let a = point(52.5, 13.5);
        let b = point(52.1, 13.5);
        let result = calculate_inverse(&a, &b, &IterationLimits::default()).unwrap();
        assert!(is_within_tolerance(44_509.217_984_318_33, result.distance().0, 1e-6));
        assert_eq!(Degrees(180.0), result.initial_bearing());
        assert_eq!(Degrees(180.0), result.final_bearing());

        // due North, across the Equator
        let a = point(-1.0, 30.0);
        let b = point(1.0, 30.0);
        let result = calculate_inverse(&a, &b, &IterationLimits::default()).unwrap();
        assert_eq!(Degrees(0.0), result.initial_bearing());
        assert!(is_within_tolerance(221_148.777, result.distance().0, 1e-3));
    }

    #[test]
    fn test_calculate_inverse_equator() {
        let a = point(0.0, 0.0);
        let b = point(0.0, 1.0);
        let result = calculate_inverse(&a, &b, &IterationLimits::default()).unwrap();
        assert!(is_within_tolerance(111_319.491, result.distance().0, 1e-3));
        assert_eq!(Degrees(90.0), result.initial_bearing());
        assert_eq!(Degrees(90.0), result.final_bearing());
    }

    #[test]
    fn test_calculate_inverse_antipodal() {
        let limits = IterationLimits::default();

        let a = point(0.0, 0.0);
        let b = point(0.5, 179.7);
        assert_eq!(
            Err(Error::ConvergenceFailure {
                iterations: MAX_ITERATIONS
            }),
            calculate_inverse(&a, &b, &limits)
        );

        let b = point(0.0, 180.0);
        assert!(matches!(
            calculate_inverse(&a, &b, &limits),
            Err(Error::ConvergenceFailure { .. })
        ));

        // nearly antipodal but converges
        let b = point(0.5, 179.5);
        let result = calculate_inverse(&a, &b, &limits).unwrap();
        assert!(is_within_tolerance(19_936_288.579, result.distance().0, 1e-3));
    }

    #[test]
    fn test_calculate_inverse_ellipsoid_mismatch() {
        let other = Arc::new(Ellipsoid::new("AnotherEllipsoid", Metres(6_378_140.0), 299.2).unwrap());
        let a = point(19.820664, -155.468066);
        let b = GeoPoint::with_ellipsoid(Degrees(20.709722), Degrees(-156.253333), other).unwrap();

        assert_eq!(
            Err(Error::EllipsoidMismatch {
                first: String::from("WGS-84"),
                second: String::from("AnotherEllipsoid")
            }),
            calculate_inverse(&a, &b, &IterationLimits::default())
        );
    }
}
