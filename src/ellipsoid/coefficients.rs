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

//! This module contains the series coefficients used to convert between
//! distances on the auxiliary sphere and distances on the ellipsoid.
//!
//! The inverse solution uses the `A` and `B` coefficients of
//! T Vincenty, [Direct and Inverse Solutions of Geodesics on the Ellipsoid](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
//! and the direct solution uses the series reversion given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf),
//! so that the arc length on the auxiliary sphere is evaluated without iterating.

use angle_sc::{Angle, Radians};

/// The coefficients of Vincenty's `A` polynomial in `u^2`, scaled by 16384.
const VINCENTY_A: [f64; 4] = [4096.0, -768.0, 320.0, -175.0];

/// The coefficients of Vincenty's `B` polynomial in `u^2`, scaled by 1024.
const VINCENTY_B: [f64; 4] = [256.0, -128.0, 74.0, -47.0];

/// Vincenty's scale factor `A`, Eq. 3.
/// * `u_sq` - `u^2`, the square of the second eccentricity multiplied by the
///   square of the cosine of the azimuth at the Equator.
/// # Examples
/// ```
/// use vincenty_geodesy::Ellipsoid;
/// use vincenty_geodesy::ellipsoid::coefficients::evaluate_vincenty_a;
///
/// // a meridian geodesic on the WGS 84 ellipsoid
/// let u_sq = Ellipsoid::wgs84().ep_2();
/// let a = evaluate_vincenty_a(u_sq);
/// assert!((a - 1.001_682_751_041_545_6).abs() < 1e-15);
/// ```
#[must_use]
pub fn evaluate_vincenty_a(u_sq: f64) -> f64 {
    1.0 + u_sq * evaluate_polynomial(&VINCENTY_A, u_sq) / 16384.0
}

/// Vincenty's coefficient `B`, Eq. 4.
/// * `u_sq` - see [`evaluate_vincenty_a`].
#[must_use]
pub fn evaluate_vincenty_b(u_sq: f64) -> f64 {
    u_sq * evaluate_polynomial(&VINCENTY_B, u_sq) / 1024.0
}

/// Vincenty's correction `Δσ` between the arc length on the auxiliary sphere
/// and the scaled geodesic length, Eq. 6.
/// * `b` - Vincenty's coefficient `B`.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the arc length.
/// * `cos_2sigma_m` - the cosine of twice the arc length from the Equator
///   to the midpoint of the arc.
#[allow(clippy::suboptimal_flops)]
#[must_use]
pub fn evaluate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_2sigma_m_2 = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m_2)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m_2)))
}

/// The coefficients of `(1 - eps) A1 - 1` as a polynomial in `eps^2`,
/// after the leading `eps`, CFF Karney Eq. 17.
const KARNEY_A1: [f64; 3] = [1.0 / 4.0, 1.0 / 64.0, 1.0 / 256.0];

/// The Fourier coefficients `C1[l]` of `B1`, CFF Karney Eq. 18.
/// Row `l` holds `C1[l] / eps^l` as a polynomial in `eps^2`.
const KARNEY_C1: [&[f64]; 7] = [
    &[],
    &[-1.0 / 2.0, 3.0 / 16.0, -1.0 / 32.0],
    &[-1.0 / 16.0, 1.0 / 32.0, -9.0 / 2048.0],
    &[-1.0 / 48.0, 3.0 / 256.0],
    &[-5.0 / 512.0, 3.0 / 512.0],
    &[-7.0 / 1280.0],
    &[-7.0 / 2048.0],
];

/// The Fourier coefficients `C1'[l]` of the reverted series `B1'`,
/// CFF Karney Eq. 21, laid out as [`KARNEY_C1`].
const KARNEY_C1P: [&[f64]; 6] = [
    &[],
    &[1.0 / 2.0, -9.0 / 32.0, 205.0 / 1536.0],
    &[5.0 / 16.0, -37.0 / 96.0],
    &[29.0 / 96.0, -75.0 / 128.0],
    &[539.0 / 1536.0],
    &[3467.0 / 7680.0],
];

/// The scale factor `A1` minus one.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use angle_sc::trig;
/// use vincenty_geodesy::Ellipsoid;
/// use vincenty_geodesy::ellipsoid::coefficients::evaluate_a1;
///
/// // a meridian geodesic on the WGS 84 ellipsoid
/// let eps = Ellipsoid::wgs84().calculate_epsilon(trig::UnitNegRange(0.0));
/// let a1 = evaluate_a1(eps);
/// assert!((a1 - 0.001_682_751_041_638_78).abs() < 1e-15);
/// ```
#[must_use]
pub fn evaluate_a1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    eps2.mul_add(evaluate_polynomial(&KARNEY_A1, eps2), eps) / (1.0 - eps)
}

/// Evaluate the Fourier coefficients of a series from rows of polynomials
/// in `eps^2`: `coeffs[l] = eps^l * P_l(eps^2)`.
fn evaluate_fourier_coefficients<const N: usize>(rows: &[&[f64]; N], eps: f64) -> [f64; N] {
    let eps2 = eps * eps;
    let mut eps_l = 1.0;
    core::array::from_fn(|l| {
        let coeff = eps_l * evaluate_polynomial(rows[l], eps2);
        eps_l *= eps;
        coeff
    })
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`,
/// `C1[0]` is zero.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1(eps: f64) -> [f64; 7] {
    evaluate_fourier_coefficients(&KARNEY_C1, eps)
}

/// The coefficients `C1'[l]` of the reverted series `B1'`,
/// `C1'[0]` is zero.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1p(eps: f64) -> [f64; 6] {
    evaluate_fourier_coefficients(&KARNEY_C1P, eps)
}

/// Evaluate a polynomial in `x` by Horner's method.
/// * `coeffs` - the polynomial coefficients, lowest order first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |result, coeff| result.mul_add(x, *coeff))
}

/// Sum the sine series `c[1] sin(2 angle) + c[2] sin(4 angle) + ...`
/// with Clenshaw's recurrence.
/// * `coeffs` - the series coefficients, `coeffs[0]` is not used.
/// * `angle` - the Angle.
#[must_use]
pub fn sin_cos_series(coeffs: &[f64], angle: Angle) -> Radians {
    let angle2x = angle.double();
    let two_cos = 2.0 * angle2x.cos().0;

    // b[k] = c[k] + 2 cos(2 angle) b[k + 1] - b[k + 2]
    let (b1, _) = coeffs
        .iter()
        .skip(1)
        .rev()
        .fold((0.0, 0.0), |(b1, b2), coeff| {
            (two_cos.mul_add(b1, coeff - b2), b1)
        });
    Radians(angle2x.sin().0 * b1)
}
