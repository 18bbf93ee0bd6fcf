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

//! The distance module contains the `Distance` trait: the metric used to
//! measure lengths and deviations between `GeoPoint`s.
//!
//! `Distance` is implemented by the `Vincenty` geodesic calculator and by any
//! closure with the signature `Fn(&GeoPoint, &GeoPoint) -> Result<Metres>`.
//!
//! Deviations from a line are measured in the units of the metric: by
//! default they are the height of the triangle formed by the line and the
//! point, with sides measured by the metric itself.

use crate::{GeoPoint, Metres, Result};
use unit_sphere::{great_circle, vector};

/// A metric on `GeoPoint`s.
pub trait Distance {
    /// The distance between a pair of positions.
    /// * `a`, `b` - the positions.
    ///
    /// # Errors
    ///
    /// Any error returned by the metric, e.g. `Error::EllipsoidMismatch`.
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Metres>;

    /// The magnitude of the across track distance of `point` from the
    /// line between `start` and `end`, in the units of this metric.
    ///
    /// The default implementation is the height of the triangle whose sides
    /// are this metric's distances between the three positions, see
    /// [`triangle_height`].
    /// If `start` and `end` are at the same location, it returns the
    /// distance between `start` and `point`.
    /// * `point` - the position.
    /// * `start`, `end` - the start and end positions of the line.
    ///
    /// # Errors
    ///
    /// `Error::EllipsoidMismatch` if the positions are on different
    /// ellipsoids, or any error returned by the metric.
    fn cross_track_distance(
        &self,
        point: &GeoPoint,
        start: &GeoPoint,
        end: &GeoPoint,
    ) -> Result<Metres> {
        start.check_compatible(end)?;
        start.check_compatible(point)?;

        let to_point = self.distance(start, point)?;
        let base = self.distance(start, end)?;
        if base.0 <= 0.0 {
            return Ok(to_point);
        }
        let from_point = self.distance(point, end)?;
        Ok(triangle_height(base, to_point, from_point))
    }
}

impl<F> Distance for F
where
    F: Fn(&GeoPoint, &GeoPoint) -> Result<Metres>,
{
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Metres> {
        self(a, b)
    }
}

/// Calculate the height of a triangle above its base from the lengths of
/// its sides, using Heron's formula in the numerically stable form of
/// W Kahan, [Miscalculating Area and Angles of a Needle-like Triangle](https://people.eecs.berkeley.edu/~wkahan/Triangle.pdf).
/// * `base` - the length of the base, it must not be zero.
/// * `side_a`, `side_b` - the lengths of the other sides.
///
/// Sides that violate the triangle inequality by rounding give a zero
/// height. A `NaN` side gives a `NaN` height.
/// # Examples
/// ```
/// use vincenty_geodesy::Metres;
/// use vincenty_geodesy::distance::triangle_height;
///
/// assert_eq!(Metres(4.0), triangle_height(Metres(6.0), Metres(5.0), Metres(5.0)));
/// assert_eq!(Metres(0.0), triangle_height(Metres(2.0), Metres(1.0), Metres(1.0)));
/// ```
#[must_use]
pub fn triangle_height(base: Metres, side_a: Metres, side_b: Metres) -> Metres {
    let mut sides = [base.0, side_a.0, side_b.0];
    sides.sort_by(|x, y| y.total_cmp(x));
    let [a, b, c] = sides;

    // sixteen times the square of the area
    let product = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
    let four_area = if product < 0.0 {
        0.0
    } else {
        libm::sqrt(product)
    };
    Metres(four_area / (2.0 * base.0))
}

/// Calculate the magnitude of the across track distance of `point` from
/// the great circle through `start` and `end`, on a sphere with the
/// arithmetic mean radius of the ellipsoid.
/// * `point` - the position.
/// * `start`, `end` - the start and end positions of the great circle arc.
///
/// returns `None` if `start` and `end` are at the same location, so they do
/// not define a great circle.
///
/// # Errors
///
/// `Error::EllipsoidMismatch` if the positions are on different ellipsoids.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{Degrees, GeoPoint};
/// use vincenty_geodesy::distance::spherical_cross_track_distance;
///
/// let start = GeoPoint::new(Degrees(0.0), Degrees(0.0)).unwrap();
/// let end = GeoPoint::new(Degrees(0.0), Degrees(10.0)).unwrap();
/// let point = GeoPoint::new(Degrees(1.0), Degrees(5.0)).unwrap();
///
/// let xtd = spherical_cross_track_distance(&point, &start, &end).unwrap().unwrap();
/// assert!((xtd.0 - 111_195.08).abs() < 0.01);
/// ```
pub fn spherical_cross_track_distance(
    point: &GeoPoint,
    start: &GeoPoint,
    end: &GeoPoint,
) -> Result<Option<Metres>> {
    start.check_compatible(end)?;
    start.check_compatible(point)?;

    let a = vector::to_point(start.lat_angle(), start.lon_angle());
    let b = vector::to_point(end.lat_angle(), end.lon_angle());
    if great_circle::e2gc_distance(vector::distance(&a, &b)).0 < great_circle::MIN_VALUE {
        return Ok(None);
    }

    let azimuth = great_circle::calculate_gc_azimuth(
        start.lat_angle(),
        end.lat_angle(),
        end.lon_angle() - start.lon_angle(),
    );
    let pole = vector::calculate_pole(start.lat_angle(), start.lon_angle(), azimuth);
    let p = vector::to_point(point.lat_angle(), point.lon_angle());
    let (_, xtd) = vector::calculate_atd_and_xtd(&a, &pole, &p);

    let radius = start.ellipsoid().arithmetic_mean_radius();
    Ok(Some(Metres(libm::fabs(xtd.0) * radius.0)))
}
