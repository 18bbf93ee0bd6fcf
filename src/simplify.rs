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

//! The simplify module contains the
//! [Ramer-Douglas-Peucker](https://en.wikipedia.org/wiki/Ramer%E2%80%93Douglas%E2%80%93Peucker_algorithm)
//! polyline simplification algorithm.
//!
//! The deviation of a point from a line is measured by the
//! `cross_track_distance` of a `Distance` metric, so the same algorithm
//! simplifies with geodesic, spherical or planar metrics and the tolerance
//! is in the units of the metric.
//! Ranges are processed from an explicit work stack, so long polylines do
//! not overflow the call stack.

use crate::{Distance, Error, GeoPoint, Metres, Polyline, Result, Vincenty};

/// Find the interior point of the range `start..=end` that deviates most
/// from the line between `points[start]` and `points[end]`.
///
/// returns the index of the point and its deviation, or
/// `Error::InvalidParameter` if the metric returns a deviation that is
/// negative or not finite.
fn find_farthest<D: Distance + ?Sized>(
    points: &[GeoPoint],
    start: usize,
    end: usize,
    metric: &D,
) -> Result<(usize, f64)> {
    let mut farthest = (start + 1, f64::NEG_INFINITY);
    for (index, point) in points.iter().enumerate().take(end).skip(start + 1) {
        let deviation = metric.cross_track_distance(point, &points[start], &points[end])?;
        if !deviation.0.is_finite() || deviation.0 < 0.0 {
            return Err(Error::InvalidParameter {
                parameter: "deviation",
                value: deviation.0,
            });
        }
        if deviation.0 > farthest.1 {
            farthest = (index, deviation.0);
        }
    }
    Ok(farthest)
}

/// Calculate the indices of the points kept by simplifying `points`.
/// * `points` - the points to simplify.
/// * `tolerance` - the maximum deviation of a removed point from the
///   simplified line.
/// * `metric` - the metric used to measure deviations.
///
/// returns the indices of the kept points in ascending order.
///
/// # Errors
///
/// `Error::InvalidParameter` if `tolerance` is NaN or the `metric` returns
/// a negative or non-finite deviation, or any error returned by the `metric`.
pub fn simplify_indices<D: Distance + ?Sized>(
    points: &[GeoPoint],
    tolerance: Metres,
    metric: &D,
) -> Result<Vec<usize>> {
    if tolerance.0.is_nan() {
        return Err(Error::InvalidParameter {
            parameter: "tolerance",
            value: tolerance.0,
        });
    }

    let n = points.len();
    if n < 3 {
        return Ok((0..n).collect());
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end - start <= 1 {
            continue;
        }

        let (index, deviation) = find_farthest(points, start, end, metric)?;
        if deviation > tolerance.0 {
            keep[index] = true;
            stack.push((index, end));
            stack.push((start, index));
        }
    }

    Ok(keep
        .iter()
        .enumerate()
        .filter_map(|(index, &kept)| kept.then_some(index))
        .collect())
}

/// Simplify a sequence of points with the Ramer-Douglas-Peucker algorithm.
///
/// The first and last points are always kept. Sequences of fewer than three
/// points are returned unchanged. A point is only removed if it deviates from
/// the simplified line by no more than `tolerance`, so a negative tolerance
/// removes no points.
/// * `points` - the points to simplify.
/// * `tolerance` - the maximum deviation of a removed point from the
///   simplified line.
/// * `metric` - the metric used to measure deviations.
///
/// returns the kept points, in their original order.
///
/// # Errors
///
/// `Error::InvalidParameter` if `tolerance` is NaN or the `metric` returns
/// a negative or non-finite deviation, or any error returned by the `metric`.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{simplify, Degrees, GeoPoint, Metres, Vincenty};
///
/// let points = [(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]
///     .iter()
///     .map(|&(lat, lon)| GeoPoint::new(Degrees(lat), Degrees(lon)).unwrap())
///     .collect::<Vec<_>>();
///
/// let result = simplify(&points, Metres(1_500_000.0), &Vincenty::default()).unwrap();
/// assert_eq!(vec![points[0].clone(), points[2].clone()], result);
///
/// let result = simplify(&points, Metres(1_000.0), &Vincenty::default()).unwrap();
/// assert_eq!(points, result);
/// ```
pub fn simplify<D: Distance + ?Sized>(
    points: &[GeoPoint],
    tolerance: Metres,
    metric: &D,
) -> Result<Vec<GeoPoint>> {
    let indices = simplify_indices(points, tolerance, metric)?;
    log::debug!(
        "simplified {} points to {} with tolerance {}",
        points.len(),
        indices.len(),
        tolerance.0
    );
    Ok(indices
        .into_iter()
        .map(|index| points[index].clone())
        .collect())
}

/// A `Polyline` simplification algorithm.
pub trait Simplify {
    /// Simplify a `Polyline`.
    ///
    /// # Errors
    ///
    /// Any error returned by the algorithm.
    fn simplify(&self, polyline: &Polyline) -> Result<Polyline>;
}

/// Simplifies a `Polyline` with the Ramer-Douglas-Peucker algorithm.
///
/// # Examples
/// ```
/// use vincenty_geodesy::*;
///
/// let polyline: Polyline = [(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]
///     .iter()
///     .map(|&(lat, lon)| GeoPoint::new(Degrees(lat), Degrees(lon)).unwrap())
///     .collect();
///
/// let processor = SimplifyDouglasPeucker::new(Metres(1_500_000.0));
/// let result = processor.simplify(&polyline).unwrap();
/// assert_eq!(2, result.number_of_points());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifyDouglasPeucker<D = Vincenty> {
    /// The maximum deviation of a removed point from the simplified line.
    tolerance: Metres,
    /// The metric used to measure deviations.
    metric: D,
}

impl SimplifyDouglasPeucker {
    /// Construct a processor that measures deviations with the default
    /// `Vincenty` metric.
    /// * `tolerance` - the maximum deviation of a removed point.
    #[must_use]
    pub fn new(tolerance: Metres) -> Self {
        Self::with_metric(tolerance, Vincenty::default())
    }
}

impl<D: Distance> SimplifyDouglasPeucker<D> {
    /// Construct a processor with a metric.
    /// * `tolerance` - the maximum deviation of a removed point.
    /// * `metric` - the metric used to measure deviations.
    #[must_use]
    pub const fn with_metric(tolerance: Metres, metric: D) -> Self {
        Self { tolerance, metric }
    }

    /// The maximum deviation of a removed point from the simplified line,
    /// in the units of the metric.
    #[must_use]
    pub const fn tolerance(&self) -> Metres {
        self.tolerance
    }

    /// The metric used to measure deviations.
    #[must_use]
    pub const fn metric(&self) -> &D {
        &self.metric
    }
}

impl<D: Distance> Simplify for SimplifyDouglasPeucker<D> {
    fn simplify(&self, polyline: &Polyline) -> Result<Polyline> {
        simplify(polyline.points(), self.tolerance, &self.metric).map(Polyline::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Degrees, Ellipsoid};
    use std::sync::Arc;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(Degrees(lat), Degrees(lon)).unwrap()
    }

    fn points(coordinates: &[(f64, f64)]) -> Vec<GeoPoint> {
        coordinates
            .iter()
            .map(|&(lat, lon)| point(lat, lon))
            .collect()
    }

    /// Treats latitude and longitude as Cartesian coordinates.
    struct Planar;

    impl Distance for Planar {
        fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> Result<Metres> {
            Ok(Metres(libm::hypot(
                b.lat().0 - a.lat().0,
                b.lon().0 - a.lon().0,
            )))
        }

        fn cross_track_distance(
            &self,
            point: &GeoPoint,
            start: &GeoPoint,
            end: &GeoPoint,
        ) -> Result<Metres> {
            let (x1, y1) = (start.lat().0, start.lon().0);
            let (dx, dy) = (end.lat().0 - x1, end.lon().0 - y1);
            let length = libm::hypot(dx, dy);
            if length < f64::EPSILON {
                return self.distance(start, point);
            }
            let cross = dx * (point.lon().0 - y1) - dy * (point.lat().0 - x1);
            Ok(Metres(libm::fabs(cross) / length))
        }
    }

    #[test]
    fn test_simplify_three_points() {
        let vincenty = Vincenty::default();
        let input = points(&[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);
        let endpoints = vec![input[0].clone(), input[2].clone()];

        assert_eq!(endpoints, simplify(&input, Metres(1_500_000.0), &vincenty).unwrap());
        assert_eq!(endpoints, simplify(&input, Metres(1_200_000.0), &vincenty).unwrap());
        assert_eq!(input, simplify(&input, Metres(1_000.0), &vincenty).unwrap());
        assert_eq!(input, simplify(&input, Metres(0.0), &vincenty).unwrap());
        assert_eq!(input, simplify(&input, Metres(-1.0), &vincenty).unwrap());
    }

    #[test]
    fn test_simplify_four_points() {
        let vincenty = Vincenty::default();
        let input = points(&[(50.0, 10.0), (40.0, 20.0), (30.0, 10.0), (20.0, 30.0)]);

        assert_eq!(
            vec![0, 3],
            simplify_indices(&input, Metres(1_300_000.0), &vincenty).unwrap()
        );
        assert_eq!(
            vec![0, 2, 3],
            simplify_indices(&input, Metres(1_000_000.0), &vincenty).unwrap()
        );
        assert_eq!(
            vec![0, 1, 2, 3],
            simplify_indices(&input, Metres(500_000.0), &vincenty).unwrap()
        );
    }

    #[test]
    fn test_simplify_short_inputs() {
        let vincenty = Vincenty::default();
        assert!(simplify(&[], Metres(1.0), &vincenty).unwrap().is_empty());

        let input = points(&[(10.0, 10.0)]);
        assert_eq!(input, simplify(&input, Metres(1e9), &vincenty).unwrap());

        let input = points(&[(10.0, 10.0), (10.0, 10.0)]);
        assert_eq!(input, simplify(&input, Metres(1e9), &vincenty).unwrap());
    }

    #[test]
    fn test_simplify_collinear_points() {
        // points on a meridian do not deviate from it
        let vincenty = Vincenty::default();
        let input = points(&[(10.0, 10.0), (15.0, 10.0), (20.0, 10.0), (30.0, 10.0)]);
        assert_eq!(
            vec![input[0].clone(), input[3].clone()],
            simplify(&input, Metres(0.001), &vincenty).unwrap()
        );
        assert_eq!(input, simplify(&input, Metres(-0.001), &vincenty).unwrap());
    }

    #[test]
    fn test_simplify_closed_ring() {
        // the first and last points are the same, so the deviation is the
        // distance from the first point
        let vincenty = Vincenty::default();
        let input = points(&[(10.0, 10.0), (10.0, 11.0), (11.0, 11.0), (10.0, 10.0)]);
        let result = simplify_indices(&input, Metres(1_000.0), &vincenty).unwrap();
        assert_eq!(vec![0, 1, 2, 3], result);

        let result = simplify_indices(&input, Metres(1_000_000.0), &vincenty).unwrap();
        assert_eq!(vec![0, 3], result);
    }

    #[test]
    fn test_simplify_planar_metric() {
        let input = points(&[(0.0, 0.0), (0.5, 0.6), (1.0, 1.0), (1.6, 0.5), (2.0, 0.0)]);
        assert_eq!(
            vec![0, 2, 4],
            simplify_indices(&input, Metres(0.2), &Planar).unwrap()
        );
        assert_eq!(
            vec![0, 4],
            simplify_indices(&input, Metres(1.0), &Planar).unwrap()
        );
        assert_eq!(
            vec![0, 1, 2, 3, 4],
            simplify_indices(&input, Metres(0.05), &Planar).unwrap()
        );
    }

    #[test]
    fn test_simplify_closure_metric() {
        let metric = |a: &GeoPoint, b: &GeoPoint| Vincenty::default().unrounded().distance(a, b);
        let input = points(&[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);
        assert_eq!(
            vec![0, 2],
            simplify_indices(&input, Metres(1_500_000.0), &metric).unwrap()
        );
    }

    #[test]
    fn test_simplify_non_metre_closure_metrics() {
        let input = points(&[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);

        // geodesic kilometres: the middle point deviates by about 1040 km
        let vincenty = Vincenty::default().unrounded();
        let kilometres =
            |a: &GeoPoint, b: &GeoPoint| vincenty.distance(a, b).map(|d| Metres(d.0 / 1000.0));
        assert_eq!(
            vec![0, 2],
            simplify_indices(&input, Metres(1_500.0), &kilometres).unwrap()
        );
        assert_eq!(
            vec![0, 1, 2],
            simplify_indices(&input, Metres(1_000.0), &kilometres).unwrap()
        );

        // degrees as Cartesian coordinates: the middle point deviates by 10°
        let degrees = |a: &GeoPoint, b: &GeoPoint| Planar.distance(a, b);
        assert_eq!(
            vec![0, 2],
            simplify_indices(&input, Metres(50.0), &degrees).unwrap()
        );
        assert_eq!(
            vec![0, 1, 2],
            simplify_indices(&input, Metres(9.5), &degrees).unwrap()
        );
    }

    #[test]
    fn test_simplify_invalid_deviation() {
        let input = points(&[(10.0, 10.0), (20.0, 20.0), (25.0, 15.0), (30.0, 10.0)]);

        let nan = |_: &GeoPoint, _: &GeoPoint| Ok(Metres(f64::NAN));
        let result = simplify_indices(&input, Metres(1.0), &nan);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                parameter: "deviation",
                ..
            })
        ));

        let infinite = |_: &GeoPoint, _: &GeoPoint| Ok(Metres(f64::INFINITY));
        assert!(simplify(&input, Metres(1.0), &infinite).is_err());

        let negative = |_: &GeoPoint, _: &GeoPoint| Ok(Metres(-1.0));
        assert_eq!(
            Err(Error::InvalidParameter {
                parameter: "deviation",
                value: -1.0
            }),
            simplify_indices(&input, Metres(1.0), &negative)
        );
    }

    #[test]
    fn test_simplify_long_polyline() {
        let vincenty = Vincenty::default();
        let input = (0..500)
            .map(|i| {
                let lat = if i % 2 == 0 { 0.01 } else { -0.01 };
                point(lat, f64::from(i) * 0.01)
            })
            .collect::<Vec<_>>();

        let result = simplify(&input, Metres(-1.0), &vincenty).unwrap();
        assert_eq!(input, result);

        let result = simplify(&input, Metres(5_000.0), &vincenty).unwrap();
        assert_eq!(vec![input[0].clone(), input[499].clone()], result);
    }

    #[test]
    fn test_simplify_errors() {
        let vincenty = Vincenty::default();
        let input = points(&[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);
        assert!(simplify(&input, Metres(f64::NAN), &vincenty).is_err());

        let other = Arc::new(Ellipsoid::new("Other", Metres(6_378_140.0), 299.2).unwrap());
        let mut input = input;
        input[1] = GeoPoint::with_ellipsoid(Degrees(20.0), Degrees(20.0), other).unwrap();
        assert_eq!(
            Err(Error::EllipsoidMismatch {
                first: String::from("WGS-84"),
                second: String::from("Other")
            }),
            simplify(&input, Metres(1.0), &vincenty)
        );
    }

    #[test]
    fn test_simplify_douglas_peucker() {
        let polyline = Polyline::from(points(&[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]));

        let processor = SimplifyDouglasPeucker::new(Metres(1_500_000.0));
        assert_eq!(Metres(1_500_000.0), processor.tolerance());
        assert_eq!(&Vincenty::default(), processor.metric());
        let result = processor.simplify(&polyline).unwrap();
        assert_eq!(
            &[point(10.0, 10.0), point(30.0, 10.0)],
            result.points()
        );

        let processor = SimplifyDouglasPeucker::with_metric(Metres(1_000.0), Planar);
        assert_eq!(polyline, processor.simplify(&polyline).unwrap());
    }
}
