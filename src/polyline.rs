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

//! The polyline module contains `Line`, a pair of positions, and `Polyline`,
//! an ordered sequence of positions.

use crate::{Degrees, Distance, GeoPoint, Metres, Result, Vincenty};

/// A line between two positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    start: GeoPoint,
    end: GeoPoint,
}

impl Line {
    /// Constructor.
    /// * `start`, `end` - the positions at the ends of the line.
    #[must_use]
    pub const fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    /// The position at the start of the line.
    #[must_use]
    pub const fn start(&self) -> &GeoPoint {
        &self.start
    }

    /// The position at the end of the line.
    #[must_use]
    pub const fn end(&self) -> &GeoPoint {
        &self.end
    }

    /// The length of the line measured by `metric`.
    ///
    /// # Errors
    ///
    /// Any error returned by the `metric`.
    pub fn length<D: Distance + ?Sized>(&self, metric: &D) -> Result<Metres> {
        metric.distance(&self.start, &self.end)
    }

    /// The azimuth at the start of the geodesic from `start` to `end`.
    ///
    /// # Errors
    ///
    /// See [`Vincenty::inverse`].
    pub fn bearing(&self) -> Result<Degrees> {
        Vincenty::default().initial_bearing(&self.start, &self.end)
    }

    /// The azimuth at the end of the geodesic from `start` to `end`.
    ///
    /// # Errors
    ///
    /// See [`Vincenty::inverse`].
    pub fn final_bearing(&self) -> Result<Degrees> {
        Vincenty::default().final_bearing(&self.start, &self.end)
    }

    /// The line from `end` to `start`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.end.clone(), self.start.clone())
    }
}

/// An ordered sequence of positions.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{Degrees, GeoPoint, Metres, Polyline, Vincenty};
///
/// let mut polyline = Polyline::new();
/// polyline.add_point(GeoPoint::new(Degrees(52.5), Degrees(13.5)).unwrap());
/// polyline.add_point(GeoPoint::new(Degrees(52.5), Degrees(13.1)).unwrap());
/// polyline.add_point(GeoPoint::new(Degrees(52.1), Degrees(13.1)).unwrap());
///
/// assert_eq!(3, polyline.number_of_points());
/// assert_eq!(2, polyline.segments().len());
///
/// let length = polyline.length(&Vincenty::default()).unwrap();
/// assert_eq!(Metres(27164.059 + 44509.218), length);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Construct an empty `Polyline`.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a position.
    pub fn add_point(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    /// Append a position if it is not at the same location as a position
    /// already in the `Polyline`.
    /// * `point` - the position.
    /// * `allowed` - the allowed distance, see
    ///   [`DEFAULT_ALLOWED_DISTANCE`](crate::point::DEFAULT_ALLOWED_DISTANCE).
    /// * `metric` - the distance calculator.
    ///
    /// returns true if the position was appended.
    ///
    /// # Errors
    ///
    /// Any error returned by the `metric`.
    pub fn add_unique_point<D: Distance + ?Sized>(
        &mut self,
        point: GeoPoint,
        allowed: Metres,
        metric: &D,
    ) -> Result<bool> {
        if self.contains_point(&point, allowed, metric)? {
            Ok(false)
        } else {
            self.points.push(point);
            Ok(true)
        }
    }

    /// Whether a position in the `Polyline` is at the same location as `point`.
    ///
    /// # Errors
    ///
    /// Any error returned by the `metric`.
    pub fn contains_point<D: Distance + ?Sized>(
        &self,
        point: &GeoPoint,
        allowed: Metres,
        metric: &D,
    ) -> Result<bool> {
        for existing in &self.points {
            if existing.has_same_location(point, allowed, metric)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The points of the polyline, in order.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Take the points of the polyline.
    #[must_use]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    /// The number of points in the polyline.
    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// The `Line`s between consecutive positions.
    #[must_use]
    pub fn segments(&self) -> Vec<Line> {
        self.points
            .windows(2)
            .map(|pair| Line::new(pair[0].clone(), pair[1].clone()))
            .collect()
    }

    /// The sum of the lengths of the segments, measured by `metric`:
    /// zero if the `Polyline` has fewer than two positions.
    ///
    /// # Errors
    ///
    /// Any error returned by the `metric`.
    pub fn length<D: Distance + ?Sized>(&self, metric: &D) -> Result<Metres> {
        self.points
            .windows(2)
            .try_fold(Metres(0.0), |total, pair| {
                metric
                    .distance(&pair[0], &pair[1])
                    .map(|length| Metres(total.0 + length.0))
            })
    }

    /// The `Polyline` with its positions in the reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.points.iter().rev().cloned().collect()
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<GeoPoint> for Polyline {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::DEFAULT_ALLOWED_DISTANCE;
    use crate::{Ellipsoid, Error};
    use angle_sc::is_within_tolerance;
    use std::sync::Arc;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(Degrees(lat), Degrees(lon)).unwrap()
    }

    #[test]
    fn test_line() {
        let line = Line::new(point(52.5, 13.5), point(52.5, 13.1));
        assert_eq!(&point(52.5, 13.5), line.start());
        assert_eq!(&point(52.5, 13.1), line.end());

        let vincenty = Vincenty::default();
        assert_eq!(Metres(27164.059), line.length(&vincenty).unwrap());
        assert!(is_within_tolerance(270.158_670_907_482_4, line.bearing().unwrap().0, 1e-9));
        assert!(is_within_tolerance(269.841_329_092_517_6, line.final_bearing().unwrap().0, 1e-9));

        let reversed = line.reverse();
        assert_eq!(line.start(), reversed.end());
        assert_eq!(line.end(), reversed.start());
        assert_eq!(Metres(27164.059), reversed.length(&vincenty).unwrap());
    }

    #[test]
    fn test_polyline_segments_and_length() {
        let vincenty = Vincenty::default();
        let mut polyline = Polyline::new();
        assert_eq!(Metres(0.0), polyline.length(&vincenty).unwrap());
        assert!(polyline.segments().is_empty());

        polyline.add_point(point(52.5, 13.5));
        assert_eq!(Metres(0.0), polyline.length(&vincenty).unwrap());

        polyline.add_point(point(52.5, 13.1));
        polyline.add_point(point(52.1, 13.1));
        assert_eq!(3, polyline.number_of_points());

        let segments = polyline.segments();
        assert_eq!(2, segments.len());
        assert_eq!(&point(52.5, 13.1), segments[0].end());
        assert_eq!(segments[0].end(), segments[1].start());

        let expected = segments
            .iter()
            .map(|line| line.length(&vincenty).unwrap().0)
            .sum::<f64>();
        assert_eq!(expected, polyline.length(&vincenty).unwrap().0);
    }

    #[test]
    fn test_polyline_reverse() {
        let polyline: Polyline = vec![point(10.0, 10.0), point(20.0, 20.0), point(30.0, 10.0)]
            .into_iter()
            .collect();
        let reversed = polyline.reverse();
        assert_eq!(
            &[point(30.0, 10.0), point(20.0, 20.0), point(10.0, 10.0)],
            reversed.points()
        );
        assert_eq!(polyline, reversed.reverse());
    }

    #[test]
    fn test_polyline_add_unique_point() {
        let vincenty = Vincenty::default();
        let mut polyline = Polyline::from(vec![point(52.5, 13.5)]);

        assert!(!polyline
            .add_unique_point(point(52.5, 13.5), DEFAULT_ALLOWED_DISTANCE, &vincenty)
            .unwrap());
        assert!(!polyline
            .add_unique_point(point(52.500_000_001, 13.5), DEFAULT_ALLOWED_DISTANCE, &vincenty)
            .unwrap());
        assert!(polyline
            .add_unique_point(point(52.5, 13.1), DEFAULT_ALLOWED_DISTANCE, &vincenty)
            .unwrap());
        assert_eq!(2, polyline.number_of_points());

        assert!(polyline
            .contains_point(&point(52.5, 13.1), DEFAULT_ALLOWED_DISTANCE, &vincenty)
            .unwrap());
        assert!(!polyline
            .contains_point(&point(52.1, 13.1), DEFAULT_ALLOWED_DISTANCE, &vincenty)
            .unwrap());
        assert!(polyline
            .contains_point(&point(52.1, 13.1), Metres(50_000.0), &vincenty)
            .unwrap());
    }

    #[test]
    fn test_polyline_length_error() {
        let other = Arc::new(Ellipsoid::new("Other", Metres(6_378_140.0), 299.2).unwrap());
        let polyline = Polyline::from(vec![
            point(52.5, 13.5),
            GeoPoint::with_ellipsoid(Degrees(52.5), Degrees(13.1), other).unwrap(),
        ]);
        assert_eq!(
            Err(Error::EllipsoidMismatch {
                first: String::from("WGS-84"),
                second: String::from("Other")
            }),
            polyline.length(&Vincenty::default())
        );
    }
}
