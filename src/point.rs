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

//! The point module contains `GeoPoint`, a validated geodetic position on a
//! shared `Ellipsoid`.

use crate::{Distance, Ellipsoid, Error, Metres, Result, WGS84_ELLIPSOID};
use angle_sc::{Angle, Degrees, Validate};
use std::sync::Arc;

/// The default distance within which two positions are at the same location:
/// one millimetre.
pub const DEFAULT_ALLOWED_DISTANCE: Metres = Metres(0.001);

/// Test whether a latitude in degrees is in the range -90° to 90°, inclusive.
#[must_use]
pub fn is_valid_latitude(degrees: f64) -> bool {
    (-90.0..=90.0).contains(&degrees)
}

/// Test whether a longitude in degrees is greater than -180° and less than
/// or equal to 180°.
#[must_use]
pub fn is_valid_longitude(degrees: f64) -> bool {
    -180.0 < degrees && degrees <= 180.0
}

/// A geodetic position: latitude and longitude on an `Ellipsoid`.
///
/// The `Ellipsoid` is shared by reference counting, so many positions can
/// refer to the same ellipsoid without copying it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPoint {
    /// The geodetic latitude.
    lat: Degrees,
    /// The longitude.
    lon: Degrees,
    /// The ellipsoid that the position is defined on.
    ellipsoid: Arc<Ellipsoid>,
}

impl Validate for GeoPoint {
    /// Test whether a `GeoPoint` is valid.
    /// Whether -90° <= `lat` <= 90° and -180° < `lon` <= 180°.
    fn is_valid(&self) -> bool {
        is_valid_latitude(self.lat.0) && is_valid_longitude(self.lon.0)
    }
}

impl GeoPoint {
    /// Construct a `GeoPoint` on the WGS-84 `Ellipsoid`.
    /// * `lat` - the geodetic latitude.
    /// * `lon` - the longitude.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the latitude or longitude is out of range.
    ///
    /// # Examples
    /// ```
    /// use vincenty_geodesy::{Degrees, GeoPoint};
    ///
    /// let berlin = GeoPoint::new(Degrees(52.5), Degrees(13.5)).unwrap();
    /// assert_eq!("WGS-84", berlin.ellipsoid().name());
    ///
    /// assert!(GeoPoint::new(Degrees(90.5), Degrees(13.5)).is_err());
    /// assert!(GeoPoint::new(Degrees(52.5), Degrees(-180.0)).is_err());
    /// ```
    pub fn new(lat: Degrees, lon: Degrees) -> Result<Self> {
        Self::with_ellipsoid(lat, lon, Arc::clone(&*WGS84_ELLIPSOID))
    }

    /// Construct a `GeoPoint` on the given `Ellipsoid`.
    /// * `lat` - the geodetic latitude.
    /// * `lon` - the longitude.
    /// * `ellipsoid` - the shared `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the latitude or longitude is out of range.
    pub fn with_ellipsoid(lat: Degrees, lon: Degrees, ellipsoid: Arc<Ellipsoid>) -> Result<Self> {
        if !is_valid_latitude(lat.0) {
            return Err(Error::InvalidParameter {
                parameter: "latitude",
                value: lat.0,
            });
        }
        if !is_valid_longitude(lon.0) {
            return Err(Error::InvalidParameter {
                parameter: "longitude",
                value: lon.0,
            });
        }
        Ok(Self {
            lat,
            lon,
            ellipsoid,
        })
    }

    /// The geodetic latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// The `Ellipsoid` that the position is defined on.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    /// The latitude as an `Angle`.
    #[must_use]
    pub fn lat_angle(&self) -> Angle {
        Angle::from(self.lat)
    }

    /// The longitude as an `Angle`.
    #[must_use]
    pub fn lon_angle(&self) -> Angle {
        Angle::from(self.lon)
    }

    /// Check that another position is on a compatible `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `Error::EllipsoidMismatch` if the ellipsoid names differ.
    pub fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.ellipsoid.is_compatible(&other.ellipsoid) {
            Ok(())
        } else {
            Err(Error::EllipsoidMismatch {
                first: self.ellipsoid.name().to_owned(),
                second: other.ellipsoid.name().to_owned(),
            })
        }
    }

    /// Whether another position is at the same location: on a compatible
    /// `Ellipsoid` and within `allowed` distance, measured by `metric`.
    /// * `other` - the other position.
    /// * `allowed` - the allowed distance, see [`DEFAULT_ALLOWED_DISTANCE`].
    /// * `metric` - the distance calculator.
    ///
    /// # Errors
    ///
    /// Any error returned by the `metric`.
    pub fn has_same_location<D: Distance + ?Sized>(
        &self,
        other: &Self,
        allowed: Metres,
        metric: &D,
    ) -> Result<bool> {
        if !self.ellipsoid.is_compatible(&other.ellipsoid) {
            return Ok(false);
        }
        let distance = metric.distance(self, other)?;
        Ok(distance.0 <= allowed.0)
    }
}
