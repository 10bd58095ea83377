// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// A WGS84 coordinate: longitude then latitude, both in degrees.
///
/// Converts losslessly to and from [`kurbo::Point`] with `x = lng` and
/// `y = lat`, which is how polygon hit testing borrows Kurbo's path math.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees, positive east.
    pub lng: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl LngLat {
    /// Creates a coordinate from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl From<LngLat> for Point {
    fn from(value: LngLat) -> Self {
        Self::new(value.lng, value.lat)
    }
}

impl From<Point> for LngLat {
    fn from(value: Point) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}
