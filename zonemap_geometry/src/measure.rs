// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Great-circle distance helpers.

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::LngLat;

/// Mean Earth radius used by [`distance_km`], in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between `a` and `b` in kilometers (Haversine).
///
/// Total and symmetric: `distance_km(a, b) == distance_km(b, a)` and
/// `distance_km(a, a) == 0.0`.
#[must_use]
pub fn distance_km(a: LngLat, b: LngLat) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();
    let h = half_lat * half_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * half_lng * half_lng;

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of [`distance_km`] over consecutive points.
///
/// Empty and single-point paths have length zero.
#[must_use]
pub fn path_length_km(points: &[LngLat]) -> f64 {
    points.windows(2).map(|w| distance_km(w[0], w[1])).sum()
}

/// Formats a distance for a map label, for example `"1.25 km"`.
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    format!("{km:.2} km")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = LngLat::new(-117.0, 32.0);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (LngLat::new(-117.0, 32.0), LngLat::new(-116.9, 32.1)),
            (LngLat::new(0.0, 0.0), LngLat::new(179.0, -45.0)),
            (LngLat::new(13.4, 52.5), LngLat::new(-74.0, 40.7)),
        ];
        for (a, b) in pairs {
            assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn one_hundredth_degree_of_latitude() {
        let d = distance_km(LngLat::new(-117.0, 32.0), LngLat::new(-117.0, 32.01));
        assert!((d - 1.1119).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn quarter_meridian() {
        let d = distance_km(LngLat::new(0.0, 0.0), LngLat::new(0.0, 90.0));
        let expected = EARTH_RADIUS_KM * core::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn path_length_sums_legs() {
        let a = LngLat::new(-117.0, 32.0);
        let b = LngLat::new(-117.0, 32.1);
        let c = LngLat::new(-116.9, 32.1);
        let total = path_length_km(&[a, b, c]);
        assert!((total - (distance_km(a, b) + distance_km(b, c))).abs() < 1e-12);
        assert_eq!(path_length_km(&[a]), 0.0);
        assert_eq!(path_length_km(&[]), 0.0);
    }

    #[test]
    fn label_formatting() {
        assert_eq!(format_distance_km(0.0), "0.00 km");
        assert_eq!(format_distance_km(1.23456), "1.23 km");
    }
}
