// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle-to-polygon synthesis.

use alloc::vec::Vec;
use core::f64::consts::TAU;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{LngLat, Ring};

/// Segment count used for drawn circles unless configured otherwise.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Approximate length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Returns a closed ring approximating a circle of `radius_m` meters around `center`.
///
/// The ring samples `segments` evenly spaced angles starting due east and
/// repeats the first point at the end, so it always has `segments + 1` points.
/// `segments` below 3 is raised to 3, the smallest ring that encloses area.
///
/// Offsets use an equirectangular approximation: `radius_m / 111_320` degrees of
/// latitude, and that value divided by `cos(center.lat)` degrees of longitude.
/// Accuracy degrades toward the poles.
#[must_use]
pub fn polygon_from_center_radius(center: LngLat, radius_m: f64, segments: usize) -> Ring {
    let segments = segments.max(3);
    let lat_offset = radius_m / METERS_PER_DEGREE;
    let lng_offset = lat_offset / center.lat.to_radians().cos();

    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let theta = TAU * (i as f64) / (segments as f64);
        ring.push(LngLat::new(
            center.lng + lng_offset * theta.cos(),
            center.lat + lat_offset * theta.sin(),
        ));
    }
    ring.push(ring[0]);
    ring
}
