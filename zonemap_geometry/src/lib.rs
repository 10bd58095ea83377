// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zonemap Geometry: small geographic helpers for interactive maps.
//!
//! This crate holds the math that a map interaction layer needs and nothing
//! more. It does **not** know about renderers, layers, or input events; callers
//! feed it longitude/latitude pairs and get plain values back.
//!
//! - [`LngLat`]: a WGS84 `(longitude, latitude)` pair in degrees.
//! - [`Geometry`]: the subset of GeoJSON-style geometries the interaction layer
//!   works with (points, line strings, polygons with holes, multi-polygons).
//! - [`distance_km`]: great-circle distance using the Haversine formula.
//! - [`polygon_from_center_radius`]: a closed ring approximating a circle.
//! - [`count_vertices`]: vertex count over polygon rings, tolerant of sources
//!   that carry no usable geometry.
//!
//! ## Minimal example
//!
//! ```rust
//! use zonemap_geometry::{
//!     DEFAULT_CIRCLE_SEGMENTS, Geometry, LngLat, count_vertices, distance_km,
//!     polygon_from_center_radius,
//! };
//!
//! let center = LngLat::new(-117.0, 32.0);
//! let edge = LngLat::new(-117.0, 32.01);
//! let radius_km = distance_km(center, edge);
//! assert!((radius_km - 1.112).abs() < 0.01);
//!
//! let ring = polygon_from_center_radius(center, radius_km * 1000.0, DEFAULT_CIRCLE_SEGMENTS);
//! assert_eq!(ring.len(), DEFAULT_CIRCLE_SEGMENTS + 1);
//! assert_eq!(ring.first(), ring.last());
//!
//! let circle = Geometry::polygon(ring);
//! assert_eq!(count_vertices(&circle), DEFAULT_CIRCLE_SEGMENTS);
//! assert!(circle.contains(center));
//! ```
//!
//! ## Accuracy
//!
//! Distances use a spherical Earth of radius [`EARTH_RADIUS_KM`]. Circle
//! synthesis uses an equirectangular offset, which is fine for regional maps
//! and degrades toward the poles, where the longitude offset blows up as
//! `cos(latitude)` approaches zero.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod circle;
mod geometry;
mod lnglat;
mod measure;
mod vertices;

pub use circle::{DEFAULT_CIRCLE_SEGMENTS, METERS_PER_DEGREE, polygon_from_center_radius};
pub use geometry::{Geometry, Ring, close_ring};
pub use lnglat::LngLat;
pub use measure::{EARTH_RADIUS_KM, distance_km, format_distance_km, path_length_km};
pub use vertices::{GeometrySource, count_vertices, try_count_vertices};
