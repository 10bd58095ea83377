// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex counting over anything that can produce a [`Geometry`].

use alloc::borrow::Cow;

use crate::{Geometry, Ring};

/// Something that may carry, or be converted into, a plain [`Geometry`].
///
/// Plain geometries return themselves from [`GeometrySource::geometry`].
/// Renderer-native features (for example decoded vector-tile features) may
/// carry no geometry directly but know how to build one; they override
/// [`GeometrySource::to_plain_geometry`]. Sources with neither simply report
/// nothing.
pub trait GeometrySource {
    /// Geometry carried directly, if any.
    fn geometry(&self) -> Option<&Geometry>;

    /// Builds a plain geometry when none is carried directly.
    ///
    /// The default has no conversion capability.
    fn to_plain_geometry(&self) -> Option<Geometry> {
        None
    }
}

impl GeometrySource for Geometry {
    fn geometry(&self) -> Option<&Geometry> {
        Some(self)
    }
}

impl<G: GeometrySource> GeometrySource for Option<G> {
    fn geometry(&self) -> Option<&Geometry> {
        self.as_ref().and_then(G::geometry)
    }

    fn to_plain_geometry(&self) -> Option<Geometry> {
        self.as_ref().and_then(G::to_plain_geometry)
    }
}

impl<G: GeometrySource + ?Sized> GeometrySource for &G {
    fn geometry(&self) -> Option<&Geometry> {
        G::geometry(self)
    }

    fn to_plain_geometry(&self) -> Option<Geometry> {
        G::to_plain_geometry(self)
    }
}

/// Counts polygon vertices, or `None` when `source` offers no geometry at all.
///
/// Each ring contributes `len - 1` (the closing point is not a vertex). Point
/// and line geometry count as zero.
#[must_use]
pub fn try_count_vertices<G: GeometrySource + ?Sized>(source: &G) -> Option<usize> {
    let geometry = match source.geometry() {
        Some(g) => Cow::Borrowed(g),
        None => Cow::Owned(source.to_plain_geometry()?),
    };
    Some(match &*geometry {
        Geometry::Polygon(rings) => ring_vertices(rings),
        Geometry::MultiPolygon(polys) => polys.iter().map(|rings| ring_vertices(rings)).sum(),
        Geometry::Point(_) | Geometry::LineString(_) => 0,
    })
}

/// Counts polygon vertices, treating an unavailable geometry as zero.
///
/// Use [`try_count_vertices`] to tell "no vertices" apart from "no geometry".
#[must_use]
pub fn count_vertices<G: GeometrySource + ?Sized>(source: &G) -> usize {
    try_count_vertices(source).unwrap_or(0)
}

fn ring_vertices(rings: &[Ring]) -> usize {
    rings.iter().map(|r| r.len().saturating_sub(1)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LngLat;
    use alloc::vec;
    use alloc::vec::Vec;

    fn triangle() -> Ring {
        vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(1.0, 1.0),
            LngLat::new(0.0, 0.0),
        ]
    }

    /// Stand-in for a tile feature that stores encoded coordinates.
    struct EncodedFeature {
        encoded: Option<Vec<[f64; 2]>>,
    }

    impl GeometrySource for EncodedFeature {
        fn geometry(&self) -> Option<&Geometry> {
            None
        }

        fn to_plain_geometry(&self) -> Option<Geometry> {
            let coords = self.encoded.as_ref()?;
            Some(Geometry::polygon(coords.iter().copied().map(LngLat::from).collect()))
        }
    }

    /// A feature with neither geometry nor a conversion.
    struct OpaqueFeature;

    impl GeometrySource for OpaqueFeature {
        fn geometry(&self) -> Option<&Geometry> {
            None
        }
    }

    #[test]
    fn closed_triangle_has_three_vertices() {
        assert_eq!(count_vertices(&Geometry::polygon(triangle())), 3);
    }

    #[test]
    fn holes_and_members_are_summed() {
        let poly = Geometry::Polygon(vec![triangle(), triangle()]);
        assert_eq!(count_vertices(&poly), 6);

        let multi = Geometry::MultiPolygon(vec![vec![triangle()], vec![triangle(), triangle()]]);
        assert_eq!(count_vertices(&multi), 9);
    }

    #[test]
    fn non_polygon_geometry_counts_zero() {
        assert_eq!(try_count_vertices(&Geometry::Point(LngLat::new(1.0, 2.0))), Some(0));
        let line = Geometry::LineString(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)]);
        assert_eq!(count_vertices(&line), 0);
    }

    #[test]
    fn converted_features_are_counted() {
        let feature = EncodedFeature {
            encoded: Some(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]),
        };
        assert_eq!(count_vertices(&feature), 4);
    }

    #[test]
    fn missing_geometry_is_unavailable_and_counts_zero() {
        let empty = EncodedFeature { encoded: None };
        assert_eq!(try_count_vertices(&empty), None);
        assert_eq!(count_vertices(&empty), 0);
        assert_eq!(count_vertices(&OpaqueFeature), 0);
        assert_eq!(count_vertices(&None::<Geometry>), 0);
    }
}
