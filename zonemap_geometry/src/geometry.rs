// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain geometry model and polygon hit testing.

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Shape};

use crate::LngLat;

/// An ordered, closed sequence of points bounding a polygon or a hole within one.
///
/// Closed means the last point repeats the first. See [`close_ring`].
pub type Ring = Vec<LngLat>;

/// The geometry kinds the interaction layer works with.
///
/// Polygons store their outer ring first and any hole rings after it.
/// Other GeoJSON kinds are not modeled; sources carrying them report no
/// geometry at all.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single position.
    Point(LngLat),
    /// An open polyline.
    LineString(Vec<LngLat>),
    /// Outer ring followed by zero or more hole rings.
    Polygon(Vec<Ring>),
    /// A set of polygons, each outer ring first.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// A polygon with a single outer ring and no holes.
    #[must_use]
    pub fn polygon(outer: Ring) -> Self {
        Self::Polygon(alloc::vec![outer])
    }

    /// The first coordinate in storage order, if any.
    ///
    /// Used as a fallback identity for features that carry no id.
    #[must_use]
    pub fn first_coordinate(&self) -> Option<LngLat> {
        match self {
            Self::Point(p) => Some(*p),
            Self::LineString(points) => points.first().copied(),
            Self::Polygon(rings) => rings.first().and_then(|r| r.first()).copied(),
            Self::MultiPolygon(polys) => polys
                .first()
                .and_then(|rings| rings.first())
                .and_then(|r| r.first())
                .copied(),
        }
    }

    /// Total number of rings (outer and holes) for areal geometry, else zero.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        match self {
            Self::Polygon(rings) => rings.len(),
            Self::MultiPolygon(polys) => polys.iter().map(Vec::len).sum(),
            Self::Point(_) | Self::LineString(_) => 0,
        }
    }

    /// Axis-aligned bounds in degrees (`x = lng`, `y = lat`), or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut include = |p: LngLat| {
            let pt = Point::from(p);
            bounds = Some(match bounds {
                Some(r) => r.union_pt(pt),
                None => Rect::from_points(pt, pt),
            });
        };
        match self {
            Self::Point(p) => include(*p),
            Self::LineString(points) => points.iter().copied().for_each(&mut include),
            Self::Polygon(rings) => rings.iter().flatten().copied().for_each(&mut include),
            Self::MultiPolygon(polys) => polys
                .iter()
                .flatten()
                .flatten()
                .copied()
                .for_each(&mut include),
        }
        bounds
    }

    /// Returns `true` if `point` lies inside this polygon and outside its holes.
    ///
    /// Non-areal geometry never contains anything. Rings with fewer than three
    /// points are ignored.
    #[must_use]
    pub fn contains(&self, point: LngLat) -> bool {
        let pt = Point::from(point);
        match self {
            Self::Polygon(rings) => polygon_contains(rings, pt),
            Self::MultiPolygon(polys) => polys.iter().any(|rings| polygon_contains(rings, pt)),
            Self::Point(_) | Self::LineString(_) => false,
        }
    }

    /// Returns `true` if some polygon has an outer ring of at least three points.
    #[must_use]
    pub fn has_outer_ring(&self) -> bool {
        let usable = |rings: &Vec<Ring>| rings.first().is_some_and(|outer| outer.len() >= 3);
        match self {
            Self::Polygon(rings) => usable(rings),
            Self::MultiPolygon(polys) => polys.iter().any(usable),
            Self::Point(_) | Self::LineString(_) => false,
        }
    }

    /// Appends `hole` as an interior ring.
    ///
    /// For a multi-polygon the hole goes into the member whose outer ring
    /// contains the hole's first vertex, else into the first member that has an
    /// outer ring. Returns `false` (leaving `self` untouched) when there is no
    /// outer ring to cut into.
    pub fn insert_hole(&mut self, hole: Ring) -> bool {
        match self {
            Self::Polygon(rings) if !rings.is_empty() => {
                rings.push(hole);
                true
            }
            Self::MultiPolygon(polys) => {
                let probe = hole.first().copied().map(Point::from);
                let containing = probe.and_then(|pt| {
                    polys.iter().position(|rings| {
                        rings
                            .first()
                            .and_then(|outer| ring_path(outer))
                            .is_some_and(|path| path.contains(pt))
                    })
                });
                let target =
                    containing.or_else(|| polys.iter().position(|rings| !rings.is_empty()));
                match target.and_then(|idx| polys.get_mut(idx)) {
                    Some(rings) => {
                        rings.push(hole);
                        true
                    }
                    None => false,
                }
            }
            Self::Polygon(_) | Self::Point(_) | Self::LineString(_) => false,
        }
    }
}

/// Closes `points` into a ring by repeating the first point, unless it is already closed.
#[must_use]
pub fn close_ring(points: &[LngLat]) -> Ring {
    let mut ring: Ring = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last())
        && (first != last || points.len() == 1)
    {
        ring.push(*first);
    }
    ring
}

fn polygon_contains(rings: &[Ring], pt: Point) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    if !ring_path(outer).is_some_and(|p| p.contains(pt)) {
        return false;
    }
    !holes
        .iter()
        .any(|hole| ring_path(hole).is_some_and(|p| p.contains(pt)))
}

fn ring_path(ring: &[LngLat]) -> Option<BezPath> {
    if ring.len() < 3 {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(Point::from(ring[0]));
    for p in &ring[1..] {
        path.line_to(Point::from(*p));
    }
    path.close_path();
    Some(path)
}
