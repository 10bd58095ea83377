// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes, zone features, and the tagged union resolved from map hits.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;
use zonemap_geometry::{Geometry, GeometrySource};
use zonemap_overlay::{OverlayCategory, OverlayId, Properties, RenderedFeature};

/// Identifier of a drawn or uploaded shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u64);

impl ShapeId {
    /// Overlay id of the shape's own fill and outline.
    #[must_use]
    pub fn overlay_id(self) -> OverlayId {
        OverlayId::new(format!("{self}"))
    }

    /// Overlay id of the shape's selection highlight.
    #[must_use]
    pub fn highlight_id(self) -> OverlayId {
        OverlayId::new(format!("{self}-highlight"))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// Where a shape came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Committed from [`Mode::DrawPolygon`](crate::Mode::DrawPolygon).
    DrawnPolygon,
    /// Synthesized from a circle or typed radius.
    DrawnCircle,
    /// Ingested from an upload or search result.
    UploadedPolygon,
}

impl ShapeKind {
    /// Stable tag, for example `"drawn-polygon"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DrawnPolygon => "drawn-polygon",
            Self::DrawnCircle => "drawn-circle",
            Self::UploadedPolygon => "uploaded-polygon",
        }
    }

    /// Returns `true` for shapes the user drew; only these enter the undo history.
    #[must_use]
    pub fn is_drawn(self) -> bool {
        matches!(self, Self::DrawnPolygon | Self::DrawnCircle)
    }

    /// Overlay category the shape is drawn in.
    #[must_use]
    pub fn category(self) -> OverlayCategory {
        if self.is_drawn() {
            OverlayCategory::DRAWN
        } else {
            OverlayCategory::UPLOADED
        }
    }
}

/// A completed polygon (outer ring plus holes) or circle approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Generated identifier.
    pub id: ShapeId,
    /// Kind tag.
    pub kind: ShapeKind,
    /// Polygon or multi-polygon geometry.
    pub geometry: Geometry,
    /// Arbitrary properties.
    pub properties: Properties,
    /// Fill and outline color.
    pub color: Color,
}

impl GeometrySource for Shape {
    fn geometry(&self) -> Option<&Geometry> {
        Some(&self.geometry)
    }
}

/// A polygon handed over by the host, for example a parsed shapefile record.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedShape {
    /// Geometry; non-areal geometry is skipped on ingestion.
    pub geometry: Geometry,
    /// Properties carried over to the shape.
    pub properties: Properties,
}

/// Derived identity of a zone feature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneKey(String);

impl ZoneKey {
    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pre-existing evacuation zone rendered from server-side tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneFeature {
    /// Zone id read from the configured property, if present.
    pub zone_id: Option<String>,
    /// Zone geometry, when the renderer exposes it.
    pub geometry: Option<Geometry>,
    /// All feature properties.
    pub properties: Properties,
}

impl ZoneFeature {
    /// Builds a zone from a renderer hit, reading the id from `id_property`.
    #[must_use]
    pub fn from_rendered(feature: &RenderedFeature, id_property: &str) -> Self {
        Self {
            zone_id: feature
                .properties
                .get(id_property)
                .and_then(|value| value.as_identifier()),
            geometry: feature.geometry.clone(),
            properties: feature.properties.clone(),
        }
    }

    /// The zone id, else `"lng,lat"` of the first geometry coordinate.
    ///
    /// Zones with neither share the key `"unidentified"`.
    #[must_use]
    pub fn key(&self) -> ZoneKey {
        if let Some(id) = &self.zone_id {
            return ZoneKey(id.clone());
        }
        match self.geometry.as_ref().and_then(Geometry::first_coordinate) {
            Some(p) => ZoneKey(format!("{},{}", p.lng, p.lat)),
            None => ZoneKey("unidentified".into()),
        }
    }

    /// Overlay id of the zone's selection highlight.
    #[must_use]
    pub fn highlight_id(&self) -> OverlayId {
        OverlayId::new(format!("zone-{}-highlight", self.key()))
    }
}

impl GeometrySource for ZoneFeature {
    fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }
}

/// Identity of anything selectable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKey {
    /// A zone.
    Zone(ZoneKey),
    /// A drawn or uploaded shape.
    Shape(ShapeId),
}

/// A selectable thing under the pointer, resolved once from a renderer hit.
#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    /// A pre-existing zone.
    Zone(ZoneFeature),
    /// A shape the user drew.
    Drawn(ShapeId),
    /// A shape that was uploaded.
    Uploaded(ShapeId),
}

impl Feature {
    /// Identity used by the selection set.
    #[must_use]
    pub fn identifier(&self) -> FeatureKey {
        match self {
            Self::Zone(zone) => FeatureKey::Zone(zone.key()),
            Self::Drawn(id) | Self::Uploaded(id) => FeatureKey::Shape(*id),
        }
    }

    /// Geometry of the feature; shapes are looked up in `shapes`.
    #[must_use]
    pub fn geometry<'a>(&'a self, shapes: &'a ShapeStore) -> Option<&'a Geometry> {
        match self {
            Self::Zone(zone) => zone.geometry.as_ref(),
            Self::Drawn(id) | Self::Uploaded(id) => shapes.get(*id).map(|s| &s.geometry),
        }
    }

    /// Resolves a hit on a shape layer, using its source id to find the shape.
    #[must_use]
    pub fn resolve_shape(hit: &RenderedFeature, shapes: &ShapeStore) -> Option<Self> {
        let shape = shapes.by_overlay(&hit.source_id)?;
        Some(match shape.kind {
            ShapeKind::DrawnPolygon | ShapeKind::DrawnCircle => Self::Drawn(shape.id),
            ShapeKind::UploadedPolygon => Self::Uploaded(shape.id),
        })
    }
}

/// Live shapes in creation order.
#[derive(Clone, Debug, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if there are no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The shape with `id`.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Iterates shapes in creation order.
    pub fn iter(&self) -> core::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Number of live shapes of a kind.
    #[must_use]
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }

    /// The shape whose overlay (source) id is `overlay`.
    #[must_use]
    pub fn by_overlay(&self, overlay: &str) -> Option<&Shape> {
        self.shapes
            .iter()
            .find(|s| s.id.overlay_id().as_str() == overlay)
    }

    pub(crate) fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn insert(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub(crate) fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(idx))
    }

    pub(crate) fn clear(&mut self) {
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use zonemap_geometry::LngLat;
    use zonemap_overlay::PropertyValue;

    fn square() -> Geometry {
        Geometry::polygon(vec![
            LngLat::new(-117.0, 32.0),
            LngLat::new(-116.9, 32.0),
            LngLat::new(-116.9, 32.1),
            LngLat::new(-117.0, 32.0),
        ])
    }

    fn rendered(props: &[(&str, PropertyValue)], geometry: Option<Geometry>) -> RenderedFeature {
        RenderedFeature {
            layer_id: "evacuation-zones-fill".into(),
            source_id: "evacuation-zones".into(),
            properties: props
                .iter()
                .map(|(k, v)| (String::from(*k), v.clone()))
                .collect(),
            geometry,
        }
    }

    #[test]
    fn zone_key_prefers_zone_id() {
        let hit = rendered(&[("zone_id", PropertyValue::from("SD-12"))], Some(square()));
        let zone = ZoneFeature::from_rendered(&hit, "zone_id");
        assert_eq!(zone.key().as_str(), "SD-12");
        assert_eq!(zone.highlight_id().as_str(), "zone-SD-12-highlight");
        assert_eq!(
            Feature::Zone(zone).identifier(),
            FeatureKey::Zone(ZoneKey("SD-12".into()))
        );
    }

    #[test]
    fn zone_key_falls_back_to_first_coordinate() {
        let hit = rendered(&[("name", PropertyValue::from("North"))], Some(square()));
        let zone = ZoneFeature::from_rendered(&hit, "zone_id");
        assert_eq!(zone.key().as_str(), "-117,32");

        let bare = ZoneFeature::from_rendered(&rendered(&[], None), "zone_id");
        assert_eq!(bare.key().as_str(), "unidentified");
    }

    #[test]
    fn numeric_zone_ids_are_accepted() {
        let hit = rendered(&[("zone_id", PropertyValue::Number(7.0))], None);
        assert_eq!(ZoneFeature::from_rendered(&hit, "zone_id").key().as_str(), "7");
    }

    #[test]
    fn shape_hits_resolve_through_the_store() {
        let mut store = ShapeStore::default();
        let id = ShapeId(4);
        store.insert(Shape {
            id,
            kind: ShapeKind::UploadedPolygon,
            geometry: square(),
            properties: Properties::new(),
            color: Color::from_rgba8(0, 0, 0, 255),
        });
        let hit = RenderedFeature {
            layer_id: "shape-4-fill".into(),
            source_id: "shape-4".into(),
            properties: Properties::new(),
            geometry: None,
        };
        let feature = Feature::resolve_shape(&hit, &store).unwrap();
        assert_eq!(feature, Feature::Uploaded(id));
        assert_eq!(feature.geometry(&store), Some(&square()));
        assert_eq!(zonemap_geometry::count_vertices(store.get(id).unwrap()), 3);

        let stray = RenderedFeature {
            source_id: "shape-9".into(),
            ..hit
        };
        assert!(Feature::resolve_shape(&stray, &store).is_none());
    }

    #[test]
    fn kind_tags() {
        assert_eq!(ShapeKind::DrawnPolygon.as_str(), "drawn-polygon");
        assert_eq!(ShapeKind::DrawnCircle.as_str(), "drawn-circle");
        assert_eq!(ShapeKind::UploadedPolygon.as_str(), "uploaded-polygon");
        assert_eq!(ShapeKind::UploadedPolygon.category(), OverlayCategory::UPLOADED);
    }
}
