// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay manager: idempotent add/replace/remove on top of a [`MapSurface`].

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;
use zonemap_geometry::{Geometry, LngLat};

use crate::{
    LabelId, LayerPaint, LayerSpec, LineRole, MapSurface, MarkerId, OverlayCategory, OverlayId,
    OverlayStyle, SourceData,
};

/// Caller-owned handle to a point marker and its optional label.
///
/// Give it back through [`OverlayManager::remove_marker`] (or
/// [`MarkerHandle::remove`]) to take the marker off the map. Handles of
/// markers already swept by [`OverlayManager::clear`] remove nothing.
#[must_use = "dropping a marker handle leaves the marker on the map"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Removes the marker and its label.
    pub fn remove<S: MapSurface>(self, overlays: &mut OverlayManager<S>) {
        overlays.remove_marker(self);
    }
}

#[derive(Debug)]
struct PlacedMarker {
    marker: MarkerId,
    label: Option<LabelId>,
    category: OverlayCategory,
}

/// Creates and removes identified overlays on an owned [`MapSurface`].
///
/// Contract:
/// - An upsert first removes anything previously registered under the same
///   id, so a layer id is never added twice.
/// - Removal checks for existence of every layer and source it touches, so
///   removing an absent id is a no-op.
/// - Layers are removed before their source.
/// - A marker's label never outlives the marker.
#[derive(Debug)]
pub struct OverlayManager<S> {
    surface: S,
    style: OverlayStyle,
    overlays: HashMap<OverlayId, OverlayCategory>,
    markers: HashMap<u64, PlacedMarker>,
    next_marker: u64,
}

impl<S: MapSurface> OverlayManager<S> {
    /// Creates a manager that owns `surface`.
    pub fn new(surface: S, style: OverlayStyle) -> Self {
        Self {
            surface,
            style,
            overlays: HashMap::new(),
            markers: HashMap::new(),
            next_marker: 0,
        }
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the underlying surface.
    ///
    /// Changes made directly are invisible to the manager's bookkeeping.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the manager and returns the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The style in use.
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Returns `true` if an overlay is registered under `id`.
    pub fn contains(&self, id: &OverlayId) -> bool {
        self.overlays.contains_key(id)
    }

    /// The category `id` was registered with.
    pub fn category_of(&self, id: &OverlayId) -> Option<OverlayCategory> {
        self.overlays.get(id).copied()
    }

    /// Number of live markers placed through this manager.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Draws `geometry` as a fill plus outline in `color`, replacing any overlay under `id`.
    pub fn upsert_shape(
        &mut self,
        id: &OverlayId,
        geometry: &Geometry,
        color: Color,
        category: OverlayCategory,
    ) {
        let fill = LayerPaint::Fill {
            color,
            opacity: self.style.shape_fill_opacity,
        };
        let outline = LayerPaint::Line {
            color,
            width: self.style.shape_outline_width,
            dash: None,
        };
        self.put_areal(id, geometry, fill, outline, category);
    }

    /// Draws a selection highlight for `geometry`, replacing any overlay under `id`.
    ///
    /// Highlights use a fixed low-opacity fill and a thicker, higher-contrast outline.
    pub fn upsert_highlight(&mut self, id: &OverlayId, geometry: &Geometry) {
        let fill = LayerPaint::Fill {
            color: self.style.highlight_fill,
            opacity: self.style.highlight_fill_opacity,
        };
        let outline = LayerPaint::Line {
            color: self.style.highlight_outline,
            width: self.style.highlight_outline_width,
            dash: None,
        };
        self.put_areal(id, geometry, fill, outline, OverlayCategory::HIGHLIGHT);
    }

    /// Draws a polyline through `points`, replacing any overlay under `id`.
    pub fn upsert_line(&mut self, id: &OverlayId, points: &[LngLat], role: LineRole) {
        self.remove_overlay(id);

        let (color, dash) = self.style.line(role);
        let category = match role {
            LineRole::Preview => OverlayCategory::PREVIEW,
            LineRole::Measure => OverlayCategory::MEASUREMENT,
        };
        self.surface.add_source(
            id.as_str(),
            SourceData::single(Geometry::LineString(points.to_vec())),
        );
        self.surface.add_layer(LayerSpec {
            id: id.line_layer(),
            source: id.as_str().into(),
            paint: LayerPaint::Line {
                color,
                width: self.style.line_width,
                dash,
            },
            visible: true,
        });
        self.overlays.insert(id.clone(), category);
    }

    /// Removes every layer and the source registered under `id`.
    ///
    /// Each removal is guarded by an existence check; absent ids are a no-op.
    pub fn remove_overlay(&mut self, id: &OverlayId) {
        for layer in [id.outline_layer(), id.fill_layer(), id.line_layer()] {
            if self.surface.has_layer(&layer) {
                self.surface.remove_layer(&layer);
            }
        }
        if self.surface.has_source(id.as_str()) {
            self.surface.remove_source(id.as_str());
        }
        self.overlays.remove(id);
    }

    /// Places a point marker, optionally with a text label attached.
    pub fn add_point_marker(
        &mut self,
        point: LngLat,
        label: Option<&str>,
        category: OverlayCategory,
    ) -> MarkerHandle {
        let marker = self.surface.add_marker(point, &self.style.marker);
        let label = label.map(|text| self.surface.add_label(point, text));

        let key = self.next_marker;
        self.next_marker = self.next_marker.wrapping_add(1);
        self.markers.insert(
            key,
            PlacedMarker {
                marker,
                label,
                category,
            },
        );
        MarkerHandle(key)
    }

    /// Removes a marker and its label.
    pub fn remove_marker(&mut self, handle: MarkerHandle) {
        if let Some(placed) = self.markers.remove(&handle.0) {
            self.take_down(placed);
        }
    }

    /// Removes every overlay and marker whose category intersects `categories`.
    pub fn clear(&mut self, categories: OverlayCategory) {
        let doomed: Vec<OverlayId> = self
            .overlays
            .iter()
            .filter(|(_, category)| category.intersects(categories))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &doomed {
            self.remove_overlay(id);
        }

        let swept: Vec<u64> = self
            .markers
            .iter()
            .filter(|(_, placed)| placed.category.intersects(categories))
            .map(|(key, _)| *key)
            .collect();
        for key in swept {
            if let Some(placed) = self.markers.remove(&key) {
                self.take_down(placed);
            }
        }

        tracing::trace!(
            ?categories,
            overlays = doomed.len(),
            "cleared overlay categories"
        );
    }

    /// Fill layer ids of areal overlays in `categories`, for hit testing.
    ///
    /// Sorted so queries are deterministic.
    pub fn fill_layers(&self, categories: OverlayCategory) -> Vec<String> {
        let mut layers: Vec<String> = self
            .overlays
            .iter()
            .filter(|(_, category)| category.intersects(categories))
            .map(|(id, _)| id.fill_layer())
            .filter(|layer| self.surface.has_layer(layer))
            .collect();
        layers.sort();
        layers
    }

    /// Shows or hides a layer if it exists.
    pub fn set_visibility(&mut self, layer_id: &str, visible: bool) {
        if self.surface.has_layer(layer_id) {
            self.surface.set_layer_visibility(layer_id, visible);
        }
    }

    fn put_areal(
        &mut self,
        id: &OverlayId,
        geometry: &Geometry,
        fill: LayerPaint,
        outline: LayerPaint,
        category: OverlayCategory,
    ) {
        self.remove_overlay(id);

        self.surface
            .add_source(id.as_str(), SourceData::single(geometry.clone()));
        self.surface.add_layer(LayerSpec {
            id: id.fill_layer(),
            source: id.as_str().into(),
            paint: fill,
            visible: true,
        });
        self.surface.add_layer(LayerSpec {
            id: id.outline_layer(),
            source: id.as_str().into(),
            paint: outline,
            visible: true,
        });
        self.overlays.insert(id.clone(), category);
        tracing::trace!(%id, ?category, "upserted areal overlay");
    }

    fn take_down(&mut self, placed: PlacedMarker) {
        if let Some(label) = placed.label {
            self.surface.remove_label(label);
        }
        self.surface.remove_marker(placed.marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;
    use alloc::vec;

    fn manager() -> OverlayManager<RecordingSurface> {
        OverlayManager::new(RecordingSurface::new(), OverlayStyle::default())
    }

    fn triangle() -> Geometry {
        Geometry::polygon(vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(2.0, 0.0),
            LngLat::new(1.0, 2.0),
            LngLat::new(0.0, 0.0),
        ])
    }

    #[test]
    fn upsert_replaces_instead_of_duplicating() {
        let mut overlays = manager();
        let id = OverlayId::new("shape-1");
        let color = Color::from_rgba8(1, 2, 3, 255);

        overlays.upsert_shape(&id, &triangle(), color, OverlayCategory::DRAWN);
        overlays.upsert_shape(&id, &triangle(), color, OverlayCategory::DRAWN);
        overlays.upsert_highlight(&OverlayId::new("shape-1-highlight"), &triangle());
        overlays.upsert_highlight(&OverlayId::new("shape-1-highlight"), &triangle());

        let surface = overlays.surface();
        assert_eq!(surface.layers().len(), 4);
        assert_eq!(surface.source_count(), 2);
        assert!(surface.violations().is_empty(), "{:?}", surface.violations());
    }

    #[test]
    fn highlight_uses_fixed_styling() {
        let mut overlays = manager();
        let id = OverlayId::new("zone-a-highlight");
        overlays.upsert_highlight(&id, &triangle());

        let style = *overlays.style();
        let fill = overlays.surface().layer(&id.fill_layer()).unwrap();
        assert_eq!(
            fill.paint,
            LayerPaint::Fill {
                color: style.highlight_fill,
                opacity: style.highlight_fill_opacity,
            }
        );
        let outline = overlays.surface().layer(&id.outline_layer()).unwrap();
        let LayerPaint::Line { width, .. } = outline.paint else {
            panic!("outline must be a line layer");
        };
        assert!(width > style.shape_outline_width);
        assert_eq!(overlays.category_of(&id), Some(OverlayCategory::HIGHLIGHT));
    }

    #[test]
    fn removing_absent_overlays_is_a_no_op() {
        let mut overlays = manager();
        overlays.remove_overlay(&OverlayId::new("never-added"));

        let id = OverlayId::new("line");
        let points = [LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)];
        overlays.upsert_line(&id, &points, LineRole::Preview);
        overlays.remove_overlay(&id);
        overlays.remove_overlay(&id);

        assert!(!overlays.contains(&id));
        assert!(overlays.surface().layers().is_empty());
        assert!(overlays.surface().violations().is_empty());
    }

    #[test]
    fn preview_lines_are_dashed_and_measure_lines_are_not() {
        let mut overlays = manager();
        let pts = [LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0)];
        overlays.upsert_line(&OverlayId::new("preview"), &pts, LineRole::Preview);
        overlays.upsert_line(&OverlayId::new("measure"), &pts, LineRole::Measure);

        let dash_of = |layer: &str| match overlays.surface().layer(layer).unwrap().paint {
            LayerPaint::Line { dash, .. } => dash,
            LayerPaint::Fill { .. } => panic!("expected a line layer"),
        };
        assert!(dash_of("preview-line").is_some());
        assert!(dash_of("measure-line").is_none());
    }

    #[test]
    fn marker_labels_go_away_with_their_marker() {
        let mut overlays = manager();
        let handle = overlays.add_point_marker(
            LngLat::new(1.0, 1.0),
            Some("0.00 km"),
            OverlayCategory::MEASUREMENT,
        );
        assert_eq!(overlays.surface().marker_count(), 1);
        assert_eq!(overlays.surface().label_texts(), vec!["0.00 km"]);

        handle.remove(&mut overlays);
        assert_eq!(overlays.surface().marker_count(), 0);
        assert_eq!(overlays.surface().label_count(), 0);
        assert_eq!(overlays.marker_count(), 0);
        assert!(overlays.surface().violations().is_empty());
    }

    #[test]
    fn clear_sweeps_only_matching_categories() {
        let mut overlays = manager();
        let color = Color::from_rgba8(0, 0, 0, 255);
        let shape = OverlayId::new("shape-1");
        overlays.upsert_shape(&shape, &triangle(), color, OverlayCategory::DRAWN);
        overlays.upsert_line(
            &OverlayId::new("preview"),
            &[LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0)],
            LineRole::Preview,
        );
        let origin = LngLat::new(0.0, 0.0);
        let vertex = overlays.add_point_marker(origin, None, OverlayCategory::PREVIEW);
        let kept = overlays.add_point_marker(origin, Some("x"), OverlayCategory::DRAWN);

        overlays.clear(OverlayCategory::TRANSIENT);

        assert!(overlays.contains(&shape));
        assert!(!overlays.contains(&OverlayId::new("preview")));
        assert_eq!(overlays.marker_count(), 1);

        // A handle whose marker was swept is harmless to return.
        overlays.remove_marker(vertex);
        overlays.remove_marker(kept);
        assert_eq!(overlays.surface().marker_count(), 0);
        assert!(overlays.surface().violations().is_empty());
    }

    #[test]
    fn fill_layers_lists_areal_overlays_by_category() {
        let mut overlays = manager();
        let color = Color::from_rgba8(0, 0, 0, 255);
        overlays.upsert_shape(&OverlayId::new("b"), &triangle(), color, OverlayCategory::UPLOADED);
        overlays.upsert_shape(&OverlayId::new("a"), &triangle(), color, OverlayCategory::DRAWN);
        overlays.upsert_highlight(&OverlayId::new("a-highlight"), &triangle());

        assert_eq!(
            overlays.fill_layers(OverlayCategory::DRAWN | OverlayCategory::UPLOADED),
            vec!["a-fill", "b-fill"]
        );
    }

    #[test]
    fn visibility_of_missing_layers_is_ignored() {
        let mut overlays = manager();
        overlays.set_visibility("missing", false);
        let color = Color::from_rgba8(0, 0, 0, 255);
        let id = OverlayId::new("s");
        overlays.upsert_shape(&id, &triangle(), color, OverlayCategory::DRAWN);
        overlays.set_visibility(&id.fill_layer(), false);
        assert!(!overlays.surface().layer(&id.fill_layer()).unwrap().visible);
        assert!(overlays.surface().violations().is_empty());
    }
}
