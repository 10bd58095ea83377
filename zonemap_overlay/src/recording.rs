// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless [`MapSurface`] that keeps its registry in memory.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use zonemap_geometry::LngLat;

use crate::{
    LabelId, LayerPaint, LayerSpec, MapSurface, MarkerId, MarkerStyle, RenderedFeature,
    SourceData,
};

/// A call the recording surface refused, as a strict map library would.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A source id was added twice.
    DuplicateSource(String),
    /// A layer id was added twice.
    DuplicateLayer(String),
    /// A layer referenced a source that does not exist.
    MissingSource {
        /// The layer being added.
        layer: String,
        /// The source it referenced.
        source: String,
    },
    /// A source was removed while a layer still drew it.
    SourceInUse(String),
    /// An absent source was removed.
    AbsentSource(String),
    /// An absent layer was removed or restyled.
    AbsentLayer(String),
    /// An absent marker was removed.
    AbsentMarker(MarkerId),
    /// An absent label was removed.
    AbsentLabel(LabelId),
}

#[derive(Clone, Debug)]
struct Label {
    point: LngLat,
    text: String,
}

/// In-memory map surface for tests and headless hosts.
///
/// Layers stack in insertion order (last added is on top). Hit testing is
/// geometric: a fill layer is hit where its source polygons contain the point.
/// Calls a strict renderer would reject are refused and recorded as
/// [`Violation`]s instead of panicking.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    sources: BTreeMap<String, SourceData>,
    layers: Vec<LayerSpec>,
    markers: BTreeMap<MarkerId, LngLat>,
    labels: BTreeMap<LabelId, Label>,
    next_id: u64,
    violations: Vec<Violation>,
}

impl RecordingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source and a visible fill layer in one go, bypassing the manager.
    ///
    /// Handy for seeding server-side data such as evacuation zones.
    pub fn with_fill_layer(mut self, source: &str, layer: &str, data: SourceData) -> Self {
        self.add_source(source, data);
        self.add_layer(LayerSpec {
            id: layer.into(),
            source: source.into(),
            paint: LayerPaint::Fill {
                color: peniko::Color::from_rgba8(0x94, 0xa3, 0xb8, 0xff),
                opacity: 0.4,
            },
            visible: true,
        });
        self
    }

    /// Layers from bottom to top.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// The layer with `id`, if present.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// The source with `id`, if present.
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&SourceData> {
        self.sources.get(id)
    }

    /// Number of registered sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of live markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Positions of live markers in creation order.
    #[must_use]
    pub fn marker_positions(&self) -> Vec<LngLat> {
        self.markers.values().copied().collect()
    }

    /// Number of live labels.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Texts of live labels in creation order.
    #[must_use]
    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.values().map(|l| l.text.as_str()).collect()
    }

    /// Anchor points of live labels in creation order.
    #[must_use]
    pub fn label_positions(&self) -> Vec<LngLat> {
        self.labels.values().map(|l| l.point).collect()
    }

    /// Every refused call so far.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MapSurface for RecordingSurface {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: SourceData) {
        if self.sources.contains_key(id) {
            self.violations.push(Violation::DuplicateSource(id.into()));
            return;
        }
        self.sources.insert(id.into(), data);
    }

    fn remove_source(&mut self, id: &str) {
        if !self.sources.contains_key(id) {
            self.violations.push(Violation::AbsentSource(id.into()));
            return;
        }
        if self.layers.iter().any(|l| l.source == id) {
            self.violations.push(Violation::SourceInUse(id.into()));
            return;
        }
        self.sources.remove(id);
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layer(id).is_some()
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        if self.has_layer(&layer.id) {
            self.violations.push(Violation::DuplicateLayer(layer.id));
            return;
        }
        if !self.sources.contains_key(&layer.source) {
            self.violations.push(Violation::MissingSource {
                layer: layer.id,
                source: layer.source,
            });
            return;
        }
        self.layers.push(layer);
    }

    fn remove_layer(&mut self, id: &str) {
        match self.layers.iter().position(|l| l.id == id) {
            Some(idx) => {
                self.layers.remove(idx);
            }
            None => self.violations.push(Violation::AbsentLayer(id.into())),
        }
    }

    fn set_layer_visibility(&mut self, id: &str, visible: bool) {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => layer.visible = visible,
            None => self.violations.push(Violation::AbsentLayer(id.into())),
        }
    }

    fn add_marker(&mut self, point: LngLat, _style: &MarkerStyle) -> MarkerId {
        let id = MarkerId(self.issue_id());
        self.markers.insert(id, point);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        if self.markers.remove(&id).is_none() {
            self.violations.push(Violation::AbsentMarker(id));
        }
    }

    fn add_label(&mut self, point: LngLat, text: &str) -> LabelId {
        let id = LabelId(self.issue_id());
        self.labels.insert(
            id,
            Label {
                point,
                text: text.into(),
            },
        );
        id
    }

    fn remove_label(&mut self, id: LabelId) {
        if self.labels.remove(&id).is_none() {
            self.violations.push(Violation::AbsentLabel(id));
        }
    }

    fn query_rendered_features(&self, point: LngLat, layer_ids: &[String]) -> Vec<RenderedFeature> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layer.visible && matches!(layer.paint, LayerPaint::Fill { .. }))
            .filter(|layer| layer_ids.iter().any(|id| *id == layer.id))
            .flat_map(|layer| {
                self.sources
                    .get(&layer.source)
                    .into_iter()
                    .flat_map(|data| data.features.iter())
                    .filter(move |feature| feature.geometry.contains(point))
                    .map(move |feature| RenderedFeature {
                        layer_id: layer.id.clone(),
                        source_id: layer.source.clone(),
                        properties: feature.properties.clone(),
                        geometry: Some(feature.geometry.clone()),
                    })
            })
            .collect()
    }
}
