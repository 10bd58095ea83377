// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map-surface seam and the data that crosses it.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use peniko::Color;
use zonemap_geometry::{Geometry, GeometrySource, LngLat};

use crate::MarkerStyle;

/// A feature property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A boolean flag.
    Bool(bool),
    /// Any number; integers are stored as whole floats.
    Number(f64),
    /// A string.
    Text(String),
}

impl PropertyValue {
    /// Text form suitable for use as an identifier.
    ///
    /// Numbers render without a trailing `.0` when whole. Booleans are not
    /// identifiers and return `None`, as do empty strings.
    #[must_use]
    pub fn as_identifier(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.clone()),
            Self::Number(n) if n.is_finite() => Some(format!("{n}")),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Arbitrary key/value properties attached to a feature.
pub type Properties = BTreeMap<String, PropertyValue>;

/// One feature within a source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFeature {
    /// The feature geometry.
    pub geometry: Geometry,
    /// The feature properties.
    pub properties: Properties,
}

/// Geometry data registered under a source id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceData {
    /// Features in the source.
    pub features: Vec<SourceFeature>,
}

impl SourceData {
    /// A source with one property-less feature.
    #[must_use]
    pub fn single(geometry: Geometry) -> Self {
        Self {
            features: vec![SourceFeature {
                geometry,
                properties: Properties::new(),
            }],
        }
    }
}

/// How a layer paints its source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerPaint {
    /// Filled polygons.
    Fill {
        /// Fill color.
        color: Color,
        /// Fill opacity in `0.0..=1.0`.
        opacity: f32,
    },
    /// Stroked lines or polygon outlines.
    Line {
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f64,
        /// Optional `[dash, gap]` pattern in line widths.
        dash: Option<[f64; 2]>,
    },
}

/// A layer to add to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Unique layer id.
    pub id: String,
    /// Id of the source the layer draws.
    pub source: String,
    /// Paint properties.
    pub paint: LayerPaint,
    /// Whether the layer is drawn and hit-testable.
    pub visible: bool,
}

/// Surface-issued identifier of a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Surface-issued identifier of a text label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub u64);

/// A feature returned by [`MapSurface::query_rendered_features`].
///
/// This is the renderer's view of a hit: which layer and source it came from,
/// its properties and, when the renderer can provide it, its geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFeature {
    /// Layer the feature was rendered in.
    pub layer_id: String,
    /// Source the feature belongs to.
    pub source_id: String,
    /// Feature properties.
    pub properties: Properties,
    /// Plain geometry, if the renderer exposes it.
    pub geometry: Option<Geometry>,
}

impl GeometrySource for RenderedFeature {
    fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }
}

/// The shared map surface: a registry of sources, layers and markers.
///
/// Implementations may treat duplicate ids and removals of absent ids as
/// errors, the way browser map libraries do. [`OverlayManager`] never issues
/// such calls, so implementations are free to be strict.
///
/// All calls are expected from a single event-handling context.
///
/// [`OverlayManager`]: crate::OverlayManager
pub trait MapSurface {
    /// Returns `true` if a source with `id` exists.
    fn has_source(&self, id: &str) -> bool;
    /// Registers a source under a new `id`.
    fn add_source(&mut self, id: &str, data: SourceData);
    /// Removes an existing source that no layer references any more.
    fn remove_source(&mut self, id: &str);

    /// Returns `true` if a layer with `id` exists.
    fn has_layer(&self, id: &str) -> bool;
    /// Adds a new layer on top of the existing ones.
    fn add_layer(&mut self, layer: LayerSpec);
    /// Removes an existing layer.
    fn remove_layer(&mut self, id: &str);
    /// Shows or hides an existing layer.
    fn set_layer_visibility(&mut self, id: &str, visible: bool);

    /// Places a point marker and returns its id.
    fn add_marker(&mut self, point: LngLat, style: &MarkerStyle) -> MarkerId;
    /// Removes a marker.
    fn remove_marker(&mut self, id: MarkerId);
    /// Places a text label anchored at `point`.
    fn add_label(&mut self, point: LngLat, text: &str) -> LabelId;
    /// Removes a label.
    fn remove_label(&mut self, id: LabelId);

    /// Features under `point` in the listed layers, topmost first.
    ///
    /// Hidden layers are not hit.
    fn query_rendered_features(&self, point: LngLat, layer_ids: &[String]) -> Vec<RenderedFeature>;
}
