// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied configuration.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use peniko::Color;
use zonemap_geometry::DEFAULT_CIRCLE_SEGMENTS;
use zonemap_overlay::OverlayStyle;

use crate::ShapeKind;

/// Unit of a typed radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RadiusUnit {
    /// Meters.
    Meters,
    /// Kilometers.
    #[default]
    Kilometers,
    /// International miles.
    Miles,
}

impl RadiusUnit {
    /// Converts `value` in this unit to meters.
    #[must_use]
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Meters => value,
            Self::Kilometers => value * 1000.0,
            Self::Miles => value * 1609.344,
        }
    }
}

/// Shape colors by kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePalette {
    /// Polygons drawn by the user.
    pub drawn_polygon: Color,
    /// Circles drawn by the user.
    pub drawn_circle: Color,
    /// Uploaded polygons.
    pub uploaded: Color,
}

impl ShapePalette {
    /// Color for a shape of `kind`.
    #[must_use]
    pub fn color_for(&self, kind: ShapeKind) -> Color {
        match kind {
            ShapeKind::DrawnPolygon => self.drawn_polygon,
            ShapeKind::DrawnCircle => self.drawn_circle,
            ShapeKind::UploadedPolygon => self.uploaded,
        }
    }
}

impl Default for ShapePalette {
    fn default() -> Self {
        Self {
            drawn_polygon: Color::from_rgba8(0x25, 0x63, 0xeb, 0xff),
            drawn_circle: Color::from_rgba8(0x7c, 0x3a, 0xed, 0xff),
            uploaded: Color::from_rgba8(0x05, 0x96, 0x69, 0xff),
        }
    }
}

/// Everything the interaction core needs from its host.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Renderer layers holding zone features, hit-tested before shapes.
    pub zone_layers: Vec<String>,
    /// Feature property that carries a zone's id.
    pub zone_id_property: String,
    /// Segments used to approximate circles.
    pub circle_segments: usize,
    /// Unit of typed radii.
    pub radius_unit: RadiusUnit,
    /// Shape colors.
    pub palette: ShapePalette,
    /// Highlight, preview and marker styling.
    pub overlay: OverlayStyle,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zone_layers: vec![String::from("evacuation-zones-fill")],
            zone_id_property: String::from("zone_id"),
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            radius_unit: RadiusUnit::default(),
            palette: ShapePalette::default(),
            overlay: OverlayStyle::default(),
        }
    }
}
