// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay commands emitted by state transitions.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use zonemap_geometry::{Geometry, LngLat};
use zonemap_overlay::{LineRole, OverlayCategory, OverlayId};

use crate::Shape;

/// Overlay id of the dashed line through polygon vertices being drawn.
pub const PREVIEW_LINE: &str = "draw-preview";

/// Overlay id of the line through measurement points.
pub const MEASURE_LINE: &str = "measure-path";

/// A marker owned by an in-progress session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerSlot {
    /// The n-th drawing vertex (index 0 is also the circle center).
    Vertex(usize),
    /// The n-th measurement point.
    Measure(usize),
}

impl MarkerSlot {
    /// Overlay category the marker is placed in.
    #[must_use]
    pub fn category(self) -> OverlayCategory {
        match self {
            Self::Vertex(_) => OverlayCategory::PREVIEW,
            Self::Measure(_) => OverlayCategory::MEASUREMENT,
        }
    }
}

/// One command for the overlay layer.
///
/// All effects are idempotent: upserts replace, removals of absent things do
/// nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Draw or redraw a shape.
    UpsertShape {
        /// Overlay id.
        id: OverlayId,
        /// Areal geometry.
        geometry: Geometry,
        /// Fill and outline color.
        color: Color,
        /// Category used by [`Effect::Clear`].
        category: OverlayCategory,
    },
    /// Draw or redraw a selection highlight.
    UpsertHighlight {
        /// Overlay id.
        id: OverlayId,
        /// Highlighted geometry.
        geometry: Geometry,
    },
    /// Draw or redraw a preview or measurement line.
    UpsertLine {
        /// Overlay id.
        id: OverlayId,
        /// Vertices in order.
        points: Vec<LngLat>,
        /// Selects the stroke style.
        role: LineRole,
    },
    /// Remove an overlay.
    RemoveOverlay(OverlayId),
    /// Place (or move) the marker in a slot.
    PlaceMarker {
        /// Which marker.
        slot: MarkerSlot,
        /// Where.
        point: LngLat,
        /// Optional attached label.
        label: Option<String>,
    },
    /// Remove the marker in a slot.
    RemoveMarker(MarkerSlot),
    /// Remove every overlay and marker in the given categories.
    Clear(OverlayCategory),
}

impl Effect {
    pub(crate) fn draw_shape(shape: &Shape) -> Self {
        Self::UpsertShape {
            id: shape.id.overlay_id(),
            geometry: shape.geometry.clone(),
            color: shape.color,
            category: shape.kind.category(),
        }
    }

    pub(crate) fn line(id: &str, points: &[LngLat], role: LineRole) -> Self {
        Self::UpsertLine {
            id: OverlayId::new(id),
            points: points.to_vec(),
            role,
        }
    }
}
