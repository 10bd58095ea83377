// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay styling configuration.

use peniko::Color;

/// Appearance of point markers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color.
    pub fill: Color,
    /// Ring color.
    pub stroke: Color,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill: Color::from_rgba8(0xff, 0xff, 0xff, 0xff),
            stroke: Color::from_rgba8(0x25, 0x63, 0xeb, 0xff),
        }
    }
}

/// What a line overlay represents; selects its stroke style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Dashed preview through the vertices of a polygon being drawn.
    Preview,
    /// Solid line connecting measurement points.
    Measure,
}

/// Colors, opacities and widths used by [`OverlayManager`](crate::OverlayManager).
///
/// Shape colors come from the shape itself; everything else is fixed here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Fill color of selection highlights.
    pub highlight_fill: Color,
    /// Fill opacity of selection highlights (kept low so the map shows through).
    pub highlight_fill_opacity: f32,
    /// Outline color of selection highlights.
    pub highlight_outline: Color,
    /// Outline width of selection highlights.
    pub highlight_outline_width: f64,
    /// Fill opacity of plain shapes.
    pub shape_fill_opacity: f32,
    /// Outline width of plain shapes.
    pub shape_outline_width: f64,
    /// Stroke color of the drawing preview.
    pub preview_line: Color,
    /// Dash pattern of the drawing preview.
    pub preview_dash: [f64; 2],
    /// Stroke color of the measurement line.
    pub measure_line: Color,
    /// Stroke width of preview and measurement lines.
    pub line_width: f64,
    /// Point markers.
    pub marker: MarkerStyle,
}

impl OverlayStyle {
    /// Stroke color and dash for a line of the given role.
    #[must_use]
    pub fn line(&self, role: LineRole) -> (Color, Option<[f64; 2]>) {
        match role {
            LineRole::Preview => (self.preview_line, Some(self.preview_dash)),
            LineRole::Measure => (self.measure_line, None),
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            highlight_fill: Color::from_rgba8(0xfa, 0xcc, 0x15, 0xff),
            highlight_fill_opacity: 0.2,
            highlight_outline: Color::from_rgba8(0xea, 0x58, 0x0c, 0xff),
            highlight_outline_width: 3.0,
            shape_fill_opacity: 0.3,
            shape_outline_width: 2.0,
            preview_line: Color::from_rgba8(0x25, 0x63, 0xeb, 0xff),
            preview_dash: [2.0, 2.0],
            measure_line: Color::from_rgba8(0xdc, 0x26, 0x26, 0xff),
            line_width: 2.0,
            marker: MarkerStyle::default(),
        }
    }
}
