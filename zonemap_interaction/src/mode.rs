// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction modes.

use crate::ShapeId;

/// The mutually exclusive top-level interaction modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Clicks toggle zone and shape selection.
    #[default]
    Select,
    /// Clicks add measurement points.
    Measure,
    /// Clicks add polygon vertices; a double-click commits.
    DrawPolygon,
    /// First click sets the center, second click sets the radius.
    DrawCircle,
    /// Click sets the center; the radius is typed in.
    DrawRadius,
}

impl Mode {
    /// Returns `true` for the three drawing modes.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::DrawPolygon | Self::DrawCircle | Self::DrawRadius)
    }
}

/// How a committed polygon is applied while in [`Mode::DrawPolygon`].
///
/// Being an enum, at most one of exclude and edit can be active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PolygonIntent {
    /// Store the polygon as a new drawn shape.
    #[default]
    Create,
    /// Punch the polygon as a hole into the single selected shape.
    Exclude,
    /// Replace the geometry of the given shape.
    Edit(ShapeId),
}

/// Identifies the mode an asynchronous operation was started in.
///
/// Every mode or intent change (and every reset) invalidates previously issued
/// tickets, so results that arrive late are dropped instead of landing in an
/// unrelated mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModeTicket {
    pub(crate) mode: Mode,
    pub(crate) epoch: u64,
}

impl ModeTicket {
    /// The mode that was active when the ticket was issued.
    #[must_use]
    pub fn mode(self) -> Mode {
        self.mode
    }
}
