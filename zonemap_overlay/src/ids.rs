// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay identifiers and categories.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Identifier of one overlay: a source plus the layers drawn from it.
///
/// Layer ids are derived from the overlay id, so a single id is enough to
/// find and remove everything an overlay put on the map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(String);

impl OverlayId {
    /// Wraps a string identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier, which doubles as the source id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the fill layer drawn for areal overlays.
    #[must_use]
    pub fn fill_layer(&self) -> String {
        format!("{}-fill", self.0)
    }

    /// Id of the outline layer drawn for areal overlays.
    #[must_use]
    pub fn outline_layer(&self) -> String {
        format!("{}-outline", self.0)
    }

    /// Id of the layer drawn for line overlays.
    #[must_use]
    pub fn line_layer(&self) -> String {
        format!("{}-line", self.0)
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OverlayId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

bitflags::bitflags! {
    /// Families of overlays that are cleared together.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OverlayCategory: u8 {
        /// Shapes drawn by the user.
        const DRAWN       = 0b0000_0001;
        /// Shapes ingested from uploads or search results.
        const UPLOADED    = 0b0000_0010;
        /// Selection highlights.
        const HIGHLIGHT   = 0b0000_0100;
        /// In-progress drawing artifacts: preview line and vertex markers.
        const PREVIEW     = 0b0000_1000;
        /// Measurement line, markers and distance labels.
        const MEASUREMENT = 0b0001_0000;
        /// Everything that belongs to an unfinished interaction.
        const TRANSIENT = Self::PREVIEW.bits() | Self::MEASUREMENT.bits();
    }
}
