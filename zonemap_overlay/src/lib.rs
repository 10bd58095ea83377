// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zonemap Overlay: idempotent overlay management over a map surface.
//!
//! A map renderer keeps a registry of _sources_ (geometry data), _layers_
//! (styled views of a source) and DOM-like _markers_. Renderers tend to be
//! strict about that registry: adding a layer id twice, or removing one that
//! is not there, is an error. Interaction code on the other hand has many
//! overlapping cleanup paths (mode switches, undo, delete-all).
//!
//! This crate sits between the two:
//!
//! - [`MapSurface`] is the seam to the renderer. Hosts implement it over their
//!   map library; tests use the headless [`RecordingSurface`].
//! - [`OverlayManager`] creates uniquely identified overlays from geometry and
//!   guarantees that upserts replace rather than duplicate, and that removals of
//!   absent ids are no-ops. It also tracks overlays by [`OverlayCategory`] so a
//!   whole family (for example every transient preview) can be cleared at once.
//! - Markers come back as a [`MarkerHandle`]; a marker's attached label is
//!   always removed together with the marker.
//!
//! ## Minimal example
//!
//! ```rust
//! use zonemap_geometry::{Geometry, LngLat};
//! use zonemap_overlay::{
//!     OverlayCategory, OverlayId, OverlayManager, OverlayStyle, RecordingSurface,
//! };
//!
//! let mut overlays = OverlayManager::new(RecordingSurface::new(), OverlayStyle::default());
//! let id = OverlayId::new("shape-1");
//! let square = Geometry::polygon(vec![
//!     LngLat::new(0.0, 0.0),
//!     LngLat::new(1.0, 0.0),
//!     LngLat::new(1.0, 1.0),
//!     LngLat::new(0.0, 0.0),
//! ]);
//!
//! // Upserting twice replaces the layers instead of duplicating them.
//! let color = overlays.style().highlight_outline;
//! overlays.upsert_shape(&id, &square, color, OverlayCategory::DRAWN);
//! overlays.upsert_shape(&id, &square, color, OverlayCategory::DRAWN);
//! assert_eq!(overlays.surface().layers().len(), 2);
//!
//! // Removing twice is fine.
//! overlays.remove_overlay(&id);
//! overlays.remove_overlay(&id);
//! assert!(overlays.surface().violations().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod ids;
mod manager;
mod recording;
mod style;
mod surface;

pub use ids::{OverlayCategory, OverlayId};
pub use manager::{MarkerHandle, OverlayManager};
pub use recording::{RecordingSurface, Violation};
pub use style::{LineRole, MarkerStyle, OverlayStyle};
pub use surface::{
    LabelId, LayerPaint, LayerSpec, MapSurface, MarkerId, Properties, PropertyValue,
    RenderedFeature, SourceData, SourceFeature,
};
