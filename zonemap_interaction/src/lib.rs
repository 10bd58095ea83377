// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zonemap Interaction: the mode controller of an evacuation-zone map.
//!
//! The user can select pre-existing zones, measure distances, and draw
//! polygons, click-dragged circles, or circles with a typed radius. Drawn
//! polygons can get holes ("exclude") or be redrawn ("edit"), and an undo
//! stack reverts things in a fixed priority: an in-progress vertex first, then
//! the last selected zone (in select mode), then the last drawn shape.
//!
//! The crate is split into two layers:
//!
//! - [`InteractionState`] is a pure state machine. [`InteractionState::apply`]
//!   takes an [`Input`] and returns the overlay [`Effect`]s it implies, or an
//!   [`InteractionError`] with the state left untouched.
//! - [`Controller`] owns the state and an
//!   [`OverlayManager`](zonemap_overlay::OverlayManager), hit-tests clicks
//!   against the map surface, and executes effects.
//!
//! Asynchronous work (for example parsing an uploaded shapefile) should grab a
//! [`ModeTicket`] before starting and hand it back with the result; results
//! for a mode that has since been left are dropped.
//!
//! ## Minimal example
//!
//! ```rust
//! use zonemap_geometry::LngLat;
//! use zonemap_interaction::{Controller, InteractionConfig, Mode};
//! use zonemap_overlay::RecordingSurface;
//!
//! let mut map = Controller::new(RecordingSurface::new(), InteractionConfig::default());
//! map.set_mode(Mode::DrawPolygon).unwrap();
//! for (lng, lat) in [(-117.0, 32.0), (-117.0, 32.1), (-116.9, 32.1)] {
//!     map.click(LngLat::new(lng, lat)).unwrap();
//! }
//! map.double_click().unwrap();
//!
//! assert_eq!(map.history().len(), 1);
//! assert_eq!(map.selected_shapes().count(), 1);
//!
//! map.undo().unwrap();
//! assert!(map.history().is_empty());
//! assert!(map.surface().violations().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod effect;
mod error;
mod feature;
mod history;
mod mode;
mod selection;
mod session;
mod state;

pub use config::{InteractionConfig, RadiusUnit, ShapePalette};
pub use controller::Controller;
pub use effect::{Effect, MEASURE_LINE, MarkerSlot, PREVIEW_LINE};
pub use error::{ErrorKind, InteractionError};
pub use feature::{
    Feature, FeatureKey, Shape, ShapeId, ShapeKind, ShapeStore, UploadedShape, ZoneFeature,
    ZoneKey,
};
pub use history::{History, HistoryEntry};
pub use mode::{Mode, ModeTicket, PolygonIntent};
pub use selection::SelectionSet;
pub use session::{DrawingSession, MeasurementSession, SessionKind};
pub use state::{Input, InteractionState, parse_radius};
