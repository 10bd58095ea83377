// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives [`InteractionState`] against a map surface.

use alloc::vec::Vec;

use hashbrown::HashMap;
use zonemap_geometry::LngLat;
use zonemap_overlay::{MapSurface, MarkerHandle, OverlayCategory, OverlayManager};

use crate::{
    Effect, Feature, History, Input, InteractionConfig, InteractionError, InteractionState,
    MarkerSlot, Mode, ModeTicket, Shape, ShapeId, UploadedShape, ZoneFeature, parse_radius,
};

/// The single owner of interaction state and map overlays.
///
/// Each method forwards one [`Input`] to the state machine and, if accepted,
/// executes the resulting [`Effect`]s through an [`OverlayManager`]. Clicks in
/// select mode are hit-tested here: zone layers first, then shape layers, and
/// only the first hit counts.
#[derive(Debug)]
pub struct Controller<S> {
    state: InteractionState,
    overlays: OverlayManager<S>,
    markers: HashMap<MarkerSlot, MarkerHandle>,
}

impl<S: MapSurface> Controller<S> {
    /// Creates a controller in [`Mode::Select`] over `surface`.
    pub fn new(surface: S, config: InteractionConfig) -> Self {
        let overlays = OverlayManager::new(surface, config.overlay);
        Self {
            state: InteractionState::new(config),
            overlays,
            markers: HashMap::new(),
        }
    }

    /// The state machine.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The overlay manager.
    pub fn overlays(&self) -> &OverlayManager<S> {
        &self.overlays
    }

    /// The map surface.
    pub fn surface(&self) -> &S {
        self.overlays.surface()
    }

    /// Mutable access to the map surface, for host-owned layers.
    pub fn surface_mut(&mut self) -> &mut S {
        self.overlays.surface_mut()
    }

    /// Consumes the controller, returning the map surface.
    pub fn into_surface(self) -> S {
        self.overlays.into_surface()
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// A ticket for asynchronous work started now.
    pub fn ticket(&self) -> ModeTicket {
        self.state.ticket()
    }

    /// Selected zones, oldest first.
    pub fn selected_zones(&self) -> impl Iterator<Item = &ZoneFeature> + '_ {
        self.state.selection().zones()
    }

    /// Selected shapes, oldest first.
    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        let shapes = self.state.shapes();
        self.state
            .selection()
            .shapes()
            .iter()
            .filter_map(move |id| shapes.get(*id))
    }

    /// Undo history of drawn shapes.
    pub fn history(&self) -> &History {
        self.state.history()
    }

    /// Switches mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), InteractionError> {
        self.apply(Input::SetMode(mode))
    }

    /// Toggles measure mode.
    pub fn toggle_measure(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::ToggleMeasure)
    }

    /// Starts drawing a hole for the single selected shape.
    pub fn begin_exclude(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::BeginExclude)
    }

    /// Starts drawing a replacement for a shape's geometry.
    pub fn begin_edit(&mut self, id: ShapeId) -> Result<(), InteractionError> {
        self.apply(Input::BeginEdit(id))
    }

    /// Handles a map click.
    pub fn click(&mut self, point: LngLat) -> Result<(), InteractionError> {
        let hit = if self.state.mode() == Mode::Select {
            self.hit_test(point)
        } else {
            None
        };
        self.apply(Input::Click { point, hit })
    }

    /// Handles a map double-click.
    pub fn double_click(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::DoubleClick)
    }

    /// Handles a typed radius, in the configured unit.
    pub fn submit_radius(&mut self, text: &str) -> Result<(), InteractionError> {
        let value = parse_radius(text).inspect_err(|err| {
            tracing::debug!(%err, "radius rejected");
        })?;
        self.apply(Input::SubmitRadius(value))
    }

    /// Reverts the most recent thing.
    pub fn undo(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::Undo)
    }

    /// Abandons the in-progress session.
    pub fn cancel(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::Cancel)
    }

    /// Deletes the selected shapes.
    pub fn delete_selected(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::DeleteSelected)
    }

    /// Removes everything and returns to select mode.
    pub fn delete_all(&mut self) -> Result<(), InteractionError> {
        self.apply(Input::DeleteAll)
    }

    /// Ingests uploaded polygons, unless the mode changed since `ticket` was issued.
    pub fn add_uploaded(
        &mut self,
        ticket: ModeTicket,
        shapes: Vec<UploadedShape>,
    ) -> Result<(), InteractionError> {
        self.apply_async(ticket, Input::AddUploaded(shapes))
    }

    /// Shows or hides the zone layers.
    pub fn set_zones_visible(&mut self, visible: bool) {
        for layer in &self.state.config().zone_layers {
            self.overlays.set_visibility(layer, visible);
        }
    }

    /// Applies an input and executes its effects.
    pub fn apply(&mut self, input: Input) -> Result<(), InteractionError> {
        tracing::debug!(input = input.name(), mode = ?self.state.mode(), "input");
        let effects = self.state.apply(input).inspect_err(|err| {
            tracing::debug!(%err, "input rejected");
        })?;
        self.execute(effects);
        Ok(())
    }

    /// Applies an input from asynchronous work, dropping it if `ticket` is stale.
    pub fn apply_async(
        &mut self,
        ticket: ModeTicket,
        input: Input,
    ) -> Result<(), InteractionError> {
        let effects = self.state.apply_async(ticket, input).inspect_err(|err| {
            tracing::debug!(%err, "input rejected");
        })?;
        self.execute(effects);
        Ok(())
    }

    fn hit_test(&self, point: LngLat) -> Option<Feature> {
        let config = self.state.config();
        let surface = self.overlays.surface();
        if let Some(zone) = surface
            .query_rendered_features(point, &config.zone_layers)
            .first()
        {
            return Some(Feature::Zone(ZoneFeature::from_rendered(
                zone,
                &config.zone_id_property,
            )));
        }

        let layers = self
            .overlays
            .fill_layers(OverlayCategory::DRAWN | OverlayCategory::UPLOADED);
        if layers.is_empty() {
            return None;
        }
        surface
            .query_rendered_features(point, &layers)
            .first()
            .and_then(|hit| Feature::resolve_shape(hit, self.state.shapes()))
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UpsertShape {
                    id,
                    geometry,
                    color,
                    category,
                } => self.overlays.upsert_shape(&id, &geometry, color, category),
                Effect::UpsertHighlight { id, geometry } => {
                    self.overlays.upsert_highlight(&id, &geometry);
                }
                Effect::UpsertLine { id, points, role } => {
                    self.overlays.upsert_line(&id, &points, role);
                }
                Effect::RemoveOverlay(id) => self.overlays.remove_overlay(&id),
                Effect::PlaceMarker { slot, point, label } => {
                    if let Some(old) = self.markers.remove(&slot) {
                        self.overlays.remove_marker(old);
                    }
                    let handle =
                        self.overlays
                            .add_point_marker(point, label.as_deref(), slot.category());
                    self.markers.insert(slot, handle);
                }
                Effect::RemoveMarker(slot) => {
                    if let Some(handle) = self.markers.remove(&slot) {
                        self.overlays.remove_marker(handle);
                    }
                }
                Effect::Clear(categories) => {
                    self.overlays.clear(categories);
                    self.markers
                        .retain(|slot, _| !slot.category().intersects(categories));
                }
            }
        }
    }
}
