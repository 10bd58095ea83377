// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pure interaction state machine.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use zonemap_geometry::{
    Geometry, LngLat, close_ring, distance_km, format_distance_km, polygon_from_center_radius,
};
use zonemap_overlay::{LineRole, OverlayCategory, OverlayId, Properties};

use crate::{
    DrawingSession, Effect, Feature, History, InteractionConfig, InteractionError,
    MEASURE_LINE, MarkerSlot, MeasurementSession, Mode, ModeTicket, PREVIEW_LINE, PolygonIntent,
    SelectionSet, SessionKind, Shape, ShapeId, ShapeKind, ShapeStore, UploadedShape,
};

/// Everything the user can do.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// Switch to a mode; re-selecting the active mode is a no-op.
    SetMode(Mode),
    /// Enter measure mode, or leave it for select mode if already measuring.
    ToggleMeasure,
    /// Draw a polygon that becomes a hole in the selected shape.
    BeginExclude,
    /// Draw a polygon that replaces the given shape's geometry.
    BeginEdit(ShapeId),
    /// A map click, with the feature under the pointer if any.
    Click {
        /// Click location.
        point: LngLat,
        /// Topmost selectable feature at `point`.
        hit: Option<Feature>,
    },
    /// Commits the polygon being drawn.
    DoubleClick,
    /// A typed radius in the configured unit.
    SubmitRadius(f64),
    /// Revert the most recent thing.
    Undo,
    /// Abandon the in-progress session and any exclude/edit intent.
    Cancel,
    /// Delete every selected shape.
    DeleteSelected,
    /// Remove everything and return to select mode.
    DeleteAll,
    /// Ingest uploaded polygons.
    AddUploaded(Vec<UploadedShape>),
}

impl Input {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetMode(_) => "set_mode",
            Self::ToggleMeasure => "toggle_measure",
            Self::BeginExclude => "begin_exclude",
            Self::BeginEdit(_) => "begin_edit",
            Self::Click { .. } => "click",
            Self::DoubleClick => "double_click",
            Self::SubmitRadius(_) => "submit_radius",
            Self::Undo => "undo",
            Self::Cancel => "cancel",
            Self::DeleteSelected => "delete_selected",
            Self::DeleteAll => "delete_all",
            Self::AddUploaded(_) => "add_uploaded",
        }
    }
}

/// Parses a typed radius.
///
/// Only the syntax is checked here; range checks happen when the radius is
/// submitted.
pub fn parse_radius(text: &str) -> Result<f64, InteractionError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| InteractionError::InvalidRadius { input: text.into() })
}

/// Modes, sessions, shapes, selection and history.
///
/// [`apply`](Self::apply) is the only way to change anything. It either
/// returns the overlay [`Effect`]s that bring the map in line with the new
/// state, or an error and leaves the state untouched.
#[derive(Clone, Debug)]
pub struct InteractionState {
    config: InteractionConfig,
    mode: Mode,
    intent: PolygonIntent,
    epoch: u64,
    drawing: Option<DrawingSession>,
    measurement: MeasurementSession,
    shapes: ShapeStore,
    selection: SelectionSet,
    history: History,
    next_shape: u64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionState {
    /// Creates an empty state in [`Mode::Select`].
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            mode: Mode::Select,
            intent: PolygonIntent::Create,
            epoch: 0,
            drawing: None,
            measurement: MeasurementSession::default(),
            shapes: ShapeStore::default(),
            selection: SelectionSet::default(),
            history: History::default(),
            next_shape: 0,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// How a committed polygon will be applied.
    #[must_use]
    pub fn intent(&self) -> PolygonIntent {
        self.intent
    }

    /// A ticket for the current mode, to hand to asynchronous work.
    #[must_use]
    pub fn ticket(&self) -> ModeTicket {
        ModeTicket {
            mode: self.mode,
            epoch: self.epoch,
        }
    }

    /// The in-progress drawing session.
    #[must_use]
    pub fn drawing(&self) -> Option<&DrawingSession> {
        self.drawing.as_ref()
    }

    /// The measurement session.
    #[must_use]
    pub fn measurement(&self) -> &MeasurementSession {
        &self.measurement
    }

    /// Live shapes.
    #[must_use]
    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Undo history of drawn shapes.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Applies `input` only if `ticket` is still current.
    ///
    /// A stale ticket yields no effects and no error.
    pub fn apply_async(
        &mut self,
        ticket: ModeTicket,
        input: Input,
    ) -> Result<Vec<Effect>, InteractionError> {
        if ticket != self.ticket() {
            tracing::debug!(
                input = input.name(),
                issued = ?ticket.mode,
                current = ?self.mode,
                "dropping input from a stale mode"
            );
            return Ok(Vec::new());
        }
        self.apply(input)
    }

    /// Applies one input.
    pub fn apply(&mut self, input: Input) -> Result<Vec<Effect>, InteractionError> {
        let mut fx = Vec::new();
        match input {
            Input::SetMode(mode) => self.enter_mode(mode, PolygonIntent::Create, &mut fx),
            Input::ToggleMeasure => {
                let next = if self.mode == Mode::Measure {
                    Mode::Select
                } else {
                    Mode::Measure
                };
                self.enter_mode(next, PolygonIntent::Create, &mut fx);
            }
            Input::BeginExclude => {
                let selected = self.selection.shapes().len();
                if selected != 1 {
                    return Err(InteractionError::ExcludeNeedsSingleSelection { selected });
                }
                self.enter_mode(Mode::DrawPolygon, PolygonIntent::Exclude, &mut fx);
            }
            Input::BeginEdit(id) => {
                if self.shapes.get(id).is_none() {
                    return Err(InteractionError::UnknownShape(id));
                }
                self.enter_mode(Mode::DrawPolygon, PolygonIntent::Edit(id), &mut fx);
            }
            Input::Click { point, hit } => self.click(point, hit, &mut fx)?,
            Input::DoubleClick => self.commit_polygon(&mut fx)?,
            Input::SubmitRadius(value) => self.submit_radius(value, &mut fx)?,
            Input::Undo => self.undo(&mut fx)?,
            Input::Cancel => {
                self.discard_sessions(&mut fx);
                self.set_intent(PolygonIntent::Create);
            }
            Input::DeleteSelected => {
                let doomed: Vec<ShapeId> = self.selection.shapes().to_vec();
                if doomed.is_empty() {
                    return Err(InteractionError::NothingSelected);
                }
                for id in doomed {
                    self.remove_shape(id, &mut fx);
                }
            }
            Input::DeleteAll => self.reset(&mut fx),
            Input::AddUploaded(uploads) => {
                for upload in uploads {
                    if !upload.geometry.has_outer_ring() {
                        tracing::debug!("skipping upload with no polygon ring");
                        continue;
                    }
                    self.commit_shape(
                        ShapeKind::UploadedPolygon,
                        upload.geometry,
                        upload.properties,
                        &mut fx,
                    );
                }
            }
        }
        Ok(fx)
    }

    fn enter_mode(&mut self, mode: Mode, intent: PolygonIntent, fx: &mut Vec<Effect>) {
        if self.mode == mode && self.intent == intent {
            return;
        }
        self.discard_sessions(fx);
        self.mode = mode;
        self.intent = intent;
        self.epoch += 1;
        tracing::debug!(?mode, ?intent, "entered mode");
    }

    fn set_intent(&mut self, intent: PolygonIntent) {
        if self.intent != intent {
            self.intent = intent;
            self.epoch += 1;
        }
    }

    /// Drops drawing and measurement state along with all their overlays.
    fn discard_sessions(&mut self, fx: &mut Vec<Effect>) {
        self.drawing = None;
        self.measurement.clear();
        fx.push(Effect::Clear(OverlayCategory::TRANSIENT));
    }

    fn reset(&mut self, fx: &mut Vec<Effect>) {
        self.drawing = None;
        self.measurement.clear();
        self.shapes.clear();
        self.selection.clear();
        self.history.clear();
        self.mode = Mode::Select;
        self.intent = PolygonIntent::Create;
        self.epoch += 1;
        fx.push(Effect::Clear(OverlayCategory::all()));
        tracing::debug!("reset to an empty map");
    }

    fn click(
        &mut self,
        point: LngLat,
        hit: Option<Feature>,
        fx: &mut Vec<Effect>,
    ) -> Result<(), InteractionError> {
        match self.mode {
            Mode::Select => {
                if let Some(hit) = hit {
                    self.toggle_feature(hit, fx);
                }
            }
            Mode::Measure => self.measure(point, fx),
            Mode::DrawPolygon => self.add_vertex(point, fx),
            Mode::DrawCircle => self.circle_click(point, fx)?,
            Mode::DrawRadius => {
                if self.drawing.is_some() {
                    fx.push(Effect::RemoveMarker(MarkerSlot::Vertex(0)));
                }
                self.drawing = Some(DrawingSession::starting_at(SessionKind::Radius, point));
                fx.push(Effect::PlaceMarker {
                    slot: MarkerSlot::Vertex(0),
                    point,
                    label: None,
                });
            }
        }
        Ok(())
    }

    fn toggle_feature(&mut self, hit: Feature, fx: &mut Vec<Effect>) {
        match hit {
            Feature::Zone(zone) => {
                let highlight = zone.highlight_id();
                let geometry = zone.geometry.clone();
                if self.selection.toggle_zone(zone) {
                    if let Some(geometry) = geometry {
                        fx.push(Effect::UpsertHighlight {
                            id: highlight,
                            geometry,
                        });
                    }
                } else {
                    fx.push(Effect::RemoveOverlay(highlight));
                }
            }
            Feature::Drawn(id) | Feature::Uploaded(id) => {
                let Some(shape) = self.shapes.get(id) else {
                    tracing::debug!(%id, "hit on a shape that no longer exists");
                    return;
                };
                if self.selection.toggle_shape(id) {
                    fx.push(Effect::UpsertHighlight {
                        id: id.highlight_id(),
                        geometry: shape.geometry.clone(),
                    });
                } else {
                    fx.push(Effect::RemoveOverlay(id.highlight_id()));
                }
            }
        }
    }

    fn measure(&mut self, point: LngLat, fx: &mut Vec<Effect>) {
        let index = self.measurement.len();
        let total = self.measurement.push(point);
        fx.push(Effect::PlaceMarker {
            slot: MarkerSlot::Measure(index),
            point,
            label: Some(format_distance_km(total)),
        });
        if self.measurement.len() >= 2 {
            fx.push(Effect::line(
                MEASURE_LINE,
                self.measurement.points(),
                LineRole::Measure,
            ));
        }
    }

    fn add_vertex(&mut self, point: LngLat, fx: &mut Vec<Effect>) {
        match &mut self.drawing {
            Some(session) if session.last() == Some(point) => return,
            Some(session) => session.push(point),
            None => {
                self.drawing = Some(DrawingSession::starting_at(SessionKind::Polygon, point));
            }
        }
        let Some(session) = self.drawing.as_ref() else {
            return;
        };
        fx.push(Effect::PlaceMarker {
            slot: MarkerSlot::Vertex(session.len() - 1),
            point,
            label: None,
        });
        if session.len() >= 2 {
            fx.push(Effect::line(
                PREVIEW_LINE,
                session.points(),
                LineRole::Preview,
            ));
        }
    }

    fn circle_click(
        &mut self,
        point: LngLat,
        fx: &mut Vec<Effect>,
    ) -> Result<(), InteractionError> {
        let Some(center) = self.drawing.as_ref().and_then(DrawingSession::first) else {
            self.drawing = Some(DrawingSession::starting_at(SessionKind::Circle, point));
            fx.push(Effect::PlaceMarker {
                slot: MarkerSlot::Vertex(0),
                point,
                label: None,
            });
            return Ok(());
        };
        let radius_m = distance_km(center, point) * 1000.0;
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(InteractionError::InvalidRadius {
                input: format!("{radius_m}"),
            });
        }
        self.finish_circle(center, radius_m, fx);
        Ok(())
    }

    fn submit_radius(&mut self, value: f64, fx: &mut Vec<Effect>) -> Result<(), InteractionError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(InteractionError::InvalidRadius {
                input: format!("{value}"),
            });
        }
        let center = match (&self.mode, &self.drawing) {
            (Mode::DrawRadius, Some(session)) => session.first(),
            _ => None,
        };
        let Some(center) = center else {
            return Err(InteractionError::MissingCenter);
        };
        let radius_m = self.config.radius_unit.to_meters(value);
        self.finish_circle(center, radius_m, fx);
        Ok(())
    }

    fn finish_circle(&mut self, center: LngLat, radius_m: f64, fx: &mut Vec<Effect>) {
        let ring = polygon_from_center_radius(center, radius_m, self.config.circle_segments);
        self.drawing = None;
        fx.push(Effect::RemoveMarker(MarkerSlot::Vertex(0)));

        let mut properties = Properties::new();
        properties.insert(String::from("center_lng"), center.lng.into());
        properties.insert(String::from("center_lat"), center.lat.into());
        properties.insert(String::from("radius_m"), radius_m.into());
        let id = self.commit_shape(ShapeKind::DrawnCircle, Geometry::polygon(ring), properties, fx);
        tracing::debug!(%id, radius_m, "circle committed");

        self.enter_mode(Mode::Select, PolygonIntent::Create, fx);
    }

    fn commit_polygon(&mut self, fx: &mut Vec<Effect>) -> Result<(), InteractionError> {
        if self.mode != Mode::DrawPolygon {
            return Ok(());
        }
        let ring = self
            .drawing
            .as_ref()
            .map(|session| close_ring(session.points()))
            .unwrap_or_default();
        // Closed rings repeat their first vertex.
        let have = ring.len().saturating_sub(1);
        if have < 3 {
            return Err(InteractionError::TooFewVertices { have });
        }
        let replacement = match self.intent {
            PolygonIntent::Create => None,
            PolygonIntent::Exclude => {
                let id = match self.selection.shapes() {
                    [only] => *only,
                    selected => {
                        return Err(InteractionError::ExcludeNeedsSingleSelection {
                            selected: selected.len(),
                        });
                    }
                };
                let Some(shape) = self.shapes.get(id) else {
                    return Err(InteractionError::UnknownShape(id));
                };
                let mut geometry = shape.geometry.clone();
                if !geometry.insert_hole(ring.clone()) {
                    return Err(InteractionError::NoOuterRing(id));
                }
                Some((id, geometry))
            }
            PolygonIntent::Edit(id) => {
                if self.shapes.get(id).is_none() {
                    return Err(InteractionError::UnknownShape(id));
                }
                Some((id, Geometry::polygon(ring.clone())))
            }
        };

        let Some(session) = self.drawing.take() else {
            return Ok(());
        };
        for index in 0..session.len() {
            fx.push(Effect::RemoveMarker(MarkerSlot::Vertex(index)));
        }
        fx.push(Effect::RemoveOverlay(OverlayId::new(PREVIEW_LINE)));

        if let Some((id, geometry)) = replacement {
            self.reshape(id, geometry, fx);
            tracing::debug!(%id, intent = ?self.intent, "shape reshaped");
        } else {
            let geometry = Geometry::polygon(ring);
            let id = self.commit_shape(ShapeKind::DrawnPolygon, geometry, Properties::new(), fx);
            tracing::debug!(%id, vertices = have, "polygon committed");
        }
        self.set_intent(PolygonIntent::Create);
        Ok(())
    }

    /// Replaces a shape's geometry and redraws it and its highlight.
    fn reshape(&mut self, id: ShapeId, geometry: Geometry, fx: &mut Vec<Effect>) {
        let Some(shape) = self.shapes.get_mut(id) else {
            return;
        };
        shape.geometry = geometry;
        fx.push(Effect::draw_shape(shape));
        if self.selection.contains_shape(id) {
            fx.push(Effect::UpsertHighlight {
                id: id.highlight_id(),
                geometry: shape.geometry.clone(),
            });
        }
    }

    fn commit_shape(
        &mut self,
        kind: ShapeKind,
        geometry: Geometry,
        properties: Properties,
        fx: &mut Vec<Effect>,
    ) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        let shape = Shape {
            id,
            kind,
            geometry,
            properties,
            color: self.config.palette.color_for(kind),
        };
        fx.push(Effect::draw_shape(&shape));
        if kind.is_drawn() {
            self.history.push(id, kind);
            self.selection.select_shape(id);
            fx.push(Effect::UpsertHighlight {
                id: id.highlight_id(),
                geometry: shape.geometry.clone(),
            });
        }
        self.shapes.insert(shape);
        id
    }

    fn remove_shape(&mut self, id: ShapeId, fx: &mut Vec<Effect>) {
        if self.shapes.remove(id).is_some() {
            fx.push(Effect::RemoveOverlay(id.overlay_id()));
        }
        if self.selection.deselect_shape(id) {
            fx.push(Effect::RemoveOverlay(id.highlight_id()));
        }
        self.history.remove_shape(id);
        if self.intent == PolygonIntent::Edit(id) {
            self.set_intent(PolygonIntent::Create);
        }
    }

    fn undo(&mut self, fx: &mut Vec<Effect>) -> Result<(), InteractionError> {
        if let Some(session) = self.drawing.as_mut()
            && session.pop().is_some()
        {
            let remaining = session.len();
            fx.push(Effect::RemoveMarker(MarkerSlot::Vertex(remaining)));
            if remaining >= 2 {
                fx.push(Effect::line(
                    PREVIEW_LINE,
                    session.points(),
                    LineRole::Preview,
                ));
            } else {
                fx.push(Effect::RemoveOverlay(OverlayId::new(PREVIEW_LINE)));
            }
            if remaining == 0 {
                self.drawing = None;
            }
            return Ok(());
        }

        if self.mode == Mode::Select
            && let Some(zone) = self.selection.pop_last_zone()
        {
            fx.push(Effect::RemoveOverlay(zone.highlight_id()));
            return Ok(());
        }

        if let Some(entry) = self.history.pop() {
            self.remove_shape(entry.shape, fx);
            tracing::debug!(id = %entry.shape, "undid shape");
            return Ok(());
        }

        Err(InteractionError::NothingToUndo)
    }
}
