// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-progress drawing and measurement sessions.

use alloc::vec::Vec;

use smallvec::SmallVec;
use zonemap_geometry::{LngLat, distance_km};

/// What a [`DrawingSession`] is collecting points for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Polygon vertices.
    Polygon,
    /// Circle center, awaiting the radius click.
    Circle,
    /// Circle center, awaiting a typed radius.
    Radius,
}

/// Points collected for a shape that has not been committed yet.
///
/// A session exists only while it holds at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingSession {
    kind: SessionKind,
    points: SmallVec<[LngLat; 8]>,
}

impl DrawingSession {
    pub(crate) fn starting_at(kind: SessionKind, point: LngLat) -> Self {
        let mut points = SmallVec::new();
        points.push(point);
        Self { kind, points }
    }

    /// What the session is for.
    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Collected points in click order.
    #[must_use]
    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    /// Number of collected points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when no points are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point; the center for circle and radius sessions.
    #[must_use]
    pub fn first(&self) -> Option<LngLat> {
        self.points.first().copied()
    }

    /// The most recent point.
    #[must_use]
    pub fn last(&self) -> Option<LngLat> {
        self.points.last().copied()
    }

    pub(crate) fn push(&mut self, point: LngLat) {
        self.points.push(point);
    }

    pub(crate) fn pop(&mut self) -> Option<LngLat> {
        self.points.pop()
    }
}

/// Measurement points and the running path length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementSession {
    points: Vec<LngLat>,
    total_km: f64,
}

impl MeasurementSession {
    /// Measurement points in click order.
    #[must_use]
    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when nothing has been measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cumulative great-circle length of the path in kilometers.
    #[must_use]
    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    /// Appends a point and returns the new running total.
    pub(crate) fn push(&mut self, point: LngLat) -> f64 {
        if let Some(&last) = self.points.last() {
            self.total_km += distance_km(last, point);
        }
        self.points.push(point);
        self.total_km
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.total_km = 0.0;
    }
}
