// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Creation-ordered undo history of drawn shapes.

use alloc::vec::Vec;

use crate::{ShapeId, ShapeKind};

/// One drawn shape, in the order it was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The shape.
    pub shape: ShapeId,
    /// Its kind; always a drawn kind.
    pub kind: ShapeKind,
    /// Monotonic creation order.
    pub order: u64,
}

/// Undo stack of drawn shapes.
///
/// Entries are removed together with their shape, so the history never names
/// a shape that no longer exists.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_order: u64,
}

impl History {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there is nothing to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub(crate) fn push(&mut self, shape: ShapeId, kind: ShapeKind) {
        let order = self.next_order;
        self.next_order += 1;
        self.entries.push(HistoryEntry { shape, kind, order });
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub(crate) fn remove_shape(&mut self, shape: ShapeId) {
        self.entries.retain(|e| e.shape != shape);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
