// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rejected inputs.

use alloc::string::String;
use core::fmt;

use crate::ShapeId;

/// Broad classification of an [`InteractionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input value itself was unusable.
    InvalidInput,
    /// The input was fine but the current state does not allow it.
    MissingPrecondition,
}

/// Why an input was rejected.
///
/// A rejected input never changes any state.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionError {
    /// A radius was not a finite positive number.
    InvalidRadius {
        /// The offending input as given.
        input: String,
    },
    /// A radius was submitted before a center was placed.
    MissingCenter,
    /// A polygon was committed with fewer than three vertices.
    TooFewVertices {
        /// Vertices collected so far.
        have: usize,
    },
    /// Exclusion needs exactly one selected shape.
    ExcludeNeedsSingleSelection {
        /// Shapes currently selected.
        selected: usize,
    },
    /// The shape does not exist.
    UnknownShape(ShapeId),
    /// The shape has no polygon ring to cut a hole into.
    NoOuterRing(ShapeId),
    /// Delete-selected was requested with nothing selected.
    NothingSelected,
    /// Undo found nothing to revert.
    NothingToUndo,
}

impl InteractionError {
    /// Classification of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRadius { .. } | Self::UnknownShape(_) => ErrorKind::InvalidInput,
            Self::MissingCenter
            | Self::TooFewVertices { .. }
            | Self::ExcludeNeedsSingleSelection { .. }
            | Self::NoOuterRing(_)
            | Self::NothingSelected
            | Self::NothingToUndo => ErrorKind::MissingPrecondition,
        }
    }
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius { input } => {
                write!(f, "invalid radius `{input}`: expected a positive number")
            }
            Self::MissingCenter => f.write_str("place a center point before entering a radius"),
            Self::TooFewVertices { have } => {
                write!(f, "a polygon needs at least 3 vertices, have {have}")
            }
            Self::ExcludeNeedsSingleSelection { selected } => write!(
                f,
                "select exactly one polygon to exclude from, {selected} selected"
            ),
            Self::UnknownShape(id) => write!(f, "no shape with id {id}"),
            Self::NoOuterRing(id) => write!(f, "shape {id} has no polygon to exclude from"),
            Self::NothingSelected => f.write_str("nothing is selected"),
            Self::NothingToUndo => f.write_str("nothing to undo"),
        }
    }
}

impl core::error::Error for InteractionError {}
