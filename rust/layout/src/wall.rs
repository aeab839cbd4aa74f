// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A wall: its geometry, its openings and its derived segments.

use crate::keys::OpeningKey;
use crate::layout::{SegmentSet, WallExtent};
use crate::shape::{WallFrame, WallGeometry};
use crate::topology::WallSlot;

/// One wall of a room.
///
/// Length and frame are derived from the room shape and recomputed on every
/// update; the opening list is kept sorted by offset; segments are rebuilt
/// from scratch on every layout pass.
#[derive(Debug, Clone)]
pub struct Wall {
    pub(crate) slot: WallSlot,
    pub(crate) geometry: WallGeometry,
    pub(crate) openings: Vec<OpeningKey>,
    pub(crate) segments: SegmentSet,
}

impl Wall {
    pub(crate) fn new(slot: WallSlot, geometry: WallGeometry) -> Self {
        Self {
            slot,
            geometry,
            openings: Vec::new(),
            segments: SegmentSet::default(),
        }
    }

    pub fn slot(&self) -> WallSlot {
        self.slot
    }

    /// Interior length; openings are placed in `[0, length]`.
    pub fn length(&self) -> f64 {
        self.geometry.length
    }

    pub fn frame(&self) -> &WallFrame {
        &self.geometry.frame
    }

    pub fn extent(&self) -> WallExtent {
        self.geometry.extent()
    }

    /// Openings on this wall, sorted by offset.
    pub fn openings(&self) -> &[OpeningKey] {
        &self.openings
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }
}
