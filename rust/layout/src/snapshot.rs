// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable view of a laid-out room, for inspection and tooling.

use serde::Serialize;

use crate::layout::SegmentSet;
use crate::opening::Opening;
use crate::room::Room;
use crate::shape::{Dimensions, Panel};
use crate::topology::{RoomTopology, WallSlot};

#[derive(Debug, Clone, Serialize)]
pub struct RoomSnapshot {
    pub topology: RoomTopology,
    pub dimensions: Dimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner: Option<[f64; 2]>,
    pub walls: Vec<WallSnapshot>,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WallSnapshot {
    pub slot: WallSlot,
    pub length: f64,
    pub origin: [f64; 3],
    pub yaw: f64,
    pub cap_start: f64,
    pub cap_end: f64,
    pub openings: Vec<Opening>,
    pub segments: SegmentSet,
}

impl Room {
    pub fn snapshot(&self) -> RoomSnapshot {
        let walls = self
            .walls()
            .iter()
            .map(|wall| {
                let frame = wall.frame();
                WallSnapshot {
                    slot: wall.slot(),
                    length: wall.length(),
                    origin: [frame.origin.x, frame.origin.y, frame.origin.z],
                    yaw: frame.yaw,
                    cap_start: frame.cap_start,
                    cap_end: frame.cap_end,
                    openings: wall
                        .openings()
                        .iter()
                        .filter_map(|key| self.opening(*key).ok().cloned())
                        .collect(),
                    segments: wall.segments().clone(),
                }
            })
            .collect();

        RoomSnapshot {
            topology: self.topology(),
            dimensions: self.dimensions(),
            corner: self.corner().map(|c| [c.x, c.y]),
            walls,
            panels: self.panels().to_vec(),
        }
    }
}
