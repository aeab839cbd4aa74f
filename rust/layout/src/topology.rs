// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room topologies and the wall slots they own.
//!
//! Room space: `x` runs along the room length, `y` along the room width,
//! `z` is up. A rectangular room spans `[0, length] x [0, width]`. An
//! L-shaped room is the same bounding rectangle with the notch
//! `[corner.x, length] x [corner.y, width]` cut away.

use serde::{Deserialize, Serialize};

/// Shape of the room footprint. Fixed at room creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomTopology {
    Rectangular,
    LShaped,
}

const RECTANGULAR_SLOTS: [WallSlot; 4] =
    [WallSlot::North, WallSlot::South, WallSlot::West, WallSlot::East];

const L_SHAPED_SLOTS: [WallSlot; 6] = [
    WallSlot::North,
    WallSlot::South,
    WallSlot::West,
    WallSlot::East,
    WallSlot::NorthEast,
    WallSlot::SouthEast,
];

impl RoomTopology {
    /// Wall slots owned by this topology, in storage order.
    pub fn slots(self) -> &'static [WallSlot] {
        match self {
            RoomTopology::Rectangular => &RECTANGULAR_SLOTS,
            RoomTopology::LShaped => &L_SHAPED_SLOTS,
        }
    }

    /// Storage index of `slot`, or `None` if the topology has no such wall.
    pub fn slot_index(self, slot: WallSlot) -> Option<usize> {
        self.slots().iter().position(|s| *s == slot)
    }

    /// Number of floor (and ceiling) panels.
    pub fn panel_count(self) -> usize {
        match self {
            RoomTopology::Rectangular => 1,
            RoomTopology::LShaped => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoomTopology::Rectangular => "rectangular",
            RoomTopology::LShaped => "L-shaped",
        }
    }
}

impl std::fmt::Display for RoomTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a wall by the direction it faces.
///
/// `North` is the `x = length` wall, `South` the `x = 0` wall, `West` the
/// `y = 0` wall and `East` the `y = width` wall. In an L-shaped room
/// `North` and `East` are shortened by the notch, and `NorthEast` /
/// `SouthEast` bound the notch itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSlot {
    North,
    South,
    West,
    East,
    /// Notch wall at `y = corner.y`, facing `+y`.
    NorthEast,
    /// Notch wall at `x = corner.x`, facing `+x`.
    SouthEast,
}

impl WallSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            WallSlot::North => "North",
            WallSlot::South => "South",
            WallSlot::West => "West",
            WallSlot::East => "East",
            WallSlot::NorthEast => "NorthEast",
            WallSlot::SouthEast => "SouthEast",
        }
    }

    /// Bit used in change-tracking masks.
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Whether the wall's length or position depends on the L-shape corner.
    pub fn depends_on_corner(self) -> bool {
        matches!(
            self,
            WallSlot::North | WallSlot::East | WallSlot::NorthEast | WallSlot::SouthEast
        )
    }
}

impl std::fmt::Display for WallSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
