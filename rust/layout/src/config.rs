// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room configuration.
//!
//! All values are in centimetres. The configuration is passed explicitly to
//! the layout engine and placement policy; nothing is read from ambient
//! state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::topology::RoomTopology;

/// Scalar configuration of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Initial room extent along `x`.
    pub length: f64,
    /// Initial room extent along `y`.
    pub width: f64,
    /// Initial wall height.
    pub height: f64,
    /// Wall thickness.
    pub wall_offset: f64,
    /// Depth of door meshes along the wall normal.
    pub door_offset: f64,
    /// Depth of window meshes along the wall normal.
    pub window_offset: f64,
    /// Sill height of every window.
    pub window_height_offset: f64,
    /// Minimum gap between an opening and a wall end or a neighbouring opening.
    #[serde(alias = "aligment_offset")]
    pub alignment_offset: f64,
    /// Minimum side of either rectangle of an L-shaped room.
    pub minimal_wall_length: f64,
    /// Lower bound of `length` regardless of openings.
    pub min_length: f64,
    /// Lower bound of `width` regardless of openings.
    pub min_width: f64,
    /// Lower bound of `height` regardless of openings.
    pub min_height: f64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            length: 200.0,
            width: 200.0,
            height: 270.0,
            wall_offset: 20.0,
            door_offset: 0.0,
            window_offset: 0.0,
            window_height_offset: 90.0,
            alignment_offset: 20.0,
            minimal_wall_length: 100.0,
            min_length: 200.0,
            min_width: 200.0,
            min_height: 270.0,
        }
    }
}

impl RoomConfig {
    /// Checks that every value is finite and that non-negative quantities are
    /// non-negative.
    ///
    /// `door_offset`/`window_offset` may be negative (meshes pushed outward).
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("wall_offset", self.wall_offset),
            ("door_offset", self.door_offset),
            ("window_offset", self.window_offset),
            ("window_height_offset", self.window_height_offset),
            ("alignment_offset", self.alignment_offset),
            ("minimal_wall_length", self.minimal_wall_length),
            ("min_length", self.min_length),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} is not finite")));
            }
        }

        let non_negative = [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("wall_offset", self.wall_offset),
            ("window_height_offset", self.window_height_offset),
            ("alignment_offset", self.alignment_offset),
            ("minimal_wall_length", self.minimal_wall_length),
            ("min_length", self.min_length),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} is negative ({value})")));
            }
        }

        if self.minimal_wall_length <= 0.0 {
            return Err(Error::InvalidConfig(
                "minimal_wall_length must be positive".into(),
            ));
        }

        Ok(())
    }

    /// [`RoomConfig::validate`] plus the constraints of `topology`.
    ///
    /// An L-shaped room splits its length and width at the corner, so the
    /// minimum length and width must each hold two walls of at least
    /// `minimal_wall_length`.
    pub fn validate_for(&self, topology: RoomTopology) -> Result<()> {
        self.validate()?;

        if topology == RoomTopology::LShaped {
            let needed = 2.0 * self.minimal_wall_length;
            for (name, value) in [("min_length", self.min_length), ("min_width", self.min_width)] {
                if value < needed {
                    return Err(Error::InvalidConfig(format!(
                        "{name} ({value}) must be at least twice minimal_wall_length ({needed}) for an L-shaped room"
                    )));
                }
            }
        }

        Ok(())
    }
}
