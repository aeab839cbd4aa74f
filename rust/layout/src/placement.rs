// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement and clamp policy.
//!
//! Keeps openings inside their wall, apart from each other by at least the
//! clearance, and keeps room dimensions large enough that no opening is
//! orphaned by a shrinking wall.

use nalgebra::Point2;
use serde::Serialize;

use crate::config::RoomConfig;
use crate::shape::Dimensions;
use crate::topology::{RoomTopology, WallSlot};

/// Tolerance for exact-fit comparisons.
pub const EPSILON: f64 = 1e-9;

/// Half-open interval `[start, end)` along a wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// True if the spans share more than a boundary point.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end - EPSILON && other.start < self.end - EPSILON
    }

    /// Smallest distance between the two spans, zero if they intersect.
    pub fn gap(&self, other: &Span) -> f64 {
        if self.intersects(other) {
            0.0
        } else if self.end <= other.start + EPSILON {
            other.start - self.end
        } else {
            self.start - other.end
        }
    }
}

/// Resolves a desired near-edge offset for an opening of `width` into a final
/// offset that keeps `clearance` to both wall ends and to the neighbouring
/// openings in `occupied`.
///
/// `occupied` must be sorted by `start` and non-overlapping. The left
/// neighbour is the last span starting at or before `desired`; the right
/// neighbour is the first span starting after it. The result is the feasible
/// offset closest to `desired`, or `None` if the gap between the neighbours
/// (or wall ends) cannot hold `width + 2 * clearance`.
pub fn resolve_offset(
    occupied: &[Span],
    wall_length: f64,
    desired: f64,
    width: f64,
    clearance: f64,
) -> Option<f64> {
    if !desired.is_finite() || !width.is_finite() || width < 0.0 {
        return None;
    }

    let right_index = occupied.partition_point(|span| span.start <= desired);
    let left = right_index.checked_sub(1).map(|i| occupied[i]);
    let right = occupied.get(right_index);

    let wall_min = clearance;
    let wall_max = wall_length - clearance - width;

    let lo = left.map_or(wall_min, |l| l.end + clearance).max(wall_min);
    let hi = right
        .map_or(wall_max, |r| r.start - clearance - width)
        .min(wall_max);

    if hi < lo - EPSILON {
        return None;
    }

    Some(desired.clamp(lo, hi.max(lo)))
}

/// Shortest wall that still holds every span in `occupied` plus the trailing
/// clearance. Zero for a wall without openings.
pub fn required_length<I>(occupied: I, clearance: f64) -> f64
where
    I: IntoIterator<Item = Span>,
{
    occupied
        .into_iter()
        .map(|span| span.end + clearance)
        .fold(0.0, f64::max)
}

/// Per-wall length requirements and the tallest opening top, gathered by the
/// room before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Requirements {
    walls: [f64; 6],
    /// Highest opening top above the floor.
    pub tallest: f64,
}

impl Requirements {
    pub fn set(&mut self, slot: WallSlot, required: f64) {
        self.walls[slot as usize] = required;
    }

    pub fn get(&self, slot: WallSlot) -> f64 {
        self.walls[slot as usize]
    }
}

/// Raises `dims` (never lowers them) so every wall is at least as long as its
/// openings require and the topology minimums, and the walls are tall enough
/// for every opening.
///
/// For an L-shaped room the length must hold both the `East` and
/// `NorthEast` walls side by side (each at least `minimal_wall_length`),
/// and the width both the `North` and `SouthEast` walls.
pub fn clamp_dimensions(
    topology: RoomTopology,
    dims: Dimensions,
    req: &Requirements,
    config: &RoomConfig,
) -> Dimensions {
    let mut length = dims
        .length
        .max(config.min_length)
        .max(req.get(WallSlot::West));
    let mut width = dims
        .width
        .max(config.min_width)
        .max(req.get(WallSlot::South));

    match topology {
        RoomTopology::Rectangular => {
            length = length.max(req.get(WallSlot::East));
            width = width.max(req.get(WallSlot::North));
        }
        RoomTopology::LShaped => {
            let m = config.minimal_wall_length;
            length = length.max(
                req.get(WallSlot::East).max(m) + req.get(WallSlot::NorthEast).max(m),
            );
            width = width.max(
                req.get(WallSlot::North).max(m) + req.get(WallSlot::SouthEast).max(m),
            );
        }
    }

    let height = dims.height.max(config.min_height).max(req.tallest);

    Dimensions {
        length,
        width,
        height,
    }
}

/// Clamps an L-shape corner so both rectangles keep at least
/// `minimal_wall_length` per side and every corner-dependent wall still holds
/// its openings.
///
/// `dims` must already satisfy [`clamp_dimensions`]; otherwise the lower
/// bound wins.
pub fn clamp_corner(
    corner: Point2<f64>,
    dims: &Dimensions,
    req: &Requirements,
    config: &RoomConfig,
) -> Point2<f64> {
    let m = config.minimal_wall_length;

    let min_x = req.get(WallSlot::East).max(m);
    let max_x = dims.length - req.get(WallSlot::NorthEast).max(m);
    let min_y = req.get(WallSlot::North).max(m);
    let max_y = dims.width - req.get(WallSlot::SouthEast).max(m);

    Point2::new(
        corner.x.clamp(min_x, max_x.max(min_x)),
        corner.y.clamp(min_y, max_y.max(min_y)),
    )
}
