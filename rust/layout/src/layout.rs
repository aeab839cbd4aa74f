// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall layout engine.
//!
//! Partitions a wall into rectangular panels around its openings. Segments
//! are expressed in wall-local 2D coordinates: `start..end` along the wall
//! (offset 0 is the interior start) and `bottom..top` above the floor.
//!
//! For `N` openings the engine emits `N + 1` full-height *fill* segments
//! between the openings (and out to the wall's capped ends) plus one
//! *vertical* segment above every door and two (below and above) around
//! every window. Together with the openings themselves the segments tile
//! the wall rectangle `[-cap_start, length + cap_end] x [0, height]`.

use serde::Serialize;
use smallvec::SmallVec;

use crate::opening::{Opening, OpeningKind};
use crate::placement::EPSILON;

/// Role of a segment within the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Full-height panel between openings.
    Fill,
    AboveDoor,
    BelowWindow,
    AboveWindow,
}

/// A rectangular wall panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: f64,
    pub end: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Zero-sized panels are kept so handle slots stay stable; hosts hide them.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= EPSILON || self.height() <= EPSILON
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentSet {
    /// Fill segments in wall order; always `openings + 1` entries.
    pub horizontal: Vec<Segment>,
    /// Above/below segments in opening order; `doors + 2 * windows` entries.
    pub vertical: Vec<Segment>,
}

impl SegmentSet {
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.horizontal.iter().chain(self.vertical.iter())
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segments that would actually be drawn.
    pub fn visible(&self) -> impl Iterator<Item = &Segment> {
        self.iter().filter(|s| !s.is_degenerate())
    }
}

/// Along-wall extent including corner caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallExtent {
    /// Interior length; openings live in `[0, length]`.
    pub length: f64,
    pub cap_start: f64,
    pub cap_end: f64,
}

impl WallExtent {
    pub fn start(&self) -> f64 {
        -self.cap_start
    }

    pub fn end(&self) -> f64 {
        self.length + self.cap_end
    }
}

/// Vertical parameters shared by every wall of a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub wall_height: f64,
    pub window_height_offset: f64,
}

/// Number of vertical segments needed for `openings`.
pub fn vertical_count<'a, I>(openings: I) -> usize
where
    I: IntoIterator<Item = &'a Opening>,
{
    openings
        .into_iter()
        .map(|o| o.kind.vertical_segments())
        .sum()
}

/// Computes the full segment set of a wall.
///
/// `openings` must be sorted by offset and non-overlapping, which the
/// placement policy guarantees. Fill segments between touching openings are
/// emitted with zero width rather than skipped.
pub fn rebuild_wall<'a, I>(extent: WallExtent, openings: I, params: &LayoutParams) -> SegmentSet
where
    I: IntoIterator<Item = &'a Opening>,
{
    let openings: SmallVec<[&Opening; 8]> = openings.into_iter().collect();
    debug_assert!(
        openings.windows(2).all(|w| w[0].offset <= w[1].offset),
        "openings must be sorted by offset"
    );

    let height = params.wall_height.max(0.0);
    let mut set = SegmentSet {
        horizontal: Vec::with_capacity(openings.len() + 1),
        vertical: Vec::with_capacity(vertical_count(openings.iter().copied())),
    };

    let mut cursor = extent.start();
    for opening in &openings {
        set.horizontal.push(fill(cursor, opening.offset, height));

        let bottom = opening.bottom(params.window_height_offset).clamp(0.0, height);
        let top = opening.top(params.window_height_offset).clamp(bottom, height);
        let strip = |kind, bottom: f64, top: f64| Segment {
            kind,
            start: opening.offset,
            end: opening.end(),
            bottom,
            top,
        };

        match opening.kind {
            OpeningKind::Door => {
                set.vertical.push(strip(SegmentKind::AboveDoor, top, height));
            }
            OpeningKind::Window => {
                set.vertical.push(strip(SegmentKind::BelowWindow, 0.0, bottom));
                set.vertical.push(strip(SegmentKind::AboveWindow, top, height));
            }
        }

        cursor = cursor.max(opening.end());
    }
    set.horizontal.push(fill(cursor, extent.end(), height));

    tracing::trace!(
        horizontal = set.horizontal.len(),
        vertical = set.vertical.len(),
        "laid out wall"
    );

    set
}

fn fill(start: f64, end: f64, height: f64) -> Segment {
    Segment {
        kind: SegmentKind::Fill,
        start,
        end: end.max(start),
        bottom: 0.0,
        top: height,
    }
}
