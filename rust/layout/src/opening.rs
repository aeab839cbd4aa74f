// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Doors and windows placed on a wall.

use serde::{Deserialize, Serialize};

use crate::catalog::MeshSpec;
use crate::keys::MeshHandle;
use crate::placement::Span;
use crate::topology::WallSlot;

/// Width removed from every window mesh. Window assets are authored slightly
/// wider than their frame, which shows as a hairline gap next to the
/// adjoining wall panel.
pub const WINDOW_WIDTH_TRIM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }

    /// Number of vertical segments the opening needs: the strip above a
    /// door, or the strips below and above a window.
    pub fn vertical_segments(self) -> usize {
        match self {
            OpeningKind::Door => 1,
            OpeningKind::Window => 2,
        }
    }

    /// Width and height of an opening built from `mesh`.
    pub fn extent(self, mesh: &MeshSpec) -> (f64, f64) {
        match self {
            OpeningKind::Door => (mesh.size.y, mesh.size.z),
            OpeningKind::Window => ((mesh.size.y - WINDOW_WIDTH_TRIM).max(0.0), mesh.size.z),
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A door or window owned by one wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opening {
    pub kind: OpeningKind,
    pub wall: WallSlot,
    /// Distance from the wall start to the opening's near edge.
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    pub mesh: MeshHandle,
    /// Index into the door or window variants of the mesh set.
    pub variant: usize,
}

impl Opening {
    /// Far edge along the wall.
    pub fn end(&self) -> f64 {
        self.offset + self.width
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }

    /// Height of the opening's lower edge above the floor.
    pub fn bottom(&self, window_height_offset: f64) -> f64 {
        match self.kind {
            OpeningKind::Door => 0.0,
            OpeningKind::Window => window_height_offset,
        }
    }

    /// Height of the opening's upper edge above the floor.
    pub fn top(&self, window_height_offset: f64) -> f64 {
        self.bottom(window_height_offset) + self.height
    }
}
