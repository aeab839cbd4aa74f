// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON room description and its resolution into a layout report.

use anyhow::{Context, Result};
use interior_layout::{
    Error, MeshHandle, MeshSet, MeshSpec, OpeningKind, Room, RoomConfig, RoomSnapshot,
    RoomTopology, Vector3, WallSlot,
};
use serde::{Deserialize, Serialize};

const UNIT: [f64; 3] = [1.0, 1.0, 1.0];

/// Input document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomDescription {
    #[serde(default = "default_topology")]
    pub topology: RoomTopology,
    #[serde(default)]
    pub config: RoomConfig,
    /// L-shape notch corner; centred if absent.
    #[serde(default)]
    pub corner: Option<[f64; 2]>,
    #[serde(default)]
    pub meshes: MeshSizes,
    #[serde(default)]
    pub openings: Vec<OpeningRequest>,
}

fn default_topology() -> RoomTopology {
    RoomTopology::Rectangular
}

/// Bounding sizes of the meshes, `[depth, along, up]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeshSizes {
    pub floor: [f64; 3],
    pub wall: [f64; 3],
    pub ceiling: [f64; 3],
    pub doors: Vec<[f64; 3]>,
    pub windows: Vec<[f64; 3]>,
}

impl Default for MeshSizes {
    fn default() -> Self {
        Self {
            floor: UNIT,
            wall: UNIT,
            ceiling: UNIT,
            doors: vec![[10.0, 90.0, 210.0]],
            windows: vec![[10.0, 121.0, 120.0]],
        }
    }
}

impl MeshSizes {
    /// Handles are assigned by position: 0..3 for the panels, 100+ for door
    /// variants, 200+ for window variants.
    fn mesh_set(&self) -> MeshSet {
        let spec = |handle: u32, size: &[f64; 3]| {
            MeshSpec::new(MeshHandle(handle), Vector3::new(size[0], size[1], size[2]))
        };
        MeshSet {
            floor: spec(0, &self.floor),
            wall: spec(1, &self.wall),
            ceiling: spec(2, &self.ceiling),
            doors: (100..).zip(&self.doors).map(|(h, s)| spec(h, s)).collect(),
            windows: (200..).zip(&self.windows).map(|(h, s)| spec(h, s)).collect(),
        }
    }
}

/// A door or window to place, centred as close to `center` as allowed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningRequest {
    pub wall: WallSlot,
    pub kind: OpeningKind,
    pub center: f64,
    #[serde(default)]
    pub variant: usize,
}

/// An opening that could not be placed.
#[derive(Debug, Clone, Serialize)]
pub struct Rejected {
    /// Position in the input `openings` list.
    pub index: usize,
    pub wall: WallSlot,
    pub kind: OpeningKind,
    pub reason: String,
}

/// Output document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub room: RoomSnapshot,
    pub rejected: Vec<Rejected>,
}

impl RoomDescription {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid room description")
    }

    /// Builds the room and places every requested opening in order.
    ///
    /// Openings that do not fit are reported rather than failing the run;
    /// configuration and mesh errors abort.
    pub fn resolve(&self) -> Result<Report> {
        let mut room = Room::new(self.topology, self.config.clone(), self.meshes.mesh_set())
            .context("failed to create room")?;

        if let Some([x, y]) = self.corner {
            room.set_corner(x, y, true).context("failed to set corner")?;
        }

        let mut rejected = Vec::new();
        for (index, request) in self.openings.iter().enumerate() {
            match room.add_opening(request.wall, request.center, request.kind, request.variant) {
                Ok(_) => {}
                Err(err @ (Error::PlacementInfeasible { .. } | Error::UnknownMeshVariant { .. })) => {
                    tracing::warn!(index, wall = %request.wall, kind = %request.kind, %err, "opening skipped");
                    rejected.push(Rejected {
                        index,
                        wall: request.wall,
                        kind: request.kind,
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("opening {index} on {}", request.wall))
                }
            }
        }

        tracing::info!(
            openings = room.opening_count(),
            rejected = rejected.len(),
            "resolved room"
        );

        Ok(Report {
            room: room.snapshot(),
            rejected,
        })
    }
}
