// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for room layout operations.

use crate::keys::OpeningKey;
use crate::opening::OpeningKind;
use crate::topology::{RoomTopology, WallSlot};

/// Result type alias for room layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or editing a room.
///
/// Every variant except [`Error::InvalidConfig`] and [`Error::MissingMesh`]
/// is raised before any state is touched: the room stays in its last valid
/// configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A scalar configuration value is non-finite, negative or inconsistent.
    #[error("invalid room configuration: {0}")]
    InvalidConfig(String),

    /// A required mesh is absent or has degenerate bounds.
    #[error("required mesh missing or degenerate: {0}")]
    MissingMesh(&'static str),

    /// The requested door/window variant does not exist in the mesh set.
    #[error("no {kind} mesh variant at index {index}")]
    UnknownMeshVariant { kind: OpeningKind, index: usize },

    /// The wall slot is not part of this room's topology.
    #[error("wall {slot} does not exist in a {topology} room")]
    WallNotInTopology {
        slot: WallSlot,
        topology: RoomTopology,
    },

    /// The opening key is stale (opening removed) or belongs to another room.
    #[error("opening not found: {0:?}")]
    OpeningNotFound(OpeningKey),

    /// No position on the wall satisfies clearance and non-overlap.
    #[error("no room for an opening of width {width} on wall {slot}")]
    PlacementInfeasible { slot: WallSlot, width: f64 },

    /// Corner operations only apply to L-shaped rooms.
    #[error("room is not L-shaped")]
    NotLShaped,
}
