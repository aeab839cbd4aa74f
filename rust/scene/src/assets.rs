// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh asset references and their resolution against the host.

use interior_layout::{Error, MeshHandle, MeshSet, MeshSpec, Result};
use smallvec::SmallVec;

use crate::host::SceneHost;

/// Mesh assets as assigned by the user; any of them may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshAssets {
    pub floor: Option<MeshHandle>,
    pub wall: Option<MeshHandle>,
    pub ceiling: Option<MeshHandle>,
    pub doors: Vec<MeshHandle>,
    pub windows: Vec<MeshHandle>,
}

impl MeshAssets {
    /// Queries the bounds of every mesh once and builds the catalog a room
    /// is laid out from.
    ///
    /// Fails closed with [`Error::MissingMesh`] if a required mesh is unset,
    /// unknown to the host, or has unusable bounds.
    pub fn resolve<H: SceneHost>(&self, host: &H) -> Result<MeshSet> {
        let set = MeshSet {
            floor: spec(host, self.floor, "floor")?,
            wall: spec(host, self.wall, "wall")?,
            ceiling: spec(host, self.ceiling, "ceiling")?,
            doors: variants(host, &self.doors, "door")?,
            windows: variants(host, &self.windows, "window")?,
        };
        set.validate()?;
        Ok(set)
    }
}

fn spec<H: SceneHost>(
    host: &H,
    handle: Option<MeshHandle>,
    name: &'static str,
) -> Result<MeshSpec> {
    let Some(handle) = handle else {
        tracing::warn!(mesh = name, "mesh not assigned");
        return Err(Error::MissingMesh(name));
    };
    match host.mesh_bounds(handle) {
        Some(size) => Ok(MeshSpec::new(handle, size)),
        None => {
            tracing::warn!(mesh = name, %handle, "host has no bounds for mesh");
            Err(Error::MissingMesh(name))
        }
    }
}

fn variants<H: SceneHost>(
    host: &H,
    handles: &[MeshHandle],
    name: &'static str,
) -> Result<SmallVec<[MeshSpec; 4]>> {
    if handles.is_empty() {
        tracing::warn!(mesh = name, "no variants assigned");
        return Err(Error::MissingMesh(name));
    }
    handles
        .iter()
        .map(|handle| spec(host, Some(*handle), name))
        .collect()
}
