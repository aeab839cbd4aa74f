// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh catalog: the meshes a room is built from and their bounding sizes.

use nalgebra::Vector3;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::keys::MeshHandle;
use crate::opening::OpeningKind;

/// A mesh reference together with its bounding-box size.
///
/// Size axes follow the wall-local frame: `x` is depth (through the wall),
/// `y` runs along the wall, `z` is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSpec {
    pub handle: MeshHandle,
    pub size: Vector3<f64>,
}

impl MeshSpec {
    pub fn new(handle: MeshHandle, size: Vector3<f64>) -> Self {
        Self { handle, size }
    }

    fn is_degenerate(&self) -> bool {
        !self.size.iter().all(|c| c.is_finite()) || self.size.y <= 0.0 || self.size.z <= 0.0
    }
}

/// Every mesh a room needs, with door and window variants.
#[derive(Debug, Clone)]
pub struct MeshSet {
    pub floor: MeshSpec,
    pub wall: MeshSpec,
    pub ceiling: MeshSpec,
    pub doors: SmallVec<[MeshSpec; 4]>,
    pub windows: SmallVec<[MeshSpec; 4]>,
}

impl MeshSet {
    /// Fails closed if a required mesh is missing or has unusable bounds.
    pub fn validate(&self) -> Result<()> {
        // Floor and ceiling are flat: only their footprint must be usable.
        for (name, spec) in [("floor", &self.floor), ("ceiling", &self.ceiling)] {
            if !(spec.size.x > 0.0 && spec.size.y > 0.0) {
                return Err(Error::MissingMesh(name));
            }
        }
        if self.wall.is_degenerate() || self.wall.size.x <= 0.0 {
            return Err(Error::MissingMesh("wall"));
        }
        if self.doors.is_empty() || self.doors.iter().any(MeshSpec::is_degenerate) {
            return Err(Error::MissingMesh("door"));
        }
        if self.windows.is_empty() || self.windows.iter().any(MeshSpec::is_degenerate) {
            return Err(Error::MissingMesh("window"));
        }
        Ok(())
    }

    /// Looks up a door or window variant.
    pub fn variant(&self, kind: OpeningKind, index: usize) -> Result<&MeshSpec> {
        let variants = match kind {
            OpeningKind::Door => &self.doors,
            OpeningKind::Window => &self.windows,
        };
        variants
            .get(index)
            .ok_or(Error::UnknownMeshVariant { kind, index })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_is_valid() {
        assert!(fixtures::mesh_set().validate().is_ok());
    }

    #[test]
    fn missing_window_variants_fail_closed() {
        let mut set = fixtures::mesh_set();
        set.windows.clear();
        assert_eq!(set.validate(), Err(Error::MissingMesh("window")));
    }

    #[test]
    fn zero_sized_wall_fails_closed() {
        let mut set = fixtures::mesh_set();
        set.wall.size = Vector3::zeros();
        assert_eq!(set.validate(), Err(Error::MissingMesh("wall")));
    }

    #[test]
    fn unknown_variant() {
        let set = fixtures::mesh_set();
        assert!(set.variant(OpeningKind::Door, 0).is_ok());
        assert_eq!(
            set.variant(OpeningKind::Window, 3),
            Err(Error::UnknownMeshVariant {
                kind: OpeningKind::Window,
                index: 3
            })
        );
    }
}
