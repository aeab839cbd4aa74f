// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host scene interface.

use std::fmt;

use interior_layout::{MeshHandle, WallSlot};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Grouping node an instance is created under.
///
/// Transforms are always expressed in the room frame; the parent only
/// groups instances for the host (outliner, selection, bulk visibility).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Wall(WallSlot),
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("root"),
            Parent::Wall(slot) => write!(f, "{slot}"),
        }
    }
}

/// Rendering layer the room is drawn into.
///
/// Wall, floor and ceiling meshes are unit panels stretched by scale, with
/// their pivot at the minimum corner along the wall and up axes and at the
/// centre of their thickness. Door and window meshes are placed unscaled
/// with the same pivot convention.
pub trait SceneHost {
    /// Opaque handle to a live mesh instance.
    type Instance: Clone + fmt::Debug;

    /// Bounding-box size of a mesh asset, `None` if the asset is unknown.
    fn mesh_bounds(&self, mesh: MeshHandle) -> Option<Vector3<f64>>;

    /// Creates a visible instance of `mesh` under `parent`.
    fn create_mesh_instance(&mut self, parent: Parent, mesh: MeshHandle, name: &str)
        -> Self::Instance;

    fn set_local_position(&mut self, instance: &Self::Instance, position: Point3<f64>);

    fn set_local_rotation(&mut self, instance: &Self::Instance, rotation: UnitQuaternion<f64>);

    fn set_local_scale(&mut self, instance: &Self::Instance, scale: Vector3<f64>);

    fn set_visible(&mut self, instance: &Self::Instance, visible: bool);

    /// Releases the instance. The handle is not used again.
    fn destroy(&mut self, instance: Self::Instance);
}
