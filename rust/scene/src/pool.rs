// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reusable instance pools.
//!
//! A pool holds the instances of one mesh under one parent, indexed by
//! position. Resizing keeps the existing instances, creates new ones only to
//! grow and destroys the surplus when shrinking, so a rebuild with an
//! unchanged count touches no instance lifecycles at all.

use interior_layout::MeshHandle;
use smallvec::SmallVec;

use crate::host::{Parent, SceneHost};

/// Index-stable instances of one mesh.
#[derive(Debug)]
pub struct InstancePool<I> {
    parent: Parent,
    mesh: MeshHandle,
    name: &'static str,
    instances: SmallVec<[I; 8]>,
}

impl<I: Clone> InstancePool<I> {
    pub fn new(parent: Parent, mesh: MeshHandle, name: &'static str) -> Self {
        Self {
            parent,
            mesh,
            name,
            instances: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.instances.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.instances.iter()
    }

    /// Grows or shrinks the pool to exactly `count` instances.
    pub fn resize<H>(&mut self, host: &mut H, count: usize)
    where
        H: SceneHost<Instance = I>,
    {
        let before = self.instances.len();
        while self.instances.len() > count {
            if let Some(instance) = self.instances.pop() {
                host.destroy(instance);
            }
        }
        while self.instances.len() < count {
            let name = format!("{}_{}_{}", self.parent, self.name, self.instances.len());
            let instance = host.create_mesh_instance(self.parent, self.mesh, &name);
            self.instances.push(instance);
        }
        if before != count {
            tracing::trace!(parent = %self.parent, pool = self.name, before, count, "resized pool");
        }
    }

    /// Destroys every instance.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: SceneHost<Instance = I>,
    {
        self.resize(host, 0);
    }
}
