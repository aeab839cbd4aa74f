// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Interior Scene
//!
//! Applies layouts computed by [`interior_layout`] to a host scene graph.
//!
//! The host is abstracted behind [`SceneHost`]: it creates mesh instances,
//! sets their local transforms and visibility, and destroys them. A
//! [`RoomActor`] owns a [`Room`](interior_layout::Room) together with the
//! render instances that show it, and after every edit updates only what
//! the room reports as changed. Segment instances are pooled per wall and
//! reused across rebuilds.

pub mod actor;
pub mod assets;
pub mod host;
pub mod pool;

pub use actor::RoomActor;
pub use assets::MeshAssets;
pub use host::{Parent, SceneHost};
pub use pool::InstancePool;
