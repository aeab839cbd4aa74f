// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Interior Layout
//!
//! Procedural room geometry for an interior configurator: walls, floor,
//! ceiling, doors and windows.
//!
//! The core problem is wall segmentation. Given a wall's length and the
//! doors/windows placed on it, the [layout engine](layout) partitions the
//! wall into rectangular panels that tile it exactly around the openings.
//! The [placement policy](placement) keeps openings apart and inside their
//! wall, and keeps room dimensions from shrinking under an opening. The
//! [`Room`] owns everything and re-runs the layout on every edit.
//!
//! This crate is pure computation. Applying the result to render instances
//! is left to a host adapter.

pub mod catalog;
pub mod config;
pub mod error;
pub mod keys;
pub mod layout;
pub mod opening;
pub mod placement;
pub mod room;
pub mod shape;
pub mod snapshot;
pub mod topology;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};

pub use catalog::{MeshSet, MeshSpec};
pub use config::RoomConfig;
pub use error::{Error, Result};
pub use keys::{MeshHandle, OpeningKey};
pub use layout::{rebuild_wall, LayoutParams, Segment, SegmentKind, SegmentSet, WallExtent};
pub use opening::{Opening, OpeningKind, WINDOW_WIDTH_TRIM};
pub use placement::{resolve_offset, Span};
pub use room::{Room, RoomChanges};
pub use shape::{Dimensions, Panel, PanelKind, RoomShape, WallFrame};
pub use snapshot::{RoomSnapshot, WallSnapshot};
pub use topology::{RoomTopology, WallSlot};
pub use wall::Wall;
