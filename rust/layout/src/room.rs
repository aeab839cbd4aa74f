// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room orchestrator.
//!
//! The [`Room`] is the root owner of all walls, openings and floor/ceiling
//! panels. Every mutation runs to completion before returning: dimensions
//! are clamped, affected walls get their length and frame recomputed and
//! their segments rebuilt. A failed mutation leaves the room untouched.
//!
//! Openings are stored in a slot map owned by the room; each wall keeps the
//! keys of its openings sorted by offset.

use nalgebra::Point2;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::catalog::MeshSet;
use crate::config::RoomConfig;
use crate::error::{Error, Result};
use crate::keys::OpeningKey;
use crate::layout::{rebuild_wall, LayoutParams};
use crate::opening::{Opening, OpeningKind};
use crate::placement::{
    clamp_corner, clamp_dimensions, required_length, resolve_offset, Requirements, Span,
};
use crate::shape::{Dimensions, Panel, RoomShape};
use crate::topology::{RoomTopology, WallSlot};
use crate::wall::Wall;

/// What changed since the last [`Room::take_changes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomChanges {
    walls: u8,
    panels: bool,
    openings: bool,
}

impl RoomChanges {
    fn mark_wall(&mut self, slot: WallSlot) {
        self.walls |= slot.bit();
    }

    /// Whether the segments or frame of `slot` were rebuilt.
    pub fn wall(&self, slot: WallSlot) -> bool {
        self.walls & slot.bit() != 0
    }

    /// Rebuilt walls, in `L_SHAPED` slot order.
    pub fn walls(&self) -> impl Iterator<Item = WallSlot> + '_ {
        RoomTopology::LShaped
            .slots()
            .iter()
            .copied()
            .filter(move |slot| self.wall(*slot))
    }

    pub fn panels(&self) -> bool {
        self.panels
    }

    /// Whether openings were added, moved or removed.
    pub fn openings(&self) -> bool {
        self.openings
    }

    pub fn is_empty(&self) -> bool {
        self.walls == 0 && !self.panels && !self.openings
    }
}

/// A procedurally generated room.
///
/// # Example
///
/// ```
/// use interior_layout::{OpeningKind, Room, RoomConfig, RoomTopology, WallSlot};
/// # use interior_layout::{MeshHandle, MeshSet, MeshSpec, Vector3};
/// # let unit = Vector3::new(1.0, 1.0, 1.0);
/// # let meshes = MeshSet {
/// #     floor: MeshSpec::new(MeshHandle(0), unit),
/// #     wall: MeshSpec::new(MeshHandle(1), unit),
/// #     ceiling: MeshSpec::new(MeshHandle(2), unit),
/// #     doors: [MeshSpec::new(MeshHandle(3), Vector3::new(10.0, 90.0, 210.0))].into_iter().collect(),
/// #     windows: [MeshSpec::new(MeshHandle(4), Vector3::new(10.0, 121.0, 120.0))].into_iter().collect(),
/// # };
///
/// let config = RoomConfig { length: 300.0, width: 250.0, ..RoomConfig::default() };
/// let mut room = Room::new(RoomTopology::Rectangular, config, meshes).unwrap();
///
/// room.add_opening(WallSlot::West, 100.0, OpeningKind::Door, 0).unwrap();
///
/// let wall = room.wall(WallSlot::West).unwrap();
/// assert_eq!(wall.segments().horizontal.len(), 2);
/// assert_eq!(wall.segments().vertical.len(), 1);
/// ```
#[derive(Debug)]
pub struct Room {
    topology: RoomTopology,
    config: RoomConfig,
    meshes: MeshSet,
    dims: Dimensions,
    corner: Point2<f64>,
    walls: SmallVec<[Wall; 6]>,
    openings: SlotMap<OpeningKey, Opening>,
    panels: SmallVec<[Panel; 4]>,
    changes: RoomChanges,
}

impl Room {
    /// Creates a room with empty walls and lays it out.
    ///
    /// Fails closed on invalid configuration or a missing mesh: no geometry
    /// is produced.
    pub fn new(topology: RoomTopology, config: RoomConfig, meshes: MeshSet) -> Result<Self> {
        config.validate_for(topology)?;
        if let Err(err) = meshes.validate() {
            tracing::warn!(%err, "room creation aborted");
            return Err(err);
        }

        let dims = Dimensions {
            length: config.length,
            width: config.width,
            height: config.height,
        };
        let corner = Point2::new(dims.length / 2.0, dims.width / 2.0);

        let mut room = Self {
            topology,
            config,
            meshes,
            dims,
            corner,
            walls: SmallVec::new(),
            openings: SlotMap::with_key(),
            panels: SmallVec::new(),
            changes: RoomChanges::default(),
        };

        let shape = room.shape();
        for &slot in topology.slots() {
            // Every slot of the topology has geometry.
            if let Some(geometry) = shape.wall_geometry(slot) {
                room.walls.push(Wall::new(slot, geometry));
            }
        }

        room.update_all_walls();

        tracing::info!(
            %topology,
            length = room.dims.length,
            width = room.dims.width,
            height = room.dims.height,
            walls = room.walls.len(),
            "created room"
        );

        Ok(room)
    }

    // --- Accessors ---

    pub fn topology(&self) -> RoomTopology {
        self.topology
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Interior notch corner; `None` for rectangular rooms.
    pub fn corner(&self) -> Option<Point2<f64>> {
        match self.topology {
            RoomTopology::Rectangular => None,
            RoomTopology::LShaped => Some(self.corner),
        }
    }

    pub fn shape(&self) -> RoomShape {
        RoomShape {
            topology: self.topology,
            dims: self.dims,
            thickness: self.config.wall_offset,
            corner: self.corner,
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            wall_height: self.dims.height,
            window_height_offset: self.config.window_height_offset,
        }
    }

    /// Walls in topology slot order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall(&self, slot: WallSlot) -> Result<&Wall> {
        Ok(&self.walls[self.wall_index(slot)?])
    }

    pub fn opening(&self, key: OpeningKey) -> Result<&Opening> {
        self.openings.get(key).ok_or(Error::OpeningNotFound(key))
    }

    pub fn openings(&self) -> impl Iterator<Item = (OpeningKey, &Opening)> {
        self.openings.iter()
    }

    /// Openings on `slot`, sorted by offset.
    pub fn openings_on(&self, slot: WallSlot) -> Result<Vec<(OpeningKey, &Opening)>> {
        let wall = self.wall(slot)?;
        Ok(wall
            .openings
            .iter()
            .filter_map(|key| self.openings.get(*key).map(|o| (*key, o)))
            .collect())
    }

    pub fn opening_count(&self) -> usize {
        self.openings.len()
    }

    /// Floor panels followed by ceiling panels.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Returns and resets the change set accumulated by mutations.
    pub fn take_changes(&mut self) -> RoomChanges {
        std::mem::take(&mut self.changes)
    }

    // --- Layout passes ---

    /// Clamps dimensions and corner, recomputes floor/ceiling panels and
    /// rebuilds every wall.
    pub fn update_all_walls(&mut self) {
        self.clamp_room_dimensions();
        self.panels = self.shape().panels();
        self.changes.panels = true;

        for index in 0..self.walls.len() {
            self.refresh_wall(index);
        }
    }

    /// Recomputes one wall's length and frame and rebuilds its segments.
    pub fn update_wall(&mut self, slot: WallSlot) -> Result<()> {
        let index = self.wall_index(slot)?;
        self.refresh_wall(index);
        Ok(())
    }

    /// Raises length, width and height (never lowers them) until every
    /// opening fits, then clamps the L-shape corner. Returns whether
    /// anything changed. Walls are not rebuilt.
    pub fn clamp_room_dimensions(&mut self) -> bool {
        let req = self.requirements();

        let clamped = clamp_dimensions(self.topology, self.dims, &req, &self.config);
        let mut changed = false;
        if clamped != self.dims {
            tracing::warn!(
                from = ?self.dims,
                to = ?clamped,
                "raised room dimensions to fit openings"
            );
            self.dims = clamped;
            changed = true;
        }

        if self.topology == RoomTopology::LShaped {
            let corner = clamp_corner(self.corner, &self.dims, &req, &self.config);
            if corner != self.corner {
                tracing::debug!(x = corner.x, y = corner.y, "clamped corner");
                self.corner = corner;
                changed = true;
            }
        }

        changed
    }

    // --- Mutations ---

    /// Sets the user's target dimensions and lays the room out again.
    ///
    /// Targets below what the current openings need are raised.
    pub fn set_dimensions(&mut self, length: f64, width: f64, height: f64) -> Result<Dimensions> {
        for (name, value) in [("length", length), ("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be a finite, non-negative value")));
            }
        }

        self.dims = Dimensions {
            length,
            width,
            height,
        };
        self.update_all_walls();
        Ok(self.dims)
    }

    /// Moves the L-shape corner, clamped so both rectangles keep
    /// `minimal_wall_length` per side and no opening is orphaned.
    ///
    /// With `refresh` the four corner-dependent walls and the panels are
    /// updated immediately; otherwise the caller must follow up with
    /// [`Room::update_all_walls`] (batched edits such as a drag).
    pub fn set_corner(&mut self, x: f64, y: f64, refresh: bool) -> Result<Point2<f64>> {
        if self.topology != RoomTopology::LShaped {
            return Err(Error::NotLShaped);
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidConfig("corner must be finite".into()));
        }

        let req = self.requirements();
        self.corner = clamp_corner(Point2::new(x, y), &self.dims, &req, &self.config);

        if refresh {
            for index in 0..self.walls.len() {
                if self.walls[index].slot.depends_on_corner() {
                    self.refresh_wall(index);
                }
            }
            self.panels = self.shape().panels();
            self.changes.panels = true;
        }

        Ok(self.corner)
    }

    /// Places a new door or window centred as close to `desired_center` as
    /// the placement policy allows.
    ///
    /// Returns [`Error::PlacementInfeasible`] without touching the room if
    /// the wall has no gap wide enough.
    pub fn add_opening(
        &mut self,
        slot: WallSlot,
        desired_center: f64,
        kind: OpeningKind,
        variant: usize,
    ) -> Result<OpeningKey> {
        let index = self.wall_index(slot)?;
        let mesh = *self.meshes.variant(kind, variant)?;
        let (width, height) = kind.extent(&mesh);

        let desired = desired_center - width / 2.0;
        let occupied = self.occupied_spans(index, None);
        let Some(offset) = resolve_offset(
            &occupied,
            self.current_length(index),
            desired,
            width,
            self.config.alignment_offset,
        ) else {
            tracing::debug!(%slot, %kind, desired, width, "opening rejected: no gap wide enough");
            return Err(Error::PlacementInfeasible { slot, width });
        };

        let opening = Opening {
            kind,
            wall: slot,
            offset,
            width,
            height,
            mesh: mesh.handle,
            variant,
        };
        let too_tall = opening.top(self.config.window_height_offset) > self.dims.height;

        let key = self.openings.insert(opening);
        self.walls[index].openings.push(key);
        self.sort_openings(index);
        self.changes.openings = true;

        tracing::debug!(%slot, %kind, offset, width, "added opening");

        if too_tall {
            self.update_all_walls();
        } else {
            self.refresh_wall(index);
        }

        Ok(key)
    }

    /// Removes an opening and rebuilds its wall. Room dimensions are not
    /// lowered.
    pub fn remove_opening(&mut self, key: OpeningKey) -> Result<Opening> {
        let index = self.wall_index(self.opening(key)?.wall)?;
        let opening = self
            .openings
            .remove(key)
            .ok_or(Error::OpeningNotFound(key))?;

        self.walls[index].openings.retain(|k| *k != key);
        self.changes.openings = true;
        self.refresh_wall(index);

        tracing::debug!(slot = %opening.wall, kind = %opening.kind, "removed opening");

        Ok(opening)
    }

    /// Moves an opening so its near edge is as close to `desired_offset` as
    /// the placement policy allows, considering wall ends and the other
    /// openings on the wall. Returns the final offset.
    pub fn move_opening(&mut self, key: OpeningKey, desired_offset: f64) -> Result<f64> {
        let opening = self.opening(key)?;
        let slot = opening.wall;
        let width = opening.width;
        let index = self.wall_index(slot)?;

        let occupied = self.occupied_spans(index, Some(key));
        let offset = resolve_offset(
            &occupied,
            self.current_length(index),
            desired_offset,
            width,
            self.config.alignment_offset,
        )
        .ok_or_else(|| {
            tracing::debug!(%slot, desired_offset, width, "move rejected: no gap wide enough");
            Error::PlacementInfeasible { slot, width }
        })?;

        if let Some(opening) = self.openings.get_mut(key) {
            opening.offset = offset;
        }
        self.sort_openings(index);
        self.changes.openings = true;
        self.refresh_wall(index);

        Ok(offset)
    }

    // --- Internals ---

    fn wall_index(&self, slot: WallSlot) -> Result<usize> {
        self.topology
            .slot_index(slot)
            .ok_or(Error::WallNotInTopology {
                slot,
                topology: self.topology,
            })
    }

    /// Length of the wall at `index` for the current shape. Ahead of the
    /// cached geometry while a corner move is deferred.
    fn current_length(&self, index: usize) -> f64 {
        let wall = &self.walls[index];
        self.shape()
            .wall_geometry(wall.slot)
            .map_or(wall.length(), |geometry| geometry.length)
    }

    fn refresh_wall(&mut self, index: usize) {
        let shape = self.shape();
        let params = self.layout_params();
        let openings = &self.openings;
        let wall = &mut self.walls[index];

        let Some(geometry) = shape.wall_geometry(wall.slot) else {
            return;
        };
        wall.geometry = geometry;
        wall.segments = rebuild_wall(
            geometry.extent(),
            wall.openings.iter().filter_map(|key| openings.get(*key)),
            &params,
        );
        self.changes.mark_wall(wall.slot);

        tracing::debug!(
            slot = %wall.slot,
            length = geometry.length,
            openings = wall.openings.len(),
            horizontal = wall.segments.horizontal.len(),
            vertical = wall.segments.vertical.len(),
            "rebuilt wall"
        );
    }

    fn sort_openings(&mut self, index: usize) {
        let openings = &self.openings;
        let offset = |key: &OpeningKey| openings.get(*key).map_or(f64::INFINITY, |o| o.offset);
        self.walls[index]
            .openings
            .sort_by(|a, b| offset(a).total_cmp(&offset(b)));
    }

    fn occupied_spans(&self, index: usize, exclude: Option<OpeningKey>) -> SmallVec<[Span; 8]> {
        self.walls[index]
            .openings
            .iter()
            .filter(|key| Some(**key) != exclude)
            .filter_map(|key| self.openings.get(*key))
            .map(Opening::span)
            .collect()
    }

    fn requirements(&self) -> Requirements {
        let clearance = self.config.alignment_offset;
        let mut req = Requirements::default();
        for wall in &self.walls {
            let spans = wall
                .openings
                .iter()
                .filter_map(|key| self.openings.get(*key))
                .map(Opening::span);
            req.set(wall.slot, required_length(spans, clearance));
        }
        req.tallest = self
            .openings
            .values()
            .map(|o| o.top(self.config.window_height_offset))
            .fold(0.0, f64::max);
        req
    }
}
