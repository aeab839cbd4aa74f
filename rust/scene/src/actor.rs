// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A room together with the render instances that show it.

use interior_layout::{
    Dimensions, MeshSpec, Opening, OpeningKey, OpeningKind, PanelKind, Result, Room, RoomConfig,
    RoomTopology, Segment, WallFrame, WallSlot,
};
use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use slotmap::SecondaryMap;
use smallvec::SmallVec;

use crate::assets::MeshAssets;
use crate::host::{Parent, SceneHost};
use crate::pool::InstancePool;

/// Segment instances of one wall.
struct WallInstances<I> {
    slot: WallSlot,
    horizontal: InstancePool<I>,
    vertical: InstancePool<I>,
}

/// Owns a [`Room`] and keeps the host scene in step with it.
///
/// Every mutation is forwarded to the room and followed by a sync that
/// touches only the walls, panels and openings the room reports as changed.
/// Failed mutations leave both the room and the scene untouched.
pub struct RoomActor<H: SceneHost> {
    host: H,
    room: Room,
    walls: SmallVec<[WallInstances<H::Instance>; 6]>,
    openings: SecondaryMap<OpeningKey, H::Instance>,
    floor: InstancePool<H::Instance>,
    ceiling: InstancePool<H::Instance>,
}

impl<H: SceneHost> RoomActor<H> {
    /// Resolves the mesh assets against the host, creates the room and
    /// instantiates its initial geometry.
    pub fn spawn(
        host: H,
        topology: RoomTopology,
        config: RoomConfig,
        assets: &MeshAssets,
    ) -> Result<Self> {
        let meshes = assets.resolve(&host)?;
        let room = Room::new(topology, config, meshes)?;

        let wall_mesh = room.meshes().wall.handle;
        let walls = room
            .walls()
            .iter()
            .map(|wall| WallInstances {
                slot: wall.slot(),
                horizontal: InstancePool::new(Parent::Wall(wall.slot()), wall_mesh, "horizontal"),
                vertical: InstancePool::new(Parent::Wall(wall.slot()), wall_mesh, "vertical"),
            })
            .collect();
        let floor = InstancePool::new(Parent::Root, room.meshes().floor.handle, "floor");
        let ceiling = InstancePool::new(Parent::Root, room.meshes().ceiling.handle, "ceiling");

        let mut actor = Self {
            host,
            room,
            walls,
            openings: SecondaryMap::new(),
            floor,
            ceiling,
        };
        actor.sync();
        Ok(actor)
    }

    // --- Accessors ---

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Render instance of an opening's door or window mesh.
    pub fn opening_instance(&self, key: OpeningKey) -> Option<&H::Instance> {
        self.openings.get(key)
    }

    /// Number of live instances owned by this room.
    pub fn instance_count(&self) -> usize {
        let walls: usize = self
            .walls
            .iter()
            .map(|w| w.horizontal.len() + w.vertical.len())
            .sum();
        walls + self.openings.len() + self.floor.len() + self.ceiling.len()
    }

    // --- Mutations ---

    pub fn add_opening(
        &mut self,
        slot: WallSlot,
        desired_center: f64,
        kind: OpeningKind,
        variant: usize,
    ) -> Result<OpeningKey> {
        let key = self.room.add_opening(slot, desired_center, kind, variant)?;
        self.sync();
        Ok(key)
    }

    pub fn remove_opening(&mut self, key: OpeningKey) -> Result<Opening> {
        let opening = self.room.remove_opening(key)?;
        self.sync();
        Ok(opening)
    }

    pub fn move_opening(&mut self, key: OpeningKey, desired_offset: f64) -> Result<f64> {
        let offset = self.room.move_opening(key, desired_offset)?;
        self.sync();
        Ok(offset)
    }

    pub fn set_dimensions(&mut self, length: f64, width: f64, height: f64) -> Result<Dimensions> {
        let dims = self.room.set_dimensions(length, width, height)?;
        self.sync();
        Ok(dims)
    }

    /// See [`Room::set_corner`]. Without `refresh` the scene is left as is
    /// until [`RoomActor::update_all_walls`].
    pub fn set_corner(&mut self, x: f64, y: f64, refresh: bool) -> Result<Point2<f64>> {
        let corner = self.room.set_corner(x, y, refresh)?;
        self.sync();
        Ok(corner)
    }

    pub fn update_all_walls(&mut self) {
        self.room.update_all_walls();
        self.sync();
    }

    /// Destroys every instance of the room and hands the host back.
    pub fn despawn(mut self) -> H {
        for wall in &mut self.walls {
            wall.horizontal.clear(&mut self.host);
            wall.vertical.clear(&mut self.host);
        }
        for (_, instance) in self.openings.drain() {
            self.host.destroy(instance);
        }
        self.floor.clear(&mut self.host);
        self.ceiling.clear(&mut self.host);

        tracing::debug!(topology = %self.room.topology(), "despawned room");
        self.host
    }

    // --- Scene sync ---

    fn sync(&mut self) {
        let changes = self.room.take_changes();
        if changes.is_empty() {
            return;
        }

        if changes.panels() {
            self.sync_panels();
        }
        for slot in changes.walls() {
            self.sync_wall(slot);
        }
        if changes.openings() {
            self.reconcile_openings();
        }

        let all = changes.openings();
        for (key, opening) in self.room.openings() {
            if !(all || changes.wall(opening.wall)) {
                continue;
            }
            let Some(instance) = self.openings.get(key) else {
                continue;
            };
            let Ok(wall) = self.room.wall(opening.wall) else {
                continue;
            };
            place_opening(&mut self.host, instance, opening, wall.frame(), self.room.config());
        }

        tracing::trace!(?changes, instances = self.instance_count(), "synced scene");
    }

    fn sync_wall(&mut self, slot: WallSlot) {
        let Some(pools) = self.walls.iter_mut().find(|w| w.slot == slot) else {
            return;
        };
        let Ok(wall) = self.room.wall(slot) else {
            return;
        };

        let frame = wall.frame();
        let segments = wall.segments();
        let mesh = &self.room.meshes().wall;
        let thickness = self.room.config().wall_offset;

        pools.horizontal.resize(&mut self.host, segments.horizontal.len());
        pools.vertical.resize(&mut self.host, segments.vertical.len());

        let placed = pools
            .horizontal
            .iter()
            .zip(&segments.horizontal)
            .chain(pools.vertical.iter().zip(&segments.vertical));
        for (instance, segment) in placed {
            place_segment(&mut self.host, instance, segment, frame, mesh, thickness);
        }
    }

    fn sync_panels(&mut self) {
        let panels = self.room.panels();
        let meshes = self.room.meshes();

        for (pool, mesh, kind) in [
            (&mut self.floor, &meshes.floor, PanelKind::Floor),
            (&mut self.ceiling, &meshes.ceiling, PanelKind::Ceiling),
        ] {
            let panels: SmallVec<[_; 2]> = panels.iter().filter(|p| p.kind == kind).collect();
            pool.resize(&mut self.host, panels.len());

            for (instance, panel) in pool.iter().zip(panels) {
                let [x, y] = panel.size();
                let position = Point3::new(panel.min[0], panel.min[1], panel.elevation);
                self.host.set_visible(instance, panel.area() > 0.0);
                self.host.set_local_position(instance, position);
                self.host.set_local_rotation(instance, UnitQuaternion::identity());
                self.host
                    .set_local_scale(instance, Vector3::new(x / mesh.size.x, y / mesh.size.y, 1.0));
            }
        }
    }

    /// Destroys instances of removed openings and creates instances for
    /// new ones.
    fn reconcile_openings(&mut self) {
        let stale: SmallVec<[OpeningKey; 4]> = self
            .openings
            .keys()
            .filter(|key| self.room.opening(*key).is_err())
            .collect();
        for key in stale {
            if let Some(instance) = self.openings.remove(key) {
                self.host.destroy(instance);
            }
        }

        for (key, opening) in self.room.openings() {
            if self.openings.contains_key(key) {
                continue;
            }
            let name = format!("{}_{}_{}", opening.wall, opening.kind, opening.variant);
            let instance =
                self.host
                    .create_mesh_instance(Parent::Wall(opening.wall), opening.mesh, &name);
            self.openings.insert(key, instance);
        }
    }
}

fn place_segment<H: SceneHost>(
    host: &mut H,
    instance: &H::Instance,
    segment: &Segment,
    frame: &WallFrame,
    mesh: &MeshSpec,
    thickness: f64,
) {
    // Zero-width fills keep their slot but are not drawn.
    if segment.is_degenerate() {
        host.set_visible(instance, false);
        return;
    }
    host.set_visible(instance, true);
    host.set_local_position(instance, frame.point(segment.start, 0.0, segment.bottom));
    host.set_local_rotation(instance, frame.rotation());
    host.set_local_scale(
        instance,
        Vector3::new(
            thickness / mesh.size.x,
            segment.width() / mesh.size.y,
            segment.height() / mesh.size.z,
        ),
    );
}

fn place_opening<H: SceneHost>(
    host: &mut H,
    instance: &H::Instance,
    opening: &Opening,
    frame: &WallFrame,
    config: &RoomConfig,
) {
    let depth = match opening.kind {
        OpeningKind::Door => config.door_offset,
        OpeningKind::Window => config.window_offset,
    };
    let bottom = opening.bottom(config.window_height_offset);
    host.set_local_position(instance, frame.point(opening.offset, depth, bottom));
    host.set_local_rotation(instance, frame.rotation());
    host.set_local_scale(instance, Vector3::new(1.0, 1.0, 1.0));
    host.set_visible(instance, true);
}
