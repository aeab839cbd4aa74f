// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout invariants checked after long sequences of pseudo-random edits:
//! tiling, non-overlap, clearance, monotonic clamping and rebuild idempotence.

use interior_layout::{
    MeshHandle, MeshSet, MeshSpec, OpeningKey, OpeningKind, Room, RoomConfig, RoomTopology,
    Vector3, Wall, WallSlot,
};

const TOL: f64 = 1e-6;

fn meshes() -> MeshSet {
    let unit = Vector3::new(1.0, 1.0, 1.0);
    MeshSet {
        floor: MeshSpec::new(MeshHandle(0), unit),
        wall: MeshSpec::new(MeshHandle(1), unit),
        ceiling: MeshSpec::new(MeshHandle(2), unit),
        doors: [
            MeshSpec::new(MeshHandle(10), Vector3::new(10.0, 90.0, 210.0)),
            MeshSpec::new(MeshHandle(11), Vector3::new(10.0, 70.0, 200.0)),
        ]
        .into_iter()
        .collect(),
        windows: [
            MeshSpec::new(MeshHandle(20), Vector3::new(10.0, 121.0, 120.0)),
            MeshSpec::new(MeshHandle(21), Vector3::new(10.0, 61.0, 150.0)),
        ]
        .into_iter()
        .collect(),
    }
}

/// Small deterministic generator so the edit sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (self.next() % 10_000) as f64 / 10_000.0 * (hi - lo)
    }
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Rect {
    fn area(&self) -> f64 {
        (self.x1 - self.x0).max(0.0) * (self.y1 - self.y0).max(0.0)
    }

    fn overlap(&self, other: &Rect) -> f64 {
        let w = (self.x1.min(other.x1) - self.x0.max(other.x0)).max(0.0);
        let h = (self.y1.min(other.y1) - self.y0.max(other.y0)).max(0.0);
        w * h
    }
}

/// Segments plus the openings themselves must tile the capped wall rectangle.
fn assert_tiles(room: &Room, wall: &Wall) {
    let height = room.dimensions().height;
    let sill = room.config().window_height_offset;
    let extent = wall.extent();

    let mut rects: Vec<Rect> = wall
        .segments()
        .iter()
        .map(|s| Rect {
            x0: s.start,
            x1: s.end,
            y0: s.bottom,
            y1: s.top,
        })
        .collect();
    for key in wall.openings() {
        let o = room.opening(*key).unwrap();
        rects.push(Rect {
            x0: o.offset,
            x1: o.end(),
            y0: o.bottom(sill),
            y1: o.top(sill).min(height),
        });
    }

    for r in &rects {
        assert!(r.x0 >= extent.start() - TOL && r.x1 <= extent.end() + TOL, "{r:?} outside wall");
        assert!(r.y0 >= -TOL && r.y1 <= height + TOL, "{r:?} outside height");
    }
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(a.overlap(b) < TOL, "{a:?} overlaps {b:?} on {}", wall.slot());
        }
    }

    let covered: f64 = rects.iter().map(Rect::area).sum();
    let expected = (extent.end() - extent.start()) * height;
    assert!(
        (covered - expected).abs() < 1e-3,
        "{}: covered {covered} of {expected}",
        wall.slot()
    );
}

/// Openings never overlap and keep the clearance to wall ends and neighbours.
fn assert_clearance(room: &Room, wall: &Wall) {
    let clearance = room.config().alignment_offset;
    let openings: Vec<_> = wall
        .openings()
        .iter()
        .map(|k| room.opening(*k).unwrap())
        .collect();

    for o in &openings {
        assert_eq!(o.wall, wall.slot());
        assert!(o.offset >= clearance - TOL, "{o:?} too close to wall start");
        assert!(o.end() <= wall.length() - clearance + TOL, "{o:?} too close to wall end");
    }
    for pair in openings.windows(2) {
        assert!(pair[0].offset <= pair[1].offset, "openings out of order");
        let gap = pair[0].span().gap(&pair[1].span());
        assert!(!pair[0].span().intersects(&pair[1].span()));
        assert!(gap >= clearance - TOL, "gap {gap} below clearance");
    }
}

fn assert_segment_counts(room: &Room, wall: &Wall) {
    let mut vertical = 0;
    for key in wall.openings() {
        vertical += match room.opening(*key).unwrap().kind {
            OpeningKind::Door => 1,
            OpeningKind::Window => 2,
        };
    }
    assert_eq!(wall.segments().horizontal.len(), wall.openings().len() + 1);
    assert_eq!(wall.segments().vertical.len(), vertical);
}

fn assert_room(room: &Room) {
    for wall in room.walls() {
        assert_tiles(room, wall);
        assert_clearance(room, wall);
        assert_segment_counts(room, wall);
    }
}

fn random_edits(topology: RoomTopology, seed: u64, steps: usize) {
    let config = RoomConfig {
        length: 400.0,
        width: 320.0,
        ..RoomConfig::default()
    };
    let mut room = Room::new(topology, config, meshes()).unwrap();
    let mut rng = Lcg(seed);
    let mut keys: Vec<OpeningKey> = Vec::new();
    let slots = topology.slots();

    assert_room(&room);

    for _ in 0..steps {
        match rng.below(6) {
            0 | 1 => {
                let slot = slots[rng.below(slots.len())];
                let kind = if rng.below(2) == 0 {
                    OpeningKind::Door
                } else {
                    OpeningKind::Window
                };
                let length = room.wall(slot).unwrap().length();
                let center = rng.range(-50.0, length + 50.0);
                let before = room.wall(slot).unwrap().openings().len();
                match room.add_opening(slot, center, kind, rng.below(2)) {
                    Ok(key) => keys.push(key),
                    Err(_) => assert_eq!(room.wall(slot).unwrap().openings().len(), before),
                }
            }
            2 if !keys.is_empty() => {
                let key = keys[rng.below(keys.len())];
                let before = room.opening(key).unwrap().offset;
                let length = room.wall(room.opening(key).unwrap().wall).unwrap().length();
                if room.move_opening(key, rng.range(-50.0, length + 50.0)).is_err() {
                    assert_eq!(room.opening(key).unwrap().offset, before);
                }
            }
            3 if !keys.is_empty() => {
                let key = keys.swap_remove(rng.below(keys.len()));
                room.remove_opening(key).unwrap();
            }
            4 => {
                let dims = room
                    .set_dimensions(
                        rng.range(150.0, 600.0),
                        rng.range(150.0, 600.0),
                        rng.range(250.0, 320.0),
                    )
                    .unwrap();
                // A second clamp on an already-valid room is a no-op.
                assert!(!room.clamp_room_dimensions());
                assert_eq!(room.dimensions(), dims);
            }
            _ => {
                if topology == RoomTopology::LShaped {
                    let dims = room.dimensions();
                    room.set_corner(
                        rng.range(0.0, dims.length),
                        rng.range(0.0, dims.width),
                        true,
                    )
                    .unwrap();
                }
            }
        }
        assert_room(&room);
    }
}

#[test]
fn rectangular_room_keeps_invariants() {
    for seed in 1..=8 {
        random_edits(RoomTopology::Rectangular, seed, 150);
    }
}

#[test]
fn l_shaped_room_keeps_invariants() {
    for seed in 100..=108 {
        random_edits(RoomTopology::LShaped, seed, 150);
    }
}

#[test]
fn clamp_is_monotonic_and_idempotent() {
    let mut room = Room::new(RoomTopology::Rectangular, RoomConfig::default(), meshes()).unwrap();
    room.set_dimensions(480.0, 300.0, 270.0).unwrap();
    room.add_opening(WallSlot::West, 400.0, OpeningKind::Window, 0)
        .unwrap();
    let needed = room
        .openings_on(WallSlot::West)
        .unwrap()
        .iter()
        .map(|(_, o)| o.end())
        .fold(0.0, f64::max)
        + room.config().alignment_offset;

    for target in [100.0, 250.0, needed - 1.0, needed, needed + 40.0] {
        let dims = room.set_dimensions(target, 300.0, 270.0).unwrap();
        assert!(dims.length >= needed - TOL);
        assert!(dims.length >= target - TOL);
        assert!(!room.clamp_room_dimensions());
    }
}

#[test]
fn update_wall_twice_is_idempotent() {
    let mut room = Room::new(RoomTopology::LShaped, RoomConfig::default(), meshes()).unwrap();
    room.set_dimensions(420.0, 360.0, 280.0).unwrap();
    room.add_opening(WallSlot::West, 120.0, OpeningKind::Door, 0)
        .unwrap();
    room.add_opening(WallSlot::West, 300.0, OpeningKind::Window, 1)
        .unwrap();

    for &slot in RoomTopology::LShaped.slots() {
        room.update_wall(slot).unwrap();
        let first = room.wall(slot).unwrap().segments().clone();
        let frame = *room.wall(slot).unwrap().frame();
        room.update_wall(slot).unwrap();
        assert_eq!(room.wall(slot).unwrap().segments(), &first);
        assert_eq!(room.wall(slot).unwrap().frame(), &frame);
    }
}

#[test]
fn floor_panels_cover_footprint() {
    let mut room = Room::new(RoomTopology::LShaped, RoomConfig::default(), meshes()).unwrap();
    room.set_dimensions(500.0, 400.0, 270.0).unwrap();
    room.set_corner(320.0, 260.0, true).unwrap();

    let floor: f64 = room
        .panels()
        .iter()
        .filter(|p| p.kind == interior_layout::PanelKind::Floor)
        .map(|p| p.area())
        .sum();
    assert!((floor - (500.0 * 400.0 - 180.0 * 140.0)).abs() < TOL);
}
