// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room shape: wall lengths and frames, floor and ceiling panels.
//!
//! Every wall gets a local frame in room space:
//!
//! - local `+y` runs along the wall from its start (offset 0) to its end,
//! - local `+x` points out of the room,
//! - local `+z` is up.
//!
//! The frame origin sits on the wall's centre plane, half a wall thickness
//! outside the nominal room rectangle, so the inner faces are flush with the
//! rectangle. Walls that own a convex corner extend past both neighbours by
//! one thickness ("caps") so adjoining walls close without a gap.

use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use crate::layout::WallExtent;
use crate::topology::{RoomTopology, WallSlot};

/// Room extents, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything that determines wall placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomShape {
    pub topology: RoomTopology,
    pub dims: Dimensions,
    /// Wall thickness.
    pub thickness: f64,
    /// Interior notch corner. Ignored for rectangular rooms.
    pub corner: Point2<f64>,
}

/// Placement of a wall in room space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallFrame {
    /// Centre-plane point at the wall's interior start, at floor level.
    pub origin: Point3<f64>,
    /// Heading about `+z`, in degrees.
    pub yaw: f64,
    /// Extension before offset 0.
    pub cap_start: f64,
    /// Extension past the wall's interior end.
    pub cap_end: f64,
}

impl WallFrame {
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.yaw.to_radians())
    }

    /// Unit vector along the wall.
    pub fn direction(&self) -> Vector3<f64> {
        self.rotation() * Vector3::y()
    }

    /// Unit vector pointing out of the room.
    pub fn outward(&self) -> Vector3<f64> {
        self.rotation() * Vector3::x()
    }

    /// Room-space point at `along` the wall, `depth` outward of the centre
    /// plane and `up` above the floor.
    pub fn point(&self, along: f64, depth: f64, up: f64) -> Point3<f64> {
        self.origin + self.direction() * along + self.outward() * depth + Vector3::z() * up
    }
}

/// Length and frame of one wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGeometry {
    pub length: f64,
    pub frame: WallFrame,
}

impl WallGeometry {
    pub fn extent(&self) -> WallExtent {
        WallExtent {
            length: self.length,
            cap_start: self.frame.cap_start,
            cap_end: self.frame.cap_end,
        }
    }
}

impl RoomShape {
    /// Length and frame of `slot`, or `None` if the topology has no such wall.
    pub fn wall_geometry(&self, slot: WallSlot) -> Option<WallGeometry> {
        let Dimensions { length, width, .. } = self.dims;
        let t = self.thickness;
        let c = self.corner;

        // (interior start, length, yaw, cap_start, cap_end)
        let (start, wall_length, yaw, cap_start, cap_end) = match (self.topology, slot) {
            (_, WallSlot::West) => (Point2::new(0.0, 0.0), length, -90.0, t, t),
            (_, WallSlot::South) => (Point2::new(0.0, width), width, 180.0, 0.0, 0.0),
            (RoomTopology::Rectangular, WallSlot::North) => {
                (Point2::new(length, 0.0), width, 0.0, 0.0, 0.0)
            }
            (RoomTopology::Rectangular, WallSlot::East) => {
                (Point2::new(length, width), length, 90.0, t, t)
            }
            (RoomTopology::LShaped, WallSlot::North) => {
                (Point2::new(length, 0.0), c.y, 0.0, 0.0, 0.0)
            }
            (RoomTopology::LShaped, WallSlot::NorthEast) => {
                // Ends on the concave corner: no cap there.
                (Point2::new(length, c.y), length - c.x, 90.0, t, 0.0)
            }
            (RoomTopology::LShaped, WallSlot::SouthEast) => {
                (Point2::new(c.x, c.y), width - c.y, 0.0, 0.0, 0.0)
            }
            (RoomTopology::LShaped, WallSlot::East) => (Point2::new(c.x, width), c.x, 90.0, t, t),
            (RoomTopology::Rectangular, WallSlot::NorthEast | WallSlot::SouthEast) => {
                return None
            }
        };

        let mut frame = WallFrame {
            origin: Point3::new(start.x, start.y, 0.0),
            yaw,
            cap_start,
            cap_end,
        };
        frame.origin += frame.outward() * (t / 2.0);

        Some(WallGeometry {
            length: wall_length.max(0.0),
            frame,
        })
    }

    /// Floor and ceiling panels. One of each for a rectangular room; an
    /// L-shaped room is split at the corner into the full-length strip below
    /// `corner.y` and the short strip above it.
    pub fn panels(&self) -> SmallVec<[Panel; 4]> {
        let Dimensions {
            length,
            width,
            height,
        } = self.dims;

        let footprint: SmallVec<[([f64; 2], [f64; 2]); 2]> = match self.topology {
            RoomTopology::Rectangular => smallvec![([0.0, 0.0], [length, width])],
            RoomTopology::LShaped => smallvec![
                ([0.0, 0.0], [length, self.corner.y]),
                ([0.0, self.corner.y], [self.corner.x, width]),
            ],
        };

        let mut panels = SmallVec::new();
        for (kind, elevation) in [(PanelKind::Floor, 0.0), (PanelKind::Ceiling, height)] {
            for (min, max) in &footprint {
                panels.push(Panel {
                    kind,
                    min: *min,
                    max: *max,
                    elevation,
                });
            }
        }
        panels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Floor,
    Ceiling,
}

/// A horizontal rectangle of floor or ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub min: [f64; 2],
    pub max: [f64; 2],
    pub elevation: f64,
}

impl Panel {
    pub fn size(&self) -> [f64; 2] {
        [self.max[0] - self.min[0], self.max[1] - self.min[1]]
    }

    pub fn area(&self) -> f64 {
        let [x, y] = self.size();
        x * y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(length: f64, width: f64) -> RoomShape {
        RoomShape {
            topology: RoomTopology::Rectangular,
            dims: Dimensions {
                length,
                width,
                height: 270.0,
            },
            thickness: 20.0,
            corner: Point2::origin(),
        }
    }

    fn l_shape(length: f64, width: f64, cx: f64, cy: f64) -> RoomShape {
        RoomShape {
            topology: RoomTopology::LShaped,
            corner: Point2::new(cx, cy),
            ..rect(length, width)
        }
    }

    fn assert_point(p: Point3<f64>, x: f64, y: f64, z: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
        assert_relative_eq!(p.z, z, epsilon = 1e-9);
    }

    #[test]
    fn rectangular_wall_lengths() {
        let shape = rect(300.0, 250.0);
        assert_relative_eq!(shape.wall_geometry(WallSlot::West).unwrap().length, 300.0);
        assert_relative_eq!(shape.wall_geometry(WallSlot::East).unwrap().length, 300.0);
        assert_relative_eq!(shape.wall_geometry(WallSlot::North).unwrap().length, 250.0);
        assert_relative_eq!(shape.wall_geometry(WallSlot::South).unwrap().length, 250.0);
        assert!(shape.wall_geometry(WallSlot::NorthEast).is_none());
    }

    #[test]
    fn opposite_walls_face_opposite_headings() {
        let shape = rect(300.0, 250.0);
        let frame = |slot| shape.wall_geometry(slot).unwrap().frame;

        let north = frame(WallSlot::North).outward();
        let south = frame(WallSlot::South).outward();
        assert_relative_eq!(north + south, Vector3::zeros(), epsilon = 1e-12);

        let west = frame(WallSlot::West).outward();
        let east = frame(WallSlot::East).outward();
        assert_relative_eq!(west + east, Vector3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(west, -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(north, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn walls_are_shifted_outward_by_half_thickness() {
        let shape = rect(300.0, 250.0);
        let west = shape.wall_geometry(WallSlot::West).unwrap().frame;
        assert_point(west.origin, 0.0, -10.0, 0.0);

        let north = shape.wall_geometry(WallSlot::North).unwrap().frame;
        assert_point(north.origin, 310.0, 0.0, 0.0);

        // Wall end lands on the far corner.
        assert_point(west.point(300.0, 0.0, 0.0), 300.0, -10.0, 0.0);
        let east = shape.wall_geometry(WallSlot::East).unwrap().frame;
        assert_point(east.point(300.0, 0.0, 0.0), 0.0, 260.0, 0.0);
    }

    #[test]
    fn corner_owners_are_capped() {
        let shape = rect(300.0, 250.0);
        let west = shape.wall_geometry(WallSlot::West).unwrap();
        assert_relative_eq!(west.frame.cap_start, 20.0);
        assert_relative_eq!(west.extent().end(), 320.0);
        let north = shape.wall_geometry(WallSlot::North).unwrap();
        assert_relative_eq!(north.frame.cap_start, 0.0);
    }

    #[test]
    fn l_shape_walls_follow_corner() {
        let shape = l_shape(400.0, 300.0, 250.0, 180.0);
        let len = |slot| shape.wall_geometry(slot).unwrap().length;

        assert_relative_eq!(len(WallSlot::West), 400.0);
        assert_relative_eq!(len(WallSlot::South), 300.0);
        assert_relative_eq!(len(WallSlot::North), 180.0);
        assert_relative_eq!(len(WallSlot::NorthEast), 150.0);
        assert_relative_eq!(len(WallSlot::SouthEast), 120.0);
        assert_relative_eq!(len(WallSlot::East), 250.0);

        // The notch walls face into the notch.
        let ne = shape.wall_geometry(WallSlot::NorthEast).unwrap().frame;
        let se = shape.wall_geometry(WallSlot::SouthEast).unwrap().frame;
        assert_relative_eq!(ne.outward(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(se.outward(), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(ne.cap_end, 0.0);

        // NorthEast ends at the concave corner, SouthEast starts there.
        assert_point(ne.point(150.0, -10.0, 0.0), 250.0, 180.0, 0.0);
        assert_point(se.point(0.0, -10.0, 0.0), 250.0, 180.0, 0.0);
    }

    #[test]
    fn perimeter_of_inner_faces_is_closed() {
        // Walk the inner faces of the L-shape; each wall ends where the next starts.
        let shape = l_shape(400.0, 300.0, 250.0, 180.0);
        let order = [
            WallSlot::West,
            WallSlot::North,
            WallSlot::NorthEast,
            WallSlot::SouthEast,
            WallSlot::East,
            WallSlot::South,
        ];
        for pair in order.windows(2) {
            let a = shape.wall_geometry(pair[0]).unwrap();
            let b = shape.wall_geometry(pair[1]).unwrap();
            let half = shape.thickness / 2.0;
            let end = a.frame.point(a.length, -half, 0.0);
            let start = b.frame.point(0.0, -half, 0.0);
            assert_relative_eq!((end - start).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn rectangular_panels() {
        let panels = rect(300.0, 250.0).panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].kind, PanelKind::Floor);
        assert_eq!(panels[1].kind, PanelKind::Ceiling);
        assert_relative_eq!(panels[1].elevation, 270.0);
        assert_relative_eq!(panels[0].area(), 75_000.0);
    }

    #[test]
    fn l_shape_panels_cover_footprint() {
        let panels = l_shape(400.0, 300.0, 250.0, 180.0).panels();
        assert_eq!(panels.len(), 4);

        let floor_area: f64 = panels
            .iter()
            .filter(|p| p.kind == PanelKind::Floor)
            .map(Panel::area)
            .sum();
        // Bounding box minus the notch.
        assert_relative_eq!(floor_area, 400.0 * 300.0 - 150.0 * 120.0);
    }
}
