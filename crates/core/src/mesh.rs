//! Mesh module - the fixed polyhedron drawn every frame
//!
//! A tetrakis hexahedron: the eight corners of a unit cube plus a pyramid tip
//! raised above the center of each of its six faces.

use crate::transform::Vec3;
use crate::types::PYRAMID_TIP;

pub const VERTEX_COUNT: usize = 14;
pub const EDGE_COUNT: usize = 36;

/// Immutable vertex and edge tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polyhedron {
    pub vertices: [Vec3; VERTEX_COUNT],
    pub edges: [(usize, usize); EDGE_COUNT],
}

const P: f32 = PYRAMID_TIP;

pub static TETRAKIS_HEXAHEDRON: Polyhedron = Polyhedron {
    vertices: [
        // Cube corners (0-7)
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, -1.0),
        // Tips: +x, -x, +y, -y, +z, -z (8-13)
        Vec3::new(P, 0.0, 0.0),
        Vec3::new(-P, 0.0, 0.0),
        Vec3::new(0.0, P, 0.0),
        Vec3::new(0.0, -P, 0.0),
        Vec3::new(0.0, 0.0, P),
        Vec3::new(0.0, 0.0, -P),
    ],
    edges: [
        // Cube
        (0, 1),
        (0, 2),
        (0, 4),
        (1, 3),
        (1, 5),
        (2, 3),
        (2, 6),
        (3, 7),
        (4, 5),
        (4, 6),
        (5, 7),
        (6, 7),
        // +x face
        (8, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        // -x face
        (9, 4),
        (9, 5),
        (9, 6),
        (9, 7),
        // +y face
        (10, 0),
        (10, 1),
        (10, 4),
        (10, 5),
        // -y face
        (11, 2),
        (11, 3),
        (11, 6),
        (11, 7),
        // +z face
        (12, 0),
        (12, 2),
        (12, 4),
        (12, 6),
        // -z face
        (13, 1),
        (13, 3),
        (13, 5),
        (13, 7),
    ],
};
