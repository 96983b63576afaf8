//! Transform module - rotate, squash and perspective-project the mesh.
//!
//! Pure functions of their inputs: the same pose, bounce state and viewport
//! always produce the same projected points.

use crate::mesh::{Polyhedron, VERTEX_COUNT};
use crate::physics::Bounce;
use crate::types::{
    Geometry, CAMERA_DISTANCE, CENTER_LIFT, DEPTH_MODULATION, DOTS_PER_CELL_Y, PROJECTION_SCALE,
    SPIN_X, SPIN_Y, SPIN_Z,
};

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A projected point in dot space (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

/// Euler angles in radians, applied in X then Y then Z order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl Pose {
    pub fn new(ax: f32, ay: f32, az: f32) -> Self {
        Self { ax, ay, az }
    }

    /// Advance by the fixed per-frame spin. Angles are left unbounded.
    pub fn advance(&mut self) {
        self.ax += SPIN_X;
        self.ay += SPIN_Y;
        self.az += SPIN_Z;
    }
}

/// Screen-space placement derived once from the display geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform dots-per-model-unit factor.
    pub scale: f32,
    /// Horizontal center of the dot surface.
    pub center_x: f32,
    /// The floor line (horizon row) in dots.
    pub floor_y: f32,
}

impl Viewport {
    pub fn from_geometry(geometry: Geometry) -> Self {
        let dot_w = geometry.dot_width() as f32;
        let dot_h = geometry.dot_height() as f32;
        Self {
            scale: dot_w.min(dot_h) * PROJECTION_SCALE,
            center_x: dot_w / 2.0,
            floor_y: (geometry.horizon_row() as i32 * DOTS_PER_CELL_Y) as f32,
        }
    }

    /// Vertical center of the solid for a given bounce height.
    pub fn center_y(&self, height: f32) -> f32 {
        self.floor_y - height - self.scale * CENTER_LIFT
    }
}

/// Project every vertex of `mesh` into `out`.
pub fn project_into(
    mesh: &Polyhedron,
    pose: Pose,
    bounce: &Bounce,
    viewport: &Viewport,
    out: &mut [Point2; VERTEX_COUNT],
) {
    let (s1, c1) = pose.ax.sin_cos();
    let (s2, c2) = pose.ay.sin_cos();
    let (s3, c3) = pose.az.sin_cos();

    let squash = bounce.squash();
    let y_scale = 1.0 - squash;
    let xz_scale = 1.0 + squash * 0.5;

    let cx = viewport.center_x;
    let cy = viewport.center_y(bounce.height());

    for (v, p) in mesh.vertices.iter().zip(out.iter_mut()) {
        // X
        let y1 = v.y * c1 - v.z * s1;
        let z1 = v.y * s1 + v.z * c1;
        // Y
        let x2 = v.x * c2 + z1 * s2;
        let z2 = -v.x * s2 + z1 * c2;
        // Z
        let x3 = x2 * c3 - y1 * s3;
        let y3 = x2 * s3 + y1 * c3;

        // Depth stays unscaled; only the screen axes squash.
        let x = x3 * xz_scale;
        let y = y3 * y_scale;

        let d = CAMERA_DISTANCE + z2 * DEPTH_MODULATION;
        p.x = cx + (x / d) * viewport.scale;
        p.y = cy + (y / d) * viewport.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TETRAKIS_HEXAHEDRON;
    use crate::physics::BounceParams;

    fn setup() -> (Viewport, Bounce) {
        let g = Geometry::new(80, 24).unwrap();
        let params = BounceParams::from_viewport(&Viewport::from_geometry(g));
        (Viewport::from_geometry(g), Bounce::at_apex(&params))
    }

    #[test]
    fn viewport_matches_geometry() {
        let vp = Viewport::from_geometry(Geometry::new(80, 24).unwrap());
        assert_eq!(vp.center_x, 80.0);
        assert_eq!(vp.floor_y, 52.0);
        assert!((vp.scale - 96.0 * 0.45).abs() < 1e-4);
    }

    #[test]
    fn projection_is_deterministic() {
        let (vp, bounce) = setup();
        let pose = Pose::new(0.4, 1.3, -2.2);
        let mut a = [Point2::default(); VERTEX_COUNT];
        let mut b = [Point2::default(); VERTEX_COUNT];
        project_into(&TETRAKIS_HEXAHEDRON, pose, &bounce, &vp, &mut a);
        project_into(&TETRAKIS_HEXAHEDRON, pose, &bounce, &vp, &mut b);
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    #[test]
    fn identity_pose_keeps_tips_on_axes() {
        let (vp, bounce) = setup();
        let mut out = [Point2::default(); VERTEX_COUNT];
        project_into(&TETRAKIS_HEXAHEDRON, Pose::default(), &bounce, &vp, &mut out);

        let cy = vp.center_y(bounce.height());
        // +z / -z tips project onto the center.
        for tip in [12, 13] {
            assert!((out[tip].x - vp.center_x).abs() < 1e-4);
            assert!((out[tip].y - cy).abs() < 1e-4);
        }
        // +x tip is right of center, +y tip is below it (screen y grows down).
        assert!(out[8].x > vp.center_x);
        assert!(out[10].y > cy);
    }

    #[test]
    fn nearer_points_project_larger() {
        let (vp, bounce) = setup();
        let mut out = [Point2::default(); VERTEX_COUNT];
        project_into(&TETRAKIS_HEXAHEDRON, Pose::default(), &bounce, &vp, &mut out);
        // Corner 0 has z=+1 (larger divisor), corner 1 has z=-1.
        let far = (out[0].x - vp.center_x).abs();
        let near = (out[1].x - vp.center_x).abs();
        assert!(near > far);
    }
}
