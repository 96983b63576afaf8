//! Scene: the bouncing solid plus everything derived from the display size.

use log::{debug, trace};

use crate::mesh::{Polyhedron, TETRAKIS_HEXAHEDRON, VERTEX_COUNT};
use crate::physics::{Bounce, BounceParams, Impact};
use crate::transform::{project_into, Point2, Pose, Viewport};
use crate::types::Geometry;

/// Per-run animation state. One instance lives for the whole process.
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: &'static Polyhedron,
    viewport: Viewport,
    params: BounceParams,
    pose: Pose,
    bounce: Bounce,
    frame: u64,
}

impl Scene {
    pub fn new(geometry: Geometry) -> Self {
        let viewport = Viewport::from_geometry(geometry);
        let params = BounceParams::from_viewport(&viewport);
        debug!(
            "scene: scale={:.2} floor_y={:.1} max_height={:.2} gravity={:.4} restart={:.3}",
            viewport.scale, viewport.floor_y, params.max_height, params.gravity,
            params.restart_velocity
        );
        Self {
            mesh: &TETRAKIS_HEXAHEDRON,
            viewport,
            params,
            pose: Pose::default(),
            bounce: Bounce::at_apex(&params),
            frame: 0,
        }
    }

    pub fn mesh(&self) -> &'static Polyhedron {
        self.mesh
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn params(&self) -> &BounceParams {
        &self.params
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn bounce(&self) -> &Bounce {
        &self.bounce
    }

    /// Number of completed [`Scene::step`] calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance physics one frame. Returns the impact, if one happened.
    ///
    /// The pose is left alone; call [`Scene::spin`] once the frame has been
    /// drawn so the first frame shows the solid unrotated.
    pub fn step(&mut self) -> Option<Impact> {
        let impact = self.bounce.step(&self.params);
        if let Some(hit) = impact {
            trace!(
                "frame {}: impact speed={:.3} restarted={}",
                self.frame,
                hit.speed,
                hit.restarted
            );
        }
        self.frame += 1;
        impact
    }

    /// Apply the per-frame rotation.
    pub fn spin(&mut self) {
        self.pose.advance();
    }

    /// Project the mesh for the current state.
    pub fn project_into(&self, out: &mut [Point2; VERTEX_COUNT]) {
        project_into(self.mesh, self.pose, &self.bounce, &self.viewport, out);
    }
}
