//! FramePipeline: owns every per-run buffer and produces one frame per call.
//!
//! This module is pure (no I/O). All buffers are allocated once in
//! [`FramePipeline::new`]; [`FramePipeline::advance`] reuses them, so the
//! steady-state frame path does not allocate.

use crate::core::{Impact, Point2, Scene, VERTEX_COUNT};
use crate::fb::DotBuffer;
use crate::floor::FloorField;
use crate::raster::draw_wireframe;
use crate::types::{Geometry, SetupError};

pub struct FramePipeline {
    scene: Scene,
    floor: FloorField,
    dots: DotBuffer,
    points: [Point2; VERTEX_COUNT],
}

impl FramePipeline {
    pub fn new(geometry: Geometry) -> Result<Self, SetupError> {
        let floor = FloorField::compute(geometry)?;
        let dots = DotBuffer::new(geometry)?;
        let mut pipeline = Self {
            scene: Scene::new(geometry),
            floor,
            dots,
            points: [Point2::default(); VERTEX_COUNT],
        };
        pipeline.rasterize();
        Ok(pipeline)
    }

    /// Step the simulation one frame and redraw the wireframe.
    ///
    /// The frame is drawn with the current pose; the spin applies afterwards.
    pub fn advance(&mut self) -> Option<Impact> {
        let impact = self.scene.step();
        self.rasterize();
        self.scene.spin();
        impact
    }

    /// Re-project the current state into a cleared dot buffer.
    pub fn rasterize(&mut self) {
        self.scene.project_into(&mut self.points);
        self.dots.clear();
        draw_wireframe(&mut self.dots, self.scene.mesh(), &self.points);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn floor(&self) -> &FloorField {
        &self.floor
    }

    pub fn dots(&self) -> &DotBuffer {
        &self.dots
    }

    pub fn points(&self) -> &[Point2; VERTEX_COUNT] {
        &self.points
    }
}
