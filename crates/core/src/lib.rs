//! Scene simulation module - pure, deterministic, and testable
//!
//! This crate owns everything that changes from frame to frame except pixels:
//! the solid's geometry, its spin, the bounce physics and the projection into
//! dot space. It has **zero dependencies** on terminals or I/O.
//!
//! # Module Structure
//!
//! - [`mesh`]: the tetrakis hexahedron vertex and edge tables
//! - [`physics`]: vertical bounce integrator with squash/stretch
//! - [`transform`]: rotation, squash scaling and perspective projection
//! - [`scene`]: ties the above together with constants derived from geometry
//!
//! # Example
//!
//! ```
//! use icosa_core::{Point2, Scene, VERTEX_COUNT};
//! use icosa_types::Geometry;
//!
//! let mut scene = Scene::new(Geometry::new(80, 24).unwrap());
//! let mut points = [Point2::default(); VERTEX_COUNT];
//!
//! scene.step();
//! scene.project_into(&mut points);
//! assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
//! ```

pub mod mesh;
pub mod physics;
pub mod scene;
pub mod transform;

pub use icosa_types as types;

pub use mesh::{Polyhedron, EDGE_COUNT, TETRAKIS_HEXAHEDRON, VERTEX_COUNT};
pub use physics::{Bounce, BounceParams, Impact};
pub use scene::Scene;
pub use transform::{project_into, Point2, Pose, Vec3, Viewport};
