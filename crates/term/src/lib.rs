//! Terminal frame pipeline.
//!
//! Turns projected geometry into terminal output without any widget layer:
//! wireframe edges are rasterized into a braille dot framebuffer, composited
//! over a precomputed checkerboard floor and encoded as style runs.
//!
//! Everything except [`TerminalRenderer`]'s I/O is pure and unit-testable.

pub mod fb;
pub mod floor;
pub mod pipeline;
pub mod raster;
pub mod renderer;

pub use icosa_core as core;
pub use icosa_types as types;

pub use fb::{braille, DotBuffer};
pub use floor::{FloorField, Tile};
pub use pipeline::FramePipeline;
pub use raster::{draw_line, draw_wireframe};
pub use renderer::{
    encode_frame_into, for_each_style_run, frame_capacity, keep_first_error, query_geometry,
    CellStyle, TerminalGuard, TerminalRenderer,
};
