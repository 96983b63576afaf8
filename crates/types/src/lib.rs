//! Core types module - display geometry, tuning constants and setup errors
//!
//! Everything here is plain data with no I/O, shared by the scene simulation
//! (`icosa-core`) and the terminal pipeline (`icosa-term`).
//!
//! # Display geometry
//!
//! Each terminal cell is addressed as a 2x4 block of braille dots, so a
//! `cols x rows` terminal exposes a `2*cols x 4*rows` dot surface.
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | dot width | `cols * 2` |
//! | dot height | `rows * 4` |
//! | horizon row | `rows * 55 / 100` (floored) |
//!
//! # Examples
//!
//! ```
//! use icosa_types::{Geometry, SetupError};
//!
//! let g = Geometry::new(80, 24).unwrap();
//! assert_eq!(g.dot_width(), 160);
//! assert_eq!(g.dot_height(), 96);
//! assert_eq!(g.horizon_row(), 13);
//!
//! assert!(matches!(Geometry::new(19, 24), Err(SetupError::TooSmall { .. })));
//! ```

use thiserror::Error;

/// Minimum supported terminal width in columns.
pub const MIN_COLS: u16 = 20;

/// Minimum supported terminal height in rows.
pub const MIN_ROWS: u16 = 10;

/// Braille dots per cell, horizontally.
pub const DOTS_PER_CELL_X: i32 = 2;

/// Braille dots per cell, vertically.
pub const DOTS_PER_CELL_Y: i32 = 4;

/// Horizon position as a percentage of total rows from the top.
pub const HORIZON_PERCENT: u16 = 55;

/// Default frame interval in milliseconds (~30 FPS).
pub const FRAME_MS: u64 = 33;

/// Per-frame rotation increments in radians (x, y, z).
pub const SPIN_X: f32 = 0.05;
pub const SPIN_Y: f32 = 0.07;
pub const SPIN_Z: f32 = 0.03;

/// Distance of each pyramid tip from the solid's center.
pub const PYRAMID_TIP: f32 = 1.5;

/// Base camera distance used by the perspective divide.
pub const CAMERA_DISTANCE: f32 = 5.0;

/// How strongly rotated depth modulates the camera distance.
pub const DEPTH_MODULATION: f32 = 0.3;

/// Projection scale as a fraction of the smaller dot dimension.
pub const PROJECTION_SCALE: f32 = 0.45;

/// Lift of the projected center above the bounce line, as a fraction of scale.
pub const CENTER_LIFT: f32 = 0.2;

/// Maximum bounce height as a fraction of the floor line (in dots).
pub const BOUNCE_HEIGHT: f32 = 0.55;

/// Frames needed to fall from the top of the bounce (~0.7s at 30 FPS).
pub const FALL_FRAMES: f32 = 22.0;

/// Fraction of speed kept on each impact.
pub const DAMPING: f32 = 0.82;

/// Per-frame geometric decay of the squash factor.
pub const SQUASH_DECAY: f32 = 0.70;

/// Upper bound of the squash factor.
pub const SQUASH_MAX: f32 = 0.5;

/// A rebound slower than `gravity * RESTART_THRESHOLD` restarts at full speed.
pub const RESTART_THRESHOLD: f32 = 8.0;

/// Failures that prevent rendering from starting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("terminal too small: {cols}x{rows} (need at least 20x10)")]
    TooSmall { cols: u16, rows: u16 },

    #[error("terminal size unavailable: {0}")]
    GeometryUnavailable(String),

    #[error("cannot allocate {what} ({bytes} bytes)")]
    OutOfMemory { what: &'static str, bytes: usize },
}

/// Validated terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    cols: u16,
    rows: u16,
}

impl Geometry {
    /// Validate a terminal size against the supported minimum.
    pub fn new(cols: u16, rows: u16) -> Result<Self, SetupError> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(SetupError::TooSmall { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    pub fn dot_width(&self) -> i32 {
        self.cols as i32 * DOTS_PER_CELL_X
    }

    pub fn dot_height(&self) -> i32 {
        self.rows as i32 * DOTS_PER_CELL_Y
    }

    /// Row index of the horizon; rows at or above it are sky.
    pub fn horizon_row(&self) -> u16 {
        ((self.rows as u32 * HORIZON_PERCENT as u32) / 100) as u16
    }
}
