//! Braille dot framebuffer.
//!
//! Each terminal cell holds a 2x4 block of dots packed into one byte using the
//! Unicode braille bit order, so a cell's mask added to U+2800 is its glyph:
//!
//! ```text
//!   x=0   x=1
//!   0x01  0x08   y=0
//!   0x02  0x10   y=1
//!   0x04  0x20   y=2
//!   0x40  0x80   y=3
//! ```

use crate::types::{Geometry, SetupError, DOTS_PER_CELL_X, DOTS_PER_CELL_Y};

const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// First codepoint of the braille patterns block.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Glyph for an occupancy mask.
#[inline]
pub fn braille(mask: u8) -> char {
    // U+2800..=U+28FF are all assigned scalar values.
    char::from_u32(BRAILLE_BASE + mask as u32).unwrap_or(' ')
}

/// Grid of per-cell dot masks, one byte per terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotBuffer {
    cols: u16,
    rows: u16,
    dot_w: i32,
    dot_h: i32,
    cells: Vec<u8>,
}

impl DotBuffer {
    /// Allocate a cleared buffer for `geometry`.
    pub fn new(geometry: Geometry) -> Result<Self, SetupError> {
        let len = geometry.cell_count();
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SetupError::OutOfMemory {
                what: "dot framebuffer",
                bytes: len,
            })?;
        cells.resize(len, 0);
        Ok(Self {
            cols: geometry.cols(),
            rows: geometry.rows(),
            dot_w: geometry.dot_width(),
            dot_h: geometry.dot_height(),
            cells,
        })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn dot_width(&self) -> i32 {
        self.dot_w
    }

    pub fn dot_height(&self) -> i32 {
        self.dot_h
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Mask of the cell at (`col`, `row`), or `None` outside the grid.
    pub fn get(&self, col: u16, row: u16) -> Option<u8> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[(row as usize) * (self.cols as usize) + (col as usize)])
    }

    #[inline(always)]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || x >= self.dot_w || y < 0 || y >= self.dot_h {
            return None;
        }
        let idx = (y / DOTS_PER_CELL_Y) as usize * self.cols as usize
            + (x / DOTS_PER_CELL_X) as usize;
        Some((idx, DOT_BITS[(x & 1) as usize][(y & 3) as usize]))
    }

    /// Turn on the dot at (`x`, `y`). Dots outside the surface are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32) {
        if let Some((idx, bit)) = self.locate(x, y) {
            self.cells[idx] |= bit;
        }
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .map(|(idx, bit)| self.cells[idx] & bit != 0)
            .unwrap_or(false)
    }

    /// Total number of lit dots.
    pub fn dot_count(&self) -> usize {
        self.cells.iter().map(|m| m.count_ones() as usize).sum()
    }

    /// Number of cells with at least one lit dot.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&m| m != 0).count()
    }
}
