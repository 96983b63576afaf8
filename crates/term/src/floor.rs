//! Perspective checkerboard floor, computed once per run.
//!
//! Each row below the horizon is treated as a slice of the ground plane at
//! depth `1 / t`, where `t` grows from 0 at the horizon toward 1 at the
//! bottom edge. Columns are spread across that slice in world units, and the cell
//! takes the color of the tile it lands on. Tiles therefore shrink toward
//! the horizon without any real 3D projection.

use crate::types::{Geometry, SetupError};

/// Horizontal tile frequency in world units per unit of depth.
const TILE_X: f32 = 8.0;
/// Tile frequency along depth.
const TILE_Z: f32 = 4.0;

/// Classification of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    Sky,
    Dark,
    Light,
}

/// Static per-cell floor classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorField {
    cols: u16,
    rows: u16,
    horizon: u16,
    tiles: Vec<Tile>,
}

impl FloorField {
    /// Compute the checkerboard for `geometry`.
    pub fn compute(geometry: Geometry) -> Result<Self, SetupError> {
        let mut field = Self::sky(geometry)?;
        let cols = geometry.cols() as usize;
        let rows = geometry.rows();
        let horizon = field.horizon;

        let floor_h = (rows - horizon) as f32;
        for row in (horizon + 1)..rows {
            let t = (row - horizon) as f32 / floor_h;
            let z = 1.0 / t;
            let iz = (z * TILE_Z).floor() as i32;
            let line = &mut field.tiles[row as usize * cols..(row as usize + 1) * cols];
            for (col, tile) in line.iter_mut().enumerate() {
                let x = (col as f32 / cols as f32 - 0.5) * z * TILE_X;
                let ix = x.floor() as i32;
                *tile = if (ix + iz) & 1 == 1 {
                    Tile::Dark
                } else {
                    Tile::Light
                };
            }
        }
        Ok(field)
    }

    /// A field with no floor at all.
    pub fn sky(geometry: Geometry) -> Result<Self, SetupError> {
        let len = geometry.cell_count();
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(len)
            .map_err(|_| SetupError::OutOfMemory {
                what: "floor field",
                bytes: len * std::mem::size_of::<Tile>(),
            })?;
        tiles.resize(len, Tile::Sky);
        Ok(Self {
            cols: geometry.cols(),
            rows: geometry.rows(),
            horizon: geometry.horizon_row(),
            tiles,
        })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn horizon(&self) -> u16 {
        self.horizon
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Tile> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.tiles[(row as usize) * (self.cols as usize) + (col as usize)])
    }

    /// Tiles of one row, or an empty slice past the bottom.
    pub fn row(&self, row: u16) -> &[Tile] {
        if row >= self.rows {
            return &[];
        }
        let cols = self.cols as usize;
        let start = row as usize * cols;
        &self.tiles[start..start + cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(cols: u16, rows: u16) -> FloorField {
        FloorField::compute(Geometry::new(cols, rows).unwrap()).unwrap()
    }

    #[test]
    fn horizon_and_above_is_sky() {
        let f = field(80, 24);
        assert_eq!(f.horizon(), 13);
        for row in 0..=13 {
            assert!(f.row(row).iter().all(|&t| t == Tile::Sky), "row {row}");
        }
        for row in 14..24 {
            assert!(f.row(row).iter().all(|&t| t != Tile::Sky), "row {row}");
        }
    }

    #[test]
    fn floor_rows_use_both_tile_colors() {
        let f = field(80, 24);
        for row in 14..24 {
            let line = f.row(row);
            assert!(line.contains(&Tile::Dark) && line.contains(&Tile::Light));
        }
    }

    #[test]
    fn bottom_row_matches_closed_form() {
        let f = field(80, 24);
        let t = 10.0f32 / 11.0;
        let z = 1.0 / t;
        let iz = (z * 4.0).floor() as i32;
        for col in 0..80u16 {
            let ix = ((col as f32 / 80.0 - 0.5) * z * 8.0).floor() as i32;
            let expected = if (ix + iz) & 1 == 1 {
                Tile::Dark
            } else {
                Tile::Light
            };
            assert_eq!(f.get(col, 23), Some(expected), "col {col}");
        }
    }

    #[test]
    fn sky_field_has_no_floor() {
        let f = FloorField::sky(Geometry::new(20, 10).unwrap()).unwrap();
        assert!(f.tiles().iter().all(|&t| t == Tile::Sky));
        assert_eq!(f.get(20, 0), None);
        assert!(f.row(10).is_empty());
    }
}
