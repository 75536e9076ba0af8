//! Rectangular tile footprints.
//!
//! A footprint is the set of grid tiles an entity covers: an axis-aligned
//! `width_tiles × depth_tiles` rectangle anchored at an origin tile. Racks
//! and obstacles derive their footprints the same way, and the room's
//! placement engine only ever sees footprints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised when a footprint would cover zero tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintError {
    EmptyFootprint { width_tiles: u32, depth_tiles: u32 },
}

impl fmt::Display for FootprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootprintError::EmptyFootprint {
                width_tiles,
                depth_tiles,
            } => write!(
                f,
                "footprint covers zero tiles: {}×{}",
                width_tiles, depth_tiles
            ),
        }
    }
}

impl std::error::Error for FootprintError {}

/// An axis-aligned rectangle of grid tiles.
///
/// Extents are at least 1 in each direction; use [`Footprint::new`] to get
/// that checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Anchor tile x coordinate.
    pub position_x: i32,
    /// Anchor tile y coordinate.
    pub position_y: i32,
    /// Tiles covered in the x direction.
    pub width_tiles: u32,
    /// Tiles covered in the y direction.
    pub depth_tiles: u32,
}

impl Footprint {
    pub fn new(
        position_x: i32,
        position_y: i32,
        width_tiles: u32,
        depth_tiles: u32,
    ) -> Result<Self, FootprintError> {
        if width_tiles == 0 || depth_tiles == 0 {
            return Err(FootprintError::EmptyFootprint {
                width_tiles,
                depth_tiles,
            });
        }
        Ok(Self {
            position_x,
            position_y,
            width_tiles,
            depth_tiles,
        })
    }

    /// Single-tile footprint at the given tile.
    pub fn single(position_x: i32, position_y: i32) -> Self {
        Self {
            position_x,
            position_y,
            width_tiles: 1,
            depth_tiles: 1,
        }
    }

    /// Every member tile, x-major: `(x, y)`, `(x, y+1)`, … — the same order
    /// the room uses for its occupancy scans.
    pub fn tiles(&self) -> Vec<(i32, i32)> {
        let mut tiles = Vec::with_capacity(self.tile_count() as usize);
        for dx in 0..self.width_tiles as i32 {
            for dy in 0..self.depth_tiles as i32 {
                tiles.push((self.position_x + dx, self.position_y + dy));
            }
        }
        tiles
    }

    /// Number of tiles covered.
    pub fn tile_count(&self) -> u32 {
        self.width_tiles * self.depth_tiles
    }

    /// Whether `(x, y)` is one of the member tiles.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.position_x
            && x < self.position_x + self.width_tiles as i32
            && y >= self.position_y
            && y < self.position_y + self.depth_tiles as i32
    }

    /// AABB overlap test. Footprints that merely touch edges do not overlap.
    pub fn intersects(&self, other: &Footprint) -> bool {
        let a_right = self.position_x + self.width_tiles as i32;
        let a_back = self.position_y + self.depth_tiles as i32;
        let b_right = other.position_x + other.width_tiles as i32;
        let b_back = other.position_y + other.depth_tiles as i32;
        self.position_x < b_right
            && other.position_x < a_right
            && self.position_y < b_back
            && other.position_y < a_back
    }
}
