//! Fixed obstructions on the floor grid.
//!
//! Obstacles model non-movable structures — ventilation ducts, support
//! columns, cable trenches — that block tiles without being equipment.
//! They share the rack's footprint contract and nothing else.

use serde::{Deserialize, Serialize};

use crate::footprint::{Footprint, FootprintError};

/// A physical barrier occupying one or more floor tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    obstacle_id: String,
    position_x: i32,
    position_y: i32,
    width_tiles: u32,
    depth_tiles: u32,
    /// Height in meters. Stored for reporting; not collision-checked.
    height: f32,
}

impl Obstacle {
    /// Single-tile obstacle at the given anchor tile.
    pub fn new(
        obstacle_id: impl Into<String>,
        position_x: i32,
        position_y: i32,
        height: f32,
    ) -> Self {
        Self {
            obstacle_id: obstacle_id.into(),
            position_x,
            position_y,
            width_tiles: 1,
            depth_tiles: 1,
            height,
        }
    }

    /// Multi-tile obstacle. Rejects zero-tile footprints at construction.
    pub fn with_footprint(
        obstacle_id: impl Into<String>,
        position_x: i32,
        position_y: i32,
        width_tiles: u32,
        depth_tiles: u32,
        height: f32,
    ) -> Result<Self, FootprintError> {
        if width_tiles == 0 || depth_tiles == 0 {
            return Err(FootprintError::EmptyFootprint {
                width_tiles,
                depth_tiles,
            });
        }
        Ok(Self {
            obstacle_id: obstacle_id.into(),
            position_x,
            position_y,
            width_tiles,
            depth_tiles,
            height,
        })
    }

    pub fn obstacle_id(&self) -> &str {
        &self.obstacle_id
    }

    /// Anchor tile `(x, y)`.
    pub fn position(&self) -> (i32, i32) {
        (self.position_x, self.position_y)
    }

    /// `(width_tiles, depth_tiles, height)`.
    pub fn dimensions(&self) -> (u32, u32, f32) {
        (self.width_tiles, self.depth_tiles, self.height)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Move the anchor tile. Only meaningful before placement.
    pub fn set_position(&mut self, position_x: i32, position_y: i32) {
        self.position_x = position_x;
        self.position_y = position_y;
    }

    /// The tiles this obstacle covers.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            position_x: self.position_x,
            position_y: self.position_y,
            width_tiles: self.width_tiles,
            depth_tiles: self.depth_tiles,
        }
    }
}
