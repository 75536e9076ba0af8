//! Data racks — the primary placeable equipment.
//!
//! A rack occupies one or more floor tiles and carries a unit count from
//! which its physical height and nominal weight are derived. The rack knows
//! nothing about occupancy; the room enforces that when the rack is placed.

use serde::{Deserialize, Serialize};

use crate::constants::rack_units;
use crate::footprint::{Footprint, FootprintError};

/// A rack of IT equipment on the floor grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRack {
    rack_id: String,
    position_x: i32,
    position_y: i32,
    rack_units: u32,
    width_tiles: u32,
    depth_tiles: u32,
}

impl DataRack {
    /// Single-tile rack at the given anchor tile.
    pub fn new(
        rack_id: impl Into<String>,
        position_x: i32,
        position_y: i32,
        rack_units: u32,
    ) -> Self {
        Self {
            rack_id: rack_id.into(),
            position_x,
            position_y,
            rack_units,
            width_tiles: 1,
            depth_tiles: 1,
        }
    }

    /// Multi-tile rack. Rejects zero-tile footprints at construction so a
    /// degenerate rack can never reach the placement engine.
    pub fn with_footprint(
        rack_id: impl Into<String>,
        position_x: i32,
        position_y: i32,
        rack_units: u32,
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
            rack_id: rack_id.into(),
            position_x,
            position_y,
            rack_units,
            width_tiles,
            depth_tiles,
        })
    }

    pub fn rack_id(&self) -> &str {
        &self.rack_id
    }

    /// Anchor tile `(x, y)`.
    pub fn position(&self) -> (i32, i32) {
        (self.position_x, self.position_y)
    }

    pub fn rack_units(&self) -> u32 {
        self.rack_units
    }

    pub fn width_tiles(&self) -> u32 {
        self.width_tiles
    }

    pub fn depth_tiles(&self) -> u32 {
        self.depth_tiles
    }

    /// Rack height in meters, derived from the unit count.
    pub fn height_meters(&self) -> f32 {
        self.rack_units as f32 * rack_units::HEIGHT_METERS
    }

    /// Rack height in inches, derived from the unit count.
    pub fn height_inches(&self) -> f32 {
        self.rack_units as f32 * rack_units::HEIGHT_INCHES
    }

    /// Nominal loaded weight in kilograms, derived from the unit count.
    pub fn weight_kg_estimated(&self) -> f32 {
        self.rack_units as f32 * rack_units::WEIGHT_KG
    }

    /// Update the unit count. The derived height and weight accessors track
    /// the new value; the footprint is unaffected.
    pub fn set_rack_units(&mut self, rack_units: u32) {
        self.rack_units = rack_units;
    }

    /// Move the anchor tile. Only meaningful before placement — a placed
    /// rack is repositioned through its room, never directly.
    pub fn set_position(&mut self, position_x: i32, position_y: i32) {
        self.position_x = position_x;
        self.position_y = position_y;
    }

    /// The tiles this rack covers. Pure derivation from anchor + extents.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            position_x: self.position_x,
            position_y: self.position_y,
            width_tiles: self.width_tiles,
            depth_tiles: self.depth_tiles,
        }
    }

    /// Display summary with the derived physical attributes spelled out.
    pub fn info(&self) -> RackInfo {
        RackInfo {
            rack_id: self.rack_id.clone(),
            position_x: self.position_x,
            position_y: self.position_y,
            rack_units: self.rack_units,
            width_tiles: self.width_tiles,
            depth_tiles: self.depth_tiles,
            rack_height_meters: self.height_meters(),
            rack_height_inches: self.height_inches(),
            rack_weight_kg_estimated: self.weight_kg_estimated(),
        }
    }
}

/// Flat summary of a rack for display and reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackInfo {
    pub rack_id: String,
    pub position_x: i32,
    pub position_y: i32,
    pub rack_units: u32,
    pub width_tiles: u32,
    pub depth_tiles: u32,
    pub rack_height_meters: f32,
    pub rack_height_inches: f32,
    pub rack_weight_kg_estimated: f32,
}
