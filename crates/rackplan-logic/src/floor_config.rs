//! Operator-facing floor configuration.
//!
//! Before a layout session starts, the operator describes the floor: grid
//! dimensions, ceiling height, tile size. This module provides the data
//! model and validation for that setup screen, independent of any UI
//! framework.
//!
//! ```
//! use rackplan_logic::floor_config::{validate_config, FloorConfig};
//!
//! let mut config = FloorConfig::default();
//! config.num_tiles_x = 40;
//! let errors = validate_config(&config);
//! assert!(errors.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::tiles::DEFAULT_TILE_SIZE_M;
use crate::room::Room;

/// Largest grid the full-scan query model is sized for.
pub const MAX_GRID_TILES: u64 = 250_000;

/// Operator-editable floor description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Room identifier shown in snapshots and reports.
    pub room_id: String,
    /// Grid tile count along x.
    pub num_tiles_x: u32,
    /// Grid tile count along y.
    pub num_tiles_y: u32,
    /// Ceiling height in meters.
    pub height: f32,
    /// Tile edge length in meters.
    pub tile_size_xy: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            room_id: "DC-MAIN".to_string(),
            num_tiles_x: 25,
            num_tiles_y: 20,
            height: 3.0,
            tile_size_xy: DEFAULT_TILE_SIZE_M,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid has zero tiles along at least one axis.
    EmptyGrid { num_tiles_x: u32, num_tiles_y: u32 },
    /// Total tile count exceeds [`MAX_GRID_TILES`].
    GridTooLarge(u64),
    /// Ceiling height must be positive.
    NonPositiveHeight(f32),
    /// Tile edge length must be positive.
    NonPositiveTileSize(f32),
    /// Room id empty or whitespace.
    EmptyRoomId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid {
                num_tiles_x,
                num_tiles_y,
            } => write!(f, "grid has zero tiles: {}×{}", num_tiles_x, num_tiles_y),
            ConfigError::GridTooLarge(tiles) => {
                write!(f, "grid of {} tiles exceeds the {} cap", tiles, MAX_GRID_TILES)
            }
            ConfigError::NonPositiveHeight(h) => write!(f, "non-positive ceiling height: {}", h),
            ConfigError::NonPositiveTileSize(t) => write!(f, "non-positive tile size: {}", t),
            ConfigError::EmptyRoomId => write!(f, "room id is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a floor configuration, returning all errors found.
pub fn validate_config(config: &FloorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.num_tiles_x == 0 || config.num_tiles_y == 0 {
        errors.push(ConfigError::EmptyGrid {
            num_tiles_x: config.num_tiles_x,
            num_tiles_y: config.num_tiles_y,
        });
    }
    let total = config.num_tiles_x as u64 * config.num_tiles_y as u64;
    if total > MAX_GRID_TILES {
        errors.push(ConfigError::GridTooLarge(total));
    }
    if config.height <= 0.0 {
        errors.push(ConfigError::NonPositiveHeight(config.height));
    }
    if config.tile_size_xy <= 0.0 {
        errors.push(ConfigError::NonPositiveTileSize(config.tile_size_xy));
    }
    if config.room_id.trim().is_empty() {
        errors.push(ConfigError::EmptyRoomId);
    }

    errors
}

/// Derived floor parameters for the setup screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSummary {
    /// Physical extent along x in meters.
    pub length_m: f32,
    /// Physical extent along y in meters.
    pub width_m: f32,
    pub area_m2: f32,
    pub volume_m3: f32,
    pub total_tiles: u32,
    /// Rough capacity for 2×2 racks laid out in rows: rows on a 5-tile
    /// pitch (2 deep + 3 aisle), racks on a 3-tile stride within a row.
    pub estimated_rack_capacity: u32,
}

/// Derive the summary shown before the room is built.
pub fn estimate_summary(config: &FloorConfig) -> FloorSummary {
    let length_m = config.num_tiles_x as f32 * config.tile_size_xy;
    let width_m = config.num_tiles_y as f32 * config.tile_size_xy;
    let area_m2 = length_m * width_m;

    let racks_per_row = if config.num_tiles_x >= 2 {
        (config.num_tiles_x - 2) / 3 + 1
    } else {
        0
    };
    let rows = if config.num_tiles_y >= 4 {
        (config.num_tiles_y - 4) / 5 + 1
    } else {
        0
    };

    FloorSummary {
        length_m,
        width_m,
        area_m2,
        volume_m3: area_m2 * config.height,
        total_tiles: config.num_tiles_x * config.num_tiles_y,
        estimated_rack_capacity: racks_per_row * rows,
    }
}

/// Validate and construct the room described by `config`.
pub fn build_room(config: &FloorConfig) -> Result<Room, Vec<ConfigError>> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Room::with_tile_size(
        config.room_id.clone(),
        config.num_tiles_x,
        config.num_tiles_y,
        config.height,
        config.tile_size_xy,
    ))
}
