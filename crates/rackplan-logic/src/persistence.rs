//! Save/Load for layout state.
//!
//! Snapshots carry entity attributes only — the occupancy grid is derived
//! state and is rebuilt by re-placing every entity on load. That makes a
//! load re-validate the no-overlap invariant, so a tampered or corrupted
//! file can never produce an inconsistent room.
//!
//! Two encodings over the same snapshot type: JSON for interchange with
//! other tools, bincode for compact binary saves.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::ladder::Ladder;
use crate::obstacle::Obstacle;
use crate::rack::DataRack;
use crate::room::{PlacementError, Room};

/// Version number for the snapshot format (increment when it changes).
const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a room and its ladders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Snapshot format version.
    pub version: u32,
    pub room: FloorInfo,
    /// Placed racks in placement order.
    pub racks: Vec<DataRack>,
    /// Placed obstacles in placement order.
    pub obstacles: Vec<Obstacle>,
    pub ladders: Vec<Ladder>,
}

/// Room attributes without the derived occupancy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorInfo {
    pub room_id: String,
    pub num_tiles_x: u32,
    pub num_tiles_y: u32,
    pub height: f32,
    pub tile_size_xy: f32,
}

/// Capture the current layout state.
pub fn snapshot(room: &Room, ladders: &[Ladder]) -> LayoutSnapshot {
    LayoutSnapshot {
        version: SNAPSHOT_VERSION,
        room: FloorInfo {
            room_id: room.room_id().to_string(),
            num_tiles_x: room.num_tiles_x(),
            num_tiles_y: room.num_tiles_y(),
            height: room.height(),
            tile_size_xy: room.tile_size_xy(),
        },
        racks: room.racks().to_vec(),
        obstacles: room.obstacles().to_vec(),
        ladders: ladders.to_vec(),
    }
}

/// Rebuild a room and its ladders from a snapshot.
///
/// Every rack and obstacle is re-placed through the placement engine; a
/// snapshot whose entities collide or fall outside the grid is rejected
/// with the offending id.
pub fn restore(snapshot: &LayoutSnapshot) -> Result<(Room, Vec<Ladder>), SnapshotError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    let mut room = Room::with_tile_size(
        snapshot.room.room_id.clone(),
        snapshot.room.num_tiles_x,
        snapshot.room.num_tiles_y,
        snapshot.room.height,
        snapshot.room.tile_size_xy,
    );
    for rack in &snapshot.racks {
        room.add_rack(rack.clone())
            .map_err(|reason| SnapshotError::InvalidLayout {
                id: rack.rack_id().to_string(),
                reason,
            })?;
    }
    for obstacle in &snapshot.obstacles {
        room.add_obstacle(obstacle.clone())
            .map_err(|reason| SnapshotError::InvalidLayout {
                id: obstacle.obstacle_id().to_string(),
                reason,
            })?;
    }

    Ok((room, snapshot.ladders.clone()))
}

/// Encode the layout as pretty-printed JSON.
pub fn to_json(room: &Room, ladders: &[Ladder]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&snapshot(room, ladders))?)
}

/// Decode and rebuild a layout from JSON.
pub fn from_json(json: &str) -> Result<(Room, Vec<Ladder>), SnapshotError> {
    let snapshot: LayoutSnapshot = serde_json::from_str(json)?;
    restore(&snapshot)
}

/// Write the layout to a binary stream.
pub fn save_layout<W: Write>(
    writer: W,
    room: &Room,
    ladders: &[Ladder],
) -> Result<(), SnapshotError> {
    bincode::serialize_into(writer, &snapshot(room, ladders))?;
    Ok(())
}

/// Read and rebuild a layout from a binary stream.
pub fn load_layout<R: Read>(reader: R) -> Result<(Room, Vec<Ladder>), SnapshotError> {
    let snapshot: LayoutSnapshot = bincode::deserialize_from(reader)?;
    restore(&snapshot)
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch {
        expected: u32,
        found: u32,
    },
    /// An entity in the snapshot could not be re-placed.
    InvalidLayout {
        id: String,
        reason: PlacementError,
    },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Json(e) => write!(f, "JSON error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SnapshotError::InvalidLayout { id, reason } => {
                write!(f, "cannot re-place {}: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
