//! The room floor — occupancy grid, placement engine, entity collections.
//!
//! `Room` is the single consistency unit for the no-overlap invariant: the
//! occupancy grid and the rack/obstacle collections are only ever mutated
//! together, through the placement operations here. The grid is the sole
//! source of truth for "is this tile occupied", which keeps collision
//! checks O(footprint size) instead of O(entities × footprint size).
//!
//! Placed entities are handed out read-only. Repositioning goes through
//! [`Room::move_rack`] / [`Room::move_obstacle`], and unit-count edits
//! through [`Room::set_rack_units`], so the grid can never silently drift
//! from the collections.

use std::fmt;

use crate::constants::tiles::DEFAULT_TILE_SIZE_M;
use crate::footprint::Footprint;
use crate::obstacle::Obstacle;
use crate::rack::DataRack;

/// Why a placement-engine operation did not go through.
///
/// All three are expected outcomes of normal interactive use, reported as
/// values — never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// A footprint tile lies outside the room grid.
    OutOfBounds,
    /// A footprint tile is already occupied.
    Collision,
    /// The removal or move target is not placed in this room.
    NotFound,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "footprint extends outside the room grid"),
            PlacementError::Collision => write!(f, "footprint overlaps an occupied tile"),
            PlacementError::NotFound => write!(f, "entity is not placed in this room"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// A data-center room: tile grid, placed racks, placed obstacles.
#[derive(Debug, Clone)]
pub struct Room {
    room_id: String,
    num_tiles_x: u32,
    num_tiles_y: u32,
    /// Ceiling height in meters.
    height: f32,
    /// Tile edge length in meters. Per-room, never a process-wide default.
    tile_size_xy: f32,
    /// Occupancy flags, x-major: index = x * num_tiles_y + y.
    tile_grid: Vec<bool>,
    data_racks: Vec<DataRack>,
    obstacles: Vec<Obstacle>,
}

impl Room {
    /// Room with the default 0.6 m raised-floor tile.
    pub fn new(room_id: impl Into<String>, num_tiles_x: u32, num_tiles_y: u32, height: f32) -> Self {
        Self::with_tile_size(room_id, num_tiles_x, num_tiles_y, height, DEFAULT_TILE_SIZE_M)
    }

    pub fn with_tile_size(
        room_id: impl Into<String>,
        num_tiles_x: u32,
        num_tiles_y: u32,
        height: f32,
        tile_size_xy: f32,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            num_tiles_x,
            num_tiles_y,
            height,
            tile_size_xy,
            tile_grid: vec![false; num_tiles_x as usize * num_tiles_y as usize],
            data_racks: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    // ── Attributes and derived dimensions ───────────────────────────────

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn num_tiles_x(&self) -> u32 {
        self.num_tiles_x
    }

    pub fn num_tiles_y(&self) -> u32 {
        self.num_tiles_y
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tile_size_xy(&self) -> f32 {
        self.tile_size_xy
    }

    /// Physical extent along x in meters.
    pub fn length(&self) -> f32 {
        self.num_tiles_x as f32 * self.tile_size_xy
    }

    /// Physical extent along y in meters.
    pub fn width(&self) -> f32 {
        self.num_tiles_y as f32 * self.tile_size_xy
    }

    /// Floor area in square meters.
    pub fn area(&self) -> f32 {
        self.length() * self.width()
    }

    /// Room volume in cubic meters.
    pub fn volume(&self) -> f32 {
        self.area() * self.height
    }

    // ── Occupancy queries ───────────────────────────────────────────────

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.num_tiles_x && (y as u32) < self.num_tiles_y
    }

    fn grid_index(&self, x: i32, y: i32) -> usize {
        x as usize * self.num_tiles_y as usize + y as usize
    }

    /// Whether the tile at `(x, y)` is occupied.
    ///
    /// Out-of-range coordinates are an error rather than a defensive
    /// `false`: a caller asking about a tile the room does not have is
    /// almost always a bug worth surfacing.
    pub fn is_tile_occupied(&self, x: i32, y: i32) -> Result<bool, PlacementError> {
        if !self.in_bounds(x, y) {
            return Err(PlacementError::OutOfBounds);
        }
        Ok(self.tile_grid[self.grid_index(x, y)])
    }

    /// Every occupied tile, scanned x-major. Deterministic snapshot order.
    pub fn occupied_tiles(&self) -> Vec<(i32, i32)> {
        self.scan(true)
    }

    /// Every unoccupied tile, scanned x-major.
    pub fn unoccupied_tiles(&self) -> Vec<(i32, i32)> {
        self.scan(false)
    }

    fn scan(&self, occupied: bool) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for x in 0..self.num_tiles_x as i32 {
            for y in 0..self.num_tiles_y as i32 {
                if self.tile_grid[self.grid_index(x, y)] == occupied {
                    out.push((x, y));
                }
            }
        }
        out
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Bounds-then-collision check shared by every placement path.
    ///
    /// Never mutates. `can_place` and the committing operations stay in
    /// lockstep because they all go through here: a footprint that
    /// previews as placeable commits, and vice versa.
    pub fn check_footprint(&self, footprint: &Footprint) -> Result<(), PlacementError> {
        let tiles = footprint.tiles();
        if tiles.iter().any(|&(x, y)| !self.in_bounds(x, y)) {
            return Err(PlacementError::OutOfBounds);
        }
        if tiles
            .iter()
            .any(|&(x, y)| self.tile_grid[self.grid_index(x, y)])
        {
            return Err(PlacementError::Collision);
        }
        Ok(())
    }

    /// Non-mutating feasibility probe for placement previews.
    pub fn can_place(
        &self,
        position_x: i32,
        position_y: i32,
        width_tiles: u32,
        depth_tiles: u32,
    ) -> bool {
        match Footprint::new(position_x, position_y, width_tiles, depth_tiles) {
            Ok(footprint) => self.check_footprint(&footprint).is_ok(),
            Err(_) => false,
        }
    }

    /// Write `occupied` into every in-range footprint tile.
    ///
    /// Out-of-range tiles are skipped: clearing must never index outside
    /// the grid even if an entity's footprint no longer matches what was
    /// placed.
    fn mark(&mut self, footprint: &Footprint, occupied: bool) {
        for (x, y) in footprint.tiles() {
            if self.in_bounds(x, y) {
                let idx = self.grid_index(x, y);
                self.tile_grid[idx] = occupied;
            }
        }
    }

    /// Place a rack, marking every footprint tile occupied.
    ///
    /// Validation order: bounds, then collision, short-circuiting. On
    /// rejection the grid and collections are untouched.
    pub fn add_rack(&mut self, rack: DataRack) -> Result<(), PlacementError> {
        let footprint = rack.footprint();
        self.check_footprint(&footprint)?;
        self.mark(&footprint, true);
        self.data_racks.push(rack);
        Ok(())
    }

    /// Place an obstacle under the same contract as [`Room::add_rack`].
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Result<(), PlacementError> {
        let footprint = obstacle.footprint();
        self.check_footprint(&footprint)?;
        self.mark(&footprint, true);
        self.obstacles.push(obstacle);
        Ok(())
    }

    /// Remove a rack by id, clearing its footprint tiles.
    ///
    /// Returns the rack, or `None` when no rack with that id is placed
    /// (grid and collections untouched).
    pub fn remove_rack(&mut self, rack_id: &str) -> Option<DataRack> {
        let idx = self
            .data_racks
            .iter()
            .position(|r| r.rack_id() == rack_id)?;
        let rack = self.data_racks.remove(idx);
        self.mark(&rack.footprint(), false);
        Some(rack)
    }

    /// Remove an obstacle by id, clearing its footprint tiles.
    pub fn remove_obstacle(&mut self, obstacle_id: &str) -> Option<Obstacle> {
        let idx = self
            .obstacles
            .iter()
            .position(|o| o.obstacle_id() == obstacle_id)?;
        let obstacle = self.obstacles.remove(idx);
        self.mark(&obstacle.footprint(), false);
        Some(obstacle)
    }

    /// Atomically reposition a placed rack.
    ///
    /// Remove + place with rollback: if the new footprint is rejected the
    /// rack keeps its original placement and the error says why.
    pub fn move_rack(
        &mut self,
        rack_id: &str,
        new_x: i32,
        new_y: i32,
    ) -> Result<(), PlacementError> {
        let idx = self
            .data_racks
            .iter()
            .position(|r| r.rack_id() == rack_id)
            .ok_or(PlacementError::NotFound)?;
        let old = self.data_racks[idx].footprint();
        let mut candidate = old;
        candidate.position_x = new_x;
        candidate.position_y = new_y;

        // Clear the old tiles first so the rack cannot collide with itself.
        self.mark(&old, false);
        match self.check_footprint(&candidate) {
            Ok(()) => {
                self.mark(&candidate, true);
                self.data_racks[idx].set_position(new_x, new_y);
                Ok(())
            }
            Err(e) => {
                self.mark(&old, true);
                Err(e)
            }
        }
    }

    /// Atomically reposition a placed obstacle. Same contract as
    /// [`Room::move_rack`].
    pub fn move_obstacle(
        &mut self,
        obstacle_id: &str,
        new_x: i32,
        new_y: i32,
    ) -> Result<(), PlacementError> {
        let idx = self
            .obstacles
            .iter()
            .position(|o| o.obstacle_id() == obstacle_id)
            .ok_or(PlacementError::NotFound)?;
        let old = self.obstacles[idx].footprint();
        let mut candidate = old;
        candidate.position_x = new_x;
        candidate.position_y = new_y;

        self.mark(&old, false);
        match self.check_footprint(&candidate) {
            Ok(()) => {
                self.mark(&candidate, true);
                self.obstacles[idx].set_position(new_x, new_y);
                Ok(())
            }
            Err(e) => {
                self.mark(&old, true);
                Err(e)
            }
        }
    }

    /// Update a placed rack's unit count. Footprint-neutral, so no grid
    /// re-validation is needed. Returns `false` when the rack is absent.
    pub fn set_rack_units(&mut self, rack_id: &str, rack_units: u32) -> bool {
        match self
            .data_racks
            .iter_mut()
            .find(|r| r.rack_id() == rack_id)
        {
            Some(rack) => {
                rack.set_rack_units(rack_units);
                true
            }
            None => false,
        }
    }

    // ── Read access to placed entities ──────────────────────────────────

    /// Placed racks in placement order.
    pub fn racks(&self) -> &[DataRack] {
        &self.data_racks
    }

    /// Placed obstacles in placement order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn rack(&self, rack_id: &str) -> Option<&DataRack> {
        self.data_racks.iter().find(|r| r.rack_id() == rack_id)
    }

    pub fn obstacle(&self, obstacle_id: &str) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.obstacle_id() == obstacle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rack_2x2(id: &str, x: i32, y: i32) -> DataRack {
        DataRack::with_footprint(id, x, y, 42, 2, 2).unwrap()
    }

    #[test]
    fn new_room_is_empty() {
        let room = Room::new("DC-01", 10, 8, 3.0);
        assert_eq!(room.num_tiles_x(), 10);
        assert_eq!(room.num_tiles_y(), 8);
        assert_eq!(room.tile_size_xy(), 0.6);
        assert!(room.racks().is_empty());
        assert!(room.obstacles().is_empty());
        assert!(room.occupied_tiles().is_empty());
        assert_eq!(room.unoccupied_tiles().len(), 80);
    }

    #[test]
    fn derived_dimensions() {
        let room = Room::new("DC-02", 10, 8, 3.0);
        assert!((room.length() - 6.0).abs() < 1e-5);
        assert!((room.width() - 4.8).abs() < 1e-5);
        assert!((room.area() - 28.8).abs() < 1e-4);
        assert!((room.volume() - 86.4).abs() < 1e-4);
    }

    #[test]
    fn place_2x2_rack_marks_exact_tiles() {
        let mut room = Room::new("DC-03", 10, 10, 3.0);
        assert_eq!(room.add_rack(rack_2x2("RACK-01", 2, 2)), Ok(()));

        let occupied = room.occupied_tiles();
        assert_eq!(occupied, vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(room.is_tile_occupied(2, 2), Ok(true));
        assert_eq!(room.is_tile_occupied(4, 4), Ok(false));
    }

    #[test]
    fn overlapping_rack_rejected_with_collision() {
        let mut room = Room::new("DC-04", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 2, 2)).unwrap();

        let before = room.occupied_tiles();
        let result = room.add_rack(rack_2x2("RACK-02", 3, 3));

        assert_eq!(result, Err(PlacementError::Collision));
        assert_eq!(room.racks().len(), 1);
        assert_eq!(room.occupied_tiles(), before);
    }

    #[test]
    fn out_of_bounds_rack_rejected() {
        let mut room = Room::new("DC-05", 5, 5, 3.0);
        let result = room.add_rack(rack_2x2("RACK-01", 4, 4));

        assert_eq!(result, Err(PlacementError::OutOfBounds));
        assert!(room.racks().is_empty());
        assert!(room.occupied_tiles().is_empty());
    }

    #[test]
    fn negative_origin_is_out_of_bounds() {
        let mut room = Room::new("DC-06", 5, 5, 3.0);
        let result = room.add_rack(DataRack::new("RACK-01", -1, 0, 42));
        assert_eq!(result, Err(PlacementError::OutOfBounds));
    }

    #[test]
    fn bounds_checked_before_collision() {
        let mut room = Room::new("DC-07", 5, 5, 3.0);
        room.add_rack(rack_2x2("RACK-01", 3, 3)).unwrap();
        // Footprint both collides at (4,4) and leaves the grid at (5,*).
        let result = room.add_rack(rack_2x2("RACK-02", 4, 4));
        assert_eq!(result, Err(PlacementError::OutOfBounds));
    }

    #[test]
    fn remove_restores_previous_occupancy() {
        let mut room = Room::new("DC-08", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 0, 0)).unwrap();
        let before = room.occupied_tiles();

        room.add_rack(rack_2x2("RACK-02", 5, 5)).unwrap();
        let removed = room.remove_rack("RACK-02").unwrap();

        assert_eq!(removed.rack_id(), "RACK-02");
        assert_eq!(room.occupied_tiles(), before);
        assert_eq!(room.racks().len(), 1);
    }

    #[test]
    fn remove_missing_rack_is_noop() {
        let mut room = Room::new("DC-09", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 0, 0)).unwrap();
        let before = room.occupied_tiles();

        assert!(room.remove_rack("RACK-99").is_none());
        assert_eq!(room.occupied_tiles(), before);
        assert_eq!(room.racks().len(), 1);
    }

    #[test]
    fn obstacles_share_the_grid_with_racks() {
        let mut room = Room::new("DC-10", 10, 10, 3.0);
        room.add_obstacle(Obstacle::new("OBS-01", 4, 4, 2.0)).unwrap();

        let result = room.add_rack(rack_2x2("RACK-01", 3, 3));
        assert_eq!(result, Err(PlacementError::Collision));

        room.remove_obstacle("OBS-01").unwrap();
        assert_eq!(room.add_rack(rack_2x2("RACK-01", 3, 3)), Ok(()));
    }

    #[test]
    fn can_place_agrees_with_add() {
        let mut room = Room::new("DC-11", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 2, 2)).unwrap();

        assert!(room.can_place(5, 5, 2, 2));
        assert!(!room.can_place(3, 3, 2, 2)); // collision
        assert!(!room.can_place(9, 9, 2, 2)); // out of bounds
        assert!(!room.can_place(0, 0, 0, 2)); // degenerate

        assert_eq!(room.add_rack(rack_2x2("RACK-02", 5, 5)), Ok(()));
    }

    #[test]
    fn is_tile_occupied_fails_loud_out_of_range() {
        let room = Room::new("DC-12", 5, 5, 3.0);
        assert_eq!(room.is_tile_occupied(5, 0), Err(PlacementError::OutOfBounds));
        assert_eq!(room.is_tile_occupied(0, -1), Err(PlacementError::OutOfBounds));
        assert_eq!(room.is_tile_occupied(4, 4), Ok(false));
    }

    #[test]
    fn move_rack_relocates_footprint() {
        let mut room = Room::new("DC-13", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 2, 2)).unwrap();

        assert_eq!(room.move_rack("RACK-01", 6, 6), Ok(()));
        assert_eq!(room.occupied_tiles(), vec![(6, 6), (6, 7), (7, 6), (7, 7)]);
        assert_eq!(room.rack("RACK-01").unwrap().position(), (6, 6));
    }

    #[test]
    fn move_rack_rolls_back_on_rejection() {
        let mut room = Room::new("DC-14", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 2, 2)).unwrap();
        room.add_rack(rack_2x2("RACK-02", 6, 6)).unwrap();
        let before = room.occupied_tiles();

        assert_eq!(
            room.move_rack("RACK-01", 5, 5),
            Err(PlacementError::Collision)
        );
        assert_eq!(
            room.move_rack("RACK-01", 9, 9),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(room.occupied_tiles(), before);
        assert_eq!(room.rack("RACK-01").unwrap().position(), (2, 2));
    }

    #[test]
    fn move_rack_within_own_footprint_is_allowed() {
        let mut room = Room::new("DC-15", 10, 10, 3.0);
        room.add_rack(rack_2x2("RACK-01", 2, 2)).unwrap();
        // Shifting by one tile overlaps the old position; the rack must not
        // collide with itself.
        assert_eq!(room.move_rack("RACK-01", 3, 2), Ok(()));
        assert_eq!(room.occupied_tiles(), vec![(3, 2), (3, 3), (4, 2), (4, 3)]);
    }

    #[test]
    fn move_missing_rack_is_not_found() {
        let mut room = Room::new("DC-16", 10, 10, 3.0);
        assert_eq!(
            room.move_rack("RACK-01", 1, 1),
            Err(PlacementError::NotFound)
        );
    }

    #[test]
    fn set_rack_units_through_room() {
        let mut room = Room::new("DC-17", 10, 10, 3.0);
        room.add_rack(DataRack::new("RACK-01", 0, 0, 42)).unwrap();

        assert!(room.set_rack_units("RACK-01", 24));
        assert_eq!(room.rack("RACK-01").unwrap().rack_units(), 24);
        assert!(!room.set_rack_units("RACK-99", 24));
    }

    #[test]
    fn placement_order_is_preserved() {
        let mut room = Room::new("DC-18", 12, 4, 3.0);
        for (i, x) in [0, 3, 6, 9].iter().enumerate() {
            room.add_rack(rack_2x2(&format!("RACK-{:02}", i + 1), *x, 0))
                .unwrap();
        }
        let ids: Vec<&str> = room.racks().iter().map(|r| r.rack_id()).collect();
        assert_eq!(ids, vec!["RACK-01", "RACK-02", "RACK-03", "RACK-04"]);
    }

    #[test]
    fn occupied_and_unoccupied_partition_the_grid() {
        let mut room = Room::new("DC-19", 3, 3, 3.0);
        room.add_rack(DataRack::new("RACK-01", 0, 0, 42)).unwrap();

        let occupied = room.occupied_tiles();
        let unoccupied = room.unoccupied_tiles();
        assert_eq!(occupied.len() + unoccupied.len(), 9);
        assert!(!unoccupied.contains(&(0, 0)));
        assert!(occupied.contains(&(0, 0)));
    }
}
