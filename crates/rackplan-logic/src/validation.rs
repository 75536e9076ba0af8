//! Audit checks over a built layout.
//!
//! Pure functions that take a room (and ladders) and return findings. The
//! placement engine prevents most of these by construction; the audit
//! exists for layouts arriving from outside — loaded files, imports, tests
//! — and as an executable statement of the invariants.

use std::collections::HashSet;
use std::fmt;

use crate::ladder::Ladder;
use crate::room::Room;

/// A layout audit finding.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{}] {}: {}", tag, self.category, self.message)
    }
}

// ── A. Entity bounds ────────────────────────────────────────────────────

/// Check that every placed rack and obstacle lies fully inside the grid.
pub fn check_entity_bounds(room: &Room) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let in_bounds = |x: i32, y: i32| {
        x >= 0
            && y >= 0
            && (x as u32) < room.num_tiles_x()
            && (y as u32) < room.num_tiles_y()
    };

    for rack in room.racks() {
        if rack.footprint().tiles().iter().any(|&(x, y)| !in_bounds(x, y)) {
            errors.push(ValidationError {
                category: "entity_bounds",
                severity: Severity::Error,
                message: format!(
                    "rack {} extends outside the {}×{} grid",
                    rack.rack_id(),
                    room.num_tiles_x(),
                    room.num_tiles_y()
                ),
            });
        }
    }
    for obstacle in room.obstacles() {
        if obstacle
            .footprint()
            .tiles()
            .iter()
            .any(|&(x, y)| !in_bounds(x, y))
        {
            errors.push(ValidationError {
                category: "entity_bounds",
                severity: Severity::Error,
                message: format!(
                    "obstacle {} extends outside the {}×{} grid",
                    obstacle.obstacle_id(),
                    room.num_tiles_x(),
                    room.num_tiles_y()
                ),
            });
        }
    }
    errors
}

// ── B. Footprint disjointness (pairwise) ────────────────────────────────

/// AABB overlap test across every pair of placed entities.
pub fn check_footprint_overlaps(room: &Room) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let footprints: Vec<(String, crate::footprint::Footprint)> = room
        .racks()
        .iter()
        .map(|r| (format!("rack {}", r.rack_id()), r.footprint()))
        .chain(
            room.obstacles()
                .iter()
                .map(|o| (format!("obstacle {}", o.obstacle_id()), o.footprint())),
        )
        .collect();

    for i in 0..footprints.len() {
        for j in (i + 1)..footprints.len() {
            if footprints[i].1.intersects(&footprints[j].1) {
                errors.push(ValidationError {
                    category: "footprint_overlap",
                    severity: Severity::Error,
                    message: format!("{} overlaps {}", footprints[i].0, footprints[j].0),
                });
            }
        }
    }
    errors
}

// ── C. Grid ↔ collection consistency ────────────────────────────────────

/// Check the core invariant: a tile is marked occupied iff it belongs to
/// the footprint of some placed entity.
pub fn check_grid_consistency(room: &Room) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut covered: HashSet<(i32, i32)> = HashSet::new();
    for rack in room.racks() {
        covered.extend(rack.footprint().tiles());
    }
    for obstacle in room.obstacles() {
        covered.extend(obstacle.footprint().tiles());
    }

    let occupied: HashSet<(i32, i32)> = room.occupied_tiles().into_iter().collect();

    for &(x, y) in occupied.difference(&covered) {
        errors.push(ValidationError {
            category: "grid_consistency",
            severity: Severity::Error,
            message: format!("tile ({}, {}) is marked occupied but no entity covers it", x, y),
        });
    }
    for &(x, y) in covered.difference(&occupied) {
        errors.push(ValidationError {
            category: "grid_consistency",
            severity: Severity::Error,
            message: format!("tile ({}, {}) is covered by an entity but not marked", x, y),
        });
    }
    errors
}

// ── D. Identity ─────────────────────────────────────────────────────────

/// Check for duplicate rack/obstacle ids within the room.
pub fn check_duplicate_ids(room: &Room) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for rack in room.racks() {
        if !seen.insert(rack.rack_id()) {
            errors.push(ValidationError {
                category: "identity",
                severity: Severity::Error,
                message: format!("duplicate rack id {}", rack.rack_id()),
            });
        }
    }
    let mut seen = HashSet::new();
    for obstacle in room.obstacles() {
        if !seen.insert(obstacle.obstacle_id()) {
            errors.push(ValidationError {
                category: "identity",
                severity: Severity::Error,
                message: format!("duplicate obstacle id {}", obstacle.obstacle_id()),
            });
        }
    }
    errors
}

/// Check for duplicate section ids within each ladder — identity-based
/// removal relies on them being unique.
pub fn check_section_ids(ladders: &[Ladder]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for ladder in ladders {
        let mut seen = HashSet::new();
        for section in ladder.sections() {
            if !seen.insert(section.section_id()) {
                errors.push(ValidationError {
                    category: "identity",
                    severity: Severity::Error,
                    message: format!(
                        "ladder {} has duplicate section id {}",
                        ladder.ladder_id(),
                        section.section_id()
                    ),
                });
            }
        }
    }
    errors
}

// ── E. Ladder geometry ──────────────────────────────────────────────────

/// Flag non-positive section lengths. Zero-length sections are accepted by
/// the model but contribute nothing and usually mean a mis-click.
pub fn check_section_lengths(ladders: &[Ladder]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for ladder in ladders {
        for section in ladder.sections() {
            if section.length() <= 0.0 {
                errors.push(ValidationError {
                    category: "ladder",
                    severity: Severity::Warning,
                    message: format!(
                        "section {} in ladder {} has non-positive length {}",
                        section.section_id(),
                        ladder.ladder_id(),
                        section.length()
                    ),
                });
            }
        }
    }
    errors
}

/// Flag empty ladders so callers can garbage-collect them.
pub fn check_empty_ladders(ladders: &[Ladder]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for ladder in ladders {
        if ladder.is_empty() {
            errors.push(ValidationError {
                category: "ladder",
                severity: Severity::Warning,
                message: format!("ladder {} has no sections", ladder.ladder_id()),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every audit and return combined findings.
pub fn validate_all(room: &Room, ladders: &[Ladder]) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_entity_bounds(room));
    all.extend(check_footprint_overlaps(room));
    all.extend(check_grid_consistency(room));
    all.extend(check_duplicate_ids(room));
    all.extend(check_section_ids(ladders));
    all.extend(check_section_lengths(ladders));
    all.extend(check_empty_ladders(ladders));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::{Orientation, Section};
    use crate::obstacle::Obstacle;
    use crate::rack::DataRack;

    fn busy_room() -> Room {
        let mut room = Room::new("DC-01", 12, 10, 3.0);
        room.add_rack(DataRack::with_footprint("RACK-01", 0, 0, 42, 2, 2).unwrap())
            .unwrap();
        room.add_rack(DataRack::with_footprint("RACK-02", 3, 0, 42, 2, 2).unwrap())
            .unwrap();
        room.add_obstacle(Obstacle::new("OBS-01", 8, 8, 2.0)).unwrap();
        room
    }

    #[test]
    fn clean_layout_passes_all_audits() {
        let room = busy_room();
        let mut ladder = Ladder::new("LAD-01");
        ladder.add_section(Section::new("SEC-01", 0.0, 0.0, 2.0, Orientation::Horizontal));
        let findings = validate_all(&room, &[ladder]);
        assert!(findings.is_empty(), "expected clean audit, got: {findings:?}");
    }

    #[test]
    fn audit_stays_clean_through_mutation() {
        let mut room = busy_room();
        room.move_rack("RACK-02", 6, 4).unwrap();
        room.remove_rack("RACK-01").unwrap();
        room.add_rack(DataRack::new("RACK-03", 0, 5, 12)).unwrap();
        assert!(check_grid_consistency(&room).is_empty());
        assert!(check_footprint_overlaps(&room).is_empty());
    }

    #[test]
    fn duplicate_rack_ids_flagged() {
        let mut room = Room::new("DC-02", 10, 10, 3.0);
        room.add_rack(DataRack::new("RACK-01", 0, 0, 42)).unwrap();
        room.add_rack(DataRack::new("RACK-01", 5, 5, 42)).unwrap();
        let findings = check_duplicate_ids(&room);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("RACK-01"));
    }

    #[test]
    fn duplicate_section_ids_flagged() {
        let mut ladder = Ladder::new("LAD-02");
        ladder.add_section(Section::new("SEC-01", 0.0, 0.0, 1.0, Orientation::Horizontal));
        ladder.add_section(Section::new("SEC-01", 1.0, 0.0, 1.0, Orientation::Horizontal));
        let findings = check_section_ids(&[ladder]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn zero_length_section_is_a_warning() {
        let mut ladder = Ladder::new("LAD-03");
        ladder.add_section(Section::new("SEC-01", 0.0, 0.0, 0.0, Orientation::Vertical));
        let findings = check_section_lengths(&[ladder]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn empty_ladder_is_a_warning() {
        let findings = check_empty_ladders(&[Ladder::new("LAD-04")]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("LAD-04"));
    }

    #[test]
    fn finding_display_is_readable() {
        let findings = check_empty_ladders(&[Ladder::new("LAD-05")]);
        let text = findings[0].to_string();
        assert!(text.starts_with("[warning] ladder:"));
    }
}
