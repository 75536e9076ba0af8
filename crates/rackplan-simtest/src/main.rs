//! Rackplan Headless Validation Harness
//!
//! Exercises the layout engine end to end without a UI — no window, no
//! files on disk, no rendering. Runs entirely in-process and exits nonzero
//! if any check fails.
//!
//! Usage:
//!   cargo run -p rackplan-simtest
//!   cargo run -p rackplan-simtest -- --verbose

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rackplan_logic::floor_config::{build_room, estimate_summary, validate_config, FloorConfig};
use rackplan_logic::ladder::{Ladder, Orientation, Section};
use rackplan_logic::obstacle::Obstacle;
use rackplan_logic::persistence::{self, load_layout, save_layout, SnapshotError};
use rackplan_logic::rack::DataRack;
use rackplan_logic::room::{PlacementError, Room};
use rackplan_logic::validation::{check_footprint_overlaps, check_grid_consistency, validate_all};
use serde::Deserialize;

// ── Rack record shape shared with the JSON layout files ─────────────────

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RackRecord {
    rack_id: String,
    position_x: i32,
    position_y: i32,
    rack_units: u32,
    width_tiles: u32,
    depth_tiles: u32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Rackplan Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Floor configuration validation
    results.extend(validate_floor_config(verbose));

    // 2. Placement engine sweep
    results.extend(validate_placement_engine(verbose));

    // 3. Occupancy invariant after a scripted build-out
    results.extend(validate_occupancy_invariant(verbose));

    // 4. Ladder chain operations
    results.extend(validate_ladder_ops(verbose));

    // 5. Randomized placement stress
    results.extend(validate_random_stress(verbose));

    // 6. Snapshot round-trips
    results.extend(validate_snapshots(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Floor configuration ──────────────────────────────────────────────

fn validate_floor_config(_verbose: bool) -> Vec<TestResult> {
    println!("--- Floor Configuration ---");
    let mut results = Vec::new();

    let config = FloorConfig::default();
    let errors = validate_config(&config);
    results.push(check(
        "config_default_valid",
        errors.is_empty(),
        format!("{} errors on default config", errors.len()),
    ));

    let summary = estimate_summary(&config);
    results.push(check(
        "config_summary_positive",
        summary.area_m2 > 0.0 && summary.volume_m3 > 0.0 && summary.estimated_rack_capacity > 0,
        format!(
            "{:.1} m², {:.1} m³, ~{} racks",
            summary.area_m2, summary.volume_m3, summary.estimated_rack_capacity
        ),
    ));

    let mut bad = FloorConfig::default();
    bad.num_tiles_x = 0;
    bad.height = -1.0;
    bad.room_id = " ".to_string();
    let errors = validate_config(&bad);
    results.push(check(
        "config_bad_caught",
        errors.len() == 3,
        format!("{} errors reported for a triply-broken config", errors.len()),
    ));

    results
}

// ── 2. Placement engine ─────────────────────────────────────────────────

fn validate_placement_engine(_verbose: bool) -> Vec<TestResult> {
    println!("--- Placement Engine ---");
    let mut results = Vec::new();

    // Scenario: 2×2 rack on a 10×10 floor.
    let mut room = Room::new("DC-A", 10, 10, 3.0);
    let placed = room.add_rack(DataRack::with_footprint("RACK-01", 2, 2, 42, 2, 2).unwrap());
    let occupied = room.occupied_tiles();
    results.push(check(
        "place_2x2",
        placed.is_ok() && occupied == vec![(2, 2), (2, 3), (3, 2), (3, 3)],
        format!("{} tiles occupied", occupied.len()),
    ));

    // Overlap rejected, collections unchanged.
    let rejected = room.add_rack(DataRack::with_footprint("RACK-02", 3, 3, 42, 2, 2).unwrap());
    results.push(check(
        "collision_rejected",
        rejected == Err(PlacementError::Collision)
            && room.racks().len() == 1
            && room.occupied_tiles() == occupied,
        format!("{:?}, {} racks placed", rejected, room.racks().len()),
    ));

    // Out of bounds on a 5×5 floor.
    let mut small = Room::new("DC-B", 5, 5, 3.0);
    let rejected = small.add_rack(DataRack::with_footprint("RACK-03", 4, 4, 42, 2, 2).unwrap());
    results.push(check(
        "bounds_rejected",
        rejected == Err(PlacementError::OutOfBounds) && small.racks().is_empty(),
        format!("{:?}", rejected),
    ));

    // Removal of an absent rack is a signalled no-op.
    let before = room.occupied_tiles();
    let missing = room.remove_rack("RACK-99");
    results.push(check(
        "remove_missing_noop",
        missing.is_none() && room.occupied_tiles() == before,
        "grid untouched",
    ));

    // can_place agrees with the committing path.
    let preview_ok = room.can_place(6, 6, 2, 2);
    let preview_blocked = room.can_place(3, 3, 2, 2);
    let committed = room.add_rack(DataRack::with_footprint("RACK-04", 6, 6, 42, 2, 2).unwrap());
    results.push(check(
        "preview_matches_commit",
        preview_ok && !preview_blocked && committed.is_ok(),
        "bounds+collision identical in preview and commit",
    ));

    // Atomic move with rollback.
    let moved = room.move_rack("RACK-01", 0, 0);
    let bounced = room.move_rack("RACK-01", 6, 6);
    results.push(check(
        "move_atomic",
        moved.is_ok()
            && bounced == Err(PlacementError::Collision)
            && room.rack("RACK-01").map(|r| r.position()) == Some((0, 0)),
        format!("move ok, bounce {:?}", bounced),
    ));

    results
}

// ── 3. Occupancy invariant ──────────────────────────────────────────────

fn validate_occupancy_invariant(verbose: bool) -> Vec<TestResult> {
    println!("--- Occupancy Invariant ---");
    let mut results = Vec::new();

    // Scripted build-out: three rows of 2×2 racks on the default floor.
    let mut room = build_room(&FloorConfig::default()).expect("default floor");
    let mut rack_id = 1;
    for row in [2, 7, 12] {
        for x in (0..room.num_tiles_x() as i32).step_by(3) {
            if x + 2 <= room.num_tiles_x() as i32 {
                room.add_rack(
                    DataRack::with_footprint(format!("RACK-{:02}", rack_id), x, row, 42, 2, 2)
                        .unwrap(),
                )
                .unwrap();
                rack_id += 1;
            }
        }
    }
    room.add_obstacle(Obstacle::with_footprint("OBS-01", 0, 17, 3, 2, 2.2).unwrap())
        .unwrap();

    if verbose {
        println!(
            "  built {} racks + {} obstacles, {} tiles occupied",
            room.racks().len(),
            room.obstacles().len(),
            room.occupied_tiles().len()
        );
    }

    let expected_tiles = room.racks().len() * 4 + 6;
    results.push(check(
        "occupied_count",
        room.occupied_tiles().len() == expected_tiles,
        format!(
            "{} occupied, expected {}",
            room.occupied_tiles().len(),
            expected_tiles
        ),
    ));

    let findings = validate_all(&room, &[]);
    results.push(check(
        "audit_clean",
        findings.is_empty(),
        format!("{} findings", findings.len()),
    ));

    // Tiles partition exactly.
    let total = (room.num_tiles_x() * room.num_tiles_y()) as usize;
    results.push(check(
        "tiles_partition",
        room.occupied_tiles().len() + room.unoccupied_tiles().len() == total,
        format!("{} total tiles", total),
    ));

    results
}

// ── 4. Ladder chains ────────────────────────────────────────────────────

fn validate_ladder_ops(_verbose: bool) -> Vec<TestResult> {
    println!("--- Ladder Chains ---");
    let mut results = Vec::new();

    let mut ladder = Ladder::new("LAD-001");
    let empty_ok = ladder.total_length() == 0.0 && ladder.is_empty();

    ladder.add_section(Section::new("SEC-001", 0.0, 0.0, 1.5, Orientation::Horizontal));
    ladder.add_section(Section::new("SEC-002", 1.5, 0.0, 2.0, Orientation::Vertical));
    results.push(check(
        "ladder_total_length",
        empty_ok && (ladder.total_length() - 3.5).abs() < 1e-6,
        format!("total {}", ladder.total_length()),
    ));

    ladder.add_section(Section::new("SEC-003", 1.5, 2.0, 0.5, Orientation::Horizontal));
    let popped = ladder.pop_last();
    results.push(check(
        "ladder_undo",
        popped.as_ref().map(|s| s.section_id()) == Some("SEC-003") && ladder.len() == 2,
        "pop_last returns the tail section",
    ));

    let removed = ladder.remove_section("SEC-001");
    let order: Vec<&str> = ladder.sections().iter().map(|s| s.section_id()).collect();
    results.push(check(
        "ladder_remove_by_id",
        removed.is_some() && order == vec!["SEC-002"],
        format!("remaining: {:?}", order),
    ));

    // Axis snapping from tile endpoints.
    let h = Section::between_tiles("SEC-H", (2, 2), (9, 4));
    let tie = Section::between_tiles("SEC-T", (0, 0), (3, 3));
    results.push(check(
        "ladder_axis_snap",
        h.orientation() == Orientation::Horizontal
            && h.length() == 7.0
            && tie.orientation() == Orientation::Vertical,
        "larger delta wins, tie is vertical",
    ));

    let end = Section::new("SEC-E", 1.0, 2.0, 3.0, Orientation::Vertical).end_point();
    results.push(check(
        "ladder_end_point",
        end == (1.0, 5.0),
        format!("end at {:?}", end),
    ));

    results
}

// ── 5. Randomized stress ────────────────────────────────────────────────

fn validate_random_stress(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Placement Stress ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(42);
    let mut room = Room::new("DC-STRESS", 30, 30, 3.0);
    let mut placed_ids: Vec<String> = Vec::new();
    let mut accepted = 0u32;
    let mut rejected = 0u32;
    let mut preview_disagreements = 0u32;
    let mut audit_failures = 0u32;

    for i in 0..500 {
        if !placed_ids.is_empty() && rng.gen_bool(0.3) {
            // Remove a random placed rack.
            let idx = rng.gen_range(0..placed_ids.len());
            let id = placed_ids.swap_remove(idx);
            if room.remove_rack(&id).is_none() {
                audit_failures += 1;
            }
        } else {
            let x = rng.gen_range(-1..30);
            let y = rng.gen_range(-1..30);
            let w = rng.gen_range(1..=3);
            let d = rng.gen_range(1..=3);
            let id = format!("RACK-{:03}", i);
            let preview = room.can_place(x, y, w, d);
            let outcome =
                room.add_rack(DataRack::with_footprint(&id, x, y, 42, w, d).unwrap());
            if preview != outcome.is_ok() {
                preview_disagreements += 1;
            }
            match outcome {
                Ok(()) => {
                    accepted += 1;
                    placed_ids.push(id);
                }
                Err(_) => rejected += 1,
            }
        }

        // Re-audit the invariant every batch of mutations.
        if i % 50 == 49
            && (!check_grid_consistency(&room).is_empty()
                || !check_footprint_overlaps(&room).is_empty())
        {
            audit_failures += 1;
        }
    }

    if verbose {
        println!(
            "  {} accepted, {} rejected, {} racks remain",
            accepted,
            rejected,
            room.racks().len()
        );
    }

    results.push(check(
        "stress_activity",
        accepted > 0 && rejected > 0,
        format!("{} accepted, {} rejected", accepted, rejected),
    ));
    results.push(check(
        "stress_preview_agreement",
        preview_disagreements == 0,
        format!("{} preview/commit disagreements", preview_disagreements),
    ));
    results.push(check(
        "stress_invariant_held",
        audit_failures == 0,
        format!("{} audit failures across 500 operations", audit_failures),
    ));
    results.push(check(
        "stress_bookkeeping",
        room.racks().len() == placed_ids.len(),
        format!("{} racks tracked", room.racks().len()),
    ));

    results
}

// ── 6. Snapshot round-trips ─────────────────────────────────────────────

fn validate_snapshots(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshot Round-Trips ---");
    let mut results = Vec::new();

    let mut room = Room::new("DC-SNAP", 15, 12, 3.0);
    room.add_rack(DataRack::with_footprint("RACK-01", 1, 1, 42, 2, 2).unwrap())
        .unwrap();
    room.add_obstacle(Obstacle::new("OBS-01", 8, 8, 2.0)).unwrap();
    let mut ladder = Ladder::new("LAD-001");
    ladder.add_section(
        Section::new("SEC-001", 0.6, 0.6, 3.0, Orientation::Horizontal).with_width(90.0),
    );
    let ladders = vec![ladder];

    // JSON round-trip.
    let json = match persistence::to_json(&room, &ladders) {
        Ok(j) => j,
        Err(e) => {
            results.push(check("snapshot_json_encode", false, e.to_string()));
            return results;
        }
    };
    match persistence::from_json(&json) {
        Ok((restored, restored_ladders)) => {
            results.push(check(
                "snapshot_json_roundtrip",
                restored.occupied_tiles() == room.occupied_tiles()
                    && restored.racks() == room.racks()
                    && restored_ladders == ladders,
                format!("{} bytes of JSON", json.len()),
            ));
        }
        Err(e) => results.push(check("snapshot_json_roundtrip", false, e.to_string())),
    }

    // The rack records in the JSON match the shared schema.
    let value: serde_json::Value = serde_json::from_str(&json).expect("snapshot JSON parses");
    let racks: Result<Vec<RackRecord>, _> =
        serde_json::from_value(value["racks"].clone());
    results.push(check(
        "snapshot_json_schema",
        matches!(racks.as_ref().map(|r| r.len()), Ok(1)),
        format!("{:?}", racks.map(|r| r.len())),
    ));

    // Binary round-trip.
    let mut buffer = Vec::new();
    match save_layout(&mut buffer, &room, &ladders) {
        Ok(()) => match load_layout(&buffer[..]) {
            Ok((restored, _)) => results.push(check(
                "snapshot_binary_roundtrip",
                restored.occupied_tiles() == room.occupied_tiles(),
                format!("{} bytes of bincode", buffer.len()),
            )),
            Err(e) => results.push(check("snapshot_binary_roundtrip", false, e.to_string())),
        },
        Err(e) => results.push(check("snapshot_binary_roundtrip", false, e.to_string())),
    }

    // Tampered snapshot (self-colliding rack) must be rejected.
    let mut snap = persistence::snapshot(&room, &ladders);
    snap.racks.push(snap.racks[0].clone());
    let tamper_rejected = matches!(
        persistence::restore(&snap),
        Err(SnapshotError::InvalidLayout { .. })
    );
    results.push(check(
        "snapshot_tamper_rejected",
        tamper_rejected,
        "colliding snapshot refused on restore",
    ));

    results
}
