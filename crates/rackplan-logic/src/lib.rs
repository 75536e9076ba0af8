//! Pure layout logic for Rackplan.
//!
//! This crate contains the data-center floor layout engine, independent of
//! any UI, file format choice, or runtime. Types take plain data and return
//! results, making them unit-testable and portable across the desktop
//! planner, headless tools, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Rack-unit conversions, tile sizing, ladder catalogue |
//! | [`floor_config`] | Operator-facing floor configuration and validation |
//! | [`footprint`] | Rectangular tile footprints shared by racks and obstacles |
//! | [`ladder`] | Cable ladder chains of oriented, measured sections |
//! | [`obstacle`] | Fixed obstructions (ducts, columns) on the floor grid |
//! | [`persistence`] | Versioned layout snapshots (JSON and binary) |
//! | [`rack`] | Data racks and their derived physical attributes |
//! | [`room`] | Occupancy grid and the atomic placement engine |
//! | [`validation`] | Audit checks over a built layout |

pub mod constants;
pub mod floor_config;
pub mod footprint;
pub mod ladder;
pub mod obstacle;
pub mod persistence;
pub mod rack;
pub mod room;
pub mod validation;
