//! Cable ladders — ordered chains of oriented, measured sections.
//!
//! A ladder owns its sections exclusively; sections are appended at the
//! tail, removed by id from anywhere, or popped from the tail (undo). The
//! chain performs no geometric validation between sections — two runs may
//! cross in space, and routing around obstacles is the operator's job.

use serde::{Deserialize, Serialize};

use crate::constants::ladders::{DEFAULT_WIDTH_CM, MATERIAL_ALUMINUM};

/// Axis a section runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One straight (optionally bent) run of cable ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    section_id: String,
    /// Start x in the room's physical plane.
    x_coord: f32,
    /// Start y in the room's physical plane.
    y_coord: f32,
    /// Run length, same units as the coordinates.
    length: f32,
    orientation: Orientation,
    /// Rung width in centimeters.
    width: f32,
    material: String,
    /// Bend in degrees: 0 straight, positive right, negative left.
    curved_degree: f32,
}

impl Section {
    /// Straight 30 cm aluminum section.
    pub fn new(
        section_id: impl Into<String>,
        x_coord: f32,
        y_coord: f32,
        length: f32,
        orientation: Orientation,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            x_coord,
            y_coord,
            length,
            orientation,
            width: DEFAULT_WIDTH_CM,
            material: MATERIAL_ALUMINUM.to_string(),
            curved_degree: 0.0,
        }
    }

    pub fn with_width(mut self, width_cm: f32) -> Self {
        self.width = width_cm;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_bend(mut self, degrees: f32) -> Self {
        self.curved_degree = degrees;
        self
    }

    /// Build the axis-snapped section between two grid tiles.
    ///
    /// The axis with the larger coordinate delta wins; a tie is vertical.
    /// The start is the min corner, so length is never negative. Lengths
    /// are in tile strides; scale by the room's tile size for meters.
    pub fn between_tiles(
        section_id: impl Into<String>,
        start: (i32, i32),
        end: (i32, i32),
    ) -> Self {
        let (x1, y1) = start;
        let (x2, y2) = end;
        let (orientation, length) = if (x2 - x1).abs() > (y2 - y1).abs() {
            (Orientation::Horizontal, (x2 - x1).abs() as f32)
        } else {
            (Orientation::Vertical, (y2 - y1).abs() as f32)
        };
        Self::new(
            section_id,
            x1.min(x2) as f32,
            y1.min(y2) as f32,
            length,
            orientation,
        )
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Start coordinate `(x, y)`.
    pub fn start(&self) -> (f32, f32) {
        (self.x_coord, self.y_coord)
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn curved_degree(&self) -> f32 {
        self.curved_degree
    }

    /// End coordinate, fully determined by start + length + orientation.
    pub fn end_point(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (self.x_coord + self.length, self.y_coord),
            Orientation::Vertical => (self.x_coord, self.y_coord + self.length),
        }
    }
}

/// An ordered run of cable ladder sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    ladder_id: String,
    sections: Vec<Section>,
}

impl Ladder {
    /// Empty ladder. Valid but transient — callers usually discard ladders
    /// that end a session with no sections.
    pub fn new(ladder_id: impl Into<String>) -> Self {
        Self {
            ladder_id: ladder_id.into(),
            sections: Vec::new(),
        }
    }

    pub fn ladder_id(&self) -> &str {
        &self.ladder_id
    }

    /// Sections in insertion order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Append at the tail.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Remove the section with the given id, preserving the order of the
    /// rest. `None` when absent.
    pub fn remove_section(&mut self, section_id: &str) -> Option<Section> {
        let idx = self
            .sections
            .iter()
            .position(|s| s.section_id() == section_id)?;
        Some(self.sections.remove(idx))
    }

    /// Undo: remove and return the tail section.
    pub fn pop_last(&mut self) -> Option<Section> {
        self.sections.pop()
    }

    /// Sum of member section lengths. Recomputed on demand.
    pub fn total_length(&self) -> f32 {
        self.sections.iter().map(|s| s.length()).sum()
    }
}
