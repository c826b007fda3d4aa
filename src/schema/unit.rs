use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::kanji::Grade;

/// Newtype wrapper for unit IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// Unit number reserved for the auto-generated reading drills, kept far
/// above the hand-curated teaching units.
pub const READING_UNIT_NUMBER: u16 = 99;

/// A grouping of questions presented together in the quiz UI, typically
/// a teaching chapter or a batch of kanji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub grade: Grade,
    pub number: u16,
    pub name: String,
}

/// Display name for the auto-generated reading unit, written in the
/// orthography a student of that grade can already read.
pub fn reading_unit_name(grade: Grade) -> &'static str {
    match grade.value() {
        1 => "かんじのよみ",
        2 => "かん字の読み",
        _ => "漢字の読み",
    }
}

/// Maps each grade to the destination unit for generated questions.
///
/// Produced by the collaborator that creates or locates the per-grade
/// reading units before a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitAssignment {
    units: HashMap<Grade, UnitId>,
}

impl UnitAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, grade: Grade, unit: UnitId) {
        self.units.insert(grade, unit);
    }

    pub fn unit_for(&self, grade: Grade) -> Option<UnitId> {
        self.units.get(&grade).copied()
    }

    /// Collect the reading units (number 99) out of a unit list.
    pub fn from_units(units: &[Unit]) -> UnitAssignment {
        let mut assignment = UnitAssignment::new();
        for unit in units {
            if unit.number == READING_UNIT_NUMBER {
                assignment.assign(unit.grade, unit.id);
            }
        }
        assignment
    }
}
