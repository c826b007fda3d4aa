use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::unit::UnitId;

/// Newtype wrapper for kanji IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KanjiId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("grade must be between 1 and 6, got {0}")]
pub struct GradeOutOfRange(pub u8);

/// An elementary-school grade level, 1 through 6.
///
/// The range is enforced at construction; a `Grade` in hand is always
/// valid, which keeps the per-grade tables in the core dense and total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: Grade = Grade(1);
    pub const MAX: Grade = Grade(6);

    pub fn new(value: u8) -> Result<Grade, GradeOutOfRange> {
        if (1..=6).contains(&value) {
            Ok(Grade(value))
        } else {
            Err(GradeOutOfRange(value))
        }
    }

    /// All grades in ascending order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (1..=6).map(Grade)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based index for dense per-grade tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Grade {
    type Error = GradeOutOfRange;

    fn try_from(value: u8) -> Result<Grade, GradeOutOfRange> {
        Grade::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> u8 {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kanji assigned to the curriculum.
///
/// `character` being a `char` makes the one-glyph invariant structural;
/// multi-character compounds only ever appear as question target text,
/// never as curriculum entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub id: KanjiId,
    pub character: char,
    pub grade: Grade,
    /// Unit that introduces this kanji, once it has been grouped.
    #[serde(default)]
    pub introducing_unit: Option<UnitId>,
}
