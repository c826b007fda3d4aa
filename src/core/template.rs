//! Sentence-template catalog: loading, validation, round-robin
//! selection.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::classifier::TemplateClass;
use crate::schema::kanji::Grade;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("no templates for class {class:?}, grade {grade}")]
    MissingTemplates { class: TemplateClass, grade: Grade },
}

/// A sentence frame around the blank: literal lead and trail fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTemplate {
    pub lead: String,
    pub trail: String,
}

/// The catalog's on-disk shape: one group per (class, grade).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateGroup {
    pub class: TemplateClass,
    pub grade: Grade,
    pub templates: Vec<SentenceTemplate>,
}

const BUILTIN_CATALOG: &str = include_str!("../../data/templates.ron");

/// The full catalog: an immutable template list per (class, grade).
///
/// Completeness is validated at construction, so an incomplete catalog
/// is a load-time configuration defect and lookups afterwards cannot
/// fail.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    templates: [[Vec<SentenceTemplate>; 6]; 3],
}

impl TemplateBank {
    /// The hand-authored catalog shipped with the crate.
    pub fn builtin() -> Result<TemplateBank, TemplateError> {
        Self::parse_ron(BUILTIN_CATALOG)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateBank, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string. Groups for the same
    /// (class, grade) pair concatenate in file order.
    pub fn parse_ron(input: &str) -> Result<TemplateBank, TemplateError> {
        let groups: Vec<TemplateGroup> = ron::from_str(input)?;
        Self::from_groups(groups)
    }

    pub fn from_groups(groups: Vec<TemplateGroup>) -> Result<TemplateBank, TemplateError> {
        let mut templates: [[Vec<SentenceTemplate>; 6]; 3] = Default::default();
        for group in groups {
            templates[group.class.index()][group.grade.index()].extend(group.templates);
        }
        let bank = TemplateBank { templates };
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), TemplateError> {
        for class in TemplateClass::ALL {
            for grade in Grade::all() {
                if self.templates[class.index()][grade.index()].is_empty() {
                    return Err(TemplateError::MissingTemplates { class, grade });
                }
            }
        }
        Ok(())
    }

    /// Templates for a class and grade. Non-empty by construction.
    pub fn templates_for(&self, class: TemplateClass, grade: Grade) -> &[SentenceTemplate] {
        &self.templates[class.index()][grade.index()]
    }

    /// Deterministic round-robin pick at a cursor position.
    pub fn pick(&self, class: TemplateClass, grade: Grade, position: u64) -> &SentenceTemplate {
        let templates = self.templates_for(class, grade);
        &templates[(position % templates.len() as u64) as usize]
    }
}

/// Counter threading template variety through a whole generation run.
///
/// One cursor is shared across every grade and class in a run and
/// advances once per processed reading, so consecutive questions for the
/// same kanji usually draw different frames and reruns over identical
/// input reproduce identical output. Owned by the run, not global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateCursor {
    position: u64,
}

impl TemplateCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(self) -> u64 {
        self.position
    }

    /// Step to the next position, returning the one just consumed.
    pub fn advance(&mut self) -> u64 {
        let position = self.position;
        self.position += 1;
        position
    }
}
