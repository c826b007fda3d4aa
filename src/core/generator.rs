//! The generation run: one ordered batch pass over the curriculum.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::core::classifier::classify;
use crate::core::composer::compose;
use crate::core::template::{TemplateBank, TemplateCursor, TemplateError};
use crate::core::vocabulary::VocabularyIndex;
use crate::schema::kanji::{Grade, KanjiEntry, KanjiId};
use crate::schema::question::QuestionRecord;
use crate::schema::reading::{ReadingEntry, ReadingKind};
use crate::schema::unit::UnitAssignment;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("no destination unit assigned for grade {0}")]
    MissingUnit(Grade),
}

/// Operator-facing tallies for one run.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    /// Question counts indexed by `Grade::index()`.
    pub per_grade: [usize; 6],
    /// Occurrences of a kanji left in place with no fallback reading.
    pub unresolved: usize,
    /// The distinct characters behind those occurrences, for manual
    /// review.
    pub unresolved_chars: FxHashSet<char>,
    /// Readings dropped because their kanji was not in the curriculum.
    pub skipped_readings: usize,
}

impl GenerationStats {
    pub fn questions_for(&self, grade: Grade) -> usize {
        self.per_grade[grade.index()]
    }

    pub fn total_questions(&self) -> usize {
        self.per_grade.iter().sum()
    }
}

/// The ordered question set plus its run statistics.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub questions: Vec<QuestionRecord>,
    pub stats: GenerationStats,
}

/// Batch question generator: one record per reading, deterministic
/// ordering, one shared template cursor per run.
///
/// The run is a pure transform; clearing previously generated questions
/// and wrapping the delete-then-insert in a transaction belongs to the
/// storage collaborator.
pub struct QuestionGenerator {
    bank: TemplateBank,
}

impl QuestionGenerator {
    pub fn new(bank: TemplateBank) -> Self {
        QuestionGenerator { bank }
    }

    /// Generator over the catalog shipped with the crate.
    pub fn with_builtin_catalog() -> Result<Self, GeneratorError> {
        Ok(QuestionGenerator {
            bank: TemplateBank::builtin()?,
        })
    }

    pub fn bank(&self) -> &TemplateBank {
        &self.bank
    }

    /// Generate the full question set for a curriculum.
    ///
    /// Every surviving reading yields exactly one record; no
    /// deduplication or filtering happens here.
    pub fn generate(
        &self,
        kanji_entries: &[KanjiEntry],
        reading_entries: &[ReadingEntry],
        units: &UnitAssignment,
    ) -> Result<GenerationRun, GeneratorError> {
        let vocabulary = VocabularyIndex::build(kanji_entries, reading_entries);
        let kanji_by_id: FxHashMap<KanjiId, &KanjiEntry> =
            kanji_entries.iter().map(|k| (k.id, k)).collect();

        let mut stats = GenerationStats::default();

        // Pedagogical order: grade, then kanji, on readings leading.
        // The sort is stable, so equal keys keep the input order.
        let mut ordered: Vec<(&KanjiEntry, &ReadingEntry)> =
            Vec::with_capacity(reading_entries.len());
        for reading in reading_entries {
            match kanji_by_id.get(&reading.kanji_id) {
                Some(kanji) => ordered.push((kanji, reading)),
                // Upstream filtering should prevent these; the run
                // still never aborts on one.
                None => stats.skipped_readings += 1,
            }
        }
        ordered.sort_by_key(|(kanji, reading)| {
            let kind_rank = match reading.kind {
                ReadingKind::On => 0u8,
                ReadingKind::Kun => 1,
            };
            (kanji.grade, kanji.id, kind_rank)
        });

        let mut questions = Vec::with_capacity(ordered.len());
        let mut cursor = TemplateCursor::new();

        for (kanji, reading) in ordered {
            let grade = kanji.grade;
            let unit_id = units
                .unit_for(grade)
                .ok_or(GeneratorError::MissingUnit(grade))?;

            let class = classify(reading);
            let template = self.bank.pick(class, grade, cursor.advance());
            let target = kanji.character.to_string();
            let composed = compose(reading, &target, class, grade, template, &vocabulary);

            stats.per_grade[grade.index()] += 1;
            stats.unresolved += composed.unresolved.len();
            stats
                .unresolved_chars
                .extend(composed.unresolved.iter().copied());

            questions.push(QuestionRecord {
                unit_id,
                lead_text: composed.lead_text,
                target_kanji_text: composed.target_kanji_text,
                target_reading: composed.target_reading,
                trail_text: composed.trail_text,
                source_reading_id: Some(reading.id),
            });
        }

        Ok(GenerationRun { questions, stats })
    }
}
