//! Dictionary-side ingestion boundary: validation and normalization of
//! parsed reading tuples.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wana_kana::{ConvertJapanese, IsJapaneseStr};

use crate::schema::kanji::{Grade, KanjiEntry, KanjiId};
use crate::schema::reading::{ReadingEntry, ReadingId, ReadingKind};

/// A reading candidate as parsed out of the dictionary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    pub kanji: String,
    pub kind: ReadingKind,
    pub reading: String,
    #[serde(default)]
    pub okurigana: Option<String>,
}

/// Why a candidate was dropped. Dropped candidates are tallied, never
/// fatal for the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("kanji field must be exactly one character, got {0:?}")]
    NotSingleKanji(String),
    #[error("kanji {0} is not in the curriculum")]
    UnknownKanji(char),
    #[error("reading is empty")]
    EmptyReading,
    #[error("reading {0:?} is not hiragana")]
    ReadingNotHiragana(String),
    #[error("okurigana {0:?} is not hiragana")]
    OkuriganaNotHiragana(String),
}

/// A dropped candidate with its position in the input batch.
#[derive(Debug, Clone)]
pub struct SkippedReading {
    pub index: usize,
    pub raw: RawReading,
    pub error: ValidationError,
}

/// Per-grade accepted-reading tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeTally {
    pub on: usize,
    pub kun: usize,
}

impl GradeTally {
    pub fn total(self) -> usize {
        self.on + self.kun
    }
}

/// Outcome of one ingestion batch.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub readings: Vec<ReadingEntry>,
    pub skipped: Vec<SkippedReading>,
    /// Accepted-reading tallies indexed by `Grade::index()`.
    pub per_grade: [GradeTally; 6],
    /// Curriculum kanji that ended up with no accepted readings,
    /// ordered by grade then curriculum position.
    pub kanji_without_readings: Vec<(char, Grade)>,
}

/// Validate a batch of candidates against the curriculum and turn the
/// survivors into reading entries.
///
/// IDs are assigned sequentially from 1; the storage collaborator may
/// re-key them on insert.
pub fn ingest_readings(kanji_entries: &[KanjiEntry], candidates: &[RawReading]) -> IngestReport {
    let kanji_index: FxHashMap<char, &KanjiEntry> =
        kanji_entries.iter().map(|k| (k.character, k)).collect();

    let mut readings = Vec::new();
    let mut skipped = Vec::new();
    let mut per_grade = [GradeTally::default(); 6];

    for (index, raw) in candidates.iter().enumerate() {
        match validate_candidate(&kanji_index, raw) {
            Ok((kanji, reading, okurigana)) => {
                let tally = &mut per_grade[kanji.grade.index()];
                match raw.kind {
                    ReadingKind::On => tally.on += 1,
                    ReadingKind::Kun => tally.kun += 1,
                }
                readings.push(ReadingEntry {
                    id: ReadingId(readings.len() as u64 + 1),
                    kanji_id: kanji.id,
                    kind: raw.kind,
                    reading,
                    okurigana,
                });
            }
            Err(error) => skipped.push(SkippedReading {
                index,
                raw: raw.clone(),
                error,
            }),
        }
    }

    let covered: FxHashSet<KanjiId> = readings.iter().map(|r| r.kanji_id).collect();
    let mut missing: Vec<&KanjiEntry> = kanji_entries
        .iter()
        .filter(|k| !covered.contains(&k.id))
        .collect();
    missing.sort_by_key(|k| (k.grade, k.id));
    let kanji_without_readings = missing.iter().map(|k| (k.character, k.grade)).collect();

    IngestReport {
        readings,
        skipped,
        per_grade,
        kanji_without_readings,
    }
}

fn validate_candidate<'a>(
    kanji_index: &FxHashMap<char, &'a KanjiEntry>,
    raw: &RawReading,
) -> Result<(&'a KanjiEntry, String, Option<String>), ValidationError> {
    let mut chars = raw.kanji.trim().chars();
    let character = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(ValidationError::NotSingleKanji(raw.kanji.clone())),
    };

    let kanji = kanji_index
        .get(&character)
        .copied()
        .ok_or(ValidationError::UnknownKanji(character))?;

    let reading = raw.reading.trim();
    if reading.is_empty() {
        return Err(ValidationError::EmptyReading);
    }
    if !reading.is_hiragana() {
        return Err(ValidationError::ReadingNotHiragana(reading.to_string()));
    }

    let okurigana = raw
        .okurigana
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty());
    if let Some(okurigana) = okurigana {
        if !okurigana.is_hiragana() {
            return Err(ValidationError::OkuriganaNotHiragana(okurigana.to_string()));
        }
    }

    Ok((kanji, reading.to_string(), okurigana.map(str::to_string)))
}

/// Normalize a dictionary-side candidate: strip the dictionary's
/// hyphen/paren markers, split the kun dot notation into reading and
/// okurigana, and convert katakana on readings to hiragana.
pub fn normalize(raw: &RawReading) -> RawReading {
    let cleaned: String = raw
        .reading
        .chars()
        .filter(|c| !matches!(c, '-' | '(' | ')'))
        .collect();
    let (base, inline_okurigana) = split_okurigana(&cleaned);
    let okurigana = raw
        .okurigana
        .clone()
        .filter(|o| !o.is_empty())
        .or(inline_okurigana);
    RawReading {
        kanji: raw.kanji.clone(),
        kind: raw.kind,
        reading: base.to_hiragana(),
        okurigana,
    }
}

/// Split the dictionary notation `た.べる` into the reading and its
/// okurigana tail.
pub fn split_okurigana(reading: &str) -> (String, Option<String>) {
    match reading.split_once('.') {
        Some((base, tail)) if !tail.is_empty() => (base.to_string(), Some(tail.to_string())),
        Some((base, _)) => (base.to_string(), None),
        None => (reading.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kanji(id: u64, character: char, grade: u8) -> KanjiEntry {
        KanjiEntry {
            id: KanjiId(id),
            character,
            grade: Grade::new(grade).unwrap(),
            introducing_unit: None,
        }
    }

    fn raw(kanji: &str, kind: ReadingKind, reading: &str, okurigana: Option<&str>) -> RawReading {
        RawReading {
            kanji: kanji.to_string(),
            kind,
            reading: reading.to_string(),
            okurigana: okurigana.map(str::to_string),
        }
    }

    fn curriculum() -> Vec<KanjiEntry> {
        vec![kanji(1, '山', 1), kanji(2, '食', 2)]
    }

    #[test]
    fn valid_candidates_are_accepted() {
        let report = ingest_readings(
            &curriculum(),
            &[
                raw("山", ReadingKind::Kun, "やま", None),
                raw("食", ReadingKind::Kun, "た", Some("べる")),
                raw("食", ReadingKind::On, "しょく", None),
            ],
        );
        assert_eq!(report.readings.len(), 3);
        assert!(report.skipped.is_empty());
        assert_eq!(report.readings[0].id, ReadingId(1));
        assert_eq!(report.readings[1].okurigana.as_deref(), Some("べる"));
        assert_eq!(report.per_grade[0].kun, 1);
        assert_eq!(report.per_grade[1].on, 1);
        assert_eq!(report.per_grade[1].kun, 1);
        assert!(report.kanji_without_readings.is_empty());
    }

    #[test]
    fn katakana_reading_is_rejected() {
        let report = ingest_readings(&curriculum(), &[raw("食", ReadingKind::On, "ショク", None)]);
        assert!(report.readings.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped[0].error,
            ValidationError::ReadingNotHiragana(_)
        ));
    }

    #[test]
    fn elongation_mark_is_allowed_in_reading() {
        let curriculum = vec![kanji(1, '兄', 2)];
        let report = ingest_readings(&curriculum, &[raw("兄", ReadingKind::Kun, "にーさん", None)]);
        assert_eq!(report.readings.len(), 1);
    }

    #[test]
    fn multi_character_kanji_field_is_rejected() {
        let report = ingest_readings(&curriculum(), &[raw("山川", ReadingKind::Kun, "やま", None)]);
        assert!(matches!(
            report.skipped[0].error,
            ValidationError::NotSingleKanji(_)
        ));
    }

    #[test]
    fn unknown_kanji_is_rejected() {
        let report = ingest_readings(&curriculum(), &[raw("鬱", ReadingKind::Kun, "うつ", None)]);
        assert_eq!(
            report.skipped[0].error,
            ValidationError::UnknownKanji('鬱')
        );
    }

    #[test]
    fn empty_reading_is_rejected() {
        let report = ingest_readings(&curriculum(), &[raw("山", ReadingKind::Kun, "  ", None)]);
        assert_eq!(report.skipped[0].error, ValidationError::EmptyReading);
    }

    #[test]
    fn non_hiragana_okurigana_is_rejected() {
        let report = ingest_readings(
            &curriculum(),
            &[raw("食", ReadingKind::Kun, "た", Some("ベル"))],
        );
        assert!(matches!(
            report.skipped[0].error,
            ValidationError::OkuriganaNotHiragana(_)
        ));
    }

    #[test]
    fn bad_record_does_not_abort_the_batch() {
        let report = ingest_readings(
            &curriculum(),
            &[
                raw("山", ReadingKind::Kun, "やま", None),
                raw("鬱", ReadingKind::Kun, "うつ", None),
                raw("食", ReadingKind::On, "しょく", None),
            ],
        );
        assert_eq!(report.readings.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
    }

    #[test]
    fn uncovered_kanji_are_listed_in_grade_order() {
        let curriculum = vec![kanji(1, '山', 1), kanji(2, '食', 2), kanji(3, '川', 1)];
        let report = ingest_readings(&curriculum, &[raw("食", ReadingKind::On, "しょく", None)]);
        assert_eq!(
            report.kanji_without_readings,
            vec![
                ('山', Grade::new(1).unwrap()),
                ('川', Grade::new(1).unwrap()),
            ]
        );
    }

    #[test]
    fn normalize_converts_katakana_on_reading() {
        let normalized = normalize(&raw("食", ReadingKind::On, "ショク", None));
        assert_eq!(normalized.reading, "しょく");
        assert!(normalized.okurigana.is_none());
    }

    #[test]
    fn normalize_splits_dot_notation() {
        let normalized = normalize(&raw("食", ReadingKind::Kun, "た.べる", None));
        assert_eq!(normalized.reading, "た");
        assert_eq!(normalized.okurigana.as_deref(), Some("べる"));
    }

    #[test]
    fn normalize_strips_dictionary_markers() {
        let normalized = normalize(&raw("食", ReadingKind::Kun, "-た.べる", None));
        assert_eq!(normalized.reading, "た");
        assert_eq!(normalized.okurigana.as_deref(), Some("べる"));
    }

    #[test]
    fn normalize_keeps_explicit_okurigana() {
        let normalized = normalize(&raw("食", ReadingKind::Kun, "た.べる", Some("べた")));
        assert_eq!(normalized.okurigana.as_deref(), Some("べた"));
    }

    #[test]
    fn split_okurigana_cases() {
        assert_eq!(split_okurigana("た.べる"), ("た".to_string(), Some("べる".to_string())));
        assert_eq!(split_okurigana("やま"), ("やま".to_string(), None));
        assert_eq!(split_okurigana("た."), ("た".to_string(), None));
    }
}
