//! Per-grade vocabulary lookup backing sentence substitution.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::kanji::{Grade, KanjiEntry, KanjiId};
use crate::schema::reading::{ReadingEntry, ReadingKind};

/// Grade-keyed view of the curriculum: which kanji a student already
/// knows, and the substitute reading for everything else.
///
/// Built once per generation run from curriculum records, owned for the
/// duration of that run, never persisted.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    allowed: [FxHashSet<char>; 6],
    fallback: FxHashMap<char, String>,
}

impl VocabularyIndex {
    /// Build both derived structures from curriculum records.
    pub fn build(kanji_entries: &[KanjiEntry], reading_entries: &[ReadingEntry]) -> Self {
        VocabularyIndex {
            allowed: build_allowed_sets(kanji_entries),
            fallback: build_fallback_map(kanji_entries, reading_entries),
        }
    }

    /// Characters introduced strictly before `grade`. Grade 1 gets the
    /// empty set.
    pub fn allowed_set(&self, grade: Grade) -> &FxHashSet<char> {
        &self.allowed[grade.index()]
    }

    pub fn is_allowed(&self, grade: Grade, character: char) -> bool {
        self.allowed[grade.index()].contains(&character)
    }

    /// The substitute reading for a character, if one is known. Absent
    /// when the kanji has no reading entries; callers leave the original
    /// character in place.
    pub fn fallback_reading(&self, character: char) -> Option<&str> {
        self.fallback.get(&character).map(String::as_str)
    }
}

fn build_allowed_sets(kanji_entries: &[KanjiEntry]) -> [FxHashSet<char>; 6] {
    let mut sets: [FxHashSet<char>; 6] = Default::default();
    for entry in kanji_entries {
        // A kanji becomes usable from the grade after the one that
        // introduces it.
        for grade in Grade::all() {
            if entry.grade < grade {
                sets[grade.index()].insert(entry.character);
            }
        }
    }
    sets
}

/// One reading per character, preferring kun over on, ties broken by the
/// reading text. The ordering is explicit here rather than inherited
/// from whatever the storage layer happens to emit.
fn build_fallback_map(
    kanji_entries: &[KanjiEntry],
    reading_entries: &[ReadingEntry],
) -> FxHashMap<char, String> {
    let characters: FxHashMap<KanjiId, char> =
        kanji_entries.iter().map(|k| (k.id, k.character)).collect();

    let mut candidates: Vec<&ReadingEntry> = reading_entries.iter().collect();
    candidates.sort_by(|a, b| {
        let rank = |r: &ReadingEntry| match r.kind {
            ReadingKind::Kun => 0u8,
            ReadingKind::On => 1,
        };
        rank(a).cmp(&rank(b)).then_with(|| a.reading.cmp(&b.reading))
    });

    let mut fallback = FxHashMap::default();
    for entry in candidates {
        if let Some(&character) = characters.get(&entry.kanji_id) {
            fallback
                .entry(character)
                .or_insert_with(|| strip_annotation(&entry.reading).to_string());
        }
    }
    fallback
}

/// Truncate a reading at the first parenthesized annotation.
pub fn strip_annotation(reading: &str) -> &str {
    match reading.find('(') {
        Some(pos) => &reading[..pos],
        None => reading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::reading::ReadingId;

    fn kanji(id: u64, character: char, grade: u8) -> KanjiEntry {
        KanjiEntry {
            id: KanjiId(id),
            character,
            grade: Grade::new(grade).unwrap(),
            introducing_unit: None,
        }
    }

    fn reading(id: u64, kanji_id: u64, kind: ReadingKind, text: &str) -> ReadingEntry {
        ReadingEntry {
            id: ReadingId(id),
            kanji_id: KanjiId(kanji_id),
            kind,
            reading: text.to_string(),
            okurigana: None,
        }
    }

    fn sample_curriculum() -> Vec<KanjiEntry> {
        vec![
            kanji(1, '山', 1),
            kanji(2, '川', 1),
            kanji(3, '読', 2),
            kanji(4, '遠', 2),
            kanji(5, '漢', 3),
        ]
    }

    #[test]
    fn grade_one_set_is_empty() {
        let index = VocabularyIndex::build(&sample_curriculum(), &[]);
        assert!(index.allowed_set(Grade::MIN).is_empty());
    }

    #[test]
    fn allowed_sets_are_monotonic() {
        let index = VocabularyIndex::build(&sample_curriculum(), &[]);
        let grades: Vec<Grade> = Grade::all().collect();
        for pair in grades.windows(2) {
            let smaller = index.allowed_set(pair[0]);
            let larger = index.allowed_set(pair[1]);
            assert!(smaller.is_subset(larger), "set for grade {} not ⊆ grade {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn allowed_means_strictly_earlier_grade() {
        let index = VocabularyIndex::build(&sample_curriculum(), &[]);
        let g2 = Grade::new(2).unwrap();
        let g3 = Grade::new(3).unwrap();
        assert!(index.is_allowed(g2, '山'));
        // Introduced in grade 2 itself, so not yet allowed at grade 2.
        assert!(!index.is_allowed(g2, '読'));
        assert!(index.is_allowed(g3, '読'));
        assert!(!index.is_allowed(g3, '漢'));
    }

    #[test]
    fn fallback_prefers_kun_over_on() {
        let readings = vec![
            reading(1, 3, ReadingKind::On, "どく"),
            reading(2, 3, ReadingKind::Kun, "よ"),
        ];
        let index = VocabularyIndex::build(&sample_curriculum(), &readings);
        assert_eq!(index.fallback_reading('読'), Some("よ"));
    }

    #[test]
    fn fallback_ties_break_on_reading_text() {
        let readings = vec![
            reading(1, 1, ReadingKind::Kun, "やま"),
            reading(2, 1, ReadingKind::Kun, "さん"),
        ];
        let index = VocabularyIndex::build(&sample_curriculum(), &readings);
        assert_eq!(index.fallback_reading('山'), Some("さん"));
    }

    #[test]
    fn fallback_strips_parenthesized_annotation() {
        let readings = vec![reading(1, 4, ReadingKind::Kun, "とお(い)")];
        let index = VocabularyIndex::build(&sample_curriculum(), &readings);
        assert_eq!(index.fallback_reading('遠'), Some("とお"));
    }

    #[test]
    fn kanji_without_readings_is_absent() {
        let index = VocabularyIndex::build(&sample_curriculum(), &[]);
        assert_eq!(index.fallback_reading('山'), None);
    }

    #[test]
    fn strip_annotation_cases() {
        assert_eq!(strip_annotation("とお(い)"), "とお");
        assert_eq!(strip_annotation("やま"), "やま");
        assert_eq!(strip_annotation("(い)"), "");
    }
}
