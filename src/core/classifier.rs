//! Sentence-frame classification for reading records.

use serde::{Deserialize, Serialize};

use crate::schema::reading::{ReadingEntry, ReadingKind};

/// The sentence-frame family a reading slots into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateClass {
    /// On readings, framed as school-subject style nouns.
    OnReading,
    /// Kun readings with an inflectional tail, framed as verbs.
    VerbWithSuffix,
    /// Plain kun readings, framed as nouns.
    Noun,
}

impl TemplateClass {
    pub const ALL: [TemplateClass; 3] = [
        TemplateClass::OnReading,
        TemplateClass::VerbWithSuffix,
        TemplateClass::Noun,
    ];

    /// Zero-based index for dense per-class tables.
    pub fn index(self) -> usize {
        match self {
            TemplateClass::OnReading => 0,
            TemplateClass::VerbWithSuffix => 1,
            TemplateClass::Noun => 2,
        }
    }

    /// Short label used in operator reports.
    pub fn label(self) -> &'static str {
        match self {
            TemplateClass::OnReading => "onyomi",
            TemplateClass::VerbWithSuffix => "verb",
            TemplateClass::Noun => "noun",
        }
    }
}

/// Decide which template family a reading belongs to.
///
/// On readings always take the on-reading frames; kun readings take the
/// verb frames exactly when they carry okurigana. Total, no failure
/// case.
pub fn classify(entry: &ReadingEntry) -> TemplateClass {
    match entry.kind {
        ReadingKind::On => TemplateClass::OnReading,
        ReadingKind::Kun if entry.has_okurigana() => TemplateClass::VerbWithSuffix,
        ReadingKind::Kun => TemplateClass::Noun,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::kanji::KanjiId;
    use crate::schema::reading::ReadingId;

    fn entry(kind: ReadingKind, okurigana: Option<&str>) -> ReadingEntry {
        ReadingEntry {
            id: ReadingId(1),
            kanji_id: KanjiId(1),
            kind,
            reading: "よ".to_string(),
            okurigana: okurigana.map(str::to_string),
        }
    }

    #[test]
    fn on_reading_wins_regardless_of_okurigana() {
        assert_eq!(classify(&entry(ReadingKind::On, None)), TemplateClass::OnReading);
        assert_eq!(
            classify(&entry(ReadingKind::On, Some("む"))),
            TemplateClass::OnReading
        );
    }

    #[test]
    fn kun_with_okurigana_is_verb() {
        assert_eq!(
            classify(&entry(ReadingKind::Kun, Some("む"))),
            TemplateClass::VerbWithSuffix
        );
    }

    #[test]
    fn kun_without_okurigana_is_noun() {
        assert_eq!(classify(&entry(ReadingKind::Kun, None)), TemplateClass::Noun);
        assert_eq!(classify(&entry(ReadingKind::Kun, Some(""))), TemplateClass::Noun);
    }

    #[test]
    fn class_indices_are_distinct() {
        let indices: Vec<usize> = TemplateClass::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
