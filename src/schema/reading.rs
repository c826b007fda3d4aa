use serde::{Deserialize, Serialize};

use super::kanji::KanjiId;

/// Newtype wrapper for reading IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReadingId(pub u64);

/// Whether a reading derives from the historical Chinese pronunciation
/// (on) or is a native Japanese reading (kun).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingKind {
    On,
    Kun,
}

impl ReadingKind {
    pub fn is_on(self) -> bool {
        matches!(self, ReadingKind::On)
    }

    /// Short label used in operator reports.
    pub fn label(self) -> &'static str {
        match self {
            ReadingKind::On => "on",
            ReadingKind::Kun => "kun",
        }
    }
}

/// One reading of a curriculum kanji.
///
/// `reading` and `okurigana` are hiragana-only (elongation mark
/// permitted in the reading); the ingestion boundary enforces this, the
/// core assumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub id: ReadingId,
    pub kanji_id: KanjiId,
    pub kind: ReadingKind,
    pub reading: String,
    /// Inflectional tail, present only for kun readings that carry one.
    #[serde(default)]
    pub okurigana: Option<String>,
}

impl ReadingEntry {
    /// True for kun readings with a non-empty inflectional tail.
    pub fn has_okurigana(&self) -> bool {
        self.okurigana.as_deref().is_some_and(|o| !o.is_empty())
    }
}
