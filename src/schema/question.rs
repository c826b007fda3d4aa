use serde::{Deserialize, Serialize};

use super::reading::ReadingId;
use super::unit::UnitId;

/// A fill-in-the-blank reading question, ready for bulk insert.
///
/// The storage collaborator assigns the persistent question ID on
/// insert. Generated records carry a back-reference to the reading they
/// were derived from; manually curated questions do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub unit_id: UnitId,
    pub lead_text: String,
    /// The literal kanji span being tested. Usually one character, but
    /// curated records may hold a compound word.
    pub target_kanji_text: String,
    pub target_reading: String,
    pub trail_text: String,
    #[serde(default)]
    pub source_reading_id: Option<ReadingId>,
}

impl QuestionRecord {
    /// Render the sentence the way the quiz UI shows it.
    pub fn display_text(&self) -> String {
        format!(
            "{}【{}】{}",
            self.lead_text, self.target_kanji_text, self.trail_text
        )
    }
}
