//! Sentence composition: okurigana splicing and grade-level kanji
//! substitution.

use crate::core::classifier::TemplateClass;
use crate::core::template::SentenceTemplate;
use crate::core::vocabulary::{strip_annotation, VocabularyIndex};
use crate::schema::kanji::Grade;
use crate::schema::reading::ReadingEntry;

/// The composed question fields plus substitution leftovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuestion {
    pub lead_text: String,
    pub target_kanji_text: String,
    pub target_reading: String,
    pub trail_text: String,
    /// Kanji left in place because no fallback reading was available.
    /// Reported to the operator as a statistic, never an error.
    pub unresolved: Vec<char>,
}

/// CJK unified ideograph check, same range the original sentence filter
/// used.
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9faf}').contains(&c)
}

/// Compose the question fields for one reading.
///
/// The target span itself is never rewritten, even for multi-character
/// compounds; only the surrounding lead and trail fragments go through
/// grade-level substitution.
pub fn compose(
    entry: &ReadingEntry,
    target_text: &str,
    class: TemplateClass,
    grade: Grade,
    template: &SentenceTemplate,
    vocabulary: &VocabularyIndex,
) -> ComposedQuestion {
    let target_reading = strip_annotation(&entry.reading).to_string();

    // Verb frames start mid-inflection; the okurigana bridges the blank
    // and the trail.
    let trail = if class == TemplateClass::VerbWithSuffix {
        match entry.okurigana.as_deref() {
            Some(okurigana) => format!("{}{}", okurigana, template.trail),
            None => template.trail.clone(),
        }
    } else {
        template.trail.clone()
    };

    let mut unresolved = Vec::new();
    let lead_text = rewrite_for_grade(&template.lead, grade, vocabulary, &mut unresolved);
    let trail_text = rewrite_for_grade(&trail, grade, vocabulary, &mut unresolved);

    ComposedQuestion {
        lead_text,
        target_kanji_text: target_text.to_string(),
        target_reading,
        trail_text,
        unresolved,
    }
}

/// Rewrite every ideograph above the grade's vocabulary into its
/// fallback reading. Ideographs with no fallback stay put and are
/// tallied; everything else passes through untouched.
pub fn rewrite_for_grade(
    text: &str,
    grade: Grade,
    vocabulary: &VocabularyIndex,
    unresolved: &mut Vec<char>,
) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_cjk_ideograph(c) || vocabulary.is_allowed(grade, c) {
            out.push(c);
        } else if let Some(reading) = vocabulary.fallback_reading(c) {
            out.push_str(reading);
        } else {
            unresolved.push(c);
            out.push(c);
        }
    }
    out
}
