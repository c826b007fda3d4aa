//! Kanji Quiz Engine — grade-constrained question generation for kanji
//! reading drills.
//!
//! Turns curriculum records into fill-in-the-blank reading questions,
//! wrapping each target kanji in a fixed sentence frame and rewriting
//! every other kanji in the sentence to hiragana unless the student's
//! grade has already learned it.

pub mod core;
pub mod schema;
