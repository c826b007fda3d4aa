//! Generation demo — a six-kanji curriculum through the full pipeline.
//!
//! Dictionary tuples are normalized and validated, then every accepted
//! reading becomes one question against the builtin template catalog.
//!
//! Run with: cargo run --example generate_demo

use kanji_quiz_engine::core::generator::QuestionGenerator;
use kanji_quiz_engine::core::ingest::{self, RawReading};
use kanji_quiz_engine::schema::kanji::{Grade, KanjiEntry, KanjiId};
use kanji_quiz_engine::schema::reading::ReadingKind;
use kanji_quiz_engine::schema::unit::{reading_unit_name, UnitAssignment, UnitId};

fn main() {
    // --- A small curriculum: four grade-1 kanji, two grade-2 ---
    let curriculum = vec![
        kanji(1, '山', 1),
        kanji(2, '川', 1),
        kanji(3, '木', 1),
        kanji(4, '見', 1),
        kanji(5, '読', 2),
        kanji(6, '食', 2),
    ];

    // --- Dictionary-side tuples, as the extractor hands them over ---
    let raw = vec![
        candidate("山", ReadingKind::Kun, "やま"),
        candidate("山", ReadingKind::On, "サン"),
        candidate("川", ReadingKind::Kun, "かわ"),
        candidate("木", ReadingKind::Kun, "き"),
        candidate("見", ReadingKind::Kun, "み.る"),
        candidate("読", ReadingKind::Kun, "よ.む"),
        candidate("読", ReadingKind::On, "ドク"),
        candidate("食", ReadingKind::Kun, "た.べる"),
        candidate("食", ReadingKind::On, "ショク"),
    ];
    let normalized: Vec<RawReading> = raw.iter().map(ingest::normalize).collect();

    let report = ingest::ingest_readings(&curriculum, &normalized);
    println!(
        "Ingested {} readings ({} skipped)",
        report.readings.len(),
        report.skipped.len()
    );

    // --- One destination unit per grade ---
    let mut units = UnitAssignment::new();
    for grade in Grade::all() {
        units.assign(grade, UnitId(grade.value() as u64));
    }

    let generator =
        QuestionGenerator::with_builtin_catalog().expect("builtin catalog failed validation");
    let run = generator
        .generate(&curriculum, &report.readings, &units)
        .expect("generation failed");

    println!("Generated {} questions\n", run.stats.total_questions());
    for grade in Grade::all() {
        if run.stats.questions_for(grade) == 0 {
            continue;
        }
        println!("[grade {}: {}]", grade, reading_unit_name(grade));
        let unit_id = units.unit_for(grade).expect("unit assigned above");
        for question in run.questions.iter().filter(|q| q.unit_id == unit_id) {
            println!("  {} → {}", question.display_text(), question.target_reading);
        }
        println!();
    }

    if run.stats.unresolved > 0 {
        let characters: String = run.stats.unresolved_chars.iter().collect();
        println!("Unresolved kanji left for manual review: {}", characters);
    }
}

fn kanji(id: u64, character: char, grade: u8) -> KanjiEntry {
    KanjiEntry {
        id: KanjiId(id),
        character,
        grade: Grade::new(grade).expect("demo grades are in range"),
        introducing_unit: None,
    }
}

fn candidate(kanji: &str, kind: ReadingKind, reading: &str) -> RawReading {
    RawReading {
        kanji: kanji.to_string(),
        kind,
        reading: reading.to_string(),
        okurigana: None,
    }
}
