//! Ingestion integration tests — fixture batches through the validation
//! boundary and on into generation.

use kanji_quiz_engine::core::generator::QuestionGenerator;
use kanji_quiz_engine::core::ingest::{self, RawReading, ValidationError};
use kanji_quiz_engine::schema::kanji::{Grade, KanjiEntry};
use kanji_quiz_engine::schema::unit::{UnitAssignment, UnitId};

fn load_fixtures() -> (Vec<KanjiEntry>, Vec<RawReading>) {
    let curriculum = std::fs::read_to_string("tests/fixtures/test_curriculum.ron").unwrap();
    let readings = std::fs::read_to_string("tests/fixtures/test_raw_readings.ron").unwrap();
    (
        ron::from_str(&curriculum).unwrap(),
        ron::from_str(&readings).unwrap(),
    )
}

#[test]
fn fixture_batch_splits_into_accepted_and_skipped() {
    let (curriculum, candidates) = load_fixtures();
    let report = ingest::ingest_readings(&curriculum, &candidates);

    assert_eq!(report.readings.len(), 10);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].error, ValidationError::UnknownKanji('鬱'));
    assert!(matches!(
        report.skipped[1].error,
        ValidationError::ReadingNotHiragana(_)
    ));
    // Sequential IDs over the survivors only.
    for (n, entry) in report.readings.iter().enumerate() {
        assert_eq!(entry.id.0, n as u64 + 1);
    }
}

#[test]
fn fixture_batch_tallies_per_grade() {
    let (curriculum, candidates) = load_fixtures();
    let report = ingest::ingest_readings(&curriculum, &candidates);

    let g1 = report.per_grade[Grade::new(1).unwrap().index()];
    assert_eq!((g1.on, g1.kun), (1, 3));
    let g2 = report.per_grade[Grade::new(2).unwrap().index()];
    assert_eq!((g2.on, g2.kun), (2, 3));
    let g3 = report.per_grade[Grade::new(3).unwrap().index()];
    assert_eq!((g3.on, g3.kun), (1, 0));
    assert!(report.kanji_without_readings.is_empty());
}

#[test]
fn ingested_batch_feeds_generation_one_to_one() {
    let (curriculum, candidates) = load_fixtures();
    let report = ingest::ingest_readings(&curriculum, &candidates);

    let mut units = UnitAssignment::new();
    for grade in Grade::all() {
        units.assign(grade, UnitId(grade.value() as u64));
    }

    let run = QuestionGenerator::with_builtin_catalog()
        .unwrap()
        .generate(&curriculum, &report.readings, &units)
        .unwrap();

    // One question per accepted reading, none skipped downstream.
    assert_eq!(run.questions.len(), report.readings.len());
    assert_eq!(run.stats.skipped_readings, 0);
    for question in &run.questions {
        assert!(question.source_reading_id.is_some());
        assert!(!question.target_reading.is_empty());
    }
}

#[test]
fn normalization_recovers_dictionary_notation() {
    let (curriculum, _) = load_fixtures();
    let raw = vec![
        RawReading {
            kanji: "食".to_string(),
            kind: kanji_quiz_engine::schema::reading::ReadingKind::Kun,
            reading: "た.べる".to_string(),
            okurigana: None,
        },
        RawReading {
            kanji: "食".to_string(),
            kind: kanji_quiz_engine::schema::reading::ReadingKind::On,
            reading: "ショク".to_string(),
            okurigana: None,
        },
    ];

    // Raw, both fail validation: the dot is not hiragana, katakana is
    // not hiragana.
    let strict = ingest::ingest_readings(&curriculum, &raw);
    assert_eq!(strict.readings.len(), 0);

    let normalized: Vec<RawReading> = raw.iter().map(ingest::normalize).collect();
    let report = ingest::ingest_readings(&curriculum, &normalized);
    assert_eq!(report.readings.len(), 2);
    assert_eq!(report.readings[0].reading, "た");
    assert_eq!(report.readings[0].okurigana.as_deref(), Some("べる"));
    assert_eq!(report.readings[1].reading, "しょく");
}
