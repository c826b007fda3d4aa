//! Question Generator — builds the full auto-generated question set for
//! a curriculum.
//!
//! Usage: question_generator --curriculum <kanji.ron> --readings <readings.ron>
//!        --output <questions.ron> [--templates <ron>] [--units <units.ron>]
//!
//! Without --units, grade n is assigned unit id n following the
//! reading-unit convention; the storage collaborator is expected to
//! create the matching units before inserting.

use kanji_quiz_engine::core::generator::QuestionGenerator;
use kanji_quiz_engine::core::template::TemplateBank;
use kanji_quiz_engine::schema::kanji::{Grade, KanjiEntry};
use kanji_quiz_engine::schema::reading::ReadingEntry;
use kanji_quiz_engine::schema::unit::{reading_unit_name, Unit, UnitAssignment, UnitId};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut curriculum_path = None;
    let mut readings_path = None;
    let mut output_path = None;
    let mut templates_path = None;
    let mut units_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--curriculum" if i + 1 < args.len() => {
                i += 1;
                curriculum_path = Some(args[i].clone());
            }
            "--readings" if i + 1 < args.len() => {
                i += 1;
                readings_path = Some(args[i].clone());
            }
            "--output" if i + 1 < args.len() => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--templates" if i + 1 < args.len() => {
                i += 1;
                templates_path = Some(args[i].clone());
            }
            "--units" if i + 1 < args.len() => {
                i += 1;
                units_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let curriculum_path = require(curriculum_path, "--curriculum");
    let readings_path = require(readings_path, "--readings");
    let output_path = require(output_path, "--output");

    let curriculum: Vec<KanjiEntry> = load_ron(&curriculum_path);
    let readings: Vec<ReadingEntry> = load_ron(&readings_path);
    println!(
        "Curriculum: {} kanji, {} readings",
        curriculum.len(),
        readings.len()
    );

    let bank = match templates_path {
        Some(path) => match TemplateBank::load_from_ron(Path::new(&path)) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("ERROR: failed to load templates: {}", e);
                process::exit(1);
            }
        },
        None => match TemplateBank::builtin() {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("ERROR: builtin catalog failed validation: {}", e);
                process::exit(1);
            }
        },
    };

    let units = match units_path {
        Some(path) => {
            let unit_list: Vec<Unit> = load_ron(&path);
            UnitAssignment::from_units(&unit_list)
        }
        None => {
            let mut assignment = UnitAssignment::new();
            for grade in Grade::all() {
                assignment.assign(grade, UnitId(grade.value() as u64));
                println!(
                    "  grade {}: unit {} ({})",
                    grade,
                    grade.value(),
                    reading_unit_name(grade)
                );
            }
            assignment
        }
    };

    let run = match QuestionGenerator::new(bank).generate(&curriculum, &readings, &units) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("ERROR: generation failed: {}", e);
            process::exit(1);
        }
    };

    let serialized = match ron::ser::to_string_pretty(&run.questions, Default::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: failed to serialize output: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&output_path, serialized) {
        eprintln!("ERROR: failed to write {}: {}", output_path, e);
        process::exit(1);
    }

    println!("\n=== Generation Report ===\n");
    println!("Total questions: {}", run.stats.total_questions());
    for grade in Grade::all() {
        println!("  grade {}: {}", grade, run.stats.questions_for(grade));
    }

    if run.stats.skipped_readings > 0 {
        println!(
            "\nWARNING: {} readings referenced kanji outside the curriculum and were skipped",
            run.stats.skipped_readings
        );
    }
    if run.stats.unresolved > 0 {
        let characters: String = run.stats.unresolved_chars.iter().collect();
        println!(
            "\n{} kanji occurrences had no fallback reading and were left in place: {}",
            run.stats.unresolved, characters
        );
    }

    // A few samples per grade, the way the quiz shows them.
    println!("\n=== Samples ===");
    for grade in Grade::all() {
        let unit_id = match units.unit_for(grade) {
            Some(id) => id,
            None => continue,
        };
        let samples: Vec<_> = run
            .questions
            .iter()
            .filter(|q| q.unit_id == unit_id)
            .take(5)
            .collect();
        if samples.is_empty() {
            continue;
        }
        println!("\n[grade {}]", grade);
        for (n, question) in samples.iter().enumerate() {
            println!(
                "  {}. {} → {}",
                n + 1,
                question.display_text(),
                question.target_reading
            );
        }
    }

    println!("\nWrote {}", output_path);
}

fn require(value: Option<String>, flag: &str) -> String {
    value.unwrap_or_else(|| {
        eprintln!("Error: {} is required", flag);
        print_usage();
        process::exit(1);
    })
}

fn load_ron<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to read {}: {}", path, e);
        process::exit(1);
    });
    ron::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to parse {}: {}", path, e);
        process::exit(1);
    })
}

fn print_usage() {
    println!(
        "Usage: question_generator --curriculum <kanji.ron> --readings <readings.ron> --output <questions.ron> [--templates <ron>] [--units <units.ron>]"
    );
}
