//! Reading Importer — validates parsed dictionary readings against the
//! curriculum and writes the accepted entries.
//!
//! Usage: reading_importer --curriculum <kanji.ron> --readings <raw.ron>
//!        --output <readings.ron> [--normalize]

use kanji_quiz_engine::core::ingest::{self, RawReading};
use kanji_quiz_engine::schema::kanji::{Grade, KanjiEntry};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut curriculum_path = None;
    let mut readings_path = None;
    let mut output_path = None;
    let mut normalize = false;

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
            "--normalize" => {
                normalize = true;
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

    let curriculum_path = curriculum_path.unwrap_or_else(|| {
        eprintln!("Error: --curriculum is required");
        print_usage();
        process::exit(1);
    });
    let readings_path = readings_path.unwrap_or_else(|| {
        eprintln!("Error: --readings is required");
        print_usage();
        process::exit(1);
    });
    let output_path = output_path.unwrap_or_else(|| {
        eprintln!("Error: --output is required");
        print_usage();
        process::exit(1);
    });

    let curriculum: Vec<KanjiEntry> = load_ron(&curriculum_path);
    println!("Curriculum: {} kanji", curriculum.len());

    let mut candidates: Vec<RawReading> = load_ron(&readings_path);
    println!("Candidates: {} readings", candidates.len());

    if normalize {
        candidates = candidates.iter().map(ingest::normalize).collect();
    }

    let report = ingest::ingest_readings(&curriculum, &candidates);

    let serialized = match ron::ser::to_string_pretty(&report.readings, Default::default()) {
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

    println!("\n=== Import Report ===\n");
    println!("Accepted: {}", report.readings.len());
    println!("Skipped:  {}", report.skipped.len());

    println!("\nPer grade:");
    for grade in Grade::all() {
        let tally = report.per_grade[grade.index()];
        if tally.total() > 0 {
            println!(
                "  grade {}: {} on, {} kun ({} total)",
                grade,
                tally.on,
                tally.kun,
                tally.total()
            );
        }
    }

    if !report.kanji_without_readings.is_empty() {
        println!(
            "\nWARNING: {} kanji have no accepted readings:",
            report.kanji_without_readings.len()
        );
        for grade in Grade::all() {
            let characters: String = report
                .kanji_without_readings
                .iter()
                .filter(|&&(_, g)| g == grade)
                .map(|&(c, _)| c)
                .collect();
            if !characters.is_empty() {
                println!("  grade {}: {}", grade, characters);
            }
        }
    }

    if !report.skipped.is_empty() {
        println!("\nFirst validation errors:");
        for skipped in report.skipped.iter().take(10) {
            println!("  candidate {}: {}", skipped.index + 1, skipped.error);
        }
        if report.skipped.len() > 10 {
            println!("  ... and {} more", report.skipped.len() - 10);
        }
    }

    println!("\nWrote {}", output_path);
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
        "Usage: reading_importer --curriculum <kanji.ron> --readings <raw.ron> --output <readings.ron> [--normalize]"
    );
}
