//! Template Linter — validates the sentence-template catalog.
//!
//! Usage: template_linter <templates.ron | builtin>
//!        [--curriculum <kanji.ron> --readings <readings.ron>]
//!
//! Coverage gaps are errors; short template lists and fragments whose
//! kanji can neither be shown nor rewritten at their grade are warnings.

use kanji_quiz_engine::core::classifier::TemplateClass;
use kanji_quiz_engine::core::composer::is_cjk_ideograph;
use kanji_quiz_engine::core::template::{TemplateBank, TemplateGroup};
use kanji_quiz_engine::core::vocabulary::VocabularyIndex;
use kanji_quiz_engine::schema::kanji::{Grade, KanjiEntry};
use kanji_quiz_engine::schema::reading::ReadingEntry;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!(
            "Usage: template_linter <templates.ron | builtin> [--curriculum <kanji.ron> --readings <readings.ron>]"
        );
        process::exit(0);
    }

    let catalog_arg = &args[1];
    let mut curriculum_path = None;
    let mut readings_path = None;

    let mut i = 2;
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
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let contents = if catalog_arg == "builtin" {
        include_str!("../data/templates.ron").to_string()
    } else {
        match std::fs::read_to_string(catalog_arg) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("ERROR: failed to read {}: {}", catalog_arg, e);
                process::exit(1);
            }
        }
    };

    let groups: Vec<TemplateGroup> = match ron::from_str(&contents) {
        Ok(groups) => groups,
        Err(e) => {
            eprintln!("ERROR: failed to parse catalog: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} template groups", groups.len());

    let vocabulary = match (curriculum_path, readings_path) {
        (Some(kanji_path), Some(readings_path)) => {
            let curriculum: Vec<KanjiEntry> = load_ron(&kanji_path);
            let readings: Vec<ReadingEntry> = load_ron(&readings_path);
            println!(
                "Checking fragments against {} kanji, {} readings",
                curriculum.len(),
                readings.len()
            );
            Some(VocabularyIndex::build(&curriculum, &readings))
        }
        (None, None) => None,
        _ => {
            eprintln!("ERROR: --curriculum and --readings must be given together");
            process::exit(1);
        }
    };

    let (errors, warnings) = lint_catalog(&groups, vocabulary.as_ref());

    println!("\n=== Template Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(
    groups: &[TemplateGroup],
    vocabulary: Option<&VocabularyIndex>,
) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Coverage: every (class, grade) pair needs at least one template.
    for class in TemplateClass::ALL {
        for grade in Grade::all() {
            let count: usize = groups
                .iter()
                .filter(|g| g.class == class && g.grade == grade)
                .map(|g| g.templates.len())
                .sum();
            if count == 0 {
                errors.push(format!(
                    "no templates for class '{}', grade {}",
                    class.label(),
                    grade
                ));
            } else if count < 3 {
                warnings.push(format!(
                    "class '{}', grade {} has only {} templates (minimum 3 recommended)",
                    class.label(),
                    grade,
                    count
                ));
            }
        }
    }

    // Fragment quality: a kanji the grade cannot read and cannot
    // rewrite will be left unresolved in every generated question.
    if let Some(vocabulary) = vocabulary {
        for group in groups {
            for (n, template) in group.templates.iter().enumerate() {
                for fragment in [&template.lead, &template.trail] {
                    for c in fragment.chars().filter(|&c| is_cjk_ideograph(c)) {
                        if !vocabulary.is_allowed(group.grade, c)
                            && vocabulary.fallback_reading(c).is_none()
                        {
                            warnings.push(format!(
                                "class '{}', grade {}, template {}: '{}' has no fallback reading and will stay unresolved",
                                group.class.label(),
                                group.grade,
                                n + 1,
                                c
                            ));
                        }
                    }
                }
            }
        }
    }

    // A confirming parse: catches anything the checks above missed.
    if errors.is_empty() {
        if let Err(e) = TemplateBank::from_groups(groups.to_vec()) {
            errors.push(format!("catalog failed validation: {}", e));
        }
    }

    (errors, warnings)
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
