//! Printing lookup results and failures.

use super::Style;
use crate::translation::{LookupError, TranslationResult};

/// Prints a lookup result to stdout.
///
/// The localized definition always comes first; `full` adds everything else.
pub fn print_result(result: &TranslationResult, full: bool) {
    if !full {
        println!("{}", result.localized_definition);
        return;
    }

    let heading = result.pronunciation.as_ref().map_or_else(
        || Style::subject(&result.subject),
        |p| format!("{}  {}", Style::subject(&result.subject), Style::secondary(p)),
    );
    println!("{heading}  {}", Style::hint(result.kind));
    println!();
    println!("  {}", Style::value(&result.localized_definition));
    println!("  {}", result.definition);

    if let Some(acronym) = &result.acronym_expansion {
        println!("  {} {acronym}", Style::label("acronym for"));
    }

    if !result.examples.is_empty() {
        println!();
        println!("{}", Style::header("Examples"));
        for example in &result.examples {
            println!("  - {example}");
        }
    }

    if !result.synonyms.is_empty() {
        println!();
        println!(
            "{} {}",
            Style::header("Synonyms"),
            result.synonyms.join(", ")
        );
    }
}

/// Prints a failed lookup to stderr, with the raw model reply when there is one.
pub fn print_error(error: &LookupError) {
    eprintln!("{} {error}", Style::error("Error:"));

    if let Some(raw) = error.raw_reply() {
        eprintln!();
        eprintln!("{}", Style::label("Model reply:"));
        eprintln!("{raw}");
    }
}

/// Shows only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
