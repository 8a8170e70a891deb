//! Output formatting for comparison results (JSON, CSV, console).

use crate::models::{ComparisonResult, MatchOrigin, MatchReport, PassageRef};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write comparison result as JSON.
pub fn write_json<W: Write>(result: &ComparisonResult, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write comparison result as JSON to a file.
pub fn write_json_file(result: &ComparisonResult, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(result, &mut file)
}

/// Quote a CSV field, doubling any inner quotes.
pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Write matches as CSV, one row per match with both passages.
pub fn write_csv<W: Write>(matches: &[MatchReport], writer: &mut W) -> Result<(), OutputError> {
    writeln!(
        writer,
        "id,label_a,start_a,end_a,size_a,text_a,label_b,start_b,end_b,size_b,text_b,\
         origin,extended_backwards,extended_forwards"
    )?;

    for m in matches {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            m.id,
            quote_field(&m.a.label),
            m.a.location.0,
            m.a.location.1,
            m.size_a,
            quote_field(&m.a.text.matched),
            quote_field(&m.b.label),
            m.b.location.0,
            m.b.location.1,
            m.size_b,
            quote_field(&m.b.text.matched),
            origin_name(m.origin),
            m.extended_backwards,
            m.extended_forwards
        )?;
    }

    Ok(())
}

fn origin_name(origin: MatchOrigin) -> &'static str {
    match origin {
        MatchOrigin::Raw => "raw",
        MatchOrigin::Healed => "healed",
    }
}

/// Write matches as CSV to a file.
pub fn write_csv_file(matches: &[MatchReport], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(matches, &mut file)
}

/// Render locations as `[(s, e), (s, e)]`.
pub fn format_locations(locations: &[(usize, usize)]) -> String {
    let inner: Vec<String> = locations
        .iter()
        .map(|(s, e)| format!("({}, {})", s, e))
        .collect();
    format!("[{}]", inner.join(", "))
}

fn format_passage(passage: &PassageRef) -> String {
    format!(
        "{}: ({}, {}) {}",
        passage.label,
        passage.location.0,
        passage.location.1,
        passage.text.context()
    )
}

/// Format a match as a human-readable string.
pub fn format_match(m: &MatchReport) -> String {
    format!(
        "match {}:\n{}\n{}",
        m.id,
        format_passage(&m.a),
        format_passage(&m.b)
    )
}

/// Print matches in a human-readable format.
pub fn print_matches(matches: &[MatchReport], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &matches[..n.min(matches.len())],
        None => matches,
    };

    for m in to_print {
        println!("\n{}", format_match(m));
    }

    if let Some(n) = limit {
        if matches.len() > n {
            println!("... and {} more matches", matches.len() - n);
        }
    }
}

/// Write a summary report to stdout.
pub fn print_summary(result: &ComparisonResult) {
    println!("\n=== Comparison Summary ===");
    println!("Version: {}", result.version);
    println!();
    println!(
        "Text A: {} ({} tokens, {} chars)",
        result.text_a.label, result.text_a.token_count, result.text_a.length
    );
    println!(
        "Text B: {} ({} tokens, {} chars)",
        result.text_b.label, result.text_b.token_count, result.text_b.length
    );
    println!();
    println!("Parameters:");
    println!("  Threshold: {}", result.parameters.threshold);
    println!("  N-gram size: {}", result.parameters.ngram_size);
    println!("  Cutoff: {}", result.parameters.cutoff);
    println!("  Min distance: {}", result.parameters.min_distance);
    println!("  Extension cutoff: {:.2}", result.parameters.extension_cutoff);
    println!("  Remove stopwords: {}", result.parameters.remove_stopwords);
    println!();
    println!("Results:");
    println!("  Matches found: {}", result.summary.match_count);
    println!("  Text A coverage: {:.1}%", result.summary.coverage_a * 100.0);
    println!("  Text B coverage: {:.1}%", result.summary.coverage_b * 100.0);
}
