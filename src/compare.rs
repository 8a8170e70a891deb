//! Pairwise comparison orchestration.
//!
//! This module runs the full pipeline between two documents: n-gram
//! interning, block alignment, healing, extension, size filtering and
//! reporting. Batches of file pairs are compared in parallel.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::align::align_ngrams;
use crate::document::{intern_ngrams, Document, DocumentError};
use crate::extend::extend_matches;
use crate::merge::heal_neighboring_matches;
use crate::models::*;
use crate::report::{coverage, report_matches};

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Compare two already-built documents.
pub fn compare_documents(
    doc_a: &Document,
    doc_b: &Document,
    params: &MatchParams,
) -> ComparisonResult {
    let show_progress = !params.silent;

    let (seq_a, seq_b) = intern_ngrams(doc_a, doc_b, params.ngram_size);
    if show_progress {
        eprintln!(
            "  {}: {} tokens, {} n-grams",
            doc_a.label(),
            doc_a.token_count(),
            seq_a.len()
        );
        eprintln!(
            "  {}: {} tokens, {} n-grams",
            doc_b.label(),
            doc_b.token_count(),
            seq_b.len()
        );
    }

    let blocks = align_ngrams(&seq_a, &seq_b, params);
    log::info!(
        "{} / {}: {} matching blocks above threshold",
        doc_a.label(),
        doc_b.label(),
        blocks.len()
    );

    let healed = heal_neighboring_matches(&blocks, params.min_distance);
    if healed.len() != blocks.len() {
        log::info!("healed {} blocks into {}", blocks.len(), healed.len());
    }

    let extended = extend_matches(
        healed,
        doc_a.tokens(),
        doc_b.tokens(),
        params.ngram_size,
        params.extension_cutoff,
    );

    let kept: Vec<ExtendedMatch> = extended
        .into_iter()
        .filter(|m| m.min_size() >= params.cutoff)
        .collect();

    let matches = report_matches(&kept, doc_a, doc_b, params);

    if show_progress {
        if matches.is_empty() {
            eprintln!("  No matches found.");
        } else {
            eprintln!("  {} total matches found.", matches.len());
        }
    }

    let locations_a: Vec<(usize, usize)> = matches.iter().map(|m| m.a.location).collect();
    let locations_b: Vec<(usize, usize)> = matches.iter().map(|m| m.b.location).collect();

    let summary = ComparisonSummary {
        match_count: matches.len(),
        coverage_a: coverage(&locations_a, doc_a.length()),
        coverage_b: coverage(&locations_b, doc_b.length()),
    };

    ComparisonResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: params.clone(),
        text_a: document_info(doc_a),
        text_b: document_info(doc_b),
        summary,
        matches,
    }
}

/// Compare two raw strings.
pub fn compare_texts(
    text_a: &str,
    label_a: &str,
    text_b: &str,
    label_b: &str,
    params: &MatchParams,
) -> Result<ComparisonResult, DocumentError> {
    let doc_a = Document::new(text_a, label_a, params.remove_stopwords)?;
    let doc_b = Document::new(text_b, label_b, params.remove_stopwords)?;
    Ok(compare_documents(&doc_a, &doc_b, params))
}

fn document_info(doc: &Document) -> DocumentInfo {
    DocumentInfo {
        label: doc.label().to_string(),
        length: doc.length(),
        token_count: doc.token_count(),
    }
}

/// Read a text file into a document labelled with its path.
///
/// Invalid UTF-8 is replaced rather than rejected; scanned and OCRed texts
/// often carry a few stray bytes.
pub fn load_document(path: &Path, remove_stopwords: bool) -> Result<Document, CompareError> {
    let bytes = std::fs::read(path).map_err(|source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(Document::new(&text, path.display().to_string(), remove_stopwords)?)
}

/// Compare two text files.
pub fn compare_files(
    path_a: &Path,
    path_b: &Path,
    params: &MatchParams,
) -> Result<ComparisonResult, CompareError> {
    let doc_a = load_document(path_a, params.remove_stopwords)?;
    let doc_b = load_document(path_b, params.remove_stopwords)?;
    Ok(compare_documents(&doc_a, &doc_b, params))
}

/// Result of comparing one file pair in a batch.
#[derive(Debug)]
pub struct PairOutcome {
    pub path_a: PathBuf,
    pub path_b: PathBuf,
    pub result: Result<ComparisonResult, CompareError>,
}

/// Batch comparison of many file pairs.
///
/// Pairs run in parallel and independently; a failing pair does not affect
/// the others. Outcomes come back in the order of `pairs`.
pub fn compare_file_pairs(
    pairs: &[(PathBuf, PathBuf)],
    params: &MatchParams,
    show_progress: bool,
) -> Vec<PairOutcome> {
    // Per-pair chatter would interleave across threads; the bar replaces it.
    let pair_params = MatchParams {
        silent: true,
        ..params.clone()
    };

    let progress = if show_progress {
        let pb = ProgressBar::new(pairs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({per_sec})")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let outcomes: Vec<PairOutcome> = pairs
        .par_iter()
        .map(|(path_a, path_b)| {
            let result = compare_files(path_a, path_b, &pair_params);

            if let Err(e) = &result {
                log::warn!(
                    "comparison of {} and {} failed: {}",
                    path_a.display(),
                    path_b.display(),
                    e
                );
            }
            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            PairOutcome {
                path_a: path_a.clone(),
                path_b: path_b.clone(),
                result,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    outcomes
}
