//! Mapping matches back to source text.
//!
//! Matches are counted in n-grams; a match of `size` n-grams covers
//! `size + ngram_size - 1` tokens. Token spans give character ranges in the
//! document text, from which locations and context passages are cut.

use thiserror::Error;

use crate::document::Document;
use crate::models::{ExtendedMatch, MatchParams, MatchReport, PassageRef, PassageText};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("match in '{label}' starting at token {start} with {len} tokens exceeds {spans} spans")]
    IndexOutOfRange {
        label: String,
        start: usize,
        len: usize,
        spans: usize,
    },
}

/// Number of tokens covered by a match of `size` n-grams.
#[inline]
pub fn token_length(size: usize, ngram_size: usize) -> usize {
    (size + ngram_size).saturating_sub(1)
}

/// Locate a match of `size` n-grams starting at n-gram `start` in `doc`.
pub fn passage_ref(
    doc: &Document,
    start: usize,
    size: usize,
    ngram_size: usize,
    context_tokens: usize,
) -> Result<PassageRef, ReportError> {
    let spans = doc.spans();
    let len = token_length(size, ngram_size);
    let end = start + len;

    if len == 0 || end > spans.len() {
        return Err(ReportError::IndexOutOfRange {
            label: doc.label().to_string(),
            start,
            len,
            spans: spans.len(),
        });
    }

    let location = (spans[start].0, spans[end - 1].1);
    let relative = if doc.length() == 0 {
        (0.0, 0.0)
    } else {
        let length = doc.length() as f64;
        (location.0 as f64 / length, location.1 as f64 / length)
    };

    let text = PassageText {
        before: doc
            .passage(start.saturating_sub(context_tokens), start)
            .to_string(),
        matched: doc.passage(start, end).to_string(),
        after: doc
            .passage(end, end.saturating_add(context_tokens))
            .to_string(),
    };

    Ok(PassageRef {
        label: doc.label().to_string(),
        location,
        relative,
        token_range: (start, end),
        text,
    })
}

/// Build reports for every match that maps cleanly onto both documents.
///
/// A match whose window falls outside either document is logged and skipped.
/// Ids count from 1 over the reports actually produced.
pub fn report_matches(
    matches: &[ExtendedMatch],
    doc_a: &Document,
    doc_b: &Document,
    params: &MatchParams,
) -> Vec<MatchReport> {
    let mut reports = Vec::with_capacity(matches.len());

    for m in matches {
        let refs = passage_ref(doc_a, m.a, m.size_a, params.ngram_size, params.context_tokens).and_then(
            |a| {
                passage_ref(doc_b, m.b, m.size_b, params.ngram_size, params.context_tokens)
                    .map(|b| (a, b))
            },
        );

        match refs {
            Ok((a, b)) => reports.push(MatchReport {
                id: reports.len() + 1,
                a,
                b,
                size_a: m.size_a,
                size_b: m.size_b,
                origin: m.origin,
                extended_backwards: m.extended_backwards,
                extended_forwards: m.extended_forwards,
            }),
            Err(e) => log::warn!("skipping match: {}", e),
        }
    }

    reports
}

/// Fraction of `length` covered by the union of `ranges`.
pub fn coverage(ranges: &[(usize, usize)], length: usize) -> f64 {
    if length == 0 {
        return 0.0;
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.0);
    let covered: usize = merge_ranges(&sorted).iter().map(|(s, e)| e - s).sum();

    (covered as f64 / length as f64).min(1.0)
}

/// Merge sorted, possibly overlapping ranges into disjoint ones.
pub fn merge_ranges(ranges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let Some(&first) = ranges.first() else {
        return Vec::new();
    };

    let mut merged: Vec<(usize, usize)> = Vec::new();
    let mut current = first;

    for &(start, end) in &ranges[1..] {
        if start <= current.1 {
            current.1 = current.1.max(end);
        } else {
            merged.push(current);
            current = (start, end);
        }
    }
    merged.push(current);

    merged
}
