//! A tokenized document, the unit of comparison.

use std::collections::HashMap;
use thiserror::Error;

use crate::tokenize::{heal_hyphenation, tokenize};

/// Separator placed between pages when a document arrives as a page list.
pub const PAGE_SEPARATOR: &str = " \n ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("text '{label}' contains no extractable tokens")]
    EmptyText { label: String },
}

/// One text's tokens and spans.
///
/// Immutable after construction. Matches refer back into a document by
/// n-gram index and never copy text out of it.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    label: String,
    tokens: Vec<String>,
    spans: Vec<(usize, usize)>,
    length: usize,
}

impl Document {
    /// Build a document from a single string.
    pub fn new(
        raw_text: &str,
        label: impl Into<String>,
        remove_stopwords: bool,
    ) -> Result<Self, DocumentError> {
        let label = label.into();
        let text = heal_hyphenation(raw_text);
        let tokenized = match tokenize(&text, remove_stopwords) {
            Some(t) => t,
            None => return Err(DocumentError::EmptyText { label }),
        };

        Ok(Document {
            text,
            label,
            tokens: tokenized.tokens,
            spans: tokenized.spans,
            length: tokenized.length,
        })
    }

    /// Build a document from an ordered list of pages.
    pub fn from_pages<S: AsRef<str>>(
        pages: &[S],
        label: impl Into<String>,
        remove_stopwords: bool,
    ) -> Result<Self, DocumentError> {
        let joined = pages
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);
        Self::new(&joined, label, remove_stopwords)
    }

    /// Text after hyphenation healing. Spans index into this string.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn spans(&self) -> &[(usize, usize)] {
        &self.spans
    }

    /// End offset of the last token span.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// N-gram `i` is `tokens[i..i + n]`. Empty when `n` is zero or exceeds the token count.
    pub fn ngrams(&self, n: usize) -> Vec<&[String]> {
        if n == 0 {
            return Vec::new();
        }
        self.tokens.windows(n).collect()
    }

    pub fn ngram_count(&self, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            (self.tokens.len() + 1).saturating_sub(n)
        }
    }

    /// Source text covered by tokens `start..end`, from the first span's start
    /// to the last span's end. Empty when the range is empty or out of bounds.
    pub fn passage(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.spans.len());
        if start >= end {
            return "";
        }
        &self.text[self.spans[start].0..self.spans[end - 1].1]
    }
}

/// Map the n-grams of two documents to shared integer ids.
///
/// Two ids are equal exactly when the word tuples are equal, so the aligner
/// can work on `u32` sequences.
pub fn intern_ngrams(doc_a: &Document, doc_b: &Document, n: usize) -> (Vec<u32>, Vec<u32>) {
    let grams_a = doc_a.ngrams(n);
    let grams_b = doc_b.ngrams(n);

    let mut ids: HashMap<&[String], u32> = HashMap::with_capacity(grams_a.len() + grams_b.len());
    let mut seq_a = Vec::with_capacity(grams_a.len());
    let mut seq_b = Vec::with_capacity(grams_b.len());

    for (grams, seq) in [(&grams_a, &mut seq_a), (&grams_b, &mut seq_b)] {
        for &gram in grams.iter() {
            let next = ids.len() as u32;
            seq.push(*ids.entry(gram).or_insert(next));
        }
    }

    (seq_a, seq_b)
}
