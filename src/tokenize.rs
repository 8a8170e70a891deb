//! Tokenization with span tracking.
//!
//! Turns raw text into normalized word tokens, each tied to the byte range it
//! occupies in the source. Spans are recorded before stopword filtering and
//! carried through it, so `tokens[i]` always comes from `text[spans[i].0..spans[i].1]`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stem::stem;
use crate::stopwords::is_stopword;

/// A letter, at least one more word character, and an optional internal apostrophe.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]\w+'?\w*").expect("word pattern is valid"));

/// A word broken across a line (or a stray space) by a hyphen: `exam-\nple`.
static HYPHEN_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z])-(?: |\r?\n)([a-z])").expect("hyphen pattern is valid")
});

/// Tokenizer output.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    pub spans: Vec<(usize, usize)>,
    /// End offset of the last extracted span, before stopword filtering.
    pub length: usize,
}

/// Rejoin words split by hyphenation at a line or space break.
pub fn heal_hyphenation(text: &str) -> String {
    HYPHEN_BREAK.replace_all(text, "$1$2").into_owned()
}

/// Spans of every word-like token in `text`.
pub fn span_tokenize(text: &str) -> Vec<(usize, usize)> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Tokenize already-healed text.
///
/// Returns `None` when the text contains no extractable tokens.
pub fn tokenize(text: &str, remove_stopwords: bool) -> Option<Tokenized> {
    let all_spans = span_tokenize(text);
    let length = all_spans.last()?.1;

    let mut tokens = Vec::with_capacity(all_spans.len());
    let mut spans = Vec::with_capacity(all_spans.len());

    for (start, end) in all_spans {
        let lowered = text[start..end].to_lowercase();
        if remove_stopwords && is_stopword(&lowered) {
            continue;
        }
        tokens.push(stem(&lowered));
        spans.push((start, end));
    }

    Some(Tokenized {
        tokens,
        spans,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_hyphenation() {
        assert_eq!(heal_hyphenation("exam- ple"), "example");
        assert_eq!(heal_hyphenation("exam-\nple"), "example");
        assert_eq!(heal_hyphenation("exam-\r\nple"), "example");
        // Real compounds and capitalized continuations are left alone.
        assert_eq!(heal_hyphenation("well-known"), "well-known");
        assert_eq!(heal_hyphenation("North- America"), "North- America");
    }

    #[test]
    fn test_span_tokenize_skips_punctuation_and_numbers() {
        let text = "Hello, world! 1234 it's a test.";
        let spans = span_tokenize(text);
        let words: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        // Single-letter words do not match the pattern.
        assert_eq!(words, vec!["Hello", "world", "it's", "test"]);
    }

    #[test]
    fn test_tokenize_keeps_spans_aligned_after_filtering() {
        let text = "The quick brown fox jumps over the lazy dog";
        let out = tokenize(text, true).unwrap();
        assert_eq!(out.tokens, vec!["quick", "brown", "fox", "jump", "lazy", "dog"]);
        assert_eq!(out.tokens.len(), out.spans.len());
        assert_eq!(&text[out.spans[0].0..out.spans[0].1], "quick");
        assert_eq!(&text[out.spans[3].0..out.spans[3].1], "jumps");
        assert_eq!(out.length, text.len());
    }

    #[test]
    fn test_tokenize_without_stopword_removal() {
        let out = tokenize("The quick brown fox", false).unwrap();
        assert_eq!(out.tokens, vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_length_counts_trailing_stopword() {
        let text = "foxes jumped over it";
        let out = tokenize(text, true).unwrap();
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.length, text.len());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("1234 !!!", true).is_none());
        assert!(tokenize("", true).is_none());
    }

    #[test]
    fn test_all_stopwords_yields_no_tokens() {
        let out = tokenize("the of and", true).unwrap();
        assert!(out.tokens.is_empty());
        assert_eq!(out.length, 10);
    }

    #[test]
    fn test_non_ascii_offsets_are_byte_offsets() {
        let text = "café society matters";
        let out = tokenize(text, false).unwrap();
        for &(s, e) in &out.spans {
            assert!(text.is_char_boundary(s) && text.is_char_boundary(e));
        }
        assert_eq!(&text[out.spans[0].0..out.spans[0].1], "café");
    }
}
