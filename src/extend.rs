//! Fuzzy boundary extension.
//!
//! Aligned blocks stop at the first differing n-gram, which drops words at
//! each edge when the texts differ by a spelling variant or an OCR slip.
//! The extender grows every match one word at a time in both texts while the
//! neighbouring words are close in edit distance, and repeats until a full
//! pass over all matches changes nothing.

use crate::models::ExtendedMatch;

/// Classic Levenshtein distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance divided by the average length of the two words.
///
/// `color`/`colour` gives 0.18, `theater`/`theatre` 0.29, `day`/`today` 0.5.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    let average = (a.chars().count() + b.chars().count()) as f64 / 2.0;
    if average == 0.0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / average
}

/// Grows matches over the token sequences of two documents.
#[derive(Debug, Clone, Copy)]
pub struct Extender<'a> {
    tokens_a: &'a [String],
    tokens_b: &'a [String],
    ngram_size: usize,
    cutoff: f64,
}

impl<'a> Extender<'a> {
    pub fn new(tokens_a: &'a [String], tokens_b: &'a [String], ngram_size: usize, cutoff: f64) -> Self {
        Extender {
            tokens_a,
            tokens_b,
            ngram_size,
            cutoff,
        }
    }

    fn ngram_count(&self, tokens: &[String]) -> usize {
        (tokens.len() + 1).saturating_sub(self.ngram_size.max(1))
    }

    #[inline]
    fn close_enough(&self, word_a: &str, word_b: &str) -> bool {
        edit_ratio(word_a, word_b) < self.cutoff
    }

    /// Try to extend one match by one word at its start.
    fn extend_backwards(&self, m: &mut ExtendedMatch) -> bool {
        if m.a == 0 || m.b == 0 {
            return false;
        }
        let word_a = &self.tokens_a[m.a - 1];
        let word_b = &self.tokens_b[m.b - 1];
        if !self.close_enough(word_a, word_b) {
            return false;
        }

        log::debug!("extending match backwards with words: {} {}", word_a, word_b);
        m.a -= 1;
        m.b -= 1;
        m.size_a += 1;
        m.size_b += 1;
        m.extended_backwards += 1;
        true
    }

    /// Try to extend one match by one word past its end.
    fn extend_forwards(&self, m: &mut ExtendedMatch) -> bool {
        // The next word is the last word of n-gram `end`, which must exist on both sides.
        if m.end_a() >= self.ngram_count(self.tokens_a) || m.end_b() >= self.ngram_count(self.tokens_b) {
            return false;
        }
        let offset = self.ngram_size.max(1) - 1;
        let word_a = &self.tokens_a[m.end_a() + offset];
        let word_b = &self.tokens_b[m.end_b() + offset];
        if !self.close_enough(word_a, word_b) {
            return false;
        }

        log::debug!("extending match forwards with words: {} {}", word_a, word_b);
        m.size_a += 1;
        m.size_b += 1;
        m.extended_forwards += 1;
        true
    }

    /// One pass over every match, attempting one step in each direction.
    /// Returns whether anything was extended.
    pub fn pass(&self, matches: &mut [ExtendedMatch]) -> bool {
        let mut extended = false;
        for m in matches.iter_mut() {
            extended |= self.extend_backwards(m);
            extended |= self.extend_forwards(m);
        }
        extended
    }

    /// Repeat passes until one extends nothing. Returns the matches and the
    /// number of passes run, including the final empty one.
    pub fn run(&self, mut matches: Vec<ExtendedMatch>) -> (Vec<ExtendedMatch>, usize) {
        let mut passes = 0;
        loop {
            passes += 1;
            if !self.pass(&mut matches) {
                break;
            }
        }
        (matches, passes)
    }
}

/// Extend every match to a fixed point.
pub fn extend_matches(
    matches: Vec<ExtendedMatch>,
    tokens_a: &[String],
    tokens_b: &[String],
    ngram_size: usize,
    cutoff: f64,
) -> Vec<ExtendedMatch> {
    let (extended, passes) = Extender::new(tokens_a, tokens_b, ngram_size, cutoff).run(matches);
    log::debug!("extension reached a fixed point after {} passes", passes);
    extended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("foobar", "foo56bar"), 2);
    }

    #[test]
    fn test_edit_ratio_examples() {
        assert!((edit_ratio("color", "colour") - 0.181_818).abs() < 1e-4);
        assert!((edit_ratio("theater", "theatre") - 0.285_714).abs() < 1e-4);
        assert!((edit_ratio("day", "today") - 0.5).abs() < 1e-9);
        assert_eq!(edit_ratio("", ""), 0.0);
    }

    #[test]
    fn test_backward_extension_over_spelling_variant() {
        let a = words(&["colour", "bright", "red", "paint", "dries"]);
        let b = words(&["color", "bright", "red", "paint", "dries"]);
        let start = vec![ExtendedMatch::new(1, 1, 2, 2)];

        let (out, passes) = Extender::new(&a, &b, 3, 0.4).run(start);
        assert_eq!(out[0].a, 0);
        assert_eq!(out[0].b, 0);
        assert_eq!(out[0].size_a, 3);
        assert_eq!(out[0].extended_backwards, 1);
        assert_eq!(out[0].extended_forwards, 0);
        assert_eq!(passes, 2);
    }

    #[test]
    fn test_forward_extension() {
        let a = words(&["went", "to", "the", "old", "theater"]);
        let b = words(&["went", "to", "the", "old", "theatre"]);
        let out = extend_matches(vec![ExtendedMatch::new(0, 0, 2, 2)], &a, &b, 3, 0.4);
        assert_eq!(out[0].size_a, 3);
        assert_eq!(out[0].size_b, 3);
        assert_eq!(out[0].extended_forwards, 1);
    }

    #[test]
    fn test_dissimilar_words_block_extension() {
        let a = words(&["day", "one", "two", "three"]);
        let b = words(&["today", "one", "two", "three"]);
        let out = extend_matches(vec![ExtendedMatch::new(1, 1, 1, 1)], &a, &b, 3, 0.4);
        assert_eq!(out[0], ExtendedMatch::new(1, 1, 1, 1));
    }

    #[test]
    fn test_repeated_passes_until_fixed_point() {
        let a = words(&["w1x", "w2x", "b", "c", "d"]);
        let b = words(&["w1y", "w2y", "b", "c", "d"]);
        let (out, passes) = Extender::new(&a, &b, 3, 0.4).run(vec![ExtendedMatch::new(2, 2, 1, 1)]);
        assert_eq!(out[0].a, 0);
        assert_eq!(out[0].size_a, 3);
        assert_eq!(out[0].extended_backwards, 2);
        assert_eq!(passes, 3);
    }

    #[test]
    fn test_backward_guard_on_either_side() {
        let a = words(&["same", "x", "y", "z"]);
        let b = words(&["pre", "same", "x", "y", "z"]);
        // Starts at 0 in A, so there is no preceding word to compare.
        let out = extend_matches(vec![ExtendedMatch::new(0, 1, 2, 2)], &a, &b, 3, 0.4);
        assert_eq!(out[0].extended_backwards, 0);
    }

    #[test]
    fn test_forward_guard_at_sequence_end() {
        let a = words(&["p", "q", "r", "s"]);
        let b = words(&["p", "q", "r", "s", "t", "u"]);
        // A has two n-grams and the match already covers both.
        let out = extend_matches(vec![ExtendedMatch::new(0, 0, 2, 2)], &a, &b, 3, 0.9);
        assert_eq!(out[0].extended_forwards, 0);
        assert_eq!(out[0].end_a(), 2);
    }

    #[test]
    fn test_both_directions_in_one_pass() {
        let a = words(&["colour", "k", "l", "m", "theater"]);
        let b = words(&["color", "k", "l", "m", "theatre"]);
        let extender = Extender::new(&a, &b, 3, 0.4);
        let mut matches = vec![ExtendedMatch::new(1, 1, 1, 1)];
        assert!(extender.pass(&mut matches));
        assert_eq!(matches[0].extended_backwards, 1);
        assert_eq!(matches[0].extended_forwards, 1);
        assert_eq!((matches[0].a, matches[0].size_a), (0, 3));
        assert!(!extender.pass(&mut matches));
    }
}
