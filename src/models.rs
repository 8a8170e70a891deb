//! Data structures for the text matching pipeline.

use serde::{Deserialize, Serialize};

/// A run of `size` identical consecutive n-grams starting at `a` in text A
/// and `b` in text B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// How a match came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrigin {
    /// A single matching block from the aligner
    #[default]
    Raw,
    /// Two neighbouring blocks fused across a small gap
    Healed,
}

/// A match after healing and extension. Sizes are in n-grams and may differ
/// between the two texts once blocks with different gaps are fused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMatch {
    pub a: usize,
    pub b: usize,
    pub size_a: usize,
    pub size_b: usize,
    pub origin: MatchOrigin,
    pub extended_backwards: u32,
    pub extended_forwards: u32,
}

impl ExtendedMatch {
    pub fn new(a: usize, b: usize, size_a: usize, size_b: usize) -> Self {
        ExtendedMatch {
            a,
            b,
            size_a,
            size_b,
            origin: MatchOrigin::Raw,
            extended_backwards: 0,
            extended_forwards: 0,
        }
    }

    pub fn healed(a: usize, b: usize, size_a: usize, size_b: usize) -> Self {
        ExtendedMatch {
            origin: MatchOrigin::Healed,
            ..Self::new(a, b, size_a, size_b)
        }
    }

    /// End (exclusive) n-gram index in text A
    #[inline]
    pub fn end_a(&self) -> usize {
        self.a + self.size_a
    }

    /// End (exclusive) n-gram index in text B
    #[inline]
    pub fn end_b(&self) -> usize {
        self.b + self.size_b
    }

    pub fn is_healed(&self) -> bool {
        self.origin == MatchOrigin::Healed
    }

    pub fn is_extended(&self) -> bool {
        self.extended_backwards > 0 || self.extended_forwards > 0
    }

    /// The smaller of the two sizes, used by the final size filter
    pub fn min_size(&self) -> usize {
        self.size_a.min(self.size_b)
    }
}

impl From<RawMatch> for ExtendedMatch {
    fn from(m: RawMatch) -> Self {
        ExtendedMatch::new(m.a, m.b, m.size, m.size)
    }
}

/// Comparison parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchParams {
    pub threshold: usize,        // Keep aligner blocks with size > threshold
    pub ngram_size: usize,
    pub cutoff: usize,           // Final min(size_a, size_b) >= cutoff
    pub remove_stopwords: bool,
    pub min_distance: usize,     // Heal blocks whose gap is < min_distance n-grams
    pub extension_cutoff: f64,   // Max edit ratio for extending a boundary word
    pub context_tokens: usize,   // Context words on each side in reports
    pub autojunk: bool,          // Ignore very frequent n-grams as match seeds
    pub silent: bool,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            threshold: 3,
            ngram_size: 3,
            cutoff: 5,
            remove_stopwords: true,
            min_distance: 8,
            extension_cutoff: 0.4,
            context_tokens: 5,
            autojunk: true,
            silent: false,
        }
    }
}

/// Reconstructed text for a passage with context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageText {
    pub before: String,   // Context before match
    pub matched: String,  // The matched text
    pub after: String,    // Context after match
}

impl PassageText {
    /// Before, match and after joined into one line with whitespace collapsed.
    pub fn context(&self) -> String {
        let joined = format!("{} {} {}", self.before, self.matched, self.after);
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Where a match sits in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageRef {
    pub label: String,
    pub location: (usize, usize),  // (start, end) offsets into the text
    pub relative: (f64, f64),      // location as fractions of document length
    pub token_range: (usize, usize),
    pub text: PassageText,
}

/// A reported match in both documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub id: usize,
    pub a: PassageRef,
    pub b: PassageRef,
    pub size_a: usize,
    pub size_b: usize,
    pub origin: MatchOrigin,
    pub extended_backwards: u32,
    pub extended_forwards: u32,
}

/// Basic facts about a compared document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub label: String,
    pub length: usize,
    pub token_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub match_count: usize,
    pub coverage_a: f64,
    pub coverage_b: f64,
}

/// Full comparison result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub version: String,
    pub parameters: MatchParams,
    pub text_a: DocumentInfo,
    pub text_b: DocumentInfo,
    pub summary: ComparisonSummary,
    pub matches: Vec<MatchReport>,
}

impl ComparisonResult {
    pub fn locations_a(&self) -> Vec<(usize, usize)> {
        self.matches.iter().map(|m| m.a.location).collect()
    }

    pub fn locations_b(&self) -> Vec<(usize, usize)> {
        self.matches.iter().map(|m| m.b.location).collect()
    }
}
