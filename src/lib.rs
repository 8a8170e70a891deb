//! Text Matcher
//!
//! Finds passages of text reuse between two documents: quotations,
//! paraphrases and close copies. Texts are tokenized, stemmed and reduced to
//! word n-grams; common n-gram runs are aligned, neighbouring runs healed
//! across small gaps, and boundaries extended over near-identical words.
//!
//! # Example
//!
//! ```no_run
//! use text_matcher::prelude::*;
//!
//! let params = MatchParams::default();
//! let doc_a = Document::new("The quick brown fox jumps over the lazy dog", "a", true).unwrap();
//! let doc_b = Document::new("A quick brown fox jumps over the lazy dog today", "b", true).unwrap();
//!
//! let result = compare_documents(&doc_a, &doc_b, &params);
//! for m in &result.matches {
//!     println!("{:?} <-> {:?}", m.a.location, m.b.location);
//! }
//! ```
//!
//! # Batch Example
//!
//! ```no_run
//! use text_matcher::prelude::*;
//! use std::path::Path;
//!
//! let params = MatchParams::default();
//! let texts_a = get_files(Path::new("corpus/a")).unwrap();
//! let texts_b = get_files(Path::new("corpus/b")).unwrap();
//!
//! for outcome in compare_file_pairs(&pairs(&texts_a, &texts_b), &params, true) {
//!     if let Ok(result) = outcome.result {
//!         println!("{}: {} matches", outcome.path_a.display(), result.summary.match_count);
//!     }
//! }
//! ```

pub mod align;
pub mod compare;
pub mod discover;
pub mod document;
pub mod extend;
pub mod merge;
pub mod models;
pub mod output;
pub mod pairlog;
pub mod report;
pub mod stem;
pub mod stopwords;
pub mod tokenize;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::align::{align_ngrams, matching_blocks};
    pub use crate::compare::{
        compare_documents, compare_file_pairs, compare_files, compare_texts, load_document,
        CompareError, PairOutcome,
    };
    pub use crate::discover::{get_files, pairs, DiscoverError};
    pub use crate::document::{intern_ngrams, Document, DocumentError, PAGE_SEPARATOR};
    pub use crate::extend::{edit_ratio, extend_matches, levenshtein, Extender};
    pub use crate::merge::{heal_extended_matches, heal_neighboring_matches};
    pub use crate::models::{
        ComparisonResult, ComparisonSummary, DocumentInfo, ExtendedMatch, MatchOrigin,
        MatchParams, MatchReport, PassageRef, PassageText, RawMatch,
    };
    pub use crate::output::{
        format_locations, format_match, print_matches, print_summary, write_csv, write_csv_file,
        write_json, write_json_file, OutputError,
    };
    pub use crate::pairlog::{PairLog, PairLogError};
    pub use crate::report::{coverage, passage_ref, report_matches, ReportError};
    pub use crate::stem::stem;
    pub use crate::stopwords::is_stopword;
    pub use crate::tokenize::{tokenize, Tokenized};
}

// Re-export commonly used types at the crate root
pub use document::Document;
pub use models::{ComparisonResult, MatchParams, MatchReport};
