//! CSV log of compared text pairs.
//!
//! Each pair that produced matches is recorded as one row. A later run over
//! the same inputs skips every pair whose `(A, B)` identifiers already lead a
//! row, so long batch jobs can be resumed.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::ComparisonResult;
use crate::output::{format_locations, quote_field};

pub const COLUMNS: [&str; 9] = [
    "Text A",
    "Text B",
    "Threshold",
    "N-Grams",
    "Num Matches",
    "Text A Length",
    "Text B Length",
    "Locations in A",
    "Locations in B",
];

#[derive(Error, Debug)]
pub enum PairLogError {
    #[error("pair log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An open pair log with the pairs it already holds.
#[derive(Debug)]
pub struct PairLog {
    path: PathBuf,
    pairs: HashSet<(String, String)>,
}

impl PairLog {
    /// Open the log at `path`, writing a header row when it is missing or
    /// empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PairLogError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| PairLogError::Io {
            path: path.clone(),
            source,
        };

        let has_content = path.is_file() && path.metadata().map_err(io_err)?.len() > 0;
        if !has_content {
            log::debug!("no pair log at {}, creating one", path.display());
            let mut file = File::create(&path).map_err(io_err)?;
            writeln!(file, "{}", COLUMNS.join(",")).map_err(io_err)?;
            return Ok(PairLog {
                path,
                pairs: HashSet::new(),
            });
        }

        let header = COLUMNS.join(",");
        let file = File::open(&path).map_err(io_err)?;
        let mut pairs = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(io_err)?;
            if line == header {
                continue;
            }
            let mut fields = parse_row(&line).into_iter();
            if let (Some(a), Some(b)) = (fields.next(), fields.next()) {
                pairs.insert((a, b));
            }
        }
        log::debug!("pair log {} holds {} pairs", path.display(), pairs.len());

        Ok(PairLog { path, pairs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `(a, b)` was already logged. Order matters.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&(a.to_string(), b.to_string()))
    }

    /// Append a row for a finished comparison.
    ///
    /// Nothing is written when the comparison found no matches. Returns
    /// whether a row was written.
    pub fn record(&mut self, a: &str, b: &str, result: &ComparisonResult) -> Result<bool, PairLogError> {
        if result.matches.is_empty() {
            return Ok(false);
        }

        let fields = [
            a.to_string(),
            b.to_string(),
            result.parameters.threshold.to_string(),
            result.parameters.ngram_size.to_string(),
            result.summary.match_count.to_string(),
            result.text_a.length.to_string(),
            result.text_b.length.to_string(),
            format_locations(&result.locations_a()),
            format_locations(&result.locations_b()),
        ];
        let line = fields
            .iter()
            .map(|f| quote_field(f))
            .collect::<Vec<_>>()
            .join(",");
        log::debug!("logging row: {}", line);

        let io_err = |source| PairLogError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{}", line).map_err(io_err)?;

        self.pairs.insert((a.to_string(), b.to_string()));
        Ok(true)
    }
}

/// Split one CSV line into fields. Quoted fields may contain commas and
/// doubled quotes.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_texts;
    use crate::models::MatchParams;
    use tempfile::tempdir;

    const TEXT: &str = "Whan that Aprill with his shoures soote the droghte of March hath \
        perced to the roote and bathed every veyne in swich licour of which vertu \
        engendred is the flour";

    fn result_with_matches() -> ComparisonResult {
        let params = MatchParams {
            silent: true,
            ..Default::default()
        };
        compare_texts(TEXT, "a", TEXT, "b", &params).unwrap()
    }

    #[test]
    fn test_parse_row() {
        assert_eq!(parse_row("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(
            parse_row("\"x, y\",\"[(0, 4), (9, 12)]\""),
            vec!["x, y", "[(0, 4), (9, 12)]"]
        );
        assert_eq!(parse_row("\"say \"\"hi\"\"\",2"), vec!["say \"hi\"", "2"]);
        assert_eq!(parse_row(""), vec![""]);
    }

    #[test]
    fn test_open_creates_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let log = PairLog::open(&path).unwrap();
        assert!(log.is_empty());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Text A,Text B,Threshold,N-Grams,Num Matches,Text A Length,Text B Length,\
             Locations in A,Locations in B\n"
        );
    }

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let result = result_with_matches();
        assert!(!result.matches.is_empty());

        let mut log = PairLog::open(&path).unwrap();
        assert!(log.record("one.txt", "two.txt", &result).unwrap());
        assert!(log.contains("one.txt", "two.txt"));

        let reopened = PairLog::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.contains("one.txt", "two.txt"));
        assert!(!reopened.contains("two.txt", "one.txt"));

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        let fields = parse_row(row);
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[2], "3");
        assert_eq!(fields[3], "3");
        assert_eq!(fields[4], result.summary.match_count.to_string());
        assert!(fields[7].starts_with("[(") && fields[7].ends_with(")]"));
        assert!(row.starts_with("\"one.txt\",\"two.txt\""));
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "").unwrap();
        let result = result_with_matches();

        let mut log = PairLog::open(&path).unwrap();
        assert!(log.record("a.txt", "b.txt", &result).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(content.lines().count(), 2);

        let reopened = PairLog::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.contains("a.txt", "b.txt"));
    }

    #[test]
    fn test_headerless_log_keeps_first_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(
            &path,
            "\"a.txt\",\"b.txt\",\"2\",\"3\",\"1\",\"43\",\"43\",\"[(4, 43)]\",\"[(4, 43)]\"\n",
        )
        .unwrap();

        let log = PairLog::open(&path).unwrap();
        assert_eq!(log.len(), 1);
        assert!(log.contains("a.txt", "b.txt"));
    }

    #[test]
    fn test_no_row_without_matches() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut result = result_with_matches();
        result.matches.clear();

        let mut log = PairLog::open(&path).unwrap();
        assert!(!log.record("one.txt", "two.txt", &result).unwrap());
        assert!(!log.contains("one.txt", "two.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }
}
