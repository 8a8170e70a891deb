//! Input discovery: expanding CLI paths into text files and pairs.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("the path {} doesn't appear to be a file or directory", .0.display())]
    InvalidPath(PathBuf),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("unreadable entry: {0}")]
    Glob(#[from] glob::GlobError),
}

/// A file yields itself; a directory yields every `.txt` file below it,
/// recursively and sorted.
pub fn get_files(path: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(DiscoverError::InvalidPath(path.to_path_buf()));
    }

    let pattern = path.join("**").join("*.txt");
    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let entry = entry?;
        if entry.is_file() {
            files.push(entry);
        }
    }
    files.sort();

    log::debug!("found {} text files under {}", files.len(), path.display());
    Ok(files)
}

/// Every combination of one file from `texts_a` with one from `texts_b`.
pub fn pairs(texts_a: &[PathBuf], texts_b: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
    texts_a
        .iter()
        .flat_map(|a| texts_b.iter().map(move |b| (a.clone(), b.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("only.md");
        fs::write(&file, "text").unwrap();
        assert_eq!(get_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_directory_is_searched_recursively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("b").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("z.txt"), "z").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(nested.join("c.txt"), "c").unwrap();

        let files = get_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "a.txt");
        assert!(names.iter().any(|n| n.ends_with("c.txt")));
        assert!(!names.iter().any(|n| n.ends_with(".md")));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = get_files(&missing).unwrap_err();
        assert!(matches!(err, DiscoverError::InvalidPath(p) if p == missing));
    }

    #[test]
    fn test_pairs_cartesian_product() {
        let a = vec![PathBuf::from("a1"), PathBuf::from("a2")];
        let b = vec![PathBuf::from("b1"), PathBuf::from("b2"), PathBuf::from("b3")];
        let all = pairs(&a, &b);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], (PathBuf::from("a1"), PathBuf::from("b1")));
        assert_eq!(all[5], (PathBuf::from("a2"), PathBuf::from("b3")));
        assert!(pairs(&a, &[]).is_empty());
    }
}
