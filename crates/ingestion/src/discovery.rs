//! Input discovery: ticker directories and their daily export files.
//!
//! Layout:
//! ```text
//! <home>/<ticker dir>/tape.json
//! <home>/<ticker dir>/input/<yyyymmdd>*.csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tape_core::Result;

/// Sub-directory of a ticker directory holding the daily exports.
pub const INPUT_DIR_NAME: &str = "input";

/// Extension of daily export files (matched case-insensitively).
pub const EXPORT_EXTENSION: &str = "csv";

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    file_name_of(path).starts_with('.')
}

/// Ticker directories under `home`, sorted by name.
///
/// When `only` is non-empty, directories whose name is not listed are skipped.
pub fn ticker_dirs(home: &Path, only: &[String]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in fs::read_dir(home)? {
        let path = entry?.path();
        if !path.is_dir() || is_hidden(&path) {
            continue;
        }
        let name = file_name_of(&path);
        if !only.is_empty() && !only.iter().any(|t| *t == name) {
            tracing::debug!(dir = %path.display(), "Skipping unselected ticker directory");
            continue;
        }
        dirs.push(path);
    }

    dirs.sort_by_key(|p| file_name_of(p));
    Ok(dirs)
}

/// Daily export files in `<ticker_dir>/input`, sorted by file name.
///
/// Hidden files and files without a `.csv` extension are skipped.
pub fn day_files(ticker_dir: &Path) -> Result<Vec<PathBuf>> {
    let input_dir = ticker_dir.join(INPUT_DIR_NAME);
    let mut files = Vec::new();

    for entry in fs::read_dir(&input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if is_hidden(&path) {
            tracing::debug!(file = %path.display(), "Skipping hidden file");
            continue;
        }
        let is_export = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(EXPORT_EXTENSION))
            .unwrap_or(false);
        if is_export {
            files.push(path);
        }
    }

    files.sort_by_key(|p| file_name_of(p));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(INPUT_DIR_NAME);
        fs::create_dir(&input).unwrap();
        for name in ["20190117.csv", "20190115.CSV", ".20190116.csv", "notes.txt", "20190116.csv"] {
            fs::write(input.join(name), "").unwrap();
        }

        let names: Vec<String> = day_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name_of(p))
            .collect();
        assert_eq!(names, vec!["20190115.CSV", "20190116.csv", "20190117.csv"]);
    }

    #[test]
    fn test_day_files_missing_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(day_files(dir.path()).is_err());
    }

    #[test]
    fn test_ticker_dirs_filter() {
        let home = tempfile::tempdir().unwrap();
        for name in ["MSFT", "GWRE", ".cache"] {
            fs::create_dir(home.path().join(name)).unwrap();
        }
        fs::write(home.path().join("readme.txt"), "").unwrap();

        let all: Vec<String> = ticker_dirs(home.path(), &[])
            .unwrap()
            .iter()
            .map(|p| file_name_of(p))
            .collect();
        assert_eq!(all, vec!["GWRE", "MSFT"]);

        let only = ticker_dirs(home.path(), &["MSFT".to_string()]).unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(file_name_of(&only[0]), "MSFT");
    }
}
