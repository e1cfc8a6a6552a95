//! File selector: random bounded sample of CSV files from one directory.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Directory name reserved for generated output. Never read as input.
pub const OUTPUT_DIR_NAME: &str = "output";

const CSV_SUFFIX: &str = ".csv";

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("error fetching files from {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// True if any component of `dir` is the reserved output directory name.
pub fn is_output_path(dir: &Path) -> bool {
    dir.components()
        .any(|c| c.as_os_str() == OUTPUT_DIR_NAME)
}

/// Pick up to `max_count` CSV files from `directory` in random order.
///
/// Candidates are sorted by name before shuffling so a seeded `rng` gives the
/// same selection whatever order the filesystem lists entries in. Paths under
/// the reserved output directory yield an empty selection.
pub fn select_files<R: Rng + ?Sized>(
    directory: &Path,
    max_count: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>, SelectError> {
    if is_output_path(directory) {
        return Ok(Vec::new());
    }

    let read_err = |source| SelectError::ReadDir {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_csv = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(CSV_SUFFIX));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files.shuffle(rng);
    files.truncate(max_count);
    Ok(files)
}
