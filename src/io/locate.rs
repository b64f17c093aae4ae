use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ToolError};

/// Finds the single file in `dir` whose name ends with `extension`.
pub fn locate_spreadsheet(dir: &Path, extension: &str) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(extension) {
            candidates.push(entry.path());
        }
    }
    debug!(dir = %dir.display(), count = candidates.len(), "listed spreadsheet candidates");

    select_single(candidates, dir, extension)
}

/// Asserts that `candidates` holds exactly one path and returns it.
pub fn select_single(
    candidates: impl IntoIterator<Item = PathBuf>,
    dir: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = candidates.into_iter().collect();
    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        0 => Err(ToolError::NoSpreadsheet {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        }),
        count => Err(ToolError::MultipleSpreadsheets {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
            count,
        }),
    }
}
