// Snapshot datasets: a directory of edge-list files ordered by numeric prefix.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DatasetError;

/// One snapshot file, with its chronological position key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    pub path: PathBuf,
    /// File name, used as the snapshot label.
    pub label: String,
    /// Integer prefix of the file name.
    pub order: u64,
}

/// List the files of `dir` whose names match `pattern`, in chronological order.
///
/// Order comes from the digits that start the file name (`12_day.txt` and
/// `12.txt` both sort as 12); equal prefixes fall back to the name.
/// Subdirectories and dotfiles are ignored.
pub fn list_snapshots(dir: &Path, pattern: &str) -> Result<Vec<SnapshotFile>, DatasetError> {
    if !dir.exists() {
        return Err(DatasetError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DatasetError::NotADirectory(dir.to_path_buf()));
    }
    let matcher = glob::Pattern::new(pattern)?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let label = entry.file_name().to_string_lossy().into_owned();
        if label.starts_with('.') || !matcher.matches(&label) {
            continue;
        }
        let order = order_key(&label).ok_or_else(|| DatasetError::Unordered(label.clone()))?;
        files.push(SnapshotFile {
            path: entry.path(),
            label,
            order,
        });
    }

    files.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.label.cmp(&b.label)));
    debug!(dir = %dir.display(), files = files.len(), "Listed snapshot files");
    Ok(files)
}

/// Leading decimal digits of a file name, up to the first `_` or `.`.
fn order_key(name: &str) -> Option<u64> {
    let prefix = name.split(['_', '.']).next()?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Short dataset name for output file prefixes: the directory's last component.
pub fn dataset_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "dataset".to_string())
}
