use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Depth of `<org>/<repo>/<metric>.json` below the data directory.
pub const METRIC_FILE_DEPTH: usize = 3;

/// Metric JSON files under `root`, sorted by path; dot-directories are ignored.
pub fn list_metric_files(root: &Path) -> Vec<PathBuf> {
    // No min_depth: filter_entry must see the org and repo directories to prune them.
    WalkDir::new(root)
        .max_depth(METRIC_FILE_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.depth() == METRIC_FILE_DEPTH)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

/// `(org, repo)` taken from the two directories above a metric file.
pub fn owner_and_repo(path: &Path) -> Option<(String, String)> {
    let repo_dir = path.parent()?;
    let org_dir = repo_dir.parent()?;
    let repo = repo_dir.file_name()?.to_str()?;
    let org = org_dir.file_name()?.to_str()?;
    Some((org.to_string(), repo.to_string()))
}
