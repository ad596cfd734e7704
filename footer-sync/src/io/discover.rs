//! Document discovery under a site root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Recursively list regular files under `root` whose extension is `extension`.
///
/// The comparison is case-sensitive and excludes the dot. Symlinks are not
/// followed. Paths come back sorted so runs are deterministic.
pub fn discover_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|e| e == extension) {
            documents.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), extension, count = documents.len(), "discovered documents");
    Ok(documents)
}
