//! Document read/write.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Read a document as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))
}

/// Replace a document's contents.
///
/// The new text goes to an anonymous temp file in the document's directory,
/// which takes over the document's permissions and is then persisted over it.
/// A failed write leaves the document and its directory as they were.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)
        .with_context(|| format!("stat document {}", path.display()))?
        .permissions();

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp document in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("write temp document for {}", path.display()))?;
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("copy permissions onto temp document for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("replace document {}", path.display()))?;
    Ok(())
}
