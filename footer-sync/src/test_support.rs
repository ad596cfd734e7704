//! Test-only helpers for building sample pages and on-disk sites.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Nav anchors in the shape the site generator emits.
pub fn sample_anchors() -> Vec<&'static str> {
    vec![
        r#"<a href="index.html">Home</a>"#,
        r#"<a href="all-tools.html">All tools</a>"#,
        r#"<a href="about.html">About</a>"#,
        r#"<a href="blog.html">Blog</a>"#,
        r#"<a href="contact.html">Contact</a>"#,
    ]
}

/// Builder for a minimal static page with optional nav and footer blocks.
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    nav: Option<Vec<String>>,
    footer: Option<Vec<String>>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `<nav class="nav-links">` block with `anchors`.
    pub fn nav(mut self, anchors: &[&str]) -> Self {
        self.nav = Some(anchors.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Add a `<div class="footer-links">` block with `anchors`, laid out the
    /// way the default footer layout renders it.
    pub fn footer(mut self, anchors: &[&str]) -> Self {
        self.footer = Some(anchors.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn build(&self) -> String {
        let mut page = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <title>FluxConvert</title>\n</head>\n<body>\n  <header class=\"site-header\">\n",
        );
        if let Some(anchors) = &self.nav {
            page.push_str("      <nav class=\"nav-links\" aria-label=\"Main navigation\">\n");
            for anchor in anchors {
                page.push_str(&format!("        {anchor}\n"));
            }
            page.push_str("      </nav>\n");
        }
        page.push_str("  </header>\n  <main>\n    <h1>Convert anything</h1>\n  </main>\n");
        page.push_str("    <footer class=\"site-footer\">\n      <div class=\"footer-brand\">FluxConvert</div>\n      <p>Fast, private file tools.</p>");
        if let Some(anchors) = &self.footer {
            page.push_str("\n      <div class=\"footer-links\">\n");
            for anchor in anchors {
                page.push_str(&format!("        {anchor}\n"));
            }
            page.push_str("      </div>");
        }
        page.push_str("\n    </footer>\n</body>\n</html>\n");
        page
    }
}

/// Temporary site directory for filesystem-level tests.
pub struct SiteFixture {
    dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create site tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.dir.path().join(rel);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
