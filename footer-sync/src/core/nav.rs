//! Navigation block lookup and anchor extraction.

use anyhow::{Context, Result};
use regex::Regex;

/// Compile the pattern for `<nav class="{nav_class}" ...>...</nav>`.
///
/// Matching is lazy and spans lines, so the first nav block in the document
/// wins and ends at its own closing tag.
pub fn nav_pattern(nav_class: &str) -> Result<Regex> {
    let pattern = format!(r#"(?s)<nav class="{}".*?</nav>"#, regex::escape(nav_class));
    Regex::new(&pattern).with_context(|| format!("compile nav pattern for class '{nav_class}'"))
}

/// Return the first navigation block in `text`, if any.
pub fn find_nav_block<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern.find(text).map(|m| m.as_str())
}

/// Collect the anchor lines of a nav block, trimmed, in document order.
///
/// Only lines that begin with an `<a ` tag count; anchors sharing a line with
/// other markup are not split out.
pub fn extract_anchors(block: &str) -> Vec<&str> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("<a "))
        .collect()
}
