//! Footer link block rendering and substitution.

use std::ops::Range;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

static DIV_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<div\b[^>]*>|</div\s*>").expect("div tag pattern should be valid")
});

/// Indentation and class name used when rendering a footer block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLayout {
    pub footer_class: String,
    pub footer_indent: String,
    pub anchor_indent: String,
}

impl Default for FooterLayout {
    fn default() -> Self {
        Self {
            footer_class: "footer-links".to_string(),
            footer_indent: " ".repeat(6),
            anchor_indent: " ".repeat(8),
        }
    }
}

/// Compiled patterns for locating a footer block.
#[derive(Debug, Clone)]
pub struct FooterPatterns {
    /// Opening tag on its own line, with the line break and indentation in
    /// front of it.
    line_start: Regex,
    /// Opening tag anywhere.
    open_tag: Regex,
}

impl FooterPatterns {
    pub fn new(footer_class: &str) -> Result<Self> {
        let class = regex::escape(footer_class);
        let line_start = Regex::new(&format!(r#"\r?\n\s*<div class="{class}">"#))
            .with_context(|| format!("compile footer pattern for class '{footer_class}'"))?;
        let open_tag = Regex::new(&format!(r#"<div class="{class}">"#))
            .with_context(|| format!("compile footer tag pattern for class '{footer_class}'"))?;
        Ok(Self {
            line_start,
            open_tag,
        })
    }

    /// Whether the document contains the footer opening tag at all.
    pub fn has_footer_tag(&self, text: &str) -> bool {
        self.open_tag.is_match(text)
    }

    /// Byte range of the first footer block that starts on its own line.
    ///
    /// The range covers the leading line break and indentation and ends after
    /// the `</div>` that balances the opening tag. Nested `<div>` elements
    /// inside anchors are skipped over. An unbalanced block yields `None`.
    pub fn find_block(&self, text: &str) -> Option<Range<usize>> {
        let start = self.line_start.find(text)?;
        let mut depth = 1usize;
        for tag in DIV_TAG_RE.find_iter(&text[start.end()..]) {
            if tag.as_str().starts_with("</") {
                depth -= 1;
                if depth == 0 {
                    return Some(start.start()..start.end() + tag.end());
                }
            } else {
                depth += 1;
            }
        }
        None
    }
}

/// Dominant line ending of `text`: `"\r\n"` when most line breaks are CRLF.
pub fn line_ending(text: &str) -> &'static str {
    let lf = text.matches('\n').count();
    let crlf = text.matches("\r\n").count();
    if crlf * 2 > lf { "\r\n" } else { "\n" }
}

/// Render a footer block wrapping `anchors`, using `newline` between lines.
///
/// The block starts with a line break and ends at the closing `</div>`, so it
/// can stand in for a range returned by [`FooterPatterns::find_block`].
pub fn render_footer(anchors: &[&str], layout: &FooterLayout, newline: &str) -> String {
    let mut block = format!(
        "{newline}{}<div class=\"{}\">{newline}",
        layout.footer_indent, layout.footer_class
    );
    for anchor in anchors {
        block.push_str(&layout.anchor_indent);
        block.push_str(anchor);
        block.push_str(newline);
    }
    block.push_str(&layout.footer_indent);
    block.push_str("</div>");
    block
}

/// Replace the first footer block in `text` with `block`.
///
/// Returns `None` when the document has no footer block starting on its own
/// line. `block` is inserted verbatim.
pub fn replace_footer(patterns: &FooterPatterns, text: &str, block: &str) -> Option<String> {
    let found = patterns.find_block(text)?;
    let mut out = String::with_capacity(text.len() - found.len() + block.len());
    out.push_str(&text[..found.start]);
    out.push_str(block);
    out.push_str(&text[found.end..]);
    Some(out)
}

/// Insert `block` into a document that has no footer block yet.
///
/// The block lands right after the last non-whitespace character preceding
/// the last `</footer>` before `</body>`, so nested article footers are
/// passed over. Without a site footer the block goes before `</body>`, and
/// documents with neither tag get it after their last non-whitespace
/// character.
pub fn insert_footer(text: &str, block: &str) -> String {
    let body_end = text.find("</body>").unwrap_or(text.len());
    let anchor = text[..body_end].rfind("</footer>").unwrap_or(body_end);
    let at = text[..anchor].trim_end().len();

    let mut out = String::with_capacity(text.len() + block.len());
    out.push_str(&text[..at]);
    out.push_str(block);
    out.push_str(&text[at..]);
    out
}
