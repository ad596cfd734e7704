//! Per-document footer rewrite.
//!
//! Combines nav lookup, anchor extraction and footer substitution into one
//! decision per document. Patterns are compiled once per run.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::core::footer::{
    FooterLayout, FooterPatterns, insert_footer, line_ending, render_footer, replace_footer,
};
use crate::core::nav::{extract_anchors, find_nav_block, nav_pattern};

/// Inputs that decide how documents are rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    pub nav_class: String,
    pub layout: FooterLayout,
    /// Insert a footer block into documents that have none.
    pub insert_missing: bool,
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self {
            nav_class: "nav-links".to_string(),
            layout: FooterLayout::default(),
            insert_missing: true,
        }
    }
}

/// Where the rendered footer block ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// An existing footer block was replaced.
    Replaced,
    /// The document had no footer block; one was inserted.
    Inserted,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replaced => "replaced",
            Self::Inserted => "inserted",
        }
    }
}

/// Result of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// No navigation block; the document is left alone.
    NoNav,
    /// The navigation block holds no anchor lines; the document is left alone.
    NoAnchors,
    /// A footer opening tag exists but no block starting on its own line
    /// with a balanced closing tag could be located; the document is left
    /// alone rather than gaining a second block.
    UnmatchedFooter,
    /// The footer block already mirrors the navigation block.
    Unchanged,
    /// The document text differs from the input.
    Changed { text: String, placement: Placement },
}

/// Compiled rewrite rules.
#[derive(Debug, Clone)]
pub struct FooterRewriter {
    nav: Regex,
    footer: FooterPatterns,
    layout: FooterLayout,
    insert_missing: bool,
}

impl FooterRewriter {
    pub fn new(rules: &RewriteRules) -> Result<Self> {
        Ok(Self {
            nav: nav_pattern(&rules.nav_class)?,
            footer: FooterPatterns::new(&rules.layout.footer_class)?,
            layout: rules.layout.clone(),
            insert_missing: rules.insert_missing,
        })
    }

    /// Compute the rewritten form of `text`.
    pub fn rewrite(&self, text: &str) -> Rewrite {
        let Some(nav_block) = find_nav_block(&self.nav, text) else {
            return Rewrite::NoNav;
        };
        let anchors = extract_anchors(nav_block);
        if anchors.is_empty() {
            return Rewrite::NoAnchors;
        }
        let block = render_footer(&anchors, &self.layout, line_ending(text));

        let (updated, placement) = match replace_footer(&self.footer, text, &block) {
            Some(updated) => (updated, Placement::Replaced),
            None if self.footer.has_footer_tag(text) => return Rewrite::UnmatchedFooter,
            None if self.insert_missing => (insert_footer(text, &block), Placement::Inserted),
            None => return Rewrite::Unchanged,
        };

        if updated == text {
            Rewrite::Unchanged
        } else {
            Rewrite::Changed {
                text: updated,
                placement,
            }
        }
    }
}
