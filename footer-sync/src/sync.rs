//! Site-wide footer sync for `footer-sync sync` and `footer-sync check`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::rewrite::{FooterRewriter, Placement, Rewrite};
use crate::io::config::SyncConfig;
use crate::io::discover::discover_documents;
use crate::io::document::{read_document, write_document};

/// Whether changed documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Write,
    DryRun,
}

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// No navigation block.
    NoNav,
    /// Navigation block without anchor lines.
    NoAnchors,
    /// Footer tag present but not as a recognisable block.
    UnmatchedFooter,
    /// Footer block already up to date.
    Unchanged,
    /// Document rewritten on disk.
    Rewritten { placement: Placement },
    /// Document would be rewritten (dry run).
    WouldRewrite { placement: Placement },
}

impl FileOutcome {
    pub fn is_change(self) -> bool {
        matches!(self, Self::Rewritten { .. } | Self::WouldRewrite { .. })
    }

    pub fn is_skip(self) -> bool {
        matches!(self, Self::NoNav | Self::NoAnchors | Self::UnmatchedFooter)
    }

    pub fn placement(self) -> Option<Placement> {
        match self {
            Self::Rewritten { placement } | Self::WouldRewrite { placement } => Some(placement),
            _ => None,
        }
    }
}

/// Per-document report entry. `path` is relative to the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of one sync run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub files: Vec<FileReport>,
}

impl SyncReport {
    pub fn scanned(&self) -> usize {
        self.files.len()
    }

    pub fn changed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_change()).count()
    }

    pub fn skipped(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_skip()).count()
    }

    pub fn changes(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_change())
    }
}

/// Rewrite the footer block of every document under `root`.
///
/// Each document is read, rewritten in memory, and written back at most once,
/// only when its text changed. The first I/O error aborts the run.
pub fn sync_root(root: &Path, cfg: &SyncConfig, mode: SyncMode) -> Result<SyncReport> {
    cfg.validate()?;
    let rewriter = FooterRewriter::new(&cfg.rules())?;
    let documents = discover_documents(root, &cfg.extension)?;
    info!(root = %root.display(), documents = documents.len(), ?mode, "syncing footers");

    let mut report = SyncReport::default();
    for path in documents {
        let outcome = sync_document(&rewriter, &path, mode)?;
        let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        debug!(path = %rel.display(), ?outcome, "processed document");
        report.files.push(FileReport { path: rel, outcome });
    }
    Ok(report)
}

/// Process a single document.
pub fn sync_document(rewriter: &FooterRewriter, path: &Path, mode: SyncMode) -> Result<FileOutcome> {
    let text = read_document(path)?;
    let outcome = match rewriter.rewrite(&text) {
        Rewrite::NoNav => FileOutcome::NoNav,
        Rewrite::NoAnchors => FileOutcome::NoAnchors,
        Rewrite::UnmatchedFooter => FileOutcome::UnmatchedFooter,
        Rewrite::Unchanged => FileOutcome::Unchanged,
        Rewrite::Changed { text, placement } => match mode {
            SyncMode::Write => {
                write_document(path, &text)?;
                FileOutcome::Rewritten { placement }
            }
            SyncMode::DryRun => FileOutcome::WouldRewrite { placement },
        },
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PageBuilder, SiteFixture, sample_anchors};

    fn stale_page() -> String {
        PageBuilder::new()
            .nav(&sample_anchors())
            .footer(&[r#"<a href="privacy.html">Privacy</a>"#])
            .build()
    }

    #[test]
    fn rewrites_changed_documents_and_reports_counts() {
        let site = SiteFixture::new().expect("site");
        site.write("index.html", &stale_page()).expect("write");
        site.write("DE/index.html", &PageBuilder::new().nav(&sample_anchors()).build())
            .expect("write");
        let plain = PageBuilder::new().build();
        site.write("plain.html", &plain).expect("write");

        let report = sync_root(site.path(), &SyncConfig::default(), SyncMode::Write).expect("sync");

        assert_eq!(report.scanned(), 3);
        assert_eq!(report.changed(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(
            report.files,
            vec![
                FileReport {
                    path: PathBuf::from("DE/index.html"),
                    outcome: FileOutcome::Rewritten {
                        placement: Placement::Inserted
                    },
                },
                FileReport {
                    path: PathBuf::from("index.html"),
                    outcome: FileOutcome::Rewritten {
                        placement: Placement::Replaced
                    },
                },
                FileReport {
                    path: PathBuf::from("plain.html"),
                    outcome: FileOutcome::NoNav,
                },
            ]
        );
        assert!(!site.read("index.html").expect("read").contains("privacy.html"));
        assert_eq!(site.read("plain.html").expect("read"), plain);
    }

    #[test]
    fn second_run_changes_nothing() {
        let site = SiteFixture::new().expect("site");
        site.write("index.html", &stale_page()).expect("write");

        sync_root(site.path(), &SyncConfig::default(), SyncMode::Write).expect("first sync");
        let after_first = site.read("index.html").expect("read");
        let report =
            sync_root(site.path(), &SyncConfig::default(), SyncMode::Write).expect("second sync");

        assert_eq!(report.changed(), 0);
        assert_eq!(site.read("index.html").expect("read"), after_first);
    }

    #[test]
    fn dry_run_leaves_files_untouched() {
        let site = SiteFixture::new().expect("site");
        let page = stale_page();
        site.write("index.html", &page).expect("write");

        let report =
            sync_root(site.path(), &SyncConfig::default(), SyncMode::DryRun).expect("sync");

        assert_eq!(
            report.files[0].outcome,
            FileOutcome::WouldRewrite {
                placement: Placement::Replaced
            }
        );
        assert_eq!(site.read("index.html").expect("read"), page);
    }

    #[test]
    fn inline_footer_is_skipped_and_left_untouched() {
        let site = SiteFixture::new().expect("site");
        let page = "<nav class=\"nav-links\">\n  <a href=\"a.html\">A</a>\n</nav>\n\
                    <footer><div class=\"footer-links\"><a href=\"old.html\">Old</a></div></footer>\n";
        site.write("min.html", page).expect("write");

        let report = sync_root(site.path(), &SyncConfig::default(), SyncMode::Write).expect("sync");

        assert_eq!(report.files[0].outcome, FileOutcome::UnmatchedFooter);
        assert_eq!(report.skipped(), 1);
        assert_eq!(site.read("min.html").expect("read"), page);
    }

    #[test]
    fn other_extensions_are_not_touched() {
        let site = SiteFixture::new().expect("site");
        let page = stale_page();
        site.write("index.htm", &page).expect("write");
        site.write("notes.txt", &page).expect("write");

        let report = sync_root(site.path(), &SyncConfig::default(), SyncMode::Write).expect("sync");

        assert_eq!(report.scanned(), 0);
        assert_eq!(site.read("index.htm").expect("read"), page);
        assert_eq!(site.read("notes.txt").expect("read"), page);
    }

    #[test]
    fn configured_extension_selects_documents() {
        let site = SiteFixture::new().expect("site");
        site.write("index.htm", &stale_page()).expect("write");
        let cfg = SyncConfig {
            extension: "htm".to_string(),
            ..SyncConfig::default()
        };

        let report = sync_root(site.path(), &cfg, SyncMode::Write).expect("sync");

        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn report_serializes_outcome_inline() {
        let report = SyncReport {
            files: vec![FileReport {
                path: PathBuf::from("index.html"),
                outcome: FileOutcome::WouldRewrite {
                    placement: Placement::Inserted,
                },
            }],
        };
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "files": [
                    {"path": "index.html", "outcome": "would_rewrite", "placement": "inserted"}
                ]
            })
        );
    }
}
