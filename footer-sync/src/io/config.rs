//! Sync configuration stored in `footer-sync.toml` at the site root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::footer::FooterLayout;
use crate::core::rewrite::RewriteRules;

/// File name looked up in the site root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "footer-sync.toml";

/// Sync configuration (TOML).
///
/// Every field is optional. Missing fields default to the markup the site
/// generator emits, so an absent file reproduces the stock behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Extension of the documents to scan, without the dot.
    pub extension: String,

    /// Class of the `<nav>` element that lists the site links.
    pub nav_class: String,

    /// Class of the footer `<div>` that mirrors the nav links.
    pub footer_class: String,

    /// Indentation in front of the footer `<div>` and its closing tag.
    pub footer_indent: String,

    /// Indentation in front of each footer anchor.
    pub anchor_indent: String,

    /// Insert a footer block into documents that lack one.
    pub insert_missing: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let layout = FooterLayout::default();
        let rules = RewriteRules::default();
        Self {
            extension: "html".to_string(),
            nav_class: rules.nav_class,
            footer_class: layout.footer_class,
            footer_indent: layout.footer_indent,
            anchor_indent: layout.anchor_indent,
            insert_missing: rules.insert_missing,
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(anyhow!("extension must be non-empty"));
        }
        if self.extension.contains(['.', '/', '\\']) {
            return Err(anyhow!(
                "extension must not contain '.' or path separators (got '{}')",
                self.extension
            ));
        }
        validate_class("nav_class", &self.nav_class)?;
        validate_class("footer_class", &self.footer_class)?;
        validate_indent("footer_indent", &self.footer_indent)?;
        validate_indent("anchor_indent", &self.anchor_indent)?;
        Ok(())
    }

    /// Rewrite rules derived from this config.
    pub fn rules(&self) -> RewriteRules {
        RewriteRules {
            nav_class: self.nav_class.clone(),
            layout: FooterLayout {
                footer_class: self.footer_class.clone(),
                footer_indent: self.footer_indent.clone(),
                anchor_indent: self.anchor_indent.clone(),
            },
            insert_missing: self.insert_missing,
        }
    }
}

fn validate_class(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} must be non-empty"));
    }
    if value.contains('"') {
        return Err(anyhow!("{field} must not contain '\"'"));
    }
    Ok(())
}

fn validate_indent(field: &str, value: &str) -> Result<()> {
    if value.chars().any(|c| c != ' ' && c != '\t') {
        return Err(anyhow!("{field} may only contain spaces and tabs"));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SyncConfig::default()`.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        let cfg = SyncConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SyncConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SyncConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        let cfg = SyncConfig {
            extension: "htm".to_string(),
            insert_missing: false,
            ..SyncConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "footer_class = \"links\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.footer_class, "links");
        assert_eq!(cfg.nav_class, "nav-links");
        assert_eq!(cfg.extension, "html");
    }

    #[test]
    fn rejects_dotted_extension() {
        let cfg = SyncConfig {
            extension: ".html".to_string(),
            ..SyncConfig::default()
        };
        let err = cfg.validate().expect_err("dotted extension");
        assert!(err.to_string().contains("extension"));
    }

    #[test]
    fn rejects_quote_in_class() {
        let cfg = SyncConfig {
            nav_class: "nav\"links".to_string(),
            ..SyncConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_whitespace_indent() {
        let cfg = SyncConfig {
            anchor_indent: "  x".to_string(),
            ..SyncConfig::default()
        };
        let err = cfg.validate().expect_err("bad indent");
        assert!(err.to_string().contains("anchor_indent"));
    }

    #[test]
    fn default_rules_match_default_rewrite_rules() {
        assert_eq!(SyncConfig::default().rules(), RewriteRules::default());
    }
}
