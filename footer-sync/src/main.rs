//! Rewrite static-site footer link blocks from each page's navigation block.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use footer_sync::core::nav::{extract_anchors, find_nav_block, nav_pattern};
use footer_sync::exit_codes;
use footer_sync::io::config::{CONFIG_FILE_NAME, SyncConfig, load_config, write_config};
use footer_sync::io::discover::discover_documents;
use footer_sync::io::document::read_document;
use footer_sync::logging;
use footer_sync::sync::{SyncMode, SyncReport, sync_root};

#[derive(Parser)]
#[command(
    name = "footer-sync",
    version,
    about = "Rewrite footer link blocks to mirror each page's navigation"
)]
struct Cli {
    /// Site root to scan.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `footer-sync.toml` in the site root).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite footer blocks that differ from the nav block (default).
    Sync {
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Exit with a non-zero code if any footer block is out of date.
    Check,
    /// List candidate documents and whether each has a nav block.
    List,
    /// Write a default `footer-sync.toml` into the site root.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    debug!(root = %cli.root.display(), config = %config_path.display(), "starting");

    match cli.command.unwrap_or(Command::Sync { dry_run: false }) {
        Command::Sync { dry_run } => {
            let cfg = load_config(&config_path)?;
            let mode = if dry_run {
                SyncMode::DryRun
            } else {
                SyncMode::Write
            };
            let report = sync_root(&cli.root, &cfg, mode)?;
            print_report("sync", &report, cli.json)?;
            Ok(exit_codes::OK)
        }
        Command::Check => {
            let cfg = load_config(&config_path)?;
            let report = sync_root(&cli.root, &cfg, SyncMode::DryRun)?;
            print_report("check", &report, cli.json)?;
            if report.changed() > 0 {
                return Ok(exit_codes::DRIFT);
            }
            Ok(exit_codes::OK)
        }
        Command::List => {
            let cfg = load_config(&config_path)?;
            cmd_list(&cli.root, &cfg, cli.json)?;
            Ok(exit_codes::OK)
        }
        Command::Init { force } => {
            cmd_init(&config_path, force)?;
            Ok(exit_codes::OK)
        }
    }
}

fn print_report(label: &str, report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("serialize report")?
        );
        return Ok(());
    }
    for file in report.changes() {
        let placement = file.outcome.placement().map_or("", |p| p.as_str());
        println!(
            "{}: path={} placement={}",
            label,
            file.path.display(),
            placement
        );
    }
    println!(
        "{}: scanned={} changed={} skipped={}",
        label,
        report.scanned(),
        report.changed(),
        report.skipped()
    );
    Ok(())
}

/// Candidate document as shown by `footer-sync list`.
#[derive(Debug, Serialize)]
struct ListedDocument {
    path: PathBuf,
    nav: bool,
    anchors: usize,
}

fn cmd_list(root: &Path, cfg: &SyncConfig, json: bool) -> Result<()> {
    cfg.validate()?;
    let pattern = nav_pattern(&cfg.nav_class)?;
    let mut listed = Vec::new();
    for path in discover_documents(root, &cfg.extension)? {
        let text = read_document(&path)?;
        let nav = find_nav_block(&pattern, &text);
        listed.push(ListedDocument {
            path: path.strip_prefix(root).unwrap_or(&path).to_path_buf(),
            nav: nav.is_some(),
            anchors: nav.map_or(0, |block| extract_anchors(block).len()),
        });
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listed).context("serialize document list")?
        );
        return Ok(());
    }
    for doc in &listed {
        if doc.nav {
            println!("{} anchors={}", doc.path.display(), doc.anchors);
        } else {
            println!("{} (no nav)", doc.path.display());
        }
    }
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if !force && config_path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &SyncConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("init: config={}", config_path.display());
    Ok(())
}
