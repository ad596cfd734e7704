//! I/O helpers for footer-sync commands.

pub mod config;
pub mod discover;
pub mod document;
