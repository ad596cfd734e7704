//! Deterministic text transforms shared by every footer-sync command.
//!
//! Core modules must be free of I/O side effects. They operate on document
//! text in memory and return deterministic outputs suitable for tests.

pub mod footer;
pub mod nav;
pub mod rewrite;
