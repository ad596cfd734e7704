//! Keeps static-site footer link blocks in step with the page navigation.
//!
//! Every page carries a `<nav class="nav-links">` block listing the site's
//! links. The footer repeats those links inside `<div class="footer-links">`.
//! This crate rewrites the footer block from the nav block, page by page.
//!
//! - **[`core`]**: Pure text logic (nav lookup, anchor extraction, footer
//!   rendering and substitution). No I/O.
//! - **[`io`]**: Filesystem side effects (discovery, document read/write, config).
//!
//! [`sync`] coordinates both to implement the CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sync;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
