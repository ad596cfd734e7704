//! Stable exit codes for footer-sync CLI commands.

/// Command succeeded (or `check` found nothing to rewrite).
pub const OK: i32 = 0;
/// Command failed due to invalid config, unreadable documents, or other errors.
pub const INVALID: i32 = 1;
/// `footer-sync check` found documents whose footer block would change.
pub const DRIFT: i32 = 2;
