#![deny(missing_docs)]
//! Shared logging utilities for the catalog client workspace.
//!
//! This crate provides the `catalog_*` logging macros used across the
//! codebase, a minimal test initializer for the global logger, and helpers
//! that keep bearer credentials out of log output.

/// Number of leading characters of a secret kept visible by [`redact`].
pub const REDACT_VISIBLE_PREFIX: usize = 4;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Masks a secret (such as a bearer token) for inclusion in log lines.
///
/// Keeps the first [`REDACT_VISIBLE_PREFIX`] characters and the total length
/// so two tokens can still be told apart while debugging.
pub fn redact(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= REDACT_VISIBLE_PREFIX {
        return format!("***({len})");
    }
    let prefix: String = secret.chars().take(REDACT_VISIBLE_PREFIX).collect();
    format!("{prefix}***({len})")
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
