//! Logging utilities for stackrun
//!
//! This module provides logging initialization and convenient re-exports
//! of the log crate macros for consistent logging across the library.

/// Initialize `env_logger` with `level` as the default filter.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

// Re-export the log crate and its macros
pub use log::{debug, error, info, trace, warn, LevelFilter};
