//! jpipe version information.
//!
//! Taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time; the CLI's `--version` reads it from here.

/// The jpipe version string (for example, `0.1.0`).
pub const JPIPE_VERSION: &str = env!("CARGO_PKG_VERSION");
