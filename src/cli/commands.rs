//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use jpipe_core::MarkerConvention;

use crate::argfile::{JavacArgsRequest, write_javac_args};
use crate::counters::count_markers;
use crate::testinfo::{self, ExtractRequest};

use super::{CliResult, ExitCode};

/// Build and write a javac argument file.
pub fn javac_args(request: &JavacArgsRequest) -> CliResult<ExitCode> {
    write_javac_args(request)?;
    Ok(ExitCode::SUCCESS)
}

/// Print the distinct source/test marker counts under `root`.
pub fn count(root: &Path, convention: MarkerConvention) -> CliResult<ExitCode> {
    let counts = count_markers(root, convention)?;
    print!("{counts}");
    Ok(ExitCode::SUCCESS)
}

/// Extract test information from the reports and write the artifacts.
pub fn extract_test_info(request: &ExtractRequest) -> CliResult<ExitCode> {
    let summary = testinfo::extract_test_info(request)?;
    tracing::info!(
        reports = summary.reports,
        suites = summary.suites,
        clean = summary.clean_cases,
        removed = summary.removed_cases,
        version = summary.version.as_deref().unwrap_or("unknown"),
        "test info extracted"
    );
    Ok(ExitCode::SUCCESS)
}
