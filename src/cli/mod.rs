//! CLI module for jpipe
//!
//! ## Commands
//!
//! - `javac-args` - Write a `javac` argument file for a source tree
//! - `count` - Count distinct marker contents under a build tree (`--convention`)
//! - `count-arg-files` / `count-cp` - `count` with the arg-file / classpath convention fixed
//! - `extract-test-info` - Extract test case, suite and JUnit information from XML reports
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Directory and output-file flags are validated while
//! parsing, so bad paths surface as usage errors. Command functions return `CliResult<T>` instead of calling
//! `process::exit`; only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use jpipe_core::MarkerConvention;

use crate::errors::{JpipeError, JpipeResult};
use crate::paths::{validate_directory, validate_file_parent};
use crate::testinfo::VersionStrategy;
use crate::version::JPIPE_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<JpipeError> for CliError {
    fn from(err: JpipeError) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Helper tools for a Java build/test pipeline
#[derive(Parser, Debug)]
#[command(name = "jpipe")]
#[command(version = JPIPE_VERSION)]
#[command(about = "Helper tools for a Java build/test pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Marker naming convention, as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConventionArg {
    /// `source_cp` / `test_cp`, first line only
    Classpath,
    /// `args_source_v1.txt`, `args_source_v2.txt` / `args_test_v2.txt`, whole file
    ArgFiles,
}

impl From<ConventionArg> for MarkerConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Classpath => MarkerConvention::Classpath,
            ConventionArg::ArgFiles => MarkerConvention::ArgFiles,
        }
    }
}

fn existing_dir(s: &str) -> JpipeResult<PathBuf> {
    validate_directory(s)
}

fn creatable_file(s: &str) -> JpipeResult<PathBuf> {
    validate_file_parent(s)
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a javac argument file (-classpath, -sourcepath, -d, then one source per line)
    JavacArgs {
        /// File whose first line is the ':'-joined dependency archive list
        #[arg(long, value_name = "FILE", value_parser = creatable_file)]
        dependency: PathBuf,
        /// Project root stripped from every source path
        #[arg(long = "projectpath", value_name = "DIR", value_parser = existing_dir)]
        project_path: PathBuf,
        /// Classpath placed before the dependencies
        #[arg(long, value_name = "CLASSPATH")]
        classpath: String,
        /// Class output directory (-d)
        #[arg(long, value_name = "DIR")]
        target: String,
        /// Source path (-sourcepath)
        #[arg(long, value_name = "PATH")]
        sourcepath: String,
        /// Root searched recursively for source files
        #[arg(long = "sourcefiles", value_name = "DIR", value_parser = existing_dir)]
        source_files: PathBuf,
        /// Argument file to write
        #[arg(long, value_name = "FILE", value_parser = creatable_file)]
        output: PathBuf,
    },

    /// Count distinct marker file contents under a build tree
    Count {
        /// Build tree to walk
        #[arg(long, value_name = "DIR")]
        root: PathBuf,
        /// Marker naming convention
        #[arg(long, value_enum)]
        convention: ConventionArg,
    },

    /// Count distinct javac argument files (args_source_v1/v2.txt, args_test_v2.txt)
    CountArgFiles {
        /// Build tree to walk
        #[arg(long = "argsfiles", value_name = "DIR")]
        args_files: PathBuf,
    },

    /// Count distinct classpaths (source_cp, test_cp)
    CountCp {
        /// Build tree to walk
        #[arg(long, value_name = "DIR")]
        analyzer: PathBuf,
    },

    /// Extract test cases, suites, launcher classpath and JUnit version from XML reports
    ExtractTestInfo {
        /// File whose first line is the ':'-joined dependency archive list
        #[arg(long, value_name = "FILE", value_parser = creatable_file)]
        dependency: PathBuf,
        /// Compiled main classes
        #[arg(long, value_name = "DIR", value_parser = existing_dir)]
        classes: PathBuf,
        /// Compiled test classes
        #[arg(long = "testclasses", value_name = "DIR", value_parser = existing_dir)]
        test_classes: PathBuf,
        /// Directory searched recursively for .xml reports
        #[arg(long, value_name = "DIR", value_parser = existing_dir)]
        reports: PathBuf,
        /// Directory receiving the generated artifacts
        #[arg(long, value_name = "DIR", value_parser = existing_dir)]
        output: PathBuf,
        /// How the JUnit version is read from dependency paths
        #[arg(long, value_enum, default_value_t = VersionStrategy::Pattern)]
        version_strategy: VersionStrategy,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::JavacArgs {
            dependency,
            project_path,
            classpath,
            target,
            sourcepath,
            source_files,
            output,
        } => commands::javac_args(&crate::argfile::JavacArgsRequest {
            dependency,
            project_path,
            classpath,
            target,
            sourcepath,
            source_files,
            output,
        }),
        Command::Count { root, convention } => commands::count(&root, convention.into()),
        Command::CountArgFiles { args_files } => commands::count(&args_files, MarkerConvention::ArgFiles),
        Command::CountCp { analyzer } => commands::count(&analyzer, MarkerConvention::Classpath),
        Command::ExtractTestInfo {
            dependency,
            classes,
            test_classes,
            reports,
            output,
            version_strategy,
        } => commands::extract_test_info(&crate::testinfo::ExtractRequest {
            dependency,
            classes,
            test_classes,
            reports,
            output,
            version_strategy,
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
