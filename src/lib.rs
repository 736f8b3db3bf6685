#![forbid(unsafe_code)]
//! jpipe: helper tools for a Java build/test pipeline
//!
//! Each tool is a single-pass, file-to-file transformation invoked as one step of an external build:
//!
//! - [`argfile`]: build a `javac` argument file from a dependency list and a source tree.
//! - [`counters`]: count the distinct classpaths / argument files left as marker files in a build tree.
//! - [`testinfo`]: extract passed, failed and suite information from XML test reports, plus the launcher classpath
//!   and the JUnit major version.
//!
//! ## Panic Policy
//!
//! - **Production code**: every failure is a [`JpipeError`] propagated with `?`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: use `.expect("INVARIANT: reason")` (e.g. compiling a constant regex).

pub mod argfile;
pub mod cli;
pub mod counters;
pub mod errors;
pub mod output;
pub mod paths;
pub mod testinfo;
pub mod version;

pub use argfile::{JavacArgs, JavacArgsRequest, build_javac_args, write_javac_args};
pub use counters::{MarkerCounts, count_markers};
pub use errors::{JpipeError, JpipeResult};
pub use paths::{list_files, validate_directory, validate_file_parent};
pub use testinfo::{ExtractRequest, ExtractionSummary, VersionStrategy, extract_test_info};

pub use jpipe_core::MarkerConvention;
