//! Error type shared by every jpipe tool.
//!
//! All failures are fatal: the CLI renders the error as a `miette` report and exits. There is no retry and no
//! partial-failure mode.

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the path utilities, the builders and the extractor.
#[derive(Debug, Error, Diagnostic)]
pub enum JpipeError {
    #[error("not a directory: {}", .path.display())]
    #[diagnostic(code(jpipe::not_a_directory), help("the path (or its parent, for output files) must already exist"))]
    NotADirectory { path: PathBuf },

    #[error("cannot {action} '{}'", .path.display())]
    #[diagnostic(code(jpipe::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot traverse '{}'", .root.display())]
    #[diagnostic(code(jpipe::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("malformed test report '{}': {message}", .path.display())]
    #[diagnostic(code(jpipe::xml), help("reports are parsed strictly; fix or remove the file and re-run"))]
    Xml { path: PathBuf, message: String },

    #[error("<{element}> in '{}' has no `{attribute}` attribute", .path.display())]
    #[diagnostic(code(jpipe::missing_attribute))]
    MissingAttribute {
        path: PathBuf,
        element: &'static str,
        attribute: &'static str,
    },

    #[error("cannot write '{}'", .path.display())]
    #[diagnostic(code(jpipe::persist))]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl JpipeError {
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        JpipeError::NotADirectory { path: path.into() }
    }

    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        JpipeError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for jpipe operations.
pub type JpipeResult<T> = Result<T, JpipeError>;
