//! Path validation, recursive file discovery and dependency-file reading.
//!
//! Traversal order is whatever `walkdir` yields for the filesystem at hand; callers must not rely on it being
//! sorted or stable across platforms.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{JpipeError, JpipeResult};

/// Require `path` to name an existing directory.
///
/// ## Errors
///
/// - `NotADirectory` when `path` does not exist or is not a directory.
pub fn validate_directory(path: impl AsRef<Path>) -> JpipeResult<PathBuf> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(JpipeError::not_a_directory(path))
    }
}

/// Require the parent directory of `path` to exist. The file itself may be missing (it is about to be created).
///
/// A bare file name has the current directory as its parent.
pub fn validate_file_parent(path: impl AsRef<Path>) -> JpipeResult<PathBuf> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => path,
    };
    if parent.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(JpipeError::not_a_directory(path))
    }
}

/// Final dot-suffix of a file name, dot included. Leading dots do not start an extension (`.xml` has none).
pub fn file_extension(file_name: &str) -> Option<&str> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    file_name[stem_start..].rfind('.').map(|i| &file_name[stem_start + i..])
}

/// Recursively list every file under `root`, optionally keeping only those whose extension is exactly
/// `extension` (dot included, e.g. `".xml"`).
///
/// ## Errors
///
/// - `Walk` when `root` is missing or a directory below it cannot be read.
pub fn list_files(root: impl AsRef<Path>, extension: Option<&str>) -> JpipeResult<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| JpipeError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(wanted) = extension {
            let name = entry.file_name().to_string_lossy();
            if file_extension(&name) != Some(wanted) {
                continue;
            }
        }
        files.push(entry.into_path());
    }

    tracing::debug!(root = %root.display(), count = files.len(), "listed files");
    Ok(files)
}

/// Read the first line of a dependency classpath file, line terminator removed.
///
/// An empty file yields an empty line.
pub fn read_dependency_line(path: impl AsRef<Path>) -> JpipeResult<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| JpipeError::io("open dependency file", path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| JpipeError::io("read dependency file", path, e))?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
