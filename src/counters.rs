//! Distinct-content counters for marker files spread over a build tree.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use jpipe_core::{MarkerConvention, MarkerRole, ReadMode};

use crate::errors::{JpipeError, JpipeResult};
use crate::paths::list_files;

/// Distinct marker values found under one root, split by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCounts {
    pub convention: MarkerConvention,
    pub source: BTreeSet<String>,
    pub test: BTreeSet<String>,
}

impl MarkerCounts {
    pub fn new(convention: MarkerConvention) -> Self {
        Self {
            convention,
            source: BTreeSet::new(),
            test: BTreeSet::new(),
        }
    }

    /// Record one marker value. Values are compared byte for byte, whitespace included.
    pub fn insert(&mut self, role: MarkerRole, value: String) -> bool {
        match role {
            MarkerRole::Source => self.source.insert(value),
            MarkerRole::Test => self.test.insert(value),
        }
    }

    pub fn distinct(&self, role: MarkerRole) -> usize {
        match role {
            MarkerRole::Source => self.source.len(),
            MarkerRole::Test => self.test.len(),
        }
    }

    /// The two human-readable report lines, source first.
    pub fn report_lines(&self) -> [String; 2] {
        [MarkerRole::Source, MarkerRole::Test].map(|role| {
            format!(
                "Number of distinct {} {}: {}",
                role.as_str(),
                self.convention.noun(),
                self.distinct(role)
            )
        })
    }
}

impl fmt::Display for MarkerCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [source, test] = self.report_lines();
        writeln!(f, "{source}")?;
        writeln!(f, "{test}")
    }
}

/// First line of `contents`, line terminator kept when present.
pub fn first_line(contents: &str) -> &str {
    contents.split_inclusive('\n').next().unwrap_or("")
}

/// Translate `\r\n` and lone `\r` line endings to `\n`, so marker files differing only in line endings compare equal.
pub fn normalize_newlines(contents: &str) -> Cow<'_, str> {
    if contents.contains('\r') {
        Cow::Owned(contents.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(contents)
    }
}

fn read_marker(path: &Path, mode: ReadMode) -> JpipeResult<String> {
    let raw = fs::read_to_string(path).map_err(|e| JpipeError::io("read marker file", path, e))?;
    let contents = normalize_newlines(&raw);
    Ok(match mode {
        ReadMode::FirstLine => first_line(&contents).to_string(),
        ReadMode::FullContent => contents.into_owned(),
    })
}

/// Walk `root` and collect the distinct values of every marker file recognized by `convention`.
///
/// ## Errors
///
/// - `Walk` if `root` is missing or cannot be traversed.
/// - `Io` if a marker file cannot be read.
pub fn count_markers(root: impl AsRef<Path>, convention: MarkerConvention) -> JpipeResult<MarkerCounts> {
    let root = root.as_ref();
    let mut counts = MarkerCounts::new(convention);

    for path in list_files(root, None)? {
        let Some(role) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|name| convention.role_for(name))
        else {
            continue;
        };
        let value = read_marker(&path, convention.read_mode())?;
        let fresh = counts.insert(role, value);
        tracing::debug!(path = %path.display(), role = role.as_str(), fresh, "marker");
    }

    Ok(counts)
}
