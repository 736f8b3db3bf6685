//! JUnit major-version detection from dependency paths.

use std::sync::LazyLock;

use clap::ValueEnum;
use jpipe_core::junit::{CLASSIC_PATTERN, JUNIT_MARKER, JUPITER_PATTERN, JUPITER_VERSION, LEGACY_SEGMENT_INDEX};
use jpipe_core::split_classpath;
use regex::Regex;

static CLASSIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLASSIC_PATTERN).expect("INVARIANT: classic JUnit pattern is a valid regex"));

/// How the version token is derived from a JUnit dependency path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VersionStrategy {
    /// `junit-jupiter` means 5, otherwise the digit following `junit-`.
    #[default]
    Pattern,
    /// The artifact name in the fourth `/`-separated segment, up to its first `.` (e.g. `junit-4`).
    PathSegment,
}

impl VersionStrategy {
    /// Version token for one dependency path, if it names a JUnit artifact.
    pub fn match_path(self, path: &str) -> Option<String> {
        match self {
            VersionStrategy::Pattern => {
                if path.contains(JUPITER_PATTERN) {
                    Some(JUPITER_VERSION.to_string())
                } else {
                    CLASSIC_REGEX
                        .captures(path)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.as_str().to_string())
                }
            }
            VersionStrategy::PathSegment => {
                if !path.contains(JUNIT_MARKER) {
                    return None;
                }
                let segment = path.split('/').nth(LEGACY_SEGMENT_INDEX);
                if segment.is_none() {
                    tracing::warn!(path, "JUnit dependency too shallow for path-segment detection");
                }
                segment.map(|s| s.split('.').next().unwrap_or(s).to_string())
            }
        }
    }
}

/// Detect the JUnit version from a `:`-joined dependency line. The first matching entry wins.
pub fn detect_version(dependency_line: &str, strategy: VersionStrategy) -> Option<String> {
    let mut matches = split_classpath(dependency_line).filter_map(|path| strategy.match_path(path).map(|v| (path, v)));
    let (path, version) = matches.next()?;
    tracing::debug!(path, version = %version, ?strategy, "detected JUnit version");

    let ignored: Vec<String> = matches.map(|(_, v)| v).filter(|v| *v != version).collect();
    if !ignored.is_empty() {
        tracing::warn!(kept = %version, ?ignored, "several JUnit versions on the classpath, keeping the first");
    }
    Some(version)
}
