//! JUnit artifact naming used to infer the major version from dependency paths.

/// Substring marking a dependency path as JUnit-related.
pub const JUNIT_MARKER: &str = "junit";

/// JUnit 5 (Jupiter) artifacts, e.g. `junit-jupiter-api-5.9.0.jar`.
pub const JUPITER_PATTERN: &str = "junit-jupiter";

/// Version written for any Jupiter match.
pub const JUPITER_VERSION: &str = "5";

/// JUnit 3/4 artifacts, e.g. `junit-4.13.jar`; the capture is the major version digit.
pub const CLASSIC_PATTERN: &str = r"junit-(\d)";

/// Index of the `/`-separated segment holding the artifact name in the legacy layout (`/<a>/<b>/<artifact>`).
pub const LEGACY_SEGMENT_INDEX: usize = 3;

