//! Provide the canonical vocabulary shared by the jpipe pipeline helpers.
//!
//! Every file name, flag spelling and JUnit naming convention the tools recognize or emit lives here, so the
//! library, the CLI and the tests resolve names through one registry instead of repeating string literals.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, no dependencies.
//! - Scope: marker-file conventions (counters), generated artifact names and argument-file flags (builder and
//!   extractor), JUnit artifact naming (version detection).

pub mod artifacts;
pub mod junit;
pub mod markers;

pub use markers::{MarkerConvention, MarkerRole, MarkerSpec, ReadMode};

/// Separator between entries of a classpath string.
pub const CLASSPATH_SEPARATOR: char = ':';

/// Join a classpath head with the first line of a dependency file.
///
/// ## Parameters
/// - `head`: the classpath entries that always come first.
/// - `dependency_line`: the dependency file's first line, line terminator already removed.
///
/// ## Returns
/// - (`String`): `head` alone when `dependency_line` is empty, otherwise `head:dependency_line`.
///
/// ## Examples
/// ```rust
/// use jpipe_core::join_classpath;
/// assert_eq!(join_classpath("target/classes", ""), "target/classes");
/// assert_eq!(join_classpath("target/classes", "/libs/a.jar"), "target/classes:/libs/a.jar");
/// ```
pub fn join_classpath(head: &str, dependency_line: &str) -> String {
    if dependency_line.is_empty() {
        head.to_string()
    } else {
        format!("{head}{CLASSPATH_SEPARATOR}{dependency_line}")
    }
}

/// Split a classpath string into its entries, keeping empty entries.
pub fn split_classpath(classpath: &str) -> impl Iterator<Item = &str> {
    classpath.split(CLASSPATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_classpath_without_dependencies() {
        assert_eq!(join_classpath("cp", ""), "cp");
    }

    #[test]
    fn test_join_classpath_with_dependencies() {
        assert_eq!(
            join_classpath("cp", "/libs/a.jar:/libs/junit-4.13.jar"),
            "cp:/libs/a.jar:/libs/junit-4.13.jar"
        );
    }

    #[test]
    fn test_split_classpath_keeps_empty_entries() {
        let entries: Vec<&str> = split_classpath(":a.jar::b.jar").collect();
        assert_eq!(entries, vec!["", "a.jar", "", "b.jar"]);
    }
}
