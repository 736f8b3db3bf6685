//! `javac` argument-file builder.
//!
//! The generated file has a fixed shape:
//!
//! ```text
//! -classpath <classpath>[:<dependency line>]
//! -sourcepath <sourcepath>
//! -d <target>
//! <source file>        (one per discovered file, project-root prefix removed)
//! ```

use std::path::{Path, PathBuf};

use jpipe_core::artifacts::javac;
use jpipe_core::join_classpath;

use crate::errors::JpipeResult;
use crate::output::write_atomic;
use crate::paths::{list_files, read_dependency_line, validate_directory, validate_file_parent};

/// Inputs of one argument-file build.
#[derive(Debug, Clone)]
pub struct JavacArgsRequest {
    /// File whose first line is the `:`-joined dependency archive list (may be empty).
    pub dependency: PathBuf,
    /// Prefix stripped from every discovered source path.
    pub project_path: PathBuf,
    /// Literal classpath placed before the dependencies.
    pub classpath: String,
    /// Class output directory (`-d`).
    pub target: String,
    pub sourcepath: String,
    /// Root searched recursively for source files.
    pub source_files: PathBuf,
    pub output: PathBuf,
}

/// A rendered-ready `javac` argument file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavacArgs {
    pub classpath: String,
    pub sourcepath: String,
    pub target: String,
    pub sources: Vec<String>,
}

impl JavacArgs {
    /// Render the argument file. Source lines are joined by newlines with none after the last one.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} {}\n{} {}\n{} {}\n",
            javac::CLASSPATH,
            self.classpath,
            javac::SOURCEPATH,
            self.sourcepath,
            javac::DESTINATION,
            self.target
        );
        out.push_str(&self.sources.join("\n"));
        out
    }
}

/// Strip `project_root` from `path`, keeping `path` as-is when it lies outside the project.
pub fn relative_source_path(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Validate the request and assemble the argument file contents.
///
/// ## Errors
///
/// - `NotADirectory` if the project root or source root is not a directory, or the output's parent is missing.
/// - `Io` if the dependency file cannot be read; `Walk` if the source tree cannot be traversed.
pub fn build_javac_args(request: &JavacArgsRequest) -> JpipeResult<JavacArgs> {
    let project_root = validate_directory(&request.project_path)?;
    let source_root = validate_directory(&request.source_files)?;
    validate_file_parent(&request.dependency)?;
    validate_file_parent(&request.output)?;

    let dependency_line = read_dependency_line(&request.dependency)?;
    let sources = list_files(&source_root, None)?
        .iter()
        .map(|path| relative_source_path(path, &project_root))
        .collect();

    Ok(JavacArgs {
        classpath: join_classpath(&request.classpath, &dependency_line),
        sourcepath: request.sourcepath.clone(),
        target: request.target.clone(),
        sources,
    })
}

/// Build the argument file and write it to `request.output`.
pub fn write_javac_args(request: &JavacArgsRequest) -> JpipeResult<JavacArgs> {
    let args = build_javac_args(request)?;
    write_atomic(&request.output, &args.render())?;
    tracing::info!(
        output = %request.output.display(),
        sources = args.sources.len(),
        "javac argument file written"
    );
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_header_order() {
        let args = JavacArgs {
            classpath: "lib/x.jar:/libs/a.jar".to_string(),
            sourcepath: "src/main/java".to_string(),
            target: "target/classes".to_string(),
            sources: vec!["src/main/java/A.java".to_string(), "src/main/java/p/B.java".to_string()],
        };
        insta::assert_snapshot!(args.render(), @r"
        -classpath lib/x.jar:/libs/a.jar
        -sourcepath src/main/java
        -d target/classes
        src/main/java/A.java
        src/main/java/p/B.java
        ");
    }

    #[test]
    fn test_render_without_sources_ends_after_header() {
        let args = JavacArgs {
            classpath: "cp".to_string(),
            sourcepath: "sp".to_string(),
            target: "out".to_string(),
            sources: vec![],
        };
        assert_eq!(args.render(), "-classpath cp\n-sourcepath sp\n-d out\n");
    }

    #[test]
    fn test_relative_source_path() {
        let root = Path::new("/work/project");
        assert_eq!(
            relative_source_path(Path::new("/work/project/src/A.java"), root),
            "src/A.java"
        );
        assert_eq!(
            relative_source_path(Path::new("/elsewhere/B.java"), root),
            "/elsewhere/B.java"
        );
    }
}
