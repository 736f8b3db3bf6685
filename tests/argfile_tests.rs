//! Integration tests for the javac argument-file builder

use std::fs;
use std::path::Path;

use jpipe::argfile::{JavacArgsRequest, write_javac_args};
use jpipe::errors::JpipeError;

/// Project with `src/main/java/{App.java, util/Strings.java}` and a dependency file with `deps` as first line.
fn project(deps: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src/main/java");
    fs::create_dir_all(src.join("util")).unwrap();
    fs::write(src.join("App.java"), "class App {}").unwrap();
    fs::write(src.join("util/Strings.java"), "class Strings {}").unwrap();
    fs::write(dir.path().join("deps.txt"), deps).unwrap();
    dir
}

fn request(root: &Path) -> JavacArgsRequest {
    JavacArgsRequest {
        dependency: root.join("deps.txt"),
        project_path: root.to_path_buf(),
        classpath: "target/generated".to_string(),
        target: "target/classes".to_string(),
        sourcepath: "src/main/java".to_string(),
        source_files: root.join("src/main/java"),
        output: root.join("args_source_v2.txt"),
    }
}

#[test]
fn test_argfile_has_header_then_one_line_per_source() {
    let dir = project("/libs/a.jar:/libs/junit-4.13.jar\n");
    let req = request(dir.path());
    write_javac_args(&req).unwrap();

    let written = fs::read_to_string(&req.output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "-classpath target/generated:/libs/a.jar:/libs/junit-4.13.jar");
    assert_eq!(lines[1], "-sourcepath src/main/java");
    assert_eq!(lines[2], "-d target/classes");

    let mut sources = lines[3..].to_vec();
    sources.sort();
    assert_eq!(sources, vec!["src/main/java/App.java", "src/main/java/util/Strings.java"]);
}

#[test]
fn test_empty_dependency_line_leaves_classpath_alone() {
    let dir = project("");
    let req = request(dir.path());
    let args = write_javac_args(&req).unwrap();
    assert_eq!(args.classpath, "target/generated");

    let written = fs::read_to_string(&req.output).unwrap();
    assert!(written.starts_with("-classpath target/generated\n-sourcepath "));
}

#[test]
fn test_missing_dependency_file_is_fatal() {
    let dir = project("");
    fs::remove_file(dir.path().join("deps.txt")).unwrap();
    let req = request(dir.path());
    assert!(matches!(write_javac_args(&req), Err(JpipeError::Io { .. })));
    assert!(!req.output.exists());
}

#[test]
fn test_invalid_directories_are_rejected() {
    let dir = project("");

    let mut req = request(dir.path());
    req.source_files = dir.path().join("src/test/java");
    assert!(matches!(write_javac_args(&req), Err(JpipeError::NotADirectory { .. })));

    let mut req = request(dir.path());
    req.output = dir.path().join("out/args.txt");
    assert!(matches!(write_javac_args(&req), Err(JpipeError::NotADirectory { .. })));
}
