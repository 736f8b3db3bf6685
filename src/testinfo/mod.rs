//! Test-info extraction from XML test reports.
//!
//! One pass over every `.xml` report under a directory produces five artifacts in the output directory:
//!
//! - `testcases.txt`: clean test case ids (`<classname>#<name>`), one per line
//! - `testsuites.txt`: suite names, one per line
//! - `removed.txt`: a header line per failed/errored/skipped case followed by its child elements
//! - `args_junit.txt`: `--classpath <testclasses>:<classes>[:<dependencies>]`
//! - `version.txt`: the detected JUnit major version, or nothing
//!
//! Duplicates across reports are kept. An unreadable or malformed report, or a missing dependency file, aborts the
//! run before anything is written.

pub mod junit;
pub mod report;

use std::path::PathBuf;

use jpipe_core::artifacts::{self, junit_launcher};
use jpipe_core::join_classpath;

use crate::errors::JpipeResult;
use crate::output::write_atomic;
use crate::paths::{list_files, read_dependency_line, validate_directory, validate_file_parent};

pub use junit::{VersionStrategy, detect_version};
pub use report::{ReportDocument, TestCaseRecord, decode_report, parse_report, read_report};

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub dependency: PathBuf,
    pub classes: PathBuf,
    pub test_classes: PathBuf,
    pub reports: PathBuf,
    pub output: PathBuf,
    pub version_strategy: VersionStrategy,
}

/// Text of the three report-derived artifacts, accumulated across documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestInfo {
    pub testcases: String,
    pub testsuites: String,
    pub removed: String,
    pub clean_cases: usize,
    pub removed_cases: usize,
    pub suites: usize,
}

impl TestInfo {
    /// Append one parsed report.
    pub fn record(&mut self, doc: &ReportDocument) {
        for suite in &doc.suites {
            self.testsuites.push_str(suite);
            self.testsuites.push('\n');
            self.suites += 1;
        }
        for case in &doc.cases {
            let id = case.id();
            if case.is_clean() {
                self.testcases.push_str(&id);
                self.testcases.push('\n');
                self.clean_cases += 1;
            } else {
                self.removed.push_str(&artifacts::removed_block_header(&id));
                self.removed.push('\n');
                for detail in &case.details {
                    self.removed.push_str(detail);
                    self.removed.push('\n');
                }
                self.removed_cases += 1;
            }
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub reports: usize,
    pub suites: usize,
    pub clean_cases: usize,
    pub removed_cases: usize,
    pub classpath: String,
    pub version: Option<String>,
}

/// Classpath handed to the JUnit launcher.
pub fn junit_classpath(test_classes: &str, classes: &str, dependency_line: &str) -> String {
    let head = join_classpath(test_classes, classes);
    join_classpath(&head, dependency_line)
}

/// Parse every report under `request.reports` and write the five artifacts into `request.output`.
///
/// ## Errors
///
/// - `NotADirectory` for a missing classes, test-classes, reports or output directory.
/// - `Xml` / `MissingAttribute` for the first bad report; `Io` for unreadable inputs or outputs.
pub fn extract_test_info(request: &ExtractRequest) -> JpipeResult<ExtractionSummary> {
    validate_file_parent(&request.dependency)?;
    validate_directory(&request.classes)?;
    validate_directory(&request.test_classes)?;
    let reports_dir = validate_directory(&request.reports)?;
    let output_dir = validate_directory(&request.output)?;

    let reports = list_files(&reports_dir, Some(artifacts::REPORT_EXTENSION))?;
    let mut info = TestInfo::default();
    for path in &reports {
        let doc = read_report(path)?;
        tracing::debug!(
            report = %path.display(),
            root = %doc.root_tag,
            suites = doc.suites.len(),
            cases = doc.cases.len(),
            "parsed report"
        );
        info.record(&doc);
    }

    let dependency_line = read_dependency_line(&request.dependency)?;

    let classpath = junit_classpath(
        &request.test_classes.to_string_lossy(),
        &request.classes.to_string_lossy(),
        &dependency_line,
    );
    let version = detect_version(&dependency_line, request.version_strategy);
    if version.is_none() {
        tracing::warn!(dependency = %request.dependency.display(), "no JUnit dependency recognized");
    }

    let launcher_args = format!("{} {}\n", junit_launcher::CLASSPATH, classpath);
    // Same order as `artifacts::EXTRACTOR_OUTPUTS`.
    let contents = [
        info.testcases.as_str(),
        info.testsuites.as_str(),
        info.removed.as_str(),
        launcher_args.as_str(),
        version.as_deref().unwrap_or(""),
    ];
    debug_assert_eq!(contents.len(), artifacts::EXTRACTOR_OUTPUTS.len());
    for (name, text) in artifacts::EXTRACTOR_OUTPUTS.iter().zip(contents) {
        write_atomic(output_dir.join(name), text)?;
    }

    Ok(ExtractionSummary {
        reports: reports.len(),
        suites: info.suites,
        clean_cases: info.clean_cases,
        removed_cases: info.removed_cases,
        classpath,
        version,
    })
}
