//! End-to-end tests for the test-info extractor

use std::fs;
use std::path::Path;

use jpipe::errors::JpipeError;
use jpipe::testinfo::{ExtractRequest, VersionStrategy, extract_test_info};
use jpipe_core::artifacts;

const FOO_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="com.acme.FooTest" tests="2" failures="1">
  <testcase classname="com.acme.FooTest" name="adds" time="0.001"/>
  <testcase classname="com.acme.FooTest" name="divides" time="0.002">
    <failure message="expected: 2 but was: 3" type="org.opentest4j.AssertionFailedError">at FooTest.divides</failure>
  </testcase>
</testsuite>
"#;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new(dependencies: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["classes", "test-classes", "reports", "out"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        fs::write(dir.path().join("deps.txt"), dependencies).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn report(&self, rel: &str, xml: &str) {
        let path = self.root().join("reports").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, xml).unwrap();
    }

    fn request(&self, strategy: VersionStrategy) -> ExtractRequest {
        ExtractRequest {
            dependency: self.root().join("deps.txt"),
            classes: self.root().join("classes"),
            test_classes: self.root().join("test-classes"),
            reports: self.root().join("reports"),
            output: self.root().join("out"),
            version_strategy: strategy,
        }
    }

    fn artifact(&self, name: &str) -> String {
        fs::read_to_string(self.root().join("out").join(name)).unwrap()
    }
}

#[test]
fn test_single_suite_report_splits_clean_and_removed_cases() {
    let ws = Workspace::new("/repo/libs/junit-4.13.jar\n");
    ws.report("TEST-com.acme.FooTest.xml", FOO_REPORT);

    let summary = extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap();
    assert_eq!(summary.reports, 1);
    assert_eq!((summary.clean_cases, summary.removed_cases), (1, 1));

    assert_eq!(ws.artifact(artifacts::TESTCASES_FILE), "com.acme.FooTest#adds\n");
    assert_eq!(ws.artifact(artifacts::TESTSUITES_FILE), "com.acme.FooTest\n");
    insta::assert_snapshot!(ws.artifact(artifacts::REMOVED_FILE), @r#"
     ---------- com.acme.FooTest#divides ----------
    <failure message="expected: 2 but was: 3" type="org.opentest4j.AssertionFailedError">at FooTest.divides</failure>
    "#);
    assert_eq!(ws.artifact(artifacts::VERSION_FILE), "4");
}

#[test]
fn test_launcher_classpath_puts_test_classes_first() {
    let ws = Workspace::new("/repo/libs/junit-jupiter-5.9.0.jar\n");
    let req = ws.request(VersionStrategy::Pattern);
    let summary = extract_test_info(&req).unwrap();

    let expected = format!(
        "{}:{}:/repo/libs/junit-jupiter-5.9.0.jar",
        req.test_classes.display(),
        req.classes.display()
    );
    assert_eq!(summary.classpath, expected);
    assert_eq!(
        ws.artifact(artifacts::JUNIT_ARGS_FILE),
        format!("--classpath {expected}\n")
    );
    assert_eq!(ws.artifact(artifacts::VERSION_FILE), "5");
}

#[test]
fn test_no_reports_and_no_dependencies() {
    let ws = Workspace::new("");
    let req = ws.request(VersionStrategy::Pattern);
    let summary = extract_test_info(&req).unwrap();

    assert_eq!(summary.reports, 0);
    assert_eq!(summary.version, None);
    for name in artifacts::EXTRACTOR_OUTPUTS {
        assert!(ws.root().join("out").join(name).exists(), "{name} not written");
    }
    assert_eq!(ws.artifact(artifacts::TESTCASES_FILE), "");
    assert_eq!(ws.artifact(artifacts::VERSION_FILE), "");
    assert_eq!(
        ws.artifact(artifacts::JUNIT_ARGS_FILE),
        format!("--classpath {}:{}\n", req.test_classes.display(), req.classes.display())
    );
}

#[test]
fn test_container_reports_record_child_suites() {
    let ws = Workspace::new("");
    ws.report(
        "nested/TESTS-all.xml",
        r#"<testsuites>
  <testsuite name="A"><testcase classname="A" name="a"/></testsuite>
  <testsuite name="B"><testcase classname="B" name="b"/></testsuite>
</testsuites>"#,
    );
    ws.report("notes.txt", "<not a report");

    let summary = extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap();
    assert_eq!(summary.reports, 1);
    assert_eq!(ws.artifact(artifacts::TESTSUITES_FILE), "A\nB\n");
    assert_eq!(ws.artifact(artifacts::TESTCASES_FILE), "");
}

#[test]
fn test_duplicates_across_reports_are_kept() {
    let ws = Workspace::new("");
    ws.report("a/TEST-foo.xml", FOO_REPORT);
    ws.report("b/TEST-foo.xml", FOO_REPORT);

    extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap();
    assert_eq!(
        ws.artifact(artifacts::TESTCASES_FILE),
        "com.acme.FooTest#adds\ncom.acme.FooTest#adds\n"
    );
    assert_eq!(ws.artifact(artifacts::TESTSUITES_FILE).lines().count(), 2);
    assert_eq!(ws.artifact(artifacts::REMOVED_FILE).lines().count(), 4);
}

#[test]
fn test_malformed_report_aborts_without_writing() {
    let ws = Workspace::new("");
    ws.report("TEST-good.xml", FOO_REPORT);
    ws.report("TEST-bad.xml", r#"<testsuite name="Bad"><testcase classname="X" name="y">"#);

    let err = extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap_err();
    assert!(matches!(err, JpipeError::Xml { .. }));
    assert!(!ws.root().join("out").join(artifacts::TESTCASES_FILE).exists());
}

#[test]
fn test_missing_output_directory_is_rejected() {
    let ws = Workspace::new("");
    let mut req = ws.request(VersionStrategy::Pattern);
    req.output = ws.root().join("missing");
    assert!(matches!(extract_test_info(&req), Err(JpipeError::NotADirectory { .. })));
}

#[test]
fn test_path_segment_strategy_writes_artifact_token() {
    let ws = Workspace::new("/repo/libs/junit-4.13.jar:/repo/libs/hamcrest-core-1.3.jar");
    extract_test_info(&ws.request(VersionStrategy::PathSegment)).unwrap();
    assert_eq!(ws.artifact(artifacts::VERSION_FILE), "junit-4");
}

#[test]
fn test_latin1_report_is_decoded_per_declaration() {
    let ws = Workspace::new("");
    let mut xml = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<testsuite name="S"><testcase classname="C" name="caf"#
        .to_vec();
    xml.push(0xE9);
    xml.extend_from_slice(br#""/></testsuite>"#);
    fs::write(ws.root().join("reports").join("TEST-latin1.xml"), xml).unwrap();

    extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap();
    assert_eq!(ws.artifact(artifacts::TESTCASES_FILE), "C#café\n");
}

#[test]
fn test_undeclared_non_utf8_report_is_fatal() {
    let ws = Workspace::new("");
    let mut xml = br#"<testsuite name="caf"#.to_vec();
    xml.push(0xE9);
    xml.extend_from_slice(br#""/>"#);
    fs::write(ws.root().join("reports").join("TEST-bad.xml"), xml).unwrap();

    let err = extract_test_info(&ws.request(VersionStrategy::Pattern)).unwrap_err();
    assert!(matches!(err, JpipeError::Xml { .. }));
    assert!(!ws.root().join("out").join(artifacts::TESTCASES_FILE).exists());
}
