//! Names and flag spellings of the generated artifacts.

/// Clean test case identifiers, one per line.
pub const TESTCASES_FILE: &str = "testcases.txt";

/// Test suite names, one per line.
pub const TESTSUITES_FILE: &str = "testsuites.txt";

/// Failed, errored and skipped test cases with their report detail.
pub const REMOVED_FILE: &str = "removed.txt";

/// JUnit launcher argument file.
pub const JUNIT_ARGS_FILE: &str = "args_junit.txt";

/// Detected JUnit major version.
pub const VERSION_FILE: &str = "version.txt";

/// Every file the test-info extractor writes, in write order.
pub const EXTRACTOR_OUTPUTS: &[&str] = &[TESTCASES_FILE, TESTSUITES_FILE, REMOVED_FILE, JUNIT_ARGS_FILE, VERSION_FILE];

/// Extension of test report documents.
pub const REPORT_EXTENSION: &str = ".xml";

/// `javac` argument-file flags.
pub mod javac {
    pub const CLASSPATH: &str = "-classpath";
    pub const SOURCEPATH: &str = "-sourcepath";
    pub const DESTINATION: &str = "-d";
}

/// JUnit console launcher flags.
pub mod junit_launcher {
    pub const CLASSPATH: &str = "--classpath";
}

/// Dashes framing a test case identifier in the removed-cases artifact.
pub const REMOVED_BLOCK_RULE: &str = "----------";

/// Separator between a test case's class name and method name.
pub const TEST_ID_SEPARATOR: char = '#';

/// Format the header line of a removed-case block: ` ---------- <id> ----------`.
pub fn removed_block_header(test_id: &str) -> String {
    format!(" {REMOVED_BLOCK_RULE} {test_id} {REMOVED_BLOCK_RULE}")
}

/// Report element and attribute names.
pub mod report {
    pub const TESTSUITE: &str = "testsuite";
    pub const TESTCASE: &str = "testcase";
    pub const NAME: &str = "name";
    pub const CLASSNAME: &str = "classname";
}
