//! Marker-file conventions recognized by the distinct-content counters.
//!
//! A marker file is a specifically named file left somewhere in a build tree; its content is one aggregate build
//! artifact (a classpath, an argument file). Two naming conventions exist, one per generation of the pipeline.

/// Which distinct set a marker's content is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerRole {
    Source,
    Test,
}

/// How much of a marker file is taken as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// The first line, including its line terminator when present.
    FirstLine,
    /// The whole file.
    FullContent,
}

/// A recognized marker file name and the set it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    pub file_name: &'static str,
    pub role: MarkerRole,
}

/// Marker naming convention used by a build tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerConvention {
    /// `source_cp` / `test_cp`, one classpath on the first line.
    Classpath,
    /// `args_source_v1.txt`, `args_source_v2.txt` / `args_test_v2.txt`, whole argument files.
    ArgFiles,
}

const CLASSPATH_MARKERS: &[MarkerSpec] = &[
    MarkerSpec {
        file_name: "source_cp",
        role: MarkerRole::Source,
    },
    MarkerSpec {
        file_name: "test_cp",
        role: MarkerRole::Test,
    },
];

const ARG_FILE_MARKERS: &[MarkerSpec] = &[
    MarkerSpec {
        file_name: "args_source_v1.txt",
        role: MarkerRole::Source,
    },
    MarkerSpec {
        file_name: "args_source_v2.txt",
        role: MarkerRole::Source,
    },
    MarkerSpec {
        file_name: "args_test_v2.txt",
        role: MarkerRole::Test,
    },
];

impl MarkerConvention {
    /// All conventions, in a stable order.
    pub const ALL: &'static [MarkerConvention] = &[MarkerConvention::Classpath, MarkerConvention::ArgFiles];

    /// The marker files this convention recognizes.
    pub fn markers(self) -> &'static [MarkerSpec] {
        match self {
            MarkerConvention::Classpath => CLASSPATH_MARKERS,
            MarkerConvention::ArgFiles => ARG_FILE_MARKERS,
        }
    }

    pub fn read_mode(self) -> ReadMode {
        match self {
            MarkerConvention::Classpath => ReadMode::FirstLine,
            MarkerConvention::ArgFiles => ReadMode::FullContent,
        }
    }

    /// Plural noun used in report lines (`Number of distinct source <noun>: ...`).
    pub fn noun(self) -> &'static str {
        match self {
            MarkerConvention::Classpath => "classpaths",
            MarkerConvention::ArgFiles => "arg files",
        }
    }

    /// Resolve a file's base name to the role it plays under this convention.
    ///
    /// ## Returns
    /// - (`Option<MarkerRole>`): `None` when the name is not a marker of this convention.
    pub fn role_for(self, file_name: &str) -> Option<MarkerRole> {
        self.markers()
            .iter()
            .find(|spec| spec.file_name == file_name)
            .map(|spec| spec.role)
    }
}

impl MarkerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerRole::Source => "source",
            MarkerRole::Test => "test",
        }
    }
}
