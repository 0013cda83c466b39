//! Generated artifact kinds and their locations.

use std::fmt;
use std::path::PathBuf;
use xtypes_schema::Language;

/// Kind of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `include/_<Class>.hpp`, regenerated every run.
    BaseHeader,
    /// `src/_<Class>.cpp`, regenerated every run.
    BaseSource,
    /// `include/<Class>.hpp` under the skeleton directory, seeded once.
    SkeletonHeader,
    /// `src/<Class>.cpp` under the skeleton directory, seeded once.
    SkeletonSource,
    /// `pybind/py<Class>.cpp`.
    Binding,
    /// `python/<Class>.pyi`.
    Stub,
    /// `include/xtypes.hpp`, one per batch.
    UmbrellaHeader,
    /// `pybind/pybind11_module.cpp`, one per batch.
    BindingModule,
}

impl ArtifactKind {
    /// Per-class artifacts of the C++ target.
    pub const CPP_CLASS: [ArtifactKind; 4] = [
        ArtifactKind::BaseHeader,
        ArtifactKind::BaseSource,
        ArtifactKind::SkeletonHeader,
        ArtifactKind::SkeletonSource,
    ];

    /// Per-class artifacts of the Python target.
    pub const PYTHON_CLASS: [ArtifactKind; 2] = [ArtifactKind::Binding, ArtifactKind::Stub];

    /// Returns true for user-editable files that are only written once.
    #[must_use]
    pub const fn is_skeleton(&self) -> bool {
        matches!(self, Self::SkeletonHeader | Self::SkeletonSource)
    }

    /// Returns true for artifacts produced once per batch.
    #[must_use]
    pub const fn is_batch(&self) -> bool {
        matches!(self, Self::UmbrellaHeader | Self::BindingModule)
    }

    /// Returns the language whose rendering tables feed the artifact.
    #[must_use]
    pub const fn source_language(&self) -> Language {
        match self {
            Self::Stub => Language::Python,
            _ => Language::Cpp,
        }
    }

    /// Returns the path relative to the output (or skeleton) directory.
    #[must_use]
    pub fn relative_path(&self, class: &str) -> PathBuf {
        match self {
            Self::BaseHeader => PathBuf::from("include").join(format!("_{class}.hpp")),
            Self::BaseSource => PathBuf::from("src").join(format!("_{class}.cpp")),
            Self::SkeletonHeader => PathBuf::from("include").join(format!("{class}.hpp")),
            Self::SkeletonSource => PathBuf::from("src").join(format!("{class}.cpp")),
            Self::Binding => PathBuf::from("pybind").join(format!("py{class}.cpp")),
            Self::Stub => PathBuf::from("python").join(format!("{class}.pyi")),
            Self::UmbrellaHeader => PathBuf::from("include").join("xtypes.hpp"),
            Self::BindingModule => PathBuf::from("pybind").join("pybind11_module.cpp"),
        }
    }

    /// Returns the line comment prefix of the artifact's file format.
    #[must_use]
    pub const fn comment_prefix(&self) -> &'static str {
        match self {
            Self::Stub => "#",
            _ => "//",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BaseHeader => "base header",
            Self::BaseSource => "base source",
            Self::SkeletonHeader => "skeleton header",
            Self::SkeletonSource => "skeleton source",
            Self::Binding => "binding source",
            Self::Stub => "typing stub",
            Self::UmbrellaHeader => "umbrella header",
            Self::BindingModule => "binding module",
        };
        f.write_str(name)
    }
}

/// What happened to an artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content was written.
    Written,
    /// Existing content matched after the header; nothing written.
    Unchanged,
    /// Existing skeleton kept untouched.
    Preserved,
}

/// Record of every artifact handled in a run.
#[derive(Debug, Clone, Default)]
pub struct EmittedArtifacts {
    /// Artifacts with their outcome, in emission order.
    pub entries: Vec<(PathBuf, ArtifactKind, WriteOutcome)>,
}

impl EmittedArtifacts {
    /// Records an artifact.
    pub fn record(&mut self, path: PathBuf, kind: ArtifactKind, outcome: WriteOutcome) {
        self.entries.push((path, kind, outcome));
    }

    /// Appends the records of another run.
    pub fn extend(&mut self, other: EmittedArtifacts) {
        self.entries.extend(other.entries);
    }

    /// Returns the paths with the given outcome.
    #[must_use]
    pub fn with_outcome(&self, outcome: WriteOutcome) -> Vec<&PathBuf> {
        self.entries
            .iter()
            .filter(|(_, _, o)| *o == outcome)
            .map(|(p, _, _)| p)
            .collect()
    }

    /// Returns the number of files actually written.
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.with_outcome(WriteOutcome::Written).len()
    }
}
