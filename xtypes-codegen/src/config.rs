//! Generator configuration.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use xtypes_schema::Language;

/// Default output directory for generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "build/autogenerated_files";

/// Settings of one compilation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    project_name: String,
    output_dir: PathBuf,
    skeleton_dir: Option<PathBuf>,
    overwrite_skeletons: bool,
    languages: Vec<Language>,
    create_project_registry: bool,
}

impl GeneratorConfig {
    /// Creates a configuration for `project_name` with default settings.
    ///
    /// Defaults: all languages, output into [`DEFAULT_OUTPUT_DIR`], no
    /// skeletons, project registry enabled.
    #[must_use]
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skeleton_dir: None,
            overwrite_skeletons: false,
            languages: Language::ALL.to_vec(),
            create_project_registry: true,
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the directory receiving user-editable skeletons.
    #[must_use]
    pub fn skeleton_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.skeleton_dir = dir;
        self
    }

    /// Sets whether existing skeletons are overwritten.
    #[must_use]
    pub fn overwrite_skeletons(mut self, overwrite: bool) -> Self {
        self.overwrite_skeletons = overwrite;
        self
    }

    /// Sets the target languages; duplicates are dropped, order is kept.
    #[must_use]
    pub fn languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        self.languages.clear();
        for language in languages {
            if !self.languages.contains(&language) {
                self.languages.push(language);
            }
        }
        self
    }

    /// Sets whether a project registry is created.
    #[must_use]
    pub fn create_project_registry(mut self, create: bool) -> Self {
        self.create_project_registry = create;
        self
    }

    /// Returns the project name, used as C++ namespace.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the skeleton directory, if skeletons are generated.
    #[must_use]
    pub fn skeletons(&self) -> Option<&Path> {
        self.skeleton_dir.as_deref()
    }

    /// Returns whether existing skeletons are overwritten.
    #[must_use]
    pub fn overwrites_skeletons(&self) -> bool {
        self.overwrite_skeletons
    }

    /// Returns the target languages.
    #[must_use]
    pub fn target_languages(&self) -> &[Language] {
        &self.languages
    }

    /// Returns true if `language` is requested.
    #[must_use]
    pub fn targets(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    /// Returns whether a project registry is created.
    #[must_use]
    pub fn creates_project_registry(&self) -> bool {
        self.create_project_registry
    }
}

/// Parses target language names, expanding `ALL` to every language.
///
/// # Arguments
/// * `values` - Language names, matched case-insensitively
///
/// # Errors
/// Returns [`CodegenError::UnsupportedLanguage`] for an unknown name.
pub fn parse_languages<S: AsRef<str>>(values: &[S]) -> Result<Vec<Language>, CodegenError> {
    let mut languages = Vec::new();
    for value in values {
        let value = value.as_ref();
        if value.eq_ignore_ascii_case("ALL") {
            languages.extend(Language::ALL);
        } else {
            languages.push(Language::from_str(value)?);
        }
    }
    Ok(languages)
}
