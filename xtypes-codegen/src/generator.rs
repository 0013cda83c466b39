//! Emission driver.
//!
//! Loads schema documents, resolves them for every requested language and
//! writes the per-class and batch artifacts through a [`Templates`]
//! implementation. A whole batch is resolved, validated and ordered before
//! the first file is written.

use crate::artifact::{ArtifactKind, EmittedArtifacts};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::templates::{BatchContext, BuiltinTemplates, TemplateContext, Templates};
use crate::writer::{write_if_changed, write_skeleton};
use chrono::Local;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use xtypes_schema::{ClassIr, DependencyOrder, Language, load_document, order, resolve, validate_batch};

/// File name suffix of documents that only produce Python bindings.
pub const BINDING_ONLY_SUFFIX: &str = "xtype.yaml";

/// A schema document resolved for the configured languages.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    /// Source document.
    pub path: PathBuf,
    /// Class rendered with the C++ tables.
    pub cpp: ClassIr,
    /// Class rendered with the Python tables, when Python is requested.
    pub python: Option<ClassIr>,
    /// Whether only binding artifacts are emitted.
    pub binding_only: bool,
}

/// Result of a batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Class order and external namespace dependencies.
    pub order: DependencyOrder,
    /// Every artifact handled, with its outcome.
    pub artifacts: EmittedArtifacts,
}

/// Drives artifact emission for one project.
pub struct Generator<'a, T: Templates = BuiltinTemplates> {
    config: &'a GeneratorConfig,
    templates: T,
    context: TemplateContext,
}

impl<'a> Generator<'a, BuiltinTemplates> {
    /// Creates a generator using the built-in templates.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self::with_templates(config, BuiltinTemplates)
    }
}

impl<'a, T: Templates> Generator<'a, T> {
    /// Creates a generator rendering through `templates`.
    #[must_use]
    pub fn with_templates(config: &'a GeneratorConfig, templates: T) -> Self {
        Self {
            config,
            templates,
            context: TemplateContext::new(config.project_name(), Local::now()),
        }
    }

    /// Returns the per-run template values.
    #[must_use]
    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    /// Loads and resolves one schema document.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the document cannot be loaded and
    /// `CodegenError::Schema` if it cannot be resolved.
    pub fn resolve_file(&self, path: &Path) -> Result<ResolvedFile, CodegenError> {
        let document = load_document(path).map_err(|source| CodegenError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let project = self.config.project_name();
        let cpp = resolve(&document, project, Language::Cpp)?;
        let python = if self.config.targets(Language::Python) {
            Some(resolve(&document, project, Language::Python)?)
        } else {
            None
        };
        let binding_only = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(BINDING_ONLY_SUFFIX));

        tracing::debug!(path = %path.display(), class = %cpp.name, binding_only, "resolved");
        Ok(ResolvedFile {
            path: path.to_path_buf(),
            cpp,
            python,
            binding_only,
        })
    }

    /// Resolves one schema document and writes its artifacts.
    ///
    /// # Errors
    /// Returns `CodegenError` if resolution, rendering or writing fails.
    pub fn generate_file(&self, path: &Path) -> Result<EmittedArtifacts, CodegenError> {
        let file = self.resolve_file(path)?;
        self.emit(&file)
    }

    /// Writes the per-class artifacts of a resolved document.
    ///
    /// Base files go to the output directory. Skeletons are only written
    /// when a skeleton directory is configured, and existing ones are kept
    /// unless overwriting is enabled.
    ///
    /// # Errors
    /// Returns `CodegenError` if rendering or writing fails.
    pub fn emit(&self, file: &ResolvedFile) -> Result<EmittedArtifacts, CodegenError> {
        let mut emitted = EmittedArtifacts::default();
        let class = &file.cpp;

        if self.config.targets(Language::Cpp) && !file.binding_only {
            for kind in ArtifactKind::CPP_CLASS {
                let content = self.templates.render_class(kind, class, &self.context)?;
                let relative = kind.relative_path(&class.name);
                if kind.is_skeleton() {
                    let Some(dir) = self.config.skeletons() else {
                        continue;
                    };
                    let path = dir.join(relative);
                    let outcome = write_skeleton(&path, &content, self.config.overwrites_skeletons())?;
                    emitted.record(path, kind, outcome);
                } else {
                    let path = self.config.output().join(relative);
                    let outcome = write_if_changed(&path, &content)?;
                    emitted.record(path, kind, outcome);
                }
            }
        }

        if let Some(python) = &file.python {
            for kind in ArtifactKind::PYTHON_CLASS {
                let source = if kind.source_language() == Language::Python {
                    python
                } else {
                    class
                };
                let content = self.templates.render_class(kind, source, &self.context)?;
                let path = self.config.output().join(kind.relative_path(&class.name));
                let outcome = write_if_changed(&path, &content)?;
                emitted.record(path, kind, outcome);
            }
        }

        Ok(emitted)
    }

    /// Compiles every schema document under `input` as one batch.
    ///
    /// # Arguments
    /// * `input` - A schema file or a directory of `.yml`/`.yaml` files
    ///
    /// # Returns
    /// The dependency order and the emitted artifacts.
    ///
    /// # Errors
    /// Returns `CodegenError` if any document fails to resolve, the batch is
    /// inconsistent, or an artifact cannot be written. Nothing is written
    /// when resolution, validation or ordering fails.
    pub fn generate_batch(&self, input: &Path) -> Result<BatchSummary, CodegenError> {
        let files = collect_inputs(input)?
            .iter()
            .map(|path| self.resolve_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        let classes: Vec<ClassIr> = files.iter().map(|f| f.cpp.clone()).collect();
        validate_batch(&classes)?;
        let order = order(&classes)?;

        let mut artifacts = EmittedArtifacts::default();
        for file in &files {
            artifacts.extend(self.emit(file)?);
        }

        let batch = BatchContext {
            context: &self.context,
            classes: &order.classes,
            create_project_registry: self.config.creates_project_registry(),
        };
        let mut batch_kinds = Vec::new();
        if self.config.targets(Language::Python) {
            batch_kinds.push(ArtifactKind::BindingModule);
        }
        if self.config.targets(Language::Cpp) && self.config.creates_project_registry() {
            batch_kinds.push(ArtifactKind::UmbrellaHeader);
        }
        for kind in batch_kinds {
            let content = self.templates.render_batch(kind, &batch)?;
            let path = self.config.output().join(kind.relative_path(""));
            let outcome = write_if_changed(&path, &content)?;
            artifacts.record(path, kind, outcome);
        }

        tracing::info!(
            classes = order.classes.len(),
            written = artifacts.written_count(),
            "batch generated"
        );
        Ok(BatchSummary { order, artifacts })
    }
}

/// Lists the schema documents of an input path.
///
/// A file is returned as is. A directory yields its `.yml`/`.yaml` files
/// (not recursive), sorted by file name.
///
/// # Errors
/// Returns `CodegenError::Io` if the path does not exist and
/// `CodegenError::Walk` if the directory cannot be listed.
pub fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, CodegenError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(CodegenError::io(
            input,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input does not exist"),
        ));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_schema = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if entry.file_type().is_file() && is_schema {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}
