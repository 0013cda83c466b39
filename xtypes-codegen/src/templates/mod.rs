//! Artifact templates.
//!
//! The emission driver only depends on the [`Templates`] trait. The built-in
//! implementation renders every artifact with plain string building, one
//! generator per target in the submodules.

pub mod cpp;
pub mod pybind;
pub mod stub;

pub use cpp::CppGenerator;
pub use pybind::PybindGenerator;
pub use stub::StubGenerator;

use crate::artifact::ArtifactKind;
use crate::error::CodegenError;
use chrono::{DateTime, Local};
use xtypes_schema::ClassIr;

/// Per-run values shared by every class template.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// Project name, used as namespace.
    pub project: String,
    /// Generation comment placed in the first header line.
    pub generator_comment: String,
}

impl TemplateContext {
    /// Creates a context stamped with the given time.
    #[must_use]
    pub fn new(project: impl Into<String>, generated_at: DateTime<Local>) -> Self {
        Self {
            project: project.into(),
            generator_comment: generator_comment(generated_at),
        }
    }
}

/// Values of the batch-level templates.
#[derive(Debug, Clone)]
pub struct BatchContext<'a> {
    /// Shared per-run values.
    pub context: &'a TemplateContext,
    /// Class names in dependency order.
    pub classes: &'a [String],
    /// Whether a project registry is created.
    pub create_project_registry: bool,
}

/// Renders artifact text from resolved classes.
pub trait Templates {
    /// Renders a per-class artifact.
    ///
    /// # Errors
    /// Returns `CodegenError::Template` if the artifact cannot be rendered
    /// from the given class.
    fn render_class(
        &self,
        kind: ArtifactKind,
        class: &ClassIr,
        context: &TemplateContext,
    ) -> Result<String, CodegenError>;

    /// Renders a batch artifact.
    ///
    /// # Errors
    /// Returns `CodegenError::Template` if `kind` is not a batch artifact.
    fn render_batch(&self, kind: ArtifactKind, batch: &BatchContext<'_>) -> Result<String, CodegenError>;
}

/// Templates compiled into the generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl Templates for BuiltinTemplates {
    fn render_class(
        &self,
        kind: ArtifactKind,
        class: &ClassIr,
        context: &TemplateContext,
    ) -> Result<String, CodegenError> {
        if !kind.is_batch() && class.language != kind.source_language() {
            return Err(CodegenError::template(
                kind.to_string(),
                format!(
                    "expects types rendered for {}, got {}",
                    kind.source_language(),
                    class.language
                ),
            ));
        }

        Ok(match kind {
            ArtifactKind::BaseHeader => CppGenerator::new(class, context).base_header(),
            ArtifactKind::BaseSource => CppGenerator::new(class, context).base_source(),
            ArtifactKind::SkeletonHeader => CppGenerator::new(class, context).skeleton_header(),
            ArtifactKind::SkeletonSource => CppGenerator::new(class, context).skeleton_source(),
            ArtifactKind::Binding => PybindGenerator::new(class, context).generate(),
            ArtifactKind::Stub => StubGenerator::new(class, context).generate(),
            ArtifactKind::UmbrellaHeader | ArtifactKind::BindingModule => {
                return Err(CodegenError::template(kind.to_string(), "not a per-class artifact"));
            }
        })
    }

    fn render_batch(&self, kind: ArtifactKind, batch: &BatchContext<'_>) -> Result<String, CodegenError> {
        match kind {
            ArtifactKind::UmbrellaHeader => Ok(cpp::umbrella_header(batch)),
            ArtifactKind::BindingModule => Ok(pybind::binding_module(batch)),
            other => Err(CodegenError::template(other.to_string(), "not a batch artifact")),
        }
    }
}

/// Returns the generation comment for a timestamp.
#[must_use]
pub fn generator_comment(generated_at: DateTime<Local>) -> String {
    format!(
        "Auto-generated with xtypes-gen {} on {}",
        env!("CARGO_PKG_VERSION"),
        generated_at.format("%m/%d/%Y %H:%M:%S")
    )
}

/// Renders the three header lines every artifact starts with.
#[must_use]
pub fn header(kind: ArtifactKind, context: &TemplateContext, subject: &str) -> String {
    let prefix = kind.comment_prefix();
    let notice = if kind.is_skeleton() {
        "Generated once, edit freely. It is only rewritten when overwriting skeletons."
    } else {
        "Do not edit. Changes are overwritten on the next run."
    };
    format!(
        "{prefix} {}\n{prefix} {subject} ({kind}) of project {}\n{prefix} {notice}\n",
        context.generator_comment, context.project
    )
}
