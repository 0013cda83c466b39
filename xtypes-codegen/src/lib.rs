//! # xtypes Codegen
//!
//! C++ and Python binding generation from xtypes YAML class schemas.
//!
//! This crate provides:
//! - Per-class C++ base classes and user-editable skeletons
//! - pybind11 bindings and Python typing stubs
//! - Batch artifacts (umbrella header, binding module)
//! - Write-if-changed output that keeps build systems quiet

pub mod artifact;
pub mod config;
pub mod error;
pub mod generator;
pub mod templates;
pub mod writer;

pub use artifact::{ArtifactKind, EmittedArtifacts, WriteOutcome};
pub use config::{DEFAULT_OUTPUT_DIR, GeneratorConfig, parse_languages};
pub use error::CodegenError;
pub use generator::{BatchSummary, Generator, ResolvedFile, collect_inputs};
pub use templates::{BatchContext, BuiltinTemplates, TemplateContext, Templates};

/// Compiles a schema file or directory with the built-in templates.
///
/// # Arguments
/// * `config` - Run settings
/// * `input` - A schema file or a directory of schema files
///
/// # Returns
/// The dependency order and the emitted artifacts.
///
/// # Errors
/// Returns `CodegenError` if loading, resolution, ordering or writing fails.
pub fn generate_from_path(
    config: &GeneratorConfig,
    input: &std::path::Path,
) -> Result<BatchSummary, CodegenError> {
    Generator::new(config).generate_batch(input)
}
