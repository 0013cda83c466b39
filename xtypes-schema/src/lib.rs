//! # xtypes Schema
//!
//! YAML class schema loading, type expressions and resolution.
//!
//! This crate provides:
//! - The type-expression mini-language parser
//! - Per-language type rendering and literal formatting
//! - Schema document loading from YAML
//! - Resolution of documents into a language-specific class IR
//! - Batch validation and dependency ordering

pub mod document;
pub mod error;
pub mod ir;
pub mod language;
pub mod ordering;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;
pub mod values;

pub use document::SchemaDocument;
pub use error::{ParseError, ResolveError, SchemaError, TypeError, UnsupportedLanguage};
pub use ir::{
    ArgumentDef, ClassIr, CustomUri, MethodDef, Overload, PropertyDef, RelationDef, ReturnDef,
    UriDependency,
};
pub use language::Language;
pub use ordering::{DependencyOrder, order};
pub use parser::{load_document, parse_document};
pub use resolver::resolve;
pub use types::{
    ContainerKind, JsonKind, PrimitiveType, Qualifier, ROOT_NAMESPACE, ROOT_TYPE, TypeExpression,
    TypeKind, parse_type, qualify,
};
pub use validation::validate_batch;
pub use values::{format_allowed_set, format_default};
