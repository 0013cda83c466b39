//! Error types for schema loading, type parsing, resolution and ordering.

use thiserror::Error;

/// Error type for loading a schema document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid YAML or does not match the document shape.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error while reading the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required key.
    #[error("missing required key '{key}' in {context}")]
    MissingKey {
        /// Key name.
        key: String,
        /// Where the key was expected.
        context: String,
    },

    /// Invalid value for a key.
    #[error("invalid value '{value}' for key '{key}'")]
    InvalidValue {
        /// Key name.
        key: String,
        /// Offending value.
        value: String,
    },
}

impl ParseError {
    /// Creates a missing key error.
    pub fn missing_key(key: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingKey {
            key: key.into(),
            context: context.into(),
        }
    }
}

/// Error type for type-expression parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Unbalanced parentheses or an unparsable composite.
    #[error("malformed type expression '{expr}': {reason}")]
    MalformedTypeExpression {
        /// The type expression as written.
        expr: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A reference type used as element of a container that forbids it.
    #[error(
        "container '{container}' cannot hold XType references, aliasing would be undefined (type was: {expr})"
    )]
    InvalidContainerOfReference {
        /// Container base name.
        container: String,
        /// The type expression as written.
        expr: String,
    },

    /// A composite base with no rendering entry for the target language.
    #[error("unknown type constructor '{base}' for language {language}")]
    UnknownTypeConstructor {
        /// Composite base name.
        base: String,
        /// Target language identifier.
        language: String,
    },
}

impl TypeError {
    /// Creates a malformed type expression error.
    pub fn malformed(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTypeExpression {
            expr: expr.into(),
            reason: reason.into(),
        }
    }
}

/// Cause of a resolution failure, always reported wrapped in
/// [`SchemaError::Resolve`] together with the owning class and field.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Type expression error.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// An XType reference was used as a property type.
    #[error("type '{type_expr}' is not allowed as a property type, use a relation")]
    PropertyMustBeRelation {
        /// The type expression as written.
        type_expr: String,
    },

    /// Name collision within a class.
    #[error("{kind} '{name}' is already defined as a {existing}")]
    DuplicateName {
        /// Kind of the new definition.
        kind: &'static str,
        /// Colliding name.
        name: String,
        /// Kind of the existing definition.
        existing: &'static str,
    },

    /// A `from` entry of the custom URI names an unknown field.
    #[error("'{name}' is neither a property nor a relation")]
    UnresolvedUriReference {
        /// Referenced name.
        name: String,
    },

    /// A literal the value formatter cannot express.
    #[error("unsupported default literal '{value}'")]
    UnsupportedDefaultLiteral {
        /// The literal as found in the schema.
        value: String,
    },

    /// Structurally invalid entry.
    #[error("invalid definition: {message}")]
    InvalidValue {
        /// Error message.
        message: String,
    },
}

impl ResolveError {
    /// Creates a duplicate name error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>, existing: &'static str) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
            existing,
        }
    }

    /// Creates an invalid value error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }
}

/// Top-level error type for schema compilation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Document loading error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resolution failure pinned to a class and field.
    #[error("error in definition of {class}::{field}: {source}")]
    Resolve {
        /// Owning class name.
        class: String,
        /// Property, relation, method or key name.
        field: String,
        /// Underlying cause.
        #[source]
        source: ResolveError,
    },

    /// Declared parent is not part of the processed batch.
    #[error("class '{class}' inherits from '{parent}' which is not part of the batch")]
    UnresolvedParent {
        /// Child class name.
        class: String,
        /// Declared parent name.
        parent: String,
    },

    /// Declared parents form a cycle.
    #[error("class '{class}' inherits from '{parent}' through an inheritance cycle")]
    InheritanceCycle {
        /// Child class name.
        class: String,
        /// Declared parent name.
        parent: String,
    },

    /// Two documents of a batch declare the same class.
    #[error("class '{name}' is defined more than once")]
    DuplicateClass {
        /// Class name.
        name: String,
    },
}

impl SchemaError {
    /// Wraps a resolution failure with its class and field context.
    pub fn resolve(
        class: impl Into<String>,
        field: impl Into<String>,
        source: impl Into<ResolveError>,
    ) -> Self {
        Self::Resolve {
            class: class.into(),
            field: field.into(),
            source: source.into(),
        }
    }
}

/// Error returned when a language identifier is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language '{0}'")]
pub struct UnsupportedLanguage(pub String);
