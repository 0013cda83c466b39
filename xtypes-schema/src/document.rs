//! Raw schema document shapes as deserialized from YAML.
//!
//! The top-level sections are kept as ordered mappings so declaration order
//! survives. Individual entries are decoded into the typed specs below by the
//! resolver, which attaches class and field context to any failure.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// A single class schema document.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    /// Class name.
    pub name: String,
    /// Parent class name, bare or namespace-qualified.
    #[serde(default)]
    pub inherit: Option<String>,
    /// Property tree; nested mappings without `type` are path segments.
    #[serde(default)]
    pub properties: Option<Mapping>,
    /// Relations keyed by attribute name.
    #[serde(default)]
    pub relations: Option<Mapping>,
    /// Methods keyed by method name, in declaration order.
    #[serde(default)]
    pub methods: Option<Mapping>,
    /// Custom URI definition.
    #[serde(default)]
    pub uri: Option<UriSpec>,
    /// Deprecated alias of `uri`.
    #[serde(default)]
    pub uuid: Option<UriSpec>,
}

/// A leaf property entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertySpec {
    /// Type expression.
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Default value.
    #[serde(default)]
    pub default: Option<Value>,
    /// Allowed values.
    #[serde(default)]
    pub allowed: Option<Vec<Value>>,
    /// Whether a custom setter is generated.
    #[serde(default)]
    pub advanced_setter: bool,
}

/// A relation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationSpec {
    /// Relation kind (`HAS`, `PART_OF_COMPOSITION`, ...).
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Target class names.
    #[serde(default)]
    pub other_classnames: Option<Vec<String>>,
    /// Deprecated single target class name.
    #[serde(default)]
    pub other_classname: Option<String>,
    /// Extra key/value properties attached to the relation.
    #[serde(default)]
    pub properties: Option<Mapping>,
    /// Whether this is the inverse side.
    #[serde(default)]
    pub inverse: bool,
    /// Cardinality constraint.
    #[serde(default)]
    pub cardinality: Option<String>,
    /// Deletion policy.
    #[serde(default)]
    pub delete_policy: Option<String>,
    /// Relation supertype.
    #[serde(default)]
    pub subtype_of: Option<String>,
    /// Whether a custom setter is generated.
    #[serde(default)]
    pub advanced_setter: bool,
}

/// A method entry, or one of its overloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodSpec {
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Return declaration.
    #[serde(default)]
    pub returns: Option<ReturnSpec>,
    /// Arguments, in order.
    #[serde(default)]
    pub arguments: Option<Vec<ArgumentSpec>>,
    /// Static method.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Const method.
    #[serde(default, rename = "const")]
    pub is_const: bool,
    /// Overload list; replaces the single signature when present.
    #[serde(default)]
    pub overrides: Option<Vec<MethodSpec>>,
}

/// Return declaration of a method.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnSpec {
    /// Return type expression.
    #[serde(default, rename = "type")]
    pub type_expr: Option<String>,
}

/// Method argument.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name.
    pub name: String,
    /// Type expression.
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Default value.
    #[serde(default)]
    pub default: Option<Value>,
}

/// Custom URI definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UriSpec {
    /// URI scheme.
    #[serde(default)]
    pub scheme: Option<String>,
    /// URI root path.
    #[serde(default)]
    pub root_path: Option<String>,
    /// Fields the URI is computed from.
    #[serde(default)]
    pub from: Option<Vec<UriFromSpec>>,
}

/// One field a custom URI is computed from.
#[derive(Debug, Clone, Deserialize)]
pub struct UriFromSpec {
    /// Property or relation name.
    pub name: String,
    /// Whether the field must be set.
    #[serde(default)]
    pub required: Option<bool>,
}
