//! Intermediate representation for code generation.
//!
//! A [`ClassIr`] is a fully resolved, language-specific view of one schema
//! document. Every type in it is already rendered for its target language, so
//! templates never touch raw type expressions.

use crate::language::Language;
use crate::types::{JsonKind, ROOT_NAMESPACE, ROOT_TYPE, TypeExpression, qualify};
use std::collections::{BTreeMap, BTreeSet};

/// Resolved class ready for emission in one target language.
#[derive(Debug, Clone)]
pub struct ClassIr {
    /// Class name.
    pub name: String,
    /// Project namespace.
    pub namespace: String,
    /// Target language the types were rendered for.
    pub language: Language,
    /// Declared parent name, as written.
    pub inherit: Option<String>,
    /// Properties keyed by flattened `/`-separated path.
    pub properties: BTreeMap<String, PropertyDef>,
    /// Relations keyed by attribute name.
    pub relations: BTreeMap<String, RelationDef>,
    /// Methods in declaration order.
    pub methods: Vec<MethodDef>,
    /// Class names referenced by relations and methods, as written.
    pub referenced_classes: BTreeSet<String>,
    /// Custom URI definition.
    pub custom_uri: Option<CustomUri>,
    /// Template candidate types contributed anywhere in the class.
    pub default_template_types: Vec<String>,
}

impl ClassIr {
    /// Returns the namespace-qualified class name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.name, &self.namespace)
    }

    /// Returns the namespace-qualified parent, falling back to the root type.
    #[must_use]
    pub fn qualified_parent(&self) -> String {
        match &self.inherit {
            Some(parent) => qualify(parent, &self.namespace),
            None => format!("{ROOT_NAMESPACE}::{ROOT_TYPE}"),
        }
    }

    /// Returns the parent name local to the batch.
    ///
    /// A parent qualified with the project namespace is reduced to its bare
    /// name; other qualified names are kept as is.
    #[must_use]
    pub fn local_parent(&self) -> Option<&str> {
        let parent = self.inherit.as_deref()?;
        let local = parent
            .strip_prefix(self.namespace.as_str())
            .and_then(|rest| rest.strip_prefix("::"))
            .unwrap_or(parent);
        Some(local)
    }
}

/// Resolved property.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Flattened path.
    pub name: String,
    /// Parsed type.
    pub type_expr: TypeExpression,
    /// Rendered type.
    pub rendered_type: String,
    /// Rendered default value.
    pub default: Option<String>,
    /// Rendered allowed values.
    pub allowed: BTreeSet<String>,
    /// Whether a custom setter is generated.
    pub advanced_setter: bool,
    /// Schemaless storage classification.
    pub json_kind: Option<JsonKind>,
}

impl PropertyDef {
    /// Returns the identifier used for generated accessors.
    #[must_use]
    pub fn accessor_name(&self) -> String {
        accessor_name(&self.name)
    }
}

/// Resolved relation.
#[derive(Debug, Clone)]
pub struct RelationDef {
    /// Attribute name.
    pub attribute_name: String,
    /// Relation kind, uppercased (`HAS`, `PART_OF_COMPOSITION`, ...).
    pub relation_kind: String,
    /// Parsed relation type.
    pub relation_type: TypeExpression,
    /// Namespace-qualified target class names.
    pub target_class_names: BTreeSet<String>,
    /// Cardinality constraint.
    pub cardinality: String,
    /// Deletion policy.
    pub delete_policy: String,
    /// Relation supertype, `NONE` when absent.
    pub subtype_of: String,
    /// Whether this is the inverse side.
    pub inverse: bool,
    /// Whether a custom setter is generated.
    pub advanced_setter: bool,
    /// Extra properties with rendered values, keys sorted.
    pub extra_properties: BTreeMap<String, String>,
}

/// Resolved method with one or more overloads.
#[derive(Debug, Clone)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Description.
    pub description: String,
    /// True when more than one overload is declared.
    pub overloaded: bool,
    /// Overloads in declaration order.
    pub overloads: Vec<Overload>,
}

/// One method signature.
#[derive(Debug, Clone)]
pub struct Overload {
    /// Description.
    pub description: String,
    /// Arguments in declaration order.
    pub arguments: Vec<ArgumentDef>,
    /// Return type.
    pub returns: ReturnDef,
    /// Static method.
    pub is_static: bool,
    /// Const method.
    pub is_const: bool,
    /// True when the return or any argument involves a placeholder.
    pub is_template_method: bool,
    /// Names of the arguments whose type involves a placeholder.
    pub template_arg_names: Vec<String>,
    /// Concrete candidate types the template method is instantiated with.
    pub template_type_names: Vec<String>,
}

/// Method return type.
#[derive(Debug, Clone)]
pub struct ReturnDef {
    /// Parsed type, absent for void methods.
    pub type_expr: Option<TypeExpression>,
    /// Rendered type.
    pub rendered_type: String,
    /// Whether the return type involves a placeholder.
    pub is_template: bool,
    /// Referenced class if the return type is an XType.
    pub xtype_name: Option<String>,
}

/// Method argument.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    /// Argument name.
    pub name: String,
    /// Parsed type.
    pub type_expr: TypeExpression,
    /// Rendered type.
    pub rendered_type: String,
    /// Rendered default value.
    pub default: Option<String>,
    /// Whether the type involves a placeholder.
    pub is_template_arg: bool,
    /// Whether the type is a direct XType reference.
    pub is_xtype: bool,
    /// Referenced class if the type is an XType.
    pub xtype_name: Option<String>,
}

/// Custom URI definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomUri {
    /// URI scheme.
    pub scheme: String,
    /// Root path.
    pub root_path: String,
    /// Fields the URI is computed from, in order.
    pub dependencies: Vec<UriDependency>,
}

/// A field a custom URI is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriDependency {
    /// Property or relation name.
    pub name: String,
    /// True if the field is a relation.
    pub is_relation: bool,
    /// True if the field is defined by the parent class.
    pub inherited: bool,
    /// Whether the field must be set.
    pub required: bool,
}

/// Converts a property path into an identifier.
#[must_use]
pub fn accessor_name(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
