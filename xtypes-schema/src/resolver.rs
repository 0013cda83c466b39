//! Schema resolution.
//!
//! Turns a [`SchemaDocument`] into a [`ClassIr`] for one target language:
//! flattens the property tree, resolves relations, the custom URI and methods,
//! and fills template placeholders without explicit candidates.

use crate::document::{MethodSpec, PropertySpec, RelationSpec, SchemaDocument, UriSpec};
use crate::error::{ResolveError, SchemaError};
use crate::ir::{
    ArgumentDef, ClassIr, CustomUri, MethodDef, Overload, PropertyDef, RelationDef, ReturnDef,
    UriDependency,
};
use crate::language::Language;
use crate::types::{DEFAULT_TEMPLATE_TYPES, TypeExpression, parse_type, qualify};
use crate::values::{format_allowed_set, format_default, format_property_map};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Default relation cardinality.
pub const DEFAULT_CARDINALITY: &str = "MANY2MANY";
/// Default relation delete policy.
pub const DEFAULT_DELETE_POLICY: &str = "DELETENONE";
/// Marker for a relation without supertype.
pub const NO_SUBTYPE: &str = "NONE";
/// Default custom URI scheme.
pub const DEFAULT_URI_SCHEME: &str = "unknown";
/// Default custom URI root path.
pub const DEFAULT_URI_ROOT_PATH: &str = "/";

/// Resolves a schema document into the IR of one target language.
///
/// # Arguments
/// * `document` - Parsed schema document
/// * `namespace` - Project namespace
/// * `language` - Target language to render types for
///
/// # Returns
/// The resolved class.
///
/// # Errors
/// Returns `SchemaError::Resolve` naming the offending class and field.
pub fn resolve(
    document: &SchemaDocument,
    namespace: &str,
    language: Language,
) -> Result<ClassIr, SchemaError> {
    let mut resolver = Resolver::new(document, namespace, language);
    resolver.resolve_properties()?;
    resolver.resolve_relations()?;
    resolver.resolve_custom_uri()?;
    resolver.resolve_methods()?;
    resolver.finish()
}

struct Resolver<'a> {
    document: &'a SchemaDocument,
    namespace: &'a str,
    language: Language,
    properties: BTreeMap<String, PropertyDef>,
    relations: BTreeMap<String, RelationDef>,
    methods: Vec<MethodDef>,
    referenced: BTreeSet<String>,
    custom_uri: Option<CustomUri>,
    template_types: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(document: &'a SchemaDocument, namespace: &'a str, language: Language) -> Self {
        Self {
            document,
            namespace,
            language,
            properties: BTreeMap::new(),
            relations: BTreeMap::new(),
            methods: Vec::new(),
            referenced: BTreeSet::new(),
            custom_uri: None,
            template_types: Vec::new(),
        }
    }

    fn error(&self, field: &str, source: impl Into<ResolveError>) -> SchemaError {
        SchemaError::resolve(&self.document.name, field, source)
    }

    fn render(&self, ty: &TypeExpression) -> Result<String, ResolveError> {
        Ok(self.language.render_type(ty, self.namespace)?)
    }

    fn add_template_types(&mut self, ty: &TypeExpression) {
        let mut candidates = Vec::new();
        ty.collect_template_candidates(&mut candidates);
        for candidate in candidates {
            if !self.template_types.contains(&candidate) {
                self.template_types.push(candidate);
            }
        }
    }

    fn resolve_properties(&mut self) -> Result<(), SchemaError> {
        let document = self.document;
        let Some(tree) = &document.properties else {
            return Ok(());
        };
        let leaves = flatten_properties(tree).map_err(|e| self.error("properties", e))?;
        for (path, node) in leaves {
            self.resolve_property(&path, node)
                .map_err(|e| self.error(&path, e))?;
        }
        Ok(())
    }

    fn resolve_property(&mut self, path: &str, node: &Value) -> Result<(), ResolveError> {
        if self.properties.contains_key(path) {
            return Err(ResolveError::duplicate("property", path, "property"));
        }
        let spec: PropertySpec = decode(node)?;
        let type_expr = parse_type(&spec.type_expr)?;
        if type_expr.is_xtype() {
            return Err(ResolveError::PropertyMustBeRelation {
                type_expr: spec.type_expr,
            });
        }

        let rendered_type = self.render(&type_expr)?;
        let default = spec
            .default
            .as_ref()
            .map(|v| format_default(v, &type_expr, self.language, false))
            .transpose()?;
        let allowed = match &spec.allowed {
            Some(values) => format_allowed_set(values, &type_expr, self.language)?,
            None => BTreeSet::new(),
        };

        self.add_template_types(&type_expr);
        type_expr.collect_xtype_names(&mut self.referenced);
        self.properties.insert(
            path.to_string(),
            PropertyDef {
                name: path.to_string(),
                json_kind: type_expr.json_kind(),
                type_expr,
                rendered_type,
                default,
                allowed,
                advanced_setter: spec.advanced_setter,
            },
        );
        Ok(())
    }

    fn resolve_relations(&mut self) -> Result<(), SchemaError> {
        let document = self.document;
        let Some(relations) = &document.relations else {
            return Ok(());
        };
        for (key, node) in relations {
            let name = key_name(key).map_err(|e| self.error("relations", e))?;
            self.resolve_relation(&name, node)
                .map_err(|e| self.error(&name, e))?;
        }
        Ok(())
    }

    fn resolve_relation(&mut self, name: &str, node: &Value) -> Result<(), ResolveError> {
        if self.relations.contains_key(name) {
            return Err(ResolveError::duplicate("relation", name, "relation"));
        }
        if self.properties.contains_key(name) {
            return Err(ResolveError::duplicate("relation", name, "property"));
        }
        let spec: RelationSpec = decode(node)?;
        let relation_type = parse_type(&spec.type_expr)?;

        let targets = match (spec.other_classname, spec.other_classnames) {
            (Some(single), _) => {
                tracing::warn!(
                    class = %self.document.name,
                    relation = %name,
                    "'other_classname' is deprecated, use 'other_classnames'"
                );
                vec![single]
            }
            (None, Some(many)) => many,
            (None, None) => {
                return Err(ResolveError::invalid(
                    "relation has no 'other_classnames' entry",
                ));
            }
        };

        let mut target_class_names = BTreeSet::new();
        for target in targets {
            target_class_names.insert(qualify(&target, self.namespace));
            self.referenced.insert(target);
        }

        let extra_properties = match &spec.properties {
            Some(props) => format_property_map(props, self.language)?,
            None => BTreeMap::new(),
        };

        self.relations.insert(
            name.to_string(),
            RelationDef {
                attribute_name: name.to_string(),
                relation_kind: relation_type.base_name.clone(),
                relation_type,
                target_class_names,
                cardinality: upper_or(spec.cardinality, DEFAULT_CARDINALITY),
                delete_policy: upper_or(spec.delete_policy, DEFAULT_DELETE_POLICY),
                subtype_of: upper_or(spec.subtype_of, NO_SUBTYPE),
                inverse: spec.inverse,
                advanced_setter: spec.advanced_setter,
                extra_properties,
            },
        );
        Ok(())
    }

    fn resolve_custom_uri(&mut self) -> Result<(), SchemaError> {
        let spec = match (&self.document.uri, &self.document.uuid) {
            (Some(uri), _) => uri,
            (None, Some(uuid)) => {
                tracing::warn!(
                    class = %self.document.name,
                    "'uuid' is deprecated, use 'uri'"
                );
                uuid
            }
            (None, None) => return Ok(()),
        };
        let custom_uri = self
            .custom_uri_from(spec)
            .map_err(|e| self.error("uri", e))?;
        self.custom_uri = Some(custom_uri);
        Ok(())
    }

    fn custom_uri_from(&self, spec: &UriSpec) -> Result<CustomUri, ResolveError> {
        let mut dependencies = Vec::new();
        for entry in spec.from.iter().flatten() {
            let (is_relation, inherited) = if self.relations.contains_key(&entry.name) {
                (true, false)
            } else if self.properties.contains_key(&entry.name) {
                (false, false)
            } else if self.document.inherit.is_some() {
                (false, true)
            } else {
                return Err(ResolveError::UnresolvedUriReference {
                    name: entry.name.clone(),
                });
            };
            dependencies.push(UriDependency {
                name: entry.name.clone(),
                is_relation,
                inherited,
                required: entry.required.unwrap_or(true),
            });
        }

        Ok(CustomUri {
            scheme: spec
                .scheme
                .clone()
                .unwrap_or_else(|| DEFAULT_URI_SCHEME.to_string()),
            root_path: spec
                .root_path
                .clone()
                .unwrap_or_else(|| DEFAULT_URI_ROOT_PATH.to_string()),
            dependencies,
        })
    }

    fn resolve_methods(&mut self) -> Result<(), SchemaError> {
        let document = self.document;
        let Some(methods) = &document.methods else {
            return Ok(());
        };
        for (key, node) in methods {
            let name = key_name(key).map_err(|e| self.error("methods", e))?;
            let spec: MethodSpec = decode(node).map_err(|e| self.error(&name, e))?;
            let method = self.resolve_method(&name, spec)?;
            self.methods.push(method);
        }
        Ok(())
    }

    fn resolve_method(&mut self, name: &str, mut spec: MethodSpec) -> Result<MethodDef, SchemaError> {
        let description = spec.description.clone().unwrap_or_default();
        let signatures = match spec.overrides.take() {
            Some(overrides) if !overrides.is_empty() => overrides,
            _ => vec![spec],
        };

        let overloads = signatures
            .into_iter()
            .map(|signature| self.resolve_overload(name, signature))
            .collect::<Result<Vec<_>, _>>()?;
        let description = if description.is_empty() {
            overloads
                .first()
                .map(|o| o.description.clone())
                .unwrap_or_default()
        } else {
            description
        };

        Ok(MethodDef {
            name: name.to_string(),
            description,
            overloaded: overloads.len() > 1,
            overloads,
        })
    }

    fn resolve_overload(&mut self, method: &str, spec: MethodSpec) -> Result<Overload, SchemaError> {
        let return_type = spec.returns.and_then(|r| r.type_expr);
        let returns = match return_type {
            Some(raw) => {
                let ty = parse_type(&raw).map_err(|e| self.error(method, e))?;
                let rendered_type = self.render(&ty).map_err(|e| self.error(method, e))?;
                self.add_template_types(&ty);
                ty.collect_xtype_names(&mut self.referenced);
                ReturnDef {
                    is_template: ty.contains_template(),
                    xtype_name: ty.xtype_name().map(String::from),
                    type_expr: Some(ty),
                    rendered_type,
                }
            }
            None => ReturnDef {
                type_expr: None,
                rendered_type: self.language.void_type().to_string(),
                is_template: false,
                xtype_name: None,
            },
        };

        let mut arguments: Vec<ArgumentDef> = Vec::new();
        for arg in spec.arguments.unwrap_or_default() {
            let field = format!("{method}({})", arg.name);
            if arguments.iter().any(|a| a.name == arg.name) {
                return Err(self.error(&field, ResolveError::duplicate("argument", &arg.name, "argument")));
            }
            let ty = parse_type(&arg.type_expr).map_err(|e| self.error(&field, e))?;
            let rendered_type = self.render(&ty).map_err(|e| self.error(&field, e))?;
            let default = arg
                .default
                .as_ref()
                .map(|v| format_default(v, &ty, self.language, true))
                .transpose()
                .map_err(|e| self.error(&field, e))?;
            self.add_template_types(&ty);
            ty.collect_xtype_names(&mut self.referenced);
            arguments.push(ArgumentDef {
                name: arg.name,
                rendered_type,
                default,
                is_template_arg: ty.contains_template(),
                is_xtype: ty.is_xtype(),
                xtype_name: ty.xtype_name().map(String::from),
                type_expr: ty,
            });
        }

        let template_arg_names: Vec<String> = arguments
            .iter()
            .filter(|a| a.is_template_arg)
            .map(|a| a.name.clone())
            .collect();

        Ok(Overload {
            description: spec.description.unwrap_or_default(),
            is_template_method: returns.is_template || !template_arg_names.is_empty(),
            template_arg_names,
            template_type_names: Vec::new(),
            arguments,
            returns,
            is_static: spec.is_static,
            is_const: spec.is_const,
        })
    }

    /// Fills placeholders without candidates and renders template type names.
    fn finish(mut self) -> Result<ClassIr, SchemaError> {
        let defaults: Vec<String> = if self.template_types.is_empty() {
            DEFAULT_TEMPLATE_TYPES.iter().map(|t| t.to_string()).collect()
        } else {
            self.template_types.clone()
        };

        for property in self.properties.values_mut() {
            property.type_expr.fill_template_defaults(&defaults);
        }

        let mut methods = std::mem::take(&mut self.methods);
        for method in &mut methods {
            for overload in &mut method.overloads {
                if !overload.is_template_method {
                    continue;
                }
                let mut candidates = Vec::new();
                if let Some(ty) = overload.returns.type_expr.as_mut() {
                    ty.fill_template_defaults(&defaults);
                    ty.collect_template_candidates(&mut candidates);
                }
                for arg in &mut overload.arguments {
                    arg.type_expr.fill_template_defaults(&defaults);
                    arg.type_expr.collect_template_candidates(&mut candidates);
                }

                let mut names = Vec::new();
                for candidate in candidates {
                    let ty = parse_type(&candidate).map_err(|e| self.error(&method.name, e))?;
                    ty.collect_xtype_names(&mut self.referenced);
                    let rendered = self.render(&ty).map_err(|e| self.error(&method.name, e))?;
                    if !names.contains(&rendered) {
                        names.push(rendered);
                    }
                }
                overload.template_type_names = names;
            }
        }

        Ok(ClassIr {
            name: self.document.name.clone(),
            namespace: self.namespace.to_string(),
            language: self.language,
            inherit: self.document.inherit.clone(),
            properties: self.properties,
            relations: self.relations,
            methods,
            referenced_classes: self.referenced,
            custom_uri: self.custom_uri,
            default_template_types: self.template_types,
        })
    }
}

/// Flattens a nested property tree into `/`-separated leaf paths.
///
/// A mapping containing `type` is a leaf; any other mapping is a path segment.
/// The tree is walked breadth first, top-level entries in document order.
fn flatten_properties(tree: &Mapping) -> Result<Vec<(String, &Value)>, ResolveError> {
    let mut queue: VecDeque<(String, &Value)> = VecDeque::new();
    for (key, node) in tree {
        queue.push_back((key_name(key)?, node));
    }

    let mut leaves = Vec::new();
    while let Some((path, node)) = queue.pop_front() {
        let Value::Mapping(entries) = node else {
            return Err(ResolveError::invalid(format!(
                "property '{path}' must be a mapping"
            )));
        };
        if entries.contains_key("type") {
            leaves.push((path, node));
            continue;
        }
        for (key, child) in entries {
            queue.push_back((format!("{path}/{}", key_name(key)?), child));
        }
    }
    Ok(leaves)
}

fn key_name(key: &Value) -> Result<String, ResolveError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ResolveError::invalid("keys must be scalars")),
    }
}

fn decode<T: DeserializeOwned>(node: &Value) -> Result<T, ResolveError> {
    serde_yaml::from_value(node.clone()).map_err(|e| ResolveError::invalid(e.to_string()))
}

fn upper_or(value: Option<String>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| v.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeError;
    use crate::parser::parse_document;

    fn resolve_yaml(yaml: &str, language: Language) -> Result<ClassIr, SchemaError> {
        let doc = parse_document(yaml).expect("Failed to parse");
        resolve(&doc, "robot", language)
    }

    fn resolve_err(yaml: &str) -> (String, ResolveError) {
        match resolve_yaml(yaml, Language::Cpp) {
            Err(SchemaError::Resolve { field, source, .. }) => (field, source),
            other => panic!("expected a resolve error, got {other:?}"),
        }
    }

    const WIDGET: &str = r#"
name: Widget
properties:
  label:
    type: STRING
    default: widget
    allowed: [widget, gadget]
  pose:
    position:
      x:
        type: FLOAT64
        default: 0.0
    frame:
      type: STRING
relations:
  parts:
    type: has
    other_classnames: [Part, geometry::Frame]
    properties:
      weight: 2
methods:
  compute:
    description: computes things
    returns:
      type: INTEGER
    arguments:
      - name: factor
        type: FLOAT64
        default: 1.0
  configure:
    overrides:
      - description: from json
        arguments:
          - name: config
            type: JSON
            default: {}
      - description: from string
        arguments:
          - name: config
            type: STRING
"#;

    #[test]
    fn test_resolve_properties() {
        let ir = resolve_yaml(WIDGET, Language::Cpp).expect("Failed to resolve");
        let names: Vec<_> = ir.properties.keys().cloned().collect();
        assert_eq!(names, vec!["label", "pose/frame", "pose/position/x"]);

        let label = &ir.properties["label"];
        assert_eq!(label.rendered_type, "std::string");
        assert_eq!(label.default.as_deref(), Some("\"widget\""));
        assert_eq!(label.allowed.len(), 2);
        assert_eq!(ir.properties["pose/position/x"].rendered_type, "double");
    }

    #[test]
    fn test_flatten_order_is_breadth_first() {
        let tree: Mapping = serde_yaml::from_str(
            "a:\n  deep:\n    x:\n      type: INTEGER\n  b:\n    type: INTEGER\nc:\n  type: INTEGER\n",
        )
        .expect("yaml");
        let paths: Vec<_> = flatten_properties(&tree)
            .expect("flatten")
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(paths, vec!["c", "a/b", "a/deep/x"]);
    }

    #[test]
    fn test_resolve_relation() {
        let ir = resolve_yaml(WIDGET, Language::Cpp).expect("Failed to resolve");
        let parts = &ir.relations["parts"];
        assert_eq!(parts.relation_kind, "HAS");
        assert_eq!(parts.cardinality, "MANY2MANY");
        assert_eq!(parts.delete_policy, "DELETENONE");
        assert_eq!(parts.subtype_of, "NONE");
        let targets: Vec<_> = parts.target_class_names.iter().cloned().collect();
        assert_eq!(targets, vec!["geometry::Frame", "robot::Part"]);
        assert_eq!(parts.extra_properties["weight"], "2");
        assert!(ir.referenced_classes.contains("Part"));
        assert!(ir.referenced_classes.contains("geometry::Frame"));
    }

    #[test]
    fn test_resolve_methods_and_overloads() {
        let ir = resolve_yaml(WIDGET, Language::Cpp).expect("Failed to resolve");
        assert_eq!(ir.methods.len(), 2);
        let compute = &ir.methods[0];
        assert_eq!(compute.name, "compute");
        assert!(!compute.overloaded);
        assert_eq!(compute.overloads[0].returns.rendered_type, "int");
        assert_eq!(compute.overloads[0].arguments[0].default.as_deref(), Some("1.0"));

        let configure = &ir.methods[1];
        assert!(configure.overloaded);
        assert_eq!(configure.overloads[0].returns.rendered_type, "void");
        assert_eq!(
            configure.overloads[0].arguments[0].default.as_deref(),
            Some("nl::json(nl::json::value_t::object)")
        );
        assert_eq!(configure.description, "from json");
    }

    #[test]
    fn test_python_rendering() {
        let ir = resolve_yaml(WIDGET, Language::Python).expect("Failed to resolve");
        assert_eq!(ir.properties["label"].rendered_type, "str");
        assert_eq!(ir.methods[1].overloads[0].returns.rendered_type, "None");
        assert_eq!(ir.methods[1].overloads[0].arguments[0].default.as_deref(), Some("dict()"));
    }

    #[test]
    fn test_property_must_be_relation() {
        let (field, err) = resolve_err("name: A\nproperties:\n  other:\n    type: XTYPE(B)\n");
        assert_eq!(field, "other");
        assert!(matches!(err, ResolveError::PropertyMustBeRelation { .. }));
    }

    #[test]
    fn test_relation_collides_with_property() {
        let yaml = r"
name: A
properties:
  parts:
    type: STRING
relations:
  parts:
    type: HAS
    other_classnames: [B]
";
        let (field, err) = resolve_err(yaml);
        assert_eq!(field, "parts");
        assert!(matches!(
            err,
            ResolveError::DuplicateName {
                kind: "relation",
                existing: "property",
                ..
            }
        ));
    }

    #[test]
    fn test_relation_before_property_collides() {
        let yaml = r"
name: A
relations:
  parts:
    type: HAS
    other_classnames: [B]
properties:
  parts:
    type: STRING
";
        let (field, err) = resolve_err(yaml);
        assert_eq!(field, "parts");
        assert!(matches!(
            err,
            ResolveError::DuplicateName {
                kind: "relation",
                existing: "property",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_argument_name() {
        let yaml = r"
name: A
methods:
  run:
    arguments:
      - name: x
        type: INTEGER
      - name: x
        type: STRING
";
        let (field, err) = resolve_err(yaml);
        assert_eq!(field, "run(x)");
        assert!(matches!(err, ResolveError::DuplicateName { .. }));
    }

    #[test]
    fn test_set_relation_of_references_rejected() {
        let yaml = r"
name: A
relations:
  items:
    type: SET(XTYPE(B))
    other_classnames: [B]
";
        let (_, err) = resolve_err(yaml);
        assert!(matches!(
            err,
            ResolveError::Type(TypeError::InvalidContainerOfReference { .. })
        ));
    }

    #[test]
    fn test_deprecated_other_classname() {
        let yaml = "name: A\nrelations:\n  owner:\n    type: HAS\n    other_classname: B\n";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        assert!(ir.relations["owner"].target_class_names.contains("robot::B"));
    }

    #[test]
    fn test_relation_without_targets() {
        let (_, err) = resolve_err("name: A\nrelations:\n  owner:\n    type: HAS\n");
        assert!(matches!(err, ResolveError::InvalidValue { .. }));
    }

    #[test]
    fn test_custom_uri() {
        let yaml = r"
name: A
properties:
  serial:
    type: STRING
relations:
  owner:
    type: HAS
    other_classnames: [B]
uri:
  scheme: robot
  from:
    - name: serial
    - name: owner
      required: false
";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        let uri = ir.custom_uri.expect("uri");
        assert_eq!(uri.scheme, "robot");
        assert_eq!(uri.root_path, "/");
        assert!(!uri.dependencies[0].is_relation);
        assert!(uri.dependencies[0].required);
        assert!(uri.dependencies[1].is_relation);
        assert!(!uri.dependencies[1].required);
    }

    #[test]
    fn test_uuid_alias_and_defaults() {
        let yaml = "name: A\nproperties:\n  serial:\n    type: STRING\nuuid:\n  from:\n    - name: serial\n";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        let uri = ir.custom_uri.expect("uri");
        assert_eq!(uri.scheme, "unknown");
    }

    #[test]
    fn test_unresolved_uri_reference() {
        let yaml = "name: A\nuri:\n  from:\n    - name: missing\n";
        let (field, err) = resolve_err(yaml);
        assert_eq!(field, "uri");
        assert!(matches!(err, ResolveError::UnresolvedUriReference { .. }));
    }

    #[test]
    fn test_uri_reference_deferred_to_parent() {
        let yaml = "name: A\ninherit: Base\nuri:\n  from:\n    - name: serial\n";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        assert!(ir.custom_uri.expect("uri").dependencies[0].inherited);
    }

    #[test]
    fn test_template_defaults_from_class() {
        let yaml = r"
name: A
methods:
  get:
    returns:
      type: TEMPLATE
    arguments:
      - name: key
        type: STRING
  put:
    arguments:
      - name: value
        type: TEMPLATE[INTEGER;STRING]
";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        assert_eq!(ir.default_template_types, vec!["INTEGER", "STRING"]);
        let get = &ir.methods[0].overloads[0];
        assert!(get.is_template_method);
        assert!(get.returns.is_template);
        assert_eq!(get.template_type_names, vec!["int", "std::string"]);
        let put = &ir.methods[1].overloads[0];
        assert_eq!(put.template_arg_names, vec!["value"]);
    }

    #[test]
    fn test_template_defaults_builtin() {
        let yaml = "name: A\nmethods:\n  get:\n    returns:\n      type: TEMPLATE\n";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        assert!(ir.default_template_types.is_empty());
        assert_eq!(
            ir.methods[0].overloads[0].template_type_names,
            vec!["bool", "int", "double", "std::string", "nl::json"]
        );
    }

    #[test]
    fn test_method_references_recorded() {
        let yaml = r"
name: A
methods:
  attach:
    returns:
      type: XTYPE(BPtr)
    arguments:
      - name: other
        type: VECTOR(XTYPE(geometry::FramePtr))
";
        let ir = resolve_yaml(yaml, Language::Cpp).expect("Failed to resolve");
        assert!(ir.referenced_classes.contains("B"));
        assert!(ir.referenced_classes.contains("geometry::Frame"));
        let overload = &ir.methods[0].overloads[0];
        assert_eq!(overload.returns.rendered_type, "robot::BPtr");
        assert_eq!(overload.returns.xtype_name.as_deref(), Some("B"));
    }
}
