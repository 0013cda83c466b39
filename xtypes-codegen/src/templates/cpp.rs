//! C++ class templates.
//!
//! Every class yields a regenerated base class `_<Class>` holding the
//! property and relation definitions, and a user-editable skeleton `<Class>`
//! deriving from it that declares the schema's methods.

use super::{BatchContext, TemplateContext, header};
use crate::artifact::ArtifactKind;
use std::collections::{BTreeMap, BTreeSet};
use xtypes_schema::ir::{ClassIr, Overload, PropertyDef, RelationDef, UriDependency};
use xtypes_schema::{Language, PrimitiveType, ROOT_NAMESPACE, ROOT_TYPE, TypeExpression, qualify};

/// Include directive of the runtime root class.
pub const ROOT_INCLUDE: &str = "<xtypes_generator/XType.hpp>";

/// Generator for the C++ artifacts of one class.
pub struct CppGenerator<'a> {
    class: &'a ClassIr,
    context: &'a TemplateContext,
}

impl<'a> CppGenerator<'a> {
    /// Creates a new C++ generator.
    #[must_use]
    pub fn new(class: &'a ClassIr, context: &'a TemplateContext) -> Self {
        Self { class, context }
    }

    fn base_name(&self) -> String {
        format!("_{}", self.class.name)
    }

    /// Generates `include/_<Class>.hpp`.
    #[must_use]
    pub fn base_header(&self) -> String {
        let class = self.class;
        let base = self.base_name();
        let mut output = header(ArtifactKind::BaseHeader, self.context, &class.name);

        output.push_str("#pragma once\n\n");
        output.push_str("#include <memory>\n");
        output.push_str("#include <string>\n");
        output.push_str("#include <vector>\n");
        output.push_str("#include <nlohmann/json.hpp>\n");
        output.push_str(&format!("#include {}\n\n", parent_include(class)));
        output.push_str("namespace nl = nlohmann;\n\n");
        output.push_str(&forward_declarations(class));

        output.push_str(&format!("namespace {}\n{{\n", class.namespace));
        output.push_str(&pointer_aliases(&class.name, "    "));
        output.push('\n');
        output.push_str(&format!(
            "    class {base} : public {}\n    {{\n      public:\n",
            class.qualified_parent()
        ));
        output.push_str("        /// Name under which instances are registered\n");
        output.push_str("        static const std::string classname;\n\n");
        output.push_str(&format!(
            "        explicit {base}(const std::string& classname = {base}::classname);\n"
        ));
        output.push_str(&format!("        virtual ~{base}() = default;\n"));

        for property in class.properties.values() {
            output.push_str(&property_declaration(property));
        }
        for relation in class.relations.values() {
            output.push_str(&relation_declaration(relation));
        }
        if class.custom_uri.is_some() {
            output.push_str("\n        /// Computes the URI from the configured fields\n");
            output.push_str("        std::string uri() const override;\n");
        }

        output.push_str("    };\n}\n");
        output
    }

    /// Generates `src/_<Class>.cpp`.
    #[must_use]
    pub fn base_source(&self) -> String {
        let class = self.class;
        let base = self.base_name();
        let mut output = header(ArtifactKind::BaseSource, self.context, &class.name);

        output.push_str(&format!("#include \"{base}.hpp\"\n\n"));
        output.push_str("#include <stdexcept>\n\n");
        output.push_str(&format!("namespace {}\n{{\n", class.namespace));
        output.push_str(&format!(
            "    const std::string {base}::classname = \"{}\";\n\n",
            class.qualified_name()
        ));

        // Constructor with the schema definitions
        output.push_str(&format!("    {base}::{base}(const std::string& classname)\n"));
        output.push_str(&format!("        : {}(classname)\n    {{\n", class.qualified_parent()));
        for property in class.properties.values() {
            output.push_str(&property_definition(property));
        }
        for relation in class.relations.values() {
            output.push_str(&self.relation_definition(relation));
        }
        output.push_str("    }\n");

        for property in class.properties.values() {
            if !property.type_expr.contains_template() {
                output.push_str(&self.property_accessors(property));
            }
        }
        for relation in class.relations.values() {
            output.push_str(&self.relation_accessors(relation));
        }
        if class.custom_uri.is_some() {
            output.push_str(&self.uri_definition());
        }

        output.push_str("}\n");
        output
    }

    /// Generates the skeleton `include/<Class>.hpp`.
    #[must_use]
    pub fn skeleton_header(&self) -> String {
        let class = self.class;
        let name = &class.name;
        let base = self.base_name();
        let mut output = header(ArtifactKind::SkeletonHeader, self.context, name);

        output.push_str("#pragma once\n\n");
        output.push_str(&format!("#include \"{base}.hpp\"\n\n"));
        output.push_str("#include <stdexcept>\n\n");
        output.push_str(&format!("namespace {}\n{{\n", class.namespace));
        output.push_str(&format!("    class {name} : public {base}\n    {{\n      public:\n"));
        output.push_str(&format!(
            "        explicit {name}(const std::string& classname = {base}::classname);\n"
        ));
        output.push_str(&format!("        ~{name}() override = default;\n"));

        for property in class.properties.values() {
            if property.advanced_setter && !property.type_expr.contains_template() {
                output.push_str(&format!(
                    "\n        void set_{}({} value) override;\n",
                    property.accessor_name(),
                    parameter_type(&property.type_expr, &property.rendered_type)
                ));
            }
        }
        for relation in class.relations.values() {
            if relation.advanced_setter {
                output.push_str(&format!(
                    "\n        void add_{}(xtypes::XTypeCPtr other, const nl::json& props = nl::json::object()) override;\n",
                    relation.attribute_name
                ));
            }
        }

        for method in &class.methods {
            for overload in &method.overloads {
                let description = if overload.description.is_empty() {
                    &method.description
                } else {
                    &overload.description
                };
                output.push('\n');
                for line in description.lines().map(str::trim_end) {
                    if line.is_empty() {
                        output.push_str("        ///\n");
                    } else {
                        output.push_str(&format!("        /// {line}\n"));
                    }
                }
                let signature = method_signature(&method.name, overload, true);
                let placeholders = overload_placeholders(overload);
                if placeholders.is_empty() {
                    output.push_str(&format!("        {signature};\n"));
                } else {
                    output.push_str(&format!("        {}\n", template_head(&placeholders)));
                    output.push_str(&format!("        {signature}\n        {{\n"));
                    output.push_str(&format!(
                        "            throw std::runtime_error(\"{name}::{}() is not implemented yet\");\n",
                        method.name
                    ));
                    output.push_str("        }\n");
                }
            }
        }

        output.push_str("    };\n}\n");
        output
    }

    /// Generates the skeleton `src/<Class>.cpp`.
    #[must_use]
    pub fn skeleton_source(&self) -> String {
        let class = self.class;
        let name = &class.name;
        let base = self.base_name();
        let mut output = header(ArtifactKind::SkeletonSource, self.context, name);

        output.push_str(&format!("#include \"{name}.hpp\"\n\n"));
        output.push_str(&format!("namespace {}\n{{\n", class.namespace));
        output.push_str(&format!("    {name}::{name}(const std::string& classname)\n"));
        output.push_str(&format!("        : {base}(classname)\n    {{\n    }}\n"));

        for property in class.properties.values() {
            if property.advanced_setter && !property.type_expr.contains_template() {
                let accessor = property.accessor_name();
                output.push_str(&format!(
                    "\n    void {name}::set_{accessor}({} value)\n    {{\n",
                    parameter_type(&property.type_expr, &property.rendered_type)
                ));
                output.push_str(&format!("        {base}::set_{accessor}(value);\n    }}\n"));
            }
        }
        for relation in class.relations.values() {
            if relation.advanced_setter {
                let attribute = &relation.attribute_name;
                output.push_str(&format!(
                    "\n    void {name}::add_{attribute}(xtypes::XTypeCPtr other, const nl::json& props)\n    {{\n"
                ));
                output.push_str(&format!("        {base}::add_{attribute}(other, props);\n    }}\n"));
            }
        }

        for method in &class.methods {
            for overload in &method.overloads {
                if overload.is_template_method {
                    continue;
                }
                let signature = method_signature(&format!("{name}::{}", method.name), overload, false);
                let signature = signature.strip_prefix("static ").unwrap_or(&signature);
                output.push_str(&format!("\n    {signature}\n    {{\n"));
                output.push_str(&format!(
                    "        throw std::runtime_error(\"{name}::{}() is not implemented yet\");\n    }}\n",
                    method.name
                ));
            }
        }

        output.push_str("}\n");
        output
    }

    fn relation_definition(&self, relation: &RelationDef) -> String {
        let targets: Vec<String> = relation
            .target_class_names
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect();
        format!(
            "        this->define_relation(\"{}\", xtypes::RelationType::{}, {{\"{}\"}}, {{{}}}, xtypes::Constraint::{}, xtypes::DeletePolicy::{}, {}, xtypes::RelationType::{}, {});\n",
            relation.attribute_name,
            relation.relation_kind,
            self.class.qualified_name(),
            targets.join(", "),
            relation.cardinality,
            relation.delete_policy,
            Language::Cpp.map_literal(&relation.extra_properties),
            relation.subtype_of,
            Language::Cpp.bool_literal(relation.inverse),
        )
    }

    fn property_accessors(&self, property: &PropertyDef) -> String {
        let base = self.base_name();
        let accessor = property.accessor_name();
        let ty = &property.rendered_type;
        let mut output = String::new();
        output.push_str(&format!("\n    {ty} {base}::get_{accessor}() const\n    {{\n"));
        output.push_str(&format!(
            "        return this->get_property(\"{}\").get< {ty} >();\n    }}\n",
            property.name
        ));
        output.push_str(&format!(
            "\n    void {base}::set_{accessor}({} value)\n    {{\n",
            parameter_type(&property.type_expr, ty)
        ));
        output.push_str(&format!(
            "        this->set_property(\"{}\", value);\n    }}\n",
            property.name
        ));
        output
    }

    fn relation_accessors(&self, relation: &RelationDef) -> String {
        let base = self.base_name();
        let attribute = &relation.attribute_name;
        let mut output = String::new();
        output.push_str(&format!(
            "\n    const std::vector< xtypes::Fact > {base}::get_{attribute}()\n    {{\n"
        ));
        output.push_str(&format!("        return this->get_facts(\"{attribute}\");\n    }}\n"));
        output.push_str(&format!(
            "\n    void {base}::add_{attribute}(xtypes::XTypeCPtr other, const nl::json& props)\n    {{\n"
        ));
        output.push_str(&format!("        this->add_fact(\"{attribute}\", other, props);\n    }}\n"));
        output
    }

    fn uri_definition(&self) -> String {
        let Some(uri) = &self.class.custom_uri else {
            return String::new();
        };
        let base = self.base_name();
        let mut output = String::new();
        output.push_str(&format!("\n    std::string {base}::uri() const\n    {{\n"));
        output.push_str(&format!(
            "        std::string result = \"{}://{}\";\n",
            uri.scheme,
            uri.root_path.trim_start_matches('/')
        ));
        output.push_str("        auto append = [&result](const std::string& segment) {\n");
        output.push_str("            if (!result.empty() && result.back() != '/')\n");
        output.push_str("            {\n                result += \"/\";\n            }\n");
        output.push_str("            result += segment;\n        };\n");
        for dependency in &uri.dependencies {
            output.push_str(&self.uri_segment(dependency));
        }
        output.push_str("        return result;\n    }\n");
        output
    }

    fn uri_segment(&self, dependency: &UriDependency) -> String {
        let base = self.base_name();
        let name = &dependency.name;
        let missing = format!(
            "throw std::invalid_argument(\"{}::uri(): required field '{name}' is not set\");",
            self.class.name
        );
        let mut output = String::from("        {\n");
        if dependency.is_relation {
            output.push_str(&format!(
                "            const auto facts = const_cast< {base}* >(this)->get_facts(\"{name}\");\n"
            ));
            if dependency.required {
                output.push_str(&format!("            if (facts.empty())\n            {{\n                {missing}\n            }}\n"));
            }
            output.push_str("            for (const auto& fact : facts)\n            {\n");
            output.push_str("                if (const auto target = fact.target.lock())\n                {\n");
            output.push_str("                    append(target->uri());\n                }\n            }\n");
        } else {
            output.push_str(&format!(
                "            const nl::json value = this->get_property(\"{name}\");\n"
            ));
            if dependency.required {
                output.push_str(&format!("            if (value.is_null())\n            {{\n                {missing}\n            }}\n"));
                output.push_str("            append(value.is_string() ? value.get< std::string >() : value.dump());\n");
            } else {
                output.push_str("            if (!value.is_null())\n            {\n");
                output.push_str("                append(value.is_string() ? value.get< std::string >() : value.dump());\n            }\n");
            }
        }
        output.push_str("        }\n");
        output
    }
}

/// Generates `include/xtypes.hpp` listing every class of the batch.
#[must_use]
pub fn umbrella_header(batch: &BatchContext<'_>) -> String {
    let project = &batch.context.project;
    let mut output = header(ArtifactKind::UmbrellaHeader, batch.context, project);
    output.push_str("#pragma once\n\n");
    output.push_str(&format!("#include {ROOT_INCLUDE}\n"));
    output.push_str("#include <xtypes_generator/XTypeRegistry.hpp>\n");
    for class in batch.classes.iter().filter(|c| *c != ROOT_TYPE) {
        output.push_str(&format!("#include \"{class}.hpp\"\n"));
    }

    output.push_str(&format!("\nnamespace {project}\n{{\n"));
    output.push_str("    /// Creates a registry that knows every class of the project\n");
    output.push_str("    inline xtypes::XTypeRegistryPtr new_project_registry()\n    {\n");
    output.push_str("        auto registry = std::make_shared< xtypes::XTypeRegistry >();\n");
    for class in batch.classes.iter().filter(|c| *c != ROOT_TYPE) {
        output.push_str(&format!("        registry->register_class< {class} >();\n"));
    }
    output.push_str("        return registry;\n    }\n}\n");
    output
}

/// Returns true if `name` designates the runtime root class.
pub(crate) fn is_root(name: &str) -> bool {
    qualify(name, ROOT_NAMESPACE) == format!("{ROOT_NAMESPACE}::{ROOT_TYPE}")
}

fn parent_include(class: &ClassIr) -> String {
    match class.local_parent() {
        None => ROOT_INCLUDE.to_string(),
        Some(parent) if is_root(parent) => ROOT_INCLUDE.to_string(),
        Some(parent) => match parent.rsplit_once("::") {
            Some((namespace, name)) => format!("<{}/{name}.hpp>", namespace.replace("::", "/")),
            None => format!("\"{parent}.hpp\""),
        },
    }
}

fn pointer_aliases(name: &str, indent: &str) -> String {
    format!(
        "{indent}class {name};\n\
         {indent}using {name}Ptr = std::shared_ptr< {name} >;\n\
         {indent}using {name}CPtr = const std::shared_ptr< {name} >;\n\
         {indent}using Const{name}Ptr = std::shared_ptr< const {name} >;\n"
    )
}

/// Forward declares every referenced class, grouped by namespace.
fn forward_declarations(class: &ClassIr) -> String {
    let own = class.qualified_name();
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for referenced in &class.referenced_classes {
        let qualified = qualify(referenced, &class.namespace);
        if qualified == own || is_root(&qualified) {
            continue;
        }
        if let Some((namespace, name)) = qualified.rsplit_once("::") {
            groups
                .entry(namespace.to_string())
                .or_default()
                .insert(name.to_string());
        }
    }

    let mut output = String::new();
    for (namespace, names) in groups {
        output.push_str(&format!("namespace {namespace}\n{{\n"));
        for name in names {
            output.push_str(&pointer_aliases(&name, "    "));
        }
        output.push_str("}\n\n");
    }
    output
}

fn property_declaration(property: &PropertyDef) -> String {
    let accessor = property.accessor_name();
    let ty = &property.rendered_type;
    let mut output = format!("\n        /// Property '{}'\n", property.name);

    let placeholders = placeholders_of([&property.type_expr]);
    if placeholders.is_empty() {
        output.push_str(&format!("        {ty} get_{accessor}() const;\n"));
        let virtual_prefix = if property.advanced_setter { "virtual " } else { "" };
        output.push_str(&format!(
            "        {virtual_prefix}void set_{accessor}({} value);\n",
            parameter_type(&property.type_expr, ty)
        ));
    } else {
        let head = template_head(&placeholders);
        output.push_str(&format!("        {head}\n        {ty} get_{accessor}() const\n        {{\n"));
        output.push_str(&format!(
            "            return this->get_property(\"{}\").template get< {ty} >();\n        }}\n",
            property.name
        ));
        output.push_str(&format!(
            "        {head}\n        void set_{accessor}(const {ty}& value)\n        {{\n"
        ));
        output.push_str(&format!(
            "            this->set_property(\"{}\", value);\n        }}\n",
            property.name
        ));
    }
    output
}

fn property_definition(property: &PropertyDef) -> String {
    let value_type = property
        .json_kind
        .map_or("nl::json::value_t::discarded", |kind| kind.cpp_value_type());
    let allowed: Vec<&str> = property.allowed.iter().map(String::as_str).collect();
    format!(
        "        this->define_property(\"{}\", {value_type}, {{{}}}, {});\n",
        property.name,
        allowed.join(", "),
        property.default.as_deref().unwrap_or("{}")
    )
}

fn relation_declaration(relation: &RelationDef) -> String {
    let attribute = &relation.attribute_name;
    let targets: Vec<&str> = relation.target_class_names.iter().map(String::as_str).collect();
    let virtual_prefix = if relation.advanced_setter { "virtual " } else { "" };
    let mut output = format!(
        "\n        /// Relation '{attribute}' ({}) to {}\n",
        relation.relation_kind,
        targets.join(", ")
    );
    output.push_str(&format!(
        "        const std::vector< xtypes::Fact > get_{attribute}();\n"
    ));
    output.push_str(&format!(
        "        {virtual_prefix}void add_{attribute}(xtypes::XTypeCPtr other, const nl::json& props = nl::json::object());\n"
    ));
    output
}

/// Renders the type of a parameter: scalars by value, everything else by
/// const reference.
pub(crate) fn parameter_type(ty: &TypeExpression, rendered: &str) -> String {
    match ty.primitive_type() {
        Some(
            PrimitiveType::Boolean
            | PrimitiveType::Integer
            | PrimitiveType::Integer64
            | PrimitiveType::Float
            | PrimitiveType::Float64
            | PrimitiveType::Enum,
        ) => rendered.to_string(),
        _ => format!("const {rendered}&"),
    }
}

/// Renders `[static ]<ret> <name>(<args>)[ const]`.
fn method_signature(name: &str, overload: &Overload, with_defaults: bool) -> String {
    let arguments: Vec<String> = overload
        .arguments
        .iter()
        .map(|arg| {
            let mut rendered = format!(
                "{} {}",
                parameter_type(&arg.type_expr, &arg.rendered_type),
                arg.name
            );
            if let (true, Some(default)) = (with_defaults, &arg.default) {
                rendered.push_str(&format!(" = {default}"));
            }
            rendered
        })
        .collect();
    format!(
        "{}{} {name}({}){}",
        if overload.is_static { "static " } else { "" },
        overload.returns.rendered_type,
        arguments.join(", "),
        if overload.is_const && !overload.is_static { " const" } else { "" }
    )
}

/// Returns the placeholder names (`T`, `T1`, ...) used by an overload.
pub(crate) fn overload_placeholders(overload: &Overload) -> Vec<String> {
    placeholders_of(
        overload
            .returns
            .type_expr
            .iter()
            .chain(overload.arguments.iter().map(|a| &a.type_expr)),
    )
}

pub(crate) fn placeholders_of<'t>(types: impl IntoIterator<Item = &'t TypeExpression>) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack: Vec<&TypeExpression> = types.into_iter().collect();
    stack.reverse();
    while let Some(ty) = stack.pop() {
        if ty.is_template() {
            let name = ty.template_index.map_or_else(|| "T".to_string(), |i| format!("T{i}"));
            if !names.contains(&name) {
                names.push(name);
            }
        }
        stack.extend(ty.arguments.iter().rev());
    }
    names
}

fn template_head(placeholders: &[String]) -> String {
    let params: Vec<String> = placeholders.iter().map(|p| format!("typename {p}")).collect();
    format!("template <{}>", params.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use xtypes_schema::{parse_document, resolve};

    fn generate(yaml: &str) -> (ClassIr, TemplateContext) {
        let doc = parse_document(yaml).expect("Failed to parse");
        let class = resolve(&doc, "robot", Language::Cpp).expect("Failed to resolve");
        (class, TemplateContext::new("robot", Local::now()))
    }

    #[test]
    fn test_base_class_with_string_property() {
        let (class, ctx) = generate("name: Widget\nproperties:\n  label:\n    type: STRING\n    default: x\n");
        let generator = CppGenerator::new(&class, &ctx);

        let header = generator.base_header();
        assert!(header.contains("class _Widget : public xtypes::XType"));
        assert!(header.contains("std::string get_label() const;"));
        assert!(header.contains("void set_label(const std::string& value);"));
        assert!(header.contains(ROOT_INCLUDE));

        let source = generator.base_source();
        assert!(source.contains("const std::string _Widget::classname = \"robot::Widget\";"));
        assert!(source.contains(
            "this->define_property(\"label\", nl::json::value_t::string, {}, \"x\");"
        ));
    }

    #[test]
    fn test_derived_class_includes_parent() {
        let (class, ctx) = generate("name: Derived\ninherit: Base\n");
        let header = CppGenerator::new(&class, &ctx).base_header();
        assert!(header.contains("#include \"Base.hpp\""));
        assert!(header.contains("class _Derived : public robot::Base"));
    }

    #[test]
    fn test_relation_definition() {
        let yaml = r"
name: Robot
relations:
  parts:
    type: has
    other_classnames: [Part, geometry::Frame]
    cardinality: one2many
    properties:
      weight: 2
";
        let (class, ctx) = generate(yaml);
        let generator = CppGenerator::new(&class, &ctx);
        let source = generator.base_source();
        assert!(source.contains(
            "this->define_relation(\"parts\", xtypes::RelationType::HAS, {\"robot::Robot\"}, {\"geometry::Frame\", \"robot::Part\"}, xtypes::Constraint::ONE2MANY, xtypes::DeletePolicy::DELETENONE, {{\"weight\", 2}}, xtypes::RelationType::NONE, false);"
        ));

        let header = generator.base_header();
        assert!(header.contains("namespace geometry\n{\n    class Frame;"));
        assert!(header.contains("namespace robot\n{\n    class Part;"));
        assert!(header.contains("const std::vector< xtypes::Fact > get_parts();"));
    }

    #[test]
    fn test_skeleton_methods() {
        let yaml = r"
name: Arm
methods:
  reach:
    description: moves the arm
    returns:
      type: BOOLEAN
    arguments:
      - name: distance
        type: FLOAT64
        default: 1.0
    const: true
  lookup:
    returns:
      type: TEMPLATE
    arguments:
      - name: key
        type: STRING
";
        let (class, ctx) = generate(yaml);
        let generator = CppGenerator::new(&class, &ctx);

        let header = generator.skeleton_header();
        assert!(header.contains("class Arm : public _Arm"));
        assert!(header.contains("/// moves the arm"));
        assert!(header.contains("bool reach(double distance = 1.0) const;"));
        assert!(header.contains("template <typename T>\n        T lookup(const std::string& key)\n"));

        let source = generator.skeleton_source();
        assert!(source.contains("bool Arm::reach(double distance) const\n"));
        assert!(!source.contains("Arm::lookup"));
    }

    #[test]
    fn test_multiline_description_stays_commented() {
        let yaml = r"
name: Arm
methods:
  reach:
    description: |
      Moves the arm.
      Returns true on success.
    returns:
      type: BOOLEAN
";
        let (class, ctx) = generate(yaml);
        let header = CppGenerator::new(&class, &ctx).skeleton_header();
        assert!(header.contains(
            "        /// Moves the arm.\n        /// Returns true on success.\n        bool reach();\n"
        ));
        assert!(!header.contains("\nReturns true"));
    }

    #[test]
    fn test_custom_uri() {
        let yaml = r"
name: Tool
properties:
  serial:
    type: STRING
uri:
  scheme: tool
  from:
    - name: serial
";
        let (class, ctx) = generate(yaml);
        let generator = CppGenerator::new(&class, &ctx);
        assert!(generator.base_header().contains("std::string uri() const override;"));
        let source = generator.base_source();
        assert!(source.contains("std::string result = \"tool://\";"));
        assert!(source.contains("this->get_property(\"serial\")"));
        assert!(source.contains("required field 'serial' is not set"));
    }

    #[test]
    fn test_umbrella_header() {
        let ctx = TemplateContext::new("robot", Local::now());
        let classes = vec!["XType".to_string(), "Base".to_string(), "Derived".to_string()];
        let batch = BatchContext {
            context: &ctx,
            classes: &classes,
            create_project_registry: true,
        };
        let output = umbrella_header(&batch);
        let root = output.find(ROOT_INCLUDE).expect("root include");
        let base = output.find("#include \"Base.hpp\"").expect("base include");
        let derived = output.find("#include \"Derived.hpp\"").expect("derived include");
        assert!(root < base && base < derived);
        assert!(output.contains("registry->register_class< Derived >();"));
        assert!(!output.contains("register_class< XType >"));
    }

    #[test]
    fn test_placeholders_in_order() {
        let (class, _) = generate(
            "name: A\nmethods:\n  m:\n    returns:\n      type: TEMPLATE:2\n    arguments:\n      - name: a\n        type: VECTOR(TEMPLATE)\n",
        );
        assert_eq!(
            overload_placeholders(&class.methods[0].overloads[0]),
            vec!["T2", "T"]
        );
    }
}
