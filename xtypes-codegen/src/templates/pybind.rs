//! pybind11 binding templates.

use super::cpp::{is_root, overload_placeholders, parameter_type, placeholders_of};
use super::{BatchContext, TemplateContext, header};
use crate::artifact::ArtifactKind;
use xtypes_schema::ir::{ClassIr, MethodDef, Overload, PropertyDef, RelationDef};
use xtypes_schema::{Language, ROOT_TYPE};

/// Project owning the runtime root class.
pub const RUNTIME_PROJECT: &str = "xtypes_generator";

/// Returns the name of the function registering `class` in a module.
#[must_use]
pub fn init_function(project: &str, class: &str) -> String {
    format!(
        "PYBIND11_INIT_{}__{}",
        project.to_ascii_uppercase(),
        class.to_ascii_uppercase()
    )
}

/// Generator for the binding source of one class.
pub struct PybindGenerator<'a> {
    class: &'a ClassIr,
    context: &'a TemplateContext,
}

impl<'a> PybindGenerator<'a> {
    /// Creates a new binding generator.
    #[must_use]
    pub fn new(class: &'a ClassIr, context: &'a TemplateContext) -> Self {
        Self { class, context }
    }

    /// Generates `pybind/py<Class>.cpp`.
    #[must_use]
    pub fn generate(&self) -> String {
        let class = self.class;
        let qualified = class.qualified_name();
        let mut output = header(ArtifactKind::Binding, self.context, &class.name);

        output.push_str("#include <pybind11/pybind11.h>\n");
        output.push_str("#include <pybind11/stl.h>\n");
        output.push_str("#include <pybind11/functional.h>\n");
        output.push_str("#include <nlohmann/json.hpp>\n");
        output.push_str("#include <pybind11_json/pybind11_json.hpp>\n\n");
        output.push_str(&format!("#include \"{}.hpp\"\n\n", class.name));
        output.push_str("namespace py = pybind11;\nnamespace nl = nlohmann;\n\n");

        output.push_str("PYBIND11_EXPORT\n");
        output.push_str(&format!(
            "void {}(py::module_& m)\n{{\n",
            init_function(&self.context.project, &class.name)
        ));
        let parent = if is_root(&class.name) {
            String::new()
        } else {
            format!("{}, ", class.qualified_parent())
        };
        output.push_str(&format!(
            "    py::class_< {qualified}, {parent}std::shared_ptr< {qualified} > >(m, \"{}\")\n",
            class.name
        ));
        output.push_str(&format!(
            "        .def(py::init< const std::string& >(), py::arg(\"classname\") = {qualified}::classname)\n"
        ));
        output.push_str(&format!(
            "        .def_readonly_static(\"classname\", &{qualified}::classname)"
        ));

        for property in class.properties.values() {
            output.push_str(&self.property_binding(property));
        }
        for relation in class.relations.values() {
            output.push_str(&self.relation_binding(relation));
        }
        for method in &class.methods {
            for overload in &method.overloads {
                output.push_str(&self.method_binding(method, overload));
            }
        }

        output.push_str(";\n}\n");
        output
    }

    fn property_binding(&self, property: &PropertyDef) -> String {
        let qualified = self.class.qualified_name();
        let accessor = property.accessor_name();
        let placeholders = placeholders_of([&property.type_expr]).len();
        let instantiation = if placeholders == 0 {
            String::new()
        } else {
            format!("< {} >", vec!["nl::json"; placeholders].join(", "))
        };
        format!(
            "\n        .def_property(\"{accessor}\", &{qualified}::get_{accessor}{instantiation}, &{qualified}::set_{accessor}{instantiation})"
        )
    }

    fn relation_binding(&self, relation: &RelationDef) -> String {
        let qualified = self.class.qualified_name();
        let attribute = &relation.attribute_name;
        format!(
            "\n        .def(\"get_{attribute}\", &{qualified}::get_{attribute})\
             \n        .def(\"add_{attribute}\", &{qualified}::add_{attribute}, py::arg(\"other\"), py::arg(\"props\") = nl::json::object())"
        )
    }

    fn method_binding(&self, method: &MethodDef, overload: &Overload) -> String {
        let qualified = self.class.qualified_name();
        let def = if overload.is_static { "def_static" } else { "def" };
        let mut trailing: Vec<String> = overload
            .arguments
            .iter()
            .map(|arg| match &arg.default {
                Some(default) => format!("py::arg(\"{}\") = {default}", arg.name),
                None => format!("py::arg(\"{}\")", arg.name),
            })
            .collect();
        let description = if overload.description.is_empty() {
            &method.description
        } else {
            &overload.description
        };
        if !description.is_empty() {
            trailing.push(Language::Cpp.string_literal(description));
        }
        let trailing: String = trailing.iter().map(|t| format!(", {t}")).collect();

        let placeholders = overload_placeholders(overload);
        if placeholders.is_empty() {
            let target = if method.overloaded {
                let params: Vec<String> = overload
                    .arguments
                    .iter()
                    .map(|arg| parameter_type(&arg.type_expr, &arg.rendered_type))
                    .collect();
                let constness = if overload.is_const && !overload.is_static {
                    ", py::const_"
                } else {
                    ""
                };
                format!(
                    "py::overload_cast< {} >(&{qualified}::{}{constness})",
                    params.join(", "),
                    method.name
                )
            } else {
                format!("&{qualified}::{}", method.name)
            };
            return format!("\n        .{def}(\"{}\", {target}{trailing})", method.name);
        }

        // One binding per candidate type, used for every placeholder.
        let mut output = String::new();
        for candidate in &overload.template_type_names {
            let arguments = vec![candidate.as_str(); placeholders.len()].join(", ");
            output.push_str(&format!(
                "\n        .{def}(\"{}\", &{qualified}::template {}< {arguments} >{trailing})",
                method.name, method.name
            ));
        }
        output
    }
}

/// Generates `pybind/pybind11_module.cpp` registering every class of the
/// batch in dependency order.
#[must_use]
pub fn binding_module(batch: &BatchContext<'_>) -> String {
    let project = &batch.context.project;
    let runtime = project == RUNTIME_PROJECT;
    let mut output = header(ArtifactKind::BindingModule, batch.context, project);

    output.push_str("#include <pybind11/pybind11.h>\n");
    if batch.create_project_registry {
        output.push_str("#include \"xtypes.hpp\"\n");
    }
    output.push_str("\nnamespace py = pybind11;\n\n");

    let mut initializers = Vec::new();
    for class in std::iter::once(ROOT_TYPE).chain(batch.classes.iter().map(String::as_str)) {
        if is_root(class) && !runtime {
            continue;
        }
        let function = init_function(project, class);
        if !initializers.contains(&function) {
            initializers.push(function);
        }
    }

    for function in &initializers {
        output.push_str(&format!("void {function}(py::module_& m);\n"));
    }

    output.push_str(&format!("\nPYBIND11_MODULE({project}, m)\n{{\n"));
    output.push_str(&format!("    m.doc() = \"Python bindings of project {project}\";\n"));
    if !runtime {
        output.push_str(&format!("    py::module_::import(\"{RUNTIME_PROJECT}\");\n"));
    }
    for function in &initializers {
        output.push_str(&format!("    {function}(m);\n"));
    }
    if batch.create_project_registry {
        output.push_str(&format!(
            "    m.def(\"ProjectRegistry\", &{project}::new_project_registry, \"Creates a registry that knows every class of the project\");\n"
        ));
    }
    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use xtypes_schema::{parse_document, resolve};

    fn bind(yaml: &str) -> String {
        let doc = parse_document(yaml).expect("Failed to parse");
        let class = resolve(&doc, "robot", Language::Cpp).expect("Failed to resolve");
        let ctx = TemplateContext::new("robot", Local::now());
        PybindGenerator::new(&class, &ctx).generate()
    }

    #[test]
    fn test_init_function_name() {
        assert_eq!(init_function("robot", "Widget"), "PYBIND11_INIT_ROBOT__WIDGET");
    }

    #[test]
    fn test_class_binding() {
        let output = bind(
            "name: Widget\nproperties:\n  label:\n    type: STRING\nrelations:\n  parts:\n    type: HAS\n    other_classnames: [Part]\n",
        );
        assert!(output.contains("void PYBIND11_INIT_ROBOT__WIDGET(py::module_& m)"));
        assert!(output.contains(
            "py::class_< robot::Widget, xtypes::XType, std::shared_ptr< robot::Widget > >(m, \"Widget\")"
        ));
        assert!(output.contains(
            ".def_property(\"label\", &robot::Widget::get_label, &robot::Widget::set_label)"
        ));
        assert!(output.contains(".def(\"add_parts\", &robot::Widget::add_parts"));
        assert!(output.trim_end().ends_with(";\n}"));
    }

    #[test]
    fn test_overloaded_and_static_methods() {
        let yaml = r"
name: Arm
methods:
  move:
    overrides:
      - arguments:
          - name: x
            type: FLOAT64
        const: true
      - arguments:
          - name: target
            type: STRING
  create:
    static: true
    returns:
      type: XTYPE(ArmPtr)
";
        let output = bind(yaml);
        assert!(output.contains(
            ".def(\"move\", py::overload_cast< double >(&robot::Arm::move, py::const_), py::arg(\"x\"))"
        ));
        assert!(output.contains(
            ".def(\"move\", py::overload_cast< const std::string& >(&robot::Arm::move), py::arg(\"target\"))"
        ));
        assert!(output.contains(".def_static(\"create\", &robot::Arm::create)"));
    }

    #[test]
    fn test_template_method_per_candidate() {
        let yaml = r"
name: Store
methods:
  get:
    returns:
      type: TEMPLATE[INTEGER;STRING]
    arguments:
      - name: key
        type: STRING
";
        let output = bind(yaml);
        assert!(output.contains("&robot::Store::template get< int >, py::arg(\"key\")"));
        assert!(output.contains("&robot::Store::template get< std::string >, py::arg(\"key\")"));
    }

    #[test]
    fn test_binding_module_order_and_registry() {
        let ctx = TemplateContext::new("robot", Local::now());
        let classes = vec!["XType".to_string(), "Base".to_string(), "Derived".to_string()];
        let batch = BatchContext {
            context: &ctx,
            classes: &classes,
            create_project_registry: true,
        };
        let output = binding_module(&batch);
        assert!(output.contains("PYBIND11_MODULE(robot, m)"));
        assert!(output.contains("py::module_::import(\"xtypes_generator\");"));
        assert!(!output.contains("PYBIND11_INIT_ROBOT__XTYPE"));
        let base = output.find("    PYBIND11_INIT_ROBOT__BASE(m);").expect("base");
        let derived = output.find("    PYBIND11_INIT_ROBOT__DERIVED(m);").expect("derived");
        assert!(base < derived);
        assert!(output.contains("&robot::new_project_registry"));

        let batch = BatchContext {
            create_project_registry: false,
            ..batch
        };
        assert!(!binding_module(&batch).contains("ProjectRegistry"));
    }

    #[test]
    fn test_runtime_module_binds_root() {
        let ctx = TemplateContext::new(RUNTIME_PROJECT, Local::now());
        let classes = vec!["XType".to_string()];
        let batch = BatchContext {
            context: &ctx,
            classes: &classes,
            create_project_registry: false,
        };
        let output = binding_module(&batch);
        assert_eq!(output.matches("    PYBIND11_INIT_XTYPES_GENERATOR__XTYPE(m);").count(), 1);
    }
}
