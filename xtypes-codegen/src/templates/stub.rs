//! Python typing stub template.

use super::cpp::{is_root, overload_placeholders, placeholders_of};
use super::pybind::RUNTIME_PROJECT;
use super::{TemplateContext, header};
use crate::artifact::ArtifactKind;
use std::collections::BTreeSet;
use xtypes_schema::ROOT_TYPE;
use xtypes_schema::ir::{ClassIr, MethodDef, Overload};

const INDENT: &str = "    ";

/// Generator for the `.pyi` stub of one class.
pub struct StubGenerator<'a> {
    class: &'a ClassIr,
    context: &'a TemplateContext,
}

impl<'a> StubGenerator<'a> {
    /// Creates a new stub generator.
    #[must_use]
    pub fn new(class: &'a ClassIr, context: &'a TemplateContext) -> Self {
        Self { class, context }
    }

    /// Generates `python/<Class>.pyi`.
    #[must_use]
    pub fn generate(&self) -> String {
        let class = self.class;
        let mut output = header(ArtifactKind::Stub, self.context, &class.name);

        output.push_str(
            "from typing import Any, Callable, Dict, List, Set, Tuple, TypeVar, overload\n\n",
        );
        for import in self.imports() {
            output.push_str(&import);
            output.push('\n');
        }
        output.push('\n');

        let placeholders = self.placeholders();
        if !placeholders.is_empty() {
            for placeholder in &placeholders {
                output.push_str(&format!("{placeholder} = TypeVar(\"{placeholder}\")\n"));
            }
            output.push('\n');
        }

        output.push_str(&format!("\nclass {}({}):\n", class.name, self.parent_name()));
        output.push_str(&format!("{INDENT}classname: str\n"));
        for property in class.properties.values() {
            output.push_str(&format!(
                "{INDENT}{}: {}\n",
                property.accessor_name(),
                property.rendered_type
            ));
        }
        output.push('\n');
        output.push_str(&format!(
            "{INDENT}def __init__(self, classname: str = ...) -> None: ...\n"
        ));

        for relation in class.relations.values() {
            let attribute = &relation.attribute_name;
            output.push_str(&format!(
                "\n{INDENT}def get_{attribute}(self) -> List[Any]: ...\n"
            ));
            output.push_str(&format!(
                "{INDENT}def add_{attribute}(self, other: {ROOT_TYPE}, props: Dict[str, Any] = ...) -> None: ...\n"
            ));
        }

        for method in &class.methods {
            for overload in &method.overloads {
                output.push_str(&method_stub(method, overload));
            }
        }
        output
    }

    fn parent_name(&self) -> String {
        if is_root(&self.class.name) {
            return "object".to_string();
        }
        match self.class.local_parent() {
            Some(parent) if !is_root(parent) => parent
                .rsplit_once("::")
                .map_or(parent, |(_, name)| name)
                .to_string(),
            _ => ROOT_TYPE.to_string(),
        }
    }

    /// Import lines for the parent and every referenced class.
    fn imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        if !is_root(&self.class.name) {
            imports.insert(format!("from {RUNTIME_PROJECT} import {ROOT_TYPE}"));
        }

        let names = self
            .class
            .local_parent()
            .into_iter()
            .chain(self.class.referenced_classes.iter().map(String::as_str));
        for name in names {
            if is_root(name) || name == self.class.name {
                continue;
            }
            let import = match name.rsplit_once("::") {
                Some((namespace, class)) => {
                    format!("from {} import {class}", namespace.replace("::", "."))
                }
                None => format!("from .{name} import {name}"),
            };
            imports.insert(import);
        }
        imports
    }

    fn placeholders(&self) -> Vec<String> {
        let class = self.class;
        let mut names = placeholders_of(class.properties.values().map(|p| &p.type_expr));
        for overload in class.methods.iter().flat_map(|m| &m.overloads) {
            for name in overload_placeholders(overload) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn method_stub(method: &MethodDef, overload: &Overload) -> String {
    let mut output = String::from("\n");
    if method.overloaded {
        output.push_str(&format!("{INDENT}@overload\n"));
    }
    let mut parameters = Vec::new();
    if overload.is_static {
        output.push_str(&format!("{INDENT}@staticmethod\n"));
    } else {
        parameters.push("self".to_string());
    }
    for arg in &overload.arguments {
        let mut parameter = format!("{}: {}", arg.name, arg.rendered_type);
        if let Some(default) = &arg.default {
            parameter.push_str(&format!(" = {default}"));
        }
        parameters.push(parameter);
    }

    output.push_str(&format!(
        "{INDENT}def {}({}) -> {}:",
        method.name,
        parameters.join(", "),
        overload.returns.rendered_type
    ));
    let description = if overload.description.is_empty() {
        &method.description
    } else {
        &overload.description
    };
    if description.is_empty() {
        output.push_str(" ...\n");
    } else {
        output.push_str(&format!("\n{INDENT}{INDENT}\"\"\"{description}\"\"\"\n{INDENT}{INDENT}...\n"));
    }
    output
}
