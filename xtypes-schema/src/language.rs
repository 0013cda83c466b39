//! Target languages and their rendering tables.
//!
//! Each [`Language`] carries the table used to turn a [`TypeExpression`] into
//! target-language type syntax and the spelling of its literals. Adding a
//! target means adding a variant and its table entries; the parser is never
//! touched.

use crate::error::{TypeError, UnsupportedLanguage};
use crate::types::{
    ContainerKind, PrimitiveType, Qualifier, ROOT_NAMESPACE, ROOT_TYPE, TypeExpression, TypeKind,
    qualify,
};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    /// C++ class declarations on top of the xtypes runtime.
    Cpp,
    /// Python bindings (pybind11 sources and typing stubs).
    Python,
}

impl Language {
    /// All supported languages, in emission order.
    pub const ALL: [Language; 2] = [Language::Cpp, Language::Python];

    /// Returns the command-line identifier of the language.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cpp => "CPP",
            Self::Python => "PYTHON",
        }
    }

    /// Renders a type expression in this language.
    ///
    /// # Errors
    /// Returns `TypeError` if a composite has no table entry or the wrong
    /// number of arguments.
    pub fn render_type(&self, expr: &TypeExpression, namespace: &str) -> Result<String, TypeError> {
        match expr.kind {
            TypeKind::Primitive => Ok(match expr.primitive_type() {
                Some(p) => self.primitive(p).to_string(),
                None => expr.source.clone(),
            }),
            TypeKind::XTypeReference => Ok(self.xtype(expr, namespace)),
            TypeKind::TemplatePlaceholder => Ok(match expr.template_index {
                Some(index) => format!("T{index}"),
                None => "T".to_string(),
            }),
            TypeKind::Function => {
                let signature = expr.arguments.first().map_or("", |a| a.source.as_str());
                Ok(self.function(signature))
            }
            TypeKind::Composite => self.composite(expr, namespace),
        }
    }

    fn primitive(&self, primitive: PrimitiveType) -> &'static str {
        match (self, primitive) {
            (Self::Cpp, PrimitiveType::Boolean) => "bool",
            (Self::Cpp, PrimitiveType::String) => "std::string",
            (Self::Cpp, PrimitiveType::Integer | PrimitiveType::Enum) => "int",
            (Self::Cpp, PrimitiveType::Integer64) => "int64_t",
            (Self::Cpp, PrimitiveType::Float) => "float",
            (Self::Cpp, PrimitiveType::Float64) => "double",
            (Self::Cpp, PrimitiveType::Json) => "nl::json",
            (Self::Python, PrimitiveType::Boolean) => "bool",
            (Self::Python, PrimitiveType::String) => "str",
            (Self::Python, PrimitiveType::Integer | PrimitiveType::Integer64 | PrimitiveType::Enum) => "int",
            (Self::Python, PrimitiveType::Float | PrimitiveType::Float64) => "float",
            (Self::Python, PrimitiveType::Json) => "Any",
        }
    }

    /// Returns the container template with `@PARAM@` placeholder tokens.
    fn container_template(&self, container: ContainerKind) -> &'static str {
        match (self, container) {
            (Self::Cpp, ContainerKind::Vector) => "std::vector< @T@ >",
            (Self::Cpp, ContainerKind::Set) => "std::set< @T@ >",
            (Self::Cpp, ContainerKind::UnorderedSet) => "std::unordered_set< @T@ >",
            (Self::Cpp, ContainerKind::Map) => "std::map< @K@, @V@ >",
            (Self::Cpp, ContainerKind::UnorderedMap) => "std::unordered_map< @K@, @V@ >",
            (Self::Cpp, ContainerKind::Pair) => "std::pair< @A@, @B@ >",
            (Self::Python, ContainerKind::Vector) => "List[@T@]",
            (Self::Python, ContainerKind::Set | ContainerKind::UnorderedSet) => "Set[@T@]",
            (Self::Python, ContainerKind::Map | ContainerKind::UnorderedMap) => "Dict[@K@, @V@]",
            (Self::Python, ContainerKind::Pair) => "Tuple[@A@, @B@]",
        }
    }

    fn composite(&self, expr: &TypeExpression, namespace: &str) -> Result<String, TypeError> {
        let container = expr
            .container_kind()
            .ok_or_else(|| TypeError::UnknownTypeConstructor {
                base: expr.base_name.clone(),
                language: self.name().to_string(),
            })?;
        let params = container.params();
        if params.len() != expr.arguments.len() {
            return Err(TypeError::malformed(
                &expr.source,
                format!("{} expects {} type argument(s)", expr.base_name, params.len()),
            ));
        }

        let mut rendered = self.container_template(container).to_string();
        for (param, arg) in params.iter().zip(&expr.arguments) {
            let arg = self.render_type(arg, namespace)?;
            rendered = rendered.replace(&format!("@{param}@"), &arg);
        }
        Ok(rendered)
    }

    fn xtype(&self, expr: &TypeExpression, namespace: &str) -> String {
        let qualified = qualify(&expr.base_name, namespace);
        match self {
            Self::Cpp => {
                let mut rendered = String::new();
                if expr.qualifiers.contains(&Qualifier::Const) {
                    rendered.push_str("const ");
                }
                rendered.push_str(&qualified);
                if expr.qualifiers.contains(&Qualifier::ConstPointer) {
                    rendered.push_str("CPtr");
                } else if expr.qualifiers.contains(&Qualifier::Pointer) {
                    rendered.push_str("Ptr");
                }
                rendered
            }
            // The root class is imported from the runtime module under its bare name.
            Self::Python if qualified == format!("{ROOT_NAMESPACE}::{ROOT_TYPE}") => {
                ROOT_TYPE.to_string()
            }
            Self::Python => match qualified.strip_prefix(&format!("{namespace}::")) {
                Some(local) => local.to_string(),
                None => qualified.replace("::", "."),
            },
        }
    }

    fn function(&self, signature: &str) -> String {
        match self {
            Self::Cpp => format!("std::function< {signature} >"),
            Self::Python => "Callable[..., Any]".to_string(),
        }
    }

    /// Returns the return type used when a method declares none.
    #[must_use]
    pub const fn void_type(&self) -> &'static str {
        match self {
            Self::Cpp => "void",
            Self::Python => "None",
        }
    }

    /// Returns the boolean literal spelling.
    #[must_use]
    pub const fn bool_literal(&self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Cpp, true) => "true",
            (Self::Cpp, false) => "false",
            (Self::Python, true) => "True",
            (Self::Python, false) => "False",
        }
    }

    /// Returns the null literal spelling.
    #[must_use]
    pub const fn null_literal(&self) -> &'static str {
        match self {
            Self::Cpp => "nullptr",
            Self::Python => "None",
        }
    }

    /// Returns the explicit empty JSON object constructor.
    #[must_use]
    pub const fn empty_object(&self) -> &'static str {
        match self {
            Self::Cpp => "nl::json(nl::json::value_t::object)",
            Self::Python => "dict()",
        }
    }

    /// Renders a quoted string literal.
    #[must_use]
    pub fn string_literal(&self, value: &str) -> String {
        serde_json::Value::String(value.to_string()).to_string()
    }

    /// Renders an aggregate JSON value as an expression.
    #[must_use]
    pub fn json_literal(&self, value: &serde_json::Value) -> String {
        match self {
            Self::Cpp => format!("nl::json::parse(R\"({value})\")"),
            Self::Python => python_literal(value),
        }
    }

    /// Renders key/value pairs as a literal map.
    #[must_use]
    pub fn map_literal(&self, entries: &BTreeMap<String, String>) -> String {
        let items: Vec<String> = entries
            .iter()
            .map(|(key, value)| match self {
                Self::Cpp => format!("{{{}, {value}}}", self.string_literal(key)),
                Self::Python => format!("{}: {value}", self.string_literal(key)),
            })
            .collect();
        format!("{{{}}}", items.join(", "))
    }
}

fn python_literal(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => Language::Python.bool_literal(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", Value::String(k.clone()), python_literal(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CPP" | "C++" => Ok(Self::Cpp),
            "PYTHON" => Ok(Self::Python),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_type;

    fn render(language: Language, expr: &str) -> String {
        let ty = parse_type(expr).expect("Failed to parse");
        language.render_type(&ty, "robot").expect("Failed to render")
    }

    #[test]
    fn test_render_primitives() {
        assert_eq!(render(Language::Cpp, "STRING"), "std::string");
        assert_eq!(render(Language::Cpp, "FLOAT64"), "double");
        assert_eq!(render(Language::Python, "STRING"), "str");
        assert_eq!(render(Language::Python, "INTEGER64"), "int");
    }

    #[test]
    fn test_render_opaque_passes_through() {
        assert_eq!(render(Language::Cpp, "Eigen::Vector3d"), "Eigen::Vector3d");
    }

    #[test]
    fn test_render_map_keeps_argument_order() {
        assert_eq!(
            render(Language::Cpp, "MAP(STRING;INTEGER)"),
            "std::map< std::string, int >"
        );
        assert_eq!(render(Language::Python, "MAP(STRING;INTEGER)"), "Dict[str, int]");
    }

    #[test]
    fn test_render_nested_composite() {
        assert_eq!(
            render(Language::Cpp, "VECTOR(PAIR(STRING, XTYPE(PartPtr)))"),
            "std::vector< std::pair< std::string, robot::PartPtr > >"
        );
    }

    #[test]
    fn test_render_xtype_decorations() {
        assert_eq!(render(Language::Cpp, "XTYPE(Part)"), "robot::Part");
        assert_eq!(render(Language::Cpp, "XTYPE(PartCPtr)"), "robot::PartCPtr");
        assert_eq!(render(Language::Cpp, "XTYPE(ConstPartPtr)"), "const robot::PartPtr");
        assert_eq!(render(Language::Cpp, "XTYPE(XTypePtr)"), "xtypes::XTypePtr");
        assert_eq!(render(Language::Python, "XTYPE(PartPtr)"), "Part");
        assert_eq!(render(Language::Python, "XTYPE(other::PartPtr)"), "other.Part");
        assert_eq!(render(Language::Python, "XTYPE(XTypePtr)"), "XType");
        assert_eq!(render(Language::Python, "XTYPE(xtypes::XType)"), "XType");
    }

    #[test]
    fn test_render_template_and_function() {
        assert_eq!(render(Language::Cpp, "TEMPLATE[INTEGER]"), "T");
        assert_eq!(render(Language::Cpp, "TEMPLATE:2"), "T2");
        assert_eq!(
            render(Language::Cpp, "FUNCTION(void(int))"),
            "std::function< void(int) >"
        );
    }

    #[test]
    fn test_render_unknown_constructor_fails() {
        let ty = parse_type("OPTIONAL(STRING)").expect("Failed to parse");
        let err = Language::Cpp.render_type(&ty, "robot").unwrap_err();
        assert!(matches!(err, TypeError::UnknownTypeConstructor { .. }));
    }

    #[test]
    fn test_render_wrong_arity_fails() {
        let ty = parse_type("MAP(STRING)").expect("Failed to parse");
        assert!(Language::Cpp.render_type(&ty, "robot").is_err());
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("cpp".parse::<Language>(), Ok(Language::Cpp));
        assert_eq!("Python".parse::<Language>(), Ok(Language::Python));
        assert!("rust".parse::<Language>().is_err());
    }

    #[test]
    fn test_map_literal() {
        let mut entries = BTreeMap::new();
        entries.insert("weight".to_string(), "1.5".to_string());
        entries.insert("fixed".to_string(), "true".to_string());
        assert_eq!(
            Language::Cpp.map_literal(&entries),
            r#"{{"fixed", true}, {"weight", 1.5}}"#
        );
        assert_eq!(
            Language::Python.map_literal(&entries),
            r#"{"fixed": true, "weight": 1.5}"#
        );
    }
}
