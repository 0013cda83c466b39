//! Type expressions.
//!
//! This module contains the parser for the compact type mini-language used in
//! schema fields (`STRING`, `VECTOR(XTYPE(PartPtr))`, `TEMPLATE[INTEGER;STRING]`,
//! `FUNCTION(void(int))`, ...) and the catalogues of known primitive and
//! container types.

use crate::error::TypeError;
use std::collections::BTreeSet;
use std::fmt;

/// Name of the root class every XType derives from.
pub const ROOT_TYPE: &str = "XType";

/// Namespace the root class lives in.
pub const ROOT_NAMESPACE: &str = "xtypes";

/// Template candidates used when neither a placeholder nor its class supply any.
pub const DEFAULT_TEMPLATE_TYPES: [&str; 5] = ["BOOLEAN", "INTEGER", "FLOAT64", "STRING", "JSON"];

/// Kind of a parsed type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Known primitive or opaque target-native type name.
    Primitive,
    /// Reference to a schema-defined class (`XTYPE(...)`).
    XTypeReference,
    /// Generic slot (`TEMPLATE`, `TEMPLATE[...]`, `TEMPLATE:<n>[...]`).
    TemplatePlaceholder,
    /// Callable type (`FUNCTION(...)`), signature kept verbatim.
    Function,
    /// Type constructor applied to arguments (`BASE(arg, ...)`).
    Composite,
}

/// Qualifier of an XType reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    /// Leading `Const` on the class name.
    Const,
    /// Trailing `Ptr` on the class name.
    Pointer,
    /// Trailing `CPtr` on the class name.
    ConstPointer,
}

/// Parsed form of a type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    /// Expression kind.
    pub kind: TypeKind,
    /// Uppercased identifier, or the class name for XType references.
    pub base_name: String,
    /// Nested argument types (empty for primitives).
    pub arguments: Vec<TypeExpression>,
    /// Qualifiers (XType references only).
    pub qualifiers: BTreeSet<Qualifier>,
    /// Allowed instantiation types (template placeholders only).
    pub template_candidates: Vec<String>,
    /// Explicit placeholder index from `TEMPLATE:<n>`.
    pub template_index: Option<u32>,
    /// The trimmed source text.
    pub source: String,
}

impl TypeExpression {
    /// Creates a primitive expression from a bare identifier.
    ///
    /// Unknown identifiers are kept as opaque target-native names.
    #[must_use]
    pub fn primitive(source: &str) -> Self {
        Self::new(TypeKind::Primitive, source.to_ascii_uppercase(), source)
    }

    fn new(kind: TypeKind, base_name: String, source: &str) -> Self {
        Self {
            kind,
            base_name,
            arguments: Vec::new(),
            qualifiers: BTreeSet::new(),
            template_candidates: Vec::new(),
            template_index: None,
            source: source.to_string(),
        }
    }

    /// Returns true if this is an XType reference.
    #[must_use]
    pub fn is_xtype(&self) -> bool {
        self.kind == TypeKind::XTypeReference
    }

    /// Returns true if this is a template placeholder.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.kind == TypeKind::TemplatePlaceholder
    }

    /// Returns true if this expression or any nested argument is a placeholder.
    #[must_use]
    pub fn contains_template(&self) -> bool {
        self.is_template() || self.arguments.iter().any(Self::contains_template)
    }

    /// Returns the primitive type if this is a known primitive.
    #[must_use]
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self.kind {
            TypeKind::Primitive => PrimitiveType::from_name(&self.base_name),
            _ => None,
        }
    }

    /// Returns the container kind if this is a known composite.
    #[must_use]
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self.kind {
            TypeKind::Composite => ContainerKind::from_name(&self.base_name),
            _ => None,
        }
    }

    /// Returns the schemaless storage classification, if mapped.
    #[must_use]
    pub fn json_kind(&self) -> Option<JsonKind> {
        self.primitive_type()
            .map(PrimitiveType::json_kind)
            .or_else(|| self.container_kind().map(ContainerKind::json_kind))
    }

    /// Returns the referenced class name (with qualifiers stripped).
    #[must_use]
    pub fn xtype_name(&self) -> Option<&str> {
        self.is_xtype().then_some(self.base_name.as_str())
    }

    /// Collects every class name referenced anywhere in this expression.
    pub fn collect_xtype_names(&self, out: &mut BTreeSet<String>) {
        if let Some(name) = self.xtype_name() {
            out.insert(name.to_string());
        }
        for arg in &self.arguments {
            arg.collect_xtype_names(out);
        }
    }

    /// Collects the explicit candidates of every placeholder in this expression.
    pub fn collect_template_candidates(&self, out: &mut Vec<String>) {
        if self.is_template() {
            out.extend(self.template_candidates.iter().cloned());
        }
        for arg in &self.arguments {
            arg.collect_template_candidates(out);
        }
    }

    /// Substitutes `defaults` into every placeholder without explicit candidates.
    pub fn fill_template_defaults(&mut self, defaults: &[String]) {
        if self.is_template() && self.template_candidates.is_empty() {
            self.template_candidates = defaults.to_vec();
        }
        for arg in &mut self.arguments {
            arg.fill_template_defaults(defaults);
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Known primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean.
    Boolean,
    /// UTF-8 string.
    String,
    /// Platform integer.
    Integer,
    /// 64-bit integer.
    Integer64,
    /// Single precision float.
    Float,
    /// Double precision float.
    Float64,
    /// Schemaless JSON value.
    Json,
    /// Integer-backed enumeration.
    Enum,
}

impl PrimitiveType {
    /// Returns the schema name of this primitive.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Integer64 => "INTEGER64",
            Self::Float => "FLOAT",
            Self::Float64 => "FLOAT64",
            Self::Json => "JSON",
            Self::Enum => "ENUM",
        }
    }

    /// Parses a primitive type from its (uppercased) schema name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BOOLEAN" => Some(Self::Boolean),
            "STRING" => Some(Self::String),
            "INTEGER" => Some(Self::Integer),
            "INTEGER64" => Some(Self::Integer64),
            "FLOAT" => Some(Self::Float),
            "FLOAT64" => Some(Self::Float64),
            "JSON" => Some(Self::Json),
            "ENUM" => Some(Self::Enum),
            _ => None,
        }
    }

    /// Returns the schemaless storage classification.
    #[must_use]
    pub const fn json_kind(self) -> JsonKind {
        match self {
            Self::Boolean => JsonKind::Boolean,
            Self::String => JsonKind::String,
            Self::Integer | Self::Integer64 | Self::Enum => JsonKind::NumberInteger,
            Self::Float | Self::Float64 => JsonKind::NumberFloat,
            Self::Json => JsonKind::Object,
        }
    }
}

/// Known container type constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Ordered sequence.
    Vector,
    /// Ordered set.
    Set,
    /// Hash set.
    UnorderedSet,
    /// Ordered map.
    Map,
    /// Hash map.
    UnorderedMap,
    /// Pair of values.
    Pair,
}

impl ContainerKind {
    /// Parses a container kind from its (uppercased) schema name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VECTOR" => Some(Self::Vector),
            "SET" => Some(Self::Set),
            "UNORDERED_SET" => Some(Self::UnorderedSet),
            "MAP" => Some(Self::Map),
            "UNORDERED_MAP" => Some(Self::UnorderedMap),
            "PAIR" => Some(Self::Pair),
            _ => None,
        }
    }

    /// Returns the names of the template parameters, in argument order.
    #[must_use]
    pub const fn params(&self) -> &'static [&'static str] {
        match self {
            Self::Vector | Self::Set | Self::UnorderedSet => &["T"],
            Self::Map | Self::UnorderedMap => &["K", "V"],
            Self::Pair => &["A", "B"],
        }
    }

    /// Returns the schemaless storage classification.
    #[must_use]
    pub const fn json_kind(self) -> JsonKind {
        match self {
            Self::Map | Self::UnorderedMap => JsonKind::Object,
            Self::Vector | Self::Set | Self::UnorderedSet | Self::Pair => JsonKind::Array,
        }
    }
}

/// Returns true if `base` names a set-like container, whose elements must not
/// be XType references.
#[must_use]
pub fn is_set_like(base: &str) -> bool {
    base.starts_with("SET") || base == "UNORDERED_SET"
}

/// Classification used for schemaless storage interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    /// Boolean value.
    Boolean,
    /// String value.
    String,
    /// Signed integer.
    NumberInteger,
    /// Floating point number.
    NumberFloat,
    /// Object.
    Object,
    /// Array.
    Array,
}

impl JsonKind {
    /// Returns the `nlohmann::json` value type used by the C++ runtime.
    #[must_use]
    pub const fn cpp_value_type(&self) -> &'static str {
        match self {
            Self::Boolean => "nl::json::value_t::boolean",
            Self::String => "nl::json::value_t::string",
            Self::NumberInteger => "nl::json::value_t::number_integer",
            Self::NumberFloat => "nl::json::value_t::number_float",
            Self::Object => "nl::json::value_t::object",
            Self::Array => "nl::json::value_t::array",
        }
    }
}

/// Qualifies a class name with a namespace.
///
/// Names already containing `::` are kept, the root type maps to its own
/// namespace, and every other bare name is placed in `namespace`.
#[must_use]
pub fn qualify(name: &str, namespace: &str) -> String {
    if name.contains("::") {
        name.to_string()
    } else if name == ROOT_TYPE {
        format!("{ROOT_NAMESPACE}::{ROOT_TYPE}")
    } else {
        format!("{namespace}::{name}")
    }
}

/// Parses a type string into a [`TypeExpression`].
///
/// # Arguments
/// * `expr` - Type string as written in the schema
///
/// # Returns
/// The parsed type expression.
///
/// # Errors
/// Returns `TypeError::MalformedTypeExpression` on unbalanced parentheses or
/// unparsable composites, and `TypeError::InvalidContainerOfReference` when a
/// set-like container holds an XType reference.
pub fn parse_type(expr: &str) -> Result<TypeExpression, TypeError> {
    let source = expr.trim();
    if source.is_empty() {
        return Err(TypeError::malformed(expr, "empty type expression"));
    }
    check_balanced(source)?;

    if let Some(rest) = source.strip_prefix("TEMPLATE") {
        parse_template(source, rest)
    } else if source.starts_with("XTYPE(") {
        parse_xtype(source)
    } else if source.starts_with("FUNCTION(") {
        parse_function(source)
    } else if source.contains('(') {
        parse_composite(source)
    } else {
        Ok(TypeExpression::primitive(source))
    }
}

fn check_balanced(source: &str) -> Result<(), TypeError> {
    let mut depth = 0usize;
    for c in source.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeError::malformed(source, "unexpected ')'"))?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeError::malformed(source, "unbalanced parentheses"));
    }
    Ok(())
}

fn parse_template(source: &str, rest: &str) -> Result<TypeExpression, TypeError> {
    let mut expr = TypeExpression::new(TypeKind::TemplatePlaceholder, "TEMPLATE".to_string(), source);
    let mut rest = rest;

    if let Some(after) = rest.strip_prefix(':') {
        let digits = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let index = after[..digits]
            .parse()
            .map_err(|_| TypeError::malformed(source, "expected a template index after ':'"))?;
        expr.template_index = Some(index);
        rest = &after[digits..];
    }

    if !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(|| TypeError::malformed(source, "expected '[...]' after TEMPLATE"))?;
        expr.template_candidates = inner
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }

    Ok(expr)
}

fn parse_xtype(source: &str) -> Result<TypeExpression, TypeError> {
    let inner = source
        .strip_prefix("XTYPE(")
        .and_then(|r| r.strip_suffix(')'))
        .map(str::trim)
        .ok_or_else(|| TypeError::malformed(source, "trailing characters after XTYPE(...)"))?;
    if inner.is_empty() || inner.contains(['(', ')']) {
        return Err(TypeError::malformed(source, "expected a class name inside XTYPE(...)"));
    }

    let (namespace, mut name) = match inner.rfind("::") {
        Some(pos) => inner.split_at(pos + 2),
        None => ("", inner),
    };

    let mut qualifiers = BTreeSet::new();
    if let Some(rest) = name.strip_prefix("Const") {
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            qualifiers.insert(Qualifier::Const);
            name = rest;
        }
    }
    if let Some(rest) = name.strip_suffix("CPtr").filter(|r| !r.is_empty()) {
        qualifiers.insert(Qualifier::ConstPointer);
        name = rest;
    } else if let Some(rest) = name.strip_suffix("Ptr").filter(|r| !r.is_empty()) {
        qualifiers.insert(Qualifier::Pointer);
        name = rest;
    }

    let mut expr = TypeExpression::new(TypeKind::XTypeReference, format!("{namespace}{name}"), source);
    expr.qualifiers = qualifiers;
    Ok(expr)
}

fn parse_function(source: &str) -> Result<TypeExpression, TypeError> {
    let open = "FUNCTION(".len();
    let close = source
        .rfind(')')
        .filter(|&pos| pos + 1 == source.len())
        .ok_or_else(|| TypeError::malformed(source, "trailing characters after FUNCTION(...)"))?;
    let signature = source[open..close].trim();

    let mut expr = TypeExpression::new(TypeKind::Function, "FUNCTION".to_string(), source);
    expr.arguments
        .push(TypeExpression::new(TypeKind::Primitive, signature.to_string(), signature));
    Ok(expr)
}

fn parse_composite(source: &str) -> Result<TypeExpression, TypeError> {
    let open = source
        .find('(')
        .ok_or_else(|| TypeError::malformed(source, "expected '('"))?;
    let inner = source[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| TypeError::malformed(source, "trailing characters after ')'"))?;
    let base = source[..open].trim();
    if base.is_empty() {
        return Err(TypeError::malformed(source, "missing type constructor before '('"));
    }

    let base_name = base.to_ascii_uppercase();
    let mut arguments = Vec::new();
    for raw in split_top_level(source, inner)? {
        if raw.trim().is_empty() {
            return Err(TypeError::malformed(source, "empty type argument"));
        }
        arguments.push(parse_type(raw)?);
    }

    if is_set_like(&base_name) && arguments.iter().any(TypeExpression::is_xtype) {
        return Err(TypeError::InvalidContainerOfReference {
            container: base_name,
            expr: source.to_string(),
        });
    }

    let mut expr = TypeExpression::new(TypeKind::Composite, base_name, source);
    expr.arguments = arguments;
    Ok(expr)
}

/// Splits composite arguments on `,` or `;` at nesting depth 0.
///
/// Both `()` and `[]` open a nesting level, so template candidate lists are
/// never split.
fn split_top_level<'a>(source: &str, inner: &'a str) -> Result<Vec<&'a str>, TypeError> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeError::malformed(source, "unparsable composite arguments"))?;
            }
            ',' | ';' if depth == 0 => {
                args.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(&inner[start..]);

    Ok(args)
}
