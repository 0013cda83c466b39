//! Rendering of schema default values as target-language literals.

use crate::error::ResolveError;
use crate::language::Language;
use crate::types::{PrimitiveType, TypeExpression};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Formats a default value for a property or argument of type `ty`.
///
/// Booleans use the language's literal spelling, numbers keep their textual
/// form, values of a `STRING` type are quoted and other strings are emitted
/// verbatim as target expressions. An empty mapping (or the literal `{}`)
/// given as a JSON function argument becomes the explicit empty-object
/// constructor. Other sequences and mappings become JSON aggregates.
///
/// # Arguments
/// * `value` - Value as found in the schema
/// * `ty` - Declared type of the property or argument
/// * `language` - Target language
/// * `is_function_argument` - Whether the value defaults a method argument
///
/// # Errors
/// Returns `ResolveError::UnsupportedDefaultLiteral` for tagged values and
/// aggregates that cannot be expressed as JSON.
pub fn format_default(
    value: &Value,
    ty: &TypeExpression,
    language: Language,
    is_function_argument: bool,
) -> Result<String, ResolveError> {
    let is_json = ty.primitive_type() == Some(PrimitiveType::Json);
    if is_function_argument && is_json && is_empty_object(value) {
        return Ok(language.empty_object().to_string());
    }

    match value {
        Value::String(s) if ty.primitive_type() == Some(PrimitiveType::String) => {
            Ok(language.string_literal(s))
        }
        Value::String(s) => Ok(s.clone()),
        other => format_untyped(other, language),
    }
}

/// Formats each allowed value and returns the deduplicated, sorted set.
///
/// # Errors
/// Returns the first formatting error.
pub fn format_allowed_set(
    values: &[Value],
    ty: &TypeExpression,
    language: Language,
) -> Result<BTreeSet<String>, ResolveError> {
    values
        .iter()
        .map(|v| format_default(v, ty, language, false))
        .collect()
}

/// Formats a value whose type is not declared.
///
/// Strings are always quoted.
///
/// # Errors
/// Returns `ResolveError::UnsupportedDefaultLiteral` for tagged values and
/// aggregates that cannot be expressed as JSON.
pub fn format_untyped(value: &Value, language: Language) -> Result<String, ResolveError> {
    match value {
        Value::Null => Ok(language.null_literal().to_string()),
        Value::Bool(b) => Ok(language.bool_literal(*b).to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(language.string_literal(s)),
        Value::Sequence(_) | Value::Mapping(_) => {
            let json = serde_json::to_value(value).map_err(|_| unsupported(value))?;
            Ok(language.json_literal(&json))
        }
        Value::Tagged(_) => Err(unsupported(value)),
    }
}

/// Formats a mapping of extra key/value pairs as a literal map, keys sorted.
///
/// # Errors
/// Returns an error for non-string keys or unformattable values.
pub fn format_property_map(
    properties: &Mapping,
    language: Language,
) -> Result<BTreeMap<String, String>, ResolveError> {
    let mut formatted = BTreeMap::new();
    for (key, value) in properties {
        let key = key
            .as_str()
            .ok_or_else(|| ResolveError::invalid("relation property keys must be strings"))?;
        formatted.insert(key.to_string(), format_untyped(value, language)?);
    }
    Ok(formatted)
}

fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Mapping(m) => m.is_empty(),
        Value::String(s) => s.trim() == "{}",
        _ => false,
    }
}

fn unsupported(value: &Value) -> ResolveError {
    let rendered = serde_yaml::to_string(value).unwrap_or_else(|_| format!("{value:?}"));
    ResolveError::UnsupportedDefaultLiteral {
        value: rendered.trim_end().to_string(),
    }
}
