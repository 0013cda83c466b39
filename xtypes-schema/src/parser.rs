//! Schema document loader.
//!
//! This module reads YAML class schemas into [`SchemaDocument`]s. Semantic
//! checks happen later, in the resolver.

use crate::document::SchemaDocument;
use crate::error::ParseError;
use serde_yaml::Value;
use std::path::Path;

/// Parses a schema document from a YAML string.
///
/// # Arguments
/// * `yaml` - YAML document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the YAML is malformed, the document is not a
/// mapping, or the class name is missing or empty.
pub fn parse_document(yaml: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_yaml::from_str(yaml)?;
    let Value::Mapping(root) = &value else {
        return Err(ParseError::InvalidValue {
            key: "<document>".to_string(),
            value: "expected a mapping at the top level".to_string(),
        });
    };

    match root.get("name") {
        None | Some(Value::Null) => {
            return Err(ParseError::missing_key("name", "schema document"));
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            return Err(ParseError::InvalidValue {
                key: "name".to_string(),
                value: name.clone(),
            });
        }
        Some(_) => {}
    }

    Ok(serde_yaml::from_value(value)?)
}

/// Loads a schema document from a file.
///
/// # Arguments
/// * `path` - Path to the YAML file
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, otherwise the errors
/// of [`parse_document`].
pub fn load_document(path: &Path) -> Result<SchemaDocument, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse_document("name: Widget\n").expect("Failed to parse");
        assert_eq!(doc.name, "Widget");
        assert!(doc.inherit.is_none());
        assert!(doc.properties.is_none());
    }

    #[test]
    fn test_parse_keeps_method_order() {
        let yaml = r"
name: Widget
methods:
  zeta:
    description: last alphabetically
  alpha:
    description: first alphabetically
";
        let doc = parse_document(yaml).expect("Failed to parse");
        let methods = doc.methods.expect("methods");
        let names: Vec<_> = methods.keys().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_empty_sections() {
        let yaml = "name: Widget\nproperties:\nrelations:\n";
        let doc = parse_document(yaml).expect("Failed to parse");
        assert!(doc.properties.is_none());
        assert!(doc.relations.is_none());
    }

    #[test]
    fn test_missing_name() {
        let err = parse_document("inherit: Base\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingKey { .. }));
    }

    #[test]
    fn test_empty_name() {
        let err = parse_document("name: ''\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }

    #[test]
    fn test_not_a_mapping() {
        let err = parse_document("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_document("name: [unclosed\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("Widget.yml");
        std::fs::write(&path, "name: Widget\ninherit: Base\n").expect("Failed to write");
        let doc = load_document(&path).expect("Failed to load");
        assert_eq!(doc.inherit.as_deref(), Some("Base"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/nonexistent/Widget.yml")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
