//! Batch validation utilities.
//!
//! Per-class checks happen during resolution. This module checks the
//! properties that only hold for a batch of classes as a whole.

use crate::error::SchemaError;
use crate::ir::ClassIr;
use std::collections::HashSet;

/// Validates a batch of resolved classes.
///
/// # Arguments
/// * `classes` - Resolved classes of one run
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError::DuplicateClass` if two documents declare the same
/// class and `SchemaError::InheritanceCycle` if a class inherits from itself.
pub fn validate_batch(classes: &[ClassIr]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for class in classes {
        if !seen.insert(class.name.as_str()) {
            return Err(SchemaError::DuplicateClass {
                name: class.name.clone(),
            });
        }
        if class.local_parent() == Some(class.name.as_str()) {
            return Err(SchemaError::InheritanceCycle {
                class: class.name.clone(),
                parent: class.name.clone(),
            });
        }
    }
    Ok(())
}
