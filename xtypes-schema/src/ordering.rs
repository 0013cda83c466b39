//! Dependency ordering of a batch of classes.

use crate::error::SchemaError;
use crate::ir::ClassIr;
use crate::types::{ROOT_NAMESPACE, ROOT_TYPE};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Emission order of a batch and the namespaces it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOrder {
    /// Class names, parents before children.
    pub classes: Vec<String>,
    /// Namespace prefixes of every referenced qualified class name.
    pub namespace_dependencies: BTreeSet<String>,
}

impl DependencyOrder {
    /// Returns the namespace dependencies joined with `;`.
    #[must_use]
    pub fn dependency_line(&self) -> String {
        self.namespace_dependencies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Orders a batch so that every parent precedes its children.
///
/// The root type comes first if present, then every class without a parent in
/// alphabetical order, then the remaining classes in stable alphabetical passes
/// as soon as their parent is placed. The root type is always considered
/// placed, so classes may inherit from it without it being in the batch.
///
/// # Arguments
/// * `classes` - Resolved classes of one run
///
/// # Returns
/// The emission order and the namespace dependencies.
///
/// # Errors
/// Returns `SchemaError::UnresolvedParent` if a parent is not in the batch, and
/// `SchemaError::InheritanceCycle` if parents exist but can never be placed.
pub fn order(classes: &[ClassIr]) -> Result<DependencyOrder, SchemaError> {
    let mut parents: BTreeMap<&str, &str> = BTreeMap::new();
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for class in classes {
        names.insert(class.name.as_str());
        if let Some(parent) = class.local_parent() {
            parents.insert(class.name.as_str(), parent);
        }
    }

    let mut ordered: Vec<String> = Vec::with_capacity(names.len());
    let mut placed: HashSet<&str> = HashSet::new();
    if names.contains(ROOT_TYPE) {
        ordered.push(ROOT_TYPE.to_string());
        placed.insert(ROOT_TYPE);
    }
    for name in &names {
        if *name != ROOT_TYPE && !parents.contains_key(name) {
            ordered.push((*name).to_string());
            placed.insert(*name);
        }
    }

    let mut remaining: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !placed.contains(name))
        .collect();

    // Each pass places at least one class or the loop stops.
    for _ in 0..=remaining.len() {
        if remaining.is_empty() {
            break;
        }
        let mut pending = Vec::with_capacity(remaining.len());
        for name in remaining.iter().copied() {
            let parent = parents.get(name).copied().unwrap_or(ROOT_TYPE);
            if is_root(parent) || placed.contains(parent) {
                ordered.push(name.to_string());
                placed.insert(name);
            } else {
                pending.push(name);
            }
        }
        if pending.len() == remaining.len() {
            break;
        }
        remaining = pending;
    }

    // A missing ancestor blocks its whole subtree; report it before any cycle.
    let stuck: Vec<(&str, &str)> = remaining
        .iter()
        .map(|name| (*name, parents.get(name).copied().unwrap_or(ROOT_TYPE)))
        .collect();
    if let Some((class, parent)) = stuck
        .iter()
        .find(|(_, parent)| !names.contains(parent) && !is_root(parent))
    {
        return Err(SchemaError::UnresolvedParent {
            class: class.to_string(),
            parent: parent.to_string(),
        });
    }
    if let Some((class, parent)) = stuck.first() {
        return Err(SchemaError::InheritanceCycle {
            class: class.to_string(),
            parent: parent.to_string(),
        });
    }

    let namespace_dependencies = classes
        .iter()
        .flat_map(|c| &c.referenced_classes)
        .filter_map(|name| name.split_once("::").map(|(ns, _)| ns.to_string()))
        .collect();

    tracing::debug!(classes = ordered.len(), "dependency order computed");
    Ok(DependencyOrder {
        classes: ordered,
        namespace_dependencies,
    })
}

fn is_root(name: &str) -> bool {
    name == ROOT_TYPE
        || name
            .strip_prefix(ROOT_NAMESPACE)
            .and_then(|rest| rest.strip_prefix("::"))
            == Some(ROOT_TYPE)
}
