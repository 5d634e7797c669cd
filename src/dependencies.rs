//! Action dependency tables and closure resolution.
//!
//! A table maps an action id to what granting it really takes:
//!
//! - `actions`: what the entry expands to (defaults to the id itself)
//! - `dependencies`: ids queued for their own expansion
//! - `requires`: older form of `dependencies`; its ids are also added to the
//!   result as-is, bypassing their own `actions` substitution
//! - `soft_requires`, `description`: hints for the UI, never resolved

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::traits::DependencyResolver;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DependencyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub soft_requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Dependency entries for one service, keyed by action id.
pub type DependencyTable = HashMap<String, DependencyEntry>;

/// Dependency tables for every known service, keyed by service prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyTables {
    tables: HashMap<String, DependencyTable>,
}

impl DependencyTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, service: impl Into<String>, table: DependencyTable) {
        self.tables.insert(service.into(), table);
    }

    pub fn table(&self, service: &str) -> Option<&DependencyTable> {
        self.tables.get(service)
    }

    pub fn entry(&self, service: &str, action: &str) -> Option<&DependencyEntry> {
        self.table(service).and_then(|t| t.get(action))
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Soft dependencies of `action`; suggested alongside it but never added.
    pub fn soft_dependencies(&self, service: &str, action: &str) -> Vec<String> {
        self.entry(service, action)
            .map(|e| e.soft_requires.clone())
            .unwrap_or_default()
    }

    pub fn description(&self, service: &str, action: &str) -> Option<String> {
        self.entry(service, action).and_then(|e| e.description.clone())
    }
}

impl From<HashMap<String, DependencyTable>> for DependencyTables {
    fn from(tables: HashMap<String, DependencyTable>) -> Self {
        Self { tables }
    }
}

/// Resolve `requested` into its dependency closure under `table`.
///
/// Without a table this only removes duplicates. Cycles terminate because an
/// id is expanded at most once. Results come back in first-discovery order.
pub fn resolve_dependencies(requested: &[String], table: Option<&DependencyTable>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut in_result: HashSet<String> = HashSet::new();
    let mut add = |id: &str, result: &mut Vec<String>| {
        if in_result.insert(id.to_string()) {
            result.push(id.to_string());
        }
    };

    let Some(table) = table else {
        for id in requested {
            add(id, &mut result);
        }
        return result;
    };

    let mut processed: HashSet<String> = HashSet::new();
    let mut stack: Vec<String> = requested.iter().rev().cloned().collect();

    while let Some(id) = stack.pop() {
        if !processed.insert(id.clone()) {
            continue;
        }

        let entry = table.get(&id);
        match entry.and_then(|e| e.actions.as_ref()) {
            Some(actions) => {
                for action in actions {
                    add(action, &mut result);
                }
            }
            None => add(&id, &mut result),
        }

        let Some(entry) = entry else {
            continue;
        };

        for dep in entry.dependencies.iter().rev() {
            if !processed.contains(dep) {
                stack.push(dep.clone());
            }
        }

        for req in entry.requires.iter().rev() {
            add(req, &mut result);
            if !processed.contains(req) {
                stack.push(req.clone());
            }
        }
    }

    debug!(
        event = "Resolve",
        requested = requested.len(),
        resolved = result.len()
    );

    result
}

/// The default resolver: looks up the service's table and resolves against it.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    tables: DependencyTables,
}

impl TableResolver {
    pub fn new(tables: DependencyTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &DependencyTables {
        &self.tables
    }
}

impl DependencyResolver for TableResolver {
    fn resolve(&self, service: &str, actions: &[String]) -> Vec<String> {
        resolve_dependencies(actions, self.tables.table(service))
    }
}
