use std::time::Instant;

use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::arn;
use crate::dependencies::{DependencyTables, TableResolver};
use crate::loader;
use crate::metrics::{self, CompileStats};
use crate::timers::{CompilePhase, PhaseTimings};
use crate::traits::DependencyResolver;
use crate::types::{ArnItem, PolicyDocument, Resource, Selection, Statement, ValidationResult};

/// ARN shape accepted by [`PolicyEngine::validate_arn`]: the `aws` partition
/// followed by service, region, account and a non-empty resource.
static STRICT_ARN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:aws:([a-z0-9-]+):([a-z0-9*-]*):([0-9*]*):(.+)$")
        .expect("static strict ARN regex")
});

/// A read-only copy of the engine's state, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub resources: Vec<Resource>,
    pub selections: Vec<Selection>,
    pub arn_catalog: Vec<ArnItem>,
}

/// Tracks which resources are selected, with which actions and ARN, and
/// compiles that into a [`PolicyDocument`].
///
/// The engine is a plain single-owner value: every method runs to completion
/// and nothing is shared. Hosts that need concurrent access wrap it in their
/// own lock. Methods given an unknown resource id do nothing.
pub struct PolicyEngine {
    resources: IndexMap<String, Resource>,
    selections: IndexMap<String, Selection>,
    arn_catalog: Vec<ArnItem>,
    tables: TableResolver,
    resolver: Option<Box<dyn DependencyResolver>>,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyEngine {
    /// An empty engine resolving dependencies with the built-in tables.
    pub fn new() -> Self {
        Self::with_tables(loader::default_dependency_tables())
    }

    /// An empty engine resolving dependencies with `tables`.
    pub fn with_tables(tables: DependencyTables) -> Self {
        PolicyEngine {
            resources: IndexMap::new(),
            selections: IndexMap::new(),
            arn_catalog: Vec::new(),
            tables: TableResolver::new(tables),
            resolver: None,
        }
    }

    /// Add or replace a catalog entry. An existing selection is kept.
    pub fn add_resource(&mut self, resource: Resource) {
        let id = resource.id.clone();
        debug!(event = "Resource", phase = "Add", resource = id.as_str());
        self.selections
            .entry(id.clone())
            .or_insert_with(|| Selection::new(id.clone()));
        self.resources.insert(id, resource);
    }

    /// Remove a resource together with its selection.
    pub fn remove_resource(&mut self, resource_id: &str) {
        if self.resources.shift_remove(resource_id).is_some() {
            debug!(event = "Resource", phase = "Remove", resource = resource_id);
        }
        self.selections.shift_remove(resource_id);
    }

    /// Replace the selected actions. Dependencies are resolved at compile time.
    pub fn set_actions<I, S>(&mut self, resource_id: &str, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(selection) = self.selections.get_mut(resource_id) else {
            return;
        };
        selection.set_actions(actions);
        debug!(
            event = "Selection",
            phase = "Actions",
            resource = resource_id,
            actions = selection.actions.len()
        );
    }

    /// Store `arn` as entered. See [`PolicyEngine::validate_arn`] for checking it.
    pub fn set_arn(&mut self, resource_id: &str, arn: impl Into<String>) {
        let Some(selection) = self.selections.get_mut(resource_id) else {
            return;
        };
        let arn = arn.into();
        debug!(event = "Selection", phase = "Arn", resource = resource_id, arn = arn.as_str());
        selection.arn = Some(arn);
    }

    pub fn clear_arn(&mut self, resource_id: &str) {
        if let Some(selection) = self.selections.get_mut(resource_id) {
            selection.arn = None;
        }
    }

    pub fn set_arn_catalog(&mut self, items: Vec<ArnItem>) {
        self.arn_catalog = items;
    }

    /// Catalog ARNs for `service`, optionally narrowed to one resource type.
    pub fn filtered_arns(&self, service: &str, resource_type: Option<&str>) -> Vec<ArnItem> {
        arn::filter_by_service(&self.arn_catalog, service)
            .into_iter()
            .filter(|item| match resource_type {
                Some(rt) => item.resource_type.as_deref() == Some(rt),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Use `resolver` instead of the dependency tables from now on.
    pub fn set_dependency_resolver<R>(&mut self, resolver: R)
    where
        R: DependencyResolver + 'static,
    {
        self.resolver = Some(Box::new(resolver));
    }

    /// Go back to resolving with the dependency tables.
    pub fn clear_dependency_resolver(&mut self) {
        self.resolver = None;
    }

    /// Replace the tables used when no custom resolver is set.
    pub fn set_dependency_tables(&mut self, tables: DependencyTables) {
        self.tables = TableResolver::new(tables);
    }

    pub fn dependency_tables(&self) -> &DependencyTables {
        self.tables.tables()
    }

    /// Actions suggested alongside `operation`; never added automatically.
    pub fn soft_dependencies(&self, service: &str, operation: &str) -> Vec<String> {
        self.tables.tables().soft_dependencies(service, operation)
    }

    pub fn describe_operation(&self, service: &str, operation: &str) -> Option<String> {
        self.tables.tables().description(service, operation)
    }

    fn resolver(&self) -> &dyn DependencyResolver {
        match self.resolver.as_deref() {
            Some(resolver) => resolver,
            None => &self.tables,
        }
    }

    /// The sorted dependency closure of one selection, as `compile` would see it.
    pub fn resolved_actions(&self, resource_id: &str) -> Option<Vec<String>> {
        let resource = self.resources.get(resource_id)?;
        let selection = self.selections.get(resource_id)?;
        Some(self.resolve_sorted(resource, selection))
    }

    fn resolve_sorted(&self, resource: &Resource, selection: &Selection) -> Vec<String> {
        self.resolver()
            .resolve(&resource.service, &selection.actions)
            .into_iter()
            .sorted()
            .dedup()
            .collect()
    }

    /// Check a user-entered ARN for `service`.
    ///
    /// Stricter than [`arn::validate_format`]: the partition must be `aws` and
    /// the service field must equal `service`.
    pub fn validate_arn(&self, service: &str, arn: &str) -> ValidationResult {
        if arn.is_empty() {
            return ValidationResult::invalid("ARN is required");
        }

        let Some(captures) = STRICT_ARN.captures(arn) else {
            return ValidationResult::invalid(format!(
                "Invalid ARN format. Expected arn:aws:{service}:<region>:<account>:<resource>"
            ))
            .with_suggestions(arn::suggest(service, None, None));
        };

        let found = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        if found != service {
            return ValidationResult::invalid(format!(
                "ARN service mismatch: expected '{service}', found '{found}'"
            ))
            .with_suggestions(arn::suggest(service, None, None));
        }

        ValidationResult::ok()
    }

    /// Validate every selection that has an ARN, in insertion order.
    ///
    /// On top of [`PolicyEngine::validate_arn`], an ARN must match the
    /// resource's `address_pattern` when one is declared.
    pub fn validate_selections(&self) -> Vec<(String, ValidationResult)> {
        self.selections
            .values()
            .filter_map(|selection| {
                let arn = selection.arn.as_deref().filter(|a| !a.is_empty())?;
                let resource = self.resources.get(&selection.resource_id)?;
                let mut result = self.validate_arn(&resource.service, arn);
                if result.valid && !resource.accepts_arn(arn) {
                    let pattern = resource.address_pattern.as_deref().unwrap_or_default();
                    result = ValidationResult::invalid(format!(
                        "ARN does not match the expected pattern {pattern}"
                    ));
                }
                Some((selection.resource_id.clone(), result))
            })
            .collect()
    }

    /// Compile the current selections into a policy document.
    ///
    /// Each selection with actions is resolved to its dependency closure and
    /// bound to its ARN (`*` when unset). Selections with the same ARN and
    /// the same resolved actions share a statement; afterwards all statements
    /// with the same ARN are merged, so the output has one statement per
    /// distinct ARN, in the order the ARNs were first seen.
    pub fn compile(&self) -> PolicyDocument {
        let started = Instant::now();
        let mut timings = PhaseTimings::default();

        // (arn, resolved actions, qualified actions) per live selection
        let mut resolved: Vec<(String, Vec<String>, Vec<String>)> = Vec::new();
        {
            let _timer = timings.start(CompilePhase::Resolve);
            for selection in self.selections.values() {
                if selection.actions.is_empty() {
                    continue;
                }
                let Some(resource) = self.resources.get(&selection.resource_id) else {
                    warn!(
                        event = "Compile",
                        phase = "Resolve",
                        resource = selection.resource_id.as_str(),
                        "selection without catalog entry skipped"
                    );
                    continue;
                };
                let actions = self.resolve_sorted(resource, selection);
                if actions.is_empty() {
                    warn!(
                        event = "Compile",
                        phase = "Resolve",
                        resource = selection.resource_id.as_str(),
                        "selection resolved to no actions, skipped"
                    );
                    continue;
                }
                let qualified = actions
                    .iter()
                    .map(|action| qualify_action(&resource.service, action))
                    .collect();
                resolved.push((selection.effective_arn().to_string(), actions, qualified));
            }
        }
        debug!(
            event = "Compile",
            phase = "Resolve",
            selections = resolved.len(),
            elapsed_ms = timings.millis(CompilePhase::Resolve)
        );

        let mut grouped: IndexMap<(String, Vec<String>), Vec<String>> = IndexMap::new();
        {
            let _timer = timings.start(CompilePhase::Group);
            for (arn, actions, qualified) in &resolved {
                let group = grouped.entry((arn.clone(), actions.clone())).or_default();
                union_into(group, qualified);
            }
        }
        debug!(
            event = "Compile",
            phase = "Group",
            groups = grouped.len(),
            elapsed_ms = timings.millis(CompilePhase::Group)
        );

        let mut merged: IndexMap<String, Vec<String>> = IndexMap::new();
        {
            let _timer = timings.start(CompilePhase::Merge);
            for ((arn, _), actions) in grouped {
                union_into(merged.entry(arn).or_default(), &actions);
            }
        }
        debug!(
            event = "Compile",
            phase = "Merge",
            statements = merged.len(),
            elapsed_ms = timings.millis(CompilePhase::Merge)
        );

        let statements: Vec<Statement> = merged
            .into_iter()
            .map(|(arn, actions)| Statement::allow(actions.into_iter().sorted().collect(), vec![arn]))
            .collect();
        let document = PolicyDocument::with_statements(statements);

        let duration = started.elapsed();
        let stats = CompileStats {
            duration,
            selections: resolved.len(),
            statements: document.len(),
            actions: document.statements.iter().map(|s| s.action.len()).sum(),
        };
        debug!(
            event = "Compile",
            phase = "Result",
            statements = stats.statements,
            actions = stats.actions
        );
        metrics::record_compile(stats, timings.to_phases(duration));

        document
    }

    /// Forget all resources, selections and catalog ARNs. The resolver is kept.
    pub fn reset(&mut self) {
        self.resources.clear();
        self.selections.clear();
        self.arn_catalog.clear();
        debug!(event = "Engine", phase = "Reset");
    }

    pub fn resource(&self, resource_id: &str) -> Option<Resource> {
        self.resources.get(resource_id).cloned()
    }

    pub fn selection(&self, resource_id: &str) -> Option<Selection> {
        self.selections.get(resource_id).cloned()
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            resources: self.resources.values().cloned().collect(),
            selections: self.selections.values().cloned().collect(),
            arn_catalog: self.arn_catalog.clone(),
        }
    }
}

/// Prefix a bare action name with its service, e.g. `GetObject` -> `s3:GetObject`.
fn qualify_action(service: &str, action: &str) -> String {
    if action.contains(':') {
        action.to_string()
    } else {
        format!("{service}:{action}")
    }
}

fn union_into(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests;
