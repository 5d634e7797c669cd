//! Catalog entries: selectable resources and the operations they offer.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::pattern::ArnPattern;

/// How much an operation lets its holder do.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationCategory {
    Read,
    Write,
    Admin,
}

/// A permission that can be granted on a resource, e.g. `s3:GetObject`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: OperationCategory,
    /// Local hint only; compile-time expansion goes through the dependency resolver.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub requires_identifier: bool,
}

impl Operation {
    pub fn new(id: impl Into<String>, category: OperationCategory) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            category,
            dependencies: Vec::new(),
            requires_identifier: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn requiring_identifier(mut self) -> Self {
        self.requires_identifier = true;
        self
    }
}

/// A selectable target in the catalog, e.g. "S3 bucket".
///
/// The engine keeps a copy of each entry but never modifies it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Service prefix, e.g. `s3`. Used to qualify bare action ids and to pick a dependency table.
    pub service: String,
    #[serde(default)]
    pub actions: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Glob that ARNs for this resource are expected to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_pattern: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, service: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            service: service.into(),
            actions: Vec::new(),
            icon: None,
            description: None,
            address_pattern: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_action(mut self, operation: Operation) -> Self {
        self.actions.push(operation);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_address_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.address_pattern = Some(pattern.into());
        self
    }

    /// Look up one of this resource's operations by id.
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.actions.iter().find(|op| op.id == id)
    }

    /// Whether `arn` fits this resource's address pattern.
    ///
    /// Resources without a pattern accept any ARN. A pattern that fails to
    /// compile accepts nothing.
    pub fn accepts_arn(&self, arn: &str) -> bool {
        match &self.address_pattern {
            None => true,
            Some(pattern) => ArnPattern::new(pattern.as_str())
                .map(|p| p.is_match(arn))
                .unwrap_or(false),
        }
    }
}
