//! Statements as they appear in a compiled policy document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

/// A value that serializes as a bare item when there is one, and as an array otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T: PartialEq> OneOrMany<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|item| item == value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(mut items: Vec<T>) -> Self {
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return OneOrMany::One(item);
            }
        }
        OneOrMany::Many(items)
    }
}

impl OneOrMany<String> {
    /// Borrowing `contains` for string lists.
    pub fn contains_str(&self, value: &str) -> bool {
        self.iter().any(|item| item == value)
    }
}

/// One rule in a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    #[schema(value_type = Vec<String>)]
    pub action: OneOrMany<String>,
    #[schema(value_type = Vec<String>)]
    pub resource: OneOrMany<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub condition: Option<BTreeMap<String, Value>>,
}

impl Statement {
    pub fn new(effect: Effect, actions: Vec<String>, resources: Vec<String>) -> Self {
        Self {
            effect,
            action: actions.into(),
            resource: resources.into(),
            condition: None,
        }
    }

    pub fn allow(actions: Vec<String>, resources: Vec<String>) -> Self {
        Self::new(Effect::Allow, actions, resources)
    }

    pub fn deny(actions: Vec<String>, resources: Vec<String>) -> Self {
        Self::new(Effect::Deny, actions, resources)
    }

    /// Attach a condition block, e.g. `{"StringEquals": {"aws:RequestedRegion": "eu-west-1"}}`.
    pub fn with_condition(mut self, operator: impl Into<String>, body: Value) -> Self {
        self.condition
            .get_or_insert_with(BTreeMap::new)
            .insert(operator.into(), body);
        self
    }
}
