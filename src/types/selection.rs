use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What the user has chosen for one resource: a set of actions and an ARN.
///
/// The ARN is stored exactly as entered. Validation is a separate step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub resource_id: String,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl Selection {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            actions: Vec::new(),
            arn: None,
        }
    }

    /// Replace the action set, dropping duplicates but keeping first-seen order.
    pub fn set_actions<I, S>(&mut self, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.clear();
        for action in actions {
            let action = action.into();
            if !self.actions.contains(&action) {
                self.actions.push(action);
            }
        }
    }

    /// The ARN to emit for this selection; unset or empty means every resource.
    pub fn effective_arn(&self) -> &str {
        match self.arn.as_deref() {
            Some(arn) if !arn.is_empty() => arn,
            _ => "*",
        }
    }
}
