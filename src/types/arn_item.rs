use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A known ARN offered in suggestion and selection lists.
///
/// Two items are the same item when their `arn` strings are equal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArnItem {
    pub arn: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ArnItem {
    pub fn new(arn: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            service: service.into(),
            resource_type: None,
            display_name: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}
