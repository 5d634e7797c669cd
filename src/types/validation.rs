use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of checking a user-entered ARN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            suggestions: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            suggestions: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (&self.valid, &self.message) {
            (true, _) => write!(f, "valid"),
            (false, Some(message)) => write!(f, "invalid: {message}"),
            (false, None) => write!(f, "invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_display() {
        assert_eq!(ValidationResult::ok().to_string(), "valid");
        assert_eq!(
            ValidationResult::invalid("ARN is required").to_string(),
            "invalid: ARN is required"
        );
    }

    #[test]
    fn test_ok_serializes_without_message() {
        assert_eq!(
            serde_json::to_value(ValidationResult::ok()).unwrap(),
            serde_json::json!({"valid": true})
        );
    }
}
