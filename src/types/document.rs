use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ComposerError;

use super::statement::Statement;

/// Policy language version written into every compiled document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The compiled output: a versioned list of statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    #[serde(rename = "Statement")]
    pub statements: Vec<Statement>,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statements: Vec::new(),
        }
    }

    pub fn with_statements(statements: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statements,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, ComposerError> {
        serde_json::to_string_pretty(self).map_err(|e| ComposerError::InvalidFormat(e.to_string()))
    }
}
