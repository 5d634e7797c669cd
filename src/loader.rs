use once_cell::sync::Lazy;
use tracing::{error, info};

use crate::dependencies::DependencyTables;
use crate::error::ComposerError;

const DEFAULT_TABLES_JSON: &str = include_str!("../data/default_dependencies.json");

static DEFAULT_TABLES: Lazy<DependencyTables> =
    Lazy::new(|| match load_dependency_tables(DEFAULT_TABLES_JSON) {
        Ok(tables) => tables,
        Err(e) => {
            error!(event = "Load", phase = "Defaults", error = %e);
            DependencyTables::default()
        }
    });

/// Parse dependency tables from JSON text.
///
/// Any serde errors are mapped into `ComposerError::TableParse`.
///
/// Example:
/// ```rust
/// use policy_composer_core::load_dependency_tables;
/// let text = r#"{ "s3": { "s3:GetObject": { "dependencies": ["s3:ListBucket"] } } }"#;
/// let tables = load_dependency_tables(text).unwrap();
/// assert!(tables.table("s3").is_some());
/// ```
pub fn load_dependency_tables(text: &str) -> Result<DependencyTables, ComposerError> {
    let tables: DependencyTables = serde_json::from_str(text)?;
    info!(event = "Load", phase = "Tables", services = tables.len());
    Ok(tables)
}

/// The tables shipped with the crate, parsed once.
pub fn default_dependency_tables() -> DependencyTables {
    DEFAULT_TABLES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::resolve_dependencies;

    #[test]
    fn test_embedded_defaults_parse() {
        let tables = load_dependency_tables(DEFAULT_TABLES_JSON).unwrap();
        assert_eq!(tables, default_dependency_tables());
        for service in ["s3", "ec2", "lambda", "dynamodb", "iam"] {
            assert!(tables.table(service).is_some(), "missing {service}");
        }
    }

    #[test]
    fn test_default_s3_get_object_pulls_list_bucket() {
        let tables = default_dependency_tables();
        let resolved = resolve_dependencies(&["s3:GetObject".to_string()], tables.table("s3"));
        assert!(resolved.contains(&"s3:ListBucket".to_string()));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = load_dependency_tables(r#"{ "s3": [1, 2] }"#).unwrap_err();
        assert!(matches!(err, ComposerError::TableParse(_)));
    }

    #[test]
    fn test_load_empty_document() {
        let tables = load_dependency_tables("{}").unwrap();
        assert!(tables.is_empty());
    }
}
