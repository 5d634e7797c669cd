//! Assemble IAM-style policy documents from a selection of resources and actions.
//!
//! The crate has three layers:
//!
//! - [`arn`]: parse, format, validate and glob-match ARN strings
//! - [`dependencies`]: expand requested actions into the actions they need
//! - [`PolicyEngine`]: track per-resource selections and compile them into a
//!   [`PolicyDocument`]
//!
//! ```rust
//! use policy_composer_core::{Operation, OperationCategory, PolicyEngine, Resource};
//!
//! let mut engine = PolicyEngine::new();
//! engine.add_resource(
//!     Resource::new("bucket", "s3")
//!         .with_action(Operation::new("s3:GetObject", OperationCategory::Read)),
//! );
//! engine.set_actions("bucket", ["s3:GetObject"]);
//! engine.set_arn("bucket", "arn:aws:s3:::my-bucket/*");
//!
//! let document = engine.compile();
//! assert_eq!(document.len(), 1);
//! assert!(document.statements[0].action.contains_str("s3:GetObject"));
//! ```

pub use dependencies::{
    DependencyEntry, DependencyTable, DependencyTables, TableResolver, resolve_dependencies,
};
pub use engine::{EngineState, PolicyEngine};
pub use error::ComposerError;
pub use loader::{default_dependency_tables, load_dependency_tables};
pub use pattern::ArnPattern;
pub use traits::DependencyResolver;
pub use types::{
    ArnItem, Effect, OneOrMany, Operation, OperationCategory, POLICY_VERSION, PolicyDocument,
    Resource, Selection, Statement, ValidationResult,
};

pub mod arn;
pub mod dependencies;
mod engine;
mod error;
mod loader;
pub mod metrics;
mod pattern;
mod timers;
mod traits;
mod types;
