//! Data model types shared by the ARN helpers, the resolver and the engine.
//!
//! Catalog types (`Resource`, `Operation`, `ArnItem`) are owned by the
//! caller and only read by the engine. `Selection` is the engine's mutable
//! per-resource state. `Statement` and `PolicyDocument` are the compiled
//! output, serialized in the `{"Version", "Statement": [...]}` shape.

mod arn_item;
mod document;
mod resource;
mod selection;
mod statement;
mod validation;

pub use arn_item::ArnItem;
pub use document::{POLICY_VERSION, PolicyDocument};
pub use resource::{Operation, OperationCategory, Resource};
pub use selection::Selection;
pub use statement::{Effect, OneOrMany, Statement};
pub use validation::ValidationResult;
