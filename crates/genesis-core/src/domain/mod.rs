// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Genesis.
//!
//! Pure values and rules: archetypes, names, template sets and the
//! env/connection model used by hybrid reconciliation. Nothing
//! here touches the filesystem or spawns processes; those concerns sit
//! behind the ports in the application layer.
//!
//! - **No I/O**: rendering and env edits are string transforms
//! - **Only std + thiserror + serde + tera**
//! - **Immutable values**: every type is `Clone + PartialEq`

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    ConnectionString, EnvFile, RelativePath, RenderContext, SharedIdentity, TemplateEntry,
    TemplateSet, TemplateSetBuilder, TemplateSource,
};
pub use error::{DomainError, ErrorCategory, RenderError};
pub use validation::DomainValidator;
pub use value_objects::{Archetype, FeatureFlags, ProjectName, SubProject};
