//! Application layer for Genesis.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, HybridOrchestrator, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{
    ArchetypeInfo, ArchetypeSpawner, GenerationPlan, GenerationReport, GenerationRequest,
    GenerationService, HookOutcome, HookPlan, HookWarning, HybridOrchestrator, HybridOutcome,
    HybridState, MaterializeReport, Materializer, PostProvisionHook, Reconciler, ReportSummary,
    SpawnOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, HookCommand, HookOutput, HookRunner, PlannedHook, TemplateCatalog};

pub use error::ApplicationError;
