//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: materialize a template set, spawn an archetype,
//! compose a hybrid, and tie it all together in a generation run.

pub mod generation;
pub mod hybrid;
pub mod materializer;
pub mod provision;
pub mod reconcile;
pub mod report;
pub mod spawner;

pub use generation::{ArchetypeInfo, GenerationPlan, GenerationRequest, GenerationService};
pub use hybrid::{HybridOrchestrator, HybridOutcome, HybridState};
pub use materializer::{MaterializeReport, Materializer};
pub use provision::{HookOutcome, HookPlan, HookWarning, PostProvisionHook};
pub use reconcile::Reconciler;
pub use report::{GenerationReport, ReportSummary};
pub use spawner::{ArchetypeSpawner, SpawnOutcome};
