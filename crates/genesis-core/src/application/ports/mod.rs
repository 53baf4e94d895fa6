//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `genesis-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations under an explicit root
//!   - `TemplateCatalog`: Template sets per archetype and flags
//!   - `HookRunner`: Post-provision process execution
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

#[cfg(test)]
pub use output::{MockFilesystem, MockHookRunner, MockTemplateCatalog};
pub use output::{Filesystem, HookCommand, HookOutput, HookRunner, PlannedHook, TemplateCatalog};
