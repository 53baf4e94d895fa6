//! Infrastructure adapters for Genesis.
//!
//! This crate implements the ports defined in `genesis_core::application::ports`.
//! It contains all I/O: the real and in-memory filesystems, the built-in
//! template catalog, and the process-backed hook runner.

pub mod catalog;
pub mod filesystem;
pub mod hook;

// Re-export commonly used adapters
pub use catalog::BuiltinCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use hook::{NoopHookRunner, ProcessHookRunner, RecordingHookRunner};
