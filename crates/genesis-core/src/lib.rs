//! Genesis Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Genesis
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           genesis-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  GenerationService ─▶ HybridOrchestrator│
//! │        ArchetypeSpawner ─▶ Materializer │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, TemplateCatalog, HookRunner │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     genesis-adapters (Infrastructure)   │
//! │ LocalFilesystem, BuiltinCatalog, ...    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  Archetype, TemplateSet, RenderContext  │
//! │     EnvFile, SharedIdentity             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use genesis_core::prelude::*;
//!
//! let service = GenerationService::new(catalog, filesystem, hook_runner);
//! let request = GenerationRequest::new("acme").archetype("hybrid").ai(true);
//! let report = service.generate(&request, Path::new("."))?;
//! println!("{}", report.summary());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationRequest, GenerationService, HookPlan,
        ports::{Filesystem, HookCommand, HookOutput, HookRunner, TemplateCatalog},
    };
    pub use crate::domain::{
        Archetype, FeatureFlags, ProjectName, RenderContext, SubProject, TemplateSet,
    };
    pub use crate::error::{GenesisError, GenesisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
