//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::SubProject;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// One template entry could not be rendered or written.
    #[error("Failed to materialize {path}: {reason}")]
    Materialize { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// One half of a hybrid project failed; the other half still ran.
    #[error("Sub-project '{sub_project}' failed: {reason}")]
    SubSpawn {
        sub_project: SubProject,
        reason: String,
    },

    /// A hybrid step that cannot be skipped failed.
    #[error("Hybrid generation halted at {step}: {reason}")]
    Hybrid { step: &'static str, reason: String },

    /// Rewriting a sub-project's env file failed.
    #[error("Failed to reconcile {path}: {reason}")]
    Reconciliation { path: PathBuf, reason: String },

    /// Template catalog could not produce a set.
    #[error("Template catalog error: {reason}")]
    Catalog { reason: String },

    /// Shared state lock was poisoned by a panicking thread.
    #[error("Internal lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Materialize { path, .. } | Self::Filesystem { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that the disk is not full".into(),
            ],
            Self::SubSpawn { sub_project, .. } => vec![
                format!("The {} half of the project is incomplete", sub_project),
                "Fix the cause above and re-run the same command; generation is idempotent".into(),
            ],
            Self::Reconciliation { path, .. } => vec![
                format!("Could not update {}", path.display()),
                "Set DATABASE_URL in that file by hand, or re-run the command".into(),
            ],
            Self::Hybrid { .. } => vec![
                "The project root could not be prepared".into(),
                "Check that the target directory is writable".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Materialize { .. }
            | Self::Filesystem { .. }
            | Self::SubSpawn { .. }
            | Self::Hybrid { .. }
            | Self::Reconciliation { .. }
            | Self::Catalog { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }

    /// Path the error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Materialize { path, .. }
            | Self::Filesystem { path, .. }
            | Self::Reconciliation { path, .. } => Some(path),
            _ => None,
        }
    }
}
