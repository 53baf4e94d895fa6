// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Errors raised while compiling or rendering a template body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("unknown flag '{name}'")]
    UnknownFlag { name: String },

    #[error("syntax error: {reason}")]
    Syntax { reason: String },

    #[error("{reason}")]
    Engine { reason: String },
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside aggregate reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Duplicate destination in template set: {path}")]
    DuplicateDestination { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Invalid connection string '{value}': {reason}")]
    InvalidConnectionString { value: String, reason: String },

    #[error("Template for '{path}' is malformed: {source}")]
    MalformedTemplate {
        path: String,
        #[source]
        source: RenderError,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown archetype: '{name}'")]
    UnknownArchetype { name: String },

    #[error("Archetype '{archetype}' cannot be spawned directly")]
    NotSpawnable { archetype: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use ASCII letters, digits, '-' and '_'".into(),
                "Start with a letter or digit".into(),
                "Examples: acme, my-app, billing_api".into(),
            ],
            Self::UnknownArchetype { name } => vec![
                format!("'{}' is not a known archetype", name),
                "Supported archetypes:".into(),
                "  • frontend - Next.js web node (aliases: web, t3)".into(),
                "  • backend  - Go API service (aliases: api, go)".into(),
                "  • hybrid   - frontend + backend sharing one database".into(),
                "Try: genesis list".into(),
            ],
            Self::DuplicateDestination { path } => vec![
                format!("Two templates write to '{}'", path),
                "This is a bug in the template catalog, please report it".into(),
            ],
            Self::MalformedTemplate { path, .. } => vec![
                format!("The template for '{}' could not be compiled", path),
                "This is a bug in the template catalog, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::InvalidConnectionString { .. } => {
                ErrorCategory::Validation
            }
            Self::UnknownArchetype { .. } => ErrorCategory::NotFound,
            Self::DuplicateDestination { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::MalformedTemplate { .. }
            | Self::NotSpawnable { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_archetype_lists_supported_ones() {
        let err = DomainError::UnknownArchetype {
            name: "quantum".into(),
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("frontend")));
        assert!(suggestions.iter().any(|s| s.contains("hybrid")));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn catalog_defects_are_internal() {
        let err = DomainError::DuplicateDestination {
            path: ".env".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
