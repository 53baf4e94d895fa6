//! Domain value objects: Archetype, FeatureFlags, ProjectName, SubProject.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Each one owns its string representation and its `FromStr` parser, so the
//! CLI can hand raw user input straight to the core.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Archetype ────────────────────────────────────────────────────────────────

/// A named generation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Next.js web node with auth and a Drizzle schema.
    #[default]
    Frontend,
    /// Go HTTP service with sqlc, audit ledger and optional AI module.
    Backend,
    /// Frontend and backend side by side, sharing one database.
    Hybrid,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Self::Frontend, Self::Backend, Self::Hybrid];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Hybrid => "hybrid",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Frontend => "Next.js + Better Auth + Drizzle web node",
            Self::Backend => "Go API service with sqlc, RBAC and audit ledger",
            Self::Hybrid => "web/ + api/ twin wired to one shared Postgres database",
        }
    }

    /// Whether this archetype is composed of other archetypes.
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Hybrid)
    }

    /// Command printed in the debrief after generation.
    pub const fn run_command(&self) -> &'static str {
        match self {
            Self::Frontend => "bun dev",
            Self::Backend => "make run",
            Self::Hybrid => "make dev",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" | "web" | "t3" => Ok(Self::Frontend),
            "backend" | "api" | "go" => Ok(Self::Backend),
            "hybrid" | "twin" => Ok(Self::Hybrid),
            _ => Err(DomainError::UnknownArchetype { name: s.into() }),
        }
    }
}

// ── FeatureFlags ─────────────────────────────────────────────────────────────

/// Named booleans that select template variants.
///
/// `Copy` so a generation pass hands out snapshots, never a shared handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    ai: bool,
}

impl FeatureFlags {
    /// Flag names a template may test with `#if` / `#unless`.
    pub const NAMES: [&'static str; 1] = ["ai"];

    pub const fn new() -> Self {
        Self { ai: false }
    }

    pub const fn with_ai(mut self, enabled: bool) -> Self {
        self.ai = enabled;
        self
    }

    pub const fn ai(&self) -> bool {
        self.ai
    }

    /// Look a flag up by its template name.
    pub fn get(&self, name: &str) -> Option<bool> {
        match name {
            "ai" => Some(self.ai),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ai={}", if self.ai { "on" } else { "off" })
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// A non-empty, identifier-safe project name.
///
/// Invariant: ASCII alphanumerics, `-` and `_` only; starts with an
/// alphanumeric. It is used verbatim as a directory name, a package name,
/// a Go module path and a database name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    const MAX_LEN: usize = 63;

    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: raw.clone(),
            reason: reason.into(),
        };

        let Some(first) = raw.chars().next() else {
            return Err(invalid("name cannot be empty"));
        };
        if !first.is_ascii_alphanumeric() {
            return Err(invalid("name must start with a letter or digit"));
        }
        if raw.len() > Self::MAX_LEN {
            return Err(invalid("name is longer than 63 characters"));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── SubProject ───────────────────────────────────────────────────────────────

/// Marks a spawner run as one half of a hybrid composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubProject {
    Web,
    Api,
}

impl SubProject {
    pub const ALL: [SubProject; 2] = [Self::Web, Self::Api];

    /// Directory under the hybrid root, also the sub-project's default
    /// database name before reconciliation.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Api => "api",
        }
    }

    /// The archetype spawned into this slot.
    pub const fn archetype(&self) -> Archetype {
        match self {
            Self::Web => Archetype::Frontend,
            Self::Api => Archetype::Backend,
        }
    }
}

impl fmt::Display for SubProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_parses_aliases() {
        assert_eq!("frontend".parse::<Archetype>().unwrap(), Archetype::Frontend);
        assert_eq!("T3".parse::<Archetype>().unwrap(), Archetype::Frontend);
        assert_eq!("go".parse::<Archetype>().unwrap(), Archetype::Backend);
        assert_eq!(" Hybrid ".parse::<Archetype>().unwrap(), Archetype::Hybrid);
    }

    #[test]
    fn default_archetype_is_frontend() {
        assert_eq!(Archetype::default(), Archetype::Frontend);
    }

    #[test]
    fn unknown_archetype_keeps_the_raw_name() {
        assert_eq!(
            "quantum".parse::<Archetype>(),
            Err(DomainError::UnknownArchetype {
                name: "quantum".into()
            })
        );
    }

    #[test]
    fn archetype_round_trips_through_display() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.to_string().parse::<Archetype>().unwrap(), archetype);
        }
    }

    #[test]
    fn flags_lookup_by_name() {
        let flags = FeatureFlags::new().with_ai(true);
        assert_eq!(flags.get("ai"), Some(true));
        assert_eq!(flags.get("quantum"), None);
        assert_eq!(flags.to_string(), "ai=on");
    }

    #[test]
    fn project_name_rules() {
        for ok in ["acme", "my-app", "billing_api", "9lives"] {
            assert!(ProjectName::parse(ok).is_ok(), "{ok} should be valid");
        }
        for bad in ["", "-lead", ".hidden", "a/b", "white space", "ünï"] {
            assert!(
                matches!(
                    ProjectName::parse(bad),
                    Err(DomainError::InvalidProjectName { .. })
                ),
                "{bad} should be rejected"
            );
        }
        assert!(ProjectName::parse("x".repeat(64)).is_err());
    }

    #[test]
    fn sub_projects_map_to_archetypes() {
        assert_eq!(SubProject::Web.archetype(), Archetype::Frontend);
        assert_eq!(SubProject::Api.archetype(), Archetype::Backend);
        assert_eq!(SubProject::Api.dir_name(), "api");
    }
}
