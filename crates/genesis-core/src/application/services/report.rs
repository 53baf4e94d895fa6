//! The single result a caller gets back from a generation run.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    application::services::{
        hybrid::HybridState,
        provision::{HookOutcome, HookWarning},
    },
    domain::{Archetype, FeatureFlags, ProjectName},
    error::GenesisError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub project: ProjectName,
    pub archetype: Archetype,
    pub flags: FeatureFlags,
    pub root: PathBuf,
    /// Files written, in write order, absolute.
    pub files: Vec<PathBuf>,
    pub errors: Vec<GenesisError>,
    pub warnings: Vec<HookWarning>,
    pub hooks: Vec<HookOutcome>,
    /// Final state of a hybrid run; `None` for standalone archetypes.
    pub hybrid_state: Option<HybridState>,
}

impl GenerationReport {
    pub(crate) fn new(
        project: ProjectName,
        archetype: Archetype,
        flags: FeatureFlags,
        root: PathBuf,
    ) -> Self {
        Self {
            project,
            archetype,
            flags,
            root,
            files: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            hooks: Vec::new(),
            hybrid_state: None,
        }
    }

    pub(crate) fn record_hook(&mut self, outcome: HookOutcome) {
        if let Some(warning) = outcome.warning() {
            self.warnings.push(warning);
        }
        self.hooks.push(outcome);
    }

    /// No errors. Hook warnings do not count.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Written files relative to the project root, `/`-separated.
    pub fn relative_files(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| relative_to(&self.root, f))
            .collect()
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let verdict = if self.success() {
            "Generated"
        } else {
            "Generated with errors"
        };
        let _ = writeln!(
            out,
            "{verdict} {} project '{}' at {} ({} files, {})",
            self.archetype,
            self.project,
            self.root.display(),
            self.files.len(),
            self.flags
        );
        for error in &self.errors {
            let _ = writeln!(out, "  error: {error}");
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "  warning: {warning}");
        }
        out
    }

    pub fn to_summary(&self) -> ReportSummary {
        ReportSummary {
            project: self.project.to_string(),
            archetype: self.archetype,
            ai: self.flags.ai(),
            root: self.root.display().to_string(),
            success: self.success(),
            files: self.relative_files(),
            errors: self.errors.iter().map(ToString::to_string).collect(),
            warnings: self.warnings.iter().map(ToString::to_string).collect(),
            hooks: self.hooks.clone(),
            hybrid_state: self.hybrid_state.as_ref().map(ToString::to_string),
        }
    }
}

/// Serializable view of a [`GenerationReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub project: String,
    pub archetype: Archetype,
    pub ai: bool,
    pub root: String,
    pub success: bool,
    pub files: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub hooks: Vec<HookOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_state: Option<String>,
}

fn relative_to(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
