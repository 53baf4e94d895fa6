//! Post-provision hooks: best-effort external commands after generation.
//!
//! A hook never fails generation. A runner error or a non-zero exit is
//! turned into a [`HookWarning`] on the report.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::ports::{HookCommand, HookRunner},
    domain::Archetype,
};

/// Which commands run after which archetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookPlan {
    pub enabled: bool,
    pub frontend: Option<HookCommand>,
    pub backend: Option<HookCommand>,
}

impl HookPlan {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Command for a standalone archetype, if any and if enabled.
    pub fn command_for(&self, archetype: Archetype) -> Option<&HookCommand> {
        if !self.enabled {
            return None;
        }
        match archetype {
            Archetype::Frontend => self.frontend.as_ref(),
            Archetype::Backend => self.backend.as_ref(),
            Archetype::Hybrid => None,
        }
    }
}

impl Default for HookPlan {
    fn default() -> Self {
        Self {
            enabled: true,
            frontend: Some(HookCommand::new("bun", ["install"])),
            backend: Some(HookCommand::new("go", ["mod", "tidy"])),
        }
    }
}

/// Result of one hook invocation, or of a hook that was never started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookOutcome {
    pub command: String,
    pub cwd: PathBuf,
    pub success: bool,
    /// The runner was never called; `stderr` holds the reason.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl HookOutcome {
    /// A hook held back because the files it works on are incomplete.
    pub fn skipped(command: &HookCommand, cwd: &Path, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%command, cwd = %cwd.display(), %reason, "skipping post-provision hook");
        Self {
            command: command.to_string(),
            cwd: cwd.to_path_buf(),
            success: false,
            skipped: true,
            exit_code: None,
            stdout: String::new(),
            stderr: reason,
        }
    }

    pub fn warning(&self) -> Option<HookWarning> {
        if self.success {
            return None;
        }
        let reason = match self.exit_code {
            _ if self.skipped => format!("skipped: {}", self.stderr),
            Some(code) => {
                let detail = self.stderr.lines().last().unwrap_or("").trim();
                if detail.is_empty() {
                    format!("exited with status {code}")
                } else {
                    format!("exited with status {code}: {detail}")
                }
            }
            None if self.stderr.is_empty() => "terminated by signal".to_string(),
            None => self.stderr.clone(),
        };
        Some(HookWarning {
            command: self.command.clone(),
            cwd: self.cwd.clone(),
            reason,
        })
    }
}

/// Advisory: a hook did not succeed, generated files are still in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookWarning {
    pub command: String,
    pub cwd: PathBuf,
    pub reason: String,
}

impl fmt::Display for HookWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` in {} did not succeed: {}",
            self.command,
            self.cwd.display(),
            self.reason
        )
    }
}

/// Runs a [`HookCommand`] through the [`HookRunner`] port and never fails.
pub struct PostProvisionHook<'a> {
    runner: &'a dyn HookRunner,
}

impl<'a> PostProvisionHook<'a> {
    pub fn new(runner: &'a dyn HookRunner) -> Self {
        Self { runner }
    }

    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    pub fn run(&self, cwd: &Path, command: &HookCommand) -> HookOutcome {
        info!("running post-provision hook");

        let outcome = match self.runner.run(cwd, command) {
            Ok(output) => HookOutcome {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                success: output.success(),
                skipped: false,
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(e) => HookOutcome {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                success: false,
                skipped: false,
                exit_code: None,
                stdout: String::new(),
                stderr: format!("could not start `{}`: {}", command.program(), e),
            },
        };

        if outcome.success {
            info!("hook finished");
        } else {
            warn!(exit_code = ?outcome.exit_code, "hook did not succeed");
        }
        outcome
    }
}
