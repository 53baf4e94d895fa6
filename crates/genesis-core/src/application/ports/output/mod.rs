//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `genesis-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{Archetype, FeatureFlags, TemplateSet};
use crate::error::GenesisResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `genesis_adapters::filesystem::LocalFilesystem` (production)
/// - `genesis_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every path handed to the port is already joined onto an explicit root;
/// implementations never consult the process working directory.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GenesisResult<()>;

    /// Write content to a file, truncating any previous content.
    fn write_file(&self, path: &Path, content: &str) -> GenesisResult<()>;

    /// Read a file, `Ok(None)` when it does not exist.
    fn read_file(&self, path: &Path) -> GenesisResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `genesis_adapters::catalog::BuiltinCatalog` (templates compiled into the binary)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCatalog: Send + Sync {
    /// Template set for one archetype and flag combination.
    ///
    /// [`Archetype::Hybrid`] resolves to the root composition files only;
    /// its halves come from resolving `Frontend` and `Backend`.
    fn resolve(&self, archetype: Archetype, flags: FeatureFlags) -> GenesisResult<TemplateSet>;
}

/// An external command run after files are written (`bun install`, `go mod tidy`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCommand {
    program: String,
    args: Vec<String>,
}

impl HookCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace; `None` when it is blank.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for HookCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What a finished hook process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl HookOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running post-provision commands.
///
/// Implemented by:
/// - `genesis_adapters::hook::ProcessHookRunner` (spawns real processes)
/// - `genesis_adapters::hook::NoopHookRunner` / `RecordingHookRunner` (tests, `--no-hooks`)
#[cfg_attr(test, mockall::automock)]
pub trait HookRunner: Send + Sync {
    /// Run `command` with `cwd` as its working directory and wait for it.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&self, cwd: &Path, command: &HookCommand) -> std::io::Result<HookOutput>;
}

/// A command bound to the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedHook {
    pub cwd: PathBuf,
    pub command: HookCommand,
}
