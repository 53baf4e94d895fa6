//! Hook runners that never start a process.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use genesis_core::application::ports::{HookCommand, HookOutput, HookRunner};

fn succeeded() -> HookOutput {
    HookOutput {
        exit_code: Some(0),
        ..HookOutput::default()
    }
}

/// Reports every command as successful without running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHookRunner;

impl HookRunner for NoopHookRunner {
    fn run(&self, cwd: &Path, command: &HookCommand) -> std::io::Result<HookOutput> {
        debug!(%command, cwd = %cwd.display(), "hook skipped");
        Ok(succeeded())
    }
}

/// Records each `(cwd, command)` it is asked to run.
///
/// Clones share the same log. Commands listed in `failing` report exit code 1.
#[derive(Debug, Clone, Default)]
pub struct RecordingHookRunner {
    calls: Arc<Mutex<Vec<(PathBuf, HookCommand)>>>,
    failing: Vec<String>,
}

impl RecordingHookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make runs of `program` exit non-zero.
    pub fn failing(mut self, program: impl Into<String>) -> Self {
        self.failing.push(program.into());
        self
    }

    pub fn calls(&self) -> Vec<(PathBuf, HookCommand)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl HookRunner for RecordingHookRunner {
    fn run(&self, cwd: &Path, command: &HookCommand) -> std::io::Result<HookOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((cwd.to_path_buf(), command.clone()));
        }
        if self.failing.iter().any(|p| p == command.program()) {
            return Ok(HookOutput {
                exit_code: Some(1),
                stderr: format!("{} failed", command.program()),
                ..HookOutput::default()
            });
        }
        Ok(succeeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_shares_across_clones() {
        let runner = RecordingHookRunner::new().failing("go");
        let handle = runner.clone();

        let bun = HookCommand::new("bun", ["install"]);
        let go = HookCommand::new("go", ["mod", "tidy"]);
        assert!(runner.run(Path::new("/p/web"), &bun).unwrap().success());
        assert!(!runner.run(Path::new("/p/api"), &go).unwrap().success());

        assert_eq!(
            handle.calls(),
            [
                (PathBuf::from("/p/web"), bun),
                (PathBuf::from("/p/api"), go)
            ]
        );
    }

    #[test]
    fn noop_always_succeeds() {
        let out = NoopHookRunner
            .run(Path::new("/nowhere"), &HookCommand::new("bun", ["install"]))
            .unwrap();
        assert!(out.success());
    }
}
