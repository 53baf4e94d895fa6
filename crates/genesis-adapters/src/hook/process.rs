//! Runs hook commands as child processes.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use genesis_core::application::ports::{HookCommand, HookOutput, HookRunner};

/// Spawns the command, waits for it, and captures both output streams.
///
/// Stdin is closed so a tool that prompts fails instead of hanging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHookRunner;

impl ProcessHookRunner {
    pub fn new() -> Self {
        Self
    }
}

impl HookRunner for ProcessHookRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    fn run(&self, cwd: &Path, command: &HookCommand) -> std::io::Result<HookOutput> {
        let output = Command::new(command.program())
            .args(command.args())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        debug!(status = ?output.status.code(), "hook process exited");

        Ok(HookOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
