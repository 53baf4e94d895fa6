//! Implementation of the `genesis new` command.
//!
//! Responsibility: translate CLI arguments into a `GenerationRequest`, call
//! the core generation service, and display results. No business logic
//! lives here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use genesis_adapters::{BuiltinCatalog, LocalFilesystem, NoopHookRunner, ProcessHookRunner};
use genesis_core::{
    application::{GenerationPlan, HookPlan, ports::HookRunner},
    domain::Archetype,
    prelude::*,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `genesis new` command.
///
/// Dispatch sequence:
/// 1. Merge flags over config defaults into a request
/// 2. Plan (validates name and archetype, writes nothing)
/// 3. Early-exit if `--dry-run`
/// 4. Confirm unless `--yes`, `--quiet`, JSON output, or no TTY
/// 5. Generate and print the report
/// 6. Exit 5 if the report carries errors, else print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config);
    let hook_plan = hook_plan(&args, &config);
    let service = build_service(hook_plan.clone());
    let base_dir =
        std::env::current_dir().with_cli_context(|| "failed to read the current directory")?;

    // 1. Validation happens here; nothing has touched the disk yet.
    let plan = service.plan(&request, &base_dir)?;
    debug!(
        archetype = %plan.archetype,
        flags = %plan.flags,
        files = plan.files.len(),
        hooks = plan.hooks.len(),
        "plan resolved"
    );

    // 2. Dry run: describe but do not write.
    if args.dry_run {
        return show_plan(&plan, &output, true);
    }

    // 3. Confirm
    if should_confirm(&args, &global, &output) {
        show_plan(&plan, &output, false)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Generate
    output.header(&format!("Creating '{}'...", plan.project))?;
    info!(root = %plan.root.display(), "generation started");

    let report = service.generate(&request, &base_dir)?;

    if output.is_json() {
        output.json(&report.to_summary())?;
    } else {
        show_report(&report, &output, global.verbose)?;
    }

    if !report.success() {
        return Err(CliError::Incomplete {
            root: report.root.clone(),
            errors: report.errors.len(),
        });
    }

    info!(files = report.files.len(), "generation completed");

    // 5. Next steps
    if !output.is_json() {
        output.success(&format!("Project '{}' is ready.", report.project))?;
        output.print("")?;
        output.print("Next steps:")?;
        for step in next_steps(&report, &hook_plan) {
            output.print(&format!("  {step}"))?;
        }
    }

    Ok(())
}

// ── Request construction ──────────────────────────────────────────────────────

fn build_request(args: &NewArgs, config: &AppConfig) -> GenerationRequest {
    let archetype = args
        .kind
        .clone()
        .unwrap_or_else(|| config.defaults.archetype.clone());

    GenerationRequest::new(args.name.clone())
        .archetype(archetype)
        .ai(args.ai || config.defaults.ai)
}

fn hook_plan(args: &NewArgs, config: &AppConfig) -> HookPlan {
    let plan = config.hook_plan();
    HookPlan {
        enabled: plan.enabled && !args.no_hooks,
        ..plan
    }
}

fn build_service(plan: HookPlan) -> GenerationService {
    let runner: Box<dyn HookRunner> = if plan.enabled {
        Box::new(ProcessHookRunner::new())
    } else {
        Box::new(NoopHookRunner)
    };

    GenerationService::new(
        Box::new(BuiltinCatalog::new()),
        Box::new(LocalFilesystem::new()),
        runner,
    )
    .with_hook_plan(plan)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PlanView<'a> {
    project: &'a str,
    archetype: Archetype,
    ai: bool,
    root: &'a PathBuf,
    files: &'a [String],
    hooks: Vec<String>,
}

fn show_plan(plan: &GenerationPlan, out: &OutputManager, dry_run: bool) -> CliResult<()> {
    if out.is_json() {
        out.json(&PlanView {
            project: plan.project.as_str(),
            archetype: plan.archetype,
            ai: plan.flags.ai(),
            root: &plan.root,
            files: &plan.files,
            hooks: plan
                .hooks
                .iter()
                .map(|h| format!("{} (in {})", h.command, h.cwd.display()))
                .collect(),
        })?;
        return Ok(());
    }

    if dry_run {
        out.info(&format!(
            "Dry run: would create '{}' at {}",
            plan.project,
            plan.root.display()
        ))?;
    } else {
        out.header("Configuration")?;
    }
    out.print(&format!("  Project:   {}", plan.project))?;
    out.print(&format!("  Archetype: {}", plan.archetype))?;
    out.print(&format!("  Flags:     {}", plan.flags))?;
    out.print(&format!("  Location:  {}", plan.root.display()))?;

    if dry_run {
        out.print(&format!("  Files ({}):", plan.files.len()))?;
        for file in &plan.files {
            out.detail(&format!("    {file}"))?;
        }
        for hook in &plan.hooks {
            out.print(&format!("  Then:      {} (in {})", hook.command, hook.cwd.display()))?;
        }
    }
    out.print("")?;
    Ok(())
}

fn show_report(report: &GenerationReport, out: &OutputManager, verbose: u8) -> CliResult<()> {
    if verbose > 0 {
        for file in report.relative_files() {
            out.detail(&format!("  + {file}"))?;
        }
    }
    out.print(&format!(
        "  {} file(s) written to {}",
        report.files.len(),
        report.root.display()
    ))?;

    for hook in report.hooks.iter().filter(|h| h.success) {
        out.print(&format!("  ran `{}` in {}", hook.command, hook.cwd.display()))?;
    }
    for warning in &report.warnings {
        out.warning(&warning.to_string())?;
    }
    for error in &report.errors {
        out.error(&error.to_string())?;
    }
    Ok(())
}

/// Commands the user should run next, in order.
fn next_steps(report: &GenerationReport, hooks: &HookPlan) -> Vec<String> {
    let mut steps = vec![format!("cd {}", report.project)];

    let installed = !report.hooks.is_empty() && report.hooks.iter().all(|h| h.success);
    if !installed {
        let pending = match report.archetype {
            Archetype::Hybrid => hooks
                .frontend
                .as_ref()
                .map(|c| format!("(cd web && {c})")),
            Archetype::Frontend => hooks.frontend.as_ref().map(ToString::to_string),
            Archetype::Backend => hooks.backend.as_ref().map(ToString::to_string),
        };
        steps.extend(pending);
    }

    steps.push("docker compose up -d".into());
    steps.push(report.archetype.run_command().into());
    steps
}

fn should_confirm(args: &NewArgs, global: &GlobalArgs, output: &OutputManager) -> bool {
    use std::io::IsTerminal as _;

    !args.yes && !global.quiet && !output.is_json() && std::io::stdin().is_terminal()
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_adapters::{MemoryFilesystem, RecordingHookRunner};
    use std::path::Path;

    fn args(kind: Option<&str>, ai: bool, no_hooks: bool) -> NewArgs {
        NewArgs {
            name: "acme".into(),
            kind: kind.map(Into::into),
            ai,
            yes: true,
            dry_run: false,
            no_hooks,
        }
    }

    fn generate(archetype: &str, runner: RecordingHookRunner) -> GenerationReport {
        GenerationService::new(
            Box::new(BuiltinCatalog::new()),
            Box::new(MemoryFilesystem::new()),
            Box::new(runner),
        )
        .generate(
            &GenerationRequest::new("acme").archetype(archetype),
            Path::new("/p"),
        )
        .unwrap()
    }

    #[test]
    fn flags_win_over_config_defaults() {
        let mut config = AppConfig::default();
        config.defaults.archetype = "backend".into();

        let from_config = build_request(&args(None, false, false), &config);
        assert_eq!(from_config.archetype, "backend");

        let from_flag = build_request(&args(Some("hybrid"), true, false), &config);
        assert_eq!(from_flag.archetype, "hybrid");
        assert!(from_flag.ai);
    }

    #[test]
    fn config_can_turn_ai_on_by_default() {
        let mut config = AppConfig::default();
        config.defaults.ai = true;
        assert!(build_request(&args(None, false, false), &config).ai);
    }

    #[test]
    fn no_hooks_disables_the_plan() {
        let config = AppConfig::default();
        assert!(!hook_plan(&args(None, false, true), &config).enabled);
        assert!(hook_plan(&args(None, false, false), &config).enabled);
    }

    #[test]
    fn next_steps_skip_install_after_successful_hook() {
        let report = generate("frontend", RecordingHookRunner::new());
        assert_eq!(
            next_steps(&report, &HookPlan::default()),
            ["cd acme", "docker compose up -d", "bun dev"]
        );
    }

    #[test]
    fn next_steps_repeat_a_failed_install() {
        let report = generate("backend", RecordingHookRunner::new().failing("go"));
        assert_eq!(
            next_steps(&report, &HookPlan::default()),
            ["cd acme", "go mod tidy", "docker compose up -d", "make run"]
        );
    }

    #[test]
    fn hybrid_next_steps_install_inside_web() {
        let report = generate("hybrid", RecordingHookRunner::new().failing("bun"));
        assert_eq!(
            next_steps(&report, &HookPlan::default()),
            [
                "cd acme",
                "(cd web && bun install)",
                "docker compose up -d",
                "make dev"
            ]
        );
    }

    #[test]
    fn skipped_hooks_are_suggested() {
        let mut report = generate("frontend", RecordingHookRunner::new());
        report.hooks.clear();
        assert_eq!(
            next_steps(&report, &HookPlan::disabled()),
            ["cd acme", "bun install", "docker compose up -d", "bun dev"]
        );
    }

    #[test]
    fn blank_install_command_is_not_suggested() {
        let mut report = generate("frontend", RecordingHookRunner::new());
        report.hooks.clear();
        let plan = HookPlan {
            frontend: None,
            ..HookPlan::disabled()
        };
        assert_eq!(
            next_steps(&report, &plan),
            ["cd acme", "docker compose up -d", "bun dev"]
        );
    }
}
