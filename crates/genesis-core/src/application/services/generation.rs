//! Generation Service - main application orchestrator.
//!
//! This service coordinates the whole workflow:
//! 1. Validate the request (name, archetype, flags)
//! 2. Resolve every template set the run needs (fails before any write)
//! 3. Spawn the archetype, or run the hybrid orchestrator
//! 4. Run post-provision hooks best-effort
//! 5. Fold everything into one `GenerationReport`
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, HookRunner, PlannedHook, TemplateCatalog},
        services::{
            hybrid::HybridOrchestrator,
            provision::{HookOutcome, HookPlan, PostProvisionHook},
            report::GenerationReport,
            spawner::ArchetypeSpawner,
        },
    },
    domain::{Archetype, DomainValidator as validator, FeatureFlags, ProjectName, SubProject},
    error::{GenesisError, GenesisResult},
};

/// Raw caller input. Nothing here is trusted until [`GenerationService`]
/// validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub name: String,
    pub archetype: String,
    pub ai: bool,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archetype: Archetype::default().to_string(),
            ai: false,
        }
    }

    pub fn archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = archetype.into();
        self
    }

    pub fn ai(mut self, enabled: bool) -> Self {
        self.ai = enabled;
        self
    }
}

/// What `generate` would do, computed without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub project: ProjectName,
    pub archetype: Archetype,
    pub flags: FeatureFlags,
    pub root: std::path::PathBuf,
    /// Paths relative to `root`, in write order.
    pub files: Vec<String>,
    pub hooks: Vec<PlannedHook>,
}

/// Information about an archetype for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchetypeInfo {
    pub archetype: Archetype,
    pub description: &'static str,
    pub run_command: &'static str,
    /// Files written without flags.
    pub files: Vec<String>,
    /// Extra files written only with `ai`.
    pub ai_files: Vec<String>,
}

/// Main generation service.
pub struct GenerationService {
    catalog: Box<dyn TemplateCatalog>,
    filesystem: Box<dyn Filesystem>,
    hooks: Box<dyn HookRunner>,
    hook_plan: HookPlan,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    pub fn new(
        catalog: Box<dyn TemplateCatalog>,
        filesystem: Box<dyn Filesystem>,
        hooks: Box<dyn HookRunner>,
    ) -> Self {
        Self {
            catalog,
            filesystem,
            hooks,
            hook_plan: HookPlan::default(),
        }
    }

    pub fn with_hook_plan(mut self, plan: HookPlan) -> Self {
        self.hook_plan = plan;
        self
    }

    pub fn hook_plan(&self) -> &HookPlan {
        &self.hook_plan
    }

    /// Resolve the request without writing anything.
    pub fn plan(&self, request: &GenerationRequest, base_dir: &Path) -> GenesisResult<GenerationPlan> {
        let (project, archetype, flags) = self.validate(request)?;
        let root = base_dir.join(project.as_str());
        let files = self.layout(archetype, flags)?;

        let hooks = match archetype {
            Archetype::Hybrid => self
                .frontend_hook()
                .map(|command| PlannedHook {
                    cwd: root.join(SubProject::Web.dir_name()),
                    command: command.clone(),
                })
                .into_iter()
                .collect(),
            standalone => self
                .hook_plan
                .command_for(standalone)
                .map(|command| PlannedHook {
                    cwd: root.clone(),
                    command: command.clone(),
                })
                .into_iter()
                .collect(),
        };

        Ok(GenerationPlan {
            project,
            archetype,
            flags,
            root,
            files,
            hooks,
        })
    }

    /// Generate a project under `base_dir/<name>`.
    ///
    /// `Err` means nothing was written (bad request, unknown archetype,
    /// broken catalog). Once files are touched the outcome is always an
    /// `Ok(report)`; check [`GenerationReport::success`].
    #[instrument(
        skip_all,
        fields(
            project = %request.name,
            archetype = %request.archetype,
            ai = request.ai,
            base_dir = %base_dir.display()
        )
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        base_dir: &Path,
    ) -> GenesisResult<GenerationReport> {
        let (project, archetype, flags) = self.validate(request)?;

        // Resolving up front surfaces catalog defects before the first write.
        self.layout(archetype, flags)?;

        let root = base_dir.join(project.as_str());
        info!(root = %root.display(), "Generating {} project", archetype);

        let mut report = GenerationReport::new(project.clone(), archetype, flags, root.clone());

        match archetype {
            Archetype::Hybrid => self.generate_hybrid(&root, &project, flags, &mut report),
            standalone => self.generate_standalone(standalone, &root, &project, flags, &mut report)?,
        }

        if report.success() {
            info!(files = report.files.len(), "Generation completed successfully");
        } else {
            warn!(errors = report.errors.len(), "Generation completed with errors");
        }
        Ok(report)
    }

    /// Every archetype with its file layout, for listing.
    pub fn list_archetypes(&self) -> GenesisResult<Vec<ArchetypeInfo>> {
        Archetype::ALL
            .into_iter()
            .map(|archetype| {
                let files = self.layout(archetype, FeatureFlags::new())?;
                let ai_files = self
                    .layout(archetype, FeatureFlags::new().with_ai(true))?
                    .into_iter()
                    .filter(|f| !files.contains(f))
                    .collect();
                Ok(ArchetypeInfo {
                    archetype,
                    description: archetype.description(),
                    run_command: archetype.run_command(),
                    files,
                    ai_files,
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate(&self, request: &GenerationRequest) -> GenesisResult<(ProjectName, Archetype, FeatureFlags)> {
        let raw = request.name.trim();
        if raw.is_empty() {
            return Err(GenesisError::usage("a project name is required"));
        }
        let project = validator::validate_project_name(raw)?;
        let archetype: Archetype = request.archetype.parse()?;
        let flags = FeatureFlags::new().with_ai(request.ai);
        Ok((project, archetype, flags))
    }

    /// Relative destinations of every file the run writes, in order.
    fn layout(&self, archetype: Archetype, flags: FeatureFlags) -> GenesisResult<Vec<String>> {
        let resolve = |archetype, flags| -> GenesisResult<Vec<String>> {
            let set = self.catalog.resolve(archetype, flags)?;
            validator::validate_template_set(&set)?;
            Ok(set.destinations())
        };

        if !archetype.is_composite() {
            return resolve(archetype, flags);
        }

        let mut files = resolve(Archetype::Hybrid, flags)?;
        for (sub, sub_flags) in [
            (SubProject::Web, FeatureFlags::new()),
            (SubProject::Api, flags),
        ] {
            files.extend(
                resolve(sub.archetype(), sub_flags)?
                    .into_iter()
                    .map(|f| format!("{}/{}", sub.dir_name(), f)),
            );
        }
        Ok(files)
    }

    fn frontend_hook(&self) -> Option<&crate::application::ports::HookCommand> {
        self.hook_plan.command_for(Archetype::Frontend)
    }

    fn generate_standalone(
        &self,
        archetype: Archetype,
        root: &Path,
        project: &ProjectName,
        flags: FeatureFlags,
        report: &mut GenerationReport,
    ) -> GenesisResult<()> {
        let spawner = ArchetypeSpawner::new(archetype, &*self.catalog, &*self.filesystem)?;
        let outcome = spawner.spawn(root, project, flags)?;
        let (written, failures) = outcome.report.into_parts();

        report.files = written;
        report
            .errors
            .extend(failures.into_iter().map(GenesisError::from));

        if let Some(command) = self.hook_plan.command_for(archetype) {
            let outcome = if report.success() {
                PostProvisionHook::new(&*self.hooks).run(root, command)
            } else {
                HookOutcome::skipped(command, root, "generated files are incomplete")
            };
            report.record_hook(outcome);
        }
        Ok(())
    }

    fn generate_hybrid(
        &self,
        root: &Path,
        project: &ProjectName,
        flags: FeatureFlags,
        report: &mut GenerationReport,
    ) {
        let mut orchestrator = HybridOrchestrator::new(&*self.catalog, &*self.filesystem);
        if let Some(command) = self.frontend_hook() {
            orchestrator =
                orchestrator.with_frontend_hook(PostProvisionHook::new(&*self.hooks), command.clone());
        }

        let outcome = orchestrator.spawn_hybrid(root, project, flags);

        report.hybrid_state = Some(outcome.state().clone());
        report.files = outcome.written;
        report
            .errors
            .extend(outcome.errors.into_iter().map(GenesisError::from));
        for hook in outcome.hooks {
            report.record_hook(hook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{HookOutput, MockHookRunner, MockTemplateCatalog};
    use crate::application::services::hybrid::HybridState;
    use crate::application::testing::{Files, FixtureCatalog, content, recording_filesystem};
    use crate::domain::{DomainError, TemplateSet};

    fn ok_runner(times: usize) -> MockHookRunner {
        let mut runner = MockHookRunner::new();
        runner.expect_run().times(times).returning(|_, _| {
            Ok(HookOutput {
                exit_code: Some(0),
                ..Default::default()
            })
        });
        runner
    }

    fn service(failing: &[&str], runner: MockHookRunner) -> (GenerationService, Files) {
        let (fs, files) = recording_filesystem(failing);
        let svc = GenerationService::new(Box::new(FixtureCatalog), Box::new(fs), Box::new(runner));
        (svc, files)
    }

    #[test]
    fn request_defaults_to_frontend() {
        let req = GenerationRequest::new("acme");
        assert_eq!(req.archetype, "frontend");
        assert!(!req.ai);
    }

    #[test]
    fn empty_name_is_a_usage_error() {
        let (svc, files) = service(&[], ok_runner(0));
        let err = svc
            .generate(&GenerationRequest::new("  "), Path::new("/out"))
            .unwrap_err();
        assert!(matches!(err, GenesisError::Usage { .. }));
        assert!(files.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_archetype_creates_nothing() {
        let (svc, files) = service(&[], ok_runner(0));
        let err = svc
            .generate(
                &GenerationRequest::new("acme").archetype("quantum"),
                Path::new("/out"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            GenesisError::Domain(DomainError::UnknownArchetype { .. })
        ));
        assert!(files.lock().unwrap().is_empty());
    }

    #[test]
    fn standalone_backend_runs_its_hook_in_root() {
        let mut runner = MockHookRunner::new();
        runner
            .expect_run()
            .withf(|cwd, cmd| cwd == Path::new("/out/acme") && cmd.to_string() == "go mod tidy")
            .times(1)
            .returning(|_, _| {
                Ok(HookOutput {
                    exit_code: Some(0),
                    ..Default::default()
                })
            });
        let (svc, _fs) = service(&[], runner);

        let report = svc
            .generate(
                &GenerationRequest::new("acme").archetype("go").ai(true),
                Path::new("/out"),
            )
            .unwrap();

        assert!(report.success());
        assert_eq!(report.archetype, Archetype::Backend);
        assert!(report.relative_files().contains(&"internal/ai/handler.go".to_string()));
        assert_eq!(report.hooks.len(), 1);
    }

    #[test]
    fn failing_hook_is_only_a_warning() {
        let mut runner = MockHookRunner::new();
        runner.expect_run().returning(|_, _| {
            Ok(HookOutput {
                exit_code: Some(127),
                stdout: String::new(),
                stderr: "bun: command not found".into(),
            })
        });
        let (svc, _fs) = service(&[], runner);

        let report = svc
            .generate(&GenerationRequest::new("acme"), Path::new("/out"))
            .unwrap();

        assert!(report.success());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn disabled_hooks_never_reach_the_runner() {
        let (svc, _fs) = service(&[], ok_runner(0));
        let svc = svc.with_hook_plan(HookPlan::disabled());

        let report = svc
            .generate(&GenerationRequest::new("acme").archetype("hybrid"), Path::new("/out"))
            .unwrap();

        assert!(report.hooks.is_empty());
        assert_eq!(report.hybrid_state, Some(HybridState::Done));
    }

    #[test]
    fn write_failure_marks_report_and_skips_hook() {
        let (svc, files) = service(&["/out/acme/src"], ok_runner(0));

        let report = svc
            .generate(&GenerationRequest::new("acme"), Path::new("/out"))
            .unwrap();

        assert!(!report.success());
        assert!(matches!(
            report.errors.as_slice(),
            [GenesisError::Application(ApplicationError::Materialize { .. })]
        ));
        assert!(content(&files, "/out/acme/package.json").is_some());

        assert!(matches!(
            report.hooks.as_slice(),
            [HookOutcome { skipped: true, .. }]
        ));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].reason.contains("incomplete"));
    }

    #[test]
    fn hybrid_report_collects_every_half() {
        let (svc, _fs) = service(&[], ok_runner(1));

        let report = svc
            .generate(
                &GenerationRequest::new("acme").archetype("twin").ai(true),
                Path::new("/out"),
            )
            .unwrap();

        let files = report.relative_files();
        assert!(files.contains(&"compose.yml".to_string()));
        assert!(files.contains(&"web/.env".to_string()));
        assert!(files.contains(&"api/internal/ai/service.go".to_string()));
        assert!(!files.iter().any(|f| f.starts_with("web/internal/ai")));
        assert_eq!(report.hooks[0].cwd, Path::new("/out/acme/web"));
    }

    #[test]
    fn plan_matches_what_generate_writes() {
        let (svc, _fs) = service(&[], ok_runner(1));
        let request = GenerationRequest::new("acme").archetype("hybrid").ai(true);

        let plan = svc.plan(&request, Path::new("/out")).unwrap();
        let report = svc.generate(&request, Path::new("/out")).unwrap();

        let mut planned = plan.files.clone();
        let mut written = report.relative_files();
        planned.sort();
        written.sort();
        assert_eq!(planned, written);
        assert_eq!(plan.hooks.len(), 1);
    }

    #[test]
    fn list_marks_ai_only_files() {
        let (svc, _fs) = service(&[], ok_runner(0));
        let infos = svc.list_archetypes().unwrap();

        let backend = infos
            .iter()
            .find(|i| i.archetype == Archetype::Backend)
            .unwrap();
        assert_eq!(
            backend.ai_files,
            ["internal/ai/service.go", "internal/ai/handler.go"]
        );
        let frontend = infos
            .iter()
            .find(|i| i.archetype == Archetype::Frontend)
            .unwrap();
        assert!(frontend.ai_files.is_empty());
        let hybrid = infos.iter().find(|i| i.archetype == Archetype::Hybrid).unwrap();
        assert_eq!(hybrid.ai_files, ["api/internal/ai/service.go", "api/internal/ai/handler.go"]);
    }

    #[test]
    fn catalog_defect_surfaces_before_any_write() {
        let mut catalog = MockTemplateCatalog::new();
        catalog.expect_resolve().returning(|_, _| {
            Ok(TemplateSet::builder()
                .entry("README.md", "{{ author }}")
                .build()?)
        });
        let mut fs = crate::application::ports::MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let svc = GenerationService::new(Box::new(catalog), Box::new(fs), Box::new(ok_runner(0)));
        let err = svc
            .generate(&GenerationRequest::new("acme"), Path::new("/out"))
            .unwrap_err();

        assert!(matches!(
            err,
            GenesisError::Domain(DomainError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn broken_web_half_still_reports_the_frontend_hook() {
        let (svc, _files) = service(&["/out/acme/web/src"], ok_runner(0));

        let report = svc
            .generate(&GenerationRequest::new("acme").archetype("hybrid"), Path::new("/out"))
            .unwrap();

        assert!(!report.success());
        assert_eq!(report.hooks.len(), 1);
        assert!(report.hooks[0].skipped);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].command, "bun install");
        assert!(report.summary().contains("skipped: web/ is incomplete"));
    }
}
