//! Hybrid orchestrator - composes a frontend and a backend under one root.
//!
//! ```text
//! Init ─▶ RootWritten ─▶ FrontendSpawned ─▶ BackendSpawned ─▶ Reconciled ─▶ Done
//!   │          │                                                   │
//!   └──────────┴──────────────────── Failed(step, cause) ◀─────────┘
//! ```
//!
//! Root preparation and reconciliation are fatal. A failing half is
//! recorded as [`ApplicationError::SubSpawn`] and the sibling still runs;
//! the failed half still gets a reconciled env file.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, HookCommand, TemplateCatalog},
        services::{
            materializer::Materializer,
            provision::{HookOutcome, PostProvisionHook},
            reconcile::Reconciler,
            spawner::ArchetypeSpawner,
        },
    },
    domain::{Archetype, FeatureFlags, ProjectName, RenderContext, SharedIdentity, SubProject},
    error::GenesisError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HybridState {
    Init,
    RootWritten,
    FrontendSpawned,
    BackendSpawned,
    Reconciled,
    Done,
    Failed { step: &'static str, cause: String },
}

impl HybridState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::RootWritten => "root-written",
            Self::FrontendSpawned => "frontend-spawned",
            Self::BackendSpawned => "backend-spawned",
            Self::Reconciled => "reconciled",
            Self::Done => "done",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

impl fmt::Display for HybridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { step, cause } => write!(f, "failed at {step}: {cause}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Everything a hybrid run produced, however far it got.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridOutcome {
    pub root: PathBuf,
    pub history: Vec<HybridState>,
    pub written: Vec<PathBuf>,
    pub errors: Vec<ApplicationError>,
    pub hooks: Vec<HookOutcome>,
}

impl HybridOutcome {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            history: vec![HybridState::Init],
            written: Vec::new(),
            errors: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn state(&self) -> &HybridState {
        self.history.last().unwrap_or(&HybridState::Init)
    }

    pub fn is_done(&self) -> bool {
        *self.state() == HybridState::Done
    }

    fn advance(&mut self, next: HybridState) {
        info!(state = next.label(), "hybrid state");
        self.history.push(next);
    }

    fn fail(mut self, step: &'static str, error: ApplicationError) -> Self {
        warn!(step, %error, "hybrid generation halted");
        self.history.push(HybridState::Failed {
            step,
            cause: error.to_string(),
        });
        self.errors.push(error);
        self
    }

    fn failed_halves(&self) -> impl Iterator<Item = SubProject> + '_ {
        self.errors.iter().filter_map(|e| match e {
            ApplicationError::SubSpawn { sub_project, .. } => Some(*sub_project),
            _ => None,
        })
    }
}

pub struct HybridOrchestrator<'a> {
    catalog: &'a dyn TemplateCatalog,
    filesystem: &'a dyn Filesystem,
    frontend_hook: Option<(PostProvisionHook<'a>, HookCommand)>,
}

impl<'a> HybridOrchestrator<'a> {
    pub fn new(catalog: &'a dyn TemplateCatalog, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            catalog,
            filesystem,
            frontend_hook: None,
        }
    }

    /// Run `command` in `root/web` once reconciliation is done.
    pub fn with_frontend_hook(mut self, hook: PostProvisionHook<'a>, command: HookCommand) -> Self {
        self.frontend_hook = Some((hook, command));
        self
    }

    #[instrument(skip_all, fields(project = %name, root = %root.display(), %flags))]
    pub fn spawn_hybrid(
        &self,
        root: &Path,
        name: &ProjectName,
        flags: FeatureFlags,
    ) -> HybridOutcome {
        let mut outcome = HybridOutcome::new(root);

        // 1-2. root directory and composition files
        if let Err(e) = self.write_root(root, name, flags, &mut outcome) {
            return outcome.fail(HybridState::RootWritten.label(), e);
        }
        outcome.advance(HybridState::RootWritten);

        // 3. web/ never carries the AI module
        let frontend = ArchetypeSpawner::frontend(self.catalog, self.filesystem);
        self.spawn_half(frontend, SubProject::Web, root, name, FeatureFlags::new(), &mut outcome);
        outcome.advance(HybridState::FrontendSpawned);

        // 4. api/ gets the caller's flags
        let backend = ArchetypeSpawner::backend(self.catalog, self.filesystem);
        self.spawn_half(backend, SubProject::Api, root, name, flags, &mut outcome);
        outcome.advance(HybridState::BackendSpawned);

        // 5. converge on one database
        let identity = SharedIdentity::derive(name);
        match Reconciler::new(self.filesystem).reconcile(root, &identity) {
            Ok(paths) => {
                for path in paths {
                    if !outcome.written.contains(&path) {
                        outcome.written.push(path);
                    }
                }
            }
            Err(e) => return outcome.fail(HybridState::Reconciled.label(), e),
        }
        outcome.advance(HybridState::Reconciled);

        // 6. best-effort install in web/
        if let Some((hook, command)) = &self.frontend_hook {
            let cwd = root.join(SubProject::Web.dir_name());
            let ran = if outcome.failed_halves().any(|s| s == SubProject::Web) {
                HookOutcome::skipped(command, &cwd, "web/ is incomplete")
            } else {
                hook.run(&cwd, command)
            };
            outcome.hooks.push(ran);
        }

        outcome.advance(HybridState::Done);
        outcome
    }

    fn write_root(
        &self,
        root: &Path,
        name: &ProjectName,
        flags: FeatureFlags,
        outcome: &mut HybridOutcome,
    ) -> Result<(), ApplicationError> {
        let step = |e: GenesisError| ApplicationError::Hybrid {
            step: HybridState::RootWritten.label(),
            reason: e.to_string(),
        };

        self.filesystem.create_dir_all(root).map_err(step)?;

        let set = self.catalog.resolve(Archetype::Hybrid, flags).map_err(step)?;
        let context = RenderContext::new(name.clone(), flags);
        let written = Materializer::new(self.filesystem)
            .materialize(root, &set, &context)
            .into_result()
            .map_err(step)?;

        outcome.written.extend(written);
        Ok(())
    }

    fn spawn_half(
        &self,
        spawner: ArchetypeSpawner<'_>,
        sub: SubProject,
        root: &Path,
        name: &ProjectName,
        flags: FeatureFlags,
        outcome: &mut HybridOutcome,
    ) {
        let dir = root.join(sub.dir_name());
        let failure = match spawner.within(sub).spawn(&dir, name, flags) {
            Ok(spawned) => {
                let (written, failures) = spawned.report.into_parts();
                outcome.written.extend(written);
                failures.into_iter().next().map(|e| e.to_string())
            }
            Err(e) => Some(e.to_string()),
        };

        if let Some(reason) = failure {
            warn!(sub_project = %sub, %reason, "sub-project failed, continuing");
            outcome.errors.push(ApplicationError::SubSpawn {
                sub_project: sub,
                reason,
            });
        }
    }
}
