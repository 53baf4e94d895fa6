//! Archetype spawner - one standalone archetype into one directory.
//!
//! Resolve the template set, build the render context, materialize. The
//! spawner never runs post-provision hooks; its callers decide that.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateCatalog},
        services::materializer::{MaterializeReport, Materializer},
    },
    domain::{Archetype, DomainError, FeatureFlags, ProjectName, RenderContext, SubProject},
    error::GenesisResult,
};

/// Result of a spawn that got as far as touching the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnOutcome {
    pub archetype: Archetype,
    pub root: PathBuf,
    pub report: MaterializeReport,
}

impl SpawnOutcome {
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }

    pub fn first_failure(&self) -> Option<&ApplicationError> {
        self.report.failures().first()
    }
}

pub struct ArchetypeSpawner<'a> {
    archetype: Archetype,
    catalog: &'a dyn TemplateCatalog,
    filesystem: &'a dyn Filesystem,
    sub_project: Option<SubProject>,
}

impl<'a> ArchetypeSpawner<'a> {
    /// Spawner for a standalone archetype. `Hybrid` is a composition, not
    /// a spawnable archetype.
    pub fn new(
        archetype: Archetype,
        catalog: &'a dyn TemplateCatalog,
        filesystem: &'a dyn Filesystem,
    ) -> GenesisResult<Self> {
        if archetype.is_composite() {
            return Err(DomainError::NotSpawnable {
                archetype: archetype.to_string(),
            }
            .into());
        }
        Ok(Self {
            archetype,
            catalog,
            filesystem,
            sub_project: None,
        })
    }

    pub fn frontend(catalog: &'a dyn TemplateCatalog, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            archetype: Archetype::Frontend,
            catalog,
            filesystem,
            sub_project: None,
        }
    }

    pub fn backend(catalog: &'a dyn TemplateCatalog, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            archetype: Archetype::Backend,
            catalog,
            filesystem,
            sub_project: None,
        }
    }

    /// Mark this run as one half of a hybrid.
    pub fn within(mut self, sub_project: SubProject) -> Self {
        self.sub_project = Some(sub_project);
        self
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Fails only before any write (catalog resolution). Write failures are
    /// reported through [`SpawnOutcome::report`].
    #[instrument(
        skip_all,
        fields(
            archetype = %self.archetype,
            project = %name,
            root = %root.display(),
            sub_project = ?self.sub_project,
        )
    )]
    pub fn spawn(
        &self,
        root: &Path,
        name: &ProjectName,
        flags: FeatureFlags,
    ) -> GenesisResult<SpawnOutcome> {
        let set = self.catalog.resolve(self.archetype, flags)?;
        info!(templates = set.len(), %flags, "template set resolved");

        let mut context = RenderContext::new(name.clone(), flags);
        if let Some(sub) = self.sub_project {
            context = context.within(sub);
        }

        let report = Materializer::new(self.filesystem).materialize(root, &set, &context);
        info!(
            written = report.written().len(),
            failed = report.failures().len(),
            "spawn finished"
        );

        Ok(SpawnOutcome {
            archetype: self.archetype,
            root: root.to_path_buf(),
            report,
        })
    }
}
