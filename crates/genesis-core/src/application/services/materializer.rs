//! Materializer - writes a rendered template set under a root directory.
//!
//! Each entry is independent: parents are created, the body is rendered and
//! the file is written (truncating). A failing entry is recorded and the
//! rest are still attempted. Nothing is ever deleted.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{RenderContext, TemplateEntry, TemplateSet},
    error::{GenesisError, GenesisResult},
};

/// Outcome of one materialization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializeReport {
    written: Vec<PathBuf>,
    failures: Vec<ApplicationError>,
}

impl MaterializeReport {
    /// Files written, in template order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn failures(&self) -> &[ApplicationError] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The written files, or the first failure if there was one.
    pub fn into_result(self) -> GenesisResult<Vec<PathBuf>> {
        match self.failures.into_iter().next() {
            Some(first) => Err(first.into()),
            None => Ok(self.written),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<PathBuf>, Vec<ApplicationError>) {
        (self.written, self.failures)
    }
}

/// Renders and writes template sets through the [`Filesystem`] port.
pub struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> Materializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(root = %root.display(), entries = set.len()))]
    pub fn materialize(
        &self,
        root: &Path,
        set: &TemplateSet,
        context: &RenderContext,
    ) -> MaterializeReport {
        let mut report = MaterializeReport::default();

        for entry in set {
            let path = root.join(entry.destination());
            match self.write_entry(root, &path, entry, context) {
                Ok(()) => {
                    debug!(path = %path.display(), "wrote file");
                    report.written.push(path);
                }
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "failed to write file");
                    report
                        .failures
                        .push(ApplicationError::Materialize { path, reason });
                }
            }
        }

        report
    }

    fn write_entry(
        &self,
        root: &Path,
        path: &Path,
        entry: &TemplateEntry,
        context: &RenderContext,
    ) -> Result<(), String> {
        let parent = match entry.destination().parent() {
            Some(parent) => root.join(parent),
            None => root.to_path_buf(),
        };
        self.filesystem
            .create_dir_all(&parent)
            .map_err(|e| describe(&e))?;

        let content = entry.render(context).map_err(|e| e.to_string())?;

        self.filesystem
            .write_file(path, &content)
            .map_err(|e| describe(&e))
    }
}

/// Strip the outer wrapper so the report does not repeat the path twice.
fn describe(err: &GenesisError) -> String {
    match err {
        GenesisError::Application(
            ApplicationError::Filesystem { reason, .. } | ApplicationError::Materialize { reason, .. },
        ) => reason.clone(),
        other => other.to_string(),
    }
}
