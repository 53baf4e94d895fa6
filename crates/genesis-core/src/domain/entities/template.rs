//! Template sets: the ordered, immutable list of files an archetype writes.
//!
//! A [`TemplateSet`] is produced by a catalog for one `(archetype, flags)`
//! pair. Construction goes through [`TemplateSetBuilder`], which checks every
//! destination and compiles every body with `tera`, so a set that exists is a
//! set whose bodies parse:
//!
//! ```text
//! builder ──entry(dest, body)──▶ build()
//!                                  ├─ RelativePath::try_new(dest)   (no abs, no ..)
//!                                  ├─ duplicate destination check
//!                                  └─ Tera::add_raw_template(dest, body)
//! ```
//!
//! Entry order is preserved; the materializer writes in that order.

use std::collections::{BTreeSet, HashSet};
use std::error::Error as _;
use std::fmt;
use std::sync::Arc;

use tera::Tera;

use crate::domain::{
    entities::{common::RelativePath, render_context::RenderContext},
    error::{DomainError, RenderError},
};

// ============================================================================
// Template Source
// ============================================================================

/// Raw body of a template: either compiled into the binary or loaded at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compile-time string (e.g. `include_str!("templates/go.mod.tmpl")`)
    Static(&'static str),

    /// Runtime-owned string
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

// ============================================================================
// Template Entry
// ============================================================================

/// One destination path paired with its compiled body.
///
/// The compiled form is a single-template [`Tera`] registered under the
/// destination path. Autoescaping is off: bodies are source code, not HTML.
#[derive(Clone)]
pub struct TemplateEntry {
    destination: RelativePath,
    source: TemplateSource,
    engine: Arc<Tera>,
}

impl TemplateEntry {
    pub fn new(destination: RelativePath, source: TemplateSource) -> Result<Self, DomainError> {
        let mut engine = Tera::default();
        engine.autoescape_on(Vec::new());
        engine
            .add_raw_template(&destination.to_string(), source.as_str())
            .map_err(|e| DomainError::MalformedTemplate {
                path: destination.to_string(),
                source: RenderError::Syntax {
                    reason: error_chain(&e),
                },
            })?;

        Ok(Self {
            destination,
            source,
            engine: Arc::new(engine),
        })
    }

    pub fn destination(&self) -> &RelativePath {
        &self.destination
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Render against `context`. Pure: the compiled body is shared, never mutated.
    pub fn render(&self, context: &RenderContext) -> Result<String, RenderError> {
        self.engine
            .render(&self.destination.to_string(), &context.to_tera())
            .map_err(|e| classify(&e))
    }

    /// Names tested by `{% if %}` / `{% elif %}` conditions.
    ///
    /// Tera treats an unknown name in a condition as false, so the validator
    /// uses this to keep conditions limited to declared flags.
    pub fn condition_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{%") {
            let tail = &rest[start + 2..];
            let Some(end) = tail.find("%}") else { break };
            let tag = tail[..end].trim_matches(|c: char| c == '-' || c.is_whitespace());

            if let Some(expr) = tag
                .strip_prefix("if ")
                .or_else(|| tag.strip_prefix("elif "))
            {
                names.extend(
                    expr.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                        .filter(|w| !w.is_empty() && !matches!(*w, "not" | "and" | "or")),
                );
            }
            rest = &tail[end + 2..];
        }

        names
    }
}

impl fmt::Debug for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEntry")
            .field("destination", &self.destination)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TemplateEntry {
    fn eq(&self, other: &Self) -> bool {
        self.destination == other.destination && self.source == other.source
    }
}

impl Eq for TemplateEntry {}

/// Flatten a tera error and its causes into one line.
fn error_chain(err: &tera::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(e) = cause {
        parts.push(e.to_string());
        cause = e.source();
    }
    parts.join(": ")
}

fn classify(err: &tera::Error) -> RenderError {
    let reason = error_chain(err);
    match undefined_variable(&reason) {
        Some(name) => RenderError::UndefinedVariable { name },
        None => RenderError::Engine { reason },
    }
}

/// Pull `x` out of tera's "Variable `x` not found in context ..." message.
fn undefined_variable(reason: &str) -> Option<String> {
    let (_, tail) = reason.split_once("Variable `")?;
    let (name, rest) = tail.split_once('`')?;
    rest.trim_start()
        .starts_with("not found in context")
        .then(|| name.to_string())
}

// ============================================================================
// Template Set
// ============================================================================

/// Immutable, ordered collection of [`TemplateEntry`] with unique destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    entries: Vec<TemplateEntry>,
}

impl TemplateSet {
    pub fn builder() -> TemplateSetBuilder {
        TemplateSetBuilder::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, destination: &str) -> Option<&TemplateEntry> {
        self.entries
            .iter()
            .find(|e| e.destination.to_string() == destination)
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.get(destination).is_some()
    }

    /// Destinations in write order.
    pub fn destinations(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.destination.to_string())
            .collect()
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} templates", self.entries.len())
    }
}

/// Accumulates `(destination, body)` pairs; validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct TemplateSetBuilder {
    pending: Vec<(String, TemplateSource)>,
}

impl TemplateSetBuilder {
    pub fn entry(mut self, destination: impl Into<String>, body: impl Into<TemplateSource>) -> Self {
        self.pending.push((destination.into(), body.into()));
        self
    }

    /// Add `entry` only when `condition` holds. Keeps flag-gated files
    /// readable at the call site.
    pub fn entry_if(
        self,
        condition: bool,
        destination: impl Into<String>,
        body: impl Into<TemplateSource>,
    ) -> Self {
        if condition {
            self.entry(destination, body)
        } else {
            self
        }
    }

    pub fn build(self) -> Result<TemplateSet, DomainError> {
        let mut seen = HashSet::with_capacity(self.pending.len());
        let mut entries = Vec::with_capacity(self.pending.len());

        for (destination, body) in self.pending {
            let destination = RelativePath::try_new(destination)?;
            if !seen.insert(destination.clone()) {
                return Err(DomainError::DuplicateDestination {
                    path: destination.to_string(),
                });
            }
            entries.push(TemplateEntry::new(destination, body)?);
        }

        Ok(TemplateSet { entries })
    }
}
