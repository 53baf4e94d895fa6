use crate::domain::{
    entities::{RenderContext, TemplateSet},
    error::{DomainError, RenderError},
    value_objects::ProjectName,
};

/// Centralized domain validation.
///
/// Checks that need more than one type in view live here rather than on the
/// entities themselves.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_name(raw: &str) -> Result<ProjectName, DomainError> {
        ProjectName::parse(raw)
    }

    /// Every condition must test a declared flag and every variable must be
    /// one a [`RenderContext`] provides, so rendering can only fail on I/O.
    ///
    /// Variables are checked by rendering each body under every flag
    /// combination; tera fails on the first undefined name it evaluates.
    pub fn validate_template_set(set: &TemplateSet) -> Result<(), DomainError> {
        let name = ProjectName::parse("genesis")?;
        let contexts = RenderContext::flag_combinations(&name);

        for entry in set {
            let malformed = |source| DomainError::MalformedTemplate {
                path: entry.destination().to_string(),
                source,
            };

            if let Some(flag) = entry
                .condition_names()
                .into_iter()
                .find(|f| !RenderContext::FLAGS.contains(f))
            {
                return Err(malformed(RenderError::UnknownFlag { name: flag.into() }));
            }
            for context in &contexts {
                entry.render(context).map_err(malformed)?;
            }
        }
        Ok(())
    }
}
