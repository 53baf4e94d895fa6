pub mod common;
pub mod connection;
pub mod env_file;
pub mod render_context;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use connection::{ConnectionString, SharedIdentity};
pub use env_file::EnvFile;
pub use render_context::RenderContext;
pub use template::{TemplateEntry, TemplateSet, TemplateSetBuilder, TemplateSource};
