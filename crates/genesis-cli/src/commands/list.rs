//! Implementation of the `genesis list` command.

use serde::Serialize;

use genesis_adapters::{BuiltinCatalog, LocalFilesystem, NoopHookRunner};
use genesis_core::application::{ArchetypeInfo, GenerationService};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ArchetypeView<'a> {
    name: &'a str,
    description: &'a str,
    run: &'a str,
    files: &'a [String],
    ai_files: &'a [String],
}

impl<'a> From<&'a ArchetypeInfo> for ArchetypeView<'a> {
    fn from(info: &'a ArchetypeInfo) -> Self {
        Self {
            name: info.archetype.as_str(),
            description: info.description,
            run: info.run_command,
            files: &info.files,
            ai_files: &info.ai_files,
        }
    }
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let service = GenerationService::new(
        Box::new(BuiltinCatalog::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(NoopHookRunner),
    );
    let archetypes = service.list_archetypes()?;

    // `--output-format json` implies JSON regardless of `--format`.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Archetypes:")?;
            for info in &archetypes {
                output.print("")?;
                output.print(&format!(
                    "  {:<9} {} (run: {})",
                    info.archetype.as_str(),
                    info.description,
                    info.run_command
                ))?;
                for file in &info.files {
                    output.detail(&format!("      {file}"))?;
                }
                for file in &info.ai_files {
                    output.detail(&format!("      {file}  [--ai]"))?;
                }
            }
        }

        ListFormat::List => {
            for info in &archetypes {
                output.print(info.archetype.as_str())?;
            }
        }

        // JSON bypasses quiet mode so pipes always get a parseable document.
        ListFormat::Json => {
            let views: Vec<ArchetypeView<'_>> = archetypes.iter().map(Into::into).collect();
            output.json(&views)?;
        }
    }

    Ok(())
}
