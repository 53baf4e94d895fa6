//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "genesis",
    bin_name = "genesis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Opinionated project scaffolding",
    long_about = "Genesis lays down a ready-to-run project tree: a Next.js frontend, \
                  a Go backend, or a hybrid of both sharing one Postgres database.",
    after_help = "EXAMPLES:\n\
        \x20 genesis new shop\n\
        \x20 genesis new billing --type backend --ai\n\
        \x20 genesis new acme    --type hybrid --ai --yes\n\
        \x20 genesis list --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "ARCHETYPES:\n\
            \x20 frontend (web, t3)     Next.js + Drizzle + Better Auth\n\
            \x20 backend  (api, go)     Go HTTP service + sqlc\n\
            \x20 hybrid   (twin)        web/ and api/ sharing one database\n\n\
            EXAMPLES:\n\
            \x20 genesis new shop\n\
            \x20 genesis new billing --type backend --ai\n\
            \x20 genesis new acme --type hybrid --dry-run"
    )]
    New(NewArgs),

    /// List the archetypes and the files each one writes.
    #[command(visible_alias = "ls", about = "List available archetypes")]
    List(ListArgs),

    /// Write the default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 genesis init\n\
            \x20 genesis init --force\n\
            \x20 genesis --config ./genesis.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 genesis completions bash > ~/.local/share/bash-completion/completions/genesis\n\
            \x20 genesis completions zsh  > ~/.zfunc/_genesis\n\
            \x20 genesis completions fish > ~/.config/fish/completions/genesis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 genesis config get defaults.archetype\n\
            \x20 genesis config list\n\
            \x20 genesis config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `genesis new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. The tree is created at `./<NAME>`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Archetype. Left as free text so unknown values get a proper
    /// diagnostic instead of a clap parse error.
    #[arg(
        short = 't',
        long = "type",
        value_name = "ARCHETYPE",
        help = "frontend | backend | hybrid (default from config, else frontend)"
    )]
    pub kind: Option<String>,

    /// Enable the AI module (backend and the api/ half of hybrid).
    #[arg(long = "ai", help = "Include the AI module")]
    pub ai: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Do not run `bun install` / `go mod tidy` afterwards.
    #[arg(long = "no-hooks", help = "Skip post-provision commands")]
    pub no_hooks: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `genesis list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Archetypes with their files.
    Table,
    /// One archetype per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `genesis init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `genesis completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `genesis config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `hooks.enabled`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["genesis", "new", "acme", "--type", "hybrid", "--ai", "-y"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "acme");
        assert_eq!(args.kind.as_deref(), Some("hybrid"));
        assert!(args.ai && args.yes);
        assert!(!args.dry_run && !args.no_hooks);
    }

    #[test]
    fn unknown_type_reaches_the_handler() {
        let cli = Cli::try_parse_from(["genesis", "new", "acme", "-t", "quantum"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::New(NewArgs { kind: Some(ref k), .. }) if k == "quantum"
        ));
    }

    #[test]
    fn new_requires_a_name() {
        assert!(Cli::try_parse_from(["genesis", "new"]).is_err());
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::parse_from(["genesis", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["genesis", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["genesis", "list", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }
}
