//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `GENESIS_<SECTION>__<KEY>`, e.g.
//!    `GENESIS_HOOKS__ENABLED=false`
//! 3. Config file: `--config FILE`, else [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use genesis_core::{
    application::{HookPlan, ports::HookCommand},
    domain::Archetype,
};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when `genesis new` is given no override.
    pub defaults: Defaults,
    /// Post-provision commands.
    pub hooks: HooksConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub archetype: String,
    pub ai: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    pub enabled: bool,
    /// Run in the frontend root (`web/` for hybrid). Empty disables it.
    pub frontend_install: String,
    /// Run in a standalone backend root. Empty disables it.
    pub backend_init: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            archetype: Archetype::default().to_string(),
            ai: false,
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frontend_install: "bun install".into(),
            backend_init: "go mod tidy".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// With `must_exist`, an explicit `config_file` that is missing is an
    /// error. The default location is always optional.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), must_exist),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("GENESIS"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "loading configuration");

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.genesis.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "genesis", "genesis")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".genesis.toml"))
    }

    /// Hook commands for the generation service. Commands are kept when
    /// hooks are disabled so they can still be suggested to the user.
    pub fn hook_plan(&self) -> HookPlan {
        HookPlan {
            enabled: self.hooks.enabled,
            frontend: HookCommand::parse(&self.hooks.frontend_install),
            backend: HookCommand::parse(&self.hooks.backend_init),
        }
    }

    /// Look up a dotted key, e.g. `hooks.enabled`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.archetype" => self.defaults.archetype.clone(),
            "defaults.ai" => self.defaults.ai.to_string(),
            "hooks.enabled" => self.hooks.enabled.to_string(),
            "hooks.frontend_install" => self.hooks.frontend_install.clone(),
            "hooks.backend_init" => self.hooks.backend_init.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub const KEYS: [&'static str; 7] = [
        "defaults.archetype",
        "defaults.ai",
        "hooks.enabled",
        "hooks.frontend_install",
        "hooks.backend_init",
        "output.no_color",
        "output.format",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix("GENESIS").source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("GENESIS").source(Some(map))
    }

    #[test]
    fn defaults_match_built_in_hooks() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.archetype, "frontend");
        assert_eq!(cfg.hook_plan(), HookPlan::default());
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&tmp.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&tmp.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[defaults]\narchetype = \"backend\"\n").unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.defaults.archetype, "backend");
        assert!(!cfg.defaults.ai);
        assert!(cfg.hooks.enabled);
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[hooks]\nenabled = true\n").unwrap();

        let cfg = AppConfig::load_from(
            &path,
            true,
            env(&[("GENESIS_HOOKS__ENABLED", "false"), ("GENESIS_DEFAULTS__AI", "true")]),
        )
        .unwrap();
        assert!(!cfg.hooks.enabled);
        assert!(cfg.defaults.ai);
        assert_eq!(cfg.hook_plan(), HookPlan::disabled());
    }

    #[test]
    fn blank_hook_command_disables_that_hook() {
        let mut cfg = AppConfig::default();
        cfg.hooks.backend_init = "  ".into();
        let plan = cfg.hook_plan();
        assert!(plan.command_for(Archetype::Backend).is_none());
        assert!(plan.command_for(Archetype::Frontend).is_some());
    }

    #[test]
    fn every_key_resolves() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert_eq!(cfg.get("hooks.backend_init").as_deref(), Some("go mod tidy"));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
