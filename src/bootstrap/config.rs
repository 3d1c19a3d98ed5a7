//! # Configuration loader
//!
//! Reads the TOML file and maps it onto [`WizardConfig`]. Storage paths the
//! file leaves empty are filled from the platform data directory.

use anyhow::Context;
use std::path::{Path, PathBuf};
use sw_core::config::WizardConfig;

pub const APP_DIR_NAME: &str = "stepwise";
pub const CONFIG_ENV_VAR: &str = "STEPWISE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "stepwise.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A value cannot be mapped (unknown progress policy, malformed `[[steps]]`)
pub fn load_config(config_path: &Path) -> anyhow::Result<WizardConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    WizardConfig::from_toml(&toml_value)
}

/// Config path from `STEPWISE_CONFIG`, the first CLI argument, or
/// `stepwise.toml` in the working directory, in that order.
pub fn resolve_config_path(cli_arg: Option<String>) -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .or(cli_arg)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Per-user data directory for drafts and logs.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

/// Load the file and fill empty storage paths.
pub fn load_with_defaults(config_path: &Path) -> anyhow::Result<WizardConfig> {
    Ok(load_config(config_path)?.with_system_defaults(default_data_dir()))
}
