//! Application paths
//!
//! Settings and logs live under the platform config/data directories unless
//! overridden by `--config-dir` or the `QUICKCONV_CONFIG_DIR` environment
//! variable. A `quickconv.json` in the current directory switches the app to
//! portable mode, keeping everything local.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Override for the default application directories.
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI flag, then QUICKCONV_CONFIG_DIR, then platform defaults.
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir =
            cli_dir.or_else(|| std::env::var("QUICKCONV_CONFIG_DIR").ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Path to a configuration file (settings, window state).
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    config_dir(config).join(name)
}

/// Path to a data file (logs).
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    data_dir(config).join(name)
}

/// Create the config and data directories when missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = config_dir(config);
    let data_dir = data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("failed to create config dir {}", config_dir.display()))?;
    }
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;
    }
    Ok(())
}

fn portable_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    if cwd.join("quickconv.json").exists() {
        Some(cwd)
    } else {
        None
    }
}

fn config_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Some(dir) = portable_dir() {
        return dir;
    }
    dirs_next::config_dir()
        .map(|d| d.join("quickconv"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Some(dir) = portable_dir() {
        return dir;
    }
    dirs_next::data_dir()
        .map(|d| d.join("quickconv"))
        .unwrap_or_else(|| PathBuf::from("."))
}
