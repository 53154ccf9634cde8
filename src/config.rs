use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logic::urls;

/// Settings read from `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// API base, absolute or relative to `server_url`
    pub base_url: Option<String>,

    /// Origin a relative API base and relative image URLs are joined onto
    pub server_url: String,

    /// Where downloads are written
    pub download_dir: Option<PathBuf>,

    pub image_preview_enabled: bool,

    /// auto, kitty, sixel, iterm2 or halfblocks
    pub image_protocol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            server_url: urls::DEFAULT_SERVER_URL.to_string(),
            download_dir: None,
            image_preview_enabled: true,
            image_protocol: "auto".to_string(),
        }
    }
}

impl Config {
    /// Load from the resolved config path, or defaults when there is none
    pub fn load(cli_path: Option<&str>) -> Result<Self> {
        match get_config_path(cli_path)? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&config_str)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Absolute API base after CLI and environment overrides
    pub fn api_base_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        let base = urls::select_api_base(cli, env, self.base_url.as_deref());
        urls::resolve_against(&self.server_url, &base)
    }

    /// Download directory: CLI flag, config, the user's download dir, else `.`
    pub fn download_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.download_dir.clone())
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Determine the config file path with fallback logic.
///
/// An explicit `--config` path must exist. Otherwise the platform config dir
/// and then `./config.yaml` are tried; finding neither is not an error.
pub fn get_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/qrtui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("qrtui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}
