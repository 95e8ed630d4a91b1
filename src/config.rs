//! Configuration file support
//!
//! Reads `dashboard.toml` from the working directory or any parent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Dashboard settings. Every field has a default, so an empty or partial
/// file is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Launch records file (.csv, .json or .parquet)
    pub data_path: PathBuf,

    /// Interface the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Step of the payload range slider, in kg
    pub payload_step: f64,

    /// Page heading
    pub heading: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            host: "127.0.0.1".to_string(),
            port: 8050,
            payload_step: 1000.0,
            heading: "SpaceX Launch Records Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load config from the nearest `dashboard.toml`.
    /// Returns the default config if there is none or it cannot be parsed.
    pub fn load() -> Self {
        let Some(path) = Self::find_config_path() else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Parse a config file. A relative `data_path` is resolved against the
    /// file's directory.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path).context("reading config file")?;
        let mut config: Self = toml::from_str(&contents).context("parsing config file")?;
        if config.data_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_path = dir.join(&config.data_path);
            }
        }
        Ok(config)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Find dashboard.toml by walking up the directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }
}
