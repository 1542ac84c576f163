//! Settings for textlens.
//!
//! Settings come from three layers, later ones winning:
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`, `./textlens.toml`, or
//!    `<config dir>/textlens/config.toml`)
//! 3. Environment variables (a `.env` file is loaded into the environment
//!    by `main` before this runs)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analytics::AnalyticsConfig;
use crate::extract::FetchConfig;
use crate::llm::LlmConfig;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "textlens.toml";

/// Default address of the web UI.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required secrets are absent.
    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Web UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Largest accepted upload in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_max_upload_mb() -> usize {
    200
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the first config file found, then the environment.
    ///
    /// An explicit path must exist; discovered paths are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match discover_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        Ok(settings.with_env_overrides())
    }

    /// Parse a TOML settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded settings from {}", path.display());
        settings.source_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Apply overrides from a variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.analytics = self.analytics.with_overrides_from(&lookup);
        self.llm = self.llm.with_overrides_from(&lookup);
        self.fetch = self.fetch.with_overrides_from(&lookup);
        if let Some(bind) = lookup("TEXTLENS_BIND") {
            self.server.bind = bind;
        }
        self
    }

    /// Names of required secrets that are not set.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.analytics.endpoint) {
            missing.push("AZURE_ENDPOINT");
        }
        if is_blank(&self.analytics.key) {
            missing.push("AZURE_LANGUAGE_KEY");
        }
        if is_blank(&self.llm.api_key) {
            missing.push(self.llm.provider.key_var());
        }
        missing
    }

    /// Fail unless every required secret is present.
    pub fn require_secrets(&self) -> Result<(), ConfigError> {
        let missing = self.missing_secrets();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    /// TOML rendering with secrets masked.
    pub fn to_masked_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        shown.analytics.key = shown.analytics.key.as_deref().map(mask_secret);
        shown.llm.api_key = shown.llm.api_key.as_deref().map(mask_secret);
        toml::to_string_pretty(&shown)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// First config file that exists, in lookup order.
fn discover_config_file() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|p| p.is_file())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("textlens").join("config.toml"));
    }
    paths
}

/// Keep the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
