//! Persistent defaults loaded from a TOML file.
//!
//! ```toml
//! profile = "prod"
//! region = "eu-west-1"
//! backend = "sdk"
//! aws_cli = "/usr/local/bin/aws"
//! ```
//!
//! The file lives at `<config dir>/config.toml` unless `--config` names
//! another one. Command line flags always win over file values.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const APP_NAME: &str = "aws-log-processor";

/// Which implementation runs the `filter-log-events` queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Shell out to the AWS CLI
    #[default]
    Cli,
    /// Call the CloudWatch Logs API through the AWS SDK
    Sdk,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cli => write!(f, "cli"),
            Backend::Sdk => write!(f, "sdk"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cli" => Ok(Backend::Cli),
            "sdk" => Ok(Backend::Sdk),
            other => Err(format!("unknown backend '{}', expected 'cli' or 'sdk'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub backend: Option<Backend>,
    pub aws_cli: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location for this platform
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load settings from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Load an explicitly requested file, or the default file when present.
    /// A missing default file yields empty settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::load_from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }
}
