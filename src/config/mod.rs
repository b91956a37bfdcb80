//! Configuration management for orgeval

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default API host when neither config nor flags provide one
pub const DEFAULT_API_HOST: &str = "http://localhost:8080";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the survey backend (e.g. `https://survey.example.com`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Default evaluation period for `assign`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Deepest level the descendant collector will descend to
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of descendants collected for a single node
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Client-side request rate against the survey backend
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_max_depth() -> usize {
    32
}

fn default_max_nodes() -> usize {
    10_000
}

fn default_requests_per_second() -> u32 {
    20
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".orgeval").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// API host to use, honoring an explicit override first
    pub fn api_host_or<'a>(&'a self, host_override: Option<&'a str>) -> &'a str {
        host_override
            .or(self.api_host.as_deref())
            .unwrap_or(DEFAULT_API_HOST)
    }

    /// Evaluation period to assign, honoring an explicit override first
    pub fn require_period_id<'a>(&'a self, period_override: Option<&'a str>) -> Result<&'a str> {
        period_override
            .or(self.period_id.as_deref())
            .ok_or_else(|| ConfigError::MissingPeriodId.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: None,
            period_id: None,
            preferences: Preferences::default(),
        }
    }
}
