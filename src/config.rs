use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::identifier::validate_token;
use crate::error::{KacError, Result};

const CONFIG_FILE_NAME: &str = "kac.toml";

/// Represents the complete configuration for kac.
///
/// Contains the default CHANGELOG file name, version token settings, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_changelog")]
    pub changelog: String,

    #[serde(default)]
    pub versions: VersionsConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default CHANGELOG file name.
fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_prerelease_token() -> String {
    "rc".to_string()
}

fn default_build_token() -> String {
    "build".to_string()
}

/// Tokens used when offering prerelease and build bumps.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionsConfig {
    #[serde(default = "default_prerelease_token")]
    pub prerelease_token: String,

    #[serde(default = "default_build_token")]
    pub build_token: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        VersionsConfig {
            prerelease_token: default_prerelease_token(),
            build_token: default_build_token(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Bump even when the Unreleased section has no changes
    #[serde(default)]
    pub allow_empty_release: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changelog: default_changelog(),
            versions: VersionsConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Check values that cannot be expressed in the TOML schema
    pub fn validate(&self) -> Result<()> {
        if self.changelog.trim().is_empty() {
            return Err(KacError::config("changelog file name must not be empty"));
        }
        validate_token(&self.versions.prerelease_token)?;
        validate_token(&self.versions.build_token)?;
        Ok(())
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| KacError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `kac.toml` in current directory
/// 3. `kac.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| KacError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
