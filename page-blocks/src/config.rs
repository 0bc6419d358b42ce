//! Site configuration
//!
//! Loaded from a TOML file. Every section and field has a default, so an
//! empty file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Locale;

/// Longest two-factor grace period a site may configure, in days
pub const MAX_GRACE_PERIOD_DAYS: u32 = 3650;

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.grace_period_days == 0 {
            return Err(ConfigError::Validation(
                "security.grace_period_days must be at least 1".into(),
            ));
        }
        if self.security.grace_period_days > MAX_GRACE_PERIOD_DAYS {
            return Err(ConfigError::Validation(format!(
                "security.grace_period_days ({}) exceeds the maximum of {}",
                self.security.grace_period_days, MAX_GRACE_PERIOD_DAYS
            )));
        }
        if self.security.warning_days > self.security.grace_period_days {
            return Err(ConfigError::Validation(format!(
                "security.warning_days ({}) exceeds grace_period_days ({})",
                self.security.warning_days, self.security.grace_period_days
            )));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        Ok(())
    }
}

/// `[site]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Language for admin labels
    #[serde(default)]
    pub default_locale: Locale,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            default_locale: Locale::default(),
        }
    }
}

fn default_site_name() -> String {
    "Utbildningar".to_string()
}

/// `[render]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit `data-block-id`/`data-block-type` attributes (used by the admin preview)
    #[serde(default = "default_true")]
    pub include_block_ids: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            include_block_ids: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// `[security]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Days a new account may sign in without two-factor authentication
    #[serde(default = "default_grace_period_days")]
    pub grace_period_days: u32,

    /// Days before the deadline when the account is warned
    #[serde(default = "default_warning_days")]
    pub warning_days: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            grace_period_days: default_grace_period_days(),
            warning_days: default_warning_days(),
        }
    }
}

const fn default_grace_period_days() -> u32 {
    14
}

const fn default_warning_days() -> u32 {
    3
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Validation error.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}
