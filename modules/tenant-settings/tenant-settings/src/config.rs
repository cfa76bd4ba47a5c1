//! Configuration for the tenant settings module.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Tenant settings module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantSettingsConfig {
    /// Maximum length of contact and branding string fields.
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,

    /// Maximum length of a template subject or body.
    #[serde(default = "default_max_template_length")]
    pub max_template_length: usize,

    /// Maximum number of entries in `preferences.followup_schedule`.
    #[serde(default = "default_max_followups")]
    pub max_followups: usize,

    /// Number of compiled templates kept for reuse.
    #[serde(default = "default_template_cache_capacity")]
    pub template_cache_capacity: u64,
}

fn default_max_field_length() -> usize {
    256
}

fn default_max_template_length() -> usize {
    10_000
}

fn default_max_followups() -> usize {
    10
}

fn default_template_cache_capacity() -> u64 {
    1_000
}

impl Default for TenantSettingsConfig {
    fn default() -> Self {
        Self {
            max_field_length: default_max_field_length(),
            max_template_length: default_max_template_length(),
            max_followups: default_max_followups(),
            template_cache_capacity: default_template_cache_capacity(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid tenant settings config: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl TenantSettingsConfig {
    /// Prefix of environment variables overriding file values, e.g.
    /// `TENANT_SETTINGS_MAX_FIELD_LENGTH=512`.
    pub const ENV_PREFIX: &'static str = "TENANT_SETTINGS_";

    /// Load configuration from defaults, then the optional YAML file, then
    /// environment variables. Later sources win.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `path` does not exist, `Invalid` if a source
    /// has unknown keys or values of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(Self::ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}

impl From<&TenantSettingsConfig> for ServiceConfig {
    fn from(cfg: &TenantSettingsConfig) -> Self {
        Self {
            max_field_length: cfg.max_field_length,
            max_template_length: cfg.max_template_length,
            max_followups: cfg.max_followups,
            template_cache_capacity: cfg.template_cache_capacity,
        }
    }
}
