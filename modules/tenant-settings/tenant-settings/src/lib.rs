//! Tenant Settings Module Implementation
//!
//! Per-tenant configuration categories with compiled-in defaults, plus
//! rendering of the tenant's email templates. The public API is defined in
//! `tenant-settings-sdk` and re-exported here.

pub use tenant_settings_sdk::{
    Branding, ContactInfo, EffectiveSettings, EmailTemplate, EmailTemplates, Preferences,
    RenderedMessage, SettingsCategory, SettingsPayload, SettingsRecord, SettingsSource,
    TemplateVariables, TenantId, TenantSettingsApi, TenantSettingsError,
};

pub mod module;
pub use module::TenantSettingsModule;

pub mod local_client;

pub mod config;
pub use config::{ConfigError, TenantSettingsConfig};

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
