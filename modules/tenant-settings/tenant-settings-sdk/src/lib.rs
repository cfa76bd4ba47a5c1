//! Tenant Settings SDK
//!
//! This crate provides the public API for the `tenant_settings` module:
//! - `TenantSettingsApi` trait for consumers
//! - Model types (`SettingsCategory`, `SettingsPayload`, `SettingsRecord`,
//!   `EffectiveSettings`, `EmailTemplate`, `RenderedMessage`)
//! - Error type (`TenantSettingsError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::TenantSettingsApi;
pub use errors::TenantSettingsError;
pub use models::{
    Branding, ContactInfo, EffectiveSettings, EmailTemplate, EmailTemplates, Preferences,
    RenderedMessage, SettingsCategory, SettingsPayload, SettingsRecord, SettingsSource,
    TemplateVariables, TenantId,
};
