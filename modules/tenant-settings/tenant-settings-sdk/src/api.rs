//! `TenantSettingsApi` trait definition.
//!
//! This is the boundary surface consumed by communication dispatchers,
//! scheduling and escalation tools, and settings management layers.

use async_trait::async_trait;

use crate::errors::TenantSettingsError;
use crate::models::{
    EffectiveSettings, RenderedMessage, SettingsCategory, SettingsPayload, SettingsRecord,
    TemplateVariables, TenantId,
};

/// Public API trait for the tenant settings module.
///
/// ```ignore
/// let effective = client.resolve(tenant_id, SettingsCategory::Preferences).await?;
/// let message = client.render_template(tenant_id, "reminder_1", &vars).await?;
/// ```
#[async_trait]
pub trait TenantSettingsApi: Send + Sync {
    /// Effective settings for a category: the tenant's record in full if one
    /// exists, otherwise the default catalog entry.
    ///
    /// A store failure is reported as `StoreUnavailable`, never as defaults.
    async fn resolve(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<EffectiveSettings, TenantSettingsError>;

    /// The tenant's stored record for a category, if any.
    async fn get_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<Option<SettingsRecord>, TenantSettingsError>;

    /// All categories the tenant has customized.
    async fn list_settings(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<SettingsRecord>, TenantSettingsError>;

    /// Replace the tenant's record for a category (whole-category upsert).
    ///
    /// Last write wins. There is no conflict detection; callers needing
    /// read-modify-write must compare `updated_at` themselves.
    async fn put_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
        payload: SettingsPayload,
    ) -> Result<SettingsRecord, TenantSettingsError>;

    /// Remove the tenant's record for a category. Deleting an absent record
    /// succeeds.
    async fn delete_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<(), TenantSettingsError>;

    /// Resolve the named template from the tenant's effective `email_templates`
    /// and render it with `variables`.
    async fn render_template(
        &self,
        tenant_id: TenantId,
        template_name: &str,
        variables: &TemplateVariables,
    ) -> Result<RenderedMessage, TenantSettingsError>;

    /// Compiled-in default payload for a category.
    fn default_for(&self, category: SettingsCategory) -> SettingsPayload;
}
