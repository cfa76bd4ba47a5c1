use async_trait::async_trait;
use tenant_settings_sdk::{SettingsCategory, SettingsPayload, SettingsRecord, TenantId};

/// Durable store of one record per (tenant, category).
///
/// Any error means the store could not be reached or read; callers must not
/// treat it as "no record".
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> anyhow::Result<Option<SettingsRecord>>;

    /// Replace the record for (`tenant_id`, `payload.category()`) and stamp
    /// `updated_at`. The stamp never moves backwards for a key.
    async fn put(
        &self,
        tenant_id: TenantId,
        payload: SettingsPayload,
    ) -> anyhow::Result<SettingsRecord>;

    async fn list(&self, tenant_id: TenantId) -> anyhow::Result<Vec<SettingsRecord>>;

    /// Remove the record if present. Removing an absent record is not an error.
    async fn delete(&self, tenant_id: TenantId, category: SettingsCategory) -> anyhow::Result<()>;
}
