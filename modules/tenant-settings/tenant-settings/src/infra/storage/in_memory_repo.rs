//! Process-local settings store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tenant_settings_sdk::{SettingsCategory, SettingsPayload, SettingsRecord, TenantId};
use time::OffsetDateTime;

use crate::domain::repo::SettingsRepository;

/// In-memory settings repository.
///
/// Records are replaced whole under the write lock, so a concurrent reader
/// sees either the previous or the new record, never a mix. Reads hand out
/// clones.
#[derive(Default)]
pub struct InMemorySettingsRepository {
    records: RwLock<HashMap<(TenantId, SettingsCategory), SettingsRecord>>,
}

impl InMemorySettingsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> anyhow::Result<Option<SettingsRecord>> {
        Ok(self.records.read().get(&(tenant_id, category)).cloned())
    }

    async fn put(
        &self,
        tenant_id: TenantId,
        payload: SettingsPayload,
    ) -> anyhow::Result<SettingsRecord> {
        let key = (tenant_id, payload.category());
        let mut records = self.records.write();

        let now = OffsetDateTime::now_utc();
        let updated_at = records
            .get(&key)
            .map_or(now, |previous| previous.updated_at.max(now));

        let record = SettingsRecord {
            tenant_id,
            payload,
            updated_at,
        };
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn list(&self, tenant_id: TenantId) -> anyhow::Result<Vec<SettingsRecord>> {
        let mut records: Vec<SettingsRecord> = self
            .records
            .read()
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        records.sort_by_key(SettingsRecord::category);
        Ok(records)
    }

    async fn delete(&self, tenant_id: TenantId, category: SettingsCategory) -> anyhow::Result<()> {
        self.records.write().remove(&(tenant_id, category));
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tenant_settings_sdk::{Branding, ContactInfo};
    use uuid::Uuid;

    fn branding(name: &str) -> SettingsPayload {
        SettingsPayload::Branding(Branding {
            company_name: Some(name.to_owned()),
            ..Branding::default()
        })
    }

    #[tokio::test]
    async fn put_replaces_existing_record() {
        let repo = InMemorySettingsRepository::new();
        let tenant_id = Uuid::new_v4();

        let first = repo.put(tenant_id, branding("Acme")).await.unwrap();
        let second = repo.put(tenant_id, branding("Globex")).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert!(second.updated_at >= first.updated_at);
        let stored = repo
            .get(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.payload, branding("Globex"));
    }

    #[tokio::test]
    async fn records_are_scoped_per_tenant() {
        let repo = InMemorySettingsRepository::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        repo.put(a, branding("Acme")).await.unwrap();

        assert!(
            repo.get(b, SettingsCategory::Branding)
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.list(b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_one_record_per_category_in_order() {
        let repo = InMemorySettingsRepository::new();
        let tenant_id = Uuid::new_v4();

        repo.put(tenant_id, branding("Acme")).await.unwrap();
        repo.put(
            tenant_id,
            SettingsPayload::ContactInfo(ContactInfo::default()),
        )
        .await
        .unwrap();
        repo.put(tenant_id, branding("Acme 2")).await.unwrap();

        let categories: Vec<_> = repo
            .list(tenant_id)
            .await
            .unwrap()
            .iter()
            .map(SettingsRecord::category)
            .collect();
        assert_eq!(
            categories,
            vec![SettingsCategory::ContactInfo, SettingsCategory::Branding]
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemorySettingsRepository::new();
        let tenant_id = Uuid::new_v4();

        repo.put(tenant_id, branding("Acme")).await.unwrap();
        repo.delete(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap();
        repo.delete(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap();

        assert!(repo.is_empty());
    }
}
