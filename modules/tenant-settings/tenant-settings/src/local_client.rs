use async_trait::async_trait;
use std::sync::Arc;
use tenant_settings_sdk::{
    EffectiveSettings, RenderedMessage, SettingsCategory, SettingsPayload, SettingsRecord,
    TemplateVariables, TenantId, TenantSettingsApi, TenantSettingsError,
};

use crate::domain::catalog;
use crate::domain::service::Service;

/// In-process implementation of [`TenantSettingsApi`].
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TenantSettingsApi for LocalClient {
    async fn resolve(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<EffectiveSettings, TenantSettingsError> {
        self.service
            .resolve(tenant_id, category)
            .await
            .map_err(Into::into)
    }

    async fn get_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<Option<SettingsRecord>, TenantSettingsError> {
        self.service
            .get_settings(tenant_id, category)
            .await
            .map_err(Into::into)
    }

    async fn list_settings(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<SettingsRecord>, TenantSettingsError> {
        self.service
            .list_settings(tenant_id)
            .await
            .map_err(Into::into)
    }

    async fn put_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
        payload: SettingsPayload,
    ) -> Result<SettingsRecord, TenantSettingsError> {
        self.service
            .put_settings(tenant_id, category, payload)
            .await
            .map_err(Into::into)
    }

    async fn delete_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<(), TenantSettingsError> {
        self.service
            .delete_settings(tenant_id, category)
            .await
            .map_err(Into::into)
    }

    async fn render_template(
        &self,
        tenant_id: TenantId,
        template_name: &str,
        variables: &TemplateVariables,
    ) -> Result<RenderedMessage, TenantSettingsError> {
        self.service
            .render_template(tenant_id, template_name, variables)
            .await
            .map_err(Into::into)
    }

    fn default_for(&self, category: SettingsCategory) -> SettingsPayload {
        catalog::default_for(category).clone()
    }
}
