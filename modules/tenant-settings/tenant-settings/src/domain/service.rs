use std::sync::Arc;

use moka::sync::Cache;
use tenant_settings_sdk::{
    EffectiveSettings, EmailTemplate, RenderedMessage, SettingsCategory, SettingsPayload,
    SettingsRecord, SettingsSource, TemplateVariables, TenantId,
};
use tracing::{debug, info, warn};

use super::catalog::{self, CATALOG_VERSION};
use super::error::DomainError;
use super::escalation::EscalationPolicy;
use super::repo::SettingsRepository;
use super::template::CompiledTemplate;
use super::validation::validate_payload;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_field_length: usize,
    pub max_template_length: usize,
    pub max_followups: usize,
    pub template_cache_capacity: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_field_length: 256,
            max_template_length: 10_000,
            max_followups: 10,
            template_cache_capacity: 1_000,
        }
    }
}

/// Settings store operations, default-fallback resolution and template
/// rendering for all tenants.
pub struct Service {
    repo: Arc<dyn SettingsRepository>,
    config: ServiceConfig,
    templates: Cache<EmailTemplate, Arc<CompiledTemplate>>,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>, config: ServiceConfig) -> Self {
        let templates = Cache::new(config.template_cache_capacity);
        Self {
            repo,
            config,
            templates,
        }
    }

    /// # Errors
    ///
    /// `StoreUnavailable` if the store read fails.
    pub async fn get_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<Option<SettingsRecord>, DomainError> {
        debug!(%tenant_id, %category, "reading tenant settings");
        self.repo
            .get(tenant_id, category)
            .await
            .map_err(|e| store_failure(tenant_id, Some(category), e))
    }

    /// # Errors
    ///
    /// `StoreUnavailable` if the store read fails.
    pub async fn list_settings(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<SettingsRecord>, DomainError> {
        self.repo
            .list(tenant_id)
            .await
            .map_err(|e| store_failure(tenant_id, None, e))
    }

    /// Replace the tenant's record for `category` with `payload`.
    ///
    /// Concurrent writers race with last-write-wins semantics. Callers that
    /// need read-modify-write must compare `updated_at` themselves; the store
    /// offers no atomic compare-and-swap.
    ///
    /// # Errors
    ///
    /// `Validation` if the payload is malformed (nothing is written),
    /// `StoreUnavailable` if the write fails.
    pub async fn put_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
        payload: SettingsPayload,
    ) -> Result<SettingsRecord, DomainError> {
        if let Err(e) = validate_payload(category, &payload, &self.config) {
            warn!(%tenant_id, %category, error = %e, "rejected settings write");
            return Err(e);
        }

        let record = self
            .repo
            .put(tenant_id, payload)
            .await
            .map_err(|e| store_failure(tenant_id, Some(category), e))?;

        info!(%tenant_id, %category, updated_at = %record.updated_at, "tenant settings stored");
        Ok(record)
    }

    /// Untyped write used by settings management layers.
    ///
    /// # Errors
    ///
    /// `UnknownCategory` for an unknown category name, `Validation` if the
    /// JSON does not have the category's shape, plus the errors of
    /// [`Service::put_settings`].
    pub async fn put_settings_json(
        &self,
        tenant_id: TenantId,
        category: &str,
        payload: serde_json::Value,
    ) -> Result<SettingsRecord, DomainError> {
        let category = category
            .parse::<SettingsCategory>()
            .map_err(|_| DomainError::UnknownCategory(category.to_owned()))?;
        let payload = SettingsPayload::from_json(category, payload)
            .map_err(|e| DomainError::validation(category.as_str(), e.to_string()))?;
        self.put_settings(tenant_id, category, payload).await
    }

    /// # Errors
    ///
    /// `StoreUnavailable` if the delete fails.
    pub async fn delete_settings(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<(), DomainError> {
        self.repo
            .delete(tenant_id, category)
            .await
            .map_err(|e| store_failure(tenant_id, Some(category), e))?;
        info!(%tenant_id, %category, "tenant settings deleted");
        Ok(())
    }

    /// Effective settings: the stored record in full when present, otherwise
    /// the catalog default. Only a confirmed absence falls back to defaults.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the store read fails or returns a record of the
    /// wrong category.
    pub async fn resolve(
        &self,
        tenant_id: TenantId,
        category: SettingsCategory,
    ) -> Result<EffectiveSettings, DomainError> {
        let stored = self.get_settings(tenant_id, category).await?;

        let Some(record) = stored else {
            debug!(%tenant_id, %category, "no tenant record, using catalog default");
            return Ok(EffectiveSettings {
                tenant_id,
                category,
                source: SettingsSource::Default {
                    catalog_version: CATALOG_VERSION,
                },
                payload: catalog::default_for(category).clone(),
            });
        };

        if record.category() != category {
            return Err(store_failure(
                tenant_id,
                Some(category),
                anyhow::anyhow!(
                    "store returned a '{}' record for category '{category}'",
                    record.category()
                ),
            ));
        }

        Ok(EffectiveSettings {
            tenant_id,
            category,
            source: SettingsSource::Tenant {
                updated_at: record.updated_at,
            },
            payload: record.payload,
        })
    }

    /// Look up a template in the tenant's effective `email_templates`.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` if the effective templates lack `name`, plus the
    /// errors of [`Service::resolve`].
    pub async fn resolve_template(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<EmailTemplate, DomainError> {
        let effective = self
            .resolve(tenant_id, SettingsCategory::EmailTemplates)
            .await?;
        effective
            .payload
            .as_email_templates()
            .and_then(|templates| templates.get(name))
            .cloned()
            .ok_or_else(|| DomainError::TemplateNotFound(name.to_owned()))
    }

    /// # Errors
    ///
    /// See [`Service::resolve`].
    pub async fn resolve_escalation_policy(
        &self,
        tenant_id: TenantId,
    ) -> Result<EscalationPolicy, DomainError> {
        let effective = self
            .resolve(tenant_id, SettingsCategory::Preferences)
            .await?;
        Ok(effective
            .payload
            .as_preferences()
            .map(EscalationPolicy::from_preferences)
            .unwrap_or_default())
    }

    /// Reminder template to send as reminder `followup_number`, picked by the
    /// tenant's escalation policy from its effective `email_templates`.
    ///
    /// # Errors
    ///
    /// See [`Service::resolve`].
    pub async fn reminder_template_name(
        &self,
        tenant_id: TenantId,
        followup_number: u32,
    ) -> Result<String, DomainError> {
        let policy = self.resolve_escalation_policy(tenant_id).await?;
        let effective = self
            .resolve(tenant_id, SettingsCategory::EmailTemplates)
            .await?;
        let templates = effective
            .payload
            .as_email_templates()
            .cloned()
            .unwrap_or_default();
        Ok(policy.reminder_template_name(followup_number, &templates))
    }

    /// Resolve a template for the tenant and render it.
    ///
    /// # Errors
    ///
    /// `MissingVariable` if a placeholder has no value, plus the errors of
    /// [`Service::resolve_template`].
    pub async fn render_template(
        &self,
        tenant_id: TenantId,
        name: &str,
        variables: &TemplateVariables,
    ) -> Result<RenderedMessage, DomainError> {
        let template = self.resolve_template(tenant_id, name).await?;
        let compiled = self.compiled(&template);
        let rendered = compiled.render(variables).map_err(|e| {
            warn!(%tenant_id, template = name, error = %e, "template render failed");
            DomainError::from(e)
        })?;
        debug!(%tenant_id, template = name, "template rendered");
        Ok(rendered)
    }

    /// Compiled form of `template`, shared across renders.
    #[must_use]
    pub fn compiled(&self, template: &EmailTemplate) -> Arc<CompiledTemplate> {
        self.templates
            .get_with_by_ref(template, || Arc::new(CompiledTemplate::compile(template)))
    }
}

fn store_failure(
    tenant_id: TenantId,
    category: Option<SettingsCategory>,
    error: anyhow::Error,
) -> DomainError {
    if let Some(category) = category {
        warn!(%tenant_id, %category, error = %error, "settings store failure");
    } else {
        warn!(%tenant_id, error = %error, "settings store failure");
    }
    DomainError::StoreUnavailable(error)
}
