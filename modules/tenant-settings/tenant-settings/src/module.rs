//! Module declaration for the tenant settings module.

use std::sync::Arc;

use tenant_settings_sdk::TenantSettingsApi;
use tracing::{debug, info};

use crate::config::TenantSettingsConfig;
use crate::domain::repo::SettingsRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::InMemorySettingsRepository;
use crate::local_client::LocalClient;

/// Tenant settings module.
///
/// Holds the service once initialized and hands out [`TenantSettingsApi`]
/// clients backed by it.
pub struct TenantSettingsModule {
    service: arc_swap::ArcSwapOption<Service>,
}

impl Default for TenantSettingsModule {
    fn default() -> Self {
        Self {
            service: arc_swap::ArcSwapOption::from(None),
        }
    }
}

impl Clone for TenantSettingsModule {
    fn clone(&self) -> Self {
        Self {
            service: arc_swap::ArcSwapOption::new(self.service.load().as_ref().map(Clone::clone)),
        }
    }
}

impl TenantSettingsModule {
    /// Build the service over `repo`. Calling `init` again swaps in a new
    /// service; clients handed out earlier keep the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable.
    pub fn init(
        &self,
        cfg: &TenantSettingsConfig,
        repo: Arc<dyn SettingsRepository>,
    ) -> anyhow::Result<()> {
        info!("Initializing tenant_settings module");
        debug!(
            max_field_length = cfg.max_field_length,
            max_template_length = cfg.max_template_length,
            max_followups = cfg.max_followups,
            template_cache_capacity = cfg.template_cache_capacity,
            "Loaded tenant_settings config"
        );

        if cfg.max_followups == 0 {
            anyhow::bail!("max_followups must be at least 1");
        }

        let service = Arc::new(Service::new(repo, ServiceConfig::from(cfg)));
        self.service.store(Some(service));

        info!("Tenant settings module initialized");
        Ok(())
    }

    /// [`TenantSettingsModule::init`] over a process-local store.
    ///
    /// # Errors
    ///
    /// See [`TenantSettingsModule::init`].
    pub fn init_in_memory(&self, cfg: &TenantSettingsConfig) -> anyhow::Result<()> {
        self.init(cfg, Arc::new(InMemorySettingsRepository::new()))
    }

    /// # Errors
    ///
    /// Returns an error if the module has not been initialized.
    pub fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load()
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// # Errors
    ///
    /// Returns an error if the module has not been initialized.
    pub fn client(&self) -> anyhow::Result<Arc<dyn TenantSettingsApi>> {
        let api: Arc<dyn TenantSettingsApi> = Arc::new(LocalClient::new(self.service()?));
        Ok(api)
    }
}
