#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for tenant-settings integration tests

use std::sync::Arc;

use tenant_settings::domain::service::{Service, ServiceConfig};
use tenant_settings::infra::storage::InMemorySettingsRepository;
use tenant_settings::local_client::LocalClient;
use tenant_settings::{TemplateVariables, TenantSettingsApi};

pub fn create_service() -> Arc<Service> {
    let repo = Arc::new(InMemorySettingsRepository::new());
    Arc::new(Service::new(repo, ServiceConfig::default()))
}

pub fn create_client() -> Arc<dyn TenantSettingsApi> {
    Arc::new(LocalClient::new(create_service()))
}

pub fn vars(pairs: &[(&str, &str)]) -> TemplateVariables {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}
