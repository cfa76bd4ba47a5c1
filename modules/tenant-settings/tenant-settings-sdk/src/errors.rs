//! Error types for the tenant settings SDK.

use thiserror::Error;

/// Errors returned by the tenant settings API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantSettingsError {
    /// The payload does not match the category schema. The write was rejected
    /// and any previously stored record is unchanged.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The category name is outside the closed set of settings categories.
    #[error("Unknown settings category: {category}")]
    UnknownCategory { category: String },

    /// The settings store could not be reached. Never reported as defaults.
    #[error("Settings store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// A template placeholder has no value in the supplied variables.
    #[error("Missing template variable: {name}")]
    MissingVariable { name: String },

    /// The effective `email_templates` settings do not contain the template.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },
}

impl TenantSettingsError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            category: category.into(),
        }
    }

    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    #[must_use]
    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }
}
