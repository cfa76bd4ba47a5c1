use tenant_settings_sdk::TenantSettingsError;

use super::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Unknown settings category: {0}")]
    UnknownCategory(String),

    #[error("Settings store unavailable: {0:#}")]
    StoreUnavailable(#[from] anyhow::Error),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for TenantSettingsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::UnknownCategory(category) => Self::unknown_category(category),
            DomainError::StoreUnavailable(source) => Self::store_unavailable(format!("{source:#}")),
            DomainError::TemplateNotFound(name) => Self::template_not_found(name),
            DomainError::Template(TemplateError::MissingVariable { name }) => {
                Self::missing_variable(name)
            }
        }
    }
}
