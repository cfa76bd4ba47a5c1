//! Write-time validation of settings payloads.

use tenant_settings_sdk::{
    Branding, ContactInfo, EmailTemplates, Preferences, SettingsCategory, SettingsPayload,
};

use super::error::DomainError;
use super::service::ServiceConfig;

/// Check that `payload` belongs to `category` and satisfies its schema rules.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the first offending field.
pub fn validate_payload(
    category: SettingsCategory,
    payload: &SettingsPayload,
    limits: &ServiceConfig,
) -> Result<(), DomainError> {
    if payload.category() != category {
        return Err(DomainError::validation(
            "category",
            format!(
                "payload for '{}' cannot be stored under '{category}'",
                payload.category()
            ),
        ));
    }

    match payload {
        SettingsPayload::EmailTemplates(p) => validate_templates(p, limits),
        SettingsPayload::ContactInfo(p) => validate_contact_info(p, limits),
        SettingsPayload::Preferences(p) => validate_preferences(p, limits),
        SettingsPayload::Branding(p) => validate_branding(p, limits),
    }
}

fn validate_templates(p: &EmailTemplates, limits: &ServiceConfig) -> Result<(), DomainError> {
    for (name, template) in &p.templates {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::validation(
                "email_templates",
                format!("invalid template name '{name}'"),
            ));
        }
        if template.subject.trim().is_empty() {
            return Err(DomainError::validation(
                format!("email_templates.{name}.subject"),
                "must not be empty",
            ));
        }
        check_len(
            &format!("email_templates.{name}.subject"),
            &template.subject,
            limits.max_template_length,
        )?;
        check_len(
            &format!("email_templates.{name}.body"),
            &template.body,
            limits.max_template_length,
        )?;
    }
    Ok(())
}

fn validate_contact_info(p: &ContactInfo, limits: &ServiceConfig) -> Result<(), DomainError> {
    let fields = [
        ("contact_info.name", &p.name),
        ("contact_info.email", &p.email),
        ("contact_info.phone", &p.phone),
        ("contact_info.firm", &p.firm),
        ("contact_info.address", &p.address),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            check_len(field, value, limits.max_field_length)?;
        }
    }

    if let Some(email) = &p.email {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            });
        if !valid {
            return Err(DomainError::validation(
                "contact_info.email",
                format!("'{email}' is not an email address"),
            ));
        }
    }
    Ok(())
}

fn validate_preferences(p: &Preferences, limits: &ServiceConfig) -> Result<(), DomainError> {
    if p.escalation_threshold == Some(0) {
        return Err(DomainError::validation(
            "preferences.escalation_threshold",
            "must be a positive integer",
        ));
    }
    if p.escalation_days == Some(0) {
        return Err(DomainError::validation(
            "preferences.escalation_days",
            "must be a positive integer",
        ));
    }
    if let Some(schedule) = &p.followup_schedule {
        if schedule.is_empty() {
            return Err(DomainError::validation(
                "preferences.followup_schedule",
                "must contain at least one entry",
            ));
        }
        if schedule.len() > limits.max_followups {
            return Err(DomainError::validation(
                "preferences.followup_schedule",
                format!("exceeds maximum of {} follow-ups", limits.max_followups),
            ));
        }
        if schedule.contains(&0) {
            return Err(DomainError::validation(
                "preferences.followup_schedule",
                "every delay must be a positive number of days",
            ));
        }
    }
    if p.timezone.as_deref().is_some_and(|tz| tz.trim().is_empty()) {
        return Err(DomainError::validation(
            "preferences.timezone",
            "must not be empty",
        ));
    }
    Ok(())
}

fn validate_branding(p: &Branding, limits: &ServiceConfig) -> Result<(), DomainError> {
    let fields = [
        ("branding.company_name", &p.company_name),
        ("branding.logo_url", &p.logo_url),
        ("branding.primary_color", &p.primary_color),
        ("branding.email_signature", &p.email_signature),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            check_len(field, value, limits.max_field_length)?;
        }
    }

    if let Some(color) = p.primary_color.as_deref().filter(|c| !is_hex_color(c)) {
        return Err(DomainError::validation(
            "branding.primary_color",
            format!("'{color}' is not a #RRGGBB color"),
        ));
    }
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Limits count characters, not bytes.
fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max} characters"),
        ));
    }
    Ok(())
}
