//! Compiled-in default settings, one payload per category.
//!
//! The catalog is built on first access and is immutable for the life of the
//! process. It is reachable only through [`default_for`] and
//! [`default_for_name`]; changing it requires a new build.

use std::sync::LazyLock;

use tenant_settings_sdk::{
    Branding, ContactInfo, EmailTemplate, EmailTemplates, Preferences, SettingsCategory,
    SettingsPayload,
};

use super::error::DomainError;

/// Bumped whenever catalog content changes.
pub const CATALOG_VERSION: u32 = 1;

pub const DEFAULT_FOLLOWUP_SCHEDULE: [u32; 3] = [3, 7, 14];
pub const DEFAULT_ESCALATION_THRESHOLD: u32 = 3;
pub const DEFAULT_ESCALATION_DAYS: u32 = 2;

struct DefaultCatalog {
    email_templates: SettingsPayload,
    contact_info: SettingsPayload,
    preferences: SettingsPayload,
    branding: SettingsPayload,
}

static CATALOG: LazyLock<DefaultCatalog> = LazyLock::new(DefaultCatalog::build);

/// Default payload for a category.
#[must_use]
pub fn default_for(category: SettingsCategory) -> &'static SettingsPayload {
    let catalog = &*CATALOG;
    match category {
        SettingsCategory::EmailTemplates => &catalog.email_templates,
        SettingsCategory::ContactInfo => &catalog.contact_info,
        SettingsCategory::Preferences => &catalog.preferences,
        SettingsCategory::Branding => &catalog.branding,
    }
}

/// Default payload for a category given by name.
///
/// # Errors
///
/// Returns [`DomainError::UnknownCategory`] if `name` is not a settings category.
pub fn default_for_name(name: &str) -> Result<&'static SettingsPayload, DomainError> {
    let category = name
        .parse::<SettingsCategory>()
        .map_err(|_| DomainError::UnknownCategory(name.to_owned()))?;
    Ok(default_for(category))
}

impl DefaultCatalog {
    fn build() -> Self {
        Self {
            email_templates: SettingsPayload::EmailTemplates(default_templates()),
            contact_info: SettingsPayload::ContactInfo(ContactInfo {
                name: Some("Your Accountant".to_owned()),
                ..ContactInfo::default()
            }),
            preferences: SettingsPayload::Preferences(Preferences {
                followup_schedule: Some(DEFAULT_FOLLOWUP_SCHEDULE.to_vec()),
                escalation_threshold: Some(DEFAULT_ESCALATION_THRESHOLD),
                escalation_days: Some(DEFAULT_ESCALATION_DAYS),
                timezone: Some("UTC".to_owned()),
                send_sms_reminders: Some(false),
            }),
            branding: SettingsPayload::Branding(Branding {
                company_name: Some("Operations Squad".to_owned()),
                primary_color: Some("#1F6FEB".to_owned()),
                ..Branding::default()
            }),
        }
    }
}

fn default_templates() -> EmailTemplates {
    EmailTemplates::default()
        .with(
            "reminder_1",
            EmailTemplate::new(
                "Documents needed for your {tax_year} tax return",
                "Dear {client_name},\n\n\
                 I hope this email finds you well. I'm reaching out regarding your {tax_year} tax return.\n\n\
                 To complete your return, I still need the following documents:\n\n\
                 {missing_documents_list}\n\n\
                 Please upload these documents to your secure client portal at your earliest convenience.\n\n\
                 Thank you for your prompt attention to this matter.\n\n\
                 Best regards,\n\
                 {accountant_name}\n\
                 {accountant_firm}",
            ),
        )
        .with(
            "reminder_2",
            EmailTemplate::new(
                "Reminder: Documents still needed for your {tax_year} tax return",
                "Dear {client_name},\n\n\
                 This is a friendly reminder that I'm still waiting for the following documents:\n\n\
                 {missing_documents_list}\n\n\
                 The tax filing deadline is approaching. Please upload these documents as soon as possible.\n\n\
                 Best regards,\n\
                 {accountant_name}\n\
                 {accountant_firm}",
            ),
        )
        .with(
            "reminder_3",
            EmailTemplate::new(
                "URGENT: Documents needed to avoid tax filing delays",
                "Dear {client_name},\n\n\
                 This is my third request for the following documents:\n\n\
                 {missing_documents_list}\n\n\
                 Without these documents, I cannot file your return on time, which may result in penalties.\n\n\
                 Please call me directly at {accountant_phone}.\n\n\
                 Sincerely,\n\
                 {accountant_name}\n\
                 {accountant_firm}",
            ),
        )
        .with(
            "appointment_confirmation",
            EmailTemplate::new(
                "Appointment Confirmed",
                "Appointment Confirmed!\n\n\
                 Technician: {technician_name}\n\
                 Time: {scheduled_time}\n\
                 Service: {service_type}\n\
                 Address: {customer_address}\n\n\
                 {technician_name} will call 15 minutes before arrival.\n\n\
                 Need to reschedule? Reply to this message.\n\n\
                 - {company_name}",
            ),
        )
        .with(
            "payment_reminder",
            EmailTemplate::new(
                "Payment Reminder - Invoice {invoice_number}",
                "Payment reminder: Invoice {invoice_number} for {amount_due} is now overdue.\n\n\
                 Please remit payment: {payment_link}\n\n\
                 - {company_name}",
            ),
        )
}
