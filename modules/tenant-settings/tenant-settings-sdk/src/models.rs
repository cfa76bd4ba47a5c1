//! Public models for the tenant settings module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the tenant settings module and its consumers (communication
//! dispatchers, scheduling and escalation tools, settings management APIs).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::TenantSettingsError;

/// Unique identifier for a tenant (the account whose settings are resolved).
pub type TenantId = Uuid;

/// Variable values substituted into template placeholders, keyed by name.
pub type TemplateVariables = BTreeMap<String, String>;

/// Closed set of settings groupings. Each tenant has at most one record per
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsCategory {
    EmailTemplates,
    ContactInfo,
    Preferences,
    Branding,
}

impl SettingsCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::EmailTemplates,
        Self::ContactInfo,
        Self::Preferences,
        Self::Branding,
    ];

    /// Stable snake-case name, as used in persisted records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailTemplates => "email_templates",
            Self::ContactInfo => "contact_info",
            Self::Preferences => "preferences",
            Self::Branding => "branding",
        }
    }
}

impl fmt::Display for SettingsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsCategory {
    type Err = TenantSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TenantSettingsError::unknown_category(s))
    }
}

/// Named subject/body pair containing `{variable_name}` placeholders.
///
/// Doubled braces (`{{`, `}}`) stand for literal braces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Result of rendering an [`EmailTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// `email_templates` payload: template name to template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailTemplates {
    pub templates: BTreeMap<String, EmailTemplate>,
}

impl EmailTemplates {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EmailTemplate> {
        self.templates.get(name)
    }

    /// Adds or replaces a template, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, template: EmailTemplate) -> Self {
        self.templates.insert(name.into(), template);
        self
    }
}

/// `contact_info` payload. Every field is optional; an absent field stays
/// absent after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// `preferences` payload: workflow timing and escalation thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    /// Days to wait before each successive reminder. Entry `n` is the delay
    /// before reminder `n + 1`, measured from the previous contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_schedule: Option<Vec<u32>>,

    /// Number of reminders after which a case becomes eligible for escalation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_threshold: Option<u32>,

    /// Days without a response after the last reminder before escalating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_sms_reminders: Option<bool>,
}

/// `branding` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// `#RRGGBB` hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_signature: Option<String>,
}

/// Category-specific settings payload.
///
/// Serialized adjacently tagged: `{"category": "...", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "payload", rename_all = "snake_case")]
pub enum SettingsPayload {
    EmailTemplates(EmailTemplates),
    ContactInfo(ContactInfo),
    Preferences(Preferences),
    Branding(Branding),
}

impl SettingsPayload {
    /// Category this payload belongs to.
    #[must_use]
    pub const fn category(&self) -> SettingsCategory {
        match self {
            Self::EmailTemplates(_) => SettingsCategory::EmailTemplates,
            Self::ContactInfo(_) => SettingsCategory::ContactInfo,
            Self::Preferences(_) => SettingsCategory::Preferences,
            Self::Branding(_) => SettingsCategory::Branding,
        }
    }

    /// Parses an untyped payload using the schema of `category`.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the value does not have the
    /// category's shape (wrong types, unknown keys).
    pub fn from_json(
        category: SettingsCategory,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match category {
            SettingsCategory::EmailTemplates => {
                serde_json::from_value(value).map(Self::EmailTemplates)
            }
            SettingsCategory::ContactInfo => serde_json::from_value(value).map(Self::ContactInfo),
            SettingsCategory::Preferences => serde_json::from_value(value).map(Self::Preferences),
            SettingsCategory::Branding => serde_json::from_value(value).map(Self::Branding),
        }
    }

    #[must_use]
    pub const fn as_email_templates(&self) -> Option<&EmailTemplates> {
        match self {
            Self::EmailTemplates(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_contact_info(&self) -> Option<&ContactInfo> {
        match self {
            Self::ContactInfo(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_preferences(&self) -> Option<&Preferences> {
        match self {
            Self::Preferences(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_branding(&self) -> Option<&Branding> {
        match self {
            Self::Branding(p) => Some(p),
            _ => None,
        }
    }
}

/// A tenant's stored customization of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub tenant_id: TenantId,
    #[serde(flatten)]
    pub payload: SettingsPayload,
    /// Set by the store on every write. Usable by callers as a version token.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SettingsRecord {
    #[must_use]
    pub const fn category(&self) -> SettingsCategory {
        self.payload.category()
    }
}

/// Where effective settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingsSource {
    /// The tenant's stored record.
    Tenant {
        #[serde(with = "time::serde::rfc3339")]
        updated_at: OffsetDateTime,
    },
    /// The compiled-in default catalog.
    Default { catalog_version: u32 },
}

/// Settings actually used at runtime for a (tenant, category) pair.
///
/// The payload is either the tenant's record, in full, or the catalog default.
/// Fields are never merged across the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub tenant_id: TenantId,
    pub category: SettingsCategory,
    pub source: SettingsSource,
    pub payload: SettingsPayload,
}

impl EffectiveSettings {
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self.source, SettingsSource::Default { .. })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_parses_known_names() {
        for category in SettingsCategory::ALL {
            assert_eq!(
                category.as_str().parse::<SettingsCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn category_rejects_unknown_name() {
        let err = "billing".parse::<SettingsCategory>().unwrap_err();
        assert_eq!(err, TenantSettingsError::unknown_category("billing"));
    }

    #[test]
    fn payload_from_json_rejects_unknown_keys() {
        let result = SettingsPayload::from_json(
            SettingsCategory::ContactInfo,
            json!({ "name": "Sam", "fax": "555" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn payload_from_json_rejects_wrong_types() {
        let result = SettingsPayload::from_json(
            SettingsCategory::Preferences,
            json!({ "escalation_threshold": "three" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn email_templates_payload_is_a_plain_map() {
        let payload = SettingsPayload::from_json(
            SettingsCategory::EmailTemplates,
            json!({ "welcome": { "subject": "Hi {name}", "body": "Welcome" } }),
        )
        .unwrap();

        let templates = payload.as_email_templates().unwrap();
        assert_eq!(templates.get("welcome").unwrap().subject, "Hi {name}");
    }

    #[test]
    fn record_serializes_with_category_and_payload_keys() {
        let record = SettingsRecord {
            tenant_id: Uuid::nil(),
            payload: SettingsPayload::Branding(Branding {
                company_name: Some("Acme".to_owned()),
                ..Branding::default()
            }),
            updated_at: time::macros::datetime!(2026-05-01 12:00 UTC),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "tenant_id": "00000000-0000-0000-0000-000000000000",
                "category": "branding",
                "payload": { "company_name": "Acme" },
                "updated_at": "2026-05-01T12:00:00Z",
            })
        );

        let back: SettingsRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
