//! Follow-up scheduling and escalation thresholds derived from a tenant's
//! effective `preferences`.

use serde::{Deserialize, Serialize};
use tenant_settings_sdk::{EmailTemplates, Preferences};
use time::{Duration, OffsetDateTime};

use super::catalog::{
    DEFAULT_ESCALATION_DAYS, DEFAULT_ESCALATION_THRESHOLD, DEFAULT_FOLLOWUP_SCHEDULE,
};

/// Progress classification of an open case (e.g. a document collection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Complete,
    Incomplete,
    AtRisk,
    Escalated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPolicy {
    followup_schedule: Vec<u32>,
    escalation_threshold: u32,
    escalation_days: u32,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::from_preferences(&Preferences::default())
    }
}

impl EscalationPolicy {
    /// Build a policy from preferences. Absent fields use the catalog constants.
    #[must_use]
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            followup_schedule: prefs
                .followup_schedule
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FOLLOWUP_SCHEDULE.to_vec()),
            escalation_threshold: prefs
                .escalation_threshold
                .unwrap_or(DEFAULT_ESCALATION_THRESHOLD),
            escalation_days: prefs.escalation_days.unwrap_or(DEFAULT_ESCALATION_DAYS),
        }
    }

    #[must_use]
    pub fn followup_schedule(&self) -> &[u32] {
        &self.followup_schedule
    }

    #[must_use]
    pub const fn escalation_threshold(&self) -> u32 {
        self.escalation_threshold
    }

    #[must_use]
    pub const fn escalation_days(&self) -> u32 {
        self.escalation_days
    }

    /// Classify a case.
    ///
    /// Escalation requires both reaching the reminder threshold and
    /// `escalation_days` whole days of silence since the last reminder. One
    /// reminder short of the threshold counts as at risk.
    #[must_use]
    pub fn risk_status(
        &self,
        completion_pct: u8,
        followup_count: u32,
        last_followup_at: Option<OffsetDateTime>,
        now: OffsetDateTime,
    ) -> RiskStatus {
        if completion_pct >= 100 {
            return RiskStatus::Complete;
        }

        if followup_count >= self.escalation_threshold {
            let waited = last_followup_at
                .map(|last| (now - last).whole_days())
                .is_some_and(|days| days >= i64::from(self.escalation_days));
            return if waited {
                RiskStatus::Escalated
            } else {
                RiskStatus::AtRisk
            };
        }

        if followup_count >= self.escalation_threshold.saturating_sub(1) {
            return RiskStatus::AtRisk;
        }

        RiskStatus::Incomplete
    }

    /// Whole days left before escalation, or `None` while below the reminder
    /// threshold or when the escalation date is out of range. Never negative.
    #[must_use]
    pub fn days_until_escalation(
        &self,
        followup_count: u32,
        last_followup_at: Option<OffsetDateTime>,
        now: OffsetDateTime,
    ) -> Option<i64> {
        if followup_count < self.escalation_threshold {
            return None;
        }
        let Some(last) = last_followup_at else {
            return Some(0);
        };
        let wait = Duration::days(i64::from(self.escalation_days));
        let escalation_at = last.checked_add(wait)?;
        Some((escalation_at - now).whole_days().max(0))
    }

    /// When the next reminder is due, given how many were already sent and
    /// the time of the last contact. `None` once the schedule is exhausted or
    /// when the due date is out of range.
    #[must_use]
    pub fn next_followup_at(
        &self,
        followup_count: u32,
        anchor: OffsetDateTime,
    ) -> Option<OffsetDateTime> {
        let index = usize::try_from(followup_count).ok()?;
        let delay = self.followup_schedule.get(index)?;
        anchor.checked_add(Duration::days(i64::from(*delay)))
    }

    /// Name of the reminder template to send as reminder `followup_number`.
    ///
    /// The number is clamped to the schedule, then lowered to the nearest
    /// `reminder_N` present in `templates`, so a schedule longer than the
    /// template set reuses the last template. Without any `reminder_N` in
    /// `templates` the clamped name is returned as is.
    #[must_use]
    pub fn reminder_template_name(
        &self,
        followup_number: u32,
        templates: &EmailTemplates,
    ) -> String {
        let last = u32::try_from(self.followup_schedule.len())
            .unwrap_or(u32::MAX)
            .max(1);
        let wanted = followup_number.clamp(1, last);

        templates
            .templates
            .keys()
            .map(String::as_str)
            .filter_map(reminder_number)
            .filter(|n| *n <= wanted)
            .max()
            .map_or_else(|| reminder_name(wanted), reminder_name)
    }
}

fn reminder_name(number: u32) -> String {
    format!("reminder_{number}")
}

/// Number `N` of a template named exactly `reminder_N` with `N >= 1`.
fn reminder_number(name: &str) -> Option<u32> {
    let number = name.strip_prefix("reminder_")?.parse::<u32>().ok()?;
    (number >= 1 && reminder_name(number) == name).then_some(number)
}
