// ABOUTME: Type definitions for user settings
// ABOUTME: Settings sections, section patches and conversion to and from store documents

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use jobtrack_core::split_comma_list;
use jobtrack_storage::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::{
    DEFAULT_DATA_COLLECTION, DEFAULT_FOLLOW_UP_DAYS, DEFAULT_JOB_TITLES, DEFAULT_LOCATIONS,
    DEFAULT_NOTIFICATION_FLAG, DEFAULT_SALARY, DEFAULT_SHARE_ANONYMOUS_DATA, DEFAULT_TIMEZONE,
};
use crate::error::{SettingsError, SettingsResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSettings {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub resume_url: String,
    pub linked_in: String,
    pub github: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSearchSettings {
    pub timezone: String,
    pub follow_up_days: u32,
    /// Comma-delimited
    pub job_titles: String,
    /// Comma-delimited
    pub locations: String,
    /// String-encoded integer, empty when unset
    pub salary: String,
}

impl Default for JobSearchSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            follow_up_days: DEFAULT_FOLLOW_UP_DAYS,
            job_titles: DEFAULT_JOB_TITLES.to_string(),
            locations: DEFAULT_LOCATIONS.to_string(),
            salary: DEFAULT_SALARY.to_string(),
        }
    }
}

impl JobSearchSettings {
    pub fn job_title_list(&self) -> Vec<String> {
        split_comma_list(&self.job_titles)
    }

    pub fn location_list(&self) -> Vec<String> {
        split_comma_list(&self.locations)
    }

    /// Desired salary, `None` when empty or not a number
    pub fn salary_amount(&self) -> Option<u64> {
        self.salary.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub weekly_report: bool,
    pub follow_up_reminders: bool,
    pub interview_reminders: bool,
    pub rejection_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: DEFAULT_NOTIFICATION_FLAG,
            weekly_report: DEFAULT_NOTIFICATION_FLAG,
            follow_up_reminders: DEFAULT_NOTIFICATION_FLAG,
            interview_reminders: DEFAULT_NOTIFICATION_FLAG,
            rejection_notifications: DEFAULT_NOTIFICATION_FLAG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub data_collection: bool,
    pub share_anonymous_data: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            data_collection: DEFAULT_DATA_COLLECTION,
            share_anonymous_data: DEFAULT_SHARE_ANONYMOUS_DATA,
        }
    }
}

/// One identity's settings document.
///
/// Missing keys deserialize to their defaults, so every loaded value has the
/// full shape of the defaults table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub profile: ProfileSettings,
    pub job_search: JobSearchSettings,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSettings {
    /// Interpret a stored document, filling missing keys from the defaults table
    pub fn from_document(doc: Document) -> SettingsResult<Self> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }

    /// The four sections as a store document, without timestamps
    pub fn sections_document(&self) -> SettingsResult<Document> {
        let mut doc = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => {
                return Err(SettingsError::InvalidDocument(format!(
                    "settings serialized to {}",
                    other
                )))
            }
        };
        doc.remove("createdAt");
        doc.remove("updatedAt");
        Ok(doc)
    }

    /// Same settings with the timestamps cleared
    pub fn without_timestamps(mut self) -> Self {
        self.created_at = None;
        self.updated_at = None;
        self
    }
}

/// Top-level key of `UserSettings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSection {
    Profile,
    JobSearch,
    Notifications,
    Privacy,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        SettingsSection::Profile,
        SettingsSection::JobSearch,
        SettingsSection::Notifications,
        SettingsSection::Privacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsSection::Profile => "profile",
            SettingsSection::JobSearch => "jobSearch",
            SettingsSection::Notifications => "notifications",
            SettingsSection::Privacy => "privacy",
        }
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsSection {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearchPatch {
    pub timezone: Option<String>,
    pub follow_up_days: Option<u32>,
    pub job_titles: Option<String>,
    pub locations: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationsPatch {
    pub email_notifications: Option<bool>,
    pub weekly_report: Option<bool>,
    pub follow_up_reminders: Option<bool>,
    pub interview_reminders: Option<bool>,
    pub rejection_notifications: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrivacyPatch {
    pub data_collection: Option<bool>,
    pub share_anonymous_data: Option<bool>,
}

/// Partial update of exactly one section; `None` fields keep their current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionPatch {
    Profile(ProfilePatch),
    JobSearch(JobSearchPatch),
    Notifications(NotificationsPatch),
    Privacy(PrivacyPatch),
}

fn assign<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl SectionPatch {
    pub fn section(&self) -> SettingsSection {
        match self {
            SectionPatch::Profile(_) => SettingsSection::Profile,
            SectionPatch::JobSearch(_) => SettingsSection::JobSearch,
            SectionPatch::Notifications(_) => SettingsSection::Notifications,
            SectionPatch::Privacy(_) => SettingsSection::Privacy,
        }
    }

    /// Build a patch for `section` from a JSON object of camelCase keys
    pub fn from_json(section: SettingsSection, value: Value) -> SettingsResult<Self> {
        let invalid = |e: serde_json::Error| SettingsError::InvalidPatch {
            section: section.to_string(),
            reason: e.to_string(),
        };

        Ok(match section {
            SettingsSection::Profile => {
                SectionPatch::Profile(serde_json::from_value(value).map_err(invalid)?)
            }
            SettingsSection::JobSearch => {
                SectionPatch::JobSearch(serde_json::from_value(value).map_err(invalid)?)
            }
            SettingsSection::Notifications => {
                SectionPatch::Notifications(serde_json::from_value(value).map_err(invalid)?)
            }
            SettingsSection::Privacy => {
                SectionPatch::Privacy(serde_json::from_value(value).map_err(invalid)?)
            }
        })
    }

    /// Shallow-merge into the matching section, leaving every other section alone
    pub fn apply_to(&self, settings: &mut UserSettings) {
        match self {
            SectionPatch::Profile(patch) => {
                let profile = &mut settings.profile;
                assign(&mut profile.first_name, &patch.first_name);
                assign(&mut profile.last_name, &patch.last_name);
                assign(&mut profile.phone, &patch.phone);
                assign(&mut profile.resume_url, &patch.resume_url);
                assign(&mut profile.linked_in, &patch.linked_in);
                assign(&mut profile.github, &patch.github);
                assign(&mut profile.portfolio, &patch.portfolio);
            }
            SectionPatch::JobSearch(patch) => {
                let job_search = &mut settings.job_search;
                assign(&mut job_search.timezone, &patch.timezone);
                assign(&mut job_search.follow_up_days, &patch.follow_up_days);
                assign(&mut job_search.job_titles, &patch.job_titles);
                assign(&mut job_search.locations, &patch.locations);
                assign(&mut job_search.salary, &patch.salary);
            }
            SectionPatch::Notifications(patch) => {
                let notifications = &mut settings.notifications;
                assign(&mut notifications.email_notifications, &patch.email_notifications);
                assign(&mut notifications.weekly_report, &patch.weekly_report);
                assign(&mut notifications.follow_up_reminders, &patch.follow_up_reminders);
                assign(&mut notifications.interview_reminders, &patch.interview_reminders);
                assign(
                    &mut notifications.rejection_notifications,
                    &patch.rejection_notifications,
                );
            }
            SectionPatch::Privacy(patch) => {
                let privacy = &mut settings.privacy;
                assign(&mut privacy.data_collection, &patch.data_collection);
                assign(&mut privacy.share_anonymous_data, &patch.share_anonymous_data);
            }
        }
    }

    /// Copy of `settings` with this patch applied
    pub fn applied(&self, settings: &UserSettings) -> UserSettings {
        let mut next = settings.clone();
        self.apply_to(&mut next);
        next
    }
}

impl From<ProfilePatch> for SectionPatch {
    fn from(patch: ProfilePatch) -> Self {
        SectionPatch::Profile(patch)
    }
}

impl From<JobSearchPatch> for SectionPatch {
    fn from(patch: JobSearchPatch) -> Self {
        SectionPatch::JobSearch(patch)
    }
}

impl From<NotificationsPatch> for SectionPatch {
    fn from(patch: NotificationsPatch) -> Self {
        SectionPatch::Notifications(patch)
    }
}

impl From<PrivacyPatch> for SectionPatch {
    fn from(patch: PrivacyPatch) -> Self {
        SectionPatch::Privacy(patch)
    }
}
