// ABOUTME: Defaults table for user settings
// ABOUTME: Every settings field and its initial value for a brand-new identity

use jobtrack_core::Identity;

use crate::types::UserSettings;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_FOLLOW_UP_DAYS: u32 = 14;
pub const DEFAULT_JOB_TITLES: &str = "Software Engineer, Frontend Developer, Web Developer";
pub const DEFAULT_LOCATIONS: &str = "Remote, New York, Boston";
pub const DEFAULT_SALARY: &str = "90000";

pub const DEFAULT_NOTIFICATION_FLAG: bool = true;
pub const DEFAULT_DATA_COLLECTION: bool = true;
pub const DEFAULT_SHARE_ANONYMOUS_DATA: bool = false;

pub const MIN_FOLLOW_UP_DAYS: u32 = 1;
pub const MAX_FOLLOW_UP_DAYS: u32 = 30;

/// Timezones offered by the settings form
pub const TIMEZONE_OPTIONS: &[&str] = &[
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
];

/// The bare defaults table, without timestamps
pub fn default_settings() -> UserSettings {
    UserSettings::default()
}

/// Defaults for a brand-new identity, with the profile name taken from the display name
pub fn defaults_for(identity: &Identity) -> UserSettings {
    let mut settings = default_settings();
    let (first_name, last_name) = identity.name_parts();
    settings.profile.first_name = first_name;
    settings.profile.last_name = last_name;
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_values() {
        let settings = default_settings();

        assert_eq!(settings.job_search.timezone, "America/New_York");
        assert_eq!(settings.job_search.follow_up_days, 14);
        assert_eq!(settings.job_search.salary, "90000");
        assert!(settings.notifications.email_notifications);
        assert!(settings.notifications.rejection_notifications);
        assert!(settings.privacy.data_collection);
        assert!(!settings.privacy.share_anonymous_data);
        assert_eq!(settings.profile.first_name, "");
        assert!(settings.created_at.is_none());
        assert!(settings.updated_at.is_none());
    }

    #[test]
    fn test_defaults_for_identity_splits_display_name() {
        let identity =
            Identity::new("u1", "ada@example.com").with_display_name("Ada King Lovelace");

        let settings = defaults_for(&identity);

        assert_eq!(settings.profile.first_name, "Ada");
        assert_eq!(settings.profile.last_name, "King Lovelace");
        assert_eq!(settings.job_search, default_settings().job_search);
    }

    #[test]
    fn test_defaults_for_identity_without_display_name() {
        let identity = Identity::new("u1", "ada@example.com");

        let settings = defaults_for(&identity);

        assert_eq!(settings, default_settings());
    }

    #[test]
    fn test_default_timezone_is_offered() {
        assert!(TIMEZONE_OPTIONS.contains(&DEFAULT_TIMEZONE));
    }
}
