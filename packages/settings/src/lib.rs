// ABOUTME: Per-user settings for Jobtrack
// ABOUTME: Defaults table, typed model, validation and the settings manager

pub mod defaults;
pub mod error;
pub mod manager;
pub mod notifier;
pub mod types;
pub mod validation;

// Re-export main types
pub use defaults::{default_settings, defaults_for, TIMEZONE_OPTIONS};
pub use error::{SettingsError, SettingsResult};
pub use manager::{SettingsManager, SettingsSnapshot};
pub use notifier::{
    Notification, NotificationLevel, NotificationQueue, Notifier, TracingNotifier,
    DEFAULT_QUEUE_CAPACITY,
};
pub use types::{
    JobSearchPatch, JobSearchSettings, NotificationSettings, NotificationsPatch, PrivacyPatch,
    PrivacySettings, ProfilePatch, ProfileSettings, SectionPatch, SettingsSection, UserSettings,
};
pub use validation::{validate_settings, ValidationError};
