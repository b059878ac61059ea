// ABOUTME: Core types, traits, and utilities for Jobtrack
// ABOUTME: Foundational package providing shared functionality across all Jobtrack packages

pub mod constants;
pub mod identity;
pub mod utils;

// Re-export main types
pub use identity::{Identity, IdentityError};

// Re-export constants
pub use constants::{
    default_database_file, jobtrack_dir, PREFERENCES_DOCUMENT, SETTINGS_COLLECTION,
    USERS_COLLECTION,
};

// Re-export utilities
pub use utils::{split_comma_list, split_display_name};
