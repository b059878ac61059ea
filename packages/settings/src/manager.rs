// ABOUTME: Settings manager owning the in-memory settings of the current identity
// ABOUTME: Load protocol, serialized saves, section updates, reset, export and delete

use std::sync::Arc;

use jobtrack_core::Identity;
use jobtrack_storage::{server_timestamp, Document, DocumentPath, DocumentStore, SetOptions};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::defaults::{default_settings, defaults_for};
use crate::error::{SettingsError, SettingsResult};
use crate::notifier::Notifier;
use crate::types::{SectionPatch, SettingsSection, UserSettings};
use crate::validation::validate_settings;

pub const SAVE_SUCCEEDED: &str = "Settings saved successfully";
pub const SAVE_FAILED: &str = "Failed to save settings";
pub const SAVE_UNAUTHENTICATED: &str = "You must be logged in to save settings";
pub const LOAD_FAILED: &str = "Failed to load settings";
pub const EXPORT_UNAUTHENTICATED: &str = "You must be logged in to export data";
pub const EXPORT_SUBMITTED: &str =
    "Data export request submitted. You will receive an email shortly.";
pub const DELETE_UNAUTHENTICATED: &str = "You must be logged in to delete data";
pub const DELETE_SUCCEEDED: &str = "All user data has been reset";
pub const DELETE_FAILED: &str = "Failed to delete user data";

/// Consistent view of the UI-facing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub settings: Option<UserSettings>,
    pub loading: bool,
    pub saving: bool,
}

#[derive(Debug, Default)]
struct ManagerState {
    identity: Option<Identity>,
    settings: Option<UserSettings>,
    loading: bool,
    saves_in_flight: usize,
    /// Bumped on every identity change
    generation: u64,
}

/// The identity an operation was issued for
#[derive(Debug, Clone)]
struct Ticket {
    identity: Identity,
    generation: u64,
}

pub struct SettingsManager {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<ManagerState>,
    /// Held for the whole of a save so only one save touches the cache at a time
    save_lock: Mutex<()>,
}

impl SettingsManager {
    pub fn new(store: Arc<dyn DocumentStore>, notifier: Arc<dyn Notifier>) -> Self {
        debug!("Creating settings manager on {} store", store.name());
        Self {
            store,
            notifier,
            state: RwLock::new(ManagerState::default()),
            save_lock: Mutex::new(()),
        }
    }

    pub async fn settings(&self) -> Option<UserSettings> {
        self.state.read().await.settings.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn saving(&self) -> bool {
        self.state.read().await.saves_in_flight > 0
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.state.read().await.identity.clone()
    }

    pub async fn snapshot(&self) -> SettingsSnapshot {
        let state = self.state.read().await;
        SettingsSnapshot {
            settings: state.settings.clone(),
            loading: state.loading,
            saving: state.saves_in_flight > 0,
        }
    }

    /// Follow an identity channel, reloading on every change until the sender is dropped
    pub fn watch_identity(
        self: &Arc<Self>,
        mut identities: watch::Receiver<Option<Identity>>,
    ) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let initial = identities.borrow_and_update().clone();
            manager.on_identity_change(initial).await;

            while identities.changed().await.is_ok() {
                let identity = identities.borrow_and_update().clone();
                manager.on_identity_change(identity).await;
            }
            debug!("Identity channel closed, no longer watching");
        })
    }

    /// Clear state on sign-out, or run the load protocol for a new identity
    pub async fn on_identity_change(&self, identity: Option<Identity>) {
        let ticket = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.settings = None;
            state.identity = identity.clone();

            match identity {
                None => {
                    state.loading = false;
                    info!("Identity cleared, settings unloaded");
                    return;
                }
                Some(identity) => {
                    state.loading = true;
                    Ticket {
                        identity,
                        generation: state.generation,
                    }
                }
            }
        };

        info!("Loading settings for user: {}", ticket.identity.uid);
        let outcome = self.load(&ticket.identity).await;

        let failure = {
            let mut state = self.state.write().await;
            if state.generation != ticket.generation {
                warn!(
                    "Discarding settings loaded for {}: identity changed",
                    ticket.identity.uid
                );
                return;
            }

            state.loading = false;
            match outcome {
                Ok(settings) => {
                    state.settings = Some(settings);
                    None
                }
                Err(e) => {
                    state.settings = Some(default_settings());
                    Some(e)
                }
            }
        };

        if let Some(e) = failure {
            log_failure("Error loading user settings", &e);
            self.notifier.error(&format!("{}: {}", LOAD_FAILED, e));
        }
    }

    /// Persist a full settings value for the current identity
    pub async fn save_settings(&self, settings: UserSettings) -> bool {
        let Some(ticket) = self.ticket().await else {
            self.notifier.error(SAVE_UNAUTHENTICATED);
            return false;
        };

        let _guard = self.save_lock.lock().await;
        self.save_locked(&ticket, settings).await
    }

    /// Shallow-merge `patch` into its section and save. Returns false when nothing is loaded.
    pub async fn update_settings(&self, patch: SectionPatch) -> bool {
        if self.settings().await.is_none() {
            debug!("Settings not loaded, ignoring {} update", patch.section());
            return false;
        }
        let Some(ticket) = self.ticket().await else {
            self.notifier.error(SAVE_UNAUTHENTICATED);
            return false;
        };

        let _guard = self.save_lock.lock().await;

        // Merge against the cache as it is after any queued saves
        let current = {
            let state = self.state.read().await;
            if state.generation != ticket.generation {
                warn!("Dropping {} update: identity changed", patch.section());
                return false;
            }
            state.settings.clone()
        };
        let Some(current) = current else {
            return false;
        };

        self.save_locked(&ticket, patch.applied(&current)).await
    }

    /// `update_settings` for a patch given as a JSON object
    pub async fn update_section(&self, section: SettingsSection, patch: Value) -> bool {
        match SectionPatch::from_json(section, patch) {
            Ok(patch) => self.update_settings(patch).await,
            Err(e) => {
                warn!("Rejected {} patch: {}", section, e);
                self.notifier.error(&format!("{}: {}", SAVE_FAILED, e));
                false
            }
        }
    }

    /// Save the defaults table, keeping the original creation time
    pub async fn reset_settings(&self) -> bool {
        let Some(ticket) = self.ticket().await else {
            self.notifier.error(SAVE_UNAUTHENTICATED);
            return false;
        };

        info!("Resetting settings for user: {}", ticket.identity.uid);
        let _guard = self.save_lock.lock().await;
        self.save_locked(&ticket, default_settings()).await
    }

    /// Acknowledge an export request; no export pipeline runs here
    pub async fn request_data_export(&self) -> bool {
        match self.ticket().await {
            None => {
                self.notifier.error(EXPORT_UNAUTHENTICATED);
                false
            }
            Some(ticket) => {
                info!("Data export requested for user: {}", ticket.identity.uid);
                self.notifier.success(EXPORT_SUBMITTED);
                true
            }
        }
    }

    /// Overwrite the settings document with defaults and fresh timestamps
    pub async fn delete_user_data(&self, confirmed: bool) -> bool {
        let Some(ticket) = self.ticket().await else {
            self.notifier.error(DELETE_UNAUTHENTICATED);
            return false;
        };
        if !confirmed {
            debug!("Data deletion not confirmed for {}", ticket.identity.uid);
            return false;
        }

        let _guard = self.save_lock.lock().await;
        info!("Resetting all data for user: {}", ticket.identity.uid);

        self.begin_save().await;
        let result = self.replace_with_defaults(&ticket.identity).await;
        self.end_save().await;

        match result {
            Ok(settings) => {
                self.adopt(&ticket, settings).await;
                self.notifier.success(DELETE_SUCCEEDED);
                true
            }
            Err(e) => {
                log_failure("Error deleting user data", &e);
                self.notifier.error(&format!("{}: {}", DELETE_FAILED, e));
                false
            }
        }
    }

    async fn ticket(&self) -> Option<Ticket> {
        let state = self.state.read().await;
        state.identity.clone().map(|identity| Ticket {
            identity,
            generation: state.generation,
        })
    }

    /// Caller must hold `save_lock`
    async fn save_locked(&self, ticket: &Ticket, mut settings: UserSettings) -> bool {
        if let Err(e) = validate_settings(&settings) {
            warn!("Rejected settings for {}: {}", ticket.identity.uid, e);
            self.notifier.error(&format!("{}: {}", SAVE_FAILED, e));
            return false;
        }

        if settings.created_at.is_none() {
            let state = self.state.read().await;
            if state.generation == ticket.generation {
                settings.created_at = state.settings.as_ref().and_then(|s| s.created_at);
            }
        }

        debug!("Saving settings for user: {}", ticket.identity.uid);
        self.begin_save().await;
        let result = self.write_settings(&ticket.identity, settings).await;
        self.end_save().await;

        match result {
            Ok(saved) => {
                self.adopt(ticket, saved).await;
                info!("Settings saved for user: {}", ticket.identity.uid);
                self.notifier.success(SAVE_SUCCEEDED);
                true
            }
            Err(e) => {
                log_failure("Error saving settings", &e);
                self.notifier.error(&format!("{}: {}", SAVE_FAILED, e));
                false
            }
        }
    }

    /// Replace the cache unless the identity changed since `ticket` was issued
    async fn adopt(&self, ticket: &Ticket, settings: UserSettings) -> bool {
        let mut state = self.state.write().await;
        if state.generation != ticket.generation {
            warn!(
                "Discarding saved settings for {}: identity changed",
                ticket.identity.uid
            );
            return false;
        }
        state.settings = Some(settings);
        true
    }

    async fn begin_save(&self) {
        self.state.write().await.saves_in_flight += 1;
    }

    async fn end_save(&self) {
        let mut state = self.state.write().await;
        state.saves_in_flight = state.saves_in_flight.saturating_sub(1);
    }

    async fn load(&self, identity: &Identity) -> SettingsResult<UserSettings> {
        self.ensure_user_document(identity).await?;

        let path = DocumentPath::user_settings(&identity.uid)?;
        if let Some(doc) = self.store.get(&path).await? {
            debug!("Settings found for user: {}", identity.uid);
            return UserSettings::from_document(doc);
        }

        info!("Creating default settings for user: {}", identity.uid);
        self.create_settings_document(&path, defaults_for(identity))
            .await
    }

    async fn ensure_user_document(&self, identity: &Identity) -> SettingsResult<()> {
        let path = DocumentPath::user(&identity.uid)?;
        if self.store.get(&path).await?.is_some() {
            return Ok(());
        }

        info!("Creating user document for: {}", identity.uid);
        let mut doc = Document::new();
        doc.insert("email".to_string(), Value::from(identity.email.as_str()));
        doc.insert(
            "displayName".to_string(),
            Value::from(identity.display_name_or_empty()),
        );
        doc.insert("createdAt".to_string(), server_timestamp());
        doc.insert("lastLogin".to_string(), server_timestamp());

        self.store.set(&path, doc, SetOptions::overwrite()).await?;
        Ok(())
    }

    /// Write a whole settings document stamped with fresh `createdAt` and `updatedAt`
    async fn create_settings_document(
        &self,
        path: &DocumentPath,
        mut settings: UserSettings,
    ) -> SettingsResult<UserSettings> {
        let mut doc = settings.sections_document()?;
        doc.insert("createdAt".to_string(), server_timestamp());
        doc.insert("updatedAt".to_string(), server_timestamp());

        let written = self.store.set(path, doc, SetOptions::overwrite()).await?;
        settings.created_at = Some(written.write_time);
        settings.updated_at = Some(written.write_time);
        Ok(settings)
    }

    async fn write_settings(
        &self,
        identity: &Identity,
        mut settings: UserSettings,
    ) -> SettingsResult<UserSettings> {
        self.ensure_user_document(identity).await?;

        let path = DocumentPath::user_settings(&identity.uid)?;
        if !self.store.exists(&path).await? {
            debug!("Creating new settings document");
            return self.create_settings_document(&path, settings).await;
        }

        debug!("Updating existing settings document");
        let mut doc = settings.sections_document()?;
        doc.insert("updatedAt".to_string(), server_timestamp());

        let written = self.store.update(&path, doc).await?;
        settings.updated_at = Some(written.write_time);
        Ok(settings)
    }

    async fn replace_with_defaults(&self, identity: &Identity) -> SettingsResult<UserSettings> {
        let path = DocumentPath::user_settings(&identity.uid)?;
        self.create_settings_document(&path, default_settings())
            .await
    }
}

fn log_failure(context: &str, err: &SettingsError) {
    error!(code = err.code(), message = %err, "{}", context);
}
