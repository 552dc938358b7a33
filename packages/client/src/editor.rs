//! The settings editing workflow.
//!
//! [`SettingsEditor`] owns the last-loaded record and the operator's draft,
//! and implements the page-level behavior: load, field edits, image uploads
//! with a local size pre-check, create-or-update submission with a no-op
//! guard, and reset-to-defaults followed by a reload.
//!
//! All failures are recovered here and reported to the caller as transient
//! outcomes; nothing is fatal and nothing is retried automatically.

use opshub_settings::{
    validate_draft, validate_upload_size, DefaultLanguage, ImageKind, SettingsDraft, SystemSetting,
    ValidationError,
};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::SettingsClient;
use crate::error::ClientError;

/// Lifecycle of the editor. `Submitting` doubles as the busy flag that
/// refuses a second submission while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Loading,
    Submitting,
}

/// Transient, user-facing outcome of an editor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loaded,
    Saved,
    Created,
    NothingToSave,
    ImageUploaded(ImageKind),
    ResetApplied,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loaded => write!(f, "Settings loaded"),
            Notice::Saved => write!(f, "Settings saved"),
            Notice::Created => write!(f, "Settings created"),
            Notice::NothingToSave => write!(f, "No changes to save"),
            Notice::ImageUploaded(kind) => write!(f, "Uploaded new {}", kind),
            Notice::ResetApplied => write!(f, "Settings restored to defaults"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    /// Local field validation failure; blocks submission before any network
    /// call is made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Server-reported upload failure, message surfaced verbatim.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Generic failure on load, submit or reset.
    #[error("Request failed: {0}")]
    Request(String),

    #[error("A submission is already in flight")]
    Busy,
}

impl From<ClientError> for EditorError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Upload(message) => EditorError::Upload(message),
            other => EditorError::Request(other.to_string()),
        }
    }
}

/// Owns the draft and drives the settings workflow against a
/// [`SettingsClient`].
pub struct SettingsEditor {
    client: SettingsClient,
    loaded: Option<SystemSetting>,
    draft: SettingsDraft,
    state: EditorState,
}

impl SettingsEditor {
    pub fn new(client: SettingsClient) -> Self {
        Self {
            client,
            loaded: None,
            draft: SettingsDraft::default(),
            state: EditorState::Idle,
        }
    }

    /// The record as last reported by the server, if any exists yet.
    pub fn loaded(&self) -> Option<&SystemSetting> {
        self.loaded.as_ref()
    }

    pub fn draft(&self) -> &SettingsDraft {
        &self.draft
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn set_system_name(&mut self, value: impl Into<String>) {
        self.draft.system_name = value.into();
    }

    pub fn set_system_title(&mut self, value: Option<String>) {
        self.draft.system_title = value;
    }

    pub fn set_default_password(&mut self, value: impl Into<String>) {
        self.draft.default_password = value.into();
    }

    pub fn set_default_language(&mut self, value: DefaultLanguage) {
        self.draft.default_language = Some(value);
    }

    /// Fetch the current settings and rebuild the draft from them, image
    /// references included. No retry on failure; the operator refreshes.
    pub async fn load(&mut self) -> Result<Notice, EditorError> {
        self.state = EditorState::Loading;
        let result = self.client.get_setting().await;
        self.state = EditorState::Idle;

        match result {
            Ok(record) => {
                self.draft = record
                    .as_ref()
                    .map(SettingsDraft::from_record)
                    .unwrap_or_default();
                self.loaded = record;
                info!(exists = self.loaded.is_some(), "Loaded system settings");
                Ok(Notice::Loaded)
            }
            Err(e) => {
                warn!("Failed to load system settings: {}", e);
                Err(e.into())
            }
        }
    }

    /// Upload an image into the draft.
    ///
    /// Files of 1 MiB or more are rejected locally before anything is sent.
    /// On success the server-assigned reference replaces the draft field for
    /// `kind`; the stored record is untouched until the next submit.
    pub async fn upload_image(
        &mut self,
        kind: ImageKind,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Notice, EditorError> {
        validate_upload_size(bytes.len())?;

        let reference = self.client.upload_image(kind, filename, bytes).await?;
        info!(kind = %kind, "Image uploaded");
        match kind {
            ImageKind::Favicon => self.draft.favicon = Some(reference),
            ImageKind::Logo => self.draft.system_logo = Some(reference),
        }
        Ok(Notice::ImageUploaded(kind))
    }

    /// Validate and persist the draft.
    ///
    /// Aborts without a network call when validation fails or when no field
    /// differs from the loaded record. Creates the record when none existed,
    /// updates it (carrying the loaded version token) otherwise.
    pub async fn submit(&mut self) -> Result<Notice, EditorError> {
        if self.state == EditorState::Submitting {
            return Err(EditorError::Busy);
        }

        validate_draft(&self.draft)?;

        if let Some(previous) = &self.loaded {
            if !self.draft.differs_from(previous) {
                info!("Submit skipped: no field changed");
                return Ok(Notice::NothingToSave);
            }
        }

        let token = self
            .loaded
            .as_ref()
            .and_then(|record| record.object_version_number);
        let payload = self.draft.clone().into_payload(token);
        let creating = self.loaded.is_none();

        self.state = EditorState::Submitting;
        let result = if creating {
            self.client.create_setting(&payload).await
        } else {
            self.client.update_setting(&payload).await
        };
        self.state = EditorState::Idle;

        match result {
            Ok(stored) => {
                info!(created = creating, "System settings persisted");
                self.draft = SettingsDraft::from_record(&stored);
                self.loaded = Some(stored);
                Ok(if creating { Notice::Created } else { Notice::Saved })
            }
            Err(e) => {
                warn!("Failed to persist system settings: {}", e);
                Err(e.into())
            }
        }
    }

    /// Restore server-side defaults, then reload.
    ///
    /// The confirmation notice is sequenced after both the reset call and the
    /// reload have resolved, so the draft already reflects the restored
    /// values when the caller sees it.
    pub async fn reset(&mut self) -> Result<Notice, EditorError> {
        self.client.reset_setting().await.map_err(|e| {
            warn!("Failed to reset system settings: {}", e);
            EditorError::from(e)
        })?;
        self.load().await?;
        info!("System settings reset to defaults");
        Ok(Notice::ResetApplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_is_refused_while_one_is_in_flight() {
        let client = SettingsClient::new("http://localhost:1", "token").unwrap();
        let mut editor = SettingsEditor::new(client);
        editor.state = EditorState::Submitting;

        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, EditorError::Busy));
        // The guard must not have touched the state.
        assert_eq!(editor.state(), EditorState::Submitting);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        // Port 1 is not listening; a network attempt would surface as a
        // Request error rather than the expected Validation error.
        let client = SettingsClient::new("http://localhost:1", "token").unwrap();
        let mut editor = SettingsEditor::new(client);
        editor.set_system_name("Console");
        editor.set_default_password("bad pw!");
        editor.set_default_language(DefaultLanguage::ZhCn);

        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
    }
}
