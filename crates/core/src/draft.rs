//! Draft persistence for an in-progress wizard session.
//!
//! A draft is a JSON snapshot of the session written under one fixed storage
//! key. Attachment content never leaves memory: every attached file is
//! replaced by its display name before the snapshot is written, and those
//! names come back as empty slots on restore. Drafts older than the
//! freshness window are discarded when read.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attachment::{CONTENT_REF_KEY, DISPLAY_NAME_KEY};
use crate::config::WizardConfig;
use crate::error::CoreError;
use crate::registration::{FormVariant, RegistrationTypeCode};
use crate::storage::DraftStorage;
use crate::types::{StepNumber, Timestamp};
use crate::wizard::WizardSession;

/// Storage key holding the single permanent-registration draft.
pub const DRAFT_STORAGE_KEY: &str = "ncahp_permanent_registration_draft";

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A file that was attached when the draft was saved and must be picked
/// again after restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachedAttachment {
    /// Dotted field path of the slot.
    pub path: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    /// Form data with attachments replaced by their display names.
    pub form_data: Value,
    pub current_step: StepNumber,
    #[serde(default)]
    pub highest_step_reached: StepNumber,
    pub active_form_type: FormVariant,
    #[serde(default)]
    pub registration_type: Option<RegistrationTypeCode>,
    #[serde(default)]
    pub detached_attachments: Vec<DetachedAttachment>,
    pub saved_at: Timestamp,
}

impl DraftSnapshot {
    /// Project a session into its file-stripped draft form.
    pub fn capture(session: &WizardSession, now: Timestamp) -> Result<Self, CoreError> {
        let mut form_data = session.form_data().to_value()?;
        let mut detached_attachments = Vec::new();
        strip_attachments(&mut form_data, "", &mut detached_attachments);

        Ok(Self {
            form_data,
            current_step: session.current_step(),
            highest_step_reached: session.highest_step_reached(),
            active_form_type: session.active_schema().variant,
            registration_type: session.registration_type(),
            detached_attachments,
            saved_at: now,
        })
    }

    /// Whether the draft is still inside the freshness window at `now`.
    pub fn is_fresh(&self, now: Timestamp, freshness: Duration) -> bool {
        // A save timestamp in the future counts as age zero.
        let age = (now - self.saved_at).to_std().unwrap_or_default();
        age < freshness
    }
}

fn attachment_name(node: &Value) -> Option<String> {
    let obj = node.as_object()?;
    if !obj.contains_key(CONTENT_REF_KEY) {
        return None;
    }
    Some(
        obj.get(DISPLAY_NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    )
}

fn child_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Replace every serialized attachment handle with its display name.
fn strip_attachments(node: &mut Value, path: &str, detached: &mut Vec<DetachedAttachment>) {
    if let Some(file_name) = attachment_name(node) {
        detached.push(DetachedAttachment {
            path: path.to_string(),
            file_name: file_name.clone(),
        });
        *node = Value::String(file_name);
        return;
    }

    match node {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                strip_attachments(child, &child_path(path, key), detached);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                strip_attachments(child, &child_path(path, &index.to_string()), detached);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Saves and restores the draft slot in a [`DraftStorage`] backend.
#[derive(Debug)]
pub struct DraftPersistence<S> {
    storage: S,
    freshness: Duration,
    autosave_interval: Option<Duration>,
}

impl<S: DraftStorage> DraftPersistence<S> {
    pub fn new(storage: S, config: &WizardConfig) -> Self {
        Self {
            storage,
            freshness: config.draft_freshness,
            autosave_interval: config.autosave_interval,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Write the session's draft, replacing any previous one, and mark the
    /// session saved.
    pub fn save(
        &mut self,
        session: &mut WizardSession,
        now: Timestamp,
    ) -> Result<DraftSnapshot, CoreError> {
        let snapshot = DraftSnapshot::capture(session, now)?;
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set_item(DRAFT_STORAGE_KEY, &json)?;
        session.mark_saved(now);

        tracing::info!(
            variant = snapshot.active_form_type.as_str(),
            step = snapshot.current_step,
            detached = snapshot.detached_attachments.len(),
            "Draft saved"
        );
        Ok(snapshot)
    }

    /// Read the draft if present, well-formed and fresh.
    ///
    /// Stale and malformed drafts are removed from storage.
    pub fn load(&mut self, now: Timestamp) -> Result<Option<DraftSnapshot>, CoreError> {
        let Some(raw) = self.storage.get_item(DRAFT_STORAGE_KEY)? else {
            return Ok(None);
        };

        let snapshot: DraftSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed draft");
                self.storage.remove_item(DRAFT_STORAGE_KEY)?;
                return Ok(None);
            }
        };

        if !snapshot.is_fresh(now, self.freshness) {
            tracing::info!(saved_at = %snapshot.saved_at, "Discarding stale draft");
            self.storage.remove_item(DRAFT_STORAGE_KEY)?;
            return Ok(None);
        }

        tracing::info!(
            variant = snapshot.active_form_type.as_str(),
            step = snapshot.current_step,
            "Draft loaded"
        );
        Ok(Some(snapshot))
    }

    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.storage.remove_item(DRAFT_STORAGE_KEY)?;
        tracing::info!("Draft cleared");
        Ok(())
    }

    /// Save when interval autosave is configured, the session has unsaved
    /// changes and the interval has elapsed since the last save (or since
    /// the session started). Returns whether a save happened.
    pub fn autosave_if_due(
        &mut self,
        session: &mut WizardSession,
        now: Timestamp,
    ) -> Result<bool, CoreError> {
        let Some(interval) = self.autosave_interval else {
            return Ok(false);
        };
        if !session.has_unsaved_changes() {
            return Ok(false);
        }

        let since = session.last_saved_at().unwrap_or(session.started_at());
        let elapsed = (now - since).to_std().unwrap_or_default();
        if elapsed < interval {
            return Ok(false);
        }

        self.save(session, now)?;
        Ok(true)
    }
}
