//! Registration wizard controller.
//!
//! A [`WizardController`] exclusively owns one [`WizardSession`]: the active
//! form layout, the step cursor and the live form data. Renderers read a
//! [`StepView`] and send every change back through the controller's mutator
//! methods; nothing else can touch the session.
//!
//! Step numbers run from 1 (the registration type selector) to the layout's
//! terminal declaration step. `next` is gated by the current step's
//! completion rules and is a silent no-op when they fail; `previous` and
//! `jump_to` are never gated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::attachment::{AttachmentHandle, AttachmentPolicy, CONTENT_REF_KEY};
use crate::config::WizardConfig;
use crate::draft::{DraftPersistence, DraftSnapshot};
use crate::error::CoreError;
use crate::field_path::FieldPath;
use crate::forms::{split_full_name, FormData, SharedProfile};
use crate::registration::{FormVariant, RegistrationTypeCode};
use crate::schema::{schema, FormSchema, StepDescriptor, ENTRY_STEP};
use crate::storage::DraftStorage;
use crate::types::{StepNumber, Timestamp};
use crate::validation::{evaluate_step, ValidationMode, ValidationResult};

// ---------------------------------------------------------------------------
// Applicant
// ---------------------------------------------------------------------------

/// Registration the applicant already holds with the council.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStanding {
    /// No registration, or a permanent one being renewed.
    #[default]
    Unregistered,
    Provisional,
    Interim,
}

impl ApplicantStanding {
    pub fn may_apply_for_permanent(self) -> bool {
        matches!(self, Self::Unregistered)
    }
}

/// The signed-in applicant whose profile pre-fills a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub full_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub mobile: String,
    pub state_from_aadhaar: String,
    #[serde(default)]
    pub standing: ApplicantStanding,
}

impl Applicant {
    pub fn profile(&self) -> SharedProfile {
        let (first_name, middle_name, last_name) = split_full_name(&self.full_name);
        SharedProfile {
            first_name,
            middle_name,
            last_name,
            gender: self.gender.clone(),
            date_of_birth: self.date_of_birth.clone(),
            email: self.email.clone(),
            phone: self.mobile.clone(),
            state_from_aadhaar: self.state_from_aadhaar.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
        }
    }
}

/// State of one wizard run. Read-only outside the controller.
#[derive(Debug, Clone)]
pub struct WizardSession {
    active_schema: &'static FormSchema,
    registration_type: Option<RegistrationTypeCode>,
    current_step: StepNumber,
    highest_step_reached: StepNumber,
    form_data: FormData,
    has_unsaved_changes: bool,
    last_saved_at: Option<Timestamp>,
    started_at: Timestamp,
    submitted_at: Option<Timestamp>,
    status: SessionStatus,
}

impl WizardSession {
    pub fn active_schema(&self) -> &'static FormSchema {
        self.active_schema
    }

    pub fn registration_type(&self) -> Option<RegistrationTypeCode> {
        self.registration_type
    }

    pub fn current_step(&self) -> StepNumber {
        self.current_step
    }

    pub fn highest_step_reached(&self) -> StepNumber {
        self.highest_step_reached
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn last_saved_at(&self) -> Option<Timestamp> {
        self.last_saved_at
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn submitted_at(&self) -> Option<Timestamp> {
        self.submitted_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub(crate) fn mark_saved(&mut self, now: Timestamp) {
        self.has_unsaved_changes = false;
        self.last_saved_at = Some(now);
    }

    fn move_to(&mut self, step: StepNumber) {
        self.current_step = step;
        self.highest_step_reached = self.highest_step_reached.max(step);
        self.has_unsaved_changes = true;
    }
}

// ---------------------------------------------------------------------------
// Rendering contract
// ---------------------------------------------------------------------------

/// Everything a renderer needs to draw the active step.
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a> {
    pub descriptor: &'static StepDescriptor,
    pub position: StepNumber,
    pub total: StepNumber,
    pub variant: FormVariant,
    pub data: &'a FormData,
    pub can_advance: bool,
    pub is_terminal: bool,
    pub highest_step_reached: StepNumber,
}

/// Stateless presentation of one step. Implementations draw from the view
/// and route edits back through the controller.
pub trait StepRenderer {
    type Output;

    fn render(&self, view: &StepView<'_>) -> Self::Output;
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct WizardController {
    session: WizardSession,
    config: WizardConfig,
}

impl WizardController {
    /// Start a new session on the main layout, pre-filled from the
    /// applicant's profile.
    ///
    /// Applicants holding a provisional or interim registration cannot
    /// apply for permanent registration.
    pub fn new(
        config: WizardConfig,
        applicant: &Applicant,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if !applicant.standing.may_apply_for_permanent() {
            return Err(CoreError::Forbidden(format!(
                "Applicants holding {} registration cannot apply for permanent registration",
                match applicant.standing {
                    ApplicantStanding::Provisional => "provisional",
                    _ => "interim",
                }
            )));
        }

        let mut form_data = FormData::initial(FormVariant::Main);
        form_data.apply_profile(&applicant.profile());

        tracing::info!(
            validation_mode = config.validation_mode.as_str(),
            "Wizard session started"
        );

        Ok(Self {
            session: WizardSession {
                active_schema: schema(FormVariant::Main),
                registration_type: None,
                current_step: ENTRY_STEP,
                highest_step_reached: ENTRY_STEP,
                form_data,
                has_unsaved_changes: false,
                last_saved_at: None,
                started_at: now,
                submitted_at: None,
                status: SessionStatus::InProgress,
            },
            config,
        })
    }

    /// Rebuild a session from a draft. Attachments in the draft come back
    /// as empty slots.
    pub fn restore(
        snapshot: DraftSnapshot,
        config: WizardConfig,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        let variant = snapshot.active_form_type;
        let active_schema = schema(variant);
        active_schema.validate_step_number(snapshot.current_step)?;

        if let Some(code) = snapshot.registration_type {
            if code.variant() != variant {
                return Err(CoreError::Validation(format!(
                    "Draft registration type {code} does not use the {} layout",
                    variant.label()
                )));
            }
        }

        let form_data = FormData::from_value(variant, snapshot.form_data)?;
        let highest_step_reached = snapshot
            .highest_step_reached
            .max(snapshot.current_step)
            .min(active_schema.terminal_step());

        tracing::info!(
            variant = variant.as_str(),
            step = snapshot.current_step,
            reattach = snapshot.detached_attachments.len(),
            "Wizard session restored from draft"
        );

        Ok(Self {
            session: WizardSession {
                active_schema,
                registration_type: snapshot.registration_type,
                current_step: snapshot.current_step,
                highest_step_reached,
                form_data,
                has_unsaved_changes: false,
                last_saved_at: Some(snapshot.saved_at),
                started_at: now,
                submitted_at: None,
                status: SessionStatus::InProgress,
            },
            config,
        })
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    fn ensure_in_progress(&self) -> Result<(), CoreError> {
        match self.session.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Submitted => Err(CoreError::Conflict(
                "The application has already been submitted".into(),
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Registration type
    // -----------------------------------------------------------------------

    /// Activate the layout for `code`.
    ///
    /// When the layout changes, the new layout starts from its initial data
    /// with the shared profile fields and profession carried over, and the
    /// highest step reached is reset. Reselecting a code on the same layout
    /// keeps the data. Either way the cursor returns to the entry step.
    pub fn select_registration_type(&mut self, code: RegistrationTypeCode) -> Result<(), CoreError> {
        self.ensure_in_progress()?;

        let previous = self.session.form_data.variant();
        let target = code.variant();

        if previous != target {
            let profile = self.session.form_data.profile();
            let profession = self.session.form_data.profession().to_string();

            let mut data = FormData::initial(target);
            data.apply_profile(&profile);
            data.set_profession(&profession);

            self.session.form_data = data;
            self.session.active_schema = schema(target);
            self.session.highest_step_reached = ENTRY_STEP;
        }

        self.session.form_data.set_registration_type(code.as_str());
        self.session.registration_type = Some(code);
        self.session.current_step = ENTRY_STEP;
        self.session.has_unsaved_changes = true;

        tracing::info!(
            code = code.as_str(),
            from = previous.as_str(),
            to = target.as_str(),
            "Registration type selected"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Field mutation
    // -----------------------------------------------------------------------

    fn active_document(&self, variant: FormVariant) -> Result<Value, CoreError> {
        let active = self.session.form_data.variant();
        if variant != active {
            return Err(CoreError::Conflict(format!(
                "{} is not the active form; the session is on {}",
                variant.label(),
                active.label()
            )));
        }
        self.session.form_data.to_value()
    }

    fn replace_document(&mut self, doc: Value, path: &FieldPath) -> Result<(), CoreError> {
        let variant = self.session.form_data.variant();
        let data = FormData::from_value(variant, doc).map_err(|e| {
            CoreError::Validation(format!("Invalid value for '{path}': {e}"))
        })?;
        self.session.form_data = data;
        self.session.has_unsaved_changes = true;
        Ok(())
    }

    /// Set the value at a dotted path of the active form.
    ///
    /// The path must name an existing field and the value must have that
    /// field's shape; otherwise a `Validation` error is returned and the
    /// data is left as it was. File slots, and any record holding one, go
    /// through [`Self::attach_file`] and [`Self::detach_file`]. Whole rows of
    /// a repeatable list are added and removed with [`Self::add_entry`] and
    /// [`Self::remove_entry`]; a list itself cannot be replaced.
    pub fn update_field(
        &mut self,
        variant: FormVariant,
        path: &str,
        value: Value,
    ) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        let path = FieldPath::parse(path)?;
        if path.root() == "registrationType" {
            return Err(CoreError::Validation(
                "The registration type is changed with select_registration_type".into(),
            ));
        }

        let mut doc = self.active_document(variant)?;
        if path.segments().len() == 1 && self.session.form_data.list_spec(path.root()).is_some() {
            return Err(CoreError::Validation(format!(
                "'{path}' is a repeatable list; use add_entry or remove_entry"
            )));
        }
        let current = path
            .get(&doc)
            .ok_or_else(|| CoreError::Validation(format!("Unknown field '{path}'")))?;
        if contains_file_slot(current) || contains_attachment(&value) {
            return Err(CoreError::Validation(format!(
                "'{path}' holds an attachment; use attach_file or detach_file"
            )));
        }

        path.set(&mut doc, value)?;
        self.replace_document(doc, &path)?;
        tracing::debug!(field = %path, "Field updated");
        Ok(())
    }

    fn file_slot_document(&self, path: &FieldPath) -> Result<Value, CoreError> {
        let doc = self.session.form_data.to_value()?;
        match path.get(&doc) {
            Some(slot) if is_file_slot(slot) => Ok(doc),
            Some(_) => Err(CoreError::Validation(format!(
                "'{path}' is not a file field"
            ))),
            None => Err(CoreError::Validation(format!("Unknown field '{path}'"))),
        }
    }

    /// Attach a file to the slot at `path` after checking the slot's
    /// attachment policy. A rejected file leaves the form untouched.
    pub fn attach_file(&mut self, path: &str, handle: AttachmentHandle) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        let path = FieldPath::parse(path)?;
        let mut doc = self.file_slot_document(&path)?;

        let policy = AttachmentPolicy::for_path(&path.to_string());
        if let Err(e) = policy.check(&handle) {
            tracing::warn!(
                field = %path,
                file = %handle.display_name,
                size_bytes = handle.size_bytes,
                error = %e,
                "Attachment rejected"
            );
            return Err(e);
        }

        path.set(&mut doc, serde_json::to_value(&handle)?)?;
        self.replace_document(doc, &path)?;
        tracing::debug!(field = %path, file = %handle.display_name, "File attached");
        Ok(())
    }

    pub fn detach_file(&mut self, path: &str) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        let path = FieldPath::parse(path)?;
        let mut doc = self.file_slot_document(&path)?;
        path.set(&mut doc, Value::Null)?;
        self.replace_document(doc, &path)?;
        tracing::debug!(field = %path, "File detached");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Repeatable lists
    // -----------------------------------------------------------------------

    /// Append a blank row to a repeatable list; returns the new row's id.
    pub fn add_entry(&mut self, list: &str) -> Result<String, CoreError> {
        self.ensure_in_progress()?;
        let data = &self.session.form_data;
        if data.list_spec(list).is_none() {
            return Err(CoreError::Validation(format!(
                "'{list}' is not a repeatable list of {}",
                data.variant().label()
            )));
        }

        let id = Uuid::new_v4().to_string();
        let entry = data
            .blank_entry(list, id.clone())?
            .ok_or_else(|| CoreError::Internal(format!("No blank entry for list '{list}'")))?;

        let mut doc = data.to_value()?;
        let path = FieldPath::parse(list)?;
        path.get_mut(&mut doc)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| CoreError::Internal(format!("List '{list}' is not an array")))?
            .push(entry);
        self.replace_document(doc, &path)?;

        tracing::debug!(list, id = %id, "Entry added");
        Ok(id)
    }

    /// Remove the row at `index`, keeping the list's minimum row count.
    pub fn remove_entry(&mut self, list: &str, index: usize) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        let data = &self.session.form_data;
        let spec = data.list_spec(list).ok_or_else(|| {
            CoreError::Validation(format!(
                "'{list}' is not a repeatable list of {}",
                data.variant().label()
            ))
        })?;

        let mut doc = data.to_value()?;
        let path = FieldPath::parse(list)?;
        let rows = path
            .get_mut(&mut doc)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| CoreError::Internal(format!("List '{list}' is not an array")))?;

        if index >= rows.len() {
            return Err(CoreError::NotFound {
                entity: "list entry",
                id: format!("{list}.{index}"),
            });
        }
        if rows.len() <= spec.min_entries {
            return Err(CoreError::Validation(format!(
                "'{list}' must keep at least {} entries",
                spec.min_entries
            )));
        }

        rows.remove(index);
        self.replace_document(doc, &path)?;
        tracing::debug!(list, index, "Entry removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    /// Rule violations of the current step, evaluated regardless of the
    /// configured validation mode.
    pub fn step_report(&self) -> Result<ValidationResult, CoreError> {
        let descriptor = self.session.active_schema.step(self.session.current_step)?;
        evaluate_step(descriptor.kind, &self.session.form_data)
    }

    pub fn can_advance(&self) -> bool {
        match self.config.validation_mode {
            ValidationMode::Bypass => true,
            ValidationMode::Strict => match self.step_report() {
                Ok(report) => report.is_valid,
                Err(e) => {
                    tracing::error!(error = %e, "Step evaluation failed");
                    false
                }
            },
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Advance one step if the current step is complete. Returns whether the
    /// cursor moved.
    pub fn next(&mut self) -> bool {
        if self.ensure_in_progress().is_err() {
            return false;
        }
        let current = self.session.current_step;
        if current >= self.session.active_schema.terminal_step() {
            return false;
        }
        if !self.can_advance() {
            tracing::debug!(step = current, "Advance rejected, step incomplete");
            return false;
        }
        self.session.move_to(current + 1);
        tracing::debug!(from = current, to = current + 1, "Step advanced");
        true
    }

    /// Go back one step. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.ensure_in_progress().is_err() {
            return false;
        }
        let current = self.session.current_step;
        if current <= ENTRY_STEP {
            return false;
        }
        self.session.move_to(current - 1);
        tracing::debug!(from = current, to = current - 1, "Step back");
        true
    }

    /// Move to any step of the active layout.
    pub fn jump_to(&mut self, step: StepNumber) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        self.session.active_schema.validate_step_number(step)?;
        let from = self.session.current_step;
        self.session.move_to(step);
        tracing::debug!(from, to = step, "Step jump");
        Ok(())
    }

    /// Submit the application from the terminal step.
    pub fn submit(&mut self, now: Timestamp) -> Result<(), CoreError> {
        self.ensure_in_progress()?;
        let terminal = self.session.active_schema.terminal_step();
        if self.session.current_step != terminal {
            return Err(CoreError::Conflict(format!(
                "Submission is only possible from step {terminal}"
            )));
        }
        if !self.can_advance() {
            let report = self.step_report()?;
            let messages: Vec<_> = report.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(CoreError::Validation(messages.join("; ")));
        }

        self.session.status = SessionStatus::Submitted;
        self.session.submitted_at = Some(now);
        self.session.has_unsaved_changes = false;
        tracing::info!(
            code = self.session.registration_type.map(|c| c.as_str()),
            variant = self.session.form_data.variant().as_str(),
            "Application submitted"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Rendering and drafts
    // -----------------------------------------------------------------------

    pub fn current_step_view(&self) -> Result<StepView<'_>, CoreError> {
        let schema = self.session.active_schema;
        let position = self.session.current_step;
        Ok(StepView {
            descriptor: schema.step(position)?,
            position,
            total: schema.len(),
            variant: schema.variant,
            data: &self.session.form_data,
            can_advance: self.can_advance(),
            is_terminal: position == schema.terminal_step(),
            highest_step_reached: self.session.highest_step_reached,
        })
    }

    pub fn render_with<R: StepRenderer>(&self, renderer: &R) -> Result<R::Output, CoreError> {
        Ok(renderer.render(&self.current_step_view()?))
    }

    pub fn save_draft<S: DraftStorage>(
        &mut self,
        drafts: &mut DraftPersistence<S>,
        now: Timestamp,
    ) -> Result<DraftSnapshot, CoreError> {
        drafts.save(&mut self.session, now)
    }

    pub fn autosave_if_due<S: DraftStorage>(
        &mut self,
        drafts: &mut DraftPersistence<S>,
        now: Timestamp,
    ) -> Result<bool, CoreError> {
        drafts.autosave_if_due(&mut self.session, now)
    }
}

/// File slots serialize as `null` (empty) or as an attachment handle. No
/// other form field is ever `null`.
fn is_file_slot(value: &Value) -> bool {
    value.is_null() || value.get(CONTENT_REF_KEY).is_some()
}

/// Whether `value` is a file slot or holds one anywhere below it.
fn contains_file_slot(value: &Value) -> bool {
    if is_file_slot(value) {
        return true;
    }
    match value {
        Value::Object(map) => map.values().any(contains_file_slot),
        Value::Array(items) => items.iter().any(contains_file_slot),
        _ => false,
    }
}

fn contains_attachment(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key(CONTENT_REF_KEY) || map.values().any(contains_attachment)
        }
        Value::Array(items) => items.iter().any(contains_attachment),
        _ => false,
    }
}
