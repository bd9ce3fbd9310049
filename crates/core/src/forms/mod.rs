//! Typed form data for the four application layouts.
//!
//! Each layout is a plain serde struct. [`FormData`] is the tagged union the
//! wizard holds; field-level edits go through its JSON projection so that a
//! value of the wrong shape is rejected by deserialization instead of being
//! written.

pub mod form_2a;
pub mod form_2b;
pub mod form_2c;
pub mod main_form;
pub mod shared;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::registration::FormVariant;

pub use form_2a::Form2AData;
pub use form_2b::Form2BData;
pub use form_2c::Form2CData;
pub use main_form::MainFormData;

// ---------------------------------------------------------------------------
// Shared profile
// ---------------------------------------------------------------------------

/// Identity and contact fields carried across a registration type change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedProfile {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    /// Empty on layouts that do not record an Aadhaar state.
    pub state_from_aadhaar: String,
}

/// Split a full name on whitespace into first, middle and last parts.
///
/// One word is a first name only; the last word of two or more is the last
/// name and anything between becomes the middle name.
pub fn split_full_name(full_name: &str) -> (String, String, String) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new(), String::new()),
        [first] => (first.to_string(), String::new(), String::new()),
        [first, middle @ .., last] => (first.to_string(), middle.join(" "), last.to_string()),
    }
}

pub fn join_full_name(profile: &SharedProfile) -> String {
    [
        profile.first_name.as_str(),
        profile.middle_name.as_str(),
        profile.last_name.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

// ---------------------------------------------------------------------------
// Layout contract
// ---------------------------------------------------------------------------

/// A repeatable list field and the number of rows it must keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    pub field: &'static str,
    pub min_entries: usize,
}

impl ListSpec {
    pub const fn new(field: &'static str, min_entries: usize) -> Self {
        Self { field, min_entries }
    }
}

/// Behavior every application layout provides to the wizard.
pub trait FormRecord: Serialize + DeserializeOwned + Clone {
    const VARIANT: FormVariant;

    /// Data a fresh session starts with, including seeded list rows.
    fn initial() -> Self;

    /// Repeatable list fields of this layout.
    fn lists() -> &'static [ListSpec];

    /// JSON for a new empty row of `list`, or `None` if `list` is not a
    /// repeatable field of this layout.
    fn blank_entry(list: &str, id: String) -> Result<Option<Value>, CoreError>;

    fn profile(&self) -> SharedProfile;
    fn apply_profile(&mut self, profile: &SharedProfile);

    fn registration_type(&self) -> &str;
    fn set_registration_type(&mut self, code: &str);
    fn profession(&self) -> &str;
    fn set_profession(&mut self, profession: &str);
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FormData {
    Main(MainFormData),
    Form2A(Form2AData),
    Form2B(Form2BData),
    Form2C(Form2CData),
}

macro_rules! with_form {
    ($data:expr, $form:ident => $body:expr) => {
        match $data {
            FormData::Main($form) => $body,
            FormData::Form2A($form) => $body,
            FormData::Form2B($form) => $body,
            FormData::Form2C($form) => $body,
        }
    };
}

impl FormData {
    pub fn initial(variant: FormVariant) -> Self {
        match variant {
            FormVariant::Main => Self::Main(MainFormData::initial()),
            FormVariant::Form2A => Self::Form2A(Form2AData::initial()),
            FormVariant::Form2B => Self::Form2B(Form2BData::initial()),
            FormVariant::Form2C => Self::Form2C(Form2CData::initial()),
        }
    }

    pub fn variant(&self) -> FormVariant {
        match self {
            Self::Main(_) => FormVariant::Main,
            Self::Form2A(_) => FormVariant::Form2A,
            Self::Form2B(_) => FormVariant::Form2B,
            Self::Form2C(_) => FormVariant::Form2C,
        }
    }

    pub fn to_value(&self) -> Result<Value, CoreError> {
        Ok(with_form!(self, form => serde_json::to_value(form)?))
    }

    pub fn from_value(variant: FormVariant, value: Value) -> Result<Self, CoreError> {
        Ok(match variant {
            FormVariant::Main => Self::Main(serde_json::from_value(value)?),
            FormVariant::Form2A => Self::Form2A(serde_json::from_value(value)?),
            FormVariant::Form2B => Self::Form2B(serde_json::from_value(value)?),
            FormVariant::Form2C => Self::Form2C(serde_json::from_value(value)?),
        })
    }

    pub fn profile(&self) -> SharedProfile {
        with_form!(self, form => form.profile())
    }

    pub fn apply_profile(&mut self, profile: &SharedProfile) {
        with_form!(self, form => form.apply_profile(profile))
    }

    pub fn registration_type(&self) -> &str {
        with_form!(self, form => form.registration_type())
    }

    pub fn set_registration_type(&mut self, code: &str) {
        with_form!(self, form => form.set_registration_type(code))
    }

    pub fn profession(&self) -> &str {
        with_form!(self, form => form.profession())
    }

    pub fn set_profession(&mut self, profession: &str) {
        with_form!(self, form => form.set_profession(profession))
    }

    pub fn list_spec(&self, field: &str) -> Option<ListSpec> {
        let lists = match self {
            Self::Main(_) => MainFormData::lists(),
            Self::Form2A(_) => Form2AData::lists(),
            Self::Form2B(_) => Form2BData::lists(),
            Self::Form2C(_) => Form2CData::lists(),
        };
        lists.iter().find(|spec| spec.field == field).copied()
    }

    pub fn blank_entry(&self, list: &str, id: String) -> Result<Option<Value>, CoreError> {
        match self {
            Self::Main(_) => MainFormData::blank_entry(list, id),
            Self::Form2A(_) => Form2AData::blank_entry(list, id),
            Self::Form2B(_) => Form2BData::blank_entry(list, id),
            Self::Form2C(_) => Form2CData::blank_entry(list, id),
        }
    }
}
