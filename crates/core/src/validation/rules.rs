//! Validation rule and result types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether step completion predicates are enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every step predicate is evaluated.
    Strict,
    /// Every step counts as complete; used for demos and walkthroughs.
    #[default]
    Bypass,
}

impl ValidationMode {
    pub fn from_str_config(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "bypass" => Ok(Self::Bypass),
            other => Err(CoreError::Validation(format!(
                "Invalid validation mode '{other}'. Must be one of: strict, bypass"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Bypass => "bypass",
        }
    }
}

/// When a rule applies. Paths are dotted field paths into the form JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// The boolean at the path is `true`.
    IsTrue(&'static str),
    /// The string at the path equals the given value.
    Equals(&'static str, &'static str),
    /// The values at the two paths differ.
    Differs(&'static str, &'static str),
}

/// The check a rule performs on its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Present and not blank.
    Required,
    /// Well-formed email address; blank values are left to `Required`.
    Email,
    /// Plausible phone number; blank values are left to `Required`.
    Phone,
    /// Six-digit Indian postal code; blank values are left to `Required`.
    Pincode,
    /// Checkbox that must be ticked.
    Accepted,
    /// File slot that must hold an attachment.
    Attached,
    /// List with at least this many rows.
    MinEntries(usize),
    /// List with at least one row whose listed fields are all filled in.
    AnyEntryWith(&'static [&'static str]),
    /// Name from the profession catalog.
    KnownProfession,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Pincode => "pincode",
            Self::Accepted => "accepted",
            Self::Attached => "attached",
            Self::MinEntries(_) => "min_entries",
            Self::AnyEntryWith(_) => "any_entry_with",
            Self::KnownProfession => "known_profession",
        }
    }
}

/// One completion rule of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRule {
    pub field: &'static str,
    pub kind: RuleKind,
    pub when: Condition,
    pub message: &'static str,
}

impl StepRule {
    pub const fn new(field: &'static str, kind: RuleKind, message: &'static str) -> Self {
        Self {
            field,
            kind,
            when: Condition::Always,
            message,
        }
    }

    pub const fn when(self, when: Condition) -> Self {
        Self { when, ..self }
    }
}

/// Aggregated result of evaluating a step's rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}
