//! Registration type codes and the form variants they activate.
//!
//! Every permanent registration session runs under exactly one registration
//! type code. The code decides which of the four parallel application forms
//! governs the wizard; several codes share the main (Form 1A) layout.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Form variants
// ---------------------------------------------------------------------------

/// The four parallel application form layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormVariant {
    /// Form 1A layout, shared by the 1A/1B/1C codes.
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "2A")]
    Form2A,
    #[serde(rename = "2B")]
    Form2B,
    #[serde(rename = "2C")]
    Form2C,
}

impl FormVariant {
    pub const ALL: [FormVariant; 4] = [Self::Main, Self::Form2A, Self::Form2B, Self::Form2C];

    /// Value stored as `activeFormType` in persisted drafts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Form2A => "2A",
            Self::Form2B => "2B",
            Self::Form2C => "2C",
        }
    }

    pub fn from_str_draft(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSchema(s.to_string()))
    }

    /// Human-readable label for the form layout.
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Form 1A",
            Self::Form2A => "Form 2A",
            Self::Form2B => "Form 2B",
            Self::Form2C => "Form 2C",
        }
    }
}

// ---------------------------------------------------------------------------
// Registration type codes
// ---------------------------------------------------------------------------

/// Registration type selected on the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationTypeCode {
    #[serde(rename = "1A")]
    Regular,
    #[serde(rename = "1B")]
    Provisional,
    #[serde(rename = "1C")]
    Interim,
    #[serde(rename = "2A")]
    Temporary,
    #[serde(rename = "2B")]
    IndianForeignQualified,
    #[serde(rename = "2C")]
    ForeignIndianQualified,
}

impl RegistrationTypeCode {
    pub const ALL: [RegistrationTypeCode; 6] = [
        Self::Regular,
        Self::Provisional,
        Self::Interim,
        Self::Temporary,
        Self::IndianForeignQualified,
        Self::ForeignIndianQualified,
    ];

    /// Parse a code such as `"2B"`. Unrecognized codes are an error rather
    /// than a silent fallback to the main form.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        let trimmed = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownSchema(code.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "1A",
            Self::Provisional => "1B",
            Self::Interim => "1C",
            Self::Temporary => "2A",
            Self::IndianForeignQualified => "2B",
            Self::ForeignIndianQualified => "2C",
        }
    }

    /// The form layout this code activates.
    pub fn variant(self) -> FormVariant {
        match self {
            Self::Regular | Self::Provisional | Self::Interim => FormVariant::Main,
            Self::Temporary => FormVariant::Form2A,
            Self::IndianForeignQualified => FormVariant::Form2B,
            Self::ForeignIndianQualified => FormVariant::Form2C,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular | Self::IndianForeignQualified => "Regular Registration",
            Self::Provisional => "Provisional Registration",
            Self::Interim => "Interim Registration",
            Self::Temporary => "Temporary Registration",
            Self::ForeignIndianQualified => "Regular Registration (Foreign National)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Regular => {
                "Indian nationals who have passed a recognised qualification from India on or before 2021."
            }
            Self::Provisional => {
                "Working allied and healthcare professionals who do not possess any recognized qualification"
            }
            Self::Interim => "Students pursuing a recognized qualification",
            Self::Temporary => "Foreign nationals with foreign qualification",
            Self::IndianForeignQualified => "Indian nationals with foreign qualification",
            Self::ForeignIndianQualified => "Foreign nationals with Indian qualification",
        }
    }
}

impl std::fmt::Display for RegistrationTypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for FormVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn every_code_round_trips_through_from_code() {
        for code in RegistrationTypeCode::ALL {
            assert_eq!(RegistrationTypeCode::from_code(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn from_code_is_case_and_whitespace_tolerant() {
        assert_eq!(
            RegistrationTypeCode::from_code(" 2b ").unwrap(),
            RegistrationTypeCode::IndianForeignQualified
        );
    }

    #[test]
    fn unknown_code_is_an_explicit_error() {
        assert_matches!(
            RegistrationTypeCode::from_code("3Z"),
            Err(CoreError::UnknownSchema(code)) if code == "3Z"
        );
        assert!(RegistrationTypeCode::from_code("").is_err());
    }

    #[test]
    fn main_family_codes_share_the_main_form() {
        assert_eq!(RegistrationTypeCode::Regular.variant(), FormVariant::Main);
        assert_eq!(RegistrationTypeCode::Provisional.variant(), FormVariant::Main);
        assert_eq!(RegistrationTypeCode::Interim.variant(), FormVariant::Main);
        assert_eq!(RegistrationTypeCode::Temporary.variant(), FormVariant::Form2A);
        assert_eq!(
            RegistrationTypeCode::IndianForeignQualified.variant(),
            FormVariant::Form2B
        );
        assert_eq!(
            RegistrationTypeCode::ForeignIndianQualified.variant(),
            FormVariant::Form2C
        );
    }

    #[test]
    fn every_layout_is_reachable_from_some_code() {
        for variant in FormVariant::ALL {
            assert!(
                RegistrationTypeCode::ALL
                    .into_iter()
                    .any(|code| code.variant() == variant),
                "no code selects {variant}"
            );
        }
    }

    #[test]
    fn variant_draft_names_round_trip() {
        for variant in FormVariant::ALL {
            assert_eq!(FormVariant::from_str_draft(variant.as_str()).unwrap(), variant);
        }
        assert!(FormVariant::from_str_draft("1A").is_err());
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&RegistrationTypeCode::IndianForeignQualified).unwrap();
        assert_eq!(json, "\"2B\"");
        let json = serde_json::to_string(&FormVariant::Main).unwrap();
        assert_eq!(json, "\"main\"");
    }
}
