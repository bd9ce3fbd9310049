//! Form schema registry.
//!
//! Static step lists for the four application layouts and the lookups the
//! wizard uses to pick one. Everything here is pure: the same code always
//! yields the same `'static` step slice.

use serde::Serialize;

use crate::error::CoreError;
use crate::forms::FormData;
use crate::registration::{FormVariant, RegistrationTypeCode};
use crate::types::StepNumber;

// ---------------------------------------------------------------------------
// Step descriptors
// ---------------------------------------------------------------------------

/// What a step collects. Step validation is keyed on this, not on the
/// step's position, because the same kind of step sits at different
/// positions in different layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    RegistrationType,
    PersonalInfo,
    EducationHistory,
    HealthcareQualification,
    AcademicQualification,
    Internship,
    Experience,
    PracticeLocation,
    PassportVisa,
    Documents,
    Review,
    Declaration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    pub id: StepNumber,
    pub kind: StepKind,
    pub title: &'static str,
    pub description: &'static str,
    pub is_optional: bool,
}

const fn step(
    id: StepNumber,
    kind: StepKind,
    title: &'static str,
    description: &'static str,
    is_optional: bool,
) -> StepDescriptor {
    StepDescriptor {
        id,
        kind,
        title,
        description,
        is_optional,
    }
}

/// The type-selector step every layout starts with.
pub const ENTRY_STEP: StepNumber = 1;

const MAIN_STEPS: [StepDescriptor; 10] = [
    step(1, StepKind::RegistrationType, "Registration Type", "Select profession & type", false),
    step(2, StepKind::PersonalInfo, "Personal Information", "Identity & profile", false),
    step(3, StepKind::EducationHistory, "Education History", "Prior qualifications", false),
    step(4, StepKind::HealthcareQualification, "Healthcare Qualification", "Allied healthcare degrees", false),
    step(5, StepKind::Internship, "Internship", "Clinical training", true),
    step(6, StepKind::Experience, "Experience", "Professional history", true),
    step(7, StepKind::PracticeLocation, "Practice Location", "Geographic intent", false),
    step(8, StepKind::Documents, "Documents", "Upload certificates", false),
    step(9, StepKind::Review, "Review", "Final verification", false),
    step(10, StepKind::Declaration, "Declaration", "Consent & submit", false),
];

const FORM_2A_STEPS: [StepDescriptor; 9] = [
    step(1, StepKind::RegistrationType, "Registration Type", "Select profession & type", false),
    step(2, StepKind::PersonalInfo, "Personal Details", "Identity & stay in India", false),
    step(3, StepKind::PracticeLocation, "Practice State", "Where you will practise", false),
    step(4, StepKind::PassportVisa, "Passport & Visa", "Travel documents & contacts", false),
    step(5, StepKind::AcademicQualification, "Academic Qualification", "Foreign qualifications", false),
    step(6, StepKind::Internship, "Internship", "Clinical training", true),
    step(7, StepKind::Experience, "Experience", "Professional history", true),
    step(8, StepKind::Documents, "Documents", "Upload certificates", false),
    step(9, StepKind::Declaration, "Declaration", "Consent & submit", false),
];

const FORM_2B_STEPS: [StepDescriptor; 8] = [
    step(1, StepKind::RegistrationType, "Registration Type", "Select profession & type", false),
    step(2, StepKind::PersonalInfo, "Personal Details", "Identity & profile", false),
    step(3, StepKind::PracticeLocation, "Practice State", "Geographic intent", false),
    step(4, StepKind::AcademicQualification, "Academic Qualification", "Foreign qualifications", false),
    step(5, StepKind::Internship, "Internship", "Clinical training", true),
    step(6, StepKind::Experience, "Experience", "Professional history", true),
    step(7, StepKind::Documents, "Documents", "Upload certificates", false),
    step(8, StepKind::Declaration, "Declaration", "Consent & submit", false),
];

const FORM_2C_STEPS: [StepDescriptor; 8] = [
    step(1, StepKind::RegistrationType, "Registration Type", "Select profession & type", false),
    step(2, StepKind::PersonalInfo, "Personal Details", "Identity & profile", false),
    step(3, StepKind::PassportVisa, "Passport & Visa", "Travel documents & contacts", false),
    step(4, StepKind::AcademicQualification, "Academic Qualification", "Indian qualifications", false),
    step(5, StepKind::Internship, "Internship", "Clinical training", true),
    step(6, StepKind::Experience, "Experience", "Professional history", true),
    step(7, StepKind::Documents, "Documents", "Upload certificates", false),
    step(8, StepKind::Declaration, "Declaration", "Consent & submit", false),
];

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// A named, ordered list of steps for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub variant: FormVariant,
    pub name: &'static str,
    pub steps: &'static [StepDescriptor],
}

static MAIN_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Main,
    name: "Permanent Registration (Form 1A)",
    steps: &MAIN_STEPS,
};

static FORM_2A_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Form2A,
    name: "Temporary Registration (Form 2A)",
    steps: &FORM_2A_STEPS,
};

static FORM_2B_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Form2B,
    name: "Regular Registration, Foreign Qualification (Form 2B)",
    steps: &FORM_2B_STEPS,
};

static FORM_2C_SCHEMA: FormSchema = FormSchema {
    variant: FormVariant::Form2C,
    name: "Regular Registration, Foreign National (Form 2C)",
    steps: &FORM_2C_STEPS,
};

impl FormSchema {
    /// Number of steps; the last one is terminal.
    pub fn len(&self) -> StepNumber {
        self.steps.len() as StepNumber
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn terminal_step(&self) -> StepNumber {
        self.len()
    }

    /// Descriptor for a 1-based step number.
    pub fn step(&self, number: StepNumber) -> Result<&'static StepDescriptor, CoreError> {
        let steps: &'static [StepDescriptor] = self.steps;
        number
            .checked_sub(1)
            .and_then(|i| steps.get(i as usize))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Step {number} is out of range ({ENTRY_STEP}..{}) for {}",
                    self.len(),
                    self.name
                ))
            })
    }

    pub fn validate_step_number(&self, number: StepNumber) -> Result<(), CoreError> {
        self.step(number).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Registry lookups
// ---------------------------------------------------------------------------

pub fn schema(variant: FormVariant) -> &'static FormSchema {
    match variant {
        FormVariant::Main => &MAIN_SCHEMA,
        FormVariant::Form2A => &FORM_2A_SCHEMA,
        FormVariant::Form2B => &FORM_2B_SCHEMA,
        FormVariant::Form2C => &FORM_2C_SCHEMA,
    }
}

pub fn steps(variant: FormVariant) -> &'static [StepDescriptor] {
    schema(variant).steps
}

pub fn steps_for_code(code: RegistrationTypeCode) -> &'static [StepDescriptor] {
    steps(code.variant())
}

/// Fresh form data for a code, tagged with the code itself.
pub fn initial_data(code: RegistrationTypeCode) -> FormData {
    let mut data = FormData::initial(code.variant());
    data.set_registration_type(code.as_str());
    data
}

/// Resolve a raw code, failing with [`CoreError::UnknownSchema`].
pub fn resolve_code(raw: &str) -> Result<RegistrationTypeCode, CoreError> {
    RegistrationTypeCode::from_code(raw)
}

/// Resolve a raw code to a layout, falling back to the main layout for
/// unknown codes.
pub fn resolve_variant_or_default(raw: &str) -> FormVariant {
    match resolve_code(raw) {
        Ok(code) => code.variant(),
        Err(_) => {
            tracing::warn!(code = raw, "Unknown registration type code, using main form");
            FormVariant::Main
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn step_counts_match_each_layout() {
        assert_eq!(steps(FormVariant::Main).len(), 10);
        assert_eq!(steps(FormVariant::Form2A).len(), 9);
        assert_eq!(steps(FormVariant::Form2B).len(), 8);
        assert_eq!(steps(FormVariant::Form2C).len(), 8);
    }

    #[test]
    fn lookups_are_referentially_stable() {
        for code in RegistrationTypeCode::ALL {
            let a = steps_for_code(code);
            let b = steps_for_code(code);
            assert!(std::ptr::eq(a, b));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn step_ids_are_sequential_from_one() {
        for variant in FormVariant::ALL {
            for (i, descriptor) in steps(variant).iter().enumerate() {
                assert_eq!(descriptor.id as usize, i + 1, "{variant}");
            }
        }
    }

    #[test]
    fn every_layout_starts_with_type_selector_and_ends_with_declaration() {
        for variant in FormVariant::ALL {
            let s = schema(variant);
            assert_eq!(s.step(ENTRY_STEP).unwrap().kind, StepKind::RegistrationType);
            assert_eq!(
                s.step(s.terminal_step()).unwrap().kind,
                StepKind::Declaration
            );
        }
    }

    #[test]
    fn step_lookup_rejects_out_of_range() {
        let s = schema(FormVariant::Form2B);
        assert!(s.step(0).is_err());
        assert!(s.step(9).is_err());
        assert!(s.validate_step_number(8).is_ok());
    }

    #[test]
    fn initial_data_carries_the_code() {
        let data = initial_data(RegistrationTypeCode::Interim);
        assert_eq!(data.variant(), FormVariant::Main);
        assert_eq!(data.registration_type(), "1C");
    }

    #[test]
    fn unknown_codes_error_or_fall_back() {
        assert_matches!(resolve_code("9Q"), Err(CoreError::UnknownSchema(_)));
        assert_eq!(resolve_variant_or_default("9Q"), FormVariant::Main);
        assert_eq!(resolve_variant_or_default("2C"), FormVariant::Form2C);
    }
}
