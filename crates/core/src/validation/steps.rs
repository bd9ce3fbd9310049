//! Completion rules for each step of each layout.
//!
//! Rules are keyed on `(FormVariant, StepKind)`. Steps without an entry
//! (optional internship/experience, review) are always complete.

use super::evaluator::evaluate_rules;
use super::rules::{Condition, RuleKind, StepRule, ValidationResult};
use crate::error::CoreError;
use crate::forms::FormData;
use crate::registration::FormVariant;
use crate::schema::StepKind;

use Condition::{Differs, Equals, IsTrue};
use RuleKind::{
    Accepted, AnyEntryWith, Attached, Email, KnownProfession, MinEntries, Phone, Pincode,
    Required,
};

const fn rule(field: &'static str, kind: RuleKind, message: &'static str) -> StepRule {
    StepRule::new(field, kind, message)
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

const REGISTRATION_TYPE: &[StepRule] = &[
    rule("registrationType", Required, "Select a registration type"),
    rule("profession", Required, "Select a profession"),
    rule("profession", KnownProfession, "Select a profession from the list"),
];

const QUALIFICATION_ROW: &[&str] = &["qualificationName", "institutionName", "passingDate"];

// ---------------------------------------------------------------------------
// Main (1A/1B/1C)
// ---------------------------------------------------------------------------

const MAIN_PERSONAL: &[StepRule] = &[
    rule("name", Required, "Full name is required"),
    rule("gender", Required, "Gender is required"),
    rule("dateOfBirth", Required, "Date of birth is required"),
    rule("email", Required, "Email is required"),
    rule("email", Email, "Enter a valid email address"),
    rule("mobile", Required, "Mobile number is required"),
    rule("mobile", Phone, "Enter a valid mobile number"),
    rule("photo", Attached, "Upload a passport-size photo"),
    rule("fatherName", Required, "Father's name is required"),
    rule("citizenshipType", Required, "Select how citizenship was acquired"),
    rule("domicileDate", Required, "Date of domicile is required")
        .when(Equals("citizenshipType", "domicile")),
    rule("permanentAddress.addressLine1", Required, "Address is required"),
    rule("permanentAddress.state", Required, "State is required"),
    rule("permanentAddress.pincode", Required, "Pincode is required"),
    rule("permanentAddress.pincode", Pincode, "Enter a valid 6-digit pincode"),
    rule("correspondenceAddress.addressLine1", Required, "Correspondence address is required")
        .when(IsTrue("correspondenceAddressDifferent")),
    rule("correspondenceAddress.pincode", Pincode, "Enter a valid 6-digit pincode")
        .when(IsTrue("correspondenceAddressDifferent")),
    rule("stateOfResidence", Required, "State of residence is required"),
    rule("differentStateProof", Attached, "Upload proof of residence in this state")
        .when(Differs("stateOfResidence", "stateFromAadhaar")),
];

const MAIN_EDUCATION: &[StepRule] = &[rule(
    "educationHistory",
    AnyEntryWith(&["schoolName", "board", "yearOfPassing"]),
    "Add at least one completed education entry",
)];

const MAIN_HEALTHCARE: &[StepRule] = &[rule(
    "healthcareQualifications",
    AnyEntryWith(QUALIFICATION_ROW),
    "Add at least one completed healthcare qualification",
)];

const MAIN_PRACTICE: &[StepRule] = &[rule(
    "practiceStates",
    AnyEntryWith(&["state", "institutionName"]),
    "Add the state where you intend to practise",
)
.when(IsTrue("practiceInOtherState"))];

const MAIN_DOCUMENTS: &[StepRule] = &[
    rule("documents.finalDegree", Attached, "Upload the final degree certificate"),
    rule("documents.transcripts", Attached, "Upload your transcripts"),
    rule("documents.validIdProof", Attached, "Upload a valid ID proof"),
];

const MAIN_DECLARATION: &[StepRule] = &[
    rule("aadhaarConsent", Accepted, "Consent to Aadhaar verification"),
    rule("declarationAccepted", Accepted, "Accept the declaration"),
];

// ---------------------------------------------------------------------------
// 2-series
// ---------------------------------------------------------------------------

const FOREIGN_PERSONAL: &[StepRule] = &[
    rule("firstName", Required, "First name is required"),
    rule("lastName", Required, "Last name is required"),
    rule("gender", Required, "Gender is required"),
    rule("dateOfBirth", Required, "Date of birth is required"),
    rule("email", Required, "Email is required"),
    rule("email", Email, "Enter a valid email address"),
    rule("phoneNumber", Required, "Phone number is required"),
    rule("phoneNumber", Phone, "Enter a valid phone number"),
    rule("photo", Attached, "Upload a passport-size photo"),
    rule("nationality", Required, "Nationality is required"),
    rule("permanentAddress.addressLine1", Required, "Address is required"),
    rule("permanentAddress.country", Required, "Country is required"),
    rule("correspondenceAddress.addressLine1", Required, "Correspondence address is required")
        .when(IsTrue("correspondenceAddressDifferent")),
];

const FORM_2A_PERSONAL_EXTRA: &[StepRule] = &[
    rule("durationOfPracticeIndia", Required, "Duration of practice in India is required"),
    rule("expectedStartDate", Required, "Expected start date is required"),
];

const FORM_2A_PRACTICE: &[StepRule] = &[rule(
    "practiceStates",
    AnyEntryWith(&["state", "institutionName"]),
    "Add the institution where you will practise",
)];

const PASSPORT_VISA: &[StepRule] = &[
    rule("passportDetails.passportNumber", Required, "Passport number is required"),
    rule("passportDetails.expiryDate", Required, "Passport expiry date is required"),
    rule("visaDetails.visaNumber", Required, "Visa number is required"),
    rule("visaDetails.visaType", Required, "Select a visa type"),
    rule("contactPersonIndia.name", Required, "Contact person in India is required"),
    rule("contactPersonIndia.contactNumber", Required, "Contact number is required"),
    rule("contactPersonIndia.contactNumber", Phone, "Enter a valid contact number"),
];

const FORM_2A_PASSPORT_EXTRA: &[StepRule] = &[
    rule("emergencyContact.name", Required, "Emergency contact is required"),
    rule("emergencyContact.contactNumber", Phone, "Enter a valid emergency contact number"),
];

const ACADEMIC: &[StepRule] = &[rule(
    "academicQualifications",
    AnyEntryWith(QUALIFICATION_ROW),
    "Add at least one completed academic qualification",
)];

const FOREIGN_ACADEMIC: &[StepRule] = &[rule(
    "academicQualifications",
    AnyEntryWith(&["qualificationName", "institutionName", "country", "passingDate"]),
    "Add at least one completed academic qualification",
)];

const FORM_2A_DOCUMENTS: &[StepRule] = &[
    rule("documents.transcripts", Attached, "Upload your transcripts"),
    rule("documents.passportCopy", Attached, "Upload a copy of your passport"),
    rule("documents.visaCopy", Attached, "Upload a copy of your visa"),
    rule("documents.proofOfAddress", Attached, "Upload proof of address"),
    rule("documents.medicalFitness", Attached, "Upload a medical fitness certificate"),
];

const FORM_2B_PERSONAL: &[StepRule] = &[
    rule("firstName", Required, "First name is required"),
    rule("lastName", Required, "Last name is required"),
    rule("gender", Required, "Gender is required"),
    rule("dateOfBirth", Required, "Date of birth is required"),
    rule("email", Required, "Email is required"),
    rule("email", Email, "Enter a valid email address"),
    rule("phoneNumber", Required, "Phone number is required"),
    rule("phoneNumber", Phone, "Enter a valid phone number"),
    rule("photo", Attached, "Upload a passport-size photo"),
    rule("citizenshipType", Required, "Select how citizenship was acquired"),
    rule("domicileDate", Required, "Date of domicile is required")
        .when(Equals("citizenshipType", "domicile")),
    rule("permanentAddress.addressLine1", Required, "Address is required"),
    rule("permanentAddress.state", Required, "State is required"),
    rule("permanentAddress.pincode", Required, "Pincode is required"),
    rule("permanentAddress.pincode", Pincode, "Enter a valid 6-digit pincode"),
    rule("stateOfResidence", Required, "State of residence is required"),
    rule("differentStateProof", Attached, "Upload proof of residence in this state")
        .when(Differs("stateOfResidence", "stateFromAadhaar")),
];

const FORM_2B_DOCUMENTS: &[StepRule] = &[
    rule("documents.transcripts", Attached, "Upload your transcripts"),
    rule("documents.equivalenceCertificate", Attached, "Upload the equivalence certificate"),
    rule("documents.validIdProof", Attached, "Upload a valid ID proof"),
    rule("documents.medicalFitness", Attached, "Upload a medical fitness certificate"),
    rule("documents.differentlyAbledProof", Attached, "Upload the disability certificate")
        .when(IsTrue("isDifferentlyAbled")),
];

const FORM_2C_DOCUMENTS: &[StepRule] = &[
    rule("documents.finalDegree", Attached, "Upload the final degree certificate"),
    rule("documents.transcripts", Attached, "Upload your transcripts"),
    rule("documents.passportCopy", Attached, "Upload a copy of your passport"),
    rule("documents.visaCopy", Attached, "Upload a copy of your visa"),
    rule("documents.proofOfAddress", Attached, "Upload proof of address"),
];

const REGULATORY_DECLARATION: &[StepRule] = &[
    rule("declaration.permitCancellationDetails", Required, "Describe the cancelled permit")
        .when(IsTrue("declaration.permitCancellation")),
    rule("declaration.legalDisputeDetails", Required, "Describe the legal proceedings")
        .when(IsTrue("declaration.legalDispute")),
];

const FOREIGN_CONSENTS: &[StepRule] = &[
    rule("identityVerificationConsent", Accepted, "Consent to identity verification"),
    rule("declarationAccepted", Accepted, "Accept the declaration"),
];

const AADHAAR_CONSENTS: &[StepRule] = &[
    rule("aadhaarConsent", Accepted, "Consent to Aadhaar verification"),
    rule("declarationAccepted", Accepted, "Accept the declaration"),
];

const MIN_ONE_QUALIFICATION: &[StepRule] = &[rule(
    "academicQualifications",
    MinEntries(1),
    "Keep at least one academic qualification",
)];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Rule groups for one step; a step passes when every group passes.
pub fn rules_for(variant: FormVariant, kind: StepKind) -> &'static [&'static [StepRule]] {
    use FormVariant::*;
    use StepKind::*;

    match (variant, kind) {
        (_, RegistrationType) => &[REGISTRATION_TYPE],

        (Main, PersonalInfo) => &[MAIN_PERSONAL],
        (Main, EducationHistory) => &[MAIN_EDUCATION],
        (Main, HealthcareQualification) => &[MAIN_HEALTHCARE],
        (Main, PracticeLocation) => &[MAIN_PRACTICE],
        (Main, Documents) => &[MAIN_DOCUMENTS],
        (Main, Declaration) => &[MAIN_DECLARATION],

        (Form2A, PersonalInfo) => &[FOREIGN_PERSONAL, FORM_2A_PERSONAL_EXTRA],
        (Form2A, PracticeLocation) => &[FORM_2A_PRACTICE],
        (Form2A, PassportVisa) => &[PASSPORT_VISA, FORM_2A_PASSPORT_EXTRA],
        (Form2A, AcademicQualification) => &[MIN_ONE_QUALIFICATION, FOREIGN_ACADEMIC],
        (Form2A, Documents) => &[FORM_2A_DOCUMENTS],
        (Form2A, Declaration) => &[REGULATORY_DECLARATION, FOREIGN_CONSENTS],

        (Form2B, PersonalInfo) => &[FORM_2B_PERSONAL],
        (Form2B, PracticeLocation) => &[MAIN_PRACTICE],
        (Form2B, AcademicQualification) => &[MIN_ONE_QUALIFICATION, FOREIGN_ACADEMIC],
        (Form2B, Documents) => &[FORM_2B_DOCUMENTS],
        (Form2B, Declaration) => &[REGULATORY_DECLARATION, AADHAAR_CONSENTS],

        (Form2C, PersonalInfo) => &[FOREIGN_PERSONAL],
        (Form2C, PassportVisa) => &[PASSPORT_VISA],
        (Form2C, AcademicQualification) => &[MIN_ONE_QUALIFICATION, ACADEMIC],
        (Form2C, Documents) => &[FORM_2C_DOCUMENTS],
        (Form2C, Declaration) => &[REGULATORY_DECLARATION, FOREIGN_CONSENTS],

        _ => &[],
    }
}

/// Evaluate a step of the form's own layout.
pub fn evaluate_step(kind: StepKind, data: &FormData) -> Result<ValidationResult, CoreError> {
    let groups = rules_for(data.variant(), kind);
    if groups.is_empty() {
        return Ok(ValidationResult::valid());
    }

    let doc = data.to_value()?;
    let errors: Vec<_> = groups
        .iter()
        .flat_map(|rules| evaluate_rules(rules, &doc).errors)
        .collect();

    Ok(ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{AttachmentHandle, FileField};
    use crate::forms::Form2BData;
    use crate::schema::steps;

    fn pdf(name: &str) -> FileField {
        FileField::attached(AttachmentHandle::new(name, 1024, "application/pdf"))
    }

    #[test]
    fn every_required_step_has_rules_and_optional_steps_do_not() {
        for variant in FormVariant::ALL {
            for step in steps(variant) {
                let has_rules = !rules_for(variant, step.kind).is_empty();
                if step.is_optional || step.kind == StepKind::Review {
                    assert!(!has_rules, "{variant} {:?}", step.kind);
                } else {
                    assert!(has_rules, "{variant} {:?}", step.kind);
                }
            }
        }
    }

    #[test]
    fn rule_paths_resolve_against_initial_data() {
        for variant in FormVariant::ALL {
            let doc = FormData::initial(variant).to_value().unwrap();
            for step in steps(variant) {
                for group in rules_for(variant, step.kind) {
                    for rule in *group {
                        let path = crate::field_path::FieldPath::parse(rule.field).unwrap();
                        assert!(
                            path.get(&doc).is_some(),
                            "{variant} {:?} {}",
                            step.kind,
                            rule.field
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn blank_registration_type_step_fails() {
        let data = FormData::initial(FormVariant::Main);
        let result = evaluate_step(StepKind::RegistrationType, &data).unwrap();
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "profession"));
    }

    #[test]
    fn optional_steps_always_pass() {
        let data = FormData::initial(FormVariant::Form2A);
        assert!(evaluate_step(StepKind::Internship, &data).unwrap().is_valid);
        assert!(evaluate_step(StepKind::Experience, &data).unwrap().is_valid);
    }

    #[test]
    fn form_2b_declaration_needs_both_consents() {
        let mut form = Form2BData {
            aadhaar_consent: true,
            ..Form2BData::default()
        };
        let result = evaluate_step(StepKind::Declaration, &FormData::Form2B(form.clone())).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "declarationAccepted");

        form.declaration_accepted = true;
        assert!(evaluate_step(StepKind::Declaration, &FormData::Form2B(form))
            .unwrap()
            .is_valid);
    }

    #[test]
    fn disability_certificate_only_when_declared() {
        let mut form = Form2BData::default();
        form.documents.transcripts = pdf("t.pdf");
        form.documents.equivalence_certificate = pdf("e.pdf");
        form.documents.valid_id_proof = pdf("id.pdf");
        form.documents.medical_fitness = pdf("m.pdf");
        assert!(evaluate_step(StepKind::Documents, &FormData::Form2B(form.clone()))
            .unwrap()
            .is_valid);

        form.is_differently_abled = true;
        let result = evaluate_step(StepKind::Documents, &FormData::Form2B(form)).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "documents.differentlyAbledProof");
    }
}
