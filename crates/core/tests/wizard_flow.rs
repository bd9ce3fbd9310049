//! Integration tests for the registration wizard: schema swaps, navigation
//! bounds, attachment policy and a strict end-to-end Form 2B run.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;

use ncahp_core::attachment::AttachmentHandle;
use ncahp_core::config::WizardConfig;
use ncahp_core::error::CoreError;
use ncahp_core::forms::FormData;
use ncahp_core::registration::{FormVariant, RegistrationTypeCode};
use ncahp_core::schema::{steps, StepKind};
use ncahp_core::types::Timestamp;
use ncahp_core::wizard::{Applicant, SessionStatus, WizardController};

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 4, 10, 11, 30, 0).unwrap()
}

fn applicant() -> Applicant {
    Applicant {
        full_name: "Arjun Kumar Menon".into(),
        gender: "male".into(),
        date_of_birth: "1990-11-02".into(),
        email: "arjun.menon@example.in".into(),
        mobile: "9847012345".into(),
        state_from_aadhaar: "Kerala".into(),
        ..Applicant::default()
    }
}

fn pdf(name: &str) -> AttachmentHandle {
    AttachmentHandle::new(name, 300 * 1024, "application/pdf")
}

// ---------------------------------------------------------------------------
// Test: shared fields survive schema swaps
// ---------------------------------------------------------------------------

/// Moving Main -> 2C -> 2B -> Main keeps name, gender, date of birth, email
/// and phone in every layout.
#[test]
fn shared_fields_survive_every_swap() {
    let mut wizard = WizardController::new(WizardConfig::default(), &applicant(), now()).unwrap();

    for code in [
        RegistrationTypeCode::ForeignIndianQualified,
        RegistrationTypeCode::IndianForeignQualified,
        RegistrationTypeCode::Provisional,
        RegistrationTypeCode::Temporary,
    ] {
        wizard.select_registration_type(code).unwrap();
        let session = wizard.session();
        assert_eq!(session.active_schema().variant, code.variant());
        assert_eq!(session.form_data().registration_type(), code.as_str());

        let profile = session.form_data().profile();
        assert_eq!(profile.first_name, "Arjun", "{code}");
        assert_eq!(profile.middle_name, "Kumar", "{code}");
        assert_eq!(profile.last_name, "Menon", "{code}");
        assert_eq!(profile.gender, "male");
        assert_eq!(profile.date_of_birth, "1990-11-02");
        assert_eq!(profile.email, "arjun.menon@example.in");
        assert_eq!(profile.phone, "9847012345");
    }
}

/// Edits made on one layout carry into the next one's shared fields.
#[test]
fn edited_name_is_carried_into_main_layout() {
    let mut wizard = WizardController::new(WizardConfig::default(), &applicant(), now()).unwrap();
    wizard
        .select_registration_type(RegistrationTypeCode::IndianForeignQualified)
        .unwrap();
    wizard
        .update_field(FormVariant::Form2B, "middleName", json!(""))
        .unwrap();
    wizard
        .select_registration_type(RegistrationTypeCode::Regular)
        .unwrap();

    let FormData::Main(form) = wizard.session().form_data() else {
        panic!("expected main form");
    };
    assert_eq!(form.name, "Arjun Menon");
    assert_eq!(form.mobile, "9847012345");
}

// ---------------------------------------------------------------------------
// Test: navigation bounds
// ---------------------------------------------------------------------------

/// `next` never passes the terminal step and `previous` never goes below 1
/// on any layout.
#[test]
fn navigation_stays_within_every_layout() {
    for code in RegistrationTypeCode::ALL {
        let mut wizard =
            WizardController::new(WizardConfig::default(), &applicant(), now()).unwrap();
        wizard.select_registration_type(code).unwrap();
        let total = steps(code.variant()).len() as u8;

        for _ in 0..(total + 5) {
            wizard.next();
            assert!(wizard.session().current_step() <= total);
        }
        assert_eq!(wizard.session().current_step(), total);

        for _ in 0..(total + 5) {
            wizard.previous();
            assert!(wizard.session().current_step() >= 1);
        }
        assert_eq!(wizard.session().current_step(), 1);
        assert_eq!(wizard.session().highest_step_reached(), total);
    }
}

// ---------------------------------------------------------------------------
// Test: attachment policy
// ---------------------------------------------------------------------------

/// A 6 MB file and an executable are both rejected and leave the form as
/// it was.
#[test]
fn oversized_and_executable_files_do_not_mutate_data() {
    let mut wizard = WizardController::new(WizardConfig::default(), &applicant(), now()).unwrap();
    wizard
        .select_registration_type(RegistrationTypeCode::IndianForeignQualified)
        .unwrap();
    let before = wizard.session().form_data().clone();

    let six_mb = AttachmentHandle::new("transcripts.pdf", 6_000_000, "application/pdf");
    assert_matches!(
        wizard.attach_file("documents.transcripts", six_mb),
        Err(CoreError::AttachmentRejected(_))
    );
    let exe = AttachmentHandle::new("transcripts.exe", 1_000, "application/x-msdownload");
    assert_matches!(
        wizard.attach_file("academicQualifications.0.certificate", exe),
        Err(CoreError::AttachmentRejected(_))
    );

    assert_eq!(wizard.session().form_data(), &before);
}

// ---------------------------------------------------------------------------
// Test: container writes
// ---------------------------------------------------------------------------

/// On every foreign layout the qualification list cannot be emptied through
/// `update_field`, and a whole row write cannot clear its certificate.
#[test]
fn lists_and_file_slots_are_guarded_from_container_writes() {
    for (code, variant) in [
        (RegistrationTypeCode::Temporary, FormVariant::Form2A),
        (RegistrationTypeCode::IndianForeignQualified, FormVariant::Form2B),
        (RegistrationTypeCode::ForeignIndianQualified, FormVariant::Form2C),
    ] {
        let mut wizard =
            WizardController::new(WizardConfig::default(), &applicant(), now()).unwrap();
        wizard.select_registration_type(code).unwrap();
        wizard
            .attach_file("academicQualifications.0.certificate", pdf("degree.pdf"))
            .unwrap();
        let before = wizard.session().form_data().clone();

        assert_matches!(
            wizard.update_field(variant, "academicQualifications", json!([])),
            Err(CoreError::Validation(_)),
            "{code}"
        );

        let mut row = before.to_value().unwrap()["academicQualifications"][0].clone();
        row["certificate"] = serde_json::Value::Null;
        assert_matches!(
            wizard.update_field(variant, "academicQualifications.0", row),
            Err(CoreError::Validation(_)),
            "{code}"
        );

        assert_eq!(wizard.session().form_data(), &before, "{code}");
        let rows = before.to_value().unwrap()["academicQualifications"]
            .as_array()
            .map_or(0, |rows| rows.len());
        assert!(rows >= 1, "{code}");
    }
}

// ---------------------------------------------------------------------------
// Test: strict Form 2B end-to-end
// ---------------------------------------------------------------------------

fn assert_step(wizard: &WizardController, kind: StepKind) {
    let view = wizard.current_step_view().unwrap();
    assert_eq!(view.descriptor.kind, kind);
}

/// Walks every step of Form 2B with strict validation. Each required step
/// blocks `next` until completed; the declaration step only clears once both
/// consent checkboxes are ticked.
#[test]
fn form_2b_strict_end_to_end() {
    let mut wizard = WizardController::new(WizardConfig::strict(), &applicant(), now()).unwrap();
    let v = FormVariant::Form2B;

    // Step 1: registration type and profession.
    wizard
        .select_registration_type(RegistrationTypeCode::IndianForeignQualified)
        .unwrap();
    assert!(!wizard.next());
    wizard
        .update_field(v, "profession", json!("Physiotherapist"))
        .unwrap();
    assert!(wizard.next());

    // Step 2: personal details.
    assert_step(&wizard, StepKind::PersonalInfo);
    assert!(!wizard.next());
    let report = wizard.step_report().unwrap();
    let missing: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
    assert!(missing.contains(&"photo"));
    assert!(missing.contains(&"citizenshipType"));
    assert!(!missing.contains(&"firstName"));

    wizard
        .attach_file("photo", AttachmentHandle::new("arjun.jpg", 80 * 1024, "image/jpeg"))
        .unwrap();
    wizard.update_field(v, "citizenshipType", json!("birth")).unwrap();
    wizard
        .update_field(v, "permanentAddress.addressLine1", json!("12 Marine Drive"))
        .unwrap();
    wizard
        .update_field(v, "permanentAddress.state", json!("Kerala"))
        .unwrap();
    wizard
        .update_field(v, "permanentAddress.pincode", json!("682031"))
        .unwrap();
    assert!(wizard.next(), "{:?}", wizard.step_report().unwrap().errors);

    // Step 3: practice state, not practising elsewhere.
    assert_step(&wizard, StepKind::PracticeLocation);
    assert!(wizard.next());

    // Step 4: academic qualification.
    assert_step(&wizard, StepKind::AcademicQualification);
    assert!(!wizard.next());
    for (field, value) in [
        ("qualificationName", "BSc Physiotherapy"),
        ("institutionName", "University of Leeds"),
        ("country", "United Kingdom"),
        ("passingDate", "2013-07-15"),
    ] {
        wizard
            .update_field(v, &format!("academicQualifications.0.{field}"), json!(value))
            .unwrap();
    }
    assert!(wizard.next());

    // Steps 5 and 6: optional internship and experience.
    assert_step(&wizard, StepKind::Internship);
    assert!(wizard.next());
    assert_step(&wizard, StepKind::Experience);
    assert!(wizard.next());

    // Step 7: documents.
    assert_step(&wizard, StepKind::Documents);
    assert!(!wizard.next());
    for slot in [
        "transcripts",
        "equivalenceCertificate",
        "validIdProof",
        "medicalFitness",
    ] {
        wizard
            .attach_file(&format!("documents.{slot}"), pdf(&format!("{slot}.pdf")))
            .unwrap();
    }
    assert!(wizard.next());

    // Step 8: declaration.
    assert_step(&wizard, StepKind::Declaration);
    let view = wizard.current_step_view().unwrap();
    assert!(view.is_terminal);
    assert!(!view.can_advance);
    assert_matches!(wizard.submit(now()), Err(CoreError::Validation(_)));

    wizard.update_field(v, "aadhaarConsent", json!(true)).unwrap();
    assert!(!wizard.can_advance());
    assert_matches!(wizard.submit(now()), Err(CoreError::Validation(_)));

    wizard
        .update_field(v, "declarationAccepted", json!(true))
        .unwrap();
    assert!(wizard.can_advance());
    assert!(!wizard.next(), "terminal step has no successor");

    wizard.submit(now()).unwrap();
    assert_eq!(wizard.session().status(), SessionStatus::Submitted);
    assert_eq!(wizard.session().highest_step_reached(), 8);
}
