//! Integration tests for draft save/load/restore against both storage
//! backends.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use ncahp_core::attachment::AttachmentHandle;
use ncahp_core::config::WizardConfig;
use ncahp_core::draft::{DraftPersistence, DRAFT_STORAGE_KEY};
use ncahp_core::forms::FormData;
use ncahp_core::registration::{FormVariant, RegistrationTypeCode};
use ncahp_core::storage::{DirectoryStorage, DraftStorage, MemoryStorage};
use ncahp_core::types::Timestamp;
use ncahp_core::wizard::{Applicant, WizardController};

fn saved_at() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 5, 20, 18, 0, 0).unwrap()
}

fn filled_main_wizard() -> WizardController {
    let applicant = Applicant {
        full_name: "Meera Iyer".into(),
        email: "meera@example.org".into(),
        ..Applicant::default()
    };
    let mut wizard = WizardController::new(WizardConfig::default(), &applicant, saved_at()).unwrap();
    wizard
        .select_registration_type(RegistrationTypeCode::Provisional)
        .unwrap();
    let v = FormVariant::Main;
    wizard.update_field(v, "profession", json!("Optometrist")).unwrap();
    wizard.update_field(v, "citizenshipType", json!("domicile")).unwrap();
    wizard.update_field(v, "domicileDate", json!("2001-01-01")).unwrap();
    wizard
        .update_field(v, "permanentAddress.city", json!("Chennai"))
        .unwrap();
    wizard
        .update_field(v, "educationHistory.0.board", json!("CBSE"))
        .unwrap();
    wizard
        .update_field(v, "correspondenceAddressDifferent", json!(true))
        .unwrap();
    wizard.add_entry("experiences").unwrap();
    wizard
        .update_field(v, "experiences.0.organizationName", json!("Sankara Nethralaya"))
        .unwrap();
    wizard
        .attach_file("documents.finalDegree", AttachmentHandle::new("degree.pdf", 4096, "application/pdf"))
        .unwrap();
    wizard
        .attach_file(
            "educationHistory.1.certificate",
            AttachmentHandle::new("class12.png", 2048, "image/png"),
        )
        .unwrap();
    wizard.jump_to(5).unwrap();
    wizard
}

// ---------------------------------------------------------------------------
// Test: round trip
// ---------------------------------------------------------------------------

/// update -> save -> load -> restore keeps every non-file field; file slots
/// come back empty and are listed for re-attachment.
#[test]
fn save_load_restore_round_trip() {
    let mut wizard = filled_main_wizard();
    let mut drafts = DraftPersistence::new(MemoryStorage::new(), wizard.config());
    wizard.save_draft(&mut drafts, saved_at()).unwrap();

    let snapshot = drafts
        .load(saved_at() + Duration::hours(2))
        .unwrap()
        .expect("draft should be fresh");
    let detached: Vec<_> = snapshot
        .detached_attachments
        .iter()
        .map(|d| (d.path.as_str(), d.file_name.as_str()))
        .collect();
    assert!(detached.contains(&("documents.finalDegree", "degree.pdf")));
    assert!(detached.contains(&("educationHistory.1.certificate", "class12.png")));
    assert_eq!(snapshot.form_data["documents"]["finalDegree"], "degree.pdf");

    let restored =
        WizardController::restore(snapshot, WizardConfig::default(), saved_at()).unwrap();
    let session = restored.session();
    assert_eq!(session.current_step(), 5);
    assert_eq!(session.highest_step_reached(), 5);
    assert_eq!(session.registration_type(), Some(RegistrationTypeCode::Provisional));
    assert!(!session.has_unsaved_changes());

    let FormData::Main(original) = wizard.session().form_data() else {
        panic!("expected main form");
    };
    let FormData::Main(form) = session.form_data() else {
        panic!("expected main form");
    };

    assert!(!form.documents.final_degree.is_attached());
    assert!(!form.education_history[1].certificate.is_attached());

    let mut expected = original.clone();
    expected.documents.final_degree = Default::default();
    expected.education_history[1].certificate = Default::default();
    assert_eq!(form, &expected);
}

/// The blob is written under the fixed key with the camelCase envelope.
#[test]
fn directory_storage_holds_the_draft_file() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirectoryStorage::open(tmp.path()).unwrap();
    let mut wizard = filled_main_wizard();
    let mut drafts = DraftPersistence::new(storage, wizard.config());
    wizard.save_draft(&mut drafts, saved_at()).unwrap();

    let file = tmp.path().join(format!("{DRAFT_STORAGE_KEY}.json"));
    assert!(file.exists());
    let blob: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap();
    assert_eq!(blob["activeFormType"], "main");
    assert_eq!(blob["registrationType"], "1B");
    assert_eq!(blob["currentStep"], 5);
    assert_eq!(blob["formData"]["documents"]["finalDegree"], "degree.pdf");
    assert!(blob["formData"]["photo"].is_null());
}

// ---------------------------------------------------------------------------
// Test: freshness and corruption
// ---------------------------------------------------------------------------

/// A draft exactly 24 hours old is stale and removed.
#[test]
fn stale_draft_is_discarded() {
    let mut wizard = filled_main_wizard();
    let mut drafts = DraftPersistence::new(MemoryStorage::new(), wizard.config());
    wizard.save_draft(&mut drafts, saved_at()).unwrap();

    assert!(drafts
        .load(saved_at() + Duration::hours(24))
        .unwrap()
        .is_none());
    assert_eq!(drafts.storage().get_item(DRAFT_STORAGE_KEY).unwrap(), None);
}

/// Unparseable JSON and drafts with an unknown layout both load as `None`.
#[test]
fn malformed_drafts_load_as_none() {
    for raw in [
        "not json at all",
        r#"{"formData":{},"currentStep":1,"activeFormType":"9Z","savedAt":"2026-05-20T18:00:00Z"}"#,
        r#"{"currentStep":1}"#,
    ] {
        let mut storage = MemoryStorage::new();
        storage.set_item(DRAFT_STORAGE_KEY, raw).unwrap();
        let mut drafts = DraftPersistence::new(storage, &WizardConfig::default());
        assert!(drafts.load(saved_at()).unwrap().is_none(), "{raw}");
        assert!(drafts.storage().is_empty());
    }
}

/// A later save replaces the earlier draft.
#[test]
fn saving_overwrites_previous_draft() {
    let mut wizard = filled_main_wizard();
    let mut drafts = DraftPersistence::new(MemoryStorage::new(), wizard.config());
    wizard.save_draft(&mut drafts, saved_at()).unwrap();

    wizard
        .select_registration_type(RegistrationTypeCode::ForeignIndianQualified)
        .unwrap();
    wizard
        .save_draft(&mut drafts, saved_at() + Duration::minutes(5))
        .unwrap();

    let snapshot = drafts.load(saved_at() + Duration::minutes(6)).unwrap().unwrap();
    assert_eq!(snapshot.active_form_type, FormVariant::Form2C);
    assert_eq!(snapshot.current_step, 1);
    assert!(snapshot.detached_attachments.is_empty());
    assert_eq!(drafts.storage().len(), 1);
}
