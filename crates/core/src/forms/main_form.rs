//! Form 1A layout, used by the 1A/1B/1C registration types.

use serde::{Deserialize, Serialize};

use super::shared::{
    CitizenshipType, ExperienceEntry, IndianAddress, IndianQualification, InternshipEntry,
    PracticeState,
};
use super::{join_full_name, split_full_name, FormRecord, ListSpec, SharedProfile};
use crate::attachment::FileField;
use crate::error::CoreError;
use crate::registration::FormVariant;

/// School-level education row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub school_name: String,
    pub board: String,
    pub year_of_passing: String,
    pub certificate: FileField,
}

impl EducationEntry {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainDocuments {
    pub provisional_degree: FileField,
    pub final_degree: FileField,
    pub internship_certificate: FileField,
    pub transcripts: FileField,
    pub curriculum_soft_copy: FileField,
    pub experience_evidence: FileField,
    pub valid_id_proof: FileField,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainFormData {
    // Registration type
    pub registration_type: String,
    pub profession: String,

    // Personal information
    pub name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub mobile: String,
    pub photo: FileField,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,
    pub citizenship_type: CitizenshipType,
    pub domicile_date: String,
    pub permanent_address: IndianAddress,
    pub correspondence_address_different: bool,
    pub correspondence_address: IndianAddress,
    pub present_occupation: String,
    pub state_of_residence: String,
    pub state_from_aadhaar: String,
    pub different_state_proof: FileField,

    // Education and qualifications
    pub education_history: Vec<EducationEntry>,
    pub healthcare_qualifications: Vec<IndianQualification>,
    pub other_qualifications: Vec<IndianQualification>,

    // Training and experience
    pub internships: Vec<InternshipEntry>,
    pub experiences: Vec<ExperienceEntry>,

    // Practice location
    pub practice_in_other_state: bool,
    pub practice_states: Vec<PracticeState>,

    pub documents: MainDocuments,

    // Declaration
    pub aadhaar_consent: bool,
    pub declaration_accepted: bool,
}

/// Education history starts with two placeholder rows (secondary and
/// higher secondary).
pub const SEEDED_EDUCATION_ROWS: usize = 2;

const LISTS: &[ListSpec] = &[
    ListSpec::new("educationHistory", SEEDED_EDUCATION_ROWS),
    ListSpec::new("healthcareQualifications", 1),
    ListSpec::new("otherQualifications", 0),
    ListSpec::new("internships", 0),
    ListSpec::new("experiences", 0),
    ListSpec::new("practiceStates", 0),
];

impl FormRecord for MainFormData {
    const VARIANT: FormVariant = FormVariant::Main;

    fn initial() -> Self {
        Self {
            education_history: (1..=SEEDED_EDUCATION_ROWS)
                .map(|i| EducationEntry::blank(i.to_string()))
                .collect(),
            healthcare_qualifications: vec![IndianQualification::blank("1".into())],
            ..Self::default()
        }
    }

    fn lists() -> &'static [ListSpec] {
        LISTS
    }

    fn blank_entry(list: &str, id: String) -> Result<Option<serde_json::Value>, CoreError> {
        let entry = match list {
            "educationHistory" => serde_json::to_value(EducationEntry::blank(id))?,
            "healthcareQualifications" | "otherQualifications" => {
                serde_json::to_value(IndianQualification::blank(id))?
            }
            "internships" => serde_json::to_value(InternshipEntry::blank(id))?,
            "experiences" => serde_json::to_value(ExperienceEntry::blank(id))?,
            "practiceStates" => serde_json::to_value(PracticeState::blank(id))?,
            _ => return Ok(None),
        };
        Ok(Some(entry))
    }

    fn profile(&self) -> SharedProfile {
        let (first_name, middle_name, last_name) = split_full_name(&self.name);
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

    fn apply_profile(&mut self, profile: &SharedProfile) {
        self.name = join_full_name(profile);
        self.gender = profile.gender.clone();
        self.date_of_birth = profile.date_of_birth.clone();
        self.email = profile.email.clone();
        self.mobile = profile.phone.clone();
        if !profile.state_from_aadhaar.is_empty() {
            self.state_from_aadhaar = profile.state_from_aadhaar.clone();
            if self.state_of_residence.is_empty() {
                self.state_of_residence = profile.state_from_aadhaar.clone();
            }
        }
    }

    fn registration_type(&self) -> &str {
        &self.registration_type
    }

    fn set_registration_type(&mut self, code: &str) {
        self.registration_type = code.to_string();
    }

    fn profession(&self) -> &str {
        &self.profession
    }

    fn set_profession(&mut self, profession: &str) {
        self.profession = profession.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_data_seeds_minimum_rows() {
        let data = MainFormData::initial();
        assert_eq!(data.education_history.len(), SEEDED_EDUCATION_ROWS);
        assert_eq!(data.education_history[0].id, "1");
        assert_eq!(data.education_history[1].id, "2");
        assert_eq!(data.healthcare_qualifications.len(), 1);
        assert!(data.internships.is_empty());
        assert!(!data.declaration_accepted);
    }

    #[test]
    fn profile_round_trip_preserves_name() {
        let mut data = MainFormData::initial();
        data.name = "Priya Devi Sharma".into();
        data.mobile = "+91 98765 43210".into();
        let profile = data.profile();
        assert_eq!(profile.first_name, "Priya");
        assert_eq!(profile.middle_name, "Devi");
        assert_eq!(profile.last_name, "Sharma");

        let mut other = MainFormData::initial();
        other.apply_profile(&profile);
        assert_eq!(other.name, "Priya Devi Sharma");
        assert_eq!(other.mobile, "+91 98765 43210");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(MainFormData::initial()).unwrap();
        assert!(value.get("educationHistory").is_some());
        assert!(value["permanentAddress"].get("addressLine1").is_some());
        assert_eq!(value["citizenshipType"], "");
        assert!(value["documents"]["validIdProof"].is_null());
    }

    #[test]
    fn blank_entry_is_known_for_every_list() {
        for spec in MainFormData::lists() {
            assert!(MainFormData::blank_entry(spec.field, "x".into())
                .unwrap()
                .is_some());
        }
        assert!(MainFormData::blank_entry("documents", "x".into())
            .unwrap()
            .is_none());
    }
}
