//! Form 2B: regular registration for Indian nationals holding a foreign
//! qualification.

use serde::{Deserialize, Serialize};

use super::shared::{
    CitizenshipType, ExperienceEntry, IndianAddress, InternshipEntry, ModeOfLearning,
    PracticeState, RegulatoryDeclaration,
};
use super::{FormRecord, ListSpec, SharedProfile};
use crate::attachment::FileField;
use crate::error::CoreError;
use crate::registration::FormVariant;

/// Foreign qualification with the extra accreditation details asked of
/// Indian nationals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccreditedQualification {
    pub id: String,
    pub qualification_name: String,
    pub institution_name: String,
    pub university: String,
    pub country: String,
    pub duration_months: String,
    pub admission_date: String,
    pub passing_date: String,
    pub mode_of_learning: ModeOfLearning,
    pub medium_of_instruction: String,
    pub regulatory_authority: String,
    pub certificate: FileField,
}

impl AccreditedQualification {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form2BDocuments {
    pub transcripts: FileField,
    pub undergrad_syllabus: FileField,
    pub postgrad_syllabus: FileField,
    pub professional_registration: FileField,
    pub equivalence_certificate: FileField,
    pub valid_id_proof: FileField,
    pub medical_fitness: FileField,
    pub endorsement_letter: FileField,
    pub differently_abled_proof: FileField,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form2BData {
    pub registration_type: String,
    pub profession: String,

    // Personal details
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone_number: String,
    pub photo: FileField,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,
    pub citizenship_type: CitizenshipType,
    pub domicile_date: String,
    pub is_differently_abled: bool,
    pub permanent_address: IndianAddress,
    pub correspondence_address_different: bool,
    pub correspondence_address: IndianAddress,
    pub state_of_residence: String,
    pub state_from_aadhaar: String,
    pub different_state_proof: FileField,

    pub practice_in_other_state: bool,
    pub practice_states: Vec<PracticeState>,

    pub academic_qualifications: Vec<AccreditedQualification>,
    pub internships: Vec<InternshipEntry>,
    pub experiences: Vec<ExperienceEntry>,

    pub documents: Form2BDocuments,

    pub declaration: RegulatoryDeclaration,
    pub aadhaar_consent: bool,
    pub declaration_accepted: bool,
}

const LISTS: &[ListSpec] = &[
    ListSpec::new("practiceStates", 0),
    ListSpec::new("academicQualifications", 1),
    ListSpec::new("internships", 0),
    ListSpec::new("experiences", 0),
];

impl FormRecord for Form2BData {
    const VARIANT: FormVariant = FormVariant::Form2B;

    fn initial() -> Self {
        Self {
            registration_type: "2B".into(),
            academic_qualifications: vec![AccreditedQualification::blank("1".into())],
            ..Self::default()
        }
    }

    fn lists() -> &'static [ListSpec] {
        LISTS
    }

    fn blank_entry(list: &str, id: String) -> Result<Option<serde_json::Value>, CoreError> {
        let entry = match list {
            "practiceStates" => serde_json::to_value(PracticeState::blank(id))?,
            "academicQualifications" => serde_json::to_value(AccreditedQualification::blank(id))?,
            "internships" => serde_json::to_value(InternshipEntry::blank(id))?,
            "experiences" => serde_json::to_value(ExperienceEntry::blank(id))?,
            _ => return Ok(None),
        };
        Ok(Some(entry))
    }

    fn profile(&self) -> SharedProfile {
        SharedProfile {
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            date_of_birth: self.date_of_birth.clone(),
            email: self.email.clone(),
            phone: self.phone_number.clone(),
            state_from_aadhaar: self.state_from_aadhaar.clone(),
        }
    }

    fn apply_profile(&mut self, profile: &SharedProfile) {
        self.first_name = profile.first_name.clone();
        self.middle_name = profile.middle_name.clone();
        self.last_name = profile.last_name.clone();
        self.gender = profile.gender.clone();
        self.date_of_birth = profile.date_of_birth.clone();
        self.email = profile.email.clone();
        self.phone_number = profile.phone.clone();
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
    fn aadhaar_state_seeds_state_of_residence() {
        let mut data = Form2BData::initial();
        data.apply_profile(&SharedProfile {
            state_from_aadhaar: "Gujarat".into(),
            ..SharedProfile::default()
        });
        assert_eq!(data.state_of_residence, "Gujarat");
        assert_eq!(data.state_from_aadhaar, "Gujarat");
    }

    #[test]
    fn mode_of_learning_accepts_known_values() {
        let mut value = serde_json::to_value(Form2BData::initial()).unwrap();
        value["academicQualifications"][0]["modeOfLearning"] = serde_json::json!("distance");
        let data: Form2BData = serde_json::from_value(value).unwrap();
        assert_eq!(
            data.academic_qualifications[0].mode_of_learning,
            ModeOfLearning::Distance
        );
    }
}
