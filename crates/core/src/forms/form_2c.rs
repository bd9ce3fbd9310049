//! Form 2C: regular registration for foreign nationals holding an Indian
//! qualification.

use serde::{Deserialize, Serialize};

use super::shared::{
    ContactPerson, ExperienceEntry, ForeignAddress, IndianQualification, InternshipEntry,
    PassportDetails, RegulatoryDeclaration, VisaDetails,
};
use super::{FormRecord, ListSpec, SharedProfile};
use crate::attachment::FileField;
use crate::error::CoreError;
use crate::registration::FormVariant;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form2CDocuments {
    pub final_degree: FileField,
    pub transcripts: FileField,
    pub internship_certificate: FileField,
    pub passport_copy: FileField,
    pub visa_copy: FileField,
    pub proof_of_address: FileField,
    pub home_country_registration: FileField,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form2CData {
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
    pub father_name: String,
    pub mother_name: String,
    pub nationality: String,
    pub permanent_address: ForeignAddress,
    pub correspondence_address_different: bool,
    pub correspondence_address: ForeignAddress,

    // Passport, visa and contacts
    pub passport_details: PassportDetails,
    pub visa_details: VisaDetails,
    pub contact_person_india: ContactPerson,

    pub academic_qualifications: Vec<IndianQualification>,
    pub internships: Vec<InternshipEntry>,
    pub experiences: Vec<ExperienceEntry>,

    pub documents: Form2CDocuments,

    pub declaration: RegulatoryDeclaration,
    pub identity_verification_consent: bool,
    pub declaration_accepted: bool,
}

const LISTS: &[ListSpec] = &[
    ListSpec::new("academicQualifications", 1),
    ListSpec::new("internships", 0),
    ListSpec::new("experiences", 0),
];

impl FormRecord for Form2CData {
    const VARIANT: FormVariant = FormVariant::Form2C;

    fn initial() -> Self {
        Self {
            registration_type: "2C".into(),
            academic_qualifications: vec![IndianQualification::blank("1".into())],
            ..Self::default()
        }
    }

    fn lists() -> &'static [ListSpec] {
        LISTS
    }

    fn blank_entry(list: &str, id: String) -> Result<Option<serde_json::Value>, CoreError> {
        let entry = match list {
            "academicQualifications" => serde_json::to_value(IndianQualification::blank(id))?,
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
            state_from_aadhaar: String::new(),
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
