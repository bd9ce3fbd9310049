//! Records shared by more than one application form.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;

/// Address inside India (district + state).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndianAddress {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub pincode: String,
    pub district: String,
    pub state: String,
}

/// Address outside India.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignAddress {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub pincode: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitizenshipType {
    #[default]
    #[serde(rename = "")]
    Unset,
    Birth,
    Domicile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    #[default]
    #[serde(rename = "")]
    Unset,
    Student,
    Research,
    Employment,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeOfLearning {
    #[default]
    #[serde(rename = "")]
    Unset,
    Regular,
    Distance,
    Online,
}

/// Emergency contact or local contact person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub name: String,
    pub relationship: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportDetails {
    pub passport_number: String,
    pub expiry_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDetails {
    pub visa_number: String,
    pub visa_type: VisaType,
    pub issue_date: String,
    pub expiry_date: String,
}

/// Regulatory history questions asked on the 2-series declaration step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryDeclaration {
    pub permit_cancellation: bool,
    pub permit_cancellation_details: String,
    pub legal_dispute: bool,
    pub legal_dispute_details: String,
    /// Countries where permission to practise was previously granted.
    pub previous_permissions: Vec<String>,
}

/// Institution in another state or in India where the applicant intends to
/// practise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeState {
    pub id: String,
    pub state: String,
    pub district: String,
    pub institution_name: String,
    pub institution_address: String,
    pub proof_document: FileField,
}

impl PracticeState {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Degree or diploma obtained from an Indian institution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndianQualification {
    pub id: String,
    pub qualification_name: String,
    pub institution_name: String,
    pub university: String,
    pub duration_months: String,
    pub admission_date: String,
    pub passing_date: String,
    pub certificate: FileField,
}

impl IndianQualification {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Internship or clinical training period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipEntry {
    pub id: String,
    pub designation: String,
    pub organization_name: String,
    pub organization_address: String,
    pub country: String,
    pub start_date: String,
    pub completion_date: String,
    /// Supervised hours; only asked on forms for foreign qualifications.
    pub total_hours: String,
    pub core_duties: String,
    pub certificate: FileField,
}

impl InternshipEntry {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Employment history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub designation: String,
    pub organization_name: String,
    pub organization_address: String,
    pub country: String,
    pub start_date: String,
    pub completion_date: String,
    pub core_duties: String,
    /// License held while employed abroad, if any.
    pub license_number: String,
    pub certificate: FileField,
}

impl ExperienceEntry {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
