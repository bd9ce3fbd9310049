//! Allied and healthcare profession catalog.
//!
//! The 57 professions recognised for registration, grouped into their 10
//! categories. The registration-type step picks a profession by name from
//! this list.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub professions: &'static [&'static str],
}

/// A profession resolved together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    pub name: &'static str,
    pub category_id: &'static str,
    pub category_name: &'static str,
}

pub const CATEGORIES: &[ProfessionCategory] = &[
    ProfessionCategory {
        id: "cat1",
        name: "Medical Laboratory and Life Sciences",
        short_name: "Medical Laboratory & Life Sciences",
        professions: &[
            "Biotechnologist",
            "Biochemist (nonclinical)",
            "Cell Geneticist",
            "Microbiologist (nonclinical)",
            "Molecular Biologist (nonclinical)",
            "Molecular Geneticist",
            "Cytotechnologist",
            "Forensic Science Technologist",
            "Histotechnologist",
            "Hemato Technologist",
            "Medical Lab Technologist",
        ],
    },
    ProfessionCategory {
        id: "cat2",
        name: "Trauma, Burn Care and Surgical/Anesthesia related technology",
        short_name: "Trauma & Surgical Technology",
        professions: &[
            "Advance Care Paramedic",
            "Burn Care Technologist",
            "Emergency Medical Technologist (Paramedic)",
            "Anaesthesia Assistants and Technologists",
            "Operation Theatre (OT) Technologists",
            "Endoscopy and Laparoscopy Technologists",
        ],
    },
    ProfessionCategory {
        id: "cat3",
        name: "Physiotherapy Professional",
        short_name: "Physiotherapy",
        professions: &["Physiotherapist"],
    },
    ProfessionCategory {
        id: "cat4",
        name: "Nutrition Science Professional",
        short_name: "Nutrition Science",
        professions: &[
            "Dietician (including Clinical Dietician, Food Service Dietician)",
            "Nutritionist (including Public Health Nutritionist, Sports Nutritionist)",
        ],
    },
    ProfessionCategory {
        id: "cat5",
        name: "Ophthalmic Sciences Professional",
        short_name: "Ophthalmic Sciences",
        professions: &["Optometrist", "Ophthalmic Assistant", "Vision Technician"],
    },
    ProfessionCategory {
        id: "cat6",
        name: "Occupational Therapy Professional",
        short_name: "Occupational Therapy",
        professions: &["Occupational Therapist"],
    },
    ProfessionCategory {
        id: "cat7",
        name: "Community Care, Behavioural Health Sciences and other Professionals",
        short_name: "Community & Behavioural Health",
        professions: &[
            "Environment Protection Officer",
            "Ecologist",
            "Community Health promoters",
            "Occupational Health and Safety Officer (Inspector)",
            "Psychologist (Except Clinical Psychologist covered under RCI for PWD)",
            "Behavioural Analyst",
            "Integrated Behaviour Health Counsellor",
            "Health Educator and Counsellors (including Disease Counsellors, Diabetes Educators, Lactation Consultants)",
            "Social workers (including Clinical Social Worker, Psychiatric Social Worker, Medical Social Worker)",
            "Human Immunodeficiency Virus (HIV) Counsellors or Family Planning Counsellors",
            "Mental Health Support Workers",
            "Podiatrist",
            "Palliative Care Professionals",
            "Movement Therapist (including Art, Dance and Movement Therapist or Recreational Therapist)",
            "Acupuncture Professionals",
        ],
    },
    ProfessionCategory {
        id: "cat8",
        name: "Medical Radiology, Imaging and Therapeutic Technology Professional",
        short_name: "Radiology & Imaging",
        professions: &[
            "Medical Physicist",
            "Nuclear Medicine Technologist",
            "Radiology and Imaging Technologist (Diagnostic Medical Radiographer, Magnetic Resonance Imaging (MRI), Computed Tomography (CT), Mammographer, Diagnostic Medical Sonographers)",
            "Radiotherapy Technologist",
            "Dosimetrist",
        ],
    },
    ProfessionCategory {
        id: "cat9",
        name: "Medical Technologists and Physician Associate",
        short_name: "Medical Technologists",
        professions: &[
            "Biomedical Engineer",
            "Medical Equipment Technologist",
            "Physician Associates",
            "Cardiovascular Technologists",
            "Perfusionist",
            "Respiratory Technologist",
            "Electrocardiogram (ECG) Technologist or Echocardiogram (ECHO) Technologist",
            "Electroencephalogram (EEG) or Electroneurodiagnostic (END) or Electromyography (EMG) Technologists or Neuro Lab Technologists or Sleep Lab Technologists",
            "Dialysis Therapy Technologists or Urology Technologists",
        ],
    },
    ProfessionCategory {
        id: "cat10",
        name: "Health Information Management and Health Informatic Professional",
        short_name: "Health Information Management",
        professions: &[
            "Health Information Management Professional (Including Medical Records Analyst)",
            "Health Information Management Technologist",
            "Clinical Coder",
            "Medical Secretary and Medical Transcriptionist",
        ],
    },
];

/// Every profession with its category, in catalog order.
pub fn all_professions() -> impl Iterator<Item = Profession> {
    CATEGORIES.iter().flat_map(|category| {
        category.professions.iter().map(move |name| Profession {
            name,
            category_id: category.id,
            category_name: category.name,
        })
    })
}

/// Look up a profession by exact name (surrounding whitespace ignored).
pub fn find_profession(name: &str) -> Option<Profession> {
    let name = name.trim();
    all_professions().find(|p| p.name == name)
}

pub fn is_known_profession(name: &str) -> bool {
    find_profession(name).is_some()
}
