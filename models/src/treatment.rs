// models/src/treatment.rs
// Checkbox groups per dental specialty, one group struct each, plus a
// free-text `other` escape hatch per group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::finding::TreatmentPlan;
use crate::refs::UserRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preventive {
    pub dental_cleanings: bool,
    pub fluoride_treatments: bool,
    pub dental_sealants: bool,
    pub oral_examinations: bool,
    pub x_rays: bool,
    pub mouthguards: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restorative {
    pub fillings: bool,
    pub crowns: bool,
    pub bridges: bool,
    pub inlays_onlays: bool,
    pub dental_implants: bool,
    pub dentures: bool,
    pub post_and_core: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Periodontal {
    pub scaling_root_planing: bool,
    pub gum_grafts: bool,
    pub periodontal_surgery: bool,
    pub guided_tissue_regeneration: bool,
    pub laser_gum_surgery: bool,
    pub periodontal_maintenance: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endodontic {
    pub root_canal_therapy: bool,
    pub endodontic_retreatment: bool,
    pub apicoectomy: bool,
    pub pulpotomy: bool,
    pub pulp_capping: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prosthodontic {
    pub complete_dentures: bool,
    pub partial_dentures: bool,
    pub implant_supported_dentures: bool,
    pub overdentures: bool,
    pub fixed_bridges: bool,
    pub full_mouth_reconstruction: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pediatric {
    pub cleanings_for_children: bool,
    pub fluoride_treatments: bool,
    pub sealants_for_children: bool,
    pub pulpotomy: bool,
    pub stainless_steel_crowns: bool,
    pub space_maintainers: bool,
    pub behavior_management: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sedation {
    pub nitrous_oxide: bool,
    pub oral_sedation: bool,
    pub iv_sedation: bool,
    pub general_anesthesia: bool,
    pub other: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emergency {
    pub emergency_extractions: bool,
    pub emergency_root_canal: bool,
    pub temporary_restorations: bool,
    pub dental_trauma_treatment: bool,
    pub abscess_drainage: bool,
    pub other: Option<String>,
}

/// Treatment form content, as posted. Every group defaults to all-unchecked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMedicalTreatment {
    pub preventive: Preventive,
    pub restorative: Restorative,
    pub periodontal: Periodontal,
    pub endodontic: Endodontic,
    pub prosthodontic: Prosthodontic,
    pub pediatric: Pediatric,
    pub sedation: Sedation,
    pub emergency: Emergency,
    pub cosmetic: TreatmentPlan,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalTreatment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub preventive: Preventive,
    pub restorative: Restorative,
    pub periodontal: Periodontal,
    pub endodontic: Endodontic,
    pub prosthodontic: Prosthodontic,
    pub pediatric: Pediatric,
    pub sedation: Sedation,
    pub emergency: Emergency,
    pub cosmetic: TreatmentPlan,
    pub description: Option<String>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicalTreatment {
    pub fn from_new(patient_id: Uuid, content: NewMedicalTreatment, created_by: UserRef) -> Self {
        let now = Utc::now();
        MedicalTreatment {
            id: Uuid::new_v4(),
            patient_id,
            preventive: content.preventive,
            restorative: content.restorative,
            periodontal: content.periodontal,
            endodontic: content.endodontic,
            prosthodontic: content.prosthodontic,
            pediatric: content.pediatric,
            sedation: content.sedation,
            emergency: content.emergency,
            cosmetic: content.cosmetic,
            description: content.description,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the form content, keeping identity and provenance.
    pub fn overwrite(&mut self, content: NewMedicalTreatment) {
        self.preventive = content.preventive;
        self.restorative = content.restorative;
        self.periodontal = content.periodontal;
        self.endodontic = content.endodontic;
        self.prosthodontic = content.prosthodontic;
        self.pediatric = content.pediatric;
        self.sedation = content.sedation;
        self.emergency = content.emergency;
        self.cosmetic = content.cosmetic;
        self.description = content.description;
        self.updated_at = Utc::now();
    }
}
