// models/src/finding.rs
// Examination narrative captured by the treating doctor. No versioning;
// an edit overwrites the content fields wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::UserRef;

/// Free-text vitals recorded at examination time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub core_temperature: Option<String>,
    pub respiratory_rate: Option<String>,
    pub blood_oxygen: Option<String>,
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<String>,
}

/// Cosmetic work ticked off on the examination and treatment forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentPlan {
    pub teeth_whitening: bool,
    pub veneers: bool,
    pub bonding: bool,
    pub cosmetic_contouring: bool,
    pub gum_contouring: bool,
    pub composite_bonding: bool,
    pub smile_makeovers: bool,
    pub other: Option<String>,
}

/// Content fields of a finding, as posted by the examination form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMedicalFinding {
    pub chief_complaint: Option<String>,
    pub history_present: Option<String>,
    pub past_medical_history: Option<String>,
    pub past_dental_history: Option<String>,
    pub intraoral_examination: Option<String>,
    pub extraoral_examination: Option<String>,
    pub investigation: Option<String>,
    pub assessment: Option<String>,
    #[serde(default)]
    pub vital_signs: VitalSigns,
    #[serde(default)]
    pub treatment_plan: TreatmentPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalFinding {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub chief_complaint: Option<String>,
    pub history_present: Option<String>,
    pub past_medical_history: Option<String>,
    pub past_dental_history: Option<String>,
    pub intraoral_examination: Option<String>,
    pub extraoral_examination: Option<String>,
    pub investigation: Option<String>,
    pub assessment: Option<String>,
    pub vital_signs: VitalSigns,
    pub treatment_plan: TreatmentPlan,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicalFinding {
    pub fn from_new(patient_id: Uuid, content: NewMedicalFinding, created_by: UserRef) -> Self {
        let now = Utc::now();
        MedicalFinding {
            id: Uuid::new_v4(),
            patient_id,
            chief_complaint: content.chief_complaint,
            history_present: content.history_present,
            past_medical_history: content.past_medical_history,
            past_dental_history: content.past_dental_history,
            intraoral_examination: content.intraoral_examination,
            extraoral_examination: content.extraoral_examination,
            investigation: content.investigation,
            assessment: content.assessment,
            vital_signs: content.vital_signs,
            treatment_plan: content.treatment_plan,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the content fields with the posted form, keeping identity
    /// and provenance.
    pub fn overwrite(&mut self, content: NewMedicalFinding) {
        self.chief_complaint = content.chief_complaint;
        self.history_present = content.history_present;
        self.past_medical_history = content.past_medical_history;
        self.past_dental_history = content.past_dental_history;
        self.intraoral_examination = content.intraoral_examination;
        self.extraoral_examination = content.extraoral_examination;
        self.investigation = content.investigation;
        self.assessment = content.assessment;
        self.vital_signs = content.vital_signs;
        self.treatment_plan = content.treatment_plan;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::{MedicalFinding, NewMedicalFinding, VitalSigns};
    use crate::refs::UserRef;
    use uuid::Uuid;

    fn doctor() -> UserRef {
        UserRef {
            id: Uuid::new_v4(),
            username: "drwho".to_string(),
        }
    }

    #[test]
    fn should_keep_identity_on_overwrite() {
        let mut finding = MedicalFinding::from_new(
            Uuid::new_v4(),
            NewMedicalFinding {
                chief_complaint: Some("toothache".to_string()),
                ..Default::default()
            },
            doctor(),
        );
        let id = finding.id;
        let patient_id = finding.patient_id;

        finding.overwrite(NewMedicalFinding {
            assessment: Some("caries".to_string()),
            ..Default::default()
        });

        assert_eq!(finding.id, id);
        assert_eq!(finding.patient_id, patient_id);
        assert_eq!(finding.assessment.as_deref(), Some("caries"));
        assert!(finding.chief_complaint.is_none());
    }

    #[test]
    fn should_accept_sparse_form_payload() {
        let content: NewMedicalFinding =
            serde_json::from_str(r#"{"chief_complaint": "bleeding gums"}"#).unwrap();
        assert_eq!(content.chief_complaint.as_deref(), Some("bleeding gums"));
        assert_eq!(content.vital_signs, VitalSigns::default());
        assert!(!content.treatment_plan.veneers);
    }
}
