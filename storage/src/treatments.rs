// storage/src/treatments.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::treatment::MedicalTreatment;

use crate::tree::DocTree;

#[async_trait]
pub trait TreatmentStore: Send + Sync + 'static {
    async fn add_treatment(&self, treatment: &MedicalTreatment) -> ClinicResult<()>;
    async fn update_treatment(&self, treatment: &MedicalTreatment) -> ClinicResult<()>;
    async fn delete_treatment(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_treatment(&self, id: &Uuid) -> ClinicResult<Option<MedicalTreatment>>;
    /// Treatments recorded for one patient, oldest first.
    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<MedicalTreatment>>;
}

/// Sled-backed implementation of the `TreatmentStore` trait.
pub struct SledTreatmentStore {
    tree: DocTree<MedicalTreatment>,
}

impl SledTreatmentStore {
    /// Opens the "medical_treatments" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "medical_treatments")?,
        })
    }
}

#[async_trait]
impl TreatmentStore for SledTreatmentStore {
    async fn add_treatment(&self, treatment: &MedicalTreatment) -> ClinicResult<()> {
        self.tree.put(&treatment.id, treatment)
    }

    async fn update_treatment(&self, treatment: &MedicalTreatment) -> ClinicResult<()> {
        self.tree.put(&treatment.id, treatment)
    }

    async fn delete_treatment(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_treatment(&self, id: &Uuid) -> ClinicResult<Option<MedicalTreatment>> {
        self.tree.get(id)
    }

    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<MedicalTreatment>> {
        let mut treatments = self.tree.filter(|t| t.patient_id == *patient_id)?;
        treatments.sort_by_key(|t| t.created_at);
        Ok(treatments)
    }
}
