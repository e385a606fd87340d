// storage/src/findings.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::finding::MedicalFinding;

use crate::tree::DocTree;

#[async_trait]
pub trait FindingStore: Send + Sync + 'static {
    async fn add_finding(&self, finding: &MedicalFinding) -> ClinicResult<()>;
    async fn update_finding(&self, finding: &MedicalFinding) -> ClinicResult<()>;
    async fn delete_finding(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_finding(&self, id: &Uuid) -> ClinicResult<Option<MedicalFinding>>;
    /// Findings recorded for one patient, oldest first.
    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<MedicalFinding>>;
}

/// Sled-backed implementation of the `FindingStore` trait.
pub struct SledFindingStore {
    tree: DocTree<MedicalFinding>,
}

impl SledFindingStore {
    /// Opens the "medical_findings" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "medical_findings")?,
        })
    }
}

#[async_trait]
impl FindingStore for SledFindingStore {
    async fn add_finding(&self, finding: &MedicalFinding) -> ClinicResult<()> {
        self.tree.put(&finding.id, finding)
    }

    async fn update_finding(&self, finding: &MedicalFinding) -> ClinicResult<()> {
        self.tree.put(&finding.id, finding)
    }

    async fn delete_finding(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_finding(&self, id: &Uuid) -> ClinicResult<Option<MedicalFinding>> {
        self.tree.get(id)
    }

    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<MedicalFinding>> {
        let mut findings = self.tree.filter(|f| f.patient_id == *patient_id)?;
        findings.sort_by_key(|f| f.created_at);
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::{FindingStore, SledFindingStore};
    use models::finding::{MedicalFinding, NewMedicalFinding};
    use models::refs::UserRef;
    use uuid::Uuid;

    fn store() -> SledFindingStore {
        let db = sled::Config::new().temporary(true).open().unwrap();
        SledFindingStore::new(&db).unwrap()
    }

    fn doctor() -> UserRef {
        UserRef {
            id: Uuid::new_v4(),
            username: "drwho".to_string(),
        }
    }

    #[tokio::test]
    async fn should_list_only_the_patients_findings() {
        let store = store();
        let patient_id = Uuid::new_v4();

        let mine = MedicalFinding::from_new(
            patient_id,
            NewMedicalFinding {
                chief_complaint: Some("toothache".to_string()),
                ..Default::default()
            },
            doctor(),
        );
        let other =
            MedicalFinding::from_new(Uuid::new_v4(), NewMedicalFinding::default(), doctor());

        store.add_finding(&mine).await.unwrap();
        store.add_finding(&other).await.unwrap();

        let listed = store.list_for_patient(&patient_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].chief_complaint.as_deref(), Some("toothache"));
    }

    #[tokio::test]
    async fn should_delete_finding() {
        let store = store();
        let finding =
            MedicalFinding::from_new(Uuid::new_v4(), NewMedicalFinding::default(), doctor());
        store.add_finding(&finding).await.unwrap();
        assert!(store.delete_finding(&finding.id).await.unwrap());
        assert!(store.get_finding(&finding.id).await.unwrap().is_none());
    }
}
