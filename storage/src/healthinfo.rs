// storage/src/healthinfo.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::healthinfo::HealthInfo;

use crate::tree::DocTree;

#[async_trait]
pub trait HealthInfoStore: Send + Sync + 'static {
    async fn add_health_info(&self, info: &HealthInfo) -> ClinicResult<()>;
    async fn update_health_info(&self, info: &HealthInfo) -> ClinicResult<()>;
    async fn delete_health_info(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_health_info(&self, id: &Uuid) -> ClinicResult<Option<HealthInfo>>;
    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<HealthInfo>>;
}

/// Sled-backed implementation of the `HealthInfoStore` trait.
pub struct SledHealthInfoStore {
    tree: DocTree<HealthInfo>,
}

impl SledHealthInfoStore {
    /// Opens the "health_infos" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "health_infos")?,
        })
    }
}

#[async_trait]
impl HealthInfoStore for SledHealthInfoStore {
    async fn add_health_info(&self, info: &HealthInfo) -> ClinicResult<()> {
        self.tree.put(&info.id, info)
    }

    async fn update_health_info(&self, info: &HealthInfo) -> ClinicResult<()> {
        self.tree.put(&info.id, info)
    }

    async fn delete_health_info(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_health_info(&self, id: &Uuid) -> ClinicResult<Option<HealthInfo>> {
        self.tree.get(id)
    }

    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<HealthInfo>> {
        let mut infos = self.tree.filter(|i| i.patient_id == *patient_id)?;
        infos.sort_by_key(|i| i.created_at);
        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::{HealthInfoStore, SledHealthInfoStore};
    use models::healthinfo::{HealthInfo, NewHealthInfo};
    use models::refs::UserRef;
    use uuid::Uuid;

    #[tokio::test]
    async fn should_store_and_update_health_info() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledHealthInfoStore::new(&db).unwrap();
        let patient_id = Uuid::new_v4();

        let mut info = HealthInfo::from_new(
            patient_id,
            NewHealthInfo {
                blood_group: Some("AB-".to_string()),
                ..Default::default()
            },
            UserRef {
                id: Uuid::new_v4(),
                username: "frontdesk".to_string(),
            },
        );
        store.add_health_info(&info).await.unwrap();

        info.habits = Some("smoker".to_string());
        store.update_health_info(&info).await.unwrap();

        let listed = store.list_for_patient(&patient_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].habits.as_deref(), Some("smoker"));
    }
}
