// storage/src/images.rs
// Stores image metadata. The bytes themselves live on disk and are the
// upload handler's concern.

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::image::ImageRecord;

use crate::tree::DocTree;

#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    async fn add_image(&self, image: &ImageRecord) -> ClinicResult<()>;
    async fn delete_image(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_image(&self, id: &Uuid) -> ClinicResult<Option<ImageRecord>>;
    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<ImageRecord>>;
}

/// Sled-backed implementation of the `ImageStore` trait.
pub struct SledImageStore {
    tree: DocTree<ImageRecord>,
}

impl SledImageStore {
    /// Opens the "images" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "images")?,
        })
    }
}

#[async_trait]
impl ImageStore for SledImageStore {
    async fn add_image(&self, image: &ImageRecord) -> ClinicResult<()> {
        self.tree.put(&image.id, image)
    }

    async fn delete_image(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_image(&self, id: &Uuid) -> ClinicResult<Option<ImageRecord>> {
        self.tree.get(id)
    }

    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<ImageRecord>> {
        let mut images = self.tree.filter(|i| i.patient_id == *patient_id)?;
        images.sort_by_key(|i| i.created_at);
        Ok(images)
    }
}
