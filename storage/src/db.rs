// storage/src/db.rs

use std::fs;
use std::path::Path;

use sled::Db;
use tracing::info;

use models::errors::{ClinicError, ClinicResult};

use crate::appointments::SledAppointmentStore;
use crate::cards::SledCardStore;
use crate::findings::SledFindingStore;
use crate::healthinfo::SledHealthInfoStore;
use crate::history::SledHistoryStore;
use crate::images::SledImageStore;
use crate::invoices::SledInvoiceStore;
use crate::orders::SledOrderStore;
use crate::patients::SledPatientStore;
use crate::treatments::SledTreatmentStore;
use crate::users::SledUserStore;

/// All collection stores over one sled database.
pub struct ClinicDb {
    pub users: SledUserStore,
    pub patients: SledPatientStore,
    pub orders: SledOrderStore,
    pub findings: SledFindingStore,
    pub treatments: SledTreatmentStore,
    pub health_infos: SledHealthInfoStore,
    pub appointments: SledAppointmentStore,
    pub images: SledImageStore,
    pub invoices: SledInvoiceStore,
    pub cards: SledCardStore,
    pub history: SledHistoryStore,
}

impl ClinicDb {
    /// Opens (creating if needed) the database directory and every
    /// collection tree.
    pub fn open(path: &Path) -> ClinicResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "creating database directory");
            fs::create_dir_all(path).map_err(|e| {
                ClinicError::StorageError(format!(
                    "failed to create database directory at {:?}: {}",
                    path, e
                ))
            })?;
        } else if !path.is_dir() {
            return Err(ClinicError::StorageError(format!(
                "path {:?} exists but is not a directory",
                path
            )));
        }

        let db = sled::open(path)?;
        info!(path = %path.display(), "database opened");
        Self::from_db(&db)
    }

    /// In-memory database for tests; dropped files disappear with it.
    pub fn temporary() -> ClinicResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(&db)
    }

    fn from_db(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            users: SledUserStore::new(db)?,
            patients: SledPatientStore::new(db)?,
            orders: SledOrderStore::new(db)?,
            findings: SledFindingStore::new(db)?,
            treatments: SledTreatmentStore::new(db)?,
            health_infos: SledHealthInfoStore::new(db)?,
            appointments: SledAppointmentStore::new(db)?,
            images: SledImageStore::new(db)?,
            invoices: SledInvoiceStore::new(db)?,
            cards: SledCardStore::new(db)?,
            history: SledHistoryStore::new(db)?,
        })
    }
}
