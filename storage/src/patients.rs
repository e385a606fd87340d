// storage/src/patients.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use regex::RegexBuilder;
use sled::Db;
use uuid::Uuid;

use models::errors::{ClinicError, ClinicResult};
use models::patient::{Patient, PatientLink};

use crate::tree::DocTree;

#[async_trait]
pub trait PatientStore: Send + Sync + 'static {
    /// Registers a patient. Fails when the card number, email or phone
    /// number is already taken; nothing is written on failure.
    async fn add_patient(&self, patient: &Patient) -> ClinicResult<()>;
    /// Overwrites an existing patient, re-checking uniqueness against others.
    async fn update_patient(&self, patient: &Patient) -> ClinicResult<()>;
    /// Deletes a patient by id. Child documents are not retracted.
    async fn delete_patient(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_patient(&self, id: &Uuid) -> ClinicResult<Option<Patient>>;
    async fn list_patients(&self) -> ClinicResult<Vec<Patient>>;
    /// Exact first-name lookup.
    async fn find_by_first_name(&self, first_name: &str) -> ClinicResult<Option<Patient>>;
    /// Exact card-number lookup.
    async fn find_by_card_no(&self, card_no: &str) -> ClinicResult<Option<Patient>>;
    /// Case-insensitive substring search over first name and phone number.
    async fn search(
        &self,
        first_name: Option<&str>,
        phone_number: Option<&str>,
    ) -> ClinicResult<Vec<Patient>>;
    async fn count_patients(&self) -> ClinicResult<u64>;
    /// Registration counts grouped by "YYYY-MM" month key.
    async fn registrations_by_month(&self) -> ClinicResult<BTreeMap<String, u64>>;
    /// Appends a child document id to the patient's back-reference vector
    /// and returns the updated patient. Read-modify-write; concurrent
    /// appends are last-write-wins.
    async fn append_link(
        &self,
        patient_id: &Uuid,
        link: PatientLink,
        child: Uuid,
    ) -> ClinicResult<Patient>;
}

/// Sled-backed implementation of the `PatientStore` trait.
pub struct SledPatientStore {
    tree: DocTree<Patient>,
}

impl SledPatientStore {
    /// Opens the "patients" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "patients")?,
        })
    }

    fn check_unique(&self, patient: &Patient) -> ClinicResult<()> {
        let clash = self.tree.find(|existing| {
            existing.id != patient.id
                && (existing.card_no == patient.card_no
                    || existing.email == patient.email
                    || existing.phone_number == patient.phone_number)
        })?;
        match clash {
            Some(existing) if existing.card_no == patient.card_no => Err(
                ClinicError::AlreadyExists(format!("patient with card number '{}'", patient.card_no)),
            ),
            Some(existing) if existing.email == patient.email => Err(ClinicError::AlreadyExists(
                format!("patient with email '{}'", patient.email),
            )),
            Some(_) => Err(ClinicError::AlreadyExists(format!(
                "patient with phone number '{}'",
                patient.phone_number
            ))),
            None => Ok(()),
        }
    }
}

fn substring_matcher(term: &str) -> ClinicResult<regex::Regex> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .map_err(|e| ClinicError::InvalidData(format!("bad search term: {}", e)))
}

#[async_trait]
impl PatientStore for SledPatientStore {
    async fn add_patient(&self, patient: &Patient) -> ClinicResult<()> {
        self.check_unique(patient)?;
        self.tree.put(&patient.id, patient)
    }

    async fn update_patient(&self, patient: &Patient) -> ClinicResult<()> {
        self.check_unique(patient)?;
        self.tree.put(&patient.id, patient)
    }

    async fn delete_patient(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_patient(&self, id: &Uuid) -> ClinicResult<Option<Patient>> {
        self.tree.get(id)
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        self.tree.all()
    }

    async fn find_by_first_name(&self, first_name: &str) -> ClinicResult<Option<Patient>> {
        self.tree.find(|patient| patient.first_name == first_name)
    }

    async fn find_by_card_no(&self, card_no: &str) -> ClinicResult<Option<Patient>> {
        self.tree.find(|patient| patient.card_no == card_no)
    }

    async fn search(
        &self,
        first_name: Option<&str>,
        phone_number: Option<&str>,
    ) -> ClinicResult<Vec<Patient>> {
        let name_matcher = first_name.map(substring_matcher).transpose()?;
        let phone_matcher = phone_number.map(substring_matcher).transpose()?;

        // Supplied terms are conjunctive.
        self.tree.filter(|patient| {
            let name_ok = name_matcher
                .as_ref()
                .map_or(true, |m| m.is_match(&patient.first_name));
            let phone_ok = phone_matcher
                .as_ref()
                .map_or(true, |m| m.is_match(&patient.phone_number));
            name_ok && phone_ok
        })
    }

    async fn count_patients(&self) -> ClinicResult<u64> {
        Ok(self.tree.count())
    }

    async fn registrations_by_month(&self) -> ClinicResult<BTreeMap<String, u64>> {
        let mut months = BTreeMap::new();
        for patient in self.tree.all()? {
            let key = patient.created_at.format("%Y-%m").to_string();
            *months.entry(key).or_insert(0) += 1;
        }
        Ok(months)
    }

    async fn append_link(
        &self,
        patient_id: &Uuid,
        link: PatientLink,
        child: Uuid,
    ) -> ClinicResult<Patient> {
        let mut patient = self
            .tree
            .get(patient_id)?
            .ok_or_else(|| ClinicError::NotFound(format!("patient {}", patient_id)))?;
        patient.push_link(link, child);
        self.tree.put(&patient.id, &patient)?;
        Ok(patient)
    }
}
