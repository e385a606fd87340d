// storage/src/appointments.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sled::Db;
use uuid::Uuid;

use models::appointment::Appointment;
use models::errors::ClinicResult;

use crate::tree::DocTree;

#[async_trait]
pub trait AppointmentStore: Send + Sync + 'static {
    async fn add_appointment(&self, appointment: &Appointment) -> ClinicResult<()>;
    async fn update_appointment(&self, appointment: &Appointment) -> ClinicResult<()>;
    async fn delete_appointment(&self, id: &Uuid) -> ClinicResult<bool>;
    async fn get_appointment(&self, id: &Uuid) -> ClinicResult<Option<Appointment>>;
    /// Appointments booked for one patient, soonest first.
    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<Appointment>>;
    /// Appointments whose date falls inside `[start, end]`, soonest first.
    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<Appointment>>;
}

/// Sled-backed implementation of the `AppointmentStore` trait.
pub struct SledAppointmentStore {
    tree: DocTree<Appointment>,
}

impl SledAppointmentStore {
    /// Opens the "appointments" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "appointments")?,
        })
    }
}

#[async_trait]
impl AppointmentStore for SledAppointmentStore {
    async fn add_appointment(&self, appointment: &Appointment) -> ClinicResult<()> {
        self.tree.put(&appointment.id, appointment)
    }

    async fn update_appointment(&self, appointment: &Appointment) -> ClinicResult<()> {
        self.tree.put(&appointment.id, appointment)
    }

    async fn delete_appointment(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_appointment(&self, id: &Uuid) -> ClinicResult<Option<Appointment>> {
        self.tree.get(id)
    }

    async fn list_for_patient(&self, patient_id: &Uuid) -> ClinicResult<Vec<Appointment>> {
        let mut appointments = self.tree.filter(|a| a.patient.id == *patient_id)?;
        appointments.sort_by_key(|a| a.appointment_date);
        Ok(appointments)
    }

    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<Appointment>> {
        let mut appointments = self
            .tree
            .filter(|a| a.appointment_date >= start && a.appointment_date <= end)?;
        appointments.sort_by_key(|a| a.appointment_date);
        Ok(appointments)
    }
}
