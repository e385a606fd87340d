// models/src/patient.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::{PatientRef, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Registration payload taken by the reception desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub card_no: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: u16,
    pub sex: Sex,
    pub email: String,
    pub phone_number: String,
    pub description: Option<String>,
}

/// Which back-reference vector a child document id is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientLink {
    Order,
    Finding,
    Treatment,
    HealthInfo,
    Appointment,
    Image,
    Invoice,
    Card,
}

/// A registered patient. Child documents are linked back here by id, in
/// creation order; deleting the patient does not retract them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub card_no: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: u16,
    pub sex: Sex,
    pub email: String,
    pub phone_number: String,
    pub description: Option<String>,
    pub created_by: UserRef,
    pub orders: Vec<Uuid>,
    pub medical_findings: Vec<Uuid>,
    pub medical_treatments: Vec<Uuid>,
    pub health_infos: Vec<Uuid>,
    pub appointments: Vec<Uuid>,
    pub images: Vec<Uuid>,
    pub invoices: Vec<Uuid>,
    pub cards: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn from_new_patient(new_patient: NewPatient, created_by: UserRef) -> Self {
        let now = Utc::now();
        Patient {
            id: Uuid::new_v4(),
            card_no: new_patient.card_no,
            first_name: new_patient.first_name,
            last_name: new_patient.last_name,
            age: new_patient.age,
            sex: new_patient.sex,
            email: new_patient.email,
            phone_number: new_patient.phone_number,
            description: new_patient.description,
            created_by,
            orders: Vec::new(),
            medical_findings: Vec::new(),
            medical_treatments: Vec::new(),
            health_infos: Vec::new(),
            appointments: Vec::new(),
            images: Vec::new(),
            invoices: Vec::new(),
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a child document id to the matching back-reference vector.
    pub fn push_link(&mut self, link: PatientLink, id: Uuid) {
        match link {
            PatientLink::Order => self.orders.push(id),
            PatientLink::Finding => self.medical_findings.push(id),
            PatientLink::Treatment => self.medical_treatments.push(id),
            PatientLink::HealthInfo => self.health_infos.push(id),
            PatientLink::Appointment => self.appointments.push(id),
            PatientLink::Image => self.images.push(id),
            PatientLink::Invoice => self.invoices.push(id),
            PatientLink::Card => self.cards.push(id),
        }
        self.updated_at = Utc::now();
    }

    pub fn apply_update(&mut self, update: PatientUpdate) {
        if let Some(card_no) = update.card_no {
            self.card_no = card_no;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(sex) = update.sex {
            self.sex = sex;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }

    pub fn to_ref(&self) -> PatientRef {
        PatientRef {
            id: self.id,
            username: self.first_name.clone(),
            card_no: self.card_no.clone(),
        }
    }
}

/// Partial update of identity fields. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub card_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u16>,
    pub sex: Option<Sex>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
}
