// models/src/appointment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::{PatientRef, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

/// Booking payload posted against a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub doctor_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient: PatientRef,
    pub doctor: UserRef,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        patient: PatientRef,
        doctor: UserRef,
        appointment_date: DateTime<Utc>,
        status: Option<AppointmentStatus>,
        created_by: UserRef,
    ) -> Self {
        let now = Utc::now();
        Appointment {
            id: Uuid::new_v4(),
            patient,
            doctor,
            appointment_date,
            status: status.unwrap_or_default(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: AppointmentUpdate) {
        if let Some(appointment_date) = update.appointment_date {
            self.appointment_date = appointment_date;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update: reschedule, complete or cancel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::{Appointment, AppointmentStatus, AppointmentUpdate};
    use crate::refs::{PatientRef, UserRef};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn booked() -> Appointment {
        let patient = PatientRef {
            id: Uuid::new_v4(),
            username: "Abebe".to_string(),
            card_no: "C-1001".to_string(),
        };
        let doctor = UserRef {
            id: Uuid::new_v4(),
            username: "drwho".to_string(),
        };
        let desk = UserRef {
            id: Uuid::new_v4(),
            username: "frontdesk".to_string(),
        };
        Appointment::new(patient, doctor, Utc::now() + Duration::days(1), None, desk)
    }

    #[test]
    fn should_default_to_scheduled() {
        assert_eq!(booked().status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn should_reschedule_without_touching_status() {
        let mut appointment = booked();
        let new_date = Utc::now() + Duration::days(3);
        appointment.apply_update(AppointmentUpdate {
            appointment_date: Some(new_date),
            ..Default::default()
        });
        assert_eq!(appointment.appointment_date, new_date);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }
}
