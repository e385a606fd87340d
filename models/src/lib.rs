// models/src/lib.rs

pub mod appointment;
pub mod card;
pub mod errors;
pub mod finding;
pub mod healthinfo;
pub mod history;
pub mod image;
pub mod invoice;
pub mod order;
pub mod patient;
pub mod refs;
pub mod role;
pub mod treatment;
pub mod user;

pub use crate::appointment::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
pub use crate::card::{Card, NewCard};
pub use crate::errors::{ClinicError, ClinicResult, ValidationError, ValidationResult};
pub use crate::finding::{MedicalFinding, NewMedicalFinding, TreatmentPlan, VitalSigns};
pub use crate::healthinfo::{HealthInfo, HealthInfoUpdate, NewHealthInfo};
pub use crate::history::{History, HistoryInvoice};
pub use crate::image::{ImageRecord, NewImageRecord};
pub use crate::invoice::{
    CurrentPayment, Invoice, InvoiceItem, InvoiceStatus, NewInvoice, NewInvoiceItem,
};
pub use crate::order::{NewOrder, Order, OrderStatus, OrderUpdate};
pub use crate::patient::{NewPatient, Patient, PatientLink, PatientUpdate, Sex};
pub use crate::refs::{PatientRef, UserRef};
pub use crate::role::Role;
pub use crate::treatment::{MedicalTreatment, NewMedicalTreatment};
pub use crate::user::{Login, NewUser, PublicUser, User, UserUpdate};
