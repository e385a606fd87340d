// storage/src/lib.rs
// Sled-backed collection stores. One named tree per collection, documents
// encoded with bincode's serde mode.

pub mod appointments;
pub mod cards;
pub mod db;
pub mod findings;
pub mod healthinfo;
pub mod history;
pub mod images;
pub mod invoices;
pub mod orders;
pub mod patients;
pub mod treatments;
mod tree;
pub mod users;

pub use crate::appointments::{AppointmentStore, SledAppointmentStore};
pub use crate::cards::{CardStore, SledCardStore};
pub use crate::db::ClinicDb;
pub use crate::findings::{FindingStore, SledFindingStore};
pub use crate::healthinfo::{HealthInfoStore, SledHealthInfoStore};
pub use crate::history::{HistoryStore, SledHistoryStore};
pub use crate::images::{ImageStore, SledImageStore};
pub use crate::invoices::{InvoiceStore, SledInvoiceStore};
pub use crate::orders::{OrderStore, SledOrderStore};
pub use crate::patients::{PatientStore, SledPatientStore};
pub use crate::treatments::{SledTreatmentStore, TreatmentStore};
pub use crate::users::{SledUserStore, UserStore};
