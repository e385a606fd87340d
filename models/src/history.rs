// models/src/history.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::invoice::Invoice;
use crate::refs::{PatientRef, UserRef};

/// The confirmed payment, denormalised for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryInvoice {
    pub id: Uuid,
    pub amount: f64,
    pub created: UserRef,
    pub customer: PatientRef,
}

/// Written once per confirmed invoice payment; never updated. Reports
/// sum over these rows instead of re-walking invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub id: Uuid,
    pub invoice: HistoryInvoice,
    pub created_at: DateTime<Utc>,
}

impl History {
    /// Snapshots the payment that was just confirmed.
    pub fn from_confirmed(invoice: &Invoice) -> Self {
        History {
            id: Uuid::new_v4(),
            invoice: HistoryInvoice {
                id: invoice.id,
                amount: invoice.current_payment.amount,
                created: invoice.created_by.clone(),
                customer: invoice.customer.clone(),
            },
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::invoice::{Invoice, NewInvoice, NewInvoiceItem};
    use crate::refs::{PatientRef, UserRef};
    use uuid::Uuid;

    #[test]
    fn should_snapshot_payment_amount_and_parties() {
        let customer = PatientRef {
            id: Uuid::new_v4(),
            username: "Abebe".to_string(),
            card_no: "C-1001".to_string(),
        };
        let doctor = UserRef {
            id: Uuid::new_v4(),
            username: "drwho".to_string(),
        };
        let mut invoice = Invoice::from_new(
            NewInvoice {
                items: vec![NewInvoiceItem {
                    service_name: "filling".to_string(),
                    description: None,
                    quantity: 1,
                    unit_price: 500.0,
                }],
                current_payment: Some(250.0),
                invoice_date: None,
            },
            customer.clone(),
            doctor.clone(),
        );
        invoice.confirm_payment();

        let row = History::from_confirmed(&invoice);
        assert_eq!(row.invoice.id, invoice.id);
        assert_eq!(row.invoice.amount, 250.0);
        assert_eq!(row.invoice.created.username, doctor.username);
        assert_eq!(row.invoice.customer.card_no, customer.card_no);
    }
}
