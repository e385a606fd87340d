// models/src/invoice.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::{PatientRef, UserRef};

/// Wire strings kept as the billing screens expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Cancel,
    #[serde(rename = "order")]
    Order,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Pending
    }
}

/// Line item as posted; the total is computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub service_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub service_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// The payment sitting in front of the reception desk. Folding it into
/// `total_paid` happens once, on confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPayment {
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub confirmed: bool,
}

/// Creation payload posted by the treating doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub items: Vec<NewInvoiceItem>,
    /// Amount handed over at creation, awaiting confirmation.
    #[serde(default)]
    pub current_payment: Option<f64>,
    #[serde(default)]
    pub invoice_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer: PatientRef,
    pub items: Vec<InvoiceItem>,
    pub invoice_date: DateTime<Utc>,
    pub total_amount: f64,
    pub total_paid: f64,
    pub balance: f64,
    pub current_payment: CurrentPayment,
    pub status: InvoiceStatus,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn from_new(new_invoice: NewInvoice, customer: PatientRef, created_by: UserRef) -> Self {
        let now = Utc::now();
        let items: Vec<InvoiceItem> = new_invoice
            .items
            .into_iter()
            .map(|item| InvoiceItem {
                total_price: f64::from(item.quantity) * item.unit_price,
                service_name: item.service_name,
                description: item.description,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        let total_amount = items.iter().map(|item| item.total_price).sum();

        Invoice {
            id: Uuid::new_v4(),
            customer,
            items,
            invoice_date: new_invoice.invoice_date.unwrap_or(now),
            total_amount,
            total_paid: 0.0,
            balance: total_amount,
            current_payment: CurrentPayment {
                amount: new_invoice.current_payment.unwrap_or(0.0),
                date: now,
                confirmed: false,
            },
            status: InvoiceStatus::default(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Confirms the pending payment. Folds the amount into `total_paid`
    /// exactly once; a repeat confirmation is a no-op. Returns whether
    /// anything changed.
    pub fn confirm_payment(&mut self) -> bool {
        if self.current_payment.confirmed {
            return false;
        }
        self.current_payment.confirmed = true;
        self.total_paid += self.current_payment.amount;
        self.balance = self.total_amount - self.total_paid;
        if self.balance <= 0.0 {
            self.status = InvoiceStatus::Paid;
        }
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Invoice, InvoiceStatus, NewInvoice, NewInvoiceItem};
    use crate::refs::{PatientRef, UserRef};
    use uuid::Uuid;

    fn build(items: Vec<NewInvoiceItem>, payment: Option<f64>) -> Invoice {
        let customer = PatientRef {
            id: Uuid::new_v4(),
            username: "Abebe".to_string(),
            card_no: "C-1001".to_string(),
        };
        let doctor = UserRef {
            id: Uuid::new_v4(),
            username: "drwho".to_string(),
        };
        Invoice::from_new(
            NewInvoice {
                items,
                current_payment: payment,
                invoice_date: None,
            },
            customer,
            doctor,
        )
    }

    fn item(name: &str, quantity: u32, unit_price: f64) -> NewInvoiceItem {
        NewInvoiceItem {
            service_name: name.to_string(),
            description: None,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn should_compute_totals_server_side() {
        let invoice = build(vec![item("cleaning", 2, 150.0), item("x-ray", 1, 300.0)], None);
        assert_eq!(invoice.items[0].total_price, 300.0);
        assert_eq!(invoice.total_amount, 600.0);
        assert_eq!(invoice.balance, 600.0);
        assert_eq!(invoice.total_paid, 0.0);
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert!(!invoice.current_payment.confirmed);
    }

    #[test]
    fn should_fold_payment_exactly_once() {
        let mut invoice = build(vec![item("filling", 1, 500.0)], Some(200.0));
        assert!(invoice.confirm_payment());
        assert_eq!(invoice.total_paid, 200.0);
        assert_eq!(invoice.balance, 300.0);
        assert_eq!(invoice.status, InvoiceStatus::Pending);

        // Repeat confirmation changes nothing.
        assert!(!invoice.confirm_payment());
        assert_eq!(invoice.total_paid, 200.0);
        assert_eq!(invoice.balance, 300.0);
    }

    #[test]
    fn should_mark_paid_when_balance_reaches_zero() {
        let mut invoice = build(vec![item("filling", 1, 500.0)], Some(500.0));
        assert!(invoice.confirm_payment());
        assert_eq!(invoice.balance, 0.0);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn order_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Order).unwrap(),
            "\"order\""
        );
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Paid).unwrap(),
            "\"Paid\""
        );
    }
}
