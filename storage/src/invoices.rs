// storage/src/invoices.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::invoice::Invoice;

use crate::tree::DocTree;

#[async_trait]
pub trait InvoiceStore: Send + Sync + 'static {
    async fn add_invoice(&self, invoice: &Invoice) -> ClinicResult<()>;
    async fn update_invoice(&self, invoice: &Invoice) -> ClinicResult<()>;
    async fn get_invoice(&self, id: &Uuid) -> ClinicResult<Option<Invoice>>;
    async fn list_invoices(&self) -> ClinicResult<Vec<Invoice>>;
    /// Invoices whose pending payment has not been confirmed yet, oldest
    /// first. The reception dashboard polls this.
    async fn list_unconfirmed(&self) -> ClinicResult<Vec<Invoice>>;
}

/// Sled-backed implementation of the `InvoiceStore` trait.
pub struct SledInvoiceStore {
    tree: DocTree<Invoice>,
}

impl SledInvoiceStore {
    /// Opens the "invoices" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "invoices")?,
        })
    }
}

#[async_trait]
impl InvoiceStore for SledInvoiceStore {
    async fn add_invoice(&self, invoice: &Invoice) -> ClinicResult<()> {
        self.tree.put(&invoice.id, invoice)
    }

    async fn update_invoice(&self, invoice: &Invoice) -> ClinicResult<()> {
        self.tree.put(&invoice.id, invoice)
    }

    async fn get_invoice(&self, id: &Uuid) -> ClinicResult<Option<Invoice>> {
        self.tree.get(id)
    }

    async fn list_invoices(&self) -> ClinicResult<Vec<Invoice>> {
        self.tree.all()
    }

    async fn list_unconfirmed(&self) -> ClinicResult<Vec<Invoice>> {
        let mut invoices = self.tree.filter(|i| !i.current_payment.confirmed)?;
        invoices.sort_by_key(|i| i.created_at);
        Ok(invoices)
    }
}
