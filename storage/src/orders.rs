// storage/src/orders.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::ClinicResult;
use models::order::Order;

use crate::tree::DocTree;

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    async fn add_order(&self, order: &Order) -> ClinicResult<()>;
    async fn update_order(&self, order: &Order) -> ClinicResult<()>;
    async fn get_order(&self, id: &Uuid) -> ClinicResult<Option<Order>>;
    async fn list_orders(&self) -> ClinicResult<Vec<Order>>;
    /// Every order still in the Active state.
    async fn list_active(&self) -> ClinicResult<Vec<Order>>;
    /// Active orders assigned to the given doctor, oldest first.
    async fn list_active_for_doctor(&self, doctor_id: &Uuid) -> ClinicResult<Vec<Order>>;
}

/// Sled-backed implementation of the `OrderStore` trait.
pub struct SledOrderStore {
    tree: DocTree<Order>,
}

impl SledOrderStore {
    /// Opens the "orders" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "orders")?,
        })
    }
}

#[async_trait]
impl OrderStore for SledOrderStore {
    async fn add_order(&self, order: &Order) -> ClinicResult<()> {
        self.tree.put(&order.id, order)
    }

    async fn update_order(&self, order: &Order) -> ClinicResult<()> {
        self.tree.put(&order.id, order)
    }

    async fn get_order(&self, id: &Uuid) -> ClinicResult<Option<Order>> {
        self.tree.get(id)
    }

    async fn list_orders(&self) -> ClinicResult<Vec<Order>> {
        self.tree.all()
    }

    async fn list_active(&self) -> ClinicResult<Vec<Order>> {
        self.tree.filter(|order| order.is_active())
    }

    async fn list_active_for_doctor(&self, doctor_id: &Uuid) -> ClinicResult<Vec<Order>> {
        let mut orders = self
            .tree
            .filter(|order| order.is_active() && order.assigned_doctor.id == *doctor_id)?;
        orders.sort_by_key(|order| order.created_at);
        Ok(orders)
    }
}
