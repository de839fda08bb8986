use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repo::{
    OrderRepository, ProductRepository, VendorRepository,
    postgres::{PgOrderRepository, PgProductRepository, PgVendorRepository},
};

#[derive(Clone)]
pub struct AppState {
    /// Kept for the audit middleware; everything else goes through the
    /// repositories.
    pub orm: DatabaseConnection,
    pub vendors: Arc<dyn VendorRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self {
            vendors: Arc::new(PgVendorRepository::new(orm.clone())),
            orders: Arc::new(PgOrderRepository::new(orm.clone())),
            products: Arc::new(PgProductRepository::new(orm.clone())),
            orm,
        }
    }
}
