//! In-memory store used by the report tests; implements every repository
//! trait over plain vectors.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{OrderRecord, ProductRecord, Vendor, VendorId};

use super::{OrderRepository, ProductRepository, VendorRepository};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub vendors: Vec<Vendor>,
    pub orders: Vec<OrderRecord>,
    pub products: Vec<ProductRecord>,
}

#[async_trait]
impl VendorRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Vendor>> {
        let mut vendors = self.vendors.clone();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vendors)
    }

    async fn find_by_id(&self, id: &VendorId) -> AppResult<Option<Vendor>> {
        Ok(self
            .vendors
            .iter()
            .find(|vendor| vendor.id == id.as_str())
            .cloned())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn orders_with_lines(&self) -> AppResult<Vec<OrderRecord>> {
        Ok(self.orders.clone())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn catalog(&self) -> AppResult<Vec<ProductRecord>> {
        Ok(self.products.clone())
    }
}
