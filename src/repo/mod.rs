//! Repository seams between the aggregation engine and the store. The
//! services only see these traits; production wires the Postgres
//! implementations, tests wire [`memory::MemoryStore`].

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{OrderRecord, ProductRecord, Vendor, VendorId};

pub mod memory;
pub mod postgres;

#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// All vendors, sorted by name ascending.
    async fn list(&self) -> AppResult<Vec<Vendor>>;

    async fn find_by_id(&self, id: &VendorId) -> AppResult<Option<Vendor>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every order with its cart lines. Orders and lines are read-only from
    /// this system's perspective.
    async fn orders_with_lines(&self) -> AppResult<Vec<OrderRecord>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// The full product catalog; the pipeline scopes it per vendor.
    async fn catalog(&self) -> AppResult<Vec<ProductRecord>>;
}
