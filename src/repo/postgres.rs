use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entity::{cart_items, orders, parent_products, vendors};
use crate::error::AppResult;
use crate::models::{CartLine, OrderRecord, ProductRecord, Vendor, VendorId};

use super::{OrderRepository, ProductRepository, VendorRepository};

#[derive(Clone)]
pub struct PgVendorRepository {
    conn: DatabaseConnection,
}

impl PgVendorRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl VendorRepository for PgVendorRepository {
    async fn list(&self) -> AppResult<Vec<Vendor>> {
        let rows = vendors::Entity::find()
            .order_by_asc(vendors::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(vendor_from_entity).collect())
    }

    async fn find_by_id(&self, id: &VendorId) -> AppResult<Option<Vendor>> {
        let row = vendors::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await?;
        Ok(row.map(vendor_from_entity))
    }
}

#[derive(Clone)]
pub struct PgOrderRepository {
    conn: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn orders_with_lines(&self) -> AppResult<Vec<OrderRecord>> {
        let rows = orders::Entity::find()
            .find_with_related(cart_items::Entity)
            .all(&self.conn)
            .await?;

        let records = rows
            .into_iter()
            .map(|(order, lines)| OrderRecord {
                id: order.id,
                payment_at: order.payment_at.map(|at| at.with_timezone(&Utc)),
                lines: lines
                    .into_iter()
                    .map(|line| CartLine {
                        product_id: line.product_id,
                        item_count: i64::from(line.item_count),
                        quantity: i64::from(line.quantity),
                    })
                    .collect(),
            })
            .collect();
        Ok(records)
    }
}

#[derive(Clone)]
pub struct PgProductRepository {
    conn: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn catalog(&self) -> AppResult<Vec<ProductRecord>> {
        let rows = parent_products::Entity::find().all(&self.conn).await?;
        let records = rows
            .into_iter()
            .map(|product| ProductRecord {
                id: product.id,
                name: product.name,
                vendor_id: product.vendor_id,
            })
            .collect();
        Ok(records)
    }
}

fn vendor_from_entity(model: vendors::Model) -> Vendor {
    Vendor {
        id: model.id,
        name: model.name,
    }
}
