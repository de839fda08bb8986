use chrono::{DateTime, FixedOffset};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use vendor_sales_dashboard::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{Vendors, cart_items, orders, parent_products, vendors},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let conn = create_orm_conn(&config.database_url).await?;
    run_migrations(&conn).await?;

    if Vendors::find().count(&conn).await? > 0 {
        println!("Database already seeded");
        return Ok(());
    }

    let northwind = seed_vendor(&conn, "Northwind Apparel").await?;
    let acme = seed_vendor(&conn, "Acme Outfitters").await?;

    let hoodie = seed_product(&conn, &northwind, "AB12 - Blue Hoodie - Navy").await?;
    let shirt = seed_product(&conn, &northwind, "CD34 - Logo Shirt - White").await?;
    let cap = seed_product(&conn, &northwind, "EF56 - Trucker Cap").await?;
    let boots = seed_product(&conn, &acme, "ZZ99 - Work Boots - Tan").await?;

    seed_order(
        &conn,
        Some("2024-01-15T10:30:00Z"),
        &[(&hoodie, 2, 3), (&shirt, 1, 4)],
    )
    .await?;
    seed_order(&conn, Some("2024-01-20T08:00:00Z"), &[(&cap, 1, 7)]).await?;
    seed_order(
        &conn,
        Some("2024-03-02T16:45:00Z"),
        &[(&shirt, 2, 2), (&boots, 3, 1)],
    )
    .await?;
    // Abandoned checkout: counts for the product report, not the monthly one.
    seed_order(&conn, None, &[(&hoodie, 5, 1)]).await?;

    println!("Seed completed");
    Ok(())
}

/// 24 character hex id, ObjectId style.
fn object_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..24].to_string()
}

async fn seed_vendor(conn: &DatabaseConnection, name: &str) -> anyhow::Result<String> {
    let vendor = vendors::ActiveModel {
        id: Set(object_id()),
        name: Set(name.to_string()),
    }
    .insert(conn)
    .await?;
    println!("Seeded vendor {name} ({})", vendor.id);
    Ok(vendor.id)
}

async fn seed_product(
    conn: &DatabaseConnection,
    vendor_id: &str,
    name: &str,
) -> anyhow::Result<String> {
    let product = parent_products::ActiveModel {
        id: Set(object_id()),
        name: Set(name.to_string()),
        vendor_id: Set(vendor_id.to_string()),
    }
    .insert(conn)
    .await?;
    Ok(product.id)
}

async fn seed_order(
    conn: &DatabaseConnection,
    payment_at: Option<&str>,
    lines: &[(&String, i32, i32)],
) -> anyhow::Result<()> {
    let payment_at = payment_at
        .map(|ts| ts.parse::<DateTime<FixedOffset>>())
        .transpose()?;

    let order = orders::ActiveModel {
        id: Set(object_id()),
        payment_at: Set(payment_at),
        created_at: NotSet,
    }
    .insert(conn)
    .await?;

    for (product_id, item_count, quantity) in lines {
        cart_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id.clone()),
            product_id: Set((*product_id).clone()),
            item_count: Set(*item_count),
            quantity: Set(*quantity),
        }
        .insert(conn)
        .await?;
    }

    Ok(())
}
