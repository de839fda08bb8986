pub mod cart_items;
pub mod orders;
pub mod parent_products;
pub mod request_logs;
pub mod vendors;

pub use cart_items::Entity as CartItems;
pub use orders::Entity as Orders;
pub use parent_products::Entity as ParentProducts;
pub use request_logs::Entity as RequestLogs;
pub use vendors::Entity as Vendors;
