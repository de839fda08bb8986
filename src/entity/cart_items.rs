use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub order_id: String,
    // Plain reference, no FK: historical lines survive catalog deletes and
    // the aggregators drop lines they cannot join.
    pub product_id: String,
    pub item_count: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::parent_products::Entity",
        from = "Column::ProductId",
        to = "super::parent_products::Column::Id"
    )]
    ParentProducts,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::parent_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
