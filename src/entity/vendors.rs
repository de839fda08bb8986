use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parent_products::Entity")]
    ParentProducts,
}

impl Related<super::parent_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
