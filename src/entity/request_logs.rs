use sea_orm::entity::prelude::*;
use serde_json::Value;

/// One audit row per non-excluded request, written by the audit middleware.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "request_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub method: String,
    pub url: String,
    pub status: i32,
    pub remote_address: String,
    /// Latency in milliseconds.
    pub response_time: f64,
    pub agent: Option<String>,
    pub decoded: Option<Value>,
    pub request_body: Option<Value>,
    pub response_body: Option<Value>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
