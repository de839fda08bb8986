use serde::Serialize;
use utoipa::ToSchema;

/// One point of the monthly time series. Months with zero sales are not
/// synthesized; gap-filling is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySale {
    /// `YYYY-MM`
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductSale {
    pub code: String,
    pub name: String,
    pub color: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSalesData {
    pub products: Vec<ProductSale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}
