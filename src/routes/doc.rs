use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::dashboard::{MonthlySale, PaginationMeta, ProductSale, ProductSalesData},
    models::Vendor,
    response::ApiResponse,
    routes::{dashboard, health, params, vendor},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        vendor::list_vendors,
        dashboard::monthly_sales,
        dashboard::product_sales,
    ),
    components(
        schemas(
            Vendor,
            MonthlySale,
            ProductSale,
            PaginationMeta,
            ProductSalesData,
            health::HealthData,
            params::ProductSalesQuery,
            ApiResponse<Vec<Vendor>>,
            ApiResponse<Vec<MonthlySale>>,
            ApiResponse<ProductSalesData>,
            ApiResponse<health::HealthData>,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Vendors", description = "Vendor listing"),
        (name = "Dashboard", description = "Sales reports per vendor"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
