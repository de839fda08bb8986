use crate::dto::dashboard::{MonthlySale, PaginationMeta, ProductSale, ProductSalesData};
use crate::error::{AppError, AppResult};
use crate::models::{Vendor, VendorId};
use crate::pipeline::{GroupRow, Pipeline, PipelineInput, SortDirection, SortKey, Stage};
use crate::repo::{OrderRepository, ProductRepository, VendorRepository};
use crate::response::ApiResponse;
use crate::routes::params::ProductSalesOptions;

/// Every report is gated behind vendor existence.
async fn resolve_vendor(vendors: &dyn VendorRepository, id: &VendorId) -> AppResult<Vendor> {
    vendors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))
}

async fn load_input(
    orders: &dyn OrderRepository,
    products: &dyn ProductRepository,
) -> AppResult<PipelineInput> {
    Ok(PipelineInput {
        orders: orders.orders_with_lines().await?,
        products: products.catalog().await?,
    })
}

/// Total units sold per calendar month for one vendor, ascending by month.
/// Unpaid orders contribute nothing.
pub async fn monthly_sales(
    vendors: &dyn VendorRepository,
    orders: &dyn OrderRepository,
    products: &dyn ProductRepository,
    vendor_id: &VendorId,
) -> AppResult<ApiResponse<Vec<MonthlySale>>> {
    resolve_vendor(vendors, vendor_id).await?;
    let input = load_input(orders, products).await?;

    let rows = Pipeline::new()
        .stage(Stage::FlattenCartLines)
        .stage(Stage::JoinProducts)
        .stage(Stage::MatchVendor(vendor_id.clone()))
        .stage(Stage::ComputeVolume)
        .stage(Stage::MatchPaid)
        .stage(Stage::GroupByMonth)
        .stage(Stage::Sort(SortKey::Label, SortDirection::Asc))
        .run(&input)?;

    let data = rows
        .into_iter()
        .map(|row| MonthlySale {
            label: row.key,
            value: row.total,
        })
        .collect();
    Ok(ApiResponse::success(
        "Monthly sales fetched successfully",
        data,
    ))
}

/// Per-product totals for one vendor with decomposed names, optional search,
/// sorting and pagination. Unlike the monthly report this counts unpaid
/// orders too; the asymmetry is inherited behavior, do not unify it here.
pub async fn product_sales(
    vendors: &dyn VendorRepository,
    orders: &dyn OrderRepository,
    products: &dyn ProductRepository,
    vendor_id: &VendorId,
    options: ProductSalesOptions,
) -> AppResult<ApiResponse<ProductSalesData>> {
    resolve_vendor(vendors, vendor_id).await?;
    let input = load_input(orders, products).await?;

    let base = || {
        let mut pipeline = Pipeline::new()
            .stage(Stage::FlattenCartLines)
            .stage(Stage::JoinProducts)
            .stage(Stage::MatchVendor(vendor_id.clone()))
            .stage(Stage::ComputeVolume)
            .stage(Stage::GroupByProduct)
            .stage(Stage::DecomposeName);
        if let Some(needle) = &options.search {
            pipeline = pipeline.stage(Stage::Search(needle.clone()));
        }
        pipeline
    };

    let data = match options.page {
        None => {
            let rows = base()
                .stage(Stage::Sort(options.sort_by, options.sort_order))
                .run(&input)?;
            ProductSalesData {
                products: to_product_sales(rows),
                pagination: None,
            }
        }
        Some(request) => {
            // The count run and the page run are separate; they are not
            // required to be atomic with each other.
            let total = base().run(&input)?.len() as i64;
            // Saturate: a past-the-end page (however large) is an empty
            // page, not an arithmetic panic.
            let offset = (request.page - 1).saturating_mul(request.limit);
            let rows = base()
                .stage(Stage::Sort(options.sort_by, options.sort_order))
                .stage(Stage::Skip(offset as usize))
                .stage(Stage::Limit(request.limit as usize))
                .run(&input)?;
            ProductSalesData {
                products: to_product_sales(rows),
                pagination: Some(PaginationMeta {
                    total,
                    page: request.page,
                    limit: request.limit,
                    total_pages: (total + request.limit - 1) / request.limit,
                }),
            }
        }
    };

    Ok(ApiResponse::success(
        "Product sales fetched successfully",
        data,
    ))
}

fn to_product_sales(rows: Vec<GroupRow>) -> Vec<ProductSale> {
    rows.into_iter()
        .map(|row| ProductSale {
            code: row.code,
            name: row.name,
            color: row.color,
            total: row.total,
        })
        .collect()
}
