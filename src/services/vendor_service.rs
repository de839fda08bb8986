use crate::error::AppResult;
use crate::models::Vendor;
use crate::repo::VendorRepository;
use crate::response::ApiResponse;

pub async fn list_vendors(vendors: &dyn VendorRepository) -> AppResult<ApiResponse<Vec<Vendor>>> {
    let data = vendors.list().await?;
    Ok(ApiResponse::success("Vendors found", data))
}
