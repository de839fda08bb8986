use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::pipeline::{SortDirection, SortKey};

/// Raw query string of `GET /api/dashboard/product/{vendor_id}`. Validated
/// into [`ProductSalesOptions`] before any aggregation runs.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductSalesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductSalesOptions {
    /// Present only when both `page` and `limit` were supplied.
    pub page: Option<PageRequest>,
    pub sort_by: SortKey,
    pub sort_order: SortDirection,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl ProductSalesQuery {
    pub fn validate(self) -> AppResult<ProductSalesOptions> {
        if let Some(page) = self.page {
            if page < 1 {
                return Err(AppError::BadRequest("page must be at least 1".to_string()));
            }
        }
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err(AppError::BadRequest(
                    "limit must be between 1 and 100".to_string(),
                ));
            }
        }

        let sort_by = match self.sort_by.as_deref() {
            None | Some("total") => SortKey::Total,
            Some("code") => SortKey::Code,
            Some("name") => SortKey::Name,
            Some("color") => SortKey::Color,
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "sort_by must be one of total, code, name, color (got `{other}`)"
                )));
            }
        };

        let sort_order = match self.sort_order.as_deref() {
            None | Some("desc") => SortDirection::Desc,
            Some("asc") => SortDirection::Asc,
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "sort_order must be asc or desc (got `{other}`)"
                )));
            }
        };

        // Pagination only kicks in when both knobs are present; otherwise the
        // full result set is returned.
        let page = match (self.page, self.limit) {
            (Some(page), Some(limit)) => Some(PageRequest { page, limit }),
            _ => None,
        };

        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ProductSalesOptions {
            page,
            sort_by,
            sort_order,
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_total_desc_unpaginated() {
        let options = ProductSalesQuery::default().validate().unwrap();
        assert!(options.page.is_none());
        assert_eq!(options.sort_by, SortKey::Total);
        assert_eq!(options.sort_order, SortDirection::Desc);
        assert!(options.search.is_none());
    }

    #[test]
    fn page_and_limit_must_come_together() {
        let only_page = ProductSalesQuery {
            page: Some(2),
            ..ProductSalesQuery::default()
        };
        assert!(only_page.validate().unwrap().page.is_none());

        let only_limit = ProductSalesQuery {
            limit: Some(10),
            ..ProductSalesQuery::default()
        };
        assert!(only_limit.validate().unwrap().page.is_none());

        let both = ProductSalesQuery {
            page: Some(2),
            limit: Some(10),
            ..ProductSalesQuery::default()
        };
        let page = both.validate().unwrap().page.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn out_of_range_paging_is_rejected() {
        let zero_page = ProductSalesQuery {
            page: Some(0),
            limit: Some(10),
            ..ProductSalesQuery::default()
        };
        assert!(zero_page.validate().is_err());

        let zero_limit = ProductSalesQuery {
            page: Some(1),
            limit: Some(0),
            ..ProductSalesQuery::default()
        };
        assert!(zero_limit.validate().is_err());

        let huge_limit = ProductSalesQuery {
            page: Some(1),
            limit: Some(101),
            ..ProductSalesQuery::default()
        };
        assert!(huge_limit.validate().is_err());
    }

    #[test]
    fn unknown_sort_fields_are_rejected() {
        let bad_field = ProductSalesQuery {
            sort_by: Some("price".to_string()),
            ..ProductSalesQuery::default()
        };
        assert!(bad_field.validate().is_err());

        let bad_order = ProductSalesQuery {
            sort_order: Some("sideways".to_string()),
            ..ProductSalesQuery::default()
        };
        assert!(bad_order.validate().is_err());
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ProductSalesQuery {
            search: Some("   ".to_string()),
            ..ProductSalesQuery::default()
        };
        assert!(query.validate().unwrap().search.is_none());
    }
}
