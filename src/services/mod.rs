pub mod dashboard_service;
pub mod vendor_service;
