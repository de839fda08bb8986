use vendor_sales_dashboard::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.kind, "success");
    assert_eq!(response.0.message, "Deployment is running!");
    assert_eq!(response.0.data.status, "ok");
}
