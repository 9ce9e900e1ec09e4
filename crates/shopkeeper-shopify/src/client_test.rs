use super::*;

fn test_client(base_url: &str) -> AdminClient {
    AdminClient::with_base_url(base_url, "shpat_test", "2024-01", 30, "shopkeeper-test")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_builds_versioned_path() {
    let client = test_client("https://example.myshopify.com");
    let url = client.endpoint("products.json");
    assert_eq!(
        url.as_str(),
        "https://example.myshopify.com/admin/api/2024-01/products.json"
    );
}

#[test]
fn endpoint_interpolates_resource_ids() {
    let client = test_client("https://example.myshopify.com");
    let url = client.endpoint("variants/123.json");
    assert_eq!(
        url.as_str(),
        "https://example.myshopify.com/admin/api/2024-01/variants/123.json"
    );
}

#[test]
fn new_targets_https_shop_domain() {
    let client = AdminClient::new(
        "example.myshopify.com",
        "shpat_test",
        "2024-01",
        30,
        "shopkeeper-test",
    )
    .expect("client");
    let url = client.endpoint("products.json");
    assert!(url.as_str().starts_with("https://example.myshopify.com/"));
}

#[test]
fn new_rejects_unparseable_domain() {
    let result = AdminClient::new("not a domain", "t", "2024-01", 30, "ua");
    assert!(
        matches!(result, Err(AdminError::InvalidShopDomain { .. })),
        "expected InvalidShopDomain"
    );
}

#[test]
fn request_path_includes_query() {
    let url = Url::parse("https://x.test/admin/api/2024-01/products.json?limit=5&since_id=0")
        .unwrap();
    assert_eq!(
        request_path(&url),
        "/admin/api/2024-01/products.json?limit=5&since_id=0"
    );
}

#[test]
fn request_path_without_query() {
    let url = Url::parse("https://x.test/admin/api/2024-01/products/9.json").unwrap();
    assert_eq!(request_path(&url), "/admin/api/2024-01/products/9.json");
}
