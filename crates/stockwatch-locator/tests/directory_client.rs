//! Integration tests for `StoreDirectoryClient` using wiremock HTTP mocks.

use serde_json::json;
use stockwatch_core::Region;
use stockwatch_locator::{LocatorError, StoreDirectoryClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_UA: &str = "Mozilla/5.0 (stockwatch-test)";

fn test_client(base_url: &str, max_retries: u32) -> StoreDirectoryClient {
    StoreDirectoryClient::with_base_url(
        &format!("{base_url}/stores"),
        "735577",
        TEST_UA,
        max_retries,
        0,
    )
    .expect("client construction should not fail")
}

fn directory_body() -> serde_json::Value {
    json!({
        "success": true,
        "radius": 15000,
        "favStoreId": null,
        "timestamp": "2024-10-01T10:00:00.000Z",
        "isClickAndCollect": true,
        "locations": [
            {
                "id": "IT001",
                "name": "SEPHORA MILANO DUOMO",
                "city": "MILANO",
                "address1": "Piazza del Duomo 1",
                "scheduleForJsonLD": "Mo-Su 10:00-20:00",
                "exceptional": null,
                "product_availability": true
            },
            {
                "id": "IT002",
                "name": "SEPHORA ROMA",
                "city": "ROMA",
                "address1": "Via del Corso 1",
                "scheduleForJsonLD": ["Mo-Fr 10:00-20:00", "Sa 10:00-21:00"],
                "product_availability": false
            }
        ]
    })
}

#[tokio::test]
async fn fetch_region_decodes_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .and(query_param("pid", "735577"))
        .and(query_param("clickcollect", "true"))
        .and(query_param("pdpstock", "true"))
        .and(query_param("searchedRadius", "15000"))
        .and(header("user-agent", TEST_UA))
        .respond_with(ResponseTemplate::new(200).set_body_json(directory_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let snapshot = client
        .fetch_region(Region::It)
        .await
        .expect("should decode snapshot");

    assert_eq!(snapshot.locations().len(), 2);
    assert_eq!(snapshot.upstream_timestamp(), "2024-10-01T10:00:00.000Z");
    let milano = snapshot.find("IT001").expect("IT001 present");
    assert!(milano.product_availability);
    assert_eq!(milano.schedule_for_json_ld.0, vec!["Mo-Su 10:00-20:00"]);
    let roma = snapshot.find("IT002").expect("IT002 present");
    assert_eq!(roma.schedule_for_json_ld.0.len(), 2);
}

#[tokio::test]
async fn not_found_is_protocol_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let result = client.fetch_region(Region::Fr).await;

    assert!(
        matches!(result, Err(LocatorError::Protocol { status: 404, .. })),
        "expected Protocol(404), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directory_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 2);
    let snapshot = client
        .fetch_region(Region::De)
        .await
        .expect("second attempt should succeed");
    assert_eq!(snapshot.locations().len(), 2);
}

#[tokio::test]
async fn server_error_without_retries_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let result = client.fetch_region(Region::It).await;
    assert!(matches!(
        result,
        Err(LocatorError::Protocol { status: 500, .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 2);
    let result = client.fetch_region(Region::It).await;
    assert!(
        matches!(result, Err(LocatorError::Decode { .. })),
        "expected Decode, got: {result:?}"
    );
}

#[tokio::test]
async fn wrong_schedule_shape_is_decode_error() {
    let server = MockServer::start().await;

    let body = json!({
        "success": true,
        "locations": [{ "id": "IT001", "scheduleForJsonLD": { "open": "10:00" } }]
    });
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let result = client.fetch_region(Region::It).await;
    assert!(matches!(result, Err(LocatorError::Decode { .. })));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Port 9 on loopback has nothing listening.
    let client = StoreDirectoryClient::with_base_url("http://127.0.0.1:9/stores", "1", TEST_UA, 0, 0)
        .expect("client construction should not fail");
    let result = client.fetch_region(Region::It).await;
    assert!(
        matches!(result, Err(LocatorError::Transport { .. })),
        "expected Transport, got: {result:?}"
    );
}
