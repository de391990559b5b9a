//! IP-geolocation provider against a mock endpoint.

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::{GeoError, IpLocator, LocationProvider};

#[tokio::test]
async fn locate_parses_position() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Seattle",
            "latitude": 47.6062,
            "longitude": -122.3321,
            "utc_offset": "-0800"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::with_url(server.uri());
    let coords = locator.locate().await.unwrap();

    assert!((coords.lat - 47.6062).abs() < 1e-9);
    assert!((coords.lon - (-122.3321)).abs() < 1e-9);
}

#[tokio::test]
async fn forbidden_lookup_reads_as_permission_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let locator = IpLocator::with_url(server.uri());
    let err = locator.locate().await.unwrap_err();

    assert_eq!(err, GeoError::PermissionDenied);
}

#[tokio::test]
async fn unreachable_service_reads_as_unavailable() {
    let locator = IpLocator::with_url("http://127.0.0.1:9".to_string());
    let err = locator.locate().await.unwrap_err();

    assert_eq!(err, GeoError::Unavailable);
}
