use super::*;

fn test_client(base_url: &str) -> PinupClient {
    PinupClient::with_base_url(base_url, 30).expect("client construction should not fail")
}

#[test]
fn endpoint_joins_onto_bare_origin() {
    let client = test_client("https://pinup.example");
    let url = client.endpoint("api/stores/7").unwrap();
    assert_eq!(url.as_str(), "https://pinup.example/api/stores/7");
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let client = test_client("https://pinup.example//");
    let url = client.endpoint("api/locations").unwrap();
    assert_eq!(url.as_str(), "https://pinup.example/api/locations");
}

#[test]
fn endpoint_keeps_path_prefix() {
    let client = test_client("https://pinup.example/market");
    let url = client.endpoint("api/locations/3").unwrap();
    assert_eq!(url.as_str(), "https://pinup.example/market/api/locations/3");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PinupClient::with_base_url("not a url", 30);
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn error_message_reads_message_field() {
    assert_eq!(
        error_message(r#"{"error":"BAD_REQUEST","message":"name is required"}"#).as_deref(),
        Some("name is required")
    );
}

#[test]
fn error_message_ignores_blank_and_non_json_bodies() {
    assert_eq!(error_message(r#"{"message":"   "}"#), None);
    assert_eq!(error_message("<html>oops</html>"), None);
    assert_eq!(error_message(""), None);
}

#[test]
fn new_uses_configured_location_name() {
    let config = AppConfig {
        env: pinup_core::Environment::Test,
        api_base_url: "http://localhost:8080".to_string(),
        http_timeout_secs: 5,
        http_connect_timeout_secs: 1,
        http_user_agent: "pinup-test/0.1".to_string(),
        location_name: "Venue".to_string(),
    };
    let client = PinupClient::new(&config).unwrap();
    assert_eq!(client.location_name, "Venue");
    assert_eq!(client.base_url.as_str(), "http://localhost:8080/");
}
