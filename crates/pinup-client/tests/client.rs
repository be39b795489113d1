//! Integration tests for `PinupClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use pinup_core::{
    CategoryId, ImageFile, LocationDraft, LocationId, StoreDraft, StoreFields, StoreId,
    ThumbnailRef,
};
use pinup_client::{ClientError, PinupClient, StoreSubmission};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PinupClient {
    PinupClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

fn draft() -> LocationDraft {
    LocationDraft {
        zone_code: "04524".to_string(),
        address: "110 Sejong-daero".to_string(),
        address_detail: Some("1F".to_string()),
        state: Some("Seoul".to_string()),
        district: Some("Jung-gu".to_string()),
        coordinates: None,
    }
}

fn submission(images: Vec<ImageFile>) -> StoreSubmission {
    StoreSubmission {
        draft: StoreDraft {
            fields: StoreFields {
                name: "Spring pop-up".to_string(),
                description: "Limited goods".to_string(),
                category_id: Some(CategoryId(3)),
                start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
                end_date: NaiveDate::from_ymd_opt(2025, 4, 30),
                ..StoreFields::default()
            },
            location_id: LocationId(42),
            operating_hours: Vec::new(),
            thumbnail: Some(ThumbnailRef::New(0)),
            deleted_image_ids: None,
        },
        images,
    }
}

fn body_text(request: &wiremock::Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

#[tokio::test]
async fn create_location_posts_json_and_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .and(body_json(json!({
            "name": "Registered address",
            "zoneCode": "04524",
            "state": "Seoul",
            "district": "Jung-gu",
            "latitude": null,
            "longitude": null,
            "address": "110 Sejong-daero",
            "addressDetail": "1F"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": "Registered address",
            "zoneCode": "04524",
            "state": "Seoul",
            "district": "Jung-gu",
            "latitude": 37.56,
            "longitude": 126.97,
            "address": "110 Sejong-daero",
            "addressDetail": "1F"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server.uri())
        .create_location(&draft())
        .await
        .expect("should create location");

    assert_eq!(record.id, LocationId(42));
    assert_eq!(record.latitude, Some(37.56));
    assert!(!draft().differs_from(&record));
}

#[tokio::test]
async fn create_location_uses_custom_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    test_client(&server.uri())
        .with_location_name("Pop-up venue")
        .create_location(&draft())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["name"], "Pop-up venue");
}

#[tokio::test]
async fn create_location_surfaces_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "zoneCode is required" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .create_location(&draft())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::Api { status: 400, ref message } if message.as_deref() == Some("zoneCode is required")),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.server_message(), Some("zoneCode is required"));
}

#[tokio::test]
async fn create_location_without_id_is_missing_identifier() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "address": "x" })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .create_location(&draft())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingIdentifier { .. }));
}

#[tokio::test]
async fn update_location_puts_to_id_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/locations/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "zoneCode": "04524",
            "address": "110 Sejong-daero",
            "addressDetail": "1F"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server.uri())
        .update_location(LocationId(9), &draft())
        .await
        .unwrap();
    assert_eq!(record.id, LocationId(9));
    assert_eq!(record.address_detail.as_deref(), Some("1F"));
}

#[tokio::test]
async fn create_store_sends_metadata_and_file_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/stores"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "name": "x" })))
        .expect(1)
        .mount(&server)
        .await;

    let images = vec![
        ImageFile::new("front.png", vec![1, 2, 3]),
        ImageFile::new("inside.jpg", vec![4, 5, 6]),
    ];
    let id = test_client(&server.uri())
        .create_store(submission(images))
        .await
        .unwrap();
    assert_eq!(id, StoreId(7));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");

    let body = body_text(&requests[0]);
    assert!(body.contains(r#"name="storeRequest""#));
    assert!(body.contains(r#""locationId":42"#));
    assert!(body.contains(r#""thumbnailIndex":0"#));
    assert_eq!(body.matches(r#"name="images""#).count(), 2);
    assert!(body.contains(r#"filename="front.png""#));
    assert!(body.contains("image/jpeg"));
}

#[tokio::test]
async fn update_store_uses_request_part_and_patch() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/stores/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let id = test_client(&server.uri())
        .update_store(StoreId(7), submission(Vec::new()))
        .await
        .unwrap();
    assert_eq!(id, StoreId(7));

    let requests = server.received_requests().await.unwrap();
    let body = body_text(&requests[0]);
    assert!(body.contains(r#"name="request""#));
    assert!(!body.contains(r#"name="images""#));
}

#[tokio::test]
async fn create_store_without_id_is_missing_identifier() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "x" })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .create_store(submission(Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingIdentifier { .. }));
}

#[tokio::test]
async fn create_store_plain_text_error_has_no_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/stores"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .create_store(submission(Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, message: None }));
}

#[tokio::test]
async fn get_store_parses_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Spring pop-up",
            "description": "Limited goods",
            "category": { "id": 3, "name": "Fashion" },
            "location": { "id": 9, "zoneCode": "04524", "address": "110 Sejong-daero" },
            "startDate": "2025-04-01",
            "endDate": "2025-04-30",
            "operatingHours": [
                { "days": "Sat", "startTime": "11:00:00", "endTime": "18:00:00" }
            ],
            "images": [
                { "id": 11, "imageUrl": "https://cdn.example/11.png", "isThumbnail": true },
                { "id": 12, "imageUrl": "https://cdn.example/12.png", "isThumbnail": false }
            ]
        })))
        .mount(&server)
        .await;

    let store = test_client(&server.uri()).get_store(StoreId(7)).await.unwrap();
    assert_eq!(store.id, StoreId(7));
    assert_eq!(store.images.len(), 2);
    let location = store.location.unwrap().into_record().unwrap();
    assert_eq!(location.id, LocationId(9));
}

#[tokio::test]
async fn get_store_not_found_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "store not found"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_store(StoreId(404))
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("store not found"));
}

#[tokio::test]
async fn delete_store_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/stores/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .delete_store(StoreId(7))
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn network_failure_is_http_error() {
    let client = test_client("http://127.0.0.1:1");
    let err = client.create_location(&draft()).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
