use std::time::Duration;

use catalog_engine::{
    ApiErrorKind, ApiSettings, ImageUpload, PageQuery, PlantApi, PlantDraft, ReqwestApi,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings::new(server.uri()))
}

fn page_body(count: usize, total: u64, page: u32) -> serde_json::Value {
    let plants: Vec<_> = (0..count)
        .map(|n| {
            serde_json::json!({
                "_id": format!("64b{n:03}"),
                "name": format!("Plant {n}"),
                "cost": "12.50",
                "category": "Medicinal Plants",
                "status": "Sale",
                "description": "hardy",
                "image": "",
            })
        })
        .collect();
    serde_json::json!({ "plants": plants, "total": total, "page": page })
}

#[tokio::test]
async fn list_sends_paging_and_filter_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "6"))
        .and(query_param("category", "Medicinal Plants"))
        .and(query_param("sort", "priceAsc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(6, 14, 2)))
        .mount(&server)
        .await;

    let query = PageQuery {
        page: 2,
        page_size: 6,
        category: Some("Medicinal Plants".to_string()),
        sort: Some("priceAsc".to_string()),
    };
    let envelope = api_for(&server).list(&query).await.expect("list ok");

    assert_eq!(envelope.plants.len(), 6);
    assert_eq!(envelope.total, 14);
    assert_eq!(envelope.page, 2);
    assert_eq!(envelope.plants[0].id, "64b000");
    assert_eq!(envelope.plants[0].category, "Medicinal Plants");
}

#[tokio::test]
async fn list_omits_absent_filter_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("category"))
        .and(query_param_is_missing("sort"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 0, 1)))
        .mount(&server)
        .await;

    let query = PageQuery {
        page: 1,
        page_size: 6,
        ..PageQuery::default()
    };
    let envelope = api_for(&server).list(&query).await.expect("list ok");
    assert!(envelope.plants.is_empty());
    assert_eq!(envelope.total, 0);
}

#[tokio::test]
async fn list_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let query = PageQuery {
        page: 1,
        page_size: 6,
        ..PageQuery::default()
    };
    let err = api_for(&server).list(&query).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus(500));
}

#[tokio::test]
async fn list_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let query = PageQuery {
        page: 1,
        page_size: 6,
        ..PageQuery::default()
    };
    let err = api_for(&server).list(&query).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::MalformedBody);
}

#[tokio::test]
async fn list_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(page_body(0, 0, 1)),
        )
        .mount(&server)
        .await;

    let mut settings = ApiSettings::new(server.uri());
    settings.request_timeout = Duration::from_millis(50);
    let api = ReqwestApi::new(settings);

    let query = PageQuery {
        page: 1,
        page_size: 6,
        ..PageQuery::default()
    };
    let err = api.list(&query).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
}

#[tokio::test]
async fn detail_fetches_single_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plants/64b007"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "64b007",
            "name": "Lavender",
            "cost": "9.99",
            "category": "Aromatic Fragrant Plants",
            "status": "",
            "description": "",
            "image": "lavender.jpg",
        })))
        .mount(&server)
        .await;

    let record = api_for(&server).detail("64b007").await.expect("detail ok");
    assert_eq!(record.name, "Lavender");
    assert_eq!(record.image, "lavender.jpg");
}

#[tokio::test]
async fn delete_one_uses_id_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/plants/delete"))
        .and(query_param("id", "64b001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deletedCount": 1
        })))
        .mount(&server)
        .await;

    let deleted = api_for(&server).delete_one("64b001").await.expect("delete ok");
    assert_eq!(deleted, 1);
}

#[tokio::test]
async fn delete_many_sends_ids_as_json_body() {
    let server = MockServer::start().await;
    let ids = vec!["64b001".to_string(), "64b004".to_string()];
    Mock::given(method("DELETE"))
        .and(path("/api/plants/delete"))
        .and(body_json(serde_json::json!({ "ids": ["64b001", "64b004"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deletedCount": 2
        })))
        .mount(&server)
        .await;

    let deleted = api_for(&server).delete_many(&ids).await.expect("delete ok");
    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn create_posts_multipart_with_image_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/plants/add"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let draft = PlantDraft {
        name: "Basil".to_string(),
        cost: "4.50".to_string(),
        category: "Medicinal Plants".to_string(),
        status: String::new(),
        description: "annual herb".to_string(),
        image: Some(ImageUpload {
            filename: "basil.jpg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }),
    };
    api_for(&server).create(&draft).await.expect("create ok");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Basil"));
    assert!(body.contains("filename=\"basil.jpg\""));
}

#[tokio::test]
async fn update_puts_to_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/plants/update/64b009"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let draft = PlantDraft {
        name: "Mint".to_string(),
        cost: "3.00".to_string(),
        category: "Medicinal Plants".to_string(),
        ..PlantDraft::default()
    };
    api_for(&server)
        .update("64b009", &draft)
        .await
        .expect("update ok");
}

#[tokio::test]
async fn create_failure_maps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/plants/add"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create(&PlantDraft::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus(400));
}
