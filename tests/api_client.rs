use std::time::Duration;

use pushkind_clients::api_client::{ApiClient, ApiClientError};
use pushkind_clients::dto::api::{ClientPayload, ClientsQuery};
use pushkind_clients::services::frontend::{GridQuery, load_client_page, load_clients_grid};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_json(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "code": "ACME",
        "name": "Acme",
        "client_type_id": 1,
        "tax_id": null,
        "email": null,
        "notes": null,
        "is_active": true,
        "created_at": "2026-01-01T00:00:00",
        "updated_at": "2026-01-01T00:00:00"
    })
}

fn payload() -> ClientPayload {
    ClientPayload {
        code: "ACME".into(),
        name: "Acme".into(),
        client_type_id: 1,
        tax_id: None,
        email: None,
        notes: None,
        is_active: true,
    }
}

async fn client_for(server: &MockServer) -> ApiClient {
    // A trailing slash on the configured URL must not double up.
    ApiClient::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
}

#[actix_web::test]
async fn test_successful_responses_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(7)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients"))
        .and(query_param("search", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "page": 1,
            "per_page": 20,
            "items": [client_json(7)]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server).await;
    assert_eq!(api.base_url(), server.uri());

    let client = api.get_client(7).await.unwrap();
    assert_eq!(client.code, "ACME");

    let query = ClientsQuery {
        search: Some("acme".into()),
        ..Default::default()
    };
    let page = api.list_clients(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, 7);
}

#[actix_web::test]
async fn test_error_statuses_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/clients"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            json!({ "error": "client with the same code already exists" }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/clients/1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "unknown client type 9" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = client_for(&server).await;

    assert!(matches!(
        api.get_client(404).await,
        Err(ApiClientError::NotFound)
    ));

    match api.create_client(&payload()).await {
        Err(ApiClientError::Conflict(message)) => {
            assert_eq!(message, "client with the same code already exists")
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    match api.update_client(1, &payload()).await {
        Err(ApiClientError::Validation(message)) => assert_eq!(message, "unknown client type 9"),
        other => panic!("expected validation error, got {other:?}"),
    }

    match api.get_client(500).await {
        Err(ApiClientError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }

    assert!(matches!(
        api.get_client(2).await,
        Err(ApiClientError::Decode(_))
    ));
}

#[actix_web::test]
async fn test_fetch_catalogs_fails_as_a_whole() {
    let server = MockServer::start().await;
    let types = json!([{ "id": 1, "name": "Company" }]);
    for catalog in ["client-types", "address-types", "phone-types"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/catalogs/{catalog}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&types))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/catalogs/countries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "code": "DE", "name": "Germany" }])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let api = client_for(&server).await;
    let catalogs = api.fetch_catalogs().await.unwrap();
    assert_eq!(catalogs.client_types[0].name, "Company");
    assert_eq!(catalogs.countries[0].code, "DE");

    // The countries mock is exhausted, so the next fetch sees a 404.
    assert!(matches!(
        api.fetch_catalogs().await,
        Err(ApiClientError::NotFound)
    ));
}

async fn mount_catalogs(server: &MockServer) {
    for catalog in ["client-types", "address-types", "phone-types"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/catalogs/{catalog}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/catalogs/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[actix_web::test]
async fn test_client_page_gathers_children() {
    let server = MockServer::start().await;
    mount_catalogs(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(7)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/7/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/7/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "client_id": 7,
            "phone_type_id": 1,
            "number": "+14155552671",
            "extension": null,
            "is_primary": true,
            "created_at": "2026-01-01T00:00:00",
            "updated_at": "2026-01-01T00:00:00"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/7/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = client_for(&server).await;
    let data = load_client_page(&api, 7).await.unwrap();
    assert_eq!(data.client.id, 7);
    assert_eq!(data.phones.len(), 1);
    assert!(data.addresses.is_empty());

    // Unmatched requests get a 404 from the mock server.
    assert!(matches!(
        load_client_page(&api, 8).await,
        Err(ApiClientError::NotFound)
    ));
}

#[actix_web::test]
async fn test_grid_requests_normalized_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 45,
            "page": 1,
            "per_page": 20,
            "items": [client_json(1)]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server).await;
    let grid = load_clients_grid(
        &api,
        GridQuery {
            page: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(grid.total, 45);
    assert_eq!(grid.page, 1);
    assert_eq!(grid.pages, vec![Some(1), Some(2), Some(3)]);
}
