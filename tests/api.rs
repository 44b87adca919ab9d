use actix_web::http::StatusCode;
use actix_web::{App, test};
use pushkind_clients::configure_api;
use pushkind_clients::dto::api::{
    AddressDto, BatchResponse, CatalogItemDto, CatalogsDto, ClientDto, ErrorResponse, ListResponse,
};
use pushkind_clients::repository::DieselRepository;
use serde_json::json;

mod common;

fn client_body(code: &str, name: &str) -> serde_json::Value {
    json!({ "code": code, "name": name, "client_type_id": 1 })
}

#[actix_web::test]
async fn test_client_lifecycle() {
    let test_db = common::TestDb::new("test_api_client_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(client_body("acme", "Acme"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ClientDto = test::read_body_json(resp).await;
    assert_eq!(created.code, "ACME");
    assert!(created.is_active);

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(client_body("ACME", "Other"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(error.error, "client with the same code already exists");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/clients/{}", created.id))
        .set_json(json!({
            "code": "ACME",
            "name": "Acme Inc",
            "client_type_id": 2,
            "is_active": false
        }))
        .to_request();
    let updated: ClientDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.name, "Acme Inc");
    assert!(!updated.is_active);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{}", created.id))
        .to_request();
    let fetched: ClientDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.client_type_id, 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients/4242")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_filters_and_paging() {
    let test_db = common::TestDb::new("test_api_list_filters.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients/batch")
        .set_json(json!([
            client_body("A1", "Alpha"),
            client_body("B1", "Beta"),
            { "code": "G1", "name": "Gamma", "client_type_id": 3, "is_active": false }
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let batch: BatchResponse = test::read_body_json(resp).await;
    assert_eq!(batch.created, 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?is_active=true&per_page=1&page=2")
        .to_request();
    let page: ListResponse<ClientDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total, 2);
    assert_eq!(page.per_page, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Beta");

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?search=gam&client_type_id=3")
        .to_request();
    let page: ListResponse<ClientDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.per_page, 20);
}

#[actix_web::test]
async fn test_batch_rejects_bad_rows_atomically() {
    let test_db = common::TestDb::new("test_api_batch_atomic.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients/batch")
        .set_json(json!([client_body("A1", "Alpha"), client_body("A1", "Again")]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let page: ListResponse<ClientDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total, 0);
}

#[actix_web::test]
async fn test_nested_addresses() {
    let test_db = common::TestDb::new("test_api_nested_addresses.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(client_body("ACME", "Acme"))
        .to_request();
    let client: ClientDto = test::call_and_read_body_json(&app, req).await;

    let address = json!({
        "address_type_id": 1,
        "street": "1 Main St",
        "city": "Berlin",
        "country_code": "de",
        "is_primary": true
    });

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{}/addresses", client.id))
        .set_json(&address)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: AddressDto = test::read_body_json(resp).await;
    assert_eq!(created.country_code, "DE");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{}/addresses", client.id))
        .set_json(&address)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/clients/999/addresses")
        .set_json(&address)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{}/addresses", client.id))
        .set_json(json!({
            "address_type_id": 2,
            "street": "1 Main St",
            "city": "Berlin",
            "country_code": "ZZ"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{}/addresses", client.id))
        .to_request();
    let addresses: Vec<AddressDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(addresses.len(), 1);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let test_db = common::TestDb::new("test_api_malformed_json.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"code\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = test::read_body_json(resp).await;
    assert!(!error.error.is_empty());
}

#[actix_web::test]
async fn test_catalogs_and_health() {
    let test_db = common::TestDb::new("test_api_catalogs.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/catalogs/phone-types")
        .to_request();
    let phone_types: Vec<CatalogItemDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(phone_types.len(), 3);

    let req = test::TestRequest::get().uri("/api/v1/catalogs").to_request();
    let catalogs: CatalogsDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(catalogs.client_types.len(), 3);
    assert_eq!(catalogs.countries.len(), 5);

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "ok");
}

#[actix_web::test]
async fn test_page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_api_huge_page.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(client_body("A1", "Alpha"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?page=4611686018427387904")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: ListResponse<ClientDto> = test::read_body_json(resp).await;
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
    assert_eq!(page.page, 4611686018427387904);
}

#[actix_web::test]
async fn test_batch_accepts_bodies_larger_than_default_json_limit() {
    let test_db = common::TestDb::new("test_api_large_batch.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, repo))).await;

    let notes = "n".repeat(1024 * 1024);
    let rows: Vec<_> = (0..3)
        .map(|i| {
            json!({
                "code": format!("C{i}"),
                "name": format!("Client {i}"),
                "client_type_id": 1,
                "notes": notes,
            })
        })
        .collect();

    let req = test::TestRequest::post()
        .uri("/api/v1/clients/batch")
        .set_json(rows)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let batch: BatchResponse = test::read_body_json(resp).await;
    assert_eq!(batch.created, 3);
}
