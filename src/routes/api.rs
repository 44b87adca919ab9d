//! JSON endpoints mounted under `/api/v1`.

use actix_web::{HttpResponse, Responder, get, post, put, web};
use serde_json::json;

use crate::dto::api::{
    AddressDto, AddressPayload, AddressesQuery, BatchResponse, CatalogItemDto, CatalogsDto,
    ClientDto, ClientPayload, ClientsQuery, ContactDto, ContactPayload, ContactsQuery, CountryDto,
    ErrorResponse, ListResponse, PhoneDto, PhonePayload, PhonesQuery,
};
use crate::repository::{CatalogReader, DieselRepository};
use crate::services::{
    ServiceError, addresses as address_service, catalogs as catalog_service,
    clients as client_service, contacts as contact_service, phones as phone_service,
};

/// Turns a service failure into the matching status with an [`ErrorResponse`] body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorResponse {
            error: "not found".to_string(),
        }),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ErrorResponse { error: message })
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(ErrorResponse { error: message })
        }
        err => {
            log::error!("API request failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal server error".to_string(),
            })
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/clients")]
pub async fn list_clients(
    params: web::Query<ClientsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::list_clients(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(ListResponse {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            items: page
                .clients
                .into_iter()
                .map(ClientDto::from)
                .collect::<Vec<_>>(),
        }),
        Err(err) => error_response(err),
    }
}

#[post("/clients")]
pub async fn create_client(
    payload: web::Json<ClientPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::create_client(repo.get_ref(), payload.into_inner()) {
        Ok(client) => HttpResponse::Created().json(ClientDto::from(client)),
        Err(err) => error_response(err),
    }
}

#[post("/clients/batch")]
pub async fn import_clients(
    payload: web::Json<Vec<ClientPayload>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::import_clients(repo.get_ref(), payload.into_inner()) {
        Ok(created) => HttpResponse::Created().json(BatchResponse { created }),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}")]
pub async fn get_client(
    client_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::get_client(repo.get_ref(), client_id.into_inner()) {
        Ok(client) => HttpResponse::Ok().json(ClientDto::from(client)),
        Err(err) => error_response(err),
    }
}

#[put("/clients/{client_id}")]
pub async fn update_client(
    client_id: web::Path<i32>,
    payload: web::Json<ClientPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client_service::update_client(
        repo.get_ref(),
        client_id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(client) => HttpResponse::Ok().json(ClientDto::from(client)),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}/addresses")]
pub async fn list_client_addresses(
    client_id: web::Path<i32>,
    params: web::Query<AddressesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match address_service::list_client_addresses(
        repo.get_ref(),
        client_id.into_inner(),
        params.into_inner(),
    ) {
        Ok(addresses) => HttpResponse::Ok().json(
            addresses
                .into_iter()
                .map(AddressDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[post("/clients/{client_id}/addresses")]
pub async fn create_address(
    client_id: web::Path<i32>,
    payload: web::Json<AddressPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match address_service::create_address(
        repo.get_ref(),
        client_id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(address) => HttpResponse::Created().json(AddressDto::from(address)),
        Err(err) => error_response(err),
    }
}

#[get("/addresses/{address_id}")]
pub async fn get_address(
    address_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match address_service::get_address(repo.get_ref(), address_id.into_inner()) {
        Ok(address) => HttpResponse::Ok().json(AddressDto::from(address)),
        Err(err) => error_response(err),
    }
}

#[put("/addresses/{address_id}")]
pub async fn update_address(
    address_id: web::Path<i32>,
    payload: web::Json<AddressPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match address_service::update_address(
        repo.get_ref(),
        address_id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(address) => HttpResponse::Ok().json(AddressDto::from(address)),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}/phones")]
pub async fn list_client_phones(
    client_id: web::Path<i32>,
    params: web::Query<PhonesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match phone_service::list_client_phones(
        repo.get_ref(),
        client_id.into_inner(),
        params.into_inner(),
    ) {
        Ok(phones) => {
            HttpResponse::Ok().json(phones.into_iter().map(PhoneDto::from).collect::<Vec<_>>())
        }
        Err(err) => error_response(err),
    }
}

#[post("/clients/{client_id}/phones")]
pub async fn create_phone(
    client_id: web::Path<i32>,
    payload: web::Json<PhonePayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match phone_service::create_phone(repo.get_ref(), client_id.into_inner(), payload.into_inner())
    {
        Ok(phone) => HttpResponse::Created().json(PhoneDto::from(phone)),
        Err(err) => error_response(err),
    }
}

#[get("/phones/{phone_id}")]
pub async fn get_phone(
    phone_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match phone_service::get_phone(repo.get_ref(), phone_id.into_inner()) {
        Ok(phone) => HttpResponse::Ok().json(PhoneDto::from(phone)),
        Err(err) => error_response(err),
    }
}

#[put("/phones/{phone_id}")]
pub async fn update_phone(
    phone_id: web::Path<i32>,
    payload: web::Json<PhonePayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match phone_service::update_phone(repo.get_ref(), phone_id.into_inner(), payload.into_inner())
    {
        Ok(phone) => HttpResponse::Ok().json(PhoneDto::from(phone)),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}/contacts")]
pub async fn list_client_contacts(
    client_id: web::Path<i32>,
    params: web::Query<ContactsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::list_client_contacts(
        repo.get_ref(),
        client_id.into_inner(),
        params.into_inner(),
    ) {
        Ok(contacts) => HttpResponse::Ok().json(
            contacts
                .into_iter()
                .map(ContactDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[post("/clients/{client_id}/contacts")]
pub async fn create_contact(
    client_id: web::Path<i32>,
    payload: web::Json<ContactPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::create_contact(
        repo.get_ref(),
        client_id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(contact) => HttpResponse::Created().json(ContactDto::from(contact)),
        Err(err) => error_response(err),
    }
}

#[get("/contacts/{contact_id}")]
pub async fn get_contact(
    contact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::get_contact(repo.get_ref(), contact_id.into_inner()) {
        Ok(contact) => HttpResponse::Ok().json(ContactDto::from(contact)),
        Err(err) => error_response(err),
    }
}

#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    contact_id: web::Path<i32>,
    payload: web::Json<ContactPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::update_contact(
        repo.get_ref(),
        contact_id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(contact) => HttpResponse::Ok().json(ContactDto::from(contact)),
        Err(err) => error_response(err),
    }
}

#[get("/catalogs")]
pub async fn list_catalogs(repo: web::Data<DieselRepository>) -> impl Responder {
    match catalog_service::load_catalogs(repo.get_ref()) {
        Ok(catalogs) => HttpResponse::Ok().json(CatalogsDto::from(catalogs)),
        Err(err) => error_response(err),
    }
}

#[get("/catalogs/client-types")]
pub async fn list_client_types(repo: web::Data<DieselRepository>) -> impl Responder {
    match repo.list_client_types() {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(CatalogItemDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err.into()),
    }
}

#[get("/catalogs/address-types")]
pub async fn list_address_types(repo: web::Data<DieselRepository>) -> impl Responder {
    match repo.list_address_types() {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(CatalogItemDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err.into()),
    }
}

#[get("/catalogs/phone-types")]
pub async fn list_phone_types(repo: web::Data<DieselRepository>) -> impl Responder {
    match repo.list_phone_types() {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(CatalogItemDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err.into()),
    }
}

#[get("/catalogs/countries")]
pub async fn list_countries(repo: web::Data<DieselRepository>) -> impl Responder {
    match repo.list_countries() {
        Ok(items) => {
            HttpResponse::Ok().json(items.into_iter().map(CountryDto::from).collect::<Vec<_>>())
        }
        Err(err) => error_response(err.into()),
    }
}

/// Registers `/health` and every `/api/v1` handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api/v1")
            .service(import_clients)
            .service(list_clients)
            .service(create_client)
            .service(get_client)
            .service(update_client)
            .service(list_client_addresses)
            .service(create_address)
            .service(get_address)
            .service(update_address)
            .service(list_client_phones)
            .service(create_phone)
            .service(get_phone)
            .service(update_phone)
            .service(list_client_contacts)
            .service(create_contact)
            .service(get_contact)
            .service(update_contact)
            .service(list_catalogs)
            .service(list_client_types)
            .service(list_address_types)
            .service(list_phone_types)
            .service(list_countries),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;
    use crate::repository::errors::RepositoryError;

    async fn body_of(response: HttpResponse) -> ErrorResponse {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("error json")
    }

    #[actix_web::test]
    async fn conflict_keeps_message() {
        let response = error_response(ServiceError::Conflict("taken".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_of(response).await.error, "taken");
    }

    #[actix_web::test]
    async fn validation_errors_are_bad_requests() {
        assert_eq!(
            error_response(ServiceError::Form("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(ServiceError::TypeConstraint("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn repository_failures_do_not_leak() {
        let response = error_response(ServiceError::Repository(RepositoryError::DatabaseError(
            "disk I/O error".into(),
        )));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, "internal server error");
    }
}
