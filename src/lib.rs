#[cfg(feature = "web")]
use std::time::Duration;

#[cfg(feature = "api")]
use actix_cors::Cors;
#[cfg(feature = "web")]
use actix_files::Files;
#[cfg(feature = "web")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "web")]
use actix_web::cookie::Key;
#[cfg(any(feature = "api", feature = "web"))]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "web")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "web")]
use tera::Tera;

#[cfg(feature = "web")]
use crate::api_client::ApiClient;
#[cfg(feature = "api")]
use crate::db::DbPool;
#[cfg(feature = "web")]
use crate::models::config::WebServerConfig;
#[cfg(feature = "api")]
use crate::repository::DieselRepository;

#[cfg(feature = "web")]
pub mod api_client;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "web")]
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(any(feature = "api", feature = "web"))]
pub mod routes;
pub mod schema;
pub mod services;

/// Largest JSON body the API accepts, sized for a batch built from a full CSV upload.
#[cfg(feature = "api")]
pub const MAX_JSON_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Wires the JSON API handlers, JSON error handling and shared state into `cfg`.
///
/// Shared between [`run_api`] and the integration tests.
#[cfg(feature = "api")]
pub fn configure_api(cfg: &mut web::ServiceConfig, repo: DieselRepository) {
    use actix_web::HttpResponse;
    use actix_web::error::InternalError;

    use crate::dto::api::ErrorResponse;

    let json_config = web::JsonConfig::default()
        .limit(MAX_JSON_PAYLOAD_SIZE)
        .error_handler(|err, _req| {
            let body = ErrorResponse {
                error: err.to_string(),
            };
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .app_data(query_config)
        .app_data(web::Data::new(repo))
        .configure(routes::api::configure);
}

/// Builds and runs the JSON API server on an already migrated pool.
#[cfg(feature = "api")]
pub async fn run_api(
    server_config: crate::models::config::ApiServerConfig,
    pool: DbPool,
) -> std::io::Result<()> {
    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting clients API on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(|cfg| configure_api(cfg, repo.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Builds and runs the server-rendered front end.
#[cfg(feature = "web")]
pub async fn run_web(server_config: WebServerConfig) -> std::io::Result<()> {
    use crate::routes::client::{
        add_address, add_contact, add_phone, save_address, save_client, save_contact, save_phone,
        show_client,
    };
    use crate::routes::main::{add_client, clients_grid, clients_upload, new_client, show_index};

    let api = ApiClient::new(
        &server_config.api_url,
        Duration::from_secs(server_config.api_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting clients front end on {}:{} against {}",
        server_config.address,
        server_config.port,
        api.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(clients_grid)
            .service(new_client)
            .service(add_client)
            .service(clients_upload)
            .service(show_client)
            .service(save_client)
            .service(add_address)
            .service(save_address)
            .service(add_phone)
            .service(save_phone)
            .service(add_contact)
            .service(save_contact)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
