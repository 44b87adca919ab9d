use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::api_client::ApiClient;
use crate::dto::api::ClientPayload;
use crate::forms::main::{AddClientForm, UploadClientsForm};
use crate::routes::{base_context, flash_api_error, redirect, render_template};
use crate::services::frontend::{self as frontend_service, GridQuery};

#[get("/")]
pub async fn show_index(
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    // The grid still works without filter options, so a catalog failure only degrades the page.
    let catalogs = match frontend_service::load_catalogs(api.get_ref()).await {
        Ok(catalogs) => catalogs,
        Err(err) => {
            log::error!("Failed to load catalogs: {err}");
            Default::default()
        }
    };

    let mut context = base_context(&flash_messages, "index");
    context.insert("client_types", &catalogs.client_types);

    render_template(&tera, "main/index.html", &context)
}

/// JSON feed consumed by the clients grid.
#[get("/clients/grid")]
pub async fn clients_grid(
    params: web::Query<GridQuery>,
    api: web::Data<ApiClient>,
) -> impl Responder {
    match frontend_service::load_clients_grid(api.get_ref(), params.into_inner()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => {
            log::error!("Failed to load clients grid: {err}");
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/clients/new")]
pub async fn new_client(
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let catalogs = match frontend_service::load_catalogs(api.get_ref()).await {
        Ok(catalogs) => catalogs,
        Err(err) => {
            flash_api_error(&err, "load catalogs");
            return redirect("/");
        }
    };

    let mut context = base_context(&flash_messages, "new_client");
    context.insert("client_types", &catalogs.client_types);

    render_template(&tera, "client/new.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed.").send();
        return redirect("/clients/new");
    }

    let payload = ClientPayload::from(form);
    match api.create_client(&payload).await {
        Ok(client) => {
            FlashMessage::success("Client added.").send();
            redirect(&format!("/client/{}", client.id))
        }
        Err(err) => {
            flash_api_error(&err, "add client");
            redirect("/clients/new")
        }
    }
}

#[post("/clients/upload")]
pub async fn clients_upload(
    api: web::Data<ApiClient>,
    MultipartForm(mut form): MultipartForm<UploadClientsForm>,
) -> impl Responder {
    let payloads = match form.parse() {
        Ok(payloads) => payloads,
        Err(err) => {
            FlashMessage::error(format!("Failed to parse clients: {err}")).send();
            return redirect("/");
        }
    };

    match api.import_clients(&payloads).await {
        Ok(batch) => {
            FlashMessage::success(format!("Clients imported: {}.", batch.created)).send();
        }
        Err(err) => flash_api_error(&err, "import clients"),
    }

    redirect("/")
}
