//! HTTP handlers for the JSON API and the server-rendered front end.

use actix_web::HttpResponse;
use actix_web::http::header;
#[cfg(feature = "web")]
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
#[cfg(feature = "web")]
use tera::{Context, Tera};

#[cfg(feature = "web")]
use crate::api_client::ApiClientError;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "web")]
pub mod client;
#[cfg(feature = "web")]
pub mod main;

/// Maps a flash message level onto the Bootstrap alert class used by templates.
#[cfg(feature = "web")]
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Template context shared by every page: pending alerts and the active menu item.
#[cfg(feature = "web")]
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

#[cfg(feature = "web")]
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flashes the outcome of a failed API call. Messages from validation and
/// conflict responses are shown verbatim; anything else is logged.
#[cfg(feature = "web")]
pub fn flash_api_error(err: &ApiClientError, action: &str) {
    match err {
        ApiClientError::Conflict(message) | ApiClientError::Validation(message) => {
            FlashMessage::error(message.clone()).send();
        }
        ApiClientError::NotFound => {
            FlashMessage::error("Record not found.").send();
        }
        other => {
            log::error!("Failed to {action}: {other}");
            FlashMessage::error(format!("Failed to {action}.")).send();
        }
    }
}
