//! Client detail page and the forms posted from it.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::api_client::{ApiClient, ApiClientError};
use crate::dto::api::{AddressPayload, ClientPayload, ContactPayload, PhonePayload};
use crate::forms::client::{AddressForm, ContactForm, PhoneForm, SaveClientForm};
use crate::routes::{base_context, flash_api_error, redirect, render_template};
use crate::services::frontend as frontend_service;

fn client_url(client_id: i32) -> String {
    format!("/client/{client_id}")
}

fn invalid_form(err: validator::ValidationErrors) {
    log::error!("Failed to validate form: {err}");
    FlashMessage::error("Form validation failed.").send();
}

#[get("/client/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match frontend_service::load_client_page(api.get_ref(), client_id.into_inner()).await
    {
        Ok(data) => data,
        Err(ApiClientError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            return redirect("/");
        }
        Err(err) => {
            flash_api_error(&err, "load client");
            return redirect("/");
        }
    };

    let mut context = base_context(&flash_messages, "client");
    context.insert("client", &data.client);
    context.insert("addresses", &data.addresses);
    context.insert("phones", &data.phones);
    context.insert("contacts", &data.contacts);
    context.insert("catalogs", &data.catalogs);

    render_template(&tera, "client/index.html", &context)
}

#[post("/client/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&client_url(client_id));
    }

    match api
        .update_client(client_id, &ClientPayload::from(form))
        .await
    {
        Ok(_) => FlashMessage::success("Client updated.").send(),
        Err(err) => flash_api_error(&err, "update client"),
    }

    redirect(&client_url(client_id))
}

#[post("/client/{client_id}/addresses/add")]
pub async fn add_address(
    client_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AddressForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&client_url(client_id));
    }

    match api
        .create_address(client_id, &AddressPayload::from(form))
        .await
    {
        Ok(_) => FlashMessage::success("Address added.").send(),
        Err(err) => flash_api_error(&err, "add address"),
    }

    redirect(&client_url(client_id))
}

#[post("/addresses/{address_id}/save")]
pub async fn save_address(
    address_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AddressForm>,
) -> impl Responder {
    let address_id = address_id.into_inner();
    let back = match api.get_address(address_id).await {
        Ok(address) => client_url(address.client_id),
        Err(err) => {
            flash_api_error(&err, "load address");
            return redirect("/");
        }
    };

    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&back);
    }

    match api
        .update_address(address_id, &AddressPayload::from(form))
        .await
    {
        Ok(_) => FlashMessage::success("Address updated.").send(),
        Err(err) => flash_api_error(&err, "update address"),
    }

    redirect(&back)
}

#[post("/client/{client_id}/phones/add")]
pub async fn add_phone(
    client_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<PhoneForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&client_url(client_id));
    }

    match api.create_phone(client_id, &PhonePayload::from(form)).await {
        Ok(_) => FlashMessage::success("Phone added.").send(),
        Err(err) => flash_api_error(&err, "add phone"),
    }

    redirect(&client_url(client_id))
}

#[post("/phones/{phone_id}/save")]
pub async fn save_phone(
    phone_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<PhoneForm>,
) -> impl Responder {
    let phone_id = phone_id.into_inner();
    let back = match api.get_phone(phone_id).await {
        Ok(phone) => client_url(phone.client_id),
        Err(err) => {
            flash_api_error(&err, "load phone");
            return redirect("/");
        }
    };

    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&back);
    }

    match api.update_phone(phone_id, &PhonePayload::from(form)).await {
        Ok(_) => FlashMessage::success("Phone updated.").send(),
        Err(err) => flash_api_error(&err, "update phone"),
    }

    redirect(&back)
}

#[post("/client/{client_id}/contacts/add")]
pub async fn add_contact(
    client_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&client_url(client_id));
    }

    match api
        .create_contact(client_id, &ContactPayload::from(form))
        .await
    {
        Ok(_) => FlashMessage::success("Contact added.").send(),
        Err(err) => flash_api_error(&err, "add contact"),
    }

    redirect(&client_url(client_id))
}

#[post("/contacts/{contact_id}/save")]
pub async fn save_contact(
    contact_id: web::Path<i32>,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let contact_id = contact_id.into_inner();
    let back = match api.get_contact(contact_id).await {
        Ok(contact) => client_url(contact.client_id),
        Err(err) => {
            flash_api_error(&err, "load contact");
            return redirect("/");
        }
    };

    if let Err(e) = form.validate() {
        invalid_form(e);
        return redirect(&back);
    }

    match api
        .update_contact(contact_id, &ContactPayload::from(form))
        .await
    {
        Ok(_) => FlashMessage::success("Contact updated.").send(),
        Err(err) => flash_api_error(&err, "update contact"),
    }

    redirect(&back)
}
