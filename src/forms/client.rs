//! Forms posted from the client detail page.

use serde::Deserialize;
use validator::Validate;

use crate::dto::api::{AddressPayload, ClientPayload, ContactPayload, PhonePayload};
use crate::forms::non_blank;

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct SaveClientForm {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub client_type_id: i32,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    /// Unchecked checkboxes are not submitted at all.
    #[serde(default)]
    pub is_active: bool,
}

impl From<SaveClientForm> for ClientPayload {
    fn from(form: SaveClientForm) -> Self {
        Self {
            code: form.code,
            name: form.name,
            client_type_id: form.client_type_id,
            tax_id: non_blank(form.tax_id),
            email: non_blank(form.email),
            notes: non_blank(form.notes),
            is_active: form.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddressForm {
    #[validate(range(min = 1))]
    pub address_type_id: i32,
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub postal_code: Option<String>,
    #[validate(length(equal = 2))]
    pub country_code: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<AddressForm> for AddressPayload {
    fn from(form: AddressForm) -> Self {
        Self {
            address_type_id: form.address_type_id,
            street: form.street,
            city: form.city,
            postal_code: non_blank(form.postal_code),
            country_code: form.country_code,
            is_primary: form.is_primary,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PhoneForm {
    #[validate(range(min = 1))]
    pub phone_type_id: i32,
    #[validate(length(min = 1))]
    pub number: String,
    pub extension: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<PhoneForm> for PhonePayload {
    fn from(form: PhoneForm) -> Self {
        Self {
            phone_type_id: form.phone_type_id,
            number: form.number,
            extension: non_blank(form.extension),
            is_primary: form.is_primary,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub position: Option<String>,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

impl From<ContactForm> for ContactPayload {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            position: non_blank(form.position),
            email: form.email,
            phone: non_blank(form.phone),
        }
    }
}
