//! Transport objects exchanged between the JSON API and its HTTP callers.
//!
//! The same types are serialized by the API handlers and deserialized by the
//! front end's REST helper, so both tiers agree on the wire shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, NewAddress, UpdateAddress};
use crate::domain::catalog::{AddressType, Catalogs, ClientType, Country, PhoneType};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::phone::{NewPhone, Phone, UpdatePhone};
use crate::domain::types::{
    AddressTypeId, City, ClientCode, ClientId, ClientName, ClientTypeId, ContactName,
    ContactPosition, CountryCode, Email, Notes, PhoneExtension, PhoneNumber, PhoneTypeId,
    PostalCode, Street, TaxId, TypeConstraintError, optional,
};

/// Query string accepted by `GET /api/v1/clients`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientsQuery {
    pub search: Option<String>,
    pub client_type_id: Option<i32>,
    pub is_active: Option<bool>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddressesQuery {
    pub address_type_id: Option<i32>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PhonesQuery {
    pub phone_type_id: Option<i32>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactsQuery {
    pub search: Option<String>,
}

/// One page of a filtered list together with the unpaginated total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchResponse {
    pub created: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItemDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryDto {
    pub code: String,
    pub name: String,
}

/// Every catalog in transport form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogsDto {
    pub client_types: Vec<CatalogItemDto>,
    pub address_types: Vec<CatalogItemDto>,
    pub phone_types: Vec<CatalogItemDto>,
    pub countries: Vec<CountryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDto {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub client_type_id: i32,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressDto {
    pub id: i32,
    pub client_id: i32,
    pub address_type_id: i32,
    pub street: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country_code: String,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoneDto {
    pub id: i32,
    pub client_id: i32,
    pub phone_type_id: i32,
    pub number: String,
    pub extension: Option<String>,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactDto {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub position: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_true() -> bool {
    true
}

/// Body of client create/update requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientPayload {
    pub code: String,
    pub name: String,
    pub client_type_id: i32,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressPayload {
    pub address_type_id: i32,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country_code: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhonePayload {
    pub phone_type_id: i32,
    pub number: String,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactPayload {
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl TryFrom<ClientPayload> for NewClient {
    type Error = TypeConstraintError;

    fn try_from(payload: ClientPayload) -> Result<Self, Self::Error> {
        let mut client = NewClient::new(
            ClientCode::new(payload.code)?,
            ClientName::new(payload.name)?,
            ClientTypeId::new(payload.client_type_id)?,
        )
        .with_tax_id(optional(payload.tax_id, TaxId::new)?)
        .with_email(optional(payload.email, Email::new)?)
        .with_notes(optional(payload.notes, Notes::new)?);
        client.is_active = payload.is_active;
        Ok(client)
    }
}

impl TryFrom<ClientPayload> for UpdateClient {
    type Error = TypeConstraintError;

    fn try_from(payload: ClientPayload) -> Result<Self, Self::Error> {
        NewClient::try_from(payload).map(UpdateClient::from)
    }
}

impl AddressPayload {
    pub fn into_new_address(self, client_id: ClientId) -> Result<NewAddress, TypeConstraintError> {
        let update = UpdateAddress::try_from(self)?;
        Ok(NewAddress {
            client_id,
            address_type_id: update.address_type_id,
            street: update.street,
            city: update.city,
            postal_code: update.postal_code,
            country_code: update.country_code,
            is_primary: update.is_primary,
        })
    }
}

impl TryFrom<AddressPayload> for UpdateAddress {
    type Error = TypeConstraintError;

    fn try_from(payload: AddressPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            address_type_id: AddressTypeId::new(payload.address_type_id)?,
            street: Street::new(payload.street)?,
            city: City::new(payload.city)?,
            postal_code: optional(payload.postal_code, PostalCode::new)?,
            country_code: CountryCode::new(payload.country_code)?,
            is_primary: payload.is_primary,
        })
    }
}

impl PhonePayload {
    pub fn into_new_phone(self, client_id: ClientId) -> Result<NewPhone, TypeConstraintError> {
        let update = UpdatePhone::try_from(self)?;
        Ok(NewPhone {
            client_id,
            phone_type_id: update.phone_type_id,
            number: update.number,
            extension: update.extension,
            is_primary: update.is_primary,
        })
    }
}

impl TryFrom<PhonePayload> for UpdatePhone {
    type Error = TypeConstraintError;

    fn try_from(payload: PhonePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            phone_type_id: PhoneTypeId::new(payload.phone_type_id)?,
            number: PhoneNumber::new(payload.number)?,
            extension: optional(payload.extension, PhoneExtension::new)?,
            is_primary: payload.is_primary,
        })
    }
}

impl ContactPayload {
    pub fn into_new_contact(self, client_id: ClientId) -> Result<NewContact, TypeConstraintError> {
        let update = UpdateContact::try_from(self)?;
        Ok(NewContact {
            client_id,
            name: update.name,
            position: update.position,
            email: update.email,
            phone: update.phone,
        })
    }
}

impl TryFrom<ContactPayload> for UpdateContact {
    type Error = TypeConstraintError;

    fn try_from(payload: ContactPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: ContactName::new(payload.name)?,
            position: optional(payload.position, ContactPosition::new)?,
            email: Email::new(payload.email)?,
            phone: optional(payload.phone, PhoneNumber::new)?,
        })
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.get(),
            code: client.code.into_inner(),
            name: client.name.into_inner(),
            client_type_id: client.client_type_id.get(),
            tax_id: client.tax_id.map(TaxId::into_inner),
            email: client.email.map(Email::into_inner),
            notes: client.notes.map(Notes::into_inner),
            is_active: client.is_active,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.get(),
            client_id: address.client_id.get(),
            address_type_id: address.address_type_id.get(),
            street: address.street.into_inner(),
            city: address.city.into_inner(),
            postal_code: address.postal_code.map(PostalCode::into_inner),
            country_code: address.country_code.into_inner(),
            is_primary: address.is_primary,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

impl From<Phone> for PhoneDto {
    fn from(phone: Phone) -> Self {
        Self {
            id: phone.id.get(),
            client_id: phone.client_id.get(),
            phone_type_id: phone.phone_type_id.get(),
            number: phone.number.into_inner(),
            extension: phone.extension.map(PhoneExtension::into_inner),
            is_primary: phone.is_primary,
            created_at: phone.created_at,
            updated_at: phone.updated_at,
        }
    }
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.get(),
            client_id: contact.client_id.get(),
            name: contact.name.into_inner(),
            position: contact.position.map(ContactPosition::into_inner),
            email: contact.email.into_inner(),
            phone: contact.phone.map(PhoneNumber::into_inner),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl From<ClientType> for CatalogItemDto {
    fn from(item: ClientType) -> Self {
        Self {
            id: item.id.get(),
            name: item.name,
        }
    }
}

impl From<AddressType> for CatalogItemDto {
    fn from(item: AddressType) -> Self {
        Self {
            id: item.id.get(),
            name: item.name,
        }
    }
}

impl From<PhoneType> for CatalogItemDto {
    fn from(item: PhoneType) -> Self {
        Self {
            id: item.id.get(),
            name: item.name,
        }
    }
}

impl From<Country> for CountryDto {
    fn from(country: Country) -> Self {
        Self {
            code: country.code.into_inner(),
            name: country.name,
        }
    }
}

impl From<Catalogs> for CatalogsDto {
    fn from(catalogs: Catalogs) -> Self {
        Self {
            client_types: catalogs.client_types.into_iter().map(Into::into).collect(),
            address_types: catalogs.address_types.into_iter().map(Into::into).collect(),
            phone_types: catalogs.phone_types.into_iter().map(Into::into).collect(),
            countries: catalogs.countries.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_payload() -> ClientPayload {
        ClientPayload {
            code: "acme".into(),
            name: "Acme".into(),
            client_type_id: 1,
            tax_id: Some("".into()),
            email: Some(" Sales@Acme.io ".into()),
            notes: None,
            is_active: true,
        }
    }

    #[test]
    fn client_payload_is_normalized() {
        let client = NewClient::try_from(client_payload()).expect("valid payload");
        assert_eq!(client.code.as_str(), "ACME");
        assert_eq!(client.tax_id, None);
        assert_eq!(client.email.as_ref().map(Email::as_str), Some("sales@acme.io"));
    }

    #[test]
    fn client_payload_defaults_to_active() {
        let payload: ClientPayload =
            serde_json::from_str(r#"{"code":"A1","name":"A","client_type_id":1}"#).unwrap();
        assert!(payload.is_active);
        assert_eq!(payload.tax_id, None);
    }

    #[test]
    fn client_payload_rejects_bad_type() {
        let mut payload = client_payload();
        payload.client_type_id = 0;
        assert_eq!(
            NewClient::try_from(payload),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn address_payload_attaches_client() {
        let payload = AddressPayload {
            address_type_id: 1,
            street: " 1 Main St ".into(),
            city: "Berlin".into(),
            postal_code: Some("10115".into()),
            country_code: "de".into(),
            is_primary: true,
        };
        let address = payload
            .into_new_address(ClientId::new(4).unwrap())
            .expect("valid address");
        assert_eq!(address.client_id.get(), 4);
        assert_eq!(address.street.as_str(), "1 Main St");
        assert_eq!(address.country_code.as_str(), "DE");
    }

    #[test]
    fn contact_payload_requires_email() {
        let payload = ContactPayload {
            name: "Jane".into(),
            position: None,
            email: "".into(),
            phone: None,
        };
        assert!(UpdateContact::try_from(payload).is_err());
    }
}
