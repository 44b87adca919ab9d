use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AddressId, AddressTypeId, City, ClientId, CountryCode, PostalCode, Street,
};

/// Postal address attached to a client. A client has at most one address per type.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub client_id: ClientId,
    pub address_type_id: AddressTypeId,
    pub street: Street,
    pub city: City,
    pub postal_code: Option<PostalCode>,
    pub country_code: CountryCode,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewAddress {
    pub client_id: ClientId,
    pub address_type_id: AddressTypeId,
    pub street: Street,
    pub city: City,
    pub postal_code: Option<PostalCode>,
    pub country_code: CountryCode,
    pub is_primary: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateAddress {
    pub address_type_id: AddressTypeId,
    pub street: Street,
    pub city: City,
    pub postal_code: Option<PostalCode>,
    pub country_code: CountryCode,
    pub is_primary: bool,
}
