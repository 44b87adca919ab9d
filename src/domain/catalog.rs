//! Read-only lookup lists seeded by migrations.

use serde::{Deserialize, Serialize};

use crate::domain::types::{AddressTypeId, ClientTypeId, CountryCode, PhoneTypeId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientType {
    pub id: ClientTypeId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressType {
    pub id: AddressTypeId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneType {
    pub id: PhoneTypeId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub code: CountryCode,
    pub name: String,
}

/// All catalogs bundled together for forms that need every lookup list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalogs {
    pub client_types: Vec<ClientType>,
    pub address_types: Vec<AddressType>,
    pub phone_types: Vec<PhoneType>,
    pub countries: Vec<Country>,
}
