//! Diesel models for the lookup tables.

use diesel::prelude::*;

use crate::domain::catalog::{
    AddressType as DomainAddressType, ClientType as DomainClientType, Country as DomainCountry,
    PhoneType as DomainPhoneType,
};
use crate::domain::types::{
    AddressTypeId, ClientTypeId, CountryCode, PhoneTypeId, TypeConstraintError,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::client_types)]
pub struct ClientType {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::address_types)]
pub struct AddressType {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::phone_types)]
pub struct PhoneType {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::countries)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl TryFrom<ClientType> for DomainClientType {
    type Error = TypeConstraintError;

    fn try_from(row: ClientType) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientTypeId::new(row.id)?,
            name: row.name,
        })
    }
}

impl TryFrom<AddressType> for DomainAddressType {
    type Error = TypeConstraintError;

    fn try_from(row: AddressType) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressTypeId::new(row.id)?,
            name: row.name,
        })
    }
}

impl TryFrom<PhoneType> for DomainPhoneType {
    type Error = TypeConstraintError;

    fn try_from(row: PhoneType) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PhoneTypeId::new(row.id)?,
            name: row.name,
        })
    }
}

impl TryFrom<Country> for DomainCountry {
    type Error = TypeConstraintError;

    fn try_from(row: Country) -> Result<Self, Self::Error> {
        Ok(Self {
            code: CountryCode::new(row.code)?,
            name: row.name,
        })
    }
}
