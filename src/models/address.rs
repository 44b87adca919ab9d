use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::address::{
    Address as DomainAddress, NewAddress as DomainNewAddress, UpdateAddress as DomainUpdateAddress,
};
use crate::domain::types::{
    AddressId, AddressTypeId, City, ClientId, CountryCode, PostalCode, Street,
    TypeConstraintError,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::addresses)]
/// Diesel model for [`crate::domain::address::Address`].
pub struct Address {
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress<'a> {
    pub client_id: i32,
    pub address_type_id: i32,
    pub street: &'a str,
    pub city: &'a str,
    pub postal_code: Option<&'a str>,
    pub country_code: &'a str,
    pub is_primary: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAddress<'a> {
    pub address_type_id: i32,
    pub street: &'a str,
    pub city: &'a str,
    pub postal_code: Option<&'a str>,
    pub country_code: &'a str,
    pub is_primary: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Address> for DomainAddress {
    type Error = TypeConstraintError;

    fn try_from(address: Address) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressId::new(address.id)?,
            client_id: ClientId::new(address.client_id)?,
            address_type_id: AddressTypeId::new(address.address_type_id)?,
            street: Street::new(address.street)?,
            city: City::new(address.city)?,
            postal_code: address.postal_code.map(PostalCode::new).transpose()?,
            country_code: CountryCode::new(address.country_code)?,
            is_primary: address.is_primary,
            created_at: address.created_at,
            updated_at: address.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(address: &'a DomainNewAddress) -> Self {
        Self {
            client_id: address.client_id.get(),
            address_type_id: address.address_type_id.get(),
            street: address.street.as_str(),
            city: address.city.as_str(),
            postal_code: address.postal_code.as_ref().map(PostalCode::as_str),
            country_code: address.country_code.as_str(),
            is_primary: address.is_primary,
        }
    }
}

impl<'a> UpdateAddress<'a> {
    pub fn from_domain(address: &'a DomainUpdateAddress, updated_at: NaiveDateTime) -> Self {
        Self {
            address_type_id: address.address_type_id.get(),
            street: address.street.as_str(),
            city: address.city.as_str(),
            postal_code: address.postal_code.as_ref().map(PostalCode::as_str),
            country_code: address.country_code.as_str(),
            is_primary: address.is_primary,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn address_into_domain_normalizes_country() {
        let now = Utc::now().naive_utc();
        let db = Address {
            id: 3,
            client_id: 1,
            address_type_id: 2,
            street: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: None,
            country_code: "us".into(),
            is_primary: true,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainAddress::try_from(db).expect("valid address");
        assert_eq!(domain.country_code.as_str(), "US");
        assert!(domain.postal_code.is_none());
    }
}
