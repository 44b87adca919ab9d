use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::phone::{
    NewPhone as DomainNewPhone, Phone as DomainPhone, UpdatePhone as DomainUpdatePhone,
};
use crate::domain::types::{
    ClientId, PhoneExtension, PhoneId, PhoneNumber, PhoneTypeId, TypeConstraintError,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::phones)]
/// Diesel model for [`crate::domain::phone::Phone`].
pub struct Phone {
    pub id: i32,
    pub client_id: i32,
    pub phone_type_id: i32,
    pub number: String,
    pub extension: Option<String>,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::phones)]
pub struct NewPhone<'a> {
    pub client_id: i32,
    pub phone_type_id: i32,
    pub number: &'a str,
    pub extension: Option<&'a str>,
    pub is_primary: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::phones)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePhone<'a> {
    pub phone_type_id: i32,
    pub number: &'a str,
    pub extension: Option<&'a str>,
    pub is_primary: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Phone> for DomainPhone {
    type Error = TypeConstraintError;

    fn try_from(phone: Phone) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PhoneId::new(phone.id)?,
            client_id: ClientId::new(phone.client_id)?,
            phone_type_id: PhoneTypeId::new(phone.phone_type_id)?,
            number: PhoneNumber::new(phone.number)?,
            extension: phone.extension.map(PhoneExtension::new).transpose()?,
            is_primary: phone.is_primary,
            created_at: phone.created_at,
            updated_at: phone.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPhone> for NewPhone<'a> {
    fn from(phone: &'a DomainNewPhone) -> Self {
        Self {
            client_id: phone.client_id.get(),
            phone_type_id: phone.phone_type_id.get(),
            number: phone.number.as_str(),
            extension: phone.extension.as_ref().map(PhoneExtension::as_str),
            is_primary: phone.is_primary,
        }
    }
}

impl<'a> UpdatePhone<'a> {
    pub fn from_domain(phone: &'a DomainUpdatePhone, updated_at: NaiveDateTime) -> Self {
        Self {
            phone_type_id: phone.phone_type_id.get(),
            number: phone.number.as_str(),
            extension: phone.extension.as_ref().map(PhoneExtension::as_str),
            is_primary: phone.is_primary,
            updated_at,
        }
    }
}
