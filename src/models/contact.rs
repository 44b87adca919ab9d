use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};
use crate::domain::types::{
    ClientId, ContactId, ContactName, ContactPosition, Email, PhoneNumber, TypeConstraintError,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub position: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct NewContact<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub position: Option<&'a str>,
    pub email: &'a str,
    pub phone: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateContact<'a> {
    pub name: &'a str,
    pub position: Option<&'a str>,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(contact.id)?,
            client_id: ClientId::new(contact.client_id)?,
            name: ContactName::new(contact.name)?,
            position: contact.position.map(ContactPosition::new).transpose()?,
            email: Email::new(contact.email)?,
            phone: contact.phone.map(PhoneNumber::new).transpose()?,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            client_id: contact.client_id.get(),
            name: contact.name.as_str(),
            position: contact.position.as_ref().map(ContactPosition::as_str),
            email: contact.email.as_str(),
            phone: contact.phone.as_ref().map(PhoneNumber::as_str),
        }
    }
}

impl<'a> UpdateContact<'a> {
    pub fn from_domain(contact: &'a DomainUpdateContact, updated_at: NaiveDateTime) -> Self {
        Self {
            name: contact.name.as_str(),
            position: contact.position.as_ref().map(ContactPosition::as_str),
            email: contact.email.as_str(),
            phone: contact.phone.as_ref().map(PhoneNumber::as_str),
            updated_at,
        }
    }
}
