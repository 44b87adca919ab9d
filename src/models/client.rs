use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientCode, ClientId, ClientName, ClientTypeId, Email, Notes, TaxId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub client_type_id: i32,
    pub tax_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub client_type_id: i32,
    pub tax_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            code: ClientCode::new(client.code)?,
            name: ClientName::new(client.name)?,
            client_type_id: ClientTypeId::new(client.client_type_id)?,
            tax_id: client.tax_id.map(TaxId::new).transpose()?,
            email: client.email.map(Email::new).transpose()?,
            notes: client.notes.map(Notes::new).transpose()?,
            is_active: client.is_active,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            code: client.code.as_str(),
            name: client.name.as_str(),
            client_type_id: client.client_type_id.get(),
            tax_id: client.tax_id.as_ref().map(TaxId::as_str),
            email: client.email.as_ref().map(Email::as_str),
            notes: client.notes.as_ref().map(Notes::as_str),
            is_active: client.is_active,
        }
    }
}

impl<'a> UpdateClient<'a> {
    /// Builds the changeset stamping `updated_at` with the provided time.
    pub fn from_domain(client: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            code: client.code.as_str(),
            name: client.name.as_str(),
            client_type_id: client.client_type_id.get(),
            tax_id: client.tax_id.as_ref().map(TaxId::as_str),
            email: client.email.as_ref().map(Email::as_str),
            notes: client.notes.as_ref().map(Notes::as_str),
            is_active: client.is_active,
            updated_at,
        }
    }
}
