use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ContactId, ContactName, ContactPosition, Email, PhoneNumber};

/// Person to talk to at a client. Email is unique within a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub client_id: ClientId,
    pub name: ContactName,
    pub position: Option<ContactPosition>,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewContact {
    pub client_id: ClientId,
    pub name: ContactName,
    pub position: Option<ContactPosition>,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateContact {
    pub name: ContactName,
    pub position: Option<ContactPosition>,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
}
