use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientCode, ClientId, ClientName, ClientTypeId, Email, Notes, TaxId};

/// Client record as seen by the services.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub code: ClientCode,
    pub name: ClientName,
    pub client_type_id: ClientTypeId,
    pub tax_id: Option<TaxId>,
    pub email: Option<Email>,
    pub notes: Option<Notes>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub code: ClientCode,
    pub name: ClientName,
    pub client_type_id: ClientTypeId,
    pub tax_id: Option<TaxId>,
    pub email: Option<Email>,
    pub notes: Option<Notes>,
    pub is_active: bool,
}

impl NewClient {
    #[must_use]
    pub fn new(code: ClientCode, name: ClientName, client_type_id: ClientTypeId) -> Self {
        Self {
            code,
            name,
            client_type_id,
            tax_id: None,
            email: None,
            notes: None,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_tax_id(mut self, tax_id: Option<TaxId>) -> Self {
        self.tax_id = tax_id;
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = email;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<Notes>) -> Self {
        self.notes = notes.filter(|n| !n.is_empty());
        self
    }
}

/// Full replacement of the editable client fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub code: ClientCode,
    pub name: ClientName,
    pub client_type_id: ClientTypeId,
    pub tax_id: Option<TaxId>,
    pub email: Option<Email>,
    pub notes: Option<Notes>,
    pub is_active: bool,
}

impl From<NewClient> for UpdateClient {
    fn from(client: NewClient) -> Self {
        Self {
            code: client.code,
            name: client.name,
            client_type_id: client.client_type_id,
            tax_id: client.tax_id,
            email: client.email,
            notes: client.notes,
            is_active: client.is_active,
        }
    }
}
