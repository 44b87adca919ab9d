use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, PhoneExtension, PhoneId, PhoneNumber, PhoneTypeId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Phone {
    pub id: PhoneId,
    pub client_id: ClientId,
    pub phone_type_id: PhoneTypeId,
    pub number: PhoneNumber,
    pub extension: Option<PhoneExtension>,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPhone {
    pub client_id: ClientId,
    pub phone_type_id: PhoneTypeId,
    pub number: PhoneNumber,
    pub extension: Option<PhoneExtension>,
    pub is_primary: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdatePhone {
    pub phone_type_id: PhoneTypeId,
    pub number: PhoneNumber,
    pub extension: Option<PhoneExtension>,
    pub is_primary: bool,
}
