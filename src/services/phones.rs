//! Phone numbers nested under a client.

use crate::domain::phone::{Phone, UpdatePhone};
use crate::domain::types::{PhoneId, PhoneTypeId};
use crate::dto::api::{PhonePayload, PhonesQuery};
use crate::repository::{CatalogReader, ClientReader, PhoneListQuery, PhoneReader, PhoneWriter};
use crate::services::catalogs::ensure_phone_type;
use crate::services::{ServiceError, ServiceResult, parse_id, require_client};

pub fn list_client_phones<R>(
    repo: &R,
    client_id: i32,
    params: PhonesQuery,
) -> ServiceResult<Vec<Phone>>
where
    R: ClientReader + PhoneReader + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let mut query = PhoneListQuery::new(client_id);

    if let Some(raw) = params.phone_type_id {
        match PhoneTypeId::new(raw) {
            Ok(id) => query = query.phone_type(id),
            Err(_) => return Ok(Vec::new()),
        }
    }

    Ok(repo.list_phones(query)?)
}

pub fn get_phone<R>(repo: &R, phone_id: i32) -> ServiceResult<Phone>
where
    R: PhoneReader + ?Sized,
{
    let phone_id = parse_id(phone_id, PhoneId::new)?;
    repo.get_phone_by_id(phone_id)?.ok_or(ServiceError::NotFound)
}

/// Adds a number to a client after normalizing it to E.164.
pub fn create_phone<R>(repo: &R, client_id: i32, payload: PhonePayload) -> ServiceResult<Phone>
where
    R: ClientReader + PhoneWriter + CatalogReader + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let new_phone = payload.into_new_phone(client_id)?;
    ensure_phone_type(repo, new_phone.phone_type_id)?;

    repo.create_phone(&new_phone).map_err(|err| {
        log::error!(
            "Failed to add phone {} to client {client_id}: {err}",
            new_phone.number
        );
        ServiceError::from(err)
    })
}

pub fn update_phone<R>(repo: &R, phone_id: i32, payload: PhonePayload) -> ServiceResult<Phone>
where
    R: PhoneWriter + CatalogReader + ?Sized,
{
    let phone_id = parse_id(phone_id, PhoneId::new)?;
    let updates = UpdatePhone::try_from(payload)?;
    ensure_phone_type(repo, updates.phone_type_id)?;

    Ok(repo.update_phone(phone_id, &updates)?)
}
