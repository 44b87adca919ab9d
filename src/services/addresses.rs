//! Addresses nested under a client.

use crate::domain::address::{Address, UpdateAddress};
use crate::domain::types::{AddressId, AddressTypeId};
use crate::dto::api::{AddressPayload, AddressesQuery};
use crate::repository::{
    AddressListQuery, AddressReader, AddressWriter, CatalogReader, ClientReader,
};
use crate::services::catalogs::{ensure_address_type, ensure_country};
use crate::services::{ServiceError, ServiceResult, parse_id, require_client};

/// Lists the addresses of a client, optionally narrowed to one type.
pub fn list_client_addresses<R>(
    repo: &R,
    client_id: i32,
    params: AddressesQuery,
) -> ServiceResult<Vec<Address>>
where
    R: ClientReader + AddressReader + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let mut query = AddressListQuery::new(client_id);

    if let Some(raw) = params.address_type_id {
        match AddressTypeId::new(raw) {
            Ok(id) => query = query.address_type(id),
            Err(_) => return Ok(Vec::new()),
        }
    }

    repo.list_addresses(query).map_err(ServiceError::from)
}

pub fn get_address<R>(repo: &R, address_id: i32) -> ServiceResult<Address>
where
    R: AddressReader + ?Sized,
{
    let address_id = parse_id(address_id, AddressId::new)?;
    repo.get_address_by_id(address_id)?
        .ok_or(ServiceError::NotFound)
}

/// Adds an address to a client. Marking it primary demotes the client's other addresses.
pub fn create_address<R>(repo: &R, client_id: i32, payload: AddressPayload) -> ServiceResult<Address>
where
    R: ClientReader + AddressWriter + CatalogReader + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let new_address = payload.into_new_address(client_id)?;
    ensure_address_type(repo, new_address.address_type_id)?;
    ensure_country(repo, &new_address.country_code)?;

    repo.create_address(&new_address).map_err(|err| {
        log::error!("Failed to add address to client {client_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn update_address<R>(
    repo: &R,
    address_id: i32,
    payload: AddressPayload,
) -> ServiceResult<Address>
where
    R: AddressWriter + CatalogReader + ?Sized,
{
    let address_id = parse_id(address_id, AddressId::new)?;
    let updates = UpdateAddress::try_from(payload)?;
    ensure_address_type(repo, updates.address_type_id)?;
    ensure_country(repo, &updates.country_code)?;

    repo.update_address(address_id, &updates)
        .map_err(ServiceError::from)
}
